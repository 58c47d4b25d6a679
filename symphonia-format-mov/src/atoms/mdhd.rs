// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::{unsupported_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

/// Media header atom.
#[derive(Debug)]
pub struct MdhdAtom {
    /// Timescale.
    pub timescale: u32,
    /// Duration of the media in timescale units.
    pub duration: u32,
}

impl Atom for MdhdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (version, _) = header.read_extended_header(reader)?;

        if version > 1 {
            return unsupported_error("mov (mdhd): unknown version");
        }

        // Creation and modification times.
        reader.ignore_bytes(if version == 1 { 16 } else { 8 })?;

        let timescale = reader.read_be_u32()?;

        // Only the low 32-bits of a version 1 duration are kept.
        if version == 1 {
            let _ = reader.read_be_u32()?;
        }
        let duration = reader.read_be_u32()?;

        // Language and quality.
        reader.ignore_bytes(4)?;

        Ok(MdhdAtom { timescale, duration })
    }
}

#[cfg(test)]
mod tests {
    use symphonia_core::errors::Error;
    use symphonia_core::io::BufReader;

    use super::MdhdAtom;
    use crate::atoms::{Atom, AtomHeader, AtomType};

    #[test]
    fn media_header_versions() {
        let mut v0 = vec![0, 0, 0, 0];
        v0.extend_from_slice(&[0; 8]);
        v0.extend_from_slice(&[0, 0, 0xac, 0x44, 0, 0, 0x10, 0, 0, 0, 0, 0]);

        let header = AtomHeader::synthetic(AtomType::MediaHeader, 0, v0.len() as u64);
        let mdhd = MdhdAtom::read(&mut BufReader::new(&v0), header).unwrap();

        assert_eq!((mdhd.timescale, mdhd.duration), (44100, 4096));

        let mut v1 = vec![1, 0, 0, 0];
        v1.extend_from_slice(&[0; 16]);
        v1.extend_from_slice(&[0, 0, 0xac, 0x44, 0, 0, 0, 1, 0, 0, 0x10, 0, 0, 0, 0, 0]);

        let header = AtomHeader::synthetic(AtomType::MediaHeader, 0, v1.len() as u64);
        let mdhd = MdhdAtom::read(&mut BufReader::new(&v1), header).unwrap();

        assert_eq!((mdhd.timescale, mdhd.duration), (44100, 4096));
    }

    #[test]
    fn unknown_version() {
        let data = [2, 0, 0, 0, 0, 0, 0, 0];

        let header = AtomHeader::synthetic(AtomType::MediaHeader, 0, data.len() as u64);

        match MdhdAtom::read(&mut BufReader::new(&data), header) {
            Err(Error::Unsupported(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }
}
