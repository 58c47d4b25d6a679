// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

use log::{trace, warn};

/// Sync sample atom.
#[derive(Debug)]
pub struct StssAtom {
    /// Keyframe sample numbers, indexed from 0.
    pub keyframes: Vec<u32>,
}

impl Atom for StssAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let entry_count = header.read_entry_count(reader, 4)?;

        let mut keyframes = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            let number = reader.read_be_u32()?;

            // Sample numbers are stored indexed from 1.
            if number == 0 {
                warn!("mov (stss): keyframe sample number is 0");
            }

            let keyframe = number.saturating_sub(1);

            trace!("mov (stss): keyframe={}", keyframe);

            keyframes.push(keyframe);
        }

        Ok(StssAtom { keyframes })
    }
}

#[cfg(test)]
mod tests {
    use symphonia_core::io::BufReader;

    use super::StssAtom;
    use crate::atoms::{Atom, AtomHeader, AtomType};

    #[test]
    fn keyframes_are_indexed_from_zero() {
        let data = [0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 25, 0, 0, 0, 49];

        let header = AtomHeader::synthetic(AtomType::SyncSample, 0, data.len() as u64);
        let stss = StssAtom::read(&mut BufReader::new(&data), header).unwrap();

        assert_eq!(stss.keyframes, [0, 24, 48]);
    }

    #[test]
    fn zero_sample_number_is_clamped() {
        let data = [0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 5];

        let header = AtomHeader::synthetic(AtomType::SyncSample, 0, data.len() as u64);
        let stss = StssAtom::read(&mut BufReader::new(&data), header).unwrap();

        assert_eq!(stss.keyframes, [0, 4]);
    }
}
