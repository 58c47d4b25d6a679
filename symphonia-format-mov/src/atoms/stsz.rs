// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::{limit_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

/// Sample size atom.
#[derive(Debug)]
pub struct StszAtom {
    /// The size of every sample, or 0 if the samples have individual sizes.
    pub sample_size: u32,
    /// The total number of samples.
    pub sample_count: u32,
    /// Individual sample sizes. Empty if `sample_size` is not 0.
    pub sample_sizes: Vec<u32>,
}

impl Atom for StszAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let sample_size = reader.read_be_u32()?;
        let sample_count = reader.read_be_u32()?;

        // A constant sample size is not followed by a table.
        if sample_size != 0 {
            return Ok(StszAtom { sample_size, sample_count, sample_sizes: Vec::new() });
        }

        if u64::from(sample_count) * 4 > header.data_unread_at(reader.pos()) {
            return limit_error("mov (stsz): sample count exceeds atom size");
        }

        let mut sample_sizes = Vec::with_capacity(sample_count as usize);

        for _ in 0..sample_count {
            sample_sizes.push(reader.read_be_u32()?);
        }

        Ok(StszAtom { sample_size, sample_count, sample_sizes })
    }
}

#[cfg(test)]
mod tests {
    use symphonia_core::io::BufReader;

    use super::StszAtom;
    use crate::atoms::{Atom, AtomHeader, AtomType};

    #[test]
    fn constant_sample_size() {
        let data = [0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 100];

        let header = AtomHeader::synthetic(AtomType::SampleSize, 0, data.len() as u64);
        let stsz = StszAtom::read(&mut BufReader::new(&data), header).unwrap();

        assert_eq!(stsz.sample_size, 512);
        assert_eq!(stsz.sample_count, 100);
        assert!(stsz.sample_sizes.is_empty());
    }

    #[test]
    fn sample_size_table() {
        let data = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1, 0, 0, 0, 0, 9];

        let header = AtomHeader::synthetic(AtomType::SampleSize, 0, data.len() as u64);
        let stsz = StszAtom::read(&mut BufReader::new(&data), header).unwrap();

        assert_eq!(stsz.sample_sizes, [256, 9]);
    }
}
