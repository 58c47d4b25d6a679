// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::track::TimeToSampleEntry;

use log::trace;

/// Time-to-sample atom.
#[derive(Debug)]
pub struct SttsAtom {
    pub entries: Vec<TimeToSampleEntry>,
    /// The total number of samples described by all entries.
    pub total_sample_count: u32,
}

impl Atom for SttsAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let entry_count = header.read_entry_count(reader, 8)?;

        let mut total_sample_count = 0u32;

        let mut entries = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            let count = reader.read_be_u32()?;
            let duration = reader.read_be_u32()?;

            trace!("mov (stts): count={}, duration={}", count, duration);

            total_sample_count = total_sample_count.wrapping_add(count);

            entries.push(TimeToSampleEntry { count, duration });
        }

        Ok(SttsAtom { entries, total_sample_count })
    }
}
