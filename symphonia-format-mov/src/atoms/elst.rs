// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::fp::Rational;
use crate::track::EditListEntry;

use log::trace;

/// Edit list atom.
#[derive(Debug)]
pub struct ElstAtom {
    pub entries: Vec<EditListEntry>,
}

impl Atom for ElstAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (version, _) = header.read_extended_header(reader)?;

        let entry_len = if version == 1 { 20 } else { 12 };

        let entry_count = header.read_entry_count(reader, entry_len)?;

        let mut entries = Vec::with_capacity(entry_count as usize);

        // The time offset of an edit is the sum of the durations of all edits preceeding it.
        let mut time_offset = 0u32;

        for _ in 0..entry_count {
            let (track_duration, media_time) = if version == 1 {
                // Only the low 32-bits of the 64-bit fields are kept.
                (reader.read_be_u64()? as u32, reader.read_be_i64()? as i32)
            }
            else {
                (reader.read_be_u32()?, reader.read_be_i32()?)
            };

            let media_rate = Rational::from_fixed(reader.read_be_i32()?);

            let entry = EditListEntry { track_duration, time_offset, media_time, media_rate };

            trace!("mov (elst): {:?}", entry);

            time_offset = time_offset.wrapping_add(track_duration);

            entries.push(entry);
        }

        Ok(ElstAtom { entries })
    }
}
