// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::track::SampleToChunkEntry;

use log::{trace, warn};

/// Sample to chunk atom.
#[derive(Debug)]
pub struct StscAtom {
    /// Entries, with the first chunk rebased to 0.
    pub entries: Vec<SampleToChunkEntry>,
}

impl Atom for StscAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let entry_count = header.read_entry_count(reader, 12)?;

        let mut entries = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            let first = reader.read_be_u32()?;

            // Chunks are indexed from 1.
            if first == 0 {
                warn!("mov (stsc): entry's first chunk is 0");
            }

            let entry = SampleToChunkEntry {
                first: first.saturating_sub(1),
                count: reader.read_be_u32()?,
                id: reader.read_be_u32()?,
            };

            trace!("mov (stsc): {:?}", entry);

            entries.push(entry);
        }

        Ok(StscAtom { entries })
    }
}
