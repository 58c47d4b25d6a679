// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

/// Chunk offset atom (32-bit version).
#[derive(Debug)]
pub struct StcoAtom {
    /// Chunk offsets as stored on disk.
    pub chunk_offsets: Vec<u32>,
}

impl StcoAtom {
    /// Get the chunk offsets relative to a movie that begins at `begin_offset` of a larger
    /// stream (e.g., a movie embedded in an archive whose offsets are relative to the archive).
    pub fn offsets_relative_to(&self, begin_offset: u32) -> Vec<u32> {
        self.chunk_offsets.iter().map(|&offset| offset.wrapping_sub(begin_offset)).collect()
    }
}

impl Atom for StcoAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let entry_count = header.read_entry_count(reader, 4)?;

        let mut chunk_offsets = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            chunk_offsets.push(reader.read_be_u32()?);
        }

        Ok(StcoAtom { chunk_offsets })
    }
}
