// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::{decode_error, Result};
use symphonia_core::io::ReadBytes;

use crate::fourcc::FourCc;

/// The header of a sample description table entry.
#[derive(Copy, Clone, Debug)]
pub struct StsdEntryHeader {
    /// The size of the entry, including this header.
    pub size: u32,
    /// The codec of the samples using this description.
    pub codec_tag: FourCc,
    pub data_ref_index: u16,
    /// The position of the entry.
    pub pos: u64,
}

impl StsdEntryHeader {
    /// The size of a sample description table entry header.
    pub const SIZE: u32 = 16;

    pub fn read<B: ReadBytes>(reader: &mut B) -> Result<Self> {
        let pos = reader.pos();

        let size = reader.read_be_u32()?;
        let codec_tag = FourCc::new(reader.read_quad_bytes()?);

        // Reserved.
        reader.ignore_bytes(6)?;

        let data_ref_index = reader.read_be_u16()?;

        if size < Self::SIZE {
            return decode_error("mov (stsd): sample description entry too small");
        }

        Ok(StsdEntryHeader { size, codec_tag, data_ref_index, pos })
    }

    /// The length of the codec specific description following the header.
    pub fn desc_len(&self) -> u32 {
        self.size - Self::SIZE
    }

    /// The exclusive end position of the entry.
    pub fn end(&self) -> u64 {
        self.pos + u64::from(self.size)
    }
}
