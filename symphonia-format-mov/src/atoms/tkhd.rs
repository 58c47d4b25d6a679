// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::mvhd::read_matrix_scale;
use crate::atoms::{Atom, AtomHeader};

/// Track header atom.
#[derive(Debug)]
pub struct TkhdAtom {
    /// Track header flags (enabled, in movie, in preview, in poster).
    pub flags: u32,
    /// Track identifier.
    pub id: u32,
    /// Track duration in the timescale units specified in the movie header, considering edits.
    pub duration: u32,
    /// The raw 16.16 X scale entry of the display matrix.
    pub x_scale: i32,
    /// The raw 16.16 Y scale entry of the display matrix.
    pub y_scale: i32,
}

impl Atom for TkhdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (version, flags) = header.read_extended_header(reader)?;

        // Creation and modification times.
        reader.ignore_bytes(if version == 1 { 16 } else { 8 })?;

        let id = reader.read_be_u32()?;

        // Reserved
        let _ = reader.read_be_u32()?;

        // Only the low 32-bits of a version 1 duration are kept.
        if version == 1 {
            let _ = reader.read_be_u32()?;
        }
        let duration = reader.read_be_u32()?;

        // Reserved, layer, alternate group, volume, reserved.
        reader.ignore_bytes(8 + 2 + 2 + 2 + 2)?;

        let (x_scale, y_scale) = read_matrix_scale(reader)?;

        // The track width and height follow, but the sample description is authoritative.

        Ok(TkhdAtom { flags, id, duration, x_scale, y_scale })
    }
}
