// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

use log::warn;

/// Reads the display matrix of a movie or track header and returns its X and Y scale entries.
///
/// The scale entries are signed 16.16 fixed point numbers. The remaining entries of the 3x3
/// matrix are skipped.
pub(crate) fn read_matrix_scale<B: ReadBytes>(reader: &mut B) -> Result<(i32, i32)> {
    let x_scale = reader.read_be_i32()?;
    reader.ignore_bytes(12)?;
    let y_scale = reader.read_be_i32()?;
    reader.ignore_bytes(16)?;

    Ok((x_scale, y_scale))
}

/// Movie header atom.
#[derive(Debug)]
pub struct MvhdAtom {
    /// Timescale for the movie expressed as the number of units per second.
    pub timescale: u32,
    /// The duration of the movie in `timescale` units.
    pub duration: u32,
    /// The raw 16.16 X scale entry of the display matrix.
    pub x_scale: i32,
    /// The raw 16.16 Y scale entry of the display matrix.
    pub y_scale: i32,
}

impl Atom for MvhdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (version, _) = header.read_extended_header(reader)?;

        // Version 1 uses 64-bit time values. Only the low 32-bits are kept.
        let (timescale, duration) = if version == 1 {
            warn!("mov (mvhd): version 1 movie header");
            reader.ignore_bytes(16)?;
            let timescale = reader.read_be_u32()?;
            let _ = reader.read_be_u32()?;
            (timescale, reader.read_be_u32()?)
        }
        else {
            reader.ignore_bytes(8)?;
            (reader.read_be_u32()?, reader.read_be_u32()?)
        };

        // Preferred rate, preferred volume, and reserved.
        reader.ignore_bytes(4 + 2 + 10)?;

        let (x_scale, y_scale) = read_matrix_scale(reader)?;

        // Preview time, preview duration, poster time, selection time, selection duration,
        // current time, and next track ID.
        reader.ignore_bytes(7 * 4)?;

        Ok(MvhdAtom { timescale, duration, x_scale, y_scale })
    }
}
