// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Media information header atoms.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::track::GraphicsMode;

fn read_graphics_mode<B: ReadBytes>(reader: &mut B) -> Result<(GraphicsMode, [u16; 3])> {
    let mode = GraphicsMode::from(reader.read_be_u16()?);
    let opcolor = [reader.read_be_u16()?, reader.read_be_u16()?, reader.read_be_u16()?];
    Ok((mode, opcolor))
}

/// Sound media header atom.
#[derive(Debug)]
pub struct SmhdAtom {
    /// Stereo balance.
    pub balance: i16,
}

impl Atom for SmhdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let balance = reader.read_be_i16()?;

        // Reserved.
        let _ = reader.read_be_u16()?;

        Ok(SmhdAtom { balance })
    }
}

/// Video media header atom.
#[derive(Debug)]
pub struct VmhdAtom {
    pub graphics_mode: GraphicsMode,
    pub opcolor: [u16; 3],
}

impl Atom for VmhdAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let (graphics_mode, opcolor) = read_graphics_mode(reader)?;

        Ok(VmhdAtom { graphics_mode, opcolor })
    }
}

/// Base media information atom, found in the base media information header of non-audio,
/// non-video tracks.
#[derive(Debug)]
pub struct GminAtom {
    pub graphics_mode: GraphicsMode,
    pub opcolor: [u16; 3],
    pub balance: i16,
}

impl Atom for GminAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let (graphics_mode, opcolor) = read_graphics_mode(reader)?;
        let balance = reader.read_be_i16()?;

        // Reserved.
        let _ = reader.read_be_u16()?;

        Ok(GminAtom { graphics_mode, opcolor, balance })
    }
}
