// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::fourcc::FourCc;
use crate::track::CodecType;

use log::{debug, info};

/// Handler atom.
#[derive(Debug)]
pub struct HdlrAtom {
    /// QuickTime component type. `mhlr` for a media handler, 0 for MPEG-4.
    pub component_type: FourCc,
    /// Component subtype, the handler type.
    pub component_subtype: FourCc,
    /// Human-readable component name.
    pub name: String,
}

impl HdlrAtom {
    /// Get the codec type implied by the component subtype, if it is a known media type.
    pub fn codec_type(&self) -> Option<CodecType> {
        match &self.component_subtype.get() {
            b"vide" => Some(CodecType::Video),
            b"soun" => Some(CodecType::Audio),
            b"musi" => Some(CodecType::Midi),
            b"STpn" | b"stpn" => Some(CodecType::Panorama),
            _ => None,
        }
    }
}

impl Atom for HdlrAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let component_type = FourCc::new(reader.read_quad_bytes()?);
        let component_subtype = FourCc::new(reader.read_quad_bytes()?);

        match &component_type.get() {
            b"mhlr" => info!("mov (hdlr): quicktime movie detected"),
            [0, 0, 0, 0] => info!("mov (hdlr): mpeg-4 movie detected"),
            _ => debug!("mov (hdlr): component type {:?}", component_type),
        }

        // Component manufacturer, flags, and flags mask.
        reader.ignore_bytes(4 * 3)?;

        // A QuickTime component name is a Pascal string, if present.
        let name = if header.data_unread_at(reader.pos()) > 0 {
            let len = u64::from(reader.read_u8()?);
            let len = len.min(header.data_unread_at(reader.pos()));
            let buf = reader.read_boxed_slice_exact(len as usize)?;
            String::from_utf8_lossy(&buf).to_string()
        }
        else {
            String::new()
        };

        debug!("mov (hdlr): subtype={:?}, name={:?}", component_subtype, name);

        Ok(HdlrAtom { component_type, component_subtype, name })
    }
}
