// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QuickTime VR movie and track level atoms.

use symphonia_core::errors::{limit_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::fourcc::FourCc;
use crate::fp::read_apple_float;
use crate::panorama::{NavigationHeader, PanoNode, PanoTrackInfo, QtvrType};

use log::{debug, trace, warn};

/// Controller type atom.
#[derive(Debug)]
pub struct CtypAtom {
    pub controller: FourCc,
    pub qtvr_type: QtvrType,
}

impl Atom for CtypAtom {
    fn read<B: ReadBytes>(reader: &mut B, _header: AtomHeader) -> Result<Self> {
        let controller = FourCc::new(reader.read_quad_bytes()?);

        let qtvr_type = match &controller.get() {
            b"stna" => QtvrType::Object,
            b"STpn" | b"stpn" => QtvrType::Panorama,
            b"qtvr" => {
                warn!("mov (ctyp): quicktime vr 2.0 movies are not supported");
                QtvrType::Other
            }
            _ => {
                warn!("mov (ctyp): unknown controller type {:?}", controller);
                QtvrType::Other
            }
        };

        Ok(CtypAtom { controller, qtvr_type })
    }
}

/// Window location atom.
#[derive(Debug)]
pub struct WlocAtom {
    pub x: u16,
    pub y: u16,
}

impl Atom for WlocAtom {
    fn read<B: ReadBytes>(reader: &mut B, _header: AtomHeader) -> Result<Self> {
        Ok(WlocAtom { x: reader.read_be_u16()?, y: reader.read_be_u16()? })
    }
}

/// QuickTime VR navigation atom.
#[derive(Debug)]
pub struct NavgAtom {
    pub nav: NavigationHeader,
}

impl Atom for NavgAtom {
    fn read<B: ReadBytes>(reader: &mut B, _header: AtomHeader) -> Result<Self> {
        let _version = reader.read_be_u16()?;

        let columns = reader.read_be_u16()?;
        let rows = reader.read_be_u16()?;

        // Reserved.
        let _ = reader.read_be_u16()?;

        let nav = NavigationHeader {
            columns,
            rows,
            loop_size: reader.read_be_u16()?,
            frame_duration: reader.read_be_u16()?,
            movie_type: reader.read_be_u16()?,
            loop_ticks: reader.read_be_u16()?,
            field_of_view: read_apple_float(reader)?,
            start_h_pan: read_apple_float(reader)?,
            end_h_pan: read_apple_float(reader)?,
            end_v_pan: read_apple_float(reader)?,
            start_v_pan: read_apple_float(reader)?,
            initial_h_pan: read_apple_float(reader)?,
            initial_v_pan: read_apple_float(reader)?,
        };

        // Reserved.
        let _ = reader.read_be_u32()?;

        debug!(
            "mov (NAVG): columns={}, rows={}, loop_size={}, frame_duration={}, movie_type={}",
            nav.columns, nav.rows, nav.loop_size, nav.frame_duration, nav.movie_type
        );

        Ok(NavgAtom { nav })
    }
}

/// Panorama information atom.
#[derive(Debug)]
pub struct PinfAtom {
    pub info: PanoTrackInfo,
}

/// The size of the name field of the panorama information atom.
const PINF_NAME_SIZE: u64 = 32;

impl Atom for PinfAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        // The name is a Pascal string in a fixed size field.
        let name_len = u64::from(reader.read_u8()?).min(PINF_NAME_SIZE - 1);
        let name = reader.read_boxed_slice_exact(name_len as usize)?;
        let name = String::from_utf8_lossy(&name).to_string();

        reader.ignore_bytes((header.data_pos + PINF_NAME_SIZE).saturating_sub(reader.pos()))?;

        let def_node_id = reader.read_be_u32()?;
        let def_zoom = read_apple_float(reader)?;

        // Reserved and padding.
        reader.ignore_bytes(4 + 2)?;

        let count = u64::try_from(reader.read_be_i16()?).unwrap_or(0);

        if count * 8 > header.data_unread_at(reader.pos()) {
            return limit_error("mov (pInf): node count exceeds atom size");
        }

        let mut nodes = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let node =
                PanoNode { node_id: reader.read_be_u32()?, timestamp: reader.read_be_u32()? };
            trace!("mov (pInf): {:?}", node);
            nodes.push(node);
        }

        debug!("mov (pInf): name={:?}, def_node_id={}, nodes={}", name, def_node_id, nodes.len());

        Ok(PinfAtom { info: PanoTrackInfo { name, def_node_id, def_zoom, nodes } })
    }
}
