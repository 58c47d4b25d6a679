// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QuickTime VR types.
//!
//! A QuickTime VR panorama movie has a panorama track whose samples are not media, but nested
//! atoms describing a node of the panorama: its view limits, hot spots, links to other nodes,
//! and navigation targets. Names and comments are stored as offsets into a per-sample string
//! table.

use crate::fourcc::FourCc;

/// The QuickTime VR movie type, given by the controller type atom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum QtvrType {
    #[default]
    Other,
    Object,
    Panorama,
}

/// The navigation header of an object movie.
#[derive(Clone, Debug, Default)]
pub struct NavigationHeader {
    pub columns: u16,
    pub rows: u16,
    pub loop_size: u16,
    pub frame_duration: u16,
    pub movie_type: u16,
    pub loop_ticks: u16,
    pub field_of_view: f32,
    pub start_h_pan: f32,
    pub end_h_pan: f32,
    pub end_v_pan: f32,
    pub start_v_pan: f32,
    pub initial_h_pan: f32,
    pub initial_v_pan: f32,
}

/// A node of a panorama.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PanoNode {
    pub node_id: u32,
    pub timestamp: u32,
}

/// Panorama information of a panorama track.
#[derive(Clone, Debug, Default)]
pub struct PanoTrackInfo {
    pub name: String,
    pub def_node_id: u32,
    pub def_zoom: f32,
    pub nodes: Vec<PanoNode>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub top: i16,
    pub left: i16,
    pub right: i16,
    pub bottom: i16,
}

/// The header of a panorama sample. Pan angles are in degrees.
#[derive(Clone, Debug, Default)]
pub struct PanoSampleHeader {
    pub node_id: u32,
    pub def_h_pan: f32,
    pub def_v_pan: f32,
    pub def_zoom: f32,
    pub min_h_pan: f32,
    pub min_v_pan: f32,
    pub min_zoom: f32,
    pub max_h_pan: f32,
    pub max_v_pan: f32,
    pub max_zoom: f32,
    pub name_str_offset: i32,
    pub comment_str_offset: i32,
}

#[derive(Clone, Debug, Default)]
pub struct PanoHotSpot {
    pub id: u16,
    /// Hot spot type, `link`, `navg`, or an application defined type.
    pub hotspot_type: FourCc,
    pub type_data: u32,
    pub view_h_pan: f32,
    pub view_v_pan: f32,
    pub view_zoom: f32,
    pub rect: Rect,
    pub mouse_over_cursor_id: i32,
    pub mouse_down_cursor_id: i32,
    pub mouse_up_cursor_id: i32,
    pub name_str_offset: i32,
    pub comment_str_offset: i32,
}

#[derive(Clone, Debug, Default)]
pub struct PanoHotSpotTable {
    pub hot_spots: Vec<PanoHotSpot>,
}

#[derive(Clone, Debug, Default)]
pub struct PanoLink {
    pub id: u16,
    pub to_node_id: u32,
    pub to_h_pan: f32,
    pub to_v_pan: f32,
    pub to_zoom: f32,
    pub name_str_offset: i32,
    pub comment_str_offset: i32,
}

#[derive(Clone, Debug, Default)]
pub struct PanoLinkTable {
    pub links: Vec<PanoLink>,
}

#[derive(Clone, Debug, Default)]
pub struct PanoNavigation {
    pub id: u16,
    pub h_pan: f32,
    pub v_pan: f32,
    pub zoom: f32,
    pub zoom_rect: Rect,
    pub name_str_offset: i32,
    pub comment_str_offset: i32,
}

#[derive(Clone, Debug, Default)]
pub struct PanoNavigationTable {
    pub navs: Vec<PanoNavigation>,
}

/// The string table of a panorama sample.
///
/// The table is a sequence of Pascal strings. Offsets into the table are measured from the start
/// of the string table atom, including its 8 byte header.
#[derive(Clone, Debug, Default)]
pub struct PanoStringTable {
    pub strings: Box<[u8]>,
}

impl PanoStringTable {
    /// Get the string at `offset`. Invalid offsets yield an empty string.
    pub fn get_string(&self, offset: i32) -> String {
        let pos = match usize::try_from(i64::from(offset) - 8) {
            Ok(pos) if pos < self.strings.len() => pos,
            _ => return String::new(),
        };

        let len = self.strings[pos];
        let start = pos + 1;
        let end = (start + usize::from(len)).min(self.strings.len());

        String::from_utf8_lossy(&self.strings[start..end]).to_string()
    }

    /// Iterate over every string in the table.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        let mut pos = 0;

        std::iter::from_fn(move || {
            let len = usize::from(*self.strings.get(pos)?);
            let start = pos + 1;
            let end = (start + len).min(self.strings.len());
            pos = start + len;
            Some(String::from_utf8_lossy(&self.strings[start..end]).to_string())
        })
    }
}

/// A panorama sample.
#[derive(Clone, Debug, Default)]
pub struct PanoSample {
    pub hdr: PanoSampleHeader,
    pub hot_spot_table: PanoHotSpotTable,
    pub link_table: PanoLinkTable,
    pub nav_table: PanoNavigationTable,
    pub str_table: PanoStringTable,
}
