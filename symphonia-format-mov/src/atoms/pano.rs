// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panorama sample atoms.

use symphonia_core::errors::{limit_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};
use crate::fourcc::FourCc;
use crate::fp::read_apple_float;
use crate::panorama::{
    PanoHotSpot, PanoHotSpotTable, PanoLink, PanoLinkTable, PanoNavigation, PanoNavigationTable,
    PanoSampleHeader, PanoStringTable, Rect,
};

use log::{debug, trace};

/// Reads the padding and entry count preceeding a panorama sample table, and checks that the
/// entries fit in the atom.
fn read_table_count<B: ReadBytes>(
    reader: &mut B,
    header: &AtomHeader,
    entry_len: u64,
) -> Result<usize> {
    // Padding.
    let _ = reader.read_be_u16()?;

    // A negative count is treated as an empty table.
    let count = u64::try_from(reader.read_be_i16()?).unwrap_or(0);

    if count * entry_len > header.data_unread_at(reader.pos()) {
        return limit_error("mov: panorama table entry count exceeds atom size");
    }

    Ok(count as usize)
}

fn read_rect<B: ReadBytes>(reader: &mut B) -> Result<Rect> {
    Ok(Rect {
        top: reader.read_be_i16()?,
        left: reader.read_be_i16()?,
        right: reader.read_be_i16()?,
        bottom: reader.read_be_i16()?,
    })
}

/// Panorama sample header atom.
#[derive(Debug)]
pub struct PhdrAtom {
    pub hdr: PanoSampleHeader,
}

impl Atom for PhdrAtom {
    fn read<B: ReadBytes>(reader: &mut B, _header: AtomHeader) -> Result<Self> {
        let node_id = reader.read_be_u32()?;

        let def_h_pan = read_apple_float(reader)?;
        let def_v_pan = read_apple_float(reader)?;
        let def_zoom = read_apple_float(reader)?;

        let min_h_pan = read_apple_float(reader)?;
        let min_v_pan = read_apple_float(reader)?;
        let min_zoom = read_apple_float(reader)?;
        let max_h_pan = read_apple_float(reader)?;
        let max_v_pan = read_apple_float(reader)?;
        let max_zoom = read_apple_float(reader)?;

        // Reserved.
        reader.ignore_bytes(8)?;

        let hdr = PanoSampleHeader {
            node_id,
            def_h_pan,
            def_v_pan,
            def_zoom,
            min_h_pan,
            min_v_pan,
            min_zoom,
            max_h_pan,
            max_v_pan,
            max_zoom,
            name_str_offset: reader.read_be_i32()?,
            comment_str_offset: reader.read_be_i32()?,
        };

        debug!("mov (pHdr): {:?}", hdr);

        Ok(PhdrAtom { hdr })
    }
}

/// Panorama hot spot table atom.
#[derive(Debug)]
pub struct PhotAtom {
    pub table: PanoHotSpotTable,
}

impl Atom for PhotAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let count = read_table_count(reader, &header, 56)?;

        let mut hot_spots = Vec::with_capacity(count);

        for _ in 0..count {
            let id = reader.read_be_u16()?;

            // Reserved.
            let _ = reader.read_be_u16()?;

            let hotspot_type = FourCc::new(reader.read_quad_bytes()?);
            let type_data = reader.read_be_u32()?;

            let view_h_pan = read_apple_float(reader)?;
            let view_v_pan = read_apple_float(reader)?;
            let view_zoom = read_apple_float(reader)?;

            let rect = read_rect(reader)?;

            let mouse_over_cursor_id = reader.read_be_i32()?;
            let mouse_down_cursor_id = reader.read_be_i32()?;
            let mouse_up_cursor_id = reader.read_be_i32()?;

            // Reserved.
            let _ = reader.read_be_i32()?;

            let hot_spot = PanoHotSpot {
                id,
                hotspot_type,
                type_data,
                view_h_pan,
                view_v_pan,
                view_zoom,
                rect,
                mouse_over_cursor_id,
                mouse_down_cursor_id,
                mouse_up_cursor_id,
                name_str_offset: reader.read_be_i32()?,
                comment_str_offset: reader.read_be_i32()?,
            };

            trace!("mov (pHot): {:?}", hot_spot);

            hot_spots.push(hot_spot);
        }

        Ok(PhotAtom { table: PanoHotSpotTable { hot_spots } })
    }
}

/// Panorama link table atom.
#[derive(Debug)]
pub struct PlnkAtom {
    pub table: PanoLinkTable,
}

impl Atom for PlnkAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let count = read_table_count(reader, &header, 56)?;

        let mut links = Vec::with_capacity(count);

        for _ in 0..count {
            let id = reader.read_be_u16()?;

            // Reserved.
            reader.ignore_bytes(2 + 8)?;

            let to_node_id = reader.read_be_u32()?;

            // Reserved.
            reader.ignore_bytes(12)?;

            let to_h_pan = read_apple_float(reader)?;
            let to_v_pan = read_apple_float(reader)?;
            let to_zoom = read_apple_float(reader)?;

            // Reserved.
            reader.ignore_bytes(8)?;

            let link = PanoLink {
                id,
                to_node_id,
                to_h_pan,
                to_v_pan,
                to_zoom,
                name_str_offset: reader.read_be_i32()?,
                comment_str_offset: reader.read_be_i32()?,
            };

            trace!("mov (pLnk): {:?}", link);

            links.push(link);
        }

        Ok(PlnkAtom { table: PanoLinkTable { links } })
    }
}

/// Panorama navigation table atom.
#[derive(Debug)]
pub struct PnavAtom {
    pub table: PanoNavigationTable,
}

impl Atom for PnavAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let count = read_table_count(reader, &header, 40)?;

        let mut navs = Vec::with_capacity(count);

        for _ in 0..count {
            let id = reader.read_be_u16()?;

            // Reserved.
            reader.ignore_bytes(2 + 4)?;

            let h_pan = read_apple_float(reader)?;
            let v_pan = read_apple_float(reader)?;
            let zoom = read_apple_float(reader)?;

            let zoom_rect = read_rect(reader)?;

            // Reserved.
            let _ = reader.read_be_i32()?;

            let nav = PanoNavigation {
                id,
                h_pan,
                v_pan,
                zoom,
                zoom_rect,
                name_str_offset: reader.read_be_i32()?,
                comment_str_offset: reader.read_be_i32()?,
            };

            trace!("mov (pNav): {:?}", nav);

            navs.push(nav);
        }

        Ok(PnavAtom { table: PanoNavigationTable { navs } })
    }
}

/// Panorama string table atom.
#[derive(Debug)]
pub struct StrtAtom {
    pub table: PanoStringTable,
}

impl Atom for StrtAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        let strings = reader.read_boxed_slice_exact(header.data_len as usize)?;

        let table = PanoStringTable { strings };

        for (i, s) in table.iter().enumerate() {
            trace!("mov (strT): [{}] {:?}", i, s);
        }

        Ok(StrtAtom { table })
    }
}

#[cfg(test)]
mod tests {
    use symphonia_core::errors::Error;
    use symphonia_core::io::BufReader;

    use super::{PhdrAtom, PhotAtom, PlnkAtom, PnavAtom, StrtAtom};
    use crate::atoms::{Atom, AtomHeader, AtomType};

    #[test]
    fn sample_header() {
        let mut data = vec![0, 0, 0, 3];
        for i in 0..9u8 {
            data.extend_from_slice(&[0, i, 0x80, 0]);
        }
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&[0, 0, 0, 8, 0, 0, 0, 14]);

        let header = AtomHeader::synthetic(AtomType::PanoramaSampleHeader, 0, data.len() as u64);
        let hdr = PhdrAtom::read(&mut BufReader::new(&data), header).unwrap().hdr;

        assert_eq!(hdr.node_id, 3);
        assert_eq!(hdr.def_h_pan, 0.5);
        assert_eq!(hdr.max_zoom, 8.5);
        assert_eq!(hdr.name_str_offset, 8);
        assert_eq!(hdr.comment_str_offset, 14);
    }

    #[test]
    fn hot_spot_table() {
        let mut data = vec![0, 0, 0, 1];
        data.extend_from_slice(&[0, 5, 0, 0]);
        data.extend_from_slice(b"link");
        data.extend_from_slice(&[0, 0, 0, 2]);
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&[0, 1, 0, 2, 0, 3, 0, 4]);
        data.extend_from_slice(&[0; 16]);
        data.extend_from_slice(&[0, 0, 0, 8, 0xff, 0xff, 0xff, 0xff]);

        let header = AtomHeader::synthetic(AtomType::PanoramaHotSpots, 0, data.len() as u64);
        let table = PhotAtom::read(&mut BufReader::new(&data), header).unwrap().table;

        assert_eq!(table.hot_spots.len(), 1);

        let hot_spot = &table.hot_spots[0];
        assert_eq!(hot_spot.id, 5);
        assert_eq!(hot_spot.hotspot_type, *b"link");
        assert_eq!(hot_spot.type_data, 2);
        assert_eq!((hot_spot.rect.top, hot_spot.rect.bottom), (1, 4));
        assert_eq!(hot_spot.name_str_offset, 8);
        assert_eq!(hot_spot.comment_str_offset, -1);
    }

    #[test]
    fn table_count_exceeds_atom() {
        let data = [0, 0, 0, 2, 0, 0, 0, 0];

        let header = AtomHeader::synthetic(AtomType::PanoramaLinks, 0, data.len() as u64);

        match PlnkAtom::read(&mut BufReader::new(&data), header) {
            Err(Error::LimitError(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn string_table() {
        let data = b"\x05hello\x03abc";

        let header = AtomHeader::synthetic(AtomType::PanoramaStrings, 0, data.len() as u64);
        let table = StrtAtom::read(&mut BufReader::new(data), header).unwrap().table;

        assert_eq!(table.get_string(8), "hello");
        assert_eq!(table.get_string(14), "abc");
    }

    #[test]
    fn navigation_table() {
        let mut data = vec![0, 0, 0, 1];
        data.extend_from_slice(&[0, 3, 0, 0, 0, 0, 0, 0]);
        data.extend_from_slice(&[0, 180, 0, 0, 0xff, 0xf6, 0, 0, 0, 2, 0, 0]); // pan and zoom
        data.extend_from_slice(&[0, 10, 0, 20, 0, 30, 0, 40]);
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&[0, 0, 0, 8, 0, 0, 0, 12]);

        let header = AtomHeader::synthetic(AtomType::PanoramaNavigation, 0, data.len() as u64);
        let table = PnavAtom::read(&mut BufReader::new(&data), header).unwrap().table;

        assert_eq!(table.navs.len(), 1);

        let nav = &table.navs[0];
        assert_eq!(nav.id, 3);
        assert_eq!((nav.h_pan, nav.v_pan, nav.zoom), (180.0, -10.0, 2.0));
        assert_eq!((nav.zoom_rect.top, nav.zoom_rect.left), (10, 20));
        assert_eq!((nav.zoom_rect.right, nav.zoom_rect.bottom), (30, 40));
        assert_eq!((nav.name_str_offset, nav.comment_str_offset), (8, 12));
    }
}
