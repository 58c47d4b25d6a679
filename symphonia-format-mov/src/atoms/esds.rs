// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::{decode_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader};

use log::debug;

const ES_DESCRIPTOR: u8 = 0x03;
const DECODER_CONFIG_DESCRIPTOR: u8 = 0x04;
const DECODER_SPECIFIC_DESCRIPTOR: u8 = 0x05;

/// Reads a descriptor tag and its length. The length is a big-endian base-128 value of at most
/// 4 bytes.
fn read_descriptor_header<B: ReadBytes>(reader: &mut B) -> Result<(u8, u32)> {
    let tag = reader.read_u8()?;

    let mut size = 0;

    for _ in 0..4 {
        let val = reader.read_u8()?;
        size = (size << 7) | u32::from(val & 0x7f);
        if val & 0x80 == 0 {
            break;
        }
    }

    Ok((tag, size))
}

/// Elementary stream descriptor atom.
#[derive(Debug, Default)]
pub struct EsdsAtom {
    /// The MPEG-4 object type indication of the decoder configuration descriptor.
    pub object_type: Option<u8>,
    /// The decoder specific information.
    pub extra_data: Option<Box<[u8]>>,
}

impl Atom for EsdsAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let mut esds = EsdsAtom::default();

        let (tag, _) = read_descriptor_header(reader)?;

        let _es_id = reader.read_be_u16()?;

        if tag == ES_DESCRIPTOR {
            let es_flags = reader.read_u8()?;

            // Stream dependence flag.
            if es_flags & 0x80 != 0 {
                let _depends_on_es_id = reader.read_be_u16()?;
            }

            // URL flag.
            if es_flags & 0x40 != 0 {
                let url_len = reader.read_u8()?;
                reader.ignore_bytes(u64::from(url_len))?;
            }

            // OCR stream flag.
            if es_flags & 0x20 != 0 {
                let _ocr_es_id = reader.read_be_u16()?;
            }
        }

        // The decoder configuration descriptor must follow. Anything else is left for the caller
        // to skip.
        let (tag, _) = read_descriptor_header(reader)?;

        if tag != DECODER_CONFIG_DESCRIPTOR {
            debug!("mov (esds): expected decoder config descriptor, got tag={}", tag);
            return Ok(esds);
        }

        esds.object_type = Some(reader.read_u8()?);

        let _stream_type = reader.read_u8()?;
        let _buffer_size = reader.read_be_u24()?;
        let _max_bitrate = reader.read_be_u32()?;
        let _avg_bitrate = reader.read_be_u32()?;

        let (tag, len) = read_descriptor_header(reader)?;

        if tag != DECODER_SPECIFIC_DESCRIPTOR {
            debug!("mov (esds): expected decoder specific descriptor, got tag={}", tag);
            return Ok(esds);
        }

        if u64::from(len) > header.data_unread_at(reader.pos()) {
            return decode_error("mov (esds): decoder specific info exceeds atom size");
        }

        esds.extra_data = Some(reader.read_boxed_slice_exact(len as usize)?);

        Ok(esds)
    }
}
