// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Read;

use symphonia_core::errors::{decode_error, limit_error, unsupported_error, Result};
use symphonia_core::io::ReadBytes;

use crate::atoms::{Atom, AtomHeader, HEADER_SIZE};
use crate::fourcc::FourCc;

use flate2::read::ZlibDecoder;
use log::debug;

/// The largest ratio of inflated to deflated data a deflate stream can achieve.
const MAX_INFLATE_RATIO: u64 = 1032;

/// Compressed movie atom.
///
/// A compressed movie atom holds a data compression atom (`dcom`), naming the compression method,
/// followed by a compressed movie data atom (`cmvd`). The decompressed data is a movie atom.
#[derive(Debug)]
pub struct CmovAtom {
    /// The decompressed movie data.
    pub data: Vec<u8>,
}

impl Atom for CmovAtom {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self> {
        // Data compression atom.
        let _ = reader.read_be_u32()?;

        if FourCc::new(reader.read_quad_bytes()?) != *b"dcom" {
            return decode_error("mov (cmov): missing data compression atom");
        }

        let method = FourCc::new(reader.read_quad_bytes()?);

        if method != *b"zlib" {
            debug!("mov (cmov): compression method {:?}", method);
            return unsupported_error("mov (cmov): unsupported compression method");
        }

        // Compressed movie data atom. The uncompressed size is part of the atom's payload.
        let cmvd_len = u64::from(reader.read_be_u32()?);

        if FourCc::new(reader.read_quad_bytes()?) != *b"cmvd" {
            return decode_error("mov (cmov): missing compressed movie data atom");
        }

        let uncompressed_len = reader.read_be_u32()?;

        let compressed_len = match cmvd_len.checked_sub(HEADER_SIZE + 4) {
            Some(len) if len <= header.data_unread_at(reader.pos()) => len,
            _ => return decode_error("mov (cmov): invalid compressed movie data size"),
        };

        let compressed = reader.read_boxed_slice_exact(compressed_len as usize)?;

        if u64::from(uncompressed_len) > compressed_len.saturating_mul(MAX_INFLATE_RATIO) {
            return decode_error("mov (cmov): uncompressed size exceeds the inflate ratio");
        }

        let mut data = Vec::new();

        if data.try_reserve_exact(uncompressed_len as usize).is_err() {
            return limit_error("mov (cmov): could not allocate the uncompressed movie");
        }

        // Never inflate more than one byte beyond the declared size.

        let mut decoder = ZlibDecoder::new(&compressed[..]).take(u64::from(uncompressed_len) + 1);

        if decoder.read_to_end(&mut data).is_err() {
            return decode_error("mov (cmov): could not inflate compressed movie");
        }

        if data.len() != uncompressed_len as usize {
            return decode_error("mov (cmov): inflated size mismatch");
        }

        debug!("mov (cmov): compressed={}, uncompressed={}", compressed_len, uncompressed_len);

        Ok(CmovAtom { data })
    }
}
