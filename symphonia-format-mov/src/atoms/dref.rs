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

use log::{debug, trace, warn};

/// The minimum size of a data reference entry holding a Macintosh alias record.
const MIN_ALIAS_ENTRY_SIZE: u32 = 150;

const ALIAS_VOLUME_NAME_SIZE: u8 = 27;
const ALIAS_FILE_NAME_SIZE: u8 = 63;

const ALIAS_SUBRECORD_DIRECTORY: i16 = 0;
const ALIAS_SUBRECORD_ABSOLUTE_PATH: i16 = 2;
const ALIAS_SUBRECORD_END: i16 = -1;

/// The location of an externally referenced media file, given by a Macintosh alias record.
#[derive(Clone, Debug, Default)]
pub struct AliasRecord {
    pub volume: String,
    pub filename: String,
    pub path: String,
    pub directory: String,
    pub nlvl_from: i16,
    pub nlvl_to: i16,
}

/// Reads `len` bytes and returns the string up to the first nul.
fn read_fixed_string<B: ReadBytes>(reader: &mut B, len: usize) -> Result<String> {
    let buf = reader.read_boxed_slice_exact(len)?;
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..end]).to_string())
}

/// Reads a Pascal string, with at most `max_len` characters, from a field of `max_len` bytes
/// following the length byte.
fn read_pascal_field<B: ReadBytes>(reader: &mut B, max_len: u8) -> Result<String> {
    let len = reader.read_u8()?.min(max_len);
    let s = read_fixed_string(reader, usize::from(len))?;
    reader.ignore_bytes(u64::from(max_len - len))?;
    Ok(s)
}

impl AliasRecord {
    fn read<B: ReadBytes>(reader: &mut B, end: u64) -> Result<Self> {
        // User type, record size, version, and kind.
        reader.ignore_bytes(10)?;

        let volume = read_pascal_field(reader, ALIAS_VOLUME_NAME_SIZE)?;

        // Volume creation date, file system type, drive type, parent directory ID, and file ID.
        reader.ignore_bytes(12)?;

        let filename = read_pascal_field(reader, ALIAS_FILE_NAME_SIZE)?;

        // File creation date, file type, file creator.
        reader.ignore_bytes(16)?;

        let nlvl_from = reader.read_be_i16()?;
        let nlvl_to = reader.read_be_i16()?;

        // Volume attributes, volume file system ID, and reserved.
        reader.ignore_bytes(16)?;

        debug!("mov (dref): volume={:?}, filename={:?}", volume, filename);
        debug!("mov (dref): nlvl_from={}, nlvl_to={}", nlvl_from, nlvl_to);

        let mut alias =
            AliasRecord { volume, filename, nlvl_from, nlvl_to, ..Default::default() };

        // Variable length sub-records follow until the end marker.
        while reader.pos() + 4 <= end {
            let sub_type = reader.read_be_i16()?;

            if sub_type == ALIAS_SUBRECORD_END {
                break;
            }

            // Sub-records are padded to an even length.
            let size = reader.read_be_u16()?;
            let size = u64::from(size) + u64::from(size & 1);

            if reader.pos() + size > end {
                warn!("mov (dref): alias sub-record overflows entry");
                break;
            }

            match sub_type {
                ALIAS_SUBRECORD_ABSOLUTE_PATH => {
                    let path = read_fixed_string(reader, size as usize)?;

                    // The path begins with the volume name.
                    alias.path = match path.strip_prefix(alias.volume.as_str()) {
                        Some(rest) => rest.to_string(),
                        None => path,
                    };

                    trace!("mov (dref): path={:?}", alias.path);
                }
                ALIAS_SUBRECORD_DIRECTORY => {
                    alias.directory = read_fixed_string(reader, size as usize)?;

                    trace!("mov (dref): directory={:?}", alias.directory);
                }
                _ => reader.ignore_bytes(size)?,
            }
        }

        Ok(alias)
    }
}

/// Data reference atom.
#[derive(Debug, Default)]
pub struct DrefAtom {
    /// The last alias record of the data references.
    pub alias: Option<AliasRecord>,
    /// An entry overflowed the atom, and the remaining entries were not read.
    pub truncated: bool,
}

impl Atom for DrefAtom {
    fn read<B: ReadBytes>(reader: &mut B, mut header: AtomHeader) -> Result<Self> {
        let (_, _) = header.read_extended_header(reader)?;

        let end = header.data_end();

        let entry_count = reader.read_be_u32()?;

        let mut dref = DrefAtom::default();

        for _ in 0..entry_count {
            if reader.pos() + 12 > end {
                break;
            }

            let size = reader.read_be_u32()?;

            let next = reader.pos() + u64::from(size) - 4;

            if size < 12 || next > end {
                warn!("mov (dref): data reference overflows atom bounds");
                dref.truncated = true;
                break;
            }

            let ref_type = FourCc::new(reader.read_quad_bytes()?);

            // Version and flags.
            let _ = reader.read_be_u32()?;

            if ref_type == *b"alis" {
                if size >= MIN_ALIAS_ENTRY_SIZE {
                    dref.alias = Some(AliasRecord::read(reader, next)?);
                }
            }
            else {
                warn!("mov (dref): unknown data reference type {:?}", ref_type);
            }

            reader.ignore_bytes(next.saturating_sub(reader.pos()))?;
        }

        Ok(dref)
    }
}
