// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use symphonia_core::errors::{decode_error, limit_error, unsupported_error, Result};
use symphonia_core::io::ReadBytes;

pub(crate) mod cmov;
pub(crate) mod dref;
pub(crate) mod elst;
pub(crate) mod esds;
pub(crate) mod hdlr;
pub(crate) mod mdhd;
pub(crate) mod minf;
pub(crate) mod mvhd;
pub(crate) mod pano;
pub(crate) mod qtvr;
pub(crate) mod stco;
pub(crate) mod stsc;
pub(crate) mod stsd;
pub(crate) mod stss;
pub(crate) mod stsz;
pub(crate) mod stts;
pub(crate) mod tkhd;

pub use cmov::CmovAtom;
pub use dref::DrefAtom;
pub use elst::ElstAtom;
pub use esds::EsdsAtom;
pub use hdlr::HdlrAtom;
pub use mdhd::MdhdAtom;
pub use minf::{GminAtom, SmhdAtom, VmhdAtom};
pub use mvhd::MvhdAtom;
pub use pano::{PhdrAtom, PhotAtom, PlnkAtom, PnavAtom, StrtAtom};
pub use qtvr::{CtypAtom, NavgAtom, PinfAtom, WlocAtom};
pub use stco::StcoAtom;
pub use stsc::StscAtom;
pub use stsd::StsdEntryHeader;
pub use stss::StssAtom;
pub use stsz::StszAtom;
pub use stts::SttsAtom;
pub use tkhd::TkhdAtom;

/// Atom types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AtomType {
    BaseMediaInfo,
    BaseMediaInfoHeader,
    ChunkOffset,
    CompressedMovie,
    ControllerType,
    DataInformation,
    DataReference,
    Edit,
    EditList,
    Esds,
    Handler,
    Media,
    MediaData,
    MediaHeader,
    MediaInfo,
    Movie,
    MovieHeader,
    PanoramaHeader,
    PanoramaInfo,
    PanoramaSampleHeader,
    PanoramaHotSpots,
    PanoramaLinks,
    PanoramaNavigation,
    PanoramaStrings,
    QtWave,
    QtvrNavigation,
    SampleDescription,
    SampleSize,
    SampleTable,
    SampleToChunk,
    SorensonExtraData,
    SoundMediaHeader,
    SyncSample,
    TimeToSample,
    Track,
    TrackHeader,
    UserData,
    VideoMediaHeader,
    WindowLocation,
    Other([u8; 4]),
}

impl From<[u8; 4]> for AtomType {
    fn from(val: [u8; 4]) -> Self {
        match &val {
            b"cmov" => AtomType::CompressedMovie,
            b"ctyp" => AtomType::ControllerType,
            b"dinf" => AtomType::DataInformation,
            b"dref" => AtomType::DataReference,
            b"edts" => AtomType::Edit,
            b"elst" => AtomType::EditList,
            b"esds" => AtomType::Esds,
            b"gmhd" => AtomType::BaseMediaInfoHeader,
            b"gmin" => AtomType::BaseMediaInfo,
            b"hdlr" => AtomType::Handler,
            b"mdat" => AtomType::MediaData,
            b"mdhd" => AtomType::MediaHeader,
            b"mdia" => AtomType::Media,
            b"minf" => AtomType::MediaInfo,
            b"moov" => AtomType::Movie,
            b"mvhd" => AtomType::MovieHeader,
            b"smhd" => AtomType::SoundMediaHeader,
            b"stbl" => AtomType::SampleTable,
            b"stco" => AtomType::ChunkOffset,
            b"stsc" => AtomType::SampleToChunk,
            b"stsd" => AtomType::SampleDescription,
            b"stss" => AtomType::SyncSample,
            b"stsz" => AtomType::SampleSize,
            b"stts" => AtomType::TimeToSample,
            b"tkhd" => AtomType::TrackHeader,
            b"trak" => AtomType::Track,
            b"udta" => AtomType::UserData,
            b"vmhd" => AtomType::VideoMediaHeader,
            b"wave" => AtomType::QtWave,
            b"SMI " => AtomType::SorensonExtraData,
            // QuickTime VR
            b"NAVG" => AtomType::QtvrNavigation,
            b"STpn" | b"stpn" => AtomType::PanoramaHeader,
            b"WLOC" => AtomType::WindowLocation,
            b"pHdr" => AtomType::PanoramaSampleHeader,
            b"pHot" => AtomType::PanoramaHotSpots,
            b"pInf" => AtomType::PanoramaInfo,
            b"pLnk" => AtomType::PanoramaLinks,
            b"pNav" => AtomType::PanoramaNavigation,
            b"strT" => AtomType::PanoramaStrings,
            _ => AtomType::Other(val),
        }
    }
}

/// Size of a standard atom header.
pub(crate) const HEADER_SIZE: u64 = 8;

/// Common atom header.
///
/// The header describes a byte range `[data_pos, data_pos + data_len)` of the stream holding
/// the atom's payload. Headers are only valid for the duration of one walk over their parent.
#[derive(Copy, Clone, Debug)]
pub struct AtomHeader {
    /// The atom type.
    pub atom_type: AtomType,
    /// The position of the atom's payload.
    pub data_pos: u64,
    /// The size of the atom's payload, excluding the header.
    pub data_len: u64,
}

/// The outcome of reading an atom header.
pub(crate) enum NextAtom {
    /// A well-formed atom header.
    Atom(AtomHeader),
    /// There are no more atoms in the parent.
    End,
}

impl AtomHeader {
    /// Create a header for a byte range that was not described by an on-disk atom header.
    pub fn synthetic(atom_type: AtomType, data_pos: u64, data_len: u64) -> Self {
        AtomHeader { atom_type, data_pos, data_len }
    }

    /// Reads the next atom header from the provided reader.
    ///
    /// `parent_unread` is the number of bytes remaining in the parent after the 8 byte header,
    /// `stream_len` is the total length of the stream.
    pub(crate) fn read<B: ReadBytes>(
        reader: &mut B,
        parent_unread: u64,
        stream_len: u64,
    ) -> Result<NextAtom> {
        let mut atom_len = u64::from(reader.read_be_u32()?);
        let atom_type = AtomType::from(reader.read_quad_bytes()?);

        // Some QuickTime movies found in resource forks have a zero-sized media data atom.
        // Let it span the entire stream instead.
        if atom_type == AtomType::MediaData && atom_len == 0 {
            atom_len = stream_len;
        }

        match atom_len {
            1 => {
                // An atom size of 1 indicates a 64-bit atom size follows.
                return unsupported_error("mov: 64-bit extended atom size");
            }
            0 => {
                // An atom size of 0 indicates the atom spans the remainder of the parent. With 8
                // bytes or less remaining, there is nothing left to read.
                if parent_unread <= HEADER_SIZE {
                    return Ok(NextAtom::End);
                }

                atom_len = parent_unread + HEADER_SIZE;
            }
            _ => (),
        }

        if atom_len < HEADER_SIZE {
            return Ok(NextAtom::End);
        }

        Ok(NextAtom::Atom(AtomHeader {
            atom_type,
            data_pos: reader.pos(),
            data_len: atom_len - HEADER_SIZE,
        }))
    }

    /// Get the exclusive end position of the atom's payload.
    pub fn data_end(&self) -> u64 {
        self.data_pos + self.data_len
    }

    /// Given a position, calculate the amount of unread payload data.
    pub fn data_unread_at(&self, pos: u64) -> u64 {
        self.data_end().saturating_sub(pos.max(self.data_pos))
    }

    /// Read the version and flags extended atom header fields.
    ///
    /// On success, consumes 4 bytes from the payload size.
    pub fn read_extended_header<B: ReadBytes>(&mut self, reader: &mut B) -> Result<(u8, u32)> {
        if self.data_len < 4 {
            return decode_error("mov: atom too small for extended header");
        }

        let header = (reader.read_u8()?, reader.read_be_u24()?);

        self.data_pos += 4;
        self.data_len -= 4;

        Ok(header)
    }

    /// Read a table entry count, checking that `count` entries of `entry_len` bytes each fit
    /// within the unread payload.
    pub fn read_entry_count<B: ReadBytes>(&self, reader: &mut B, entry_len: u64) -> Result<u32> {
        let count = reader.read_be_u32()?;

        if u64::from(count) * entry_len > self.data_unread_at(reader.pos()) {
            return limit_error("mov: table entry count exceeds atom size");
        }

        Ok(count)
    }
}

pub trait Atom: Sized {
    fn read<B: ReadBytes>(reader: &mut B, header: AtomHeader) -> Result<Self>;
}
