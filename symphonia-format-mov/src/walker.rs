// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The atom walker.
//!
//! The walker visits the atoms of a parent atom in order. Each known atom type maps to a handler.
//! A handler either reads a leaf atom and stores its contents in the movie under construction, or
//! walks the children of a container atom. Unknown atoms are skipped. Regardless of how much of an
//! atom a handler reads, the walker always resumes at the end of the atom.

use std::io::{Cursor, Seek, SeekFrom};

use symphonia_core::errors::{decode_error, limit_error, Error, Result};
use symphonia_core::io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions, ReadBytes};

use crate::atoms::{
    Atom, AtomHeader, AtomType, CmovAtom, CtypAtom, DrefAtom, ElstAtom, EsdsAtom, GminAtom,
    HdlrAtom, MdhdAtom, MvhdAtom, NavgAtom, NextAtom, PhdrAtom, PhotAtom, PinfAtom, PlnkAtom,
    PnavAtom, SmhdAtom, StcoAtom, StscAtom, StsdEntryHeader, StssAtom, StszAtom, SttsAtom,
    StrtAtom, TkhdAtom, VmhdAtom, WlocAtom, HEADER_SIZE,
};
use crate::fp::Rational;
use crate::movie::Movie;
use crate::options::MovOptions;
use crate::panorama::PanoSample;
use crate::sample_desc::{SampleDesc, SampleDescReader};
use crate::track::{CodecType, Track};

use log::{debug, warn};

/// The largest `wave` atom that will be read.
const MAX_WAVE_ATOM_LEN: u64 = 1 << 30;

/// How the walk of the enclosing atoms should proceed after an atom is handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Continue with the next atom.
    Continue,
    /// The atom was abandoned. Continue with the next atom.
    Skipped,
    /// The movie atom was read. Stop all enclosing walks.
    Done,
}

/// The track, sample description, and panorama sample that nested atoms apply to.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Scope {
    pub track: Option<usize>,
    pub sample_desc: Option<usize>,
    pub pano_sample: Option<usize>,
}

type Handler =
    fn(&mut AtomWalker<'_>, &mut MediaSourceStream, AtomHeader, Scope) -> Result<Flow>;

/// Get the handler for an atom type, or `None` if the atom should be skipped.
fn handler(atom_type: AtomType) -> Option<Handler> {
    let handler: Handler = match atom_type {
        AtomType::Movie => read_moov,
        AtomType::Track => read_trak,
        AtomType::Media
        | AtomType::MediaInfo
        | AtomType::SampleTable
        | AtomType::UserData
        | AtomType::DataInformation
        | AtomType::Edit
        | AtomType::BaseMediaInfoHeader
        | AtomType::PanoramaHeader => read_container,
        AtomType::MediaData => read_leaf,
        AtomType::MovieHeader => read_mvhd,
        AtomType::TrackHeader => read_tkhd,
        AtomType::Handler => read_hdlr,
        AtomType::MediaHeader => read_mdhd,
        AtomType::SoundMediaHeader => read_smhd,
        AtomType::VideoMediaHeader => read_vmhd,
        AtomType::BaseMediaInfo => read_gmin,
        AtomType::DataReference => read_dref,
        AtomType::EditList => read_elst,
        AtomType::SampleDescription => read_stsd,
        AtomType::SampleToChunk => read_stsc,
        AtomType::TimeToSample => read_stts,
        AtomType::SampleSize => read_stsz,
        AtomType::ChunkOffset => read_stco,
        AtomType::SyncSample => read_stss,
        AtomType::QtWave => read_wave,
        AtomType::Esds => read_esds,
        AtomType::SorensonExtraData => read_smi,
        AtomType::CompressedMovie => read_cmov,
        AtomType::ControllerType => read_ctyp,
        AtomType::WindowLocation => read_wloc,
        AtomType::QtvrNavigation => read_navg,
        AtomType::PanoramaInfo => read_pinf,
        AtomType::PanoramaSampleHeader => read_phdr,
        AtomType::PanoramaHotSpots => read_phot,
        AtomType::PanoramaLinks => read_plnk,
        AtomType::PanoramaNavigation => read_pnav,
        AtomType::PanoramaStrings => read_strt,
        AtomType::Other(_) => return None,
    };

    Some(handler)
}

/// Get the total length of the stream.
pub(crate) fn stream_len(reader: &MediaSourceStream) -> Result<u64> {
    match reader.byte_len() {
        Some(len) => Ok(len),
        None => decode_error("mov: stream length is unknown"),
    }
}

/// Move the reader to `pos`, skipping forward if possible.
fn realign(reader: &mut MediaSourceStream, atom_type: AtomType, pos: u64) -> Result<()> {
    let cur = reader.pos();

    if cur < pos {
        reader.ignore_bytes(pos - cur)?;
    }
    else if cur > pos {
        warn!("mov: read {} bytes past the end of {:?} atom", cur - pos, atom_type);
        reader.seek(SeekFrom::Start(pos))?;
    }

    Ok(())
}

/// Walks the atom tree of a movie, building the movie as it goes.
pub(crate) struct AtomWalker<'a> {
    pub movie: Movie,
    pub found_moov: bool,
    options: MovOptions,
    desc_reader: &'a mut dyn SampleDescReader,
}

impl<'a> AtomWalker<'a> {
    pub fn new(options: MovOptions, desc_reader: &'a mut dyn SampleDescReader) -> Self {
        AtomWalker { movie: Movie::default(), found_moov: false, options, desc_reader }
    }

    /// Walk the children of `parent`.
    pub fn walk(
        &mut self,
        reader: &mut MediaSourceStream,
        parent: AtomHeader,
        scope: Scope,
    ) -> Result<Flow> {
        let stream_len = stream_len(reader)?;

        if reader.pos() >= stream_len {
            return decode_error("mov: unexpected end of stream");
        }

        while reader.pos() + HEADER_SIZE < parent.data_end() && reader.pos() < stream_len {
            let parent_unread = parent.data_unread_at(reader.pos()) - HEADER_SIZE;

            let header = match AtomHeader::read(reader, parent_unread, stream_len)? {
                NextAtom::Atom(header) => header,
                NextAtom::End => break,
            };

            debug!(
                "mov: atom {:?} at {:#x}, len={}",
                header.atom_type,
                header.data_pos - HEADER_SIZE,
                header.data_len
            );

            if header.data_end() > stream_len {
                debug!("mov: skipping junk at the end of the stream");
                reader.seek(SeekFrom::Start(stream_len))?;
                return Ok(Flow::Continue);
            }

            match handler(header.atom_type) {
                Some(handler) => {
                    let flow = handler(self, reader, header, scope)?;

                    realign(reader, header.atom_type, header.data_end())?;

                    if flow == Flow::Done {
                        return Ok(Flow::Done);
                    }
                }
                None => {
                    debug!("mov: skipping atom {:?}", header.atom_type);
                    reader.ignore_bytes(header.data_len)?;
                }
            }
        }

        // Skip whatever is left of the parent, without going past the end of the stream.
        let end = parent.data_end().min(stream_len);

        if reader.pos() < end {
            reader.ignore_bytes(end - reader.pos())?;
        }

        Ok(Flow::Continue)
    }

    /// Read the panorama samples of the first panorama track. Each chunk of the track holds one
    /// panorama sample made up of nested atoms.
    pub fn read_panorama(&mut self, reader: &mut MediaSourceStream) -> Result<()> {
        let pano_track =
            match self.movie.tracks.iter().position(|t| t.codec_type == CodecType::Panorama) {
                Some(track) => track,
                None => return decode_error("mov: no panorama track in a panorama movie"),
            };

        self.movie.pano_track = Some(pano_track);

        let track = &self.movie.tracks[pano_track];

        // Pair each chunk with the size of its sample.
        let chunks = track
            .chunk_offsets
            .iter()
            .enumerate()
            .map_while(|(i, &offset)| track.sample_size_of(i as u32).map(|size| (offset, size)))
            .collect::<Vec<_>>();

        debug!("mov: reading {} panorama samples", chunks.len());

        for (offset, size) in chunks {
            let samples = &mut self.movie.tracks[pano_track].pano_samples;

            samples.push(PanoSample::default());

            let scope = Scope { pano_sample: Some(samples.len() - 1), ..Default::default() };

            reader.seek(SeekFrom::Start(u64::from(offset)))?;

            let sample =
                AtomHeader::synthetic(AtomType::Other(*b"pano"), reader.pos(), u64::from(size));

            self.walk(reader, sample, scope)?;
        }

        Ok(())
    }

    /// Get the track in scope.
    fn track_mut(&mut self, scope: Scope, header: &AtomHeader) -> Option<&mut Track> {
        let track = match scope.track {
            Some(t) => self.movie.tracks.get_mut(t),
            None => None,
        };

        if track.is_none() {
            warn!("mov: {:?} atom outside of a track", header.atom_type);
        }

        track
    }

    /// Get the sample description in scope.
    fn sample_desc_mut(&mut self, scope: Scope, header: &AtomHeader) -> Option<&mut SampleDesc> {
        let desc = match (scope.track, scope.sample_desc) {
            (Some(t), Some(d)) => {
                self.movie.tracks.get_mut(t).and_then(|track| track.sample_descs.get_mut(d))
            }
            _ => None,
        };

        if desc.is_none() {
            warn!("mov: {:?} atom outside of a sample description", header.atom_type);
        }

        desc
    }

    /// Get the panorama sample in scope.
    fn pano_sample_mut(&mut self, scope: Scope, header: &AtomHeader) -> Option<&mut PanoSample> {
        let sample = match (self.movie.pano_track, scope.pano_sample) {
            (Some(t), Some(s)) => {
                self.movie.tracks.get_mut(t).and_then(|track| track.pano_samples.get_mut(s))
            }
            _ => None,
        };

        if sample.is_none() {
            warn!("mov: {:?} atom outside of a panorama sample", header.atom_type);
        }

        sample
    }
}

fn read_container(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    walker.walk(reader, header, scope)
}

fn read_leaf(
    _walker: &mut AtomWalker<'_>,
    _reader: &mut MediaSourceStream,
    _header: AtomHeader,
    _scope: Scope,
) -> Result<Flow> {
    // The payload is skipped by the walker.
    Ok(Flow::Continue)
}

fn read_moov(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    walker.walk(reader, header, scope)?;

    // Everything of interest is in the movie atom.
    walker.found_moov = true;

    Ok(Flow::Done)
}

fn read_trak(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    walker.movie.tracks.push(Track::default());

    let scope = Scope { track: Some(walker.movie.tracks.len() - 1), sample_desc: None, ..scope };

    walker.walk(reader, header, scope)
}

fn read_mvhd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    _scope: Scope,
) -> Result<Flow> {
    let mvhd = MvhdAtom::read(reader, header)?;

    debug!("mov (mvhd): timescale={}, duration={}", mvhd.timescale, mvhd.duration);

    let movie = &mut walker.movie;

    movie.time_scale = mvhd.timescale;
    movie.duration = mvhd.duration;
    movie.scale_factor_x = scale_factor(mvhd.x_scale);
    movie.scale_factor_y = scale_factor(mvhd.y_scale);

    Ok(Flow::Continue)
}

/// Get the scale factor for a display matrix scale entry.
fn scale_factor(fixed: i32) -> Rational {
    Rational::from_fixed_reciprocal(fixed).unwrap_or_else(|| {
        warn!("mov: display matrix scale is 0");
        Rational::ONE
    })
}

fn read_tkhd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let tkhd = TkhdAtom::read(reader, header)?;

    debug!("mov (tkhd): id={}, duration={}", tkhd.id, tkhd.duration);

    track.id = tkhd.id;
    track.flags = tkhd.flags;
    track.duration = tkhd.duration;
    track.scale_factor_x = scale_factor(tkhd.x_scale);
    track.scale_factor_y = scale_factor(tkhd.y_scale);

    Ok(Flow::Continue)
}

fn read_hdlr(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let hdlr = HdlrAtom::read(reader, header)?;

    // A handler atom outside of a track describes the movie, not a media.
    if let Some(track) = scope.track.and_then(|t| walker.movie.tracks.get_mut(t)) {
        if let Some(codec_type) = hdlr.codec_type() {
            track.codec_type = codec_type;
        }
    }

    Ok(Flow::Continue)
}

fn read_mdhd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let mdhd = match MdhdAtom::read(reader, header) {
        Ok(mdhd) => mdhd,
        Err(Error::Unsupported(msg)) => {
            warn!("{}", msg);
            return Ok(Flow::Skipped);
        }
        Err(err) => return Err(err),
    };

    debug!("mov (mdhd): timescale={}, duration={}", mdhd.timescale, mdhd.duration);

    track.time_scale = mdhd.timescale;
    track.media_duration = mdhd.duration;

    Ok(Flow::Continue)
}

fn read_smhd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.sound_balance = SmhdAtom::read(reader, header)?.balance;

    Ok(Flow::Continue)
}

fn read_vmhd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let vmhd = VmhdAtom::read(reader, header)?;

    track.graphics_mode = vmhd.graphics_mode;
    track.opcolor = vmhd.opcolor;

    Ok(Flow::Continue)
}

fn read_gmin(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let gmin = GminAtom::read(reader, header)?;

    track.graphics_mode = gmin.graphics_mode;
    track.opcolor = gmin.opcolor;
    track.sound_balance = gmin.balance;

    Ok(Flow::Continue)
}

fn read_dref(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let dref = DrefAtom::read(reader, header)?;

    if let Some(alias) = dref.alias {
        track.volume = alias.volume;
        track.filename = alias.filename;
        track.path = alias.path;
        track.directory = alias.directory;
        track.nlvl_from = alias.nlvl_from;
        track.nlvl_to = alias.nlvl_to;
    }

    Ok(if dref.truncated { Flow::Skipped } else { Flow::Continue })
}

fn read_elst(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.edit_list = ElstAtom::read(reader, header)?.entries;

    Ok(Flow::Continue)
}

fn read_stsc(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.sample_to_chunk = StscAtom::read(reader, header)?.entries;

    Ok(Flow::Continue)
}

fn read_stts(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let stts = SttsAtom::read(reader, header)?;

    track.time_to_sample = stts.entries;
    track.frame_count = stts.total_sample_count;

    Ok(Flow::Continue)
}

fn read_stsz(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let stsz = StszAtom::read(reader, header)?;

    track.sample_size = stsz.sample_size;
    track.sample_count = stsz.sample_count;
    track.sample_sizes = stsz.sample_sizes;

    Ok(Flow::Continue)
}

fn read_stco(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let begin_offset = walker.options.begin_offset;

    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.chunk_offsets = StcoAtom::read(reader, header)?.offsets_relative_to(begin_offset);

    Ok(Flow::Continue)
}

fn read_stss(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.keyframes = StssAtom::read(reader, header)?.keyframes;

    Ok(Flow::Continue)
}

fn read_stsd(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    mut header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(t) = scope.track
    else {
        warn!("mov: {:?} atom outside of a track", header.atom_type);
        return Ok(Flow::Skipped);
    };

    let (_, _) = header.read_extended_header(reader)?;

    let entry_count = header.read_entry_count(reader, u64::from(StsdEntryHeader::SIZE))?;

    for _ in 0..entry_count {
        let entry = StsdEntryHeader::read(reader)?;

        if entry.end() > header.data_end() {
            warn!("mov (stsd): sample description overflows atom bounds");
            return Ok(Flow::Skipped);
        }

        debug!(
            "mov (stsd): codec_tag={:?}, len={}, data_ref_index={}",
            entry.codec_tag, entry.size, entry.data_ref_index
        );

        let desc = walker.desc_reader.read_sample_desc(reader, &walker.movie.tracks[t], &entry)?;

        // Without a sample description, the entry is skipped.
        if let Some(desc) = desc {
            let descs = &mut walker.movie.tracks[t].sample_descs;

            descs.push(desc);

            let scope = Scope { sample_desc: Some(descs.len() - 1), ..scope };

            // The description may be followed by atoms holding codec specific data.
            if reader.pos() + HEADER_SIZE < entry.end() {
                let extra = AtomHeader::synthetic(
                    AtomType::SampleDescription,
                    reader.pos(),
                    entry.end() - reader.pos(),
                );

                walker.walk(reader, extra, scope)?;
            }
        }

        realign(reader, header.atom_type, entry.end())?;
    }

    Ok(Flow::Continue)
}

fn read_wave(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    if scope.track.is_none() {
        return Ok(Flow::Continue);
    }

    if header.data_len > MAX_WAVE_ATOM_LEN {
        return limit_error("mov (wave): atom too large");
    }

    let Some(desc) = walker.sample_desc_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    // QDM2 decoders require the whole atom.
    if desc.codec_tag == *b"QDM2" {
        desc.extra_data = Some(reader.read_boxed_slice_exact(header.data_len as usize)?);
        return Ok(Flow::Continue);
    }

    if header.data_len > HEADER_SIZE {
        return walker.walk(reader, header, scope);
    }

    Ok(Flow::Continue)
}

fn read_esds(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    if scope.track.is_none() {
        return Ok(Flow::Continue);
    }

    let Some(desc) = walker.sample_desc_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    let esds = EsdsAtom::read(reader, header)?;

    if esds.object_type.is_some() {
        desc.object_type = esds.object_type;
    }

    if esds.extra_data.is_some() {
        desc.extra_data = esds.extra_data;
    }

    Ok(Flow::Continue)
}

fn read_smi(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    if scope.track.is_none() {
        return Ok(Flow::Continue);
    }

    let Some(desc) = walker.sample_desc_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    // The atom holds SVQ3 extra data.
    desc.extra_data = Some(reader.read_boxed_slice_exact(header.data_len as usize)?);

    Ok(Flow::Continue)
}

fn read_cmov(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let cmov = CmovAtom::read(reader, header)?;

    let len = cmov.data.len() as u64;

    // The decompressed movie is read from its own stream. The outer stream is left positioned
    // after the compressed data.
    let mut inflated = MediaSourceStream::new(
        Box::new(Cursor::new(cmov.data)),
        MediaSourceStreamOptions::default(),
    );

    walker.walk(&mut inflated, AtomHeader::synthetic(AtomType::Movie, 0, len), scope)
}

fn read_ctyp(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    _scope: Scope,
) -> Result<Flow> {
    walker.movie.qtvr_type = CtypAtom::read(reader, header)?.qtvr_type;

    Ok(Flow::Continue)
}

fn read_wloc(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    _scope: Scope,
) -> Result<Flow> {
    let wloc = WlocAtom::read(reader, header)?;

    walker.movie.win_x = wloc.x;
    walker.movie.win_y = wloc.y;

    Ok(Flow::Continue)
}

fn read_navg(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    _scope: Scope,
) -> Result<Flow> {
    walker.movie.nav = NavgAtom::read(reader, header)?.nav;

    Ok(Flow::Continue)
}

fn read_pinf(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(track) = walker.track_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    track.pano_info = PinfAtom::read(reader, header)?.info;

    Ok(Flow::Continue)
}

fn read_phdr(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(sample) = walker.pano_sample_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    sample.hdr = PhdrAtom::read(reader, header)?.hdr;

    Ok(Flow::Continue)
}

fn read_phot(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(sample) = walker.pano_sample_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    sample.hot_spot_table = PhotAtom::read(reader, header)?.table;

    Ok(Flow::Continue)
}

fn read_plnk(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(sample) = walker.pano_sample_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    sample.link_table = PlnkAtom::read(reader, header)?.table;

    Ok(Flow::Continue)
}

fn read_pnav(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(sample) = walker.pano_sample_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    sample.nav_table = PnavAtom::read(reader, header)?.table;

    Ok(Flow::Continue)
}

fn read_strt(
    walker: &mut AtomWalker<'_>,
    reader: &mut MediaSourceStream,
    header: AtomHeader,
    scope: Scope,
) -> Result<Flow> {
    let Some(sample) = walker.pano_sample_mut(scope, &header)
    else {
        return Ok(Flow::Skipped);
    };

    sample.str_table = StrtAtom::read(reader, header)?.table;

    Ok(Flow::Continue)
}
