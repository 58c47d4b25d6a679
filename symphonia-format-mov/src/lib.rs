// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A QuickTime movie (MOV) atom demuxer.
//!
//! Parses the atom tree of a QuickTime movie into a [`Movie`]: the movie header, and for each
//! video, audio, MIDI, or panorama track, its sample tables, edit list, and sample descriptions.
//! Compressed movie atoms and QuickTime VR panorama movies are supported.
//!
//! ```no_run
//! use symphonia_format_mov::{parse_file, MovOptions};
//!
//! let movie = parse_file("movie.mov", MovOptions::default()).unwrap();
//!
//! for track in &movie.tracks {
//!     println!("{:?}: {} chunks", track.codec_type, track.chunk_count());
//! }
//! ```

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all Symphonia crates. Please see clippy.toml for their
// justification.
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

mod atoms;
mod fourcc;
mod fp;
mod movie;
mod options;
mod panorama;
mod sample_desc;
mod track;
mod walker;

pub use atoms::StsdEntryHeader;
pub use fourcc::FourCc;
pub use fp::{FpU16, Rational};
pub use movie::{parse_file, parse_stream, Movie, MovieParser};
pub use options::MovOptions;
pub use panorama::{
    NavigationHeader, PanoHotSpot, PanoHotSpotTable, PanoLink, PanoLinkTable, PanoNavigation,
    PanoNavigationTable, PanoNode, PanoSample, PanoSampleHeader, PanoStringTable, PanoTrackInfo,
    QtvrType, Rect,
};
pub use sample_desc::{
    AudioSampleDesc, DefaultSampleDescReader, SampleDesc, SampleDescDetails, SampleDescReader,
    VideoSampleDesc,
};
pub use track::{
    CodecType, EditListEntry, GraphicsMode, SampleToChunkEntry, TimeToSampleEntry, Track,
};
