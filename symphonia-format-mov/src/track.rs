// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::fp::Rational;
use crate::panorama::{PanoSample, PanoTrackInfo};
use crate::sample_desc::SampleDesc;

/// The kind of media carried by a track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CodecType {
    Video,
    Audio,
    Midi,
    Panorama,
    #[default]
    Other,
}

/// QuickTime graphics transfer mode, used to composite video and panorama tracks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GraphicsMode {
    #[default]
    Copy,
    DitherCopy,
    Blend,
    Transparent,
    StraightAlpha,
    PremulWhiteAlpha,
    PremulBlackAlpha,
    Composition,
    StraightAlphaBlend,
    Other(u16),
}

impl From<u16> for GraphicsMode {
    fn from(val: u16) -> Self {
        match val {
            0x0000 => GraphicsMode::Copy,
            0x0040 => GraphicsMode::DitherCopy,
            0x0020 => GraphicsMode::Blend,
            0x0024 => GraphicsMode::Transparent,
            0x0100 => GraphicsMode::StraightAlpha,
            0x0101 => GraphicsMode::PremulWhiteAlpha,
            0x0102 => GraphicsMode::PremulBlackAlpha,
            0x0103 => GraphicsMode::Composition,
            0x0104 => GraphicsMode::StraightAlphaBlend,
            _ => GraphicsMode::Other(val),
        }
    }
}

/// A run of chunks sharing the same number of samples per chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampleToChunkEntry {
    /// The 0-based index of the first chunk of the run.
    pub first: u32,
    /// The number of samples in each chunk of the run.
    pub count: u32,
    /// The sample description index of the run.
    pub id: u32,
}

/// A run of samples sharing the same duration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeToSampleEntry {
    pub count: u32,
    pub duration: u32,
}

/// A single edit of a track's edit list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EditListEntry {
    /// The duration of the edit in movie timescale units.
    pub track_duration: u32,
    /// The sum of the durations of all preceeding edits.
    pub time_offset: u32,
    /// The start time of the edit in media timescale units, or -1 for an empty edit.
    pub media_time: i32,
    /// The playback rate of the edit.
    pub media_rate: Rational,
}

impl EditListEntry {
    /// Returns true if the edit is an empty edit (silence or a blank frame).
    pub fn is_empty_edit(&self) -> bool {
        self.media_time == -1
    }
}

/// A track of a movie.
#[derive(Debug)]
pub struct Track {
    /// The kind of media of the track.
    pub codec_type: CodecType,
    /// The track ID.
    pub id: u32,
    /// The track header flags.
    pub flags: u32,
    /// Media timescale. 0 until known, in which case the movie's timescale is inherited.
    pub time_scale: u32,
    /// Duration of the track in movie timescale units.
    pub duration: u32,
    /// Duration of the media in media timescale units.
    pub media_duration: u32,
    /// The total number of frames (the sum of all time-to-sample counts).
    pub frame_count: u32,
    /// Chunk offsets relative to the start of the movie.
    pub chunk_offsets: Vec<u32>,
    pub sample_to_chunk: Vec<SampleToChunkEntry>,
    /// The size of every sample, or 0 if samples have individual sizes.
    pub sample_size: u32,
    pub sample_count: u32,
    pub sample_sizes: Vec<u32>,
    pub time_to_sample: Vec<TimeToSampleEntry>,
    /// 0-based indicies of the key frames. Empty if every sample is a key frame.
    pub keyframes: Vec<u32>,
    pub edit_list: Vec<EditListEntry>,
    pub sample_descs: Vec<SampleDesc>,
    pub scale_factor_x: Rational,
    pub scale_factor_y: Rational,
    /// The volume name of the externally referenced media file.
    pub volume: String,
    /// The file name of the externally referenced media file.
    pub filename: String,
    /// The absolute path, without the volume name, of the externally referenced media file.
    pub path: String,
    /// The directory of the externally referenced media file.
    pub directory: String,
    /// The alias record's "from" directory level, or -1.
    pub nlvl_from: i16,
    /// The alias record's "to" directory level, or -1.
    pub nlvl_to: i16,
    pub sound_balance: i16,
    pub graphics_mode: GraphicsMode,
    pub opcolor: [u16; 3],
    pub pano_info: PanoTrackInfo,
    pub pano_samples: Vec<PanoSample>,
}

impl Default for Track {
    fn default() -> Self {
        Track {
            codec_type: CodecType::Other,
            id: 0,
            flags: 0,
            time_scale: 0,
            duration: 0,
            media_duration: 0,
            frame_count: 0,
            chunk_offsets: Vec::new(),
            sample_to_chunk: Vec::new(),
            sample_size: 0,
            sample_count: 0,
            sample_sizes: Vec::new(),
            time_to_sample: Vec::new(),
            keyframes: Vec::new(),
            edit_list: Vec::new(),
            sample_descs: Vec::new(),
            scale_factor_x: Rational::ONE,
            scale_factor_y: Rational::ONE,
            volume: String::new(),
            filename: String::new(),
            path: String::new(),
            directory: String::new(),
            nlvl_from: -1,
            nlvl_to: -1,
            sound_balance: 0,
            graphics_mode: GraphicsMode::Copy,
            opcolor: [0; 3],
            pano_info: PanoTrackInfo::default(),
            pano_samples: Vec::new(),
        }
    }
}

impl Track {
    /// Get the number of chunks in the track.
    pub fn chunk_count(&self) -> usize {
        self.chunk_offsets.len()
    }

    /// Get the size of the sample at index `n`, if it exists.
    pub fn sample_size_of(&self, n: u32) -> Option<u32> {
        if self.sample_size != 0 {
            return if n < self.sample_count { Some(self.sample_size) } else { None };
        }
        self.sample_sizes.get(n as usize).copied()
    }

    /// Returns true if the sample at index `n` is a key frame.
    pub fn is_keyframe(&self, n: u32) -> bool {
        self.keyframes.is_empty() || self.keyframes.binary_search(&n).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphicsMode, Track};

    #[test]
    fn track_defaults() {
        let track = Track::default();
        assert_eq!(track.nlvl_from, -1);
        assert_eq!(track.nlvl_to, -1);
        assert_eq!(track.time_scale, 0);
        assert!(track.is_keyframe(10));
    }

    #[test]
    fn sample_sizes() {
        let track = Track { sample_size: 4, sample_count: 2, ..Default::default() };
        assert_eq!(track.sample_size_of(1), Some(4));
        assert_eq!(track.sample_size_of(2), None);

        let track =
            Track { sample_sizes: vec![1, 2, 3], keyframes: vec![0, 2], ..Default::default() };
        assert_eq!(track.sample_size_of(2), Some(3));
        assert!(!track.is_keyframe(1));
        assert!(track.is_keyframe(2));
    }

    #[test]
    fn graphics_modes() {
        assert_eq!(GraphicsMode::from(0x40), GraphicsMode::DitherCopy);
        assert_eq!(GraphicsMode::from(0x7), GraphicsMode::Other(7));
    }
}
