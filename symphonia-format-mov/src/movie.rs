// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::path::Path;

use symphonia_core::errors::{decode_error, Result};
use symphonia_core::io::{MediaSourceStream, MediaSourceStreamOptions, ReadBytes};

use crate::atoms::{AtomHeader, AtomType};
use crate::fp::Rational;
use crate::options::MovOptions;
use crate::panorama::{NavigationHeader, QtvrType};
use crate::sample_desc::{DefaultSampleDescReader, SampleDescReader};
use crate::track::{CodecType, EditListEntry, Track};
use crate::walker::{stream_len, AtomWalker, Scope};

use log::{debug, info};

/// A QuickTime movie.
#[derive(Debug)]
pub struct Movie {
    /// Timescale of the movie expressed as the number of units per second.
    pub time_scale: u32,
    /// Duration of the movie in `time_scale` units.
    pub duration: u32,
    pub scale_factor_x: Rational,
    pub scale_factor_y: Rational,
    /// The QuickTime VR type of the movie.
    pub qtvr_type: QtvrType,
    /// The QuickTime VR navigation header.
    pub nav: NavigationHeader,
    /// The preferred window location.
    pub win_x: u16,
    pub win_y: u16,
    /// The tracks of the movie, in the order they were found.
    pub tracks: Vec<Track>,
    /// The index of the panorama track of a panorama movie.
    pub pano_track: Option<usize>,
}

impl Default for Movie {
    fn default() -> Self {
        Movie {
            time_scale: 1,
            duration: 0,
            scale_factor_x: Rational::ONE,
            scale_factor_y: Rational::ONE,
            qtvr_type: QtvrType::Other,
            nav: NavigationHeader::default(),
            win_x: 0,
            win_y: 0,
            tracks: Vec::new(),
            pano_track: None,
        }
    }
}

impl Movie {
    /// Get the panorama track of a panorama movie.
    pub fn pano_track(&self) -> Option<&Track> {
        self.pano_track.and_then(|t| self.tracks.get(t))
    }

    /// Finish the movie after all atoms were read. Drops tracks of unknown media types, and
    /// fills in the timescale and edit list of tracks that have none.
    pub(crate) fn init(&mut self) {
        let count = self.tracks.len();

        self.tracks.retain(|track| track.codec_type != CodecType::Other);

        if self.tracks.len() < count {
            debug!("mov: dropped {} tracks of unknown media type", count - self.tracks.len());
        }

        for track in self.tracks.iter_mut() {
            if track.time_scale == 0 {
                track.time_scale = self.time_scale;
            }

            // MPEG-4 files may not have an edit list. Play the entire track.
            if track.edit_list.is_empty() {
                track.edit_list.push(EditListEntry {
                    track_duration: track.duration,
                    time_offset: 0,
                    media_time: 0,
                    media_rate: Rational::ONE,
                });
            }
        }
    }

    /// Merge adjacent edits that are both empty edits, or both non-empty edits, into one edit.
    ///
    /// Some movies have audio edit lists made of many short edits with small gaps in media time
    /// between them. Playing the media continuously gives the intended result. Empty edits are
    /// kept apart from non-empty edits so that silence is not extended over audible media.
    ///
    /// Time offsets of the merged edits are recalculated.
    pub fn flatten_edit_lists(&mut self) {
        for track in self.tracks.iter_mut() {
            if track.edit_list.len() < 2 {
                continue;
            }

            let mut edits: Vec<EditListEntry> = Vec::with_capacity(track.edit_list.len());

            for edit in track.edit_list.drain(..) {
                match edits.last_mut() {
                    Some(last) if last.is_empty_edit() == edit.is_empty_edit() => {
                        last.track_duration = last.track_duration.wrapping_add(edit.track_duration);
                    }
                    _ => edits.push(edit),
                }
            }

            let mut time_offset = 0u32;

            for edit in edits.iter_mut() {
                edit.time_offset = time_offset;
                time_offset = time_offset.wrapping_add(edit.track_duration);
            }

            track.edit_list = edits;
        }
    }
}

/// Parses QuickTime movies.
///
/// Sample descriptions are read with a [`SampleDescReader`]. By default, the QuickTime image and
/// sound descriptions are read.
pub struct MovieParser<R: SampleDescReader = DefaultSampleDescReader> {
    options: MovOptions,
    desc_reader: R,
}

impl MovieParser {
    pub fn new(options: MovOptions) -> Self {
        MovieParser { options, desc_reader: DefaultSampleDescReader }
    }
}

impl<R: SampleDescReader> MovieParser<R> {
    /// Instantiate a parser that reads sample descriptions with `desc_reader`.
    pub fn with_sample_desc_reader(options: MovOptions, desc_reader: R) -> Self {
        MovieParser { options, desc_reader }
    }

    /// Parse the movie in the provided stream.
    pub fn parse_stream(&mut self, mut reader: MediaSourceStream) -> Result<Movie> {
        let len = stream_len(&reader)?;

        let mut walker = AtomWalker::new(self.options, &mut self.desc_reader);

        // The stream is the root container.
        let root = AtomHeader::synthetic(
            AtomType::Other(*b"root"),
            reader.pos(),
            len.saturating_sub(reader.pos()),
        );

        walker.walk(&mut reader, root, Scope::default())?;

        if !walker.found_moov {
            return decode_error("mov: missing movie atom");
        }

        walker.movie.init();

        if walker.movie.qtvr_type == QtvrType::Panorama {
            walker.read_panorama(&mut reader)?;
        }

        let mut movie = walker.movie;

        if self.options.flatten_edit_lists {
            movie.flatten_edit_lists();
        }

        info!(
            "mov: movie with {} tracks, timescale={}, duration={}",
            movie.tracks.len(),
            movie.time_scale,
            movie.duration
        );

        Ok(movie)
    }

    /// Parse the movie in the data fork of the file at `path`.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Movie> {
        let file = File::open(path)?;

        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        self.parse_stream(mss)
    }
}

/// Parse the movie in the provided stream.
pub fn parse_stream(reader: MediaSourceStream, options: MovOptions) -> Result<Movie> {
    MovieParser::new(options).parse_stream(reader)
}

/// Parse the movie in the file at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P, options: MovOptions) -> Result<Movie> {
    MovieParser::new(options).parse_file(path)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use symphonia_core::errors::{Error, Result};
    use symphonia_core::io::{MediaSourceStream, MediaSourceStreamOptions, ReadBytes};

    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    use super::{parse_stream, Movie, MovieParser};
    use crate::atoms::StsdEntryHeader;
    use crate::fp::Rational;
    use crate::options::MovOptions;
    use crate::panorama::QtvrType;
    use crate::sample_desc::{SampleDesc, SampleDescDetails, SampleDescReader};
    use crate::track::{CodecType, EditListEntry, Track};

    fn atom(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(payload.len() + 8);
        buf.extend_from_slice(&(payload.len() as u32 + 8).to_be_bytes());
        buf.extend_from_slice(tag);
        buf.extend_from_slice(payload);
        buf
    }

    fn full_atom(tag: &[u8; 4], version: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![version, 0, 0, 0];
        buf.extend_from_slice(payload);
        atom(tag, &buf)
    }

    fn words(vals: &[u32]) -> Vec<u8> {
        vals.iter().flat_map(|val| val.to_be_bytes()).collect()
    }

    fn matrix() -> Vec<u8> {
        words(&[0x10000, 0, 0, 0, 0x10000, 0, 0, 0, 0x4000_0000])
    }

    fn mvhd(timescale: u32, duration: u32) -> Vec<u8> {
        let mut payload = words(&[0, 0, timescale, duration, 0x10000]);
        payload.extend_from_slice(&[1, 0]);
        payload.extend_from_slice(&[0; 10]);
        payload.extend(matrix());
        payload.extend_from_slice(&[0; 28]);
        full_atom(b"mvhd", 0, &payload)
    }

    fn tkhd(id: u32, duration: u32) -> Vec<u8> {
        let mut payload = words(&[0, 0, id, 0, duration, 0, 0, 0, 0]);
        payload.extend(matrix());
        payload.extend(words(&[320 << 16, 240 << 16]));
        full_atom(b"tkhd", 0, &payload)
    }

    fn mdhd(version: u8, timescale: u32, duration: u32) -> Vec<u8> {
        full_atom(b"mdhd", version, &words(&[0, 0, timescale, duration, 0]))
    }

    fn hdlr(subtype: &[u8; 4]) -> Vec<u8> {
        let mut payload = b"mhlr".to_vec();
        payload.extend_from_slice(subtype);
        payload.extend_from_slice(&[0; 12]);
        payload.push(0);
        full_atom(b"hdlr", 0, &payload)
    }

    /// A sample table atom with `count` entries.
    fn table(tag: &[u8; 4], count: u32, entries: &[u32]) -> Vec<u8> {
        let mut payload = words(&[count]);
        payload.extend(words(entries));
        full_atom(tag, 0, &payload)
    }

    fn stsz(sample_size: u32, sizes: &[u32]) -> Vec<u8> {
        let count = if sample_size == 0 { sizes.len() as u32 } else { 1 };
        let mut payload = words(&[sample_size, count]);
        payload.extend(words(sizes));
        full_atom(b"stsz", 0, &payload)
    }

    fn trak(tkhd: Vec<u8>, mdhd: Vec<u8>, hdlr: Vec<u8>, stbl: &[Vec<u8>]) -> Vec<u8> {
        let minf = atom(b"minf", &atom(b"stbl", &stbl.concat()));
        let mdia = atom(b"mdia", &[mdhd, hdlr, minf].concat());
        atom(b"trak", &[tkhd, mdia].concat())
    }

    fn video_trak() -> Vec<u8> {
        trak(
            tkhd(1, 50),
            mdhd(0, 0, 30),
            hdlr(b"vide"),
            &[
                table(b"stts", 1, &[3, 10]),
                table(b"stsc", 1, &[1, 3, 1]),
                stsz(0, &[4, 4, 4]),
                table(b"stco", 2, &[116, 120]),
                table(b"stss", 2, &[1, 3]),
            ],
        )
    }

    fn parse_with(data: Vec<u8>, options: MovOptions) -> Result<Movie> {
        let source = Box::new(Cursor::new(data));
        parse_stream(MediaSourceStream::new(source, MediaSourceStreamOptions::default()), options)
    }

    fn parse(data: Vec<u8>) -> Result<Movie> {
        parse_with(data, MovOptions::default())
    }

    #[test]
    fn verify_extended_size_fails() {
        let mut data = vec![0, 0, 0, 1];
        data.extend_from_slice(b"moov");
        data.extend_from_slice(&[0; 16]);

        match parse(data) {
            Err(Error::Unsupported(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn verify_missing_moov_fails() {
        let data = [atom(b"ftyp", b"qt  "), atom(b"free", &[0; 8])].concat();

        match parse(data) {
            Err(Error::DecodeError(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn verify_moov_without_tracks() {
        let movie = parse(atom(b"moov", &mvhd(600, 1200))).unwrap();

        assert_eq!(movie.time_scale, 600);
        assert_eq!(movie.duration, 1200);
        assert_eq!(movie.scale_factor_x, Rational::ONE);
        assert!(movie.tracks.is_empty());
    }

    #[test]
    fn verify_track_tables() {
        let data = atom(b"moov", &[mvhd(600, 1200), video_trak()].concat());

        let options = MovOptions { begin_offset: 16, ..Default::default() };
        let movie = parse_with(data, options).unwrap();

        assert_eq!(movie.tracks.len(), 1);

        let track = &movie.tracks[0];

        assert_eq!(track.codec_type, CodecType::Video);
        assert_eq!(track.id, 1);
        assert_eq!(track.chunk_offsets, [100, 104]);
        assert_eq!(track.sample_to_chunk.len(), 1);
        assert_eq!(track.sample_to_chunk[0].first, 0);
        assert_eq!(track.sample_to_chunk[0].count, 3);
        assert_eq!(track.sample_sizes, [4, 4, 4]);
        assert_eq!(track.keyframes, [0, 2]);
        assert_eq!(track.frame_count, 3);
        assert_eq!(track.media_duration, 30);

        // The track timescale is inherited from the movie.
        assert_eq!(track.time_scale, 600);

        // An edit spanning the entire track is synthesized.
        assert_eq!(
            track.edit_list,
            [EditListEntry {
                track_duration: 50,
                time_offset: 0,
                media_time: 0,
                media_rate: Rational::ONE
            }]
        );
    }

    #[test]
    fn verify_unknown_tracks_are_dropped() {
        let other = trak(tkhd(2, 10), mdhd(0, 600, 10), hdlr(b"tmcd"), &[]);

        let data = atom(b"moov", &[mvhd(600, 1200), other, video_trak()].concat());
        let movie = parse(data).unwrap();

        assert_eq!(movie.tracks.len(), 1);
        assert_eq!(movie.tracks[0].id, 1);
    }

    #[test]
    fn verify_unknown_media_header_version_is_skipped() {
        let video = trak(tkhd(1, 50), mdhd(2, 90000, 30), hdlr(b"vide"), &[]);

        let movie = parse(atom(b"moov", &[mvhd(600, 1200), video].concat())).unwrap();

        assert_eq!(movie.tracks.len(), 1);
        assert_eq!(movie.tracks[0].time_scale, 600);
        assert_eq!(movie.tracks[0].media_duration, 0);
    }

    #[test]
    fn verify_truncated_tail() {
        // An atom extending beyond the end of the stream inside the movie atom.
        let mut junk = vec![0, 0, 1, 0];
        junk.extend_from_slice(b"free");
        junk.extend_from_slice(&[0; 8]);

        let data = atom(b"moov", &[mvhd(600, 1200), video_trak(), junk.clone()].concat());
        let movie = parse(data.clone()).unwrap();
        assert_eq!(movie.tracks.len(), 1);

        // An atom extending beyond the end of the stream after the movie atom.
        let movie = parse([data, junk].concat()).unwrap();
        assert_eq!(movie.tracks.len(), 1);
    }

    #[test]
    fn verify_zero_size_atom_at_end_of_parent() {
        // A zero-sized atom with too few bytes left in the track to hold anything.
        let mut tail = vec![0, 0, 0, 0];
        tail.extend_from_slice(b"tkhd");
        tail.extend_from_slice(&[0; 4]);

        let mdia = atom(b"mdia", &hdlr(b"vide"));
        let trak = atom(b"trak", &[mdia, tail].concat());

        let movie = parse(atom(b"moov", &[mvhd(600, 1200), trak].concat())).unwrap();

        assert_eq!(movie.tracks.len(), 1);
        assert_eq!(movie.tracks[0].codec_type, CodecType::Video);
    }

    #[test]
    fn verify_zero_size_media_data() {
        let mut mdat = vec![0, 0, 0, 0];
        mdat.extend_from_slice(b"mdat");
        mdat.extend_from_slice(&[0; 16]);

        // A zero-sized media data atom spans the stream. It is the junk tail of the movie atom.
        let moov = atom(b"moov", &[mvhd(600, 1200), video_trak(), mdat.clone()].concat());
        let movie = parse(moov.clone()).unwrap();
        assert_eq!(movie.tracks.len(), 1);

        // At the top level, nothing after it is read.
        match parse([mdat, moov].concat()) {
            Err(Error::DecodeError(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn verify_mirrored_display_matrix() {
        let mut mirrored = tkhd(1, 50);

        // Matrix entry a: -1.0 in signed 16.16 fixed point.
        mirrored[48..52].copy_from_slice(&0xffff_0000u32.to_be_bytes());

        let video = trak(mirrored, mdhd(0, 600, 30), hdlr(b"vide"), &[]);

        let movie = parse(atom(b"moov", &[mvhd(600, 1200), video].concat())).unwrap();
        let track = &movie.tracks[0];

        assert_eq!(track.scale_factor_x, Rational::from(-1));
        assert_eq!(f64::from(track.scale_factor_x), -1.0);
        assert_eq!(track.scale_factor_y, Rational::ONE);
    }

    #[test]
    fn verify_over_read_is_realigned() {
        // A track header too short for its contents.
        let short_tkhd = full_atom(b"tkhd", 0, &[0; 16]);

        let mdia = atom(b"mdia", &hdlr(b"vide"));
        let trak = atom(b"trak", &[short_tkhd, mdia].concat());

        let data = atom(b"moov", &[mvhd(600, 1200), trak, atom(b"free", &[0; 100])].concat());
        let movie = parse(data).unwrap();

        // The media atom following the track header is still found.
        assert_eq!(movie.tracks.len(), 1);
        assert_eq!(movie.tracks[0].codec_type, CodecType::Video);
    }

    fn compressed_moov(moov: &[u8], method: &[u8; 4]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(moov).unwrap();
        let compressed = encoder.finish().unwrap();

        let dcom = atom(b"dcom", method);

        let mut cmvd = words(&[moov.len() as u32]);
        cmvd.extend(compressed);

        atom(b"moov", &atom(b"cmov", &[dcom, atom(b"cmvd", &cmvd)].concat()))
    }

    #[test]
    fn verify_compressed_movie() {
        let moov = atom(b"moov", &[mvhd(600, 1200), video_trak()].concat());

        let plain = parse(moov.clone()).unwrap();
        let inflated = parse(compressed_moov(&moov, b"zlib")).unwrap();

        assert_eq!(inflated.time_scale, plain.time_scale);
        assert_eq!(inflated.tracks.len(), plain.tracks.len());

        let (a, b) = (&inflated.tracks[0], &plain.tracks[0]);

        assert_eq!(a.codec_type, b.codec_type);
        assert_eq!(a.chunk_offsets, b.chunk_offsets);
        assert_eq!(a.sample_to_chunk, b.sample_to_chunk);
        assert_eq!(a.sample_sizes, b.sample_sizes);
        assert_eq!(a.time_to_sample, b.time_to_sample);
        assert_eq!(a.keyframes, b.keyframes);
        assert_eq!(a.edit_list, b.edit_list);
    }

    #[test]
    fn verify_compressed_movie_unknown_method_fails() {
        let moov = atom(b"moov", &[mvhd(600, 1200), video_trak()].concat());

        match parse(compressed_moov(&moov, b"lzss")) {
            Err(Error::Unsupported(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    /// A version 0 sound description: 2 channels, 16 bits, 44100 Hz.
    fn sound_desc() -> Vec<u8> {
        let mut desc = words(&[0, 0]);
        desc.extend_from_slice(&[0, 2, 0, 16, 0, 0, 0, 0]);
        desc.extend(words(&[44100 << 16]));
        desc
    }

    /// An elementary stream descriptor with object type 0x40 and 2 bytes of extra data.
    fn esds() -> Vec<u8> {
        full_atom(
            b"esds",
            0,
            &[
                0x03, 0x16, 0x00, 0x01, 0x00, // ES descriptor
                0x04, 0x11, 0x40, 0x15, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // decoder config
                0x05, 0x02, 0x12, 0x10, // decoder specific info
            ],
        )
    }

    /// A sample description table entry.
    fn stsd_entry(codec_tag: &[u8; 4], data_ref_index: u8, body: &[u8]) -> Vec<u8> {
        let mut entry = words(&[16 + body.len() as u32]);
        entry.extend_from_slice(codec_tag);
        entry.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, data_ref_index]);
        entry.extend_from_slice(body);
        entry
    }

    fn sample_descs(codec_type: &[u8; 4], entries: &[Vec<u8>]) -> Vec<SampleDesc> {
        let mut payload = words(&[entries.len() as u32]);
        payload.extend(entries.concat());

        let stsd = full_atom(b"stsd", 0, &payload);
        let track = trak(tkhd(1, 50), mdhd(0, 44100, 441), hdlr(codec_type), &[stsd]);

        let mut movie = parse(atom(b"moov", &[mvhd(600, 1200), track].concat())).unwrap();
        movie.tracks.remove(0).sample_descs
    }

    #[test]
    fn verify_sample_descriptions() {
        let entry = stsd_entry(b"mp4a", 1, &[sound_desc(), esds()].concat());

        let wave = atom(b"wave", b"\x00\x00\x00\x08frma");
        let qdm2 = stsd_entry(b"QDM2", 2, &[sound_desc(), wave].concat());

        let descs = sample_descs(b"soun", &[entry, qdm2]);

        assert_eq!(descs.len(), 2);

        assert_eq!(descs[0].codec_tag, *b"mp4a");
        assert_eq!(descs[0].data_ref_index, 1);
        assert_eq!(descs[0].object_type, Some(0x40));
        assert_eq!(descs[0].extra_data.as_deref(), Some(&[0x12, 0x10][..]));

        match &descs[0].details {
            SampleDescDetails::Audio(audio) => {
                assert_eq!(audio.num_channels, 2);
                assert_eq!(audio.sample_rate, 44100.0);
            }
            details => panic!("unexpected details {:?}", details),
        }

        assert_eq!(descs[1].codec_tag, *b"QDM2");
        assert_eq!(descs[1].extra_data.as_deref(), Some(&b"\x00\x00\x00\x08frma"[..]));
    }

    #[test]
    fn verify_wave_is_walked_as_container() {
        let frma = atom(b"frma", b"mp4a");
        let wave = atom(b"wave", &[frma, esds()].concat());

        let entry = stsd_entry(b"mp4a", 1, &[sound_desc(), wave].concat());
        let descs = sample_descs(b"soun", &[entry]);

        assert_eq!(descs.len(), 1);
        assert_eq!(descs[0].object_type, Some(0x40));
        assert_eq!(descs[0].extra_data.as_deref(), Some(&[0x12, 0x10][..]));
    }

    #[test]
    fn verify_sorenson_extra_data() {
        let image_desc = vec![0; 70];
        let smi = atom(b"SMI ", b"SEQH\x00\x00\x00\x02\xab\xcd");

        let entry = stsd_entry(b"SVQ3", 1, &[image_desc, smi].concat());
        let descs = sample_descs(b"vide", &[entry]);

        assert_eq!(descs.len(), 1);
        assert_eq!(descs[0].codec_tag, *b"SVQ3");
        assert!(matches!(descs[0].details, SampleDescDetails::Video(_)));
        assert_eq!(
            descs[0].extra_data.as_deref(),
            Some(&b"SEQH\x00\x00\x00\x02\xab\xcd"[..])
        );
    }

    /// Keeps the raw description as extra data.
    struct RawReader;

    impl SampleDescReader for RawReader {
        fn read_sample_desc(
            &mut self,
            reader: &mut MediaSourceStream,
            _track: &Track,
            entry: &StsdEntryHeader,
        ) -> Result<Option<SampleDesc>> {
            let mut desc = SampleDesc::new(entry);
            desc.extra_data = Some(reader.read_boxed_slice_exact(entry.desc_len() as usize)?);
            Ok(Some(desc))
        }
    }

    #[test]
    fn verify_custom_sample_desc_reader() {
        let mut entry = words(&[20]);
        entry.extend_from_slice(b"tx3g");
        entry.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
        entry.extend_from_slice(b"abcd");

        let stsd = full_atom(b"stsd", 0, &[words(&[1]), entry].concat());
        let text = trak(tkhd(1, 50), mdhd(0, 600, 50), hdlr(b"vide"), &[stsd]);

        let data = atom(b"moov", &[mvhd(600, 1200), text].concat());

        // The description is too short to be an image description.
        let movie = parse(data.clone()).unwrap();
        let descs = &movie.tracks[0].sample_descs;

        assert_eq!(descs.len(), 1);
        assert!(descs[0].extra_data.is_none());
        assert!(matches!(descs[0].details, SampleDescDetails::None));

        let source = Box::new(Cursor::new(data));
        let mss = MediaSourceStream::new(source, MediaSourceStreamOptions::default());

        let movie = MovieParser::with_sample_desc_reader(MovOptions::default(), RawReader)
            .parse_stream(mss)
            .unwrap();

        let descs = &movie.tracks[0].sample_descs;

        assert_eq!(descs.len(), 1);
        assert_eq!(descs[0].codec_tag, *b"tx3g");
        assert_eq!(descs[0].data_ref_index, 1);
        assert_eq!(descs[0].extra_data.as_deref(), Some(&b"abcd"[..]));
    }

    fn pano_sample() -> Vec<u8> {
        let mut hdr = words(&[7]);
        for _ in 0..9 {
            hdr.extend(words(&[0x5a_8000]));
        }
        hdr.extend_from_slice(&[0; 8]);
        hdr.extend(words(&[8, 14]));

        [atom(b"pHdr", &hdr), atom(b"strT", b"\x05hello\x03abc")].concat()
    }

    #[test]
    fn verify_panorama() {
        let sample = pano_sample();

        // The panorama sample is stored in a media data atom at the start of the stream.
        let mdat = atom(b"mdat", &sample);

        let pano = trak(
            tkhd(1, 50),
            mdhd(0, 600, 50),
            hdlr(b"STpn"),
            &[stsz(0, &[sample.len() as u32]), table(b"stco", 1, &[8])],
        );

        let udta = atom(b"udta", &atom(b"ctyp", b"STpn"));

        let moov = atom(b"moov", &[mvhd(600, 1200), udta, pano].concat());

        let movie = parse([mdat, moov].concat()).unwrap();

        assert_eq!(movie.qtvr_type, QtvrType::Panorama);

        let track = movie.pano_track().unwrap();

        assert_eq!(track.codec_type, CodecType::Panorama);
        assert_eq!(track.pano_samples.len(), 1);

        let sample = &track.pano_samples[0];

        assert_eq!(sample.hdr.node_id, 7);
        assert_eq!(sample.hdr.def_h_pan, 90.5);
        assert_eq!(sample.str_table.get_string(sample.hdr.name_str_offset), "hello");
        assert_eq!(sample.str_table.get_string(sample.hdr.comment_str_offset), "abc");
    }

    #[test]
    fn verify_panorama_without_panorama_track_fails() {
        let udta = atom(b"udta", &atom(b"ctyp", b"STpn"));

        let data = atom(b"moov", &[mvhd(600, 1200), udta, video_trak()].concat());

        match parse(data) {
            Err(Error::DecodeError(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    fn edit(track_duration: u32, media_time: i32) -> EditListEntry {
        EditListEntry { track_duration, time_offset: 0, media_time, media_rate: Rational::ONE }
    }

    #[test]
    fn verify_flatten_edit_lists() {
        let mut movie = Movie::default();

        movie.tracks.push(Track {
            edit_list: vec![edit(5, -1), edit(5, -1), edit(3, 10)],
            ..Default::default()
        });

        movie.flatten_edit_lists();

        let edits = &movie.tracks[0].edit_list;

        assert_eq!(edits.len(), 2);
        assert_eq!((edits[0].track_duration, edits[0].media_time), (10, -1));
        assert_eq!((edits[1].track_duration, edits[1].media_time), (3, 10));
        assert_eq!(edits[1].time_offset, 10);
    }

    #[test]
    fn verify_edit_list_is_kept() {
        let mut elst = words(&[2]);
        elst.extend(words(&[20, u32::MAX, 0x10000, 30, 0, 0x10000]));

        let mdia = atom(b"mdia", &[mdhd(0, 600, 30), hdlr(b"vide")].concat());
        let edts = atom(b"edts", &full_atom(b"elst", 0, &elst));

        let video = atom(b"trak", &[tkhd(1, 50), edts, mdia].concat());

        let options = MovOptions { flatten_edit_lists: true, ..Default::default() };
        let movie = parse_with(atom(b"moov", &[mvhd(600, 1200), video].concat()), options).unwrap();

        let edits = &movie.tracks[0].edit_list;

        assert_eq!(edits.len(), 2);
        assert!(edits[0].is_empty_edit());
        assert_eq!(edits[1].time_offset, 20);
        assert_eq!(edits[1].media_rate, Rational::ONE);
    }
}
