// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sample descriptions.
//!
//! The layout of a sample description depends on the media type of its track and, to a lesser
//! extent, its codec. The [`SampleDescReader`] trait allows the codec layer to take over parsing
//! of the codec specific description, while the movie parser handles the common entry header and
//! any nested atoms that follow the description.

use symphonia_core::errors::Result;
use symphonia_core::io::{MediaSourceStream, ReadBytes};

use crate::atoms::StsdEntryHeader;
use crate::fourcc::FourCc;
use crate::fp::FpU16;
use crate::track::{CodecType, Track};

use log::debug;

/// The size of the fixed portion of a QuickTime image description.
const VIDEO_DESC_LEN: u32 = 70;
/// The size of the fixed portion of a version 0 QuickTime sound description.
const AUDIO_DESC_V0_LEN: u32 = 20;
/// The size of the additional fields of a version 1 sound description.
const AUDIO_DESC_V1_EXT_LEN: u32 = 16;
/// The size of the additional fields of a version 2 sound description.
const AUDIO_DESC_V2_EXT_LEN: u32 = 36;

/// A QuickTime image description.
#[derive(Clone, Debug, Default)]
pub struct VideoSampleDesc {
    pub version: u16,
    pub revision: u16,
    pub vendor: FourCc,
    pub temporal_quality: u32,
    pub spatial_quality: u32,
    pub width: u16,
    pub height: u16,
    pub horiz_res: f64,
    pub vert_res: f64,
    pub data_size: u32,
    pub frame_count: u16,
    /// The name of the compressor that created the image.
    pub compressor: String,
    /// Bit depth. Values above 32 are greyscale.
    pub depth: u16,
    /// Colour table ID, or -1 for the default colour table.
    pub color_table_id: i16,
}

/// A QuickTime sound description.
#[derive(Clone, Debug, Default)]
pub struct AudioSampleDesc {
    pub version: u16,
    pub revision: u16,
    pub vendor: FourCc,
    pub num_channels: u32,
    /// The number of bits per sample for uncompressed audio.
    pub sample_size: u16,
    pub compression_id: i16,
    pub packet_size: u16,
    pub sample_rate: f64,
    /// Version 1 and 2: the number of frames per packet.
    pub samples_per_packet: Option<u32>,
    /// Version 1 and 2: the number of bytes per packet.
    pub bytes_per_packet: Option<u32>,
    /// Version 1: the number of bytes per frame.
    pub bytes_per_frame: Option<u32>,
    /// Version 1: the number of bytes per sample.
    pub bytes_per_sample: Option<u32>,
    /// Version 2: the number of bits per channel of uncompressed audio.
    pub bits_per_channel: Option<u32>,
    /// Version 2: the uncompressed audio format flags.
    pub format_flags: Option<u32>,
}

/// The media specific part of a sample description.
#[derive(Clone, Debug, Default)]
pub enum SampleDescDetails {
    Video(VideoSampleDesc),
    Audio(AudioSampleDesc),
    #[default]
    None,
}

/// A sample description.
#[derive(Clone, Debug)]
pub struct SampleDesc {
    /// The codec of the samples.
    pub codec_tag: FourCc,
    pub data_ref_index: u16,
    /// Codec initialization data.
    pub extra_data: Option<Box<[u8]>>,
    /// The MPEG-4 object type indication, if the sample description has an `esds` atom.
    pub object_type: Option<u8>,
    pub details: SampleDescDetails,
}

impl SampleDesc {
    pub fn new(entry: &StsdEntryHeader) -> Self {
        SampleDesc {
            codec_tag: entry.codec_tag,
            data_ref_index: entry.data_ref_index,
            extra_data: None,
            object_type: None,
            details: SampleDescDetails::None,
        }
    }
}

/// A `SampleDescReader` reads the codec specific sample description of a sample description table
/// entry.
pub trait SampleDescReader {
    /// Read the sample description of `entry`. The reader is positioned at the start of the codec
    /// specific description, which is `entry.desc_len()` bytes long.
    ///
    /// Returning `None` indicates that the codec is unknown. The description is then skipped and
    /// no sample description is added to the track.
    fn read_sample_desc(
        &mut self,
        reader: &mut MediaSourceStream,
        track: &Track,
        entry: &StsdEntryHeader,
    ) -> Result<Option<SampleDesc>>;
}

/// The default `SampleDescReader`. Reads the QuickTime image and sound descriptions of video and
/// audio tracks.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultSampleDescReader;

impl SampleDescReader for DefaultSampleDescReader {
    fn read_sample_desc(
        &mut self,
        reader: &mut MediaSourceStream,
        track: &Track,
        entry: &StsdEntryHeader,
    ) -> Result<Option<SampleDesc>> {
        let mut desc = SampleDesc::new(entry);

        desc.details = match track.codec_type {
            CodecType::Video if entry.desc_len() >= VIDEO_DESC_LEN => {
                SampleDescDetails::Video(read_video_sample_desc(reader)?)
            }
            CodecType::Audio if entry.desc_len() >= AUDIO_DESC_V0_LEN => {
                match read_audio_sample_desc(reader, entry.desc_len())? {
                    Some(audio) => SampleDescDetails::Audio(audio),
                    None => SampleDescDetails::None,
                }
            }
            CodecType::Video | CodecType::Audio => {
                debug!("mov (stsd): short sample description for {:?}", entry.codec_tag);
                SampleDescDetails::None
            }
            CodecType::Midi | CodecType::Panorama => SampleDescDetails::None,
            CodecType::Other => return Ok(None),
        };

        Ok(Some(desc))
    }
}

fn read_video_sample_desc<B: ReadBytes>(reader: &mut B) -> Result<VideoSampleDesc> {
    let mut video = VideoSampleDesc {
        version: reader.read_be_u16()?,
        revision: reader.read_be_u16()?,
        vendor: FourCc::new(reader.read_quad_bytes()?),
        temporal_quality: reader.read_be_u32()?,
        spatial_quality: reader.read_be_u32()?,
        width: reader.read_be_u16()?,
        height: reader.read_be_u16()?,
        horiz_res: f64::from(FpU16::parse_raw(reader.read_be_u32()?)),
        vert_res: f64::from(FpU16::parse_raw(reader.read_be_u32()?)),
        data_size: reader.read_be_u32()?,
        frame_count: reader.read_be_u16()?,
        ..Default::default()
    };

    video.compressor = {
        let len = usize::from(reader.read_u8()?).min(31);

        let mut name = [0u8; 31];
        reader.read_buf_exact(&mut name)?;

        String::from_utf8_lossy(&name[..len]).to_string()
    };

    video.depth = reader.read_be_u16()?;
    video.color_table_id = reader.read_be_i16()?;

    debug!(
        "mov (stsd): video {}x{}, depth={}, compressor={:?}",
        video.width, video.height, video.depth, video.compressor
    );

    Ok(video)
}

fn read_audio_sample_desc<B: ReadBytes>(
    reader: &mut B,
    desc_len: u32,
) -> Result<Option<AudioSampleDesc>> {
    let mut audio = AudioSampleDesc {
        version: reader.read_be_u16()?,
        revision: reader.read_be_u16()?,
        vendor: FourCc::new(reader.read_quad_bytes()?),
        num_channels: u32::from(reader.read_be_u16()?),
        sample_size: reader.read_be_u16()?,
        compression_id: reader.read_be_i16()?,
        packet_size: reader.read_be_u16()?,
        sample_rate: f64::from(FpU16::parse_raw(reader.read_be_u32()?)),
        ..Default::default()
    };

    match audio.version {
        0 => (),
        1 if desc_len >= AUDIO_DESC_V0_LEN + AUDIO_DESC_V1_EXT_LEN => {
            audio.samples_per_packet = Some(reader.read_be_u32()?);
            audio.bytes_per_packet = Some(reader.read_be_u32()?);
            audio.bytes_per_frame = Some(reader.read_be_u32()?);
            audio.bytes_per_sample = Some(reader.read_be_u32()?);
        }
        2 if desc_len >= AUDIO_DESC_V0_LEN + AUDIO_DESC_V2_EXT_LEN => {
            // Size of the structure.
            let _ = reader.read_be_u32()?;

            // The version 2 sample rate and channel count supersede the version 0 fields.
            audio.sample_rate = reader.read_be_f64()?;
            audio.num_channels = reader.read_be_u32()?;

            if reader.read_be_u32()? != 0x7f00_0000 {
                debug!("mov (stsd): sound description v2 reserved field is not 0x7f00_0000");
            }

            audio.bits_per_channel = Some(reader.read_be_u32()?);
            audio.format_flags = Some(reader.read_be_u32()?);
            audio.bytes_per_packet = Some(reader.read_be_u32()?);
            audio.samples_per_packet = Some(reader.read_be_u32()?);
        }
        _ => {
            debug!("mov (stsd): unsupported sound description version {}", audio.version);
            return Ok(None);
        }
    }

    debug!(
        "mov (stsd): audio channels={}, sample_rate={}, sample_size={}",
        audio.num_channels, audio.sample_rate, audio.sample_size
    );

    Ok(Some(audio))
}
