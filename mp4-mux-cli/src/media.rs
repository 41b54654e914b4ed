use std::io::{self, Read, Write};

use anyhow::Context as _;

use mp4_mux::*;

use crate::Cli;

const WIDTH: u16 = 640;
const HEIGHT: u16 = 360;

const KEYFRAME_SIZE: u32 = 4000;
const FRAME_SIZE: u32 = 1000;

const AUDIO_RATE: u32 = 48000;
const AUDIO_FRAME: u32 = 1024;
const AUDIO_FRAME_SIZE: u32 = 300;

const TIMECODE_SAMPLE_SIZE: u32 = 4;

// Baseline profile, level 3.0, with empty parameter sets.
const AVCC: &[u8] = &[1, 0x42, 0xc0, 0x1e, 0xff, 0xe0, 0x00];

// AAC-LC, 48kHz, stereo
const AAC_CONFIG: &[u8] = &[0x11, 0x90];

const XMP: &[u8] = br#"<x:xmpmeta xmlns:x="adobe:ns:meta/"></x:xmpmeta>"#;

/// The samples of one second of media.
struct Second {
	video: Vec<(u32, bool)>,
	audio: u32,

	video_time: u64,
	audio_time: u64,
}

impl Second {
	fn new(index: u32, fps: u32) -> Self {
		// Every second starts with a keyframe.
		let video = (0..fps)
			.map(|i| match i {
				0 => (KEYFRAME_SIZE, true),
				_ => (FRAME_SIZE, false),
			})
			.collect();

		let first = index as u64 * AUDIO_RATE as u64 / AUDIO_FRAME as u64;
		let last = (index as u64 + 1) * AUDIO_RATE as u64 / AUDIO_FRAME as u64;

		Self {
			video,
			audio: (last - first) as u32,
			video_time: index as u64 * fps as u64,
			audio_time: first * AUDIO_FRAME as u64,
		}
	}

	fn video_bytes(&self) -> u64 {
		self.video.iter().map(|(size, _)| *size as u64).sum()
	}

	fn audio_bytes(&self) -> u64 {
		self.audio as u64 * AUDIO_FRAME_SIZE as u64
	}
}

pub struct Muxer {
	ctx: Context,
	ftyp: Ftyp,
	moov: Moov,

	video: u32,
	audio: u32,

	// In the video timescale, a frame per tick.
	video_delta: u32,
}

impl Muxer {
	pub fn new(ctx: Context, config: &Cli) -> anyhow::Result<Self> {
		let mut moov = Moov::new(&ctx);

		let video = moov.add_trak(Trak::new(&ctx));
		let audio = moov.add_trak(Trak::new(&ctx));

		let timescale = framerate_to_timescale(config.fps, 1);
		let video_delta = timescale / config.fps;

		let trak = moov.trak_mut(video).context("missing video track")?;
		let entry = VisualSampleEntry {
			kind: b"avc1".into(),
			width: WIDTH,
			height: HEIGHT,
			compressor: "mp4-mux".into(),
			..Default::default()
		};

		let mut extensions: Vec<Box<dyn Extension>> = vec![codec_data(b"avcC".into(), AVCC).into()];
		if !ctx.flavor.is_mov() {
			extensions.push(btrt(0, 0, 0).into());
		}
		trak.set_video_type(&ctx, entry, timescale, (1, 1), extensions);
		trak.udta.add_str_tag(b"\xa9nam".into(), "video");

		let trak = moov.trak_mut(audio).context("missing audio track")?;
		let codec: Box<dyn Extension> = match ctx.flavor.is_mov() {
			true => mov_aac(audio, Some(AAC_CONFIG), 0, 0).into(),
			false => esds(
				audio,
				ESDS_OBJECT_TYPE_MPEG4_P3,
				ESDS_STREAM_TYPE_AUDIO,
				Some(AAC_CONFIG),
				0,
				0,
			)
			.into(),
		};
		trak.set_audio_type(AudioSampleEntry::default(), AUDIO_RATE, Some(codec), 0);

		match ctx.flavor {
			Flavor::ThreeGp => {
				moov.udta.add_3gp_str_tag(b"titl".into(), "mp4-mux test");
				moov.udta.add_3gp_str_int_tag(b"yrrc".into(), None, Some(2024));
			}
			_ => {
				moov.udta.add_str_tag(b"\xa9nam".into(), "mp4-mux test");
				moov.udta.add_str_tag(b"\xa9too".into(), "mp4-mux");
			}
		}

		if ctx.flavor.is_mov() {
			moov.udta.add_xmp_tags(XMP);
		}

		Ok(Self {
			ctx,
			ftyp: config.format.ftyp(),
			moov,
			video,
			audio,
			video_delta,
		})
	}

	fn wants_timecode(&self) -> bool {
		self.ctx.flavor.is_mov() || self.ctx.force_create_timecode_trak
	}

	/// A single mdat followed by the moov.
	pub fn write_flat<W: Write>(&mut self, w: &mut W, config: &Cli) -> anyhow::Result<u64> {
		let mut payload = 0;

		for index in 0..config.seconds {
			let second = Second::new(index, config.fps);

			// One chunk per track per second.
			let video = self.moov.trak_mut(self.video).context("missing video track")?;
			for (size, sync) in second.video.iter() {
				video.add_samples(1, self.video_delta, *size, payload, *sync, 0);
			}
			payload += second.video_bytes();

			let audio = self.moov.trak_mut(self.audio).context("missing audio track")?;
			audio.add_samples(second.audio, AUDIO_FRAME, AUDIO_FRAME_SIZE, payload, true, 0);
			payload += second.audio_bytes();
		}

		if self.wants_timecode() {
			self.add_timecode(config, payload)?;
			payload += TIMECODE_SAMPLE_SIZE as u64;
		}

		self.moov.update_duration();

		let duration = self.moov.mvhd.duration;
		let video = self.moov.trak_mut(self.video).context("missing video track")?;
		video.set_elst_entry(0, duration as u32, 0, 0x10000);

		let bitrate = (payload * 8 / config.seconds.max(1) as u64) as u32;
		video.update_bitrates(bitrate, bitrate);

		let mut buf = Vec::new();
		self.ftyp.encode(&mut buf)?;

		let start = buf.len();
		mdat_header(&mut buf, payload)?;

		// Chunk offsets were relative to the media data.
		self.moov.chunks_set_offset(buf.len() as u64);
		let header = buf.len() - start;

		w.write_all(&buf)?;
		write_payload(w, payload)?;

		buf.clear();
		self.moov.encode(&mut buf)?;
		w.write_all(&buf)?;

		log::info!("flat file: mdat_header={} payload={} moov={}", header, payload, buf.len());

		Ok((start + header + buf.len()) as u64 + payload)
	}

	fn add_timecode(&mut self, config: &Cli, offset: u64) -> anyhow::Result<()> {
		let mut trak = Trak::new(&self.ctx);
		let timecode = TimecodeConfig {
			fps_n: config.fps,
			fps_d: 1,
			drop_frame: false,
		};

		trak.set_timecode_type(&self.ctx, framerate_to_timescale(config.fps, 1), &timecode)?;
		trak.add_samples(1, 0, TIMECODE_SAMPLE_SIZE, offset, true, 0);

		let id = self.moov.add_trak(trak);

		let video = self.moov.trak_mut(self.video).context("missing video track")?;
		video.add_tref(b"tmcd".into(), id);

		Ok(())
	}

	/// The moov, then a moof and mdat per second, then the random access index.
	pub fn write_fragmented<W: Write>(&mut self, w: &mut W, config: &Cli) -> anyhow::Result<u64> {
		self.moov.set_fragmented(true);
		self.moov.update_duration();
		self.moov.mvex.mehd.fragment_duration = config.seconds as u64 * self.moov.mvhd.timescale as u64;

		let mut buf = Vec::new();
		self.ftyp.encode(&mut buf)?;
		self.moov.encode(&mut buf)?;
		w.write_all(&buf)?;

		let mut pos = buf.len() as u64;

		let mut video_index = Tfra::new(self.video);
		let mut audio_index = Tfra::new(self.audio);

		for index in 0..config.seconds {
			let second = Second::new(index, config.fps);

			let mut video = Traf::new(&self.ctx, self.video);
			video.set_base_decode_time(second.video_time * self.video_delta as u64);
			for (size, sync) in second.video.iter() {
				video.add_samples(1, self.video_delta, *size, 0, *sync, 0, *sync);
			}

			// Audio follows the video in the same mdat.
			let mut audio = Traf::new(&self.ctx, self.audio);
			audio.set_base_decode_time(second.audio_time);
			audio.add_samples(
				second.audio,
				AUDIO_FRAME,
				AUDIO_FRAME_SIZE,
				second.video_bytes() as i32,
				true,
				0,
				true,
			);

			video_index.add_entry(video.tfdt.base_media_decode_time, 1);
			audio_index.add_entry(audio.tfdt.base_media_decode_time, 1);

			let mut moof = Moof::new(index + 1);
			moof.add_traf(video);
			moof.add_traf(audio);

			// The size doesn't depend on the offset once one is present.
			moof.set_base_offset(pos);
			buf.clear();
			moof.encode(&mut buf)?;

			let payload = second.video_bytes() + second.audio_bytes();
			let mdat = pos + buf.len() as u64;
			let mut header = Vec::new();
			mdat_header(&mut header, payload)?;

			moof.set_base_offset(mdat + header.len() as u64);
			buf.clear();
			moof.encode(&mut buf)?;

			video_index.update_offset(pos);
			audio_index.update_offset(pos);

			w.write_all(&buf)?;
			w.write_all(&header)?;
			write_payload(w, payload)?;

			log::debug!("fragment: sequence={} offset={} moof={} payload={}", index + 1, pos, buf.len(), payload);

			pos += (buf.len() + header.len()) as u64 + payload;
		}

		let mut mfra = Mfra::new();
		mfra.add_tfra(video_index);
		mfra.add_tfra(audio_index);

		buf.clear();
		mfra.encode(&mut buf)?;
		w.write_all(&buf)?;

		Ok(pos + buf.len() as u64)
	}
}

fn write_payload<W: Write>(w: &mut W, size: u64) -> anyhow::Result<()> {
	let written = io::copy(&mut io::repeat(0).take(size), w).context("failed to write media data")?;
	anyhow::ensure!(written == size, "short media data write");
	Ok(())
}
