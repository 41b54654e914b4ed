mod edts;
mod mdia;
mod tapt;
mod tkhd;
mod tref;

pub use edts::*;
pub use mdia::*;
pub use tapt::*;
pub use tkhd::*;
pub use tref::*;

use crate::*;

/// A track: its header, optional edits and references, and the media.
#[derive(Debug)]
pub struct Trak {
    pub tkhd: Tkhd,
    pub tapt: Option<Tapt>,
    pub edts: Option<Edts>,
    pub tref: Option<Tref>,
    pub mdia: Mdia,
    pub udta: Udta,
}

impl Trak {
    pub fn new(ctx: &Context) -> Self {
        Self {
            tkhd: Tkhd::default(),
            tapt: None,
            edts: None,
            tref: None,
            mdia: Mdia::new(ctx),
            udta: Udta::new(ctx),
        }
    }

    pub fn track_id(&self) -> u32 {
        self.tkhd.track_id
    }

    pub fn timescale(&self) -> u32 {
        self.mdia.mdhd.timescale
    }

    pub fn stbl(&self) -> &Stbl {
        &self.mdia.minf.stbl
    }

    fn stsd_mut(&mut self) -> &mut Stsd {
        &mut self.mdia.minf.stbl.stsd
    }

    /// Record samples in the sample table, see [Stbl::add_samples].
    pub fn add_samples(
        &mut self,
        nsamples: u32,
        delta: u32,
        size: u32,
        chunk_offset: u64,
        sync: bool,
        pts_offset: i64,
    ) {
        self.mdia
            .minf
            .stbl
            .add_samples(nsamples, delta, size, chunk_offset, sync, pts_offset);
    }

    /// Every sample has the same size; 0 means variable.
    pub fn set_constant_size_samples(&mut self, size: u32) {
        self.mdia.minf.stbl.stsz.set_constant_size(size);
    }

    /// Make this an audio track with the given sample description.
    ///
    /// `extension` is placed in front of the entry's own extensions. Any previous
    /// sample descriptions are removed.
    pub fn set_audio_type(
        &mut self,
        mut entry: AudioSampleEntry,
        timescale: u32,
        extension: Option<Box<dyn Extension>>,
        sample_size: u32,
    ) {
        self.tkhd.set_audio();
        self.mdia.hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"soun"));
        self.mdia.hdlr.set_name("SoundHandler");
        self.mdia.minf.header = MediaHeader::Smhd(Smhd::default());
        self.mdia.mdhd.timescale = timescale;

        entry.data_reference_index = 1;
        if let Some(extension) = extension {
            entry.extensions.insert(0, extension);
        }

        let stsd = self.stsd_mut();
        stsd.clear();
        stsd.add_entry(entry);

        self.set_constant_size_samples(sample_size);
    }

    /// Add a video sample description.
    ///
    /// The first description also sets up the track: handler, timescale and the
    /// presentation size, which ISO flavors stretch by the pixel aspect ratio.
    /// A `pasp` atom is always appended to the extensions.
    pub fn set_video_type(
        &mut self,
        ctx: &Context,
        mut entry: VisualSampleEntry,
        timescale: u32,
        par: (u32, u32),
        extensions: Vec<Box<dyn Extension>>,
    ) {
        let (par_n, par_d) = par;

        let mut display_width = entry.width as u32;
        if par_n != 0 && par_d != 0 && !ctx.flavor.is_mov() {
            display_width = (entry.width as u64 * par_n as u64 / par_d as u64) as u32;
        }

        if self.stsd_mut().is_empty() {
            self.tkhd.set_video(display_width, entry.height as u32);
            self.mdia.hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"vide"));
            self.mdia.hdlr.set_name("VideoHandler");
            self.mdia.minf.header = MediaHeader::Vmhd(Vmhd::new(ctx));
            self.mdia.mdhd.timescale = timescale;
        }

        entry.data_reference_index = 1;
        entry.horizontal_resolution = 72.into();
        entry.vertical_resolution = 72.into();
        if ctx.flavor.is_mov() {
            entry.spatial_quality = 512;
            entry.temporal_quality = 512;
        }

        entry.extensions.extend(extensions);
        entry.extensions.push(pasp(par_n, par_d).into());

        if ctx.flavor.is_mov() {
            // Some readers expect the list to end with a zero size.
            entry.extensions.push(ZeroSize.into());
        }

        self.stsd_mut().add_entry(entry);
    }

    /// Make this a timed text track, replacing any sample descriptions.
    pub fn set_subtitle_type(&mut self, entry: SubtitleSampleEntry) {
        self.tkhd.set_subtitle();
        self.mdia.hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"sbtl"));
        self.mdia.hdlr.set_name("SubtitleHandler");
        self.mdia.minf.header = MediaHeader::None;
        self.mdia.mdhd.timescale = 1000;

        // The text box is filled in later, see tx3g_update_dimension.
        let entry = SubtitleSampleEntry {
            kind: entry.kind,
            font_face: entry.font_face,
            font_size: entry.font_size,
            foreground_color_rgba: entry.foreground_color_rgba,
            ..Default::default()
        };

        let stsd = self.stsd_mut();
        stsd.clear();
        stsd.add_entry(entry);
    }

    /// Size the text box from the video dimensions.
    pub fn tx3g_update_dimension(&mut self, width: u32, height: u32) {
        let entry = self.stsd_mut().entries.iter_mut().find_map(|entry| match entry {
            SampleEntry::Subtitle(tx3g) => Some(tx3g),
            _ => None,
        });

        let Some(tx3g) = entry else {
            return;
        };

        // The text box takes the bottom 15% of the frame.
        tx3g.font_size = (0.05 * height as f64) as u8;
        let height = (0.15 * height as f64) as u32;
        tx3g.default_text_box = width as u64 | (height as u64) << 16;

        self.tkhd.width = width << 16;
        self.tkhd.height = height << 16;
    }

    /// Make this a timecode track.
    ///
    /// Only QuickTime supports them, unless the context forces their creation.
    pub fn set_timecode_type(&mut self, ctx: &Context, timescale: u32, config: &TimecodeConfig) -> Result<()> {
        if timescale == 0 {
            return Err(Error::InvalidFrameRate);
        }

        let header = match ctx.flavor {
            Flavor::Mov => MediaHeader::Gmhd(Gmhd::timecode()),
            _ if ctx.force_create_timecode_trak => MediaHeader::Nmhd(Nmhd::default()),
            flavor => return Err(Error::UnsupportedFlavor(flavor)),
        };

        let entry = TimecodeSampleEntry::new(timescale, config)?;

        self.mdia.minf.header = header;
        self.mdia.hdlr.component_type = FourCC::new(b"mhlr");
        self.mdia.hdlr.handler_type = FourCC::new(b"tmcd");
        self.mdia.hdlr.set_name("Time Code Media Handler");
        self.mdia.mdhd.timescale = timescale;
        self.stsd_mut().add_entry(entry);

        Ok(())
    }

    /// Make this a closed caption track, QuickTime only.
    pub fn set_caption_type(&mut self, ctx: &Context, timescale: u32, kind: FourCC) -> Result<()> {
        if !ctx.flavor.is_mov() {
            return Err(Error::UnsupportedFlavor(ctx.flavor));
        }

        self.mdia.mdhd.timescale = timescale;
        self.mdia.hdlr.component_type = FourCC::new(b"mhlr");
        self.mdia.hdlr.handler_type = FourCC::new(b"clcp");
        self.mdia.hdlr.set_name("Closed Caption Media Handler");
        self.mdia.minf.header = MediaHeader::Gmhd(Gmhd::new());
        self.stsd_mut().add_entry(CaptionSampleEntry::new(kind));

        Ok(())
    }

    /// Make this a hint track with an opaque sample description payload.
    pub fn set_hint_type(&mut self, kind: FourCC, data: &[u8]) {
        self.mdia.hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"hint"));
        self.mdia.hdlr.set_name("HintHandler");
        self.mdia.minf.header = MediaHeader::Hmhd(Hmhd::default());
        self.stsd_mut().add_entry(HintSampleEntry::new(kind, data));
    }

    /// Fill in unset bitrates in the extensions of the first audio or video description.
    pub fn update_bitrates(&mut self, avg_bitrate: u32, max_bitrate: u32) {
        if avg_bitrate == 0 && max_bitrate == 0 {
            return;
        }

        let extensions = self
            .stsd_mut()
            .entries
            .iter_mut()
            .find_map(|entry| entry.extensions_mut());

        for extension in extensions.into_iter().flatten() {
            extension.update_bitrates(avg_bitrate, max_bitrate);
        }
    }

    pub fn set_svmi(&mut self, stereoscopic_composition_type: u8, is_left_first: bool) {
        self.mdia.minf.stbl.svmi = Some(Svmi {
            stereoscopic_composition_type,
            is_left_first,
        });
    }

    pub fn set_tapt(&mut self, tapt: Tapt) {
        self.tapt = Some(tapt);
    }

    /// Update the edit at `index`, appending it if the list is shorter.
    ///
    /// The duration is in the movie timescale, the media time in the track timescale
    /// and the rate is 16.16 fixed point.
    pub fn set_elst_entry(&mut self, index: usize, duration: u32, media_time: u32, rate: u32) {
        let entry = ElstEntry {
            segment_duration: duration,
            media_time,
            media_rate: rate,
        };

        self.edts.get_or_insert_with(Edts::default).elst.set_entry(index, entry);
    }

    pub fn edts_clear(&mut self) {
        self.edts = None;
    }

    /// Reference another track, ex. the timecode track of a video track.
    pub fn add_tref(&mut self, reftype: FourCC, track_id: u32) {
        match &mut self.tref {
            Some(tref) if tref.reftype == reftype => tref.track_ids.push(track_id),
            tref => {
                *tref = Some(Tref {
                    reftype,
                    track_ids: vec![track_id],
                })
            }
        }
    }

    // Timecode tracks only get a duration once the movie duration is known.
    pub(crate) fn is_timecode(&self) -> bool {
        matches!(&self.mdia.minf.header, MediaHeader::Gmhd(gmhd) if gmhd.tmcd.is_some())
    }

    /// Sum the sample durations and scale them to the movie timescale.
    pub(crate) fn update_duration(&mut self, movie_timescale: u32) {
        let mdhd = &mut self.mdia.mdhd;
        mdhd.duration = self.mdia.minf.stbl.stts.duration();

        self.tkhd.duration = match mdhd.timescale {
            0 => 0,
            timescale => scale_round(mdhd.duration, movie_timescale as u64, timescale as u64),
        };
    }

    /// Stretch the single timecode sample over the whole movie.
    pub(crate) fn set_timecode_duration(&mut self, movie_duration: u64, movie_timescale: u32) {
        if self.mdia.minf.stbl.stts.entries.len() != 1 {
            tracing::warn!(track_id = self.track_id(), "timecode track without a single sample run");
            return;
        }

        let mut duration = movie_duration;
        let mut timescale = movie_timescale;

        let tmcd = self.stbl().stsd.entries.iter().find_map(|entry| match entry {
            SampleEntry::Timecode(tmcd) => Some(tmcd),
            _ => None,
        });

        if let Some(tmcd) = tmcd {
            if timescale != 0 {
                duration = scale_floor(duration, tmcd.timescale as u64, timescale as u64);
            }
            timescale = tmcd.timescale;
        }

        tracing::debug!(track_id = self.track_id(), duration, timescale, "timecode duration");

        self.tkhd.duration = duration;
        self.mdia.mdhd.duration = duration;
        self.mdia.mdhd.timescale = timescale;

        let delta = u32::try_from(duration).unwrap_or_else(|_| {
            tracing::warn!(track_id = self.track_id(), duration, "timecode sample delta clamped");
            u32::MAX
        });
        self.mdia.minf.stbl.stts.entries[0].sample_delta = delta;
    }
}

impl Atom for Trak {
    const KIND: FourCC = FourCC::new(b"trak");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.tkhd.encode(buf)?;
        self.tapt.encode(buf)?;
        self.edts.encode(buf)?;

        if let Some(tref) = self.tref.as_ref().filter(|tref| !tref.is_empty()) {
            tref.encode(buf)?;
        }

        self.mdia.encode(buf)?;

        if !self.udta.is_empty() {
            self.udta.encode(buf)?;
        }

        Ok(())
    }
}
