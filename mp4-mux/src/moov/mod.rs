mod mvex;
mod mvhd;
mod trak;
mod udta;

pub use mvex::*;
pub use mvhd::*;
pub use trak::*;
pub use udta::*;

use crate::*;

/// The movie: header, tracks, tags and, once fragmented, the fragment defaults.
#[derive(Debug)]
pub struct Moov {
    pub mvhd: Mvhd,
    pub trak: Vec<Trak>,
    pub udta: Udta,
    pub mvex: Mvex,

    /// Write `mvex` so the samples can follow in `moof` atoms.
    pub fragmented: bool,

    chunks_offset: u64,
}

impl Moov {
    pub fn new(ctx: &Context) -> Self {
        Self {
            mvhd: Mvhd::default(),
            trak: Vec::new(),
            udta: Udta::new(ctx),
            mvex: Mvex::default(),
            fragmented: false,
            chunks_offset: 0,
        }
    }

    /// Take ownership of a track, assigning it the next track ID.
    ///
    /// Returns the assigned ID.
    pub fn add_trak(&mut self, mut trak: Trak) -> u32 {
        let track_id = self.mvhd.next_track_id;
        self.mvhd.next_track_id += 1;

        trak.tkhd.track_id = track_id;
        self.trak.push(trak);
        self.mvex.trex.push(Trex::new(track_id));

        tracing::debug!(track_id, "added track");

        track_id
    }

    pub fn trak_mut(&mut self, track_id: u32) -> Option<&mut Trak> {
        self.trak.iter_mut().find(|trak| trak.track_id() == track_id)
    }

    pub fn set_fragmented(&mut self, fragmented: bool) {
        self.fragmented = fragmented;
    }

    /// Compute every track duration and the movie duration from the sample tables.
    ///
    /// Timecode tracks are stretched over the movie afterwards.
    pub fn update_duration(&mut self) {
        let timescale = self.mvhd.timescale;
        let mut duration = 0;

        for trak in self.trak.iter_mut().filter(|trak| !trak.is_timecode()) {
            trak.update_duration(timescale);
            duration = duration.max(trak.tkhd.duration);
        }

        for trak in self.trak.iter_mut().filter(|trak| trak.is_timecode()) {
            trak.set_timecode_duration(duration, timescale);
        }

        tracing::debug!(duration, timescale, "movie duration");

        self.mvhd.duration = duration;
        self.mvex.mehd.fragment_duration = duration;
    }

    /// Set the base added to every chunk offset, normally where the media data starts.
    pub fn chunks_set_offset(&mut self, offset: u64) {
        if self.chunks_offset == offset {
            return;
        }

        for trak in self.trak.iter_mut() {
            trak.mdia.minf.stbl.stco.chunk_offset = offset;
        }

        self.chunks_offset = offset;
    }
}

impl Atom for Moov {
    const KIND: FourCC = FourCC::new(b"moov");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.mvhd.encode(buf)?;
        self.trak.encode(buf)?;

        if !self.udta.is_empty() {
            self.udta.encode(buf)?;
        }

        if self.fragmented {
            self.mvex.encode(buf)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(buf: &[u8]) -> Vec<FourCC> {
        let mut kinds = Vec::new();
        let mut pos = 8;
        while pos < buf.len() {
            let size = u32::from_be_bytes(buf[pos..pos + 4].try_into().unwrap()) as usize;
            kinds.push(FourCC::from(<[u8; 4]>::try_from(&buf[pos + 4..pos + 8]).unwrap()));
            pos += size;
        }
        kinds
    }

    fn audio_trak(ctx: &Context, timescale: u32) -> Trak {
        let mut trak = Trak::new(ctx);
        trak.set_audio_type(AudioSampleEntry::default(), timescale, None, 0);
        trak
    }

    #[test]
    fn test_track_ids() {
        let ctx = Context::default();
        let mut moov = Moov::new(&ctx);

        assert_eq!(moov.add_trak(audio_trak(&ctx, 48000)), 1);
        assert_eq!(moov.add_trak(audio_trak(&ctx, 44100)), 2);

        assert_eq!(moov.mvhd.next_track_id, 3);
        assert_eq!(moov.mvex.trex.len(), 2);
        assert_eq!(moov.mvex.trex[1].track_id, 2);
        assert_eq!(moov.trak_mut(2).unwrap().timescale(), 44100);
        assert!(moov.trak_mut(3).is_none());
    }

    #[test]
    fn test_update_duration() {
        let ctx = Context::default();
        let mut moov = Moov::new(&ctx);

        let mut a = audio_trak(&ctx, 48000);
        a.add_samples(100, 1024, 10, 0, true, 0);
        moov.add_trak(a);

        let mut b = audio_trak(&ctx, 44100);
        b.add_samples(10, 1024, 10, 0, true, 0);
        moov.add_trak(b);

        moov.update_duration();

        // 102400 / 48000 seconds, rounded at a timescale of 1000
        assert_eq!(moov.trak[0].tkhd.duration, 2133);
        assert_eq!(moov.trak[0].mdia.mdhd.duration, 102_400);
        assert_eq!(moov.trak[1].tkhd.duration, 232);
        assert_eq!(moov.mvhd.duration, 2133);
        assert_eq!(moov.mvex.mehd.fragment_duration, 2133);
    }

    #[test]
    fn test_timecode_duration() {
        let ctx = Context::new(Flavor::Mov, false);
        let mut moov = Moov::new(&ctx);

        let mut video = Trak::new(&ctx);
        video.set_video_type(&ctx, VisualSampleEntry::default(), 25, (1, 1), vec![]);
        video.add_samples(250, 1, 1000, 0, true, 0);
        moov.add_trak(video);

        let mut timecode = Trak::new(&ctx);
        let config = TimecodeConfig {
            fps_n: 25,
            fps_d: 1,
            drop_frame: false,
        };
        timecode.set_timecode_type(&ctx, 25, &config).unwrap();
        timecode.add_samples(1, 0, 4, 0, true, 0);
        moov.add_trak(timecode);

        moov.update_duration();

        assert_eq!(moov.mvhd.duration, 10_000);
        assert_eq!(moov.trak[1].tkhd.duration, 250);
        assert_eq!(moov.trak[1].mdia.mdhd.timescale, 25);
        assert_eq!(moov.trak[1].stbl().stts.entries[0].sample_delta, 250);
    }

    #[test]
    fn test_chunks_offset() {
        let ctx = Context::default();
        let mut moov = Moov::new(&ctx);
        moov.add_trak(audio_trak(&ctx, 48000));
        moov.add_trak(audio_trak(&ctx, 48000));

        moov.chunks_set_offset(48);
        assert!(moov.trak.iter().all(|trak| trak.stbl().stco.chunk_offset == 48));

        // Unchanged offsets leave tracks alone.
        moov.trak[0].mdia.minf.stbl.stco.chunk_offset = 0;
        moov.chunks_set_offset(48);
        assert_eq!(moov.trak[0].stbl().stco.chunk_offset, 0);
    }

    #[test]
    fn test_encode_order() {
        let ctx = Context::default();
        let mut moov = Moov::new(&ctx);
        moov.add_trak(audio_trak(&ctx, 48000));

        let mut buf = Vec::new();
        moov.encode(&mut buf).unwrap();
        assert_eq!(kinds(&buf), [b"mvhd", b"trak"].map(FourCC::new));
        assert_eq!(u32::from_be_bytes(buf[0..4].try_into().unwrap()) as usize, buf.len());

        moov.udta.add_str_tag(FourCC::new(b"\xa9too"), "mp4-mux");
        moov.set_fragmented(true);

        let mut buf = Vec::new();
        moov.encode(&mut buf).unwrap();
        assert_eq!(
            kinds(&buf),
            [b"mvhd", b"trak", b"udta", b"mvex"].map(FourCC::new)
        );
    }
}
