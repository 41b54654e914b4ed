mod sdtp;
mod tfdt;
mod tfhd;
mod trun;

pub use sdtp::*;
pub use tfdt::*;
pub use tfhd::*;
pub use trun::*;

use crate::*;

/// Sample flags for a non-sync sample.
pub const SAMPLE_IS_NON_SYNC: u32 = 0x10000;

/// A track fragment: the samples of one track within a [Moof].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Traf {
    pub tfhd: Tfhd,
    pub tfdt: Tfdt,
    pub trun: Vec<Trun>,

    /// Only written for smooth streaming.
    pub sdtp: Option<Sdtp>,
}

impl Traf {
    pub fn new(ctx: &Context, track_id: u32) -> Self {
        Self {
            tfhd: Tfhd::new(track_id),
            tfdt: Tfdt::default(),
            trun: Vec::new(),
            sdtp: (ctx.flavor == Flavor::Isml).then(Sdtp::default),
        }
    }

    pub fn track_id(&self) -> u32 {
        self.tfhd.track_id
    }

    pub fn set_base_decode_time(&mut self, time: u64) {
        self.tfdt.base_media_decode_time = time;
    }

    /// The number of samples over every run.
    pub fn sample_count(&self) -> u32 {
        self.trun.iter().map(Trun::sample_count).sum()
    }

    /// Append samples, starting a new run unless they follow the previous one.
    ///
    /// The [Tfhd] defaults come from the first call. Any sample that differs from
    /// a default, or a second run, moves that field into the runs for good.
    #[allow(clippy::too_many_arguments)]
    pub fn add_samples(
        &mut self,
        nsamples: u32,
        delta: u32,
        size: u32,
        data_offset: i32,
        sync: bool,
        pts_offset: i64,
        sdtp_sync: bool,
    ) {
        let flags = match sync {
            true => 0,
            false => SAMPLE_IS_NON_SYNC,
        } | match sdtp_sync {
            true => 0x40,
            false => 0xc0,
        };

        if self.trun.is_empty() {
            self.tfhd.default_sample_duration = Some(delta);
            self.tfhd.default_sample_size = Some(size);
            self.tfhd.default_sample_flags = Some(flags);
        }

        let append = matches!(self.trun.last(), Some(trun) if trun.can_append(data_offset));
        if !append {
            tracing::trace!(track_id = self.track_id(), data_offset, "new trun");
            self.trun.push(Trun::new(data_offset, flags));
        }

        let multiple = self.trun.len() > 1;

        if multiple || self.tfhd.default_sample_duration != Some(delta) {
            if self.tfhd.default_sample_duration.take().is_some() {
                tracing::debug!(track_id = self.track_id(), "per-sample durations");
            }
            self.trun.iter_mut().for_each(|trun| trun.sample_duration = true);
        }

        if multiple || self.tfhd.default_sample_size != Some(size) {
            if self.tfhd.default_sample_size.take().is_some() {
                tracing::debug!(track_id = self.track_id(), "per-sample sizes");
            }
            self.trun.iter_mut().for_each(|trun| trun.sample_size = true);
        }

        if multiple || self.tfhd.default_sample_flags != Some(flags) {
            let single = matches!(self.trun.last(), Some(trun) if trun.sample_count() == 1);

            // The lone sample keeps its flags as an override, the rest use the new default.
            if single && self.tfhd.default_sample_flags.is_some() {
                self.tfhd.default_sample_flags = Some(flags);
                if let Some(trun) = self.trun.last_mut() {
                    trun.has_first_sample_flags = true;
                }
            } else {
                if self.tfhd.default_sample_flags.take().is_some() {
                    tracing::debug!(track_id = self.track_id(), "per-sample flags");
                }
                for trun in self.trun.iter_mut() {
                    trun.sample_flags = true;
                    trun.has_first_sample_flags = false;
                }
            }
        }

        if let Some(trun) = self.trun.last_mut() {
            trun.add_samples(nsamples, delta, size, flags, pts_offset);
        }

        // One dependency byte per sample.
        if let Some(sdtp) = self.sdtp.as_mut() {
            let dependency = 0x10 | ((flags & 0xff) >> 4) as u8;
            sdtp.entries.extend(std::iter::repeat(dependency).take(nsamples as usize));
        }
    }
}

impl Atom for Traf {
    const KIND: FourCC = FourCC::new(b"traf");

    nested! {
        required: [ Tfhd, Tfdt ],
        optional: [],
        multiple: [ Trun, Sdtp ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples() {
        let mut traf = Traf::new(&Context::default(), 1);
        for _ in 0..3 {
            traf.add_samples(1, 512, 100, 0, true, 0, true);
        }

        assert_eq!(traf.trun.len(), 1);
        assert_eq!(traf.sample_count(), 3);
        assert_eq!(traf.tfhd.default_sample_duration, Some(512));
        assert_eq!(traf.tfhd.default_sample_size, Some(100));
        assert_eq!(traf.tfhd.default_sample_flags, Some(0x40));

        let trun = &traf.trun[0];
        assert!(!trun.sample_duration && !trun.sample_size && !trun.sample_flags);
        assert!(traf.sdtp.is_none());
    }

    #[test]
    fn test_size_mismatch() {
        let mut traf = Traf::new(&Context::default(), 1);
        traf.add_samples(1, 512, 100, 0, true, 0, true);
        traf.add_samples(1, 512, 200, 0, true, 0, true);
        traf.add_samples(1, 512, 100, 0, true, 0, true);

        assert_eq!(traf.trun.len(), 1);
        assert_eq!(traf.tfhd.default_sample_size, None);
        assert_eq!(traf.tfhd.default_sample_duration, Some(512));
        assert!(traf.trun[0].sample_size);

        let mut buf = Vec::new();
        traf.encode(&mut buf).unwrap();

        // tfhd keeps duration and flags
        assert_eq!(&buf[16..20], b"\0\0\0\x28");
    }

    #[test]
    fn test_first_sample_flags() {
        let mut traf = Traf::new(&Context::default(), 1);
        traf.add_samples(1, 512, 100, 0, true, 0, true);
        traf.add_samples(2, 512, 100, 0, false, 0, true);

        // The keyframe is the override, the rest use the new default.
        let trun = &traf.trun[0];
        assert!(trun.has_first_sample_flags);
        assert!(!trun.sample_flags);
        assert_eq!(trun.first_sample_flags, 0x40);
        assert_eq!(traf.tfhd.default_sample_flags, Some(0x10040));

        traf.add_samples(1, 512, 100, 0, true, 0, true);
        let trun = &traf.trun[0];
        assert!(!trun.has_first_sample_flags);
        assert!(trun.sample_flags);
        assert_eq!(traf.tfhd.default_sample_flags, None);
    }

    #[test]
    fn test_new_trun() {
        let mut traf = Traf::new(&Context::default(), 1);
        traf.add_samples(2, 512, 100, 8, true, 0, true);
        traf.add_samples(1, 512, 100, 208, true, 0, true);
        assert_eq!(traf.trun.len(), 1);

        traf.add_samples(1, 512, 100, 1000, true, 0, true);
        assert_eq!(traf.trun.len(), 2);
        assert_eq!(traf.trun[1].data_offset, 1000);

        assert_eq!(traf.tfhd, Tfhd::new(1));
        for trun in traf.trun.iter() {
            assert!(trun.sample_duration && trun.sample_size && trun.sample_flags);
        }
    }

    #[test]
    fn test_sdtp() {
        let ctx = Context::new(Flavor::Isml, false);
        let mut traf = Traf::new(&ctx, 2);
        traf.set_base_decode_time(1 << 40);
        traf.add_samples(1, 512, 100, 0, true, 0, true);
        traf.add_samples(1, 512, 100, 0, false, 0, false);

        assert_eq!(traf.sdtp.as_ref().unwrap().entries, [0x14, 0x1c]);

        let mut buf = Vec::new();
        traf.encode(&mut buf).unwrap();
        assert_eq!(&buf[buf.len() - 14..], b"\0\0\0\x0esdtp\0\0\0\0\x14\x1c");
    }

    #[test]
    fn test_sdtp_multiple_samples() {
        let ctx = Context::new(Flavor::Isml, false);
        let mut traf = Traf::new(&ctx, 1);
        traf.add_samples(3, 512, 100, 0, true, 0, true);
        traf.add_samples(2, 512, 100, 0, false, 0, false);

        let sdtp = traf.sdtp.as_ref().unwrap();
        assert_eq!(sdtp.entries.len() as u32, traf.sample_count());
        assert_eq!(sdtp.entries, [0x14, 0x14, 0x14, 0x1c, 0x1c]);
    }
}
