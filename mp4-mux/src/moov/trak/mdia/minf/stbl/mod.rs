mod ctts;
mod stco;
mod stsc;
mod stsd;
mod stss;
mod stsz;
mod stts;
mod svmi;

pub use ctts::*;
pub use stco::*;
pub use stsc::*;
pub use stsd::*;
pub use stss::*;
pub use stsz::*;
pub use stts::*;
pub use svmi::*;

use crate::*;

/// The sample table: every per-sample property of a track.
///
/// The tables are only ever modified together through [Stbl::add_samples] so they stay in sync.
#[derive(Debug, Default)]
pub struct Stbl {
    pub stsd: Stsd,
    pub stts: Stts,
    pub stss: Stss,
    pub stsc: Stsc,
    pub stsz: Stsz,
    pub ctts: Option<Ctts>,
    pub svmi: Option<Svmi>,
    pub stco: Stco,
}

impl Stbl {
    /// Record `nsamples` samples of the same duration and size.
    ///
    /// A `chunk_offset` different from the previous call starts a new chunk.
    /// If `sync` is set, the first sample of the batch is a sync sample.
    pub fn add_samples(
        &mut self,
        nsamples: u32,
        delta: u32,
        size: u32,
        chunk_offset: u64,
        sync: bool,
        pts_offset: i64,
    ) {
        let first_sample = self.stsz.sample_count;

        self.stts.add_entry(nsamples, delta);
        self.stsz.add_entries(nsamples, size);

        if self.stco.add_entry(chunk_offset) {
            let chunk = self.stco.entries.len() as u32;
            self.stsc.add_new_entry(chunk, nsamples, self.stsd.len() as u32);
        } else {
            let chunk = self.stco.entries.len() as u32;
            self.stsc.update_last_entry(chunk, nsamples);
        }

        if sync {
            self.stss.add_entry(first_sample);
        }

        // Always stored so the runs line up with the other tables, but only written if any offset is set.
        self.ctts
            .get_or_insert_with(Ctts::default)
            .add_entry(nsamples, pts_offset as i32);
    }
}

impl Atom for Stbl {
    const KIND: FourCC = FourCC::new(b"stbl");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.stsd.encode(buf)?;
        self.stts.encode(buf)?;

        if !self.stss.is_empty() {
            self.stss.encode(buf)?;
        }

        self.stsc.encode(buf)?;
        self.stsz.encode(buf)?;

        if let Some(ctts) = self.ctts.as_ref().filter(|ctts| ctts.do_pts) {
            ctts.encode(buf)?;
        }

        self.svmi.encode(buf)?;
        self.stco.encode(buf)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(buf: &[u8], kind: &[u8; 4]) -> Option<usize> {
        buf.windows(4).position(|w| w == kind).map(|pos| pos - 4)
    }

    #[test]
    fn test_separate_chunks() {
        let mut stbl = Stbl::default();
        stbl.stsd.add_entry(CaptionSampleEntry::new(FourCC::new(b"c608")));

        for offset in [0, 1000, 3000] {
            stbl.add_samples(5, 512, 100, offset, true, 0);
        }

        assert_eq!(stbl.stco.entries, vec![0, 1000, 3000]);
        assert_eq!(stbl.stsz.sample_count, 15);
        assert_eq!(stbl.stts.sample_count(), 15);
        assert_eq!(stbl.stss.entries, vec![0, 5, 10]);
        assert_eq!(stbl.stsc.entries.len(), 2);
        assert_eq!(
            stbl.stsc.compacted(),
            &[StscEntry {
                first_chunk: 1,
                samples_per_chunk: 5,
                sample_description_index: 1,
            }]
        );

        let mut buf = Vec::new();
        stbl.encode(&mut buf).unwrap();
        assert!(child(&buf, b"ctts").is_none());

        // Writing doesn't compact the live table.
        assert_eq!(stbl.stsc.entries.len(), 2);
    }

    #[test]
    fn test_same_chunk() {
        let mut stbl = Stbl::default();
        stbl.add_samples(3, 512, 100, 0, true, 0);
        stbl.add_samples(2, 512, 100, 0, false, 0);

        assert_eq!(stbl.stco.entries, vec![0]);
        assert_eq!(stbl.stsc.entries.len(), 1);
        assert_eq!(stbl.stsc.entries[0].samples_per_chunk, 5);
        assert_eq!(stbl.stsz.sample_count, 5);
        assert_eq!(stbl.stss.entries, vec![0]);
    }

    #[test]
    fn test_composition_offsets() {
        let mut stbl = Stbl::default();
        stbl.add_samples(1, 512, 100, 0, true, 0);
        assert!(!stbl.ctts.as_ref().unwrap().do_pts);

        stbl.add_samples(1, 512, 100, 0, false, 1024);
        assert!(stbl.ctts.as_ref().unwrap().do_pts);

        let mut buf = Vec::new();
        stbl.encode(&mut buf).unwrap();
        assert!(child(&buf, b"ctts").is_some());
    }

    #[test]
    fn test_child_order() {
        let mut stbl = Stbl::default();
        stbl.svmi = Some(Svmi::default());
        stbl.add_samples(1, 512, 100, 0, true, 1);

        let mut buf = Vec::new();
        stbl.encode(&mut buf).unwrap();

        let order: Vec<usize> = [b"stsd", b"stts", b"stss", b"stsc", b"stsz", b"ctts", b"svmi", b"stco"]
            .iter()
            .map(|kind| child(&buf, kind).unwrap())
            .collect();

        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(u32::from_be_bytes(buf[..4].try_into().unwrap()) as usize, buf.len());
    }
}
