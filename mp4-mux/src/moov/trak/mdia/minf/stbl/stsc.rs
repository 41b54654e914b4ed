use crate::*;

/// Sample to chunk.
///
/// Runs of chunks with the same number of samples share an entry.
/// The last run stays open while samples are added to the current chunk,
/// so the list may end with two equal entries; [Stsc::compacted] hides that when writing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stsc {
    pub entries: Vec<StscEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StscEntry {
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
    pub sample_description_index: u32,
}

impl Stsc {
    /// Start a new chunk.
    ///
    /// If the two most recent runs have the same samples per chunk, the last one is
    /// closed by the previous and gets overwritten with the new chunk instead.
    pub fn add_new_entry(&mut self, first_chunk: u32, samples_per_chunk: u32, sample_description_index: u32) {
        let entry = StscEntry {
            first_chunk,
            samples_per_chunk,
            sample_description_index,
        };

        let len = self.entries.len();
        if len > 1 && self.entries[len - 1].samples_per_chunk == self.entries[len - 2].samples_per_chunk {
            self.entries[len - 1] = entry;
        } else {
            self.entries.push(entry);
        }
    }

    /// Add samples to the current chunk.
    pub fn update_last_entry(&mut self, first_chunk: u32, nsamples: u32) {
        let Some(last) = self.entries.last_mut() else {
            return;
        };

        debug_assert_eq!(last.first_chunk, first_chunk, "samples added to a closed chunk");
        last.samples_per_chunk += nsamples;
    }

    /// The entries as written: the last entry is dropped if it repeats the previous run.
    pub fn compacted(&self) -> &[StscEntry] {
        match self.entries.as_slice() {
            [head @ .., prev, last]
                if prev.samples_per_chunk == last.samples_per_chunk
                    && prev.sample_description_index == last.sample_description_index =>
            {
                &self.entries[..head.len() + 1]
            }
            entries => entries,
        }
    }
}

impl AtomExt for Stsc {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"stsc");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        let entries = self.compacted();

        (entries.len() as u32).encode(buf)?;
        for entry in entries {
            entry.first_chunk.encode(buf)?;
            entry.samples_per_chunk.encode(buf)?;
            entry.sample_description_index.encode(buf)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(first_chunk: u32, samples_per_chunk: u32) -> StscEntry {
        StscEntry {
            first_chunk,
            samples_per_chunk,
            sample_description_index: 1,
        }
    }

    #[test]
    fn test_stsc_open_run() {
        let mut stsc = Stsc::default();
        stsc.add_new_entry(1, 5, 1);
        stsc.add_new_entry(2, 5, 1);
        stsc.add_new_entry(3, 5, 1);

        assert_eq!(stsc.entries, vec![entry(1, 5), entry(3, 5)]);
        assert_eq!(stsc.compacted(), &[entry(1, 5)]);

        // Writing doesn't touch the live list.
        let mut buf = Vec::new();
        stsc.encode(&mut buf).unwrap();
        assert_eq!(stsc.entries.len(), 2);
        assert_eq!(buf, b"\0\0\0\x1cstsc\0\0\0\0\0\0\0\x01\0\0\0\x01\0\0\0\x05\0\0\0\x01");

        // The open chunk grows, so the run is no longer a repeat.
        stsc.update_last_entry(3, 2);
        assert_eq!(stsc.compacted(), &[entry(1, 5), entry(3, 7)]);
    }

    #[test]
    fn test_stsc_distinct_runs() {
        let mut stsc = Stsc::default();
        stsc.add_new_entry(1, 3, 1);
        stsc.add_new_entry(2, 5, 1);
        stsc.add_new_entry(3, 4, 1);

        assert_eq!(stsc.entries.len(), 3);
        assert_eq!(stsc.compacted().len(), 3);
    }

    #[test]
    fn test_stsc_update_empty() {
        let mut stsc = Stsc::default();
        stsc.update_last_entry(1, 1);
        assert!(stsc.entries.is_empty());
    }
}
