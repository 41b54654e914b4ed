use crate::*;

/// Decoding time to sample, run-length encoded by delta.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stts {
    pub entries: Vec<SttsEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SttsEntry {
    pub sample_count: u32,
    pub sample_delta: u32,
}

impl Stts {
    /// Append a run of samples, extending the last run if the delta matches.
    pub fn add_entry(&mut self, sample_count: u32, sample_delta: u32) {
        match self.entries.last_mut() {
            Some(last) if last.sample_delta == sample_delta => last.sample_count += sample_count,
            _ => self.entries.push(SttsEntry {
                sample_count,
                sample_delta,
            }),
        }
    }

    /// The total duration in the media timescale.
    pub fn duration(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.sample_count as u64 * entry.sample_delta as u64)
            .sum()
    }

    pub fn sample_count(&self) -> u64 {
        self.entries.iter().map(|entry| entry.sample_count as u64).sum()
    }
}

impl AtomExt for Stts {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"stts");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;
        for entry in self.entries.iter() {
            entry.sample_count.encode(buf)?;
            entry.sample_delta.encode(buf)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stts_merge() {
        let mut stts = Stts::default();
        stts.add_entry(3, 1024);
        stts.add_entry(2, 1024);
        stts.add_entry(1, 512);
        stts.add_entry(4, 1024);

        assert_eq!(
            stts.entries,
            vec![
                SttsEntry {
                    sample_count: 5,
                    sample_delta: 1024
                },
                SttsEntry {
                    sample_count: 1,
                    sample_delta: 512
                },
                SttsEntry {
                    sample_count: 4,
                    sample_delta: 1024
                },
            ]
        );
        assert_eq!(stts.sample_count(), 10);
        assert_eq!(stts.duration(), 9 * 1024 + 512);
    }

    #[test]
    fn test_stts_encode() {
        let mut stts = Stts::default();
        stts.add_entry(29726, 1024);

        let mut buf = Vec::new();
        stts.encode(&mut buf).unwrap();
        assert_eq!(buf, b"\0\0\0\x18stts\0\0\0\0\0\0\0\x01\0\0\x74\x1e\0\0\x04\0");
    }
}
