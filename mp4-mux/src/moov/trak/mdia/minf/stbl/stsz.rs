use crate::*;

/// Sample sizes, either one size for every sample or one entry per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StszSamples {
    Identical { size: u32 },
    Different { sizes: Vec<u32> },
}

impl Default for StszSamples {
    fn default() -> Self {
        Self::Different { sizes: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stsz {
    pub samples: StszSamples,

    // Written as the table size, even when the samples are identical.
    pub sample_count: u32,
}

impl Stsz {
    pub fn add_entries(&mut self, nsamples: u32, size: u32) {
        self.sample_count += nsamples;

        if let StszSamples::Different { sizes } = &mut self.samples {
            sizes.extend(std::iter::repeat(size).take(nsamples as usize));
        }
    }

    /// Every sample has the given size, so don't store a table.
    pub fn set_constant_size(&mut self, size: u32) {
        self.samples = match size {
            0 => StszSamples::default(),
            size => StszSamples::Identical { size },
        };
    }
}

impl AtomExt for Stsz {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"stsz");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match &self.samples {
            StszSamples::Identical { size } => {
                size.encode(buf)?;
                self.sample_count.encode(buf)?;
            }
            StszSamples::Different { sizes } => {
                0u32.encode(buf)?;
                self.sample_count.encode(buf)?;
                sizes.encode(buf)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stsz_different() {
        let mut stsz = Stsz::default();
        stsz.add_entries(2, 100);
        stsz.add_entries(1, 7);

        let mut buf = Vec::new();
        stsz.encode(&mut buf).unwrap();
        assert_eq!(
            buf,
            b"\0\0\0\x20stsz\0\0\0\0\0\0\0\0\0\0\0\x03\0\0\0\x64\0\0\0\x64\0\0\0\x07"
        );
    }

    #[test]
    fn test_stsz_identical() {
        let mut stsz = Stsz::default();
        stsz.set_constant_size(4);
        stsz.add_entries(1000, 4);

        let mut buf = Vec::new();
        stsz.encode(&mut buf).unwrap();
        assert_eq!(buf, b"\0\0\0\x14stsz\0\0\0\0\0\0\0\x04\0\0\x03\xe8");
    }
}
