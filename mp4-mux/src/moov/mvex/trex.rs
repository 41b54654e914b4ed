use crate::*;

/// Per-track fragment defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trex {
    pub track_id: u32,
    pub default_sample_description_index: u32,
    pub default_sample_duration: u32,
    pub default_sample_size: u32,
    pub default_sample_flags: u32,
}

impl Trex {
    pub fn new(track_id: u32) -> Self {
        Self {
            track_id,
            default_sample_description_index: 1,
            default_sample_duration: 0,
            default_sample_size: 0,
            default_sample_flags: 0,
        }
    }
}

impl AtomExt for Trex {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"trex");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.track_id.encode(buf)?;
        self.default_sample_description_index.encode(buf)?;
        self.default_sample_duration.encode(buf)?;
        self.default_sample_size.encode(buf)?;
        self.default_sample_flags.encode(buf)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trex() {
        let mut buf = Vec::new();
        Trex::new(2).encode(&mut buf).unwrap();

        assert_eq!(
            buf,
            b"\0\0\0\x20trex\0\0\0\0\0\0\0\x02\0\0\0\x01\0\0\0\0\0\0\0\0\0\0\0\0"
        );
    }
}
