use crate::*;

/// Sync samples, stored as zero-based sample indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stss {
    pub entries: Vec<u32>,
}

impl Stss {
    pub fn add_entry(&mut self, sample_index: u32) {
        self.entries.push(sample_index);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AtomExt for Stss {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"stss");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;

        // Sample numbers start at 1 on the wire.
        for index in self.entries.iter() {
            (index + 1).encode(buf)?;
        }

        Ok(())
    }
}
