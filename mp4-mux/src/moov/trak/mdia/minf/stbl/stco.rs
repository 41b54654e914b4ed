use crate::*;

/// Chunk offsets, written as `stco` or `co64` depending on the largest offset.
///
/// Offsets are stored relative to the media data; [Stco::chunk_offset] is added on output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stco {
    pub entries: Vec<u64>,
    pub max_offset: u64,
    pub chunk_offset: u64,
}

impl Stco {
    pub const KIND: FourCC = FourCC::new(b"stco");
    pub const KIND_64: FourCC = FourCC::new(b"co64");

    /// Returns true if a new chunk was started, which happens when the offset changes.
    pub fn add_entry(&mut self, offset: u64) -> bool {
        if self.entries.last() == Some(&offset) {
            return false;
        }

        self.entries.push(offset);
        self.max_offset = self.max_offset.max(offset);

        true
    }

    pub fn is_64bit(&self) -> bool {
        self.max_offset.saturating_add(self.chunk_offset) > u32::MAX as u64
    }

    pub fn kind(&self) -> FourCC {
        match self.is_64bit() {
            true => Self::KIND_64,
            false => Self::KIND,
        }
    }
}

impl Encode for Stco {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        let large = self.is_64bit();
        if large {
            tracing::debug!(max = self.max_offset, base = self.chunk_offset, "using 64-bit chunk offsets");
        }

        encode_atom_full(buf, self.kind(), 0, 0, |buf| {
            (self.entries.len() as u32).encode(buf)?;

            for entry in self.entries.iter() {
                let offset = entry + self.chunk_offset;
                match large {
                    true => offset.encode(buf)?,
                    false => (offset as u32).encode(buf)?,
                }
            }

            Ok(())
        })
    }
}
