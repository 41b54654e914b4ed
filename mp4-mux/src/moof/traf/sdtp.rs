use crate::*;

/// Independent and disposable samples, one byte per sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sdtp {
    pub entries: Vec<u8>,
}

impl AtomExt for Sdtp {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"sdtp");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.append_slice(&self.entries);
        Ok(())
    }
}
