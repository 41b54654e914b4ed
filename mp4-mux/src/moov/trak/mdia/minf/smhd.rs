use crate::*;

/// Sound media header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Smhd {
    pub balance: FixedPoint<i8>,
}

impl AtomExt for Smhd {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"smhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.balance.encode(buf)?;
        0u16.encode(buf)?; // reserved

        Ok(())
    }
}
