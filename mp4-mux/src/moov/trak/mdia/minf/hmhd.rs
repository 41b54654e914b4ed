use crate::*;

/// Hint media header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hmhd {
    pub max_pdu_size: u16,
    pub avg_pdu_size: u16,
    pub max_bitrate: u32,
    pub avg_bitrate: u32,
    pub sliding_avg_bitrate: u32,
}

impl AtomExt for Hmhd {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"hmhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.max_pdu_size.encode(buf)?;
        self.avg_pdu_size.encode(buf)?;
        self.max_bitrate.encode(buf)?;
        self.avg_bitrate.encode(buf)?;
        self.sliding_avg_bitrate.encode(buf)?;

        Ok(())
    }
}
