use crate::*;

/// Stereoscopic video media information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Svmi {
    pub stereoscopic_composition_type: u8,
    pub is_left_first: bool,
}

impl AtomExt for Svmi {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"svmi");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.stereoscopic_composition_type.encode(buf)?;
        (self.is_left_first as u8).encode(buf)?;
        0u32.encode(buf)?; // stereo/mono change count
        Ok(())
    }
}
