use crate::*;

/// Null media header, used for timecode tracks outside of QuickTime.
///
/// Written as a plain atom holding the flags word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nmhd {
    pub flags: u32,
}

impl Atom for Nmhd {
    const KIND: FourCC = FourCC::new(b"nmhd");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.flags.encode(buf)
    }
}
