use crate::*;

ext! {
    name: Mehd,
    versions: [0, 1],
    flags: {}
}

/// The duration of the whole fragmented movie, always written with 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mehd {
    pub fragment_duration: u64,
}

impl AtomExt for Mehd {
    type Ext = MehdExt;

    const KIND_EXT: FourCC = FourCC::new(b"mehd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<MehdExt> {
        self.fragment_duration.encode(buf)?;
        Ok(MehdVersion::V1.into())
    }
}
