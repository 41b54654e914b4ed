use crate::*;

/// Track references of a single type, ex. `tmcd` pointing at a timecode track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tref {
    pub reftype: FourCC,
    pub track_ids: Vec<u32>,
}

impl Tref {
    pub fn new(reftype: FourCC) -> Self {
        Self {
            reftype,
            track_ids: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }
}

impl Atom for Tref {
    const KIND: FourCC = FourCC::new(b"tref");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.reftype, |buf| {
            for id in &self.track_ids {
                id.encode(buf)?;
            }
            Ok(())
        })
    }
}
