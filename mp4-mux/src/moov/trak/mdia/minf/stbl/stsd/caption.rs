use crate::*;

/// A closed caption track entry, ex. `c608`. QuickTime only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptionSampleEntry {
    pub kind: FourCC,
    pub data_reference_index: u16,
}

impl CaptionSampleEntry {
    pub fn new(kind: FourCC) -> Self {
        Self {
            kind,
            data_reference_index: 1,
        }
    }
}

impl Encode for CaptionSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| encode_sample_entry(buf, self.data_reference_index))
    }
}
