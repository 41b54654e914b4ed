use crate::*;

/// A hint track entry with opaque, size-prefixed data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HintSampleEntry {
    pub kind: FourCC,
    pub data_reference_index: u16,
    pub data: Vec<u8>,
}

impl HintSampleEntry {
    pub fn new(kind: FourCC, data: &[u8]) -> Self {
        Self {
            kind,
            data_reference_index: 1,
            data: data.to_vec(),
        }
    }
}

impl Encode for HintSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| {
            encode_sample_entry(buf, self.data_reference_index)?;
            (self.data.len() as u32).encode(buf)?;
            buf.append_slice(&self.data);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_entry() {
        let mut buf = Vec::new();
        HintSampleEntry::new(FourCC::new(b"rtp "), &[9, 9])
            .encode(&mut buf)
            .unwrap();

        assert_eq!(buf, b"\0\0\0\x16rtp \0\0\0\0\0\0\0\x01\0\0\0\x02\x09\x09");
    }
}
