use crate::*;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mfhd {
    pub sequence_number: u32,
}

impl Default for Mfhd {
    fn default() -> Self {
        Mfhd { sequence_number: 1 }
    }
}

impl AtomExt for Mfhd {
    type Ext = ();
    const KIND_EXT: FourCC = FourCC::new(b"mfhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.sequence_number.encode(buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mfhd() {
        let mut buf = Vec::new();
        Mfhd { sequence_number: 7 }.encode(&mut buf).unwrap();

        assert_eq!(buf, b"\0\0\0\x10mfhd\0\0\0\0\0\0\0\x07");
    }
}
