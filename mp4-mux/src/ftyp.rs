use crate::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ftyp {
    pub major_brand: FourCC,
    pub minor_version: u32,
    pub compatible_brands: Vec<FourCC>,
}

impl Ftyp {
    pub fn new(major_brand: FourCC, minor_version: u32, compatible_brands: &[FourCC]) -> Self {
        Self {
            major_brand,
            minor_version,
            compatible_brands: compatible_brands.to_vec(),
        }
    }
}

impl Atom for Ftyp {
    const KIND: FourCC = FourCC::new(b"ftyp");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.major_brand.encode(buf)?;
        self.minor_version.encode(buf)?;
        self.compatible_brands.encode(buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ftyp() {
        let ftyp = Ftyp::new(b"iso6".into(), 512, &[b"mp41".into()]);

        let mut buf = Vec::new();
        ftyp.encode(&mut buf).unwrap();

        assert_eq!(buf, b"\0\0\0\x14ftypiso6\0\0\x02\0mp41");
    }
}
