use std::io::Write;

use crate::*;

/// Write a type to a writer.
pub trait WriteTo {
    fn write_to<W: Write>(&self, w: &mut W) -> Result<()>;
}

impl<T: Encode> WriteTo for T {
    fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        // The size of each atom is patched after the fact, so it has to be buffered first.
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(w.write_all(&buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to() {
        let ftyp = Ftyp::new(b"isom".into(), 0x200, &[b"isom".into(), b"mp41".into()]);

        let mut encoded = Vec::new();
        ftyp.encode(&mut encoded).unwrap();

        let mut written = Vec::new();
        ftyp.write_to(&mut written).unwrap();

        assert_eq!(encoded, written);
    }
}
