use crate::*;

// Media data written in one go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mdat {
    pub data: Vec<u8>,
}

impl Atom for Mdat {
    const KIND: FourCC = FourCC::new(b"mdat");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.append_slice(&self.data);
        Ok(())
    }
}

/// Write only the header of an `mdat` holding `size` bytes of payload.
///
/// The payload itself is written by the caller after the header.
/// A 64-bit extended header (16 bytes) is used when the atom would not fit in 32 bits.
pub fn mdat_header<B: BufMut>(buf: &mut B, size: u64) -> Result<()> {
    match u32::try_from(size + 8) {
        Ok(total) => {
            total.encode(buf)?;
            Mdat::KIND.encode(buf)?;
        }
        Err(_) => {
            1u32.encode(buf)?;
            Mdat::KIND.encode(buf)?;
            (size + 16).encode(buf)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mdat() {
        let mdat = Mdat {
            data: vec![1, 2, 3, 4],
        };

        let mut buf = Vec::new();
        mdat.encode(&mut buf).unwrap();
        assert_eq!(buf, b"\0\0\0\x0cmdat\x01\x02\x03\x04");
    }

    #[test]
    fn test_mdat_header() {
        let mut buf = Vec::new();
        mdat_header(&mut buf, 100).unwrap();
        assert_eq!(buf, b"\0\0\0\x6cmdat");

        let mut buf = Vec::new();
        mdat_header(&mut buf, 1 << 32).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[..8], b"\0\0\0\x01mdat");
        assert_eq!(&buf[8..], (16u64 + (1 << 32)).to_be_bytes());
    }
}
