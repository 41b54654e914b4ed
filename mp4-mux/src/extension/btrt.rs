use crate::*;

/// Bitrate information for a sample entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Btrt {
    pub buffer_size_db: u32,
    pub max_bitrate: u32,
    pub avg_bitrate: u32,
}

impl Atom for Btrt {
    const KIND: FourCC = FourCC::new(b"btrt");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.buffer_size_db.encode(buf)?;
        self.max_bitrate.encode(buf)?;
        self.avg_bitrate.encode(buf)?;
        Ok(())
    }
}

impl Extension for Btrt {
    fn kind(&self) -> FourCC {
        Self::KIND
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        self.encode(&mut buf)
    }

    fn update_bitrates(&mut self, avg: u32, max: u32) {
        if max != 0 && self.max_bitrate == 0 {
            self.max_bitrate = max;
        }
        if avg != 0 && self.avg_bitrate == 0 {
            self.avg_bitrate = avg;
        }
    }
}

pub fn btrt(buffer_size_db: u32, avg_bitrate: u32, max_bitrate: u32) -> Btrt {
    Btrt {
        buffer_size_db,
        max_bitrate,
        avg_bitrate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btrt() {
        let mut btrt = btrt(1, 0, 3);
        btrt.update_bitrates(2, 9);

        let mut buf = Vec::new();
        btrt.encode(&mut buf).unwrap();
        assert_eq!(buf, b"\0\0\0\x14btrt\0\0\0\x01\0\0\0\x03\0\0\0\x02");
    }
}
