use crate::*;

ext! {
    name: Tfdt,
    versions: [0, 1],
    flags: {}
}

/// The decode time of the first sample in the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tfdt {
    pub base_media_decode_time: u64,
}

impl AtomExt for Tfdt {
    const KIND_EXT: FourCC = FourCC::new(b"tfdt");

    type Ext = TfdtExt;

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<TfdtExt> {
        match u32::try_from(self.base_media_decode_time) {
            Ok(time) => {
                time.encode(buf)?;
                Ok(TfdtVersion::V0.into())
            }
            Err(_) => {
                self.base_media_decode_time.encode(buf)?;
                Ok(TfdtVersion::V1.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tfdt32() {
        let mut buf = Vec::new();
        Tfdt {
            base_media_decode_time: 3000,
        }
        .encode(&mut buf)
        .unwrap();

        assert_eq!(buf, b"\0\0\0\x10tfdt\0\0\0\0\0\0\x0b\xb8");
    }

    #[test]
    fn test_tfdt64() {
        let mut buf = Vec::new();
        Tfdt {
            base_media_decode_time: u32::MAX as u64 + 1,
        }
        .encode(&mut buf)
        .unwrap();

        assert_eq!(buf, b"\0\0\0\x14tfdt\x01\0\0\0\0\0\0\x01\0\0\0\0");
    }
}
