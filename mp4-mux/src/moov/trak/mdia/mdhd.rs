use crate::*;

ext! {
    name: Mdhd,
    versions: [0, 1],
    flags: {}
}

/// Media header: timescale and duration of the media, plus its language.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mdhd {
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    pub language: u16,
    pub quality: u16,
}

impl Default for Mdhd {
    fn default() -> Self {
        let now = qt_time_now();

        Self {
            creation_time: now,
            modification_time: now,
            timescale: 0,
            duration: 0,
            // Zero would decode as "eng"; be explicit instead.
            language: LANGUAGE_UNDETERMINED,
            quality: 0,
        }
    }
}

/// `und` packed with [language_code].
pub const LANGUAGE_UNDETERMINED: u16 = 0x55c4;

impl AtomExt for Mdhd {
    type Ext = MdhdExt;

    const KIND_EXT: FourCC = FourCC::new(b"mdhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<MdhdExt> {
        let version = if needs_64bit(&[self.creation_time, self.modification_time, self.duration]) {
            self.creation_time.encode(buf)?;
            self.modification_time.encode(buf)?;
            self.timescale.encode(buf)?;
            self.duration.encode(buf)?;
            MdhdVersion::V1
        } else {
            (self.creation_time as u32).encode(buf)?;
            (self.modification_time as u32).encode(buf)?;
            self.timescale.encode(buf)?;
            (self.duration as u32).encode(buf)?;
            MdhdVersion::V0
        };

        self.language.encode(buf)?;
        self.quality.encode(buf)?;

        Ok(version.into())
    }
}

// True if any of the times can't be written as a 32-bit field.
pub(crate) fn needs_64bit(times: &[u64]) -> bool {
    times.iter().any(|&time| time > u32::MAX as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mdhd32() {
        let mdhd = Mdhd {
            creation_time: 100,
            modification_time: 200,
            timescale: 48000,
            duration: 30439936,
            ..Default::default()
        };

        let mut buf = Vec::new();
        mdhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 32);
        assert_eq!(buf[8], 0);
        assert_eq!(&buf[28..], b"\x55\xc4\0\0");
    }

    #[test]
    fn test_mdhd64() {
        let mdhd = Mdhd {
            creation_time: 100,
            modification_time: 200,
            timescale: 48000,
            duration: u32::MAX as u64 + 1,
            ..Default::default()
        };

        let mut buf = Vec::new();
        mdhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 44);
        assert_eq!(buf[8], 1);
        assert_eq!(&buf[32..40], &(u32::MAX as u64 + 1).to_be_bytes());
    }

    #[test]
    fn test_language_undetermined() {
        assert_eq!(language_code("und").unwrap(), LANGUAGE_UNDETERMINED);
    }
}
