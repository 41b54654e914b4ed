use crate::*;

ext! {
    name: Mvhd,
    versions: [0, 1],
    flags: {}
}

/// Movie header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mvhd {
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,

    pub rate: FixedPoint<u16>,
    pub volume: FixedPoint<u8>,

    pub matrix: Matrix,
    pub next_track_id: u32,
}

impl Default for Mvhd {
    fn default() -> Self {
        let now = qt_time_now();

        Mvhd {
            creation_time: now,
            modification_time: now,
            timescale: DEFAULT_MOVIE_TIMESCALE,
            duration: 0,
            rate: 1.into(),
            volume: 1.into(),
            matrix: Matrix::default(),
            next_track_id: 1,
        }
    }
}

/// Used until the caller picks a movie timescale.
pub const DEFAULT_MOVIE_TIMESCALE: u32 = 1000;

impl AtomExt for Mvhd {
    type Ext = MvhdExt;

    const KIND_EXT: FourCC = FourCC::new(b"mvhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<MvhdExt> {
        let version = if needs_64bit(&[self.creation_time, self.modification_time, self.duration]) {
            self.creation_time.encode(buf)?;
            self.modification_time.encode(buf)?;
            self.timescale.encode(buf)?;
            self.duration.encode(buf)?;
            MvhdVersion::V1
        } else {
            (self.creation_time as u32).encode(buf)?;
            (self.modification_time as u32).encode(buf)?;
            self.timescale.encode(buf)?;
            (self.duration as u32).encode(buf)?;
            MvhdVersion::V0
        };

        self.rate.encode(buf)?;
        self.volume.encode(buf)?;

        0u16.encode(buf)?; // reserved
        0u64.encode(buf)?; // reserved

        self.matrix.encode(buf)?;

        // preview, poster, selection and current time
        [0u8; 24].encode(buf)?;

        self.next_track_id.encode(buf)?;

        Ok(version.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mvhd32() {
        let mvhd = Mvhd {
            creation_time: 0,
            modification_time: 0,
            duration: 5000,
            next_track_id: 3,
            ..Default::default()
        };

        let mut buf = Vec::new();
        mvhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 108);
        assert_eq!(&buf[8..12], b"\0\0\0\0");
        assert_eq!(&buf[20..32], b"\0\0\x03\xe8\0\0\x13\x88\0\x01\0\0");
        assert_eq!(&buf[32..34], b"\x01\0");
        assert_eq!(&buf[104..], b"\0\0\0\x03");
    }

    #[test]
    fn test_mvhd64() {
        let mvhd = Mvhd {
            duration: 1 << 33,
            ..Default::default()
        };

        let mut buf = Vec::new();
        mvhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 120);
        assert_eq!(buf[8], 1);
    }
}
