use crate::*;

ext! {
    name: Tkhd,
    versions: [0, 1],
    flags: {
        track_enabled = 0,
        track_in_movie = 1,
        track_in_preview = 2,
    }
}

/// Track header.
///
/// The width and height are 16.16 fixed point, the volume 8.8.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tkhd {
    pub creation_time: u64,
    pub modification_time: u64,
    pub track_id: u32,
    pub duration: u64,
    pub layer: i16,
    pub alternate_group: u16,
    pub volume: u16,
    pub matrix: Matrix,
    pub width: u32,
    pub height: u32,

    pub enabled: bool,
    pub in_movie: bool,
    pub in_preview: bool,
}

impl Default for Tkhd {
    fn default() -> Self {
        let now = qt_time_now();

        Self {
            creation_time: now,
            modification_time: now,
            track_id: 0,
            duration: 0,
            layer: 0,
            alternate_group: 0,
            volume: 0,
            matrix: Matrix::default(),
            width: 0,
            height: 0,
            enabled: true,
            in_movie: true,
            in_preview: true,
        }
    }
}

impl Tkhd {
    pub fn set_audio(&mut self) {
        self.volume = 0x0100;
        self.width = 0;
        self.height = 0;
    }

    /// Takes the presentation size in pixels.
    pub fn set_video(&mut self, width: u32, height: u32) {
        self.volume = 0;
        self.width = width << 16;
        self.height = height << 16;
    }

    pub fn set_subtitle(&mut self) {
        self.volume = 0;
        self.width = 0;
        self.height = 0;
        self.alternate_group = 2;

        // above video
        self.layer = -1;
    }
}

impl AtomExt for Tkhd {
    type Ext = TkhdExt;

    const KIND_EXT: FourCC = FourCC::new(b"tkhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<TkhdExt> {
        let version = if needs_64bit(&[self.creation_time, self.modification_time, self.duration]) {
            self.creation_time.encode(buf)?;
            self.modification_time.encode(buf)?;
            self.track_id.encode(buf)?;
            0u32.encode(buf)?; // reserved
            self.duration.encode(buf)?;
            TkhdVersion::V1
        } else {
            (self.creation_time as u32).encode(buf)?;
            (self.modification_time as u32).encode(buf)?;
            self.track_id.encode(buf)?;
            0u32.encode(buf)?; // reserved
            (self.duration as u32).encode(buf)?;
            TkhdVersion::V0
        };

        0u64.encode(buf)?; // reserved
        self.layer.encode(buf)?;
        self.alternate_group.encode(buf)?;
        self.volume.encode(buf)?;
        0u16.encode(buf)?; // reserved
        self.matrix.encode(buf)?;
        self.width.encode(buf)?;
        self.height.encode(buf)?;

        Ok(TkhdExt {
            version,
            track_enabled: self.enabled,
            track_in_movie: self.in_movie,
            track_in_preview: self.in_preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tkhd_video() {
        let mut tkhd = Tkhd {
            creation_time: 1,
            modification_time: 2,
            track_id: 1,
            duration: 634634,
            ..Default::default()
        };
        tkhd.set_video(1280, 720);

        let mut buf = Vec::new();
        tkhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 92);
        assert_eq!(&buf[8..12], b"\0\0\0\x07");
        assert_eq!(&buf[84..], b"\x05\0\0\0\x02\xd0\0\0");
    }

    #[test]
    fn test_tkhd_subtitle() {
        let mut tkhd = Tkhd::default();
        tkhd.set_subtitle();

        let mut buf = Vec::new();
        tkhd.encode(&mut buf).unwrap();

        // layer, alternate group, volume
        assert_eq!(&buf[40..46], b"\xff\xff\0\x02\0\0");
    }

    #[test]
    fn test_tkhd64() {
        let tkhd = Tkhd {
            duration: u32::MAX as u64 + 1,
            ..Default::default()
        };

        let mut buf = Vec::new();
        tkhd.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 104);
        assert_eq!(buf[8], 1);
    }
}
