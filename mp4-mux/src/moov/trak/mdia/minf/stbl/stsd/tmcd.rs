use crate::*;

/// The timecode counts in drop-frame format.
pub const TC_DROP_FRAME: u32 = 0x0001;
/// The timecode wraps after 24 hours.
pub const TC_24H_MAX: u32 = 0x0002;

/// A timecode sample description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimecodeSampleEntry {
    pub data_reference_index: u16,
    pub tc_flags: u32,
    pub timescale: u32,
    pub frame_duration: u32,
    pub n_frames: u8,

    /// The source name, ex. the tape.
    pub name: String,
    pub language_code: u16,
}

impl TimecodeSampleEntry {
    pub const KIND: FourCC = FourCC::new(b"tmcd");
}

/// The frame rate and counting mode of a timecode track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimecodeConfig {
    pub fps_n: u32,
    pub fps_d: u32,
    pub drop_frame: bool,
}

impl TimecodeSampleEntry {
    /// Derive the frame duration and frames per second from the frame rate.
    pub fn new(timescale: u32, config: &TimecodeConfig) -> Result<Self> {
        if config.fps_n == 0 || config.fps_d == 0 {
            return Err(Error::InvalidFrameRate);
        }

        let mut tc_flags = TC_24H_MAX;
        if config.drop_frame {
            tc_flags |= TC_DROP_FRAME;
        }

        let frame_duration = timescale as u64 * config.fps_d as u64 / config.fps_n as u64;
        let n_frames = match config.fps_d {
            1001 => config.fps_n / 1000,
            fps_d => config.fps_n / fps_d,
        };

        Ok(Self {
            tc_flags,
            timescale,
            frame_duration: frame_duration as u32,
            n_frames: n_frames as u8,
            ..Default::default()
        })
    }
}

impl Default for TimecodeSampleEntry {
    fn default() -> Self {
        Self {
            data_reference_index: 1,
            tc_flags: TC_24H_MAX,
            timescale: 0,
            frame_duration: 0,
            n_frames: 0,
            name: "Tape".to_string(),
            language_code: 0,
        }
    }
}

impl Encode for TimecodeSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, Self::KIND, |buf| {
            encode_sample_entry(buf, self.data_reference_index)?;

            0u32.encode(buf)?; // reserved
            self.tc_flags.encode(buf)?;
            self.timescale.encode(buf)?;
            self.frame_duration.encode(buf)?;
            self.n_frames.encode(buf)?;
            0u8.encode(buf)?; // reserved

            encode_atom(buf, FourCC::new(b"name"), |buf| {
                (self.name.len() as u16).encode(buf)?;
                self.language_code.encode(buf)?;
                buf.append_slice(self.name.as_bytes());
                Ok(())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmcd_entry() {
        let entry = TimecodeSampleEntry {
            tc_flags: TC_24H_MAX | TC_DROP_FRAME,
            timescale: 30000,
            frame_duration: 1001,
            n_frames: 30,
            ..Default::default()
        };

        let mut buf = Vec::new();
        entry.encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 50, b't', b'm', b'c', b'd',
            0, 0, 0, 0, 0, 0, 0, 1,
            0, 0, 0, 0,
            0, 0, 0, 3,
            0, 0, 0x75, 0x30,
            0, 0, 0x03, 0xe9,
            30, 0,
            0, 0, 0, 16, b'n', b'a', b'm', b'e', 0, 4, 0, 0, b'T', b'a', b'p', b'e',
        ];
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_tmcd_from_framerate() {
        let ntsc = TimecodeConfig {
            fps_n: 30000,
            fps_d: 1001,
            drop_frame: true,
        };

        let entry = TimecodeSampleEntry::new(30000, &ntsc).unwrap();
        assert_eq!(entry.tc_flags, TC_24H_MAX | TC_DROP_FRAME);
        assert_eq!(entry.frame_duration, 1001);
        assert_eq!(entry.n_frames, 30);

        let pal = TimecodeConfig {
            fps_n: 25,
            fps_d: 1,
            drop_frame: false,
        };

        let entry = TimecodeSampleEntry::new(2500, &pal).unwrap();
        assert_eq!(entry.tc_flags, TC_24H_MAX);
        assert_eq!(entry.frame_duration, 100);
        assert_eq!(entry.n_frames, 25);

        let invalid = TimecodeConfig::default();
        assert!(matches!(
            TimecodeSampleEntry::new(2500, &invalid),
            Err(Error::InvalidFrameRate)
        ));
    }
}
