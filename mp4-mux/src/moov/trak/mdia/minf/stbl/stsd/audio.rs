use crate::*;

/// A sound sample description, ex. `mp4a`.
///
/// Version 1 adds the QuickTime packet layout fields.
#[derive(Debug)]
pub struct AudioSampleEntry {
    pub kind: FourCC,
    pub data_reference_index: u16,

    pub version: u16,
    pub revision_level: u16,
    pub vendor: u32,
    pub channels: u16,
    pub sample_size: u16,
    pub compression_id: i16,
    pub packet_size: u16,
    /// In Hz, written as 16.16 fixed point.
    pub sample_rate: u32,

    pub samples_per_packet: u32,
    pub bytes_per_packet: u32,
    pub bytes_per_frame: u32,
    pub bytes_per_sample: u32,

    pub extensions: Vec<Box<dyn Extension>>,
}

impl Default for AudioSampleEntry {
    fn default() -> Self {
        Self {
            kind: FourCC::new(b"mp4a"),
            data_reference_index: 1,
            version: 0,
            revision_level: 0,
            vendor: 0,
            channels: 2,
            sample_size: 16,
            compression_id: -1,
            packet_size: 0,
            sample_rate: 48000,
            samples_per_packet: 0,
            bytes_per_packet: 0,
            bytes_per_frame: 0,
            bytes_per_sample: 0,
            extensions: Vec::new(),
        }
    }
}

impl Encode for AudioSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| {
            encode_sample_entry(buf, self.data_reference_index)?;

            self.version.encode(buf)?;
            self.revision_level.encode(buf)?;
            self.vendor.encode(buf)?;
            self.channels.encode(buf)?;
            self.sample_size.encode(buf)?;
            self.compression_id.encode(buf)?;
            self.packet_size.encode(buf)?;
            (self.sample_rate << 16).encode(buf)?;

            if self.version == 1 {
                self.samples_per_packet.encode(buf)?;
                self.bytes_per_packet.encode(buf)?;
                self.bytes_per_frame.encode(buf)?;
                self.bytes_per_sample.encode(buf)?;
            }

            self.extensions.encode(buf)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp4a() {
        let entry = AudioSampleEntry {
            compression_id: 0,
            extensions: vec![codec_data(FourCC::new(b"test"), &[]).into()],
            ..Default::default()
        };

        let mut buf = Vec::new();
        entry.encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 44, b'm', b'p', b'4', b'a',
            0, 0, 0, 0, 0, 0, 0, 1,
            0, 0, 0, 0, 0, 0, 0, 0,
            0, 2, 0, 16, 0, 0, 0, 0,
            0xbb, 0x80, 0, 0,
            0, 0, 0, 8, b't', b'e', b's', b't',
        ];
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_mp4a_v1() {
        let entry = AudioSampleEntry {
            version: 1,
            samples_per_packet: 1024,
            ..Default::default()
        };

        let mut buf = Vec::new();
        entry.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 36 + 16);
        assert_eq!(&buf[28..30], &[0xff, 0xff]);
        assert_eq!(&buf[36..40], &[0, 0, 4, 0]);
    }
}
