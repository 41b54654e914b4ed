use crate::*;

/// The QuickTime `wave` atom: a list of audio decompression atoms, led by `frma`.
#[derive(Debug, Default)]
pub struct Wave {
    pub atoms: Vec<Box<dyn Extension>>,
}

impl Atom for Wave {
    const KIND: FourCC = FourCC::new(b"wave");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.atoms.encode(buf)
    }
}

impl Extension for Wave {
    fn kind(&self) -> FourCC {
        Self::KIND
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        self.encode(&mut buf)
    }

    fn update_bitrates(&mut self, avg: u32, max: u32) {
        // Only the esds is interesting in here.
        for atom in self.atoms.iter_mut() {
            if atom.kind() == Esds::KIND {
                atom.update_bitrates(avg, max);
            }
        }
    }
}

/// The original format of the data before it was wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frma {
    pub media_type: FourCC,
}

impl Atom for Frma {
    const KIND: FourCC = FourCC::new(b"frma");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.media_type.encode(buf)
    }
}

impl_extension!(Frma);

/// Build a `wave` list: `frma`, the optional atoms, then the terminator if requested.
pub fn mov_wave(
    media_type: FourCC,
    atom1: Option<Box<dyn Extension>>,
    atom2: Option<Box<dyn Extension>>,
    terminator: bool,
) -> Wave {
    let mut atoms: Vec<Box<dyn Extension>> = vec![Frma { media_type }.into()];
    atoms.extend(atom1);
    atoms.extend(atom2);

    if terminator {
        atoms.push(Terminator.into());
    }

    Wave { atoms }
}

/// AAC in QuickTime: the esds lives inside a `wave`, behind a dummy `mp4a` atom.
pub fn mov_aac(track_id: u32, codec_data: Option<&[u8]>, avg_bitrate: u32, max_bitrate: u32) -> Wave {
    let esds = esds(
        track_id,
        ESDS_OBJECT_TYPE_MPEG4_P3,
        ESDS_STREAM_TYPE_AUDIO,
        codec_data,
        avg_bitrate,
        max_bitrate,
    );

    // Not in any spec, but offset based players expect it.
    let mp4a = RawAtom::new(FourCC::new(b"mp4a"), &[0; 4]);

    mov_wave(FourCC::new(b"mp4a"), Some(mp4a.into()), Some(esds.into()), true)
}

/// Apple Lossless in QuickTime.
pub fn mov_alac(codec_data: &[u8]) -> Wave {
    let alac = RawAtom::new(FourCC::new(b"alac"), codec_data);
    mov_wave(FourCC::new(b"alac"), None, Some(alac.into()), true)
}

// QuickTime names WAV codecs 'ms' followed by the 16-bit codec id.
const IMA_ADPCM_FOURCC: FourCC = FourCC::new(&[b'm', b's', 0x00, 0x11]);

/// IMA ADPCM in QuickTime, described by a little-endian WAVEFORMATEX inside a `wave`.
pub fn ima_adpcm(channels: u16, rate: u32, blocksize: u16) -> Wave {
    let samples_per_block = (2 * blocksize as u32 / channels.max(1) as u32).saturating_sub(7);
    let bytes_per_sec = match samples_per_block {
        0 => 0,
        spb => (rate as u64 * blocksize as u64 / spb as u64) as u32,
    };

    let mut data = Vec::with_capacity(20);
    data.extend_from_slice(&0x11u16.to_le_bytes());
    data.extend_from_slice(&channels.to_le_bytes());
    data.extend_from_slice(&rate.to_le_bytes());
    data.extend_from_slice(&bytes_per_sec.to_le_bytes());
    data.extend_from_slice(&blocksize.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes()); // bits per sample
    data.extend_from_slice(&2u16.to_le_bytes()); // extra bytes
    data.extend_from_slice(&(samples_per_block as u16).to_le_bytes());

    let atom = RawAtom::new(IMA_ADPCM_FOURCC, &data);
    mov_wave(IMA_ADPCM_FOURCC, Some(atom.into()), None, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mov_alac() {
        let wave = mov_alac(&[1, 2, 3]);

        let mut buf = Vec::new();
        wave.encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 39, b'w', b'a', b'v', b'e',
            0, 0, 0, 12, b'f', b'r', b'm', b'a', b'a', b'l', b'a', b'c',
            0, 0, 0, 11, b'a', b'l', b'a', b'c', 1, 2, 3,
            0, 0, 0, 8, 0, 0, 0, 0,
        ];
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_mov_aac_bitrates() {
        let mut wave = mov_aac(1, None, 0, 0);
        wave.update_bitrates(64000, 96000);

        let mut buf = Vec::new();
        wave.encode(&mut buf).unwrap();

        let mut expected = Vec::new();
        esds(1, ESDS_OBJECT_TYPE_MPEG4_P3, ESDS_STREAM_TYPE_AUDIO, None, 64000, 96000)
            .encode(&mut expected)
            .unwrap();

        // wave header, frma, dummy mp4a, then the esds
        let start = 8 + 12 + 12;
        assert_eq!(&buf[start..start + expected.len()], expected.as_slice());
        assert_eq!(&buf[buf.len() - 8..], &[0, 0, 0, 8, 0, 0, 0, 0]);
    }

    #[test]
    fn test_ima_adpcm() {
        let wave = ima_adpcm(2, 44100, 2048);

        let mut buf = Vec::new();
        wave.encode(&mut buf).unwrap();

        // wave(8) + frma(12) + ms\0\x11(8 + 20) + terminator(8)
        assert_eq!(buf.len(), 56);
        assert_eq!(&buf[16..20], &[b'm', b's', 0, 0x11]);

        let atom = &buf[28..48];
        assert_eq!(&atom[..2], &[0x11, 0]);
        // 2 * 2048 / 2 - 7
        assert_eq!(&atom[18..20], &2041u16.to_le_bytes());
    }
}
