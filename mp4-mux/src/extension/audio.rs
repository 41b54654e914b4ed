use crate::*;

/// AMR decoder information: all modes, no mode change restriction, one frame per sample.
pub fn amr() -> RawAtom {
    RawAtom::new(FourCC::new(b"damr"), &[0, 0, 0, 0, 0, 0x81, 0xFF, 0, 1])
}

/// AC-3 specific info, with the fields copied from the bitstream info header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dac3 {
    pub fscod: u8,
    pub bsid: u8,
    pub bsmod: u8,
    pub acmod: u8,
    pub lfe_on: bool,
    pub bitrate_code: u8,
}

impl Atom for Dac3 {
    const KIND: FourCC = FourCC::new(b"dac3");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        // fscod(2) bsid(5) bsmod(3) acmod(3) lfeon(1) bit_rate_code(5) reserved(5)
        let bits = (self.fscod as u32 & 0x3) << 22
            | (self.bsid as u32 & 0x1f) << 17
            | (self.bsmod as u32 & 0x7) << 14
            | (self.acmod as u32 & 0x7) << 11
            | (self.lfe_on as u32) << 10
            | (self.bitrate_code as u32 & 0x1f) << 5;

        buf.append_slice(&bits.to_be_bytes()[1..]);
        Ok(())
    }
}

pub fn ac3(fscod: u8, bsid: u8, bsmod: u8, acmod: u8, lfe_on: bool, bitrate_code: u8) -> Dac3 {
    Dac3 {
        fscod,
        bsid,
        bsmod,
        acmod,
        lfe_on,
        bitrate_code,
    }
}

/// Opus specific info.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dops {
    pub output_channel_count: u8,
    pub pre_skip: u16,
    pub input_sample_rate: u32,
    pub output_gain: i16,
    pub channel_mapping_family: u8,

    // Only written when the mapping family is non-zero.
    pub stream_count: u8,
    pub coupled_count: u8,
    pub channel_mapping: Vec<u8>,
}

impl Atom for Dops {
    const KIND: FourCC = FourCC::new(b"dOps");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        0u8.encode(buf)?; // version
        self.output_channel_count.encode(buf)?;
        self.pre_skip.encode(buf)?;
        self.input_sample_rate.encode(buf)?;
        self.output_gain.encode(buf)?;
        self.channel_mapping_family.encode(buf)?;

        if self.channel_mapping_family > 0 {
            self.stream_count.encode(buf)?;
            self.coupled_count.encode(buf)?;

            // One entry per output channel, zero filled if short.
            let channels = self.output_channel_count as usize;
            for i in 0..channels {
                self.channel_mapping.get(i).copied().unwrap_or(0).encode(buf)?;
            }
        }

        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
pub fn opus(
    rate: u32,
    channels: u8,
    mapping_family: u8,
    stream_count: u8,
    coupled_count: u8,
    channel_mapping: &[u8],
    pre_skip: u16,
    output_gain: i16,
) -> Dops {
    Dops {
        output_channel_count: channels,
        pre_skip,
        input_sample_rate: rate,
        output_gain,
        channel_mapping_family: mapping_family,
        stream_count,
        coupled_count,
        channel_mapping: channel_mapping.to_vec(),
    }
}

impl_extension!(Dac3, Dops);

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: Extension>(ext: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        ext.encode_ext(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_amr() {
        assert_eq!(encode(&amr()), b"\0\0\0\x11damr\0\0\0\0\0\x81\xff\0\x01");
    }

    #[test]
    fn test_ac3() {
        // 48kHz, bsid 8, main audio, 3/2 + lfe, 384 kbit/s
        let buf = encode(&ac3(0, 8, 0, 7, true, 14));
        assert_eq!(buf, b"\0\0\0\x0bdac3\x10\x3d\xc0");
    }

    #[test]
    fn test_opus() {
        let stereo = encode(&opus(48000, 2, 0, 1, 1, &[], 312, 0));
        assert_eq!(
            stereo,
            b"\0\0\0\x13dOps\0\x02\x01\x38\0\0\xbb\x80\0\0\0"
        );

        let surround = encode(&opus(48000, 3, 1, 2, 1, &[0, 2, 1], 312, 0));
        assert_eq!(surround.len(), 19 + 2 + 3);
        assert_eq!(&surround[19..], &[2, 1, 0, 2, 1]);
    }
}
