use crate::*;

pub const ESDS_OBJECT_TYPE_MPEG4_P2: u8 = 0x20;
pub const ESDS_OBJECT_TYPE_MPEG4_P3: u8 = 0x40;
pub const ESDS_OBJECT_TYPE_MPEG1_P3: u8 = 0x6B;

pub const ESDS_STREAM_TYPE_VISUAL: u8 = 0x04;
pub const ESDS_STREAM_TYPE_AUDIO: u8 = 0x05;

/// An MPEG-4 elementary stream descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Esds {
    pub es_desc: EsDescriptor,
}

impl Esds {
    /// Build the descriptor for the given track.
    ///
    /// Zero bitrates are left unset so they can be filled in later.
    pub fn new(
        track_id: u32,
        object_type: u8,
        stream_type: u8,
        decoder_specific: Option<&[u8]>,
        avg_bitrate: u32,
        max_bitrate: u32,
    ) -> Self {
        Self {
            es_desc: EsDescriptor {
                es_id: (track_id & 0xFFFF) as u16,
                dec_config: DecoderConfig {
                    object_type_indication: object_type,
                    stream_type,
                    up_stream: 0,
                    buffer_size_db: Default::default(),
                    max_bitrate,
                    avg_bitrate,
                    dec_specific: decoder_specific.map(|data| DecoderSpecific {
                        data: data.to_vec(),
                    }),
                },
                sl_config: SLConfig {},
            },
        }
    }
}

impl AtomExt for Esds {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"esds");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        Descriptor::from(self.es_desc.clone()).encode(buf)
    }
}

impl Extension for Esds {
    fn kind(&self) -> FourCC {
        Self::KIND
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        self.encode(&mut buf)
    }

    fn update_bitrates(&mut self, avg: u32, max: u32) {
        let config = &mut self.es_desc.dec_config;
        if avg != 0 && config.avg_bitrate == 0 {
            config.avg_bitrate = avg;
        }
        if max != 0 && config.max_bitrate == 0 {
            config.max_bitrate = max;
        }
    }
}

macro_rules! descriptors {
    ($($name:ident,)*) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Descriptor {
            $(
                $name($name),
            )*
        }

        impl Encode for Descriptor {
            fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
                // The size prefix is variable length, so the body is encoded separately first.
                let mut tmp = Vec::new();

                match self {
                    $(
                        Descriptor::$name(t) => {
                            $name::TAG.encode(buf)?;
                            t.encode(&mut tmp)?;
                        },
                    )*
                };

                // 7 bits per byte, most significant first, high bit set on all but the last.
                let size = tmp.len() as u32;
                let mut groups = 1;
                while groups < 4 && size >> (7 * groups) > 0 {
                    groups += 1;
                }

                for i in (0..groups).rev() {
                    let mut b = ((size >> (7 * i)) & 0x7F) as u8;
                    if i > 0 {
                        b |= 0x80;
                    }
                    b.encode(buf)?;
                }

                buf.append_slice(&tmp);
                Ok(())
            }
        }

        $(
            impl From<$name> for Descriptor {
                fn from(desc: $name) -> Self {
                    Descriptor::$name(desc)
                }
            }
        )*
    };
}

descriptors! {
    EsDescriptor,
    DecoderConfig,
    DecoderSpecific,
    SLConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsDescriptor {
    pub es_id: u16,

    pub dec_config: DecoderConfig,
    pub sl_config: SLConfig,
}

impl EsDescriptor {
    pub const TAG: u8 = 0x03;
}

impl Encode for EsDescriptor {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.es_id.encode(buf)?;
        0u8.encode(buf)?; // no dependency, url or ocr stream

        Descriptor::from(self.dec_config.clone()).encode(buf)?;
        Descriptor::from(self.sl_config).encode(buf)?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    pub object_type_indication: u8,
    pub stream_type: u8,
    pub up_stream: u8,
    pub buffer_size_db: u24,
    pub max_bitrate: u32,
    pub avg_bitrate: u32,
    pub dec_specific: Option<DecoderSpecific>,
}

impl DecoderConfig {
    pub const TAG: u8 = 0x04;
}

impl Encode for DecoderConfig {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.object_type_indication.encode(buf)?;
        ((self.stream_type << 2) | ((self.up_stream & 1) << 1) | 1).encode(buf)?; // 1 reserved
        self.buffer_size_db.encode(buf)?;
        self.max_bitrate.encode(buf)?;
        self.avg_bitrate.encode(buf)?;

        if let Some(dec_specific) = &self.dec_specific {
            Descriptor::from(dec_specific.clone()).encode(buf)?;
        }

        Ok(())
    }
}

/// Codec specific configuration, ex. the AAC AudioSpecificConfig.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderSpecific {
    pub data: Vec<u8>,
}

impl DecoderSpecific {
    pub const TAG: u8 = 0x05;
}

impl Encode for DecoderSpecific {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.append_slice(&self.data);
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SLConfig {}

impl SLConfig {
    pub const TAG: u8 = 0x06;
}

impl Encode for SLConfig {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        2u8.encode(buf)?; // pre-defined: reserved for MP4 files
        Ok(())
    }
}

/// An `esds` extension for the given track.
pub fn esds(
    track_id: u32,
    object_type: u8,
    stream_type: u8,
    decoder_specific: Option<&[u8]>,
    avg_bitrate: u32,
    max_bitrate: u32,
) -> Esds {
    Esds::new(track_id, object_type, stream_type, decoder_specific, avg_bitrate, max_bitrate)
}
