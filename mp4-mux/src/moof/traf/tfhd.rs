use crate::*;

ext! {
    name: Tfhd,
    versions: [0],
    flags: {
        base_data_offset = 0,
        sample_description_index = 1,
        default_sample_duration = 3,
        default_sample_size = 4,
        default_sample_flags = 5,
    }
}

/// Track fragment header; each field present is also a flag bit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tfhd {
    pub track_id: u32,
    pub base_data_offset: Option<u64>,
    pub sample_description_index: Option<u32>,
    pub default_sample_duration: Option<u32>,
    pub default_sample_size: Option<u32>,
    pub default_sample_flags: Option<u32>,
}

impl Tfhd {
    pub fn new(track_id: u32) -> Self {
        Self {
            track_id,
            ..Default::default()
        }
    }
}

impl AtomExt for Tfhd {
    const KIND_EXT: FourCC = FourCC::new(b"tfhd");

    type Ext = TfhdExt;

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<TfhdExt> {
        let ext = TfhdExt {
            base_data_offset: self.base_data_offset.is_some(),
            sample_description_index: self.sample_description_index.is_some(),
            default_sample_duration: self.default_sample_duration.is_some(),
            default_sample_size: self.default_sample_size.is_some(),
            default_sample_flags: self.default_sample_flags.is_some(),
            ..Default::default()
        };

        self.track_id.encode(buf)?;
        self.base_data_offset.encode(buf)?;
        self.sample_description_index.encode(buf)?;
        self.default_sample_duration.encode(buf)?;
        self.default_sample_size.encode(buf)?;
        self.default_sample_flags.encode(buf)?;

        Ok(ext)
    }
}
