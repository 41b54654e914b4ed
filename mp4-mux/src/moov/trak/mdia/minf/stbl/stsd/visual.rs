use crate::*;

/// A video sample description, ex. `avc1` or `mp4v`.
#[derive(Debug)]
pub struct VisualSampleEntry {
    pub kind: FourCC,
    pub data_reference_index: u16,

    pub version: u16,
    pub revision_level: u16,
    pub vendor: FourCC,
    pub temporal_quality: u32,
    pub spatial_quality: u32,
    pub width: u16,
    pub height: u16,
    pub horizontal_resolution: FixedPoint<u16>,
    pub vertical_resolution: FixedPoint<u16>,
    pub datasize: u32,
    pub frame_count: u16,
    pub compressor: Compressor,
    pub depth: u16,
    pub color_table_id: i16,

    pub extensions: Vec<Box<dyn Extension>>,
}

impl Default for VisualSampleEntry {
    fn default() -> Self {
        Self {
            kind: FourCC::new(b"mp4v"),
            data_reference_index: 1,
            version: 0,
            revision_level: 0,
            vendor: FourCC::NULL,
            temporal_quality: 0,
            spatial_quality: 0,
            width: 0,
            height: 0,
            horizontal_resolution: 72.into(),
            vertical_resolution: 72.into(),
            datasize: 0,
            frame_count: 1,
            compressor: Default::default(),
            depth: 0x0018,
            color_table_id: -1,
            extensions: Vec::new(),
        }
    }
}

impl Encode for VisualSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| {
            encode_sample_entry(buf, self.data_reference_index)?;

            self.version.encode(buf)?;
            self.revision_level.encode(buf)?;
            self.vendor.encode(buf)?;
            self.temporal_quality.encode(buf)?;
            self.spatial_quality.encode(buf)?;
            self.width.encode(buf)?;
            self.height.encode(buf)?;
            self.horizontal_resolution.encode(buf)?;
            self.vertical_resolution.encode(buf)?;
            self.datasize.encode(buf)?;
            self.frame_count.encode(buf)?;
            self.compressor.encode(buf)?;
            self.depth.encode(buf)?;
            self.color_table_id.encode(buf)?;

            self.extensions.encode(buf)
        })
    }
}
