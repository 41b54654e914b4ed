use crate::*;

/// A 3GPP timed text sample description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubtitleSampleEntry {
    pub kind: FourCC,
    pub data_reference_index: u16,
    pub display_flags: u32,
    /// The text box as `width | height << 16`.
    pub default_text_box: u64,
    pub font_id: u16,
    pub font_face: u8,
    pub font_size: u8,
    pub foreground_color_rgba: u32,
}

impl Default for SubtitleSampleEntry {
    fn default() -> Self {
        Self {
            kind: FourCC::new(b"tx3g"),
            data_reference_index: 1,
            display_flags: 0,
            default_text_box: 0,
            font_id: 1,
            font_face: 0,
            font_size: 0,
            // all white, opaque
            foreground_color_rgba: 0xFFFFFFFF,
        }
    }
}

impl Encode for SubtitleSampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| {
            encode_sample_entry(buf, self.data_reference_index)?;

            self.display_flags.encode(buf)?;
            1i8.encode(buf)?; // horizontal justification
            (-1i8).encode(buf)?; // vertical justification
            0u32.encode(buf)?; // background color
            self.default_text_box.encode(buf)?;
            0u32.encode(buf)?; // start and end char
            self.font_id.encode(buf)?;
            self.font_face.encode(buf)?;
            self.font_size.encode(buf)?;
            self.foreground_color_rgba.encode(buf)?;

            // A single entry font table is mandatory.
            encode_atom(buf, FourCC::new(b"ftab"), |buf| {
                1u16.encode(buf)?;
                1u16.encode(buf)?;
                PascalString::from("Serif").encode(buf)
            })
        })
    }
}
