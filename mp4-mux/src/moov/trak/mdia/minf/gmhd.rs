use crate::*;

/// QuickTime base media header, used by timecode and closed caption tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gmhd {
    pub gmin: Gmin,
    pub tmcd: Option<TmcdMediaHeader>,
}

impl Gmhd {
    pub fn new() -> Self {
        Self {
            gmin: Gmin {
                graphics_mode: GRAPHICS_MODE_DITHER_COPY,
                op_color: RgbColor::GRAY,
                balance: 0,
            },
            tmcd: None,
        }
    }

    /// Base media header with the timecode information atom.
    pub fn timecode() -> Self {
        Self {
            tmcd: Some(TmcdMediaHeader::default()),
            ..Self::new()
        }
    }
}

impl Atom for Gmhd {
    const KIND: FourCC = FourCC::new(b"gmhd");

    nested! {
        required: [ Gmin ],
        optional: [ Tmcd ],
        multiple: [],
    }
}

/// Base media info.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gmin {
    pub graphics_mode: u16,
    pub op_color: RgbColor,
    pub balance: u8,
}

impl AtomExt for Gmin {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"gmin");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.graphics_mode.encode(buf)?;
        self.op_color.encode(buf)?;
        self.balance.encode(buf)?;
        0u8.encode(buf)?; // reserved

        Ok(())
    }
}

/// The `tmcd` atom inside `gmhd`, not to be confused with the sample entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TmcdMediaHeader {
    pub tcmi: Tcmi,
}

impl Atom for TmcdMediaHeader {
    const KIND: FourCC = FourCC::new(b"tmcd");

    nested! {
        required: [ Tcmi ],
        optional: [],
        multiple: [],
    }
}

/// Timecode media info: how to display the timecode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tcmi {
    pub text_font: u16,
    pub text_face: u16,
    pub text_size: u16,
    pub text_color: RgbColor,
    pub bg_color: RgbColor,
    pub font_name: PascalString,
}

impl Default for Tcmi {
    fn default() -> Self {
        Self {
            text_font: 0,
            text_face: 0,
            text_size: 12,
            text_color: RgbColor::default(),
            bg_color: RgbColor::default(),
            font_name: "Chicago".into(),
        }
    }
}

impl AtomExt for Tcmi {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"tcmi");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.text_font.encode(buf)?;
        self.text_face.encode(buf)?;
        self.text_size.encode(buf)?;
        self.text_color.encode(buf)?;
        self.bg_color.encode(buf)?;
        0u16.encode(buf)?; // reserved
        self.font_name.encode(buf)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gmhd_timecode() {
        let mut buf = Vec::new();
        Gmhd::timecode().encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 78, b'g', b'm', b'h', b'd',
            0, 0, 0, 22, b'g', b'm', b'i', b'n', 0, 0, 0, 0,
            0, 0x40, 0x80, 0, 0x80, 0, 0x80, 0, 0, 0,
            0, 0, 0, 48, b't', b'm', b'c', b'd',
            0, 0, 0, 40, b't', b'c', b'm', b'i', 0, 0, 0, 0,
            0, 0, 0, 0, 0, 12,
            0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0,
            0, 0,
            7, b'C', b'h', b'i', b'c', b'a', b'g', b'o',
        ];
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_gmhd_caption() {
        let mut buf = Vec::new();
        Gmhd::new().encode(&mut buf).unwrap();
        assert_eq!(buf.len(), 8 + 22);
    }
}
