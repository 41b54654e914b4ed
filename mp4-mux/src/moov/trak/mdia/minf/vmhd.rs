use crate::*;

ext! {
    name: Vmhd,
    versions: [0],
    flags: {
        no_lean_ahead = 0,
    }
}

/// Video media header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vmhd {
    pub graphics_mode: u16,
    pub op_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbColor {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl RgbColor {
    pub const GRAY: RgbColor = RgbColor {
        red: 0x8000,
        green: 0x8000,
        blue: 0x8000,
    };
}

impl Encode for RgbColor {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.red.encode(buf)?;
        self.green.encode(buf)?;
        self.blue.encode(buf)
    }
}

// QuickTime's "dither copy" mode.
pub(crate) const GRAPHICS_MODE_DITHER_COPY: u16 = 0x40;

impl Vmhd {
    pub fn new(ctx: &Context) -> Self {
        match ctx.flavor {
            Flavor::Mov => Self {
                graphics_mode: GRAPHICS_MODE_DITHER_COPY,
                op_color: RgbColor::GRAY,
            },
            _ => Self::default(),
        }
    }
}

impl AtomExt for Vmhd {
    type Ext = VmhdExt;

    const KIND_EXT: FourCC = FourCC::new(b"vmhd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<VmhdExt> {
        self.graphics_mode.encode(buf)?;
        self.op_color.encode(buf)?;

        Ok(VmhdExt {
            no_lean_ahead: true,
            ..Default::default()
        })
    }
}
