use crate::*;

/// Pixel aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pasp {
    pub h_spacing: u32,
    pub v_spacing: u32,
}

impl Atom for Pasp {
    const KIND: FourCC = FourCC::new(b"pasp");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.h_spacing.encode(buf)?;
        self.v_spacing.encode(buf)?;
        Ok(())
    }
}

pub fn pasp(par_n: u32, par_d: u32) -> Pasp {
    Pasp {
        h_spacing: par_n,
        v_spacing: par_d,
    }
}

/// How the fields of a frame are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interlace {
    Progressive,
    Interleaved {
        top_field_first: bool,
    },
    #[default]
    Unknown,
}

/// Field handling, QuickTime only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fiel {
    pub fields: u8,
    pub detail: u8,
}

impl Atom for Fiel {
    const KIND: FourCC = FourCC::new(b"fiel");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.fields.encode(buf)?;
        self.detail.encode(buf)?;
        Ok(())
    }
}

pub fn fiel(interlace: Interlace) -> Fiel {
    let (fields, detail) = match interlace {
        Interlace::Progressive => (1, 0),
        Interlace::Interleaved { top_field_first: true } => (2, 9),
        Interlace::Interleaved { top_field_first: false } => (2, 14),
        Interlace::Unknown => (0, 0),
    };

    Fiel { fields, detail }
}

/// Colour information, using the ISO code points for primaries, transfer and matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colr {
    /// QuickTime writes `nclc` without the range byte; everything else writes `nclx`.
    pub quicktime: bool,
    pub primaries: u16,
    pub transfer: u16,
    pub matrix: u16,
    pub full_range: bool,
}

impl Atom for Colr {
    const KIND: FourCC = FourCC::new(b"colr");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        if self.quicktime {
            b"nclc".encode(buf)?;
        } else {
            b"nclx".encode(buf)?;
        }

        self.primaries.encode(buf)?;
        self.transfer.encode(buf)?;
        self.matrix.encode(buf)?;

        if !self.quicktime {
            let range: u8 = if self.full_range { 0x80 } else { 0 };
            range.encode(buf)?;
        }

        Ok(())
    }
}

pub fn colr(ctx: &Context, primaries: u16, transfer: u16, matrix: u16, full_range: bool) -> Colr {
    Colr {
        quicktime: ctx.flavor.is_mov(),
        primaries,
        transfer,
        matrix,
        full_range,
    }
}

/// Clean aperture, each dimension as a numerator/denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clap {
    pub width: (u32, u32),
    pub height: (u32, u32),
    pub h_offset: (u32, u32),
    pub v_offset: (u32, u32),
}

impl Atom for Clap {
    const KIND: FourCC = FourCC::new(b"clap");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        for (n, d) in [self.width, self.height, self.h_offset, self.v_offset] {
            n.encode(buf)?;
            d.encode(buf)?;
        }

        Ok(())
    }
}

pub fn clap(width: (u32, u32), height: (u32, u32), h_offset: (u32, u32), v_offset: (u32, u32)) -> Clap {
    Clap {
        width,
        height,
        h_offset,
        v_offset,
    }
}

ext! {
    name: Vpcc,
    versions: [1],
    flags: {}
}

/// VP9 codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VpcC {
    pub profile: u8,
    pub level: u8,
    pub bit_depth: u8,
    pub chroma_subsampling: u8,
    pub video_full_range_flag: bool,
    pub color_primaries: u8,
    pub transfer_characteristics: u8,
    pub matrix_coefficients: u8,
}

impl AtomExt for VpcC {
    const KIND_EXT: FourCC = FourCC::new(b"vpcC");

    type Ext = VpccExt;

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<VpccExt> {
        self.profile.encode(buf)?;
        self.level.encode(buf)?;
        ((self.bit_depth & 0xf) << 4 | (self.chroma_subsampling & 0x3) << 1 | self.video_full_range_flag as u8)
            .encode(buf)?;
        self.color_primaries.encode(buf)?;
        self.transfer_characteristics.encode(buf)?;
        self.matrix_coefficients.encode(buf)?;

        // No codec initialization data.
        0u16.encode(buf)?;

        Ok(VpccVersion::V1.into())
    }
}

#[allow(clippy::too_many_arguments)]
pub fn vpcc(
    profile: u8,
    level: u8,
    bit_depth: u8,
    chroma_subsampling: u8,
    video_full_range_flag: bool,
    color_primaries: u8,
    transfer_characteristics: u8,
    matrix_coefficients: u8,
) -> VpcC {
    VpcC {
        profile,
        level,
        bit_depth,
        chroma_subsampling,
        video_full_range_flag,
        color_primaries,
        transfer_characteristics,
        matrix_coefficients,
    }
}

impl_extension!(Pasp, Fiel, Colr, Clap, VpcC);

/// Gamma as 16.16 fixed point.
pub fn gama(gamma: f64) -> RawAtom {
    let fixed = (65536.0 * gamma) as u32;
    RawAtom::new(FourCC::new(b"gama"), &fixed.to_be_bytes())
}

/// H.263 decoder information, baseline profile.
pub fn h263() -> RawAtom {
    // vendor, decoder version, level, profile
    RawAtom::new(FourCC::new(b"d263"), &[0, 0, 0, 0, 0, 10, 0])
}

/// Sorenson video 3: the SEQH header wrapped in an `SMI ` atom.
pub fn smi(seqh: &[u8]) -> RawAtom {
    let mut data = Vec::with_capacity(seqh.len() + 8);
    data.extend_from_slice(b"SEQH");
    data.extend_from_slice(&(seqh.len() as u32 + 8).to_be_bytes());
    data.extend_from_slice(seqh);

    RawAtom::new(FourCC::new(b"SMI "), &data)
}

/// The JPEG 2000 `jp2x` header, passed through.
pub fn jp2x(data: &[u8]) -> RawAtom {
    RawAtom::new(FourCC::new(b"jp2x"), data)
}

/// Colorspaces accepted by [jp2h], with the enumerated value and default component count.
fn jp2_colorspace(colorspace: &str) -> Result<(u32, u16)> {
    match colorspace {
        "sRGB" => Ok((0x10, 3)),
        "GRAY" => Ok((0x11, 1)),
        "sYUV" => Ok((0x12, 3)),
        _ => Err(Error::InvalidColorspace(colorspace.to_string())),
    }
}

/// The JPEG 2000 header: image header, colour specification and optional component mapping.
///
/// Each `cmap` value is `mtyp << 24 | pcol << 16 | cmp`.
/// Each `cdef` value is the association of that channel: positive for a colour, negative for opacity.
pub fn jp2h(
    width: u32,
    height: u32,
    colorspace: &str,
    ncomp: u16,
    cmap: Option<&[u32]>,
    cdef: Option<&[i32]>,
) -> Result<RawAtom> {
    let (cenum, default_ncomp) = jp2_colorspace(colorspace)?;
    let ncomp = match ncomp {
        0 => default_ncomp,
        n => n,
    };

    let mut buf = Vec::new();

    encode_atom(&mut buf, FourCC::new(b"ihdr"), |buf| {
        height.encode(buf)?;
        width.encode(buf)?;
        ncomp.encode(buf)?;
        7u8.encode(buf)?; // 8 bits per component, unsigned
        7u8.encode(buf)?; // compression type
        0u8.encode(buf)?; // colourspace unknown
        0u8.encode(buf) // no intellectual property
    })?;

    encode_atom(&mut buf, FourCC::new(b"colr"), |buf| {
        1u8.encode(buf)?; // enumerated
        0u8.encode(buf)?; // precedence
        0u8.encode(buf)?; // approximation
        cenum.encode(buf)
    })?;

    if let Some(cmap) = cmap {
        encode_atom(&mut buf, FourCC::new(b"cmap"), |buf| {
            for value in cmap {
                if value >> 24 == 1 {
                    tracing::warn!("jp2 palette mapping is not supported");
                }

                ((value & 0xffff) as u16).encode(buf)?;
                ((value >> 24) as u8).encode(buf)?;
                ((value >> 16 & 0xff) as u8).encode(buf)?;
            }
            Ok(())
        })?;
    }

    if let Some(cdef) = cdef {
        encode_atom(&mut buf, FourCC::new(b"cdef"), |buf| {
            (cdef.len() as u16).encode(buf)?;
            for (i, value) in cdef.iter().enumerate() {
                (i as u16).encode(buf)?;

                let (typ, assoc) = match *value {
                    v if v > 0 => (0, v as u16),
                    v if v < 0 => (v.unsigned_abs() as u16, 0),
                    _ => (1, 0),
                };
                typ.encode(buf)?;
                assoc.encode(buf)?;
            }
            Ok(())
        })?;
    }

    Ok(RawAtom {
        kind: FourCC::new(b"jp2h"),
        data: buf,
    })
}
