mod dinf;
mod gmhd;
mod hmhd;
mod nmhd;
mod smhd;
mod stbl;
mod vmhd;

pub use dinf::*;
pub use gmhd::*;
pub use hmhd::*;
pub use nmhd::*;
pub use smhd::*;
pub use stbl::*;
pub use vmhd::*;

use crate::*;

/// Media information.
#[derive(Debug, Default)]
pub struct Minf {
    pub header: MediaHeader,

    // Only present for QuickTime.
    pub hdlr: Option<Hdlr>,

    pub dinf: Dinf,
    pub stbl: Stbl,
}

impl Minf {
    pub fn new(ctx: &Context) -> Self {
        Self {
            header: MediaHeader::None,
            hdlr: ctx.flavor.is_mov().then(|| Hdlr::data(ctx)),
            dinf: Dinf::new(ctx),
            stbl: Stbl::default(),
        }
    }
}

impl Atom for Minf {
    const KIND: FourCC = FourCC::new(b"minf");

    nested! {
        required: [ Header ],
        optional: [ Hdlr ],
        multiple: [ Dinf, Stbl ],
    }
}

/// The media-type specific header at the start of `minf`. Subtitles have none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaHeader {
    #[default]
    None,
    Vmhd(Vmhd),
    Smhd(Smhd),
    Hmhd(Hmhd),
    Gmhd(Gmhd),
    Nmhd(Nmhd),
}

impl Encode for MediaHeader {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Vmhd(vmhd) => vmhd.encode(buf),
            Self::Smhd(smhd) => smhd.encode(buf),
            Self::Hmhd(hmhd) => hmhd.encode(buf),
            Self::Gmhd(gmhd) => gmhd.encode(buf),
            Self::Nmhd(nmhd) => nmhd.encode(buf),
        }
    }
}
