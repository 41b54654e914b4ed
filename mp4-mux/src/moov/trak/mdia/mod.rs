mod hdlr;
mod mdhd;
mod minf;

pub use hdlr::*;
pub use mdhd::*;
pub use minf::*;

use crate::*;

#[derive(Debug, Default)]
pub struct Mdia {
    pub mdhd: Mdhd,
    pub hdlr: Hdlr,
    pub minf: Minf,
}

impl Mdia {
    pub fn new(ctx: &Context) -> Self {
        Self {
            mdhd: Mdhd::default(),
            hdlr: Hdlr::new(ctx),
            minf: Minf::new(ctx),
        }
    }
}

impl Atom for Mdia {
    const KIND: FourCC = FourCC::new(b"mdia");

    nested! {
        required: [ Mdhd, Hdlr, Minf ],
        optional: [],
        multiple: [],
    }
}
