mod dref;

pub use dref::*;

use crate::*;

/// Data information: where the media samples live.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dinf {
    pub dref: Dref,
}

impl Dinf {
    pub fn new(ctx: &Context) -> Self {
        Self {
            dref: Dref::new(ctx),
        }
    }
}

impl Atom for Dinf {
    const KIND: FourCC = FourCC::new(b"dinf");

    nested! {
        required: [ Dref ],
        optional: [],
        multiple: [],
    }
}
