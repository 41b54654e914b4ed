mod mehd;
mod trex;

pub use mehd::*;
pub use trex::*;

use crate::*;

/// Movie extends: present when the samples follow in fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mvex {
    pub mehd: Mehd,
    pub trex: Vec<Trex>,
}

impl Atom for Mvex {
    const KIND: FourCC = FourCC::new(b"mvex");

    nested! {
        required: [ Mehd ],
        optional: [],
        multiple: [ Trex ],
    }
}
