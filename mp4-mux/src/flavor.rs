/// The container dialect being written.
///
/// The layout of a handful of atoms depends on it, for example the `hdlr` name encoding
/// or whether tags are wrapped in `meta/ilst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flavor {
    /// ISO base media (mp4).
    #[default]
    Isom,

    /// Apple QuickTime (mov).
    Mov,

    /// Smooth streaming (ismv/isma).
    Isml,

    /// 3GPP.
    ThreeGp,
}

impl Flavor {
    pub fn is_mov(&self) -> bool {
        *self == Flavor::Mov
    }
}

/// Settings shared by every atom in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    pub flavor: Flavor,

    /// Create a timecode track even when the flavor is not QuickTime.
    pub force_create_timecode_trak: bool,
}

impl Context {
    pub fn new(flavor: Flavor, force_create_timecode_trak: bool) -> Self {
        Self {
            flavor,
            force_create_timecode_trak,
        }
    }
}
