use crate::*;

/// Data reference table.
///
/// Only self-contained references are produced, the samples always live in this file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dref {
    pub entries: Vec<DataRef>,
}

impl Dref {
    /// A single self-contained entry, an alias for QuickTime and a url otherwise.
    pub fn new(ctx: &Context) -> Self {
        let entry = match ctx.flavor {
            Flavor::Mov => DataRef::Alis(Alis::default()),
            _ => DataRef::Url(Url::default()),
        };

        Self {
            entries: vec![entry],
        }
    }
}

impl AtomExt for Dref {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"dref");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;
        for entry in &self.entries {
            entry.encode(buf)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataRef {
    Url(Url),
    Alis(Alis),

    /// Anything else can't be written.
    Unknown(FourCC),
}

impl Encode for DataRef {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match self {
            Self::Url(url) => url.encode(buf),
            Self::Alis(alis) => alis.encode(buf),
            Self::Unknown(kind) => Err(Error::UnsupportedDataRef(*kind)),
        }
    }
}

ext! {
    name: Url,
    versions: [0],
    flags: {
        self_contained = 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Url {
    // Empty means the data is in this file.
    pub location: String,
}

impl AtomExt for Url {
    type Ext = UrlExt;

    const KIND_EXT: FourCC = FourCC::new(b"url ");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<UrlExt> {
        if !self.location.is_empty() {
            self.location.as_str().encode(buf)?;
        }

        Ok(UrlExt {
            self_contained: self.location.is_empty(),
            ..Default::default()
        })
    }
}

ext! {
    name: Alis,
    versions: [0],
    flags: {
        self_contained = 0,
    }
}

/// QuickTime alias record; only the self-contained form is supported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alis {}

impl AtomExt for Alis {
    type Ext = AlisExt;

    const KIND_EXT: FourCC = FourCC::new(b"alis");

    fn encode_body_ext<B: BufMut>(&self, _buf: &mut B) -> Result<AlisExt> {
        Ok(AlisExt {
            self_contained: true,
            ..Default::default()
        })
    }
}
