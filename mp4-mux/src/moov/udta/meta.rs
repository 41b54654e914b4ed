use crate::*;

/// Flags of the `data` atom inside an `ilst` entry.
pub const METADATA_DATA_FLAG: u32 = 0x0;
pub const METADATA_TEXT_FLAG: u32 = 0x1;
pub const METADATA_JPEG_FLAG: u32 = 0xd;
pub const METADATA_PNG_FLAG: u32 = 0xe;

/// iTunes style metadata: a handler and the tag list.
#[derive(Debug)]
pub struct Meta {
    pub hdlr: Hdlr,
    pub ilst: Ilst,
}

impl Meta {
    pub fn new(ctx: &Context) -> Self {
        // The component type is written for every flavor here.
        let hdlr = Hdlr {
            component_type: FourCC::new(b"mhlr"),
            handler_type: FourCC::new(b"mdir"),
            ..Hdlr::new(ctx)
        };

        Self {
            hdlr,
            ilst: Ilst::default(),
        }
    }
}

impl AtomExt for Meta {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"meta");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.hdlr.encode(buf)?;
        self.ilst.encode(buf)
    }
}

#[derive(Debug, Default)]
pub struct Ilst {
    pub entries: Vec<Box<dyn Extension>>,
}

impl Atom for Ilst {
    const KIND: FourCC = FourCC::new(b"ilst");

    nested! {
        required: [],
        optional: [],
        multiple: [ Entries ],
    }
}

/// A metadata item: an atom of the tag's kind wrapping a single `data` atom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub kind: FourCC,
    pub flags: u32,
    pub data: Vec<u8>,
}

impl Tag {
    pub fn new(kind: FourCC, flags: u32, data: &[u8]) -> Self {
        Self {
            kind,
            flags,
            data: data.to_vec(),
        }
    }
}

impl Encode for Tag {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, self.kind, |buf| {
            encode_atom_full(buf, FourCC::new(b"data"), 0, self.flags, |buf| {
                0u32.encode(buf)?; // reserved
                buf.append_slice(&self.data);
                Ok(())
            })
        })
    }
}

impl Extension for Tag {
    fn kind(&self) -> FourCC {
        self.kind
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        self.encode(&mut buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag() {
        let mut buf = Vec::new();
        Tag::new(FourCC::new(b"\xa9nam"), METADATA_TEXT_FLAG, b"abc")
            .encode(&mut buf)
            .unwrap();

        assert_eq!(
            buf,
            b"\0\0\0\x1b\xa9nam\0\0\0\x13data\0\0\0\x01\0\0\0\0abc"
        );
    }

    #[test]
    fn test_meta_hdlr() {
        let meta = Meta::new(&Context::default());

        let mut buf = Vec::new();
        meta.encode(&mut buf).unwrap();

        // meta header, then hdlr with the component type set even for mp4
        assert_eq!(&buf[16..20], b"hdlr");
        assert_eq!(&buf[24..32], b"mhlrmdir");
        assert_eq!(&buf[buf.len() - 8..], b"\0\0\0\x08ilst");
    }
}
