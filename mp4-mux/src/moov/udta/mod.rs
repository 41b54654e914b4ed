mod meta;

pub use meta::*;

use crate::*;

// Tags written by the 3GPP helpers use this language.
const DEFAULT_TAG_LANGUAGE: &str = "eng";

/// User data: the tag list of a movie or a track.
///
/// 3GPP files store tags directly in `udta`, everything else nests them in `meta/ilst`.
/// Only written when at least one tag was added.
#[derive(Debug)]
pub struct Udta {
    pub flavor: Flavor,
    pub meta: Option<Meta>,

    // Tags outside of meta, ex. 3GPP tags and XMP.
    pub entries: Vec<Box<dyn Extension>>,
}

impl Udta {
    pub fn new(ctx: &Context) -> Self {
        Self {
            flavor: ctx.flavor,
            meta: (ctx.flavor != Flavor::ThreeGp).then(|| Meta::new(ctx)),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        let ilst_empty = self.meta.as_ref().map_or(true, |meta| meta.ilst.entries.is_empty());
        self.entries.is_empty() && ilst_empty
    }

    fn append_tag(&mut self, tag: Box<dyn Extension>) {
        match &mut self.meta {
            Some(meta) => meta.ilst.entries.push(tag),
            None => self.entries.push(tag),
        }
    }

    /// Add a tag with a raw payload.
    pub fn add_tag(&mut self, kind: FourCC, flags: u32, data: &[u8]) {
        self.append_tag(Tag::new(kind, flags, data).into());
    }

    /// Add a UTF-8 text tag. Empty strings are skipped.
    pub fn add_str_tag(&mut self, kind: FourCC, value: &str) {
        if value.is_empty() {
            tracing::debug!(%kind, "skipping empty string tag");
            return;
        }

        self.add_tag(kind, METADATA_TEXT_FLAG, value.as_bytes());
    }

    /// Add an integer tag.
    ///
    /// With flags the value is written as 16 bits, otherwise as a track/disc style pair
    /// padded to 8 bytes.
    pub fn add_uint_tag(&mut self, kind: FourCC, flags: u32, value: u32) {
        if flags != 0 {
            self.add_tag(kind, flags, &(value as u16).to_be_bytes());
        } else {
            let mut data = [0u8; 8];
            data[2..6].copy_from_slice(&value.to_be_bytes());
            self.add_tag(kind, flags, &data);
        }
    }

    /// Add an already serialized atom, re-wrapping the payload after its header.
    pub fn add_blob_tag(&mut self, blob: &[u8]) -> Result<()> {
        let (header, _) = blob.split_first_chunk::<8>().ok_or(Error::InvalidBlob)?;

        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        if len < 8 || len > blob.len() {
            tracing::warn!(len, size = blob.len(), "ignoring invalid blob tag");
            return Err(Error::InvalidBlob);
        }

        let kind = FourCC::new(&[header[4], header[5], header[6], header[7]]);
        self.append_tag(RawAtom::new(kind, &blob[8..len]).into());

        Ok(())
    }

    /// Add a 3GPP asset tag, a full atom wrapping the payload.
    pub fn add_3gp_tag(&mut self, kind: FourCC, data: &[u8]) {
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(data);
        self.append_tag(RawAtom::new(kind, &payload).into());
    }

    /// Add a 3GPP tag holding a language and a string, and optionally an integer.
    ///
    /// Standalone integers are written as 16 bits, trailing a string as 8 bits.
    pub fn add_3gp_str_int_tag(&mut self, kind: FourCC, value: Option<&str>, ivalue: Option<u16>) {
        let mut data = Vec::new();

        if let Some(value) = value {
            let lang = language_code(DEFAULT_TAG_LANGUAGE).unwrap_or_default();
            data.extend_from_slice(&lang.to_be_bytes());
            data.extend_from_slice(value.as_bytes());
            data.push(0);
        }

        match (value, ivalue) {
            (None, Some(ivalue)) => data.extend_from_slice(&ivalue.to_be_bytes()),
            (Some(_), Some(ivalue)) => data.push(ivalue as u8),
            _ => {}
        }

        self.add_3gp_tag(kind, &data);
    }

    pub fn add_3gp_str_tag(&mut self, kind: FourCC, value: &str) {
        self.add_3gp_str_int_tag(kind, Some(value), None);
    }

    pub fn add_3gp_uint_tag(&mut self, kind: FourCC, value: u16) {
        self.add_3gp_str_int_tag(kind, None, Some(value));
    }

    /// Attach an XMP packet, only supported by QuickTime.
    pub fn add_xmp_tags(&mut self, xmp: &[u8]) {
        if !self.flavor.is_mov() {
            tracing::debug!(flavor = ?self.flavor, "not adding XMP, only used by QuickTime");
            return;
        }

        self.entries.push(RawAtom::new(FourCC::new(b"XMP_"), xmp).into());
    }

    /// Remove every tag, keeping the layout.
    pub fn clear_tags(&mut self) {
        self.entries.clear();
        if let Some(meta) = &mut self.meta {
            meta.ilst.entries.clear();
        }
    }
}

impl Atom for Udta {
    const KIND: FourCC = FourCC::new(b"udta");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        if let Some(meta) = self.meta.as_ref().filter(|meta| !meta.ilst.entries.is_empty()) {
            meta.encode(buf)?;
        }

        self.entries.encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(udta: &Udta) -> Vec<u8> {
        let mut buf = Vec::new();
        udta.encode(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_udta_ilst() {
        let mut udta = Udta::new(&Context::default());
        assert!(udta.is_empty());

        udta.add_str_tag(FourCC::new(b"\xa9nam"), "");
        assert!(udta.is_empty());

        udta.add_str_tag(FourCC::new(b"\xa9nam"), "Title");
        assert!(!udta.is_empty());
        assert!(udta.entries.is_empty());

        let buf = encode(&udta);
        assert_eq!(&buf[12..16], b"meta");
        assert!(buf.windows(4).any(|w| w == b"ilst"));
        assert!(buf.ends_with(b"Title"));

        udta.clear_tags();
        assert!(udta.is_empty());
    }

    #[test]
    fn test_udta_3gp() {
        let mut udta = Udta::new(&Context::new(Flavor::ThreeGp, false));
        udta.add_3gp_str_tag(FourCC::new(b"titl"), "ab");
        udta.add_3gp_uint_tag(FourCC::new(b"yrrc"), 2024);
        udta.add_3gp_str_int_tag(FourCC::new(b"albm"), Some("c"), Some(7));

        let buf = encode(&udta);
        assert_eq!(&buf[4..8], b"udta");

        // version/flags, language, string with terminator
        assert_eq!(&buf[8..25], b"\0\0\0\x11titl\0\0\0\0\x15\xc7ab\0");
        assert_eq!(&buf[25..39], b"\0\0\0\x0eyrrc\0\0\0\0\x07\xe8");
        assert_eq!(&buf[39..], b"\0\0\0\x11albm\0\0\0\0\x15\xc7c\0\x07");
    }

    #[test]
    fn test_uint_tag() {
        let mut udta = Udta::new(&Context::new(Flavor::ThreeGp, false));
        udta.add_uint_tag(FourCC::new(b"trkn"), 0, 3);
        udta.add_uint_tag(FourCC::new(b"tmpo"), 0x15, 120);

        let buf = encode(&udta);
        assert!(buf[8..].starts_with(b"\0\0\0\x20trkn"));
        assert_eq!(&buf[32..40], b"\0\0\0\0\0\x03\0\0");
        assert!(buf.ends_with(b"\0\0\0\x15\0\0\0\0\0\x78"));
    }

    #[test]
    fn test_blob_tag() {
        let mut udta = Udta::new(&Context::default());
        udta.add_blob_tag(b"\0\0\0\x0bcprt\x01\x02\x03").unwrap();

        assert!(matches!(udta.add_blob_tag(b"\0\0\0"), Err(Error::InvalidBlob)));
        assert!(matches!(
            udta.add_blob_tag(b"\0\0\0\x20cprt\x01"),
            Err(Error::InvalidBlob)
        ));

        let meta = udta.meta.as_ref().unwrap();
        assert_eq!(meta.ilst.entries.len(), 1);
        assert_eq!(meta.ilst.entries[0].kind(), FourCC::new(b"cprt"));
    }

    #[test]
    fn test_xmp_mov_only() {
        let mut udta = Udta::new(&Context::default());
        udta.add_xmp_tags(b"<x/>");
        assert!(udta.is_empty());

        let mut udta = Udta::new(&Context::new(Flavor::Mov, false));
        udta.add_xmp_tags(b"<x/>");

        let buf = encode(&udta);
        assert_eq!(&buf[8..], b"\0\0\0\x0cXMP_<x/>");
    }
}
