//! Opaque atoms attached to a sample entry: codec configuration, pixel aspect, color, etc.
//!
//! The muxer doesn't interpret these; it only needs to serialize them in order and,
//! for a few kinds, fill in bitrates once they are known.

mod audio;
mod btrt;
mod esds;
mod video;
mod wave;

pub use audio::*;
pub use btrt::*;
pub use esds::*;
pub use video::*;
pub use wave::*;

use std::fmt;

use crate::*;

/// An atom attached to a sample entry, stored as a trait object.
pub trait Extension: fmt::Debug {
    fn kind(&self) -> FourCC;

    fn encode_ext(&self, buf: &mut dyn BufMut) -> Result<()>;

    /// Fill in the average and maximum bitrate, when this atom carries them and they are still unset.
    fn update_bitrates(&mut self, _avg: u32, _max: u32) {}
}

impl Encode for Box<dyn Extension> {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.encode_ext(buf)
    }
}

impl<T: Extension + 'static> From<T> for Box<dyn Extension> {
    fn from(ext: T) -> Self {
        Box::new(ext)
    }
}

/// An atom with an arbitrary kind and an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAtom {
    pub kind: FourCC,
    pub data: Vec<u8>,
}

impl RawAtom {
    pub fn new(kind: FourCC, data: &[u8]) -> Self {
        Self {
            kind,
            data: data.to_vec(),
        }
    }
}

impl Extension for RawAtom {
    fn kind(&self) -> FourCC {
        self.kind
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        encode_atom(&mut buf, self.kind, |buf| {
            buf.append_slice(&self.data);
            Ok(())
        })
    }
}

/// An empty atom with a zero kind, closing a `wave` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Terminator;

impl Extension for Terminator {
    fn kind(&self) -> FourCC {
        FourCC::NULL
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        encode_atom(&mut buf, FourCC::NULL, |_| Ok(()))
    }
}

/// A bare zero size field closing a QuickTime video sample description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroSize;

impl Extension for ZeroSize {
    fn kind(&self) -> FourCC {
        FourCC::NULL
    }

    fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
        0u32.encode(&mut buf)
    }
}

/// A `uuid` atom: a 16-byte extended type followed by the payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uuid {
    pub uuid: [u8; 16],
    pub data: Vec<u8>,
}

impl Uuid {
    pub const XMP: [u8; 16] = [
        0xBE, 0x7A, 0xCF, 0xCB, 0x97, 0xA9, 0x42, 0xE8, 0x9C, 0x71, 0x99, 0x94, 0x91, 0xE3, 0xAF, 0xAC,
    ];
}

impl Atom for Uuid {
    const KIND: FourCC = FourCC::new(b"uuid");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.uuid.encode(buf)?;
        buf.append_slice(&self.data);
        Ok(())
    }
}

impl_extension!(Uuid);

/// Generic codec configuration, ex. `avcC` or `hvcC`, passed through verbatim.
pub fn codec_data(kind: FourCC, data: &[u8]) -> RawAtom {
    RawAtom::new(kind, data)
}

/// XMP metadata wrapped in a `uuid` atom.
pub fn uuid_xmp(xmp: &[u8]) -> Uuid {
    Uuid {
        uuid: Uuid::XMP,
        data: xmp.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ext: &dyn Extension) -> Vec<u8> {
        let mut buf = Vec::new();
        ext.encode_ext(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_raw_atom() {
        let raw = codec_data(FourCC::new(b"avcC"), &[1, 2]);
        assert_eq!(encode(&raw), b"\0\0\0\x0aavcC\x01\x02");
    }

    #[test]
    fn test_terminators() {
        assert_eq!(encode(&Terminator), [0, 0, 0, 8, 0, 0, 0, 0]);
        assert_eq!(encode(&ZeroSize), [0, 0, 0, 0]);
    }

    #[test]
    fn test_uuid_xmp() {
        let buf = encode(&uuid_xmp(b"<x/>"));
        assert_eq!(buf.len(), 8 + 16 + 4);
        assert_eq!(&buf[4..8], b"uuid");
        assert_eq!(&buf[8..24], &Uuid::XMP);
        assert_eq!(&buf[24..], b"<x/>");
    }
}
