mod audio;
mod caption;
mod hint;
mod tmcd;
mod tx3g;
mod visual;

pub use audio::*;
pub use caption::*;
pub use hint::*;
pub use tmcd::*;
pub use tx3g::*;
pub use visual::*;

use crate::*;
use derive_more::From;

/// Sample descriptions, written in the order they were added.
#[derive(Debug, Default)]
pub struct Stsd {
    pub entries: Vec<SampleEntry>,
}

/// Called a "sample entry" in the ISOBMFF specification.
#[derive(Debug, From)]
pub enum SampleEntry {
    Audio(AudioSampleEntry),
    Visual(VisualSampleEntry),
    Subtitle(SubtitleSampleEntry),
    Timecode(TimecodeSampleEntry),
    Caption(CaptionSampleEntry),
    Hint(HintSampleEntry),
}

impl SampleEntry {
    pub fn kind(&self) -> FourCC {
        match self {
            Self::Audio(entry) => entry.kind,
            Self::Visual(entry) => entry.kind,
            Self::Subtitle(entry) => entry.kind,
            Self::Timecode(_) => TimecodeSampleEntry::KIND,
            Self::Caption(entry) => entry.kind,
            Self::Hint(entry) => entry.kind,
        }
    }

    /// Only audio and video entries carry extension atoms.
    pub fn extensions_mut(&mut self) -> Option<&mut Vec<Box<dyn Extension>>> {
        match self {
            Self::Audio(entry) => Some(&mut entry.extensions),
            Self::Visual(entry) => Some(&mut entry.extensions),
            _ => None,
        }
    }
}

impl Encode for SampleEntry {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match self {
            Self::Audio(entry) => entry.encode(buf),
            Self::Visual(entry) => entry.encode(buf),
            Self::Subtitle(entry) => entry.encode(buf),
            Self::Timecode(entry) => entry.encode(buf),
            Self::Caption(entry) => entry.encode(buf),
            Self::Hint(entry) => entry.encode(buf),
        }
    }
}

// The fields shared by every sample entry: six reserved bytes and the data reference index.
pub(crate) fn encode_sample_entry<B: BufMut>(buf: &mut B, data_reference_index: u16) -> Result<()> {
    [0u8; 6].encode(buf)?;
    data_reference_index.encode(buf)
}

impl Stsd {
    pub fn add_entry<T: Into<SampleEntry>>(&mut self, entry: T) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl AtomExt for Stsd {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"stsd");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;
        self.entries.encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stsd_order() {
        let mut stsd = Stsd::default();
        stsd.add_entry(CaptionSampleEntry::new(FourCC::new(b"c608")));
        stsd.add_entry(CaptionSampleEntry::new(FourCC::new(b"c708")));

        let mut buf = Vec::new();
        stsd.encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 48, b's', b't', b's', b'd', 0, 0, 0, 0, 0, 0, 0, 2,
            0, 0, 0, 16, b'c', b'6', b'0', b'8', 0, 0, 0, 0, 0, 0, 0, 1,
            0, 0, 0, 16, b'c', b'7', b'0', b'8', 0, 0, 0, 0, 0, 0, 0, 1,
        ];
        assert_eq!(buf, expected);
    }
}
