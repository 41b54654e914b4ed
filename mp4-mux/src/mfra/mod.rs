mod tfra;

pub use tfra::*;

use crate::*;

/// The random access index, written at the end of a fragmented file.
///
/// The trailing `mfro` carries the size of the whole `mfra` so readers can find it
/// from the end of the file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mfra {
    pub tfra: Vec<Tfra>,
}

impl Mfra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tfra(&mut self, tfra: Tfra) {
        self.tfra.push(tfra);
    }

    pub fn tfra_mut(&mut self, track_id: u32) -> Option<&mut Tfra> {
        self.tfra.iter_mut().find(|tfra| tfra.track_id == track_id)
    }
}

impl Atom for Mfra {
    const KIND: FourCC = FourCC::new(b"mfra");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        // The header was already written.
        let start = buf.len() - 8;

        self.tfra.encode(buf)?;

        let size = (buf.len() - start + Mfro::SIZE)
            .try_into()
            .map_err(|_| Error::TooLarge(Self::KIND))?;

        Mfro { size }.encode(buf)
    }
}

/// Movie fragment random access offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mfro {
    pub size: u32,
}

impl Mfro {
    const SIZE: usize = 16;
}

impl AtomExt for Mfro {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"mfro");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.size.encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut buf = Vec::new();
        Mfra::new().encode(&mut buf).unwrap();

        assert_eq!(buf, b"\0\0\0\x18mfra\0\0\0\x10mfro\0\0\0\0\0\0\0\x18");
    }

    #[test]
    fn test_mfro_size() {
        let mut mfra = Mfra::new();
        mfra.add_tfra(Tfra::new(1));
        mfra.add_tfra(Tfra::new(2));

        mfra.tfra_mut(2).unwrap().add_entry(0, 1);
        mfra.tfra_mut(2).unwrap().update_offset(1234);

        let mut buf = Vec::new();
        mfra.encode(&mut buf).unwrap();

        let size = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        assert_eq!(size as usize, buf.len());
        assert_eq!(&buf[buf.len() - 4..], &size.to_be_bytes());
    }
}
