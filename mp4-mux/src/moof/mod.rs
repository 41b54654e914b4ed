mod mfhd;
mod traf;

pub use mfhd::*;
pub use traf::*;

use crate::*;

/// A movie fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moof {
    pub mfhd: Mfhd,
    pub traf: Vec<Traf>,

    base_offset: u64,
}

impl Moof {
    pub fn new(sequence_number: u32) -> Self {
        Self {
            mfhd: Mfhd { sequence_number },
            ..Default::default()
        }
    }

    pub fn add_traf(&mut self, traf: Traf) {
        self.traf.push(traf);
    }

    pub fn traf_mut(&mut self, track_id: u32) -> Option<&mut Traf> {
        self.traf.iter_mut().find(|traf| traf.track_id() == track_id)
    }

    /// Write an explicit base data offset in every track fragment.
    ///
    /// Only tracks that exist at the time of the call are updated.
    pub fn set_base_offset(&mut self, offset: u64) {
        if offset == self.base_offset {
            return;
        }

        for traf in self.traf.iter_mut() {
            traf.tfhd.base_data_offset = Some(offset);
        }

        self.base_offset = offset;
    }
}

impl Atom for Moof {
    const KIND: FourCC = FourCC::new(b"moof");

    nested! {
        required: [ Mfhd ],
        optional: [],
        multiple: [ Traf ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_offset() {
        let ctx = Context::default();
        let mut moof = Moof::new(3);
        moof.add_traf(Traf::new(&ctx, 1));
        moof.add_traf(Traf::new(&ctx, 2));

        moof.set_base_offset(0);
        assert!(moof.traf.iter().all(|traf| traf.tfhd.base_data_offset.is_none()));

        moof.set_base_offset(1024);
        assert!(moof.traf.iter().all(|traf| traf.tfhd.base_data_offset == Some(1024)));
        assert!(moof.traf_mut(2).is_some());
    }

    #[test]
    fn test_moof() {
        let ctx = Context::default();
        let mut moof = Moof::new(1);

        let mut traf = Traf::new(&ctx, 1);
        traf.set_base_decode_time(1024);
        for _ in 0..3 {
            traf.add_samples(1, 1024, 300, 0, true, 0, true);
        }
        moof.add_traf(traf);

        let mut buf = Vec::new();
        moof.encode(&mut buf).unwrap();

        let expected = [
            // moof
            b"\0\0\0\x5cmoof".as_slice(),
            b"\0\0\0\x10mfhd\0\0\0\0\0\0\0\x01",
            // traf
            b"\0\0\0\x44traf",
            b"\0\0\0\x1ctfhd\0\0\0\x38\0\0\0\x01\0\0\x04\0\0\0\x01\x2c\0\0\0\x40",
            b"\0\0\0\x10tfdt\0\0\0\0\0\0\x04\0",
            b"\0\0\0\x10trun\0\0\0\0\0\0\0\x03",
        ]
        .concat();

        assert_eq!(buf, expected);
    }
}
