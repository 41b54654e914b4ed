use crate::*;

ext! {
    name: Tfra,
    versions: [0, 1],
    flags: {}
}

/// Random access points for one track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tfra {
    pub track_id: u32,
    pub entries: Vec<TfraEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TfraEntry {
    pub time: u64,
    pub moof_offset: u64,
    pub traf_number: u32,
    pub trun_number: u32,
    pub sample_number: u32,
}

impl Tfra {
    pub fn new(track_id: u32) -> Self {
        Self {
            track_id,
            entries: Vec::new(),
        }
    }

    /// Record a sync sample; the fragment offset is filled in by [Tfra::update_offset].
    pub fn add_entry(&mut self, time: u64, sample_number: u32) {
        self.entries.push(TfraEntry {
            time,
            moof_offset: 0,
            traf_number: 1,
            trun_number: 1,
            sample_number,
        });
    }

    /// Set the offset of the fragment holding every entry that doesn't have one yet.
    pub fn update_offset(&mut self, offset: u64) {
        for entry in self.entries.iter_mut().rev() {
            if entry.moof_offset != 0 {
                break;
            }

            entry.moof_offset = offset;
        }
    }

    fn is_64bit(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.time > u32::MAX as u64 || entry.moof_offset > u32::MAX as u64)
    }

    // The number of bytes needed for each number, minus one.
    fn lengths(&self) -> (usize, usize, usize) {
        self.entries.iter().fold((0, 0, 0), |(traf, trun, sample), entry| {
            (
                traf.max(width(entry.traf_number)),
                trun.max(width(entry.trun_number)),
                sample.max(width(entry.sample_number)),
            )
        })
    }
}

fn width(value: u32) -> usize {
    (4 - value.leading_zeros() as usize / 8).max(1) - 1
}

impl AtomExt for Tfra {
    type Ext = TfraExt;

    const KIND_EXT: FourCC = FourCC::new(b"tfra");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<TfraExt> {
        let large = self.is_64bit();
        let (traf_len, trun_len, sample_len) = self.lengths();

        self.track_id.encode(buf)?;
        ((traf_len << 4 | trun_len << 2 | sample_len) as u32).encode(buf)?;
        (self.entries.len() as u32).encode(buf)?;

        for entry in self.entries.iter() {
            match large {
                true => {
                    entry.time.encode(buf)?;
                    entry.moof_offset.encode(buf)?;
                }
                false => {
                    (entry.time as u32).encode(buf)?;
                    (entry.moof_offset as u32).encode(buf)?;
                }
            }

            buf.append_slice(&entry.traf_number.to_be_bytes()[3 - traf_len..]);
            buf.append_slice(&entry.trun_number.to_be_bytes()[3 - trun_len..]);
            buf.append_slice(&entry.sample_number.to_be_bytes()[3 - sample_len..]);
        }

        Ok(match large {
            true => TfraVersion::V1,
            false => TfraVersion::V0,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(width(0), 0);
        assert_eq!(width(0xff), 0);
        assert_eq!(width(0x100), 1);
        assert_eq!(width(0x1_0000), 2);
        assert_eq!(width(u32::MAX), 3);
    }

    #[test]
    fn test_update_offset() {
        let mut tfra = Tfra::new(1);
        tfra.add_entry(0, 1);
        tfra.update_offset(100);
        tfra.add_entry(1000, 1);
        tfra.add_entry(2000, 30);
        tfra.update_offset(500);

        let offsets: Vec<u64> = tfra.entries.iter().map(|entry| entry.moof_offset).collect();
        assert_eq!(offsets, [100, 500, 500]);
    }

    #[test]
    fn test_tfra32() {
        let mut tfra = Tfra::new(2);
        tfra.add_entry(1000, 0x150);
        tfra.update_offset(48);

        let mut buf = Vec::new();
        tfra.encode(&mut buf).unwrap();

        assert_eq!(
            buf,
            b"\0\0\0\x24tfra\0\0\0\0\0\0\0\x02\0\0\0\x01\0\0\0\x01\0\0\x03\xe8\0\0\0\x30\x01\x01\x01\x50"
        );
    }

    #[test]
    fn test_tfra64() {
        let mut tfra = Tfra::new(1);
        tfra.add_entry(10, 1);
        tfra.add_entry(u32::MAX as u64 + 1, 2);

        let mut buf = Vec::new();
        tfra.encode(&mut buf).unwrap();

        // Every entry switches to 64-bit times and offsets.
        assert_eq!(buf[8], 1);
        assert_eq!(buf.len(), 24 + 2 * (16 + 3));
        assert_eq!(&buf[24..32], b"\0\0\0\0\0\0\0\x0a");
    }
}
