use crate::*;

ext! {
    name: Trun,
    versions: [0, 1],
    flags: {
        data_offset = 0,
        first_sample_flags = 2,
        sample_duration = 8,
        sample_size = 9,
        sample_flags = 10,
        sample_cts = 11,
    }
}

/// A run of contiguous samples.
///
/// Every entry keeps all of its values; the `sample_*` switches pick which
/// of them are written, the rest come from the [Tfhd] defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trun {
    /// Relative to the base offset, written when non-zero.
    pub data_offset: i32,

    pub first_sample_flags: u32,
    pub entries: Vec<TrunEntry>,

    pub has_first_sample_flags: bool,
    pub sample_duration: bool,
    pub sample_size: bool,
    pub sample_flags: bool,
    pub sample_cts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrunEntry {
    pub duration: u32,
    pub size: u32,
    pub flags: u32,
    pub cts: i32,
}

impl Trun {
    pub fn new(data_offset: i32, first_sample_flags: u32) -> Self {
        Self {
            data_offset,
            first_sample_flags,
            ..Default::default()
        }
    }

    /// Returns true if samples at `data_offset` continue this run.
    ///
    /// An offset of zero always continues.
    pub fn can_append(&self, data_offset: i32) -> bool {
        if data_offset == 0 {
            return true;
        }

        let end = self.entries.iter().fold(self.data_offset as i64, |end, entry| end + entry.size as i64);
        end == data_offset as i64
    }

    pub fn add_samples(&mut self, nsamples: u32, delta: u32, size: u32, flags: u32, pts_offset: i64) {
        if pts_offset != 0 {
            self.sample_cts = true;
        }

        for i in 0..nsamples {
            let cts = match pts_offset {
                0 => 0,
                offset => (offset + i as i64 * delta as i64) as i32,
            };

            self.entries.push(TrunEntry {
                duration: delta,
                size,
                flags,
                cts,
            });
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.entries.len() as u32
    }
}

impl AtomExt for Trun {
    const KIND_EXT: FourCC = FourCC::new(b"trun");

    type Ext = TrunExt;

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<TrunExt> {
        // Negative composition offsets need the signed version.
        let version = match self.sample_cts && self.entries.iter().any(|entry| entry.cts < 0) {
            true => TrunVersion::V1,
            false => TrunVersion::V0,
        };

        let ext = TrunExt {
            version,
            data_offset: self.data_offset != 0,
            first_sample_flags: self.has_first_sample_flags,
            sample_duration: self.sample_duration,
            sample_size: self.sample_size,
            sample_flags: self.sample_flags,
            sample_cts: self.sample_cts,
        };

        self.sample_count().encode(buf)?;

        ext.data_offset.then_some(self.data_offset).encode(buf)?;
        ext.first_sample_flags.then_some(self.first_sample_flags).encode(buf)?;

        for entry in &self.entries {
            ext.sample_duration.then_some(entry.duration).encode(buf)?;
            ext.sample_size.then_some(entry.size).encode(buf)?;
            ext.sample_flags.then_some(entry.flags).encode(buf)?;
            ext.sample_cts.then_some(entry.cts).encode(buf)?;
        }

        Ok(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_append() {
        let mut trun = Trun::new(100, 0);
        trun.add_samples(2, 512, 50, 0, 0);

        assert!(trun.can_append(0));
        assert!(trun.can_append(200));
        assert!(!trun.can_append(150));
    }

    #[test]
    fn test_trun_minimal() {
        let mut trun = Trun::new(0, 0);
        trun.add_samples(3, 512, 100, 0, 0);

        let mut buf = Vec::new();
        trun.encode(&mut buf).unwrap();

        assert_eq!(buf, b"\0\0\0\x10trun\0\0\0\0\0\0\0\x03");
    }

    #[test]
    fn test_trun_fields() {
        let mut trun = Trun::new(8, 0x40);
        trun.add_samples(2, 512, 100, 0x10000, -1024);
        trun.has_first_sample_flags = true;
        trun.sample_size = true;

        let mut buf = Vec::new();
        trun.encode(&mut buf).unwrap();

        // data offset, first sample flags, then size and cts per sample
        assert_eq!(&buf[8..12], b"\x01\0\x0a\x05");
        assert_eq!(
            &buf[12..],
            b"\0\0\0\x02\0\0\0\x08\0\0\0\x40\0\0\0\x64\xff\xff\xfc\0\0\0\0\x64\xff\xff\xfe\0"
        );
    }
}
