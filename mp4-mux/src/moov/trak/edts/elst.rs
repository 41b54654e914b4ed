use crate::*;

/// Edit list, always written with 32-bit fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Elst {
    pub entries: Vec<ElstEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElstEntry {
    /// In the movie timescale.
    pub segment_duration: u32,
    /// In the media timescale, or -1 (all ones) for an empty edit.
    pub media_time: u32,
    /// 16.16 fixed point.
    pub media_rate: u32,
}

impl Elst {
    /// Replace the entry at `index`, or insert it if the list is shorter.
    pub fn set_entry(&mut self, index: usize, entry: ElstEntry) {
        match self.entries.get_mut(index) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

impl AtomExt for Elst {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"elst");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;

        for entry in &self.entries {
            entry.segment_duration.encode(buf)?;
            entry.media_time.encode(buf)?;
            entry.media_rate.encode(buf)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elst() {
        let mut elst = Elst::default();
        let edit = ElstEntry {
            segment_duration: 1000,
            media_time: 0,
            media_rate: 0x10000,
        };

        // Past the end appends.
        elst.set_entry(5, edit);
        elst.set_entry(
            0,
            ElstEntry {
                segment_duration: 2000,
                ..edit
            },
        );
        elst.set_entry(1, edit);

        assert_eq!(elst.entries.len(), 2);
        assert_eq!(elst.entries[0].segment_duration, 2000);

        let mut buf = Vec::new();
        elst.encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 16 + 2 * 12);
        assert_eq!(&buf[16..28], b"\0\0\x07\xd0\0\0\0\0\0\x01\0\0");
    }
}
