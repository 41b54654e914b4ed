use crate::*;

/// Composition time offsets, run-length encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ctts {
    pub entries: Vec<CttsEntry>,

    /// Set once any offset is non-zero; the atom is only written if so.
    pub do_pts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CttsEntry {
    pub sample_count: u32,
    pub sample_offset: i32,
}

impl Ctts {
    pub fn add_entry(&mut self, nsamples: u32, offset: i32) {
        match self.entries.last_mut() {
            Some(last) if last.sample_offset == offset => last.sample_count += nsamples,
            _ => {
                self.entries.push(CttsEntry {
                    sample_count: nsamples,
                    sample_offset: offset,
                });

                if offset != 0 {
                    self.do_pts = true;
                }
            }
        }
    }
}

impl AtomExt for Ctts {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"ctts");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        (self.entries.len() as u32).encode(buf)?;
        for entry in self.entries.iter() {
            entry.sample_count.encode(buf)?;
            entry.sample_offset.encode(buf)?;
        }

        Ok(())
    }
}
