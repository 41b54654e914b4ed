use crate::*;

/// Track aperture modes: clean, production and encoded pixel dimensions.
///
/// Each dimension is 16.16 fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tapt {
    pub clean: (u32, u32),
    pub production: (u32, u32),
    pub encoded: (u32, u32),
}

impl Atom for Tapt {
    const KIND: FourCC = FourCC::new(b"tapt");

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        let modes = [
            (b"clef", self.clean),
            (b"prof", self.production),
            (b"enof", self.encoded),
        ];

        for (kind, (width, height)) in modes {
            encode_atom_full(buf, FourCC::new(kind), 0, 0, |buf| {
                width.encode(buf)?;
                height.encode(buf)
            })?;
        }

        Ok(())
    }
}

pub fn tapt(
    clef_width: u32,
    clef_height: u32,
    prof_width: u32,
    prof_height: u32,
    enof_width: u32,
    enof_height: u32,
) -> Tapt {
    Tapt {
        clean: (clef_width, clef_height),
        production: (prof_width, prof_height),
        encoded: (enof_width, enof_height),
    }
}
