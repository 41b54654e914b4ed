use crate::*;

/// Handler reference.
///
/// QuickTime fills in the component type and writes the name as a Pascal string,
/// everybody else leaves the component type zeroed and NUL-terminates the name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hdlr {
    pub component_type: FourCC,
    pub handler_type: FourCC,
    pub manufacturer: FourCC,
    pub flags: u32,
    pub flags_mask: u32,
    pub name: String,
    pub flavor: Flavor,
}

impl Hdlr {
    pub fn new(ctx: &Context) -> Self {
        Self {
            flavor: ctx.flavor,
            ..Default::default()
        }
    }

    /// The data handler QuickTime expects inside `minf`.
    pub fn data(ctx: &Context) -> Self {
        Self {
            component_type: FourCC::new(b"dhlr"),
            handler_type: FourCC::new(b"alis"),
            ..Self::new(ctx)
        }
    }

    /// The component type is only recorded for QuickTime.
    pub fn set_type(&mut self, component_type: FourCC, handler_type: FourCC) {
        if self.flavor.is_mov() {
            self.component_type = component_type;
        }
        self.handler_type = handler_type;
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl AtomExt for Hdlr {
    type Ext = ();

    const KIND_EXT: FourCC = FourCC::new(b"hdlr");

    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        self.component_type.encode(buf)?;
        self.handler_type.encode(buf)?;
        self.manufacturer.encode(buf)?;
        self.flags.encode(buf)?;
        self.flags_mask.encode(buf)?;

        match self.flavor {
            Flavor::Mov => PascalString::from(self.name.as_str()).encode(buf)?,
            _ => self.name.as_str().encode(buf)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdlr_isom() {
        let mut hdlr = Hdlr::new(&Context::default());
        hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"vide"));
        hdlr.set_name("VideoHandler");

        let mut buf = Vec::new();
        hdlr.encode(&mut buf).unwrap();

        assert_eq!(&buf[12..16], b"\0\0\0\0");
        assert_eq!(&buf[16..20], b"vide");
        assert_eq!(&buf[32..], b"VideoHandler\0");
    }

    #[test]
    fn test_hdlr_mov() {
        let mut hdlr = Hdlr::new(&Context::new(Flavor::Mov, false));
        hdlr.set_type(FourCC::new(b"mhlr"), FourCC::new(b"soun"));
        hdlr.set_name("SoundHandler");

        let mut buf = Vec::new();
        hdlr.encode(&mut buf).unwrap();

        assert_eq!(&buf[12..20], b"mhlrsoun");
        assert_eq!(&buf[32..], b"\x0cSoundHandler");
    }

    #[test]
    fn test_hdlr_data() {
        let mut buf = Vec::new();
        Hdlr::data(&Context::new(Flavor::Mov, false))
            .encode(&mut buf)
            .unwrap();

        assert_eq!(buf.len(), 33);
        assert_eq!(&buf[12..20], b"dhlralis");
        assert_eq!(buf[32], 0);
    }
}
