use crate::*;

// Combine the version and flags into a single struct
// We use a special trait to ensure it's always a u32
pub(crate) trait Ext: Default {
    fn encode(&self) -> Result<u32>;
}

// Rather than encoding the header in every atom, use this trait.
pub(crate) trait AtomExt: Sized {
    const KIND_EXT: FourCC;

    // One day default associated types will be a thing, then this can be ()
    type Ext: Ext;

    // Returns the version/flags, which usually depend on the body that was written.
    fn encode_body_ext<B: BufMut>(&self, buf: &mut B) -> Result<Self::Ext>;
}

impl<T: AtomExt> Atom for T {
    const KIND: FourCC = Self::KIND_EXT;

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        // Reserve space for the version/flags first
        let start = buf.len();
        0u32.encode(buf)?;

        let ext = self.encode_body_ext(buf)?;

        // Go back and update the version/flags
        let header = ext.encode()?;
        buf.set_slice(start, &header.to_be_bytes());

        Ok(())
    }
}

// Some atoms don't have any version/flags, so we provide a default implementation
impl Ext for () {
    fn encode(&self) -> Result<u32> {
        Ok(0)
    }
}

// Here's a macro to make life easier:
/* input:
ext! {
    name: Tfhd,
    versions: [0],
    flags: {
        base_data_offset = 0,
        default_sample_duration = 3,
    }
}

output:
enum TfhdVersion {
    V0 = 0,
}

struct TfhdExt {
    pub version: TfhdVersion,
    pub base_data_offset: bool,
    pub default_sample_duration: bool,
}
*/

macro_rules! ext {
    (name: $name:ident, versions: [$($version:expr),*], flags: { $($flag:ident = $bit:expr,)* }) => {
        paste::paste! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            #[allow(dead_code)]
            pub(crate) enum [<$name Version>] {
                $(
                    [<V $version>] = $version,
                )*
            }

            impl Default for [<$name Version>] {
                // Returns the first version in the list
                #[allow(unreachable_code)]
                fn default() -> Self {
                    $(
                        return Self::[<V $version>];
                    )*
                }
            }

            #[derive(Debug, Clone, PartialEq, Eq, Default)]
            pub(crate) struct [<$name Ext>] {
                pub version: [<$name Version>],
                $(
                    pub $flag: bool,
                )*
            }

            impl Ext for [<$name Ext>] {
                fn encode(&self) -> Result<u32>{
                    Ok((self.version as u32) << 24 $(| (self.$flag as u32) << $bit)*)
                }
            }

            // Helper when there are no flags
            impl From<[<$name Version>]> for [<$name Ext>] {
                fn from(version: [<$name Version>]) -> Self {
                    // Not using ..Default::default() to avoid Clippy
                    let mut ext = Self::default();
                    ext.version = version;
                    ext
                }
            }
        }
    };
}

pub(crate) use ext;
