use crate::*;

/// A helper to encode a known atom type.
pub trait Atom: Sized {
    const KIND: FourCC;

    fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()>;
}

impl<T: Atom> Encode for T {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        encode_atom(buf, T::KIND, |buf| self.encode_body(buf))
    }
}

/// Encode an atom whose kind is only known at runtime.
///
/// The body closure appends the payload; the size field is patched afterwards.
pub fn encode_atom<B, F>(buf: &mut B, kind: FourCC, body: F) -> Result<()>
where
    B: BufMut,
    F: FnOnce(&mut B) -> Result<()>,
{
    let start = buf.len();

    // Encode a 0 for the size, we'll come back to it later
    0u32.encode(buf)?;
    kind.encode(buf)?;
    body(buf)?;

    // Update the size field
    let size: u32 = (buf.len() - start)
        .try_into()
        .map_err(|_| Error::TooLarge(kind))?;

    buf.set_slice(start, &size.to_be_bytes());

    Ok(())
}

/// Same as [encode_atom] but for a full atom with the given version and 24-bit flags.
pub fn encode_atom_full<B, F>(buf: &mut B, kind: FourCC, version: u8, flags: u32, body: F) -> Result<()>
where
    B: BufMut,
    F: FnOnce(&mut B) -> Result<()>,
{
    encode_atom(buf, kind, |buf| {
        ((version as u32) << 24 | (flags & 0x00ff_ffff)).encode(buf)?;
        body(buf)
    })
}

// A helper for generating nested atoms.
/* example:
nested! {
    required: [ Mfhd ],
    optional: [ ],
    multiple: [ Traf ],
};
*/

macro_rules! nested {
    (required: [$($required:ident),*$(,)?], optional: [$($optional:ident),*$(,)?], multiple: [$($multiple:ident),*$(,)?],) => {
        paste::paste! {
            fn encode_body<B: BufMut>(&self, buf: &mut B) -> Result<()> {
                $( self.[<$required:lower>].encode(buf)?; )*
                $( self.[<$optional:lower>].encode(buf)?; )*
                $( self.[<$multiple:lower>].encode(buf)?; )*

                Ok(())
            }
        }
    };
}

pub(crate) use nested;

// Implement Extension for atoms that carry no bitrate fields.
macro_rules! impl_extension {
    ($($name:ident),*$(,)?) => {
        $(
            impl Extension for $name {
                fn kind(&self) -> FourCC {
                    Self::KIND
                }

                fn encode_ext(&self, mut buf: &mut dyn BufMut) -> Result<()> {
                    self.encode(&mut buf)
                }
            }
        )*
    };
}

pub(crate) use impl_extension;
