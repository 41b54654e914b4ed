use crate::*;

/// Encode a type to a buffer.
//
// Every atom starts with its size, which isn't known until the body has been written.
// Using a BufMut that supports set_slice lets us write 0 for the size, encode the body, then go back and fix it.
pub trait Encode {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()>;
}

macro_rules! encode_be {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
                    self.to_be_bytes().encode(buf)
                }
            }
        )*
    };
}

encode_be!(u8, i8, u16, i16, u32, i32, u64, i64);

impl<const N: usize> Encode for [u8; N] {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.append_slice(self);
        Ok(())
    }
}

impl<T: Encode> Encode for &[T] {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        for item in self.iter() {
            item.encode(buf)?;
        }

        Ok(())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match self {
            Some(v) => v.encode(buf),
            None => Ok(()),
        }
    }
}

// NUL-terminated, as used by the ISO flavors.
impl Encode for &str {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.append_slice(self.as_bytes());
        0u8.encode(buf)?;
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        for item in self.iter() {
            item.encode(buf)?;
        }

        Ok(())
    }
}
