//! # mp4-mux
//!
//! This library builds the atom tree of an ISO Base Media File (ISO/IEC 14496-12) or a
//! QuickTime movie while media is being muxed, then serializes it.
//! It only writes: samples are described through the tree, the media bytes are written by the caller.
//!
//! ## Atoms
//! A file is a sequence of atoms, each with an upfront size and a FourCC code.
//! The top level ones are [Ftyp], [Moov], [Moof], [Mfra] and [Mdat].
//!
//! Sizes are not known upfront, so every atom is encoded into a [BufMut] with a placeholder
//! that is patched once the children have been written.
//!
//! ## Building a movie
//! A [Context] picks the container [Flavor]; it decides the small differences between mp4, mov, 3gp
//! and smooth streaming files. A [Trak] is typed with one of the `set_*_type` methods, samples are
//! recorded with [Trak::add_samples], and [Moov::update_duration] computes the durations before
//! the [Moov] is written.
//!
//! ```rust
//! use mp4_mux::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = Context::new(Flavor::Isom, false);
//!
//! let mut trak = Trak::new(&ctx);
//! trak.set_audio_type(AudioSampleEntry::default(), 48000, None, 0);
//!
//! // Two chunks of ten 1024 sample frames.
//! trak.add_samples(10, 1024, 371, 0, true, 0);
//! trak.add_samples(10, 1024, 371, 3710, true, 0);
//!
//! let mut moov = Moov::new(&ctx);
//! moov.add_trak(trak);
//! moov.update_duration();
//!
//! let mut buf = Vec::new();
//! Ftyp::new(b"isom".into(), 0x200, &[b"isom".into(), b"mp41".into()]).encode(&mut buf)?;
//!
//! // Media data follows the ftyp header; chunk offsets were relative to it.
//! moov.chunks_set_offset(buf.len() as u64 + 8);
//! mdat_header(&mut buf, 7420)?;
//! buf.extend_from_slice(&[0u8; 7420]);
//!
//! moov.write_to(&mut buf)?;
//! # Ok(()) }
//! ```
//!
//! ## Fragments
//! A fragmented file marks the [Moov] with [Moov::set_fragmented] and writes the samples in
//! [Moof] atoms instead, each with a [Traf] per track. A [Mfra] at the end indexes the sync samples.

mod atom;
mod atom_ext;
mod buf;
mod coding;
mod error;
mod extension;
mod flavor;
mod ftyp;
mod io;
mod mdat;
mod mfra;
mod moof;
mod moov;
mod time;
mod types;

pub use atom::*;
pub(crate) use atom_ext::*;
pub use buf::*;
pub use coding::*;
pub use error::*;
pub use extension::*;
pub use flavor::*;
pub use ftyp::*;
pub use io::*;
pub use mdat::*;
pub use mfra::*;
pub use moof::*;
pub use moov::*;
pub use time::*;
pub use types::*;
