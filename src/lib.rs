//! sch2bob reads the NBT tag trees stored in MCEdit `.schematic` files and
//! projects them into the text based BOB2 format used by terrain generator
//! plugins.
//!
//! * For decoding NBT into an owned tree see [`de`] and [`NamedTag`].
//! * For looking up tags by name see [`NamedTag::find`].
//! * For the schematic to BOB projection see [`bob`].
//!
//! The input is expected to be already decompressed. Schematic files are
//! normally GZip compressed, so run them through `gunzip` first.
//!
//! # Quick example
//!
//! ```
//! use sch2bob::{bob, de::from_bytes};
//! # use sch2bob::error::Result;
//! # fn main() -> Result<()> {
//! # let buf = [
//! #     10, 0, 9, b'S', b'c', b'h', b'e', b'm', b'a', b't', b'i', b'c',
//! #     2, 0, 6, b'H', b'e', b'i', b'g', b'h', b't', 0, 1,
//! #     2, 0, 6, b'L', b'e', b'n', b'g', b't', b'h', 0, 1,
//! #     2, 0, 5, b'W', b'i', b'd', b't', b'h', 0, 2,
//! #     7, 0, 6, b'B', b'l', b'o', b'c', b'k', b's', 0, 0, 0, 2, 0, 5,
//! #     7, 0, 4, b'D', b'a', b't', b'a', 0, 0, 0, 2, 0, 3,
//! #     0,
//! # ];
//! let root = from_bytes(&buf)?;
//! let out = bob::to_bob(&root)?;
//!
//! assert!(String::from_utf8_lossy(&out).ends_with("[DATA]\n1,0,0:5.3\n"));
//! # Ok(())
//! # }
//! ```

pub mod bob;
pub mod de;
pub mod error;

mod input;
mod value;

pub use de::{from_bytes, from_reader, DecodeOpts};
pub use value::*;

#[cfg(test)]
mod test;

use serde::Serialize;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to u8.
    Byte = 1,
    /// Equivalent to u16.
    Short = 2,
    /// Equivalent to u32.
    Int = 3,
    /// Equivalent to u64.
    Long = 4,
    /// Equivalent to f32, stored in host byte order.
    Float = 5,
    /// Equivalent to f64, stored in host byte order.
    Double = 6,
    /// Represents as array of Byte (u8).
    ByteArray = 7,
    /// Represents a length prefixed string of bytes.
    String = 8,
    /// Represents a list of unnamed values all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
}

// Written out by hand so the catch-all arm is the only way an unknown byte
// can be handled, and a new variant has to be added here explicitly.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self, u8::from(*self))
    }
}
