use std::io::Read;

use byteorder::{BigEndian, NativeEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    NbtString, Tag,
};

/// Reads the primitive pieces of NBT from any `Read`. Integers and length
/// prefixes are big endian. Floats and doubles are read in host byte order,
/// which is how schematic writers of this lineage stored them.
pub(crate) struct Input<R> {
    reader: R,
}

impl<R: Read> Input<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    pub fn consume_u16(&mut self) -> Result<u16> {
        Ok(self.reader.read_u16::<BigEndian>()?)
    }

    pub fn consume_u32(&mut self) -> Result<u32> {
        Ok(self.reader.read_u32::<BigEndian>()?)
    }

    pub fn consume_u64(&mut self) -> Result<u64> {
        Ok(self.reader.read_u64::<BigEndian>()?)
    }

    pub fn consume_f32(&mut self) -> Result<f32> {
        Ok(self.reader.read_f32::<NativeEndian>()?)
    }

    pub fn consume_f64(&mut self) -> Result<f64> {
        Ok(self.reader.read_f64::<NativeEndian>()?)
    }

    pub fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::unknown_tag(tag))
    }

    /// A u16 byte count followed by that many bytes. The bytes are kept as
    /// they are, with no unicode check.
    pub fn consume_str(&mut self) -> Result<NbtString> {
        let len = self.consume_u16()?;
        Ok(NbtString::from(self.consume_bytes(len as usize)?))
    }

    /// A u32 byte count followed by that many bytes.
    pub fn consume_byte_array(&mut self, max_len: u32) -> Result<Vec<u8>> {
        let len = self.consume_u32()?;
        if len > max_len {
            return Err(Error::seq_too_long(len));
        }
        self.consume_bytes(len as usize)
    }

    /// Reads exactly `n` bytes. The buffer grows with the data actually read,
    /// so a bogus length in the input can't force a huge allocation up front.
    fn consume_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.reader).take(n as u64).read_to_end(&mut buf)?;

        if buf.len() != n {
            return Err(Error::truncated());
        }
        Ok(buf)
    }
}
