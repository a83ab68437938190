//! Decoding NBT into an owned [`NamedTag`] tree.
//!
//! The format is a single named tag, almost always a compound, whose payload
//! may nest lists and compounds to any depth. The decoder never recurses:
//! it keeps an explicit stack of the lists and compounds it is inside of, so
//! hostile input can at worst hit the [`DecodeOpts::max_depth`] limit rather
//! than overflow the thread's stack.
//!
//! Decoding is all or nothing. Any error aborts the whole tree.
//!
//! ```
//! use sch2bob::{from_bytes, Value};
//! # use sch2bob::error::Result;
//! # fn main() -> Result<()> {
//! // Compound "" { Int "X": 42 }
//! let buf = [10, 0, 0, 3, 0, 1, b'X', 0, 0, 0, 42, 0];
//! let root = from_bytes(&buf)?;
//!
//! assert_eq!(root.find("X").unwrap().value, Value::Int(42));
//! # Ok(())
//! # }
//! ```

use std::io::Read;

use log::debug;

use crate::error::{Error, Result};
use crate::input::Input;
use crate::{List, NamedTag, NbtString, Tag, Value};

/// Options for customising decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOpts {
    max_depth: usize,
    max_seq_len: u32,
}

impl DecodeOpts {
    /// Create new options. This object follows a builder pattern.
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of lists and compounds that may be open at once.
    /// Deeper input fails with [`ErrorKind::DepthLimit`].
    ///
    /// [`ErrorKind::DepthLimit`]: crate::error::ErrorKind::DepthLimit
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum number of elements a list or byte array may declare. Longer
    /// sequences fail with [`ErrorKind::SeqTooLong`].
    ///
    /// [`ErrorKind::SeqTooLong`]: crate::error::ErrorKind::SeqTooLong
    pub fn max_seq_len(mut self, value: u32) -> Self {
        self.max_seq_len = value;
        self
    }
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_seq_len: u32::MAX,
        }
    }
}

/// Decode the root named tag from some NBT data.
///
/// Input that holds nothing but an End tag decodes to an empty, unnamed
/// compound. Anything after the root tag is left unread.
pub fn from_reader<R: Read>(reader: R) -> Result<NamedTag> {
    from_reader_with_opts(reader, DecodeOpts::default())
}

/// Decode the root named tag, see [`from_reader`].
pub fn from_reader_with_opts<R: Read>(reader: R, opts: DecodeOpts) -> Result<NamedTag> {
    let mut decoder = Decoder::new(reader, opts);
    let root = decoder
        .named_tag()?
        .unwrap_or_else(|| NamedTag::new(NbtString::default(), Value::Compound(vec![])));

    debug!("decoded root {} tag {:?}", root.tag(), root.name);
    Ok(root)
}

/// Decode the root named tag from a slice, see [`from_reader`].
pub fn from_bytes(input: &[u8]) -> Result<NamedTag> {
    from_reader(input)
}

/// Decode the root named tag from a slice, see [`from_reader`].
pub fn from_bytes_with_opts(input: &[u8], opts: DecodeOpts) -> Result<NamedTag> {
    from_reader_with_opts(input, opts)
}

/// Reads named tags from any `Read`. Does not do decompression.
pub struct Decoder<R> {
    input: Input<R>,
    opts: DecodeOpts,
    layers: Vec<Layer>,
}

enum Layer {
    List {
        element: Tag,
        remaining: u32,
        values: Vec<Value>,
    },
    Compound {
        entries: Vec<NamedTag>,
        // name of the entry currently being read.
        child_name: NbtString,
    },
}

// Cap on how much we reserve from a list's declared length before any of the
// elements have actually been read.
const PREALLOC_LIMIT: usize = 1024;

impl<R: Read> Decoder<R> {
    pub fn new(reader: R, opts: DecodeOpts) -> Self {
        Self {
            input: Input::new(reader),
            opts,
            layers: Vec::new(),
        }
    }

    /// Read one complete named tag. Returns `None` if the next tag is an End
    /// tag, which has no name or payload.
    pub fn named_tag(&mut self) -> Result<Option<NamedTag>> {
        let tag = self.input.consume_tag()?;
        if tag == Tag::End {
            return Ok(None);
        }

        let name = self.input.consume_str()?;
        let value = self.payload(tag)?;
        Ok(Some(NamedTag { name, value }))
    }

    /// Read the payload of a value with the given tag. This is what list
    /// elements are made of: no tag byte and no name.
    fn payload(&mut self, tag: Tag) -> Result<Value> {
        self.layers.clear();

        let mut finished = self.begin(tag)?;

        loop {
            if let Some(value) = finished.take() {
                match self.layers.last_mut() {
                    None => return Ok(value),
                    Some(Layer::List { values, .. }) => values.push(value),
                    Some(Layer::Compound {
                        entries,
                        child_name,
                    }) => entries.push(NamedTag {
                        name: std::mem::take(child_name),
                        value,
                    }),
                }
            }

            finished = match self.layers.last_mut() {
                Some(Layer::List {
                    element, remaining, ..
                }) => {
                    if *remaining == 0 {
                        self.close()
                    } else {
                        *remaining -= 1;
                        let element = *element;
                        self.begin(element)?
                    }
                }
                Some(Layer::Compound { child_name, .. }) => {
                    let tag = self.input.consume_tag()?;
                    if tag == Tag::End {
                        self.close()
                    } else {
                        *child_name = self.input.consume_str()?;
                        self.begin(tag)?
                    }
                }
                None => unreachable!("finished values with no layer are returned above"),
            };
        }
    }

    /// Start reading a payload. Simple values are read completely and
    /// returned. Lists and compounds push a layer and return `None`; their
    /// contents are read by the loop in `payload`.
    fn begin(&mut self, tag: Tag) -> Result<Option<Value>> {
        let value = match tag {
            Tag::Byte => Value::Byte(self.input.consume_byte()?),
            Tag::Short => Value::Short(self.input.consume_u16()?),
            Tag::Int => Value::Int(self.input.consume_u32()?),
            Tag::Long => Value::Long(self.input.consume_u64()?),
            Tag::Float => Value::Float(self.input.consume_f32()?),
            Tag::Double => Value::Double(self.input.consume_f64()?),
            Tag::ByteArray => {
                Value::ByteArray(self.input.consume_byte_array(self.opts.max_seq_len)?)
            }
            Tag::String => Value::String(self.input.consume_str()?),
            Tag::List => {
                let element = self.input.consume_tag()?;
                let size = self.input.consume_u32()?;

                if element == Tag::End && size > 0 {
                    return Err(Error::invalid_list(size));
                }
                if size > self.opts.max_seq_len {
                    return Err(Error::seq_too_long(size));
                }
                if size == 0 {
                    return Ok(Some(Value::List(List::new(element, vec![]))));
                }

                self.push(Layer::List {
                    element,
                    remaining: size,
                    values: Vec::with_capacity((size as usize).min(PREALLOC_LIMIT)),
                })?;
                return Ok(None);
            }
            Tag::Compound => {
                self.push(Layer::Compound {
                    entries: vec![],
                    child_name: NbtString::default(),
                })?;
                return Ok(None);
            }
            // End never has a payload. Lists of End are empty and compounds
            // stop at End, so this is only hit by a bad caller.
            Tag::End => return Err(Error::unknown_tag(u8::from(Tag::End))),
        };

        Ok(Some(value))
    }

    fn push(&mut self, layer: Layer) -> Result<()> {
        if self.layers.len() >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Pop the innermost layer, turning it into its finished value.
    fn close(&mut self) -> Option<Value> {
        self.layers.pop().map(|layer| match layer {
            Layer::List {
                element, values, ..
            } => Value::List(List::new(element, values)),
            Layer::Compound { entries, .. } => Value::Compound(entries),
        })
    }
}
