//! Contains the Error and Result type used by the decoder and the converter.
use crate::Tag;

/// An error from decoding NBT or projecting it into a BOB.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input ended part way through some NBT value.
    TruncatedInput,

    /// A tag byte outside of 0..=10.
    UnknownTagKind(u8),

    /// A list declared its element tag as End but claimed to have elements.
    InvalidList,

    /// Lists and compounds were nested deeper than the decoder allows.
    DepthLimit,

    /// A list count or array length was larger than the decoder allows.
    SeqTooLong(u32),

    /// A tag required for conversion was not anywhere in the tree.
    MissingTag(String),

    /// A tag that had to be an integer was some other tag.
    NotNumeric { name: String, tag: Tag },

    /// A tag that had to be a byte array was some other tag.
    WrongTagType { name: String, tag: Tag },

    /// Width, height or length was zero or too large.
    InvalidDimensions,

    /// Blocks and Data do not both hold width * height * length entries.
    InconsistentArrayLength,

    /// Any other IO error from reading or writing files.
    Io(std::io::ErrorKind),
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn truncated() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::TruncatedInput,
        }
    }

    pub(crate) fn unknown_tag(t: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", t),
            kind: ErrorKind::UnknownTagKind(t),
        }
    }

    pub(crate) fn invalid_list(size: u32) -> Self {
        Self {
            msg: format!("list of End tags cannot have {} elements", size),
            kind: ErrorKind::InvalidList,
        }
    }

    pub(crate) fn depth_limit(max: usize) -> Self {
        Self {
            msg: format!("nbt nested deeper than {} levels", max),
            kind: ErrorKind::DepthLimit,
        }
    }

    pub(crate) fn seq_too_long(len: u32) -> Self {
        Self {
            msg: format!("sequence of length {} exceeds the maximum", len),
            kind: ErrorKind::SeqTooLong(len),
        }
    }

    pub(crate) fn missing_tag(name: &str) -> Self {
        Self {
            msg: format!("missing a vital tag: {}", name),
            kind: ErrorKind::MissingTag(name.to_owned()),
        }
    }

    pub(crate) fn not_numeric(name: String, tag: Tag) -> Self {
        Self {
            msg: format!("'{}' is not a numeric type ({})", name, tag),
            kind: ErrorKind::NotNumeric { name, tag },
        }
    }

    pub(crate) fn wrong_tag_type(name: String, tag: Tag) -> Self {
        Self {
            msg: format!("'{}' should be a ByteArray, found {}", name, tag),
            kind: ErrorKind::WrongTagType { name, tag },
        }
    }

    pub(crate) fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::InvalidDimensions,
        }
    }

    pub(crate) fn inconsistent_arrays(expected: usize, blocks: usize, data: usize) -> Self {
        Self {
            msg: format!(
                "inconsistent data: expected {} entries, Blocks has {} and Data has {}",
                expected, blocks, data
            ),
            kind: ErrorKind::InconsistentArrayLength,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::truncated(),
            kind => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io(kind),
            },
        }
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;
