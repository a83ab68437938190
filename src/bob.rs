//! Projecting a schematic into the BOB2 block map format.
//!
//! A schematic stores its blocks densely: `Width`, `Height` and `Length`
//! give the size, and the `Blocks` and `Data` byte arrays hold the block id
//! and metadata of every cell, indexed by `(y * length + z) * width + x`.
//!
//! BOB2 is a text format. A fixed `[META]` section is followed by a `[DATA]`
//! section with one `x,z,y:block.meta` line per cell that isn't air (block
//! id 0). Lines come out with `y` outermost and `x` innermost.
//!
//! ```text
//! [META]
//! version=2.0
//! spawnElevationMin=0
//! spawnElevationMax=128
//! rarity=100
//! collisionPercentage=2
//! [DATA]
//! 1,0,0:5.3
//! ```

use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::de;
use crate::error::{Error, Result};
use crate::{NamedTag, Value};

/// Extension given to converted files.
pub const BOB_EXTENSION: &str = "bo2";

const META: &str = "[META]
version=2.0
spawnElevationMin=0
spawnElevationMax=128
rarity=100
collisionPercentage=2
[DATA]
";

/// A single non-air cell of a schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    pub x: usize,
    pub z: usize,
    pub y: usize,
    pub block: u8,
    pub meta: u8,
}

impl std::fmt::Display for Voxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}:{}.{}", self.x, self.z, self.y, self.block, self.meta)
    }
}

/// The block arrays of a schematic, checked to be consistent with its
/// dimensions. Borrows from the decoded tree.
#[derive(Debug, Clone, Copy)]
pub struct Schematic<'a> {
    width: usize,
    height: usize,
    length: usize,
    blocks: &'a [u8],
    data: &'a [u8],
}

impl<'a> Schematic<'a> {
    /// Find and validate the five tags a conversion needs, anywhere under
    /// `root`.
    ///
    /// Checks are made in order, and the first to fail is reported: all of
    /// `Height`, `Length`, `Width`, `Blocks` and `Data` must exist; the three
    /// dimensions must be positive integers; `Blocks` and `Data` must be byte
    /// arrays; and both arrays must hold exactly `width * height * length`
    /// bytes.
    pub fn from_tag(root: &'a NamedTag) -> Result<Self> {
        let lookup = move |name: &str| root.find(name).ok_or_else(|| Error::missing_tag(name));

        let height = lookup("Height")?;
        let length = lookup("Length")?;
        let width = lookup("Width")?;
        let blocks = lookup("Blocks")?;
        let data = lookup("Data")?;

        let height = dimension(height)?;
        let length = dimension(length)?;
        let width = dimension(width)?;

        let blocks = byte_array(blocks)?;
        let data = byte_array(data)?;

        let volume = height
            .checked_mul(length)
            .and_then(|v| v.checked_mul(width))
            .ok_or_else(|| {
                Error::invalid_dimensions(format!(
                    "dimensions {}x{}x{} are too large",
                    width, height, length
                ))
            })?;

        if blocks.len() != volume || data.len() != volume {
            return Err(Error::inconsistent_arrays(volume, blocks.len(), data.len()));
        }

        Ok(Self {
            width,
            height,
            length,
            blocks,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Every non-air cell, `y` ascending outermost, then `z`, then `x`.
    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + 'a {
        let width = self.width;
        let layer = self.width * self.length;
        let (blocks, data) = (self.blocks, self.data);

        blocks
            .iter()
            .zip(data)
            .enumerate()
            .filter(|(_, (block, _))| **block != 0)
            .map(move |(index, (&block, &meta))| Voxel {
                x: index % width,
                z: (index % layer) / width,
                y: index / layer,
                block,
                meta,
            })
    }
}

fn dimension(tag: &NamedTag) -> Result<usize> {
    let value = tag.as_integer()?;
    if value == 0 {
        return Err(Error::invalid_dimensions(format!("'{}' is zero", tag.name)));
    }

    // Int and Long dimensions are signed, so their top bit makes them negative.
    let max = match tag.value {
        Value::Int(_) => i32::MAX as u64,
        Value::Long(_) => i64::MAX as u64,
        _ => u64::MAX,
    };
    if value > max {
        return Err(Error::invalid_dimensions(format!(
            "'{}' of {} is out of the signed range",
            tag.name, value
        )));
    }

    usize::try_from(value).map_err(|_| {
        Error::invalid_dimensions(format!("'{}' of {} is too large", tag.name, value))
    })
}

fn byte_array(tag: &NamedTag) -> Result<&[u8]> {
    tag.value
        .as_byte_array()
        .ok_or_else(|| Error::wrong_tag_type(tag.name.to_string(), tag.tag()))
}

/// Write a schematic as BOB2. Returns the number of `[DATA]` lines written.
pub fn write_bob<W: Write>(schematic: &Schematic, mut writer: W) -> Result<usize> {
    writer.write_all(META.as_bytes())?;

    let mut count = 0;
    for voxel in schematic.voxels() {
        writeln!(writer, "{}", voxel)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Validate and render a decoded schematic as BOB2 in memory.
pub fn to_bob(root: &NamedTag) -> Result<Vec<u8>> {
    let schematic = Schematic::from_tag(root)?;
    let mut out = Vec::new();
    write_bob(&schematic, &mut out)?;
    Ok(out)
}

/// Where the BOB for `input` goes: the same directory, with the file name cut
/// at its first `.` and `.bo2` appended. `trees/oak.big.schematic` becomes
/// `trees/oak.bo2`.
pub fn output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = match name.find('.') {
        Some(dot) => &name[..dot],
        None => &name[..],
    };

    input.with_file_name(format!("{}.{}", stem, BOB_EXTENSION))
}

/// What [`convert_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output already existed and was left alone.
    Skipped { output: PathBuf },
    /// The output was written with this many voxels.
    Converted { output: PathBuf, voxels: usize },
}

/// Convert one decompressed schematic file into a BOB next to it, see
/// [`output_path`].
///
/// The whole conversion is done in memory first, and the result is written
/// to a uniquely named temporary file in the output's directory, then moved
/// into place only if nothing is there yet. If anything fails there is no
/// file at the output path, and an existing output is never replaced, even
/// one that appeared while this file was being converted.
pub fn convert_file(input: &Path) -> Result<Outcome> {
    let output = output_path(input);
    if output.exists() {
        return Ok(Outcome::Skipped { output });
    }

    let file = File::open(input)?;
    let root = de::from_reader(BufReader::new(file))?;
    let schematic = Schematic::from_tag(&root)?;

    debug!(
        "{}: {}x{}x{} schematic",
        input.display(),
        schematic.width(),
        schematic.height(),
        schematic.length()
    );

    let mut buf = Vec::new();
    let voxels = write_bob(&schematic, &mut buf)?;

    if !write_new(&output, &buf)? {
        debug!("{}: {} was created meanwhile", input.display(), output.display());
        return Ok(Outcome::Skipped { output });
    }
    Ok(Outcome::Converted { output, voxels })
}

/// Create `output` holding `contents`. Returns false, writing nothing, if
/// `output` already exists.
fn write_new(output: &Path, contents: &[u8]) -> Result<bool> {
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // removed again when dropped, unless persisted.
    let mut tmp = tempfile::Builder::new()
        .prefix(".sch2bob")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(contents)?;

    match tmp.persist_noclobber(output) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error.into()),
    }
}
