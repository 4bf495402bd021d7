//! persistence — framed binary encoding for compiled models.
//!
//! Purpose
//! -------
//! Give every immutable, compiled value (distributions, multinomials,
//! logistic-regression classifiers) a stable byte representation that can
//! be written to any `std::io::Write` and reconstructed exactly from any
//! `std::io::Read`.
//!
//! Key behaviors
//! -------------
//! - [`Persist`] is implemented by each persistable type with a unique
//!   one-byte tag; the trait provides `write_to`, `read_from`, `to_bytes`,
//!   and `from_bytes`.
//! - Every stream starts with a 7-byte header: the magic `RSM\0`, the type
//!   tag, and a little-endian `u16` format version. The body is `bincode`.
//! - Decoding routes through `serde(try_from = ...)` representations, so a
//!   decoded value is re-validated by the same constructor checks used when
//!   it was first built. Corrupt payloads surface as [`PersistError::Decode`].
//!
//! Conventions
//! -----------
//! - Persistence is caller-driven I/O; nothing in the crate performs I/O on
//!   its own. A read/write failure is fatal to that single operation only.

use std::io::{Read, Write};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ErrorKind;

/// Stream magic.
pub const MAGIC: [u8; 4] = *b"RSM\0";

/// Current body format version.
pub const FORMAT_VERSION: u16 = 1;

pub type PersistResult<T> = Result<T, PersistError>;

/// PersistError — failures while encoding or decoding a framed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Underlying reader/writer failed.
    Io { message: String },
    /// Stream does not start with [`MAGIC`].
    BadMagic,
    /// Stream holds a different type than the one requested.
    TagMismatch { expected: u8, found: u8 },
    /// Stream was written by an unknown format version.
    UnsupportedVersion { found: u16 },
    /// Serializer failure.
    Encode { message: String },
    /// Deserializer failure, including invariant violations in the payload.
    Decode { message: String },
    /// Bytes left over after a complete value was decoded.
    TrailingBytes { count: usize },
}

impl PersistError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Persistence
    }
}

impl std::error::Error for PersistError {}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io { message } => write!(f, "I/O failure: {message}"),
            PersistError::BadMagic => write!(f, "Stream does not start with the expected magic"),
            PersistError::TagMismatch { expected, found } => {
                write!(f, "Type tag mismatch: expected {expected}, found {found}")
            }
            PersistError::UnsupportedVersion { found } => {
                write!(f, "Unsupported format version {found} (expected {FORMAT_VERSION})")
            }
            PersistError::Encode { message } => write!(f, "Encoding failed: {message}"),
            PersistError::Decode { message } => write!(f, "Decoding failed: {message}"),
            PersistError::TrailingBytes { count } => {
                write!(f, "{count} trailing bytes after decoded value")
            }
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io { message: err.to_string() }
    }
}

fn from_bincode(err: bincode::Error, decoding: bool) -> PersistError {
    match *err {
        bincode::ErrorKind::Io(io) => PersistError::Io { message: io.to_string() },
        other if decoding => PersistError::Decode { message: other.to_string() },
        other => PersistError::Encode { message: other.to_string() },
    }
}

/// Framed, self-describing binary persistence.
///
/// Implementors only choose a unique `TAG`; all methods are provided.
pub trait Persist: Serialize + DeserializeOwned {
    /// One-byte type tag written after the magic.
    const TAG: u8;

    /// Write header and body to `writer`.
    fn write_to<W: Write>(&self, mut writer: W) -> PersistResult<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&[Self::TAG])?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        bincode::serialize_into(&mut writer, self).map_err(|e| from_bincode(e, false))?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate a header, then decode the body.
    fn read_from<R: Read>(mut reader: R) -> PersistResult<Self> {
        let mut magic = [0_u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(PersistError::BadMagic);
        }
        let mut tag = [0_u8; 1];
        reader.read_exact(&mut tag)?;
        if tag[0] != Self::TAG {
            return Err(PersistError::TagMismatch { expected: Self::TAG, found: tag[0] });
        }
        let mut version = [0_u8; 2];
        reader.read_exact(&mut version)?;
        let version = u16::from_le_bytes(version);
        if version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion { found: version });
        }
        bincode::deserialize_from(reader).map_err(|e| from_bincode(e, true))
    }

    fn to_bytes(&self) -> PersistResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Decode from a byte slice that must contain exactly one value.
    fn from_bytes(bytes: &[u8]) -> PersistResult<Self> {
        let mut cursor = bytes;
        let value = Self::read_from(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(PersistError::TrailingBytes { count: cursor.len() });
        }
        Ok(value)
    }
}
