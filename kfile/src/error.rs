//! Contains the error type for writing keyword files.

use std::error::Error;
use std::fmt::Display;
use std::io;

use inp::error::LookupError;

use crate::tables::SetKind;

/// Errors when writing a keyword file.
#[derive(Debug)]
#[non_exhaustive]
pub enum WriteError {
  /// The output stream failed.
  Io(io::Error),
  /// A set has no ID in its namespace.
  MissingSetId {
    /// The namespace that was searched.
    kind: SetKind,
    /// The set name.
    name: String,
  },
  /// A surface face could not be resolved into nodes.
  Lookup {
    /// The surface being written.
    surface: String,
    /// What went wrong.
    source: LookupError,
  },
}

impl Display for WriteError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(e) => write!(f, "could not write output: {}", e),
      Self::MissingSetId { kind, name } => {
        write!(f, "no ID configured for {} \"{}\"", kind, name)
      },
      Self::Lookup { surface, source } => {
        write!(f, "in surface \"{}\": {}", surface, source)
      },
    };
  }
}

impl Error for WriteError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    return match self {
      Self::Io(e) => Some(e),
      Self::Lookup { source, .. } => Some(source),
      Self::MissingSetId { .. } => None,
    };
  }
}

impl From<io::Error> for WriteError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}
