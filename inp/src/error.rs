//! This module defines the errors that can come up while reading a deck or
//! while looking things up in the mesh it produced. All of them are fatal:
//! a conversion is all-or-nothing.

use std::error::Error;
use std::fmt::Display;
use std::io;

/// Errors raised while reading an input deck.
#[derive(Debug)]
#[non_exhaustive]
pub enum InpError {
  /// The underlying reader failed.
  Io(io::Error),
  /// A token in a data line could not be read as a number.
  Parse {
    /// The 1-based line number.
    line: usize,
    /// The (trimmed) contents of the line.
    text: String,
    /// The token that failed to parse.
    token: String,
  },
  /// A data line did not have the shape its block demands.
  Structural {
    /// The 1-based line number.
    line: usize,
    /// The (trimmed) contents of the line.
    text: String,
    /// What the line should have looked like.
    expected: &'static str,
    /// The number of fields actually found (or of IDs, for ranges).
    found: usize,
  },
}

impl Display for InpError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(e) => write!(f, "could not read input: {}", e),
      Self::Parse { line, text, token } => write!(
        f,
        "line {}: bad numeric token \"{}\" in \"{}\"",
        line, token, text
      ),
      Self::Structural { line, text, expected, found } => write!(
        f,
        "line {}: expected {}, got {} in \"{}\"",
        line, expected, found, text
      ),
    };
  }
}

impl Error for InpError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    return match self {
      Self::Io(e) => Some(e),
      _ => None,
    };
  }
}

impl From<io::Error> for InpError {
  fn from(value: io::Error) -> Self {
    return Self::Io(value);
  }
}

/// Errors raised when mesh data references something that isn't there.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookupError {
  /// The face label is not in the face table.
  UnknownFace {
    /// The element the face was requested for.
    eid: usize,
    /// The label that was requested.
    label: String,
  },
  /// The element is not in the mesh.
  UnknownElement(usize),
  /// The face table points past the element's connectivity.
  PositionOutOfRange {
    /// The element ID.
    eid: usize,
    /// The face label.
    label: String,
    /// The offending 1-based local position.
    position: usize,
    /// How many nodes the element actually has.
    nodes: usize,
  },
}

impl Display for LookupError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::UnknownFace { eid, label } => {
        write!(f, "unknown face label \"{}\" on element {}", label, eid)
      },
      Self::UnknownElement(eid) => write!(f, "element {} does not exist", eid),
      Self::PositionOutOfRange { eid, label, position, nodes } => write!(
        f,
        "face {} needs local node {} but element {} only has {} nodes",
        label, position, eid, nodes
      ),
    };
  }
}

impl Error for LookupError {}
