//! This library writes meshes read by the `inp` crate out as LS-DYNA keyword
//! files in the DUALCESE (compressible CFD solver) dialect: 3D nodes, 3D
//! elements, and node/segment/element sets.
//!
//! Set IDs in a keyword file are numbers, while decks name their sets, so the
//! conversion needs a table mapping names to IDs for each kind of set. The
//! default tables reproduce the convention of the meshes this was first
//! written for; they can be replaced wholesale.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod error;
pub mod tables;
pub mod util;
pub mod writer;


/// Number of IDs per line in set blocks.
pub const CHUNK_SIZE: usize = 8;

/// Part ID given to every element.
pub const PART_ID: usize = 1;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use super::error::*;
  pub use super::tables::*;
  pub use super::writer::*;
  pub use super::{CHUNK_SIZE, PART_ID};
}
