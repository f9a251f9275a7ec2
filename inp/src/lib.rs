//! This library implements a reader for the mesh-related subset of Abaqus-like
//! input decks (".inp" files), as exported by Abaqus/CAE, CalculiX and most
//! pre-processors that speak the same keyword dialect.
//!
//! It only cares about geometry and topology: nodes, 8-node hexahedral
//! elements, named node/element sets and element-based surfaces. Everything
//! else in a deck is recognised as a keyword and then ignored.
//!
//! The surface definitions are kept as (element, face label) pairs; the
//! `faces` module knows how to turn those into explicit node lists, which is
//! what most other solvers want.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod error;
pub mod faces;
pub mod model;
pub mod parser;
pub mod util;

#[cfg(test)]
mod tests;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use super::error::*;
  pub use super::faces::*;
  pub use super::model::*;
  pub use super::parser::*;
}
