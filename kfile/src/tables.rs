//! This module implements the name-to-ID tables used for sets, one namespace
//! per kind of set.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::WriteError;

/// The kinds of set block in a keyword file.
#[derive(
  Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord
)]
pub enum SetKind {
  /// A list of nodes.
  NodeSet,
  /// A list of quadrilateral segments (a surface).
  SegmentSet,
  /// A list of elements.
  ElementSet,
}

impl SetKind {
  /// The keyword that opens this kind of block.
  pub const fn keyword(&self) -> &'static str {
    return match self {
      Self::NodeSet => "*DUALCESE_NODESET",
      Self::SegmentSet => "*DUALCESE_SEGMENTSET",
      Self::ElementSet => "*DUALCESE_ELEMENTSET",
    };
  }

  /// What goes in the comment line above the block.
  pub const fn label(&self) -> &'static str {
    return match self {
      Self::NodeSet => "Node set",
      Self::SegmentSet => "Surface set",
      Self::ElementSet => "Element set",
    };
  }

  /// Leading spaces on the ID line.
  pub const fn id_indent(&self) -> &'static str {
    return match self {
      Self::NodeSet | Self::SegmentSet => "       ",
      Self::ElementSet => "      ",
    };
  }
}

impl Display for SetKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{}", self.label().to_lowercase());
  }
}

/// A single name-to-ID namespace.
pub type IdTable = BTreeMap<String, usize>;

/// Builds a table from a static list.
fn table_of(pairs: &[(&str, usize)]) -> IdTable {
  return pairs.iter().map(|(n, id)| (n.to_string(), *id)).collect();
}

/// Upper-cases the keys of a table.
fn normalise(table: IdTable) -> IdTable {
  return table.into_iter()
    .map(|(n, id)| (n.trim().to_ascii_uppercase(), id))
    .collect();
}

/// The three independent ID namespaces. The same name may show up in more
/// than one of them with different IDs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SetIdTables {
  /// IDs for node sets.
  pub node_sets: IdTable,
  /// IDs for segment sets (surfaces).
  pub segment_sets: IdTable,
  /// IDs for element sets.
  pub element_sets: IdTable,
}

impl Default for SetIdTables {
  fn default() -> Self {
    return Self {
      node_sets: table_of(&[
        ("K1A", 999), ("K2A", 888), ("K1B", 777), ("K2B", 666)
      ]),
      segment_sets: table_of(&[
        ("FACEK1A", 555), ("FACEK2A", 444), ("FACEK1B", 333),
        ("FACEK2B", 222), ("OUTERS", 111), ("ELSURF", 1111)
      ]),
      element_sets: table_of(&[("FLUID1", 2222), ("FLUID2", 3333)]),
    };
  }
}

impl SetIdTables {
  /// Tables with no names at all.
  pub fn empty() -> Self {
    return Self {
      node_sets: IdTable::new(),
      segment_sets: IdTable::new(),
      element_sets: IdTable::new(),
    };
  }

  /// Returns the namespace for a kind of set.
  pub fn table(&self, kind: SetKind) -> &IdTable {
    return match kind {
      SetKind::NodeSet => &self.node_sets,
      SetKind::SegmentSet => &self.segment_sets,
      SetKind::ElementSet => &self.element_sets,
    };
  }

  /// Returns the namespace for a kind of set, mutably.
  pub fn table_mut(&mut self, kind: SetKind) -> &mut IdTable {
    return match kind {
      SetKind::NodeSet => &mut self.node_sets,
      SetKind::SegmentSet => &mut self.segment_sets,
      SetKind::ElementSet => &mut self.element_sets,
    };
  }

  /// Looks up the ID for a named set. A missing name is an error.
  pub fn lookup(&self, kind: SetKind, name: &str) -> Result<usize, WriteError> {
    return self.table(kind)
      .get(name)
      .copied()
      .ok_or_else(|| WriteError::MissingSetId {
        kind,
        name: name.to_string()
      });
  }

  /// Upper-cases every name, so they match what the deck reader produces.
  pub fn normalised(self) -> Self {
    return Self {
      node_sets: normalise(self.node_sets),
      segment_sets: normalise(self.segment_sets),
      element_sets: normalise(self.element_sets),
    };
  }
}
