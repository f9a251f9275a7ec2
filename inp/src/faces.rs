//! This module implements the face topology of linear hexahedra, i.e. which
//! four local nodes make up each of the six faces, and the routine that turns
//! an element face into global node IDs.
//!
//! The local positions are 1-based, like in every solver manual out there.
//! Their order is the winding order of the face and decides which way its
//! normal points, so it must never be shuffled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::model::Element;

/// Number of nodes on a quadrilateral face.
pub const FACE_NODES: usize = 4;

/// 1-based local node positions of a face.
pub type FacePositions = [usize; FACE_NODES];

/// Global node IDs of a face.
pub type FaceNodes = [usize; FACE_NODES];

/// Face definitions for a linear hexahedron, Abaqus/CalculiX numbering.
pub const HEXA_FACES: [(&str, FacePositions); 6] = [
  ("S1", [1, 2, 3, 4]),
  ("S2", [5, 8, 7, 6]),
  ("S3", [1, 5, 6, 2]),
  ("S4", [2, 6, 7, 3]),
  ("S5", [3, 7, 8, 4]),
  ("S6", [4, 8, 5, 1]),
];

/// Maps face labels to local node positions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FaceTable {
  /// Positions by upper-case label.
  faces: BTreeMap<String, FacePositions>,
}

impl Default for FaceTable {
  fn default() -> Self {
    return HEXA_FACES.iter()
      .map(|(label, pos)| (label.to_string(), *pos))
      .collect();
  }
}

impl FromIterator<(String, FacePositions)> for FaceTable {
  fn from_iter<I: IntoIterator<Item = (String, FacePositions)>>(iter: I) -> Self {
    return Self {
      faces: iter.into_iter()
        .map(|(label, pos)| (label.trim().to_ascii_uppercase(), pos))
        .collect()
    };
  }
}

impl FaceTable {
  /// Returns the positions for a face label. Case-insensitive.
  pub fn get(&self, label: &str) -> Option<&FacePositions> {
    return self.faces.get(&label.trim().to_ascii_uppercase());
  }

  /// Returns the known labels.
  pub fn labels(&self) -> impl Iterator<Item = &str> {
    return self.faces.keys().map(String::as_str);
  }

  /// Number of known faces.
  pub fn len(&self) -> usize {
    return self.faces.len();
  }

  /// Returns true if no faces are defined.
  pub fn is_empty(&self) -> bool {
    return self.faces.is_empty();
  }

  /// Re-keys the table with normalised labels. Needed after deserialising,
  /// since that bypasses FromIterator.
  pub fn normalised(self) -> Self {
    return self.faces.into_iter().collect();
  }
}

/// Returns the global node IDs of a face of an element, in the winding order
/// of the face table.
pub fn resolve_face(
  faces: &FaceTable,
  element: &Element,
  label: &str
) -> Result<FaceNodes, LookupError> {
  let positions = faces.get(label).ok_or_else(|| LookupError::UnknownFace {
    eid: element.id,
    label: label.to_string(),
  })?;
  let mut resolved: FaceNodes = [0; FACE_NODES];
  for (slot, &position) in resolved.iter_mut().zip(positions.iter()) {
    *slot = position.checked_sub(1)
      .and_then(|i| element.nodes.get(i))
      .copied()
      .ok_or_else(|| LookupError::PositionOutOfRange {
        eid: element.id,
        label: label.to_string(),
        position,
        nodes: element.nodes.len(),
      })?;
  }
  return Ok(resolved);
}
