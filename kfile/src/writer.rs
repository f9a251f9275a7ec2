//! This module implements the keyword file writer itself.
//!
//! Blocks always come out in the same order: nodes, elements, node sets,
//! segment sets, element sets, and the end keyword. Nodes and elements are
//! sorted by ID; sets keep the order in which the deck introduced them.

use std::fmt::Display;
use std::io::Write;

use inp::prelude::*;
use itertools::Itertools;
use log::{debug, warn};

use crate::error::WriteError;
use crate::tables::{SetIdTables, SetKind};
use crate::util::General;
use crate::{CHUNK_SIZE, PART_ID};

/// Opens the node block.
pub const NODE_KEYWORD: &str = "*DUALCESE_NODE3D";

/// Opens the element block.
pub const ELEMENT_KEYWORD: &str = "*DUALCESE_ELE3D";

/// Ends the file.
pub const END_KEYWORD: &str = "*END";

/// Padding written after each segment's nodes.
const SEGMENT_PADDING: &str = "0.0,0.0,0.0,0.0";

/// What got written by a call to emit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
  /// Nodes written.
  pub nodes: usize,
  /// Elements written.
  pub elements: usize,
  /// Elements left out because they aren't hexahedra.
  pub skipped_elements: usize,
  /// Node set blocks written.
  pub node_sets: usize,
  /// Segment set blocks written.
  pub segment_sets: usize,
  /// Segments written across all segment sets.
  pub segments: usize,
  /// Element set blocks written.
  pub element_sets: usize,
}

impl Display for EmitSummary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "{} nodes, {} elements ({} skipped), {} node sets, {} segment sets \
      ({} segments), {} element sets",
      self.nodes,
      self.elements,
      self.skipped_elements,
      self.node_sets,
      self.segment_sets,
      self.segments,
      self.element_sets
    );
  }
}

/// Writes meshes as DUALCESE keyword files, given the tables to use.
#[derive(Copy, Clone, Debug)]
pub struct KWriter<'a> {
  /// Set IDs.
  ids: &'a SetIdTables,
  /// Face definitions used to expand surfaces.
  faces: &'a FaceTable,
}

impl<'a> KWriter<'a> {
  /// Instantiates a writer over a set of tables.
  pub fn new(ids: &'a SetIdTables, faces: &'a FaceTable) -> Self {
    return Self { ids, faces };
  }

  /// Writes out a whole mesh.
  pub fn emit<W: Write>(
    &self,
    out: &mut W,
    mesh: &Mesh
  ) -> Result<EmitSummary, WriteError> {
    let mut summary = EmitSummary::default();
    self.write_nodes(out, mesh, &mut summary)?;
    self.write_elements(out, mesh, &mut summary)?;
    for set in mesh.node_sets.iter() {
      self.write_id_list(out, SetKind::NodeSet, set)?;
      summary.node_sets += 1;
    }
    for surface in mesh.surfaces.iter() {
      summary.segments += self.write_segments(out, mesh, surface)?;
      summary.segment_sets += 1;
    }
    for set in mesh.element_sets.iter() {
      self.write_id_list(out, SetKind::ElementSet, set)?;
      summary.element_sets += 1;
    }
    writeln!(out, "{}", END_KEYWORD)?;
    debug!("Wrote {}.", summary);
    return Ok(summary);
  }

  /// Writes the node block.
  fn write_nodes<W: Write>(
    &self,
    out: &mut W,
    mesh: &Mesh,
    summary: &mut EmitSummary
  ) -> Result<(), WriteError> {
    writeln!(out, "{}", NODE_KEYWORD)?;
    for node in mesh.nodes.values() {
      let [x, y, z] = node.coords;
      writeln!(
        out,
        "{}, {}, {}, {}, 0, 0",
        node.id,
        General(x),
        General(y),
        General(z)
      )?;
    }
    summary.nodes = mesh.nodes.len();
    return Ok(());
  }

  /// Writes the element block. Only hexahedra make it in.
  fn write_elements<W: Write>(
    &self,
    out: &mut W,
    mesh: &Mesh,
    summary: &mut EmitSummary
  ) -> Result<(), WriteError> {
    writeln!(out, "{}", ELEMENT_KEYWORD)?;
    for element in mesh.elements.values() {
      if !element.is_hexa() {
        warn!(
          "Element {} ({}) has {} nodes, only hexahedra are written; \
          skipping it.",
          element.id,
          element.etype.as_deref().unwrap_or("untyped"),
          element.nodes.len()
        );
        summary.skipped_elements += 1;
        continue;
      }
      writeln!(
        out,
        "{}, {}, {}",
        element.id,
        PART_ID,
        element.nodes.iter().join(", ")
      )?;
      summary.elements += 1;
    }
    return Ok(());
  }

  /// Writes the comment, keyword and ID lines that open a set block.
  fn write_set_header<W: Write>(
    &self,
    out: &mut W,
    kind: SetKind,
    name: &str,
    id: usize
  ) -> Result<(), WriteError> {
    writeln!(out, "$ {}: {}", kind.label(), name)?;
    writeln!(out, "{}", kind.keyword())?;
    writeln!(out, "{}{}", kind.id_indent(), id)?;
    return Ok(());
  }

  /// Writes a node or element set: sorted, unique IDs, a few per line.
  fn write_id_list<W: Write>(
    &self,
    out: &mut W,
    kind: SetKind,
    set: &NamedSet
  ) -> Result<(), WriteError> {
    let id = self.ids.lookup(kind, &set.name)?;
    self.write_set_header(out, kind, &set.name, id)?;
    for chunk in set.sorted_unique().chunks(CHUNK_SIZE) {
      writeln!(out, "{}", chunk.iter().join(", "))?;
    }
    return Ok(());
  }

  /// Writes a surface as a segment set. Every face is resolved before the
  /// first line goes out. Returns the number of segments.
  fn write_segments<W: Write>(
    &self,
    out: &mut W,
    mesh: &Mesh,
    surface: &Surface
  ) -> Result<usize, WriteError> {
    let id = self.ids.lookup(SetKind::SegmentSet, &surface.name)?;
    let segments = surface.faces
      .iter()
      .map(|face| mesh.resolve_surface_face(self.faces, face))
      .collect::<Result<Vec<FaceNodes>, LookupError>>()
      .map_err(|source| WriteError::Lookup {
        surface: surface.name.clone(),
        source
      })?;
    self.write_set_header(out, SetKind::SegmentSet, &surface.name, id)?;
    for [a, b, c, d] in segments.iter() {
      writeln!(out, "{}, {}, {}, {},{}", a, b, c, d, SEGMENT_PADDING)?;
    }
    return Ok(segments.len());
  }
}
