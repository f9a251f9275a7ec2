//! This module implements the one-pass, line-oriented reader for input decks,
//! and associated structures and enums.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::InpError;
use crate::model::*;
use crate::util::*;

/// Minimum number of fields in a node record: ID, X, Y, Z.
pub const NODE_FIELDS: usize = 4;

/// Minimum number of fields in a hexahedron record: ID and eight nodes.
pub const ELEMENT_FIELDS: usize = 1 + HEXA_NODES;

/// Most IDs a single `generate` line may expand to.
pub const MAX_GENERATED: usize = 10_000_000;

/// The data block we're currently in.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Section {
  /// Not in a node or element block.
  None,
  /// Inside a `*Node` block.
  Nodes,
  /// Inside an `*Element` block.
  Elements,
}

/// The kinds of named collection a deck can open.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CollectionKind {
  /// A `*Nset`.
  NodeSet,
  /// An `*Elset`.
  ElementSet,
  /// A `*Surface`.
  Surface,
}

/// The named collection that data lines are currently appended to. There is
/// at most one at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Active {
  /// Nothing is collecting.
  None,
  /// A node set; the flag says whether it uses `generate` ranges.
  NodeSet(String, bool),
  /// An element set; the flag says whether it uses `generate` ranges.
  ElementSet(String, bool),
  /// A surface.
  Surface(String),
}

/// A parser might respond this when successfully consuming a line.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParserResponse {
  /// The line was blank or a comment.
  Useless,
  /// The line opened a node or element block.
  BeginSection(Section),
  /// The line opened a named collection.
  BeginCollection(CollectionKind, String),
  /// The line was a keyword we don't handle. Carries the keyword.
  IgnoredDirective(String),
  /// A node was read. Carries its ID.
  Node(usize),
  /// An element was read. Carries its ID.
  Element(usize),
  /// A record had too few fields for its block and was dropped.
  ShortRecord {
    /// The block the record was in.
    section: Section,
    /// The number of fields it had.
    fields: usize,
  },
  /// IDs were appended to a set. Carries how many.
  Members(CollectionKind, usize),
  /// A face was appended to a surface.
  SurfaceFace,
  /// A data line outside of anything we read.
  Orphan,
}

/// This is the deck parser -- it doesn't care how lines are fed into it.
pub struct InpParser {
  /// The mesh being built.
  mesh: Mesh,
  /// The block we're in.
  section: Section,
  /// The collection being filled.
  active: Active,
  /// Element type of the current element block.
  element_type: Option<String>,
  /// The total number of consumed lines.
  total_lines: usize,
  /// Number of records dropped for being too short.
  short_records: usize,
}

impl Default for InpParser {
  fn default() -> Self {
    return Self::new();
  }
}

impl InpParser {
  /// Instantiates a new parser.
  pub fn new() -> Self {
    return Self {
      mesh: Mesh::new(),
      section: Section::None,
      active: Active::None,
      element_type: None,
      total_lines: 0,
      short_records: 0,
    };
  }

  /// Number of lines consumed so far.
  pub fn total_lines(&self) -> usize {
    return self.total_lines;
  }

  /// Number of node/element records dropped for being too short.
  pub fn short_records(&self) -> usize {
    return self.short_records;
  }

  /// Consumes a line into the parser.
  pub fn consume(&mut self, line: &str) -> Result<ParserResponse, InpError> {
    self.total_lines += 1;
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
      return Ok(ParserResponse::Useless);
    }
    if let Some(directive) = Directive::parse(line) {
      return Ok(self.begin(directive));
    }
    return match self.section {
      Section::Nodes => self.node_record(line),
      Section::Elements => self.element_record(line),
      Section::None => self.collection_line(line),
    };
  }

  /// Handles a keyword line. Every keyword closes whatever was open before,
  /// including keywords we ignore: their data never lands in an open set.
  fn begin(&mut self, directive: Directive) -> ParserResponse {
    self.section = Section::None;
    self.active = Active::None;
    self.element_type = None;
    let generate = directive.has_flag("generate");
    let (kind, name) = match directive.keyword.as_str() {
      "NODE" => return self.begin_section(Section::Nodes),
      "ELEMENT" => {
        self.element_type = directive.param("type");
        return self.begin_section(Section::Elements);
      },
      "NSET" => (CollectionKind::NodeSet, directive.param("nset")),
      "ELSET" => (CollectionKind::ElementSet, directive.param("elset")),
      "SURFACE" => (CollectionKind::Surface, directive.param("name")),
      _ => {
        debug!(
          "Ignoring *{} keyword on line {}.",
          directive.keyword,
          self.total_lines
        );
        return ParserResponse::IgnoredDirective(directive.keyword);
      }
    };
    let name = match name {
      Some(n) => n,
      None => {
        warn!(
          "*{} on line {} has no name, its data will be ignored.",
          directive.keyword,
          self.total_lines
        );
        return ParserResponse::IgnoredDirective(directive.keyword);
      }
    };
    self.active = match kind {
      CollectionKind::NodeSet => {
        self.mesh.node_set_mut(&name);
        Active::NodeSet(name.clone(), generate)
      },
      CollectionKind::ElementSet => {
        self.mesh.element_set_mut(&name);
        Active::ElementSet(name.clone(), generate)
      },
      CollectionKind::Surface => {
        self.mesh.surface_mut(&name);
        Active::Surface(name.clone())
      },
    };
    debug!("Started {:?} \"{}\" on line {}.", kind, name, self.total_lines);
    return ParserResponse::BeginCollection(kind, name);
  }

  /// Enters a node or element block.
  fn begin_section(&mut self, section: Section) -> ParserResponse {
    debug!("Started {:?} block on line {}.", section, self.total_lines);
    self.section = section;
    return ParserResponse::BeginSection(section);
  }

  /// Builds the error for a token that isn't a number.
  fn bad_token(&self, line: &str, token: &str) -> InpError {
    return InpError::Parse {
      line: self.total_lines,
      text: line.to_string(),
      token: token.trim().to_string(),
    };
  }

  /// Reads an ID field.
  fn integer(&self, line: &str, token: &str) -> Result<usize, InpError> {
    return parse_field(token).ok_or_else(|| self.bad_token(line, token));
  }

  /// Reads a real field.
  fn real(&self, line: &str, token: &str) -> Result<f64, InpError> {
    return parse_field(token).ok_or_else(|| self.bad_token(line, token));
  }

  /// Notes down a record that was too short for its block.
  fn short_record(&mut self, fields: usize, wanted: usize) -> ParserResponse {
    warn!(
      "Line {} has {} field(s) but a {:?} record needs {}; skipping it.",
      self.total_lines,
      fields,
      self.section,
      wanted
    );
    self.short_records += 1;
    return ParserResponse::ShortRecord { section: self.section, fields };
  }

  /// Reads a node record: ID, X, Y, Z. Anything after that is ignored.
  fn node_record(&mut self, line: &str) -> Result<ParserResponse, InpError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < NODE_FIELDS {
      return Ok(self.short_record(fields.len(), NODE_FIELDS));
    }
    let id = self.integer(line, fields[0])?;
    let mut coords = [0.0; 3];
    for (c, f) in coords.iter_mut().zip(&fields[1..NODE_FIELDS]) {
      *c = self.real(line, f)?;
    }
    self.mesh.insert_node(Node { id, coords });
    return Ok(ParserResponse::Node(id));
  }

  /// Reads a hexahedron record: ID and eight node IDs. Anything after that is
  /// ignored.
  fn element_record(&mut self, line: &str) -> Result<ParserResponse, InpError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < ELEMENT_FIELDS {
      return Ok(self.short_record(fields.len(), ELEMENT_FIELDS));
    }
    let id = self.integer(line, fields[0])?;
    let nodes = fields[1..ELEMENT_FIELDS]
      .iter()
      .map(|f| self.integer(line, f))
      .collect::<Result<Vec<usize>, InpError>>()?;
    self.mesh.insert_element(Element {
      id,
      nodes,
      etype: self.element_type.clone()
    });
    return Ok(ParserResponse::Element(id));
  }

  /// Reads the IDs in a set line, expanding `start, end[, step]` triplets if
  /// the set was opened with `generate`.
  fn set_members(
    &self,
    line: &str,
    generate: bool
  ) -> Result<Vec<usize>, InpError> {
    let ids = list_tokens(line)
      .map(|t| self.integer(line, t))
      .collect::<Result<Vec<usize>, InpError>>()?;
    if !generate {
      return Ok(ids);
    }
    let (start, end, step) = match ids.as_slice() {
      [start, end] => (*start, *end, 1),
      [start, end, step] if *step > 0 => (*start, *end, *step),
      _ => return Err(InpError::Structural {
        line: self.total_lines,
        text: line.to_string(),
        expected: "start, end[, step] with a positive step",
        found: ids.len(),
      })
    };
    let count = if end < start { 0 } else { (end - start) / step + 1 };
    if count > MAX_GENERATED {
      return Err(InpError::Structural {
        line: self.total_lines,
        text: line.to_string(),
        expected: "a generated range of at most ten million IDs",
        found: count,
      });
    }
    return Ok((start..=end).step_by(step).collect());
  }

  /// Handles a data line outside node/element blocks.
  fn collection_line(&mut self, line: &str) -> Result<ParserResponse, InpError> {
    match self.active.clone() {
      Active::NodeSet(name, generate) => {
        let ids = self.set_members(line, generate)?;
        let n = ids.len();
        self.mesh.node_set_mut(&name).members.extend(ids);
        return Ok(ParserResponse::Members(CollectionKind::NodeSet, n));
      },
      Active::ElementSet(name, generate) => {
        let ids = self.set_members(line, generate)?;
        let n = ids.len();
        self.mesh.element_set_mut(&name).members.extend(ids);
        return Ok(ParserResponse::Members(CollectionKind::ElementSet, n));
      },
      Active::Surface(name) => {
        let fields: Vec<&str> = line.split(',').collect();
        let [eid, label] = fields.as_slice() else {
          return Err(InpError::Structural {
            line: self.total_lines,
            text: line.to_string(),
            expected: "exactly two fields (element ID, face label)",
            found: fields.len(),
          });
        };
        let eid = self.integer(line, eid)?;
        let label = label.trim().to_ascii_uppercase();
        self.mesh.surface_mut(&name).faces.push(SurfaceFace { eid, label });
        return Ok(ParserResponse::SurfaceFace);
      },
      Active::None => {
        debug!("Line {} belongs to nothing we read.", self.total_lines);
        return Ok(ParserResponse::Orphan);
      }
    }
  }

  /// Finishes up and returns the mesh.
  pub fn finish(self) -> Mesh {
    debug!(
      "Read {} lines: {} nodes, {} elements, {} node sets, {} element sets, \
      {} surfaces.",
      self.total_lines,
      self.mesh.nodes.len(),
      self.mesh.elements.len(),
      self.mesh.node_sets.len(),
      self.mesh.element_sets.len(),
      self.mesh.surfaces.len()
    );
    if self.short_records > 0 {
      warn!("{} short record(s) were skipped.", self.short_records);
    }
    return self.mesh;
  }

  /// Parses from a BufRead instance.
  pub fn parse_bufread<R: BufRead>(reader: R) -> Result<Mesh, InpError> {
    let mut parser = Self::new();
    for line in reader.lines() {
      parser.consume(&line?)?;
    }
    return Ok(parser.finish());
  }

  /// Utility method -- reads and parses a file.
  pub fn parse_file<P: AsRef<Path>>(p: P) -> Result<Mesh, InpError> {
    let file = File::open(p.as_ref())?;
    return Self::parse_bufread(BufReader::new(file));
  }

  /// Utility method -- parses a whole deck held in memory.
  pub fn parse_str(deck: &str) -> Result<Mesh, InpError> {
    return Self::parse_bufread(deck.as_bytes());
  }
}
