//! This module implements the in-memory mesh as we read it from a deck: nodes,
//! elements, named sets and surfaces. It is a plain data aggregate; nothing in
//! here checks that references between entities actually resolve.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::faces::{resolve_face, FaceNodes, FaceTable};

/// Number of nodes in a linear hexahedron.
pub const HEXA_NODES: usize = 8;

/// A point in space.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
  /// The node ID.
  pub id: usize,
  /// X, Y and Z coordinates.
  pub coords: [f64; 3],
}

/// A mesh cell, referencing its nodes by ID.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
  /// The element ID.
  pub id: usize,
  /// The connectivity, in the element's local node order.
  pub nodes: Vec<usize>,
  /// The element type given in the deck (e.g. C3D8R), if there was one.
  pub etype: Option<String>,
}

impl Element {
  /// Returns true if this is a linear hexahedron.
  pub fn is_hexa(&self) -> bool {
    return self.nodes.len() == HEXA_NODES;
  }
}

/// Things that live in the mesh under a name.
pub trait Named {
  /// The (upper-case) name.
  fn name(&self) -> &str;

  /// Creates an empty instance with a name.
  fn empty(name: &str) -> Self;
}

/// A named list of node or element IDs. May contain duplicates and is kept in
/// the order the IDs were read.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedSet {
  /// The set name.
  pub name: String,
  /// The member IDs, as read.
  pub members: Vec<usize>,
}

impl Named for NamedSet {
  fn name(&self) -> &str {
    return &self.name;
  }

  fn empty(name: &str) -> Self {
    return Self { name: name.to_owned(), members: Vec::new() };
  }
}

impl NamedSet {
  /// Returns the members, sorted, without repetitions.
  pub fn sorted_unique(&self) -> Vec<usize> {
    return self.members.iter().copied().sorted_unstable().dedup().collect();
  }
}

/// One face of one element, as referenced by a surface.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurfaceFace {
  /// The element ID.
  pub eid: usize,
  /// The local face label (S1, S2...).
  pub label: String,
}

/// A named, element-based surface.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Surface {
  /// The surface name.
  pub name: String,
  /// The element faces making up the surface, in order.
  pub faces: Vec<SurfaceFace>,
}

impl Named for Surface {
  fn name(&self) -> &str {
    return &self.name;
  }

  fn empty(name: &str) -> Self {
    return Self { name: name.to_owned(), faces: Vec::new() };
  }
}

/// Finds something by name in a list, appending an empty one if needed.
fn get_or_insert<'a, T: Named>(list: &'a mut Vec<T>, name: &str) -> &'a mut T {
  let pos = match list.iter().position(|x| x.name() == name) {
    Some(p) => p,
    None => {
      list.push(T::empty(name));
      list.len() - 1
    }
  };
  return &mut list[pos];
}

/// Finds something by name in a list.
fn find<'a, T: Named>(list: &'a [T], name: &str) -> Option<&'a T> {
  return list.iter().find(|x| x.name() == name);
}

/// The whole mesh. Nodes and elements are ordered by ID; sets and surfaces
/// are kept in the order they were first seen.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Mesh {
  /// The nodes, by ID.
  pub nodes: BTreeMap<usize, Node>,
  /// The elements, by ID.
  pub elements: BTreeMap<usize, Element>,
  /// The named node sets.
  pub node_sets: Vec<NamedSet>,
  /// The named element sets.
  pub element_sets: Vec<NamedSet>,
  /// The named surfaces.
  pub surfaces: Vec<Surface>,
}

impl Mesh {
  /// Instantiates an empty mesh.
  pub fn new() -> Self {
    return Self::default();
  }

  /// Inserts a node. A node with the same ID gets replaced.
  pub fn insert_node(&mut self, node: Node) {
    self.nodes.insert(node.id, node);
  }

  /// Inserts an element. An element with the same ID gets replaced.
  pub fn insert_element(&mut self, element: Element) {
    self.elements.insert(element.id, element);
  }

  /// Gets a node set by name, creating it if it doesn't exist.
  pub fn node_set_mut(&mut self, name: &str) -> &mut NamedSet {
    return get_or_insert(&mut self.node_sets, name);
  }

  /// Gets an element set by name, creating it if it doesn't exist.
  pub fn element_set_mut(&mut self, name: &str) -> &mut NamedSet {
    return get_or_insert(&mut self.element_sets, name);
  }

  /// Gets a surface by name, creating it if it doesn't exist.
  pub fn surface_mut(&mut self, name: &str) -> &mut Surface {
    return get_or_insert(&mut self.surfaces, name);
  }

  /// Looks up a node set.
  pub fn node_set(&self, name: &str) -> Option<&NamedSet> {
    return find(&self.node_sets, name);
  }

  /// Looks up an element set.
  pub fn element_set(&self, name: &str) -> Option<&NamedSet> {
    return find(&self.element_sets, name);
  }

  /// Looks up a surface.
  pub fn surface(&self, name: &str) -> Option<&Surface> {
    return find(&self.surfaces, name);
  }

  /// Iterates over the linear hexahedra, in ascending ID order.
  pub fn hexahedra(&self) -> impl Iterator<Item = &Element> {
    return self.elements.values().filter(|e| e.is_hexa());
  }

  /// Returns the global node IDs of one face of a surface.
  pub fn resolve_surface_face(
    &self,
    faces: &FaceTable,
    face: &SurfaceFace
  ) -> Result<FaceNodes, LookupError> {
    let element = self.elements
      .get(&face.eid)
      .ok_or(LookupError::UnknownElement(face.eid))?;
    return resolve_face(faces, element, &face.label);
  }
}
