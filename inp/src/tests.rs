use crate::prelude::*;
use crate::util::{list_tokens, Directive};

/// A unit cube made of a single hexahedron, with a node set over all of it
/// and a surface on its bottom face.
const UNIT_CUBE: &str = "\
** unit cube
*Heading
 single hexahedron
*Node
1, 0.0, 0.0, 0.0
2, 1.0, 0.0, 0.0
3, 1.0, 1.0, 0.0
4, 0.0, 1.0, 0.0
5, 0.0, 0.0, 1.0
6, 1.0, 0.0, 1.0
7, 1.0, 1.0, 1.0
8, 0.0, 1.0, 1.0
*Element, type=C3D8R
1, 1, 2, 3, 4, 5, 6, 7, 8
*Nset, nset=k1a
1, 2, 3, 4, 5, 6, 7, 8
*Surface, type=ELEMENT, name=FaceK1A
1, S1
*End Part
";

#[test]
fn test_directive_breakdown() {
  let d = Directive::parse("*Nset, NSET = k1a , internal, generate").unwrap();
  assert_eq!(d.keyword, "NSET");
  assert_eq!(d.param("nset").as_deref(), Some("K1A"));
  assert_eq!(d.param("elset"), None);
  assert!(d.has_flag("GENERATE"));
  assert!(!d.has_flag("unsorted"));
  let d = Directive::parse("*Surface, type=ELEMENT, name=outerS").unwrap();
  assert_eq!(d.param("NAME").as_deref(), Some("OUTERS"));
  assert_eq!(d.param("type").as_deref(), Some("ELEMENT"));
  assert!(Directive::parse("** just a comment").is_none());
  assert!(Directive::parse("1, 2, 3").is_none());
  assert_eq!(Directive::parse("*Node Output").unwrap().keyword, "NODE OUTPUT");
}

#[test]
fn test_list_tokens() {
  let toks: Vec<&str> = list_tokens(" 1, 2,,3\t 4 ,").collect();
  assert_eq!(toks, ["1", "2", "3", "4"]);
}

#[test]
fn test_node_records() {
  let mut parser = InpParser::new();
  parser.consume("*NODE, nset=whatever").unwrap();
  assert_eq!(
    parser.consume("  7, 1.5, -2.0, 3e-2, 99, junk").unwrap(),
    ParserResponse::Node(7)
  );
  assert_eq!(
    parser.consume("8, 1.0, 2.0").unwrap(),
    ParserResponse::ShortRecord { section: Section::Nodes, fields: 3 }
  );
  assert_eq!(parser.short_records(), 1);
  let mesh = parser.finish();
  assert_eq!(mesh.nodes.len(), 1);
  assert_eq!(mesh.nodes[&7].coords, [1.5, -2.0, 0.03]);
}

#[test]
fn test_element_records() {
  let deck = "\
*Element, type=c3d8r
10, 1, 2, 3, 4, 5, 6, 7, 8, 9
11, 1, 2, 3, 4, 5, 6, 7
12, 8, 7, 6, 5, 4, 3, 2, 1
";
  let mesh = InpParser::parse_str(deck).unwrap();
  assert_eq!(mesh.elements.len(), 2);
  assert!(!mesh.elements.contains_key(&11));
  let e = &mesh.elements[&10];
  assert_eq!(e.nodes, [1, 2, 3, 4, 5, 6, 7, 8]);
  assert_eq!(e.etype.as_deref(), Some("C3D8R"));
  assert_eq!(mesh.elements[&12].nodes, [8, 7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn test_bad_tokens() {
  let err = InpParser::parse_str("*Node\n1, 0.0, zero, 0.0\n").unwrap_err();
  match err {
    InpError::Parse { line, token, .. } => {
      assert_eq!(line, 2);
      assert_eq!(token, "zero");
    },
    e => panic!("unexpected error {:?}", e),
  }
  let err = InpParser::parse_str("*Nset, nset=A\n1, 2, x3\n").unwrap_err();
  assert!(matches!(err, InpError::Parse { line: 2, .. }));
}

#[test]
fn test_sets_accumulate_and_dedup() {
  let deck = "\
*Nset, nset=A
1, 2, 2, 3
*Elset, elset=B
3 1
2,
*Nset, nset=a
3, 1, 2
";
  let mesh = InpParser::parse_str(deck).unwrap();
  assert_eq!(mesh.node_sets.len(), 1);
  let a = mesh.node_set("A").unwrap();
  assert_eq!(a.members, [1, 2, 2, 3, 3, 1, 2]);
  assert_eq!(a.sorted_unique(), [1, 2, 3]);
  let b = mesh.element_set("B").unwrap();
  assert_eq!(b.members, [3, 1, 2]);
  assert_eq!(b.sorted_unique(), [1, 2, 3]);
}

#[test]
fn test_generated_sets() {
  let deck = "\
*Nset, nset=GEN, generate
1, 9, 4
20, 22
*Elset, elset=BAD, generate
1, 5, 0
";
  let err = InpParser::parse_str(deck).unwrap_err();
  assert!(matches!(err, InpError::Structural { line: 5, .. }));
  let mesh = InpParser::parse_str(&deck[..deck.find("*Elset").unwrap()])
    .unwrap();
  assert_eq!(mesh.node_set("GEN").unwrap().members, [1, 5, 9, 20, 21, 22]);
}

#[test]
fn test_huge_generated_range_is_refused() {
  let deck = "*Nset, nset=TYPO, generate\n1, 4000000000\n";
  match InpParser::parse_str(deck).unwrap_err() {
    InpError::Structural { line, found, .. } => {
      assert_eq!(line, 2);
      assert_eq!(found, 4000000000);
    },
    e => panic!("unexpected error {:?}", e),
  }
}

#[test]
fn test_ignored_keywords_close_open_sets() {
  let deck = "\
*Nset, nset=A
1, 2
*Output, field
3, 4
";
  let mut parser = InpParser::new();
  let responses = deck.lines()
    .map(|l| parser.consume(l).unwrap())
    .collect::<Vec<_>>();
  assert_eq!(responses[2], ParserResponse::IgnoredDirective("OUTPUT".into()));
  assert_eq!(responses[3], ParserResponse::Orphan);
  let mesh = parser.finish();
  assert_eq!(mesh.node_set("A").unwrap().members, [1, 2]);
}

#[test]
fn test_only_one_collection_is_active() {
  let deck = "\
*Nset, nset=N
1, 2
*Elset, elset=E
5
*Material, name=steel
*Elastic
210000., 0.3
*Nset
4, 5
";
  let mesh = InpParser::parse_str(deck).unwrap();
  assert_eq!(mesh.node_set("N").unwrap().members, [1, 2]);
  assert_eq!(mesh.element_set("E").unwrap().members, [5]);
  assert_eq!(mesh.node_sets.len(), 1);
}

#[test]
fn test_surfaces() {
  let mut parser = InpParser::new();
  assert_eq!(
    parser.consume("*Surface, type=ELEMENT, name=Outer").unwrap(),
    ParserResponse::BeginCollection(CollectionKind::Surface, "OUTER".into())
  );
  assert_eq!(parser.consume("4, s2").unwrap(), ParserResponse::SurfaceFace);
  assert!(matches!(
    parser.consume("4, S2, extra"),
    Err(InpError::Structural { line: 3, found: 3, .. })
  ));
  assert!(matches!(
    parser.consume("4"),
    Err(InpError::Structural { found: 1, .. })
  ));
  let mesh = parser.finish();
  let surf = mesh.surface("OUTER").unwrap();
  assert_eq!(surf.faces, [SurfaceFace { eid: 4, label: "S2".into() }]);
}

#[test]
fn test_resolve_face() {
  let element = Element {
    id: 1,
    nodes: vec![10, 11, 12, 13, 14, 15, 16, 17],
    etype: None,
  };
  let faces = FaceTable::default();
  assert_eq!(resolve_face(&faces, &element, "S1").unwrap(), [10, 11, 12, 13]);
  assert_eq!(resolve_face(&faces, &element, "S2").unwrap(), [14, 17, 16, 15]);
  assert_eq!(resolve_face(&faces, &element, "s6").unwrap(), [13, 17, 14, 10]);
  assert_eq!(
    resolve_face(&faces, &element, "S7"),
    Err(LookupError::UnknownFace { eid: 1, label: "S7".into() })
  );
  let short = Element { id: 2, nodes: vec![1, 2, 3, 4], etype: None };
  assert!(matches!(
    resolve_face(&faces, &short, "S2"),
    Err(LookupError::PositionOutOfRange { position: 5, nodes: 4, .. })
  ));
}

#[test]
fn test_unit_cube() {
  let mesh = InpParser::parse_str(UNIT_CUBE).unwrap();
  assert_eq!(mesh.nodes.len(), 8);
  assert_eq!(mesh.nodes[&7].coords, [1.0, 1.0, 1.0]);
  assert_eq!(mesh.hexahedra().count(), 1);
  assert_eq!(mesh.node_set("K1A").unwrap().sorted_unique(), (1..=8).collect::<Vec<_>>());
  let surf = mesh.surface("FACEK1A").unwrap();
  let faces = FaceTable::default();
  let resolved = mesh.resolve_surface_face(&faces, &surf.faces[0]).unwrap();
  assert_eq!(resolved, [1, 2, 3, 4]);
  let dangling = SurfaceFace { eid: 2, label: "S1".into() };
  assert_eq!(
    mesh.resolve_surface_face(&faces, &dangling),
    Err(LookupError::UnknownElement(2))
  );
}

#[test]
fn test_face_table_normalises_labels() {
  let table: FaceTable = [(" s1 ".to_string(), [4, 3, 2, 1])].into_iter().collect();
  assert_eq!(table.len(), 1);
  assert_eq!(table.get("S1"), Some(&[4, 3, 2, 1]));
  assert_eq!(table.labels().collect::<Vec<_>>(), ["S1"]);
  assert_eq!(FaceTable::default().len(), 6);
}
