use parampara_graph::subgraph::extract;
use parampara_graph::{GraphEdge, GraphNode, NodeAttributes, NodeCategory, TEACHES};

fn person(id: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        label: id.to_uppercase(),
        category: NodeCategory::Person,
        attributes: NodeAttributes::default(),
    }
}

fn node(id: &str, category: NodeCategory) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        label: id.to_uppercase(),
        category,
        attributes: NodeAttributes::default(),
    }
}

fn teaches(id: &str, source: &str, target: &str) -> GraphEdge {
    edge(id, source, target, TEACHES)
}

fn edge(id: &str, source: &str, target: &str, relation: &str) -> GraphEdge {
    GraphEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        relation: relation.to_string(),
    }
}

fn ids(g: &parampara_graph::LineageGraph) -> Vec<&str> {
    let mut out: Vec<&str> = g.nodes.iter().map(|n| n.node.id.as_str()).collect();
    out.sort();
    out
}

fn level(g: &parampara_graph::LineageGraph, id: &str) -> i32 {
    g.nodes
        .iter()
        .find(|n| n.node.id == id)
        .unwrap_or_else(|| panic!("node {id} missing"))
        .level
}

#[test]
fn output_never_contains_dangling_edges() {
    // "b" teaches a node that is absent from the snapshot.
    let nodes = vec![person("a"), person("b")];
    let edges = vec![teaches("e1", "a", "b"), teaches("e2", "b", "ghost")];

    let g = extract(&nodes, &edges, None, 0);
    g.validate().expect("no dangling endpoints");
    assert_eq!(ids(&g), vec!["a", "b"]);
    assert_eq!(g.edges.len(), 1);
    assert_eq!(g.edges[0].id, "e1");
}

#[test]
fn depth_zero_keeps_only_the_focal_person() {
    let nodes = vec![person("a"), person("b"), person("c")];
    let edges = vec![teaches("e1", "a", "b"), teaches("e2", "b", "c")];

    let g = extract(&nodes, &edges, Some("b"), 0);
    assert_eq!(ids(&g), vec!["b"]);
    assert!(g.edges.is_empty());
    assert_eq!(g.focal.as_deref(), Some("b"));
}

#[test]
fn node_set_grows_monotonically_with_depth() {
    let nodes = vec![person("a"), person("b"), person("c"), person("d")];
    let edges = vec![
        teaches("e1", "a", "b"),
        teaches("e2", "b", "c"),
        teaches("e3", "c", "d"),
    ];

    let mut previous: Vec<String> = Vec::new();
    for depth in 0..=4 {
        let g = extract(&nodes, &edges, Some("a"), depth);
        let current: Vec<String> = ids(&g).into_iter().map(str::to_string).collect();
        assert!(
            previous.iter().all(|id| current.contains(id)),
            "depth {depth} lost nodes: {previous:?} -> {current:?}"
        );
        previous = current;
    }
    assert_eq!(previous.len(), 4);
}

#[test]
fn traversal_follows_teaches_edges_in_both_directions() {
    // b taught the focal, focal taught c; both sides are reachable at depth 1.
    let nodes = vec![person("focal"), person("b"), person("c")];
    let edges = vec![teaches("e1", "b", "focal"), teaches("e2", "focal", "c")];

    let g = extract(&nodes, &edges, Some("focal"), 1);
    assert_eq!(ids(&g), vec!["b", "c", "focal"]);
    assert_eq!(g.edges.len(), 2);
}

#[test]
fn hierarchy_level_is_antisymmetric_for_a_single_edge() {
    let nodes = vec![person("a"), person("b")];
    let edges = vec![teaches("e1", "a", "b")];

    let g = extract(&nodes, &edges, None, 0);
    assert_eq!(level(&g, "a"), 1);
    assert_eq!(level(&g, "b"), -1);
}

#[test]
fn chain_scenario_centered_on_the_middle_person() {
    // A taught B, B taught C; centered on B with depth 1 the whole chain is
    // visible and levels fall off by one per hop.
    let nodes = vec![person("a"), person("b"), person("c")];
    let edges = vec![teaches("e1", "a", "b"), teaches("e2", "b", "c")];

    let g = extract(&nodes, &edges, Some("b"), 1);
    assert_eq!(ids(&g), vec!["a", "b", "c"]);
    assert_eq!(g.edges.len(), 2);
    assert_eq!(level(&g, "a"), 1);
    assert_eq!(level(&g, "b"), 0);
    assert_eq!(level(&g, "c"), -1);
}

#[test]
fn unknown_focal_yields_an_empty_graph() {
    let nodes = vec![person("a"), person("b")];
    let edges = vec![teaches("e1", "a", "b")];

    let g = extract(&nodes, &edges, Some("nobody"), 3);
    assert!(g.nodes.is_empty());
    assert!(g.edges.is_empty());
    assert_eq!(g.focal.as_deref(), Some("nobody"));
}

#[test]
fn isolated_focal_person_survives_alone() {
    let nodes = vec![person("hermit"), person("a"), person("b")];
    let edges = vec![teaches("e1", "a", "b")];

    let g = extract(&nodes, &edges, Some("hermit"), 3);
    assert_eq!(ids(&g), vec!["hermit"]);
    assert!(g.edges.is_empty());
    assert_eq!(level(&g, "hermit"), 0);
}

#[test]
fn without_a_focal_only_edge_touched_persons_are_kept() {
    let nodes = vec![person("a"), person("b"), person("loner")];
    let edges = vec![teaches("e1", "a", "b")];

    let g = extract(&nodes, &edges, None, 0);
    assert_eq!(ids(&g), vec!["a", "b"]);
}

#[test]
fn non_person_nodes_are_excluded_along_with_their_edges() {
    let nodes = vec![
        person("a"),
        person("b"),
        node("gompa", NodeCategory::Institution),
        node("retreat", NodeCategory::Event),
    ];
    let edges = vec![
        teaches("e1", "a", "b"),
        teaches("e2", "a", "gompa"),
        teaches("e3", "retreat", "b"),
    ];

    let g = extract(&nodes, &edges, Some("a"), 5);
    assert_eq!(ids(&g), vec!["a", "b"]);
    assert_eq!(g.edges.len(), 1);
    g.validate().expect("no dangling endpoints");
}

#[test]
fn non_teaches_relations_neither_traverse_nor_appear() {
    let nodes = vec![person("a"), person("b"), person("c")];
    let edges = vec![teaches("e1", "a", "b"), edge("e2", "b", "c", "peer_of")];

    let g = extract(&nodes, &edges, Some("a"), 5);
    assert_eq!(ids(&g), vec!["a", "b"]);
    assert_eq!(g.edges.len(), 1);
}

#[test]
fn levels_are_relative_to_the_extracted_neighborhood() {
    // At depth 1 around "b", the c->d edge is outside the neighborhood, so c's
    // level only reflects the visible b->c edge.
    let nodes = vec![person("a"), person("b"), person("c"), person("d")];
    let edges = vec![
        teaches("e1", "a", "b"),
        teaches("e2", "b", "c"),
        teaches("e3", "c", "d"),
    ];

    let g = extract(&nodes, &edges, Some("b"), 1);
    assert_eq!(ids(&g), vec!["a", "b", "c"]);
    assert_eq!(level(&g, "c"), -1);
}

#[test]
fn equal_levels_get_identical_radii() {
    // a and b each teach one student; same level, same radius.
    let nodes = vec![person("a"), person("b"), person("s1"), person("s2")];
    let edges = vec![teaches("e1", "a", "s1"), teaches("e2", "b", "s2")];

    let g = extract(&nodes, &edges, None, 0);
    let radius = |id: &str| {
        g.nodes
            .iter()
            .find(|n| n.node.id == id)
            .map(|n| n.radius)
            .unwrap()
    };
    assert_eq!(radius("a"), radius("b"));
    assert!(radius("a") > radius("s1"));
}

#[test]
fn empty_snapshot_degrades_to_an_empty_graph() {
    let g = extract(&[], &[], None, 0);
    assert!(g.nodes.is_empty());
    assert!(g.edges.is_empty());

    let g = extract(&[], &[], Some("a"), 10);
    assert!(g.nodes.is_empty());
}

#[test]
fn self_loop_contributes_zero_net_level() {
    // A self-referential teaches edge is degenerate but must not skew levels
    // or dangle.
    let nodes = vec![person("a"), person("b")];
    let edges = vec![teaches("e1", "a", "a"), teaches("e2", "a", "b")];

    let g = extract(&nodes, &edges, Some("a"), 1);
    g.validate().expect("no dangling endpoints");
    assert_eq!(ids(&g), vec!["a", "b"]);
    assert_eq!(level(&g, "a"), 1);
}
