//! Unit tests for tn-topology.
//!
//! All tests use hand-built topologies or the in-crate generators.

#[cfg(test)]
mod helpers {
    use tn_core::{NodeId, Point};
    use crate::Topology;

    /// Centre node 0 with four 2-lane arms.
    ///
    /// ```text
    ///        1
    ///        |
    ///   4 -- 0 -- 2
    ///        |
    ///        3
    /// ```
    pub fn plus() -> (Topology, [NodeId; 5]) {
        let mut t = Topology::new();
        let c = t.push_node(Point::new(0.0, 0.0));
        let n = t.push_node(Point::new(0.0, 100.0));
        let e = t.push_node(Point::new(100.0, 0.0));
        let s = t.push_node(Point::new(0.0, -100.0));
        let w = t.push_node(Point::new(-100.0, 0.0));
        for arm in [n, e, s, w] {
            t.double_link(c, arm, 2).unwrap();
        }
        (t, [c, n, e, s, w])
    }

    /// Every `outgoing[a][b]` has a matching `ingoing[b][a]` and a reverse.
    pub fn assert_symmetric(t: &Topology) {
        for edge in t.edges() {
            let back = t
                .ingoing_edges_of(edge.target)
                .find(|e| e.source == edge.source)
                .expect("ingoing entry for every outgoing edge");
            assert_eq!(back, edge);
            let rev = t.edge(edge.target, edge.source).expect("reverse edge");
            assert_eq!(rev.lanes, edge.lanes);
        }
        let ingoing: usize = t.nodes().map(|n| t.ingoing_edges_of(n.id).count()).sum();
        assert_eq!(ingoing, t.edge_count());
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use tn_core::{NodeId, Point};
    use crate::{Topology, TopologyError};

    #[test]
    fn empty_topology() {
        let t = Topology::new();
        assert!(t.is_empty());
        assert_eq!(t.edge_count(), 0);
        assert_eq!(t.next_node_id(), NodeId(0));
        assert_eq!(t.outgoing_edges_of(NodeId(3)).count(), 0);
    }

    #[test]
    fn push_after_max_id_fills_lowest_gap() {
        let mut t = Topology::new();
        t.add_node(NodeId(0), Point::new(1.0, 2.0)).unwrap();
        t.add_node(NodeId(u32::MAX), Point::new(3.0, 4.0)).unwrap();

        assert_eq!(t.next_node_id(), NodeId(1));
        let pushed = t.push_node(Point::new(5.0, 6.0));
        assert_eq!(pushed, NodeId(1));
        assert_eq!(t.node_count(), 3);
        assert_eq!(t.point(NodeId(0)).unwrap(), Point::new(1.0, 2.0));
        assert_eq!(t.next_node_id(), NodeId(2));
    }

    #[test]
    fn double_link_inserts_both_directions() {
        let mut t = Topology::new();
        let a = t.push_node(Point::new(0.0, 0.0));
        let b = t.push_node(Point::new(10.0, 0.0));
        t.double_link(a, b, 3).unwrap();

        assert_eq!(t.edge_count(), 2);
        assert_eq!(t.edge(a, b).unwrap().lanes, 3);
        assert_eq!(t.edge(b, a).unwrap().lanes, 3);
        assert_eq!(t.ingoing_edges_of(a).next().unwrap().source, b);
        super::helpers::assert_symmetric(&t);
    }

    #[test]
    fn plus_topology_is_symmetric() {
        let (t, [c, ..]) = super::helpers::plus();
        assert_eq!(t.node_count(), 5);
        assert_eq!(t.edge_count(), 8);
        assert_eq!(t.outgoing_edges_of(c).count(), 4);
        assert_eq!(t.ingoing_edges_of(c).count(), 4);
        super::helpers::assert_symmetric(&t);
    }

    #[test]
    fn adjacency_is_ascending_by_neighbour() {
        let (t, [c, n, e, s, w]) = super::helpers::plus();
        let targets: Vec<_> = t.outgoing_edges_of(c).map(|e| e.target).collect();
        assert_eq!(targets, vec![n, e, s, w]);
        let sources: Vec<_> = t.ingoing_edges_of(c).map(|e| e.source).collect();
        assert_eq!(sources, vec![n, e, s, w]);
    }

    #[test]
    fn unknown_node_rejected() {
        let mut t = Topology::new();
        let a = t.push_node(Point::new(0.0, 0.0));
        let err = t.double_link(a, NodeId(9), 1).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownNode(NodeId(9))));
        assert_eq!(t.edge_count(), 0, "failed link must not leave half an edge");
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut t = Topology::new();
        t.add_node(NodeId(4), Point::new(0.0, 0.0)).unwrap();
        let err = t.add_node(NodeId(4), Point::new(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateNode(NodeId(4))));
        assert_eq!(t.next_node_id(), NodeId(5));
    }

    #[test]
    fn self_loop_and_zero_lanes_rejected() {
        let mut t = Topology::new();
        let a = t.push_node(Point::new(0.0, 0.0));
        let b = t.push_node(Point::new(1.0, 0.0));
        assert!(matches!(t.double_link(a, a, 1), Err(TopologyError::SelfLoop(_))));
        assert!(matches!(t.double_link(a, b, 0), Err(TopologyError::InvalidLaneCount { .. })));
    }

    #[test]
    fn dead_ends_are_single_pair_nodes() {
        let (t, [c, ..]) = super::helpers::plus();
        assert!(!t.is_dead_end(c));
        assert_eq!(t.dead_end_ids(), vec!["N_1", "N_2", "N_3", "N_4"]);
    }

    #[test]
    fn edge_and_lane_ids() {
        let (t, [c, n, ..]) = super::helpers::plus();
        let out = t.edge(c, n).unwrap();
        assert_eq!(out.id(), "-E_0_1");
        assert_eq!(out.lane_id(1), "-E_0_1_1");
        assert_eq!(out.reversed().id(), "E_1_0");
    }
}

// ── JSON documents ────────────────────────────────────────────────────────────

#[cfg(test)]
mod document {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tn_core::NodeId;

    use crate::document::{load_topology_json, load_topology_reader, save_topology_json};
    use crate::{TopologyDocument, TopologyError};

    const ONE_WAY_LISTED: &str = r#"{
        "nodes": [
            {"id": 0, "point": {"x": 0.0, "y": 0.0}},
            {"id": 1, "point": {"x": 100.0, "y": 0.0}},
            {"id": 2, "point": {"x": 200.0, "y": 0.0}}
        ],
        "edges": [
            {"source": 0, "target": 1, "number_of_lanes": 2},
            {"source": 1, "target": 2, "number_of_lanes": 1}
        ]
    }"#;

    #[test]
    fn loader_rebuilds_reverse_edges() {
        let t = load_topology_reader(Cursor::new(ONE_WAY_LISTED)).unwrap();
        assert_eq!(t.node_count(), 3);
        assert_eq!(t.edge_count(), 4);
        assert_eq!(t.edge(NodeId(2), NodeId(1)).unwrap().lanes, 1);
        super::helpers::assert_symmetric(&t);
    }

    #[test]
    fn conflicting_lane_counts_rejected() {
        let json = r#"{
            "nodes": [{"id": 0, "point": {"x": 0, "y": 0}}, {"id": 1, "point": {"x": 1, "y": 0}}],
            "edges": [{"source": 0, "target": 1, "number_of_lanes": 2},
                      {"source": 1, "target": 0, "number_of_lanes": 3}]
        }"#;
        let err = load_topology_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, TopologyError::ConflictingLanes { a: 2, b: 3, .. }));
    }

    #[test]
    fn unknown_edge_endpoint_rejected() {
        let json = r#"{"nodes": [{"id": 0, "point": {"x": 0, "y": 0}}],
                       "edges": [{"source": 0, "target": 7, "number_of_lanes": 1}]}"#;
        let err = load_topology_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownNode(NodeId(7))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = load_topology_reader(Cursor::new("{\"nodes\": 3}")).unwrap_err();
        assert!(matches!(err, TopologyError::Json(_)));
    }

    #[test]
    fn file_round_trip() {
        let (t, _) = super::helpers::plus();
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("topology.json");
        save_topology_json(&t, &path).unwrap();

        let back = load_topology_json(&path).unwrap();
        assert_eq!(TopologyDocument::from_topology(&back), TopologyDocument::from_topology(&t));
    }
}

// ── Layouts ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use std::io::Cursor;

    use crate::layout::{load_layout_config_reader, write_layout_config};
    use crate::{DeadEnd, TopologyError};

    const CONFIG: &str = "\
layout:
  main:
    - {A: N_1, B: N_3}
  side:
    - {A: N_2, B: N_4}
realization:
  phase_duration: 20.0
";

    fn dead_ends() -> Vec<String> {
        ["N_1", "N_2", "N_3", "N_4"].map(String::from).to_vec()
    }

    #[test]
    fn valid_layout() {
        let cfg = load_layout_config_reader(Cursor::new(CONFIG)).unwrap();
        let layout = cfg.validate(&dead_ends()).unwrap();
        assert_eq!(layout.main.len(), 1);
        assert_eq!(layout.side.len(), 1);
        assert!(layout.main_dead_ends().contains(&DeadEnd("N_3".into())));
        assert_eq!(layout.side_dead_ends().len(), 2);
        assert_eq!(layout.main[0].to_string(), "<N_1 - N_3>");
    }

    #[test]
    fn uncovered_dead_end_rejected() {
        let cfg = load_layout_config_reader(Cursor::new(CONFIG)).unwrap();
        let mut ends = dead_ends();
        ends.push("N_9".into());
        let err = cfg.validate(&ends).unwrap_err();
        assert!(matches!(err, TopologyError::UncoveredDeadEnd(ref d) if d == "N_9"));
    }

    #[test]
    fn unknown_dead_end_rejected() {
        let cfg = load_layout_config_reader(Cursor::new(CONFIG)).unwrap();
        let err = cfg.validate(&["N_1".into(), "N_3".into()]).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownDeadEnd(ref d) if d == "N_2"));
    }

    #[test]
    fn reversed_duplicate_axis_rejected() {
        let yaml = "layout:\n  main:\n    - {A: N_1, B: N_3}\n  side:\n    - {A: N_3, B: N_1}\n";
        let cfg = load_layout_config_reader(Cursor::new(yaml)).unwrap();
        let err = cfg.validate(&["N_1".into(), "N_3".into()]).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateAxis { .. }));
    }

    #[test]
    fn written_config_loads_back() {
        let cfg = load_layout_config_reader(Cursor::new(CONFIG)).unwrap();
        let mut out = Vec::new();
        write_layout_config(&cfg, &mut out).unwrap();
        let back = load_layout_config_reader(Cursor::new(out)).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_layout_section_is_yaml_error() {
        let err = load_layout_config_reader(Cursor::new("realization: {}\n")).unwrap_err();
        assert!(matches!(err, TopologyError::Yaml(_)));
    }
}

// ── Generators ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use tn_core::{GenRng, NodeId, Point};

    use crate::generate::{CorridorParams, corridor, star};
    use crate::{Layout, LayoutConfig, TopologyError};

    /// Re-validate a generated layout the same way `config.yml` would be.
    fn revalidate(layout: &Layout, dead_ends: &[String]) -> Layout {
        LayoutConfig::from_layout(layout).validate(dead_ends).unwrap()
    }

    #[test]
    fn star_has_cardinal_arms() {
        let g = star(4, 100.0, 2).unwrap();
        let t = &g.topology;
        assert_eq!(t.node_count(), 5);
        assert_eq!(t.point(NodeId(1)).unwrap(), Point::new(0.0, 100.0));
        assert_eq!(t.point(NodeId(2)).unwrap(), Point::new(100.0, 0.0));
        assert_eq!(t.point(NodeId(3)).unwrap(), Point::new(0.0, -100.0));
        assert_eq!(t.point(NodeId(4)).unwrap(), Point::new(-100.0, 0.0));
        super::helpers::assert_symmetric(t);

        let layout = revalidate(&g.layout, &t.dead_end_ids());
        assert_eq!(layout.main[0].to_string(), "<N_1 - N_3>");
        assert_eq!(layout.side[0].to_string(), "<N_2 - N_4>");
    }

    #[test]
    fn star_needs_two_arms() {
        assert!(matches!(star(1, 100.0, 1), Err(TopologyError::Generator(_))));
    }

    #[test]
    fn odd_star_layout_covers_every_arm() {
        let g = star(5, 50.0, 1).unwrap();
        revalidate(&g.layout, &g.topology.dead_end_ids());
    }

    #[test]
    fn corridor_is_reproducible() {
        let params = CorridorParams { junctions: 4, edge_length: 80.0, max_lanes: 3 };
        let a = corridor(params, &mut GenRng::new(170_701)).unwrap();
        let b = corridor(params, &mut GenRng::new(170_701)).unwrap();

        let points = |g: &crate::generate::Generated| -> Vec<Point> {
            g.topology.nodes().map(|n| n.point).collect()
        };
        assert_eq!(points(&a), points(&b));
        let lanes = |g: &crate::generate::Generated| -> Vec<u32> {
            g.topology.edges().map(|e| e.lanes).collect()
        };
        assert_eq!(lanes(&a), lanes(&b));
    }

    #[test]
    fn corridor_shape_and_layout() {
        let params = CorridorParams { junctions: 3, edge_length: 100.0, max_lanes: 2 };
        let g = corridor(params, &mut GenRng::new(7)).unwrap();
        let t = &g.topology;
        super::helpers::assert_symmetric(t);

        // west + east + (junction, north, south) per main-line junction
        let junctions = (t.node_count() - 2) / 3;
        assert!((1..=6).contains(&junctions), "got {junctions}");
        assert_eq!(t.dead_end_ids().len(), 2 + 2 * junctions);
        assert_eq!(g.layout.side.len(), junctions);

        for e in t.edges() {
            assert!((1..=2).contains(&e.lanes));
        }
        revalidate(&g.layout, &t.dead_end_ids());
    }

    #[test]
    fn corridor_rejects_zero_lanes() {
        let params = CorridorParams { max_lanes: 0, ..CorridorParams::default() };
        assert!(corridor(params, &mut GenRng::new(1)).is_err());
    }
}
