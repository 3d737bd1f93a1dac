//! Unit tests for tn-realize.

#[cfg(test)]
mod helpers {
    use tn_core::{NodeId, Point};
    use tn_topology::Topology;

    /// Centre 0 at the origin, arms N=1, E=2, S=3, W=4 at distance 100, all
    /// roads two lanes wide.
    pub fn plus() -> Topology {
        tn_topology::generate::star(4, 100.0, 2).unwrap().topology
    }

    /// `A(0) ==3== B(1) --1-- C(2)` on a straight line.
    pub fn narrowing() -> (Topology, [NodeId; 3]) {
        let mut t = Topology::new();
        let a = t.push_node(Point::new(0.0, 0.0));
        let b = t.push_node(Point::new(100.0, 0.0));
        let c = t.push_node(Point::new(200.0, 0.0));
        t.double_link(a, b, 3).unwrap();
        t.double_link(b, c, 1).unwrap();
        (t, [a, b, c])
    }
}

// ── Partitioning ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod partition {
    use std::collections::{BTreeSet, VecDeque};

    use pretty_assertions::assert_eq;
    use tn_core::{GenRng, NodeId};
    use tn_topology::Topology;
    use tn_topology::generate::{CorridorParams, corridor};

    use crate::partition::{LaneRef, balance, partition_lanes, sides};

    fn lane(source: u32, target: u32, lane: u32) -> LaneRef {
        LaneRef { source: NodeId(source), target: NodeId(target), lane }
    }

    #[test]
    fn balance_moves_from_the_larger_side() {
        let mut left: VecDeque<_> = ['a', 'b', 'c'].into();
        let mut right = VecDeque::new();
        balance(&mut left, &mut right);
        assert_eq!(left, VecDeque::from(['b', 'c']));
        assert_eq!(right, VecDeque::from(['a']));

        let mut left = VecDeque::new();
        let mut right: VecDeque<_> = [1, 2, 3, 4].into();
        balance(&mut left, &mut right);
        assert_eq!(left, VecDeque::from([3, 4]));
        assert_eq!(right, VecDeque::from([1, 2]));
    }

    #[test]
    fn balance_bound_holds() {
        for l in 0..8usize {
            for r in 0..8usize {
                let mut left: VecDeque<usize> = (0..l).collect();
                let mut right: VecDeque<usize> = (l..l + r).collect();
                balance(&mut left, &mut right);
                assert!(left.len().abs_diff(right.len()) <= 1, "({l}, {r})");
                let all: BTreeSet<usize> = left.iter().chain(right.iter()).copied().collect();
                assert_eq!(all.len(), l + r);
            }
        }
    }

    #[test]
    fn plus_in_edge_from_north() {
        let t = super::helpers::plus();
        let in_edge = *t.edge(NodeId(1), NodeId(0)).unwrap();

        let s = sides(&t, NodeId(0), &in_edge).unwrap();
        let targets = |d: &VecDeque<&tn_topology::Edge>| d.iter().map(|e| e.target.0).collect::<Vec<_>>();
        assert_eq!(targets(&s.left), vec![2, 1]);
        assert_eq!(targets(&s.right), vec![4, 3]);

        let parts = partition_lanes(&t, NodeId(0), &in_edge).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].head_lane, 1);
        assert_eq!(parts[0].targets, vec![lane(0, 2, 0), lane(0, 2, 1), lane(0, 1, 0), lane(0, 1, 1)]);
        assert_eq!(parts[1].head_lane, 0);
        assert_eq!(parts[1].targets, vec![lane(0, 3, 1), lane(0, 3, 0), lane(0, 4, 1), lane(0, 4, 0)]);
    }

    #[test]
    fn plus_in_edge_from_east() {
        let t = super::helpers::plus();
        let in_edge = *t.edge(NodeId(2), NodeId(0)).unwrap();
        let parts = partition_lanes(&t, NodeId(0), &in_edge).unwrap();
        assert_eq!(parts[0].targets, vec![lane(0, 3, 0), lane(0, 3, 1), lane(0, 2, 0), lane(0, 2, 1)]);
        assert_eq!(parts[1].targets, vec![lane(0, 4, 1), lane(0, 4, 0), lane(0, 1, 1), lane(0, 1, 0)]);
    }

    /// Bearings grow counter-clockwise from east, so on a T with arms E(1),
    /// N(2), W(3) traffic from the east keeps its own road on the left and
    /// runs the right group west before north.
    #[test]
    fn t_junction_uses_counter_clockwise_bearings() {
        let mut t = Topology::new();
        let centre = t.push_node(tn_core::Point::new(0.0, 0.0));
        for point in [(100.0, 0.0), (0.0, 100.0), (-100.0, 0.0)] {
            let arm = t.push_node(tn_core::Point::new(point.0, point.1));
            t.double_link(centre, arm, 1).unwrap();
        }
        let in_edge = *t.edge(NodeId(1), centre).unwrap();

        let parts = partition_lanes(&t, centre, &in_edge).unwrap();
        let ids: Vec<String> = parts[0].targets.iter().map(|l| format!("{}_{}", l.edge_id(), l.lane)).collect();
        assert_eq!(ids, vec!["-E_0_1_0", "-E_0_3_0", "-E_0_2_0"]);
    }

    fn assert_covers(t: &Topology, node: NodeId) {
        let outgoing: BTreeSet<LaneRef> = t
            .outgoing_edges_of(node)
            .flat_map(|e| (0..e.lanes).map(|l| LaneRef { source: e.source, target: e.target, lane: l }))
            .collect();

        for in_edge in t.ingoing_edges_of(node) {
            let parts = partition_lanes(t, node, in_edge).unwrap();
            let heads: Vec<u32> = parts.iter().map(|p| p.head_lane).collect();
            let expected: Vec<u32> = (0..in_edge.lanes).rev().collect();
            assert_eq!(heads, expected);

            let targets: Vec<LaneRef> = parts.iter().flat_map(|p| p.targets.iter().copied()).collect();
            let unique: BTreeSet<LaneRef> = targets.iter().copied().collect();
            assert_eq!(targets.len(), unique.len(), "lane assigned twice at {node}");
            assert_eq!(unique, outgoing, "lanes missing at {node}");
        }
    }

    #[test]
    fn partitions_cover_every_outgoing_lane_once() {
        for seed in 0..6 {
            let params = CorridorParams { junctions: 3, edge_length: 100.0, max_lanes: 3 };
            let g = corridor(params, &mut GenRng::new(seed)).unwrap();
            for node in g.topology.nodes().filter(|n| !g.topology.is_dead_end(n.id)) {
                assert_covers(&g.topology, node.id);
            }
        }
        assert_covers(&super::helpers::plus(), NodeId(0));
    }

    #[test]
    fn short_chunk_leaves_low_head_empty() {
        let (t, [a, b, _]) = super::helpers::narrowing();
        let parts = partition_lanes(&t, b, t.edge(a, b).unwrap()).unwrap();
        let sizes: Vec<usize> = parts.iter().map(|p| p.targets.len()).collect();
        assert_eq!(sizes, vec![2, 2, 0]);
        assert_covers(&t, b);
    }
}

// ── Junction stages ───────────────────────────────────────────────────────────

#[cfg(test)]
mod junction {
    use pretty_assertions::assert_eq;
    use tn_core::{NodeId, Point};
    use tn_topology::Topology;

    use crate::{JunctionKind, RealizeConfig, RealizeError, classify, realize_node, realize_node_as};

    #[test]
    fn classification() {
        let t = super::helpers::plus();
        assert_eq!(classify(&t, NodeId(0)).unwrap(), JunctionKind::TrafficLight);
        assert_eq!(classify(&t, NodeId(3)).unwrap(), JunctionKind::DeadEnd);
        assert!(matches!(classify(&t, NodeId(9)), Err(RealizeError::Topology(_))));
    }

    #[test]
    fn dead_end_lists_lanes_only() {
        for lanes in 1..=4 {
            let mut t = Topology::new();
            let a = t.push_node(Point::new(0.0, 0.0));
            let b = t.push_node(Point::new(0.0, 50.0));
            t.double_link(a, b, lanes).unwrap();

            let cfg = RealizeConfig::default();
            let first = realize_node(&t, a, &cfg).unwrap();
            assert_eq!(first, realize_node(&t, a, &cfg).unwrap());

            let j = &first.junction;
            assert_eq!(j.kind, JunctionKind::DeadEnd);
            assert_eq!(j.inc_lanes.len(), lanes as usize);
            assert_eq!(j.int_lanes.len(), lanes as usize);
            assert_eq!(j.inc_lanes[0], "E_1_0_0");
            assert_eq!(j.int_lanes[0], "-E_0_1_0");
            assert!(j.requests.is_empty());
            assert!(first.internal_edge.is_none());
            assert!(first.via_connections.is_empty());
            assert!(first.internal_connections.is_empty());
            assert!(first.tl_logic.is_none());
        }
    }

    #[test]
    fn forced_dead_end_on_a_crossing() {
        let t = super::helpers::plus();
        let r = realize_node_as(&t, NodeId(0), JunctionKind::DeadEnd, &RealizeConfig::default()).unwrap();
        assert_eq!(r.junction.inc_lanes.len(), 8);
        assert_eq!(r.junction.int_lanes.len(), 8);
        assert!(r.internal_edge.is_none());
    }

    #[test]
    fn priority_stage_has_no_signal() {
        let t = super::helpers::plus();
        let r = realize_node_as(&t, NodeId(0), JunctionKind::Priority, &RealizeConfig::default()).unwrap();
        assert_eq!(r.junction.kind, JunctionKind::Priority);
        assert!(r.tl_logic.is_none());
        assert!(r.via_connections.iter().all(|c| c.tl.is_none()));

        let internal = r.internal_edge.unwrap();
        assert_eq!(internal.id, "N_0_0");
        assert_eq!(internal.lanes.len(), 8);
        assert_eq!(internal.lanes[5].id, "N_0_0_5");
        assert_eq!(internal.lanes[5].index, 5);
        assert_eq!(internal.lanes[5].speed, 5.0);
        assert_eq!(internal.lanes[5].length, 5.0);
        assert!(internal.lanes[5].shape.is_empty());
    }

    #[test]
    fn first_connections_from_north() {
        let t = super::helpers::plus();
        let r = realize_node(&t, NodeId(0), &RealizeConfig::default()).unwrap();

        let via = &r.via_connections[0];
        assert_eq!(via.from_edge, "E_1_0");
        assert_eq!(via.to_edge, "-E_0_2");
        assert_eq!((via.from_lane, via.to_lane, via.link_index), (1, 0, 0));
        assert_eq!(via.via, "N_0_0_0");
        assert_eq!(via.dir, "s");
        assert_eq!(via.tl.as_deref(), Some("N_0"));

        let int = &r.internal_connections[4];
        assert_eq!(int.from_edge, "N_0_0");
        assert_eq!(int.to_edge, "-E_0_3");
        assert_eq!((int.from_lane, int.to_lane), (1, 1));
    }

    #[test]
    fn phases_alternate_go_and_yield() {
        let t = super::helpers::plus();
        let cfg = RealizeConfig { phase_duration: 12.5, ..RealizeConfig::default() };
        let tl = realize_node(&t, NodeId(0), &cfg).unwrap().tl_logic.unwrap();

        assert_eq!(tl.id, "N_0");
        let states: Vec<&str> = tl.phases.iter().map(|p| p.state.as_str()).collect();
        assert_eq!(states, vec![
            "ggrrrrrr", "yyrrrrrr",
            "rrggrrrr", "rryyrrrr",
            "rrrrggrr", "rrrryyrr",
            "rrrrrrgg", "rrrrrryy",
        ]);
        assert!(tl.phases.iter().all(|p| p.duration == 12.5));
    }

    #[test]
    fn every_link_is_green_exactly_once() {
        let t = super::helpers::plus();
        let r = realize_node(&t, NodeId(0), &RealizeConfig::default()).unwrap();
        let tl = r.tl_logic.unwrap();
        let links = r.internal_edge.unwrap().lanes.len();

        for link in 0..links {
            let greens = tl.phases.iter().filter(|p| p.state.as_bytes()[link] == b'g').count();
            assert_eq!(greens, 1, "link {link}");
        }
        for pair in tl.phases.chunks(2) {
            assert_eq!(pair[0].state.replace('g', "y"), pair[1].state);
        }
    }

    #[test]
    fn empty_chunk_link_stays_red() {
        let (t, [_, b, _]) = super::helpers::narrowing();
        let r = realize_node(&t, b, &RealizeConfig::default()).unwrap();
        let tl = r.tl_logic.unwrap();
        // in-edge from A: heads 2,1,0 → links 0,1,2 (link 2 has no targets);
        // in-edge from C: head 0 → link 3
        assert!(r.via_connections.iter().all(|c| c.link_index != 2));
        assert!(tl.phases.iter().all(|p| p.state.as_bytes()[2] == b'r'));
        assert_eq!(tl.phases[0].state, "ggrr");
        assert_eq!(tl.phases[2].state, "rrrg");
    }

    #[test]
    fn forced_priority_on_dead_end_is_infeasible() {
        let t = super::helpers::plus();
        let err = realize_node_as(&t, NodeId(2), JunctionKind::Priority, &RealizeConfig::default()).unwrap_err();
        match err {
            RealizeError::Infeasible { node, in_edge, incoming, outgoing } => {
                assert_eq!(node, NodeId(2));
                assert_eq!(in_edge, "-E_0_2");
                assert_eq!((incoming, outgoing), (2, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn isolated_node_rejected() {
        let mut t = Topology::new();
        let a = t.push_node(Point::new(0.0, 0.0));
        assert!(matches!(classify(&t, a), Err(RealizeError::Isolated(id)) if id == a));
        assert!(matches!(
            realize_node_as(&t, a, JunctionKind::DeadEnd, &RealizeConfig::default()),
            Err(RealizeError::Isolated(_))
        ));
    }
}

// ── Compilation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod compile {
    use pretty_assertions::assert_eq;
    use tn_core::{GenRng, Point};
    use tn_topology::Topology;
    use tn_topology::generate::{CorridorParams, corridor};

    use crate::{JunctionKind, RealizeConfig, RealizeError, compile};

    #[test]
    fn plus_scenario() {
        let net = compile(&super::helpers::plus(), &RealizeConfig::default()).unwrap();

        assert_eq!(net.junctions.len(), 5);
        assert_eq!(net.dead_ends().count(), 4);
        assert_eq!(net.junctions[0].kind, JunctionKind::TrafficLight);
        assert_eq!(net.road_edges.len(), 8);
        assert_eq!(net.internal_edges.len(), 1);
        assert_eq!(net.internal_lane_count(), 8);
        assert_eq!(net.via_connections.len(), 32);
        assert_eq!(net.internal_connections.len(), 32);
        assert_eq!(net.tl_logics.len(), 1);
        assert_eq!(net.tl_logics[0].phases.len(), 8);
    }

    #[test]
    fn road_edges_follow_topology() {
        let net = compile(&super::helpers::plus(), &RealizeConfig::default()).unwrap();
        let ids: Vec<&str> = net.road_edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["-E_0_1", "-E_0_2", "-E_0_3", "-E_0_4", "E_1_0", "E_2_0", "E_3_0", "E_4_0"]);

        let east = net.road_edge("-E_0_2").unwrap();
        assert_eq!(east.from, "N_0");
        assert_eq!(east.to, "N_2");
        assert_eq!(east.shape, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert_eq!(east.lanes.len(), 2);
        assert_eq!(east.lanes[1].id, "-E_0_2_1");
        assert_eq!(east.lanes[1].speed, 13.0);
        assert_eq!(east.lanes[1].length, 100.0);
        assert_eq!(east.lanes[1].shape, east.shape);
    }

    #[test]
    fn lane_speed_is_configurable() {
        let cfg = RealizeConfig { lane_speed: 8.0, internal_lane_speed: 3.0, ..RealizeConfig::default() };
        let net = compile(&super::helpers::plus(), &cfg).unwrap();
        assert!(net.road_edges.iter().flat_map(|e| &e.lanes).all(|l| l.speed == 8.0));
        assert!(net.internal_edges.iter().flat_map(|e| &e.lanes).all(|l| l.speed == 3.0));
    }

    #[test]
    fn compilation_is_deterministic() {
        let g = corridor(CorridorParams::default(), &mut GenRng::new(42)).unwrap();
        let cfg = RealizeConfig::default();
        assert_eq!(compile(&g.topology, &cfg).unwrap(), compile(&g.topology, &cfg).unwrap());
    }

    #[test]
    fn corridor_dead_ends_match_topology() {
        let g = corridor(CorridorParams::default(), &mut GenRng::new(3)).unwrap();
        let net = compile(&g.topology, &RealizeConfig::default()).unwrap();
        let ids: Vec<String> = net.dead_ends().map(|j| j.id.clone()).collect();
        assert_eq!(ids, g.topology.dead_end_ids());
        assert_eq!(net.tl_logics.len(), net.junctions.len() - ids.len());
    }

    #[test]
    fn isolated_node_aborts_compilation() {
        let (mut t, _) = super::helpers::narrowing();
        t.push_node(Point::new(500.0, 500.0));
        assert!(matches!(compile(&t, &RealizeConfig::default()), Err(RealizeError::Isolated(_))));
    }

    #[test]
    fn empty_topology_compiles_to_empty_network() {
        let net = compile(&Topology::new(), &RealizeConfig::default()).unwrap();
        assert_eq!(net, crate::Network::default());
    }
}
