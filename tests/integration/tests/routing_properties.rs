//! Integration test: properties every router must share, checked over
//! hand-built and randomly generated meshes.

use relay_core::NodeId;
use relay_integration_tests::{ids, message, random_topology, square_cycle};
use relay_routing::{AlgorithmKind, BacktrackingRouter, RouteResult, Router, VisitCounter};
use relay_settlement::{PriceController, SettlementProcessor};

const SEEDS: [u64; 6] = [1, 2, 3, 5, 8, 13];

// =========================================================================
// 4-node cycle
// =========================================================================

#[test]
fn test_square_cycle_a_to_c_every_router() {
    for kind in AlgorithmKind::ALL {
        let mut topo = square_cycle(0.1);
        let msg = message(&mut topo, "A", "C", 1);
        let result = kind
            .router()
            .route(&mut topo, &msg, &mut VisitCounter::default())
            .unwrap();

        let path = result.path().unwrap_or_else(|| panic!("{} found nothing", kind));
        let hops: Vec<&str> = path.entries().iter().map(|e| e.node.as_str()).collect();
        assert_eq!(hops.len(), 3, "{}: {:?}", kind, hops);
        assert_eq!(hops[0], "C");
        assert!(hops[1] == "B" || hops[1] == "D", "{}: relay {}", kind, hops[1]);
        assert_eq!(hops[2], "A");

        let sum: f64 = path.entries().iter().map(|e| e.charge).sum();
        assert!(sum.abs() < 1e-9, "{}: charges sum to {}", kind, sum);
    }
}

#[test]
fn test_square_cycle_settles_to_zero_net() {
    for kind in AlgorithmKind::ALL {
        let mut topo = square_cycle(0.1);
        let msg = message(&mut topo, "A", "C", 1);
        let path = kind
            .router()
            .route(&mut topo, &msg, &mut ())
            .unwrap()
            .into_path()
            .unwrap();
        SettlementProcessor::<PriceController>::default()
            .settle(&mut topo, &msg, path)
            .unwrap();

        assert!(topo.get(&NodeId::new("A")).unwrap().balance < 0.0);
        assert!(topo.get(&NodeId::new("C")).unwrap().balance > 0.0);
        assert!(topo.total_balance().abs() < 1e-9);
    }
}

// =========================================================================
// Random meshes
// =========================================================================

#[test]
fn test_zero_sum_for_every_router() {
    for seed in SEEDS {
        let mut topo = random_topology(7, 0.35, seed);
        let nodes = ids(&topo);
        for from in &nodes {
            for to in &nodes {
                for kind in AlgorithmKind::ALL {
                    let msg = message(&mut topo, from.as_str(), to.as_str(), 3);
                    if let RouteResult::Found(path) =
                        kind.router().route(&mut topo, &msg, &mut ()).unwrap()
                    {
                        let entries = path.entries();
                        let (last, rest) = entries.split_last().unwrap();
                        let relays: f64 = rest.iter().map(|e| e.charge).sum();
                        assert!(
                            (relays + last.charge).abs() < 1e-9,
                            "seed {} {} {} -> {}: unbalanced",
                            seed,
                            kind,
                            from,
                            to
                        );
                        assert_eq!(path.destination(), Some(to));
                        assert_eq!(path.origin(), Some(from));
                    }
                }
            }
        }
    }
}

#[test]
fn test_reachability_equivalence() {
    for seed in SEEDS {
        let mut topo = random_topology(8, 0.2, seed);
        let nodes = ids(&topo);
        for from in &nodes {
            for to in &nodes {
                let reachable = topo.is_reachable(
                    topo.index_of(from).unwrap(),
                    topo.index_of(to).unwrap(),
                );
                for kind in AlgorithmKind::ALL {
                    let msg = message(&mut topo, from.as_str(), to.as_str(), 1);
                    let found = kind
                        .router()
                        .route(&mut topo, &msg, &mut ())
                        .unwrap()
                        .is_found();
                    assert_eq!(
                        found, reachable,
                        "seed {} {} {} -> {}",
                        seed, kind, from, to
                    );
                }
            }
        }
    }
}

#[test]
fn test_backtracking_never_repeats_a_node() {
    let router = BacktrackingRouter::new();
    for seed in SEEDS {
        let mut topo = random_topology(9, 0.4, seed);
        let nodes = ids(&topo);
        for from in &nodes {
            for to in &nodes {
                let msg = message(&mut topo, from.as_str(), to.as_str(), 2);
                if let RouteResult::Found(path) = router.route(&mut topo, &msg, &mut ()).unwrap() {
                    assert!(
                        !path.has_repeated_node(),
                        "seed {} {} -> {}: {:?}",
                        seed,
                        from,
                        to,
                        path.hops_in_travel_order()
                    );
                }
            }
        }
    }
}

#[test]
fn test_every_router_counts_examined_nodes() {
    let mut topo = random_topology(7, 0.5, 21);
    let nodes = ids(&topo);
    let (from, to) = (nodes[0].as_str(), nodes[6].as_str());
    for kind in AlgorithmKind::ALL {
        let msg = message(&mut topo, from, to, 1);
        let mut counter = VisitCounter::default();
        let result = kind.router().route(&mut topo, &msg, &mut counter).unwrap();
        if let Some(path) = result.path() {
            // The destination and every relay were examined at least once.
            assert!(counter.visits >= path.len() - 1, "{}", kind);
        }
    }
}

#[test]
fn test_unknown_node_is_hard_error_for_every_router() {
    for kind in AlgorithmKind::ALL {
        let mut topo = square_cycle(0.1);
        let msg = message(&mut topo, "A", "nowhere", 1);
        assert!(kind.router().route(&mut topo, &msg, &mut ()).is_err());
    }
}
