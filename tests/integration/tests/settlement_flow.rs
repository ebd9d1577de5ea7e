//! Integration test: routing, settlement and pricing working together.

use relay_core::{MessageId, NodeId, PricingConfig, Topology};
use relay_integration_tests::{edge, message, spec};
use relay_routing::{AlgorithmKind, BestFirstRouter, RouteResult, Router};
use relay_settlement::{PriceAdjustment, PriceController, PricingPolicy, SettlementProcessor};

fn exposure(topo: &mut Topology, node: &str, messages: u64) {
    let node = topo.get_mut(&NodeId::new(node)).unwrap();
    for sequence in 1..=messages {
        node.observe(&MessageId {
            sender: NodeId::new("S"),
            sequence,
        });
    }
}

fn line() -> Topology {
    Topology::from_parts(
        vec![
            spec("A", 0.0, 0.0, 0.5),
            spec("B", 0.0, 1.0, 0.5),
            spec("C", 0.0, 2.0, 0.5),
        ],
        vec![edge("A", "B"), edge("B", "C")],
    )
    .unwrap()
}

// =========================================================================
// Price controller
// =========================================================================

#[test]
fn test_three_exposures_no_relays_decreases_once() {
    let mut topo = line();
    exposure(&mut topo, "B", 3);
    let controller = PriceController::default();
    let node = topo.get_mut(&NodeId::new("B")).unwrap();
    assert_eq!(node.counters.seen, 3);

    let adj = controller.adjust(node);
    assert!(matches!(adj, PriceAdjustment::Decreased { .. }));
    assert!((node.price_per_byte - 0.4).abs() < 1e-12);
    assert_eq!(node.counters.seen, 0);
    assert_eq!(node.counters.transmitted, 0);
}

#[test]
fn test_three_exposures_three_relays_increases_once() {
    let mut topo = line();
    exposure(&mut topo, "B", 3);
    let node = topo.get_mut(&NodeId::new("B")).unwrap();
    node.counters.transmitted = 3;

    let adj = PriceController::default().adjust(node);
    assert!(matches!(adj, PriceAdjustment::Increased { .. }));
    assert!((node.price_per_byte - 0.55).abs() < 1e-12);
    assert_eq!(node.counters.seen, 0);
    assert_eq!(node.counters.transmitted, 0);
}

#[test]
fn test_repeated_exposure_never_drops_below_floor() {
    let config = PricingConfig {
        price_floor: 0.25,
        ..PricingConfig::default()
    };
    let controller = PriceController::new(config);
    let mut topo = line();
    for round in 0..40u64 {
        let node = topo.get_mut(&NodeId::new("C")).unwrap();
        for sequence in 0..3 {
            node.observe(&MessageId {
                sender: NodeId::new("S"),
                sequence: round * 3 + sequence,
            });
        }
        controller.adjust(node);
        assert!(node.price_per_byte >= 0.25);
    }
    assert!((topo.get(&NodeId::new("C")).unwrap().price_per_byte - 0.25).abs() < 1e-12);
}

// =========================================================================
// Settlement across the line
// =========================================================================

#[test]
fn test_relay_that_always_carries_raises_its_price() {
    let mut topo = line();
    let router = BestFirstRouter::new();
    let processor = SettlementProcessor::new(PriceController::default());

    // Every A -> C message must go through B, so B's relay rate stays at 1.
    let mut raised = false;
    for _ in 0..6 {
        let msg = message(&mut topo, "A", "C", 1);
        let path = router.route(&mut topo, &msg, &mut ()).unwrap().into_path().unwrap();
        let receipt = processor.settle(&mut topo, &msg, path).unwrap();
        raised |= matches!(receipt.hops[1].adjustment, PriceAdjustment::Increased { .. });
    }
    assert!(raised);
    assert!(topo.get(&NodeId::new("B")).unwrap().price_per_byte > 0.5);
    assert!(topo.total_balance().abs() < 1e-9);
}

#[test]
fn test_failed_search_keeps_exposure() {
    let mut topo = Topology::from_parts(
        vec![
            spec("A", 0.0, 0.0, 0.5),
            spec("B", 0.0, 1.0, 0.5),
            spec("Z", 5.0, 5.0, 0.5),
        ],
        vec![edge("A", "B")],
    )
    .unwrap();

    for kind in AlgorithmKind::ALL {
        let msg = message(&mut topo, "A", "Z", 1);
        let result = kind.router().route(&mut topo, &msg, &mut ()).unwrap();
        assert_eq!(result, RouteResult::NotFound);
    }
    // One exposure per message, none rolled back.
    assert_eq!(topo.get(&NodeId::new("B")).unwrap().counters.seen, 3);
    assert_eq!(topo.get(&NodeId::new("B")).unwrap().counters.transmitted, 0);
    assert!(topo.get(&NodeId::new("B")).unwrap().balance.abs() < f64::EPSILON);
}

#[test]
fn test_self_addressed_message_settles_trivially() {
    let mut topo = line();
    for kind in AlgorithmKind::ALL {
        let msg = message(&mut topo, "B", "B", 4);
        let path = kind
            .router()
            .route(&mut topo, &msg, &mut ())
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 1);
        let receipt = SettlementProcessor::<PriceController>::default()
            .settle(&mut topo, &msg, path)
            .unwrap();
        assert_eq!(receipt.hops.len(), 1);
        assert!(receipt.net_flow().abs() < f64::EPSILON);
    }
    assert!(topo.get(&NodeId::new("B")).unwrap().balance.abs() < f64::EPSILON);
}
