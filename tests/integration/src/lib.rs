//! Topology and message builders shared by the cross-crate tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relay_core::{Message, NodeId, NodeSpec, Topology};

pub fn spec(id: &str, lat: f64, long: f64, price: f64) -> NodeSpec {
    NodeSpec {
        id: NodeId::new(id),
        lat,
        long,
        speed: 1.0,
        speed_pref: 0.5,
        cost_pref: 0.5,
        price_per_byte: price,
    }
}

pub fn edge(a: &str, b: &str) -> (NodeId, NodeId) {
    (NodeId::new(a), NodeId::new(b))
}

/// A - B - C - D - A at the corners of a unit square, uniform price.
pub fn square_cycle(price: f64) -> Topology {
    Topology::from_parts(
        vec![
            spec("A", 0.0, 0.0, price),
            spec("B", 0.0, 1.0, price),
            spec("C", 1.0, 1.0, price),
            spec("D", 1.0, 0.0, price),
        ],
        vec![edge("A", "B"), edge("B", "C"), edge("C", "D"), edge("D", "A")],
    )
    .expect("square cycle")
}

/// Node specs and edges for `n` nodes named N0..N{n-1} with random
/// coordinates, speeds, prices and preferences; each pair is joined with
/// probability `density`.
pub fn random_mesh(n: usize, density: f64, seed: u64) -> (Vec<NodeSpec>, Vec<(NodeId, NodeId)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes: Vec<NodeSpec> = (0..n)
        .map(|i| {
            let speed_pref = rng.gen_range(0.0..=1.0);
            NodeSpec {
                id: NodeId::new(format!("N{}", i)),
                lat: rng.gen_range(-10.0..10.0),
                long: rng.gen_range(-10.0..10.0),
                speed: rng.gen_range(0.5..3.0),
                speed_pref,
                cost_pref: 1.0 - speed_pref,
                price_per_byte: rng.gen_range(0.1..2.0),
            }
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(density) {
                edges.push((nodes[i].id.clone(), nodes[j].id.clone()));
            }
        }
    }
    (nodes, edges)
}

pub fn random_topology(n: usize, density: f64, seed: u64) -> Topology {
    let (nodes, edges) = random_mesh(n, density, seed);
    Topology::from_parts(nodes, edges).expect("random topology")
}

/// Originate a message at `from`.
pub fn message(topology: &mut Topology, from: &str, to: &str, size: u64) -> Message {
    topology
        .get_mut(&NodeId::new(from))
        .expect("origin exists")
        .create_message(NodeId::new(to), size, "test")
}

pub fn ids(topology: &Topology) -> Vec<NodeId> {
    topology.nodes().map(|n| n.id.clone()).collect()
}
