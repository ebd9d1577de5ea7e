//! The per-hop cost metric shared by every router.

use relay_core::{Message, Node};

/// Cost of handing `message` to `node`; larger is less desirable.
///
/// `speed_pref * speed * size + cost_pref * price_per_byte * size`. Pure.
pub fn utility(message: &Message, node: &Node) -> f64 {
    let size = message.size_f64();
    message.speed_pref * node.speed * size + message.cost_pref * node.price_per_byte * size
}

/// What `node` is credited for carrying `message`.
pub fn hop_charge(message: &Message, node: &Node) -> f64 {
    node.charge_for(message.size)
}
