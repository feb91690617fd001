//! Which neighbouring virtual nodes an edge may pass through.
//!
//! Two virtual nodes can be crossed when their chains swap rank order somewhere (or meet at a
//! shared real endpoint), because then the two edges cross anyway and a boundary between them
//! would only force a detour.

use crate::model::{LayerEdge, RoutingInput};

/// Whether the path through `v` may cross the node `u` of the same layer.
pub fn can_be_crossed(input: &RoutingInput<'_>, u: usize, v: usize) -> bool {
    if input.anchor(u).is_label || input.anchor(v).is_label {
        return false;
    }
    let g = input.graph;
    g.is_virtual(u) && g.is_virtual(v) && edges_intersect_somewhere(input, u, v)
}

fn edges_intersect_somewhere(input: &RoutingInput<'_>, u: usize, v: usize) -> bool {
    if are_middles_of_same_multi_edge(input, u, v) {
        return false;
    }
    intersect_above(input, u, v) || intersect_below(input, u, v)
}

fn are_middles_of_same_multi_edge(input: &RoutingInput<'_>, u: usize, v: usize) -> bool {
    let g = input.graph;
    g.is_multiple_middle(u)
        && g.is_multiple_middle(v)
        && original_source(input, u) == original_source(input, v)
}

/// Walks incoming edges back to the real node the virtual chain through `u` starts from.
fn original_source(input: &RoutingInput<'_>, mut u: usize) -> Option<usize> {
    let g = input.graph;
    for _ in 0..=g.node_count() {
        if !g.is_virtual(u) {
            return Some(u);
        }
        u = g.in_edge(u)?.source;
    }
    None
}

/// Follows outgoing edges from `u` and `v` until one chain reaches a real node.
fn intersect_below(input: &RoutingInput<'_>, mut u: usize, mut v: usize) -> bool {
    let g = input.graph;
    for _ in 0..=g.node_count() {
        let (Some(eu), Some(ev)) = (g.out_edge(u), g.out_edge(v)) else {
            return false;
        };
        if intersect(input, eu, ev) {
            return true;
        }
        u = eu.target;
        v = ev.target;
        if !(g.is_virtual(u) && g.is_virtual(v)) {
            return u == v;
        }
    }
    false
}

/// Follows incoming edges from `u` and `v` until one chain reaches a real node.
fn intersect_above(input: &RoutingInput<'_>, mut u: usize, mut v: usize) -> bool {
    let g = input.graph;
    for _ in 0..=g.node_count() {
        let (Some(eu), Some(ev)) = (g.in_edge(u), g.in_edge(v)) else {
            return false;
        };
        if intersect(input, eu, ev) {
            return true;
        }
        u = eu.source;
        v = ev.source;
        if !(g.is_virtual(u) && g.is_virtual(v)) {
            return u == v;
        }
    }
    false
}

/// Layer edges cross when their endpoints swap rank order between the two layers.
pub fn intersect(input: &RoutingInput<'_>, e: LayerEdge, m: LayerEdge) -> bool {
    let rank = |v: usize| input.layers.x[v] as i64;
    let a = (rank(e.source) - rank(m.source)).signum();
    let b = (rank(e.target) - rank(m.target)).signum();
    a * b < 0
}
