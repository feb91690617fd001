//! Skyline scans along a layer.
//!
//! Walking away from a path node, a neighbour matters only if it sticks out above or below every
//! neighbour already seen; anything fully behind a closer node is hidden from the path.

use crate::crossing::can_be_crossed;
use crate::error::Result;
use crate::geom::greater_with_epsilon;
use crate::model::RoutingInput;

/// Position of a node on its edge path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Last node; the path never goes above it.
    Top,
    /// First node; the path never goes below it.
    Bottom,
    Internal,
}

impl NodeKind {
    /// Kind of the node at `offset` on a path with `edge_count` layer edges.
    pub fn at(offset: usize, edge_count: usize) -> Self {
        if offset == 0 {
            NodeKind::Bottom
        } else if offset >= edge_count {
            NodeKind::Top
        } else {
            NodeKind::Internal
        }
    }

    /// Initial `(top, bottom)` envelope; the side the path never reaches starts saturated.
    fn seeds(self) -> (f64, f64) {
        match self {
            NodeKind::Top => (f64::INFINITY, 0.0),
            NodeKind::Bottom => (0.0, f64::INFINITY),
            NodeKind::Internal => (0.0, 0.0),
        }
    }
}

/// Visible nodes to the right of `v`, nearest first.
pub fn scan_right(input: &RoutingInput<'_>, v: usize, kind: NodeKind) -> Result<Vec<usize>> {
    input.check_node(v)?;
    let layer = input.layers.layer_of(v);
    let position = input.layers.x[v];
    let (mut t, mut b) = kind.seeds();
    let mut visible = Vec::new();

    for &u in &layer[position + 1..] {
        let anchor = input.anchor(u);
        if anchor.top_anchor > t {
            if !can_be_crossed(input, u, v) {
                t = anchor.top_anchor;
                if anchor.bottom_anchor > b {
                    b = anchor.bottom_anchor;
                }
                visible.push(u);
            }
        } else if anchor.bottom_anchor > b && !can_be_crossed(input, u, v) {
            b = anchor.bottom_anchor;
            visible.push(u);
        }
    }
    Ok(visible)
}

/// Visible nodes to the left of `v`, nearest first.
///
/// Unlike [`scan_right`], extents must beat the envelope by more than the distance epsilon.
pub fn scan_left(input: &RoutingInput<'_>, v: usize, kind: NodeKind) -> Result<Vec<usize>> {
    input.check_node(v)?;
    let layer = input.layers.layer_of(v);
    let position = input.layers.x[v];
    let (mut t, mut b) = kind.seeds();
    let mut visible = Vec::new();

    for &u in layer[..position].iter().rev() {
        let anchor = input.anchor(u);
        if greater_with_epsilon(anchor.top_anchor, t) {
            if !can_be_crossed(input, u, v) {
                t = anchor.top_anchor;
                if greater_with_epsilon(anchor.bottom_anchor, b) {
                    b = anchor.bottom_anchor;
                }
                visible.push(u);
            }
        } else if greater_with_epsilon(anchor.bottom_anchor, b) && !can_be_crossed(input, u, v) {
            b = anchor.bottom_anchor;
            visible.push(u);
        }
    }
    Ok(visible)
}
