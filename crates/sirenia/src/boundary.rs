//! The four obstacle trees one edge is routed against.

use crate::curve::{LineSegment, Polyline};
use crate::error::Result;
use crate::geom;
use crate::hierarchy::Hierarchy;
use crate::model::{EdgePath, RoutingInput};
use crate::scan::{NodeKind, scan_left, scan_right};

/// Right/left hold the boundaries of visible neighbours on each side of the path. The thin
/// trees hold one horizontal ray per path node, from the farthest visible neighbour out to the
/// edge of the drawing, closing the corridor beyond the last obstacle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryHierarchies {
    pub right: Hierarchy,
    pub left: Hierarchy,
    pub thin_right: Hierarchy,
    pub thin_left: Hierarchy,
}

impl BoundaryHierarchies {
    /// Fails like [`RoutingInput::validate_path`] when `path` does not fit the tables.
    pub fn build(input: &RoutingInput<'_>, path: &EdgePath) -> Result<Self> {
        input.validate_path(path)?;
        let group_split = input.settings.group_split;
        let mut right_curves: Vec<Polyline> = Vec::new();
        let mut left_curves: Vec<Polyline> = Vec::new();
        let mut thin_right: Vec<LineSegment> = Vec::new();
        let mut thin_left: Vec<LineSegment> = Vec::new();

        for (offset, u) in path.nodes().enumerate() {
            let kind = NodeKind::at(offset, path.len());

            let visible = scan_right(input, u, kind)?;
            if let Some(&rightmost) = visible
                .iter()
                .max_by(|&&a, &&b| input.anchor(a).x().total_cmp(&input.anchor(b).x()))
            {
                let o = input.origin(rightmost);
                thin_right.push(LineSegment::new(o, geom::point(input.right_bound(), o.y)));
            }
            right_curves.extend(visible.iter().map(|&w| input.boundary(w)));

            let visible = scan_left(input, u, kind)?;
            if let Some(&leftmost) = visible.iter().min_by_key(|&&w| input.layers.x[w]) {
                let o = input.origin(leftmost);
                thin_left.push(LineSegment::new(o, geom::point(input.left_bound(), o.y)));
            }
            left_curves.extend(visible.iter().map(|&w| input.boundary(w)));
        }

        let hierarchies = Self {
            right: Hierarchy::from_polylines(&right_curves, group_split),
            left: Hierarchy::from_polylines(&left_curves, group_split),
            thin_right: Hierarchy::from_segments(thin_right, group_split),
            thin_left: Hierarchy::from_segments(thin_left, group_split),
        };
        tracing::debug!(
            right = right_curves.len(),
            left = left_curves.len(),
            thin_right = hierarchies.thin_right.leaf_count(),
            thin_left = hierarchies.thin_left.leaf_count(),
            "built boundary hierarchies"
        );
        Ok(hierarchies)
    }

    /// Swaps sides, for a path traversed in the opposite direction.
    pub fn mirrored(&self) -> Self {
        Self {
            right: self.left.clone(),
            left: self.right.clone(),
            thin_right: self.thin_left.clone(),
            thin_left: self.thin_right.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
            && self.left.is_empty()
            && self.thin_right.is_empty()
            && self.thin_left.is_empty()
    }

    pub fn right_side_intersects(&self, segment: &crate::curve::Segment) -> bool {
        self.thin_right.intersects(segment) || self.right.intersects(segment)
    }

    pub fn left_side_intersects(&self, segment: &crate::curve::Segment) -> bool {
        self.thin_left.intersects(segment) || self.left.intersects(segment)
    }

    pub fn any_intersects(&self, segment: &crate::curve::Segment) -> bool {
        self.right_side_intersects(segment) || self.left_side_intersects(segment)
    }
}
