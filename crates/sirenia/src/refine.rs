//! Between-layers refinement: extra sites that steer the polyline around neighbour corners.

use crate::curve::LineSegment;
use crate::error::Result;
use crate::geom::{self, Point};
use crate::model::RoutingInput;
use crate::scan::{NodeKind, scan_left, scan_right};
use crate::sites::{SiteId, SiteList};

/// Inserts sites between the sites of two consecutive path nodes.
///
/// `site` belongs to `from_node`; its successor belongs to `to_node`, one layer up.
/// Implementations may only insert after `site` and must leave the list linked.
pub trait LayerRefiner {
    fn refine(
        &mut self,
        input: &RoutingInput<'_>,
        sites: &mut SiteList,
        site: SiteId,
        from_node: usize,
        to_node: usize,
    ) -> Result<()>;
}

/// Leaves the polyline as the straight chain of anchor origins.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightRefiner;

impl LayerRefiner for StraightRefiner {
    fn refine(
        &mut self,
        _: &RoutingInput<'_>,
        _: &mut SiteList,
        _: SiteId,
        _: usize,
        _: usize,
    ) -> Result<()> {
        Ok(())
    }
}

/// Wraps the polyline around the inner corners of the nearest visible neighbours of both path
/// nodes whenever the straight chain would cut through them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerRefiner;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: usize,
    corner: Point,
}

impl CornerRefiner {
    fn candidates(
        input: &RoutingInput<'_>,
        from_node: usize,
        to_node: usize,
    ) -> Result<Vec<Candidate>> {
        let gap = 2.0 * input.settings.padding.max(geom::DISTANCE_EPSILON);
        let mut out = Vec::new();
        for (v, upper) in [(from_node, false), (to_node, true)] {
            let nearest_right = scan_right(input, v, NodeKind::Internal)?.first().copied();
            let nearest_left = scan_left(input, v, NodeKind::Internal)?.first().copied();
            for (node, on_right) in [(nearest_right, true), (nearest_left, false)] {
                let Some(node) = node else {
                    continue;
                };
                let a = input.anchor(node);
                let x = if on_right {
                    a.left() - gap
                } else {
                    a.right() + gap
                };
                // The lower layer is left through its neighbours' tops, the upper one entered
                // through their bottoms.
                let y = if upper {
                    a.bottom() - gap
                } else {
                    a.top() + gap
                };
                out.push(Candidate {
                    node,
                    corner: geom::point(x, y),
                });
            }
        }
        out.sort_by(|a, b| a.corner.y.total_cmp(&b.corner.y));
        Ok(out)
    }
}

impl LayerRefiner for CornerRefiner {
    fn refine(
        &mut self,
        input: &RoutingInput<'_>,
        sites: &mut SiteList,
        site: SiteId,
        from_node: usize,
        to_node: usize,
    ) -> Result<()> {
        let Some(end) = sites.next(site) else {
            return Ok(());
        };
        let end_point = sites.point(end);
        let mut cur = site;
        for candidate in Self::candidates(input, from_node, to_node)? {
            let start = sites.point(cur);
            if candidate.corner.y <= start.y || candidate.corner.y >= end_point.y {
                continue;
            }
            let chord = LineSegment::new(start, end_point);
            let blocked = input
                .boundary(candidate.node)
                .segments()
                .any(|piece| chord.intersection(&piece).is_some());
            if blocked {
                tracing::trace!(
                    node = candidate.node,
                    x = candidate.corner.x,
                    y = candidate.corner.y,
                    "refiner inserted a corner site"
                );
                cur = sites.insert_after(cur, candidate.corner);
            }
        }
        Ok(())
    }
}
