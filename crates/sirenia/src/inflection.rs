//! Removal of inflection sites from the refined polyline.

use crate::boundary::BoundaryHierarchies;
use crate::curve::{LineSegment, Segment};
use crate::sites::{SiteId, SiteList};

/// Side of the corridor a shortcut or a fitted corner bulges into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Cutting a corner moves the curve toward the inside of the turn. On an ascending path a
    /// counter-clockwise (positive) turn has its inside on the left.
    pub fn inside_of_turn(turn: f64) -> Side {
        if turn > 0.0 { Side::Left } else { Side::Right }
    }

    pub fn intersects(self, hierarchies: &BoundaryHierarchies, segment: &Segment) -> bool {
        match self {
            Side::Left => hierarchies.left_side_intersects(segment),
            Side::Right => hierarchies.right_side_intersects(segment),
        }
    }
}

/// `true` when no two turns along the list have opposite signs.
pub fn turning_always_same_direction(sites: &SiteList) -> bool {
    let mut sign = 0i8;
    for s in sites.iter() {
        let turn = sites.turn(s);
        if turn == 0 {
            continue;
        }
        if sign == 0 {
            sign = turn;
        } else if sign != turn {
            return false;
        }
    }
    true
}

/// Shortcuts inflections until a full pass elides nothing. Returns the number of elided sites.
pub fn remove_inflections(sites: &mut SiteList, hierarchies: &BoundaryHierarchies) -> usize {
    if turning_always_same_direction(sites) {
        return 0;
    }

    let mut elided = 0;
    loop {
        let mut progress = false;
        let mut cur = sites.next(sites.head());
        while let Some(s) = cur {
            let Some(n) = sites.next(s) else {
                break;
            };
            if sites.next(n).is_none() {
                break;
            }
            let turn = sites.turn(s);
            let next_turn = sites.turn(n);
            if turn != 0 && next_turn != 0 && turn != next_turn {
                if let Some(resume) = try_remove_inflection_edge(sites, hierarchies, s) {
                    elided += 1;
                    progress = true;
                    cur = Some(resume);
                    continue;
                }
            }
            cur = Some(n);
        }
        if !progress {
            break;
        }
    }
    tracing::debug!(elided, remaining = sites.len(), "removed inflections");
    elided
}

/// Elides `s` or its successor, whichever shortcut stays clear of the side it cuts into.
/// For a counter-clockwise (positive) turn at `s`, eliding `s` checks the left trees and eliding
/// `s.next` checks the right trees, matching [`crate::smoothing::bezier_intersects_boundary`].
/// Returns the site the scan resumes from.
fn try_remove_inflection_edge(
    sites: &mut SiteList,
    hierarchies: &BoundaryHierarchies,
    s: SiteId,
) -> Option<SiteId> {
    let prev = sites.prev(s)?;
    let next = sites.next(s)?;
    let next_next = sites.next(next)?;

    let turn = f64::from(sites.turn(s));
    let shortcut = Segment::Line(LineSegment::new(sites.point(prev), sites.point(next)));
    if !Side::inside_of_turn(turn).intersects(hierarchies, &shortcut) {
        tracing::trace!(site = s.index(), "elided inflection site");
        sites.unlink(s);
        return Some(next);
    }

    let shortcut = Segment::Line(LineSegment::new(sites.point(s), sites.point(next_next)));
    if !Side::inside_of_turn(-turn).intersects(hierarchies, &shortcut) {
        tracing::trace!(site = next.index(), "elided site after inflection");
        sites.unlink(next);
        return Some(next_next);
    }
    None
}
