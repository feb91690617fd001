//! Adaptive Bezier fitting over the refined site list.
//!
//! Every corner gets a cubic whose ends sit on the two legs at fraction `k` from the corner.
//! `k` starts at the configured coefficient and is halved until the cubic clears the boundary
//! on the inside of the turn; a coefficient that had to shrink gets one retry at `1.5 * k`.

use crate::boundary::BoundaryHierarchies;
use crate::curve::{CubicBezier, Curve, LineSegment, Segment};
use crate::error::{Error, Result};
use crate::geom::{self, Point};
use crate::inflection::Side;
use crate::model::RoutingSettings;
use crate::sites::{SiteId, SiteList};

/// The fitted curve and the coefficient accepted at each corner, in corner order.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedCurve {
    pub curve: Curve,
    pub coefficients: Vec<f64>,
}

/// The cubic fitted into the corner `a, b, c` with symmetric coefficient `k`.
pub fn corner_bezier(k: f64, a: Point, b: Point, c: Point) -> CubicBezier {
    let s = geom::lerp(b, a, k);
    let e = geom::lerp(b, c, k);
    CubicBezier::new(
        s,
        geom::lerp(s, b, 2.0 / 3.0),
        geom::lerp(e, b, 2.0 / 3.0),
        e,
    )
}

/// Tests `bezier` against the side its control triangle bulges into.
pub fn bezier_intersects_boundary(bezier: &CubicBezier, hierarchies: &BoundaryHierarchies) -> bool {
    let [p0, p1, p2, _] = bezier.points;
    let side = geom::signed_doubled_triangle_area(p0, p1, p2);
    Side::inside_of_turn(side).intersects(hierarchies, &Segment::Cubic(*bezier))
}

/// Fits the corner at `b`, records the accepted coefficient on `b` and returns the cubic.
pub fn fit_corner(
    sites: &mut SiteList,
    hierarchies: &BoundaryHierarchies,
    settings: &RoutingSettings,
    a: SiteId,
    b: SiteId,
    c: SiteId,
) -> Result<(CubicBezier, f64)> {
    let (pa, pb, pc) = (sites.point(a), sites.point(b), sites.point(c));
    let initial = settings.initial_fit_coefficient;

    let mut k = initial;
    let mut bezier = corner_bezier(k, pa, pb, pc);
    while bezier_intersects_boundary(&bezier, hierarchies) {
        k /= 2.0;
        if k < settings.min_fit_coefficient {
            return Err(Error::UnsmoothableCorner {
                x: pb.x,
                y: pb.y,
                coefficient: k,
            });
        }
        tracing::trace!(corner = b.index(), k, "shrinking fit coefficient");
        bezier = corner_bezier(k, pa, pb, pc);
    }

    if k < initial {
        let gentler = 0.5 * (k + 2.0 * k);
        let candidate = corner_bezier(gentler, pa, pb, pc);
        if !bezier_intersects_boundary(&candidate, hierarchies) {
            k = gentler;
            bezier = candidate;
        }
    }

    let site = sites.site_mut(b);
    site.previous_fit_coefficient = k;
    site.next_fit_coefficient = k;
    Ok((bezier, k))
}

/// Turns the site list into a curve from `start` to `end`.
pub fn smooth(
    sites: &mut SiteList,
    hierarchies: &BoundaryHierarchies,
    settings: &RoutingSettings,
    start: Point,
    end: Point,
) -> Result<SmoothedCurve> {
    sites.remove_flat_sites();

    let head = sites.head();
    let mut curve = Curve::new();
    let mut coefficients = Vec::new();

    if sites.find_corner(head).is_none() {
        curve.push(LineSegment::new(sites.point(head), sites.point(sites.tail())));
    } else {
        let mut a = head;
        while let Some((b, c)) = sites.find_corner(a) {
            let (bezier, k) = fit_corner(sites, hierarchies, settings, a, b, c)?;
            coefficients.push(k);
            curve.push_connected(bezier);
            a = b;
        }
        if let Some(last) = sites.next(a) {
            extend_end(&mut curve, sites.point(last));
        }
    }

    extend_to_endpoints(&mut curve, start, end);
    tracing::debug!(
        segments = curve.len(),
        corners = coefficients.len(),
        "smoothed polyline"
    );
    Ok(SmoothedCurve {
        curve,
        coefficients,
    })
}

/// Prepends/appends straight pieces so the curve runs exactly from `start` to `end`.
pub fn extend_to_endpoints(curve: &mut Curve, start: Point, end: Point) {
    match curve.start() {
        Some(s) if !geom::close(s, start) => curve.push_front(LineSegment::new(start, s)),
        None => curve.push(LineSegment::new(start, end)),
        _ => {}
    }
    extend_end(curve, end);
}

fn extend_end(curve: &mut Curve, end: Point) {
    if let Some(e) = curve.end() {
        if !geom::close(e, end) {
            curve.push(LineSegment::new(e, end));
        }
    }
}
