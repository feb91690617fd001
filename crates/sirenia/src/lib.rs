#![forbid(unsafe_code)]

//! Edge spline routing for layered graph drawings.
//!
//! Given node anchors, the layer arrays and an edge's walk through the layers (real endpoints
//! plus the virtual nodes in between), `sirenia` produces a smooth curve that stays clear of
//! the neighbouring nodes. Per edge it:
//!
//! 1. scans each traversed layer for the visible neighbours on both sides and builds
//!    parallelogram trees over their boundaries ([`boundary`]),
//! 2. lays a polyline through the anchor origins and refines it between layers ([`refine`]),
//! 3. shortcuts inflections the trees allow ([`inflection`]),
//! 4. fits a cubic into every remaining corner, shrinking it until it clears ([`smoothing`]).

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod boundary;
pub mod crossing;
pub mod curve;
pub mod error;
pub mod geom;
pub mod hierarchy;
pub mod inflection;
pub mod model;
pub mod parallelogram;
pub mod refine;
pub mod router;
pub mod scan;
pub mod sites;
pub mod smoothing;

pub use boundary::BoundaryHierarchies;
pub use curve::{CubicBezier, Curve, LineSegment, Polyline, Segment};
pub use error::{Error, Result};
pub use geom::{Point, point};
pub use hierarchy::{Hierarchy, ParallelogramNode};
pub use model::{
    Anchor, EdgePath, LayerArrays, LayerEdge, LayeredGraph, RoutingInput, RoutingSettings,
};
pub use refine::{CornerRefiner, LayerRefiner, StraightRefiner};
pub use router::{RoutedPolyline, SmoothedPolylineRouter, route_edge};
pub use smoothing::SmoothedCurve;
