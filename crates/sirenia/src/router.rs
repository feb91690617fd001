//! The per-edge routing pipeline.

use crate::boundary::BoundaryHierarchies;
use crate::curve::Curve;
use crate::error::Result;
use crate::geom::Point;
use crate::inflection::remove_inflections;
use crate::model::{Anchor, EdgePath, LayerArrays, LayeredGraph, RoutingInput, RoutingSettings};
use crate::refine::{CornerRefiner, LayerRefiner};
use crate::smoothing::{self, SmoothedCurve};
use crate::sites::SiteList;

/// Routes edge paths against one read-only layering.
///
/// Every call builds its own hierarchies and site list; nothing is shared between edges.
#[derive(Debug, Clone)]
pub struct SmoothedPolylineRouter<'a, R = CornerRefiner> {
    input: RoutingInput<'a>,
    refiner: R,
}

impl<'a> SmoothedPolylineRouter<'a, CornerRefiner> {
    pub fn new(input: RoutingInput<'a>) -> Self {
        Self::with_refiner(input, CornerRefiner)
    }
}

impl<'a, R: LayerRefiner> SmoothedPolylineRouter<'a, R> {
    pub fn with_refiner(input: RoutingInput<'a>, refiner: R) -> Self {
        Self { input, refiner }
    }

    pub fn input(&self) -> &RoutingInput<'a> {
        &self.input
    }

    /// Builds the obstacle trees and the refined, inflection-free polyline for `path`.
    pub fn route_polyline(&mut self, path: &EdgePath) -> Result<RoutedPolyline> {
        let input = &self.input;
        let hierarchies = BoundaryHierarchies::build(input, path)?;

        let mut node_sites = Vec::with_capacity(path.len() + 1);
        let mut sites = SiteList::new(input.origin(path.source()));
        node_sites.push(sites.head());
        for v in path.nodes().skip(1) {
            node_sites.push(sites.push_back(input.origin(v)));
        }

        if input.settings.refine_layers {
            for (i, &site) in node_sites.iter().take(path.len()).enumerate() {
                self.refiner
                    .refine(input, &mut sites, site, path.node(i), path.node(i + 1))?;
            }
        }
        tracing::debug!(
            nodes = path.len() + 1,
            sites = sites.len(),
            "built refined site list"
        );

        remove_inflections(&mut sites, &hierarchies);

        Ok(RoutedPolyline {
            sites,
            hierarchies,
            settings: input.settings.clone(),
            source: input.origin(path.source()),
            target: input.origin(path.target()),
        })
    }

    /// Routes `path` all the way to its smoothed curve.
    pub fn route(&mut self, path: &EdgePath) -> Result<Curve> {
        Ok(self.route_polyline(path)?.smooth()?.curve)
    }
}

/// A routed polyline together with the trees it was validated against.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPolyline {
    sites: SiteList,
    hierarchies: BoundaryHierarchies,
    settings: RoutingSettings,
    source: Point,
    target: Point,
}

impl RoutedPolyline {
    pub fn new(
        sites: SiteList,
        hierarchies: BoundaryHierarchies,
        settings: RoutingSettings,
    ) -> Self {
        let source = sites.point(sites.head());
        let target = sites.point(sites.tail());
        Self {
            sites,
            hierarchies,
            settings,
            source,
            target,
        }
    }

    pub fn sites(&self) -> &SiteList {
        &self.sites
    }

    pub fn hierarchies(&self) -> &BoundaryHierarchies {
        &self.hierarchies
    }

    pub fn points(&self) -> Vec<Point> {
        self.sites.points()
    }

    pub fn source(&self) -> Point {
        self.source
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Coefficients recorded on interior sites by the last [`RoutedPolyline::smooth`].
    pub fn fit_coefficients(&self) -> Vec<f64> {
        let head = self.sites.head();
        let tail = self.sites.tail();
        self.sites
            .iter()
            .filter(|&id| id != head && id != tail)
            .map(|id| self.sites.site(id).next_fit_coefficient)
            .filter(|&k| k > 0.0)
            .collect()
    }

    /// The same route traversed from target to source, with its own copies of every tree.
    pub fn reverse(&self) -> RoutedPolyline {
        RoutedPolyline {
            sites: self.sites.reversed(),
            hierarchies: self.hierarchies.mirrored(),
            settings: self.settings.clone(),
            source: self.target,
            target: self.source,
        }
    }

    /// Fits Bezier corners and returns the finished curve from source to target.
    pub fn smooth(&mut self) -> Result<SmoothedCurve> {
        smoothing::smooth(
            &mut self.sites,
            &self.hierarchies,
            &self.settings,
            self.source,
            self.target,
        )
    }
}

/// Validates the tables and routes a single edge path with the default refiner.
pub fn route_edge(
    anchors: &[Anchor],
    layers: &LayerArrays,
    graph: &LayeredGraph,
    settings: &RoutingSettings,
    path: &EdgePath,
) -> Result<Curve> {
    let input = RoutingInput::new(anchors, layers, graph, settings)?;
    SmoothedPolylineRouter::new(input).route(path)
}
