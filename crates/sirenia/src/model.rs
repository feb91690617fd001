//! Inputs the router reads: anchors, layer arrays, the proper layered graph and settings.
//!
//! Everything here is read-only while an edge is routed.

use crate::curve::Polyline;
use crate::error::{Error, Result};
use crate::geom::{self, Point};
use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

/// Geometric footprint of one node. Extents are measured from `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub origin: Point,
    pub left_anchor: f64,
    pub right_anchor: f64,
    pub top_anchor: f64,
    pub bottom_anchor: f64,
    /// The node stands for an edge label; such nodes are never crossed.
    #[serde(default)]
    pub is_label: bool,
    /// Explicit boundary; the padded extents rectangle is used when absent.
    #[serde(default)]
    pub polygonal_boundary: Option<Polyline>,
}

impl Anchor {
    pub fn new(origin: Point, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            origin,
            left_anchor: left,
            right_anchor: right,
            top_anchor: top,
            bottom_anchor: bottom,
            is_label: false,
            polygonal_boundary: None,
        }
    }

    /// A `width` x `height` box centered on `origin`.
    pub fn centered(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin, width / 2.0, width / 2.0, height / 2.0, height / 2.0)
    }

    /// A zero-size anchor, as used by virtual nodes.
    pub fn point(origin: Point) -> Self {
        Self::new(origin, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn with_label(mut self, is_label: bool) -> Self {
        self.is_label = is_label;
        self
    }

    pub fn with_boundary(mut self, boundary: Polyline) -> Self {
        self.polygonal_boundary = Some(boundary);
        self
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn left(&self) -> f64 {
        self.origin.x - self.left_anchor
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.right_anchor
    }

    pub fn top(&self) -> f64 {
        self.origin.y + self.top_anchor
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y - self.bottom_anchor
    }

    pub fn polygonal_boundary(&self, padding: f64) -> Polyline {
        if let Some(boundary) = self.polygonal_boundary.as_ref() {
            return boundary.clone();
        }
        let (l, r) = (self.left() - padding, self.right() + padding);
        let (b, t) = (self.bottom() - padding, self.top() + padding);
        Polyline::closed(vec![
            geom::point(l, b),
            geom::point(r, b),
            geom::point(r, t),
            geom::point(l, t),
        ])
    }
}

/// Horizontal rank (`x`) and layer (`y`) per node id, and the nodes of each layer in rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerArrays {
    pub x: Vec<usize>,
    pub y: Vec<usize>,
    pub layers: Vec<Vec<usize>>,
}

impl LayerArrays {
    /// Derives `x` and `y` from the per-layer orderings. Ids absent from every layer keep
    /// `usize::MAX` and fail validation if anything references them.
    pub fn from_layers(layers: Vec<Vec<usize>>) -> Self {
        let node_count = layers
            .iter()
            .flatten()
            .map(|&v| v + 1)
            .max()
            .unwrap_or(0);
        let mut x = vec![usize::MAX; node_count];
        let mut y = vec![usize::MAX; node_count];
        for (layer_index, layer) in layers.iter().enumerate() {
            for (rank, &v) in layer.iter().enumerate() {
                x[v] = rank;
                y[v] = layer_index;
            }
        }
        Self { x, y, layers }
    }

    pub fn layer_of(&self, v: usize) -> &[usize] {
        &self.layers[self.y[v]]
    }

    fn validate(&self) -> Result<()> {
        for (layer_index, layer) in self.layers.iter().enumerate() {
            for (rank, &v) in layer.iter().enumerate() {
                let (Some(&x), Some(&y)) = (self.x.get(v), self.y.get(v)) else {
                    return Err(Error::MissingLayerEntry { node: v });
                };
                if y != layer_index {
                    return Err(Error::InconsistentLayers {
                        node: v,
                        reason: format!("listed in layer {layer_index} but y = {y}"),
                    });
                }
                if x != rank {
                    return Err(Error::InconsistentLayers {
                        node: v,
                        reason: format!("listed at rank {rank} but x = {x}"),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_node(&self, v: usize) -> Result<()> {
        match (self.x.get(v), self.y.get(v)) {
            (Some(&x), Some(&y)) if self.layers.get(y).and_then(|l| l.get(x)) == Some(&v) => {
                Ok(())
            }
            _ => Err(Error::MissingLayerEntry { node: v }),
        }
    }

    /// Both ends are layered and `e` climbs exactly one layer.
    fn check_layer_edge(&self, e: LayerEdge) -> Result<()> {
        self.check_node(e.source)?;
        self.check_node(e.target)?;
        let source_layer = self.y[e.source];
        if self.y[e.target] != source_layer + 1 {
            return Err(Error::NonAdjacentLayers {
                source_node: e.source,
                target: e.target,
                source_layer,
                expected_layer: source_layer + 1,
            });
        }
        Ok(())
    }
}

/// A directed edge between nodes of adjacent layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerEdge {
    pub source: usize,
    pub target: usize,
}

impl LayerEdge {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

/// One original edge's walk through consecutive layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePath {
    edges: Vec<LayerEdge>,
}

impl EdgePath {
    pub fn new(edges: Vec<LayerEdge>) -> Self {
        Self { edges }
    }

    /// Chains `nodes[0] -> nodes[1] -> ...`.
    pub fn from_nodes(nodes: &[usize]) -> Self {
        Self {
            edges: nodes
                .windows(2)
                .map(|w| LayerEdge::new(w[0], w[1]))
                .collect(),
        }
    }

    pub fn edges(&self) -> &[LayerEdge] {
        &self.edges
    }

    /// Number of layer edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The `i`-th node, `0..=len()`.
    pub fn node(&self, i: usize) -> usize {
        if i == self.edges.len() {
            self.edges[i - 1].target
        } else {
            self.edges[i].source
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..=self.edges.len()).map(move |i| self.node(i))
    }

    pub fn source(&self) -> usize {
        self.node(0)
    }

    pub fn target(&self) -> usize {
        self.node(self.edges.len())
    }

    pub fn reversed(&self) -> EdgePath {
        Self {
            edges: self
                .edges
                .iter()
                .rev()
                .map(|e| LayerEdge::new(e.target, e.source))
                .collect(),
        }
    }
}

/// The proper layered graph: real nodes are `0..real_node_count`, the rest are virtual.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredGraph {
    real_node_count: usize,
    in_edges: Vec<Vec<LayerEdge>>,
    out_edges: Vec<Vec<LayerEdge>>,
    multiple_middles: HashSet<usize>,
}

impl LayeredGraph {
    pub fn new(real_node_count: usize, node_count: usize) -> Self {
        Self {
            real_node_count,
            in_edges: vec![Vec::new(); node_count],
            out_edges: vec![Vec::new(); node_count],
            multiple_middles: HashSet::default(),
        }
    }

    pub fn add_edge(&mut self, edge: LayerEdge) {
        let needed = edge.source.max(edge.target) + 1;
        if self.in_edges.len() < needed {
            self.in_edges.resize(needed, Vec::new());
            self.out_edges.resize(needed, Vec::new());
        }
        self.out_edges[edge.source].push(edge);
        self.in_edges[edge.target].push(edge);
    }

    pub fn add_path(&mut self, path: &EdgePath) {
        for &e in path.edges() {
            self.add_edge(e);
        }
    }

    /// Marks `v` as an interior virtual node of a multi-edge bundle.
    pub fn mark_multiple_middle(&mut self, v: usize) {
        self.multiple_middles.insert(v);
    }

    pub fn node_count(&self) -> usize {
        self.in_edges.len()
    }

    pub fn is_virtual(&self, v: usize) -> bool {
        v >= self.real_node_count
    }

    pub fn is_multiple_middle(&self, v: usize) -> bool {
        self.multiple_middles.contains(&v)
    }

    pub fn in_edges(&self, v: usize) -> &[LayerEdge] {
        self.in_edges.get(v).map_or(&[], Vec::as_slice)
    }

    pub fn out_edges(&self, v: usize) -> &[LayerEdge] {
        self.out_edges.get(v).map_or(&[], Vec::as_slice)
    }

    /// The incoming edge of a virtual node.
    pub fn in_edge(&self, v: usize) -> Option<LayerEdge> {
        self.in_edges(v).first().copied()
    }

    /// The outgoing edge of a virtual node.
    pub fn out_edge(&self, v: usize) -> Option<LayerEdge> {
        self.out_edges(v).first().copied()
    }

    fn check_virtual(&self, v: usize) -> Result<()> {
        let incoming = self.in_edges(v).len();
        let outgoing = self.out_edges(v).len();
        if self.is_virtual(v) && (incoming != 1 || outgoing != 1) {
            return Err(Error::VirtualNodeDegree {
                node: v,
                incoming,
                outgoing,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Vertical distance between neighbouring layers.
    pub layer_separation: f64,
    /// Minimum group size the hierarchy builder keeps together when splitting by gaps.
    pub group_split: usize,
    /// Growth applied to anchor extents when deriving a boundary polygon.
    pub padding: f64,
    /// Starting fit coefficient for every corner.
    pub initial_fit_coefficient: f64,
    /// Corners that still cross a boundary below this coefficient fail to route.
    pub min_fit_coefficient: f64,
    /// Run the between-layers refiner.
    pub refine_layers: bool,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            layer_separation: 30.0,
            group_split: 2,
            padding: 1.0,
            initial_fit_coefficient: 0.5,
            min_fit_coefficient: 1e-6,
            refine_layers: true,
        }
    }
}

impl RoutingSettings {
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidSetting {
                    name,
                    reason: format!("expected a positive finite number, got {value}"),
                })
            }
        }
        positive("layer_separation", self.layer_separation)?;
        positive("initial_fit_coefficient", self.initial_fit_coefficient)?;
        positive("min_fit_coefficient", self.min_fit_coefficient)?;
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(Error::InvalidSetting {
                name: "padding",
                reason: format!("expected a non-negative finite number, got {}", self.padding),
            });
        }
        if self.initial_fit_coefficient > 0.5 {
            return Err(Error::InvalidSetting {
                name: "initial_fit_coefficient",
                reason: format!(
                    "neighbouring corners overlap above 0.5, got {}",
                    self.initial_fit_coefficient
                ),
            });
        }
        if self.min_fit_coefficient >= self.initial_fit_coefficient {
            return Err(Error::InvalidSetting {
                name: "min_fit_coefficient",
                reason: "must be below initial_fit_coefficient".to_string(),
            });
        }
        Ok(())
    }
}

/// A validated, read-only view of everything routing one edge needs.
#[derive(Debug, Clone, Copy)]
pub struct RoutingInput<'a> {
    pub anchors: &'a [Anchor],
    pub layers: &'a LayerArrays,
    pub graph: &'a LayeredGraph,
    pub settings: &'a RoutingSettings,
    left_bound: f64,
    right_bound: f64,
}

impl<'a> RoutingInput<'a> {
    pub fn new(
        anchors: &'a [Anchor],
        layers: &'a LayerArrays,
        graph: &'a LayeredGraph,
        settings: &'a RoutingSettings,
    ) -> Result<Self> {
        settings.validate()?;
        layers.validate()?;
        for &v in layers.layers.iter().flatten() {
            if v >= anchors.len() {
                return Err(Error::MissingAnchor {
                    node: v,
                    len: anchors.len(),
                });
            }
        }
        for &v in layers.layers.iter().flatten() {
            graph.check_virtual(v)?;
            for &e in graph.in_edges(v).iter().chain(graph.out_edges(v)) {
                layers.check_layer_edge(e)?;
            }
        }

        let mut left_bound = f64::INFINITY;
        let mut right_bound = f64::NEG_INFINITY;
        for anchor in anchors {
            let boundary = anchor.polygonal_boundary(settings.padding);
            for p in &boundary.points {
                left_bound = left_bound.min(p.x);
                right_bound = right_bound.max(p.x);
            }
            left_bound = left_bound.min(anchor.x());
            right_bound = right_bound.max(anchor.x());
        }
        if !left_bound.is_finite() || !right_bound.is_finite() {
            left_bound = 0.0;
            right_bound = 0.0;
        }

        Ok(Self {
            anchors,
            layers,
            graph,
            settings,
            left_bound: left_bound - settings.layer_separation,
            right_bound: right_bound + settings.layer_separation,
        })
    }

    /// Checks `path` against the tables: non-empty, chained, ascending one layer per edge, with
    /// real endpoints.
    pub fn validate_path(&self, path: &EdgePath) -> Result<()> {
        if path.is_empty() {
            return Err(Error::EmptyEdgePath);
        }
        for (index, e) in path.edges().iter().enumerate() {
            for v in [e.source, e.target] {
                self.check_node(v)?;
            }
            if index > 0 {
                let expected = path.edges()[index - 1].target;
                if e.source != expected {
                    return Err(Error::BrokenEdgePath {
                        index,
                        source_node: e.source,
                        target: e.target,
                        expected,
                    });
                }
            }
            self.layers.check_layer_edge(*e)?;
        }
        for v in [path.source(), path.target()] {
            if self.graph.is_virtual(v) {
                return Err(Error::VirtualEndpoint { node: v });
            }
        }
        Ok(())
    }

    /// `v` has an anchor and sits in the layer arrays.
    pub fn check_node(&self, v: usize) -> Result<()> {
        if v >= self.anchors.len() {
            return Err(Error::MissingAnchor {
                node: v,
                len: self.anchors.len(),
            });
        }
        self.layers.check_node(v)
    }

    pub fn anchor(&self, v: usize) -> &'a Anchor {
        &self.anchors[v]
    }

    pub fn origin(&self, v: usize) -> Point {
        self.anchors[v].origin
    }

    pub fn boundary(&self, v: usize) -> Polyline {
        self.anchors[v].polygonal_boundary(self.settings.padding)
    }

    /// Left edge of the drawing, one layer separation beyond the leftmost boundary.
    pub fn left_bound(&self) -> f64 {
        self.left_bound
    }

    pub fn right_bound(&self) -> f64 {
        self.right_bound
    }
}
