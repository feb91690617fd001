use sirenia::geom::point;
use sirenia::scan::{NodeKind, scan_left, scan_right};
use sirenia::{Anchor, Error, LayerArrays, LayeredGraph, RoutingInput, RoutingSettings};

/// One layer of real nodes with the given `(top, bottom)` extents, placed 50 apart.
struct Layer {
    anchors: Vec<Anchor>,
    layers: LayerArrays,
    graph: LayeredGraph,
    settings: RoutingSettings,
}

impl Layer {
    fn new(extents: &[(f64, f64)]) -> Self {
        let anchors = extents
            .iter()
            .enumerate()
            .map(|(i, &(top, bottom))| {
                Anchor::new(point(50.0 * i as f64, 0.0), 10.0, 10.0, top, bottom)
            })
            .collect::<Vec<_>>();
        let n = anchors.len();
        Self {
            anchors,
            layers: LayerArrays::from_layers(vec![(0..n).collect()]),
            graph: LayeredGraph::new(n, n),
            settings: RoutingSettings::default(),
        }
    }

    fn input(&self) -> RoutingInput<'_> {
        RoutingInput::new(&self.anchors, &self.layers, &self.graph, &self.settings).unwrap()
    }
}

#[test]
fn node_kind_follows_path_position() {
    assert_eq!(NodeKind::at(0, 3), NodeKind::Bottom);
    assert_eq!(NodeKind::at(1, 3), NodeKind::Internal);
    assert_eq!(NodeKind::at(2, 3), NodeKind::Internal);
    assert_eq!(NodeKind::at(3, 3), NodeKind::Top);
    assert_eq!(NodeKind::at(1, 1), NodeKind::Top);
}

#[test]
fn right_scan_skips_nodes_hidden_behind_closer_ones() {
    let layer = Layer::new(&[(0.0, 0.0), (10.0, 10.0), (5.0, 5.0), (20.0, 0.0), (0.0, 15.0)]);
    let input = layer.input();
    assert_eq!(scan_right(&input, 0, NodeKind::Internal).unwrap(), vec![1, 3, 4]);
}

#[test]
fn endpoint_kinds_suppress_the_side_the_path_never_reaches() {
    let layer = Layer::new(&[(0.0, 0.0), (10.0, 10.0), (5.0, 5.0), (20.0, 0.0), (0.0, 15.0)]);
    let input = layer.input();
    assert_eq!(scan_right(&input, 0, NodeKind::Top).unwrap(), vec![1, 4]);
    assert_eq!(scan_right(&input, 0, NodeKind::Bottom).unwrap(), vec![1, 3]);
}

#[test]
fn left_scan_walks_toward_rank_zero() {
    let layer = Layer::new(&[(0.0, 15.0), (20.0, 0.0), (5.0, 5.0), (10.0, 10.0), (0.0, 0.0)]);
    let input = layer.input();
    assert_eq!(scan_left(&input, 4, NodeKind::Internal).unwrap(), vec![3, 1, 0]);
}

#[test]
fn scans_stop_at_the_end_of_the_layer() {
    let layer = Layer::new(&[(10.0, 10.0), (0.0, 0.0), (10.0, 10.0)]);
    let input = layer.input();
    assert_eq!(scan_right(&input, 2, NodeKind::Internal).unwrap(), Vec::<usize>::new());
    assert_eq!(scan_left(&input, 0, NodeKind::Internal).unwrap(), Vec::<usize>::new());
    assert_eq!(scan_right(&input, 1, NodeKind::Internal).unwrap(), vec![2]);
    assert_eq!(scan_left(&input, 1, NodeKind::Internal).unwrap(), vec![0]);
}

// Near-equal extents: the rightward scan compares strictly, the leftward one needs the extent
// to beat the envelope by more than the distance epsilon.
#[test]
fn near_equal_extents_are_emitted_rightward_but_not_leftward() {
    let bump = 10.0 + 1e-9;
    let right = Layer::new(&[(0.0, 0.0), (10.0, 10.0), (bump, 0.0)]);
    assert_eq!(scan_right(&right.input(), 0, NodeKind::Internal).unwrap(), vec![1, 2]);

    let left = Layer::new(&[(bump, 0.0), (10.0, 10.0), (0.0, 0.0)]);
    assert_eq!(scan_left(&left.input(), 2, NodeKind::Internal).unwrap(), vec![1]);
}

#[test]
fn scanning_from_an_unlayered_node_fails() {
    let mut layer = Layer::new(&[(10.0, 10.0), (10.0, 10.0)]);
    layer.anchors.push(Anchor::point(point(100.0, 0.0)));
    let input = layer.input();
    assert!(matches!(
        scan_right(&input, 2, NodeKind::Internal),
        Err(Error::MissingLayerEntry { node: 2 })
    ));
    assert!(matches!(
        scan_left(&input, 9, NodeKind::Internal),
        Err(Error::MissingAnchor { node: 9, len: 3 })
    ));
}
