use sirenia::crossing::{can_be_crossed, intersect};
use sirenia::geom::point;
use sirenia::{
    Anchor, EdgePath, LayerArrays, LayerEdge, LayeredGraph, RoutingInput, RoutingSettings,
};

/// Real nodes 0, 1 in layer 0 and 2, 3 in layer 2; virtual nodes 4, 5 in layer 1.
struct Fixture {
    anchors: Vec<Anchor>,
    layers: LayerArrays,
    graph: LayeredGraph,
    settings: RoutingSettings,
}

impl Fixture {
    fn new(chain_u: [usize; 3], chain_v: [usize; 3]) -> Self {
        let anchors = vec![
            Anchor::centered(point(0.0, 0.0), 20.0, 20.0),
            Anchor::centered(point(100.0, 0.0), 20.0, 20.0),
            Anchor::centered(point(0.0, 200.0), 20.0, 20.0),
            Anchor::centered(point(100.0, 200.0), 20.0, 20.0),
            Anchor::centered(point(0.0, 100.0), 4.0, 4.0),
            Anchor::centered(point(100.0, 100.0), 4.0, 4.0),
        ];
        let layers = LayerArrays::from_layers(vec![vec![0, 1], vec![4, 5], vec![2, 3]]);
        let mut graph = LayeredGraph::new(4, 6);
        graph.add_path(&EdgePath::from_nodes(&chain_u));
        graph.add_path(&EdgePath::from_nodes(&chain_v));
        Self {
            anchors,
            layers,
            graph,
            settings: RoutingSettings::default(),
        }
    }

    fn input(&self) -> RoutingInput<'_> {
        RoutingInput::new(&self.anchors, &self.layers, &self.graph, &self.settings).unwrap()
    }
}

#[test]
fn edges_intersect_when_rank_order_flips() {
    let f = Fixture::new([0, 4, 3], [1, 5, 2]);
    let input = f.input();
    assert!(intersect(&input, LayerEdge::new(4, 3), LayerEdge::new(5, 2)));
    assert!(!intersect(&input, LayerEdge::new(0, 4), LayerEdge::new(1, 5)));
    // Shared endpoints give a zero difference, which is not a flip.
    assert!(!intersect(&input, LayerEdge::new(4, 2), LayerEdge::new(5, 2)));
}

#[test]
fn crossing_chains_can_be_crossed_both_ways() {
    let f = Fixture::new([0, 4, 3], [1, 5, 2]);
    let input = f.input();
    assert!(can_be_crossed(&input, 5, 4));
    assert!(can_be_crossed(&input, 4, 5));
}

#[test]
fn parallel_chains_cannot_be_crossed() {
    let f = Fixture::new([0, 4, 2], [1, 5, 3]);
    assert!(!can_be_crossed(&f.input(), 5, 4));
}

#[test]
fn chains_converging_on_one_node_count_as_intersecting() {
    let f = Fixture::new([0, 4, 2], [1, 5, 2]);
    assert!(can_be_crossed(&f.input(), 5, 4));
}

#[test]
fn real_nodes_are_never_crossed() {
    let f = Fixture::new([0, 4, 3], [1, 5, 2]);
    let input = f.input();
    assert!(!can_be_crossed(&input, 1, 0));
    assert!(!can_be_crossed(&input, 1, 4));
}

#[test]
fn label_nodes_are_never_crossed() {
    let mut f = Fixture::new([0, 4, 3], [1, 5, 2]);
    f.anchors[5] = f.anchors[5].clone().with_label(true);
    assert!(!can_be_crossed(&f.input(), 5, 4));
    assert!(!can_be_crossed(&f.input(), 4, 5));
}

#[test]
fn middles_of_one_multi_edge_are_not_crossed() {
    let mut f = Fixture::new([0, 4, 3], [0, 5, 2]);
    assert!(can_be_crossed(&f.input(), 5, 4));
    f.graph.mark_multiple_middle(4);
    f.graph.mark_multiple_middle(5);
    assert!(!can_be_crossed(&f.input(), 5, 4));
}

#[test]
fn middles_of_different_multi_edges_are_still_crossed() {
    let mut f = Fixture::new([0, 4, 3], [1, 5, 2]);
    f.graph.mark_multiple_middle(4);
    f.graph.mark_multiple_middle(5);
    assert!(can_be_crossed(&f.input(), 5, 4));
}
