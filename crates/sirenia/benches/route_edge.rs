use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sirenia::{
    Anchor, EdgePath, LayerArrays, LayeredGraph, RoutingInput, RoutingSettings,
    SmoothedPolylineRouter, point,
};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Drawing {
    anchors: Vec<Anchor>,
    layers: LayerArrays,
    graph: LayeredGraph,
    path: EdgePath,
}

/// One long edge zigzagging up through `layer_count` layers of `width` real nodes each.
fn crowded_drawing(layer_count: usize, width: usize) -> Drawing {
    let grid_count = layer_count * width;
    let real_node_count = 2 + grid_count;
    let node_count = real_node_count + layer_count.saturating_sub(2);

    let mut anchors = vec![Anchor::point(point(0.0, 0.0)); node_count];
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    let mut path_nodes = Vec::with_capacity(layer_count);

    for (j, layer) in layers.iter_mut().enumerate() {
        let y = 100.0 * j as f64;
        let path_node = match j {
            0 => 0,
            j if j + 1 == layer_count => 1,
            j => real_node_count + j - 1,
        };
        // The path sits in the gap after rank `slot`, alternating between two gaps.
        let slot = width / 2 + j % 2;
        for i in 0..width {
            let v = 2 + j * width + i;
            let node_width = 20.0 + (i % 3) as f64 * 8.0;
            anchors[v] = Anchor::centered(point(100.0 * i as f64, y), node_width, 20.0);
            layer.push(v);
            if i + 1 == slot {
                layer.push(path_node);
            }
        }
        anchors[path_node] = if path_node < real_node_count {
            Anchor::centered(point(100.0 * slot as f64 - 50.0, y), 30.0, 20.0)
        } else {
            Anchor::point(point(100.0 * slot as f64 - 50.0, y))
        };
        path_nodes.push(path_node);
    }

    let path = EdgePath::from_nodes(&path_nodes);
    let mut graph = LayeredGraph::new(real_node_count, node_count);
    graph.add_path(&path);

    Drawing {
        anchors,
        layers: LayerArrays::from_layers(layers),
        graph,
        path,
    }
}

fn bench_route_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_edge");
    group.measurement_time(Duration::from_secs(10));

    let settings = RoutingSettings::default();
    let cases = [
        ("layers_8_w6", 8usize, 6usize),
        ("layers_32_w12", 32usize, 12usize),
        ("layers_128_w24", 128usize, 24usize),
    ];

    for (name, layer_count, width) in cases {
        let drawing = crowded_drawing(layer_count, width);
        let input = match RoutingInput::new(
            &drawing.anchors,
            &drawing.layers,
            &drawing.graph,
            &settings,
        ) {
            Ok(input) => input,
            Err(err) => panic!("{name}: invalid drawing: {err}"),
        };
        group.bench_with_input(
            BenchmarkId::new("SmoothedPolylineRouter::route", name),
            &drawing.path,
            |b, path| {
                let mut router = SmoothedPolylineRouter::new(input);
                b.iter(|| black_box(router.route(black_box(path))))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_route_edge);
criterion_main!(benches);
