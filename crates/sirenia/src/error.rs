#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge path has no layer edges")]
    EmptyEdgePath,

    #[error("edge path is broken at edge {index}: {source_node} -> {target} does not continue from node {expected}")]
    BrokenEdgePath {
        index: usize,
        source_node: usize,
        target: usize,
        expected: usize,
    },

    #[error("layer edge {source_node} -> {target} does not join layer {source_layer} to layer {expected_layer}")]
    NonAdjacentLayers {
        source_node: usize,
        target: usize,
        source_layer: usize,
        expected_layer: usize,
    },

    #[error("edge path endpoint {node} is a virtual node")]
    VirtualEndpoint { node: usize },

    #[error("no anchor for node {node} (anchor table holds {len})")]
    MissingAnchor { node: usize, len: usize },

    #[error("node {node} has no entry in the layer arrays")]
    MissingLayerEntry { node: usize },

    #[error("layer arrays disagree about node {node}: {reason}")]
    InconsistentLayers { node: usize, reason: String },

    #[error(
        "virtual node {node} must have exactly one incoming and one outgoing layer edge (has {incoming} in, {outgoing} out)"
    )]
    VirtualNodeDegree {
        node: usize,
        incoming: usize,
        outgoing: usize,
    },

    #[error("invalid routing setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error(
        "corner at ({x}, {y}) still crosses a boundary with fit coefficient {coefficient}"
    )]
    UnsmoothableCorner { x: f64, y: f64, coefficient: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
