//! Bounding-volume trees over boundary pieces.
//!
//! Leaves wrap one straight boundary piece with its exact parallelogram. Internal nodes own two
//! children and a parallelogram covering both. Trees are built bottom-up once and never mutated.

use crate::curve::{LineSegment, Polyline, Segment};
use crate::parallelogram::Parallelogram;

#[derive(Debug, Clone, PartialEq)]
pub enum ParallelogramNode {
    Internal {
        left: Box<ParallelogramNode>,
        right: Box<ParallelogramNode>,
        bound: Parallelogram,
    },
    Leaf {
        segment: LineSegment,
        bound: Parallelogram,
    },
}

impl ParallelogramNode {
    pub fn leaf(segment: LineSegment) -> Self {
        Self::Leaf {
            bound: segment.parallelogram(),
            segment,
        }
    }

    pub fn internal(left: ParallelogramNode, right: ParallelogramNode) -> Self {
        let bound = Parallelogram::union(left.bound(), right.bound());
        Self::Internal {
            left: Box::new(left),
            right: Box::new(right),
            bound,
        }
    }

    pub fn bound(&self) -> &Parallelogram {
        match self {
            Self::Internal { bound, .. } | Self::Leaf { bound, .. } => bound,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
            Self::Leaf { .. } => 1,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
            Self::Leaf { .. } => 1,
        }
    }

    fn intersects(&self, segment: &Segment, bound: &Parallelogram) -> bool {
        if !self.bound().intersects(bound) {
            return false;
        }
        match self {
            Self::Internal { left, right, .. } => {
                left.intersects(segment, bound) || right.intersects(segment, bound)
            }
            Self::Leaf { segment: piece, .. } => segment.intersects_line(piece),
        }
    }
}

/// A possibly empty tree of boundary pieces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    root: Option<ParallelogramNode>,
}

impl Hierarchy {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a tree over `leaves`.
    ///
    /// Nodes are split along the longer side of their centers' bounding box. When the widest gap
    /// between neighbouring centers leaves at least `group_split` nodes (and a quarter of the
    /// group) on each side, the split follows that gap so spatial clusters stay together;
    /// otherwise it falls back to the median.
    pub fn build(leaves: Vec<ParallelogramNode>, group_split: usize) -> Self {
        if leaves.is_empty() {
            return Self::empty();
        }
        Self {
            root: Some(calculate(leaves, group_split.max(1))),
        }
    }

    pub fn from_polylines<'a>(
        boundaries: impl IntoIterator<Item = &'a Polyline>,
        group_split: usize,
    ) -> Self {
        let leaves = boundaries
            .into_iter()
            .flat_map(|b| b.segments())
            .map(ParallelogramNode::leaf)
            .collect();
        Self::build(leaves, group_split)
    }

    pub fn from_segments(
        segments: impl IntoIterator<Item = LineSegment>,
        group_split: usize,
    ) -> Self {
        Self::build(
            segments.into_iter().map(ParallelogramNode::leaf).collect(),
            group_split,
        )
    }

    pub fn root(&self) -> Option<&ParallelogramNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, ParallelogramNode::leaf_count)
    }

    pub fn intersects(&self, segment: &Segment) -> bool {
        let Some(root) = self.root.as_ref() else {
            return false;
        };
        root.intersects(segment, &segment.parallelogram())
    }
}

fn calculate(mut nodes: Vec<ParallelogramNode>, group_split: usize) -> ParallelogramNode {
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    if nodes.len() == 2 {
        let right = nodes.pop();
        let left = nodes.pop();
        if let (Some(left), Some(right)) = (left, right) {
            return ParallelogramNode::internal(left, right);
        }
    }

    let centers: Vec<_> = nodes.iter().map(|n| n.bound().center()).collect();
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for c in &centers {
        min_x = min_x.min(c.x);
        max_x = max_x.max(c.x);
        min_y = min_y.min(c.y);
        max_y = max_y.max(c.y);
    }
    let by_x = max_x - min_x >= max_y - min_y;
    let key = |n: &ParallelogramNode| {
        let c = n.bound().center();
        if by_x { c.x } else { c.y }
    };
    nodes.sort_by(|a, b| key(a).total_cmp(&key(b)));

    let len = nodes.len();
    let min_side = group_split.max(len / 4).max(1);
    let mut split = len / 2;
    let mut widest = 0.0f64;
    let candidates = if 2 * min_side <= len {
        min_side..=(len - min_side)
    } else {
        1..=0
    };
    for i in candidates {
        let gap = key(&nodes[i]) - key(&nodes[i - 1]);
        if gap > widest {
            widest = gap;
            split = i;
        }
    }

    let right = nodes.split_off(split);
    ParallelogramNode::internal(calculate(nodes, group_split), calculate(right, group_split))
}
