//! Nodes of the tour and helpers for building node tables.

use crate::error::{Result, TourError};

/// Index of a node in the node table passed to the optimizer.
///
/// Tours store `NodeId`s rather than coordinates, so two nodes with the
/// same coordinates remain distinct.
pub type NodeId = usize;

/// An immutable point in the plane.
///
/// # Examples
///
/// ```
/// use u_tour::node::Node;
///
/// let a = Node::new(0.0, 0.0);
/// let b = Node::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a node at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Node {
    fn from((x, y): (f64, f64)) -> Self {
        Node::new(x, y)
    }
}

/// Builds a node table from `(x, y)` pairs.
pub fn nodes_from_coords(coords: &[(f64, f64)]) -> Vec<Node> {
    coords.iter().copied().map(Node::from).collect()
}

/// Checks that a node table can be optimized.
///
/// Requires at least two nodes, all with finite coordinates.
pub fn validate_nodes(nodes: &[Node]) -> Result<()> {
    if nodes.len() < 2 {
        return Err(TourError::invalid(format!(
            "at least 2 nodes are required, got {}",
            nodes.len()
        )));
    }
    if let Some(idx) = nodes
        .iter()
        .position(|n| !n.x.is_finite() || !n.y.is_finite())
    {
        return Err(TourError::invalid(format!(
            "node {idx} has non-finite coordinates"
        )));
    }
    Ok(())
}
