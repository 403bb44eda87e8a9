//! Geometry produced by the layout engine
//!
//! Plain data for any rendering collaborator: boxes in pre-order, edges in
//! the pre-order of the node they lead into, and the overall extent.
//! Coordinates grow right (x) and down (y); every box is given by its
//! top-left corner.

use crate::parser::ast::{NodeId, NodeKind};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Statements are drawn as rectangles, expressions as ellipses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rectangle,
    Ellipse,
}

impl Shape {
    pub fn for_kind(kind: NodeKind) -> Self {
        if kind.is_statement() {
            Shape::Rectangle
        } else {
            Shape::Ellipse
        }
    }
}

/// One node's box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawBox {
    pub node: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawBox {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn left_middle(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    pub fn right_middle(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Nesting edges point down to an operand, chain edges across to the next
/// statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Nesting,
    Chain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub kind: EdgeKind,
    pub from: Point,
    pub to: Point,
}

/// Complete drawing of one syntax tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub boxes: Vec<DrawBox>,
    pub edges: Vec<Edge>,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    index: FxHashMap<NodeId, usize>,
}

impl Geometry {
    pub(crate) fn new(boxes: Vec<DrawBox>, edges: Vec<Edge>, width: f64) -> Self {
        let height = boxes.iter().map(DrawBox::bottom).fold(0.0, f64::max);
        let index = boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.node, i))
            .collect();
        Self {
            boxes,
            edges,
            width,
            height,
            index,
        }
    }

    /// Box drawn for `node`
    pub fn find(&self, node: NodeId) -> Option<&DrawBox> {
        self.index.get(&node).map(|&i| &self.boxes[i])
    }

    /// Edges leaving `node`
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.parent == node)
    }

    /// The edge that reaches `node`, if it is not the root
    pub fn edge_to(&self, node: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.child == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_box(node: NodeId, x: f64) -> DrawBox {
        DrawBox {
            node,
            kind: NodeKind::Read,
            label: "read (x)".to_string(),
            shape: Shape::Rectangle,
            x,
            y: 10.0,
            width: 20.0,
            height: 8.0,
        }
    }

    #[test]
    fn test_anchor_points() {
        let b = sample_box(0, 0.0);
        assert_eq!(b.top_center(), Point::new(10.0, 10.0));
        assert_eq!(b.bottom_center(), Point::new(10.0, 18.0));
        assert_eq!(b.left_middle(), Point::new(0.0, 14.0));
        assert_eq!(b.right_middle(), Point::new(20.0, 14.0));
    }

    #[test]
    fn test_find_by_node_id() {
        let geometry = Geometry::new(vec![sample_box(0, 0.0), sample_box(1, 40.0)], Vec::new(), 60.0);
        assert_eq!(geometry.find(1).map(|b| b.x), Some(40.0));
        assert!(geometry.find(2).is_none());
        assert_eq!(geometry.height, 18.0);
    }

    #[test]
    fn test_shape_follows_statement_kind() {
        assert_eq!(Shape::for_kind(NodeKind::If), Shape::Rectangle);
        assert_eq!(Shape::for_kind(NodeKind::Identifier), Shape::Ellipse);
    }
}
