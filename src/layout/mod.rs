//! Syntax tree layout
//!
//! Turns a [`SyntaxNode`] tree into [`Geometry`]: a box per node and an edge
//! per parent/child link. Nested children (conditions, branches, loop bodies,
//! operands) are laid out on the row below their parent, left to right, each
//! in its own band. The chained successor of a statement is laid out on the
//! parent's own row, to the right of the parent's band, so control-flow
//! nesting reads vertically and statement sequencing horizontally.
//!
//! - [`partition`]: child roles and width computation
//! - [`geometry`]: output data types
//!
//! Layout is a pure function of the tree and the [`LayoutConfig`]; the same
//! input always yields identical geometry.

pub mod geometry;
pub mod partition;

pub use geometry::{DrawBox, Edge, EdgeKind, Geometry, Point, Shape};
pub use partition::{child_roles, footprint, partition, subtree_width, Partition, Role};

use crate::config::LayoutConfig;
use crate::parser::ast::SyntaxNode;
use partition::FlatTree;

/// Lay out `root` with its top-left band corner at the origin.
///
/// Boxes are listed by node id; the edge leading into node `n` is
/// `edges[n - 1]`.
pub fn layout(root: &SyntaxNode, config: &LayoutConfig) -> Geometry {
    let config = config.normalized();
    let tree = FlatTree::new(root);
    let extents = tree.measure(&config);

    // Top-left corner of each node's band, filled in by its parent
    let mut origins = vec![Point::new(0.0, 0.0); tree.nodes.len()];
    let mut boxes = Vec::with_capacity(tree.nodes.len());

    for (id, flat) in tree.nodes.iter().enumerate() {
        let Point { x: left, y: top } = origins[id];
        let width = extents[id].width;

        boxes.push(DrawBox {
            node: id,
            kind: flat.node.kind,
            label: flat.node.label(),
            shape: Shape::for_kind(flat.node.kind),
            x: left + (width - config.node_width) / 2.0,
            y: top,
            width: config.node_width,
            height: config.node_height,
        });

        let mut cursor = left;
        for &child in &flat.nested {
            origins[child] = Point::new(cursor, top + config.level_height);
            cursor += extents[child].footprint;
        }
        if let Some(next) = flat.chained {
            origins[next] = Point::new(left + width + config.chain_gap, top);
        }
    }

    let edges = tree
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(id, flat)| {
            let (parent_id, role) = flat.parent?;
            let (parent, child) = (&boxes[parent_id], &boxes[id]);
            Some(match role {
                Role::Nested => Edge {
                    parent: parent_id,
                    child: id,
                    kind: EdgeKind::Nesting,
                    from: parent.bottom_center(),
                    to: child.top_center(),
                },
                Role::Chained => Edge {
                    parent: parent_id,
                    child: id,
                    kind: EdgeKind::Chain,
                    from: parent.right_middle(),
                    to: child.left_middle(),
                },
            })
        })
        .collect();

    Geometry::new(boxes, edges, extents[0].footprint)
}

/// [`layout`] with the default spacing
pub fn layout_default(root: &SyntaxNode) -> Geometry {
    layout(root, &LayoutConfig::default())
}
