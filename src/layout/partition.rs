//! Child classification and width computation
//!
//! A node's children are split into *nested* operands, drawn on the row
//! below, and at most one *chained* successor, drawn beside the node on the
//! same row. The split depends only on the parent kind and child index/kind:
//!
//! | parent                      | nested              | chained                  |
//! |-----------------------------|---------------------|--------------------------|
//! | `If`                        | indices 0, 1, 2     | index ≥ 3                |
//! | `Repeat`                    | indices 0, 1        | index ≥ 2                |
//! | `Assign` / `Read` / `Write` | non-statement kids  | statement kid            |
//! | expressions                 | all                 | never                    |
//!
//! Only the first chain candidate is chained; any further candidate (which a
//! parsed tree never has) is treated as nested.

use crate::config::LayoutConfig;
use crate::parser::ast::{NodeId, NodeKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Nested,
    Chained,
}

/// Role of every child of `node`, aligned with `node.children`
pub fn child_roles(node: &SyntaxNode) -> Vec<Role> {
    let mut chained_taken = false;
    node.children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let candidate = match node.kind {
                NodeKind::If => index >= 3,
                NodeKind::Repeat => index >= 2,
                NodeKind::Assign | NodeKind::Read | NodeKind::Write => {
                    child.kind.is_statement()
                }
                NodeKind::BinaryOp | NodeKind::Identifier | NodeKind::NumberLiteral => false,
            };
            if candidate && !chained_taken {
                chained_taken = true;
                Role::Chained
            } else {
                Role::Nested
            }
        })
        .collect()
}

/// Children of one node grouped by role
#[derive(Debug)]
pub struct Partition<'a> {
    pub nested: Vec<&'a SyntaxNode>,
    pub chained: Option<&'a SyntaxNode>,
}

pub fn partition(node: &SyntaxNode) -> Partition<'_> {
    let mut nested = Vec::new();
    let mut chained = None;
    for (child, role) in node.children.iter().zip(child_roles(node)) {
        match role {
            Role::Nested => nested.push(child),
            Role::Chained => chained = Some(child),
        }
    }
    Partition { nested, chained }
}

/// Horizontal extents of one node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Extent {
    /// Band over the nested children
    pub width: f64,
    /// Band plus the gap and the chained sibling's footprint
    pub footprint: f64,
}

/// One node of a [`FlatTree`], with its children split by role
#[derive(Debug)]
pub(crate) struct FlatNode<'t> {
    pub node: &'t SyntaxNode,
    pub parent: Option<(NodeId, Role)>,
    pub nested: Vec<NodeId>,
    pub chained: Option<NodeId>,
}

/// A syntax tree flattened into pre-order, indexed by [`NodeId`].
///
/// Every child has a larger id than its parent, so a forward pass visits
/// parents first and a backward pass visits children first. Neither pass
/// recurses, which keeps long statement chains off the call stack.
#[derive(Debug)]
pub(crate) struct FlatTree<'t> {
    pub nodes: Vec<FlatNode<'t>>,
}

impl<'t> FlatTree<'t> {
    pub fn new(root: &'t SyntaxNode) -> Self {
        let mut nodes: Vec<FlatNode<'t>> = Vec::new();
        let mut stack: Vec<(&'t SyntaxNode, Option<(NodeId, Role)>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let id = nodes.len();
            if let Some((parent_id, role)) = parent {
                match role {
                    Role::Nested => nodes[parent_id].nested.push(id),
                    Role::Chained => nodes[parent_id].chained = Some(id),
                }
            }
            nodes.push(FlatNode {
                node,
                parent,
                nested: Vec::new(),
                chained: None,
            });
            for (child, role) in node.children.iter().zip(child_roles(node)).rev() {
                stack.push((child, Some((id, role))));
            }
        }

        Self { nodes }
    }

    /// Extents of every node, children before parents
    pub fn measure(&self, config: &LayoutConfig) -> Vec<Extent> {
        let mut extents = vec![Extent::default(); self.nodes.len()];
        for (id, flat) in self.nodes.iter().enumerate().rev() {
            let width = if flat.nested.is_empty() {
                config.unit_width
            } else {
                flat.nested.iter().map(|&child| extents[child].footprint).sum()
            };
            let footprint = match flat.chained {
                Some(next) => width + config.chain_gap + extents[next].footprint,
                None => width,
            };
            extents[id] = Extent { width, footprint };
        }
        extents
    }
}

fn root_extent(node: &SyntaxNode, config: &LayoutConfig) -> Extent {
    FlatTree::new(node).measure(config)[0]
}

/// Width of the band a node spans over its nested children.
///
/// One unit for a node with no nested children, otherwise the sum of the
/// nested children's footprints.
pub fn subtree_width(node: &SyntaxNode, config: &LayoutConfig) -> f64 {
    root_extent(node, config).width
}

/// Full horizontal extent: the subtree width plus gap and chain when chained.
pub fn footprint(node: &SyntaxNode, config: &LayoutConfig) -> f64 {
    root_extent(node, config).footprint
}
