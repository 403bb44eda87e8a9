// Syntax tree definitions for the TINY front end

use serde::Serialize;
use std::fmt;

/// Pre-order index of a node within one syntax tree
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 0-based character offset into the source text
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} (line {}, column {})",
            self.offset, self.line, self.column
        )
    }
}

/// The closed set of syntax node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Assign,
    If,
    Repeat,
    Read,
    Write,
    BinaryOp,
    Identifier,
    NumberLiteral,
}

impl NodeKind {
    /// Statements can carry the next statement of their sequence as a trailing child.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Assign
                | NodeKind::If
                | NodeKind::Repeat
                | NodeKind::Read
                | NodeKind::Write
        )
    }

    /// Label used by the tree dump and the layout boxes
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Assign => "assign",
            NodeKind::If => "if",
            NodeKind::Repeat => "repeat",
            NodeKind::Read => "read",
            NodeKind::Write => "write",
            NodeKind::BinaryOp => "op",
            NodeKind::Identifier => "id",
            NodeKind::NumberLiteral => "const",
        }
    }
}

/// A node of the syntax tree.
///
/// Each node owns its children. A statement sequence `s1; s2; s3` is not a
/// list node: `s2` is appended as the last child of `s1`, `s3` as the last
/// child of `s2`, and so on.
///
/// Long sequences therefore make deep trees; walking, comparing and dropping
/// are done with an explicit stack so depth is bounded only by memory.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::with_text(NodeKind::Identifier, name)
    }

    pub fn number(digits: impl Into<String>) -> Self {
        Self::with_text(NodeKind::NumberLiteral, digits)
    }

    pub fn binary(op: impl Into<String>, left: SyntaxNode, right: SyntaxNode) -> Self {
        Self::with_text(NodeKind::BinaryOp, op)
            .with_child(left)
            .with_child(right)
    }

    /// `type (value)` for nodes with text, bare `type` otherwise
    pub fn label(&self) -> String {
        match &self.text {
            Some(text) => format!("{} ({})", self.kind.label(), text),
            None => self.kind.label().to_string(),
        }
    }

    /// Number of nodes in this subtree, chained statements included
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Pre-order traversal yielding each node with its depth below `self`
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        // Same shape and contents iff the pre-order sequences agree
        let shallow = |(_, node): (usize, &SyntaxNode)| {
            (node.kind, node.text.clone(), node.children.len())
        };
        self.walk().map(shallow).eq(other.walk().map(shallow))
    }
}

impl Eq for SyntaxNode {}

impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`SyntaxNode::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a SyntaxNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a SyntaxNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Render the tree one node per line, indenting each level with `"  | "`.
pub fn format_tree_dump(root: &SyntaxNode) -> String {
    let mut out = String::new();
    for (depth, node) in root.walk() {
        out.push_str(&"  | ".repeat(depth));
        out.push_str(&node.label());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_predicate() {
        assert!(NodeKind::Assign.is_statement());
        assert!(NodeKind::Repeat.is_statement());
        assert!(!NodeKind::BinaryOp.is_statement());
        assert!(!NodeKind::NumberLiteral.is_statement());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SyntaxNode::new(NodeKind::If).label(), "if");
        assert_eq!(SyntaxNode::identifier("x").label(), "id (x)");
        assert_eq!(
            SyntaxNode::binary("+", SyntaxNode::number("1"), SyntaxNode::number("2")).label(),
            "op (+)"
        );
    }

    #[test]
    fn test_node_count_includes_chain() {
        let second = SyntaxNode::with_text(NodeKind::Read, "y");
        let first = SyntaxNode::with_text(NodeKind::Read, "x").with_child(second);
        assert_eq!(first.node_count(), 2);
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let tree = SyntaxNode::with_text(NodeKind::Read, "x").with_child(
            SyntaxNode::new(NodeKind::Write).with_child(SyntaxNode::identifier("x")),
        );
        let visited: Vec<_> = tree.walk().map(|(d, n)| (d, n.label())).collect();
        assert_eq!(
            visited,
            vec![
                (0, "read (x)".to_string()),
                (1, "write".to_string()),
                (2, "id (x)".to_string()),
            ]
        );
    }

    #[test]
    fn test_equality_compares_whole_tree() {
        let a = SyntaxNode::binary("-", SyntaxNode::number("1"), SyntaxNode::number("2"));
        let b = SyntaxNode::binary("-", SyntaxNode::number("1"), SyntaxNode::number("2"));
        let c = SyntaxNode::binary("-", SyntaxNode::number("1"), SyntaxNode::number("3"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, SyntaxNode::number("1"));
    }

    #[test]
    fn test_tree_dump_indentation() {
        let tree = SyntaxNode::with_text(NodeKind::Assign, "x")
            .with_child(SyntaxNode::binary(
                "+",
                SyntaxNode::number("1"),
                SyntaxNode::identifier("y"),
            ));

        assert_eq!(
            format_tree_dump(&tree),
            "assign (x)\n  | op (+)\n  |   | const (1)\n  |   | id (y)\n"
        );
    }
}
