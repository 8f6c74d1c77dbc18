//! Ordered labeled trees
//!
//! Generic rooted trees with a string label per node and an ordered list of
//! children, stored in an arena. Tree edit distance works on this type and
//! knows nothing about dependency relations.

use std::fmt;
use std::str::FromStr;

use crate::parser::{ParseError, parse_tree};

/// Index of a node in the arena
pub type NodeIndex = usize;

/// A node in an ordered labeled tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: NodeIndex,
    pub label: String,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
}

impl TreeNode {
    /// Create a new detached node
    pub fn new(id: NodeIndex, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An ordered labeled tree; the first node added is the root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledTree {
    pub nodes: Vec<TreeNode>,
}

impl LabeledTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a detached node and return its index
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        let id = self.nodes.len();
        self.nodes.push(TreeNode::new(id, label));
        id
    }

    /// Append `child_id` as the last child of `parent_id`
    pub fn set_parent(&mut self, child_id: NodeIndex, parent_id: NodeIndex) {
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id);
        }
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(child_id);
        }
    }

    pub fn get_node(&self, id: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<NodeIndex> {
        if self.nodes.is_empty() { None } else { Some(0) }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn label(&self, id: NodeIndex) -> Option<&str> {
        self.get_node(id).map(|node| node.label.as_str())
    }

    /// Children of a node, left to right
    pub fn children(&self, id: NodeIndex) -> &[NodeIndex] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn parent(&self, id: NodeIndex) -> Option<&TreeNode> {
        self.get_node(id)
            .and_then(|node| node.parent)
            .and_then(|parent_id| self.get_node(parent_id))
    }

    /// Post-order traversal from the root
    pub fn postorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root() else {
            return order;
        };

        let mut stack = vec![(root, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
            } else {
                stack.push((node, true));
                stack.extend(self.children(node).iter().rev().map(|&c| (c, false)));
            }
        }
        order
    }
}

/// Pieces of the bracketed form still to be written
enum Token {
    Node(NodeIndex),
    Space,
    Close,
}

/// Canonical bracketed form: `label(child1 child2 ...)`, leaves as bare labels
impl fmt::Display for LabeledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root() else {
            return Ok(());
        };

        let mut stack = vec![Token::Node(root)];
        while let Some(token) = stack.pop() {
            match token {
                Token::Space => f.write_str(" ")?,
                Token::Close => f.write_str(")")?,
                Token::Node(id) => {
                    f.write_str(self.label(id).unwrap_or_default())?;
                    let children = self.children(id);
                    if children.is_empty() {
                        continue;
                    }
                    f.write_str("(")?;
                    stack.push(Token::Close);
                    for (i, &child) in children.iter().enumerate().rev() {
                        stack.push(Token::Node(child));
                        if i > 0 {
                            stack.push(Token::Space);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromStr for LabeledTree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tree(s)
    }
}
