//! Canonical tree strings for dependency graphs
//!
//! Encodes the subtree below a node as `label(child1 child2 ...)` in
//! successor order. Only used to compare tree shapes, so labels merely have
//! to be injective per node.

use std::convert::Infallible;

use serde::Deserialize;
use thiserror::Error;

use crate::graph::{Graph, NodeId};

/// Historical 142-symbol label table, indexed by node
const LEGACY_LABELS: [char; 142] = [
    'a', 'A', 'b', 'B', 'c', 'C', 'd', 'D', 'e', 'E', 'f', 'F', 'g', 'G', 'h', 'H', 'i', 'I', 'j',
    'J', 'k', 'K', 'l', 'L', 'm', 'M', 'n', 'N', 'o', 'O', 'p', 'P', 'q', 'Q', 'r', 'R', 's', 'S',
    'ß', 't', 'T', 'u', 'U', 'v', 'V', 'w', 'W', 'x', 'X', 'y', 'Y', 'z', 'Z', 'α', 'β', 'γ', 'δ',
    'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ', 'ς', 'τ', 'υ', 'φ', 'χ',
    'ψ', 'ω', 'а', 'А', 'б', 'Б', 'в', 'В', 'г', 'Г', 'д', 'Д', 'е', 'Е', 'ж', 'Ж', 'з', 'З', 'и',
    'И', 'й', 'Й', 'к', 'К', 'л', 'Л', 'м', 'М', 'н', 'Н', 'о', 'О', 'п', 'П', 'р', 'Р', 'с', 'С',
    'т', 'Т', 'у', 'У', 'ф', 'Ф', 'х', 'Х', 'ц', 'Ц', 'ч', 'Ч', 'ш', 'Ш', 'щ', 'Щ', 'ъ', 'Ъ', 'ы',
    'Ы', 'ь', 'Ь', 'э', 'Э', 'ю', 'Ю', 'я', 'Я',
];

/// How nodes are rendered as labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlphabet {
    /// Decimal node index, no upper bound
    #[default]
    Index,
    /// One symbol per node from the historical table; fails past node 141
    Legacy,
}

impl LabelAlphabet {
    pub fn label(self, node: NodeId) -> Result<String, SerializeError> {
        match self {
            LabelAlphabet::Index => Ok(node.to_string()),
            LabelAlphabet::Legacy => LEGACY_LABELS
                .get(node)
                .map(char::to_string)
                .ok_or(SerializeError::CapacityExceeded {
                    node,
                    capacity: LEGACY_LABELS.len() - 1,
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("cannot stringify a tree of length > {capacity} (node={node})")]
    CapacityExceeded { node: NodeId, capacity: usize },
}

enum Token {
    Node(NodeId),
    Space,
    Close,
}

/// Render the subtree below `root` (inclusive), labels from `label`
fn render<E>(
    graph: &Graph,
    root: NodeId,
    mut label: impl FnMut(NodeId) -> Result<String, E>,
) -> Result<String, E> {
    let mut out = String::new();
    let mut stack = vec![Token::Node(root)];

    while let Some(token) = stack.pop() {
        match token {
            Token::Space => out.push(' '),
            Token::Close => out.push(')'),
            Token::Node(node) => {
                out.push_str(&label(node)?);
                let successors = graph.successors(node);
                if successors.is_empty() {
                    continue;
                }
                out.push('(');
                stack.push(Token::Close);
                for (i, &child) in successors.iter().enumerate().rev() {
                    stack.push(Token::Node(child));
                    if i > 0 {
                        stack.push(Token::Space);
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Serialize the tree below `root` with the given alphabet
pub fn serialize_with(
    graph: &Graph,
    root: NodeId,
    alphabet: LabelAlphabet,
) -> Result<String, SerializeError> {
    render(graph, root, |node| alphabet.label(node))
}

/// Serialize the tree below `root` with decimal index labels
pub fn serialize(graph: &Graph, root: NodeId) -> String {
    match render::<Infallible>(graph, root, |node| Ok(node.to_string())) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}
