//! Tree string parser
//!
//! Parses the bracketed form `label(child1 child2 ...)` into a
//! [`LabeledTree`] using a pest grammar.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crate::tree::{LabeledTree, NodeIndex};

#[derive(Parser)]
#[grammar = "tree.pest"]
struct TreeParser;

/// Error type for parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        ParseError {
            message: err.to_string(),
        }
    }
}

/// Parse a tree string into a LabeledTree
///
/// Node indices are assigned in pre-order, so the root is always node 0.
/// Brackets are matched with an explicit stack, so nesting depth is only
/// bounded by memory.
pub fn parse_tree(input: &str) -> Result<LabeledTree, ParseError> {
    let mut pairs = TreeParser::parse(Rule::tree, input)?;

    let Some(tree_pair) = pairs.next() else {
        return Err(ParseError {
            message: "No tree found".to_string(),
        });
    };

    let mut tree = LabeledTree::new();
    // Nodes whose child list is open, innermost last
    let mut parents: Vec<NodeIndex> = Vec::new();
    // Node that may open a child list next
    let mut last: Option<NodeIndex> = None;

    for token in tree_pair.into_inner() {
        match token.as_rule() {
            Rule::label => {
                let parent = parents.last().copied();
                if parent.is_none() && !tree.is_empty() {
                    return Err(error_at(&token, "Expected a single root"));
                }
                let id = tree.add_node(token.as_str());
                if let Some(parent) = parent {
                    tree.set_parent(id, parent);
                }
                last = Some(id);
            }
            Rule::open => {
                let Some(id) = last.take() else {
                    return Err(error_at(&token, "Expected a label before '('"));
                };
                parents.push(id);
            }
            Rule::close => {
                let Some(parent) = parents.pop() else {
                    return Err(error_at(&token, "Unbalanced ')'"));
                };
                if tree.children(parent).is_empty() {
                    return Err(error_at(&token, "Empty child list"));
                }
                last = None;
            }
            _ => {}
        }
    }

    if !parents.is_empty() {
        return Err(ParseError {
            message: format!("{} unclosed '('", parents.len()),
        });
    }
    Ok(tree)
}

fn error_at(token: &Pair<Rule>, message: &str) -> ParseError {
    let (line, col) = token.line_col();
    ParseError {
        message: format!("{message} at {line}:{col}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaf() {
        let tree = parse_tree("node0").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.label(0), Some("node0"));
        assert!(tree.children(0).is_empty());
    }

    #[test]
    fn test_parse_nested() {
        let tree = parse_tree("f(d(a c(b)) e)").unwrap();

        assert_eq!(tree.len(), 6);
        assert_eq!(tree.label(0), Some("f"));
        let labels: Vec<&str> = tree.children(0).iter().filter_map(|&c| tree.label(c)).collect();
        assert_eq!(labels, vec!["d", "e"]);
        let d = tree.children(0)[0];
        let labels: Vec<&str> = tree.children(d).iter().filter_map(|&c| tree.label(c)).collect();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[test]
    fn test_parse_unicode_labels() {
        let tree = parse_tree("ä(D(A C(B)) E)").unwrap();
        assert_eq!(tree.label(0), Some("ä"));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_parse_whitespace() {
        let tree = parse_tree("  a( b   c )\n").unwrap();
        assert_eq!(tree.to_string(), "a(b c)");
    }

    #[test]
    fn test_round_trip() {
        for s in ["d", "g(h)", "a(b(c d) e(f g(i)))", "12(3 7(4 5) 9)"] {
            assert_eq!(parse_tree(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_tree("").is_err());
        assert!(parse_tree("a(").is_err());
        assert!(parse_tree("a()").is_err());
        assert!(parse_tree("a b").is_err());
        assert!(parse_tree("a(b))").is_err());
        assert!(parse_tree("(a)").is_err());
        assert!(parse_tree("a(b)(c)").is_err());
        assert!(parse_tree("a(b) c").is_err());

        let err = parse_tree("a(b(c)))").unwrap_err();
        assert_eq!(err.message, "Unbalanced ')' at 1:8");
        let err = parse_tree("a(b(c d)").unwrap_err();
        assert_eq!(err.message, "1 unclosed '('");
    }

    #[test]
    fn test_parse_deep_nesting() {
        // n(n(n(...)))
        let depth = 10_000;
        let mut text = "n(".repeat(depth - 1);
        text.push('n');
        text.push_str(&")".repeat(depth - 1));

        let tree = parse_tree(&text).unwrap();
        assert_eq!(tree.len(), depth);
        assert_eq!(tree.children(depth - 2), &[depth - 1]);
        assert!(tree.children(depth - 1).is_empty());
        assert_eq!(tree.to_string(), text);
    }

    #[test]
    fn test_from_str() {
        let tree: LabeledTree = "x(y z)".parse().unwrap();
        assert_eq!(tree.len(), 3);
    }
}
