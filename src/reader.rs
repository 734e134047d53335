// Parse-tree ingestion
//
// The external parser serializes its tree as JSON; this module turns that
// text back into the in-memory tree form. Limits are enforced before the
// tree reaches the rewrite and analysis passes, so pathological input fails
// here with a driver error instead of exhausting the stack further in.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::limits::FrontendLimits;
use crate::tree::Child;

/// Errors raised while loading a parse tree. These are driver failures, not
/// language diagnostics; a tree that loads cleanly can still be full of
/// semantic errors.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tree JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input is {size} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },
    #[error("tree depth {depth} exceeds the {limit} level limit")]
    TreeTooDeep { depth: usize, limit: usize },
    #[error("tree holds more than {limit} nodes")]
    TreeTooBig { limit: usize },
}

/// Parses a tree from its JSON form, enforcing the given limits.
pub fn from_str(input: &str, limits: &FrontendLimits) -> Result<Child, ReadError> {
    if input.len() > limits.max_input_size {
        return Err(ReadError::InputTooLarge {
            size: input.len(),
            limit: limits.max_input_size,
        });
    }

    let root: Child = serde_json::from_str(input)?;
    let (nodes, depth) = enforce_shape(&root, limits)?;
    debug!(nodes, depth, "parse tree loaded");
    Ok(root)
}

/// Reads and parses a tree file.
pub fn read_file(path: &Path, limits: &FrontendLimits) -> Result<Child, ReadError> {
    let input = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&input, limits)
}

// Walks the tree iteratively, counting every node and token and tracking
// nesting depth. Iterative on purpose: the recursion guard must not itself
// recurse over hostile input.
fn enforce_shape(root: &Child, limits: &FrontendLimits) -> Result<(usize, usize), ReadError> {
    let mut nodes = 0usize;
    let mut deepest = 0usize;
    let mut stack = vec![(root, 1usize)];

    while let Some((child, depth)) = stack.pop() {
        nodes += 1;
        if nodes > limits.max_tree_nodes {
            return Err(ReadError::TreeTooBig {
                limit: limits.max_tree_nodes,
            });
        }
        if depth > limits.max_tree_depth {
            return Err(ReadError::TreeTooDeep {
                depth,
                limit: limits.max_tree_depth,
            });
        }
        deepest = deepest.max(depth);

        if let Child::Tree(node) = child {
            for grandchild in &node.children {
                stack.push((grandchild, depth + 1));
            }
        }
    }

    Ok((nodes, deepest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, TokenKind};

    fn limits() -> FrontendLimits {
        FrontendLimits::default()
    }

    #[test]
    fn reads_a_tagged_tree_with_tokens() {
        let input = r#"{
            "kind": "variable_declaration",
            "children": [
                {"kind": "identifier", "text": "x", "line": 2, "column": 5},
                {"kind": "type_specifier", "children": [
                    {"kind": "identifier", "text": "int", "line": 2, "column": 8}
                ]}
            ]
        }"#;

        let root = from_str(input, &limits()).unwrap();
        let node = root.as_tree().unwrap();
        assert_eq!(node.kind, NodeKind::VariableDeclaration);

        let name = node.token_child(0).unwrap();
        assert_eq!(name.kind, TokenKind::Identifier);
        assert_eq!(name.text, "x");
        assert_eq!((name.line, name.column), (2, 5));

        assert_eq!(node.tree_child(1).unwrap().kind, NodeKind::TypeSpecifier);
    }

    #[test]
    fn reads_a_bare_token_as_a_root() {
        let input = r#"{"kind": "number", "text": "42", "line": 1, "column": 1}"#;

        match from_str(input, &limits()).unwrap() {
            Child::Token(token) => {
                assert_eq!(token.kind, TokenKind::Number);
                assert_eq!(token.text, "42");
            }
            Child::Tree(_) => panic!("expected a token root"),
        }
    }

    #[test]
    fn string_tokens_use_the_string_tag() {
        let input = r#"{"kind": "string", "text": "\"hi\"", "line": 1, "column": 9}"#;

        match from_str(input, &limits()).unwrap() {
            Child::Token(token) => assert_eq!(token.kind, TokenKind::Str),
            Child::Tree(_) => panic!("expected a token root"),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let result = from_str("{not json", &limits());
        assert!(matches!(result, Err(ReadError::Json(_))));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let input = r#"{"kind": "lambda", "children": []}"#;
        assert!(matches!(from_str(input, &limits()), Err(ReadError::Json(_))));
    }

    #[test]
    fn oversized_input_is_rejected_before_parsing() {
        let mut small = limits();
        small.max_input_size = 10;

        let input = r#"{"kind": "program", "children": []}"#;
        match from_str(input, &small) {
            Err(ReadError::InputTooLarge { size, limit }) => {
                assert_eq!(size, input.len());
                assert_eq!(limit, 10);
            }
            other => panic!("expected InputTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn overly_deep_trees_are_rejected() {
        let mut shallow = limits();
        shallow.max_tree_depth = 3;

        let input = r#"{"kind": "program", "children": [
            {"kind": "block", "children": [
                {"kind": "block", "children": [
                    {"kind": "identifier", "text": "x", "line": 1, "column": 1}
                ]}
            ]}
        ]}"#;

        assert!(matches!(
            from_str(input, &shallow),
            Err(ReadError::TreeTooDeep { depth: 4, limit: 3 })
        ));
    }

    #[test]
    fn overly_large_trees_are_rejected() {
        let mut tiny = limits();
        tiny.max_tree_nodes = 2;

        let input = r#"{"kind": "block", "children": [
            {"kind": "identifier", "text": "a", "line": 1, "column": 1},
            {"kind": "identifier", "text": "b", "line": 1, "column": 3}
        ]}"#;

        assert!(matches!(
            from_str(input, &tiny),
            Err(ReadError::TreeTooBig { limit: 2 })
        ));
    }

    #[test]
    fn trees_within_limits_pass() {
        let mut exact = limits();
        exact.max_tree_depth = 2;
        exact.max_tree_nodes = 3;

        let input = r#"{"kind": "block", "children": [
            {"kind": "identifier", "text": "a", "line": 1, "column": 1},
            {"kind": "identifier", "text": "b", "line": 1, "column": 3}
        ]}"#;

        assert!(from_str(input, &exact).is_ok());
    }

    #[test]
    fn missing_files_report_their_path() {
        let result = read_file(Path::new("/nonexistent/tree.json"), &limits());
        match result {
            Err(ReadError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/tree.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
