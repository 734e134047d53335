// Parse-tree simplification pass
//
// The grammar-driven parser emits heavily nested trees: every operand sits
// inside term/factor wrapper chains and every braced body inside a block
// node, even when the wrapper adds nothing. This pass collapses that noise
// into a compact tree the analyzer and the backend can walk directly. It is
// a pure rewrite: input trees are never mutated, token text and positions
// pass through untouched, and running the pass on its own output changes
// nothing.

use crate::tree::{Child, Node, NodeKind};

/// Simplify a subtree, returning the rewritten form.
///
/// Collapsing can dissolve a wrapper entirely, so the result of simplifying
/// a node may be a bare token; callers get a [`Child`] back.
pub fn simplify(child: &Child) -> Child {
    match child {
        Child::Token(token) => Child::Token(token.clone()),
        Child::Tree(node) => simplify_node(node),
    }
}

/// Simplify a tree node according to its kind.
///
/// Every kind gets a spelled-out arm; a new grammar construct fails to
/// compile here until it is assigned a rewrite rule.
pub fn simplify_node(node: &Node) -> Child {
    match node.kind {
        NodeKind::IfStatement => simplify_if(node),
        // A block around a single statement is pure nesting.
        NodeKind::Block if node.children.len() == 1 => simplify(&node.children[0]),
        NodeKind::Term | NodeKind::Factor => collapse_operand(node),
        NodeKind::Program
        | NodeKind::Contract
        | NodeKind::Function
        | NodeKind::Parameters
        | NodeKind::Parameter
        | NodeKind::Block
        | NodeKind::Then
        | NodeKind::Else
        | NodeKind::Display
        | NodeKind::Print
        | NodeKind::TypeSpecifier
        | NodeKind::Expression
        | NodeKind::VariableDeclaration
        | NodeKind::Assignment => rebuild(node),
    }
}

// Default rule: keep the node, simplify each child in order.
fn rebuild(node: &Node) -> Child {
    let children = node.children.iter().map(simplify).collect();
    Child::Tree(Node::new(node.kind, children))
}

// If-statements are reshaped into a fixed layout: flattened condition first,
// the consequence inside a `then` wrapper, the alternative (when present)
// inside an `else` wrapper. Downstream consumers can then address branches
// by position without re-deriving the grammar shape.
fn simplify_if(node: &Node) -> Child {
    // A `then` wrapper in second position means the node is already in the
    // normalized layout; wrapping again would stack `then` inside `then`.
    let normalized = matches!(
        node.children.get(1),
        Some(Child::Tree(second)) if second.kind == NodeKind::Then
    );
    if normalized {
        return rebuild(node);
    }

    let mut parts = node.children.iter();
    let mut children = Vec::with_capacity(3);
    if let Some(condition) = parts.next() {
        children.push(simplify(condition));
    }
    if let Some(consequence) = parts.next() {
        let body = vec![simplify(consequence)];
        children.push(Node::new(NodeKind::Then, body).into());
    }
    if let Some(alternative) = parts.next() {
        let body = vec![simplify(alternative)];
        children.push(Node::new(NodeKind::Else, body).into());
    }
    Child::Tree(Node::new(NodeKind::IfStatement, children))
}

// A term or factor with one child is a plain wrapper and dissolves into the
// simplification of that child; chains of such wrappers unwind through the
// recursion until something substantive appears. Any other arity becomes an
// `expression` node holding the simplified operands; term and factor both
// coerce to the same tag, the grammar-level distinction ends here.
fn collapse_operand(node: &Node) -> Child {
    if node.children.len() == 1 {
        simplify(&node.children[0])
    } else {
        let operands = node.children.iter().map(simplify).collect();
        Child::Tree(Node::new(NodeKind::Expression, operands))
    }
}
