// Tagged parse-tree data model
//
// The external grammar-driven parser hands the front end a tree of tagged
// nodes and position-bearing tokens. Node kinds form a closed vocabulary so
// that every pass over the tree is an exhaustive match; a grammar change
// that introduces a new construct must add a variant here and the compiler
// will point at every walker that needs a new arm.

use serde::{Deserialize, Serialize};

/// Grammar-rule tags appearing in parse trees.
///
/// `Then`, `Else` and `Expression` never come from the parser; the simplifier
/// introduces them when it normalizes if-statements and collapses
/// term/factor chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    Contract,
    Function,
    Parameters,
    Parameter,
    Block,
    IfStatement,
    Then,
    Else,
    Display,
    Print,
    TypeSpecifier,
    Term,
    Factor,
    Expression,
    VariableDeclaration,
    Assignment,
}

impl NodeKind {
    /// The tag string used by the interchange format and the pretty
    /// rendering. Matches the grammar rule names of the external parser.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Contract => "contract",
            NodeKind::Function => "function",
            NodeKind::Parameters => "parameters",
            NodeKind::Parameter => "parameter",
            NodeKind::Block => "block",
            NodeKind::IfStatement => "if_statement",
            NodeKind::Then => "then",
            NodeKind::Else => "else",
            NodeKind::Display => "display",
            NodeKind::Print => "print",
            NodeKind::TypeSpecifier => "type_specifier",
            NodeKind::Term => "term",
            NodeKind::Factor => "factor",
            NodeKind::Expression => "expression",
            NodeKind::VariableDeclaration => "variable_declaration",
            NodeKind::Assignment => "assignment",
        }
    }
}

/// Terminal classification supplied by the external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Identifier,
    Number,
    #[serde(rename = "string")]
    Str,
}

/// A terminal value with its source position.
///
/// Positions are 1-based and exist for diagnostics only; no rewrite decision
/// ever depends on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,   // 1-indexed
    pub column: usize, // 1-indexed
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// An interior node: a tag plus ordered children.
///
/// Trees are immutable once produced; rewrite passes build new nodes instead
/// of mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Child>,
}

/// One child slot: either a nested node or a terminal token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Tree(Node),
    Token(Token),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Tree(node)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self {
        Self { kind, children }
    }

    /// The child at `index`, if it is a token.
    pub fn token_child(&self, index: usize) -> Option<&Token> {
        match self.children.get(index) {
            Some(Child::Token(token)) => Some(token),
            _ => None,
        }
    }

    /// The child at `index`, if it is a nested node.
    pub fn tree_child(&self, index: usize) -> Option<&Node> {
        match self.children.get(index) {
            Some(Child::Tree(node)) => Some(node),
            _ => None,
        }
    }

    /// Deterministic human-readable rendering of the subtree.
    ///
    /// One line per node tag, token text verbatim, children indented two
    /// spaces. Derivable from the tree alone, so two structurally equal trees
    /// always render identically; this is the serialization handed to the
    /// execution backend.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        pretty_node(self, 0, &mut out);
        out
    }
}

impl Child {
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        pretty_child(self, 0, &mut out);
        out
    }

    /// The node inside, if this child is a tree.
    pub fn as_tree(&self) -> Option<&Node> {
        match self {
            Child::Tree(node) => Some(node),
            Child::Token(_) => None,
        }
    }
}

fn pretty_node(node: &Node, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(node.kind.tag());
    out.push('\n');
    for child in &node.children {
        pretty_child(child, depth + 1, out);
    }
}

fn pretty_child(child: &Child, depth: usize, out: &mut String) {
    match child {
        Child::Tree(node) => pretty_node(node, depth, out),
        Child::Token(token) => {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(&token.text);
            out.push('\n');
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.pretty())
    }
}

impl std::fmt::Display for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Child {
        Token::new(TokenKind::Identifier, text, 1, 1).into()
    }

    #[test]
    fn pretty_indents_children_by_two_spaces() {
        let tree = Node::new(
            NodeKind::Contract,
            vec![
                ident("Counter"),
                Node::new(NodeKind::Block, vec![ident("x")]).into(),
            ],
        );

        assert_eq!(tree.pretty(), "contract\n  Counter\n  block\n    x\n");
    }

    #[test]
    fn pretty_is_stable_across_calls() {
        let tree = Node::new(
            NodeKind::IfStatement,
            vec![
                ident("flag"),
                Node::new(NodeKind::Then, vec![ident("a")]).into(),
            ],
        );

        assert_eq!(tree.pretty(), tree.pretty());
    }

    #[test]
    fn display_renders_the_pretty_form() {
        let node = Node::new(NodeKind::Block, vec![ident("x")]);

        assert_eq!(node.to_string(), node.pretty());
        assert_eq!(Child::from(node).to_string(), "block\n  x\n");
    }

    #[test]
    fn tags_use_grammar_rule_names() {
        assert_eq!(NodeKind::IfStatement.tag(), "if_statement");
        assert_eq!(NodeKind::VariableDeclaration.tag(), "variable_declaration");
        assert_eq!(NodeKind::TypeSpecifier.tag(), "type_specifier");
    }

    #[test]
    fn child_accessors_distinguish_tokens_from_trees() {
        let node = Node::new(
            NodeKind::Assignment,
            vec![ident("x"), Node::new(NodeKind::Expression, vec![]).into()],
        );

        assert_eq!(node.token_child(0).unwrap().text, "x");
        assert!(node.token_child(1).is_none());
        assert_eq!(node.tree_child(1).unwrap().kind, NodeKind::Expression);
        assert!(node.tree_child(0).is_none());
    }
}
