pub mod scope;

use crate::tree::{Child, Node, NodeKind, Token, TokenKind};
use scope::{Parameter, ScopeStack, Symbol, SymbolType};

/// Represents a semantic analysis error
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub message: String,
    /// 1-based line/column of the offending token, when one was available
    pub position: Option<(usize, usize)>,
}

impl SemanticError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        SemanticError {
            message: message.into(),
            position: Some((line, column)),
        }
    }

    pub fn from_token(message: impl Into<String>, token: &Token) -> Self {
        SemanticError {
            message: message.into(),
            position: Some((token.line, token.column)),
        }
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.position {
            Some((line, column)) => {
                write!(f, "Semantic error at {}:{}: {}", line, column, self.message)
            }
            None => write!(f, "Semantic error: {}", self.message),
        }
    }
}

impl std::error::Error for SemanticError {}

/// Main semantic analyzer that traverses the simplified tree and performs
/// semantic checks.
///
/// One analyzer value covers exactly one run: it starts with a fresh global
/// scope and an empty diagnostics list, walks the whole tree, and is consumed
/// by [`analyze`](Self::analyze). Every check records its finding and
/// returns, so one broken declaration cannot hide problems further down the
/// tree.
pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    errors: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            scopes: ScopeStack::new(),
            errors: Vec::new(),
        }
    }

    /// Walks the tree and returns every diagnostic found, in walk order.
    /// A clean tree yields `Ok(())`.
    pub fn analyze(mut self, program: &Child) -> Result<(), Vec<SemanticError>> {
        self.visit(program);
        debug_assert_eq!(
            self.scopes.depth(),
            0,
            "scope stack must return to global after a full walk"
        );
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Records a semantic error
    fn record_error(&mut self, error: SemanticError) {
        self.errors.push(error);
    }

    fn visit(&mut self, child: &Child) {
        match child {
            Child::Token(token) => {
                // A bare identifier in statement or operand position is a
                // variable use. Literals carry no names to resolve.
                if token.kind == TokenKind::Identifier {
                    self.check_variable_use(token);
                }
            }
            Child::Tree(node) => self.visit_node(node),
        }
    }

    fn visit_node(&mut self, node: &Node) {
        match node.kind {
            NodeKind::Contract => self.check_contract(node),
            NodeKind::Function => self.check_function_declaration(node),
            NodeKind::VariableDeclaration => self.check_variable_declaration(node),
            NodeKind::Assignment => self.check_assignment(node),
            NodeKind::Program
            | NodeKind::Block
            | NodeKind::IfStatement
            | NodeKind::Then
            | NodeKind::Else
            | NodeKind::Display
            | NodeKind::Print
            | NodeKind::Expression
            | NodeKind::Term
            | NodeKind::Factor => self.visit_all(&node.children),
            // Consumed positionally by the declaration checks; a stray one
            // carries nothing to resolve.
            NodeKind::TypeSpecifier | NodeKind::Parameters | NodeKind::Parameter => {}
        }
    }

    fn visit_all(&mut self, children: &[Child]) {
        for child in children {
            self.visit(child);
        }
    }

    // ========== Declaration checks ==========

    /// Binds a contract name in the enclosing scope, then analyzes its body
    /// inside a fresh scope named after the contract.
    ///
    /// A duplicate records one diagnostic and opens no scope; the body is
    /// still analyzed, resolving against the scope that was already active.
    fn check_contract(&mut self, node: &Node) {
        let Some(name_token) = node.token_child(0) else {
            return;
        };
        let name = name_token.text.clone();

        if self.scopes.lookup_local(&name).is_some() {
            self.record_error(SemanticError::from_token(
                format!("Contract '{}' is already defined in the current scope.", name),
                name_token,
            ));
            self.visit_all(&node.children[1..]);
            return;
        }

        self.scopes.define(Symbol::contract(name.clone()));
        self.scopes.enter_scope(&name);
        self.visit_all(&node.children[1..]);
        self.scopes.exit_scope();
    }

    /// Binds a function name (with its declared parameter list) in the
    /// enclosing scope, then analyzes the body inside a fresh scope.
    ///
    /// Parameters are recorded on the function symbol only. They are not
    /// bound inside the body scope, so a body that reads a parameter name
    /// without declaring it gets an undeclared-variable diagnostic. This
    /// mirrors how the language currently behaves and stays as is.
    fn check_function_declaration(&mut self, node: &Node) {
        let Some(name_token) = node.token_child(0) else {
            return;
        };
        let name = name_token.text.clone();

        let (parameters, body) = match node.tree_child(1) {
            Some(params) if params.kind == NodeKind::Parameters => {
                (parse_parameters(params), &node.children[2..])
            }
            _ => (Vec::new(), &node.children[1..]),
        };

        if self.scopes.lookup_local(&name).is_some() {
            self.record_error(SemanticError::from_token(
                format!("Function '{}' is already defined in the current scope.", name),
                name_token,
            ));
            self.visit_all(body);
            return;
        }

        self.scopes.define(Symbol::function(name.clone(), parameters));
        self.scopes.enter_scope(&name);
        self.visit_all(body);
        self.scopes.exit_scope();
    }

    /// Defines a variable in the current scope unless the name is already
    /// taken there. Shadowing an outer scope's name is legal and silent.
    fn check_variable_declaration(&mut self, node: &Node) {
        let Some(name_token) = node.token_child(0) else {
            return;
        };
        let name = name_token.text.clone();

        if self.scopes.lookup_local(&name).is_some() {
            self.record_error(SemanticError::from_token(
                format!("Variable '{}' is already defined in the current scope.", name),
                name_token,
            ));
            return;
        }

        let ty = node
            .tree_child(1)
            .filter(|spec| spec.kind == NodeKind::TypeSpecifier)
            .and_then(specifier_type);
        self.scopes.define(Symbol::variable(name, ty));
    }

    // ========== Use checks ==========

    /// Resolves a variable use through the whole scope chain.
    fn check_variable_use(&mut self, token: &Token) {
        if self.scopes.lookup(&token.text).is_none() {
            self.record_error(SemanticError::from_token(
                format!("Variable '{}' is not declared.", token.text),
                token,
            ));
        }
    }

    /// Checks an assignment's expression type against the target's declared
    /// type. Right-hand-side identifiers are resolved as ordinary uses.
    ///
    /// An undeclared target records nothing here; only the type comparison
    /// is performed, and only when the target resolves. Known gap, kept to
    /// match the language's current behavior.
    fn check_assignment(&mut self, node: &Node) {
        let Some(target) = node.token_child(0) else {
            return;
        };
        self.visit_all(&node.children[1..]);

        let declared = self
            .scopes
            .lookup(&target.text)
            .and_then(|symbol| symbol.ty);
        let assigned = self.expression_type(node.children.get(1));

        if let (Some(declared), Some(assigned)) = (declared, assigned) {
            if declared != assigned {
                self.record_error(SemanticError::from_token(
                    format!("Type mismatch: Cannot assign '{}' to '{}'.", assigned, declared),
                    target,
                ));
            }
        }
    }

    /// Shallow type of an expression operand. Composite expressions are
    /// indeterminate at this stage and skip the mismatch check entirely.
    fn expression_type(&self, operand: Option<&Child>) -> Option<SymbolType> {
        match operand {
            Some(Child::Token(token)) => match token.kind {
                TokenKind::Number => Some(SymbolType::Int),
                TokenKind::Str => Some(SymbolType::Str),
                TokenKind::Identifier => {
                    self.scopes.lookup(&token.text).and_then(|symbol| symbol.ty)
                }
            },
            _ => None,
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// Parameter nodes hold a name token and an optional type specifier.
// Malformed entries are dropped rather than guessed at.
fn parse_parameters(node: &Node) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    for child in &node.children {
        let Child::Tree(param) = child else {
            continue;
        };
        if param.kind != NodeKind::Parameter {
            continue;
        }
        let Some(name_token) = param.token_child(0) else {
            continue;
        };
        let ty = param
            .tree_child(1)
            .filter(|spec| spec.kind == NodeKind::TypeSpecifier)
            .and_then(specifier_type);
        parameters.push(Parameter {
            name: name_token.text.clone(),
            ty,
        });
    }
    parameters
}

fn specifier_type(spec: &Node) -> Option<SymbolType> {
    spec.token_child(0)
        .and_then(|token| SymbolType::from_keyword(&token.text))
}
