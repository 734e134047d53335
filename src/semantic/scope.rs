use std::collections::HashMap;

/// Semantic type tags attached to symbols.
///
/// Covers the declarable data types of the language plus the tag given to
/// contract declarations themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Contract,
    Int,
    Str,
    Bool,
    Address,
}

impl SymbolType {
    /// Maps a type keyword from a `type_specifier` node to its tag.
    /// Returns `None` for keywords outside the declarable set.
    pub fn from_keyword(keyword: &str) -> Option<SymbolType> {
        match keyword {
            "int" => Some(SymbolType::Int),
            "string" => Some(SymbolType::Str),
            "bool" => Some(SymbolType::Bool),
            "address" => Some(SymbolType::Address),
            _ => None,
        }
    }

    /// The keyword spelling, used verbatim in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SymbolType::Contract => "contract",
            SymbolType::Int => "int",
            SymbolType::Str => "string",
            SymbolType::Bool => "bool",
            SymbolType::Address => "address",
        }
    }
}

impl std::fmt::Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared function parameter: name plus declared type, in declaration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<SymbolType>,
}

/// Represents the kind of symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Contract,
    /// Functions carry their declared parameter list so later passes can
    /// check call sites against the signature.
    Function { parameters: Vec<Parameter> },
}

/// Represents a symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The name of the symbol
    pub name: String,
    /// The declared type, if the declaration carried a recognized one
    pub ty: Option<SymbolType>,
    /// The kind of symbol (variable, contract, or function)
    pub kind: SymbolKind,
    /// Nesting level of the scope this symbol was defined in (0 = global)
    pub scope_level: usize,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Option<SymbolType>) -> Self {
        Symbol {
            name: name.into(),
            ty,
            kind: SymbolKind::Variable,
            scope_level: 0,
        }
    }

    pub fn contract(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            ty: Some(SymbolType::Contract),
            kind: SymbolKind::Contract,
            scope_level: 0,
        }
    }

    pub fn function(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Symbol {
            name: name.into(),
            ty: None,
            kind: SymbolKind::Function { parameters },
            scope_level: 0,
        }
    }
}

/// Symbol table for storing and looking up symbols in a scope
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Map from symbol name to symbol information
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    /// Inserts a symbol, overwriting any existing symbol with the same name.
    /// Rejecting duplicates is a policy decision that belongs to the caller,
    /// which must probe with [`lookup`](Self::lookup) first.
    pub fn define(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Looks up a symbol by name in this table only.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Represents a single scope in the scope hierarchy
#[derive(Debug, Clone)]
pub struct Scope {
    /// Display name of the scope ("global", or the declaring symbol's name)
    pub name: String,
    /// Nesting level (0 = global)
    pub level: usize,
    /// The symbol table for this scope
    pub symbols: SymbolTable,
    /// Index of parent scope (None for global scope)
    pub parent: Option<usize>,
}

impl Scope {
    fn new(name: impl Into<String>, level: usize, parent: Option<usize>) -> Self {
        Scope {
            name: name.into(),
            level,
            symbols: SymbolTable::new(),
            parent,
        }
    }
}

/// Manages the hierarchy of lexical scopes during analysis.
///
/// Scopes live in an arena and refer to their parent by index, so exited
/// scopes stay inspectable after the walk finishes and lookups never touch
/// freed state. Exactly one global scope exists; it is created up front and
/// can never be exited.
#[derive(Debug)]
pub struct ScopeStack {
    /// Arena of all scopes ever entered (index 0 = global)
    scopes: Vec<Scope>,
    /// Index of the scope lookups and definitions currently target
    current: usize,
}

impl ScopeStack {
    /// Creates a new scope stack holding only the global scope.
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![Scope::new("global", 0, None)],
            current: 0,
        }
    }

    /// Enters a new scope nested in the current one.
    /// Returns the index of the newly created scope.
    pub fn enter_scope(&mut self, name: &str) -> usize {
        let parent = self.current;
        let level = self.scopes[parent].level + 1;
        let index = self.scopes.len();
        self.scopes.push(Scope::new(name, level, Some(parent)));
        self.current = index;
        index
    }

    /// Leaves the current scope, making its parent current again.
    /// At the global scope there is nothing to leave; the call does nothing
    /// and returns false.
    pub fn exit_scope(&mut self) -> bool {
        match self.scopes[self.current].parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Returns a reference to the current scope
    pub fn current_scope(&self) -> &Scope {
        &self.scopes[self.current]
    }

    /// Returns the current nesting depth (0 = global)
    pub fn depth(&self) -> usize {
        self.scopes[self.current].level
    }

    /// Defines a symbol in the current scope, overwriting any existing
    /// symbol with the same name there. Symbols in enclosing scopes are
    /// shadowed, not touched.
    pub fn define(&mut self, mut symbol: Symbol) {
        symbol.scope_level = self.scopes[self.current].level;
        self.scopes[self.current].symbols.define(symbol);
    }

    /// Looks up a symbol by searching the scope chain from current to global.
    /// Returns Some(&Symbol) if found, None otherwise.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut index = self.current;
        loop {
            let scope = &self.scopes[index];
            if let Some(symbol) = scope.symbols.lookup(name) {
                return Some(symbol);
            }
            match scope.parent {
                Some(parent) => index = parent,
                None => return None,
            }
        }
    }

    /// Looks up a symbol in the current scope only, ignoring enclosing
    /// scopes. This is the probe duplicate detection relies on.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current].symbols.lookup(name)
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
