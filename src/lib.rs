//! Semantic front end for the CodeChat contract language.
//!
//! The external grammar-driven parser produces a tagged parse tree; this
//! crate takes that tree through the two passes that sit between parsing and
//! execution:
//!
//! 1. [`simplify`] collapses grammar noise (wrapper chains, single-statement
//!    blocks) and normalizes if-statements into a fixed then/else layout.
//! 2. [`semantic`] walks the simplified tree with a scoped symbol table,
//!    collecting diagnostics for duplicate definitions, undeclared variables
//!    and assignment type mismatches.
//!
//! A clean run hands back the simplified tree, whose [`tree::Node::pretty`]
//! rendering is the deterministic text form consumed downstream. A dirty run
//! hands back every diagnostic found; the walk never stops at the first one.

pub mod limits;
pub mod reader;
pub mod semantic;
pub mod simplify;
pub mod tree;

pub use semantic::{SemanticAnalyzer, SemanticError};
pub use simplify::simplify;
pub use tree::{Child, Node, NodeKind, Token, TokenKind};

use tracing::debug;

/// Runs the full front end over one parse tree: simplify, then analyze.
///
/// Returns the simplified tree when analysis finds nothing; otherwise
/// returns the diagnostics, in walk order. Each call is self-contained and
/// leaves no state behind.
pub fn run_front_end(root: &Child) -> Result<Child, Vec<SemanticError>> {
    let simplified = simplify(root);
    debug!("parse tree simplified");

    match SemanticAnalyzer::new().analyze(&simplified) {
        Ok(()) => {
            debug!("analysis clean");
            Ok(simplified)
        }
        Err(errors) => {
            debug!(count = errors.len(), "analysis produced diagnostics");
            Err(errors)
        }
    }
}
