//! The abstract syntax tree (AST) for first-order terms and formulas.
//!
//! This module also contains the interning pools that own the canonical instance of every
//! expression, and the shared handle type through which expressions are accessed.

#[macro_use]
mod macros;
mod error;
mod formula;
pub mod pool;
mod printer;
mod rc;
mod term;
#[cfg(test)]
mod tests;

pub use error::AccessError;
pub use formula::{AtomKind, Connective, Formula, Quantifier, DISEQUALITY_SYMBOL, EQUALITY_SYMBOL};
pub use pool::{Config, FormulaPool, Pool, TermPool, Universe};
pub use rc::{Interned, Rc};
pub use term::Term;
