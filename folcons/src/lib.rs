//! Hash-consed first-order logic expressions.
//!
//! Terms and formulas are built exclusively through the factory methods of a [`TermPool`] or a
//! [`FormulaPool`]. Each pool guarantees that, while a structural value is referenced, it is
//! represented by exactly one shared allocation, and releases that allocation (together with its
//! registration in the pool) as soon as the last handle to it is dropped.
//!
//! ```
//! use folcons::ast::*;
//!
//! let universe = Universe::new();
//! let x = universe.terms.make_variable("x");
//! let p = universe.formulas.make_atom("P", vec![x.clone()]);
//! let forall = universe.formulas.make_forall("x", p);
//! assert_eq!(forall.to_string(), "!x . P(x)");
//!
//! let again = universe.terms.make_variable("x");
//! assert!(Rc::ptr_eq(&x, &again));
//! ```
#![deny(clippy::disallowed_methods)]
#![deny(clippy::self_named_module_files)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::manual_assert)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::str_to_string)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]

#[macro_use]
pub mod ast;
pub mod parsed;
mod utils;

pub use ast::{AccessError, Formula, FormulaPool, Rc, Term, TermPool, Universe};
