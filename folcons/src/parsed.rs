//! The publication slot for the result of parsing.
//!
//! A parser builds its formula through a [`FormulaPool`](crate::ast::FormulaPool) and, once it is
//! done, publishes the result here. Other tooling then reads it with [`last_parsed`]. There is a
//! single slot per thread, since formulas can't be shared between threads.

use crate::ast::{Formula, Rc};
use std::cell::RefCell;

thread_local! {
    static LAST_PARSED: RefCell<Option<Rc<Formula>>> = RefCell::new(None);
}

/// Publishes `formula` as the last parsed formula, returning the previously published one.
pub fn publish(formula: Rc<Formula>) -> Option<Rc<Formula>> {
    log::debug!("publishing parsed formula '{}'", formula);
    LAST_PARSED.with(|slot| slot.replace(Some(formula)))
}

/// Returns the last published formula, if any.
pub fn last_parsed() -> Option<Rc<Formula>> {
    LAST_PARSED.with(|slot| slot.borrow().clone())
}

/// Clears the slot, returning the formula that was published in it.
///
/// The slot holds a handle like any other, so the formula stays interned while it is published.
pub fn take() -> Option<Rc<Formula>> {
    LAST_PARSED.with(|slot| slot.borrow_mut().take())
}
