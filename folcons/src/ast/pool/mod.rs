//! This module implements `Pool`, a structure that interns terms or formulas and implements hash
//! consing with automatic eviction.

pub(crate) mod storage;

use super::{rc::Node, Connective, Formula, Interned, Quantifier, Rc, Term};
use super::{DISEQUALITY_SYMBOL, EQUALITY_SYMBOL};
use crate::utils::structural_hash;
use std::{cell::RefCell, hash::Hash, rc};
use storage::Storage;

/// The configuration of a pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    initial_capacity: usize,
}

impl Config {
    /// Constructs the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct structural hashes the registry can hold before reallocating.
    pub fn initial_capacity(mut self, value: usize) -> Self {
        self.initial_capacity = value;
        self
    }
}

/// A structure that stores and manages the canonical instances of interned values.
///
/// You can add a value to the pool using [`Pool::add`], or one of the factory methods of
/// [`TermPool`] and [`FormulaPool`], which return an [`Rc`]. This struct ensures that, while a
/// handle to a value is alive, adding a structurally equal value to the same pool returns a handle
/// to the same allocation.
///
/// The pool only holds weak references to its entries: when the last handle to an entry is
/// dropped, the entry is freed and removed from the pool. Adding an equal value afterwards creates
/// a new entry.
///
/// A pool is not shared between threads. Both the pool and the handles it returns use
/// non-atomic reference counting, so they can't be sent to another thread.
pub struct Pool<T: Interned> {
    storage: rc::Rc<RefCell<Storage<T>>>,
}

/// A pool of first-order terms.
pub type TermPool = Pool<Term>;

/// A pool of first-order formulas.
pub type FormulaPool = Pool<Formula>;

impl<T: Interned + Eq + Hash> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interned + Eq + Hash> Pool<T> {
    /// Constructs a new, empty pool.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Constructs a new, empty pool, using the given configuration.
    pub fn with_config(config: Config) -> Self {
        log::debug!(
            "creating pool of `{}` with initial capacity {}",
            std::any::type_name::<T>(),
            config.initial_capacity
        );
        let storage = Storage::with_capacity(config.initial_capacity);
        Self { storage: rc::Rc::new(RefCell::new(storage)) }
    }

    /// Takes a value and returns a handle to its canonical instance.
    ///
    /// If no structurally equal value is currently alive in the pool, the value becomes the new
    /// canonical instance. Otherwise, the given value is dropped and the returned handle points to
    /// the existing allocation.
    pub fn add(&self, value: T) -> Rc<T> {
        let hash = structural_hash(&value);

        // The registry borrow must end before `value` is dropped, since dropping it may release
        // handles to other entries
        let existing = self.storage.borrow().get(hash, &value);
        if let Some(existing) = existing {
            log::trace!("interning hit for hash {:#018x}", hash);
            return existing;
        }

        let node = rc::Rc::new(Node::new(hash, value, rc::Rc::downgrade(&self.storage)));
        self.storage.borrow_mut().insert(&node);
        log::trace!("interned new entry with hash {:#018x}", hash);
        Rc::from_node(node)
    }

    /// Takes a vector of values and calls [`Pool::add`] on each.
    pub fn add_all(&self, values: Vec<T>) -> Vec<Rc<T>> {
        values.into_iter().map(|v| self.add(v)).collect()
    }

    // This method is only necessary for the hash consing tests
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.storage.borrow().len()
    }
}

impl Pool<Term> {
    /// Returns the variable term with the given name.
    pub fn make_variable(&self, name: impl Into<String>) -> Rc<Term> {
        self.add(Term::Var(name.into()))
    }

    /// Returns the application of the function `symbol` to `operands`.
    pub fn make_function(&self, symbol: impl Into<String>, operands: Vec<Rc<Term>>) -> Rc<Term> {
        self.add(Term::App(symbol.into(), operands))
    }

    /// Returns the constant `symbol`, that is, the application of `symbol` to no operands.
    pub fn make_constant(&self, symbol: impl Into<String>) -> Rc<Term> {
        self.make_function(symbol, Vec::new())
    }
}

impl Pool<Formula> {
    /// Returns the `true` constant.
    pub fn make_true(&self) -> Rc<Formula> {
        self.add(Formula::True)
    }

    /// Returns the `false` constant.
    pub fn make_false(&self) -> Rc<Formula> {
        self.add(Formula::False)
    }

    /// Returns the boolean constant determined by `value`.
    pub fn bool_constant(&self, value: bool) -> Rc<Formula> {
        match value {
            true => self.make_true(),
            false => self.make_false(),
        }
    }

    /// Returns the application of the predicate `predicate` to `operands`.
    pub fn make_atom(&self, predicate: impl Into<String>, operands: Vec<Rc<Term>>) -> Rc<Formula> {
        self.add(Formula::Atom(predicate.into(), operands))
    }

    /// Returns the equality `left = right`.
    pub fn make_equality(&self, left: Rc<Term>, right: Rc<Term>) -> Rc<Formula> {
        self.make_atom(EQUALITY_SYMBOL, vec![left, right])
    }

    /// Returns the disequality `left ~= right`.
    pub fn make_disequality(&self, left: Rc<Term>, right: Rc<Term>) -> Rc<Formula> {
        self.make_atom(DISEQUALITY_SYMBOL, vec![left, right])
    }

    /// Returns the negation of `formula`.
    pub fn make_not(&self, formula: Rc<Formula>) -> Rc<Formula> {
        self.add(Formula::Not(formula))
    }

    /// Returns the application of the binary connective `connective` to `left` and `right`.
    pub fn make_binary(
        &self,
        connective: Connective,
        left: Rc<Formula>,
        right: Rc<Formula>,
    ) -> Rc<Formula> {
        self.add(Formula::Binary(connective, left, right))
    }

    /// Returns the conjunction `left & right`.
    pub fn make_and(&self, left: Rc<Formula>, right: Rc<Formula>) -> Rc<Formula> {
        self.make_binary(Connective::And, left, right)
    }

    /// Returns the disjunction `left | right`.
    pub fn make_or(&self, left: Rc<Formula>, right: Rc<Formula>) -> Rc<Formula> {
        self.make_binary(Connective::Or, left, right)
    }

    /// Returns the implication `left => right`.
    pub fn make_imp(&self, left: Rc<Formula>, right: Rc<Formula>) -> Rc<Formula> {
        self.make_binary(Connective::Imp, left, right)
    }

    /// Returns the equivalence `left <=> right`.
    pub fn make_iff(&self, left: Rc<Formula>, right: Rc<Formula>) -> Rc<Formula> {
        self.make_binary(Connective::Iff, left, right)
    }

    /// Returns the formula that binds `variable` over `body` with `quantifier`.
    pub fn make_quant(
        &self,
        quantifier: Quantifier,
        variable: impl Into<String>,
        body: Rc<Formula>,
    ) -> Rc<Formula> {
        self.add(Formula::Quant(quantifier, variable.into(), body))
    }

    /// Returns the universally quantified formula `!variable . body`.
    pub fn make_forall(&self, variable: impl Into<String>, body: Rc<Formula>) -> Rc<Formula> {
        self.make_quant(Quantifier::Forall, variable, body)
    }

    /// Returns the existentially quantified formula `?variable . body`.
    pub fn make_exists(&self, variable: impl Into<String>, body: Rc<Formula>) -> Rc<Formula> {
        self.make_quant(Quantifier::Exists, variable, body)
    }
}

/// An interning universe: a term pool and a formula pool that are used together.
///
/// The two pools are independent. Separate universes never share instances, but expressions
/// from different universes still compare and hash structurally.
#[derive(Default)]
pub struct Universe {
    pub terms: TermPool,
    pub formulas: FormulaPool,
}

impl Universe {
    /// Constructs a universe with two new, empty pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a universe with two new, empty pools, both using the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// # use folcons::ast::*;
    /// let u = Universe::with_config(Config::new().initial_capacity(1024));
    /// let x = u.terms.make_variable("x");
    /// assert_eq!(u.formulas.make_equality(x.clone(), x).to_string(), "x = x");
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self {
            terms: Pool::with_config(config),
            formulas: Pool::with_config(config),
        }
    }
}
