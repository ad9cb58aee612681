use super::{AccessError, Interned, Rc};
use indexmap::IndexSet;

/// A first-order term.
///
/// Terms should not be constructed directly; instead, use the factory methods of a
/// [`TermPool`](super::TermPool), which return shared [`Rc<Term>`] handles to the canonical
/// instance of each term.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable, consisting only of its name.
    Var(String),

    /// An application of a function symbol to zero or more terms. A function applied to no terms
    /// is a constant.
    App(String, Vec<Rc<Term>>),
}

impl Term {
    /// Returns the name of this term's variant, as used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Term::Var(_) => "variable",
            Term::App(..) => "function",
        }
    }

    /// Returns `true` if the term is a variable.
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Returns `true` if the term is a variable or a constant.
    pub fn is_terminal(&self) -> bool {
        match self {
            Term::Var(_) => true,
            Term::App(_, args) => args.is_empty(),
        }
    }

    /// Tries to extract the variable name from a term. Returns `None` if the term is not a
    /// variable.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Term::Var(name) => Some(name.as_str()),
            Term::App(..) => None,
        }
    }

    /// Tries to extract the function symbol and the operands from a term. Returns `None` if the
    /// term is not a function application.
    pub fn as_app(&self) -> Option<(&str, &[Rc<Term>])> {
        match self {
            Term::App(symbol, args) => Some((symbol.as_str(), args.as_slice())),
            Term::Var(_) => None,
        }
    }

    /// Similar to [`Term::as_var`], but returns an [`AccessError`] on failure.
    pub fn variable_err(&self) -> Result<&str, AccessError> {
        self.as_var().ok_or_else(|| self.access_error("variable"))
    }

    /// Returns the function symbol of a function application, or an [`AccessError`] if the term
    /// is a variable.
    pub fn symbol_err(&self) -> Result<&str, AccessError> {
        self.as_app()
            .map(|(symbol, _)| symbol)
            .ok_or_else(|| self.access_error("symbol"))
    }

    /// Returns the operands of a function application, or an [`AccessError`] if the term is a
    /// variable.
    pub fn operands_err(&self) -> Result<&[Rc<Term>], AccessError> {
        self.as_app()
            .map(|(_, args)| args)
            .ok_or_else(|| self.access_error("operands"))
    }

    /// Returns the name of a variable.
    ///
    /// # Panics
    ///
    /// Panics if the term is not a variable.
    pub fn variable(&self) -> &str {
        self.variable_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the function symbol of a function application.
    ///
    /// # Panics
    ///
    /// Panics if the term is a variable.
    pub fn symbol(&self) -> &str {
        self.symbol_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the operands of a function application.
    ///
    /// # Panics
    ///
    /// Panics if the term is a variable.
    pub fn operands(&self) -> &[Rc<Term>] {
        self.operands_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the names of all variables in the term, in order of first occurrence.
    pub fn free_vars(&self) -> IndexSet<&str> {
        let mut set = IndexSet::new();
        self.collect_vars(&mut set);
        set
    }

    pub(super) fn collect_vars<'a>(&'a self, set: &mut IndexSet<&'a str>) {
        match self {
            Term::Var(name) => {
                set.insert(name.as_str());
            }
            Term::App(_, args) => args.iter().for_each(|a| a.collect_vars(set)),
        }
    }

    fn access_error(&self, accessor: &'static str) -> AccessError {
        AccessError::new(accessor, self.variant_name(), self.to_string())
    }
}

impl Interned for Term {
    const EMPTY: Self = Term::Var(String::new());

    fn release(self) {
        if let Term::App(_, args) = self {
            release_terms(args);
        }
    }
}

/// Drops a list of term handles. The operands of every term that is freed along the way are
/// pushed onto the same list, instead of being dropped recursively.
pub(super) fn release_terms(mut pending: Vec<Rc<Term>>) {
    while let Some(term) = pending.pop() {
        if let Ok(node) = Rc::try_unwrap(term) {
            if let Term::App(_, args) = node.into_value() {
                pending.extend(args);
            }
        }
    }
}
