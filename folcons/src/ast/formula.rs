use super::{term::release_terms, AccessError, Interned, Rc, Term};
use indexmap::IndexSet;

/// The reserved predicate symbol of equality atoms.
pub const EQUALITY_SYMBOL: &str = "=";

/// The reserved predicate symbol of disequality atoms.
pub const DISEQUALITY_SYMBOL: &str = "~=";

/// A first-order formula.
///
/// Formulas should not be constructed directly; instead, use the factory methods of a
/// [`FormulaPool`](super::FormulaPool), which return shared [`Rc<Formula>`] handles to the
/// canonical instance of each formula.
///
/// Equalities and disequalities are atoms whose predicate is [`EQUALITY_SYMBOL`] or
/// [`DISEQUALITY_SYMBOL`] and that have exactly two operands. They are equal to (and hash the same
/// as) any other atom with the same predicate and operands, and only differ from regular atoms in
/// how they are printed. See [`Formula::atom_kind`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// The `true` constant.
    True,

    /// The `false` constant.
    False,

    /// An application of a predicate symbol to zero or more terms.
    Atom(String, Vec<Rc<Term>>),

    /// The negation of a formula.
    Not(Rc<Formula>),

    /// A binary connective applied to two formulas.
    Binary(Connective, Rc<Formula>, Rc<Formula>),

    /// A quantifier, binding one variable over a formula. The variable does not need to occur in
    /// the body, and no renaming of any kind is ever done.
    Quant(Quantifier, String, Rc<Formula>),
}

/// A binary logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Conjunction, `&`.
    And,

    /// Disjunction, `|`.
    Or,

    /// Implication, `=>`.
    Imp,

    /// Equivalence, `<=>`.
    Iff,
}

impl_str_conversion_traits!(Connective {
    And: "&",
    Or: "|",
    Imp: "=>",
    Iff: "<=>",
});

/// A quantifier, either `forall` or `exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// The universal quantifier, `!`.
    Forall,

    /// The existential quantifier, `?`.
    Exists,
}

impl_str_conversion_traits!(Quantifier {
    Forall: "!",
    Exists: "?",
});

/// The kind of an atomic formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// A regular predicate application, printed in prefix form.
    Predicate,

    /// An equality between two terms, printed as `a = b`.
    Equality,

    /// A disequality between two terms, printed as `a ~= b`.
    Disequality,
}

impl Formula {
    /// Returns the name of this formula's variant, as used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Formula::True => "true",
            Formula::False => "false",
            Formula::Atom(..) => match self.atom_kind() {
                Some(AtomKind::Equality) => "equality",
                Some(AtomKind::Disequality) => "disequality",
                _ => "atom",
            },
            Formula::Not(_) => "negation",
            Formula::Binary(Connective::And, ..) => "conjunction",
            Formula::Binary(Connective::Or, ..) => "disjunction",
            Formula::Binary(Connective::Imp, ..) => "implication",
            Formula::Binary(Connective::Iff, ..) => "equivalence",
            Formula::Quant(Quantifier::Forall, ..) => "universal quantifier",
            Formula::Quant(Quantifier::Exists, ..) => "existential quantifier",
        }
    }

    /// Returns `true` if the formula is `true`, `false`, or an atom.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::True | Formula::False | Formula::Atom(..))
    }

    /// Returns `true` if the formula is the constant `value`.
    pub fn is_bool_constant(&self, value: bool) -> bool {
        match self {
            Formula::True => value,
            Formula::False => !value,
            _ => false,
        }
    }

    /// Returns the kind of the formula, if it is an atom.
    pub fn atom_kind(&self) -> Option<AtomKind> {
        match self {
            Formula::Atom(p, args) if args.len() == 2 && p == EQUALITY_SYMBOL => {
                Some(AtomKind::Equality)
            }
            Formula::Atom(p, args) if args.len() == 2 && p == DISEQUALITY_SYMBOL => {
                Some(AtomKind::Disequality)
            }
            Formula::Atom(..) => Some(AtomKind::Predicate),
            _ => None,
        }
    }

    /// Tries to extract the predicate symbol and operands from a formula. Returns `None` if the
    /// formula is not an atom.
    pub fn as_atom(&self) -> Option<(&str, &[Rc<Term>])> {
        match self {
            Formula::Atom(p, args) => Some((p.as_str(), args.as_slice())),
            _ => None,
        }
    }

    /// Tries to extract the two sides of an equality or disequality. Returns `None` for any other
    /// formula.
    pub fn as_equation(&self) -> Option<(&Rc<Term>, &Rc<Term>)> {
        match (self.atom_kind(), self) {
            (Some(AtomKind::Equality | AtomKind::Disequality), Formula::Atom(_, args)) => {
                Some((&args[0], &args[1]))
            }
            _ => None,
        }
    }

    /// Tries to extract the operand of a negation. Returns `None` if the formula is not a
    /// negation.
    pub fn as_not(&self) -> Option<&Rc<Formula>> {
        match self {
            Formula::Not(f) => Some(f),
            _ => None,
        }
    }

    /// Tries to extract the connective and operands of a binary formula.
    pub fn as_binary(&self) -> Option<(Connective, &Rc<Formula>, &Rc<Formula>)> {
        match self {
            Formula::Binary(c, l, r) => Some((*c, l, r)),
            _ => None,
        }
    }

    /// Tries to extract the quantifier, bound variable and body of a quantified formula.
    pub fn as_quant(&self) -> Option<(Quantifier, &str, &Rc<Formula>)> {
        match self {
            Formula::Quant(q, var, body) => Some((*q, var.as_str(), body)),
            _ => None,
        }
    }

    /// Returns the predicate symbol of an atom (including equalities and disequalities), or an
    /// [`AccessError`] for any other formula.
    pub fn symbol_err(&self) -> Result<&str, AccessError> {
        self.as_atom()
            .map(|(p, _)| p)
            .ok_or_else(|| self.access_error("symbol"))
    }

    /// Returns the operands of an atom, or an [`AccessError`] for any other formula.
    pub fn operands_err(&self) -> Result<&[Rc<Term>], AccessError> {
        self.as_atom()
            .map(|(_, args)| args)
            .ok_or_else(|| self.access_error("operands"))
    }

    /// Returns the left side of an equality or disequality, or an [`AccessError`] for any other
    /// formula.
    pub fn left_term_err(&self) -> Result<&Rc<Term>, AccessError> {
        self.as_equation()
            .map(|(l, _)| l)
            .ok_or_else(|| self.access_error("left_term"))
    }

    /// Returns the right side of an equality or disequality, or an [`AccessError`] for any other
    /// formula.
    pub fn right_term_err(&self) -> Result<&Rc<Term>, AccessError> {
        self.as_equation()
            .map(|(_, r)| r)
            .ok_or_else(|| self.access_error("right_term"))
    }

    /// Returns the single operand of a negation, or the body of a quantifier. Returns an
    /// [`AccessError`] for any other formula.
    pub fn operand_err(&self) -> Result<&Rc<Formula>, AccessError> {
        match self {
            Formula::Not(f) | Formula::Quant(_, _, f) => Ok(f),
            _ => Err(self.access_error("operand")),
        }
    }

    /// Returns the left operand of a binary connective, or an [`AccessError`] for any other
    /// formula.
    pub fn left_err(&self) -> Result<&Rc<Formula>, AccessError> {
        self.as_binary()
            .map(|(_, l, _)| l)
            .ok_or_else(|| self.access_error("left"))
    }

    /// Returns the right operand of a binary connective, or an [`AccessError`] for any other
    /// formula.
    pub fn right_err(&self) -> Result<&Rc<Formula>, AccessError> {
        self.as_binary()
            .map(|(_, _, r)| r)
            .ok_or_else(|| self.access_error("right"))
    }

    /// Returns the variable bound by a quantifier, or an [`AccessError`] for any other formula.
    pub fn variable_err(&self) -> Result<&str, AccessError> {
        self.as_quant()
            .map(|(_, var, _)| var)
            .ok_or_else(|| self.access_error("variable"))
    }

    /// Returns the predicate symbol of an atom.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not an atom.
    pub fn symbol(&self) -> &str {
        self.symbol_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the operands of an atom.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not an atom.
    pub fn operands(&self) -> &[Rc<Term>] {
        self.operands_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the left side of an equality or disequality.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not an equality or disequality.
    pub fn left_term(&self) -> &Rc<Term> {
        self.left_term_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the right side of an equality or disequality.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not an equality or disequality.
    pub fn right_term(&self) -> &Rc<Term> {
        self.right_term_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the operand of a negation, or the body of a quantifier.
    ///
    /// # Panics
    ///
    /// Panics if the formula is neither a negation nor a quantifier.
    pub fn operand(&self) -> &Rc<Formula> {
        self.operand_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the left operand of a binary connective.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not a binary connective.
    pub fn left(&self) -> &Rc<Formula> {
        self.left_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the right operand of a binary connective.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not a binary connective.
    pub fn right(&self) -> &Rc<Formula> {
        self.right_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the variable bound by a quantifier.
    ///
    /// # Panics
    ///
    /// Panics if the formula is not a quantifier.
    pub fn variable(&self) -> &str {
        self.variable_err().unwrap_or_else(|e| e.raise())
    }

    /// Returns the names of the free variables of the formula, in order of first occurrence.
    ///
    /// A variable occurrence is free if it is not inside the body of a quantifier that binds a
    /// variable with the same name.
    pub fn free_vars(&self) -> IndexSet<&str> {
        match self {
            Formula::True | Formula::False => IndexSet::new(),
            Formula::Atom(_, args) => {
                let mut set = IndexSet::new();
                for a in args {
                    a.collect_vars(&mut set);
                }
                set
            }
            Formula::Not(f) => f.free_vars(),
            Formula::Binary(_, l, r) => {
                let mut set = l.free_vars();
                set.extend(r.free_vars());
                set
            }
            Formula::Quant(_, var, body) => {
                let mut set = body.free_vars();
                set.shift_remove(var.as_str());
                set
            }
        }
    }

    fn access_error(&self, accessor: &'static str) -> AccessError {
        AccessError::new(accessor, self.variant_name(), self.to_string())
    }
}

impl Interned for Formula {
    const EMPTY: Self = Formula::True;

    fn release(self) {
        let mut formulas = Vec::new();
        let mut terms = Vec::new();
        self.move_operands(&mut formulas, &mut terms);
        while let Some(formula) = formulas.pop() {
            if let Ok(node) = Rc::try_unwrap(formula) {
                node.into_value().move_operands(&mut formulas, &mut terms);
            }
        }
        release_terms(terms);
    }
}

impl Formula {
    fn move_operands(self, formulas: &mut Vec<Rc<Formula>>, terms: &mut Vec<Rc<Term>>) {
        match self {
            Formula::True | Formula::False => (),
            Formula::Atom(_, args) => terms.extend(args),
            Formula::Not(f) | Formula::Quant(_, _, f) => formulas.push(f),
            Formula::Binary(_, l, r) => formulas.extend([l, r]),
        }
    }
}
