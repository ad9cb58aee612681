//! Some useful helper macros.

/// A macro to help build new terms.
///
/// This macro takes two arguments: the [`TermPool`](crate::ast::TermPool) with which to build the
/// term, and an s-expression that represents the term. A bare identifier is a variable, a
/// parenthesized identifier followed by zero or more arguments is a function application, and an
/// expression in braces is inserted as is. Every subterm is built through the factory methods of
/// the pool, so the result is always the canonical instance.
///
/// # Examples
///
/// ```
/// # use folcons::{ast::*, build_term};
/// let pool = TermPool::new();
/// let y = pool.make_variable("y");
/// let t = build_term!(pool, (f x (g {y.clone()}) (c)));
/// assert_eq!(t.to_string(), "f(x,g(y),c)");
/// assert_eq!(t.operands()[1].operands()[0], y);
/// ```
#[macro_export]
macro_rules! build_term {
    ($pool:expr, {$terminal:expr}) => { $terminal };
    ($pool:expr, ($symbol:ident $($args:tt)*)) => {{
        let operands = vec![ $($crate::build_term!($pool, $args)),* ];
        $pool.make_function(stringify!($symbol), operands)
    }};
    ($pool:expr, $var:ident) => {
        $pool.make_variable(stringify!($var))
    };
}

/// A macro to help build new formulas.
///
/// This macro takes two arguments: the [`Universe`](crate::ast::Universe) with which to build
/// the formula, and an s-expression that represents the formula. The supported forms are `true`,
/// `false`, `(not f)`, `(and l r)`, `(or l r)`, `(=> l r)`, `(<=> l r)`, `(= a b)`, `(!= a b)`,
/// `(forall x f)`, `(exists x f)`, and `(P a b ...)` for any other predicate. The operands of
/// atoms are written as in [`build_term!`], and an expression in braces is inserted as is.
///
/// # Examples
///
/// ```
/// # use folcons::{ast::*, build_formula};
/// let u = Universe::new();
/// let f = build_formula!(u, (forall x (=> (P x) (or (= x (c)) (not (Q x))))));
/// assert_eq!(f.to_string(), "!x . P(x) => x = c | ~Q(x)");
///
/// let g = build_formula!(u, (and {f.clone()} true));
/// assert_eq!(g.left(), &f);
/// ```
#[macro_export]
macro_rules! build_formula {
    (@BINARY $universe:expr, $connective:ident, $l:tt, $r:tt) => {{
        let left = $crate::build_formula!($universe, $l);
        let right = $crate::build_formula!($universe, $r);
        $universe.formulas.make_binary($crate::ast::Connective::$connective, left, right)
    }};

    ($universe:expr, {$formula:expr}) => { $formula };
    ($universe:expr, true) => { $universe.formulas.make_true() };
    ($universe:expr, false) => { $universe.formulas.make_false() };
    ($universe:expr, (not $f:tt)) => {{
        let operand = $crate::build_formula!($universe, $f);
        $universe.formulas.make_not(operand)
    }};
    ($universe:expr, (and $l:tt $r:tt)) => {
        $crate::build_formula!(@BINARY $universe, And, $l, $r)
    };
    ($universe:expr, (or $l:tt $r:tt)) => {
        $crate::build_formula!(@BINARY $universe, Or, $l, $r)
    };
    ($universe:expr, (=> $l:tt $r:tt)) => {
        $crate::build_formula!(@BINARY $universe, Imp, $l, $r)
    };
    ($universe:expr, (<=> $l:tt $r:tt)) => {
        $crate::build_formula!(@BINARY $universe, Iff, $l, $r)
    };
    ($universe:expr, (= $a:tt $b:tt)) => {{
        let left = $crate::build_term!($universe.terms, $a);
        let right = $crate::build_term!($universe.terms, $b);
        $universe.formulas.make_equality(left, right)
    }};
    ($universe:expr, (!= $a:tt $b:tt)) => {{
        let left = $crate::build_term!($universe.terms, $a);
        let right = $crate::build_term!($universe.terms, $b);
        $universe.formulas.make_disequality(left, right)
    }};
    ($universe:expr, (forall $var:ident $f:tt)) => {{
        let body = $crate::build_formula!($universe, $f);
        $universe.formulas.make_forall(stringify!($var), body)
    }};
    ($universe:expr, (exists $var:ident $f:tt)) => {{
        let body = $crate::build_formula!($universe, $f);
        $universe.formulas.make_exists(stringify!($var), body)
    }};
    ($universe:expr, ($predicate:ident $($args:tt)*)) => {{
        let operands = vec![ $($crate::build_term!($universe.terms, $args)),* ];
        $universe.formulas.make_atom(stringify!($predicate), operands)
    }};
}

/// Implements `FromStr` and `Display` for an enum, given a mapping from each variant to a string
/// literal.
///
/// This macros only supports enums that don't hold any data in any of their variants. The error
/// type for the implementation of `FromStr` will be `()`.
///
/// # Examples
///
// Since this macro is not exported, and since doctests are run as if they were a different crate,
// it's impossible to test this macro. To avoid test errors, we interpret this block as text.
/// ```text
/// #[derive(Debug, PartialEq)]
/// enum Connective {
///     And,
///     Or,
/// }
///
/// impl_str_conversion_traits!(Connective {
///     And: "&",
///     Or: "|",
/// });
///
/// assert_eq!(Connective::from_str("&"), Ok(Connective::And));
/// assert_eq!(format!("{}", Connective::Or), "|");
/// ```
macro_rules! impl_str_conversion_traits {
    ($enum_name:ident { $($variant:ident: $str:literal),* $(,)? }) => {
        impl std::str::FromStr for $enum_name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok($enum_name::$variant),)*
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let s = match self {
                    $($enum_name::$variant => $str,)*
                };
                write!(f, "{}", s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use std::str::FromStr;

    #[test]
    fn test_build_term() {
        let pool = TermPool::new();
        let x = pool.make_variable("x");
        let c = pool.make_constant("c");
        let expected = pool.make_function("f", vec![x.clone(), c.clone(), x.clone()]);

        let got = build_term!(pool, (f x (c) {x.clone()}));
        assert!(Rc::ptr_eq(&expected, &got));
        assert!(Rc::ptr_eq(&build_term!(pool, {c.clone()}), &c));
    }

    #[test]
    fn test_build_formula() {
        let u = Universe::new();
        let x = u.terms.make_variable("x");
        let p = u.formulas.make_atom("P", vec![x.clone()]);
        let eq = u.formulas.make_equality(x.clone(), x.clone());
        let not_p = u.formulas.make_not(p);
        let or = u.formulas.make_or(eq, u.formulas.make_false());
        let expected = u.formulas.make_forall("x", u.formulas.make_iff(not_p, or));

        let got = build_formula!(u, (forall x (<=> (not (P x)) (or (= x x) false))));
        assert!(Rc::ptr_eq(&expected, &got));
    }

    #[test]
    fn test_connective_str_conversion() {
        for c in [Connective::And, Connective::Or, Connective::Imp, Connective::Iff] {
            assert_eq!(Connective::from_str(&c.to_string()), Ok(c));
        }
        assert_eq!(Quantifier::from_str("!"), Ok(Quantifier::Forall));
        assert_eq!(Quantifier::from_str("?"), Ok(Quantifier::Exists));
        assert_eq!(Connective::from_str("and"), Err(()));
    }
}
