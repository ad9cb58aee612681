//! A printer for terms and formulas, in the `!x . P(x) & ~(a = b)` surface syntax.

use super::{AtomKind, Connective, Formula, Rc, Term};
use std::fmt;

/// How tightly a formula binds when it is printed as the operand of another formula. Larger
/// values bind tighter.
fn binding_power(formula: &Formula) -> u8 {
    match formula {
        Formula::True | Formula::False | Formula::Atom(..) | Formula::Not(_) => 5,
        Formula::Binary(Connective::And, ..) => 4,
        Formula::Binary(Connective::Or, ..) => 3,
        Formula::Binary(Connective::Imp, ..) => 2,
        Formula::Binary(Connective::Iff, ..) => 1,
        Formula::Quant(..) => 0,
    }
}

/// The minimum binding power that the left and right operands of a connective must have to be
/// printed without parentheses.
///
/// `&` and `|` parenthesize a right operand of the same connective, while `=>` parenthesizes a
/// left operand of the same connective. `<=>` parenthesizes both.
fn operand_thresholds(connective: Connective) -> (u8, u8) {
    match connective {
        Connective::And => (4, 5),
        Connective::Or => (3, 4),
        Connective::Imp => (3, 2),
        Connective::Iff => (2, 2),
    }
}

/// The minimum binding power of the operand of a negation.
const NOT_OPERAND_THRESHOLD: u8 = 5;

/// A pending piece of output. Printing pops these from an explicit stack, so that deeply nested
/// expressions don't overflow the call stack.
enum Token<'a> {
    Term(&'a Term),
    Formula(&'a Formula),

    /// A formula that is the operand of another, with the minimum binding power it needs to be
    /// printed without parentheses.
    Operand(&'a Formula, u8),
    Connective(Connective),
    Str(&'a str),
}

fn write_tokens<'a>(f: &mut fmt::Formatter, mut stack: Vec<Token<'a>>) -> fmt::Result {
    while let Some(token) = stack.pop() {
        match token {
            Token::Str(s) => f.write_str(s)?,
            Token::Connective(c) => write!(f, " {} ", c)?,
            Token::Term(term) => match term {
                Term::Var(name) => f.write_str(name)?,
                Term::App(symbol, args) => push_application(f, &mut stack, symbol, args)?,
            },
            Token::Operand(operand, threshold) if binding_power(operand) < threshold => {
                stack.extend([Token::Str(")"), Token::Formula(operand), Token::Str("(")]);
            }
            Token::Operand(formula, _) | Token::Formula(formula) => match formula {
                Formula::True => f.write_str("true")?,
                Formula::False => f.write_str("false")?,
                Formula::Atom(p, args) => match formula.atom_kind() {
                    Some(AtomKind::Equality | AtomKind::Disequality) => stack.extend([
                        Token::Term(&args[1]),
                        Token::Str(" "),
                        Token::Str(p),
                        Token::Str(" "),
                        Token::Term(&args[0]),
                    ]),
                    _ => push_application(f, &mut stack, p, args)?,
                },
                Formula::Not(op) => {
                    f.write_str("~")?;
                    stack.push(Token::Operand(op, NOT_OPERAND_THRESHOLD));
                }
                Formula::Binary(connective, l, r) => {
                    let (left_threshold, right_threshold) = operand_thresholds(*connective);
                    stack.extend([
                        Token::Operand(r, right_threshold),
                        Token::Connective(*connective),
                        Token::Operand(l, left_threshold),
                    ]);
                }
                Formula::Quant(quantifier, var, body) => {
                    write!(f, "{}{} . ", quantifier, var)?;
                    stack.push(Token::Formula(body));
                }
            },
        }
    }
    Ok(())
}

/// Writes the symbol of an application, and pushes its parenthesized arguments onto the stack.
fn push_application<'a>(
    f: &mut fmt::Formatter,
    stack: &mut Vec<Token<'a>>,
    symbol: &str,
    args: &'a [Rc<Term>],
) -> fmt::Result {
    f.write_str(symbol)?;
    if let [head, tail @ ..] = args {
        stack.push(Token::Str(")"));
        for a in tail.iter().rev() {
            stack.extend([Token::Term(a), Token::Str(",")]);
        }
        stack.extend([Token::Term(head), Token::Str("(")]);
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_tokens(f, vec![Token::Term(self)])
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_tokens(f, vec![Token::Formula(self)])
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
