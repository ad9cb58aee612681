use crate::ast::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn test_hash_consing() {
    let u = Universe::new();
    let a = build_formula!(u, (and (P (f x)) (or (= (f x) y) (P (f x)))));

    // We expect 3 unique terms and 4 unique formulas:
    //   x, y and f(x), which is shared by all three atoms
    //   P(f(x)), f(x) = y, the disjunction and the conjunction
    assert_eq!(u.terms.len(), 3);
    assert_eq!(u.formulas.len(), 4);

    let (_, p, or) = a.as_binary().unwrap();
    let (_, _, p_again) = or.as_binary().unwrap();
    assert!(Rc::ptr_eq(p, p_again));
    assert!(Rc::ptr_eq(&p.operands()[0], or.left().left_term()));
}

#[test]
fn test_interning_identity() {
    let pool = TermPool::new();
    let first = {
        let x = pool.make_variable("x");
        pool.make_function("f", vec![x])
    };
    let second = {
        let x = pool.make_variable("x");
        pool.make_function("f", vec![x])
    };
    assert!(Rc::ptr_eq(&first, &second));
    assert!(Rc::ptr_eq(&first.operands()[0], &second.operands()[0]));

    let u = Universe::new();
    let operands = vec![u.terms.make_variable("x"), u.terms.make_variable("y")];
    let atom_via_add = u.formulas.add(Formula::Atom(EQUALITY_SYMBOL.to_owned(), operands));
    let equality = build_formula!(u, (= x y));
    assert!(Rc::ptr_eq(&atom_via_add, &equality));
    assert!(Rc::ptr_eq(&u.formulas.make_true(), &u.formulas.bool_constant(true)));
}

#[test]
fn test_eviction_and_reuse() {
    let pool = TermPool::new();
    let x = pool.make_variable("x");
    let clone = x.clone();
    assert_eq!(pool.len(), 1);

    drop(x);
    assert_eq!(pool.len(), 1);
    drop(clone);
    assert_eq!(pool.len(), 0);

    let x = pool.make_variable("x");
    assert_eq!(pool.len(), 1);
    assert_eq!(x.variable(), "x");
    assert_eq!(Rc::strong_count(&x), 1);
    assert!(Rc::ptr_eq(&x, &pool.make_variable("x")));
}

#[test]
fn test_eviction_cascades_to_operands() {
    let u = Universe::new();
    let kept = u.terms.make_variable("y");
    let f = build_formula!(u, (forall x (=> (P x (g {kept.clone()})) (not (Q x)))));
    assert_eq!(u.terms.len(), 3);
    assert_eq!(u.formulas.len(), 5);

    drop(f);
    assert_eq!(u.formulas.len(), 0);
    assert_eq!(u.terms.len(), 1);
    assert_eq!(Rc::strong_count(&kept), 1);

    drop(kept);
    assert_eq!(u.terms.len(), 0);
}

#[test]
fn test_shared_operand_survives_parent() {
    let u = Universe::new();
    let p = build_formula!(u, (P x));
    let and = u.formulas.make_and(p.clone(), p.clone());
    let or = u.formulas.make_or(p.clone(), p.clone());
    assert_eq!(u.formulas.len(), 3);

    drop(and);
    assert_eq!(u.formulas.len(), 2);
    drop(p);
    assert_eq!(u.formulas.len(), 2);
    assert_eq!(or.left().to_string(), "P(x)");

    drop(or);
    assert_eq!(u.formulas.len(), 0);
    assert_eq!(u.terms.len(), 0);
}

#[test]
fn test_pool_dropped_before_handles() {
    let pool = TermPool::new();
    let t = build_term!(pool, (f x (c)));
    drop(pool);
    assert_eq!(t.to_string(), "f(x,c)");
    drop(t);
}

#[test]
fn test_discrimination() {
    let u = Universe::new();
    let x = u.terms.make_variable("x");
    let y = u.terms.make_variable("y");
    assert_ne!(x, y);
    assert_ne!(build_term!(u.terms, (f x)), build_term!(u.terms, (g x)));
    assert_ne!(build_term!(u.terms, (f x y)), build_term!(u.terms, (f y x)));
    assert_ne!(build_term!(u.terms, (f x)), build_term!(u.terms, (f x x)));
    assert_ne!(build_term!(u.terms, x), build_term!(u.terms, (x)));
    assert_ne!(build_formula!(u, (P x)), build_formula!(u, (Q x)));
    assert_ne!(build_formula!(u, (= x y)), build_formula!(u, (!= x y)));
    assert_ne!(build_formula!(u, (and (A) (B))), build_formula!(u, (or (A) (B))));
    assert_ne!(build_formula!(u, (and (A) (B))), build_formula!(u, (and (B) (A))));
    assert_ne!(build_formula!(u, (forall x (P x))), build_formula!(u, (exists x (P x))));
    assert_ne!(build_formula!(u, (forall x (P x))), build_formula!(u, (forall y (P x))));
    assert_ne!(build_formula!(u, true), build_formula!(u, false));
}

#[test]
fn test_independent_universes() {
    let a = Universe::new();
    let b = Universe::with_config(Config::new().initial_capacity(64));
    let from_a = build_formula!(a, (forall x (<=> (P x) (exists y (= x y)))));
    let from_b = build_formula!(b, (forall x (<=> (P x) (exists y (= x y)))));

    assert!(!Rc::ptr_eq(&from_a, &from_b));
    assert_eq!(from_a, from_b);
    assert_eq!(Rc::structural_hash(&from_a), Rc::structural_hash(&from_b));

    drop(from_a);
    assert_eq!(a.formulas.len(), 0);
    assert_eq!(b.formulas.len(), 5);
}

fn random_term(pool: &TermPool, rng: &mut StdRng, depth: u32) -> Rc<Term> {
    const SYMBOLS: [&str; 3] = ["x", "y", "z"];
    let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];
    if depth == 0 || rng.gen_bool(0.4) {
        return pool.make_variable(symbol);
    }
    let arity = rng.gen_range(0..3);
    let args = (0..arity).map(|_| random_term(pool, rng, depth - 1)).collect();
    pool.make_function(symbol, args)
}

fn random_formula(u: &Universe, rng: &mut StdRng, depth: u32) -> Rc<Formula> {
    let choice: usize = if depth == 0 { rng.gen_range(0..4) } else { rng.gen_range(0..10) };
    let f = &u.formulas;
    match choice {
        0 => f.bool_constant(rng.gen_bool(0.5)),
        1 => f.make_equality(random_term(&u.terms, rng, 2), random_term(&u.terms, rng, 2)),
        2 => f.make_disequality(random_term(&u.terms, rng, 2), random_term(&u.terms, rng, 2)),
        3 => {
            let predicate = ["P", "Q"][rng.gen_range(0..2usize)];
            let arity = rng.gen_range(0..3);
            let args = (0..arity).map(|_| random_term(&u.terms, rng, 2)).collect();
            f.make_atom(predicate, args)
        }
        4 => f.make_not(random_formula(u, rng, depth - 1)),
        5..=8 => {
            let connective = [Connective::And, Connective::Or, Connective::Imp, Connective::Iff]
                [choice - 5];
            let l = random_formula(u, rng, depth - 1);
            let r = random_formula(u, rng, depth - 1);
            f.make_binary(connective, l, r)
        }
        _ => {
            let var = ["x", "y"][rng.gen_range(0..2usize)];
            let quantifier = if rng.gen_bool(0.5) { Quantifier::Forall } else { Quantifier::Exists };
            f.make_quant(quantifier, var, random_formula(u, rng, depth - 1))
        }
    }
}

#[test]
fn test_hash_equality_consistency() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let u = Universe::new();
    let other = Universe::new();

    let formulas: Vec<_> = (0..200).map(|_| random_formula(&u, &mut rng, 3)).collect();
    for a in &formulas {
        for b in &formulas {
            let equal = a == b;
            assert_eq!(equal, Rc::ptr_eq(a, b), "'{}' and '{}'", a, b);
            if equal {
                assert_eq!(Rc::structural_hash(a), Rc::structural_hash(b));
            }
        }
    }

    // Rebuilding the same formulas in another universe yields equal, but distinct, instances
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let rebuilt: Vec<_> = (0..200).map(|_| random_formula(&other, &mut rng, 3)).collect();
    for (a, b) in formulas.iter().zip(&rebuilt) {
        assert_eq!(a, b);
        assert!(!Rc::ptr_eq(a, b));
        assert_eq!(Rc::structural_hash(a), Rc::structural_hash(b));
        assert_eq!(a.to_string(), b.to_string());
    }

    drop(formulas);
    drop(rebuilt);
    assert_eq!(u.formulas.len(), 0);
    assert_eq!(u.terms.len(), 0);
    assert_eq!(other.formulas.len(), 0);
}

const CHAIN_DEPTH: usize = 100_000;

#[test]
fn test_deep_negation_chain() {
    let u = Universe::new();
    let mut f = build_formula!(u, (P x));
    for _ in 0..CHAIN_DEPTH {
        f = u.formulas.make_not(f);
    }
    assert_eq!(u.formulas.len(), CHAIN_DEPTH + 1);

    let printed = f.to_string();
    assert_eq!(printed.len(), CHAIN_DEPTH + "P(x)".len());
    assert!(printed.ends_with("~~P(x)"));

    drop(f);
    assert_eq!(u.formulas.len(), 0);
    assert_eq!(u.terms.len(), 0);
}

#[test]
fn test_deep_binary_chain() {
    let u = Universe::new();
    let mut f = build_formula!(u, (P));
    for _ in 0..CHAIN_DEPTH {
        f = u.formulas.make_or(u.formulas.make_atom("P", Vec::new()), f);
    }
    assert_eq!(u.formulas.len(), CHAIN_DEPTH + 1);

    // Every disjunction but the innermost one is the right operand of another disjunction
    let printed = f.to_string();
    assert_eq!(printed.matches('(').count(), CHAIN_DEPTH - 1);
    assert!(printed.starts_with("P | (P | (P"));

    drop(f);
    assert_eq!(u.formulas.len(), 0);
}

#[test]
fn test_deep_term_chain() {
    let u = Universe::new();
    let mut t = u.terms.make_variable("x");
    for _ in 0..CHAIN_DEPTH {
        t = u.terms.make_function("f", vec![t]);
    }
    let atom = u.formulas.make_atom("P", vec![t]);
    assert_eq!(u.terms.len(), CHAIN_DEPTH + 1);

    let expected = format!("P({}x{})", "f(".repeat(CHAIN_DEPTH), ")".repeat(CHAIN_DEPTH));
    assert_eq!(atom.to_string(), expected);

    drop(atom);
    assert_eq!(u.formulas.len(), 0);
    assert_eq!(u.terms.len(), 0);
}

#[test]
fn test_deep_chain_outlives_pool() {
    let u = Universe::new();
    let mut f = build_formula!(u, (P x));
    for _ in 0..CHAIN_DEPTH {
        f = u.formulas.make_exists("x", f);
    }
    drop(u);
    assert!(f.to_string().starts_with("?x . ?x . "));
    drop(f);
}
