//! # Syntactic unification
//!
//! Robinson-style unification over the tree terms of [`crate::ast`]. The entry points return a
//! [`Substitution`] that makes both terms structurally equal, or [`NotUnifiable`] when no such
//! substitution exists. Failure is an ordinary result value consumed by the solver's "try the next
//! rule" loop, never a panic.
//!
//! By default no occurs check is performed: unifying `X` with `f(X)` succeeds and records the
//! cyclic binding `X -> f(X)`. The [`occurs_check`] predicate is available on its own, and
//! [`unify_with_occurs_check`] is the opt-in variant that rejects such bindings.

use std::error::Error;
use std::fmt;

use crate::ast::{Term, Var};
use crate::subst::Substitution;

/// Error indicating that two terms cannot be made structurally equal.
///
/// It carries no payload; the solver only needs the failure classification to move on to the next
/// candidate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotUnifiable;

impl fmt::Display for NotUnifiable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terms are not unifiable")
    }
}

impl Error for NotUnifiable {}

/// Compute a substitution that makes `t1` and `t2` structurally equal.
pub fn unify(t1: &Term, t2: &Term) -> Result<Substitution, NotUnifiable> {
    unify_with(t1, t2, Substitution::new())
}

/// Like [`unify`], but threads an already accumulated substitution through the unification, so
/// bindings made by earlier goals constrain later ones.
pub fn unify_with(t1: &Term, t2: &Term, subst: Substitution) -> Result<Substitution, NotUnifiable> {
    unify_impl(t1, t2, subst, false)
}

/// Occurs-checked variant of [`unify`]: binding a variable to a compound term containing that same
/// variable fails instead of creating a cyclic binding.
pub fn unify_with_occurs_check(t1: &Term, t2: &Term) -> Result<Substitution, NotUnifiable> {
    unify_impl(t1, t2, Substitution::new(), true)
}

/// Returns true if the variable `v` occurs anywhere inside `t`.
pub fn occurs_check(v: &Var, t: &Term) -> bool {
    match t {
        Term::Var(w) => v == w,
        Term::Const(_) => false,
        Term::App(app) => app.args.iter().any(|arg| occurs_check(v, arg)),
    }
}

fn unify_impl(
    x: &Term,
    y: &Term,
    subst: Substitution,
    occurs: bool,
) -> Result<Substitution, NotUnifiable> {
    if x == y {
        return Ok(subst);
    }
    match (x, y) {
        (Term::Var(v), _) => unify_var(v, y, subst, occurs),
        (_, Term::Var(v)) => unify_var(v, x, subst, occurs),
        (Term::App(a), Term::App(b)) => {
            if a.functor != b.functor || a.args.len() != b.args.len() {
                return Err(NotUnifiable);
            }
            // left-to-right, so later argument pairs see the bindings of earlier ones
            a.args
                .iter()
                .zip(&b.args)
                .try_fold(subst, |subst, (xa, ya)| unify_impl(xa, ya, subst, occurs))
        }
        _ => Err(NotUnifiable),
    }
}

fn unify_var(
    v: &Var,
    other: &Term,
    subst: Substitution,
    occurs: bool,
) -> Result<Substitution, NotUnifiable> {
    if let Some(bound) = subst.get(v).cloned() {
        return unify_impl(&bound, other, subst, occurs);
    }
    if let Term::Var(w) = other {
        if let Some(bound) = subst.get(w).cloned() {
            return unify_impl(&Term::Var(v.clone()), &bound, subst, occurs);
        }
    }
    if occurs && occurs_check(v, other) {
        return Err(NotUnifiable);
    }
    let mut subst = subst;
    subst.bind(v.clone(), other.clone());
    Ok(subst)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::*;

    #[test]
    fn ground_terms_unify_iff_equal() {
        let a = app("f", vec![atom("a"), app("g", vec![int(1)])]);
        let b = a.clone();
        let s = unify(&a, &b).unwrap();
        assert!(s.is_empty());

        let c = app("f", vec![atom("b"), app("g", vec![int(1)])]);
        assert_eq!(unify(&a, &c), Err(NotUnifiable));
        assert_eq!(unify(&atom("a"), &atom("b")), Err(NotUnifiable));
    }

    #[test]
    fn binds_variables_on_both_sides() {
        // unify(f(X, a), f(b, Y)) = {X: b, Y: a}
        let t1 = app("f", vec![var("X"), atom("a")]);
        let t2 = app("f", vec![atom("b"), var("Y")]);
        let s = unify(&t1, &t2).unwrap();
        assert_eq!(s.iter().count(), 2);
        assert_eq!(s.get(&Var::new("X")), Some(&atom("b")));
        assert_eq!(s.get(&Var::new("Y")), Some(&atom("a")));
        assert_eq!(s.apply(&t1), s.apply(&t2));
    }

    #[test]
    fn functor_mismatch_fails() {
        let t1 = app("f", vec![var("X")]);
        let t2 = app("g", vec![var("X")]);
        assert_eq!(unify(&t1, &t2), Err(NotUnifiable));
    }

    #[test]
    fn arity_mismatch_fails() {
        let t1 = app("f", vec![var("X")]);
        let t2 = app("f", vec![var("X"), var("Y")]);
        assert_eq!(unify(&t1, &t2), Err(NotUnifiable));
    }

    #[test]
    fn incompatible_shapes_fail() {
        assert_eq!(unify(&atom("a"), &app("a", vec![int(0)])), Err(NotUnifiable));
        assert_eq!(unify(&int(1), &int(2)), Err(NotUnifiable));
    }

    #[test]
    fn success_classification_is_symmetric() {
        let pairs = vec![
            (app("f", vec![var("X"), atom("a")]), app("f", vec![atom("b"), var("Y")])),
            (app("f", vec![var("X")]), app("g", vec![var("X")])),
            (var("X"), app("h", vec![atom("c")])),
            (atom("a"), atom("a")),
            (atom("a"), int(1)),
            (app("p", vec![var("X"), var("X")]), app("p", vec![atom("a"), atom("b")])),
        ];
        for (a, b) in pairs {
            assert_eq!(unify(&a, &b).is_ok(), unify(&b, &a).is_ok(), "{} vs {}", a, b);
        }
    }

    #[test]
    fn earlier_bindings_constrain_later_pairs() {
        // p(X, X) vs p(a, b): second pair must see X -> a and fail
        let t1 = app("p", vec![var("X"), var("X")]);
        let t2 = app("p", vec![atom("a"), atom("b")]);
        assert_eq!(unify(&t1, &t2), Err(NotUnifiable));

        let t3 = app("p", vec![atom("a"), atom("a")]);
        let s = unify(&t1, &t3).unwrap();
        assert_eq!(s.get(&Var::new("X")), Some(&atom("a")));
    }

    #[test]
    fn variable_chains_resolve_eagerly() {
        // f(X, Y) vs f(Y, b): binding Y later must rewrite the earlier X -> Y binding
        let t1 = app("f", vec![var("X"), var("Y")]);
        let t2 = app("f", vec![var("Y"), atom("b")]);
        let s = unify(&t1, &t2).unwrap();
        assert_eq!(s.get(&Var::new("X")), Some(&atom("b")));
        assert_eq!(s.get(&Var::new("Y")), Some(&atom("b")));
    }

    #[test]
    fn occurs_check_predicate() {
        let v = Var::new("X");
        assert!(occurs_check(&v, &var("X")));
        assert!(!occurs_check(&v, &var("Y")));
        assert!(!occurs_check(&v, &atom("X")));
        assert!(occurs_check(&v, &app("f", vec![app("g", vec![var("X")])])));
        assert!(!occurs_check(&v, &app("f", vec![atom("a"), int(1)])));
    }

    #[test]
    fn cyclic_bindings_permitted_by_default() {
        let t = app("f", vec![var("X")]);
        let s = unify(&var("X"), &t).unwrap();
        assert_eq!(s.get(&Var::new("X")), Some(&t));
    }

    #[test]
    fn occurs_checked_variant_rejects_cycles() {
        let t = app("f", vec![var("X")]);
        assert_eq!(unify_with_occurs_check(&var("X"), &t), Err(NotUnifiable));
        // a regular binding still goes through
        assert!(unify_with_occurs_check(&var("X"), &app("f", vec![atom("a")])).is_ok());
    }
}
