//! # Substitutions
//!
//! A [`Substitution`] is a finite mapping from variables to terms. It is the value threaded
//! through unification and resolution: the unifier extends it one binding at a time, and the
//! solver applies the finished mapping to the remaining goals and to the tracked answer.
//!
//! Bindings are kept in resolved form: [`Substitution::bind`] redirects any existing binding whose
//! value is exactly the variable being bound, so chains like `X -> Y, Y -> a` never survive a
//! `bind` call. Variables nested inside compound binding values are not redirected; callers that
//! need fully instantiated terms use [`Substitution::resolve`] instead of the single-pass
//! [`Substitution::apply`].

use std::collections::hash_map;
use std::collections::HashMap;

use crate::ast::{AppTerm, Rule, Term, Var};

/// A mapping from variables to terms, built by the unifier and applied by the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashMap<Var, Term>,
}

impl Substitution {
    /// Create an empty substitution.
    pub fn new() -> Substitution {
        Substitution {
            bindings: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up the binding of a variable.
    pub fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Insert a binding without touching existing ones. Used for building renamings, where keys
    /// and values are disjoint by construction.
    pub fn insert(&mut self, var: Var, term: Term) {
        self.bindings.insert(var, term);
    }

    /// Bind `var` to `term`, eagerly rewriting every existing binding whose value is `var` to
    /// point at `term` instead. This keeps the substitution free of unresolved chains.
    pub fn bind(&mut self, var: Var, term: Term) {
        let var_term = Term::Var(var.clone());
        for value in self.bindings.values_mut() {
            if *value == var_term {
                *value = term.clone();
            }
        }
        self.bindings.insert(var, term);
    }

    /// Apply the substitution to a term, producing a new term. Every variable occurrence that is
    /// bound is replaced by its binding; unbound variables and constants are copied unchanged, and
    /// compound terms are rebuilt recursively over their argument list.
    ///
    /// This is a single rewriting pass. It relies on the substitution being kept in resolved form
    /// by [`Substitution::bind`]; it does not chase chains inside the replaced values.
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Var(v) => match self.bindings.get(v) {
                Some(bound) => bound.clone(),
                None => term.clone(),
            },
            Term::Const(_) => term.clone(),
            Term::App(app) => Term::App(AppTerm {
                functor: app.functor.clone(),
                args: app.args.iter().map(|arg| self.apply(arg)).collect(),
            }),
        }
    }

    /// Apply the substitution to every term of a slice in place.
    pub fn apply_all(&self, terms: &mut [Term]) {
        for term in terms.iter_mut() {
            *term = self.apply(term);
        }
    }

    /// Apply the substitution to a term, additionally resolving bound variables *inside* the
    /// replaced values until none remain.
    ///
    /// [`Substitution::bind`] only redirects existing values that are exactly the bound variable,
    /// so a variable sitting inside a compound binding value can itself pick up a binding later in
    /// the same unification (`{X -> f(Y), Y -> a}`). A single [`Substitution::apply`] pass leaves
    /// that inner occurrence alone; `resolve` instantiates it fully, yielding `f(a)` for `X`.
    ///
    /// Diverges on cyclic bindings, which the unchecked unifier permits.
    pub fn resolve(&self, term: &Term) -> Term {
        match term {
            Term::Var(v) => match self.bindings.get(v) {
                Some(bound) => self.resolve(bound),
                None => term.clone(),
            },
            Term::Const(_) => term.clone(),
            Term::App(app) => Term::App(AppTerm {
                functor: app.functor.clone(),
                args: app.args.iter().map(|arg| self.resolve(arg)).collect(),
            }),
        }
    }

    /// Resolve every term of a slice in place, see [`Substitution::resolve`].
    pub fn resolve_all(&self, terms: &mut [Term]) {
        for term in terms.iter_mut() {
            *term = self.resolve(term);
        }
    }

    /// Rewrite only the argument list of a rule's head, keeping the body untouched. The body is
    /// instantiated later, in bulk, when it is spliced into the resolvent.
    pub fn apply_to_head(&self, rule: &Rule) -> Rule {
        Rule {
            head: AppTerm {
                functor: rule.head.functor.clone(),
                args: rule.head.args.iter().map(|arg| self.apply(arg)).collect(),
            },
            tail: rule.tail.clone(),
        }
    }

    /// Iterate over the bindings, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, Var, Term> {
        self.bindings.iter()
    }
}
