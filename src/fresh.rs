//! # Clause renaming
//!
//! Before a rule is matched against a goal, all of its variables are replaced by globally fresh
//! ones, so that two uses of the same rule within one derivation can never share a variable by
//! accident. [`VarSource`] owns the monotonic counter backing the generated names; the solver
//! holds one per engine instance instead of reading it from global state, which also keeps
//! concurrent engines independent of each other.

use std::collections::BTreeSet;

use crate::ast::{Rule, Term, Var};
use crate::subst::Substitution;

/// A generator of globally unique variables.
///
/// The counter is monotonic and is never reset for the lifetime of the source, so no name is ever
/// issued twice, no matter how many rules are freshened over how many queries.
#[derive(Debug, Default)]
pub struct VarSource {
    counter: u64,
}

impl VarSource {
    pub fn new() -> VarSource {
        VarSource { counter: 0 }
    }

    /// Generate the next fresh variable. The `_G` prefix keeps generated names disjoint from
    /// user-written ones, which the textual syntax requires to start with an upper case letter.
    pub fn fresh(&mut self) -> Var {
        self.counter += 1;
        Var::new(format!("_G{}", self.counter))
    }

    /// Produce a copy of `rule` with every variable occurring in it, head and body alike, renamed
    /// to a fresh one. Variables shared between head and body stay shared in the copy.
    ///
    /// Renaming the body as well is essential for soundness: a variable occurring only in the body
    /// (like the `Z` in `grandparent(X, Y) :- parent(X, Z), parent(Z, Y).`) must not be shared
    /// between two instantiations of the same rule.
    pub fn freshen(&mut self, rule: &Rule) -> Rule {
        let mut vars = BTreeSet::new();
        for arg in &rule.head.args {
            arg.collect_vars(&mut vars);
        }
        for goal in &rule.tail {
            goal.collect_vars(&mut vars);
        }

        let mut renaming = Substitution::new();
        for v in vars {
            let fresh = self.fresh();
            renaming.insert(v, Term::Var(fresh));
        }

        let head = renaming.apply_to_head(rule).head;
        let tail = rule.tail.iter().map(|goal| renaming.apply(goal)).collect();
        Rule { head, tail }
    }
}
