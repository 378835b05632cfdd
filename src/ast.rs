//! # Terms, rules and queries
//!
//! The term model is a plain tree representation: every symbol carries its name inline, so terms
//! can be compared, hashed and printed without consulting any side table. All types here are
//! immutable values; the solver never mutates a term in place, it always builds new ones. That
//! matters because the same rule body is instantiated many times during a resolution run and must
//! not be corrupted by the substitution performed for one particular use.

use std::collections::BTreeSet;
use std::fmt;

/// A logic variable, identified by its name. Two variables are equal iff their names are equal.
///
/// Names generated by the solver start with an underscore (`_G1`, `_G2`, ...), a namespace that the
/// textual syntax does not allow for user-written variables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(String);

impl Var {
    pub fn new(name: impl Into<String>) -> Var {
        Var(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An atomic constant. Equality is value equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Const {
    /// A symbolic constant, e.g. `mary` in `likes(mary, wine)`.
    Atom(String),
    /// An integer constant.
    Int(i64),
}

/// An application term, i.e. a term of the form `functor(arg0, arg1, ...)`. An application with no
/// arguments represents a nullary atom used as a goal, e.g. the head of the fact `halt.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppTerm {
    /// The relation symbol being applied.
    pub functor: String,
    /// The arguments of the application.
    pub args: Vec<Term>,
}

impl AppTerm {
    pub fn new(functor: impl Into<String>, args: Vec<Term>) -> AppTerm {
        AppTerm {
            functor: functor.into(),
            args,
        }
    }
}

/// Representation of a logic term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable.
    Var(Var),
    /// A constant.
    Const(Const),
    /// A compound term applying a relation symbol to arguments.
    App(AppTerm),
}

impl Term {
    /// Collect every variable occurring anywhere inside this term.
    pub fn collect_vars(&self, out: &mut BTreeSet<Var>) {
        match self {
            Term::Var(v) => {
                out.insert(v.clone());
            }
            Term::Const(_) => {}
            Term::App(app) => {
                for arg in &app.args {
                    arg.collect_vars(out);
                }
            }
        }
    }

    /// Returns true if the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::App(app) => app.args.iter().all(Term::is_ground),
        }
    }
}

impl From<Var> for Term {
    fn from(v: Var) -> Self {
        Term::Var(v)
    }
}

impl From<Const> for Term {
    fn from(c: Const) -> Self {
        Term::Const(c)
    }
}

impl From<AppTerm> for Term {
    fn from(at: AppTerm) -> Self {
        Term::App(at)
    }
}

/// Convenience constructor for a variable term.
pub fn var(name: impl Into<String>) -> Term {
    Term::Var(Var::new(name))
}

/// Convenience constructor for a symbolic constant.
pub fn atom(name: impl Into<String>) -> Term {
    Term::Const(Const::Atom(name.into()))
}

/// Convenience constructor for an integer constant.
pub fn int(value: i64) -> Term {
    Term::Const(Const::Int(value))
}

/// Convenience constructor for an application term.
pub fn app(functor: impl Into<String>, args: Vec<Term>) -> Term {
    Term::App(AppTerm::new(functor, args))
}

/// Representation of logic rules (and as a special case, of facts). Logically, it can be
/// interpreted as "`tail` implies `head`".
///
/// # Examples
///
/// ```
/// use minilog::ast::*;
/// // grandparent(X, Y) :- parent(X, Z), parent(Z, Y).
/// let rule = Rule::fact("grandparent", vec![var("X"), var("Y")])
///     .when("parent", vec![var("X"), var("Z")])
///     .when("parent", vec![var("Z"), var("Y")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The rule head, i.e. the fact that can be derived when all the `tail` terms are proven true.
    pub head: AppTerm,
    /// The conjunction of subgoals that need to hold for the `head` to become true. If the tail is
    /// empty, the head is always true and the rule is called a fact.
    pub tail: Vec<Term>,
}

impl Rule {
    /// Create a "fact" rule, i.e. one that always holds.
    pub fn fact(pred: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            head: AppTerm::new(pred, args),
            tail: vec![],
        }
    }

    /// Constrain a rule with an additional condition that must hold for the rule head to become
    /// true.
    pub fn when(mut self, pred: impl Into<String>, args: Vec<Term>) -> Self {
        self.tail.push(Term::App(AppTerm::new(pred, args)));
        self
    }
}

/// Representation of logic queries, i.e. a conjunction of goals that we want to prove true (by
/// finding a solution) or false (by exhausting the solution space).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub goals: Vec<Term>,
}

impl Query {
    /// The query that is vacuously true.
    pub fn empty() -> Query {
        Query::with_goals(vec![])
    }

    /// A query consisting of a conjunction of goals.
    pub fn with_goals(goals: Vec<Term>) -> Query {
        Query { goals }
    }

    /// A query with just a single goal.
    pub fn new(pred: impl Into<String>, args: Vec<Term>) -> Query {
        Query::with_goals(vec![Term::App(AppTerm::new(pred, args))])
    }

    /// Add another goal to this query.
    pub fn and(mut self, pred: impl Into<String>, args: Vec<Term>) -> Self {
        self.goals.push(Term::App(AppTerm::new(pred, args)));
        self
    }
}

// The Display output is valid input for the textual parser again, which the parser tests rely on.

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Atom(name) => write!(f, "{}", name),
            Const::Int(i) => write!(f, "{}", i),
        }
    }
}

impl fmt::Display for AppTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.functor)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "({}", first)?;
            for arg in rest {
                write!(f, ", {}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Const(c) => write!(f, "{}", c),
            Term::App(app) => write!(f, "{}", app),
        }
    }
}

fn fmt_conjunction(f: &mut fmt::Formatter<'_>, goals: &[Term]) -> fmt::Result {
    if let Some((first, rest)) = goals.split_first() {
        write!(f, "{}", first)?;
        for goal in rest {
            write!(f, ", {}", goal)?;
        }
    }
    write!(f, ".")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if self.tail.is_empty() {
            write!(f, ".")
        } else {
            write!(f, " :- ")?;
            fmt_conjunction(f, &self.tail)
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_conjunction(f, &self.goals)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_roundtrippable_syntax() {
        let rule = Rule::fact("grandparent", vec![var("X"), var("Y")])
            .when("parent", vec![var("X"), var("Z")])
            .when("parent", vec![var("Z"), var("Y")]);
        assert_eq!(
            rule.to_string(),
            "grandparent(X, Y) :- parent(X, Z), parent(Z, Y)."
        );

        let fact = Rule::fact("likes", vec![atom("mary"), atom("wine")]);
        assert_eq!(fact.to_string(), "likes(mary, wine).");

        assert_eq!(app("f", vec![int(42), var("A")]).to_string(), "f(42, A)");
        assert_eq!(Rule::fact("halt", vec![]).to_string(), "halt.");
    }

    #[test]
    fn collect_vars_is_deep() {
        let t = app("f", vec![app("g", vec![var("X"), atom("a")]), var("Y")]);
        let mut vars = BTreeSet::new();
        t.collect_vars(&mut vars);
        let names: Vec<_> = vars.iter().map(Var::name).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn groundness() {
        assert!(app("f", vec![atom("a"), int(1)]).is_ground());
        assert!(!app("f", vec![atom("a"), var("X")]).is_ground());
    }
}
