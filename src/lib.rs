//! # Logic programming in Rust
//!
//! Minilog is a small resolution engine for a Prolog-like logic language. Given a program (an
//! ordered list of [rules](ast::Rule)) and a query (a conjunction of goal terms), it determines
//! whether the query follows from the program and instantiates the query's variables accordingly.
//!
//! At the core sit four small pieces: the tree-shaped [term model](ast), the
//! [substitution engine](subst), [syntactic unification](unification) and the
//! [clause renamer](fresh) that keeps separate uses of the same rule variable-disjoint. On top of
//! them, two kinds of resolution are offered:
//!
//! - [`Solver`](solver::Solver) provides the single-path strategies:
//!   [`solve_one`](solver::Solver::solve_one) follows one random resolution path and always
//!   terminates, while [`solve_all`](solver::Solver::solve_all) deterministically follows the
//!   leftmost derivation path and finds at most one solution.
//! - [`query_dfs`] enumerates every solution by a depth-first search that backtracks across rule
//!   choices.
//!
//! For a more Prolog-like experience, the [textual] module offers a parser and matching
//! pretty-printing for programs and queries.
//!
//! # Example
//!
//! As an example, let's define a few predicates for solving [Peano
//! arithmetic](https://en.wikipedia.org/wiki/Peano_axioms#Addition) expressions. In Prolog, these
//! could be written like this:
//!
//! ```prolog
//! is_natural(z).
//! is_natural(s(P)) :- is_natural(P).
//!
//! add(P, z, P) :- is_natural(P).
//! add(P, s(Q), s(R)) :- add(P, Q, R).
//! ```
//!
//! The `is_natural` predicate defines that zero (z) is a natural number, and each successor (s) of
//! a natural number is also a natural number.
//!
//! Addition is also defined recursively. An expression `add(P, Q, R)` should be read as the
//! statement `P + Q = R`. The first case expresses that `P + 0 = P` for all natural numbers P,
//! while the second case expresses that `P + s(Q) = s(R)` where `P + Q = R` (i.e. we add one on
//! both sides).
//!
//! Using the term builders from the [ast] module, we can encode these rules as follows:
//!
//! ```
//! use minilog::ast::{app, atom, var, Rule};
//!
//! let program = vec![
//!     // is_natural(z).
//!     Rule::fact("is_natural", vec![atom("z")]),
//!     // is_natural(s(P)) :- is_natural(P).
//!     Rule::fact("is_natural", vec![app("s", vec![var("P")])])
//!         .when("is_natural", vec![var("P")]),
//!     // add(P, z, P) :- is_natural(P).
//!     Rule::fact("add", vec![var("P"), atom("z"), var("P")])
//!         .when("is_natural", vec![var("P")]),
//!     // add(P, s(Q), s(R)) :- add(P, Q, R).
//!     Rule::fact(
//!         "add",
//!         vec![
//!             var("P"),
//!             app("s", vec![var("Q")]),
//!             app("s", vec![var("R")]),
//!         ],
//!     )
//!     .when("add", vec![var("P"), var("Q"), var("R")]),
//! ];
//! ```
//!
//! We can then execute queries against this program, e.g. having the solver compute the solution
//! for `X + 2 = 3`. In our relational interpretation, this boils down to proving the statement
//! "there exists an X such that `add(X, s(s(z)), s(s(s(z))))` holds".
//!
//! ```
//! # use minilog::ast::{app, atom, var, Rule};
//! # let program = vec![
//! #     Rule::fact("is_natural", vec![atom("z")]),
//! #     Rule::fact("is_natural", vec![app("s", vec![var("P")])])
//! #         .when("is_natural", vec![var("P")]),
//! #     Rule::fact("add", vec![var("P"), atom("z"), var("P")])
//! #         .when("is_natural", vec![var("P")]),
//! #     Rule::fact(
//! #         "add",
//! #         vec![
//! #             var("P"),
//! #             app("s", vec![var("Q")]),
//! #             app("s", vec![var("R")]),
//! #         ],
//! #     )
//! #     .when("add", vec![var("P"), var("Q"), var("R")]),
//! # ];
//! use minilog::ast::Query;
//!
//! let query = Query::new(
//!     "add",
//!     vec![
//!         var("X"),
//!         app("s", vec![app("s", vec![atom("z")])]),
//!         app("s", vec![app("s", vec![app("s", vec![atom("z")])])]),
//!     ],
//! );
//! // Obtain an iterator that allows us to exhaustively search the solution space:
//! let solutions: Vec<_> = minilog::query_dfs(&program, &query).collect();
//! // Sanity check that there is only one solution, and it is the expected one: 1 + 2 = 3
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(
//!     solutions[0][0].to_string(),
//!     "add(s(z), s(s(z)), s(s(s(z))))"
//! );
//! ```
//!
//! The [`query_dfs`] solver performs a left-to-right depth first search through the solution
//! space, processing goals (both in the original query and in matching rules) from left to right
//! and trying rules in program order. It is efficient for finite search spaces, but it requires
//! some care in how the predicates are set up in order to avoid infinite recursion.
//!
//! The strategies in the [solver] module trade completeness for guaranteed termination
//! ([`solve_one`](solver::Solver::solve_one)) or for a simpler, single-path control flow
//! ([`solve_all`](solver::Solver::solve_all)).

pub mod ast;
pub mod fresh;
pub mod search;
pub mod solver;
pub mod subst;
pub mod textual;
pub mod unification;

pub use search::query_dfs;
pub use solver::Solver;
