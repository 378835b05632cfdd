//! # A Prolog-like syntax
//!
//! This module provides a textual, Prolog-like syntax for the solver core. See [`TextualProgram`]
//! for an example.

mod lexer;
mod parser;

pub use parser::{ParseError, ParseErrorKind, Parser};

use crate::ast::{Query, Rule};
use crate::search::{self, SolutionIter};

/// A program that can be interacted with using a Prolog like syntax.
///
/// It wraps the plain rule list consumed by the solvers and provides a fully textual syntax for
/// defining rules and queries, looking very similar to Prolog.
///
/// Syntactic elements:
/// - **Variables**: An identifier starting with an upper case ASCII letter followed by zero or more
///   ASCII letters, digits or underscores, e.g. `X`, `Person`, `FooBar`. A lone underscore (or an
///   identifier starting with one) is a wildcard: every occurrence is a distinct variable.
/// - **Constants**: An identifier starting with a lower case ASCII letter, e.g. `mary`, or an
///   integer literal, e.g. `42`.
/// - **Application Terms**: An application of a functor to arguments, e.g. `is_natural(X)` or
///   `add(X, z, Y)`.
/// - **Facts**: An application term followed by a dot, e.g. `is_natural(z).`.
/// - **Rules**: An application term followed by `:-` (a reverse implication arrow) and a comma
///   separated list of one or more conjunctive conditions, followed by a dot, e.g. `grandparent(A,
///   B) :- parent(A, C), parent(C, B).`.
/// - **Queries**: A comma separated list of one or more conjunctive conditions, followed by a dot,
///   e.g. `grandparent(bob, A), female(A).`.
/// - **Comments**: everything from `%` to the end of the line is ignored.
///
/// Terms print back in the same syntax via their `Display` implementations.
///
/// # Example
///
/// Definitions of facts and rules can be loaded from a string that contains zero or more facts or
/// rules as described above. In the following example, we define a set of Peano arithmetic rules
/// and solve the equation `X + 1 = 2`.
///
/// ```
/// use minilog::textual::TextualProgram;
///
/// let mut program = TextualProgram::new();
/// program.load_str(
///     r#"
/// is_natural(z).
/// is_natural(s(A)) :- is_natural(A).
/// add(A, z, A) :- is_natural(A).
/// add(A, s(B), s(C)) :- add(A, B, C).
/// "#,
/// )
/// .unwrap();
///
/// let solutions: Vec<String> = program
///     .query_dfs("add(X, s(z), s(s(z))).")
///     .unwrap()
///     .map(|goals| goals[0].to_string())
///     .collect();
/// assert_eq!(solutions, vec!["add(s(z), s(z), s(s(z)))"]);
/// ```
pub struct TextualProgram {
    rules: Vec<Rule>,
    parser: Parser,
}

impl TextualProgram {
    pub fn new() -> Self {
        Self {
            rules: vec![],
            parser: Parser::new(),
        }
    }

    /// Load a set of rules from a string.
    pub fn load_str(&mut self, rules: &str) -> Result<(), ParseError> {
        let rules = self.parser.parse_rules_str(rules)?;
        self.rules.extend(rules);
        Ok(())
    }

    /// Parse a query, but do not run it.
    pub fn prepare_query(&mut self, query: &str) -> Result<Query, ParseError> {
        self.parser.parse_query_str(query)
    }

    /// Run a query against the program using the backtracking DFS solver.
    pub fn query_dfs(&mut self, query: &str) -> Result<SolutionIter<'_>, ParseError> {
        let query = self.prepare_query(query)?;
        Ok(search::query_dfs(&self.rules, &query))
    }

    /// Returns the rules that have been loaded into this program, in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for TextualProgram {
    fn default() -> Self {
        Self::new()
    }
}
