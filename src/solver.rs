//! # Resolution strategies
//!
//! The [`Solver`] drives SLD resolution: it repeatedly selects an outstanding subgoal from the
//! resolvent, freshens candidate rules, unifies their heads against the subgoal and propagates the
//! resulting substitution into the remaining goals and the tracked answer.
//!
//! Two strategies are provided here:
//!
//! - [`Solver::solve_one`] follows a single nondeterministic path: it picks subgoals at uniformly
//!   random positions and commits to the first rule (in program order) whose head unifies. It
//!   never backtracks and always terminates, but it may return a partially instantiated answer
//!   when its random path dead-ends.
//! - [`Solver::solve_all`] is a deterministic depth-first pass with FIFO goal selection. It also
//!   commits to the first unifying rule per subgoal and therefore explores only the leftmost
//!   derivation path, returning at most one solution.
//!
//! For a search that enumerates every solution by backtracking across rule choices, see
//! [`crate::search::query_dfs`].

use rand::Rng;
use tracing::{debug, trace};

use crate::ast::{Rule, Term};
use crate::fresh::VarSource;
use crate::unification::unify;

/// Default ceiling for the recursion depth of [`Solver::solve_all`].
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// A resolution engine over a program of [`Rule`]s.
///
/// Each solver owns its fresh-variable counter, so independent solvers never interfere, but all
/// queries run on the same solver instance share the counter and stay variable-disjoint from each
/// other.
#[derive(Debug, Default)]
pub struct Solver {
    vars: VarSource,
    max_depth: usize,
}

impl Solver {
    pub fn new() -> Solver {
        Solver::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a solver with a custom recursion ceiling for [`Solver::solve_all`]. A derivation
    /// branch deeper than this is abandoned as if no rule had matched.
    pub fn with_max_depth(max_depth: usize) -> Solver {
        Solver {
            vars: VarSource::new(),
            max_depth,
        }
    }

    /// Prove `goal` by following a single random resolution path.
    ///
    /// Each iteration removes one subgoal at a uniformly random position from the resolvent and
    /// tries the program rules in order. The first rule whose freshened head unifies is committed
    /// to: its body is spliced onto the resolvent and the unifying substitution is applied to both
    /// the answer and the resolvent. There is no backtracking; if no rule matches, the subgoal is
    /// dropped and the remaining goals are still processed.
    ///
    /// Returns the instantiated goal. When the random path dead-ends the answer may be partially
    /// (or not at all) instantiated; no failure is reported.
    pub fn solve_one(&mut self, program: &[Rule], goal: &[Term]) -> Vec<Term> {
        let mut rng = rand::thread_rng();
        let mut answer: Vec<Term> = goal.to_vec();
        let mut resolvent: Vec<Term> = goal.to_vec();

        while !resolvent.is_empty() {
            let chosen = resolvent.remove(rng.gen_range(0..resolvent.len()));
            trace!(goal = %chosen, "selected subgoal");
            for rule in program {
                let fresh = self.vars.freshen(rule);
                let Rule { head, tail } = fresh;
                match unify(&Term::App(head), &chosen) {
                    Ok(theta) => {
                        trace!(rule = %rule, "committed to rule");
                        resolvent.extend(tail);
                        theta.apply_all(&mut answer);
                        theta.apply_all(&mut resolvent);
                        break;
                    }
                    Err(_) => continue,
                }
            }
            // If no rule matched, the subgoal was already removed and is silently dropped; the
            // resolvent shrank by one either way, which is what guarantees termination.
        }
        debug!(answer = %display_goals(&answer), "random path finished");
        answer
    }

    /// Prove `goal` by a deterministic depth-first pass with FIFO goal selection.
    ///
    /// Per subgoal, the rules are tried in program order and the search recurses into the first
    /// one whose freshened head unifies, without returning to the later alternatives afterwards.
    /// The returned list therefore contains at most one instantiated goal, found along the
    /// leftmost derivation path, and is empty when that path fails.
    pub fn solve_all(&mut self, program: &[Rule], goal: &[Term]) -> Vec<Vec<Term>> {
        let mut solutions = Vec::new();
        self.dfs(program, goal.to_vec(), goal.to_vec(), &mut solutions, 0);
        solutions
    }

    fn dfs(
        &mut self,
        program: &[Rule],
        mut resolvent: Vec<Term>,
        goal: Vec<Term>,
        solutions: &mut Vec<Vec<Term>>,
        depth: usize,
    ) {
        if resolvent.is_empty() {
            debug!(answer = %display_goals(&goal), "solution found");
            solutions.push(goal);
            return;
        }
        if depth >= self.max_depth {
            debug!(depth, "depth ceiling reached, abandoning branch");
            return;
        }

        let chosen = resolvent.remove(0);
        for rule in program {
            let Rule { head, tail } = self.vars.freshen(rule);
            match unify(&Term::App(head), &chosen) {
                Err(_) => continue,
                Ok(theta) => {
                    let mut new_resolvent = resolvent.clone();
                    new_resolvent.extend(tail);
                    theta.apply_all(&mut new_resolvent);
                    let new_goal = goal.iter().map(|t| theta.apply(t)).collect();
                    // commit to the first match; remaining rules are not revisited
                    return self.dfs(program, new_resolvent, new_goal, solutions, depth + 1);
                }
            }
        }
    }
}

fn display_goals(goals: &[Term]) -> String {
    let rendered: Vec<String> = goals.iter().map(Term::to_string).collect();
    rendered.join(", ")
}
