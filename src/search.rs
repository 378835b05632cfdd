//! # A backtracking DFS search through the solution space of a query.
//!
//! In contrast to the single-path strategies of [`crate::solver`], the search in this module
//! enumerates every proof of a query: when a committed rule choice later fails, it backtracks to
//! the most recent choice point and resumes with the next rule. Goals are processed left-to-right,
//! rules are tried in program order, so solutions are discovered in the usual Prolog order.
//!
//! A depth-first search is very efficient for finite search spaces. The caveat is that this
//! approach is not complete: it might recurse endlessly in infinite search spaces where the rules
//! are left-recursive.

#[cfg(test)]
mod test;

use tracing::trace;

use crate::ast::{Query, Rule, Term};
use crate::fresh::VarSource;
use crate::unification::unify;

/// Enumerate the solutions of `query` against `program` using a backtracking depth-first-search.
///
/// The returned iterator yields one fully instantiated copy of the query's goals per proof found.
pub fn query_dfs<'p>(program: &'p [Rule], query: &Query) -> SolutionIter<'p> {
    SolutionIter {
        program,
        // reverse so that the leftmost goal ends up on the top of the stack
        unresolved_goals: query.goals.iter().rev().cloned().collect(),
        checkpoints: vec![],
        goals: query.goals.clone(),
        vars: VarSource::new(),
        vacuous: query.goals.is_empty(),
    }
}

/// Iterator over all solutions of a query, in depth-first discovery order.
pub struct SolutionIter<'p> {
    program: &'p [Rule],
    /// Subgoals still to be proven on the current branch, leftmost goal on top.
    unresolved_goals: Vec<Term>,
    /// Choice points that can still be resumed with further rules.
    checkpoints: Vec<Checkpoint>,
    /// The query goals, instantiated as far as the current branch determined them.
    goals: Vec<Term>,
    vars: VarSource,
    /// True until the single empty solution of an empty query has been reported.
    vacuous: bool,
}

/// A solver checkpoint that can be restored for trying the next alternative rule of a goal.
struct Checkpoint {
    /// The subgoal this choice point is about.
    goal: Term,
    /// Index of the next program rule to try for `goal`.
    next_rule: usize,
    /// The unresolved goals as they were when `goal` was selected (with `goal` already removed).
    goals_snapshot: Vec<Term>,
    /// The instantiated query goals at the time of the snapshot.
    answer_snapshot: Vec<Term>,
}

/// Outcome of a single solver step, exposed for callers that need to interleave the search with
/// other work (e.g. checking for user interruption).
pub enum Step {
    /// A solution was found, retrieve it via [`SolutionIter::get_solution`].
    Yield,
    /// The search advanced but has not produced a solution yet.
    Continue,
    /// The whole search space is exhausted.
    Done,
}

impl<'p> SolutionIter<'p> {
    /// Perform a single step of the search.
    pub fn step(&mut self) -> Step {
        // an empty conjunction holds vacuously and has nothing to backtrack into
        if self.vacuous {
            self.vacuous = false;
            return Step::Yield;
        }
        if let Some(goal) = self.unresolved_goals.pop() {
            trace!(goal = %goal, "expanding subgoal");
            let checkpoint = Checkpoint {
                goal,
                next_rule: 0,
                goals_snapshot: self.unresolved_goals.clone(),
                answer_snapshot: self.goals.clone(),
            };
            self.checkpoints.push(checkpoint);
        }
        if self.backtrack_resume() {
            // found a choice to commit to
            if self.unresolved_goals.is_empty() {
                Step::Yield
            } else {
                Step::Continue
            }
        } else {
            // couldn't backtrack to any possible choice, we're done
            Step::Done
        }
    }

    /// The current solution, i.e. the query goals instantiated by the branch that just yielded.
    pub fn get_solution(&self) -> Vec<Term> {
        self.goals.clone()
    }

    /// Try the next alternative rules of the top-most checkpoint. On success the working state is
    /// rebuilt from the checkpoint's snapshots with the new substitution applied; on exhaustion
    /// the checkpoint is discarded and its goal is put back.
    fn resume_checkpoint(&mut self) -> bool {
        loop {
            let rule_index = {
                let checkpoint = self
                    .checkpoints
                    .last_mut()
                    .expect("invariant: there is always a checkpoint when this is called");
                if checkpoint.next_rule >= self.program.len() {
                    break;
                }
                let index = checkpoint.next_rule;
                checkpoint.next_rule += 1;
                index
            };
            let Rule { head, tail } = self.vars.freshen(&self.program[rule_index]);
            let checkpoint = self.checkpoints.last().expect("still present");
            match unify(&Term::App(head), &checkpoint.goal) {
                Ok(theta) => {
                    self.unresolved_goals = checkpoint.goals_snapshot.clone();
                    // the freshened body goes on top of the stack, leftmost goal on top
                    self.unresolved_goals.extend(tail.into_iter().rev());
                    // resolve rather than apply: a variable inside a compound binding value may
                    // have been bound later within the same unification, and yielded solutions
                    // must not contain such half-instantiated terms
                    theta.resolve_all(&mut self.unresolved_goals);
                    self.goals = checkpoint
                        .answer_snapshot
                        .iter()
                        .map(|t| theta.resolve(t))
                        .collect();
                    return true;
                }
                Err(_) => continue,
            }
        }
        // checkpoint exhausted, restore its snapshot and put the goal back
        let discarded = self.checkpoints.pop().expect("we know there is one here");
        self.unresolved_goals = discarded.goals_snapshot;
        self.unresolved_goals.push(discarded.goal);
        self.goals = discarded.answer_snapshot;
        false
    }

    /// Backtrack to the first checkpoint that still has an untried alternative.
    fn backtrack_resume(&mut self) -> bool {
        while !self.checkpoints.is_empty() {
            if self.resume_checkpoint() {
                return true;
            }
            // checkpoint was exhausted and discarded, loop to the one below
        }
        false
    }
}

impl<'p> Iterator for SolutionIter<'p> {
    type Item = Vec<Term>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Yield => break Some(self.get_solution()),
                Step::Continue => continue,
                Step::Done => break None,
            }
        }
    }
}
