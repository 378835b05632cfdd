//! A small tour of the solver API on a family-tree program.

use minilog::textual::TextualProgram;
use minilog::{query_dfs, Solver};

fn main() {
    tracing_subscriber::fmt::init();

    let mut program = TextualProgram::new();
    program
        .load_str(
            r#"
            parent(alice, carol).
            parent(bob, carol).
            parent(carol, eve).
            parent(dave, eve).

            grandparent(X, Y) :- parent(X, Z), parent(Z, Y).
            "#,
        )
        .expect("program should parse");

    // Enumerate all grandparents of eve with the backtracking search.
    let query = program
        .prepare_query("grandparent(X, eve).")
        .expect("query should parse");
    println!("All solutions of {}", query);
    for solution in query_dfs(program.rules(), &query) {
        for goal in solution {
            println!("  {}", goal);
        }
    }

    // The single-path strategies commit to one derivation each.
    let mut solver = Solver::new();
    let one = solver.solve_one(program.rules(), &query.goals);
    println!("One random path leads to:");
    for goal in one {
        println!("  {}", goal);
    }

    let all = solver.solve_all(program.rules(), &query.goals);
    println!("The leftmost path leads to:");
    for solution in all {
        for goal in solution {
            println!("  {}", goal);
        }
    }
}
