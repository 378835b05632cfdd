use super::*;
use crate::ast::*;

fn genealogy_program() -> Vec<Rule> {
    /*

    parent(alice, carol).
    parent(bob, carol).

    parent(carol, eve).
    parent(dave, eve).

    parent(carol, faithe).
    parent(dave, faithe).

    grandparent(X, Y) :- parent(X, Z), parent(Z, Y).

    siblings(X, Y) :- parent(Z, X), parent(Z, Y).

    */
    vec![
        Rule::fact("parent", vec![atom("alice"), atom("carol")]),
        Rule::fact("parent", vec![atom("bob"), atom("carol")]),
        Rule::fact("parent", vec![atom("carol"), atom("eve")]),
        Rule::fact("parent", vec![atom("dave"), atom("eve")]),
        Rule::fact("parent", vec![atom("carol"), atom("faithe")]),
        Rule::fact("parent", vec![atom("dave"), atom("faithe")]),
        Rule::fact("grandparent", vec![var("X"), var("Y")])
            .when("parent", vec![var("X"), var("Z")])
            .when("parent", vec![var("Z"), var("Y")]),
        Rule::fact("siblings", vec![var("X"), var("Y")])
            .when("parent", vec![var("Z"), var("X")])
            .when("parent", vec![var("Z"), var("Y")]),
    ]
}

#[test]
fn genealogy() {
    let program = genealogy_program();

    // query all known grandparents of eve
    let solutions: Vec<_> =
        query_dfs(&program, &Query::new("grandparent", vec![var("X"), atom("eve")])).collect();
    assert_eq!(
        solutions,
        vec![
            vec![app("grandparent", vec![atom("alice"), atom("eve")])],
            vec![app("grandparent", vec![atom("bob"), atom("eve")])],
        ]
    );

    // query all grandchildren of bob
    let solutions: Vec<_> =
        query_dfs(&program, &Query::new("grandparent", vec![atom("bob"), var("X")])).collect();
    assert_eq!(
        solutions,
        vec![
            vec![app("grandparent", vec![atom("bob"), atom("eve")])],
            vec![app("grandparent", vec![atom("bob"), atom("faithe")])],
        ]
    );

    // query all siblings of eve
    let solutions: Vec<_> =
        query_dfs(&program, &Query::new("siblings", vec![atom("eve"), var("X")])).collect();
    assert_eq!(
        solutions,
        vec![
            // one solution for each path taken
            vec![app("siblings", vec![atom("eve"), atom("eve")])],
            vec![app("siblings", vec![atom("eve"), atom("faithe")])],
            vec![app("siblings", vec![atom("eve"), atom("eve")])],
            vec![app("siblings", vec![atom("eve"), atom("faithe")])],
        ]
    );
}

#[test]
fn arithmetic() {
    /*

    is_natural(z).
    is_natural(s(X)) :- is_natural(X).

    add(X, z, X) :- is_natural(X).
    add(X, s(Y), s(Z)) :- add(X, Y, Z).

    */
    let s = |t: Term| app("s", vec![t]);
    let z = || atom("z");

    let program = vec![
        Rule::fact("is_natural", vec![z()]),
        Rule::fact("is_natural", vec![s(var("X"))]).when("is_natural", vec![var("X")]),
        Rule::fact("add", vec![var("X"), z(), var("X")]).when("is_natural", vec![var("X")]),
        Rule::fact("add", vec![var("X"), s(var("Y")), s(var("Z"))])
            .when("add", vec![var("X"), var("Y"), var("Z")]),
    ];

    // query the first natural numbers
    let solutions: Vec<_> = query_dfs(&program, &Query::new("is_natural", vec![var("X")]))
        .take(3)
        .collect();
    assert_eq!(
        solutions,
        vec![
            vec![app("is_natural", vec![z()])],
            vec![app("is_natural", vec![s(z())])],
            vec![app("is_natural", vec![s(s(z()))])],
        ]
    );

    // compute 2 + 1
    let query = Query::new("add", vec![s(s(z())), s(z()), var("X")]);
    let solutions: Vec<_> = query_dfs(&program, &query).collect();
    assert_eq!(
        solutions,
        vec![vec![app("add", vec![s(s(z())), s(z()), s(s(s(z())))])]]
    );

    // compute 3 - 2
    let query = Query::new("add", vec![var("X"), s(s(z())), s(s(s(z())))]);
    let solutions: Vec<_> = query_dfs(&program, &query).collect();
    assert_eq!(
        solutions,
        vec![vec![app("add", vec![s(z()), s(s(z())), s(s(s(z())))])]]
    );
}

#[test]
fn likes_scenario() {
    // likes(mary, wine).
    // likes(X, wine) :- person(X).
    // person(john).
    let program = vec![
        Rule::fact("likes", vec![atom("mary"), atom("wine")]),
        Rule::fact("likes", vec![var("X"), atom("wine")]).when("person", vec![var("X")]),
        Rule::fact("person", vec![atom("john")]),
    ];

    // unlike the single-path strategies, the backtracking search finds both answers
    let solutions: Vec<_> =
        query_dfs(&program, &Query::new("likes", vec![var("Y"), atom("wine")])).collect();
    assert_eq!(
        solutions,
        vec![
            vec![app("likes", vec![atom("mary"), atom("wine")])],
            vec![app("likes", vec![atom("john"), atom("wine")])],
        ]
    );
}

#[test]
fn solutions_are_fully_instantiated() {
    // q(f(Y), Y).
    let program = vec![Rule::fact(
        "q",
        vec![app("f", vec![var("Y")]), var("Y")],
    )];

    // unifying q(X, a) binds X to f(_) before the inner variable gets its own binding; the
    // yielded solution must still be the fully instantiated q(f(a), a)
    let query = Query::new("q", vec![var("X"), atom("a")]);
    let solutions: Vec<_> = query_dfs(&program, &query).collect();
    assert_eq!(
        solutions,
        vec![vec![app("q", vec![app("f", vec![atom("a")]), atom("a")])]]
    );
    assert!(solutions.iter().flatten().all(Term::is_ground));
}

#[test]
fn empty_queries_are_vacuously_true() {
    let program = genealogy_program();
    let solutions: Vec<_> = query_dfs(&program, &Query::empty()).collect();
    assert_eq!(solutions, vec![Vec::<Term>::new()]);
}

#[test]
fn unprovable_queries_yield_nothing() {
    let program = vec![Rule::fact("likes", vec![atom("mary"), atom("wine")])];
    let solutions: Vec<_> =
        query_dfs(&program, &Query::new("likes", vec![atom("mary"), atom("beer")])).collect();
    assert!(solutions.is_empty());
}

#[test]
fn conjunctions_share_bindings_across_goals() {
    let program = genealogy_program();
    let query = Query::new("parent", vec![var("P"), atom("carol")])
        .and("parent", vec![var("P"), atom("eve")]);
    // nobody is a parent of both carol and eve
    assert_eq!(query_dfs(&program, &query).count(), 0);

    let query = Query::new("parent", vec![var("P"), atom("eve")])
        .and("parent", vec![var("P"), atom("faithe")]);
    let solutions: Vec<_> = query_dfs(&program, &query).collect();
    assert_eq!(
        solutions,
        vec![
            vec![
                app("parent", vec![atom("carol"), atom("eve")]),
                app("parent", vec![atom("carol"), atom("faithe")]),
            ],
            vec![
                app("parent", vec![atom("dave"), atom("eve")]),
                app("parent", vec![atom("dave"), atom("faithe")]),
            ],
        ]
    );
}
