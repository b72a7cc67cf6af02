//! Unit tests for FIRST and FOLLOW set computation

use std::collections::BTreeSet;

use ll1_workbench::first_follow::{compute_first_sets, compute_follow_sets, first_of_sequence};
use ll1_workbench::grammar::Grammar;
use ll1_workbench::symbol::{Lookahead, Symbol};

fn lit(s: &str) -> Lookahead {
    Lookahead::Literal(s.into())
}

fn tok(s: &str) -> Lookahead {
    Lookahead::Token(s.into())
}

fn set(items: &[Lookahead]) -> BTreeSet<Lookahead> {
    items.iter().cloned().collect()
}

const ARITHMETIC: &str = "\
start: E
E  -> T E'
E' -> '+' T E' | ε
T  -> F T'
T' -> '*' F T' | ε
F  -> '(' E ')' | id
";

#[test]
fn test_first_sets_of_arithmetic_grammar() {
    let grammar = Grammar::parse(ARITHMETIC).unwrap();
    let first = compute_first_sets(&grammar);

    let paren_or_id = set(&[lit("("), tok("id")]);
    assert_eq!(first["E"], paren_or_id);
    assert_eq!(first["T"], paren_or_id);
    assert_eq!(first["F"], paren_or_id);
    assert_eq!(first["E'"], set(&[lit("+"), Lookahead::Epsilon]));
    assert_eq!(first["T'"], set(&[lit("*"), Lookahead::Epsilon]));
}

#[test]
fn test_follow_sets_of_arithmetic_grammar() {
    let grammar = Grammar::parse(ARITHMETIC).unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    assert_eq!(follow["E"], set(&[lit(")"), Lookahead::End]));
    assert_eq!(follow["E'"], set(&[lit(")"), Lookahead::End]));
    assert_eq!(follow["T"], set(&[lit("+"), lit(")"), Lookahead::End]));
    assert_eq!(follow["T'"], set(&[lit("+"), lit(")"), Lookahead::End]));
    assert_eq!(
        follow["F"],
        set(&[lit("+"), lit("*"), lit(")"), Lookahead::End])
    );
}

#[test]
fn test_nullable_chain() {
    let grammar = Grammar::parse(
        "start: A\n\
         A -> B C\n\
         B -> 'b' | ε\n\
         C -> 'c' | ε\n",
    )
    .unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    assert_eq!(first["A"], set(&[lit("b"), lit("c"), Lookahead::Epsilon]));
    assert_eq!(follow["A"], set(&[Lookahead::End]));
    assert_eq!(follow["B"], set(&[lit("c"), Lookahead::End]));
    assert_eq!(follow["C"], set(&[Lookahead::End]));
}

#[test]
fn test_first_of_empty_sequence_is_epsilon() {
    let grammar = Grammar::parse("start: S\nS -> 'a'\n").unwrap();
    let first = compute_first_sets(&grammar);
    assert_eq!(first_of_sequence(&first, &[]), set(&[Lookahead::Epsilon]));
}

#[test]
fn test_first_of_sequence_stops_at_non_nullable() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> A B\n\
         A -> 'a' | ε\n\
         B -> 'b'\n",
    )
    .unwrap();
    let first = compute_first_sets(&grammar);

    let seq = [
        Symbol::Nonterminal("A".into()),
        Symbol::Nonterminal("B".into()),
    ];
    // A is nullable so FIRST(B) joins in, but ε itself does not survive.
    assert_eq!(first_of_sequence(&first, &seq), set(&[lit("a"), lit("b")]));

    let seq = [
        Symbol::Nonterminal("B".into()),
        Symbol::Nonterminal("A".into()),
    ];
    assert_eq!(first_of_sequence(&first, &seq), set(&[lit("b")]));
}

#[test]
fn test_undeclared_identifier_acts_as_terminal() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> id S | ε\n",
    )
    .unwrap();
    let first = compute_first_sets(&grammar);
    assert_eq!(first["S"], set(&[tok("id"), Lookahead::Epsilon]));
}

#[test]
fn test_follow_never_contains_epsilon() {
    let grammar = Grammar::parse(
        "start: A\n\
         A -> B C\n\
         B -> 'b' | ε\n\
         C -> 'c' | ε\n",
    )
    .unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    for (nt, follow_set) in &follow {
        assert!(
            !follow_set.contains(&Lookahead::Epsilon),
            "FOLLOW({nt}) contains ε"
        );
    }
    assert!(follow[grammar.start()].contains(&Lookahead::End));
}

#[test]
fn test_first_contains_epsilon_only_when_nullable() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> A 'x'\n\
         A -> 'a' | ε\n",
    )
    .unwrap();
    let first = compute_first_sets(&grammar);

    assert!(first["A"].contains(&Lookahead::Epsilon));
    // S always produces the 'x', so it is not nullable.
    assert!(!first["S"].contains(&Lookahead::Epsilon));
}
