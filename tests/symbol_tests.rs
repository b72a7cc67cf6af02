//! Unit tests for the symbol module

use ll1_workbench::symbol::{Lookahead, Symbol};

#[test]
fn test_symbol_queries() {
    assert!(Symbol::Nonterminal("Expr".into()).is_nonterminal());
    assert!(Symbol::NamedTerminal("ID".into()).is_terminal());
    assert!(Symbol::InlineTerminal("+".into()).is_terminal());
    assert!(Symbol::Epsilon.is_epsilon());
    // ε counts as terminal; only Nonterminal does not.
    assert!(Symbol::Epsilon.is_terminal());
    assert!(!Symbol::Nonterminal("E".into()).is_terminal());
}

#[test]
fn test_symbol_display() {
    assert_eq!(Symbol::Nonterminal("E'".into()).to_string(), "E'");
    assert_eq!(Symbol::NamedTerminal("NUMBER".into()).to_string(), "NUMBER");
    assert_eq!(Symbol::InlineTerminal(":=".into()).to_string(), "':='");
    assert_eq!(Symbol::Epsilon.to_string(), "ε");
}

#[test]
fn test_symbol_value() {
    assert_eq!(Symbol::InlineTerminal("+".into()).value(), "+");
    assert_eq!(Symbol::Epsilon.value(), "ε");
}

#[test]
fn test_lookahead_display() {
    assert_eq!(Lookahead::Token("id".into()).to_string(), "id");
    assert_eq!(Lookahead::Literal("(".into()).to_string(), "'('");
    assert_eq!(Lookahead::Epsilon.to_string(), "ε");
    assert_eq!(Lookahead::End.to_string(), "$");
}

#[test]
fn test_lookahead_ordering() {
    // Terminals sort before ε, and ε before $.
    assert!(Lookahead::Token("z".into()) < Lookahead::Epsilon);
    assert!(Lookahead::Epsilon < Lookahead::End);
    assert!(Lookahead::Literal("a".into()) < Lookahead::Token("b".into()));
    // Same value: the literal wins the tie.
    assert!(Lookahead::Literal("x".into()) < Lookahead::Token("x".into()));
}

#[test]
fn test_literal_and_token_stay_distinct() {
    let mut set = std::collections::BTreeSet::new();
    set.insert(Lookahead::Token("x".into()));
    set.insert(Lookahead::Literal("x".into()));
    assert_eq!(set.len(), 2);
}
