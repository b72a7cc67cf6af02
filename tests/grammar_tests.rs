//! Unit tests for the specification reader and the grammar model

use ll1_workbench::error::WorkbenchError;
use ll1_workbench::grammar::Grammar;
use ll1_workbench::symbol::{Lookahead, Symbol};

#[test]
fn test_parse_simple_grammar() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> 'a' B\n\
         B -> 'b'\n",
    )
    .unwrap();

    assert_eq!(grammar.start(), "S");
    assert_eq!(grammar.rules().len(), 2);
    assert!(grammar.nonterminals().contains("S"));
    assert!(grammar.nonterminals().contains("B"));
    assert!(grammar.terminals().contains(&Lookahead::Literal("a".into())));
}

#[test]
fn test_parse_alternatives_preserve_order() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> 'a' | 'b' | 'c'\n",
    )
    .unwrap();

    let rule = grammar.rule("S").unwrap();
    assert_eq!(rule.alternatives().len(), 3);
    assert_eq!(rule.to_string(), "S -> 'a' | 'b' | 'c'");
}

#[test]
fn test_symbol_classification_in_productions() {
    let grammar = Grammar::parse(
        "start: Expr\n\
         Expr -> Term ID 'plus' id ε\n\
         Term -> 'x'\n",
    )
    .unwrap();

    let rule = grammar.rule("Expr").unwrap();
    let symbols = rule.alternatives()[0].symbols();
    assert_eq!(symbols[0], Symbol::Nonterminal("Term".into()));
    assert_eq!(symbols[1], Symbol::NamedTerminal("ID".into()));
    assert_eq!(symbols[2], Symbol::InlineTerminal("plus".into()));
    // `id` heads no rule; it stays a Nonterminal symbol but is counted as a
    // terminal of the grammar.
    assert_eq!(symbols[3], Symbol::Nonterminal("id".into()));
    assert!(grammar.terminals().contains(&Lookahead::Token("id".into())));
    // The stray ε was dropped from the multi-symbol alternative.
    assert_eq!(symbols.len(), 4);
}

#[test]
fn test_unicode_arrow_and_epsilon_keyword() {
    let grammar = Grammar::parse(
        "start: S\n\
         S → 'a' S | epsilon\n",
    )
    .unwrap();

    let rule = grammar.rule("S").unwrap();
    assert_eq!(rule.alternatives().len(), 2);
    assert!(rule.alternatives()[1].is_epsilon());
}

#[test]
fn test_comments_and_blank_lines() {
    let grammar = Grammar::parse(
        "# a demonstration grammar\n\
         start: S\n\
         \n\
         # the only rule\n\
         S -> 'a'   # trailing comment\n\
         \n",
    )
    .unwrap();
    assert_eq!(grammar.rules().len(), 1);
}

#[test]
fn test_token_declarations() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> ID | NUMBER\n\
         ID = /[a-z]+/\n\
         NUMBER = /[0-9]+/\n",
    )
    .unwrap();

    assert_eq!(grammar.token_decls().len(), 2);
    assert_eq!(grammar.token_decls()[0].name, "ID");
    assert_eq!(grammar.token_decls()[0].pattern, "[a-z]+");
    assert!(grammar.terminals().contains(&Lookahead::Token("ID".into())));
    assert!(
        grammar
            .terminals()
            .contains(&Lookahead::Token("NUMBER".into()))
    );
}

#[test]
fn test_duplicate_heads_union() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> 'a'\n\
         B -> 'b'\n\
         S -> 'c'\n",
    )
    .unwrap();

    assert_eq!(grammar.rules().len(), 2);
    assert_eq!(grammar.rule("S").unwrap().to_string(), "S -> 'a' | 'c'");
    // First occurrence keeps its position.
    assert_eq!(grammar.rules()[0].head(), "S");
    assert_eq!(grammar.rules()[1].head(), "B");
}

#[test]
fn test_empty_alternative_reads_as_epsilon() {
    let grammar = Grammar::parse(
        "start: S\n\
         S -> 'a' |\n",
    )
    .unwrap();

    let rule = grammar.rule("S").unwrap();
    assert_eq!(rule.alternatives().len(), 2);
    assert!(rule.alternatives()[1].is_epsilon());
}

#[test]
fn test_undeclared_start_is_rejected() {
    let err = Grammar::parse(
        "start: S\n\
         A -> 'a'\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        WorkbenchError::UndeclaredStartSymbol { name } if name == "S"
    ));
}

#[test]
fn test_empty_grammar_is_rejected() {
    let err = Grammar::parse("start: S\n").unwrap_err();
    assert!(matches!(err, WorkbenchError::EmptyGrammar));
}

#[test]
fn test_syntax_error_carries_line() {
    let err = Grammar::parse(
        "start: S\n\
         S -> 'a'\n\
         | 'b'\n",
    )
    .unwrap_err();
    assert!(matches!(err, WorkbenchError::Syntax { line: 3, .. }));
}

#[test]
fn test_lexical_error_is_reported() {
    let err = Grammar::parse("start: S\nS -> @\n").unwrap_err();
    assert!(matches!(
        err,
        WorkbenchError::Lexical { line: 2, found: '@' }
    ));
}

#[test]
fn test_grammar_display_lists_rules() {
    let grammar = Grammar::parse(
        "start: E\n\
         E -> T E'\n\
         E' -> '+' T E' | ε\n\
         T -> id\n",
    )
    .unwrap();
    assert_eq!(
        grammar.to_string(),
        "E -> T E'\nE' -> '+' T E' | ε\nT -> id\n"
    );
}
