//! Grammar model: alternatives, rules, token declarations, and the grammar
//! itself with its derived symbol sets.
//!
//! A [`Grammar`] is built once (by the reader or programmatically) and is
//! immutable afterwards; every analysis stage works on shared borrows.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Result, WorkbenchError};
use crate::reader;
use crate::symbol::{Lookahead, Symbol};

/// One alternative of a rule: an ordered sequence of symbols.
///
/// The empty sequence is normalized to a single explicit ε symbol, and ε
/// symbols are dropped from longer sequences, so every nullable alternative
/// has exactly the shape `[ε]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alternative {
    symbols: Vec<Symbol>,
}

impl Alternative {
    /// Creates an alternative, normalizing the placement of ε.
    pub fn new(mut symbols: Vec<Symbol>) -> Self {
        if symbols.len() > 1 {
            symbols.retain(|sym| !sym.is_epsilon());
        }
        if symbols.is_empty() {
            symbols.push(Symbol::Epsilon);
        }
        Self { symbols }
    }

    /// The symbols of this alternative, in order. Never empty.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The leading symbol.
    pub fn first_symbol(&self) -> &Symbol {
        &self.symbols[0]
    }

    /// Checks if this is the explicit ε alternative.
    pub fn is_epsilon(&self) -> bool {
        self.symbols.len() == 1 && self.symbols[0].is_epsilon()
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sym) in self.symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

/// A rule: a head nonterminal and its ordered, non-empty alternatives.
///
/// Alternative order is observable downstream (conflict reports and
/// multi-entry table cells preserve it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    head: String,
    alternatives: Vec<Alternative>,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(head: impl Into<String>, alternatives: Vec<Alternative>) -> Self {
        Self {
            head: head.into(),
            alternatives,
        }
    }

    /// The head nonterminal name.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// The alternatives, in declaration order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.head)?;
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", alt)?;
        }
        Ok(())
    }
}

/// A named terminal bound to a regular-expression pattern.
///
/// The pattern is an opaque string at this layer; only the name takes part
/// in the analysis. The pattern is carried along for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDecl {
    /// The terminal name.
    pub name: String,
    /// The regular-expression source, without its `/` delimiters.
    pub pattern: String,
}

/// A context-free grammar: start symbol, rules, and token declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    rules: Vec<Rule>,
    token_decls: Vec<TokenDecl>,
    nonterminals: BTreeSet<String>,
    terminals: BTreeSet<Lookahead>,
    rule_index: BTreeMap<String, usize>,
}

impl Grammar {
    /// Parses a grammar from specification text.
    pub fn parse(source: &str) -> Result<Self> {
        reader::parse_spec(source)
    }

    /// Builds a grammar from parts.
    ///
    /// Rules that share a head are merged into one logical rule, the later
    /// occurrences appending their alternatives in order. Fails with
    /// [`WorkbenchError::EmptyGrammar`] when no rules are given and with
    /// [`WorkbenchError::UndeclaredStartSymbol`] when the start symbol heads
    /// no rule.
    pub fn new(
        start: impl Into<String>,
        rules: Vec<Rule>,
        token_decls: Vec<TokenDecl>,
    ) -> Result<Self> {
        let start = start.into();
        if rules.is_empty() {
            return Err(WorkbenchError::EmptyGrammar);
        }

        let mut merged: Vec<Rule> = Vec::new();
        let mut rule_index: BTreeMap<String, usize> = BTreeMap::new();
        for rule in rules {
            if let Some(&i) = rule_index.get(rule.head()) {
                let Rule { alternatives, .. } = rule;
                merged[i].alternatives.extend(alternatives);
            } else {
                rule_index.insert(rule.head.clone(), merged.len());
                merged.push(rule);
            }
        }

        let nonterminals: BTreeSet<String> = merged.iter().map(|r| r.head.clone()).collect();
        if !nonterminals.contains(&start) {
            return Err(WorkbenchError::UndeclaredStartSymbol { name: start });
        }

        let mut terminals: BTreeSet<Lookahead> = token_decls
            .iter()
            .map(|decl| Lookahead::Token(decl.name.clone()))
            .collect();
        for rule in &merged {
            for alt in &rule.alternatives {
                for sym in alt.symbols() {
                    match sym {
                        Symbol::NamedTerminal(_) | Symbol::InlineTerminal(_) => {
                            terminals.extend(sym.lookahead());
                        }
                        // Identifiers that head no rule act as terminals.
                        Symbol::Nonterminal(name) if !nonterminals.contains(name) => {
                            terminals.insert(Lookahead::Token(name.clone()));
                        }
                        _ => {}
                    }
                }
            }
        }

        Ok(Self {
            start,
            rules: merged,
            token_decls,
            nonterminals,
            terminals,
            rule_index,
        })
    }

    /// The declared start symbol.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// All rules, one per head, in declaration order of first occurrence.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The rule headed by the given nonterminal.
    pub fn rule(&self, head: &str) -> Option<&Rule> {
        self.rule_index.get(head).map(|&i| &self.rules[i])
    }

    /// Token declarations, in declaration order.
    pub fn token_decls(&self) -> &[TokenDecl] {
        &self.token_decls
    }

    /// All nonterminals: the set of rule heads.
    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    /// All terminals: declared token names, named and inline terminals used
    /// in productions, and undeclared identifiers rescued as terminals.
    pub fn terminals(&self) -> &BTreeSet<Lookahead> {
        &self.terminals
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
