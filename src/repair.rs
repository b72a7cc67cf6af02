//! Repair suggestions for conflicting rules.
//!
//! Two canonical transformations are proposed: direct left-recursion
//! elimination and left-factoring. Suggestions are textual, each new rule a
//! rendered production string; the analyzed grammar is never modified.

use std::collections::BTreeSet;
use std::fmt;

use crate::grammar::{Alternative, Grammar, Rule};
use crate::ll1::{Conflict, ConflictKind};
use crate::symbol::Symbol;

/// The transformation a suggestion applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    LeftRecursionElimination,
    LeftFactoring,
    NoAutomaticFix,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::LeftRecursionElimination => write!(f, "left-recursion elimination"),
            Technique::LeftFactoring => write!(f, "left factoring"),
            Technique::NoAutomaticFix => write!(f, "no automatic fix"),
        }
    }
}

/// A proposed repair for one conflicting head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The conflicting nonterminal.
    pub head: String,
    /// The kind of the conflict that triggered the suggestion.
    pub kind: ConflictKind,
    pub technique: Technique,
    /// Replacement productions, rendered as `LHS -> alt | alt` strings. For
    /// [`Technique::NoAutomaticFix`] this holds a single advisory message.
    pub new_rules: Vec<String>,
}

/// Produces one suggestion per conflicting head; the first conflict seen for
/// a head decides which kind the suggestion answers.
///
/// Left-recursion elimination is attempted only for FIRST/FIRST conflicts:
/// direct left recursion always collides FIRSTs, never FIRST with FOLLOW.
pub fn suggest_fixes(grammar: &Grammar, conflicts: &[Conflict]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for conflict in conflicts {
        let head = conflict.head();
        if !seen.insert(head) {
            continue;
        }
        let Some(rule) = grammar.rule(head) else {
            continue;
        };

        let kind = conflict.kind();
        let suggestion = match kind {
            ConflictKind::FirstFirst => match eliminate_left_recursion(grammar, rule) {
                Some(new_rules) => Suggestion {
                    head: head.to_string(),
                    kind,
                    technique: Technique::LeftRecursionElimination,
                    new_rules,
                },
                None => factor_or_give_up(grammar, rule, kind),
            },
            ConflictKind::FirstFollow => factor_or_give_up(grammar, rule, kind),
        };
        suggestions.push(suggestion);
    }

    suggestions
}

fn factor_or_give_up(grammar: &Grammar, rule: &Rule, kind: ConflictKind) -> Suggestion {
    match left_factor(grammar, rule) {
        Some(new_rules) => Suggestion {
            head: rule.head().to_string(),
            kind,
            technique: Technique::LeftFactoring,
            new_rules,
        },
        None => Suggestion {
            head: rule.head().to_string(),
            kind,
            technique: Technique::NoAutomaticFix,
            new_rules: vec![format!(
                "no mechanical transformation applies; {} may be intrinsically ambiguous",
                rule.head()
            )],
        },
    }
}

/// Rewrites `A -> A α | β` as `A -> β A'` plus `A' -> α A' | ε`.
///
/// Returns `None` when no alternative is directly left-recursive.
fn eliminate_left_recursion(grammar: &Grammar, rule: &Rule) -> Option<Vec<String>> {
    let head = rule.head();
    let (recursive, nonrecursive): (Vec<&Alternative>, Vec<&Alternative>) = rule
        .alternatives()
        .iter()
        .partition(|alt| starts_with(alt, head));
    if recursive.is_empty() {
        return None;
    }

    let mut taken = BTreeSet::new();
    let prime = fresh_name(grammar, head, &mut taken);

    let base_alts: Vec<String> = nonrecursive
        .iter()
        .map(|alt| format!("{} {}", render_symbols(alt.symbols()), prime))
        .collect();
    let mut tail_alts: Vec<String> = recursive
        .iter()
        .map(|alt| format!("{} {}", render_symbols(&alt.symbols()[1..]), prime))
        .collect();
    tail_alts.push("ε".to_string());

    Some(vec![
        format!("{} -> {}", head, base_alts.join(" | ")),
        format!("{} -> {}", prime, tail_alts.join(" | ")),
    ])
}

/// Factors the longest common prefix out of every group of alternatives that
/// share a first symbol.
///
/// Groups are keyed by the first symbol itself (variant and value), in
/// first-appearance order; ε alternatives form their own group. Returns
/// `None` when every group is a singleton and factoring would reproduce the
/// rule unchanged.
fn left_factor(grammar: &Grammar, rule: &Rule) -> Option<Vec<String>> {
    let mut groups: Vec<(&Symbol, Vec<&Alternative>)> = Vec::new();
    for alt in rule.alternatives() {
        let key = alt.first_symbol();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(alt),
            None => groups.push((key, vec![alt])),
        }
    }
    if groups.iter().all(|(_, members)| members.len() == 1) {
        return None;
    }

    let mut taken = BTreeSet::new();
    let mut single_alts: Vec<String> = Vec::new();
    let mut factored_alts: Vec<String> = Vec::new();
    let mut aux_rules: Vec<String> = Vec::new();

    for (_, members) in &groups {
        if let [only] = members.as_slice() {
            single_alts.push(render_symbols(only.symbols()));
            continue;
        }
        let prefix = longest_common_prefix(members);
        let prime = fresh_name(grammar, rule.head(), &mut taken);
        let tails: Vec<String> = members
            .iter()
            .map(|alt| render_symbols(&alt.symbols()[prefix.len()..]))
            .collect();
        factored_alts.push(format!("{} {}", render_symbols(prefix), prime));
        aux_rules.push(format!("{} -> {}", prime, tails.join(" | ")));
    }

    let mut main_alts = single_alts;
    main_alts.extend(factored_alts);
    let mut new_rules = vec![format!("{} -> {}", rule.head(), main_alts.join(" | "))];
    new_rules.extend(aux_rules);
    Some(new_rules)
}

fn starts_with(alt: &Alternative, head: &str) -> bool {
    matches!(alt.first_symbol(), Symbol::Nonterminal(name) if name == head)
}

/// Longest run of symbols on which all alternatives agree, position by
/// position. All callers pass groups sharing a first symbol, so the result
/// is never empty there.
fn longest_common_prefix<'a>(alts: &[&'a Alternative]) -> &'a [Symbol] {
    let reference = alts[0].symbols();
    let max_len = alts
        .iter()
        .map(|alt| alt.symbols().len())
        .min()
        .unwrap_or(0);

    let mut len = 0;
    while len < max_len && alts.iter().all(|alt| alt.symbols()[len] == reference[len]) {
        len += 1;
    }
    &reference[..len]
}

/// First unused primed variant of `head`: `A'`, then `A''`, and so on,
/// skipping nonterminals the grammar already has and names handed out
/// earlier for the same rule.
fn fresh_name(grammar: &Grammar, head: &str, taken: &mut BTreeSet<String>) -> String {
    let mut name = format!("{}'", head);
    while grammar.nonterminals().contains(&name) || taken.contains(&name) {
        name.push('\'');
    }
    taken.insert(name.clone());
    name
}

/// Renders a symbol run for a proposed production; the empty run reads as ε.
fn render_symbols(symbols: &[Symbol]) -> String {
    if symbols.is_empty() {
        return "ε".to_string();
    }
    symbols
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_name_skips_existing_nonterminals() {
        let grammar = Grammar::parse(
            "start: A\n\
             A -> A 'x' | 'y'\n\
             A' -> 'z'\n",
        )
        .unwrap();
        let mut taken = BTreeSet::new();
        assert_eq!(fresh_name(&grammar, "A", &mut taken), "A''");
        assert_eq!(fresh_name(&grammar, "A", &mut taken), "A'''");
    }

    #[test]
    fn test_common_prefix_stops_at_disagreement() {
        let grammar = Grammar::parse(
            "start: S\n\
             S -> 'a' 'b' 'c' | 'a' 'b' 'd'\n",
        )
        .unwrap();
        let alts: Vec<&Alternative> = grammar.rule("S").unwrap().alternatives().iter().collect();
        let prefix = longest_common_prefix(&alts);
        assert_eq!(render_symbols(prefix), "'a' 'b'");
    }
}
