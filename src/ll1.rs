//! LL(1) conflict detection and predictive parse table construction.
//!
//! Conflicts are not errors here: the checker reports every one of them and
//! the table builder still runs, keeping all colliding entries so consumers
//! can see exactly which cells are ambiguous.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;

use crate::first_follow::{FirstMap, FollowMap, first_of_sequence};
use crate::grammar::{Alternative, Grammar};
use crate::symbol::Lookahead;

/// The two ways a grammar can fail the LL(1) condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    FirstFirst,
    FirstFollow,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::FirstFirst => write!(f, "FIRST/FIRST"),
            ConflictKind::FirstFollow => write!(f, "FIRST/FOLLOW"),
        }
    }
}

/// A detected LL(1) conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Two alternatives of the same head can begin with the same terminal.
    FirstFirst {
        head: String,
        alt_a: Alternative,
        alt_b: Alternative,
        symbols: BTreeSet<Lookahead>,
    },
    /// A nullable alternative is ambiguous against FOLLOW of its head.
    FirstFollow {
        head: String,
        alt: Alternative,
        symbols: BTreeSet<Lookahead>,
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::FirstFirst { .. } => ConflictKind::FirstFirst,
            Conflict::FirstFollow { .. } => ConflictKind::FirstFollow,
        }
    }

    pub fn head(&self) -> &str {
        match self {
            Conflict::FirstFirst { head, .. } | Conflict::FirstFollow { head, .. } => head,
        }
    }

    /// The terminals on which the prediction is ambiguous.
    pub fn symbols(&self) -> &BTreeSet<Lookahead> {
        match self {
            Conflict::FirstFirst { symbols, .. } | Conflict::FirstFollow { symbols, .. } => symbols,
        }
    }
}

/// Checks every rule for LL(1) conflicts.
///
/// For a head A with alternatives α₁…αₖ:
/// - every pair (i, j), i < j, with overlapping ε-free FIRSTs is a
///   FIRST/FIRST conflict on the overlap;
/// - every nullable αᵢ is a FIRST/FOLLOW conflict on
///   ((FIRST(αᵢ) \ {ε}) ∩ FOLLOW(A)) ∪ (FOLLOW(A) ∩ ⋃_{j≠i} FIRST(αⱼ) \ {ε})
///   when that union is non-empty.
///
/// The second test is deliberately broader than the textbook one: it also
/// surfaces the ambiguity between the nullable alternative and any sibling
/// whose FIRST overlaps FOLLOW(A).
///
/// Conflicts come out in a fixed order: rules in declaration order, then
/// FIRST/FIRST pairs lexicographically, then nullable alternatives by index.
pub fn check_ll1(grammar: &Grammar, first: &FirstMap, follow: &FollowMap) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for rule in grammar.rules() {
        let alts = rule.alternatives();
        let alt_firsts: Vec<BTreeSet<Lookahead>> = alts
            .iter()
            .map(|alt| first_of_sequence(first, alt.symbols()))
            .collect();
        let follow_head = follow.get(rule.head()).unwrap();

        for i in 0..alts.len() {
            for j in (i + 1)..alts.len() {
                let overlap: BTreeSet<Lookahead> = alt_firsts[i]
                    .intersection(&alt_firsts[j])
                    .filter(|la| !la.is_epsilon())
                    .cloned()
                    .collect();
                if !overlap.is_empty() {
                    conflicts.push(Conflict::FirstFirst {
                        head: rule.head().to_string(),
                        alt_a: alts[i].clone(),
                        alt_b: alts[j].clone(),
                        symbols: overlap,
                    });
                }
            }
        }

        for (i, alt_first) in alt_firsts.iter().enumerate() {
            if !alt_first.contains(&Lookahead::Epsilon) {
                continue;
            }

            let mut sibling_firsts: BTreeSet<Lookahead> = BTreeSet::new();
            for (j, other) in alt_firsts.iter().enumerate() {
                if j != i {
                    sibling_firsts.extend(other.iter().filter(|la| !la.is_epsilon()).cloned());
                }
            }

            let mut overlap: BTreeSet<Lookahead> = follow_head
                .intersection(&sibling_firsts)
                .cloned()
                .collect();
            overlap.extend(
                alt_first
                    .iter()
                    .filter(|la| !la.is_epsilon() && follow_head.contains(*la))
                    .cloned(),
            );

            if !overlap.is_empty() {
                conflicts.push(Conflict::FirstFollow {
                    head: rule.head().to_string(),
                    alt: alts[i].clone(),
                    symbols: overlap,
                });
            }
        }
    }

    debug!("LL(1) check found {} conflict(s)", conflicts.len());
    conflicts
}

/// The predictive parse table.
///
/// Every alternative placed into a cell stays there; a cell holding more
/// than one alternative encodes an unresolved conflict rather than being
/// overwritten or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseTable {
    rows: BTreeMap<String, BTreeMap<Lookahead, Vec<Alternative>>>,
}

impl ParseTable {
    fn push(&mut self, head: &str, lookahead: Lookahead, alt: &Alternative) {
        self.rows
            .entry(head.to_string())
            .or_default()
            .entry(lookahead)
            .or_default()
            .push(alt.clone());
    }

    /// The alternatives predicted for `head` on `lookahead`; empty when the
    /// cell is blank.
    pub fn get(&self, head: &str, lookahead: &Lookahead) -> &[Alternative] {
        self.rows
            .get(head)
            .and_then(|row| row.get(lookahead))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of entries across all cells.
    pub fn entry_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Checks whether any cell holds more than one alternative.
    pub fn has_conflicts(&self) -> bool {
        self.rows
            .values()
            .flat_map(BTreeMap::values)
            .any(|cell| cell.len() > 1)
    }

    /// Iterates all non-empty cells in (head, lookahead) order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Lookahead, &[Alternative])> {
        self.rows.iter().flat_map(|(head, row)| {
            row.iter()
                .map(move |(la, alts)| (head.as_str(), la, alts.as_slice()))
        })
    }
}

/// Builds the predictive parse table.
///
/// For each rule A → α: α is placed under (A, t) for every
/// t ∈ FIRST(α) \ {ε}, and, when α is nullable, under (A, t) for every
/// t ∈ FOLLOW(A) including $.
pub fn build_parse_table(grammar: &Grammar, first: &FirstMap, follow: &FollowMap) -> ParseTable {
    let mut table = ParseTable::default();

    for rule in grammar.rules() {
        for alt in rule.alternatives() {
            let alt_first = first_of_sequence(first, alt.symbols());

            for la in alt_first.iter().filter(|la| !la.is_epsilon()) {
                table.push(rule.head(), la.clone(), alt);
            }

            if alt_first.contains(&Lookahead::Epsilon) {
                for la in follow.get(rule.head()).unwrap() {
                    table.push(rule.head(), la.clone(), alt);
                }
            }
        }
    }

    debug!("parse table built with {} entries", table.entry_count());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::{compute_first_sets, compute_follow_sets};

    fn analyze(source: &str) -> (Grammar, FirstMap, FollowMap) {
        let grammar = Grammar::parse(source).unwrap();
        let first = compute_first_sets(&grammar);
        let follow = compute_follow_sets(&grammar, &first);
        (grammar, first, follow)
    }

    #[test]
    fn test_conflict_free_grammar_has_unique_cells() {
        let (grammar, first, follow) = analyze(
            "start: S\n\
             S -> 'a' B\n\
             B -> 'b' | ε\n",
        );
        assert!(check_ll1(&grammar, &first, &follow).is_empty());
        let table = build_parse_table(&grammar, &first, &follow);
        assert!(!table.has_conflicts());
    }

    #[test]
    fn test_colliding_entries_are_preserved() {
        let (grammar, first, follow) = analyze(
            "start: S\n\
             S -> 'a' 'b' | 'a' 'c'\n",
        );
        let conflicts = check_ll1(&grammar, &first, &follow);
        assert_eq!(conflicts.len(), 1);
        let table = build_parse_table(&grammar, &first, &follow);
        assert_eq!(table.get("S", &Lookahead::Literal("a".into())).len(), 2);
    }
}
