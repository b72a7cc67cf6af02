//! FIRST and FOLLOW set computation.
//!
//! Both computations are fixed-point iterations: sets are finite and only
//! ever grow, so repeating full passes until nothing changes terminates.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::grammar::Grammar;
use crate::symbol::{Lookahead, Symbol};

/// FIRST sets of every nonterminal. May contain ε.
pub type FirstMap = BTreeMap<String, BTreeSet<Lookahead>>;

/// FOLLOW sets of every nonterminal. Never contains ε; FOLLOW of the start
/// symbol always contains $.
pub type FollowMap = BTreeMap<String, BTreeSet<Lookahead>>;

/// Computes the FIRST sets for all nonterminals of the grammar.
///
/// # Algorithm
/// 1. Start every nonterminal at the empty set.
/// 2. For each rule A and each alternative α, grow FIRST(A) by
///    [`first_of_sequence`]`(α)`.
/// 3. Repeat full passes until no set grows.
pub fn compute_first_sets(grammar: &Grammar) -> FirstMap {
    let mut first: FirstMap = grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), BTreeSet::new()))
        .collect();

    let mut pass = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        pass += 1;

        for rule in grammar.rules() {
            for alt in rule.alternatives() {
                let alt_first = first_of_sequence(&first, alt.symbols());
                let set = first.get_mut(rule.head()).unwrap();
                let before = set.len();
                set.extend(alt_first);
                if set.len() > before {
                    changed = true;
                }
            }
        }
        debug!("FIRST pass {pass} done, changed: {changed}");
    }

    first
}

/// FIRST of an arbitrary symbol sequence, given the FIRST sets computed so
/// far.
///
/// The empty sequence yields `{ε}`. Scanning proceeds left to right,
/// accumulating each symbol's ε-free FIRST and stopping at the first symbol
/// that cannot derive ε; ε joins the result only when every symbol was
/// nullable. A nonterminal that heads no rule is treated as a terminal,
/// matching the reader's tolerance for undeclared identifiers.
pub fn first_of_sequence(first: &FirstMap, symbols: &[Symbol]) -> BTreeSet<Lookahead> {
    let mut result = BTreeSet::new();

    for sym in symbols {
        match sym {
            Symbol::Epsilon => {
                result.insert(Lookahead::Epsilon);
                return result;
            }
            Symbol::NamedTerminal(name) => {
                result.insert(Lookahead::Token(name.clone()));
                return result;
            }
            Symbol::InlineTerminal(literal) => {
                result.insert(Lookahead::Literal(literal.clone()));
                return result;
            }
            Symbol::Nonterminal(name) => match first.get(name) {
                Some(set) => {
                    result.extend(set.iter().filter(|la| !la.is_epsilon()).cloned());
                    if !set.contains(&Lookahead::Epsilon) {
                        return result;
                    }
                }
                None => {
                    result.insert(Lookahead::Token(name.clone()));
                    return result;
                }
            },
        }
    }

    result.insert(Lookahead::Epsilon);
    result
}

/// Computes the FOLLOW sets for all nonterminals of the grammar.
///
/// # Algorithm
/// 1. Start every nonterminal at the empty set, then add $ to FOLLOW(start).
/// 2. For each occurrence of a nonterminal B in a rule A → … B β:
///    - grow FOLLOW(B) by FIRST(β) \ {ε};
///    - when β is empty or nullable, grow FOLLOW(B) by FOLLOW(A).
/// 3. Repeat full passes until no set grows.
pub fn compute_follow_sets(grammar: &Grammar, first: &FirstMap) -> FollowMap {
    let mut follow: FollowMap = grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), BTreeSet::new()))
        .collect();
    follow
        .get_mut(grammar.start())
        .unwrap()
        .insert(Lookahead::End);

    let mut pass = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        pass += 1;

        for rule in grammar.rules() {
            for alt in rule.alternatives() {
                let symbols = alt.symbols();
                for (i, sym) in symbols.iter().enumerate() {
                    let Symbol::Nonterminal(name) = sym else {
                        continue;
                    };
                    // Undeclared identifiers act as terminals and have no
                    // FOLLOW set of their own.
                    if !follow.contains_key(name) {
                        continue;
                    }

                    let beta = &symbols[i + 1..];
                    let beta_first = first_of_sequence(first, beta);

                    let mut grown: BTreeSet<Lookahead> = beta_first
                        .iter()
                        .filter(|la| !la.is_epsilon())
                        .cloned()
                        .collect();
                    if beta.is_empty() || beta_first.contains(&Lookahead::Epsilon) {
                        grown.extend(follow.get(rule.head()).unwrap().iter().cloned());
                    }

                    let set = follow.get_mut(name).unwrap();
                    let before = set.len();
                    set.extend(grown);
                    if set.len() > before {
                        changed = true;
                    }
                }
            }
        }
        debug!("FOLLOW pass {pass} done, changed: {changed}");
    }

    follow
}
