//! The full analysis pipeline over one grammar.

use crate::first_follow::{FirstMap, FollowMap, compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::ll1::{Conflict, ParseTable, build_parse_table, check_ll1};
use crate::repair::{Suggestion, suggest_fixes};

/// The complete result of analyzing one grammar.
///
/// All fields are plain owned data; running the analysis twice on the same
/// grammar yields equal results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub first: FirstMap,
    pub follow: FollowMap,
    pub conflicts: Vec<Conflict>,
    pub table: ParseTable,
    pub suggestions: Vec<Suggestion>,
}

impl Analysis {
    /// Runs every stage in order: FIRST, FOLLOW, the LL(1) check, the parse
    /// table, and repair suggestions. Conflicts never abort the pipeline;
    /// the table is built even when the grammar is not LL(1).
    pub fn run(grammar: &Grammar) -> Self {
        let first = compute_first_sets(grammar);
        let follow = compute_follow_sets(grammar, &first);
        let conflicts = check_ll1(grammar, &first, &follow);
        let table = build_parse_table(grammar, &first, &follow);
        let suggestions = suggest_fixes(grammar, &conflicts);
        Self {
            first,
            follow,
            conflicts,
            table,
            suggestions,
        }
    }
}
