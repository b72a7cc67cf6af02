//! Rendering of grammars and analysis results for terminal output.
//!
//! Every renderer returns a `String`; the CLI decides where it goes. The
//! core structures stay printable-format agnostic.

use std::collections::BTreeSet;

use crate::first_follow::{FirstMap, FollowMap};
use crate::grammar::Grammar;
use crate::ll1::{Conflict, ParseTable};
use crate::repair::Suggestion;
use crate::symbol::{Lookahead, Symbol};

fn branch(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}

fn join_set(set: &BTreeSet<Lookahead>) -> String {
    set.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn symbol_label(sym: &Symbol) -> String {
    match sym {
        Symbol::Nonterminal(name) => format!("Nonterminal {}", name),
        Symbol::NamedTerminal(name) => format!("Terminal {}", name),
        Symbol::InlineTerminal(literal) => format!("Literal '{}'", literal),
        Symbol::Epsilon => "ε".to_string(),
    }
}

/// Renders the grammar as a tree: start declaration, token declarations,
/// then one branch per rule with its alternatives and symbols.
pub fn render_tree(grammar: &Grammar) -> String {
    let mut lines = vec!["Grammar".to_string()];

    lines.push(format!("├── start: {}", grammar.start()));
    for decl in grammar.token_decls() {
        lines.push(format!("├── token {} = /{}/", decl.name, decl.pattern));
    }

    let rule_count = grammar.rules().len();
    for (ri, rule) in grammar.rules().iter().enumerate() {
        let last_rule = ri + 1 == rule_count;
        lines.push(format!("{}Rule {}", branch(last_rule), rule.head()));
        let rule_pad = if last_rule { "    " } else { "│   " };

        let alt_count = rule.alternatives().len();
        for (ai, alt) in rule.alternatives().iter().enumerate() {
            let last_alt = ai + 1 == alt_count;
            lines.push(format!("{}{}Alt", rule_pad, branch(last_alt)));
            let alt_pad = if last_alt { "    " } else { "│   " };

            let sym_count = alt.symbols().len();
            for (si, sym) in alt.symbols().iter().enumerate() {
                let last_sym = si + 1 == sym_count;
                lines.push(format!(
                    "{}{}{}{}",
                    rule_pad,
                    alt_pad,
                    branch(last_sym),
                    symbol_label(sym)
                ));
            }
        }
    }

    lines.join("\n") + "\n"
}

/// Renders the start symbol and the sorted nonterminal/terminal inventories.
pub fn render_summary(grammar: &Grammar) -> String {
    let nonterminals = grammar
        .nonterminals()
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let terminals = grammar
        .terminals()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("Start symbol : {}", grammar.start()),
        format!("Nonterminals : {}", nonterminals),
        format!("Terminals    : {}", terminals),
    ];
    for decl in grammar.token_decls() {
        lines.push(format!("Token        : {} = /{}/", decl.name, decl.pattern));
    }
    lines.join("\n") + "\n"
}

/// Renders FIRST and FOLLOW side by side, one row per nonterminal.
pub fn render_sets(first: &FirstMap, follow: &FollowMap) -> String {
    let nt_w = first
        .keys()
        .map(|nt| nt.chars().count())
        .max()
        .unwrap_or(0)
        .max(2)
        + 2;
    let set_w = first
        .values()
        .map(|set| join_set(set).chars().count() + 4)
        .max()
        .unwrap_or(0)
        .max(9)
        + 2;

    let header = format!("{:<nt_w$} {:<set_w$} {}", "NT", "FIRST", "FOLLOW");
    let rule = "─".repeat(header.chars().count() + 8);
    let mut lines = vec![header, rule];
    for (nt, first_set) in first {
        let follow_set = follow.get(nt).map(join_set).unwrap_or_default();
        let first_cell = format!("{{ {} }}", join_set(first_set));
        lines.push(format!(
            "{nt:<nt_w$} {first_cell:<set_w$} {{ {follow_set} }}"
        ));
    }
    lines.join("\n") + "\n"
}

/// Renders the conflict list, numbered, or a single all-clear line.
pub fn render_conflicts(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "The grammar is LL(1): no conflicts found.\n".to_string();
    }

    let mut lines = vec![
        format!(
            "The grammar is NOT LL(1): {} conflict(s) found.",
            conflicts.len()
        ),
        String::new(),
    ];
    for (i, conflict) in conflicts.iter().enumerate() {
        lines.push(format!(
            "  [{}] {} conflict at {}",
            i + 1,
            conflict.kind(),
            conflict.head()
        ));
        match conflict {
            Conflict::FirstFirst {
                head, alt_a, alt_b, ..
            } => {
                lines.push(format!("      production: {} -> {}", head, alt_a));
                lines.push(format!("      production: {} -> {}", head, alt_b));
            }
            Conflict::FirstFollow { head, alt, .. } => {
                lines.push(format!("      production: {} -> {}", head, alt));
            }
        }
        lines.push(format!(
            "      conflicting symbols: {{ {} }}",
            join_set(conflict.symbols())
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Renders the predictive table as a grid: rows are nonterminals, columns
/// the terminals plus $. Multi-entry cells show `[CONFLICT]`.
pub fn render_table(table: &ParseTable, grammar: &Grammar) -> String {
    let mut columns: Vec<Lookahead> = grammar.terminals().iter().cloned().collect();
    columns.push(Lookahead::End);

    let col_w = columns
        .iter()
        .map(|col| col.to_string().chars().count())
        .max()
        .unwrap_or(1)
        .max(10)
        + 2;
    let row_w = grammar
        .nonterminals()
        .iter()
        .map(|nt| nt.chars().count())
        .max()
        .unwrap_or(1)
        + 2;

    let mut header = " ".repeat(row_w);
    for col in &columns {
        header.push_str(&center(&col.to_string(), col_w));
    }
    let width = header.chars().count();
    let mut lines = vec![header.trim_end().to_string(), "─".repeat(width)];

    for nt in grammar.nonterminals() {
        let mut line = format!("{nt:>row_w$}");
        for col in &columns {
            let text = match table.get(nt, col) {
                [] => String::new(),
                [only] => truncate(&format!("{}→{}", nt, only), col_w - 1),
                _ => "[CONFLICT]".to_string(),
            };
            line.push_str(&center(&text, col_w));
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n") + "\n"
}

/// Renders repair suggestions as labeled blocks.
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut lines = Vec::new();
    for suggestion in suggestions {
        lines.push(format!("  Nonterminal : {}", suggestion.head));
        lines.push(format!("  Conflict    : {}", suggestion.kind));
        lines.push(format!("  Technique   : {}", suggestion.technique));
        lines.push("  New rules   :".to_string());
        for rule in &suggestion.new_rules {
            lines.push(format!("    {}", rule));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let keep: String = text.chars().take(max.saturating_sub(3)).collect();
        keep + "..."
    }
}
