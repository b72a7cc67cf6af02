//! Command-line pipeline: read a specification, analyze it, print every
//! phase.
//!
//! A malformed specification is reported as a diagnostic and the process
//! still exits cleanly; only an unreadable input file is a hard error.

use std::fs;
use std::path::Path;

use log::info;

use crate::analysis::Analysis;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::report;

/// Demonstration grammar analyzed when no file is given.
pub const EXAMPLE_GRAMMAR: &str = "\
start: Program

Program   -> StmtList
StmtList  -> Stmt StmtList'
StmtList' -> ';' Stmt StmtList' | ε
Stmt      -> id ':=' Expr
Expr      -> Term Expr'
Expr'     -> '+' Term Expr' | ε
Term      -> id | number
";

/// Runs the workbench on the given file, or on the built-in example.
pub fn run(path: Option<&Path>) -> Result<()> {
    let source = match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            info!("read specification from {}", path.display());
            text
        }
        None => {
            println!("No file given; analyzing the built-in example grammar.");
            EXAMPLE_GRAMMAR.to_string()
        }
    };
    run_pipeline(&source);
    Ok(())
}

fn print_phase(title: &str) {
    let sep = "=".repeat(60);
    println!("\n{sep}");
    println!(" {title}");
    println!("{sep}");
}

fn run_pipeline(source: &str) {
    print_phase("Phase 1: specification parse");
    let grammar = match Grammar::parse(source) {
        Ok(grammar) => grammar,
        Err(err) => {
            println!("Specification rejected: {err}");
            return;
        }
    };
    print!("{}", report::render_tree(&grammar));
    println!();
    print!("{}", report::render_summary(&grammar));

    let analysis = Analysis::run(&grammar);
    info!(
        "analysis finished: {} conflict(s), {} table entries",
        analysis.conflicts.len(),
        analysis.table.entry_count()
    );

    print_phase("Phase 2: FIRST and FOLLOW sets");
    print!("{}", report::render_sets(&analysis.first, &analysis.follow));

    print_phase("Phase 3: LL(1) check");
    print!("{}", report::render_conflicts(&analysis.conflicts));

    print_phase("Phase 4: predictive parse table");
    print!("{}", report::render_table(&analysis.table, &grammar));

    if !analysis.conflicts.is_empty() {
        println!("\nCells marked [CONFLICT] hold more than one alternative.");

        print_phase("Phase 5: repair suggestions");
        print!("{}", report::render_suggestions(&analysis.suggestions));
    }
}
