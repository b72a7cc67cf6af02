//! LL(1) Grammar Workbench
//!
//! Reads a context-free grammar specification, computes FIRST and FOLLOW
//! sets, checks the LL(1) condition, builds the predictive parse table, and
//! suggests grammar transformations for conflicting rules.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools"
//! (2nd Edition). Addison-Wesley, 2006. Sections 4.3 and 4.4.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use ll1_workbench::cli;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLine {
    /// Grammar specification file; the built-in example is used when omitted.
    grammar: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = CommandLine::parse();
    if let Err(e) = cli::run(args.grammar.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
