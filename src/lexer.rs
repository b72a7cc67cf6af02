//! Lexer for the grammar specification language.
//!
//! Recognized tokens:
//! - `start` keyword, `:`, `=`, `|`, and `->` (or `→`)
//! - identifiers `[A-Za-z][A-Za-z0-9_]*'*`; all-uppercase names of two or
//!   more characters are terminal names, everything else is a nonterminal
//! - `'…'` / `"…"` inline terminals and `/…/` regex patterns
//! - `ε` or `epsilon`
//! - newlines (significant, consecutive runs collapsed)
//!
//! Spaces, tabs, and `#` line comments are skipped.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Result, WorkbenchError};

/// Kinds of token produced by [`lex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// The `start` keyword.
    Start,
    /// A nonterminal identifier, primes kept (`S`, `Expr`, `StmtList'`).
    Nonterm(String),
    /// An all-uppercase terminal name (`ID`, `NUMBER`).
    TerminalName(String),
    /// A quoted inline terminal, quotes stripped.
    Quoted(String),
    /// A `/…/` pattern, delimiters stripped.
    Regex(String),
    /// `->` or `→`.
    Arrow,
    /// `|`
    Pipe,
    /// `=`
    Equals,
    /// `:`
    Colon,
    /// `ε` or `epsilon`.
    Epsilon,
    /// One or more line breaks.
    Newline,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Start => write!(f, "keyword 'start'"),
            TokenKind::Nonterm(name) | TokenKind::TerminalName(name) => {
                write!(f, "identifier '{}'", name)
            }
            TokenKind::Quoted(literal) => write!(f, "literal '{}'", literal),
            TokenKind::Regex(_) => write!(f, "pattern"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Epsilon => write!(f, "'ε'"),
            TokenKind::Newline => write!(f, "end of line"),
        }
    }
}

/// A token together with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Tokenizes a complete specification source.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer<'src> {
    chars: Peekable<Chars<'src>>,
    line: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(&c) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.chars.next();
                }
                '#' => self.skip_comment(),
                '\n' => self.scan_newlines(),
                '|' => self.single(TokenKind::Pipe),
                ':' => self.single(TokenKind::Colon),
                '=' => self.single(TokenKind::Equals),
                '→' => self.single(TokenKind::Arrow),
                'ε' => self.single(TokenKind::Epsilon),
                '-' => self.scan_arrow()?,
                '/' => self.scan_delimited('/', "pattern", TokenKind::Regex)?,
                '\'' => self.scan_delimited('\'', "literal", TokenKind::Quoted)?,
                '"' => self.scan_delimited('"', "literal", TokenKind::Quoted)?,
                c if c.is_ascii_alphabetic() => self.scan_identifier(),
                found => {
                    return Err(WorkbenchError::Lexical {
                        line: self.line,
                        found,
                    });
                }
            }
        }
        Ok(self.tokens)
    }

    fn single(&mut self, kind: TokenKind) {
        self.chars.next();
        self.push(kind, self.line);
    }

    fn skip_comment(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn scan_newlines(&mut self) {
        let line = self.line;
        while let Some('\n') = self.chars.peek() {
            self.chars.next();
            self.line += 1;
        }
        self.push(TokenKind::Newline, line);
    }

    fn scan_arrow(&mut self) -> Result<()> {
        self.chars.next();
        if self.chars.peek() == Some(&'>') {
            self.chars.next();
            self.push(TokenKind::Arrow, self.line);
            Ok(())
        } else {
            Err(WorkbenchError::Lexical {
                line: self.line,
                found: '-',
            })
        }
    }

    /// Scans `'…'`, `"…"`, or `/…/` content up to the closing delimiter,
    /// which must appear on the same line.
    fn scan_delimited(
        &mut self,
        close: char,
        what: &'static str,
        make: fn(String) -> TokenKind,
    ) -> Result<()> {
        self.chars.next();
        let mut content = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == close => break,
                Some('\n') | None => {
                    return Err(WorkbenchError::Unterminated {
                        line: self.line,
                        what,
                    });
                }
                Some(c) => content.push(c),
            }
        }
        self.push(make(content), self.line);
        Ok(())
    }

    fn scan_identifier(&mut self) {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        while let Some(&'\'') = self.chars.peek() {
            name.push('\'');
            self.chars.next();
        }
        self.push(classify_identifier(name), self.line);
    }
}

/// Classifies an identifier on its prime-stripped base: the `start` and
/// `epsilon` keywords, terminal names (`[A-Z][A-Z0-9_]*`, two or more
/// characters), and nonterminals for everything else.
fn classify_identifier(name: String) -> TokenKind {
    if name == "start" {
        return TokenKind::Start;
    }
    if name == "epsilon" {
        return TokenKind::Epsilon;
    }
    let base = name.trim_end_matches('\'');
    if is_terminal_name(base) {
        TokenKind::TerminalName(name)
    } else {
        TokenKind::Nonterm(name)
    }
}

fn is_terminal_name(base: &str) -> bool {
    base.len() > 1
        && base
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && base.starts_with(|c: char| c.is_ascii_uppercase())
}
