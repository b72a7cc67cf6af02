//! Reads specification text into a [`Grammar`].
//!
//! The format is line-oriented:
//!
//! ```text
//! start: Expr
//!
//! Expr  -> Term Expr'
//! Expr' -> '+' Term Expr' | ε
//! Term  -> ID
//! ID    = /[a-z]+/
//! ```
//!
//! After the `start:` line, every logical line is either a rule
//! (`Head -> alt | alt`) or a token declaration (`NAME = /pattern/`); blank
//! lines may separate them freely.

use crate::error::{Result, WorkbenchError};
use crate::grammar::{Alternative, Grammar, Rule, TokenDecl};
use crate::lexer::{Token, TokenKind, lex};
use crate::symbol::Symbol;

/// Parses a complete grammar specification.
pub fn parse_spec(source: &str) -> Result<Grammar> {
    Parser::new(lex(source)?).parse()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Grammar> {
        self.skip_newlines();
        let start = self.parse_start_line()?;

        let mut rules = Vec::new();
        let mut token_decls = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                None => break,
                Some(TokenKind::Nonterm(_)) => rules.push(self.parse_rule()?),
                Some(TokenKind::TerminalName(_)) => token_decls.push(self.parse_token_decl()?),
                Some(_) => return Err(self.unexpected()),
            }
        }

        Grammar::new(start, rules, token_decls)
    }

    /// `start: <Nonterminal>` terminated by end of line.
    fn parse_start_line(&mut self) -> Result<String> {
        self.expect(&TokenKind::Start)?;
        self.expect(&TokenKind::Colon)?;
        let name = match self.peek() {
            Some(TokenKind::Nonterm(name)) => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        self.expect_line_end()?;
        Ok(name)
    }

    /// `<Nonterminal> -> alt | alt | …` terminated by end of line.
    fn parse_rule(&mut self) -> Result<Rule> {
        let head = match self.peek() {
            Some(TokenKind::Nonterm(name)) => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        self.expect(&TokenKind::Arrow)?;

        let mut alternatives = vec![self.parse_sequence()];
        while self.peek() == Some(&TokenKind::Pipe) {
            self.advance();
            alternatives.push(self.parse_sequence());
        }
        self.expect_line_end()?;
        Ok(Rule::new(head, alternatives))
    }

    /// A possibly empty run of symbols; the empty run reads as ε.
    fn parse_sequence(&mut self) -> Alternative {
        let mut symbols = Vec::new();
        loop {
            let sym = match self.peek() {
                Some(TokenKind::Nonterm(name)) => Symbol::Nonterminal(name.clone()),
                Some(TokenKind::TerminalName(name)) => Symbol::NamedTerminal(name.clone()),
                Some(TokenKind::Quoted(literal)) => Symbol::InlineTerminal(literal.clone()),
                Some(TokenKind::Epsilon) => Symbol::Epsilon,
                _ => break,
            };
            symbols.push(sym);
            self.advance();
        }
        Alternative::new(symbols)
    }

    /// `<NAME> = /<pattern>/` terminated by end of line.
    fn parse_token_decl(&mut self) -> Result<TokenDecl> {
        let name = match self.peek() {
            Some(TokenKind::TerminalName(name)) => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        self.expect(&TokenKind::Equals)?;
        let pattern = match self.peek() {
            Some(TokenKind::Regex(pattern)) => pattern.clone(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        self.expect_line_end()?;
        Ok(TokenDecl { name, pattern })
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_newlines(&mut self) {
        while self.peek() == Some(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.peek() == Some(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// A newline, or the end of input.
    fn expect_line_end(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(TokenKind::Newline) => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> WorkbenchError {
        match self.tokens.get(self.pos) {
            Some(token) => WorkbenchError::Syntax {
                line: token.line,
                found: token.kind.to_string(),
            },
            None => WorkbenchError::Syntax {
                line: self.tokens.last().map(|t| t.line).unwrap_or(1),
                found: "end of input".to_string(),
            },
        }
    }
}
