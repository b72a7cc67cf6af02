//! Symbol types for context-free grammars.
//!
//! Two views of "symbol" live here. [`Symbol`] is what may appear inside a
//! production: a nonterminal, a named terminal, an inline quoted literal, or
//! ε. [`Lookahead`] is what may appear inside a FIRST or FOLLOW set (and as
//! a parse-table column): a terminal, ε, or the end-of-input marker $.

use std::cmp::Ordering;
use std::fmt;

/// A symbol occurring in a production.
///
/// # Grammar conventions
/// - Nonterminals: single uppercase letters (`S`) or mixed-case identifiers
///   (`Expr`, `StmtList'`), primes included in the name.
/// - Named terminals: all-uppercase identifiers of two or more characters
///   (`ID`, `NUMBER`), usually bound to a pattern by a token declaration.
/// - Inline terminals: literals quoted directly in a production (`'+'`),
///   stored without the quotes.
/// - Epsilon: the empty string, only legal as the sole symbol of an
///   alternative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A nonterminal, referenced by name.
    Nonterminal(String),
    /// A terminal declared by name in the token section.
    NamedTerminal(String),
    /// A terminal quoted inline in a production.
    InlineTerminal(String),
    /// The empty string (ε).
    Epsilon,
}

impl Symbol {
    /// Checks if this symbol is a terminal. ε counts as terminal here;
    /// `Nonterminal` is the only non-terminal variant.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Symbol::Nonterminal(_))
    }

    /// Checks if this symbol is a nonterminal.
    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    /// Checks if this symbol is epsilon (ε).
    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The display value of this symbol: the name, the literal, or `ε`.
    pub fn value(&self) -> &str {
        match self {
            Symbol::Nonterminal(name) | Symbol::NamedTerminal(name) => name,
            Symbol::InlineTerminal(literal) => literal,
            Symbol::Epsilon => "ε",
        }
    }

    /// The FIRST/FOLLOW set member this symbol contributes when it acts as a
    /// terminal; `None` for nonterminals.
    pub fn lookahead(&self) -> Option<Lookahead> {
        match self {
            Symbol::Nonterminal(_) => None,
            Symbol::NamedTerminal(name) => Some(Lookahead::Token(name.clone())),
            Symbol::InlineTerminal(literal) => Some(Lookahead::Literal(literal.clone())),
            Symbol::Epsilon => Some(Lookahead::Epsilon),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Nonterminal(name) | Symbol::NamedTerminal(name) => write!(f, "{}", name),
            Symbol::InlineTerminal(literal) => write!(f, "'{}'", literal),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

/// A member of a FIRST or FOLLOW set.
///
/// Terminal members keep the distinction between bare names and quoted
/// literals, so a literal `'x'` and a terminal named `x` never collapse into
/// the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookahead {
    /// A terminal referred to by name: a declared token, a named terminal,
    /// or an undeclared identifier used as a terminal.
    Token(String),
    /// An inline quoted literal.
    Literal(String),
    /// The empty string (ε). Never present in FOLLOW sets.
    Epsilon,
    /// The end-of-input marker ($). Never present in FIRST sets.
    End,
}

impl Lookahead {
    /// Checks if this entry is epsilon (ε).
    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Lookahead::Epsilon)
    }

    /// Checks if this entry is the end marker ($).
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Lookahead::End)
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Token(name) => write!(f, "{}", name),
            Lookahead::Literal(literal) => write!(f, "'{}'", literal),
            Lookahead::Epsilon => write!(f, "ε"),
            Lookahead::End => write!(f, "$"),
        }
    }
}

/// Ordering used whenever sets are rendered or iterated.
///
/// Order: terminals by value (literal before a same-valued name) < ε < $.
impl Ord for Lookahead {
    fn cmp(&self, other: &Self) -> Ordering {
        const fn rank(entry: &Lookahead) -> u8 {
            match entry {
                Lookahead::Token(_) | Lookahead::Literal(_) => 0,
                Lookahead::Epsilon => 1,
                Lookahead::End => 2,
            }
        }

        match (self, other) {
            (Lookahead::Token(a), Lookahead::Token(b)) => a.cmp(b),
            (Lookahead::Literal(a), Lookahead::Literal(b)) => a.cmp(b),
            (Lookahead::Literal(a), Lookahead::Token(b)) => a.cmp(b).then(Ordering::Less),
            (Lookahead::Token(a), Lookahead::Literal(b)) => a.cmp(b).then(Ordering::Greater),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl PartialOrd for Lookahead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
