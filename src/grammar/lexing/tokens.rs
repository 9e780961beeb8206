//! Token definitions for the grammar notation
//!
//! The token table is a logos derive: it scans longest-match-first, so the
//! multi-character repetition markers (`[ , ... ]` in any of its spacings,
//! `[ OR ... ]`, `[ ... ]`) always win over a lone `[`. Equal-length ties are
//! settled by priority: the placeholder-class spellings beat a keyword run,
//! and a keyword run beats a placeholder run on `_`.

use logos::Logos;
use std::fmt;

/// All token kinds of the grammar notation
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifier-class placeholders
    #[token("UNQUALIFIED_NAME", priority = 10)]
    UnqualifiedName,
    #[token("QUALIFIED_NAME", priority = 10)]
    QualifiedName,
    #[token("NAME", priority = 10)]
    Name,

    #[token("|")]
    Pipe,

    // Repetition markers, applied to the preceding element
    #[regex(r"\[ ?, ?\.\.\. ?\]")]
    DelimitedComma,
    #[token("[ OR ... ]")]
    DelimitedOr,
    #[token("[ ... ]")]
    DelimitedNone,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Keyword text, e.g. `GRANT` or `WITH_CHECK`
    #[regex(r"[A-Z_]+", priority = 3)]
    Literal,
    #[token("*")]
    Star,
    /// Placeholder name, e.g. `table_name`
    #[regex(r"[a-z_]+", priority = 2)]
    Argument,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
}

impl TokenKind {
    /// Whitespace is lexed so the whole text is accounted for, then dropped
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    pub fn is_close(&self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    /// The closer that balances this opener
    pub fn closer(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }

    pub fn is_repetition(&self) -> bool {
        matches!(
            self,
            TokenKind::DelimitedComma | TokenKind::DelimitedOr | TokenKind::DelimitedNone
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::UnqualifiedName => "UNQUALIFIED_NAME",
            TokenKind::QualifiedName => "QUALIFIED_NAME",
            TokenKind::Name => "NAME",
            TokenKind::Pipe => "PIPE",
            TokenKind::DelimitedComma => "DELIMITED_COMMA",
            TokenKind::DelimitedOr => "DELIMITED_OR",
            TokenKind::DelimitedNone => "DELIMITED_NONE",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Literal => "LITERAL",
            TokenKind::Star => "STAR",
            TokenKind::Argument => "ARG",
            TokenKind::LParen => "L_PAREN",
            TokenKind::RParen => "R_PAREN",
            TokenKind::LBracket => "L_BRACKET",
            TokenKind::RBracket => "R_BRACKET",
            TokenKind::LBrace => "L_BRACE",
            TokenKind::RBrace => "R_BRACE",
            TokenKind::Comma => "COMMA",
        };
        write!(f, "{}", name)
    }
}

/// A token kind together with the exact text it matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in the lexed source
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        Self { kind, text, offset }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}
