//! Error types for the grammar pipeline
//!
//! Every error here means the grammar catalog itself is wrong: templates are
//! fixed data, so none of these are retried. Matching a candidate statement
//! never produces an error.

use crate::grammar::lexing::tokens::TokenKind;
use std::fmt;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token kind consumes the text starting at `offset`
    Unrecognized { offset: usize, remainder: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Unrecognized { offset, remainder } => {
                write!(f, "Could not match {:?} at offset {}", remainder, offset)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Errors that can occur while building the grammar AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The grammar text has no tokens
    Empty,
    /// Input ended before the opener was closed
    Unclosed { open: TokenKind, offset: usize },
    /// A closer that does not balance the innermost opener
    UnexpectedClose {
        found: TokenKind,
        expected: Option<TokenKind>,
        offset: usize,
    },
    /// A repetition marker with nothing before it to repeat
    DanglingRepetition { marker: TokenKind, offset: usize },
    /// A pipe with an empty side, e.g. `{ a | }`; `offset` is the enclosing opener
    EmptyAlternative { offset: usize },
    /// `[ ]` or `{ }`
    EmptyClause { open: TokenKind, offset: usize },
    /// A token that has no meaning where it appears
    UnexpectedToken {
        kind: TokenKind,
        text: String,
        offset: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Grammar text is empty"),
            ParseError::Unclosed { open, offset } => {
                write!(f, "{} at offset {} is never closed", open, offset)
            }
            ParseError::UnexpectedClose {
                found,
                expected: Some(expected),
                offset,
            } => write!(
                f,
                "Expected {} but found {} at offset {}",
                expected, found, offset
            ),
            ParseError::UnexpectedClose {
                found,
                expected: None,
                offset,
            } => write!(f, "Unbalanced {} at offset {}", found, offset),
            ParseError::DanglingRepetition { marker, offset } => {
                write!(f, "{} at offset {} has nothing to repeat", marker, offset)
            }
            ParseError::EmptyAlternative { offset } => {
                write!(f, "Empty alternative in the clause at offset {}", offset)
            }
            ParseError::EmptyClause { open, offset } => {
                write!(f, "{} at offset {} encloses nothing", open, offset)
            }
            ParseError::UnexpectedToken { kind, text, offset } => {
                write!(f, "Unexpected {} {:?} at offset {}", kind, text, offset)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur while expanding optional nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A present/absent combination left a group with no members
    EmptyVariant { group: String },
    /// A node kind that must not survive to this stage
    UnexpectedNode { node: String },
    /// Too many optional siblings to enumerate
    TooManyOptionals { count: usize, limit: usize },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::EmptyVariant { group } => {
                write!(f, "Empty variant while expanding {}", group)
            }
            NormalizeError::UnexpectedNode { node } => write!(f, "Reached {} in pass", node),
            NormalizeError::TooManyOptionals { count, limit } => write!(
                f,
                "{} optional members in one group (at most {} are expanded)",
                count, limit
            ),
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Everything that can go wrong turning a template into a matcher
#[derive(Debug, Clone)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Normalize(NormalizeError),
    /// A placeholder with no entry in the binding map
    UnresolvedArgument { name: String },
    /// The regex engine rejected the generated patterns
    InvalidPattern(regex::Error),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(err) => write!(f, "Lexing error: {}", err),
            CompileError::Parse(err) => write!(f, "Parsing error: {}", err),
            CompileError::Normalize(err) => write!(f, "Normalization error: {}", err),
            CompileError::UnresolvedArgument { name } => {
                write!(f, "Placeholder {:?} has no binding", name)
            }
            CompileError::InvalidPattern(err) => write!(f, "Invalid pattern: {}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(err) => Some(err),
            CompileError::Parse(err) => Some(err),
            CompileError::Normalize(err) => Some(err),
            CompileError::UnresolvedArgument { .. } => None,
            CompileError::InvalidPattern(err) => Some(err),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<NormalizeError> for CompileError {
    fn from(err: NormalizeError) -> Self {
        CompileError::Normalize(err)
    }
}

impl From<regex::Error> for CompileError {
    fn from(err: regex::Error) -> Self {
        CompileError::InvalidPattern(err)
    }
}
