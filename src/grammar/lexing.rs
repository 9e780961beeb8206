//! Lexing
//!
//! Turns grammar text into a flat token stream. Every byte of the text must
//! belong to some token (whitespace included) or lexing fails; the
//! [strip_whitespace] pass then drops whitespace before parsing.

pub mod tokens;

use crate::grammar::error::LexError;
use logos::Logos;
pub use tokens::{Token, TokenKind};

/// Tokenize grammar text
///
/// Fails on the first position where no token kind matches, reporting the
/// unconsumed remainder of the text.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), span.start)),
            Err(()) => {
                return Err(LexError::Unrecognized {
                    offset: span.start,
                    remainder: source[span.start..].to_string(),
                })
            }
        }
    }

    log::trace!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    Ok(tokens)
}

/// Remove whitespace tokens
pub fn strip_whitespace(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    tokens
        .into_iter()
        .filter(|token| !token.kind.is_whitespace())
        .collect()
}
