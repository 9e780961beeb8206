//! Parsing
//!
//! Recursive descent over the whitespace-free token stream. An opener
//! recurses into [Parser::sequence] and the matching closer returns to the
//! caller, so nesting depth is the call depth (bounded by how deeply the
//! catalog nests its brackets).
//!
//! | Notation        | Node                                            |
//! |-----------------|-------------------------------------------------|
//! | `[ a ]`         | `Maybe(a)`                                      |
//! | `[ a b ]`       | `Maybe(Group[a b])`                             |
//! | `[ a \| b c ]`  | `Maybe(Choice[a \| Group[b c]])`                |
//! | `{ a \| b }`    | `Choice[a \| b]`                                |
//! | `( a b )`       | `InParens[a b]`                                 |
//! | `a [, ...]`     | `RepeatComma(a)`                                |

pub mod ast;

use crate::grammar::error::{CompileError, ParseError};
use crate::grammar::lexing::{lex, strip_whitespace, Token, TokenKind};
pub use ast::{Delimiter, Node};

/// Lex and parse grammar text into its (not yet normalized) AST
pub fn parse_text(source: &str) -> Result<Node, CompileError> {
    let tokens = strip_whitespace(lex(source)?);
    Ok(parse(&tokens)?)
}

/// Parse a whitespace-free token stream
///
/// The top level is a `Group` of the parsed sequence. Top-level pipes are
/// resolved like a brace's so no `Pipe` survives in the result.
pub fn parse(tokens: &[Token<'_>]) -> Result<Node, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let items = parser.sequence(None)?;

    if items.is_empty() {
        return Err(ParseError::Empty);
    }
    if items.iter().any(Node::is_pipe) {
        return resolve_alternation(items, 0);
    }
    Ok(Node::Group(items))
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Collect elements until the closer of `open` (or the end of input at
    /// the top level). The closer is consumed.
    fn sequence(&mut self, open: Option<Token<'a>>) -> Result<Vec<Node>, ParseError> {
        let expected = open.and_then(|token| token.kind.closer());
        let mut out: Vec<Node> = Vec::new();

        while let Some(token) = self.next() {
            match token.kind {
                kind if kind.is_close() => {
                    if Some(kind) == expected {
                        return Ok(out);
                    }
                    return Err(ParseError::UnexpectedClose {
                        found: kind,
                        expected,
                        offset: token.offset,
                    });
                }
                TokenKind::LBracket => out.push(self.bracket(token)?),
                TokenKind::LBrace => out.push(self.brace(token)?),
                TokenKind::LParen => out.push(self.parens(token)?),
                TokenKind::DelimitedComma => repeat_last(&mut out, token, Delimiter::Comma)?,
                TokenKind::DelimitedOr => repeat_last(&mut out, token, Delimiter::Or)?,
                TokenKind::DelimitedNone => {
                    repeat_last(&mut out, token, Delimiter::Whitespace)?
                }
                TokenKind::Literal | TokenKind::Star => out.push(Node::literal(token.text)),
                TokenKind::Argument => out.push(Node::argument(token.text)),
                TokenKind::UnqualifiedName => out.push(Node::UnqualifiedName),
                TokenKind::QualifiedName => out.push(Node::QualifiedName),
                TokenKind::Name => out.push(Node::Name),
                TokenKind::Pipe => out.push(Node::Pipe),
                TokenKind::Whitespace => {}
                TokenKind::Comma | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    return Err(ParseError::UnexpectedToken {
                        kind: token.kind,
                        text: token.text.to_string(),
                        offset: token.offset,
                    })
                }
            }
        }

        match open {
            Some(open) => Err(ParseError::Unclosed {
                open: open.kind,
                offset: open.offset,
            }),
            None => Ok(out),
        }
    }

    /// `[ ... ]`: always optional
    fn bracket(&mut self, open: Token<'a>) -> Result<Node, ParseError> {
        let mut out = self.sequence(Some(open))?;

        match out.len() {
            0 => Err(ParseError::EmptyClause {
                open: open.kind,
                offset: open.offset,
            }),
            1 => match out.pop() {
                Some(Node::Pipe) | None => Err(ParseError::EmptyAlternative {
                    offset: open.offset,
                }),
                Some(element) => Ok(Node::maybe(element)),
            },
            _ if out.iter().any(Node::is_pipe) => {
                Ok(Node::maybe(resolve_alternation(out, open.offset)?))
            }
            _ => Ok(Node::maybe(Node::Group(out))),
        }
    }

    /// `{ ... }`: mandatory alternation
    fn brace(&mut self, open: Token<'a>) -> Result<Node, ParseError> {
        let out = self.sequence(Some(open))?;
        if out.is_empty() {
            return Err(ParseError::EmptyClause {
                open: open.kind,
                offset: open.offset,
            });
        }
        resolve_alternation(out, open.offset)
    }

    /// `( ... )`: literal parentheses around a sequence, which may be empty
    fn parens(&mut self, open: Token<'a>) -> Result<Node, ParseError> {
        let out = self.sequence(Some(open))?;
        if out.iter().any(Node::is_pipe) {
            return Ok(Node::InParens(vec![resolve_alternation(out, open.offset)?]));
        }
        Ok(Node::InParens(out))
    }
}

/// Wrap the most recent element in a `Repeat`
fn repeat_last(
    out: &mut Vec<Node>,
    marker: Token<'_>,
    delimiter: Delimiter,
) -> Result<(), ParseError> {
    match out.pop() {
        Some(last) if !last.is_pipe() => {
            out.push(Node::repeat(last, delimiter));
            Ok(())
        }
        _ => Err(ParseError::DanglingRepetition {
            marker: marker.kind,
            offset: marker.offset,
        }),
    }
}

/// Split a flat sequence at its pipes
///
/// Each run of more than one element becomes a `Group`, a single element
/// stays as it is. One run is returned directly, several become a `Choice`.
pub fn resolve_alternation(items: Vec<Node>, offset: usize) -> Result<Node, ParseError> {
    let mut runs: Vec<Vec<Node>> = vec![Vec::new()];
    for item in items {
        match item {
            Node::Pipe => runs.push(Vec::new()),
            other => {
                if let Some(run) = runs.last_mut() {
                    run.push(other);
                }
            }
        }
    }

    let mut alternatives = Vec::with_capacity(runs.len());
    for mut run in runs {
        let alternative = match run.len() {
            0 => return Err(ParseError::EmptyAlternative { offset }),
            1 => run.pop().ok_or(ParseError::EmptyAlternative { offset })?,
            _ => Node::Group(run),
        };
        alternatives.push(alternative);
    }

    if alternatives.len() == 1 {
        return alternatives
            .pop()
            .ok_or(ParseError::EmptyAlternative { offset });
    }
    Ok(Node::Choice(alternatives))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<Node, ParseError> {
        let tokens = strip_whitespace(lex(source).unwrap());
        parse(&tokens)
    }

    fn lit(text: &str) -> Node {
        Node::literal(text)
    }

    #[test]
    fn test_plain_sequence() {
        assert_eq!(
            parse_str("ON table_name").unwrap(),
            Node::Group(vec![lit("ON"), Node::argument("table_name")])
        );
    }

    #[test]
    fn test_bracket_single_element() {
        assert_eq!(
            parse_str("CREATE [ CONSTRAINT ] TRIGGER").unwrap(),
            Node::Group(vec![lit("CREATE"), Node::maybe(lit("CONSTRAINT")), lit("TRIGGER")])
        );
    }

    #[test]
    fn test_bracket_sequence() {
        assert_eq!(
            parse_str("[ WITH GRANT OPTION ]").unwrap(),
            Node::Group(vec![Node::maybe(Node::Group(vec![
                lit("WITH"),
                lit("GRANT"),
                lit("OPTION")
            ]))])
        );
    }

    #[test]
    fn test_bracket_alternation() {
        assert_eq!(
            parse_str("[ INITIALLY IMMEDIATE | INITIALLY DEFERRED ]").unwrap(),
            Node::Group(vec![Node::maybe(Node::Choice(vec![
                Node::Group(vec![lit("INITIALLY"), lit("IMMEDIATE")]),
                Node::Group(vec![lit("INITIALLY"), lit("DEFERRED")]),
            ]))])
        );
    }

    #[test]
    fn test_brace_alternation() {
        assert_eq!(
            parse_str("{ BEFORE | AFTER | INSTEAD OF }").unwrap(),
            Node::Group(vec![Node::Choice(vec![
                lit("BEFORE"),
                lit("AFTER"),
                Node::Group(vec![lit("INSTEAD"), lit("OF")]),
            ])])
        );
    }

    #[test]
    fn test_brace_single_run_is_returned_directly() {
        assert_eq!(
            parse_str("{ event [ OR ... ] }").unwrap(),
            Node::Group(vec![Node::repeat(Node::argument("event"), Delimiter::Or)])
        );
        assert_eq!(
            parse_str("{ { OLD | NEW } TABLE }").unwrap(),
            Node::Group(vec![Node::Group(vec![
                Node::Choice(vec![lit("OLD"), lit("NEW")]),
                lit("TABLE"),
            ])])
        );
    }

    #[test]
    fn test_parens() {
        assert_eq!(
            parse_str("function_name ( arguments )").unwrap(),
            Node::Group(vec![
                Node::argument("function_name"),
                Node::InParens(vec![Node::argument("arguments")]),
            ])
        );
        assert_eq!(
            parse_str("f ( )").unwrap(),
            Node::Group(vec![Node::argument("f"), Node::InParens(vec![])])
        );
    }

    #[test]
    fn test_repetition_wraps_previous_element() {
        assert_eq!(
            parse_str("{ SELECT | INSERT } [, ...]").unwrap(),
            Node::Group(vec![Node::repeat(
                Node::Choice(vec![lit("SELECT"), lit("INSERT")]),
                Delimiter::Comma
            )])
        );
        assert_eq!(
            parse_str("{ a } [ ... ]").unwrap(),
            Node::Group(vec![Node::repeat(Node::argument("a"), Delimiter::Whitespace)])
        );
    }

    #[test]
    fn test_name_leaves_and_star() {
        assert_eq!(
            parse_str("NAME QUALIFIED_NAME UNQUALIFIED_NAME *").unwrap(),
            Node::Group(vec![
                Node::Name,
                Node::QualifiedName,
                Node::UnqualifiedName,
                lit("*")
            ])
        );
    }

    #[test]
    fn test_top_level_pipes_resolve() {
        assert_eq!(
            parse_str("PUBLIC | CURRENT_USER").unwrap(),
            Node::Choice(vec![lit("PUBLIC"), lit("CURRENT_USER")])
        );
    }

    #[test]
    fn test_no_pipe_survives() {
        let node = parse_str("{ [ GROUP ] role_name | PUBLIC } ( a | b )").unwrap();
        assert!(!node.to_string().contains("Pipe"));
    }

    #[test]
    fn test_unclosed_bracket() {
        assert_eq!(
            parse_str("GRANT [ ALL").unwrap_err(),
            ParseError::Unclosed {
                open: TokenKind::LBracket,
                offset: 6
            }
        );
    }

    #[test]
    fn test_mismatched_close() {
        assert_eq!(
            parse_str("{ A ]").unwrap_err(),
            ParseError::UnexpectedClose {
                found: TokenKind::RBracket,
                expected: Some(TokenKind::RBrace),
                offset: 4
            }
        );
        assert_eq!(
            parse_str("A )").unwrap_err(),
            ParseError::UnexpectedClose {
                found: TokenKind::RParen,
                expected: None,
                offset: 2
            }
        );
    }

    #[test]
    fn test_dangling_repetition() {
        assert!(matches!(
            parse_str("[, ...] A").unwrap_err(),
            ParseError::DanglingRepetition { .. }
        ));
        assert!(matches!(
            parse_str("{ A | [ OR ... ] }").unwrap_err(),
            ParseError::DanglingRepetition { .. }
        ));
    }

    #[test]
    fn test_empty_clauses_and_alternatives() {
        assert!(matches!(
            parse_str("A [ ]").unwrap_err(),
            ParseError::EmptyClause { .. }
        ));
        assert!(matches!(
            parse_str("{ A | }").unwrap_err(),
            ParseError::EmptyAlternative { .. }
        ));
        assert!(matches!(
            parse_str("[ | ]").unwrap_err(),
            ParseError::EmptyAlternative { .. }
        ));
        assert_eq!(parse_str("   ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_bare_comma_is_rejected() {
        assert!(matches!(
            parse_str("( a , b )").unwrap_err(),
            ParseError::UnexpectedToken {
                kind: TokenKind::Comma,
                ..
            }
        ));
    }
}
