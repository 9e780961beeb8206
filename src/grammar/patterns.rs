//! Pattern generation
//!
//! Turns a normalized AST into regex source. Normalizing has already removed
//! every optional node, so each boundary inside a group sits between two
//! mandatory elements and takes the same separator: one or more whitespace
//! characters. The one exception is an element that opens with a literal
//! parenthesis, which may abut the token before it (`fn()` as well as
//! `fn ()`), whether the parenthesis is written inline or comes from a bound
//! template.
//!
//! | Node            | Pattern                                     |
//! |-----------------|---------------------------------------------|
//! | `Literal(X)`    | `X`, escaped                                |
//! | `Choice[a b]`   | `(a\|b)`                                    |
//! | `Group[a b]`    | `a\s+b`                                     |
//! | `InParens[a b]` | `\(\s*a\s+b\s*\)`                           |
//! | `RepeatComma(a)`| `(a)(\s*,\s*a)*`                            |

pub mod identifiers;

use crate::grammar::error::{CompileError, NormalizeError};
use crate::grammar::parsing::{Delimiter, Node};
use crate::grammar::template::{Bindings, Template};
use identifiers::{
    NAME, OPTIONAL_SEMICOLON, OPTIONAL_WHITESPACE, QUALIFIED_NAME, UNQUALIFIED_NAME, WHITESPACE,
};

/// Supplies the pattern of a template bound to a placeholder
///
/// The bound template is compiled with its own bindings: placeholders of the
/// outer template are never visible to it.
pub trait FragmentSource {
    fn fragment(&self, template: &Template) -> Result<String, CompileError>;

    /// Whether every match of the bound template starts with a literal `(`
    fn opens_with_paren(&self, template: &Template) -> Result<bool, CompileError>;
}

/// Generate the unanchored pattern for a normalized node
pub fn generate(
    node: &Node,
    bindings: &Bindings,
    source: &dyn FragmentSource,
) -> Result<String, CompileError> {
    match node {
        Node::Literal(text) => Ok(regex::escape(text)),
        Node::Argument(name) => source.fragment(bound(bindings, name)?),
        Node::UnqualifiedName => Ok(UNQUALIFIED_NAME.to_string()),
        Node::QualifiedName => Ok(QUALIFIED_NAME.to_string()),
        Node::Name => Ok(NAME.to_string()),
        Node::Group(members) => join(members, bindings, source),
        Node::Choice(members) => {
            let alternatives = members
                .iter()
                .map(|member| generate(member, bindings, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("({})", alternatives.join("|")))
        }
        Node::InParens(members) => Ok(format!(
            r"\({}{}{}\)",
            OPTIONAL_WHITESPACE,
            join(members, bindings, source)?,
            OPTIONAL_WHITESPACE
        )),
        Node::Repeat(inner, delimiter) => {
            let once = generate(inner, bindings, source)?;
            Ok(format!(
                "({once})({ws}{delimiter}{ws}{once})*",
                once = once,
                ws = OPTIONAL_WHITESPACE,
                delimiter = delimiter_pattern(*delimiter)
            ))
        }
        Node::Maybe(_) | Node::Pipe => Err(NormalizeError::UnexpectedNode {
            node: node.to_string(),
        }
        .into()),
    }
}

/// Generate one unanchored pattern per top-level alternative
///
/// A root `Choice`, or a `Group` whose only member is a `Choice`, is split;
/// anything else yields a single pattern.
pub fn generate_alternatives(
    node: &Node,
    bindings: &Bindings,
    source: &dyn FragmentSource,
) -> Result<Vec<String>, CompileError> {
    match top_level_alternatives(node) {
        Some(alternatives) => alternatives
            .iter()
            .map(|alternative| generate(alternative, bindings, source))
            .collect(),
        None => Ok(vec![generate(node, bindings, source)?]),
    }
}

/// The alternatives of a root choice, if the root is one
pub fn top_level_alternatives(node: &Node) -> Option<&[Node]> {
    match node {
        Node::Choice(members) => Some(members),
        Node::Group(members) => match members.as_slice() {
            [Node::Choice(alternatives)] => Some(alternatives),
            _ => None,
        },
        _ => None,
    }
}

/// Anchor a fragment to the whole statement, allowing a trailing terminator
pub fn anchor(fragment: &str) -> String {
    format!(
        "^{}{}{}{}$",
        fragment, OPTIONAL_WHITESPACE, OPTIONAL_SEMICOLON, OPTIONAL_WHITESPACE
    )
}

fn bound<'b>(bindings: &'b Bindings, name: &str) -> Result<&'b Template, CompileError> {
    bindings
        .get(name)
        .map(|template| template.as_ref())
        .ok_or_else(|| CompileError::UnresolvedArgument {
            name: name.to_string(),
        })
}

fn delimiter_pattern(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Comma => ",",
        Delimiter::Or => "OR",
        Delimiter::Whitespace => r"\s",
    }
}

/// Concatenate members with the separator each boundary calls for
fn join(
    members: &[Node],
    bindings: &Bindings,
    source: &dyn FragmentSource,
) -> Result<String, CompileError> {
    let mut out = String::new();
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            if opens_with_paren(member, bindings, source)? {
                out.push_str(OPTIONAL_WHITESPACE);
            } else {
                out.push_str(WHITESPACE);
            }
        }
        out.push_str(&generate(member, bindings, source)?);
    }
    Ok(out)
}

/// Whether every match of a normalized `node` starts with a literal `(`
pub fn opens_with_paren(
    node: &Node,
    bindings: &Bindings,
    source: &dyn FragmentSource,
) -> Result<bool, CompileError> {
    match node {
        Node::InParens(_) => Ok(true),
        Node::Argument(name) => source.opens_with_paren(bound(bindings, name)?),
        Node::Repeat(inner, _) => opens_with_paren(inner, bindings, source),
        Node::Group(members) => match members.first() {
            Some(first) => opens_with_paren(first, bindings, source),
            None => Ok(false),
        },
        Node::Choice(members) => {
            if members.is_empty() {
                return Ok(false);
            }
            for member in members {
                if !opens_with_paren(member, bindings, source)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}
