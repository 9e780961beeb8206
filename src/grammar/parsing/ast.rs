//! Grammar AST
//!
//! A closed set of node kinds. Every pass (normalizing, pattern generation)
//! is a single exhaustive match over [Node], so adding a kind means touching
//! each pass explicitly.

use std::fmt;

/// Separator between the occurrences of a [Node::Repeat]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `[, ...]`
    Comma,
    /// `[ OR ... ]`
    Or,
    /// `[ ... ]`
    Whitespace,
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "Comma"),
            Delimiter::Or => write!(f, "Or"),
            Delimiter::Whitespace => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Keyword text matched as written
    Literal(String),
    /// Placeholder resolved through the binding map
    Argument(String),
    /// A bare or quoted identifier
    UnqualifiedName,
    /// `schema.entity`
    QualifiedName,
    /// Either identifier form
    Name,
    /// Alternation separator; only lives inside the parser
    Pipe,
    /// Members in sequence
    Group(Vec<Node>),
    /// Exactly one of the members
    Choice(Vec<Node>),
    /// Members in sequence between literal parentheses
    InParens(Vec<Node>),
    /// One or more occurrences separated by the delimiter
    Repeat(Box<Node>, Delimiter),
    /// Zero or one occurrence; removed by normalizing
    Maybe(Box<Node>),
}

impl Node {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    pub fn argument(name: impl Into<String>) -> Self {
        Node::Argument(name.into())
    }

    pub fn repeat(inner: Node, delimiter: Delimiter) -> Self {
        Node::Repeat(Box::new(inner), delimiter)
    }

    pub fn maybe(inner: Node) -> Self {
        Node::Maybe(Box::new(inner))
    }

    pub fn is_maybe(&self) -> bool {
        matches!(self, Node::Maybe(_))
    }

    pub fn is_pipe(&self) -> bool {
        matches!(self, Node::Pipe)
    }

    /// Members of the group kinds (`Group`, `Choice`, `InParens`)
    pub fn members(&self) -> Option<&[Node]> {
        match self {
            Node::Group(members) | Node::Choice(members) | Node::InParens(members) => {
                Some(members)
            }
            _ => None,
        }
    }

    /// Short kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "Literal",
            Node::Argument(_) => "Argument",
            Node::UnqualifiedName => "UnqualifiedName",
            Node::QualifiedName => "QualifiedName",
            Node::Name => "Name",
            Node::Pipe => "Pipe",
            Node::Group(_) => "Group",
            Node::Choice(_) => "Choice",
            Node::InParens(_) => "InParens",
            Node::Repeat(_, _) => "Repeat",
            Node::Maybe(_) => "Maybe",
        }
    }

    /// Whether any `Maybe` remains anywhere below this node
    pub fn contains_maybe(&self) -> bool {
        match self {
            Node::Maybe(_) => true,
            Node::Repeat(inner, _) => inner.contains_maybe(),
            Node::Group(members) | Node::Choice(members) | Node::InParens(members) => {
                members.iter().any(Node::contains_maybe)
            }
            _ => false,
        }
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[Node]) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", member)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => write!(f, "Literal({})", text),
            Node::Argument(name) => write!(f, "Argument({})", name),
            Node::UnqualifiedName => write!(f, "UnqualifiedName"),
            Node::QualifiedName => write!(f, "QualifiedName"),
            Node::Name => write!(f, "Name"),
            Node::Pipe => write!(f, "Pipe"),
            Node::Group(members) => {
                write!(f, "Group[")?;
                write_members(f, members)?;
                write!(f, "]")
            }
            Node::Choice(members) => {
                write!(f, "Choice[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, "]")
            }
            Node::InParens(members) => {
                write!(f, "InParens[")?;
                write_members(f, members)?;
                write!(f, "]")
            }
            Node::Repeat(inner, delimiter) => write!(f, "Repeat{}({})", delimiter, inner),
            Node::Maybe(inner) => write!(f, "Maybe({})", inner),
        }
    }
}
