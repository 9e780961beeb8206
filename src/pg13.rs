//! PostgreSQL 13 template catalog
//!
//! Grammar texts transcribed from the PostgreSQL 13 reference pages. Where a
//! transcription does not compile, or compiles to the wrong language, the
//! template carries a correction next to the original text.

pub mod create_trigger;
pub mod grant;

use crate::grammar::error::CompileError;
use crate::grammar::resolver::Resolver;
use crate::grammar::template::Template;
use std::fmt;
use std::str::FromStr;

/// The statement kinds the catalog covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Grant,
    CreateTrigger,
}

impl StatementKind {
    pub const ALL: [StatementKind; 2] = [StatementKind::Grant, StatementKind::CreateTrigger];

    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Grant => "grant",
            StatementKind::CreateTrigger => "create-trigger",
        }
    }

    /// Every template describing a form of this statement
    pub fn templates(&self) -> &'static [Template] {
        match self {
            StatementKind::Grant => grant::TEMPLATES.as_slice(),
            StatementKind::CreateTrigger => create_trigger::TEMPLATES.as_slice(),
        }
    }

    /// Whether any form of this statement matches `candidate`
    pub fn is_match(&self, resolver: &Resolver, candidate: &str) -> Result<bool, CompileError> {
        resolver.is_match_any(self.templates(), candidate)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = StatementKind::ALL.iter().map(|k| k.name()).collect();
                format!("Unknown statement kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// The statement kinds with a form that matches `candidate`
pub fn matching_kinds(
    resolver: &Resolver,
    candidate: &str,
) -> Result<Vec<StatementKind>, CompileError> {
    let mut kinds = Vec::new();
    for kind in StatementKind::ALL {
        if kind.is_match(resolver, candidate)? {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
