//! Templates
//!
//! A template is one grammar definition as transcribed from a syntax
//! reference, optionally with a hand-corrected text that replaces it, plus
//! the templates its placeholders refer to. Templates are immutable and are
//! shared through `Arc` so one definition (say, a column name) can be bound
//! in many places.

use crate::grammar::error::CompileError;
use crate::grammar::normalizing::normalize;
use crate::grammar::parsing::{parse_text, Node};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// Placeholder name to the template that defines it
pub type Bindings = BTreeMap<String, Arc<Template>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    original: String,
    corrected: Option<String>,
    bindings: Bindings,
}

impl Template {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            corrected: None,
            bindings: Bindings::new(),
        }
    }

    /// Replace the transcribed text with a corrected one
    pub fn corrected(mut self, corrected: impl Into<String>) -> Self {
        self.corrected = Some(corrected.into());
        self
    }

    /// Bind a placeholder to the template describing its syntax
    pub fn bind(mut self, name: impl Into<String>, template: impl Into<Arc<Template>>) -> Self {
        self.bindings.insert(name.into(), template.into());
        self
    }

    /// The text the pipeline compiles: the correction when there is a
    /// non-empty one, otherwise the original
    pub fn text(&self) -> &str {
        match self.corrected.as_deref() {
            Some(corrected) if !corrected.trim().is_empty() => corrected,
            _ => &self.original,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn correction(&self) -> Option<&str> {
        self.corrected.as_deref()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The AST of [Template::text], before normalizing
    pub fn ast(&self) -> Result<Node, CompileError> {
        parse_text(self.text())
    }

    /// The AST with every optional node expanded
    pub fn normalized_ast(&self) -> Result<Node, CompileError> {
        Ok(normalize(&self.ast()?)?)
    }

    /// Structural key covering the compiled text and, recursively, every
    /// binding. Equal keys compile to equal patterns.
    pub fn identity(&self) -> String {
        let mut key = String::new();
        self.write_identity(&mut key);
        key
    }

    fn write_identity(&self, key: &mut String) {
        let _ = write!(key, "{:?}", self.text());
        if self.bindings.is_empty() {
            return;
        }
        key.push_str(" where {");
        for (i, (name, template)) in self.bindings.iter().enumerate() {
            if i > 0 {
                key.push_str(", ");
            }
            key.push_str(name);
            key.push_str(": ");
            template.write_identity(key);
        }
        key.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_overrides_original() {
        let template = Template::new("( [ A ] )").corrected("{ ( ) | ( A ) }");
        assert_eq!(template.text(), "{ ( ) | ( A ) }");
        assert_eq!(template.original(), "( [ A ] )");
        assert!(Template::new(template.original()).normalized_ast().is_err());
        assert!(template.normalized_ast().is_ok());
    }

    #[test]
    fn test_optional_alternative_needs_no_correction() {
        assert!(Template::new("{ A | [ B ] }").normalized_ast().is_ok());
    }

    #[test]
    fn test_blank_correction_is_ignored() {
        let template = Template::new("A").corrected("  ");
        assert_eq!(template.text(), "A");
    }

    #[test]
    fn test_identity_covers_bindings() {
        let name = Arc::new(Template::new("{ UNQUALIFIED_NAME }"));
        let a = Template::new("TO role").bind("role", name.clone());
        let b = Template::new("TO role").bind("role", Template::new("{ NAME }"));
        let c = Template::new("TO role").bind("role", name);

        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), c.identity());
        assert_eq!(
            a.identity(),
            "\"TO role\" where {role: \"{ UNQUALIFIED_NAME }\"}"
        );
    }

    #[test]
    fn test_identity_uses_selected_text() {
        let a = Template::new("A").corrected("B");
        let b = Template::new("B");
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_ast_reports_stage_errors() {
        assert!(matches!(
            Template::new("GRANT 1").ast().unwrap_err(),
            CompileError::Lex(_)
        ));
        assert!(matches!(
            Template::new("[ A").ast().unwrap_err(),
            CompileError::Parse(_)
        ));
        assert!(matches!(
            Template::new("[ A ] [ B ]").normalized_ast().unwrap_err(),
            CompileError::Normalize(_)
        ));
    }
}
