//! Template resolution
//!
//! The [Resolver] runs the whole pipeline for a template, resolves its
//! placeholders by compiling the bound templates, and memoizes the result by
//! template identity. One resolver can be shared between threads: the cache
//! sits behind a mutex that is never held while compiling, since compiling a
//! template re-enters the resolver for its bindings.

use crate::grammar::error::CompileError;
use crate::grammar::parsing::Node;
use crate::grammar::patterns::{
    anchor, generate, generate_alternatives, opens_with_paren, FragmentSource,
};
use crate::grammar::template::Template;
use regex::{RegexSet, RegexSetBuilder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Knobs that change the generated matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Match keywords (and everything else) regardless of case
    pub case_insensitive: bool,
    /// Match each top-level alternative as its own pattern
    pub split_alternatives: bool,
    /// Upper bound, in bytes, on a compiled pattern set
    pub size_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            split_alternatives: true,
            size_limit: 32 * (1 << 20),
        }
    }
}

/// A template turned into patterns, ready to test statements
#[derive(Debug)]
pub struct CompiledTemplate {
    ast: Node,
    fragment: String,
    pattern: String,
    patterns: Vec<String>,
    matcher: RegexSet,
    opens_with_paren: bool,
}

impl CompiledTemplate {
    /// The normalized AST the patterns were generated from
    pub fn ast(&self) -> &Node {
        &self.ast
    }

    /// The unanchored pattern, as spliced into templates that bind this one
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// One pattern for the whole statement, with an optional terminator
    pub fn to_pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored patterns actually matched, one per top-level alternative
    pub fn to_pattern_set(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `candidate` as a whole fits at least one pattern of the set
    pub fn is_match(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }
}

pub struct Resolver {
    options: MatchOptions,
    cache: Mutex<HashMap<String, Arc<CompiledTemplate>>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default())
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self {
            options,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Compile a template, or return the cached result of an earlier call
    pub fn compile(&self, template: &Template) -> Result<Arc<CompiledTemplate>, CompileError> {
        let key = template.identity();
        if let Some(compiled) = self.lock().get(&key) {
            log::trace!("cache hit for template of {} bytes", template.text().len());
            return Ok(Arc::clone(compiled));
        }

        let compiled = Arc::new(self.build(template)?);
        let mut cache = self.lock();
        Ok(Arc::clone(cache.entry(key).or_insert(compiled)))
    }

    /// Compile `template` and test `candidate` against it
    ///
    /// Errors only come from compiling; any candidate either matches or not.
    pub fn is_match(&self, template: &Template, candidate: &str) -> Result<bool, CompileError> {
        Ok(self.compile(template)?.is_match(candidate))
    }

    /// Whether any of `templates` matches `candidate`
    pub fn is_match_any(
        &self,
        templates: &[Template],
        candidate: &str,
    ) -> Result<bool, CompileError> {
        for template in templates {
            if self.is_match(template, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of compiled templates held
    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CompiledTemplate>>> {
        // Entries are immutable once inserted, so a poisoned map is still sound
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build(&self, template: &Template) -> Result<CompiledTemplate, CompileError> {
        let ast = template.normalized_ast()?;
        let fragment = generate(&ast, template.bindings(), self)?;
        let opens_with_paren = opens_with_paren(&ast, template.bindings(), self)?;
        let pattern = anchor(&fragment);

        let patterns = if self.options.split_alternatives {
            generate_alternatives(&ast, template.bindings(), self)?
                .iter()
                .map(|alternative| anchor(alternative))
                .collect()
        } else {
            vec![pattern.clone()]
        };

        let matcher = RegexSetBuilder::new(&patterns)
            .case_insensitive(self.options.case_insensitive)
            .size_limit(self.options.size_limit)
            .build()?;

        log::debug!(
            "compiled template of {} bytes into {} patterns",
            template.text().len(),
            patterns.len()
        );

        Ok(CompiledTemplate {
            ast,
            fragment,
            pattern,
            patterns,
            matcher,
            opens_with_paren,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSource for Resolver {
    fn fragment(&self, template: &Template) -> Result<String, CompileError> {
        Ok(self.compile(template)?.fragment().to_string())
    }

    fn opens_with_paren(&self, template: &Template) -> Result<bool, CompileError> {
        Ok(self.compile(template)?.opens_with_paren)
    }
}
