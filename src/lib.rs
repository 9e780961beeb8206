//! # pgtonic
//!
//! Compiles the grammar notation used by statement-syntax references
//! (`[ optional ]`, `{ a | b }`, `[, ...]`, `( ... )`, placeholders) into
//! matchers that decide whether a candidate statement fits one grammar form.
//!
//! File Layout
//!
//! src/grammar
//!   ├── lexing        grammar text to tokens (logos)
//!   ├── parsing       tokens to the grammar AST, recursive descent
//!   ├── normalizing   optional nodes expanded into explicit choices
//!   ├── patterns      normalized AST to regex fragments
//!   ├── template      grammar definitions and their placeholder bindings
//!   └── resolver      compile, memoize and match
//! src/pg13            the PostgreSQL 13 template catalog
//!
//! The pipeline is data in, data out: every stage is a pure function over the
//! previous stage's output, and only the [`Resolver`](grammar::resolver::Resolver)
//! keeps state (its cache of compiled templates).

pub mod grammar;
pub mod pg13;

pub use grammar::error::CompileError;
pub use grammar::resolver::{CompiledTemplate, MatchOptions, Resolver};
pub use grammar::template::{Bindings, Template};
