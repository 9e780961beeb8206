//! Grammar compiler pipeline
//!
//! grammar text → [lexing] → tokens → [parsing] → AST → [normalizing] →
//! normalized AST → [patterns] (+ bindings) → pattern set → match.
//!
//! [template] holds the inputs and [resolver] ties the stages together.

pub mod error;
pub mod lexing;
pub mod normalizing;
pub mod parsing;
pub mod patterns;
pub mod resolver;
pub mod template;
