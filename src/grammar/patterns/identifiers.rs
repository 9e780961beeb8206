//! Regex building blocks for identifiers and whitespace
//!
//! Identifiers are either bare (`public`, `_api_v2`) or double-quoted with
//! any non-quote content (`"A_$aaAa"`). Doubled quotes inside a quoted
//! identifier are not recognized.

/// `public`, `oli_ver`, `_dkjle_adb`
pub const UNQUOTED_IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// `"api_V2"`, `"%ab_$^&c"`
pub const QUOTED_IDENTIFIER: &str = r#""[^"]+""#;

/// A single identifier in either form
pub const UNQUALIFIED_NAME: &str = r#"([A-Za-z_][A-Za-z0-9_]*|"[^"]+")"#;

/// `schema.entity`, each side in either form
pub const QUALIFIED_NAME: &str =
    r#"(([A-Za-z_][A-Za-z0-9_]*|"[^"]+")\.([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))"#;

/// Qualified or not
pub const NAME: &str = r#"((([A-Za-z_][A-Za-z0-9_]*|"[^"]+")\.([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))|([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))"#;

/// Separator between two mandatory elements
pub const WHITESPACE: &str = r"\s+";

pub const OPTIONAL_WHITESPACE: &str = r"\s*";

/// Statement terminator accepted after a full match
pub const OPTIONAL_SEMICOLON: &str = ";?";
