//! Snapshots of normalized ASTs and generated patterns

use pgtonic::{Resolver, Template};

#[test]
fn identifier_list_pattern() {
    let compiled = Resolver::new()
        .compile(&Template::new("{ UNQUALIFIED_NAME [, ...] }"))
        .unwrap();

    insta::assert_snapshot!(compiled.ast().to_string(), @"Group[RepeatComma(UnqualifiedName)]");
    insta::assert_snapshot!(
        compiled.to_pattern(),
        @r#"^(([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))(\s*,\s*([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))*\s*;?\s*$"#
    );
}

#[test]
fn empty_or_listed_arguments() {
    let compiled = Resolver::new()
        .compile(&Template::new("CALL F { ( ) | ( X [, ...] ) }"))
        .unwrap();

    insta::assert_snapshot!(
        compiled.ast().to_string(),
        @"Group[Literal(CALL) Literal(F) Choice[InParens[] | InParens[RepeatComma(Literal(X))]]]"
    );
    insta::assert_snapshot!(
        compiled.to_pattern(),
        @r"^CALL\s+F\s*(\(\s*\s*\)|\(\s*(X)(\s*,\s*X)*\s*\))\s*;?\s*$"
    );
}

#[test]
fn role_specification_alternatives() {
    let template = Template::new("[ GROUP ] role_name | PUBLIC | CURRENT_USER | SESSION_USER")
        .bind("role_name", Template::new("{ UNQUALIFIED_NAME }"));

    insta::assert_snapshot!(
        template.normalized_ast().unwrap().to_string(),
        @"Choice[Choice[Group[Argument(role_name)] | Group[Literal(GROUP) Argument(role_name)]] | Literal(PUBLIC) | Literal(CURRENT_USER) | Literal(SESSION_USER)]"
    );

    let compiled = Resolver::new().compile(&template).unwrap();
    insta::assert_snapshot!(compiled.to_pattern_set().join("\n"), @r#"
    ^(([A-Za-z_][A-Za-z0-9_]*|"[^"]+")|GROUP\s+([A-Za-z_][A-Za-z0-9_]*|"[^"]+"))\s*;?\s*$
    ^PUBLIC\s*;?\s*$
    ^CURRENT_USER\s*;?\s*$
    ^SESSION_USER\s*;?\s*$
    "#);
}
