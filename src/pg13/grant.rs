//! `GRANT` on tables, as documented for PostgreSQL 13

use crate::grammar::template::Template;
use once_cell::sync::Lazy;
use std::sync::Arc;

static UNQUALIFIED_NAME: Lazy<Arc<Template>> =
    Lazy::new(|| Arc::new(Template::new("{ UNQUALIFIED_NAME }")));

static NAME: Lazy<Arc<Template>> = Lazy::new(|| Arc::new(Template::new("{ NAME }")));

static ROLE_SPECIFICATION: Lazy<Arc<Template>> = Lazy::new(|| {
    Arc::new(
        Template::new(
            "
    [ GROUP ] role_name
  | PUBLIC
  | CURRENT_USER
  | SESSION_USER
",
        )
        .bind("role_name", UNQUALIFIED_NAME.clone()),
    )
});

fn with_bindings(template: Template) -> Template {
    template
        .bind("table_name", NAME.clone())
        .bind("schema_name", UNQUALIFIED_NAME.clone())
        .bind("column_name", UNQUALIFIED_NAME.clone())
        .bind("role_specification", ROLE_SPECIFICATION.clone())
}

pub static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        with_bindings(Template::new(
            "
GRANT { { SELECT | INSERT | UPDATE | DELETE | TRUNCATE | REFERENCES | TRIGGER }
    [, ...] | ALL [ PRIVILEGES ] }
    ON { [ TABLE ] table_name [, ...]
         | ALL TABLES IN SCHEMA schema_name [, ...] }
    TO role_specification [, ...] [ WITH GRANT OPTION ]
",
        )),
        // As transcribed, the `[, ...]` repeats only the column list
        with_bindings(
            Template::new(
                "
GRANT { { SELECT | INSERT | UPDATE | REFERENCES } ( column_name [, ...] )
    [, ...] | ALL [ PRIVILEGES ] ( column_name [, ...] ) }
    ON [ TABLE ] table_name [, ...]
    TO role_specification [, ...] [ WITH GRANT OPTION ]
",
            )
            .corrected(
                "
GRANT { { { SELECT | INSERT | UPDATE | REFERENCES } ( column_name [, ...] ) }
    [, ...] | ALL [ PRIVILEGES ] ( column_name [, ...] ) }
    ON [ TABLE ] table_name [, ...]
    TO role_specification [, ...] [ WITH GRANT OPTION ]
",
            ),
        ),
    ]
});
