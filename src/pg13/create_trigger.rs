//! `CREATE TRIGGER`, as documented for PostgreSQL 13

use crate::grammar::template::Template;
use once_cell::sync::Lazy;
use std::sync::Arc;

static COLUMN_NAME: Lazy<Arc<Template>> =
    Lazy::new(|| Arc::new(Template::new("{ UNQUALIFIED_NAME }")));

static NAME: Lazy<Arc<Template>> = Lazy::new(|| Arc::new(Template::new("{ NAME }")));

pub static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![Template::new(
        "
CREATE [ CONSTRAINT ] TRIGGER name { BEFORE | AFTER | INSTEAD OF } { event [ OR ... ] }
    ON table_name
    [ FROM referenced_table_name ]
    [ NOT DEFERRABLE | [ DEFERRABLE ] [ INITIALLY IMMEDIATE | INITIALLY DEFERRED ] ]
    [ REFERENCING { { OLD | NEW } TABLE [ AS ] transition_relation_name } [ ... ] ]
    [ FOR [ EACH ] { ROW | STATEMENT } ]
    [ WHEN ( condition ) ]
    EXECUTE { FUNCTION | PROCEDURE } function_name ( arguments )
",
    )
    // `[ DEFERRABLE ] [ INITIALLY ... ]` would expand to an empty variant,
    // and the function may be called with an empty argument list
    .corrected(
        "
CREATE [ CONSTRAINT ] TRIGGER name { BEFORE | AFTER | INSTEAD OF } { event [ OR ... ] }
    ON table_name
    [ FROM referenced_table_name ]
    [ NOT DEFERRABLE | DEFERRABLE [ INITIALLY IMMEDIATE | INITIALLY DEFERRED ]
      | INITIALLY IMMEDIATE | INITIALLY DEFERRED ]
    [ REFERENCING { { OLD | NEW } TABLE [ AS ] transition_relation_name } [ ... ] ]
    [ FOR [ EACH ] { ROW | STATEMENT } ]
    [ WHEN ( condition ) ]
    EXECUTE { FUNCTION | PROCEDURE } function_name { ( ) | ( arguments ) }
",
    )
    .bind("name", COLUMN_NAME.clone())
    .bind(
        "event",
        Template::new("{ INSERT | UPDATE [ OF column_name [, ...] ] | DELETE | TRUNCATE }")
            .bind("column_name", COLUMN_NAME.clone()),
    )
    .bind("table_name", NAME.clone())
    .bind("referenced_table_name", NAME.clone())
    .bind("transition_relation_name", NAME.clone())
    // Expressions are not parsed; a bare column reference stands in
    .bind("condition", NAME.clone())
    .bind("function_name", NAME.clone())
    // Literal string constants are not modeled, only simple names
    .bind("arguments", Template::new("{ UNQUALIFIED_NAME [, ...] }"))]
});
