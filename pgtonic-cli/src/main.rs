//! Command-line interface for pgtonic
//! Checks statements against the PostgreSQL 13 grammar catalog and shows what the
//! catalog templates compile to.
//!
//! Usage:
//!   pgtonic check `<statement>` [--kind `<kind>`]      - List the statement kinds that match
//!   pgtonic patterns --kind `<kind>` [--combined]      - Print the generated patterns
//!   pgtonic ast --kind `<kind>` [--normalized]         - Print the template ASTs
//!
//! Global options: --config `<path>`, --case-insensitive, --format text|json.
//! A statement of `-` is read from stdin.

mod logging;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use pgtonic::pg13::StatementKind;
use pgtonic::Resolver;
use pgtonic_config::{Flags, Loader, OutputFormat, PgtonicConfig};
use serde_json::json;
use std::io::Read;

/// Config file used when `--config` is absent
const CONFIG_ENV: &str = "PGTONIC_CONFIG";

fn kind_arg(required: bool) -> Arg {
    Arg::new("kind")
        .long("kind")
        .short('k')
        .help("Statement kind")
        .required(required)
        .value_parser(PossibleValuesParser::new(
            StatementKind::ALL.map(|kind| kind.name()),
        ))
}

fn build_cli() -> Command {
    Command::new("pgtonic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Match SQL statements against PostgreSQL 13 syntax references")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("case-insensitive")
                .long("case-insensitive")
                .short('i')
                .global(true)
                .help("Match keywords regardless of case")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .help("Output format (default from config: text)")
                .value_parser(["text", "json"]),
        )
        .subcommand(
            Command::new("check")
                .about("List the statement kinds a statement matches")
                .arg(
                    Arg::new("statement")
                        .help("The statement, or - to read it from stdin")
                        .required(true)
                        .index(1),
                )
                .arg(kind_arg(false)),
        )
        .subcommand(
            Command::new("patterns")
                .about("Print the patterns generated for a statement kind")
                .arg(kind_arg(true))
                .arg(
                    Arg::new("combined")
                        .long("combined")
                        .help("One pattern per template instead of one per alternative")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("ast")
                .about("Print the grammar ASTs of a statement kind")
                .arg(kind_arg(true))
                .arg(
                    Arg::new("normalized")
                        .long("normalized")
                        .help("Expand optional elements first")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    logging::init_logging();

    let matches = build_cli().get_matches();
    let (name, sub_matches) = match matches.subcommand() {
        Some(subcommand) => subcommand,
        None => {
            eprintln!("Error: no command given");
            std::process::exit(1);
        }
    };

    let config = load_config(sub_matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let resolver = Resolver::with_options(config.match_options());
    let format = config.output.format;

    match name {
        "check" => handle_check_command(&resolver, sub_matches, format),
        "patterns" => handle_patterns_command(&resolver, sub_matches, format),
        "ast" => handle_ast_command(sub_matches, format),
        other => {
            eprintln!("Error: unknown command '{}'", other);
            std::process::exit(1);
        }
    }
}

/// Defaults, then `--config` or `$PGTONIC_CONFIG`, then flag overrides
fn load_config(matches: &ArgMatches) -> Result<PgtonicConfig, pgtonic_config::ConfigError> {
    let mut loader = Loader::with_defaults();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path, true);
    } else if let Ok(path) = std::env::var(CONFIG_ENV) {
        log::debug!("loading configuration from ${}: {}", CONFIG_ENV, path);
        loader = loader.with_file(path, false);
    }
    let flags = Flags {
        case_insensitive: matches.get_flag("case-insensitive"),
        format: matches.get_one::<String>("format").cloned(),
    };
    loader.with_flags(&flags)?.load()
}

fn selected_kind(matches: &ArgMatches) -> Option<StatementKind> {
    let name = matches.get_one::<String>("kind")?;
    match name.parse::<StatementKind>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn required_kind(matches: &ArgMatches) -> StatementKind {
    selected_kind(matches).unwrap_or_else(|| {
        eprintln!("Error: --kind is required");
        std::process::exit(1);
    })
}

fn read_statement(matches: &ArgMatches) -> String {
    let statement = matches
        .get_one::<String>("statement")
        .map(String::as_str)
        .unwrap_or("-");
    if statement != "-" {
        return statement.to_string();
    }

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading statement from stdin: {}", e);
        std::process::exit(1);
    }
    input
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the check command. Exits 1 when no kind matches.
fn handle_check_command(resolver: &Resolver, matches: &ArgMatches, format: OutputFormat) {
    let statement = read_statement(matches);
    let candidates: Vec<StatementKind> = match selected_kind(matches) {
        Some(kind) => vec![kind],
        None => StatementKind::ALL.to_vec(),
    };

    let mut matched = Vec::new();
    for kind in candidates {
        match kind.is_match(resolver, &statement) {
            Ok(true) => matched.push(kind),
            Ok(false) => {}
            Err(e) => {
                eprintln!("Error compiling {} templates: {}", kind, e);
                std::process::exit(1);
            }
        }
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "statement": statement,
            "matches": matched.iter().map(|kind| kind.name()).collect::<Vec<_>>(),
        })),
        OutputFormat::Text => {
            for kind in &matched {
                println!("{}", kind);
            }
            if matched.is_empty() {
                eprintln!("No statement kind matches");
            }
        }
    }

    if matched.is_empty() {
        std::process::exit(1);
    }
}

/// Handle the patterns command
fn handle_patterns_command(resolver: &Resolver, matches: &ArgMatches, format: OutputFormat) {
    let kind = required_kind(matches);
    let combined = matches.get_flag("combined");

    let mut entries = Vec::new();
    for template in kind.templates() {
        let compiled = resolver.compile(template).unwrap_or_else(|e| {
            eprintln!("Error compiling {} template: {}", kind, e);
            std::process::exit(1);
        });
        let patterns = if combined {
            vec![compiled.to_pattern().to_string()]
        } else {
            compiled.to_pattern_set().to_vec()
        };
        entries.push((template.text().trim().to_string(), patterns));
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "kind": kind.name(),
            "templates": entries
                .iter()
                .map(|(text, patterns)| json!({ "text": text, "patterns": patterns }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Text => {
            for (_, patterns) in &entries {
                for pattern in patterns {
                    println!("{}", pattern);
                }
            }
        }
    }
}

/// Handle the ast command
fn handle_ast_command(matches: &ArgMatches, format: OutputFormat) {
    let kind = required_kind(matches);
    let normalized = matches.get_flag("normalized");

    let mut entries = Vec::new();
    for template in kind.templates() {
        let ast = if normalized {
            template.normalized_ast()
        } else {
            template.ast()
        };
        let ast = ast.unwrap_or_else(|e| {
            eprintln!("Error parsing {} template: {}", kind, e);
            std::process::exit(1);
        });
        entries.push((template.text().trim().to_string(), ast.to_string()));
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "kind": kind.name(),
            "templates": entries
                .iter()
                .map(|(text, ast)| json!({ "text": text, "ast": ast }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Text => {
            for (_, ast) in &entries {
                println!("{}", ast);
            }
        }
    }
}
