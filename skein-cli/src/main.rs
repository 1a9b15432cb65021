//! Command-line interface for skein
//! This binary is used to parse, lint and inspect skein configuration files.
//!
//! Usage:
//!   skein parse `<path>` [--format `<format>`]    - Parse a document and print its value tree
//!   skein tokens `<path>` [--flavor `<flavor>`]   - Print the editor parse (tree, tokens, diagnostics)
//!   skein lint `<path>` [--indent-unit `<n>`]     - Run the style linter plus the parser's diagnostics
//!   skein check `<path>`                          - Validate a document, reporting the first fatal error
//!   skein scrape `<report>` [--source `<path>`]   - Recover diagnostics from a legacy validator report

use clap::{Arg, ArgAction, Command};
use skein_parser::skein::diagnostics::{scrape_legacy_report, DiagnosticSeverity};
use skein_parser::skein::error::source_context;
use skein_parser::skein::flavor::FileFlavor;
use skein_parser::skein::lints::{LintOptions, Linter};
use skein_parser::skein::parsing;
use skein_parser::skein::source::SourceDocument;

fn main() {
    let matches = Command::new("skein")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and linting skein configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a document and print its value tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the skein file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the editor parse as JSON (tree, tokens, diagnostics)")
                .arg(
                    Arg::new("path")
                        .help("Path to the skein file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("flavor")
                        .long("flavor")
                        .help("Flavor override ('auto' derives it from the file name)")
                        .default_value("auto"),
                ),
        )
        .subcommand(
            Command::new("lint")
                .about("Run the style linter plus the parser's diagnostics")
                .arg(
                    Arg::new("path")
                        .help("Path to the skein file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("indent-unit")
                        .long("indent-unit")
                        .help("Expected spaces per indentation level")
                        .default_value("2"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit diagnostics as JSON instead of text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a document, reporting the first fatal error")
                .arg(
                    Arg::new("path")
                        .help("Path to the skein file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("scrape")
                .about("Recover structured diagnostics from a legacy validator report")
                .arg(
                    Arg::new("report")
                        .help("Path to the report file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help("The skein file the report talks about, for column refinement"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("parse", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_parse_command(path, format);
        }
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let flavor = sub.get_one::<String>("flavor").unwrap();
            handle_tokens_command(path, flavor);
        }
        Some(("lint", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let unit = sub.get_one::<String>("indent-unit").unwrap();
            let json = sub.get_flag("json");
            handle_lint_command(path, unit, json);
        }
        Some(("check", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        Some(("scrape", sub)) => {
            let report = sub.get_one::<String>("report").unwrap();
            let source = sub.get_one::<String>("source").map(String::as_str);
            handle_scrape_command(report, source);
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn resolve_flavor(path: &str, flag: &str) -> FileFlavor {
    match flag {
        "auto" => FileFlavor::from_path(path),
        "blueprint" => FileFlavor::Blueprint,
        "view" => FileFlavor::View,
        "data" => FileFlavor::Data,
        "env" => FileFlavor::Env,
        "machine" => FileFlavor::Machine,
        "generic" => FileFlavor::Generic,
        other => {
            eprintln!("Unknown flavor '{}'", other);
            eprintln!("Available flavors: auto, blueprint, view, data, env, machine, generic");
            std::process::exit(1);
        }
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, format: &str) {
    let source = read_source(path);
    let tree = parsing::parse_str(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        std::process::exit(1);
    });

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&tree).unwrap_or_else(|e| {
            eprintln!("Error formatting tree: {}", e);
            std::process::exit(1);
        }),
        "yaml" => serde_yaml::to_string(&tree).unwrap_or_else(|e| {
            eprintln!("Error formatting tree: {}", e);
            std::process::exit(1);
        }),
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: json, yaml");
            std::process::exit(1);
        }
    };
    println!("{}", rendered.trim_end());
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, flavor_flag: &str) {
    let source = read_source(path);
    let flavor = resolve_flavor(path, flavor_flag);
    let parse = parsing::parse_with_tokens(&SourceDocument::new(&source), flavor);

    let rendered = serde_json::to_string_pretty(&parse).unwrap_or_else(|e| {
        eprintln!("Error formatting parse: {}", e);
        std::process::exit(1);
    });
    println!("{}", rendered);
}

/// Handle the lint command
fn handle_lint_command(path: &str, unit: &str, json: bool) {
    let unit: usize = unit.parse().unwrap_or_else(|_| {
        eprintln!("indent-unit must be a positive integer");
        std::process::exit(1);
    });
    if unit == 0 {
        eprintln!("indent-unit must be at least 1");
        std::process::exit(1);
    }
    let source = read_source(path);

    let mut diagnostics = Linter::new(LintOptions { indent_unit: unit }).lint(&source);
    let parse = parsing::parse_with_tokens(
        &SourceDocument::new(&source),
        FileFlavor::from_path(path),
    );
    diagnostics.extend(parse.diagnostics);
    diagnostics.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(a.severity.cmp(&b.severity))
    });

    if json {
        let rendered = serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|e| {
            eprintln!("Error formatting diagnostics: {}", e);
            std::process::exit(1);
        });
        println!("{}", rendered);
    } else {
        for diagnostic in &diagnostics {
            println!(
                "{}:{}:{}: {} [{}] {}",
                path,
                diagnostic.range.start.line + 1,
                diagnostic.range.start.column + 1,
                diagnostic.severity,
                diagnostic.source,
                diagnostic.message
            );
        }
    }

    if diagnostics
        .iter()
        .any(|d| d.severity == DiagnosticSeverity::Error)
    {
        std::process::exit(1);
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let source = read_source(path);
    if let Err(error) = parsing::parse_str(&source) {
        eprintln!("{}: {}", path, error);
        eprint!("{}", source_context(&source, &error.range()));
        std::process::exit(1);
    }
}

/// Handle the scrape command
fn handle_scrape_command(report_path: &str, source_path: Option<&str>) {
    let report = read_source(report_path);
    let source = source_path.map(read_source);
    let diagnostics = scrape_legacy_report(&report, source.as_deref());

    let rendered = serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|e| {
        eprintln!("Error formatting diagnostics: {}", e);
        std::process::exit(1);
    });
    println!("{}", rendered);
}
