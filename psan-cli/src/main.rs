//! Command-line interface for psan
//! This binary renders review fragments for entity candidates and prepares evaluation data.
//!
//! Usage:
//!   psan render `<path>` --document `<id>` [--decisions `<json>`] [--focus `<start>..<end>`]
//!               [--margin `<n>`] [--config `<toml>`] [--format html|json]
//!   psan features `<input>` `<features_csv>` `<text_out>` [--config `<toml>`]
//!   psan codes                                              - List entity category codes
//!
//! Diagnostics go to stderr; set `RUST_LOG=psan_render=debug` to trace renders.

mod commands;

use clap::{value_parser, Arg, ArgMatches, Command};
use commands::RenderRequest;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the defaults and ./psan.toml");

    let matches = Command::new("psan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Review named-entity candidates in annotated documents")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("render")
                .about("Render the review fragment around one candidate")
                .arg(
                    Arg::new("path")
                        .help("Path to the annotated document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("document")
                        .long("document")
                        .short('d')
                        .help("Document id used for decision lookups")
                        .value_parser(value_parser!(u64))
                        .required(true),
                )
                .arg(
                    Arg::new("decisions")
                        .long("decisions")
                        .help("JSON file with recorded decisions"),
                )
                .arg(
                    Arg::new("focus")
                        .long("focus")
                        .help("Focus span as start..end (default: first undecided candidate)"),
                )
                .arg(
                    Arg::new("margin")
                        .long("margin")
                        .short('m')
                        .help("Characters shown around the focus span")
                        .value_parser(value_parser!(usize)),
                )
                .arg(config_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["html", "json"])
                        .default_value("html"),
                ),
        )
        .subcommand(
            Command::new("features")
                .about("Extract confirmed entities as start,end,label rows plus the plain text")
                .arg(Arg::new("input").help("Annotated document").required(true).index(1))
                .arg(
                    Arg::new("features")
                        .help("CSV file to write features to")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("text")
                        .help("File to write the plain text to")
                        .required(true)
                        .index(3),
                )
                .arg(config_arg),
        )
        .subcommand(Command::new("codes").about("List the entity category codes"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(sub),
        Some(("features", sub)) => handle_features_command(sub),
        Some(("codes", _)) => Ok(commands::codes()),
        _ => Err("Unknown command".to_string()),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) -> Result<String, String> {
    let request = RenderRequest {
        path: required(matches, "path")?,
        document: matches
            .get_one::<u64>("document")
            .copied()
            .ok_or("--document is required")?,
        decisions: optional(matches, "decisions"),
        focus: optional(matches, "focus"),
        margin: matches.get_one::<usize>("margin").copied(),
        config: optional(matches, "config"),
        format: required(matches, "format")?,
    };
    commands::render(&request)
}

/// Handle the features command
fn handle_features_command(matches: &ArgMatches) -> Result<String, String> {
    commands::features(
        required(matches, "input")?,
        Path::new(required(matches, "features")?),
        Path::new(required(matches, "text")?),
        optional(matches, "config"),
    )
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    optional(matches, name).ok_or_else(|| format!("Missing argument '{}'", name))
}

fn optional<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(String::as_str)
}
