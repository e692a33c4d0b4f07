//! Command-line interface for gitpaint
//! Colorizes blocks of pasted git output and exports the declarative grammar.
//!
//! Usage:
//!   gitpaint colorize `<path>` [--lang `<tag>`]   - Colorize a block ("-" reads stdin)
//!   gitpaint detect `<path>` [--all]              - Print the detected shape
//!   gitpaint grammar [--pretty]                   - Print the TextMate grammar as JSON
//!   gitpaint shapes                               - List shapes in dispatch order
//!
//! Global options: `--config <file>`, `-v/--verbose`, `-q/--quiet`.
mod logging;

use clap::{Arg, ArgAction, ArgMatches, Command};
use gitpaint::config::{GitpaintConfig, Loader};
use gitpaint::detection::detect;
use gitpaint::engine::DISPATCH;
use gitpaint::grammar::Grammar;
use gitpaint::{classify, Document, Engine, Result, Shape};
use logging::Verbosity;
use std::io::Read;

fn cli() -> Command {
    Command::new("gitpaint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Re-applies terminal colors to pasted git output")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log classification decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("colorize")
                .about("Colorize a block of git output")
                .arg(path_arg())
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .help("Language tag of the block (default: the canonical tag)"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Print the shape of a block of git output")
                .arg(path_arg())
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Print every shape whose detector matches, in dispatch order")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("grammar")
                .about("Print the declarative grammar as JSON")
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print the JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("shapes").about("List shapes in dispatch order"))
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the block, or - for stdin")
        .required(true)
        .index(1)
}

fn main() {
    let matches = cli().get_matches();

    logging::init_subscriber(Verbosity::from_flags(
        matches.get_flag("verbose"),
        matches.get_flag("quiet"),
    ));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches.get_one::<String>("config"))?;

    match matches.subcommand() {
        Some(("colorize", sub)) => {
            let lang = sub.get_one::<String>("lang").map(String::as_str);
            handle_colorize_command(&config, required(sub, "path"), lang)
        }
        Some(("detect", sub)) => {
            handle_detect_command(&config, required(sub, "path"), sub.get_flag("all"))
        }
        Some(("grammar", sub)) => handle_grammar_command(&config, sub.get_flag("pretty")),
        Some(("shapes", _)) => {
            handle_shapes_command();
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn required<'m>(matches: &'m ArgMatches, id: &str) -> &'m str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_else(|| unreachable!("clap enforces required argument {id}"))
}

fn load_config(path: Option<&String>) -> Result<GitpaintConfig> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    Ok(loader.build()?)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Handle the colorize command
fn handle_colorize_command(config: &GitpaintConfig, path: &str, lang: Option<&str>) -> Result<()> {
    let source = read_input(path)?;
    let engine = Engine::from_config(config)?;
    let lang = lang.unwrap_or_else(|| engine.canonical_language());

    let mut doc = Document::new(lang, &source);
    let outcome = engine.process(&mut doc);
    tracing::info!(target: "gitpaint.cli", path, lang, outcome = ?outcome, "processed block");

    print!("{}", doc.raw_text());
    Ok(())
}

/// Handle the detect command
fn handle_detect_command(config: &GitpaintConfig, path: &str, all: bool) -> Result<()> {
    let source = read_input(path)?;
    let doc = Document::new(config.language.canonical.as_str(), &source);

    if !all {
        println!("{}", classify(&doc));
        return Ok(());
    }

    let matching: Vec<Shape> = DISPATCH
        .iter()
        .map(|entry| entry.primary)
        .filter(|shape| detect(*shape, &doc))
        .collect();
    if matching.is_empty() {
        println!("{}", Shape::None);
    }
    for shape in matching {
        println!("{}", shape);
    }
    Ok(())
}

/// Handle the grammar command
fn handle_grammar_command(config: &GitpaintConfig, pretty: bool) -> Result<()> {
    let grammar = Grammar::for_language(&config.language);
    println!("{}", grammar.to_json(pretty)?);
    Ok(())
}

/// Handle the shapes command
fn handle_shapes_command() {
    for entry in &DISPATCH {
        if entry.also.is_empty() {
            println!("{}", entry.primary);
        } else {
            let also: Vec<&str> = entry.also.iter().map(|shape| shape.name()).collect();
            println!("{} (also: {})", entry.primary, also.join(", "));
        }
    }
}
