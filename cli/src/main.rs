//! optscan: classify a token stream against short/long option specs.
//!
//! The binary parses its own command line with `optscan-core` — the
//! library under test is also the CLI layer. Options for optscan itself
//! come first, then `--`, then the tokens to classify.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use optscan_core::{LongOpt, OptionEvent, ParserState, ShortSpec, validate_table};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

const USAGE: &str = "\
Usage: optscan [OPTIONS] -- TOKENS...

Classify TOKENS as option events and positional arguments.

Options:
  -s, --optstring SPEC  short-option spec, e.g. 'abc:d::'
  -t, --table FILE      long-option table, JSON (or YAML by extension)
  -l, --long            force the long-option scanner (requires --table)
  -f, --format FORMAT   output format: text, json, or yaml (default: text)
  -v, --verbose         enable debug logging on stderr
  -h, --help            print this help
  -V, --version         print version

Exactly one of --optstring or --table selects the scanner. Because the
scanner is non-permuting, optscan's own options must precede the first
`--`; everything after it is classified verbatim.
";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!("unsupported output format: {raw}")),
        }
    }
}

/// One scan event, plus the resolved long descriptor name when the long
/// scanner matched one.
#[derive(Debug, Serialize)]
struct EventRecord<'t> {
    event: OptionEvent<'t>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long: Option<String>,
}

/// Full classification of one token stream.
#[derive(Debug, Serialize)]
struct Report<'t> {
    events: Vec<EventRecord<'t>>,
    positionals: Vec<&'t str>,
}

/// Descriptor table for optscan's own command line.
fn cli_table() -> Vec<LongOpt> {
    vec![
        LongOpt::with_value("optstring", Some('s')),
        LongOpt::with_value("table", Some('t')),
        LongOpt::flag("long", Some('l')),
        LongOpt::with_value("format", Some('f')),
        LongOpt::flag("verbose", Some('v')),
        LongOpt::flag("help", Some('h')),
        LongOpt::flag("version", Some('V')),
    ]
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    run(&args)
}

fn run(args: &[String]) -> ExitCode {
    let own = cli_table();
    let mut state = ParserState::new(args);
    let mut optstring: Option<ShortSpec> = None;
    let mut long_table: Option<Vec<LongOpt>> = None;
    let mut force_long = false;
    let mut format = OutputFormat::Text;
    let mut verbose = false;

    loop {
        match state.next_long(&own) {
            OptionEvent::Done => break,
            OptionEvent::Flag {
                short: Some('h'), ..
            } => {
                print!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            OptionEvent::Flag {
                short: Some('V'), ..
            } => {
                println!("optscan {PACKAGE_VERSION}");
                return ExitCode::SUCCESS;
            }
            OptionEvent::Flag {
                short: Some('v'), ..
            } => verbose = true,
            OptionEvent::Flag {
                short: Some('l'), ..
            } => force_long = true,
            OptionEvent::Flag {
                short: Some('s'),
                value: Some(raw),
            } => match raw.parse::<ShortSpec>() {
                Ok(spec) => optstring = Some(spec),
                Err(err) => {
                    eprintln!("optscan: invalid optstring '{raw}': {err}");
                    return ExitCode::from(EXIT_USAGE);
                }
            },
            OptionEvent::Flag {
                short: Some('t'),
                value: Some(path),
            } => match load_table(Path::new(path)) {
                Ok(table) => long_table = Some(table),
                Err(message) => {
                    eprintln!("optscan: {message}");
                    return ExitCode::from(EXIT_FAILURE);
                }
            },
            OptionEvent::Flag {
                short: Some('f'),
                value: Some(raw),
            } => match OutputFormat::parse(raw) {
                Ok(parsed) => format = parsed,
                Err(message) => {
                    eprintln!("optscan: {message}");
                    return ExitCode::from(EXIT_USAGE);
                }
            },
            event => {
                match state.last_error() {
                    Some(message) => eprintln!("optscan: {message}"),
                    None => eprintln!("optscan: unexpected event: {event:?}"),
                }
                eprintln!("try 'optscan --help'");
                return ExitCode::from(EXIT_USAGE);
            }
        }
    }

    if optstring.is_some() && long_table.is_some() {
        eprintln!("optscan: use either --optstring or --table, not both");
        return ExitCode::from(EXIT_USAGE);
    }
    if force_long && long_table.is_none() {
        eprintln!("optscan: --long requires --table");
        return ExitCode::from(EXIT_USAGE);
    }

    init_tracing(verbose);

    let tokens: Vec<&str> = state.positionals().collect();
    debug!(count = tokens.len(), "classifying tokens");

    let mut scan = ParserState::new(&tokens);
    let report = if let Some(table) = &long_table {
        scan_long(&mut scan, table)
    } else if let Some(spec) = &optstring {
        scan_short(&mut scan, spec)
    } else {
        eprintln!("optscan: one of --optstring or --table is required");
        eprintln!("try 'optscan --help'");
        return ExitCode::from(EXIT_USAGE);
    };

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("optscan: JSON serialization failed: {err}");
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        OutputFormat::Yaml => match serde_yaml::to_string(&report) {
            Ok(yaml) => print!("{yaml}"),
            Err(err) => {
                eprintln!("optscan: YAML serialization failed: {err}");
                return ExitCode::from(EXIT_FAILURE);
            }
        },
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads and validates a descriptor table from a JSON or YAML file.
fn load_table(path: &Path) -> Result<Vec<LongOpt>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let table: Vec<LongOpt> = if is_yaml {
        serde_yaml::from_str(&raw)
            .map_err(|err| format!("failed to parse {}: {err}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .map_err(|err| format!("failed to parse {}: {err}", path.display()))?
    };

    let problems = validate_table(&table);
    if !problems.is_empty() {
        let joined = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(format!("invalid option table {}: {joined}", path.display()));
    }
    Ok(table)
}

fn scan_short<'t, T: AsRef<str>>(state: &mut ParserState<'t, T>, spec: &ShortSpec) -> Report<'t> {
    let mut events = Vec::new();
    loop {
        let event = state.next_short(spec);
        events.push(EventRecord { event, long: None });
        if event == OptionEvent::Done {
            break;
        }
    }
    let positionals = state.positionals().collect();
    Report {
        events,
        positionals,
    }
}

fn scan_long<'t, T: AsRef<str>>(state: &mut ParserState<'t, T>, table: &[LongOpt]) -> Report<'t> {
    let mut events = Vec::new();
    loop {
        let event = state.next_long(table);
        let long = state.matched_long().map(|index| table[index].name.clone());
        events.push(EventRecord { event, long });
        if event == OptionEvent::Done {
            break;
        }
    }
    let positionals = state.positionals().collect();
    Report {
        events,
        positionals,
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for record in &report.events {
        match record.event {
            OptionEvent::Flag { short, value } => {
                match (short, record.long.as_deref()) {
                    (Some(c), _) => out.push_str(&format!("flag -{c}")),
                    (None, Some(name)) => out.push_str(&format!("flag --{name}")),
                    (None, None) => out.push_str("flag"),
                }
                if let Some(value) = value {
                    out.push_str(&format!(" value={value}"));
                }
                out.push('\n');
            }
            OptionEvent::Done => out.push_str("done\n"),
            OptionEvent::UnknownOption(name) => {
                out.push_str(&format!("unknown-option {name}\n"));
            }
            OptionEvent::AmbiguousOption(name) => {
                out.push_str(&format!("ambiguous-option --{name}\n"));
            }
            OptionEvent::MissingArgument(name) => {
                out.push_str(&format!("missing-argument {name}\n"));
            }
            OptionEvent::UnexpectedArgument(name) => {
                out.push_str(&format!("unexpected-argument --{name}\n"));
            }
        }
    }
    for positional in &report.positionals {
        out.push_str(&format!("positional {positional}\n"));
    }
    out
}
