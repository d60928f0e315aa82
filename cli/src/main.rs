//! regraft CLI - binary entry point.
//!
//! Reads a JSON document (file argument or stdin), builds a value graph
//! from it, deep-clones the graph, and writes the clone back to stdout as
//! pretty-printed JSON. Mostly a demonstration surface: JSON input is
//! always acyclic, so the interesting cases (cycles, shared subgraphs,
//! symbol keys) live in the library and its tests, not here.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use regraft_engine::{CloneOptions, deep_clone};
use regraft_types::{value_from_json, value_to_json};

const USAGE: &str = "\
Usage: regraft [--strict] [FILE]

Deep-clone the JSON value graph in FILE (or stdin) and print the clone.

Options:
  --strict    fail on values with no clone strategy instead of sharing them
  -h, --help  show this help
";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("REGRAFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

#[derive(Debug, Default)]
struct Args {
    strict: bool,
    input: Option<PathBuf>,
    help: bool,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    for arg in raw {
        match arg.as_str() {
            "--strict" => args.strict = true,
            "-h" | "--help" => args.help = true,
            flag if flag.starts_with('-') => bail!("unknown option: {flag}\n\n{USAGE}"),
            _ => {
                if args.input.is_some() {
                    bail!("expected at most one input file\n\n{USAGE}");
                }
                args.input = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(args)
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            if io::stdin().is_terminal() {
                bail!("no input file and stdin is a terminal\n\n{USAGE}");
            }
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = parse_args(env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    let raw = read_input(&args)?;
    let doc: serde_json::Value = serde_json::from_str(&raw).context("input is not valid JSON")?;
    let source = value_from_json(doc);
    tracing::debug!(bytes = raw.len(), strict = args.strict, "input parsed");

    let options = if args.strict {
        CloneOptions::strict()
    } else {
        CloneOptions::new()
    };
    let clone = deep_clone(&source, &options).context("clone failed")?;

    let rendered = value_to_json(&clone).context("clone cannot be rendered as JSON")?;
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}
