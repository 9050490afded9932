//! Command-line argument parsing for the maze viewer.
//!
//! Parses args manually with `--flag=value` syntax; the slider-and-toggle
//! surface of a GUI reduced to a handful of flags.

use std::path::PathBuf;
use std::process;
use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
termview — carve a perfect maze and draw it in the terminal

USAGE:
    termview [OPTIONS]

OPTIONS:
    --width=N       Maze width in cells (default: 20)
    --height=N      Maze height in cells (default: 12)
    --animate       Show the maze being carved cell by cell
    --delay-ms=N    Milliseconds between animation steps (default: 25)
    --seed=N        Fix the random sequence for reproducible mazes
    --json=PATH     Write the finished maze as a JSON record
    --help, -h      Show this help message
    --version, -V   Show version";

#[derive(Debug, Error)]
pub enum ArgError {
    #[error("unknown option `{0}` (try --help)")]
    UnknownFlag(String),
    #[error("invalid value `{value}` for {flag}")]
    BadValue { flag: &'static str, value: String },
}

pub struct Opts {
    pub width: usize,
    pub height: usize,
    pub animate: bool,
    pub delay_ms: u64,
    pub seed: Option<u64>,
    pub json_out: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            animate: false,
            delay_ms: 25,
            seed: None,
            json_out: None,
        }
    }
}

pub fn parse(args: impl Iterator<Item = String>) -> Result<Opts, ArgError> {
    let mut opts = Opts::default();
    for arg in args {
        if arg == "--help" || arg == "-h" {
            println!("{HELP_TEXT}");
            process::exit(0);
        }
        if arg == "--version" || arg == "-V" {
            println!("termview {VERSION}");
            process::exit(0);
        }
        if arg == "--animate" {
            opts.animate = true;
        } else if let Some(v) = arg.strip_prefix("--width=") {
            opts.width = parse_num(v, "--width")?;
        } else if let Some(v) = arg.strip_prefix("--height=") {
            opts.height = parse_num(v, "--height")?;
        } else if let Some(v) = arg.strip_prefix("--delay-ms=") {
            opts.delay_ms = parse_num(v, "--delay-ms")?;
        } else if let Some(v) = arg.strip_prefix("--seed=") {
            opts.seed = Some(parse_num(v, "--seed")?);
        } else if let Some(v) = arg.strip_prefix("--json=") {
            opts.json_out = Some(PathBuf::from(v));
        } else {
            return Err(ArgError::UnknownFlag(arg));
        }
    }
    Ok(opts)
}

fn parse_num<T: std::str::FromStr>(value: &str, flag: &'static str) -> Result<T, ArgError> {
    value.parse().map_err(|_| ArgError::BadValue {
        flag,
        value: value.to_string(),
    })
}
