//! Run parameters taken from the command line.

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use crate::automaton::Rule;
use crate::error::{Error, Result};
use crate::source::PatternBits;
use crate::util::linspace;

#[derive(Debug, Clone)]
pub struct Config {
    /// Cells per row (N).
    pub width: usize,
    /// Timesteps (T).
    pub depth: usize,
    pub rule: Rule,
    pub frequencies: Vec<f64>,
    /// Seed for the initial row; `None` draws from system entropy.
    pub seed: Option<u64>,
    /// Fixed initial row pattern, takes precedence over `seed`.
    pub init: Option<PatternBits>,
    /// Density table destination; `None` means stdout.
    pub output: Option<PathBuf>,
    pub pgm: Option<PathBuf>,
    /// Analysis threads, 0 leaves the choice to rayon.
    pub jobs: usize,
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("eca-spectrum")
        .about("Power spectral density of elementary cellular automata")
        .arg(
            Arg::with_name("width")
                .short("n")
                .long("width")
                .takes_value(true)
                .default_value("700")
                .help("Number of cells"),
        )
        .arg(
            Arg::with_name("depth")
                .short("t")
                .long("depth")
                .takes_value(true)
                .default_value("1024")
                .help("Number of timesteps"),
        )
        .arg(
            Arg::with_name("rule")
                .short("r")
                .long("rule")
                .takes_value(true)
                .default_value("110")
                .help("Rule number (0-255) or 8 bit table such as 01101110"),
        )
        .arg(
            Arg::with_name("from")
                .long("from")
                .takes_value(true)
                .default_value("0")
                .allow_hyphen_values(true)
                .help("First frequency of the sweep"),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .takes_value(true)
                .default_value("10")
                .allow_hyphen_values(true)
                .help("Last frequency of the sweep"),
        )
        .arg(
            Arg::with_name("steps")
                .long("steps")
                .takes_value(true)
                .default_value("100")
                .help("Number of frequencies in the sweep"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .help("Seed for the initial row (default: system entropy)"),
        )
        .arg(
            Arg::with_name("init")
                .long("init")
                .takes_value(true)
                .help("Fixed initial row pattern, repeated to fill the width (e.g. 10)"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Write the density table here instead of stdout"),
        )
        .arg(
            Arg::with_name("pgm")
                .long("pgm")
                .takes_value(true)
                .help("Write the space-time pattern as a PGM image"),
        )
        .arg(
            Arg::with_name("jobs")
                .short("j")
                .long("jobs")
                .takes_value(true)
                .default_value("0")
                .help("Analysis threads (0 = one per core)"),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let from: f64 = parse(matches, "from")?;
        let to: f64 = parse(matches, "to")?;
        if !from.is_finite() || !to.is_finite() {
            return Err(Error::invalid("frequency sweep bounds must be finite"));
        }

        Ok(Self {
            width: parse(matches, "width")?,
            depth: parse(matches, "depth")?,
            rule: parse(matches, "rule")?,
            frequencies: linspace(from, to, parse(matches, "steps")?),
            seed: parse_opt(matches, "seed")?,
            init: parse_opt(matches, "init")?,
            output: matches.value_of("output").map(PathBuf::from),
            pgm: matches.value_of("pgm").map(PathBuf::from),
            jobs: parse(matches, "jobs")?,
        })
    }

    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|e| Error::InvalidParameter(e.message))?;
        Self::from_matches(&matches)
    }
}

fn parse<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    parse_opt(matches, name)?.ok_or_else(|| Error::invalid(format!("--{} is required", name)))
}

fn parse_opt<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>> {
    matches
        .value_of(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_| Error::invalid(format!("--{}: cannot parse {:?}", name, raw)))
        })
        .transpose()
}
