// morphy-cli: shared utilities for the command-line tools.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Args;
use env_logger::Builder;
use log::LevelFilter;
use morphy::{AnalyzerConfig, ConfigError, Dictionary, MorphAnalyzer, MorphError};

/// Dictionary file name looked for in the fallback locations.
const DICT_FILE: &str = "dict.bin";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not find a dictionary in any of the search paths:\n{}", list_paths(.0))]
    DictionaryNotFound(Vec<PathBuf>),

    #[error(transparent)]
    Morph(#[from] MorphError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options every tool accepts.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Dictionary bundle file
    #[arg(short = 'd', long = "dict", env = "MORPHY_DICT_PATH")]
    pub dict: Option<PathBuf>,

    /// JSON analyzer configuration
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Lowercase words before lookup
    #[arg(long)]
    pub lowercase: bool,

    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Initialise `env_logger` from the verbosity level.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Build the list of files to try, in order.
///
/// 1. `--dict` (or `MORPHY_DICT_PATH`, which clap folds into it)
/// 2. `~/.morphy/dict.bin`
/// 3. `./dict.bin`
pub fn build_search_paths(dict: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = dict {
        paths.push(p.to_path_buf());
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(".morphy").join(DICT_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(DICT_FILE));
    }
    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// The dictionary file to load.
///
/// An explicit path is used as is, so a typo is reported rather than
/// silently falling back to another dictionary.
pub fn resolve_dictionary(dict: Option<&Path>) -> Result<PathBuf, CliError> {
    if let Some(path) = dict {
        return Ok(path.to_path_buf());
    }
    let search_paths = build_search_paths(None);
    for path in &search_paths {
        if path.is_file() {
            return Ok(path.clone());
        }
        log::debug!("no dictionary at {}", path.display());
    }
    Err(CliError::DictionaryNotFound(search_paths))
}

/// Find the dictionary, read the configuration and build an analyzer.
///
/// Substitutions default to the usual ones for the dictionary's language
/// unless the configuration file sets its own.
pub fn load_analyzer(args: &CommonArgs) -> Result<MorphAnalyzer, CliError> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if args.lowercase {
        config.lowercase = true;
    }

    let path = resolve_dictionary(args.dict.as_deref())?;
    log::info!("loading dictionary {}", path.display());
    let dictionary = Arc::new(Dictionary::open(&path)?);
    let config = config.with_language_defaults(dictionary.language());
    Ok(MorphAnalyzer::new(dictionary, config)?)
}

/// Call `f` for every word argument, or for every non-empty stdin line when
/// there are none.
pub fn for_each_word<F>(words: &[String], mut f: F) -> Result<(), CliError>
where
    F: FnMut(&str) -> io::Result<()>,
{
    if !words.is_empty() {
        for word in words {
            f(word)?;
        }
        return Ok(());
    }
    for line in io::stdin().lock().lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        f(word)?;
    }
    Ok(())
}

/// Split comma-separated grammeme lists given as repeated options.
pub fn grammeme_names(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
