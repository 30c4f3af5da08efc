// morphy-normalize: Print the normal forms of words from stdin.
//
// For each word prints its most likely normal form, or every distinct
// normal form with --all. Parses can be restricted to those carrying
// (or lacking) given grammemes.
//
// Usage:
//   morphy-normalize [-d DICT_PATH] [--include NOUN,plur] [--exclude Abbr] [--all] [WORD...]

use std::io::{self, Write};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "morphy-normalize", version, about = "Normal forms of words")]
struct Cli {
    #[command(flatten)]
    common: morphy_cli::CommonArgs,

    /// Keep only parses carrying all of these grammemes (comma-separated)
    #[arg(short = 'i', long = "include")]
    include: Vec<String>,

    /// Drop parses carrying any of these grammemes (comma-separated)
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// Print every distinct normal form instead of the best one
    #[arg(short, long)]
    all: bool,

    /// Words to normalize (stdin when empty)
    words: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    morphy_cli::init_logging(cli.common.verbosity());

    let analyzer =
        morphy_cli::load_analyzer(&cli.common).unwrap_or_else(|e| morphy_cli::fatal(&e.to_string()));

    let include = morphy_cli::grammeme_names(&cli.include);
    let exclude = morphy_cli::grammeme_names(&cli.exclude);
    let required = analyzer
        .grammeme_set(include.as_slice())
        .unwrap_or_else(|e| morphy_cli::fatal(&e.to_string()));
    let excluded = analyzer
        .grammeme_set(exclude.as_slice())
        .unwrap_or_else(|e| morphy_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let result = morphy_cli::for_each_word(&cli.words, |word| {
        let parses = morphy::MorphAnalyzer::filter(analyzer.parse(word), &required, &excluded);
        let mut forms: Vec<&str> = Vec::new();
        for parsed in &parses {
            if !forms.contains(&parsed.normal_form.as_str()) {
                forms.push(&parsed.normal_form);
            }
        }
        if forms.is_empty() {
            return writeln!(out, "{word}\t(no match)");
        }
        if !cli.all {
            forms.truncate(1);
        }
        writeln!(out, "{word}\t{}", forms.join(" "))
    });
    if let Err(e) = result.and_then(|()| out.flush().map_err(Into::into)) {
        morphy_cli::fatal(&e.to_string());
    }
}
