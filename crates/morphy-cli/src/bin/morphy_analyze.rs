// morphy-analyze: Morphological analysis of words from stdin.
//
// Reads words from stdin (one per line) and prints every ranked parse for
// each word: normal form, tag, score and the unit that produced it.
//
// Usage:
//   morphy-analyze [-d DICT_PATH] [OPTIONS] [WORD...]

use std::io::{self, Write};

use clap::Parser;
use morphy::{MorphAnalyzer, ParseMethod, ParsedWord, Provenance};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "morphy-analyze", version, about = "Morphological analysis of words")]
struct Cli {
    #[command(flatten)]
    common: morphy_cli::CommonArgs,

    /// Print one JSON object per parse
    #[arg(long)]
    json: bool,

    /// Only print the N best parses of each word
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Words to analyze (stdin when empty)
    words: Vec<String>,
}

#[derive(Serialize)]
struct ParseRecord<'a> {
    word: &'a str,
    normal_form: &'a str,
    tag: &'a str,
    score: f32,
    method: ParseMethod,
    provenance: Provenance,
}

fn write_parses(
    out: &mut impl Write,
    analyzer: &MorphAnalyzer,
    word: &str,
    parses: &[ParsedWord],
    json: bool,
) -> io::Result<()> {
    if json {
        for parsed in parses {
            let record = ParseRecord {
                word,
                normal_form: &parsed.normal_form,
                tag: analyzer.tag_string(&parsed.tag),
                score: parsed.score,
                method: parsed.method,
                provenance: parsed.provenance(),
            };
            serde_json::to_writer(&mut *out, &record).map_err(io::Error::other)?;
            writeln!(out)?;
        }
        return Ok(());
    }

    writeln!(out, "{word}:")?;
    for parsed in parses {
        writeln!(
            out,
            "  {}\t{}\t{:.4}\t{:?}",
            parsed.normal_form,
            analyzer.tag_string(&parsed.tag),
            parsed.score,
            parsed.method
        )?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    morphy_cli::init_logging(cli.common.verbosity());

    let analyzer =
        morphy_cli::load_analyzer(&cli.common).unwrap_or_else(|e| morphy_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let result = morphy_cli::for_each_word(&cli.words, |word| {
        let mut parses = analyzer.parse(word);
        if let Some(n) = cli.top {
            parses.truncate(n);
        }
        write_parses(&mut out, &analyzer, word, &parses, cli.json)
    });
    if let Err(e) = result.and_then(|()| out.flush().map_err(Into::into)) {
        morphy_cli::fatal(&e.to_string());
    }
}
