// morphy-complete: Dictionary words starting with a prefix.
//
// Usage:
//   morphy-complete [-d DICT_PATH] [-m MAX] PREFIX

use std::io::{self, Write};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "morphy-complete", version, about = "Complete a word prefix from the dictionary")]
struct Cli {
    #[command(flatten)]
    common: morphy_cli::CommonArgs,

    /// Maximum number of completions
    #[arg(short = 'm', long = "max", default_value_t = 20)]
    max: usize,

    /// Prefix to complete
    prefix: String,
}

fn main() {
    let cli = Cli::parse();
    morphy_cli::init_logging(cli.common.verbosity());

    let analyzer =
        morphy_cli::load_analyzer(&cli.common).unwrap_or_else(|e| morphy_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let completions = analyzer.complete(&cli.prefix, cli.max);
    let result = completions.iter().try_for_each(|parsed| {
        writeln!(
            out,
            "{}\t{}\t{}",
            parsed.word,
            parsed.normal_form,
            analyzer.tag_string(&parsed.tag)
        )
    });
    if let Err(e) = result.and_then(|()| out.flush()) {
        morphy_cli::fatal(&e.to_string());
    }
}
