// Analyzer units: the stages a word passes through inside `MorphAnalyzer`.
//
// Architecture:
//   - `dictionary`: exact lookup in the word automaton (with substitutions)
//   - `symbols`: numbers, punctuation, Roman numerals, Latin-script tokens
//   - `prefix`: known and unknown prefixes stripped before a dictionary lookup
//   - `suffix`: prediction from word endings
//   - `unknown`: the fallback that always answers
//
// Units return raw scores; the analyzer multiplies them by the unit's
// confidence and stops after the first terminal unit with results.

pub mod dictionary;
pub mod prefix;
pub mod suffix;
pub mod symbols;
pub mod unknown;

pub use dictionary::DictionaryUnit;
pub use prefix::{KnownPrefixUnit, UnknownPrefixUnit};
pub use suffix::KnownSuffixUnit;
pub use symbols::{LatinUnit, NumberUnit, PunctuationUnit, RomanUnit};
pub use unknown::UnknownUnit;

use morphy_core::{ParseMethod, ParsedWord, Tag, TOP_SCORE};

use crate::dictionary::Dictionary;
use crate::substitution::CharSubstitutions;

/// Everything a unit may look at while parsing one word.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// The word exactly as given.
    pub word: &'a str,
    /// The word as used for lookups (lowercased when configured).
    pub key: &'a str,
    pub dictionary: &'a Dictionary,
    pub substitutions: &'a CharSubstitutions,
}

/// One stage of the analysis pipeline.
pub trait AnalyzerUnit: Send + Sync {
    /// Short name used in trace logs.
    fn name(&self) -> &'static str;

    /// Multiplier applied to every raw score this unit returns.
    fn confidence(&self) -> f32;

    /// Whether parsing stops after this unit when it produced results.
    fn is_terminal(&self) -> bool {
        true
    }

    /// Parses with raw (unscaled) scores.
    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord>;
}

/// Divide every score by the sum of all scores.
pub(crate) fn share_scores(parses: &mut [ParsedWord]) {
    let total: f32 = parses.iter().map(|p| p.score).sum();
    if total > 0.0 {
        for p in parses.iter_mut() {
            p.score /= total;
        }
    }
}

/// A parse that is not backed by a paradigm: the key is its own normal form.
pub(crate) fn symbol_parse(ctx: &ParseContext<'_>, tag: Tag, method: ParseMethod) -> ParsedWord {
    ParsedWord {
        word: ctx.word.to_string(),
        tag,
        normal_form: ctx.key.to_string(),
        found_word: ctx.key.to_string(),
        score: TOP_SCORE,
        method,
        form: None,
        stem_prefix: String::new(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::dictionary::Dictionary;
    use crate::dictionary::builder::BundleBuilder;

    /// A tiny Russian dictionary: two noun paradigms, one pronoun.
    pub(crate) fn small_dictionary() -> Dictionary {
        let mut b = BundleBuilder::new("ru");
        for (name, parent) in [
            ("POST", ""),
            ("NOUN", "POST"),
            ("NPRO", "POST"),
            ("NMbr", ""),
            ("sing", "NMbr"),
            ("plur", "NMbr"),
            ("CAse", ""),
            ("nomn", "CAse"),
            ("gent", "CAse"),
            ("GNdr", ""),
            ("masc", "GNdr"),
            ("femn", "GNdr"),
        ] {
            b.grammeme(name, parent);
        }
        let masc = b
            .paradigm(&[
                ("", "", "NOUN,masc sing,nomn"),
                ("", "а", "NOUN,masc sing,gent"),
                ("", "и", "NOUN,masc plur,nomn"),
            ])
            .unwrap();
        let femn = b
            .paradigm(&[
                ("", "а", "NOUN,femn sing,nomn"),
                ("", "и", "NOUN,femn sing,gent"),
                ("", "и", "NOUN,femn plur,nomn"),
            ])
            .unwrap();
        let pron = b.paradigm(&[("", "", "NPRO,masc sing,nomn")]).unwrap();
        b.lexeme("шарик", masc)
            .lexeme("ёжик", masc)
            .lexeme("кошк", femn)
            .lexeme("мышк", femn)
            .lexeme("никто", pron)
            .rank(masc, 3)
            .rank(femn, 1);
        b.build().unwrap()
    }
}
