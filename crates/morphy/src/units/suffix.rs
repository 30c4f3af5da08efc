// Prediction from word endings.
//
// For every paradigm prefix the word starts with, endings are tried longest
// first (the whole word included) against that prefix's prediction
// automaton. The first ending length with usable paradigm forms wins; each
// form is scored by how many dictionary words with that ending realize it,
// out of all forms seen for the prefix.

use morphy_core::character::{char_len, char_offset};
use morphy_core::{ParseMethod, ParsedWord};

use super::{AnalyzerUnit, ParseContext};

#[derive(Debug, Clone, Copy)]
pub struct KnownSuffixUnit {
    max_suffix_length: usize,
    min_word_length: usize,
}

impl KnownSuffixUnit {
    pub fn new(max_suffix_length: usize, min_word_length: usize) -> Self {
        Self {
            max_suffix_length,
            min_word_length,
        }
    }
}

impl AnalyzerUnit for KnownSuffixUnit {
    fn name(&self) -> &'static str {
        "known-suffix"
    }

    fn confidence(&self) -> f32 {
        0.5
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        let dict = ctx.dictionary;
        let key = ctx.key;
        let word_len = char_len(key);
        if word_len < self.min_word_length {
            return Vec::new();
        }
        let longest = self.max_suffix_length.min(word_len);

        let mut out = Vec::new();
        for (prefix_id, prefix) in dict.paradigm_prefixes().iter().enumerate() {
            if !key.starts_with(prefix.as_str()) {
                continue;
            }
            let Some(dawg) = dict.prediction(prefix_id) else {
                continue;
            };
            let start = out.len();
            let mut total = 1.0_f32;

            for ending_len in (1..=longest).rev() {
                let (word_start, ending) = key.split_at(char_offset(key, word_len - ending_len));
                for (found, payload) in dawg.lookup_with_substitutions(ending, ctx.substitutions) {
                    // Every form with this ending counts, usable or not.
                    let count = f32::from(payload.count);
                    total += count;
                    let form = payload.form_ref();
                    let Some(tag) = dict.tag(form) else {
                        continue;
                    };
                    if !dict.tag_table().is_productive(&tag) {
                        continue;
                    }
                    let full_word = format!("{word_start}{found}");
                    let Some(normal_form) = dict.build_normal_form(form, &full_word) else {
                        continue;
                    };
                    out.push(ParsedWord {
                        word: ctx.word.to_string(),
                        tag,
                        normal_form,
                        found_word: full_word,
                        score: count,
                        method: ParseMethod::KnownSuffix,
                        form: Some(form),
                        stem_prefix: String::new(),
                    });
                }
                if out.len() > start {
                    break;
                }
            }

            for parsed in &mut out[start..] {
                parsed.score /= total;
            }
        }
        out
    }
}
