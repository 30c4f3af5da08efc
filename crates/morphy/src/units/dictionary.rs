// Exact dictionary lookup.

use morphy_core::{ParseMethod, ParsedWord};

use super::{AnalyzerUnit, ParseContext, share_scores};
use crate::dictionary::Dictionary;
use crate::substitution::CharSubstitutions;

/// Finds the word in the main automaton, following configured character
/// substitutions, and scores hits by paradigm rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryUnit;

impl AnalyzerUnit for DictionaryUnit {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn confidence(&self) -> f32 {
        1.0
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        lookup(ctx.dictionary, ctx.substitutions, ctx.word, ctx.key)
    }
}

/// Dictionary parses of `key`, reported for the surface `word`.
///
/// Scores are `(rank + 1) / Σ(rank + 1)` over the hits. Hits come back in
/// automaton order: exact spellings before substituted ones.
pub(crate) fn lookup(
    dict: &Dictionary,
    substitutions: &CharSubstitutions,
    word: &str,
    key: &str,
) -> Vec<ParsedWord> {
    let hits = dict.words().lookup_with_substitutions(key, substitutions);
    let mut out = Vec::with_capacity(hits.len());
    for (found, payload) in hits {
        let form = payload.form_ref();
        // Both resolve for every payload of a validated bundle.
        let (Some(tag), Some(normal_form)) = (dict.tag(form), dict.build_normal_form(form, &found))
        else {
            continue;
        };
        out.push(ParsedWord {
            word: word.to_string(),
            tag,
            normal_form,
            found_word: found,
            score: dict.ranks().weight(form.paradigm),
            method: ParseMethod::Dictionary,
            form: Some(form),
            stem_prefix: String::new(),
        });
    }
    share_scores(&mut out);
    out
}
