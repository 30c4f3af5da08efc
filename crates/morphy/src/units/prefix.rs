// Prefix units: strip a leading piece and parse the rest as a dictionary word.

use morphy_core::character::{char_len, char_offset};
use morphy_core::{ParseMethod, ParsedWord};

use super::{AnalyzerUnit, ParseContext, dictionary, share_scores};

/// Dictionary parses of `remainder` rewritten as parses of the whole word.
/// Tags that prefixes cannot attach to are dropped.
fn prefixed_parses(
    ctx: &ParseContext<'_>,
    prefix: &str,
    remainder: &str,
    method: ParseMethod,
    out: &mut Vec<ParsedWord>,
) {
    let tags = ctx.dictionary.tag_table();
    for inner in dictionary::lookup(ctx.dictionary, ctx.substitutions, remainder, remainder) {
        if !tags.is_productive(&inner.tag) {
            continue;
        }
        out.push(ParsedWord {
            word: ctx.word.to_string(),
            normal_form: format!("{prefix}{}", inner.normal_form),
            stem_prefix: prefix.to_string(),
            method,
            ..inner
        });
    }
}

/// Strips one of a configured list of prefixes ("псевдо", "квази", ...).
#[derive(Debug, Clone, Default)]
pub struct KnownPrefixUnit {
    prefixes: Vec<String>,
    min_remainder_length: usize,
}

impl KnownPrefixUnit {
    /// Longer prefixes are tried first.
    pub fn new(mut prefixes: Vec<String>, min_remainder_length: usize) -> Self {
        prefixes.sort_by(|a, b| char_len(b).cmp(&char_len(a)).then_with(|| a.cmp(b)));
        prefixes.dedup();
        Self {
            prefixes,
            min_remainder_length,
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl AnalyzerUnit for KnownPrefixUnit {
    fn name(&self) -> &'static str {
        "known-prefix"
    }

    fn confidence(&self) -> f32 {
        0.75
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        let mut out = Vec::new();
        for prefix in &self.prefixes {
            let Some(remainder) = ctx.key.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if char_len(remainder) < self.min_remainder_length {
                continue;
            }
            prefixed_parses(ctx, prefix, remainder, ParseMethod::KnownPrefix, &mut out);
        }
        share_scores(&mut out);
        out
    }
}

/// Treats the first 1..=`max_prefix_length` characters as an unknown prefix.
#[derive(Debug, Clone, Copy)]
pub struct UnknownPrefixUnit {
    max_prefix_length: usize,
    min_remainder_length: usize,
}

impl UnknownPrefixUnit {
    pub fn new(max_prefix_length: usize, min_remainder_length: usize) -> Self {
        Self {
            max_prefix_length,
            min_remainder_length,
        }
    }
}

impl AnalyzerUnit for UnknownPrefixUnit {
    fn name(&self) -> &'static str {
        "unknown-prefix"
    }

    fn confidence(&self) -> f32 {
        0.5
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        let len = char_len(ctx.key);
        let mut out = Vec::new();
        for prefix_len in 1..=self.max_prefix_length {
            if len < prefix_len + self.min_remainder_length.max(1) {
                break;
            }
            let (prefix, remainder) = ctx.key.split_at(char_offset(ctx.key, prefix_len));
            prefixed_parses(ctx, prefix, remainder, ParseMethod::UnknownPrefix, &mut out);
        }
        share_scores(&mut out);
        out
    }
}
