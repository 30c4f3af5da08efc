// Units for tokens that are not words of the dictionary language.

use morphy_core::ParseMethod;
use morphy_core::ParsedWord;
use morphy_core::character::{NumberKind, is_latin_word, is_punctuation_word, is_roman_numeral, number_kind};

use super::{AnalyzerUnit, ParseContext, symbol_parse};

/// Integers (`NUMB,intg`) and other decimal numbers (`NUMB,real`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberUnit;

impl AnalyzerUnit for NumberUnit {
    fn name(&self) -> &'static str {
        "number"
    }

    fn confidence(&self) -> f32 {
        0.9
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        let service = ctx.dictionary.service_tags();
        let tag = match number_kind(ctx.key) {
            Some(NumberKind::Integer) => service.integer,
            Some(NumberKind::Real) => service.real,
            None => return Vec::new(),
        };
        vec![symbol_parse(ctx, tag, ParseMethod::Number)]
    }
}

/// Tokens made of punctuation only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationUnit;

impl AnalyzerUnit for PunctuationUnit {
    fn name(&self) -> &'static str {
        "punctuation"
    }

    fn confidence(&self) -> f32 {
        0.9
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        if !is_punctuation_word(ctx.key) {
            return Vec::new();
        }
        vec![symbol_parse(ctx, ctx.dictionary.service_tags().punctuation, ParseMethod::Punctuation)]
    }
}

/// Upper-case Roman numerals. Not terminal: "MD" is also a Latin token.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomanUnit;

impl AnalyzerUnit for RomanUnit {
    fn name(&self) -> &'static str {
        "roman"
    }

    fn confidence(&self) -> f32 {
        0.9
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        // Case matters here, so look at the surface word.
        if !is_roman_numeral(ctx.word) {
            return Vec::new();
        }
        vec![symbol_parse(ctx, ctx.dictionary.service_tags().roman, ParseMethod::Roman)]
    }
}

/// Latin-script tokens in a non-Latin dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinUnit;

impl AnalyzerUnit for LatinUnit {
    fn name(&self) -> &'static str {
        "latin"
    }

    fn confidence(&self) -> f32 {
        0.9
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        if !is_latin_word(ctx.key) {
            return Vec::new();
        }
        vec![symbol_parse(ctx, ctx.dictionary.service_tags().latin, ParseMethod::Latin)]
    }
}
