// Fallback unit: the word itself, tagged UNKN with score 0.

use morphy_core::{ParseMethod, ParsedWord};

use super::{AnalyzerUnit, ParseContext, symbol_parse};

#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownUnit;

impl AnalyzerUnit for UnknownUnit {
    fn name(&self) -> &'static str {
        "unknown"
    }

    fn confidence(&self) -> f32 {
        0.0
    }

    fn parse(&self, ctx: &ParseContext<'_>) -> Vec<ParsedWord> {
        let mut parsed = symbol_parse(ctx, ctx.dictionary.service_tags().unknown, ParseMethod::Unknown);
        parsed.score = 0.0;
        vec![parsed]
    }
}
