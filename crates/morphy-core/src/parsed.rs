// Parse results and their ranking order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::tag::{Tag, TagId};

/// Score given to results that are certain by construction.
pub const TOP_SCORE: f32 = 1.0;

/// Where a parse came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The word (or its numeric short-circuit) was found as is.
    DictionaryMatch,
    /// The parse was guessed by a heuristic unit.
    Predicted,
}

/// The analyzer unit that produced a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMethod {
    /// Purely numeric input returned unmodified.
    Numeric,
    Dictionary,
    Number,
    Punctuation,
    Roman,
    Latin,
    KnownPrefix,
    UnknownPrefix,
    KnownSuffix,
    Unknown,
}

impl ParseMethod {
    pub fn provenance(self) -> Provenance {
        match self {
            ParseMethod::Numeric | ParseMethod::Dictionary => Provenance::DictionaryMatch,
            _ => Provenance::Predicted,
        }
    }
}

/// A paradigm form: paradigm id plus index of the form within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormRef {
    pub paradigm: u16,
    pub form: u16,
}

/// One candidate analysis of a word.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWord {
    /// The word as it was given to the analyzer.
    pub word: String,
    pub tag: Tag,
    pub normal_form: String,
    /// The spelling the paradigm rules were applied to: the stored
    /// dictionary spelling for matches, the reconstructed word for
    /// suffix predictions, the input itself otherwise.
    pub found_word: String,
    pub score: f32,
    pub method: ParseMethod,
    /// Paradigm form backing the parse, if any.
    pub form: Option<FormRef>,
    /// Text prepended to every generated form (stripped word prefixes).
    pub stem_prefix: String,
}

impl ParsedWord {
    pub fn provenance(&self) -> Provenance {
        self.method.provenance()
    }

    /// Key under which duplicate parses are merged.
    pub fn unique_key(&self) -> (TagId, &str) {
        (self.tag.id(), self.normal_form.as_str())
    }

    /// Ranking order: score descending, dictionary matches before
    /// predictions, then lower paradigm/form ids first.
    pub fn rank_cmp(&self, other: &ParsedWord) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.provenance().cmp(&other.provenance()))
            .then_with(|| form_key(self.form).cmp(&form_key(other.form)))
    }
}

fn form_key(form: Option<FormRef>) -> (u32, u32) {
    match form {
        Some(f) => (u32::from(f.paradigm), u32::from(f.form)),
        None => (u32::MAX, u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammeme::GrammemeTable;
    use crate::tag::TagTable;

    fn make_parse(tag: Tag, score: f32, method: ParseMethod, form: Option<FormRef>) -> ParsedWord {
        ParsedWord {
            word: "x".to_string(),
            tag,
            normal_form: "x".to_string(),
            found_word: "x".to_string(),
            score,
            method,
            form,
            stem_prefix: String::new(),
        }
    }

    fn make_tag() -> Tag {
        let grammemes = GrammemeTable::from_entries([("POST", ""), ("NOUN", "POST")]).unwrap();
        TagTable::new(grammemes).intern("NOUN").unwrap()
    }

    #[test]
    fn provenance_by_method() {
        assert_eq!(ParseMethod::Numeric.provenance(), Provenance::DictionaryMatch);
        assert_eq!(ParseMethod::Dictionary.provenance(), Provenance::DictionaryMatch);
        assert_eq!(ParseMethod::KnownSuffix.provenance(), Provenance::Predicted);
        assert_eq!(ParseMethod::Unknown.provenance(), Provenance::Predicted);
    }

    #[test]
    fn ranking_order() {
        let tag = make_tag();
        let mut parses = vec![
            make_parse(tag, 0.5, ParseMethod::KnownSuffix, None),
            make_parse(tag, 0.5, ParseMethod::Dictionary, Some(FormRef { paradigm: 3, form: 0 })),
            make_parse(tag, 0.9, ParseMethod::Latin, None),
            make_parse(tag, 0.5, ParseMethod::Dictionary, Some(FormRef { paradigm: 1, form: 2 })),
        ];
        parses.sort_by(ParsedWord::rank_cmp);
        let summary: Vec<(f32, ParseMethod, Option<u16>)> = parses
            .iter()
            .map(|p| (p.score, p.method, p.form.map(|f| f.paradigm)))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0.9, ParseMethod::Latin, None),
                (0.5, ParseMethod::Dictionary, Some(1)),
                (0.5, ParseMethod::Dictionary, Some(3)),
                (0.5, ParseMethod::KnownSuffix, None),
            ]
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ParseMethod::KnownPrefix).unwrap();
        assert_eq!(json, "\"known_prefix\"");
        let json = serde_json::to_string(&Provenance::DictionaryMatch).unwrap();
        assert_eq!(json, "\"dictionary_match\"");
    }
}
