// MorphAnalyzer: the public entry point for word analysis.
//
// Owns a shared dictionary and a fixed pipeline of analyzer units built from
// the configuration at construction time. Every method takes `&self` and
// keeps no per-call state outside the call, so one analyzer can serve any
// number of threads.
//
// Pipeline (see `units`):
//   numeric short-circuit -> dictionary -> number -> punctuation -> roman
//   -> latin -> known prefix -> unknown prefix -> known suffix -> unknown

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashSet;
use morphy_core::character::{NumberKind, is_numeric, number_kind};
use morphy_core::{GrammemeSet, ParseMethod, ParsedWord, Tag, TagError, TagId, TOP_SCORE};

use crate::config::{AnalyzerConfig, ConfigError};
use crate::dictionary::Dictionary;
use crate::substitution::CharSubstitutions;
use crate::units::{
    AnalyzerUnit, DictionaryUnit, KnownPrefixUnit, KnownSuffixUnit, LatinUnit, NumberUnit,
    ParseContext, PunctuationUnit, RomanUnit, UnknownPrefixUnit, UnknownUnit, share_scores,
};
use crate::MorphError;

/// Morphological analyzer over one dictionary.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use morphy::{AnalyzerConfig, Dictionary, MorphAnalyzer};
/// # let dict = Arc::new(Dictionary::open("dict.bin")?);
/// let analyzer = MorphAnalyzer::new(dict, AnalyzerConfig::default())?;
/// let best = &analyzer.parse("стали")[0];
/// println!("{} {:.3}", best.normal_form, best.score);
/// # Ok::<(), morphy::MorphError>(())
/// ```
pub struct MorphAnalyzer {
    dictionary: Arc<Dictionary>,
    config: AnalyzerConfig,
    substitutions: CharSubstitutions,
    units: Vec<Box<dyn AnalyzerUnit>>,
}

impl std::fmt::Debug for MorphAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphAnalyzer")
            .field("language", &self.dictionary.language())
            .field("config", &self.config)
            .field(
                "units",
                &self.units.iter().map(|u| u.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MorphAnalyzer {
    /// Build an analyzer over a loaded dictionary.
    ///
    /// Fails if the configuration is invalid; nothing is parsed before that.
    pub fn new(dictionary: Arc<Dictionary>, config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let substitutions = config.substitutions()?;
        let known_prefixes = config
            .known_prefixes
            .iter()
            .map(|p| if config.lowercase { p.to_lowercase() } else { p.clone() })
            .collect();

        let units: Vec<Box<dyn AnalyzerUnit>> = vec![
            Box::new(DictionaryUnit),
            Box::new(NumberUnit),
            Box::new(PunctuationUnit),
            Box::new(RomanUnit),
            Box::new(LatinUnit),
            Box::new(KnownPrefixUnit::new(
                known_prefixes,
                config.min_remainder_length,
            )),
            Box::new(UnknownPrefixUnit::new(
                config.max_prefix_length,
                config.min_remainder_length,
            )),
            Box::new(KnownSuffixUnit::new(
                config.max_suffix_length,
                config.min_word_length_for_prediction,
            )),
            Box::new(UnknownUnit),
        ];

        log::debug!(
            "analyzer for {:?}: {} substitutions, {} known prefixes",
            dictionary.language(),
            substitutions.len(),
            config.known_prefixes.len()
        );

        Ok(Self {
            dictionary,
            config,
            substitutions,
            units,
        })
    }

    /// Load a bundle from a byte stream and build an analyzer over it.
    pub fn from_reader<R: Read>(source: R, config: AnalyzerConfig) -> Result<Self, MorphError> {
        let dictionary = Arc::new(Dictionary::from_reader(source)?);
        Ok(Self::new(dictionary, config)?)
    }

    pub fn from_bytes(data: &[u8], config: AnalyzerConfig) -> Result<Self, MorphError> {
        Self::from_reader(data, config)
    }

    /// Load a bundle file and build an analyzer over it.
    pub fn open(path: impl AsRef<Path>, config: AnalyzerConfig) -> Result<Self, MorphError> {
        let dictionary = Arc::new(Dictionary::open(path)?);
        Ok(Self::new(dictionary, config)?)
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn substitutions(&self) -> &CharSubstitutions {
        &self.substitutions
    }

    fn case_folded<'w>(&self, word: &'w str) -> std::borrow::Cow<'w, str> {
        if self.config.lowercase {
            std::borrow::Cow::Owned(word.to_lowercase())
        } else {
            std::borrow::Cow::Borrowed(word)
        }
    }

    /// The key `word` is looked up under: lowercased when configured, then
    /// with every substitution applied.
    pub fn lookup_key(&self, word: &str) -> String {
        self.substitutions.normalize(&self.case_folded(word))
    }

    /// All analyses of `word`, best first. Never empty.
    pub fn parse(&self, word: &str) -> Vec<ParsedWord> {
        let service = self.dictionary.service_tags();

        if word.is_empty() {
            log::trace!("parse \"\": empty input");
            return vec![ParsedWord {
                word: String::new(),
                tag: service.unknown,
                normal_form: String::new(),
                found_word: String::new(),
                score: 0.0,
                method: ParseMethod::Unknown,
                form: None,
                stem_prefix: String::new(),
            }];
        }

        if self.config.ignore_numbers && is_numeric(word) {
            log::trace!("parse {word:?}: numeric short-circuit");
            let tag = match number_kind(word) {
                Some(NumberKind::Real) => service.real,
                _ => service.integer,
            };
            return vec![ParsedWord {
                word: word.to_string(),
                tag,
                normal_form: word.to_string(),
                found_word: word.to_string(),
                score: TOP_SCORE,
                method: ParseMethod::Numeric,
                form: None,
                stem_prefix: String::new(),
            }];
        }

        let key = self.case_folded(word);
        let ctx = ParseContext {
            word,
            key: &key,
            dictionary: &self.dictionary,
            substitutions: &self.substitutions,
        };

        let mut results: Vec<ParsedWord> = Vec::new();
        for unit in &self.units {
            let mut parses = unit.parse(&ctx);
            if parses.is_empty() {
                continue;
            }
            let confidence = unit.confidence();
            for p in &mut parses {
                p.score *= confidence;
            }
            parses.sort_by(ParsedWord::rank_cmp);
            log::trace!("parse {word:?}: {} from {}", parses.len(), unit.name());
            results.extend(parses);
            if unit.is_terminal() {
                break;
            }
        }

        let mut seen: HashSet<(TagId, String)> = HashSet::with_capacity(results.len());
        results.retain(|p| seen.insert((p.tag.id(), p.normal_form.clone())));
        results.sort_by(ParsedWord::rank_cmp);
        results
    }

    /// Distinct normal forms of `word`, best first.
    pub fn normal_forms(&self, word: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.parse(word)
            .into_iter()
            .filter_map(|p| seen.insert(p.normal_form.clone()).then_some(p.normal_form))
            .collect()
    }

    /// Tags of every analysis of `word`, best first.
    pub fn tags(&self, word: &str) -> Vec<Tag> {
        self.parse(word).into_iter().map(|p| p.tag).collect()
    }

    /// Every form of the lexeme `parsed` belongs to, in paradigm order.
    ///
    /// Parses that are not backed by a paradigm form have only themselves.
    pub fn lexeme(&self, parsed: &ParsedWord) -> Vec<ParsedWord> {
        let Some(form) = parsed.form else {
            return vec![parsed.clone()];
        };
        let dict = &self.dictionary;
        let forms = dict.lexeme(form, &parsed.found_word);
        if forms.is_empty() {
            return vec![parsed.clone()];
        }
        forms
            .into_iter()
            .filter_map(|(surface, form)| {
                Some(ParsedWord {
                    word: format!("{}{surface}", parsed.stem_prefix),
                    tag: dict.tag(form)?,
                    normal_form: parsed.normal_form.clone(),
                    found_word: surface,
                    score: parsed.score,
                    method: parsed.method,
                    form: Some(form),
                    stem_prefix: parsed.stem_prefix.clone(),
                })
            })
            .collect()
    }

    /// Forms of the lexeme whose tags hold every `required` grammeme and no
    /// `excluded` one, closest to the tag of `parsed` first.
    pub fn inflect(
        &self,
        parsed: &ParsedWord,
        required: &GrammemeSet,
        excluded: &GrammemeSet,
    ) -> Vec<ParsedWord> {
        let original = parsed.tag.grammemes();
        let mut forms: Vec<ParsedWord> = self
            .lexeme(parsed)
            .into_iter()
            .filter(|p| p.tag.matches(required, excluded))
            .collect();
        forms.sort_by_key(|p| {
            let shared = p.tag.grammemes().iter().filter(|&g| original.contains(g)).count();
            std::cmp::Reverse(shared)
        });
        forms
    }

    /// Dictionary words starting with `prefix`, at most `max_results` of them,
    /// in alphabetical order. Substitutions are not applied to the prefix.
    pub fn complete(&self, prefix: &str, max_results: usize) -> Vec<ParsedWord> {
        let key = self.case_folded(prefix);
        let dict = &self.dictionary;
        let mut out: Vec<ParsedWord> = dict
            .words()
            .predict_by_prefix(&key, max_results)
            .filter_map(|(suffix, payload)| {
                let form = payload.form_ref();
                let found = format!("{key}{suffix}");
                Some(ParsedWord {
                    word: found.clone(),
                    tag: dict.tag(form)?,
                    normal_form: dict.build_normal_form(form, &found)?,
                    found_word: found,
                    score: dict.ranks().weight(form.paradigm),
                    method: ParseMethod::Dictionary,
                    form: Some(form),
                    stem_prefix: String::new(),
                })
            })
            .collect();
        share_scores(&mut out);
        out
    }

    /// Keep the parses whose tags match the predicate.
    pub fn filter(
        parses: impl IntoIterator<Item = ParsedWord>,
        required: &GrammemeSet,
        excluded: &GrammemeSet,
    ) -> Vec<ParsedWord> {
        parses
            .into_iter()
            .filter(|p| p.tag.matches(required, excluded))
            .collect()
    }

    /// Resolve grammeme names into a set usable with [`filter`](Self::filter)
    /// and [`inflect`](Self::inflect).
    pub fn grammeme_set<S: AsRef<str>>(&self, names: &[S]) -> Result<GrammemeSet, TagError> {
        self.dictionary.tag_table().grammeme_set(names)
    }

    /// The tag's text as stored in the dictionary.
    pub fn tag_string(&self, tag: &Tag) -> &str {
        self.dictionary.tag_table().tag_string(tag)
    }
}
