//! End-to-end analyzer behaviour over the synthetic Russian dictionary.

mod common;

use std::sync::Arc;

use morphy::{
    AnalyzerConfig, AnalyzerRegistry, Endian, FormRef, GrammemeSet, MorphAnalyzer, ParseMethod,
    ParsedWord, Provenance,
};

use common::{russian_analyzer, russian_bundle_with_endian, russian_config, russian_dictionary};

fn normal_forms(parses: &[ParsedWord]) -> Vec<&str> {
    parses.iter().map(|p| p.normal_form.as_str()).collect()
}

fn tag_strings<'a>(analyzer: &'a MorphAnalyzer, parses: &[ParsedWord]) -> Vec<&'a str> {
    parses.iter().map(|p| analyzer.tag_string(&p.tag)).collect()
}

// ---------------------------------------------------------------------------
// Dictionary matches
// ---------------------------------------------------------------------------

#[test]
fn test_ranked_by_paradigm_frequency() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("тест");
    assert_eq!(normal_forms(&parses), ["тест", "тесто"]);
    assert!(parses.iter().all(|p| p.provenance() == Provenance::DictionaryMatch));
    assert!(parses[0].score > parses[1].score);
    assert!((parses[0].score - 11.0 / 14.0).abs() < 1e-6);
}

#[test]
fn tekhniku_prefers_feminine_reading() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("технику");
    assert_eq!(normal_forms(&parses), ["техника", "техник"]);
    assert!(parses[0].score > parses[1].score);
    assert_eq!(
        tag_strings(&analyzer, &parses),
        ["NOUN,inan,femn sing,accs", "NOUN,anim,masc sing,datv"]
    );
}

#[test]
fn e_substitution_finds_yo_spelling() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("теплые");
    assert_eq!(parses[0].normal_form, "тёплый");
    assert_eq!(parses[0].word, "теплые");
    assert_eq!(parses[0].found_word, "тёплые");
    assert_eq!(parses[0].method, ParseMethod::Dictionary);
    assert_eq!(analyzer.lookup_key("теплые"), "тёплыё");
}

#[test]
fn without_substitution_the_e_spelling_is_unknown_to_the_dictionary() {
    let analyzer = MorphAnalyzer::new(russian_dictionary(), AnalyzerConfig::default()).unwrap();
    let parses = analyzer.parse("теплые");
    assert!(parses.iter().all(|p| p.method != ParseMethod::Dictionary));
}

#[test]
fn every_stored_word_round_trips() {
    let analyzer = russian_analyzer();
    let dict = analyzer.dictionary();
    let mut checked = 0;
    for (word, payload) in dict.words().iter() {
        let tag = dict.tag(payload.form_ref()).unwrap();
        let parses = analyzer.parse(&word);
        assert!(
            parses
                .iter()
                .any(|p| p.method == ParseMethod::Dictionary && p.tag == tag),
            "{word}: {} missing",
            analyzer.tag_string(&tag)
        );
        checked += 1;
    }
    assert!(checked > 50);
}

#[test]
fn normal_form_reparses_with_normal_form_tag() {
    let analyzer = russian_analyzer();
    let dict = analyzer.dictionary();
    for (word, _) in dict.words().iter() {
        let parses = analyzer.parse(&word);
        let ok = parses.iter().filter(|p| p.method == ParseMethod::Dictionary).any(|p| {
            let form = p.form.unwrap();
            let normal_tag = dict
                .tag(FormRef {
                    paradigm: form.paradigm,
                    form: 0,
                })
                .unwrap();
            analyzer
                .parse(&p.normal_form)
                .iter()
                .any(|q| q.tag == normal_tag && q.normal_form == p.normal_form)
        });
        assert!(ok, "{word}");
    }
}

#[test]
fn normal_forms_are_unique() {
    let analyzer = russian_analyzer();
    // "техника" is both the feminine nominative and the animate genitive/accusative.
    assert_eq!(analyzer.normal_forms("техника"), ["техника", "техник"]);
    assert_eq!(analyzer.tags("техника").len(), 3);
}

// ---------------------------------------------------------------------------
// Non-dictionary units
// ---------------------------------------------------------------------------

#[test]
fn empty_input_is_a_single_unknown() {
    let analyzer = russian_analyzer();
    let first = analyzer.parse("");
    assert_eq!(first.len(), 1);
    assert_eq!(tag_strings(&analyzer, &first), ["UNKN"]);
    assert_eq!(first[0].score, 0.0);
    assert_eq!(first, analyzer.parse(""));
}

#[test]
fn unseen_characters_fall_back_to_unknown() {
    let analyzer = russian_analyzer();
    for word in ["ꙮꙮꙮ", "日本語", "ꙮ"] {
        let parses = analyzer.parse(word);
        assert_eq!(parses.len(), 1, "{word}");
        assert_eq!(parses[0].method, ParseMethod::Unknown);
        assert_eq!(parses[0].normal_form, word);
        assert_eq!(parses[0].score, 0.0);
    }
}

#[test]
fn latin_word_is_returned_unchanged() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("iphone");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].normal_form, "iphone");
    assert_eq!(parses[0].word, "iphone");
    assert_eq!(parses[0].provenance(), Provenance::Predicted);
    assert_eq!(tag_strings(&analyzer, &parses), ["LATN"]);
}

#[test]
fn roman_numeral_is_also_latin() {
    let analyzer = russian_analyzer();
    assert_eq!(tag_strings(&analyzer, &analyzer.parse("XIV")), ["ROMN", "LATN"]);
}

#[test]
fn numbers_and_punctuation() {
    let analyzer = russian_analyzer();

    let parses = analyzer.parse("1984");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].method, ParseMethod::Numeric);
    assert_eq!(parses[0].provenance(), Provenance::DictionaryMatch);
    assert_eq!(parses[0].score, 1.0);

    assert_eq!(tag_strings(&analyzer, &analyzer.parse("3.14")), ["NUMB,real"]);
    assert_eq!(tag_strings(&analyzer, &analyzer.parse("...")), ["PNCT"]);

    let counting = MorphAnalyzer::new(
        russian_dictionary(),
        AnalyzerConfig {
            ignore_numbers: false,
            ..russian_config()
        },
    )
    .unwrap();
    let parses = counting.parse("1984");
    assert_eq!(parses[0].method, ParseMethod::Number);
    assert_eq!(tag_strings(&counting, &parses), ["NUMB,intg"]);
}

#[test]
fn known_prefix() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("псевдокошка");
    assert_eq!(parses[0].method, ParseMethod::KnownPrefix);
    assert_eq!(parses[0].normal_form, "псевдокошка");
    assert!((parses[0].score - 0.75).abs() < 1e-6);

    let forms: Vec<String> = analyzer.lexeme(&parses[0]).into_iter().map(|p| p.word).collect();
    assert!(forms.contains(&"псевдокошками".to_string()));
    assert!(forms.iter().all(|w| w.starts_with("псевдо")));
}

#[test]
fn unknown_prefix() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("лошарики");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].method, ParseMethod::UnknownPrefix);
    assert_eq!(parses[0].normal_form, "лошарик");
    assert_eq!(
        tag_strings(&analyzer, &parses),
        ["NOUN,anim,masc plur,nomn"]
    );
}

#[test]
fn pronouns_do_not_take_prefixes() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("хникто");
    assert!(parses.iter().all(|p| p.method != ParseMethod::UnknownPrefix));
}

// ---------------------------------------------------------------------------
// Suffix prediction
// ---------------------------------------------------------------------------

#[test]
fn predicts_instrumental_plural() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("бананами");
    assert_eq!(parses.len(), 4);
    assert!(parses.iter().all(|p| p.method == ParseMethod::KnownSuffix));
    assert!(parses.iter().all(|p| p.provenance() == Provenance::Predicted));
    assert_eq!(normal_forms(&parses), ["банан", "банан", "банана", "банано"]);

    // Counts 3, 3, 2, 1 out of 1 + 9, halved by the unit confidence.
    let scores: Vec<f32> = parses.iter().map(|p| p.score).collect();
    for (got, want) in scores.iter().zip([0.15, 0.15, 0.1, 0.05]) {
        assert!((got - want).abs() < 1e-6, "{scores:?}");
    }
    for tag in tag_strings(&analyzer, &parses) {
        assert!(tag.ends_with("plur,ablt"), "{tag}");
    }
}

#[test]
fn longest_matching_ending_wins() {
    let analyzer = russian_analyzer();
    // "-лами" only occurs in "столами".
    let parses = analyzer.parse("стулами");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].normal_form, "стул");
    assert!((parses[0].score - 0.25).abs() < 1e-6);
}

#[test]
fn prediction_uses_prefixed_paradigm_forms() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("наихудший");
    let supr = analyzer.grammeme_set(&["Supr"]).unwrap();
    let superlative = parses
        .iter()
        .find(|p| p.tag.contains_all(&supr))
        .expect("superlative reading");
    assert_eq!(superlative.normal_form, "худший");
    assert_eq!(superlative.method, ParseMethod::KnownSuffix);

    let forms: Vec<String> = analyzer.lexeme(superlative).into_iter().map(|p| p.word).collect();
    assert_eq!(forms, ["худший", "наихудший"]);
}

#[test]
fn dictionary_prefixed_form() {
    let analyzer = russian_analyzer();
    let parses = analyzer.parse("наибольший");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].normal_form, "больший");
    assert_eq!(parses[0].method, ParseMethod::Dictionary);
}

// ---------------------------------------------------------------------------
// Lexemes, inflection, completion, filtering
// ---------------------------------------------------------------------------

#[test]
fn lexeme_and_inflect() {
    let analyzer = russian_analyzer();
    let parsed = analyzer.parse("ежику").remove(0);
    assert_eq!(parsed.normal_form, "ёжик");

    let words: Vec<String> = analyzer.lexeme(&parsed).into_iter().map(|p| p.word).collect();
    assert_eq!(words, ["ёжик", "ёжика", "ёжику", "ёжика", "ёжиком", "ёжики", "ёжиками"]);

    let plur_ablt = analyzer.grammeme_set(&["plur", "ablt"]).unwrap();
    let inflected = analyzer.inflect(&parsed, &plur_ablt, &GrammemeSet::new());
    assert_eq!(inflected.len(), 1);
    assert_eq!(inflected[0].word, "ёжиками");

    let sing = analyzer.grammeme_set(&["sing"]).unwrap();
    let datv = analyzer.grammeme_set(&["datv"]).unwrap();
    let others = analyzer.inflect(&parsed, &sing, &datv);
    assert_eq!(others.len(), 4);
    assert!(others.iter().all(|p| p.word != "ёжику"));
}

#[test]
fn lexeme_of_a_symbol_is_itself() {
    let analyzer = russian_analyzer();
    let parsed = analyzer.parse("iphone").remove(0);
    assert_eq!(analyzer.lexeme(&parsed), vec![parsed]);
}

#[test]
fn complete_dictionary_words() {
    let analyzer = russian_analyzer();
    let words: Vec<String> = analyzer
        .complete("тесто", 10)
        .into_iter()
        .map(|p| p.word)
        .collect();
    // "тестом" is both the masculine and the neuter instrumental.
    assert_eq!(words, ["тесто", "тестов", "тестом", "тестом"]);

    let limited = analyzer.complete("т", 3);
    assert_eq!(limited.len(), 3);
    let total: f32 = limited.iter().map(|p| p.score).sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn filter_parses_by_tag() {
    let analyzer = russian_analyzer();
    let anim = analyzer.grammeme_set(&["anim"]).unwrap();
    let kept = MorphAnalyzer::filter(analyzer.parse("техника"), &anim, &GrammemeSet::new());
    assert_eq!(normal_forms(&kept), ["техник", "техник"]);

    let dropped = MorphAnalyzer::filter(analyzer.parse("техника"), &GrammemeSet::new(), &anim);
    assert_eq!(normal_forms(&dropped), ["техника"]);

    let everything = MorphAnalyzer::filter(
        analyzer.parse("техника"),
        &GrammemeSet::new(),
        &GrammemeSet::new(),
    );
    assert_eq!(everything.len(), 3);
}

// ---------------------------------------------------------------------------
// Sharing and concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_parses_agree() {
    let analyzer = russian_analyzer();
    let words = ["тест", "технику", "теплые", "бананами", "лошарики", "iphone", "", "MD"];
    let expected: Vec<Vec<ParsedWord>> = words.iter().map(|w| analyzer.parse(w)).collect();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..50 {
                    for (word, want) in words.iter().zip(&expected) {
                        assert_eq!(&analyzer.parse(word), want);
                    }
                }
            });
        }
    });
}

#[test]
fn registry_shares_one_dictionary() {
    let dict = russian_dictionary();
    let mut registry = AnalyzerRegistry::new();
    for (name, lowercase) in [("ru", false), ("ru-ci", true)] {
        let config = AnalyzerConfig {
            lowercase,
            ..russian_config()
        };
        let analyzer = MorphAnalyzer::new(Arc::clone(&dict), config).unwrap();
        registry.register(name, Arc::new(analyzer)).unwrap();
    }
    assert_eq!(Arc::strong_count(&dict), 3);

    let ci = registry.get("ru-ci").unwrap();
    assert_eq!(ci.parse("Тест")[0].normal_form, "тест");
    let cs = registry.get("ru").unwrap();
    assert_ne!(cs.parse("Тест")[0].method, ParseMethod::Dictionary);

    registry.clear();
    drop((ci, cs));
    assert_eq!(Arc::strong_count(&dict), 1);
}

#[test]
fn big_endian_bundle_parses_the_same() {
    let little = MorphAnalyzer::from_bytes(&russian_bundle_with_endian(Endian::Little), russian_config())
        .unwrap();
    let big = MorphAnalyzer::from_bytes(&russian_bundle_with_endian(Endian::Big), russian_config())
        .unwrap();
    for word in ["тест", "технику", "теплые", "бананами", "наихудший"] {
        assert_eq!(little.parse(word), big.parse(word), "{word}");
    }
}
