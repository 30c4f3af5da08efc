//! Synthetic Russian dictionary shared by the integration tests and benches.
//!
//! Small enough to reason about by hand, but shaped like the real thing:
//! competing paradigms for the same surface word, a paradigm with a
//! non-empty form prefix, a pronoun (non-productive) and enough "-ами"
//! words to drive suffix prediction.

#![allow(dead_code)]

use std::sync::Arc;

use morphy::{AnalyzerConfig, BundleBuilder, Dictionary, Endian, MorphAnalyzer};

const GRAMMEMES: &[(&str, &str)] = &[
    ("POST", ""),
    ("NOUN", "POST"),
    ("ADJF", "POST"),
    ("NPRO", "POST"),
    ("ANim", ""),
    ("anim", "ANim"),
    ("inan", "ANim"),
    ("GNdr", ""),
    ("masc", "GNdr"),
    ("femn", "GNdr"),
    ("neut", "GNdr"),
    ("NMbr", ""),
    ("sing", "NMbr"),
    ("plur", "NMbr"),
    ("CAse", ""),
    ("nomn", "CAse"),
    ("gent", "CAse"),
    ("datv", "CAse"),
    ("accs", "CAse"),
    ("ablt", "CAse"),
    ("loct", "CAse"),
    ("Supr", ""),
];

/// Inanimate masculine nouns. No accusative so that "тест" has one form.
const MASC_INAN: &[(&str, &str, &str)] = &[
    ("", "", "NOUN,inan,masc sing,nomn"),
    ("", "а", "NOUN,inan,masc sing,gent"),
    ("", "у", "NOUN,inan,masc sing,datv"),
    ("", "ом", "NOUN,inan,masc sing,ablt"),
    ("", "е", "NOUN,inan,masc sing,loct"),
    ("", "ы", "NOUN,inan,masc plur,nomn"),
    ("", "ов", "NOUN,inan,masc plur,gent"),
    ("", "ами", "NOUN,inan,masc plur,ablt"),
];

const NEUT: &[(&str, &str, &str)] = &[
    ("", "о", "NOUN,inan,neut sing,nomn"),
    ("", "а", "NOUN,inan,neut sing,gent"),
    ("", "у", "NOUN,inan,neut sing,datv"),
    ("", "ом", "NOUN,inan,neut sing,ablt"),
    ("", "е", "NOUN,inan,neut sing,loct"),
    ("", "а", "NOUN,inan,neut plur,nomn"),
    ("", "", "NOUN,inan,neut plur,gent"),
    ("", "ами", "NOUN,inan,neut plur,ablt"),
];

const FEMN: &[(&str, &str, &str)] = &[
    ("", "а", "NOUN,inan,femn sing,nomn"),
    ("", "и", "NOUN,inan,femn sing,gent"),
    ("", "е", "NOUN,inan,femn sing,datv"),
    ("", "у", "NOUN,inan,femn sing,accs"),
    ("", "ой", "NOUN,inan,femn sing,ablt"),
    ("", "и", "NOUN,inan,femn plur,nomn"),
    ("", "ами", "NOUN,inan,femn plur,ablt"),
];

const MASC_ANIM: &[(&str, &str, &str)] = &[
    ("", "", "NOUN,anim,masc sing,nomn"),
    ("", "а", "NOUN,anim,masc sing,gent"),
    ("", "у", "NOUN,anim,masc sing,datv"),
    ("", "а", "NOUN,anim,masc sing,accs"),
    ("", "ом", "NOUN,anim,masc sing,ablt"),
    ("", "и", "NOUN,anim,masc plur,nomn"),
    ("", "ами", "NOUN,anim,masc plur,ablt"),
];

const ADJ: &[(&str, &str, &str)] = &[
    ("", "ый", "ADJF,masc sing,nomn"),
    ("", "ая", "ADJF,femn sing,nomn"),
    ("", "ое", "ADJF,neut sing,nomn"),
    ("", "ые", "ADJF plur,nomn"),
    ("", "ого", "ADJF,masc sing,gent"),
];

/// Comparative with a prefixed superlative form.
const SUPERLATIVE: &[(&str, &str, &str)] = &[
    ("", "ий", "ADJF,masc sing,nomn"),
    ("наи", "ий", "ADJF,Supr,masc sing,nomn"),
];

const PRONOUN: &[(&str, &str, &str)] = &[("", "", "NPRO,masc sing,nomn")];

/// Builder for the synthetic dictionary, ready to serialize.
pub fn russian_builder() -> BundleBuilder {
    let mut b = BundleBuilder::new("ru");
    for &(name, parent) in GRAMMEMES {
        b.grammeme(name, parent);
    }

    let masc_inan = b.paradigm(MASC_INAN).unwrap();
    let neut = b.paradigm(NEUT).unwrap();
    let femn = b.paradigm(FEMN).unwrap();
    let masc_anim = b.paradigm(MASC_ANIM).unwrap();
    let adj = b.paradigm(ADJ).unwrap();
    let superlative = b.paradigm(SUPERLATIVE).unwrap();
    let pronoun = b.paradigm(PRONOUN).unwrap();

    for stem in ["тест", "дом", "стол"] {
        b.lexeme(stem, masc_inan);
    }
    b.lexeme("тест", neut);
    for stem in ["техник", "кошк"] {
        b.lexeme(stem, femn);
    }
    for stem in ["техник", "шарик", "ёжик"] {
        b.lexeme(stem, masc_anim);
    }
    b.lexeme("тёпл", adj);
    b.lexeme("больш", superlative);
    b.lexeme("никто", pronoun);

    b.rank(masc_inan, 10)
        .rank(neut, 2)
        .rank(femn, 8)
        .rank(masc_anim, 3)
        .rank(adj, 5);
    b
}

pub fn russian_bundle() -> Vec<u8> {
    russian_builder().to_bytes().unwrap()
}

pub fn russian_bundle_with_endian(endian: Endian) -> Vec<u8> {
    russian_builder().with_endian(endian).to_bytes().unwrap()
}

pub fn russian_dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_bytes(&russian_bundle()).unwrap())
}

/// The configuration the tests use unless they say otherwise.
pub fn russian_config() -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default().with_language_defaults("ru");
    config.known_prefixes = vec!["псевдо".to_string()];
    config
}

pub fn russian_analyzer() -> MorphAnalyzer {
    MorphAnalyzer::new(russian_dictionary(), russian_config()).unwrap()
}
