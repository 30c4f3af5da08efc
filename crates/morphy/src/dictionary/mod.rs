// Dictionary bundle loading and the immutable tables it produces.
//
// Section order: header, GRAM, TAGS, PARA, RANK, WORD, PRED, footer.
// Everything is validated here so the analyzer never meets a dangling id.

pub mod builder;
pub mod paradigm;
pub mod payload;
pub mod rank;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use morphy_core::{FormRef, GrammemeTable, Tag, TagError, TagTable};
use morphy_dawg::format::{
    TAG_GRAMMEMES, TAG_PARADIGMS, TAG_PREDICTION, TAG_RANKS, TAG_TAGS, TAG_WORDS,
};
use morphy_dawg::{ByteReader, Dawg, FormatError, format};

use crate::MorphError;
use paradigm::{Paradigm, ParadigmTable};
use payload::{SuffixPayload, WordPayload};
use rank::WordRankTable;

/// Grammemes every dictionary gets, with their parents.
const SERVICE_GRAMMEMES: [(&str, Option<&str>); 8] = [
    ("LATN", Some("POST")),
    ("PNCT", Some("POST")),
    ("NUMB", Some("POST")),
    ("ROMN", Some("POST")),
    ("UNKN", Some("POST")),
    ("intg", None),
    ("real", None),
    ("POST", None),
];

/// Tags assigned by the non-dictionary analyzer units.
#[derive(Debug, Clone, Copy)]
pub struct ServiceTags {
    pub latin: Tag,
    pub punctuation: Tag,
    pub integer: Tag,
    pub real: Tag,
    pub roman: Tag,
    pub unknown: Tag,
}

impl ServiceTags {
    fn intern(tags: &mut TagTable) -> Result<Self, TagError> {
        Ok(Self {
            latin: tags.intern("LATN")?,
            punctuation: tags.intern("PNCT")?,
            integer: tags.intern("NUMB,intg")?,
            real: tags.intern("NUMB,real")?,
            roman: tags.intern("ROMN")?,
            unknown: tags.intern("UNKN")?,
        })
    }
}

fn tag_error(section: &'static str, err: TagError) -> FormatError {
    FormatError::inconsistent(section, err.to_string())
}

/// A loaded dictionary bundle.
///
/// Immutable after loading; share it between analyzers with `Arc`.
#[derive(Debug)]
pub struct Dictionary {
    language: String,
    version: u16,
    tags: TagTable,
    gramtab: Vec<Tag>,
    service: ServiceTags,
    paradigms: ParadigmTable,
    ranks: WordRankTable,
    words: Dawg<WordPayload>,
    prediction: Vec<Dawg<SuffixPayload>>,
}

impl Dictionary {
    /// Decode and validate a bundle from a byte stream.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, FormatError> {
        let mut reader = ByteReader::new(source);
        let header = format::read_header(&mut reader)?;
        log::debug!(
            "bundle header: language={:?} version={} endian={:?}",
            header.language,
            header.version,
            header.endian
        );

        // GRAM
        reader.set_section("grammemes");
        reader.expect_tag(&TAG_GRAMMEMES)?;
        let count = reader.read_len()?;
        let mut entries = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let name = reader.read_string()?;
            let parent = reader.read_string()?;
            entries.push((name, parent));
        }
        let mut grammemes =
            GrammemeTable::from_entries(entries).map_err(|e| tag_error("grammemes", e))?;
        for (name, parent) in SERVICE_GRAMMEMES {
            grammemes
                .ensure(name, parent)
                .map_err(|e| tag_error("grammemes", e))?;
        }
        log::debug!("grammemes: {} entries", grammemes.len());

        // TAGS
        reader.set_section("tags");
        reader.expect_tag(&TAG_TAGS)?;
        let count = reader.read_len()?;
        if count > usize::from(u16::MAX) + 1 {
            return Err(FormatError::inconsistent(
                "tags",
                format!("{count} tags exceed u16 indices"),
            ));
        }
        let mut tags = TagTable::new(grammemes);
        let mut gramtab = Vec::with_capacity(count);
        for _ in 0..count {
            let text = reader.read_string()?;
            gramtab.push(tags.intern(&text).map_err(|e| tag_error("tags", e))?);
        }
        let service = ServiceTags::intern(&mut tags).map_err(|e| tag_error("tags", e))?;
        log::debug!("tags: {} indices, {} distinct", gramtab.len(), tags.len());

        // PARA
        reader.set_section("paradigms");
        reader.expect_tag(&TAG_PARADIGMS)?;
        let paradigms = ParadigmTable::read(&mut reader, gramtab.len())?;
        if paradigms.prefixes().is_empty() {
            return Err(FormatError::inconsistent(
                "paradigms",
                "prefix table must contain at least the empty prefix",
            ));
        }

        // RANK
        reader.set_section("ranks");
        reader.expect_tag(&TAG_RANKS)?;
        let ranks = WordRankTable::read(&mut reader, paradigms.len())?;

        // WORD
        reader.set_section("words");
        reader.expect_tag(&TAG_WORDS)?;
        let words = Dawg::<WordPayload>::read(&mut reader)?;

        // PRED
        reader.set_section("prediction");
        reader.expect_tag(&TAG_PREDICTION)?;
        let count = reader.read_len()?;
        if count != paradigms.prefixes().len() {
            return Err(FormatError::inconsistent(
                "prediction",
                format!(
                    "{count} prediction automatons for {} paradigm prefixes",
                    paradigms.prefixes().len()
                ),
            ));
        }
        let mut prediction = Vec::with_capacity(count);
        for _ in 0..count {
            prediction.push(Dawg::<SuffixPayload>::read(&mut reader)?);
        }

        format::read_footer(&mut reader)?;

        validate_words(&words, &paradigms)?;
        validate_prediction(&prediction, &paradigms)?;

        log::info!(
            "loaded {:?} dictionary: {} word payloads, {} paradigms, {} tags, {} prediction automatons",
            header.language,
            words.payload_count(),
            paradigms.len(),
            gramtab.len(),
            prediction.len()
        );

        Ok(Self {
            language: header.language,
            version: header.version,
            tags,
            gramtab,
            service,
            paradigms,
            ranks,
            words,
            prediction,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        Self::from_reader(data)
    }

    /// Open and load a bundle file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MorphError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(crate::ConfigError::EmptyDictionaryPath.into());
        }
        let file = File::open(path).map_err(|source| MorphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }

    /// Language code from the bundle header.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn tag_table(&self) -> &TagTable {
        &self.tags
    }

    pub fn service_tags(&self) -> &ServiceTags {
        &self.service
    }

    /// Tag for a bundle tag index.
    pub fn decode_tag(&self, tag_index: u16) -> Option<Tag> {
        self.gramtab.get(usize::from(tag_index)).copied()
    }

    pub fn tag_count(&self) -> usize {
        self.gramtab.len()
    }

    /// Tag of a paradigm form.
    pub fn tag(&self, form: FormRef) -> Option<Tag> {
        self.decode_tag(self.paradigms.form(form)?.tag_index)
    }

    pub fn paradigms(&self) -> &ParadigmTable {
        &self.paradigms
    }

    pub fn paradigm(&self, id: u16) -> Option<&Paradigm> {
        self.paradigms.paradigm(id)
    }

    pub fn paradigm_prefixes(&self) -> &[String] {
        self.paradigms.prefixes()
    }

    pub fn build_stem<'w>(&self, form: FormRef, word: &'w str) -> Option<&'w str> {
        self.paradigms.build_stem(form, word)
    }

    pub fn build_normal_form(&self, form: FormRef, word: &str) -> Option<String> {
        self.paradigms.build_normal_form(form, word)
    }

    /// Every form of the lexeme `word` belongs to, in paradigm order.
    pub fn lexeme(&self, form: FormRef, word: &str) -> Vec<(String, FormRef)> {
        let Some(stem) = self.build_stem(form, word) else {
            return Vec::new();
        };
        let Some(paradigm) = self.paradigm(form.paradigm) else {
            return Vec::new();
        };
        (0..paradigm.len() as u16)
            .filter_map(|index| {
                let surface = self.paradigms.build_form(form.paradigm, index, stem)?;
                Some((
                    surface,
                    FormRef {
                        paradigm: form.paradigm,
                        form: index,
                    },
                ))
            })
            .collect()
    }

    pub fn ranks(&self) -> &WordRankTable {
        &self.ranks
    }

    /// Relative frequency of a paradigm (0 when unranked).
    pub fn rank(&self, paradigm: u16) -> u32 {
        self.ranks.frequency(paradigm)
    }

    /// The main word automaton.
    pub fn words(&self) -> &Dawg<WordPayload> {
        &self.words
    }

    /// Prediction automaton for paradigm prefix `prefix_id`.
    pub fn prediction(&self, prefix_id: usize) -> Option<&Dawg<SuffixPayload>> {
        self.prediction.get(prefix_id)
    }
}

fn validate_words(words: &Dawg<WordPayload>, paradigms: &ParadigmTable) -> Result<(), FormatError> {
    for (word, payload) in words.iter() {
        if paradigms.form(payload.form_ref()).is_none() {
            return Err(FormatError::inconsistent(
                "words",
                format!(
                    "{word:?} references missing form {}/{}",
                    payload.paradigm, payload.form
                ),
            ));
        }
        if paradigms.build_stem(payload.form_ref(), &word).is_none() {
            return Err(FormatError::inconsistent(
                "words",
                format!(
                    "{word:?} does not fit the affixes of form {}/{}",
                    payload.paradigm, payload.form
                ),
            ));
        }
    }
    Ok(())
}

fn validate_prediction(
    prediction: &[Dawg<SuffixPayload>],
    paradigms: &ParadigmTable,
) -> Result<(), FormatError> {
    for (prefix_id, dawg) in prediction.iter().enumerate() {
        for (ending, payload) in dawg.iter() {
            let Some(form) = paradigms.form(payload.form_ref()) else {
                return Err(FormatError::inconsistent(
                    "prediction",
                    format!(
                        "ending {ending:?} references missing form {}/{}",
                        payload.paradigm, payload.form
                    ),
                ));
            };
            if usize::from(form.prefix_id) != prefix_id {
                return Err(FormatError::inconsistent(
                    "prediction",
                    format!("ending {ending:?} filed under the wrong paradigm prefix"),
                ));
            }
        }
    }
    Ok(())
}
