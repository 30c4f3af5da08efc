// Bundle construction from explicitly declared paradigms and lexemes.
//
// Used by tests, benchmarks and tooling that converts existing dictionaries.
// Prediction statistics are derived from the declared lexemes: every word
// form contributes each of its endings (up to `max_suffix_length` chars, and
// never shorter than the form's suffix) to the prediction automaton of its
// paradigm prefix.

use std::collections::BTreeMap;
use std::io::{self, Write};

use hashbrown::HashMap;
use morphy_dawg::format::{
    self, TAG_GRAMMEMES, TAG_PARADIGMS, TAG_PREDICTION, TAG_RANKS, TAG_TAGS, TAG_WORDS,
};
use morphy_dawg::{ByteWriter, DawgBuilder, Endian, FormatError};

use super::Dictionary;
use super::paradigm::{Form, Paradigm, ParadigmTable};
use super::payload::{SuffixPayload, WordPayload};
use super::rank::WordRankTable;

/// Builder for dictionary bundles.
///
/// ```
/// use morphy::BundleBuilder;
///
/// let mut b = BundleBuilder::new("ru");
/// b.grammeme("POST", "").grammeme("NOUN", "POST");
/// b.grammeme("NMbr", "").grammeme("sing", "NMbr").grammeme("plur", "NMbr");
/// let p = b.paradigm(&[("", "", "NOUN,sing"), ("", "ы", "NOUN,plur")]).unwrap();
/// b.lexeme("кот", p);
/// let dict = b.build().unwrap();
/// assert!(dict.words().contains("коты"));
/// ```
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    language: String,
    endian: Endian,
    max_suffix_length: usize,
    grammemes: Vec<(String, String)>,
    tags: Vec<String>,
    tag_ids: HashMap<String, u16>,
    prefixes: Vec<String>,
    prefix_ids: HashMap<String, u16>,
    suffixes: Vec<String>,
    suffix_ids: HashMap<String, u16>,
    paradigms: Vec<Paradigm>,
    ranks: Vec<(u16, u32)>,
    lexemes: Vec<(String, u16)>,
}

fn intern(
    items: &mut Vec<String>,
    ids: &mut HashMap<String, u16>,
    value: &str,
    section: &'static str,
) -> Result<u16, FormatError> {
    if let Some(&id) = ids.get(value) {
        return Ok(id);
    }
    let id = u16::try_from(items.len())
        .map_err(|_| FormatError::inconsistent(section, "too many distinct entries"))?;
    items.push(value.to_string());
    ids.insert(value.to_string(), id);
    Ok(id)
}

impl BundleBuilder {
    pub fn new(language: &str) -> Self {
        let mut prefix_ids = HashMap::new();
        prefix_ids.insert(String::new(), 0);
        Self {
            language: language.to_string(),
            endian: Endian::native(),
            max_suffix_length: 5,
            grammemes: Vec::new(),
            tags: Vec::new(),
            tag_ids: HashMap::new(),
            prefixes: vec![String::new()],
            prefix_ids,
            suffixes: Vec::new(),
            suffix_ids: HashMap::new(),
            paradigms: Vec::new(),
            ranks: Vec::new(),
            lexemes: Vec::new(),
        }
    }

    /// Byte order of the written bundle (default: native).
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Longest ending recorded for prediction (default 5).
    pub fn with_max_suffix_length(mut self, length: usize) -> Self {
        self.max_suffix_length = length;
        self
    }

    /// Declare a grammeme; an empty `parent` makes it a category root.
    pub fn grammeme(&mut self, name: &str, parent: &str) -> &mut Self {
        self.grammemes.push((name.to_string(), parent.to_string()));
        self
    }

    /// Declare a paradigm from `(prefix, suffix, tag)` triples; the first
    /// triple is the normal form. Returns the paradigm id.
    pub fn paradigm(&mut self, forms: &[(&str, &str, &str)]) -> Result<u16, FormatError> {
        if forms.is_empty() {
            return Err(FormatError::inconsistent("paradigms", "paradigm without forms"));
        }
        let id = u16::try_from(self.paradigms.len())
            .map_err(|_| FormatError::inconsistent("paradigms", "too many paradigms"))?;
        let mut out = Vec::with_capacity(forms.len());
        for &(prefix, suffix, tag) in forms {
            out.push(Form {
                prefix_id: intern(&mut self.prefixes, &mut self.prefix_ids, prefix, "paradigms")?,
                suffix_id: intern(&mut self.suffixes, &mut self.suffix_ids, suffix, "paradigms")?,
                tag_index: intern(&mut self.tags, &mut self.tag_ids, tag, "tags")?,
            });
        }
        self.paradigms.push(Paradigm::new(out));
        Ok(id)
    }

    /// Add every form of `paradigm` built around `stem`.
    pub fn lexeme(&mut self, stem: &str, paradigm: u16) -> &mut Self {
        self.lexemes.push((stem.to_string(), paradigm));
        self
    }

    /// Set the relative frequency of a paradigm.
    pub fn rank(&mut self, paradigm: u16, frequency: u32) -> &mut Self {
        self.ranks.push((paradigm, frequency));
        self
    }

    fn paradigm_table(&self) -> ParadigmTable {
        ParadigmTable::new(
            self.prefixes.clone(),
            self.suffixes.clone(),
            self.paradigms.clone(),
        )
    }

    /// Serialize the bundle.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let table = self.paradigm_table();

        let mut words = DawgBuilder::new();
        let mut endings: Vec<BTreeMap<(String, u16, u16), u32>> =
            vec![BTreeMap::new(); self.prefixes.len()];
        for (stem, paradigm_id) in &self.lexemes {
            let paradigm = table.paradigm(*paradigm_id).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("lexeme {stem:?} uses unknown paradigm {paradigm_id}"),
                )
            })?;
            for (index, form) in paradigm.forms().iter().enumerate() {
                let index = index as u16;
                let Some(word) = table.build_form(*paradigm_id, index, stem) else {
                    continue;
                };
                words.insert(
                    &word,
                    WordPayload {
                        paradigm: *paradigm_id,
                        form: index,
                    },
                );

                let chars: Vec<char> = word.chars().collect();
                let suffix_len = table.suffix_of(form).chars().count();
                let longest = self.max_suffix_length.min(chars.len());
                for len in suffix_len.max(1)..=longest {
                    let ending: String = chars[chars.len() - len..].iter().collect();
                    *endings[usize::from(form.prefix_id)]
                        .entry((ending, *paradigm_id, index))
                        .or_insert(0) += 1;
                }
            }
        }

        let mut w = ByteWriter::new(writer, self.endian);
        format::write_header(&mut w, &self.language)?;

        w.write_raw(&TAG_GRAMMEMES)?;
        w.write_len(self.grammemes.len())?;
        for (name, parent) in &self.grammemes {
            w.write_string(name)?;
            w.write_string(parent)?;
        }

        w.write_raw(&TAG_TAGS)?;
        w.write_len(self.tags.len())?;
        for tag in &self.tags {
            w.write_string(tag)?;
        }

        w.write_raw(&TAG_PARADIGMS)?;
        table.write_to(&mut w)?;

        w.write_raw(&TAG_RANKS)?;
        WordRankTable::from_pairs(self.ranks.iter().copied()).write_to(&mut w)?;

        w.write_raw(&TAG_WORDS)?;
        words.build().write_to(&mut w)?;

        w.write_raw(&TAG_PREDICTION)?;
        w.write_len(endings.len())?;
        for per_prefix in endings {
            let mut dawg = DawgBuilder::new();
            for ((ending, paradigm, form), count) in per_prefix {
                dawg.insert(
                    &ending,
                    SuffixPayload {
                        count: u16::try_from(count).unwrap_or(u16::MAX),
                        paradigm,
                        form,
                        reserved: 0,
                    },
                );
            }
            dawg.build().write_to(&mut w)?;
        }

        format::write_footer(&mut w)?;
        w.flush()
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Serialize and load the bundle in one step.
    pub fn build(&self) -> Result<Dictionary, FormatError> {
        let bytes = self.to_bytes().map_err(|source| FormatError::Io {
            section: "header",
            source,
        })?;
        Dictionary::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphy_core::FormRef;

    fn make_builder() -> BundleBuilder {
        let mut b = BundleBuilder::new("ru");
        b.grammeme("POST", "")
            .grammeme("NOUN", "POST")
            .grammeme("NMbr", "")
            .grammeme("sing", "NMbr")
            .grammeme("plur", "NMbr")
            .grammeme("CAse", "")
            .grammeme("nomn", "CAse")
            .grammeme("gent", "CAse");
        let p = b
            .paradigm(&[
                ("", "", "NOUN,sing,nomn"),
                ("", "а", "NOUN,sing,gent"),
                ("", "ы", "NOUN,plur,nomn"),
            ])
            .unwrap();
        b.lexeme("кот", p).lexeme("слон", p).rank(p, 3);
        b
    }

    #[test]
    fn builds_loadable_bundle_in_both_orders() {
        for endian in [Endian::Little, Endian::Big] {
            let dict = make_builder().with_endian(endian).build().unwrap();
            assert_eq!(dict.language(), "ru");
            assert_eq!(dict.rank(0), 3);
            assert_eq!(dict.words().lookup("кота").len(), 1);
            let form = dict.words().lookup("слоны")[0].form_ref();
            assert_eq!(form, FormRef { paradigm: 0, form: 2 });
            assert_eq!(dict.build_normal_form(form, "слоны").as_deref(), Some("слон"));
            let tag = dict.tag(form).unwrap();
            assert_eq!(dict.tag_table().tag_string(&tag), "NOUN,plur,nomn");
        }
    }

    #[test]
    fn prediction_counts_endings() {
        let dict = make_builder().build().unwrap();
        let pred = dict.prediction(0).unwrap();
        // "ы" is the suffix of form 2 for both кот and слон.
        let hits = pred.lookup("ы");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].count, 2);
        assert_eq!(hits[0].form, 2);
        // Endings shorter than the form suffix are not recorded; the bare
        // form contributes its last characters.
        assert_eq!(pred.lookup("т")[0].count, 1);
        assert!(pred.lookup("от").iter().all(|p| p.form == 0));
    }

    #[test]
    fn unknown_paradigm_in_lexeme() {
        let mut b = make_builder();
        b.lexeme("пёс", 42);
        assert!(b.to_bytes().is_err());
    }

    #[test]
    fn empty_paradigm_rejected() {
        let mut b = BundleBuilder::new("ru");
        assert!(b.paradigm(&[]).is_err());
    }

    #[test]
    fn unknown_grammeme_in_tag_fails_load() {
        let mut b = make_builder();
        b.paradigm(&[("", "", "NOUN,xyz")]).unwrap();
        match b.build() {
            Err(FormatError::Inconsistent { section, message }) => {
                assert_eq!(section, "tags");
                assert!(message.contains("xyz"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn corruption_is_detected() {
        let bytes = make_builder().to_bytes().unwrap();

        // Truncation anywhere fails.
        for cut in [3, 10, bytes.len() / 2, bytes.len() - 1] {
            assert!(Dictionary::from_bytes(&bytes[..cut]).is_err(), "cut at {cut}");
        }

        // A flipped byte inside the body fails the checksum or a section check.
        let mut flipped = bytes.clone();
        let middle = flipped.len() / 2;
        flipped[middle] ^= 0x5A;
        assert!(Dictionary::from_bytes(&flipped).is_err());

        // Wrong magic.
        let mut bad = bytes;
        bad[0] = b'Z';
        assert!(matches!(
            Dictionary::from_bytes(&bad),
            Err(FormatError::InvalidMagic)
        ));
    }
}
