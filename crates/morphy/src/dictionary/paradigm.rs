// Paradigm table: inflection rules shared by every lexeme of a paradigm.
//
// A surface form is `prefix + stem + suffix`, where the prefix and suffix
// strings are stored once in shared tables and referenced by id. Form 0 of
// every paradigm is the normal (dictionary) form.

use std::io::{self, Read, Write};

use morphy_core::FormRef;
use morphy_dawg::{ByteReader, ByteWriter, FormatError};

/// One inflected form: prefix id, suffix id and bundle tag index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Form {
    pub prefix_id: u16,
    pub suffix_id: u16,
    pub tag_index: u16,
}

/// The ordered forms of one paradigm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paradigm {
    forms: Vec<Form>,
}

impl Paradigm {
    pub fn new(forms: Vec<Form>) -> Self {
        Self { forms }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn form(&self, index: u16) -> Option<&Form> {
        self.forms.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParadigmTable {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    paradigms: Vec<Paradigm>,
}

impl ParadigmTable {
    pub fn new(prefixes: Vec<String>, suffixes: Vec<String>, paradigms: Vec<Paradigm>) -> Self {
        Self {
            prefixes,
            suffixes,
            paradigms,
        }
    }

    /// Decode the `PARA` section body. `tag_count` bounds the tag indices.
    pub fn read<R: Read>(
        reader: &mut ByteReader<R>,
        tag_count: usize,
    ) -> Result<Self, FormatError> {
        let section = reader.section();

        let prefix_count = reader.read_len()?;
        let mut prefixes = Vec::with_capacity(prefix_count.min(1024));
        for _ in 0..prefix_count {
            prefixes.push(reader.read_string()?);
        }
        let suffix_count = reader.read_len()?;
        let mut suffixes = Vec::with_capacity(suffix_count.min(1 << 16));
        for _ in 0..suffix_count {
            suffixes.push(reader.read_string()?);
        }
        if prefixes.len() > usize::from(u16::MAX) || suffixes.len() > usize::from(u16::MAX) {
            return Err(FormatError::inconsistent(section, "affix table exceeds u16 ids"));
        }

        let paradigm_count = reader.read_len()?;
        if paradigm_count > usize::from(u16::MAX) + 1 {
            return Err(FormatError::inconsistent(
                section,
                format!("{paradigm_count} paradigms exceed u16 ids"),
            ));
        }
        let mut paradigms = Vec::with_capacity(paradigm_count.min(1 << 16));
        for paradigm_id in 0..paradigm_count {
            let form_count = reader.read_len()?;
            if form_count == 0 || form_count > usize::from(u16::MAX) + 1 {
                return Err(FormatError::inconsistent(
                    section,
                    format!("paradigm {paradigm_id} has {form_count} forms"),
                ));
            }
            let mut forms = Vec::with_capacity(form_count.min(1024));
            for _ in 0..form_count {
                let form = Form {
                    prefix_id: reader.read_id()?,
                    suffix_id: reader.read_id()?,
                    tag_index: reader.read_id()?,
                };
                if usize::from(form.prefix_id) >= prefixes.len()
                    || usize::from(form.suffix_id) >= suffixes.len()
                    || usize::from(form.tag_index) >= tag_count
                {
                    return Err(FormatError::inconsistent(
                        section,
                        format!("paradigm {paradigm_id} references an unknown prefix, suffix or tag"),
                    ));
                }
                forms.push(form);
            }
            paradigms.push(Paradigm::new(forms));
        }

        log::debug!(
            "{section}: {} prefixes, {} suffixes, {} paradigms",
            prefixes.len(),
            suffixes.len(),
            paradigms.len()
        );
        Ok(Self::new(prefixes, suffixes, paradigms))
    }

    pub fn write_to<W: Write>(&self, writer: &mut ByteWriter<W>) -> io::Result<()> {
        writer.write_len(self.prefixes.len())?;
        for prefix in &self.prefixes {
            writer.write_string(prefix)?;
        }
        writer.write_len(self.suffixes.len())?;
        for suffix in &self.suffixes {
            writer.write_string(suffix)?;
        }
        writer.write_len(self.paradigms.len())?;
        for paradigm in &self.paradigms {
            writer.write_len(paradigm.len())?;
            for form in paradigm.forms() {
                writer.write_varint(u64::from(form.prefix_id))?;
                writer.write_varint(u64::from(form.suffix_id))?;
                writer.write_varint(u64::from(form.tag_index))?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }

    pub fn paradigm(&self, id: u16) -> Option<&Paradigm> {
        self.paradigms.get(id as usize)
    }

    pub fn form(&self, form: FormRef) -> Option<&Form> {
        self.paradigm(form.paradigm)?.form(form.form)
    }

    /// Distinct paradigm prefixes; id 0 is conventionally the empty prefix.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn prefix_of(&self, form: &Form) -> &str {
        self.prefixes
            .get(form.prefix_id as usize)
            .map_or("", String::as_str)
    }

    pub fn suffix_of(&self, form: &Form) -> &str {
        self.suffixes
            .get(form.suffix_id as usize)
            .map_or("", String::as_str)
    }

    /// The stem of `word` read as form `form`, or `None` if `word` does not
    /// carry that form's prefix and suffix.
    pub fn build_stem<'w>(&self, form: FormRef, word: &'w str) -> Option<&'w str> {
        let f = self.form(form)?;
        word.strip_prefix(self.prefix_of(f))?
            .strip_suffix(self.suffix_of(f))
    }

    /// Assemble form `index` of `paradigm` around `stem`.
    pub fn build_form(&self, paradigm: u16, index: u16, stem: &str) -> Option<String> {
        let f = self.paradigm(paradigm)?.form(index)?;
        let prefix = self.prefix_of(f);
        let suffix = self.suffix_of(f);
        let mut out = String::with_capacity(prefix.len() + stem.len() + suffix.len());
        out.push_str(prefix);
        out.push_str(stem);
        out.push_str(suffix);
        Some(out)
    }

    /// The normal form (form 0) of the lexeme `word` belongs to.
    pub fn build_normal_form(&self, form: FormRef, word: &str) -> Option<String> {
        if form.form == 0 {
            self.form(form)?;
            return Some(word.to_string());
        }
        let stem = self.build_stem(form, word)?;
        self.build_form(form.paradigm, 0, stem)
    }
}
