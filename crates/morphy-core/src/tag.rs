// Morphological tags and the tag interning table.

use hashbrown::HashMap;

use crate::TagError;
use crate::grammeme::{Category, GrammemeId, GrammemeSet, GrammemeTable};

/// Parts of speech that never take part in prefix or suffix guessing.
pub const NON_PRODUCTIVE: [&str; 8] = [
    "NUMR", "NPRO", "PRED", "PREP", "CONJ", "PRCL", "INTJ", "Apro",
];

/// Index of an interned tag in its [`TagTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u32);

impl TagId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An interned tag: a grammeme set plus its part-of-speech member.
///
/// Tags are `Copy`; two tags from the same table are equal exactly when
/// their grammeme sets are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    id: TagId,
    pos: Option<GrammemeId>,
    grammemes: GrammemeSet,
}

impl Tag {
    pub fn id(&self) -> TagId {
        self.id
    }

    /// The part-of-speech grammeme, if the tag has one.
    pub fn pos(&self) -> Option<GrammemeId> {
        self.pos
    }

    pub fn grammemes(&self) -> &GrammemeSet {
        &self.grammemes
    }

    #[inline]
    pub fn contains(&self, grammeme: GrammemeId) -> bool {
        self.grammemes.contains(grammeme)
    }

    #[inline]
    pub fn contains_all(&self, set: &GrammemeSet) -> bool {
        set.is_subset(&self.grammemes)
    }

    #[inline]
    pub fn contains_any(&self, set: &GrammemeSet) -> bool {
        self.grammemes.intersects(set)
    }

    /// All of `required` present and none of `excluded`.
    #[inline]
    pub fn matches(&self, required: &GrammemeSet, excluded: &GrammemeSet) -> bool {
        self.contains_all(required) && !self.contains_any(excluded)
    }
}

/// Split a tag string into grammeme names. Separators are `,` and whitespace.
pub fn split_tag(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

/// Interning table for tags.
///
/// Owns the grammeme vocabulary and hands out [`Tag`] values; interning the
/// same grammeme set twice returns the same tag.
#[derive(Debug, Clone)]
pub struct TagTable {
    grammemes: GrammemeTable,
    tags: Vec<Tag>,
    strings: Vec<String>,
    by_set: HashMap<GrammemeSet, TagId>,
    category_roots: [Option<GrammemeId>; Category::COUNT],
    non_productive: GrammemeSet,
}

impl TagTable {
    pub fn new(grammemes: GrammemeTable) -> Self {
        let mut category_roots = [None; Category::COUNT];
        for (slot, category) in category_roots.iter_mut().zip(Category::ALL) {
            *slot = grammemes.get(category.root_name());
        }
        let non_productive = NON_PRODUCTIVE
            .iter()
            .filter_map(|name| grammemes.get(name))
            .collect();
        Self {
            grammemes,
            tags: Vec::new(),
            strings: Vec::new(),
            by_set: HashMap::new(),
            category_roots,
            non_productive,
        }
    }

    pub fn grammemes(&self) -> &GrammemeTable {
        &self.grammemes
    }

    /// Parse a tag string into its grammeme set without interning it.
    pub fn parse_set(&self, text: &str) -> Result<GrammemeSet, TagError> {
        let mut set = GrammemeSet::new();
        for name in split_tag(text) {
            let id = self
                .grammemes
                .get(name)
                .ok_or_else(|| TagError::UnknownGrammeme(name.to_string()))?;
            set.insert(id);
        }
        if set.is_empty() {
            return Err(TagError::EmptyTag);
        }
        Ok(set)
    }

    /// Intern a tag string such as `"NOUN,anim,masc sing,nomn"`.
    pub fn intern(&mut self, text: &str) -> Result<Tag, TagError> {
        let set = self.parse_set(text)?;
        if let Some(&id) = self.by_set.get(&set) {
            return Ok(self.tags[id.index()]);
        }
        let id = TagId(self.tags.len() as u32);
        let tag = Tag {
            id,
            pos: self.member_of(&set, Category::PartOfSpeech),
            grammemes: set,
        };
        self.tags.push(tag);
        self.strings.push(text.trim().to_string());
        self.by_set.insert(set, id);
        Ok(tag)
    }

    /// Look up an already interned tag by its string form.
    pub fn tag_by_string(&self, text: &str) -> Option<Tag> {
        let set = self.parse_set(text).ok()?;
        self.by_set.get(&set).map(|id| self.tags[id.index()])
    }

    pub fn get(&self, id: TagId) -> Option<Tag> {
        self.tags.get(id.index()).copied()
    }

    /// The string the tag was first interned with.
    pub fn tag_string(&self, tag: &Tag) -> &str {
        self.strings
            .get(tag.id.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Grammeme names of `tag` in vocabulary order.
    pub fn grammeme_names(&self, tag: &Tag) -> Vec<&str> {
        tag.grammemes
            .iter()
            .map(|id| self.grammemes.name(id))
            .collect()
    }

    /// The member of `tag` belonging to `category`.
    pub fn category(&self, tag: &Tag, category: Category) -> Option<GrammemeId> {
        if category == Category::PartOfSpeech {
            return tag.pos;
        }
        self.member_of(&tag.grammemes, category)
    }

    /// Convenience wrapper around [`TagTable::category`] returning the name.
    pub fn category_name(&self, tag: &Tag, category: Category) -> Option<&str> {
        self.category(tag, category).map(|id| self.grammemes.name(id))
    }

    fn member_of(&self, set: &GrammemeSet, category: Category) -> Option<GrammemeId> {
        let root = self.category_roots[category as usize]?;
        set.iter().find(|&g| self.grammemes.root(g) == Some(root))
    }

    /// Whether prefix and suffix guessing may produce this tag.
    pub fn is_productive(&self, tag: &Tag) -> bool {
        !tag.contains_any(&self.non_productive)
    }

    /// Resolve grammeme names into a set for filtering.
    pub fn grammeme_set<S: AsRef<str>>(&self, names: &[S]) -> Result<GrammemeSet, TagError> {
        self.grammemes.set_of(names)
    }

    pub fn grammeme(&self, name: &str) -> Option<GrammemeId> {
        self.grammemes.get(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> TagTable {
        let grammemes = GrammemeTable::from_entries([
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
            ("NMbr", ""),
            ("sing", "NMbr"),
            ("plur", "NMbr"),
            ("CAse", ""),
            ("nomn", "CAse"),
            ("gent", "CAse"),
            ("gen2", "gent"),
        ])
        .unwrap();
        TagTable::new(grammemes)
    }

    #[test]
    fn interning_is_structural() {
        let mut t = make_table();
        let a = t.intern("NOUN,anim,masc sing,nomn").unwrap();
        let b = t.intern("NOUN masc,anim,nomn,sing").unwrap();
        assert_eq!(a, b);
        assert_eq!(t.len(), 1);
        assert_eq!(t.tag_string(&b), "NOUN,anim,masc sing,nomn");
        assert_eq!(t.tag_by_string("nomn,sing,masc,anim,NOUN"), Some(a));
        assert_eq!(t.tag_by_string("NOUN,inan,masc sing,nomn"), None);
    }

    #[test]
    fn categories() {
        let mut t = make_table();
        let tag = t.intern("NOUN,inan,femn sing,gen2").unwrap();
        assert_eq!(t.category_name(&tag, Category::PartOfSpeech), Some("NOUN"));
        assert_eq!(t.category_name(&tag, Category::Animacy), Some("inan"));
        assert_eq!(t.category_name(&tag, Category::Gender), Some("femn"));
        assert_eq!(t.category_name(&tag, Category::Number), Some("sing"));
        // Nested grammeme resolves through its root.
        assert_eq!(t.category_name(&tag, Category::Case), Some("gen2"));
        assert_eq!(t.category(&tag, Category::Tense), None);
    }

    #[test]
    fn contains_and_matches() {
        let mut t = make_table();
        let tag = t.intern("ADJF,masc,sing,nomn").unwrap();
        let required = t.grammeme_set(&["ADJF", "sing"]).unwrap();
        let excluded = t.grammeme_set(&["plur"]).unwrap();
        assert!(tag.contains(t.grammeme("masc").unwrap()));
        assert!(tag.contains_all(&required));
        assert!(!tag.contains_any(&excluded));
        assert!(tag.matches(&required, &excluded));
        assert!(!tag.matches(&excluded, &GrammemeSet::new()));
    }

    #[test]
    fn productivity() {
        let mut t = make_table();
        let noun = t.intern("NOUN,anim,masc,sing,nomn").unwrap();
        let npro = t.intern("NPRO,masc,sing,nomn").unwrap();
        assert!(t.is_productive(&noun));
        assert!(!t.is_productive(&npro));
    }

    #[test]
    fn bad_tags() {
        let mut t = make_table();
        assert_eq!(t.intern(" , "), Err(TagError::EmptyTag));
        assert_eq!(
            t.intern("NOUN,xxx"),
            Err(TagError::UnknownGrammeme("xxx".to_string()))
        );
        assert!(t.is_empty());
    }

    #[test]
    fn split_on_commas_and_spaces() {
        let parts: Vec<&str> = split_tag("VERB,perf,tran sing,3per").collect();
        assert_eq!(parts, vec!["VERB", "perf", "tran", "sing", "3per"]);
    }
}
