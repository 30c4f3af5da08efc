// Grammeme vocabulary and compact grammeme sets.

use hashbrown::HashMap;

use crate::TagError;

/// Maximum number of distinct grammemes a vocabulary may hold.
pub const MAX_GRAMMEMES: usize = 256;

/// Root grammeme of the part-of-speech category.
pub const POS_ROOT: &str = "POST";

// ---------------------------------------------------------------------------
// GrammemeId / GrammemeSet
// ---------------------------------------------------------------------------

/// Index of a grammeme in its [`GrammemeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrammemeId(u16);

impl GrammemeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A set of grammemes stored as a 256-bit mask.
///
/// Set operations are a handful of word-wise bit operations, which keeps
/// tag filtering cheap enough to run on every parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GrammemeSet {
    bits: [u64; MAX_GRAMMEMES / 64],
}

impl GrammemeSet {
    pub const fn new() -> Self {
        Self {
            bits: [0; MAX_GRAMMEMES / 64],
        }
    }

    #[inline]
    pub fn insert(&mut self, id: GrammemeId) {
        let i = id.index();
        self.bits[i / 64] |= 1 << (i % 64);
    }

    #[inline]
    pub fn remove(&mut self, id: GrammemeId) {
        let i = id.index();
        self.bits[i / 64] &= !(1 << (i % 64));
    }

    #[inline]
    pub fn contains(&self, id: GrammemeId) -> bool {
        let i = id.index();
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Every member of `self` is in `other`.
    pub fn is_subset(&self, other: &GrammemeSet) -> bool {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// `self` and `other` share at least one member.
    pub fn intersects(&self, other: &GrammemeSet) -> bool {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .any(|(a, b)| a & b != 0)
    }

    pub fn union(&self, other: &GrammemeSet) -> GrammemeSet {
        let mut out = *self;
        for (a, b) in out.bits.iter_mut().zip(other.bits.iter()) {
            *a |= b;
        }
        out
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = GrammemeId> + '_ {
        (0..MAX_GRAMMEMES)
            .filter(move |&i| self.bits[i / 64] & (1 << (i % 64)) != 0)
            .map(|i| GrammemeId(i as u16))
    }
}

impl FromIterator<GrammemeId> for GrammemeSet {
    fn from_iter<I: IntoIterator<Item = GrammemeId>>(iter: I) -> Self {
        let mut set = GrammemeSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Grammeme table
// ---------------------------------------------------------------------------

/// A grammeme: name plus optional parent in the category hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammeme {
    pub name: String,
    pub parent: Option<GrammemeId>,
}

/// The grammeme vocabulary of a dictionary.
///
/// Grammemes form a forest: each category (part of speech, case, number...)
/// is a root, and concrete values hang below it.
#[derive(Debug, Clone, Default)]
pub struct GrammemeTable {
    grammemes: Vec<Grammeme>,
    by_name: HashMap<String, GrammemeId>,
}

impl GrammemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, parent)` pairs; an empty parent marks a root.
    ///
    /// Parents may be listed after their children.
    pub fn from_entries<I, N, P>(entries: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: AsRef<str>,
        P: AsRef<str>,
    {
        let mut table = Self::new();
        let mut parents = Vec::new();
        for (name, parent) in entries {
            let id = table.intern(name.as_ref())?;
            parents.push((id, parent.as_ref().to_string()));
        }
        for (id, parent) in parents {
            if parent.is_empty() {
                continue;
            }
            let parent_id = table
                .get(&parent)
                .ok_or_else(|| TagError::UnknownGrammeme(parent.clone()))?;
            table.grammemes[id.index()].parent = Some(parent_id);
        }
        table.check_acyclic()?;
        Ok(table)
    }

    /// Add `name` under `parent` unless it already exists.
    ///
    /// Existing grammemes keep their parent.
    pub fn ensure(&mut self, name: &str, parent: Option<&str>) -> Result<GrammemeId, TagError> {
        if let Some(id) = self.get(name) {
            return Ok(id);
        }
        let parent_id = match parent {
            Some(p) => Some(self.ensure(p, None)?),
            None => None,
        };
        let id = self.intern(name)?;
        self.grammemes[id.index()].parent = parent_id;
        Ok(id)
    }

    fn intern(&mut self, name: &str) -> Result<GrammemeId, TagError> {
        if name.is_empty() {
            return Err(TagError::EmptyGrammeme);
        }
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        if self.grammemes.len() >= MAX_GRAMMEMES {
            return Err(TagError::TooManyGrammemes(MAX_GRAMMEMES));
        }
        let id = GrammemeId(self.grammemes.len() as u16);
        self.grammemes.push(Grammeme {
            name: name.to_string(),
            parent: None,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn check_acyclic(&self) -> Result<(), TagError> {
        for start in 0..self.grammemes.len() {
            let mut current = self.grammemes[start].parent;
            let mut steps = 0;
            while let Some(p) = current {
                steps += 1;
                if steps > self.grammemes.len() {
                    return Err(TagError::ParentCycle(self.grammemes[start].name.clone()));
                }
                current = self.grammemes[p.index()].parent;
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<GrammemeId> {
        self.by_name.get(name).copied()
    }

    pub fn grammeme(&self, id: GrammemeId) -> &Grammeme {
        &self.grammemes[id.index()]
    }

    pub fn name(&self, id: GrammemeId) -> &str {
        &self.grammemes[id.index()].name
    }

    pub fn parent(&self, id: GrammemeId) -> Option<GrammemeId> {
        self.grammemes[id.index()].parent
    }

    /// Topmost ancestor of `id`, or `None` when `id` is itself a root.
    pub fn root(&self, id: GrammemeId) -> Option<GrammemeId> {
        let mut current = self.parent(id)?;
        while let Some(p) = self.parent(current) {
            current = p;
        }
        Some(current)
    }

    /// Resolve a list of names into a set.
    pub fn set_of<S: AsRef<str>>(&self, names: &[S]) -> Result<GrammemeSet, TagError> {
        let mut set = GrammemeSet::new();
        for name in names {
            let name = name.as_ref();
            let id = self
                .get(name)
                .ok_or_else(|| TagError::UnknownGrammeme(name.to_string()))?;
            set.insert(id);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.grammemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammemes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrammemeId, &Grammeme)> {
        self.grammemes
            .iter()
            .enumerate()
            .map(|(i, g)| (GrammemeId(i as u16), g))
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Grammatical categories addressable on a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PartOfSpeech,
    Animacy,
    Aspect,
    Case,
    Gender,
    Involvement,
    Mood,
    Number,
    Person,
    Tense,
    Transitivity,
    Voice,
}

impl Category {
    pub const COUNT: usize = 12;

    pub const ALL: [Category; Category::COUNT] = [
        Category::PartOfSpeech,
        Category::Animacy,
        Category::Aspect,
        Category::Case,
        Category::Gender,
        Category::Involvement,
        Category::Mood,
        Category::Number,
        Category::Person,
        Category::Tense,
        Category::Transitivity,
        Category::Voice,
    ];

    /// Name of the category's root grammeme.
    pub fn root_name(self) -> &'static str {
        match self {
            Category::PartOfSpeech => POS_ROOT,
            Category::Animacy => "ANim",
            Category::Aspect => "ASpc",
            Category::Case => "CAse",
            Category::Gender => "GNdr",
            Category::Involvement => "INvl",
            Category::Mood => "MOod",
            Category::Number => "NMbr",
            Category::Person => "PErs",
            Category::Tense => "TEns",
            Category::Transitivity => "TRns",
            Category::Voice => "VOic",
        }
    }
}
