//! Symbol and keyword tables.
//!
//! Both tables store labels upper-cased, since that is how they appear in
//! token symbolic names.

use rustc_hash::FxHashMap;

/// Ordered literal -> label pairs.
///
/// A literal listed twice keeps its first label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<(String, String)>,
    lookup: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: AsRef<str>,
    {
        let mut table = Self::new();
        for (literal, label) in pairs {
            table.insert(literal, label.as_ref());
        }
        table
    }

    /// Add an entry unless `literal` is already present.
    pub fn insert(&mut self, literal: impl Into<String>, label: &str) {
        let literal = literal.into();
        if self.lookup.contains_key(&literal) {
            return;
        }
        self.lookup.insert(literal.clone(), self.entries.len());
        self.entries.push((literal, label.to_uppercase()));
    }

    /// Upper-cased label of `literal`.
    pub fn label(&self, literal: &str) -> Option<&str> {
        let &index = self.lookup.get(literal)?;
        Some(self.entries[index].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, l)| (s.as_str(), l.as_str()))
    }
}

/// Case-sensitive keyword set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordTable {
    words: FxHashMap<String, String>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let mut table = Self::new();
        for word in words {
            table.insert(word);
        }
        table
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();
        let label = word.to_uppercase();
        self.words.insert(word, label);
    }

    /// Upper-cased label of `word`, if it is a keyword.
    pub fn label(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
