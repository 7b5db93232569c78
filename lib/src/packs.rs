use crate::normalize::normalize;
use crate::profanity::BannedWords;
use crate::results::LoadError;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered list of distinct, normalized candidate words.
///
/// Serialized as a plain list of words. Reading one back goes through
/// [`WordPack::from_iterator`], so the words are normalized and de-duplicated again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<String>", into = "Vec<Arc<str>>")
)]
pub struct WordPack {
    words: Arc<[Arc<str>]>,
}

impl WordPack {
    /// Constructs a new `WordPack` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is normalized, blank lines are
    /// dropped, and only the first copy of a repeated word is kept.
    ///
    /// Returns [`LoadError::Empty`] if no usable words remain.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, LoadError> {
        let lines = word_reader.lines().collect::<Result<Vec<String>, _>>()?;
        let pack = WordPack::from_iterator(lines);
        if pack.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(pack)
    }

    /// Constructs a new `WordPack` from the given words, normalizing and de-duplicating them in
    /// order.
    ///
    /// ```
    /// use word_scramble::WordPack;
    ///
    /// let pack = WordPack::from_iterator(["cat", "", "Dog ", "CAT"]);
    /// assert_eq!(pack.len(), 2);
    /// assert_eq!(pack[0].as_ref(), "CAT");
    /// assert_eq!(pack[1].as_ref(), "DOG");
    /// ```
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let words: Vec<Arc<str>> = words
            .into_iter()
            .filter_map(|word| {
                let word = normalize(word.as_ref());
                if word.is_empty() || !seen.insert(word.clone()) {
                    return None;
                }
                Some(Arc::from(word))
            })
            .collect();
        WordPack {
            words: Arc::from(words),
        }
    }

    /// Returns a copy of this pack without the words that are themselves flagged by `banned`.
    ///
    /// Pack order is preserved.
    pub fn without_flagged(&self, banned: &BannedWords) -> WordPack {
        let words: Vec<Arc<str>> = self
            .words
            .par_iter()
            .filter(|word| !banned.is_flagged(word))
            .map(Arc::clone)
            .collect();
        if words.len() < self.words.len() {
            log::debug!(
                "Dropped {} flagged words from a pack of {}",
                self.words.len() - words.len(),
                self.words.len()
            );
        }
        WordPack {
            words: Arc::from(words),
        }
    }

    /// Returns `true` iff the normalized word is in this pack.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|candidate| candidate.as_ref() == word)
    }
}

impl From<Vec<String>> for WordPack {
    fn from(words: Vec<String>) -> Self {
        WordPack::from_iterator(words)
    }
}

impl From<WordPack> for Vec<Arc<str>> {
    fn from(pack: WordPack) -> Self {
        pack.words.to_vec()
    }
}

impl Deref for WordPack {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

/// The named word packs known so far. Packs arrive one at a time, in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordPackRegistry {
    packs: BTreeMap<Arc<str>, WordPack>,
}

impl WordPackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        WordPackRegistry::default()
    }

    /// Adds a pack under `name`, replacing and returning any pack already stored there.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, pack: WordPack) -> Option<WordPack> {
        self.packs.insert(name.into(), pack)
    }

    pub fn get(&self, name: &str) -> Option<&WordPack> {
        self.packs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packs.contains_key(name)
    }

    /// Returns the stored name matching `name`, so callers can share it instead of copying.
    pub fn name(&self, name: &str) -> Option<&Arc<str>> {
        self.packs.get_key_value(name).map(|(key, _)| key)
    }

    /// Iterates over the pack names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &Arc<str>> + '_ {
        self.packs.keys()
    }

    /// Iterates over `(name, pack)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &WordPack)> + '_ {
        self.packs.iter()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
