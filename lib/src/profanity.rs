use crate::normalize::normalize;
use crate::results::LoadError;
use std::collections::HashSet;
use std::io::BufRead;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of banned terms. Any scrambled word containing one of these as a contiguous
/// substring is rejected.
///
/// Serialized as a sorted list of terms; reading one back rebuilds the set with
/// [`BannedWords::from_iterator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<String>", into = "Vec<Arc<str>>")
)]
pub struct BannedWords {
    words: HashSet<Arc<str>>,
    /// Length, in chars, of the longest banned term.
    max_word_len: usize,
}

impl BannedWords {
    /// Constructs an empty set, which flags nothing.
    pub fn new() -> Self {
        BannedWords::default()
    }

    /// Constructs a new `BannedWords` set by reading terms from the given reader, one per line.
    ///
    /// Each term is normalized, and blank lines are dropped. Unlike word packs, an empty ban
    /// list is valid.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, LoadError> {
        let lines = word_reader.lines().collect::<Result<Vec<String>, _>>()?;
        Ok(BannedWords::from_iterator(lines))
    }

    /// Constructs a new `BannedWords` set from the given terms, normalizing each one.
    ///
    /// ```
    /// use word_scramble::BannedWords;
    ///
    /// let banned = BannedWords::from_iterator(["  darn", "HECK", ""]);
    /// assert_eq!(banned.len(), 2);
    /// assert!(banned.contains("DARN"));
    /// ```
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        let mut max_word_len = 0;
        let words: HashSet<Arc<str>> = words
            .into_iter()
            .filter_map(|word| {
                let word = normalize(word.as_ref());
                if word.is_empty() {
                    return None;
                }
                max_word_len = max_word_len.max(word.chars().count());
                Some(Arc::from(word))
            })
            .collect();
        BannedWords {
            words,
            max_word_len,
        }
    }

    /// Returns `true` iff the given normalized term is banned.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns `true` iff some contiguous substring of `candidate` is a banned term.
    ///
    /// The candidate is normalized first, and every substring is compared in normalized form,
    /// so `"cats"` is flagged by a ban on `"AT"`. False positives are expected: a flagged
    /// scramble only costs a re-shuffle.
    ///
    /// ```
    /// use word_scramble::BannedWords;
    ///
    /// let banned = BannedWords::from_iterator(["at"]);
    /// assert!(banned.is_flagged("CATS"));
    /// assert!(!banned.is_flagged("DOG"));
    /// ```
    pub fn is_flagged(&self, candidate: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let candidate = normalize(candidate);
        let boundaries: Vec<usize> = candidate
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(candidate.len()))
            .collect();
        for (start_index, &start) in boundaries.iter().enumerate() {
            // Substrings longer than the longest banned term can never match.
            let last_index = (start_index + self.max_word_len).min(boundaries.len() - 1);
            for &end in &boundaries[start_index + 1..=last_index] {
                let substring = candidate[start..end].trim();
                if !substring.is_empty() && self.words.contains(substring) {
                    return true;
                }
            }
        }
        false
    }

    /// Returns the number of banned terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the length, in chars, of the longest banned term.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }
}

impl From<Vec<String>> for BannedWords {
    fn from(words: Vec<String>) -> Self {
        BannedWords::from_iterator(words)
    }
}

impl From<BannedWords> for Vec<Arc<str>> {
    fn from(banned: BannedWords) -> Self {
        let mut words: Vec<Arc<str>> = banned.words.into_iter().collect();
        words.sort_unstable();
        words
    }
}

/// Returns `true` iff some contiguous substring of `candidate` is in `banned`.
///
/// Shorthand for [`BannedWords::is_flagged`].
pub fn is_flagged(candidate: &str, banned: &BannedWords) -> bool {
    banned.is_flagged(candidate)
}
