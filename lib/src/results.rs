use std::io;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indicates that an error occurred while loading a word list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The underlying reader failed.
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
    /// The list held no usable entries once blank lines were dropped.
    #[error("word list contains no usable entries")]
    Empty,
}

/// Indicates that a deck's words and cursor don't describe a valid deck.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("deck has no words")]
    Empty,
    #[error("deck cursor {cursor} is out of range for {len} words")]
    CursorOutOfRange { cursor: usize, len: usize },
    #[error("deck word {0:?} is not normalized")]
    NotNormalized(Arc<str>),
    #[error("deck word {0:?} appears more than once")]
    Duplicate(Arc<str>),
}

/// How the player finished with a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Guessed,
    Skipped,
}

/// One finished word: what it was, how it was shown, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryEntry {
    pub original: Arc<str>,
    pub scrambled: Arc<str>,
    pub outcome: Outcome,
}

/// The append-only record of a single game.
///
/// Serialized as its list of entries; the counters are rebuilt when it is read back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")
)]
pub struct History {
    entries: Vec<HistoryEntry>,
    guesses: u32,
    skips: u32,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> History {
        History::default()
    }

    /// Appends an entry and bumps the matching counter.
    pub fn record(&mut self, original: Arc<str>, scrambled: Arc<str>, outcome: Outcome) {
        match outcome {
            Outcome::Guessed => self.guesses += 1,
            Outcome::Skipped => self.skips += 1,
        }
        self.entries.push(HistoryEntry {
            original,
            scrambled,
            outcome,
        });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The number of words guessed correctly.
    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    /// The number of words skipped.
    pub fn skips(&self) -> u32 {
        self.skips
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = History::new();
        for entry in entries {
            history.record(entry.original, entry.scrambled, entry.outcome);
        }
        history
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Self {
        history.entries
    }
}
