use crate::normalize::normalize;
use crate::packs::WordPack;
use crate::results::DeckError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A randomized presentation order over a word pack, plus a cursor at the current word.
///
/// Within one lap every word of the pack is drawn exactly once. When a lap ends, a new order is
/// drawn whose first word differs from the last word of the old one, so the same word is never
/// shown twice in a row.
///
/// A deserialized deck is checked with [`Deck::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "DeckParts")
)]
pub struct Deck {
    order: Vec<Arc<str>>,
    cursor: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DeckParts {
    order: Vec<Arc<str>>,
    cursor: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<DeckParts> for Deck {
    type Error = DeckError;

    fn try_from(parts: DeckParts) -> Result<Self, Self::Error> {
        Deck::from_parts(parts.order, parts.cursor)
    }
}

impl Deck {
    /// Shuffles the pack into a new deck with the cursor on the first word.
    ///
    /// If `avoid_first` is given, whole permutations are rejected until the first word differs
    /// from it. A single-word pack cannot avoid a repeat, so there it is ignored.
    ///
    /// Returns `None` if the pack is empty.
    pub fn new<R: Rng + ?Sized>(
        pack: &WordPack,
        avoid_first: Option<&str>,
        rng: &mut R,
    ) -> Option<Deck> {
        if pack.is_empty() {
            return None;
        }
        let mut order: Vec<Arc<str>> = pack.iter().map(Arc::clone).collect();
        shuffle_avoiding_first(&mut order, avoid_first, rng);
        Some(Deck { order, cursor: 0 })
    }

    /// Rebuilds a deck from a lap order and a cursor into it.
    ///
    /// The order must hold at least one word, every word must be normalized and distinct, and
    /// the cursor must point inside it.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use word_scramble::{Deck, DeckError};
    ///
    /// let order: Vec<Arc<str>> = vec![Arc::from("CAT"), Arc::from("DOG")];
    /// assert!(Deck::from_parts(order.clone(), 1).is_ok());
    /// assert_eq!(
    ///     Deck::from_parts(order, 7),
    ///     Err(DeckError::CursorOutOfRange { cursor: 7, len: 2 })
    /// );
    /// ```
    pub fn from_parts(order: Vec<Arc<str>>, cursor: usize) -> Result<Deck, DeckError> {
        if order.is_empty() {
            return Err(DeckError::Empty);
        }
        if cursor >= order.len() {
            return Err(DeckError::CursorOutOfRange {
                cursor,
                len: order.len(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::with_capacity(order.len());
        for word in &order {
            if normalize(word) != word.as_ref() {
                return Err(DeckError::NotNormalized(Arc::clone(word)));
            }
            if !seen.insert(word.as_ref()) {
                return Err(DeckError::Duplicate(Arc::clone(word)));
            }
        }
        Ok(Deck { order, cursor })
    }

    /// The word under the cursor.
    pub fn current(&self) -> &Arc<str> {
        &self.order[self.cursor]
    }

    /// Advances to the next word and returns it.
    ///
    /// When the cursor wraps past the end of the lap, a new order is shuffled with the outgoing
    /// last word barred from the first slot.
    pub fn next_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Arc<str> {
        self.cursor = (self.cursor + 1) % self.order.len();
        if self.cursor == 0 {
            let last = Arc::clone(&self.order[self.order.len() - 1]);
            shuffle_avoiding_first(&mut self.order, Some(last.as_ref()), rng);
            log::debug!("Deck lap complete; reshuffled {} words", self.order.len());
        }
        Arc::clone(self.current())
    }

    /// The current lap's order.
    pub fn order(&self) -> &[Arc<str>] {
        &self.order
    }

    /// The index of the current word within [`Deck::order`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The number of words in one lap.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Fisher-Yates shuffles `order`, reshuffling the whole slice until `avoid_first` is not in the
/// first slot.
fn shuffle_avoiding_first<R: Rng + ?Sized>(
    order: &mut [Arc<str>],
    avoid_first: Option<&str>,
    rng: &mut R,
) {
    order.shuffle(rng);
    let Some(avoid) = avoid_first else {
        return;
    };
    // Words in a pack are distinct, so any second word ends the loop.
    if order.len() < 2 {
        return;
    }
    while order[0].as_ref() == avoid {
        order.shuffle(rng);
    }
}
