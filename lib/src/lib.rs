#![cfg_attr(feature = "unstable", feature(test))]

//! A word scramble game engine.
//!
//! A word is drawn from a word pack, its letters are shuffled, and the player types guesses until
//! they reconstruct it or skip it. This crate holds the game itself:
//!
//! * [`GameSession`], a state machine driven one [`GameEvent`] at a time.
//! * [`scramble`], which shuffles a word while keeping spaces and hyphens in place, and retries
//!   any shuffle that spells out a banned term.
//! * [`BannedWords`], a substring-scanning profanity filter.
//! * [`Deck`], which presents every word of a [`WordPack`] once per lap without repeating a word
//!   across laps.
//!
//! Loading packs and ban lists, and rendering the session, are left to the caller. Loaders report
//! their results as events, so they may run concurrently and finish in any order:
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use word_scramble::{GameEvent, GameSession};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = GameSession::new();
//! for event in [
//!     GameEvent::bans_loaded(["darn"]),
//!     GameEvent::pack_loaded("Birds", ["robin", "blue jay"]),
//!     GameEvent::pack_selected("Birds"),
//!     GameEvent::StartGame,
//! ] {
//!     session = session.apply(event, &mut rng);
//! }
//!
//! if let GameSession::InGame(game) = &session {
//!     let answer = game.word().original.to_lowercase();
//!     session = session.apply(GameEvent::guess_updated(answer), &mut rng);
//! }
//! assert_eq!(session.history().map(|history| history.guesses()), Some(1));
//! ```

mod deck;
mod normalize;
mod packs;
mod profanity;
mod results;
mod session;
mod shuffle;

pub use deck::Deck;
pub use normalize::normalize;
pub use packs::{WordPack, WordPackRegistry};
pub use profanity::{is_flagged, BannedWords};
pub use results::*;
pub use session::*;
pub use shuffle::{scramble, MAX_SHUFFLE_ATTEMPTS};

/// Lower-level building blocks of the shuffler.
pub mod details {
    pub use crate::shuffle::is_anchor;
    pub use crate::shuffle::shuffle_letters;
    pub use crate::shuffle::split_keeping_anchors;
}
