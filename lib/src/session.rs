use crate::deck::Deck;
use crate::normalize::normalize;
use crate::packs::{WordPack, WordPackRegistry};
use crate::profanity::BannedWords;
use crate::results::{History, Outcome};
use crate::shuffle::scramble;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something that happened outside the game: a loader finished, or the player did something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A word pack finished loading. Replaces any pack already loaded under the same name.
    PackLoaded { name: String, pack: WordPack },
    /// The banned-word list finished loading.
    BansLoaded { banned: BannedWords },
    /// The player picked a word pack.
    PackSelected { name: String },
    /// The player started a new game.
    StartGame,
    /// The player's guess text changed.
    GuessUpdated { text: String },
    /// The player gave up on the current word.
    SkipWord,
    /// The player finished the game.
    EndGame,
}

impl GameEvent {
    /// Builds a [`GameEvent::PackLoaded`], normalizing and de-duplicating the words.
    pub fn pack_loaded<S>(name: impl Into<String>, words: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        GameEvent::PackLoaded {
            name: name.into(),
            pack: WordPack::from_iterator(words),
        }
    }

    /// Builds a [`GameEvent::BansLoaded`], normalizing each term.
    pub fn bans_loaded<S>(words: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        GameEvent::BansLoaded {
            banned: BannedWords::from_iterator(words),
        }
    }

    pub fn pack_selected(name: impl Into<String>) -> Self {
        GameEvent::PackSelected { name: name.into() }
    }

    pub fn guess_updated(text: impl Into<String>) -> Self {
        GameEvent::GuessUpdated { text: text.into() }
    }

    fn kind(&self) -> &'static str {
        match self {
            GameEvent::PackLoaded { .. } => "pack-loaded",
            GameEvent::BansLoaded { .. } => "bans-loaded",
            GameEvent::PackSelected { .. } => "pack-selected",
            GameEvent::StartGame => "start-game",
            GameEvent::GuessUpdated { .. } => "guess-updated",
            GameEvent::SkipWord => "skip-word",
            GameEvent::EndGame => "end-game",
        }
    }
}

/// The phase tag of a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    PreGame,
    InGame,
    PostGame,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::PreGame => "pre-game",
            Phase::InGame => "in-game",
            Phase::PostGame => "post-game",
        })
    }
}

/// The word currently being guessed, in both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentWord {
    pub original: Arc<str>,
    pub scrambled: Arc<str>,
}

impl CurrentWord {
    fn draw<R: Rng + ?Sized>(original: Arc<str>, banned: &BannedWords, rng: &mut R) -> Self {
        let scrambled = Arc::from(scramble(&original, banned, rng));
        CurrentWord {
            original,
            scrambled,
        }
    }
}

/// Waiting for packs and bans to load, and for the player to choose a pack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreGame {
    registry: WordPackRegistry,
    selected: Option<Arc<str>>,
    banned: Option<BannedWords>,
}

impl PreGame {
    pub fn registry(&self) -> &WordPackRegistry {
        &self.registry
    }

    /// The chosen pack name, if any.
    pub fn selected(&self) -> Option<&Arc<str>> {
        self.selected.as_ref()
    }

    /// The banned words, once loaded.
    pub fn banned(&self) -> Option<&BannedWords> {
        self.banned.as_ref()
    }

    /// Returns `true` iff a [`GameEvent::StartGame`] would be accepted now: a pack is selected,
    /// the bans are loaded, and at least one word of the pack is clean.
    pub fn can_start(&self) -> bool {
        match (&self.selected, &self.banned) {
            (Some(selected), Some(banned)) => self
                .registry
                .get(selected)
                .is_some_and(|pack| pack.iter().any(|word| !banned.is_flagged(word))),
            _ => false,
        }
    }
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InGame {
    word: CurrentWord,
    guess: String,
    deck: Deck,
    pack: WordPack,
    banned: BannedWords,
    registry: WordPackRegistry,
    selected: Arc<str>,
    history: History,
}

impl InGame {
    /// The word to guess.
    pub fn word(&self) -> &CurrentWord {
        &self.word
    }

    /// The guess text exactly as the player typed it.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The active pack, without any flagged words.
    pub fn pack(&self) -> &WordPack {
        &self.pack
    }

    pub fn banned(&self) -> &BannedWords {
        &self.banned
    }

    pub fn registry(&self) -> &WordPackRegistry {
        &self.registry
    }

    pub fn selected(&self) -> &Arc<str> {
        &self.selected
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Records the current word with the given outcome and moves on to the next one.
    fn advance<R: Rng + ?Sized>(&mut self, outcome: Outcome, rng: &mut R) {
        let next = self.deck.next_word(rng);
        let finished = std::mem::replace(
            &mut self.word,
            CurrentWord::draw(next, &self.banned, rng),
        );
        self.history
            .record(finished.original, finished.scrambled, outcome);
        self.guess.clear();
    }
}

/// A finished game, showing the last word and the full history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PostGame {
    last_word: Arc<str>,
    banned: BannedWords,
    pack: WordPack,
    registry: WordPackRegistry,
    selected: Arc<str>,
    history: History,
}

impl PostGame {
    /// The word that was on screen when the game ended, unscrambled.
    pub fn last_word(&self) -> &Arc<str> {
        &self.last_word
    }

    pub fn banned(&self) -> &BannedWords {
        &self.banned
    }

    pub fn pack(&self) -> &WordPack {
        &self.pack
    }

    pub fn registry(&self) -> &WordPackRegistry {
        &self.registry
    }

    pub fn selected(&self) -> &Arc<str> {
        &self.selected
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

/// The whole state of one player's session.
///
/// A session only changes through [`GameSession::apply`], which consumes it along with one event
/// and returns the next session. Events that don't fit the current phase are ignored and the
/// session comes back unchanged, so loaders and player input can arrive in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GameSession {
    PreGame(PreGame),
    InGame(InGame),
    PostGame(PostGame),
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

/// Everything needed to begin a round: the cleaned pack, a fresh deck, and its first word.
struct Deal {
    pack: WordPack,
    deck: Deck,
    word: CurrentWord,
}

impl Deal {
    /// Returns `None` if no word of the pack survives the profanity filter.
    fn new<R: Rng + ?Sized>(pack: &WordPack, banned: &BannedWords, rng: &mut R) -> Option<Deal> {
        let pack = pack.without_flagged(banned);
        let deck = Deck::new(&pack, None, rng)?;
        let word = CurrentWord::draw(Arc::clone(deck.current()), banned, rng);
        Some(Deal { pack, deck, word })
    }

    fn into_game(
        self,
        banned: BannedWords,
        registry: WordPackRegistry,
        selected: Arc<str>,
    ) -> InGame {
        log::info!(
            "Starting a game with pack {:?} ({} words)",
            selected,
            self.pack.len()
        );
        InGame {
            word: self.word,
            guess: String::new(),
            deck: self.deck,
            pack: self.pack,
            banned,
            registry,
            selected,
            history: History::new(),
        }
    }
}

impl GameSession {
    /// Creates a session in the pre-game phase with nothing loaded.
    pub fn new() -> Self {
        GameSession::PreGame(PreGame::default())
    }

    pub fn phase(&self) -> Phase {
        match self {
            GameSession::PreGame(_) => Phase::PreGame,
            GameSession::InGame(_) => Phase::InGame,
            GameSession::PostGame(_) => Phase::PostGame,
        }
    }

    pub fn registry(&self) -> &WordPackRegistry {
        match self {
            GameSession::PreGame(state) => &state.registry,
            GameSession::InGame(state) => &state.registry,
            GameSession::PostGame(state) => &state.registry,
        }
    }

    /// The history of the running or finished game. There is none before the first game.
    pub fn history(&self) -> Option<&History> {
        match self {
            GameSession::PreGame(_) => None,
            GameSession::InGame(state) => Some(&state.history),
            GameSession::PostGame(state) => Some(&state.history),
        }
    }

    /// Applies one event and returns the resulting session.
    ///
    /// `rng` drives every random choice (deck order and letter shuffles). Events whose guard
    /// fails leave the session exactly as it was.
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use word_scramble::{GameEvent, GameSession, Phase};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let session = [
    ///     GameEvent::pack_loaded("Animals", ["cat", "dog"]),
    ///     GameEvent::bans_loaded(Vec::<String>::new()),
    ///     GameEvent::pack_selected("Animals"),
    ///     GameEvent::StartGame,
    /// ]
    /// .into_iter()
    /// .fold(GameSession::new(), |session, event| session.apply(event, &mut rng));
    ///
    /// assert_eq!(session.phase(), Phase::InGame);
    /// ```
    pub fn apply<R: Rng + ?Sized>(self, event: GameEvent, rng: &mut R) -> GameSession {
        match self.try_apply(event, rng) {
            Ok(session) | Err(session) => session,
        }
    }

    /// Like [`GameSession::apply`], but tells accepted events from rejected ones.
    ///
    /// Returns `Ok` with the next session if the event was accepted, or `Err` with the unchanged
    /// session if its guard failed.
    pub fn try_apply<R: Rng + ?Sized>(
        self,
        event: GameEvent,
        rng: &mut R,
    ) -> Result<GameSession, GameSession> {
        let next = match (self, event) {
            (GameSession::PreGame(mut state), GameEvent::PackLoaded { name, pack }) => {
                log::debug!("Loaded pack {:?} with {} words", name, pack.len());
                state.registry.insert(name, pack);
                GameSession::PreGame(state)
            }
            (GameSession::PreGame(mut state), GameEvent::BansLoaded { banned })
                if state.banned.is_none() =>
            {
                log::debug!("Loaded {} banned words", banned.len());
                state.banned = Some(banned);
                GameSession::PreGame(state)
            }
            (GameSession::PreGame(mut state), GameEvent::PackSelected { name }) => {
                match state.registry.name(&name).cloned() {
                    Some(selected) => {
                        state.selected = Some(selected);
                        GameSession::PreGame(state)
                    }
                    None => return GameSession::PreGame(state).reject("pack-selected"),
                }
            }
            (GameSession::PreGame(state), GameEvent::StartGame) => {
                let deal = match (&state.selected, &state.banned) {
                    (Some(selected), Some(banned)) => state
                        .registry
                        .get(selected)
                        .and_then(|pack| Deal::new(pack, banned, rng)),
                    _ => None,
                };
                match (deal, state.selected, state.banned) {
                    (Some(deal), Some(selected), Some(banned)) => {
                        GameSession::InGame(deal.into_game(banned, state.registry, selected))
                    }
                    (_, selected, banned) => {
                        return GameSession::PreGame(PreGame {
                            registry: state.registry,
                            selected,
                            banned,
                        })
                        .reject("start-game")
                    }
                }
            }
            (GameSession::PostGame(state), GameEvent::StartGame) => {
                match Deal::new(&state.pack, &state.banned, rng) {
                    Some(deal) => GameSession::InGame(deal.into_game(
                        state.banned,
                        state.registry,
                        state.selected,
                    )),
                    None => return GameSession::PostGame(state).reject("start-game"),
                }
            }
            (GameSession::InGame(mut state), GameEvent::GuessUpdated { text }) => {
                if normalize(&text) == *state.word.original {
                    state.advance(Outcome::Guessed, rng);
                } else {
                    state.guess = text;
                }
                GameSession::InGame(state)
            }
            (GameSession::InGame(mut state), GameEvent::SkipWord) => {
                state.advance(Outcome::Skipped, rng);
                GameSession::InGame(state)
            }
            (GameSession::InGame(state), GameEvent::EndGame) => {
                log::info!(
                    "Game over: {} guessed, {} skipped",
                    state.history.guesses(),
                    state.history.skips()
                );
                GameSession::PostGame(PostGame {
                    last_word: state.word.original,
                    banned: state.banned,
                    pack: state.pack,
                    registry: state.registry,
                    selected: state.selected,
                    history: state.history,
                })
            }
            (session, event) => return session.reject(event.kind()),
        };
        Ok(next)
    }

    fn reject(self, event: &str) -> Result<GameSession, GameSession> {
        log::debug!("Ignoring {} event during {}", event, self.phase());
        Err(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn loaded_session(rng: &mut StdRng) -> GameSession {
        GameSession::new()
            .apply(GameEvent::pack_loaded("Animals", ["CAT", "DOG"]), rng)
            .apply(GameEvent::bans_loaded(["XYZ"]), rng)
            .apply(GameEvent::pack_selected("Animals"), rng)
    }

    #[test]
    fn can_start_requires_selection_and_bans() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = GameSession::new()
            .apply(GameEvent::pack_loaded("Animals", ["CAT"]), &mut rng)
            .apply(GameEvent::pack_selected("Animals"), &mut rng);
        let GameSession::PreGame(state) = &session else {
            panic!("expected pre-game");
        };
        assert!(!state.can_start());

        let session = session.apply(GameEvent::bans_loaded(["DOG"]), &mut rng);
        let GameSession::PreGame(state) = &session else {
            panic!("expected pre-game");
        };
        assert!(state.can_start());
    }

    #[test]
    fn can_start_false_when_every_word_is_flagged() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = GameSession::new()
            .apply(GameEvent::pack_loaded("Animals", ["CAT"]), &mut rng)
            .apply(GameEvent::bans_loaded(["A"]), &mut rng)
            .apply(GameEvent::pack_selected("Animals"), &mut rng);
        let GameSession::PreGame(state) = &session else {
            panic!("expected pre-game");
        };

        assert!(!state.can_start());
    }

    #[test]
    fn advance_resets_guess_text() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = loaded_session(&mut rng)
            .apply(GameEvent::StartGame, &mut rng)
            .apply(GameEvent::guess_updated("wrong"), &mut rng);
        let GameSession::InGame(state) = &session else {
            panic!("expected in-game");
        };
        assert_eq!(state.guess(), "wrong");

        let session = session.apply(GameEvent::SkipWord, &mut rng);
        let GameSession::InGame(state) = &session else {
            panic!("expected in-game");
        };
        assert_eq!(state.guess(), "");
    }

    #[test]
    fn try_apply_reports_acceptance() {
        let mut rng = StdRng::seed_from_u64(2);
        let session = loaded_session(&mut rng);

        let session = match session.try_apply(GameEvent::SkipWord, &mut rng) {
            Err(unchanged) => unchanged,
            Ok(_) => panic!("skip-word should be rejected before a game"),
        };
        assert_eq!(session.phase(), Phase::PreGame);
        let session = match session.try_apply(GameEvent::pack_selected("Fish"), &mut rng) {
            Err(unchanged) => unchanged,
            Ok(_) => panic!("an unknown pack should be rejected"),
        };

        let session = session.try_apply(GameEvent::StartGame, &mut rng);
        assert!(matches!(session, Ok(GameSession::InGame(_))));
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::PreGame.to_string(), "pre-game");
        assert_eq!(Phase::InGame.to_string(), "in-game");
        assert_eq!(Phase::PostGame.to_string(), "post-game");
    }
}
