use std::fmt::Write;
use word_scramble::*;

pub const HELP: &str = "\
Commands:
  /packs         list the loaded word packs
  /pack <name>   choose a word pack
  /start         start a game
  /skip          skip the current word
  /end           end the game
  /help          show this message
  /quit          leave
Anything else is a guess at the current word.";

pub const NO_EFFECT: &str = "(nothing happened)";

/// Formats `count` followed by `noun`, adding `s` (or `es` after a trailing `s`) unless the count
/// is one.
pub fn pluralize(noun: &str, count: u32) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else if noun.ends_with('s') {
        format!("{} {}es", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn render(session: &GameSession) -> String {
    match session {
        GameSession::PreGame(state) => render_pre_game(state),
        GameSession::InGame(state) => render_in_game(state),
        GameSession::PostGame(state) => render_post_game(state),
    }
}

fn render_pre_game(state: &PreGame) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} loaded.",
        pluralize("word pack", state.registry().len() as u32)
    );
    match state.banned() {
        Some(banned) => {
            let _ = writeln!(out, "{}.", pluralize("banned word", banned.len() as u32));
        }
        None => out.push_str("Still loading banned words...\n"),
    }
    match state.selected() {
        Some(selected) => {
            let _ = write!(out, "Pack: {}", selected);
        }
        None => out.push_str("Choose a pack with /pack <name>."),
    }
    if state.can_start() {
        out.push_str("\nType /start to play.");
    }
    out
}

fn render_in_game(state: &InGame) -> String {
    let mut out = format!(
        "[{}] {}, {}\nUnscramble: {}",
        state.selected(),
        pluralize("guess", state.history().guesses()),
        pluralize("skip", state.history().skips()),
        state.word().scrambled
    );
    if !state.guess().is_empty() {
        let _ = write!(out, "\nYour guess: {}", state.guess());
    }
    out
}

fn render_post_game(state: &PostGame) -> String {
    format!(
        "Game over! The last word was {}.\n{}\nType /start to play {} again.",
        state.last_word(),
        render_summary(state.history()),
        state.selected()
    )
}

pub fn render_packs(registry: &WordPackRegistry) -> String {
    if registry.is_empty() {
        return "No word packs loaded yet.".to_string();
    }
    registry
        .iter()
        .map(|(name, pack)| format!("  {} ({})", name, pluralize("word", pack.len() as u32)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_summary(history: &History) -> String {
    let mut out = format!(
        "You guessed {} and skipped {}.",
        pluralize("word", history.guesses()),
        pluralize("word", history.skips())
    );
    for entry in history.entries() {
        let mark = match entry.outcome {
            Outcome::Guessed => '+',
            Outcome::Skipped => '-',
        };
        let _ = write!(out, "\n  {} {} ({})", mark, entry.original, entry.scrambled);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("word", 0), "0 words");
        assert_eq!(pluralize("word", 1), "1 word");
        assert_eq!(pluralize("word", 2), "2 words");
        assert_eq!(pluralize("bus", 3), "3 buses");
        assert_eq!(pluralize("bus", 1), "1 bus");
        assert_eq!(pluralize("guess", 1), "1 guess");
        assert_eq!(pluralize("guess", 2), "2 guesses");
    }

    #[test]
    fn render_pre_game_prompts_for_pack() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = GameSession::new().apply(GameEvent::pack_loaded("Animals", ["cat"]), &mut rng);

        let text = render(&session);

        assert!(text.contains("1 word pack loaded."));
        assert!(text.contains("Still loading banned words"));
        assert!(text.contains("/pack <name>"));
        assert!(!text.contains("/start"));
    }

    #[test]
    fn render_in_game_shows_scrambled_word_and_guess() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = GameSession::new()
            .apply(GameEvent::pack_loaded("Animals", ["cat"]), &mut rng)
            .apply(GameEvent::bans_loaded(Vec::<String>::new()), &mut rng)
            .apply(GameEvent::pack_selected("Animals"), &mut rng)
            .apply(GameEvent::StartGame, &mut rng)
            .apply(GameEvent::guess_updated("ta"), &mut rng);
        let GameSession::InGame(state) = &session else {
            panic!("expected in-game");
        };

        let text = render(&session);

        assert!(text.starts_with("[Animals] 0 guesses, 0 skips"));
        assert!(text.contains(&format!("Unscramble: {}", state.word().scrambled)));
        assert!(text.ends_with("Your guess: ta"));
    }

    #[test]
    fn render_in_game_counts_guesses_and_skips() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = GameSession::new()
            .apply(GameEvent::pack_loaded("Birds", ["owl", "emu", "jay"]), &mut rng)
            .apply(GameEvent::bans_loaded(Vec::<String>::new()), &mut rng)
            .apply(GameEvent::pack_selected("Birds"), &mut rng)
            .apply(GameEvent::StartGame, &mut rng)
            .apply(GameEvent::SkipWord, &mut rng);
        let GameSession::InGame(state) = &session else {
            panic!("expected in-game");
        };
        let answer = state.word().original.to_string();
        let session = session.apply(GameEvent::guess_updated(answer), &mut rng);

        assert!(render(&session).starts_with("[Birds] 1 guess, 1 skip\n"));
    }

    #[test]
    fn render_packs_lists_sizes() {
        let mut registry = WordPackRegistry::new();
        assert_eq!(render_packs(&registry), "No word packs loaded yet.");

        registry.insert("Birds", WordPack::from_iterator(["owl"]));
        registry.insert("Animals", WordPack::from_iterator(["cat", "dog"]));

        assert_eq!(
            render_packs(&registry),
            "  Animals (2 words)\n  Birds (1 word)"
        );
    }

    #[test]
    fn render_summary_lists_history() {
        let mut history = History::new();
        history.record("CAT".into(), "TCA".into(), Outcome::Guessed);
        history.record("DOG".into(), "GOD".into(), Outcome::Skipped);

        assert_eq!(
            render_summary(&history),
            "You guessed 1 word and skipped 1 word.\n  + CAT (TCA)\n  - DOG (GOD)"
        );
    }
}
