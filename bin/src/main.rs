mod config;
mod display;
mod input;
mod loader;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use input::Command;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::mpsc;
use word_scramble::*;

/// Unscramble words from a word pack. Type a guess and press enter; the word changes as soon as
/// you get it right.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory to load word packs from. Every `*.txt` file in it is one pack, with one word
    /// per line.
    #[arg(short = 'd', long)]
    packs_dir: Option<PathBuf>,

    /// File of banned words: one per line, or a JSON array of strings if it ends in `.json`.
    #[arg(short, long, conflicts_with = "no_bans")]
    bans: Option<PathBuf>,

    /// Play without a banned-word list.
    #[arg(long)]
    no_bans: bool,

    /// Select this pack as soon as it loads.
    #[arg(short, long)]
    pack: Option<String>,

    /// Print every state snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Seed the random number generator, for repeatable games.
    #[arg(long)]
    seed: Option<u64>,

    /// Read settings from this config file instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Everything the game loop reacts to, from any thread.
pub enum Message {
    /// A loader finished.
    Loaded(GameEvent),
    /// The player entered a line.
    Line(String),
    /// Standard input was closed.
    Eof,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut app_config, config_error) = match AppConfig::load(args.config.as_deref()) {
        Ok(app_config) => (app_config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(app_config.log_level.as_str()),
    )
    .init();
    if let Some(err) = config_error {
        log::warn!("Failed to load config, using defaults: {:#}", err);
    }
    apply_overrides(&mut app_config, &args);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    run(&app_config, args.json, &mut rng)
}

fn apply_overrides(app_config: &mut AppConfig, args: &Args) {
    if let Some(packs_dir) = &args.packs_dir {
        app_config.packs_dir = packs_dir.clone();
    }
    if let Some(bans) = &args.bans {
        app_config.bans = Some(bans.clone());
    }
    if args.no_bans {
        app_config.bans = None;
    }
    if let Some(pack) = &args.pack {
        app_config.default_pack = Some(pack.clone());
    }
}

fn run(app_config: &AppConfig, json: bool, rng: &mut StdRng) -> Result<()> {
    let (sender, receiver) = mpsc::channel();
    let num_packs = loader::spawn_loaders(app_config, &sender)?;
    input::spawn_stdin_reader(sender);
    println!(
        "Loading {} from {}...",
        display::pluralize("word pack", num_packs as u32),
        app_config.packs_dir.display()
    );
    println!("{}", display::HELP);

    let mut session = GameSession::new();
    for message in receiver {
        let event = match message {
            Message::Loaded(event) => event,
            Message::Eof => break,
            Message::Line(line) => match input::parse_command(&line) {
                Command::Event(event) => resolve_pack_name(event, session.registry()),
                Command::ListPacks => {
                    println!("{}", display::render_packs(session.registry()));
                    continue;
                }
                Command::Help => {
                    println!("{}", display::HELP);
                    continue;
                }
                Command::Quit => break,
            },
        };
        let from_player = !matches!(event, GameEvent::PackLoaded { .. } | GameEvent::BansLoaded { .. });

        let mut accepted = apply_event(&mut session, event, rng);
        if let Some(default_pack) = &app_config.default_pack {
            if matches!(&session, GameSession::PreGame(state) if state.selected().is_none()) {
                accepted |= apply_event(
                    &mut session,
                    GameEvent::pack_selected(default_pack.as_str()),
                    rng,
                );
            }
        }

        if !accepted {
            if from_player {
                println!("{}", display::NO_EFFECT);
            }
            continue;
        }
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&session).context("failed to serialize the session")?
            );
        } else {
            println!("{}", display::render(&session));
        }
    }

    if let Some(history) = session.history() {
        println!("{}", display::render_summary(history));
    }
    Ok(())
}

/// Applies `event` in place. Returns `false` if the session rejected it.
fn apply_event(session: &mut GameSession, event: GameEvent, rng: &mut StdRng) -> bool {
    match std::mem::take(session).try_apply(event, rng) {
        Ok(next) => {
            *session = next;
            true
        }
        Err(unchanged) => {
            *session = unchanged;
            false
        }
    }
}

/// Matches a typed pack name to a loaded one, ignoring case.
fn resolve_pack_name(event: GameEvent, registry: &WordPackRegistry) -> GameEvent {
    match event {
        GameEvent::PackSelected { name } => {
            let resolved = registry
                .names()
                .find(|loaded| loaded.eq_ignore_ascii_case(name.trim()))
                .map(|loaded| loaded.to_string())
                .unwrap_or(name);
            GameEvent::PackSelected { name: resolved }
        }
        other => other,
    }
}
