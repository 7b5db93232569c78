use crate::config::AppConfig;
use crate::Message;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use word_scramble::{BannedWords, GameEvent, WordPack};

/// Derives a pack's display name from its file name: `animals.txt` becomes `Animals`.
pub fn pack_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Lists the `*.txt` files directly inside `dir`, sorted by path.
pub fn discover_packs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_pack(path: &Path) -> Result<GameEvent> {
    let name = pack_name(path)
        .with_context(|| format!("no pack name for {}", path.display()))?;
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let pack = WordPack::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to load pack {}", path.display()))?;
    Ok(GameEvent::PackLoaded { name, pack })
}

/// Loads the banned words from a line file, or from a JSON array of strings if the path ends in
/// `.json`. With no path the list is empty.
pub fn load_bans(path: Option<&Path>) -> Result<GameEvent> {
    let Some(path) = path else {
        return Ok(GameEvent::BansLoaded {
            banned: BannedWords::new(),
        });
    };
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let banned = if path.extension().is_some_and(|ext| ext == "json") {
        let words: Vec<String> = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        BannedWords::from_iterator(words)
    } else {
        BannedWords::from_reader(reader)
            .with_context(|| format!("failed to load bans {}", path.display()))?
    };
    Ok(GameEvent::BansLoaded { banned })
}

/// Starts one loader thread per pack in the packs directory plus one for the bans. Each sends its
/// event when done; failures are logged and send nothing.
///
/// Returns the number of pack loaders started.
pub fn spawn_loaders(app_config: &AppConfig, sender: &Sender<Message>) -> Result<usize> {
    let pack_paths = discover_packs(&app_config.packs_dir)?;
    if pack_paths.is_empty() {
        log::warn!("No word packs in {}", app_config.packs_dir.display());
    }
    let num_packs = pack_paths.len();

    for path in pack_paths {
        spawn_loader(sender.clone(), move || load_pack(&path));
    }
    let bans = app_config.bans.clone();
    spawn_loader(sender.clone(), move || load_bans(bans.as_deref()));

    Ok(num_packs)
}

fn spawn_loader<F>(sender: Sender<Message>, load: F)
where
    F: FnOnce() -> Result<GameEvent> + Send + 'static,
{
    thread::spawn(move || match load() {
        Ok(event) => {
            let _ = sender.send(Message::Loaded(event));
        }
        Err(err) => log::error!("{:#}", err),
    });
}
