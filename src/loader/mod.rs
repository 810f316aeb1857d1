//! Configuration file loading.
//!
//! Reads the JSON config format:
//!
//! ```json
//! {
//!   "players": ["Ann", "Bob", "Cid"],
//!   "playertypes": ["Default", "Sneaky", "Default"],
//!   "use-teams": false,
//!   "attack-chance": 0.5,
//!   "death-chances": { "passive": 0.05, "attack": 0.5 },
//!   "classic-behavior": false,
//!   "show-kills-only": false,
//!   "extra-message-files": ["custom-messages.json"],
//!   "load-default-messages": true,
//!   "extensions-dir": "extensions"
//! }
//! ```
//!
//! Instead of inline lists, `files { players, playertypes, teams }` may name
//! newline-separated text files. Relative paths resolve against the config
//! file's directory.
//!
//! Message banks are layered: the built-in bank first (unless
//! `load-default-messages` is false), then every extra message file in order.
//! A category in a later layer replaces the whole category below it.
//!
//! `extensions-dir` only names a directory; which packs a file in it can
//! enable depends on the `ExtensionCatalog` the caller passes to
//! `ExtensionCatalog::enabled_in_dir`. The `battle-royale` binary uses
//! `packs::catalog()`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::{ConfigError, ParticipantSpec, Probabilities, SimConfig, DEFAULT_CATEGORY};
use crate::narration::MessageBank;

/// On-disk shape of a config file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    #[serde(default)]
    pub players: Vec<String>,

    pub playertypes: Option<Vec<String>>,

    pub teams: Option<Vec<String>>,

    pub use_teams: Option<bool>,

    pub attack_chance: Option<f64>,

    pub death_chances: Option<DeathChances>,

    #[serde(default)]
    pub classic_behavior: bool,

    #[serde(default)]
    pub show_kills_only: bool,

    pub seed: Option<u64>,

    pub files: Option<RosterFiles>,

    #[serde(default)]
    pub extra_message_files: Vec<PathBuf>,

    pub load_default_messages: Option<bool>,

    pub extensions_dir: Option<PathBuf>,

    /// Console colors. Accepted for compatibility, never used.
    pub message_colors: Option<serde_json::Value>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct DeathChances {
    /// Passive death chance.
    pub passive: f64,

    /// Attack success chance.
    pub attack: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RosterFiles {
    pub players: Option<PathBuf>,
    pub playertypes: Option<PathBuf>,
    pub teams: Option<PathBuf>,
}

/// A validated configuration with everything it refers to loaded.
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: SimConfig,
    pub messages: MessageBank,

    /// Directory to scan for enabled extensions, resolved.
    pub extensions_dir: Option<PathBuf>,
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        what: "config file",
        path: path.display().to_string(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let loaded = parse_config(&json, base)?;
    info!(path = %path.display(), participants = loaded.config.roster.len(), "loaded config");
    Ok(loaded)
}

/// Parse and validate config JSON. Relative paths resolve against `base`.
pub fn parse_config(json: &str, base: &Path) -> Result<LoadedConfig, ConfigError> {
    let file: ConfigFile = serde_json::from_str(json)?;

    let use_teams = file.use_teams.unwrap_or_else(|| {
        warn!("\"use-teams\" not set, defaulting to free-for-all");
        false
    });

    let (names, types, teams) = match &file.files {
        Some(files) => roster_from_files(files, base, use_teams)?,
        None => {
            let types = file.playertypes.clone().unwrap_or_else(|| {
                warn!("no player types given, using \"{DEFAULT_CATEGORY}\"");
                Vec::new()
            });
            let teams = if use_teams { file.teams.clone().unwrap_or_default() } else { Vec::new() };
            (file.players.clone(), types, teams)
        }
    };

    let defaults = Probabilities::default();
    let probabilities = Probabilities {
        attack: file.attack_chance.unwrap_or(defaults.attack),
        attack_success: file.death_chances.map_or(defaults.attack_success, |d| d.attack),
        passive_death: file.death_chances.map_or(defaults.passive_death, |d| d.passive),
    };

    let mut config = SimConfig::empty()
        .with_probabilities(probabilities)
        .classic(file.classic_behavior)
        .kills_only(file.show_kills_only)
        .teams(use_teams);
    config.seed = file.seed;
    for (i, name) in names.into_iter().enumerate() {
        let mut spec = ParticipantSpec::new(name);
        if let Some(category) = types.get(i) {
            spec = spec.with_category(category.clone());
        }
        if let Some(team) = teams.get(i).filter(|t| !t.trim().is_empty()) {
            spec = spec.with_group(team.clone());
        }
        config.roster.push(spec);
    }

    let messages = load_messages(&file, base)?;
    config.validate(&messages)?;

    Ok(LoadedConfig {
        config,
        messages,
        extensions_dir: file.extensions_dir.as_deref().map(|dir| resolve(base, dir)),
    })
}

/// Non-blank lines of a text file, trimmed.
pub fn read_lines(path: &Path, what: &'static str) -> Result<Vec<String>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        what,
        path: path.display().to_string(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn roster_from_files(
    files: &RosterFiles,
    base: &Path,
    use_teams: bool,
) -> Result<(Vec<String>, Vec<String>, Vec<String>), ConfigError> {
    let names = match &files.players {
        Some(path) => read_lines(&resolve(base, path), "players file")?,
        None => Vec::new(),
    };

    let types = match &files.playertypes {
        Some(path) => {
            let path = resolve(base, path);
            if path.exists() {
                read_lines(&path, "player types file")?
            } else {
                warn!(path = %path.display(), "player types file missing, using \"{DEFAULT_CATEGORY}\"");
                Vec::new()
            }
        }
        None => {
            warn!("no player types file given, using \"{DEFAULT_CATEGORY}\"");
            Vec::new()
        }
    };

    let teams = match (&files.teams, use_teams) {
        (Some(path), true) => read_lines(&resolve(base, path), "teams file")?,
        _ => Vec::new(),
    };

    Ok((names, types, teams))
}

fn load_messages(file: &ConfigFile, base: &Path) -> Result<MessageBank, ConfigError> {
    let mut messages = if file.load_default_messages.unwrap_or(true) {
        MessageBank::builtin()?
    } else {
        MessageBank::new()
    };

    for path in &file.extra_message_files {
        let path = resolve(base, path);
        if !path.exists() {
            warn!(path = %path.display(), "message file missing, skipping");
            continue;
        }
        let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            what: "message file",
            path: path.display().to_string(),
            source,
        })?;
        messages.merge(MessageBank::from_json_str(&json)?);
        info!(path = %path.display(), "loaded message file");
    }
    Ok(messages)
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
