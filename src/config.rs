use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::session::{DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS, DurationField, SessionState};

/// Startup defaults. Session progress is never written here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub focus_duration_secs: u32,
    pub break_duration_secs: u32,
    pub sound_enabled: bool,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus_duration_secs: DEFAULT_FOCUS_SECS,
            break_duration_secs: DEFAULT_BREAK_SECS,
            sound_enabled: true,
            theme: "default".into(),
        }
    }
}

impl Config {
    /// The state a fresh or stopped session starts from.
    pub fn initial_session(&self) -> SessionState {
        SessionState::with_durations(self.focus_duration_secs, self.break_duration_secs)
    }

    /// Clamps durations onto the step grid so a hand-edited file can't
    /// put the session outside its bounds.
    pub fn normalized(mut self) -> Self {
        self.focus_duration_secs = DurationField::Focus.normalize(self.focus_duration_secs);
        self.break_duration_secs = DurationField::Break.normalize(self.break_duration_secs);
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = match ProjectDirs::from("", "", "pomotick") {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("pomotick_config.json"),
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self { path: p.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| match serde_json::from_str::<Config>(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {e}", self.path.display());
                    None
                }
            })
            .unwrap_or_default()
    }

    fn save(&self, cfg: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(cfg)?)
    }
}
