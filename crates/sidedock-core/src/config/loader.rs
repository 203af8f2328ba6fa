use std::path::{Path, PathBuf};

use super::{Settings, SettingsStore};

/// Returns the config directory: `~/.config/sidedock/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("sidedock"))
}

/// Returns the config file path: `~/.config/sidedock/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse the settings file at `path`.
///
/// Returns `Ok(None)` when the file does not exist, or an error string
/// describing what went wrong (IO error, parse error, etc.).
pub fn try_load(path: &Path) -> Result<Option<Settings>, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    let mut settings: Settings =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    settings.validate();
    Ok(Some(settings))
}

/// Loads the settings from `~/.config/sidedock/config.toml`.
///
/// Missing files silently return defaults; other errors are reported
/// and also fall back to defaults so the panel still starts.
pub fn load() -> Settings {
    let Some(path) = config_path() else {
        return Settings::default();
    };
    match try_load(&path) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Settings::default()
        }
    }
}

/// Writes settings back to a TOML file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for the default config path, if a home directory exists.
    pub fn default_location() -> Option<Self> {
        config_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Option<Settings>, String> {
        try_load(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("{}: {e}", parent.display()))?;
        }
        let content = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, content).map_err(|e| format!("{}: {e}", self.path.display()))
    }
}
