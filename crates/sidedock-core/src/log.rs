//! Rotating file log for the panel.
//!
//! Lines go to `~/.config/sidedock/logs/sidedock.log`. Once the file
//! passes `max_file_mb` it becomes `sidedock.log.1`, older backups shift
//! up by one and anything past `backups` is dropped.
//!
//! The panel runs without a console most of the time, so this file is
//! the only trace of shell negotiation and hook failures.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static SINK: OnceLock<Mutex<RotatingFile>> = OnceLock::new();

const LOG_STEM: &str = "sidedock.log";

/// `[logging]` section of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Off by default.
    pub enabled: bool,
    pub level: Level,
    /// Size that triggers rotation. 0 disables rotation.
    pub max_file_mb: u64,
    /// Rotated files kept next to the live one.
    pub backups: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::Info,
            max_file_mb: 10,
            backups: 2,
        }
    }
}

/// Severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// An append-only file that rotates itself by size.
struct RotatingFile {
    /// `None` only while rotating, or if reopening failed.
    file: Option<File>,
    dir: PathBuf,
    min_level: Level,
    max_bytes: u64,
    backups: u32,
    written: u64,
}

impl RotatingFile {
    fn open(dir: &Path, config: &LogConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = open_append(&dir.join(LOG_STEM))?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file: Some(file),
            dir: dir.to_path_buf(),
            min_level: config.level,
            max_bytes: config.max_file_mb * 1024 * 1024,
            backups: config.backups,
            written,
        })
    }

    fn append(&mut self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let line = format!("{} [{}] {args}\n", timestamp(), level.tag());
        if file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        self.dir.join(format!("{LOG_STEM}.{n}"))
    }

    fn rotate(&mut self) {
        // Windows refuses to rename a file that is still open.
        self.file = None;
        let live = self.dir.join(LOG_STEM);
        if self.backups == 0 {
            let _ = fs::remove_file(&live);
        } else {
            let _ = fs::remove_file(self.backup_path(self.backups));
            for n in (1..self.backups).rev() {
                let _ = fs::rename(self.backup_path(n), self.backup_path(n + 1));
            }
            let _ = fs::rename(&live, self.backup_path(1));
        }
        self.file = open_append(&live).ok();
        self.written = 0;
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Starts file logging under the config directory, if enabled.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    init_in(&dir.join("logs"), config);
}

/// Starts file logging into `log_dir`. Only the first call takes effect.
pub fn init_in(log_dir: &Path, config: &LogConfig) {
    match RotatingFile::open(log_dir, config) {
        Ok(sink) => {
            let _ = SINK.set(Mutex::new(sink));
        }
        Err(e) => eprintln!("Warning: logging disabled, {}: {e}", log_dir.display()),
    }
}

/// Backend of the `log_*` macros. A no-op until [`init`] succeeds.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    if let Some(sink) = SINK.get()
        && let Ok(mut sink) = sink.lock()
    {
        sink.append(level, args);
    }
}

/// Wall-clock time of day (UTC), to the millisecond.
fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        dur.subsec_millis()
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
