//! Reading and writing `config.json`.
//!
//! The file lives in `dirs::config_dir()/gitscenarios/`. A missing or blank
//! file means defaults; a broken one is reported and, at startup, replaced
//! by defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "gitscenarios";
const CONFIG_FILE: &str = "config.json";
/// Written first, then renamed over `CONFIG_FILE`
const PARTIAL_FILE: &str = "config.json.partial";

/// A settings file location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// The per-user location for this platform.
    pub fn locate() -> Result<Self> {
        let base = dirs::config_dir().ok_or(Error::ConfigDirNotFound)?;
        Ok(Self::in_dir(base.join(CONFIG_DIR_NAME)))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Read and sanitize the settings file.
    pub fn load(&self) -> Result<Settings> {
        let path = self.file();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(source) => return Err(Error::ConfigLoad { path, source }),
        };

        if text.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings = Settings::from_json_sanitized(&text)
            .map_err(|source| Error::ConfigParse { path: path.clone(), source })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write `settings` as pretty JSON, creating the directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self.file();
        self.write_then_rename(settings)
            .map_err(|source| Error::ConfigSave { path: path.clone(), source })?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    fn write_then_rename(&self, settings: &Settings) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let partial = self.dir.join(PARTIAL_FILE);
        {
            let mut out = BufWriter::new(File::create(&partial)?);
            serde_json::to_writer_pretty(&mut out, settings).map_err(io::Error::from)?;
            out.write_all(b"\n")?;
            out.flush()?;
        }
        fs::rename(&partial, self.dir.join(CONFIG_FILE))
    }

    #[cfg(test)]
    fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

/// Settings for startup. Never fails; problems are logged.
pub fn load_config() -> Settings {
    ConfigStore::locate()
        .and_then(|store| store.load())
        .unwrap_or_log("Could not load settings")
}

/// Save to the per-user location.
pub fn save_config(settings: &Settings) -> Result<()> {
    ConfigStore::locate()?.save(settings)
}
