//! Remembers the last used inputs between runs, like a pre-filled form.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use engine_logging::{engine_error, engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use watcher_core::{WatchConfig, DEFAULT_INTERVAL_SECONDS};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub url: String,
    pub selector: String,
    pub filter_pattern: Option<String>,
    pub interval_seconds: Option<u64>,
    pub select_first: bool,
}

impl FormState {
    /// `None` until both a URL and a selector are known.
    pub fn to_config(&self) -> Option<WatchConfig> {
        if self.url.trim().is_empty() || self.selector.trim().is_empty() {
            return None;
        }
        Some(WatchConfig {
            url: self.url.trim().to_string(),
            interval_seconds: self.interval_seconds.unwrap_or(DEFAULT_INTERVAL_SECONDS),
            selector: self.selector.trim().to_string(),
            select_last: !self.select_first,
            filter_pattern: self.filter_pattern.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to serialize form state: {0}")]
    Serialize(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub fn load_form(path: &Path) -> Option<FormState> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            engine_warn!("Failed to read form state from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str(&content) {
        Ok(form) => {
            engine_info!("Loaded remembered inputs from {:?}", path);
            Some(form)
        }
        Err(err) => {
            engine_warn!("Failed to parse form state from {:?}: {}", path, err);
            None
        }
    }
}

pub fn save_form(path: &Path, form: &FormState) {
    if let Err(err) = write_form(path, form) {
        engine_error!("Failed to write form state to {:?}: {}", path, err);
    }
}

fn write_form(path: &Path, form: &FormState) -> Result<(), PersistError> {
    let content = ron::ser::to_string_pretty(form, ron::ser::PrettyConfig::new())?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Write beside the target and rename so a crash never leaves half a file.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}
