use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Account bound by the last successful `auth login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub account_id: Uuid,
    pub display_name: String,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionFile {
    pub fn new(account_id: Uuid, display_name: String) -> Self {
        Self {
            account_id,
            display_name,
            logged_in_at: Utc::now(),
        }
    }
}

/// Where the snapshot and session files live for one invocation
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub snapshot: PathBuf,
    pub session: PathBuf,
}

impl DataPaths {
    /// `--data` wins over the configured storage; the session file sits beside the snapshot
    pub fn resolve(storage: &StorageConfig, data: Option<PathBuf>) -> Self {
        match data {
            Some(snapshot) => {
                let dir = snapshot.parent().map(Path::to_path_buf).unwrap_or_default();
                Self { session: dir.join("session.json"), snapshot }
            }
            None => Self {
                snapshot: storage.snapshot_path(),
                session: storage.session_path(),
            },
        }
    }
}

pub fn load_session(path: &Path) -> anyhow::Result<Option<SessionFile>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let session: SessionFile = serde_json::from_str(&content)?;
    Ok(Some(session))
}

pub fn save_session(path: &Path, session: &SessionFile) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let content = serde_json::to_string_pretty(session)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn clear_session(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
