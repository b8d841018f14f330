use std::fs;
use std::path::Path;

use crate::database::store::{Snapshot, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// YAML for `.yaml`/`.yml`, JSON otherwise
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

pub fn encode(snapshot: &Snapshot, format: SnapshotFormat) -> Result<String, StoreError> {
    match format {
        SnapshotFormat::Json => {
            serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Format(e.to_string()))
        }
        SnapshotFormat::Yaml => {
            serde_yaml::to_string(snapshot).map_err(|e| StoreError::Format(e.to_string()))
        }
    }
}

pub fn decode(content: &str, format: SnapshotFormat) -> Result<Snapshot, StoreError> {
    match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|e| StoreError::Format(e.to_string()))
        }
        SnapshotFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| StoreError::Format(e.to_string()))
        }
    }
}

/// Read a snapshot file; a missing file reads as an empty snapshot
pub fn load(path: &Path) -> Result<Snapshot, StoreError> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }
    let content = fs::read_to_string(path)?;
    decode(&content, SnapshotFormat::for_path(path))
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = encode(snapshot, SnapshotFormat::for_path(path))?;
    fs::write(path, content)?;
    tracing::info!("Saved snapshot to {}", path.display());
    Ok(())
}
