use std::path::{Path, PathBuf};

use crate::{errors::StorageError, types::Snapshot};

/// Writes snapshots to the file consumed by the front-end.
pub struct SnapshotManager {
    path: PathBuf,
}

impl SnapshotManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Overwrites the output file with the pretty-printed snapshot.
    ///
    /// Missing parent directories are created. Keys keep the field order of
    /// [`Snapshot`] and non-ASCII text is written as UTF-8.
    pub async fn persist(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| StorageError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
