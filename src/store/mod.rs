//! Per-user log files.
//!
//! Each user's log lives in `{data_dir}/{username}.csv` and is read and
//! written whole: load at login, rewrite after every change.

pub mod codec;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::health_log::HealthLog;
use crate::models::user::Username;

pub use codec::{decode, encode};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed log data in row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}

#[derive(Debug, Clone)]
pub struct LogStore {
    data_dir: PathBuf,
}

impl LogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, username: &Username) -> PathBuf {
        self.data_dir.join(format!("{}.csv", username.as_str()))
    }

    pub async fn ensure_data_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.data_dir.clone(),
                source,
            })
    }

    /// A user with no file yet gets an empty log.
    pub async fn load(&self, username: &Username) -> Result<HealthLog, StoreError> {
        let path = self.path_for(username);
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(username = %username, "No stored log, starting empty");
                Ok(HealthLog::default())
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Replace the user's file with the full contents of `log`.
    pub async fn save(&self, username: &Username, log: &HealthLog) -> Result<(), StoreError> {
        self.ensure_data_dir().await?;
        let path = self.path_for(username);
        let bytes = encode(log)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(username = %username, entries = log.len(), "Log saved");
        Ok(())
    }

    pub async fn is_ready(&self) -> bool {
        tokio::fs::metadata(&self.data_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
