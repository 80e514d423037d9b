use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::{AppError, Result};

pub const FINANCE_FILE: &str = "finance.json";
pub const CATEGORIES_FILE: &str = "categories.json";

/// Source of the CFO JSON fixtures
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Raw bytes of the named fixture
    async fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Whether the fixtures can be served at all
    async fn is_available(&self) -> bool;
}

/// Fixtures read from a directory on every call; nothing is cached
#[derive(Debug, Clone)]
pub struct FileFixtureStore {
    data_dir: PathBuf,
}

impl FileFixtureStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl FixtureSource for FileFixtureStore {
    async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.data_dir.join(name);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "Fixture read");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::error!(path = %path.display(), "Fixture file is missing");
                Err(AppError::Io(e))
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.data_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}
