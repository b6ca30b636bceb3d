//! Dry-run sink: write the banner to a local file instead of uploading it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use statbanner_core::{Error, Result};

use crate::{BannerPlacement, BannerPublisher};

pub struct FilePublisher {
    path: PathBuf,
}

impl FilePublisher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BannerPublisher for FilePublisher {
    async fn publish(&self, image: &[u8], placement: &BannerPlacement) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, image)
            .await
            .map_err(|e| Error::Publish(format!("{}: {}", self.path.display(), e)))?;
        info!(
            "Banner written to {} ({}x{}, {} bytes)",
            self.path.display(),
            placement.width,
            placement.height,
            image.len()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
