mod normalizer;
mod parser;

use crate::directory::roster::Directory;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Failure to construct the legislator collection. Always fatal to initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read legislator records from {path}: {source}")]
    ReadRecords {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read image sources from {path}: {source}")]
    ReadImages {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid legislator records: {0}")]
    ParseRecords(serde_json::Error),
    #[error("invalid image sources: {0}")]
    ParseImages(serde_json::Error),
}

impl LoadError {
    /// Headline shown on the failure notice.
    pub fn title(&self) -> &'static str {
        match self {
            LoadError::ReadRecords { .. } | LoadError::ParseRecords(_) => {
                "Failed to load senators"
            }
            LoadError::ReadImages { .. } | LoadError::ParseImages(_) => {
                "Failed to load senator images"
            }
        }
    }
}

pub struct DirectoryLoader;

impl DirectoryLoader {
    /// Reads both documents concurrently and joins them before normalizing.
    pub async fn from_paths(
        records: impl AsRef<Path>,
        images: impl AsRef<Path>,
        today: NaiveDate,
    ) -> Result<Directory, LoadError> {
        let records = records.as_ref();
        let images = images.as_ref();

        let (record_bytes, image_bytes) = tokio::try_join!(
            async {
                tokio::fs::read(records)
                    .await
                    .map_err(|source| LoadError::ReadRecords {
                        path: records.to_path_buf(),
                        source,
                    })
            },
            async {
                tokio::fs::read(images)
                    .await
                    .map_err(|source| LoadError::ReadImages {
                        path: images.to_path_buf(),
                        source,
                    })
            },
        )?;

        Self::from_slices(&record_bytes, &image_bytes, today)
    }

    pub fn from_slices(
        records: &[u8],
        images: &[u8],
        today: NaiveDate,
    ) -> Result<Directory, LoadError> {
        let roster = parser::parse_roster(records).map_err(LoadError::ParseRecords)?;
        let images = parser::parse_images(images).map_err(LoadError::ParseImages)?;
        let legislators = normalizer::normalize_roster(roster, &images, today);

        tracing::info!(
            legislators = legislators.len(),
            images = images.len(),
            "legislator directory loaded"
        );

        Ok(Directory::new(legislators))
    }
}
