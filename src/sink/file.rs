//! File-backed sink
//!
//! Each container is a file `<output_dir>/<id>.<extension>`. A container
//! exists once its file exists; writing replaces the whole file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ContainerRef, UiSink};
use crate::error::{SinkError, TargetNotFoundError};

/// Where and how container files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    pub output_dir: PathBuf,
    pub extension: String,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("summary_out"),
            extension: "html".to_string(),
        }
    }
}

impl FileSinkConfig {
    /// Load sink configuration from a JSON file; missing keys take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sink config: {:?}", path))?;

        let config: FileSinkConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse sink config JSON")?;

        if config.extension.is_empty() || config.extension.contains(['/', '\\', '.']) {
            anyhow::bail!("Invalid container file extension '{}'", config.extension);
        }

        Ok(config)
    }
}

/// Sink writing each container to its own file
#[derive(Debug, Clone)]
pub struct FileSink {
    config: FileSinkConfig,
}

impl FileSink {
    pub fn new(config: FileSinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    /// File backing `container`, or `None` if the id cannot name a file
    pub fn path_for(&self, container: &ContainerRef) -> Option<PathBuf> {
        let id = container.as_str();
        let plain = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\']);
        if !plain {
            return None;
        }
        Some(
            self.config
                .output_dir
                .join(format!("{}.{}", id, self.config.extension)),
        )
    }

    /// Create an empty container file if it does not exist yet
    pub fn create_container(&self, container: &ContainerRef) -> Result<PathBuf> {
        let path = self
            .path_for(container)
            .ok_or_else(|| anyhow::anyhow!("Container id '{}' cannot name a file", container))?;

        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!("Failed to create output dir: {:?}", self.config.output_dir)
        })?;

        if !path.exists() {
            fs::write(&path, "").with_context(|| format!("Failed to create container: {:?}", path))?;
            tracing::info!("Created container file {:?}", path);
        }
        Ok(path)
    }

    fn existing_path(&self, container: &ContainerRef) -> Result<PathBuf, TargetNotFoundError> {
        self.path_for(container)
            .filter(|path| path.is_file())
            .ok_or_else(|| container.not_found())
    }
}

impl UiSink for FileSink {
    fn resolve(&self, container: &ContainerRef) -> Result<(), TargetNotFoundError> {
        self.existing_path(container).map(|_| ())
    }

    fn replace_content(&mut self, container: &ContainerRef, markup: &str) -> Result<(), SinkError> {
        let path = self.existing_path(container)?;

        // Write beside the target then rename so readers never see a partial box
        let tmp = path.with_extension(format!("{}.tmp", self.config.extension));
        let io_err = |source: io::Error| SinkError::Io {
            container: container.to_string(),
            source,
        };
        fs::write(&tmp, markup).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}
