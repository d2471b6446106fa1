//! Output file naming and creation.
//!
//! Capture files are named `hostname-command-timestamp.ext`, with spaces
//! in the command replaced so the name stays a single shell token. The
//! save directory and timestamp format are explicit configuration passed
//! in by the embedder — there is no process-wide mutable state.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::fs::File;

use crate::error::Result;

/// Where capture files go and how their timestamps are rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputNaming {
    /// Directory for capture files. A relative path resolves under the
    /// user's home directory.
    pub save_dir: PathBuf,

    /// `strftime`-style timestamp format for the filename.
    pub timestamp_format: String,

    /// File extension, without the dot.
    pub extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("termgrab"),
            timestamp_format: "%Y-%m-%d-%H-%M-%S".to_string(),
            extension: "txt".to_string(),
        }
    }
}

impl OutputNaming {
    /// Build the file name for one capture.
    ///
    /// Components are joined with `-`; spaces in the command become `_`.
    pub fn file_name(&self, hostname: &str, command: &str, when: DateTime<Local>) -> String {
        let command = command.trim().replace(' ', "_");
        let stamp = when.format(&self.timestamp_format);
        format!("{hostname}-{command}-{stamp}.{}", self.extension)
    }

    /// The directory capture files land in, with a relative `save_dir`
    /// resolved under the user's home directory.
    pub fn resolve_dir(&self) -> PathBuf {
        if self.save_dir.is_absolute() {
            self.save_dir.clone()
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.save_dir)
        }
    }

    /// Full path for one capture.
    pub fn output_path(&self, hostname: &str, command: &str, when: DateTime<Local>) -> PathBuf {
        self.resolve_dir().join(self.file_name(hostname, command, when))
    }

    /// Create the output file, truncating any previous capture at `path`.
    pub async fn create(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        debug!("writing capture to {}", path.display());
        Ok(File::create(path).await?)
    }
}
