use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_branch() -> String {
    "main".to_string()
}

fn default_third_title() -> String {
    "Repo3".to_string()
}

fn default_third_commits() -> usize {
    2
}

/// Optional third repository block. Everything not given falls back to the
/// corresponding main-repository value at scenario-build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdRepoConfig {
    #[serde(default = "default_third_title")]
    pub title: String,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    #[serde(default = "default_third_commits")]
    pub commits: usize,
}

/// The on-disk configuration, one flat JSON object. Key names are part of the
/// config file format and intentionally PascalCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    #[serde(rename = "RemoteServer")]
    pub remote_server: String,
    #[serde(rename = "RemoteUser")]
    pub remote_user: String,
    #[serde(rename = "RemoteRepoName")]
    pub remote_repo_name: String,
    #[serde(rename = "LocalBaseDir")]
    pub local_base_dir: String,
    #[serde(rename = "LocalRepoName")]
    pub local_repo_name: String,
    #[serde(rename = "RemoteDefBranch", default = "default_branch")]
    pub remote_def_branch: String,
    #[serde(rename = "ThirdRepo", default)]
    pub third_repo: Option<ThirdRepoConfig>,
}

impl DiagramConfig {
    /// Loads and parses the configuration file. Fails fast: any I/O or JSON
    /// problem aborts before the pipeline produces output.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_json(&text).map_err(|err| Error::Config {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded diagram config");
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// SSH-style clone URL shown in the command line of the header.
    pub fn remote_url(&self) -> String {
        format!(
            "git@{}:{}/{}.git",
            self.remote_server, self.remote_user, self.remote_repo_name
        )
    }

    /// Display path of the cloned working copy. This is a label, not a
    /// filesystem path, so it always joins with `/`.
    pub fn local_repo_path(&self) -> String {
        let base = self.local_base_dir.trim_end_matches(['/', '\\']);
        format!("{base}/{}", self.local_repo_name)
    }
}
