use crate::sync::{RemoteConfig, RepoSlug};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from `crest.toml` at the project root.
///
/// Every section is optional; an absent file yields the defaults. The
/// bearer credential is never stored here — the CLI resolves it and
/// passes it into [`RemoteConfig`] explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub remote: Option<RemoteOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Local external events file, relative to the project root.
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

/// Remote store coordinates for the contribution push path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteOptions {
    /// `<owner>/<repo>` of the target repository.
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_remote_path")]
    pub path: String,
}

impl RemoteOptions {
    /// Resolve into a [`RemoteConfig`], attaching the caller's credential.
    ///
    /// # Errors
    ///
    /// Fails when `repo` is not a valid `<owner>/<repo>` slug.
    pub fn to_remote_config(&self, token: Option<String>) -> Result<RemoteConfig> {
        Ok(RemoteConfig {
            repo: RepoSlug::parse(&self.repo)?,
            branch: self.branch.clone(),
            path: self.path.clone(),
            token,
        })
    }
}

/// Load `crest.toml` from the project root, or defaults when absent.
///
/// # Errors
///
/// Fails on unreadable or syntactically invalid config files — a broken
/// config is an operator error, not something to silently default.
pub fn load_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join("crest.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/events.yaml")
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote_path() -> String {
    "data/events.yaml".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = load_config(dir.path()).expect("load should succeed");
        assert_eq!(cfg.data.file, PathBuf::from("data/events.yaml"));
        assert!(cfg.remote.is_none());
    }

    #[test]
    fn remote_section_parses_with_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("crest.toml"),
            "[remote]\nrepo = \"acme/flood-atlas\"\n",
        )
        .expect("write config");

        let cfg = load_config(dir.path()).expect("load should succeed");
        let remote = cfg.remote.expect("remote section");
        assert_eq!(remote.repo, "acme/flood-atlas");
        assert_eq!(remote.branch, "main");
        assert_eq!(remote.path, "data/events.yaml");

        let rc = remote
            .to_remote_config(Some("ghp_x".to_string()))
            .expect("valid slug");
        assert!(rc.can_write());
        assert_eq!(rc.repo.full_name(), "acme/flood-atlas");
    }

    #[test]
    fn invalid_config_is_an_error_not_a_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("crest.toml"), "[remote\nbroken").expect("write config");
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn bad_repo_slug_fails_resolution() {
        let options = RemoteOptions {
            repo: "not-a-slug".to_string(),
            branch: default_branch(),
            path: default_remote_path(),
        };
        assert!(options.to_remote_config(None).is_err());
    }
}
