//! Command handlers for the `crest` binary.

pub mod add;
pub mod bounds;
pub mod check;
pub mod list;
pub mod show;

use anyhow::{Context, Result};
use crest_core::config::{ProjectConfig, load_config};
use crest_core::{seed, store};
use std::path::{Path, PathBuf};

/// Resolve the external events file path: explicit flag, else config.
fn data_file(flag: Option<&Path>, config: &ProjectConfig, project_root: &Path) -> PathBuf {
    flag.map_or_else(|| project_root.join(&config.data.file), Path::to_path_buf)
}

/// Load the merged store: built-in seeds plus the external file if it
/// exists. An absent file is not an error.
pub fn load_store(data_flag: Option<&Path>, project_root: &Path) -> Result<store::Loaded> {
    let config = load_config(project_root)?;
    let path = data_file(data_flag, &config, project_root);

    let external_text = if path.exists() {
        Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        )
    } else {
        None
    };

    Ok(store::load(seed::builtin_events(), external_text.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_file_prefers_the_flag() {
        let config = ProjectConfig::default();
        let resolved = data_file(
            Some(Path::new("/tmp/override.yaml")),
            &config,
            Path::new("/project"),
        );
        assert_eq!(resolved, PathBuf::from("/tmp/override.yaml"));
    }

    #[test]
    fn data_file_defaults_relative_to_root() {
        let config = ProjectConfig::default();
        let resolved = data_file(None, &config, Path::new("/project"));
        assert_eq!(resolved, PathBuf::from("/project/data/events.yaml"));
    }

    #[test]
    fn load_store_without_external_file_yields_seeds() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load_store(None, dir.path()).expect("load");
        assert_eq!(loaded.events.len(), 3);
        assert!(loaded.warnings.is_empty());
    }
}
