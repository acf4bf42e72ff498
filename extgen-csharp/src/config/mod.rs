//! Configuration loader and validator.
//!
//! Responsibilities:
//! - Read an explicit YAML file, or `<root>/extgen.yml` when present
//! - Apply defaults when the file or some of its values are missing
//! - Validate constraints (e.g., `max_file_bytes` must be > 0)

pub mod model;

use crate::config::model::GeneratorConfig;
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

/// File name looked up in the project root when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "extgen.yml";

/// Load [`GeneratorConfig`] for the project at `root`.
///
/// # Arguments
/// * `root` - project root, used to find `extgen.yml`.
/// * `explicit` - a config path that must exist when given.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<GeneratorConfig> {
    let candidate = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let p = root.join(DEFAULT_CONFIG_FILE);
            p.is_file().then_some(p)
        }
    };

    let cfg = match candidate {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read config {}", path.display()))?;
            let cfg: GeneratorConfig = serde_yml::from_str(&raw)
                .with_context(|| format!("parse config {}", path.display()))?;
            info!(path = %path.display(), "Configuration loaded from file");
            cfg
        }
        None => {
            info!("Configuration defaults used");
            GeneratorConfig::default()
        }
    };

    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path(), None).unwrap();
        assert_eq!(cfg.limits.max_file_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "output:\n  out_dir: obj/extgen\nlimits:\n  max_file_bytes: 1024\n",
        )
        .unwrap();

        let cfg = load(dir.path(), None).unwrap();
        assert_eq!(cfg.output.out_dir, Path::new("obj/extgen"));
        assert_eq!(cfg.limits.max_file_bytes, 1024);
        assert_eq!(cfg.limits.max_concurrency, 8);
        assert!(cfg.filters.exclude_generated);
    }

    #[test]
    fn explicit_path_must_exist_and_validate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path(), Some(&dir.path().join("nope.yml"))).is_err());

        let bad = dir.path().join("bad.yml");
        fs::write(&bad, "limits:\n  max_file_bytes: 0\n").unwrap();
        assert!(load(dir.path(), Some(&bad)).is_err());
    }
}
