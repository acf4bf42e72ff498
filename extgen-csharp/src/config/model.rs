//! Strongly-typed configuration model for the C# host adapter.
//!
//! Groups:
//! - [`GeneratorConfig`]: top-level container for all config groups
//! - [`Filters`]        : which source files to include/exclude
//! - [`Limits`]         : size and parallelism limits
//! - [`OutputConfig`]   : where the generated unit and summary are written
//!
//! All structs are `serde`-friendly so they can be loaded from YAML/JSON.
//! Missing fields fall back to their defaults.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Which files to include/exclude.
    pub filters: Filters,
    /// Size limits.
    pub limits: Limits,
    /// Output location.
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Validate config sanity (no degenerate values).
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_file_bytes == 0 {
            return Err(anyhow!("`max_file_bytes` must be greater than 0"));
        }
        if self.output.out_dir.as_os_str().is_empty() {
            return Err(anyhow!("`output.out_dir` must not be empty"));
        }
        Ok(())
    }
}

/// File filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Whether to skip generated files (our own output included).
    pub exclude_generated: bool,
    /// Glob patterns for generated files.
    pub generated_globs: Vec<String>,
    /// Glob patterns for files to ignore (in addition to generated).
    pub ignore_globs: Vec<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            exclude_generated: true,
            generated_globs: vec!["**/*.g.cs".into(), "**/*.generated.cs".into()],
            ignore_globs: vec!["**/bin/**".into(), "**/obj/**".into(), "**/.git/**".into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum source file size to parse (bytes).
    pub max_file_bytes: usize,
    /// Files parsed at the same time; `0` is treated as `1`.
    pub max_concurrency: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024, // 2 MB
            max_concurrency: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory; relative paths are taken from the project root.
    pub out_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("Generated"),
        }
    }
}

impl OutputConfig {
    /// Absolute output directory for a project rooted at `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.out_dir.is_absolute() {
            self.out_dir.clone()
        } else {
            root.join(&self.out_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_skip_generated_sources() {
        let cfg = GeneratorConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.filters.exclude_generated);
        assert!(cfg.filters.generated_globs.iter().any(|g| g == "**/*.g.cs"));
    }

    #[test]
    fn zero_file_limit_is_rejected() {
        let mut cfg = GeneratorConfig::default();
        cfg.limits.max_file_bytes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn relative_out_dir_is_joined_to_root() {
        let out = OutputConfig::default();
        assert_eq!(out.resolve(Path::new("/repo")), PathBuf::from("/repo/Generated"));
        let abs = OutputConfig {
            out_dir: PathBuf::from("/tmp/gen"),
        };
        assert_eq!(abs.resolve(Path::new("/repo")), PathBuf::from("/tmp/gen"));
    }
}
