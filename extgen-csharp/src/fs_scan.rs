//! Filesystem scanning for C# sources.

use crate::{
    config::model::GeneratorConfig,
    normalize::{build_globset, is_csharp, matches, repo_rel_str},
};
use anyhow::{Result, bail};
use globset::GlobSet;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Repository-relative path with `/` separators.
    pub rel: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Sorted by `rel`.
    pub files: Vec<ScannedFile>,
    pub skipped_ignored: usize,
    pub skipped_generated: usize,
    pub skipped_too_big: usize,
}

pub fn scan_project(root: &Path, cfg: &GeneratorConfig) -> Result<ScanResult> {
    if !root.exists() {
        bail!("fs_scan: root does not exist: {}", root.display());
    }

    info!("fs_scan: start -> {}", root.display());

    let ignore_globs: Option<GlobSet> = build_globset(&cfg.filters.ignore_globs);
    let generated_globs: Option<GlobSet> = if cfg.filters.exclude_generated {
        build_globset(&cfg.filters.generated_globs)
    } else {
        None
    };

    let mut skipped_ignored = 0usize;
    let mut skipped_generated = 0usize;
    let mut skipped_too_big = 0usize;
    let mut files = Vec::<ScannedFile>::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(keep_entry);

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() || !is_csharp(entry.path()) {
            continue;
        }
        let path = entry.path();
        let rel = repo_rel_str(root, path);

        if matches(&rel, ignore_globs.as_ref()) {
            skipped_ignored += 1;
            debug!("fs_scan: ignore (glob) {}", rel);
            continue;
        }
        if matches(&rel, generated_globs.as_ref()) {
            skipped_generated += 1;
            debug!("fs_scan: skip generated {}", rel);
            continue;
        }

        let size = match fs::metadata(path) {
            Ok(m) => m.len(),
            Err(err) => {
                warn!("fs_scan: metadata failed for {}: {}", path.display(), err);
                continue;
            }
        };
        if size as usize > cfg.limits.max_file_bytes {
            skipped_too_big += 1;
            debug!(
                "fs_scan: skip (size {} > max {}) {}",
                size, cfg.limits.max_file_bytes, rel
            );
            continue;
        }

        files.push(ScannedFile {
            path: path.to_path_buf(),
            rel,
            size,
        });
    }

    // Walk order is filesystem-dependent; generated text must not be.
    files.sort_by(|a, b| a.rel.cmp(&b.rel));

    info!(
        "fs_scan: done, total={} (ignored={}, generated={}, too_big={})",
        files.len(),
        skipped_ignored,
        skipped_generated,
        skipped_too_big
    );

    Ok(ScanResult {
        files,
        skipped_ignored,
        skipped_generated,
        skipped_too_big,
    })
}

/// Coarse directory filter to avoid descending into build/vendor folders early.
fn keep_entry(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() && entry.depth() > 0 {
        if let Some(name) = entry.file_name().to_str() {
            return !matches!(
                name,
                ".git" | "bin" | "obj" | "node_modules" | ".vs" | ".idea" | ".vscode"
            );
        }
    }
    true
}
