//! Entry points of the C# host adapter.
//!
//! `generate_for_project` scans a project directory, parses every C# file
//! with tree-sitter on blocking tasks, lowers the outlines into one forest and
//! runs the extension pipeline once over it. The generated unit and a
//! `summary.json` are written into the configured output directory.

use crate::{
    config::model::GeneratorConfig,
    fs_scan::{self, ScannedFile},
    lower::lower,
    parse::{SourceOutline, parse_source},
    resolve::CsharpResolver,
    sink::FileSink,
    summary::{self, Counts, RunSummary, SummaryStopwatch},
};
use anyhow::{Context, Result};
use extgen_core::{Emission, GENERATED_HINT_NAME, HostSink};
use std::{fs, path::Path, sync::Arc};
use tokio::{sync::Semaphore, task};
use tracing::{info, warn};

/// Generate extension wrappers for the project rooted at `root`.
///
/// # Steps
/// 1. **Scan** the filesystem with the configured filters.
/// 2. **Parse** files in parallel, bounded by `limits.max_concurrency`.
///    Files that fail are logged and skipped.
/// 3. **Generate**: lower the outlines sorted by path, resolve, render.
/// 4. **Persist** the unit and `summary.json` under `output.out_dir`.
#[tracing::instrument(level = "info", skip_all, fields(root = %root.display()))]
pub async fn generate_for_project(root: &Path, cfg: &GeneratorConfig) -> Result<RunSummary> {
    let mut sw = SummaryStopwatch::start();
    let root = dunce::canonicalize(root)
        .with_context(|| format!("canonicalize root {}", root.display()))?;

    let scan = fs_scan::scan_project(&root, cfg)?;
    info!(files = scan.files.len(), "Scanned filesystem");
    sw.stop_scan();

    let (outlines, files_failed) = parse_files(&scan.files, cfg.limits.max_concurrency).await?;
    info!(parsed = outlines.len(), failed = files_failed, "Parsed sources");
    sw.stop_parse();

    let program = lower(&outlines);
    let resolver = CsharpResolver::new(&program);
    let emission = extgen_core::run(&program.forest, &resolver)?;
    sw.stop_generate();

    let out_dir = cfg.output.resolve(&root);
    let mut sink = FileSink::new(&out_dir);
    sink.add_source(emission.unit.hint_name, &emission.unit.text)?;
    sw.stop_persist();

    let counts = Counts {
        files_scanned: scan.files.len(),
        bytes_scanned: scan.files.iter().map(|f| f.size).sum(),
        files_parsed: outlines.len(),
        files_failed,
        forest_nodes: program.forest.len(),
        ..Counts::default()
    };
    let summary = RunSummary::new(&root, &out_dir.join(GENERATED_HINT_NAME), counts, &emission)
        .with_timings(sw.into_timings());
    summary::persist(&out_dir, &summary)?;

    info!(
        out_dir = %out_dir.display(),
        groups = summary.counts.groups,
        members = summary.counts.members,
        diagnostics = summary.diagnostics.len(),
        "Generation finished"
    );
    Ok(summary)
}

/// In-memory variant over `(path, code)` pairs; nothing touches the disk.
pub fn generate_for_sources(sources: &[(String, String)]) -> Result<Emission> {
    let mut outlines: Vec<SourceOutline> = sources
        .iter()
        .filter_map(|(path, code)| match parse_source(path, code) {
            Ok(outline) => Some(outline),
            Err(err) => {
                warn!(path = %path, error = %err, "Failed to parse, skipped");
                None
            }
        })
        .collect();
    outlines.sort_by(|a, b| a.path.cmp(&b.path));

    let program = lower(&outlines);
    let resolver = CsharpResolver::new(&program);
    Ok(extgen_core::run(&program.forest, &resolver)?)
}

/// Parse every file on a blocking task. Returns outlines sorted by path and
/// the number of files that failed.
async fn parse_files(files: &[ScannedFile], max_concurrency: usize) -> Result<(Vec<SourceOutline>, usize)> {
    let sem = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = Vec::with_capacity(files.len());

    for file in files {
        let permit = sem
            .clone()
            .acquire_owned()
            .await
            .context("parse semaphore closed")?;
        let path = file.path.clone();
        let rel = file.rel.clone();

        tasks.push(task::spawn_blocking(move || {
            let _span = tracing::debug_span!("parse_task", path = %rel).entered();
            let res = fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))
                .and_then(|code| parse_source(&rel, &code));
            drop(permit);
            (rel, res)
        }));
    }

    let mut outlines = Vec::with_capacity(tasks.len());
    let mut failed = 0usize;
    for t in tasks {
        let (rel, res) = t.await.context("parse task panicked")?;
        match res {
            Ok(outline) => outlines.push(outline),
            Err(err) => {
                failed += 1;
                warn!(path = %rel, error = %err, "Failed to parse, skipped");
            }
        }
    }

    outlines.sort_by(|a, b| a.path.cmp(&b.path));
    Ok((outlines, failed))
}
