//! Run summary: counters, timings and the digest of the generated unit.
//!
//! Written next to the generated file as `summary.json`, so a build can tell
//! whether the output changed without diffing it:
//!
//! ```ignore
//! let mut sw = SummaryStopwatch::start();
//! // ... scan ...
//! sw.stop_scan();
//! // ... parse ...
//! sw.stop_parse();
//! // ... lower, resolve, emit ...
//! sw.stop_generate();
//! // ... write unit ...
//! sw.stop_persist();
//!
//! let summary = RunSummary::new(root, &output, counts, &emission).with_timings(sw.into_timings());
//! persist(out_dir, &summary)?;
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use extgen_core::{Diagnostic, Emission};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

/// File name of the persisted summary inside the output directory.
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub root: String,
    /// Absolute path of the generated unit.
    pub output_file: String,
    /// Lowercase hex SHA-256 of the generated text.
    pub content_sha256: String,
    pub counts: Counts,
    pub diagnostics: Vec<Diagnostic>,
    pub timings_ms: TimingsMs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    /// Files kept by the scanner.
    pub files_scanned: usize,
    /// Total size of the scanned files.
    pub bytes_scanned: u64,
    pub files_parsed: usize,
    /// Files that failed to read or parse; they contribute nothing.
    pub files_failed: usize,
    pub forest_nodes: usize,
    /// Wrapper classes rendered.
    pub groups: usize,
    /// Forwarders rendered.
    pub members: usize,
}

/// Millisecond timings; phases that did not run stay zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingsMs {
    pub scan: u128,
    pub parse: u128,
    pub generate: u128,
    pub persist: u128,
    pub total: u128,
}

impl RunSummary {
    /// Summary of a finished run; timings start at zero.
    pub fn new(root: &Path, output_file: &Path, mut counts: Counts, emission: &Emission) -> Self {
        let generated_at: DateTime<Utc> = Utc::now();
        counts.groups = emission.unit.groups;
        counts.members = emission.unit.members;

        Self {
            generated_at: generated_at.to_rfc3339(),
            root: root.display().to_string(),
            output_file: output_file.display().to_string(),
            content_sha256: sha_hex(&emission.unit.text),
            counts,
            diagnostics: emission.diagnostics.clone(),
            timings_ms: TimingsMs::default(),
        }
    }

    /// Attach timings captured by a [`SummaryStopwatch`].
    pub fn with_timings(mut self, timings: TimingsMs) -> Self {
        self.timings_ms = timings;
        self
    }
}

/// Write `summary` as pretty JSON to `<out_dir>/summary.json`.
pub fn persist(out_dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create_dir_all {}", out_dir.display()))?;
    let path = out_dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "summary: written");
    Ok(path)
}

/// Lowercase hex SHA-256 of a string.
pub fn sha_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    format!("{:x}", h.finalize())
}

/// Phase stopwatch: each `stop_*` records the time since the previous mark.
#[derive(Debug, Clone)]
pub struct SummaryStopwatch {
    started: Instant,
    last_mark: Instant,
    tm: TimingsMs,
}

impl SummaryStopwatch {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_mark: now,
            tm: TimingsMs::default(),
        }
    }

    pub fn stop_scan(&mut self) -> &mut Self {
        self.tm.scan = self.since_mark_ms();
        self
    }

    pub fn stop_parse(&mut self) -> &mut Self {
        self.tm.parse = self.since_mark_ms();
        self
    }

    pub fn stop_generate(&mut self) -> &mut Self {
        self.tm.generate = self.since_mark_ms();
        self
    }

    pub fn stop_persist(&mut self) -> &mut Self {
        self.tm.persist = self.since_mark_ms();
        self
    }

    /// Finish and return timings, `total` included.
    pub fn into_timings(mut self) -> TimingsMs {
        self.tm.total = self.started.elapsed().as_millis();
        self.tm
    }

    fn since_mark_ms(&mut self) -> u128 {
        let now = Instant::now();
        let ms = now.duration_since(self.last_mark).as_millis();
        self.last_mark = now;
        ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extgen_core::{GENERATED_HINT_NAME, GeneratedUnit};

    fn emission(text: &str) -> Emission {
        Emission {
            unit: GeneratedUnit {
                hint_name: GENERATED_HINT_NAME,
                text: text.to_string(),
                groups: 2,
                members: 3,
            },
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn digest_tracks_the_generated_text() {
        let counts = Counts {
            files_scanned: 4,
            ..Counts::default()
        };
        let a = RunSummary::new(Path::new("/repo"), Path::new("/repo/Generated/x.cs"), counts.clone(), &emission("a"));
        let b = RunSummary::new(Path::new("/repo"), Path::new("/repo/Generated/x.cs"), counts, &emission("b"));

        assert_eq!(
            a.content_sha256,
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        assert_ne!(a.content_sha256, b.content_sha256);
        assert_eq!((a.counts.groups, a.counts.members, a.counts.files_scanned), (2, 3, 4));
    }

    #[test]
    fn persist_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = SummaryStopwatch::start();
        sw.stop_scan().stop_parse().stop_generate().stop_persist();
        let summary = RunSummary::new(dir.path(), &dir.path().join("x.cs"), Counts::default(), &emission(""))
            .with_timings(sw.into_timings());

        let path = persist(dir.path(), &summary).unwrap();
        let back: RunSummary = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back.content_sha256, summary.content_sha256);
        assert_eq!(back.counts.groups, 2);
    }
}
