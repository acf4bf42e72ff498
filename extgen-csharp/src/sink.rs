//! [`HostSink`] that writes generated units into an output directory.

use extgen_core::{Error, HostSink};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Writes each registered unit to `<out_dir>/<hint_name>`, replacing any
/// previous file of the same name.
#[derive(Debug, Clone)]
pub struct FileSink {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Files written so far, in registration order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl HostSink for FileSink {
    fn add_source(&mut self, hint_name: &str, text: &str) -> extgen_core::Result<()> {
        let sink_err = |reason: String| Error::Sink {
            key: hint_name.to_string(),
            reason,
        };
        if hint_name.is_empty() || hint_name.contains(['/', '\\']) {
            return Err(sink_err("hint name must be a plain file name".into()));
        }

        fs::create_dir_all(&self.out_dir)
            .map_err(|e| sink_err(format!("create_dir_all {}: {e}", self.out_dir.display())))?;
        let path = self.out_dir.join(hint_name);
        fs::write(&path, text).map_err(|e| sink_err(format!("write {}: {e}", path.display())))?;

        info!(path = %path.display(), bytes = text.len(), "sink: unit written");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_replaces_the_unit() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("Generated"));

        sink.add_source("ExtensionMethods.g.cs", "// first").unwrap();
        sink.add_source("ExtensionMethods.g.cs", "// second").unwrap();

        let path = dir.path().join("Generated/ExtensionMethods.g.cs");
        assert_eq!(fs::read_to_string(&path).unwrap(), "// second");
        assert_eq!(sink.written().len(), 2);
    }

    #[test]
    fn rejects_names_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());
        let err = sink.add_source("../Evil.cs", "").unwrap_err();
        assert!(matches!(err, Error::Sink { .. }));
        assert!(sink.add_source("", "").is_err());
    }
}
