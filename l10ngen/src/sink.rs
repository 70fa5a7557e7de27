//! [`Sink`] implementations.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{error::Error, traits::Sink};

/// Writes artifacts as UTF-8 files under a root directory, creating it if missing.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for FsSink {
    fn write_text(&mut self, path: &str, content: &str) -> Result<(), Error> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, content).map_err(|source| Error::Write {
            path: target.clone(),
            source,
        })?;
        tracing::debug!(event = "artifact_written", path = %target.display(), bytes = content.len());
        Ok(())
    }
}

/// Keeps artifacts in memory, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Sink for MemorySink {
    fn write_text(&mut self, path: &str, content: &str) -> Result<(), Error> {
        self.files.insert(path.to_string(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_sink_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("lib").join("l10n");
        let mut sink = FsSink::new(&root);
        sink.write_text("app_en.arb", "{}").unwrap();
        assert_eq!(fs::read_to_string(root.join("app_en.arb")).unwrap(), "{}");
    }

    #[test]
    fn test_fs_sink_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(temp_dir.path());
        sink.write_text("en.ts", "old").unwrap();
        sink.write_text("en.ts", "new").unwrap();
        assert_eq!(fs::read_to_string(temp_dir.path().join("en.ts")).unwrap(), "new");
    }

    #[test]
    fn test_fs_sink_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let mut sink = FsSink::new(&blocker);
        assert!(matches!(
            sink.write_text("app_en.arb", "{}"),
            Err(Error::Write { .. })
        ));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write_text("b.ts", "b").unwrap();
        sink.write_text("a.ts", "a").unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("a.ts"), Some("a"));
        let names: Vec<&String> = sink.files().keys().collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
    }
}
