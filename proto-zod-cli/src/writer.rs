//! Output of generated files in CLI mode.
//!
//! Generated file names are relative (`acme/v1/user_proto_zod.pb.ts`), so
//! each one is placed below the configured output directory, creating the
//! package directories on the way. In dry-run mode nothing touches disk and
//! the content is handed back for printing.

use crate::error::{CliResult, WriteError};
use crate::generator::GeneratedFile;
use std::path::{Path, PathBuf};

/// Outcome for one generated file.
#[derive(Debug)]
pub enum WriteResult {
    /// The file is on disk.
    Written { path: PathBuf, bytes: usize },

    /// Dry run: the file would have been written to `path`.
    DryRun { path: PathBuf, content: String },
}

/// Writes generated files below an output directory.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    /// Create a writer; `dry_run` disables all filesystem changes.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Place every generated file below `dir`, in order.
    pub fn write_all(&self, dir: &Path, files: &[GeneratedFile]) -> CliResult<Vec<WriteResult>> {
        files
            .iter()
            .map(|file| self.write_file(&dir.join(&file.name), &file.content))
            .collect()
    }

    fn write_file(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                path: path.to_path_buf(),
                content: content.to_string(),
            });
        }

        if let Some(package_dir) = path.parent().filter(|dir| !dir.exists()) {
            std::fs::create_dir_all(package_dir).map_err(|source| WriteError::CreateDir {
                path: package_dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote generated file");
        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn generated(name: &str, content: &str) -> GeneratedFile {
        GeneratedFile {
            name: name.to_string(),
            content: content.to_string(),
            schemas: Vec::new(),
        }
    }

    #[test]
    fn test_write_all_creates_package_directories() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            generated("acme/v1/user_proto_zod.pb.ts", "a"),
            generated("acme/v2/order_proto_zod.pb.ts", "b"),
        ];

        let results = FileWriter::new(false).write_all(dir.path(), &files).unwrap();

        assert_eq!(results.len(), 2);
        match &results[0] {
            WriteResult::Written { path, bytes } => {
                assert_eq!(path, &dir.path().join("acme/v1/user_proto_zod.pb.ts"));
                assert_eq!(*bytes, 1);
            }
            WriteResult::DryRun { .. } => panic!("expected a written file"),
        }
        assert_eq!(
            std::fs::read_to_string(dir.path().join("acme/v2/order_proto_zod.pb.ts")).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_write_all_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_proto_zod.pb.ts");
        std::fs::write(&path, "stale").unwrap();

        FileWriter::new(false)
            .write_all(dir.path(), &[generated("user_proto_zod.pb.ts", "fresh")])
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_dry_run_leaves_disk_untouched() {
        let dir = TempDir::new().unwrap();
        let files = [generated("acme/user_proto_zod.pb.ts", "content")];

        let results = FileWriter::new(true).write_all(dir.path(), &files).unwrap();

        assert!(!dir.path().join("acme").exists());
        match &results[0] {
            WriteResult::DryRun { path, content } => {
                assert_eq!(path, &dir.path().join("acme/user_proto_zod.pb.ts"));
                assert_eq!(content, "content");
            }
            WriteResult::Written { .. } => panic!("dry run wrote a file"),
        }
    }
}
