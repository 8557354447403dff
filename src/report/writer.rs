//! Report persistence
//!
//! Reports live at fixed names inside an explicitly configured directory and
//! are overwritten on every run.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::PassId;
use crate::error::{VerifyError, VerifyResult};

/// File name of the run summary inside the report directory
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

/// Paths of every report written by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReports {
    pub passes: BTreeMap<PassId, PathBuf>,
    pub summary: Option<PathBuf>,
}

/// Writes rendered reports into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a pass report (`<dir>/<pass-id>.txt`)
    pub fn pass_path(&self, pass: PassId) -> PathBuf {
        self.dir.join(format!("{}.txt", pass.as_str()))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE_NAME)
    }

    pub fn write_pass(&self, pass: PassId, content: &str) -> VerifyResult<PathBuf> {
        let path = self.pass_path(pass);
        atomic_write(&path, content)?;
        Ok(path)
    }

    pub fn write_summary(&self, content: &str) -> VerifyResult<PathBuf> {
        let path = self.summary_path();
        atomic_write(&path, content)?;
        Ok(path)
    }
}

/// Write via a temp file in the same directory, then rename over the target.
fn atomic_write(path: &Path, content: &str) -> VerifyResult<()> {
    let wrap = |source: std::io::Error| VerifyError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(wrap)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(wrap)?;
    tmp.write_all(content.as_bytes()).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
