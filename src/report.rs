use crate::fixer::Removal;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a `fix` run across all files.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FixReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

/// A file with at least one removed annotation.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub removals: Vec<Removal>,
    pub removed_docblocks: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl FixReport {
    pub fn total_removals(&self) -> usize {
        self.files.iter().map(|file| file.removals.len()).sum()
    }

    pub fn total_removed_docblocks(&self) -> usize {
        self.files.iter().map(|file| file.removed_docblocks).sum()
    }

    pub fn files_changed(&self) -> usize {
        self.files.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
