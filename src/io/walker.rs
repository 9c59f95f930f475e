use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const PHP_EXTENSIONS: &[&str] = &["php"];

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// PHP files under the root, honoring `.gitignore`. A root that is itself
    /// a file is returned as-is when it passes the filters.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_php = path
            .extension()
            .map(|ext| PHP_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if !is_php {
            return false;
        }

        let path_str = path.to_string_lossy();
        let relative = path
            .strip_prefix(&self.root)
            .map(|p| p.to_string_lossy())
            .unwrap_or_else(|_| path_str.clone());

        !self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str) || p.matches(&relative))
                .unwrap_or(false)
        })
    }
}

/// PHP files under every root, deduplicated.
pub fn find_php_files(roots: &[PathBuf], ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        files.extend(
            FileWalker::new(root.clone())
                .with_ignore_patterns(ignore_patterns.to_vec())
                .walk()?,
        );
    }
    files.sort();
    files.dedup();
    Ok(files)
}
