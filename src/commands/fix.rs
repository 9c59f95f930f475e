use crate::analyzers::PhpAnalyzer;
use crate::config::{self, DocpruneConfig};
use crate::fixer::DocBlockFixer;
use crate::io::{self, OutputFormat};
use crate::report::{FileFailure, FileReport, FixReport};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug_span, info, warn};

pub struct FixConfig {
    pub paths: Vec<PathBuf>,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

/// Runs the fixer over every PHP file under `config.paths` and prints the report.
pub fn handle_fix(config: FixConfig) -> Result<FixReport> {
    let settings = resolve_config(config.config.as_deref())?;
    let report = run_fix(&config.paths, &settings, config.dry_run)?;

    io::create_writer(config.format).write_report(&report)?;
    Ok(report)
}

fn resolve_config(path: Option<&Path>) -> Result<DocpruneConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// Fixes files without printing anything.
pub fn run_fix(paths: &[PathBuf], settings: &DocpruneConfig, dry_run: bool) -> Result<FixReport> {
    let files = io::find_php_files(paths, &settings.ignore_patterns())
        .context("Failed to collect PHP files")?;
    info!(count = files.len(), "collected PHP files");

    let fixer = DocBlockFixer::from_config(settings);
    let results: Vec<(PathBuf, Result<Option<FileReport>>)> = files
        .par_iter()
        .map_init(PhpAnalyzer::new, |analyzer, path| {
            let result = match analyzer {
                Ok(analyzer) => fix_file(&fixer, analyzer, path, dry_run),
                Err(e) => Err(anyhow::anyhow!("{e:#}")),
            };
            (path.clone(), result)
        })
        .collect();

    let mut report = FixReport {
        dry_run,
        files_scanned: files.len(),
        ..FixReport::default()
    };
    for (path, result) in results {
        match result {
            Ok(Some(file_report)) => report.files.push(file_report),
            Ok(None) => {}
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                report.failures.push(FileFailure {
                    path,
                    message: format!("{e:#}"),
                });
            }
        }
    }

    Ok(report)
}

fn fix_file(
    fixer: &DocBlockFixer,
    analyzer: &mut PhpAnalyzer,
    path: &Path,
    dry_run: bool,
) -> Result<Option<FileReport>> {
    let _span = debug_span!("fix_file", path = %path.display()).entered();

    let source = io::read_file(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let outcome = fixer.fix_source(analyzer, &source, path)?;
    if !outcome.is_changed() {
        return Ok(None);
    }

    if !dry_run {
        io::write_file(path, &outcome.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(Some(FileReport {
        path: path.to_path_buf(),
        removals: outcome.removals,
        removed_docblocks: outcome.removed_docblocks,
    }))
}
