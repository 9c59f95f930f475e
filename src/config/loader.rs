use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::DocpruneConfig;
use crate::core::{Error, Result};

/// Name of the configuration file searched for in the directory hierarchy
pub const CONFIG_FILE_NAME: &str = ".docprune.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DocpruneConfig> {
    let config = toml::from_str::<DocpruneConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    if let Some(aliases) = &config.aliases {
        if let Some((alias, _)) = aliases
            .iter()
            .find(|(alias, canonical)| alias.trim().is_empty() || canonical.trim().is_empty())
        {
            return Err(Error::configuration(format!(
                "Alias entries must not be empty (found {alias:?})"
            )));
        }
    }

    for pattern in config.ignore_patterns() {
        glob::Pattern::new(&pattern)?;
    }

    Ok(config)
}

/// Load an explicitly requested configuration file; every failure is an error.
pub fn load_config_from(path: &Path) -> Result<DocpruneConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system_io("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DocpruneConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file, falling back to defaults.
pub fn discover_config(start: PathBuf) -> DocpruneConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DocpruneConfig::default()
        })
}

pub fn load_config() -> DocpruneConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DocpruneConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(
            r#"
            [fixer]
            remove_empty_docblocks = false

            [aliases]
            double = "float"

            [ignore]
            patterns = ["vendor/**"]
            "#,
        )
        .unwrap();

        assert!(!config.fixer().remove_empty_docblocks);
        assert_eq!(config.ignore_patterns(), vec!["vendor/**".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = parse_and_validate_config("[fixer\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_empty_alias_is_rejected() {
        let err = parse_and_validate_config("[aliases]\nboolean = \"\"\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_invalid_ignore_pattern_is_rejected() {
        let err = parse_and_validate_config("[ignore]\npatterns = [\"a/***b[\"]\n").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_discover_config_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src").join("Domain");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[fixer]\nremove_empty_docblocks = false\n",
        )
        .unwrap();

        let config = discover_config(nested);
        assert!(!config.fixer().remove_empty_docblocks);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config_from(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::FileSystem { .. })));
    }
}
