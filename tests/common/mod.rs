// Test utility module for docprune integration tests
#![allow(dead_code)]

use docprune::{DocBlock, DocBlockFixer, FixOutcome, PhpAnalyzer};
use std::path::{Path, PathBuf};

/// Line separating a fixture's input from its expected output.
pub const FIXTURE_SEPARATOR: &str = "\n-----\n";

/// Input and expected output of one `.php.inc` fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub input: String,
    pub expected: String,
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_fixture(path: &Path) -> Fixture {
    let content = std::fs::read_to_string(path).expect("Failed to read fixture");
    let (input, expected) = content
        .split_once(FIXTURE_SEPARATOR)
        .unwrap_or_else(|| panic!("{} has no ----- separator", path.display()));

    Fixture {
        name: path.file_name().unwrap().to_string_lossy().into_owned(),
        input: format!("{input}\n"),
        expected: expected.to_string(),
    }
}

pub fn fix_source(source: &str) -> FixOutcome {
    fix_source_with(&DocBlockFixer::default(), source)
}

pub fn fix_source_with(fixer: &DocBlockFixer, source: &str) -> FixOutcome {
    let mut analyzer = PhpAnalyzer::new().expect("Failed to create PHP parser");
    fixer
        .fix_source(&mut analyzer, source, Path::new("test.php"))
        .expect("Failed to parse PHP source")
}

pub fn docblock(text: &str) -> DocBlock {
    DocBlock::parse(text.trim()).expect("Not a doc block")
}

// Helper to create temporary PHP files
pub fn create_php_project(files: &[(&str, &str)]) -> tempfile::TempDir {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
    }
    temp_dir
}
