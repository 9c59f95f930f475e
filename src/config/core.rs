use crate::redundancy::{AliasTable, TypeEquivalence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure for docprune
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocpruneConfig {
    /// Doc block rewriting behavior
    #[serde(default)]
    pub fixer: Option<FixerConfig>,

    /// Extra legacy type aliases, `documented = "declared"`
    #[serde(default)]
    pub aliases: Option<BTreeMap<String, String>>,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: Option<IgnoreConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixerConfig {
    /// Drop doc blocks left without any content
    #[serde(default = "default_remove_empty_docblocks")]
    pub remove_empty_docblocks: bool,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            remove_empty_docblocks: default_remove_empty_docblocks(),
        }
    }
}

fn default_remove_empty_docblocks() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IgnoreConfig {
    pub patterns: Vec<String>,
}

impl DocpruneConfig {
    pub fn fixer(&self) -> FixerConfig {
        self.fixer.clone().unwrap_or_default()
    }

    pub fn ignore_patterns(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .map(|ignore| ignore.patterns.clone())
            .unwrap_or_default()
    }

    /// Built-in aliases with the configured ones merged over them.
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::default();
        if let Some(aliases) = &self.aliases {
            table.extend(aliases.clone());
        }
        table
    }

    pub fn type_equivalence(&self) -> TypeEquivalence {
        TypeEquivalence::new(self.alias_table())
    }
}
