//! Rewrites the doc comments of every callable in a PHP source file.

use crate::analyzers::{Callable, DocComment, PhpAnalyzer};
use crate::config::DocpruneConfig;
use crate::docblock::{DocBlock, RemovedTag};
use crate::redundancy::{RedundancyCoordinator, TypeEquivalence};
use anyhow::Result;
use serde::Serialize;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

/// One annotation removed from a callable's doc block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub callable: String,
    pub line: usize,
    #[serde(flatten)]
    pub tag: RemovedTag,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixOutcome {
    pub content: String,
    pub removals: Vec<Removal>,
    /// Doc blocks dropped entirely because nothing was left in them.
    pub removed_docblocks: usize,
}

impl FixOutcome {
    pub fn is_changed(&self) -> bool {
        !self.removals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

#[derive(Clone, Debug)]
pub struct DocBlockFixer {
    coordinator: RedundancyCoordinator,
    remove_empty_docblocks: bool,
}

impl Default for DocBlockFixer {
    fn default() -> Self {
        Self::new(TypeEquivalence::default(), true)
    }
}

impl DocBlockFixer {
    pub fn new(equivalence: TypeEquivalence, remove_empty_docblocks: bool) -> Self {
        Self {
            coordinator: RedundancyCoordinator::new(equivalence),
            remove_empty_docblocks,
        }
    }

    pub fn from_config(config: &DocpruneConfig) -> Self {
        Self::new(
            config.type_equivalence(),
            config.fixer().remove_empty_docblocks,
        )
    }

    /// Parses `source` and removes redundant annotations from every doc block.
    ///
    /// The returned content equals `source` byte for byte when nothing was removed.
    pub fn fix_source(
        &self,
        analyzer: &mut PhpAnalyzer,
        source: &str,
        path: &Path,
    ) -> Result<FixOutcome> {
        let callables = analyzer.extract_callables(source, path)?;
        Ok(self.fix_callables(source, &callables))
    }

    pub fn fix_callables(&self, source: &str, callables: &[Callable]) -> FixOutcome {
        let mut outcome = FixOutcome::default();
        let mut edits = Vec::new();

        for callable in callables {
            let Some(comment) = &callable.doc_comment else {
                continue;
            };
            let Some(mut block) = DocBlock::parse(&comment.text) else {
                trace!(callable = %callable.name, "doc comment not recognised");
                continue;
            };

            self.coordinator.process(&callable.signature, &mut block);
            if !block.is_modified() {
                continue;
            }

            outcome
                .removals
                .extend(block.removed_tags().iter().map(|tag| Removal {
                    callable: callable.name.clone(),
                    line: callable.line,
                    tag: tag.clone(),
                }));

            if self.remove_empty_docblocks && block.is_empty() {
                debug!(callable = %callable.name, "dropping empty doc block");
                outcome.removed_docblocks += 1;
                edits.push(drop_comment(comment));
            } else {
                edits.push(Edit {
                    range: comment.range.clone(),
                    replacement: block.render(),
                });
            }
        }

        outcome.content = apply_edits(source, edits);
        outcome
    }
}

/// Removes the comment and the whitespace up to the callable, so the
/// callable takes over the comment's indentation.
fn drop_comment(comment: &DocComment) -> Edit {
    Edit {
        range: comment.range.start..comment.callable_start,
        replacement: String::new(),
    }
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    let mut content = source.to_string();
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    for edit in edits {
        content.replace_range(edit.range, &edit.replacement);
    }
    content
}
