// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod docblock;
pub mod fixer;
pub mod io;
pub mod redundancy;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    AnnotationField, Decision, DocumentationView, Error, ParameterSignature, SignatureView,
    TypeExpression,
};

pub use crate::redundancy::{
    is_description_useful, AliasTable, DescriptionHeuristic, Equivalence, RedundancyCoordinator,
    RestatementHeuristic, TypeEquivalence,
};

pub use crate::analyzers::{Callable, FunctionSignature, PhpAnalyzer};
pub use crate::config::DocpruneConfig;
pub use crate::docblock::{DocBlock, RemovedTag};
pub use crate::fixer::{DocBlockFixer, FixOutcome, Removal};
pub use crate::report::{FileFailure, FileReport, FixReport};

/// Removes redundant annotations from one callable's documentation using the
/// default alias table and description heuristic.
pub fn process<S, D>(signature: &S, doc: &mut D)
where
    S: SignatureView + ?Sized,
    D: DocumentationView + ?Sized,
{
    RedundancyCoordinator::new(TypeEquivalence::default()).process(signature, doc);
}
