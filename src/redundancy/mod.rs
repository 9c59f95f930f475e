//! Redundant type annotation detection.
//!
//! Given a callable's declared signature and its documentation block, decides
//! which `@return` / `@param` entries only repeat what the signature already
//! says and removes them through the [`DocumentationView`](crate::core::DocumentationView).

pub mod coordinator;
pub mod description;
pub mod type_equivalence;

pub use coordinator::{ParamStep, RedundancyCoordinator};
pub use description::{
    is_description_useful, levenshtein_distance, DescriptionHeuristic, RestatementHeuristic,
};
pub use type_equivalence::{AliasTable, Equivalence, TypeEquivalence};
