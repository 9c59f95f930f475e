//! Core trait definitions for the boundary between the redundancy core
//! and whatever front end produced the callable.
//!
//! The core borrows a `SignatureView` read-only and a `DocumentationView`
//! mutably for one analysis call; it never keeps either beyond that call.

use super::{AnnotationField, ParameterSignature};

/// Read-only view of a callable's declared types.
pub trait SignatureView {
    /// Declared return type, if the signature has one.
    fn return_type(&self) -> Option<&str>;

    /// Declared parameters in declaration order.
    ///
    /// Built fresh for each analysis pass and discarded afterwards.
    fn parameters(&self) -> Vec<ParameterSignature>;
}

/// View of the documentation block attached to a callable.
pub trait DocumentationView {
    /// The `@return` entry, or `None` when the block has none.
    fn return_field(&self) -> Option<AnnotationField>;

    /// The `@param` entry documenting `name`, or `None` when there is none.
    fn param_field(&self, name: &str) -> Option<AnnotationField>;

    /// Removes the `@return` entry. No-op when already absent.
    fn remove_return_type(&mut self);

    /// Removes the `@param` entry for `name`. No-op when already absent.
    fn remove_param_type(&mut self, name: &str);
}
