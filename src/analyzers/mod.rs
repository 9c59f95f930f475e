//! Language front ends that turn source text into callables with their
//! declared signatures and attached doc comments.

pub mod php;

pub use php::{Callable, DocComment, FunctionSignature, PhpAnalyzer};
