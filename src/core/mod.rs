pub mod errors;
pub mod traits;

pub use errors::{Error, Result};
pub use traits::{DocumentationView, SignatureView};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the alternatives of a union type (`int|string`).
pub const UNION_SEPARATOR: char = '|';

/// Separator between namespace segments (`App\Entity\User`).
pub const NAMESPACE_SEPARATOR: char = '\\';

/// One or more types written at a single declaration site.
///
/// `alternatives` holds the union members in source order. It is never empty
/// when `raw_text` is non-empty; a non-union type is a single alternative.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeExpression {
    pub raw_text: String,
    pub alternatives: Vec<String>,
}

impl TypeExpression {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw_text = raw.into();
        let alternatives = split_alternatives(&raw_text);
        Self {
            raw_text,
            alternatives,
        }
    }

    /// Builds an expression from an optional raw string, keeping absence.
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(Self::parse)
    }

    pub fn is_union(&self) -> bool {
        self.alternatives.len() > 1
    }

    /// Alternatives sorted lexicographically, for order-independent comparison.
    pub fn sorted_alternatives(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.alternatives.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// True when this is a qualified name whose trailing segment(s) equal `short`,
    /// i.e. `raw_text` ends with `\` followed by `short`.
    pub fn ends_with_namespaced(&self, short: &str) -> bool {
        if self.raw_text.is_empty() {
            return false;
        }
        self.raw_text
            .strip_suffix(short)
            .is_some_and(|prefix| prefix.ends_with(NAMESPACE_SEPARATOR))
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

// Unbalanced or otherwise odd input still yields at least one alternative,
// so malformed unions degrade to a plain comparison.
fn split_alternatives(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut alternatives = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for ch in raw.chars() {
        match ch {
            '<' | '(' | '{' | '[' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | '}' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            UNION_SEPARATOR if depth == 0 => {
                alternatives.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    alternatives.push(current);

    alternatives
}

/// One declared parameter of the callable under analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSignature {
    pub name: String,
    pub declared_type: Option<TypeExpression>,
}

impl ParameterSignature {
    pub fn new(name: impl Into<String>, declared_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            declared_type: TypeExpression::from_optional(declared_type),
        }
    }

    pub fn declared_raw(&self) -> Option<&str> {
        self.declared_type.as_ref().map(|t| t.raw_text.as_str())
    }
}

/// One documented type entry: the `@return` tag or a single `@param` tag.
///
/// `description` distinguishes an empty string from absence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationField {
    pub documented_type: Option<TypeExpression>,
    pub description: Option<String>,
}

impl AnnotationField {
    pub fn new(documented_type: Option<&str>, description: Option<&str>) -> Self {
        Self {
            documented_type: TypeExpression::from_optional(documented_type),
            description: description.map(str::to_string),
        }
    }

    pub fn documented_raw(&self) -> Option<&str> {
        self.documented_type.as_ref().map(|t| t.raw_text.as_str())
    }

    /// Present and non-empty.
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Outcome for a single annotation field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Remove,
    Keep,
}

impl Decision {
    pub fn remove_unless(keep: bool) -> Self {
        if keep {
            Self::Keep
        } else {
            Self::Remove
        }
    }
}
