//! Heuristics deciding whether a free-text description says more than the
//! type (or parameter name) it is attached to.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Suffix ignored when comparing a type name against its description.
const INTERFACE_SUFFIX: &str = "Interface";

/// Marker for collection types such as `Foo[]`.
const COLLECTION_MARKER: &str = "[]";

const LOWERCASE_INTERFACE_SUFFIX: &str = "interface";

const INSTANCE_SUFFIX: &str = " instance";

/// Leading article and optional global-namespace backslash.
static ARTICLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:a|an|the) \\?(?P<rest>.*)$").unwrap());

/// Descriptions within this edit distance of the type or name are restatements.
const RESTATEMENT_DISTANCE: usize = 2;

/// Strategy deciding whether a description is worth keeping.
pub trait DescriptionHeuristic: Send + Sync {
    /// `type_name` is the documented type; `name` is the parameter name when
    /// judging a `@param` entry and `None` for `@return`.
    fn is_useful(&self, description: &str, type_name: Option<&str>, name: Option<&str>) -> bool;
}

/// Flags descriptions that only restate the type ("A Foo instance", "Fo0")
/// or the parameter name.
#[derive(Clone, Copy, Debug, Default)]
pub struct RestatementHeuristic;

impl DescriptionHeuristic for RestatementHeuristic {
    fn is_useful(&self, description: &str, type_name: Option<&str>, name: Option<&str>) -> bool {
        let Some(type_name) = type_name else {
            return false;
        };
        if description.is_empty() {
            return false;
        }

        // FooInterface reads as Foo in prose
        let type_name = type_name
            .strip_suffix(INTERFACE_SUFFIX)
            .unwrap_or(type_name);

        if type_name.ends_with(COLLECTION_MARKER) {
            return true;
        }

        if is_dummy_description(description, type_name) {
            trace!(description, type_name, "description restates the type");
            return false;
        }

        if let Some(name) = name {
            if levenshtein_distance(name, description) < RESTATEMENT_DISTANCE {
                trace!(description, name, "description restates the parameter name");
                return false;
            }
        }

        true
    }
}

/// Convenience wrapper around [`RestatementHeuristic`].
pub fn is_description_useful(description: &str, type_name: Option<&str>, name: Option<&str>) -> bool {
    RestatementHeuristic.is_useful(description, type_name, name)
}

fn is_dummy_description(description: &str, type_name: &str) -> bool {
    matches_article_pattern(description, type_name)
        || levenshtein_distance(type_name, description) < RESTATEMENT_DISTANCE
}

/// `A Foo`, `an \Foo`, `The FooInterface instance`, ...
///
/// The article prefix is matched once; the rest is compared against the type
/// without building a regex per type name.
fn matches_article_pattern(description: &str, type_name: &str) -> bool {
    let Some(captures) = ARTICLE_PREFIX.captures(description) else {
        return false;
    };

    let rest = captures["rest"].to_lowercase();
    let type_name = type_name.to_lowercase();
    let rest = rest.strip_suffix(INSTANCE_SUFFIX).unwrap_or(&rest);

    rest == type_name
        || rest.strip_suffix(LOWERCASE_INTERFACE_SUFFIX) == Some(type_name.as_str())
}

/// Edit distance counting single-character insertions, deletions and
/// substitutions. Works on `char`s, so multi-byte text counts per character.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let source: Vec<char> = a.chars().collect();
    let target: Vec<char> = b.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (row, source_char) in source.iter().enumerate() {
        current[0] = row + 1;
        for (col, target_char) in target.iter().enumerate() {
            let substitution = previous[col] + usize::from(source_char != target_char);
            current[col + 1] = substitution
                .min(previous[col + 1] + 1)
                .min(current[col] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}
