//! Decides whether a documented type and a declared type denote the same type.
//!
//! Rules are evaluated in order and the first applicable one decides:
//!
//! 1. Either side absent: not redundant.
//! 2. Identical raw text.
//! 3. Both sides are unions: equal once each side's alternatives are sorted.
//!    Unequal unions are *not* checked against the later rules.
//! 4. The declared type is a qualified name ending in `\` + documented name.
//! 5. The documented type is a legacy alias of the declared type.

use crate::core::TypeExpression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which rule established the equivalence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Equivalence {
    Exact,
    Union,
    NamespaceSuffix,
    Alias,
}

/// Legacy documented spellings mapped to the declared type they stand for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs([("boolean", "bool"), ("integer", "int")])
    }
}

impl AliasTable {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into()))
                .collect(),
        }
    }

    /// Adds or replaces entries, later ones winning.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.extend(
            pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into())),
        );
    }

    /// True when `documented` is a registered alias for exactly `declared`.
    pub fn matches(&self, documented: &str, declared: &str) -> bool {
        self.entries
            .get(documented)
            .is_some_and(|canonical| canonical == declared)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TypeEquivalence {
    aliases: AliasTable,
}

impl TypeEquivalence {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn types_are_redundant(
        &self,
        declared: Option<&TypeExpression>,
        documented: Option<&TypeExpression>,
    ) -> bool {
        self.classify(declared, documented).is_some()
    }

    /// Returns the rule that makes the pair equivalent, if any.
    pub fn classify(
        &self,
        declared: Option<&TypeExpression>,
        documented: Option<&TypeExpression>,
    ) -> Option<Equivalence> {
        let (declared, documented) = declared.zip(documented)?;

        if is_exact_match(declared, documented) {
            return Some(Equivalence::Exact);
        }

        if declared.is_union() && documented.is_union() {
            return is_union_match(declared, documented).then_some(Equivalence::Union);
        }

        if is_namespace_suffix_match(declared, documented) {
            return Some(Equivalence::NamespaceSuffix);
        }

        if self.is_alias_match(declared, documented) {
            return Some(Equivalence::Alias);
        }

        None
    }

    pub fn is_alias_match(&self, declared: &TypeExpression, documented: &TypeExpression) -> bool {
        self.aliases
            .matches(&documented.raw_text, &declared.raw_text)
    }
}

pub fn is_exact_match(declared: &TypeExpression, documented: &TypeExpression) -> bool {
    declared.raw_text == documented.raw_text
}

/// Order-independent comparison of two unions.
pub fn is_union_match(declared: &TypeExpression, documented: &TypeExpression) -> bool {
    declared.sorted_alternatives() == documented.sorted_alternatives()
}

/// `App\Foo` declared, `Foo` documented.
pub fn is_namespace_suffix_match(declared: &TypeExpression, documented: &TypeExpression) -> bool {
    declared.ends_with_namespaced(&documented.raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(raw: &str) -> Option<TypeExpression> {
        Some(TypeExpression::parse(raw))
    }

    fn redundant(declared: &str, documented: &str) -> bool {
        TypeEquivalence::default().types_are_redundant(ty(declared).as_ref(), ty(documented).as_ref())
    }

    #[test]
    fn test_absent_side_is_never_redundant() {
        let engine = TypeEquivalence::default();
        assert!(!engine.types_are_redundant(None, ty("Foo").as_ref()));
        assert!(!engine.types_are_redundant(ty("Foo").as_ref(), None));
        assert!(!engine.types_are_redundant(None, None));
    }

    #[test]
    fn test_exact_match() {
        assert!(redundant("int", "int"));
        assert!(redundant("?Foo", "?Foo"));
        assert!(!redundant("int", "string"));
    }

    #[test]
    fn test_union_order_independent() {
        assert!(redundant("string|int", "int|string"));
        assert!(redundant("A|B|null", "null|B|A"));
    }

    #[test]
    fn test_union_with_different_members() {
        assert!(!redundant("A|B", "A|C"));
        assert!(!redundant("A|B", "A|B|C"));
    }

    #[test]
    fn test_unequal_unions_skip_namespace_rule() {
        let engine = TypeEquivalence::default();
        let declared = ty("Foo\\A|B");
        let documented = ty("A|B");
        assert_eq!(engine.classify(declared.as_ref(), documented.as_ref()), None);
    }

    #[test]
    fn test_namespace_suffix_match() {
        assert!(redundant("App\\Foo", "Foo"));
        assert!(redundant("\\App\\Entity\\User", "User"));
        assert!(!redundant("App\\FooBar", "Bar"));
        assert!(!redundant("Foo", "App\\Foo"));
    }

    #[test]
    fn test_legacy_aliases() {
        assert!(redundant("bool", "boolean"));
        assert!(redundant("int", "integer"));
        assert!(!redundant("boolean", "bool"));
        assert!(!redundant("int", "boolean"));
    }

    #[test]
    fn test_custom_alias_table() {
        let engine = TypeEquivalence::new(AliasTable::from_pairs([("double", "float")]));

        assert_eq!(
            engine.classify(ty("float").as_ref(), ty("double").as_ref()),
            Some(Equivalence::Alias)
        );
        assert!(!engine.types_are_redundant(ty("bool").as_ref(), ty("boolean").as_ref()));
    }

    #[test]
    fn test_classify_reports_rule() {
        let engine = TypeEquivalence::default();
        let cases = [
            ("int", "int", Some(Equivalence::Exact)),
            ("int|null", "null|int", Some(Equivalence::Union)),
            ("App\\Foo", "Foo", Some(Equivalence::NamespaceSuffix)),
            ("bool", "boolean", Some(Equivalence::Alias)),
            ("bool", "string", None),
        ];

        for (declared, documented, expected) in cases {
            assert_eq!(
                engine.classify(ty(declared).as_ref(), ty(documented).as_ref()),
                expected,
                "{declared} vs {documented}"
            );
        }
    }
}
