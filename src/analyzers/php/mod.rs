mod signature;

pub use signature::{normalize_type, DeclaredParameter, FunctionSignature};

use crate::core::Error;
use anyhow::{Context, Result};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, debug_span};
use tree_sitter::{Node, Parser, Tree};

const CLASS_LIKE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "trait_declaration",
    "enum_declaration",
];

const PARAMETER_KINDS: &[&str] = &[
    "simple_parameter",
    "variadic_parameter",
    "property_promotion_parameter",
];

/// A function or method together with the doc comment attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callable {
    /// `Class::method` for methods, the bare name for functions.
    pub name: String,
    /// 1-based line of the declaration.
    pub line: usize,
    pub signature: FunctionSignature,
    pub doc_comment: Option<DocComment>,
}

/// Location of a `/** ... */` comment directly preceding a callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
    pub range: Range<usize>,
    pub text: String,
    /// Byte offset where the callable itself starts.
    pub callable_start: usize,
}

pub struct PhpAnalyzer {
    parser: Parser,
}

impl PhpAnalyzer {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .context("Failed to set PHP language")?;
        Ok(Self { parser })
    }

    fn parse_tree(&mut self, content: &str) -> Result<Tree> {
        self.parser
            .parse(content, None)
            .context("Failed to parse PHP code")
    }

    /// Every function and method in `source`, in source order.
    ///
    /// Sources with syntax errors are rejected so they are never rewritten.
    pub fn extract_callables(&mut self, source: &str, path: &Path) -> Result<Vec<Callable>> {
        let _span = debug_span!("extract_callables", path = %path.display()).entered();

        let tree = self.parse_tree(source)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(path, describe_first_error(root)).into());
        }

        let mut callables = Vec::new();
        visit_node(root, source, None, &mut callables);
        debug!(count = callables.len(), "found callables");

        Ok(callables)
    }
}

fn visit_node(node: Node, source: &str, scope: Option<&str>, callables: &mut Vec<Callable>) {
    match node.kind() {
        kind if CLASS_LIKE_KINDS.contains(&kind) => {
            let name = field_text(node, "name", source).unwrap_or("<anonymous>");
            visit_children(node, source, Some(name), callables);
            return;
        }
        "anonymous_class" => {
            visit_children(node, source, Some("class@anonymous"), callables);
            return;
        }
        "method_declaration" => {
            callables.push(analyze_callable(node, source, scope));
        }
        "function_definition" => {
            callables.push(analyze_callable(node, source, None));
        }
        _ => {}
    }

    visit_children(node, source, scope, callables);
}

fn visit_children(node: Node, source: &str, scope: Option<&str>, callables: &mut Vec<Callable>) {
    for child in node.children(&mut node.walk()) {
        visit_node(child, source, scope, callables);
    }
}

fn analyze_callable(node: Node, source: &str, scope: Option<&str>) -> Callable {
    let short_name = field_text(node, "name", source).unwrap_or("<anonymous>");
    let name = match scope {
        Some(scope) => format!("{scope}::{short_name}"),
        None => short_name.to_string(),
    };

    let return_type = field_text(node, "return_type", source).and_then(normalize_type);
    let mut signature = FunctionSignature {
        return_type,
        parameters: Vec::new(),
    };
    if let Some(parameters) = node.child_by_field_name("parameters") {
        signature.parameters = extract_parameters(parameters, source);
    }

    Callable {
        name,
        line: node.start_position().row + 1,
        signature,
        doc_comment: find_doc_comment(node, source),
    }
}

fn extract_parameters(parameters: Node, source: &str) -> Vec<DeclaredParameter> {
    parameters
        .named_children(&mut parameters.walk())
        .filter(|child| PARAMETER_KINDS.contains(&child.kind()))
        .filter_map(|param| {
            let name = parameter_name(param, source)?;
            let type_hint = field_text(param, "type", source).and_then(normalize_type);
            Some(DeclaredParameter { name, type_hint })
        })
        .collect()
}

fn parameter_name(param: Node, source: &str) -> Option<String> {
    let variable = param
        .child_by_field_name("name")
        .or_else(|| find_descendant(param, "variable_name"))?;
    let text = variable.utf8_text(source.as_bytes()).ok()?;
    let name = text.trim_start_matches(['&', '$']);
    (!name.is_empty()).then(|| name.to_string())
}

/// The nearest preceding `/**` comment, separated only by whitespace.
fn find_doc_comment(node: Node, source: &str) -> Option<DocComment> {
    let comment = node.prev_sibling()?;
    if comment.kind() != "comment" {
        return None;
    }

    let text = comment.utf8_text(source.as_bytes()).ok()?;
    if !text.starts_with("/**") {
        return None;
    }

    let gap = source.get(comment.end_byte()..node.start_byte())?;
    if !gap.trim().is_empty() {
        return None;
    }

    Some(DocComment {
        range: comment.start_byte()..comment.end_byte(),
        text: text.to_string(),
        callable_start: node.start_byte(),
    })
}

fn field_text<'a>(node: Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)?
        .utf8_text(source.as_bytes())
        .ok()
}

fn find_descendant<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| find_descendant(child, kind))
}

fn describe_first_error(root: Node) -> String {
    match find_error(root) {
        Some(node) => format!(
            "syntax error at line {}, column {}",
            node.start_position().row + 1,
            node.start_position().column + 1
        ),
        None => "syntax error".to_string(),
    }
}

fn find_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(find_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    fn extract(source: &str) -> Vec<Callable> {
        PhpAnalyzer::new()
            .unwrap()
            .extract_callables(source, &PathBuf::from("test.php"))
            .unwrap()
    }

    #[test]
    fn test_extracts_method_signature_and_doc() {
        let callables = extract(indoc! {r#"
            <?php
            namespace App;

            final class Counter
            {
                /**
                 * @param int $step
                 * @return int
                 */
                public function increment(int $step, ?Logger $logger = null): int
                {
                    return $step;
                }
            }
        "#});

        assert_eq!(callables.len(), 1);
        let callable = &callables[0];
        assert_eq!(callable.name, "Counter::increment");
        assert_eq!(callable.signature.return_type.as_deref(), Some("int"));
        assert_eq!(
            callable.signature.parameters,
            vec![
                DeclaredParameter {
                    name: "step".into(),
                    type_hint: Some("int".into())
                },
                DeclaredParameter {
                    name: "logger".into(),
                    type_hint: Some("?Logger".into())
                },
            ]
        );
        let doc = callable.doc_comment.as_ref().expect("doc comment");
        assert!(doc.text.starts_with("/**"));
        assert!(doc.text.ends_with("*/"));
    }

    #[test]
    fn test_functions_and_untyped_parameters() {
        let callables = extract(indoc! {r#"
            <?php
            function merge($left, array ...$rest): string|int
            {
                return 1;
            }
        "#});

        assert_eq!(callables.len(), 1);
        let signature = &callables[0].signature;
        assert_eq!(callables[0].name, "merge");
        assert_eq!(signature.return_type.as_deref(), Some("string|int"));
        assert_eq!(signature.parameters[0].type_hint, None);
        assert_eq!(signature.parameters[1].name, "rest");
        assert_eq!(signature.parameters[1].type_hint.as_deref(), Some("array"));
        assert!(callables[0].doc_comment.is_none());
    }

    #[test]
    fn test_plain_comment_is_not_a_doc_comment() {
        let callables = extract(indoc! {r#"
            <?php
            interface Repository
            {
                /* @return int */
                public function count(): int;
            }
        "#});

        assert_eq!(callables[0].name, "Repository::count");
        assert!(callables[0].doc_comment.is_none());
    }

    #[test]
    fn test_promoted_constructor_parameters() {
        let callables = extract(indoc! {r#"
            <?php
            class Point
            {
                public function __construct(private int $x, private int $y) {}
            }
        "#});

        let names: Vec<_> = callables[0]
            .signature
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let result = PhpAnalyzer::new()
            .unwrap()
            .extract_callables("<?php class { function (", &PathBuf::from("broken.php"));
        assert!(result.is_err());
    }
}
