//! Parsing of individual `@return` / `@param` tag bodies.

use serde::Serialize;
use std::fmt;

/// Tag names the redundancy pass works on.
pub const RETURN_TAG: &str = "return";
pub const PARAM_TAG: &str = "param";

/// Parsed body of a `@return` or `@param` tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagBody {
    pub type_text: Option<String>,
    /// Parameter name without `$`, `&` or `...`; always `None` for `@return`.
    pub variable: Option<String>,
    pub description: Option<String>,
}

/// A tag entry removed from a doc block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "name", rename_all = "lowercase")]
pub enum RemovedTag {
    Return,
    Param(String),
}

impl fmt::Display for RemovedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return => write!(f, "@{RETURN_TAG}"),
            Self::Param(name) => write!(f, "@{PARAM_TAG} ${name}"),
        }
    }
}

/// `int|string Some text` -> type `int|string`, description `Some text`.
pub fn parse_return_body(body: &str) -> TagBody {
    let body = body.trim();
    if body.is_empty() {
        return TagBody::default();
    }

    let (type_text, rest) = split_type_token(body);
    TagBody {
        type_text: non_empty(type_text),
        variable: None,
        description: non_empty(rest),
    }
}

/// `array<int, string> $map Some text`, `$map Some text`, `Foo ...$items`.
pub fn parse_param_body(body: &str) -> TagBody {
    let body = body.trim();
    if body.is_empty() {
        return TagBody::default();
    }

    if is_variable_token(body) {
        let (variable, rest) = split_word(body);
        return TagBody {
            type_text: None,
            variable: variable_name(variable),
            description: non_empty(rest),
        };
    }

    let (type_text, rest) = split_type_token(body);
    let rest = rest.trim_start();
    if !is_variable_token(rest) {
        return TagBody {
            type_text: non_empty(type_text),
            variable: None,
            description: non_empty(rest),
        };
    }

    let (variable, description) = split_word(rest);
    TagBody {
        type_text: non_empty(type_text),
        variable: variable_name(variable),
        description: non_empty(description),
    }
}

/// Splits off the leading type token. Whitespace only ends the token at
/// bracket depth zero, so `array<int, string>` stays whole.
pub fn split_type_token(text: &str) -> (&str, &str) {
    let mut depth: usize = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                return (&text[..index], text[index..].trim_start());
            }
            _ => {}
        }
    }

    (text, "")
}

fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], text[index..].trim_start()),
        None => (text, ""),
    }
}

fn is_variable_token(text: &str) -> bool {
    let text = text.trim_start_matches('&');
    let text = text.strip_prefix("...").unwrap_or(text);
    text.starts_with('$')
}

fn variable_name(token: &str) -> Option<String> {
    let token = token.trim_start_matches('&');
    let token = token.strip_prefix("...").unwrap_or(token);
    let name = token.strip_prefix('$')?.trim_end_matches(',');
    non_empty(name)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
