//! PHPDoc block model.
//!
//! A [`DocBlock`] is parsed from the raw `/** ... */` comment text, exposes its
//! `@return` and `@param` entries through [`DocumentationView`], and renders
//! itself back to text once entries have been removed. Lines that are not
//! touched keep their original decoration and spacing.

pub mod tags;

pub use tags::{RemovedTag, TagBody, PARAM_TAG, RETURN_TAG};

use crate::core::{AnnotationField, DocumentationView};
use std::ops::Range;

const OPENER: &str = "/**";
const CLOSER: &str = "*/";

#[derive(Clone, Debug, PartialEq, Eq)]
struct DocLine {
    /// Indentation, `/**` or `*`, and the single space after it.
    lead: String,
    content: String,
    /// Whitespace and `*/` ending the last line.
    close: Option<String>,
    removed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagKind {
    Return,
    Param,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Tag {
    kind: TagKind,
    lines: Range<usize>,
    body: TagBody,
    removed: bool,
}

impl Tag {
    /// A `@param` tag without text has an empty description rather than none.
    fn field(&self) -> AnnotationField {
        let description = match (self.kind, self.body.description.as_deref()) {
            (TagKind::Param, None) => Some(""),
            (_, description) => description,
        };
        AnnotationField::new(self.body.type_text.as_deref(), description)
    }

    fn documents_param(&self, name: &str) -> bool {
        self.kind == TagKind::Param && self.body.variable.as_deref() == Some(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocBlock {
    source: String,
    line_ending: &'static str,
    lines: Vec<DocLine>,
    tags: Vec<Tag>,
    removed: Vec<RemovedTag>,
}

impl DocBlock {
    /// Parses a `/** ... */` comment. Returns `None` for any other comment.
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() < OPENER.len() + CLOSER.len()
            || !text.starts_with(OPENER)
            || !text.ends_with(CLOSER)
        {
            return None;
        }

        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let raw_lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let last = raw_lines.len() - 1;

        let lines = raw_lines
            .iter()
            .enumerate()
            .map(|(index, raw)| split_line(raw, index == 0, index == last))
            .collect::<Option<Vec<_>>>()?;
        let tags = collect_tags(&lines);

        Some(Self {
            source: text.to_string(),
            line_ending,
            lines,
            tags,
            removed: Vec::new(),
        })
    }

    /// Entries removed so far, in removal order.
    pub fn removed_tags(&self) -> &[RemovedTag] {
        &self.removed
    }

    pub fn is_modified(&self) -> bool {
        !self.removed.is_empty()
    }

    /// True when no line carries any text besides the comment delimiters.
    pub fn is_empty(&self) -> bool {
        self.lines
            .iter()
            .filter(|line| !line.removed)
            .all(|line| line.content.trim().is_empty())
    }

    /// Renders the block. Returns the original text untouched when nothing
    /// was removed.
    pub fn render(&self) -> String {
        if !self.is_modified() {
            return self.source.clone();
        }

        let last = self.lines.len() - 1;
        if last == 0 {
            let line = &self.lines[0];
            return if line.removed {
                format!("{OPENER} {CLOSER}")
            } else {
                render_line(line)
            };
        }

        let mut middle: Vec<(String, bool)> = Vec::new();
        for line in &self.lines[1..last] {
            if line.removed {
                continue;
            }
            let blank = line.content.trim().is_empty();
            // collapse blank runs left behind by removed entries
            if blank && middle.last().is_some_and(|(_, prev_blank)| *prev_blank) {
                continue;
            }
            middle.push((render_line(line), blank));
        }

        let first = &self.lines[0];
        let closing = &self.lines[last];

        if first.removed || first.content.trim().is_empty() {
            let leading = middle.iter().take_while(|(_, blank)| *blank).count();
            middle.drain(..leading);
        }
        if closing.removed || closing.content.trim().is_empty() {
            while middle.last().is_some_and(|(_, blank)| *blank) {
                middle.pop();
            }
        }

        let mut rendered = Vec::with_capacity(middle.len() + 2);
        rendered.push(if first.removed {
            OPENER.to_string()
        } else {
            render_line(first)
        });
        rendered.extend(middle.into_iter().map(|(text, _)| text));
        rendered.push(if closing.removed {
            format!("{}{CLOSER}", leading_whitespace(&closing.lead))
        } else {
            render_line(closing)
        });

        rendered.join(self.line_ending)
    }

    fn remove_tags(&mut self, matches: impl Fn(&Tag) -> bool) -> bool {
        let mut any = false;
        for tag in self.tags.iter_mut().filter(|tag| !tag.removed && matches(tag)) {
            tag.removed = true;
            for line in &mut self.lines[tag.lines.clone()] {
                line.removed = true;
            }
            any = true;
        }
        any
    }
}

impl DocumentationView for DocBlock {
    fn return_field(&self) -> Option<AnnotationField> {
        self.tags
            .iter()
            .find(|tag| !tag.removed && tag.kind == TagKind::Return)
            .map(Tag::field)
    }

    fn param_field(&self, name: &str) -> Option<AnnotationField> {
        self.tags
            .iter()
            .find(|tag| !tag.removed && tag.documents_param(name))
            .map(Tag::field)
    }

    fn remove_return_type(&mut self) {
        if self.remove_tags(|tag| tag.kind == TagKind::Return) {
            self.removed.push(RemovedTag::Return);
        }
    }

    fn remove_param_type(&mut self, name: &str) {
        if self.remove_tags(|tag| tag.documents_param(name)) {
            self.removed.push(RemovedTag::Param(name.to_string()));
        }
    }
}

fn split_line(raw: &str, is_first: bool, is_last: bool) -> Option<DocLine> {
    let mut lead = String::new();
    let mut rest = raw;

    if is_first {
        rest = rest.strip_prefix(OPENER)?;
        lead.push_str(OPENER);
    }

    let close = if is_last {
        let without = rest.strip_suffix(CLOSER)?;
        let trimmed = without.trim_end();
        let close = rest[trimmed.len()..].to_string();
        rest = trimmed;
        Some(close)
    } else {
        None
    };

    let indent = leading_whitespace(rest);
    lead.push_str(indent);
    rest = &rest[indent.len()..];

    if !is_first {
        if let Some(after_star) = rest.strip_prefix('*') {
            lead.push('*');
            rest = after_star;
            if let Some(after_space) = rest.strip_prefix(' ') {
                lead.push(' ');
                rest = after_space;
            }
        }
    }

    Some(DocLine {
        lead,
        content: rest.to_string(),
        close,
        removed: false,
    })
}

/// A tag runs from its `@name` line over following non-blank lines that do
/// not start another tag.
fn collect_tags(lines: &[DocLine]) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let text = lines[index].content.trim();
        let Some(tag_text) = text.strip_prefix('@') else {
            index += 1;
            continue;
        };

        let (name, first_body) = match tag_text.find(char::is_whitespace) {
            Some(split) => (&tag_text[..split], tag_text[split..].trim()),
            None => (tag_text, ""),
        };

        let mut body = first_body.to_string();
        let mut end = index + 1;
        while end < lines.len() {
            let next = lines[end].content.trim();
            if next.is_empty() || next.starts_with('@') {
                break;
            }
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(next);
            end += 1;
        }

        let parsed = match name {
            RETURN_TAG => Some((TagKind::Return, tags::parse_return_body(&body))),
            PARAM_TAG => Some((TagKind::Param, tags::parse_param_body(&body))),
            _ => None,
        };
        if let Some((kind, body)) = parsed {
            tags.push(Tag {
                kind,
                lines: index..end,
                body,
                removed: false,
            });
        }

        index = end;
    }

    tags
}

fn render_line(line: &DocLine) -> String {
    let mut text = String::with_capacity(line.lead.len() + line.content.len() + 3);
    text.push_str(&line.lead);
    text.push_str(&line.content);
    if let Some(close) = &line.close {
        text.push_str(close);
    }
    text
}

fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}
