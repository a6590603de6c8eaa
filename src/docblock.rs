//! Documentation-block parsing seam.
//!
//! The pipeline treats the annotation parser as a black box: it hands over
//! the raw doc block and gets back free text plus ordered `tag -> value`
//! pairs. [`TagLexer`] is the default implementation; hosts with their own
//! comment syntax plug in by implementing [`DocBlockParser`].

/// Parsed form of a route's documentation block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocBlock {
    /// Leading untagged text: first line is the endpoint title, the rest its
    /// description.
    pub text: String,
    /// `(tag, value)` pairs in source order, duplicates preserved.
    pub tags: Vec<(String, String)>,
}

impl ParsedDocBlock {
    /// All values for one tag, in source order.
    pub fn tag_values<'a, 'b>(&'a self, tag: &'b str) -> impl Iterator<Item = &'a str> + use<'a, 'b> {
        self.tags
            .iter()
            .filter(move |(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, value)| value.as_str())
    }

    /// First value for a tag, if present.
    pub fn tag(&self, tag: &str) -> Option<&str> {
        self.tag_values(tag).next()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag(tag).is_some()
    }

    /// Title / description split of the free text.
    pub fn title_and_description(&self) -> (String, String) {
        let mut lines = self.text.lines();
        let title = lines.next().unwrap_or_default().trim().to_string();
        let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        (title, description)
    }
}

pub trait DocBlockParser {
    fn parse(&self, raw: &str) -> ParsedDocBlock;
}

/// Line-oriented default lexer.
///
/// A line starting with `@` opens a tag; everything after the tag name on
/// that line is its value. A tag value continues over following indented
/// lines until the next tag, so multi-line JSON literals work. Comment
/// decoration (`/** ... */`, leading `*`) is stripped first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagLexer;

impl DocBlockParser for TagLexer {
    fn parse(&self, raw: &str) -> ParsedDocBlock {
        let mut text_lines: Vec<String> = Vec::new();
        let mut tags: Vec<(String, String)> = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for line in raw.lines() {
            let line = strip_comment_decoration(line);
            if let Some(rest) = line.trim_start().strip_prefix('@') {
                if let Some((tag, value)) = current.take() {
                    tags.push((tag, value.join("\n").trim().to_string()));
                }
                let mut parts = rest.splitn(2, char::is_whitespace);
                let tag = parts.next().unwrap_or_default().to_string();
                let value = parts.next().unwrap_or_default().trim().to_string();
                current = Some((tag, vec![value]));
            } else if let Some((_, value)) = current.as_mut() {
                value.push(line.trim_end().to_string());
            } else {
                text_lines.push(line.trim_end().to_string());
            }
        }
        if let Some((tag, value)) = current.take() {
            tags.push((tag, value.join("\n").trim().to_string()));
        }

        ParsedDocBlock {
            text: text_lines.join("\n").trim().to_string(),
            tags,
        }
    }
}

/// Strip `/** ... */` decoration; undecorated lines keep their indentation
/// so multi-line tag values (JSON literals) survive intact.
fn strip_comment_decoration(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed == "/**" || trimmed == "*/" || trimmed == "*" {
        return "";
    }
    if let Some(rest) = trimmed.strip_prefix("* ") {
        return rest;
    }
    line
}
