//! # Attributed Text
//!
//! A string plus a list of attribute runs. Runs are stored as character
//! (Unicode scalar) offsets so they line up with the caret positions a
//! rendered text block reports, not with UTF-8 byte offsets.

use std::fmt;
use std::ops::Range;

/// Target of an explicit link annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// An external URL, e.g. `https://example.com`.
    Url(String),
    /// An application-defined link identifier.
    Custom(String),
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::Url(url) => f.write_str(url),
            LinkTarget::Custom(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAttribute {
    Link(LinkTarget),
    Emphasis,
    Strong,
    Code,
}

/// Styled text run: plain content with attribute ranges over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedText {
    text: String,
    char_len: usize,
    attributes: Vec<(Range<usize>, TextAttribute)>,
}

impl AttributedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            char_len,
            attributes: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn attributes(&self) -> &[(Range<usize>, TextAttribute)] {
        &self.attributes
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.char_len += s.chars().count();
    }

    /// Appends `s` and covers the appended characters with `attribute`.
    pub fn push_attributed(&mut self, s: &str, attribute: TextAttribute) {
        let start = self.char_len;
        self.push_str(s);
        self.add_attribute(start..self.char_len, attribute);
    }

    /// Adds an attribute over a character range. Empty ranges and ranges past
    /// the end of the text are clamped; a range that clamps to nothing is dropped.
    pub fn add_attribute(&mut self, range: Range<usize>, attribute: TextAttribute) {
        let end = range.end.min(self.char_len);
        if range.start >= end {
            return;
        }
        self.attributes.push((range.start..end, attribute));
    }

    /// Appends another attributed run, shifting its attribute ranges.
    pub fn append(&mut self, other: &AttributedText) {
        let shift = self.char_len;
        self.push_str(&other.text);
        for (range, attribute) in &other.attributes {
            self.attributes
                .push((range.start + shift..range.end + shift, attribute.clone()));
        }
    }

    /// Removes trailing whitespace, clamping attributes to the new end.
    pub fn trim_end(&mut self) {
        let trimmed = self.text.trim_end().len();
        if trimmed == self.text.len() {
            return;
        }
        self.char_len -= self.text[trimmed..].chars().count();
        self.text.truncate(trimmed);
        let end = self.char_len;
        self.attributes.retain_mut(|(range, _)| {
            range.end = range.end.min(end);
            range.start < range.end
        });
    }

    /// Explicit link annotation covering the character at `offset`.
    ///
    /// When several links overlap, the one added last wins.
    pub fn link_at(&self, offset: usize) -> Option<&LinkTarget> {
        self.attributes
            .iter()
            .rev()
            .find_map(|(range, attribute)| match attribute {
                TextAttribute::Link(target) if range.contains(&offset) => Some(target),
                _ => None,
            })
    }

    /// Byte index of the character at `offset`, or the text length when
    /// `offset` is the end position.
    pub fn byte_index(&self, offset: usize) -> Option<usize> {
        if offset == self.char_len {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(offset).map(|(i, _)| i)
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for AttributedText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}
