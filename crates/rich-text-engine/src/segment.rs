use crate::error::ParsingError;
use crate::style::Font;
use crate::text::AttributedText;

/// One parsed unit of hybrid input: a styled text run or a media reference.
///
/// Each segment carries only the errors produced while parsing it. An absent
/// error field and an empty error list mean the same thing.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Video {
        tag: String,
        error: Option<ParsingError>,
    },
    Text {
        styled_text: AttributedText,
        font: Font,
        errors: Option<Vec<ParsingError>>,
    },
}

impl Segment {
    pub fn video(tag: impl Into<String>) -> Self {
        Segment::Video {
            tag: tag.into(),
            error: None,
        }
    }

    pub fn text(styled_text: impl Into<AttributedText>, font: Font) -> Self {
        Segment::Text {
            styled_text: styled_text.into(),
            font,
            errors: None,
        }
    }
}

/// Produces the segment sequence for a raw input string.
pub trait SegmentSource {
    fn segments(&self, input: &str) -> Vec<Segment>;
}

impl<F> SegmentSource for F
where
    F: Fn(&str) -> Vec<Segment>,
{
    fn segments(&self, input: &str) -> Vec<Segment> {
        self(input)
    }
}
