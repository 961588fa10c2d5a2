use std::ops::Range;

use crate::layout::Point;
use crate::text::AttributedText;

use super::detector::{LinkDetector, RegexLinkDetector};

/// Caret position inside a rendered text block. Only meaningful to the
/// [`RenderedText`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

/// Hit-testing and storage queries a host text block answers.
pub trait RenderedText {
    /// Nearest caret position to `point`, in the block's own coordinates.
    fn closest_position(&self, point: Point) -> Option<TextPosition>;

    /// Position `offset` characters away from `position`, if it exists.
    fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition>;

    /// Linear character offsets of `range` into [`RenderedText::storage`].
    fn offset_range(&self, range: TextRange) -> Option<Range<usize>>;

    /// Styled text backing the block.
    fn storage(&self) -> &AttributedText;
}

/// Per-tap scratch data: where the tap landed and which character is examined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapProbe {
    pub point: Point,
    pub text_position: TextPosition,
    pub probe_range: TextRange,
}

/// Maps taps on rendered text to link identifiers.
///
/// An explicit link annotation on the tapped character always wins. Without
/// one, the detector is run over the whole text and its first match is used,
/// wherever it sits relative to the tap.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver<D = RegexLinkDetector> {
    detector: D,
}

impl LinkResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: LinkDetector> LinkResolver<D> {
    pub fn with_detector(detector: D) -> Self {
        Self { detector }
    }

    /// Builds the one-character probe for a tap.
    ///
    /// Probes forward from the hit position; at the end of the content, where
    /// no following character exists, the probe covers the previous character.
    pub fn probe(&self, point: Point, text: &impl RenderedText) -> Option<TapProbe> {
        let text_position = text.closest_position(point)?;
        let probe_range = match text.position_from(text_position, 1) {
            Some(end) => TextRange {
                start: text_position,
                end,
            },
            None => {
                let start = text.position_from(text_position, -1)?;
                let end = text.position_from(start, 1)?;
                TextRange { start, end }
            }
        };
        Some(TapProbe {
            point,
            text_position,
            probe_range,
        })
    }

    /// Link identifier under `point`, or `None`.
    pub fn resolve(&self, point: Point, text: &impl RenderedText) -> Option<String> {
        let probe = self.probe(point, text)?;
        let offsets = text.offset_range(probe.probe_range)?;
        let storage = text.storage();
        if offsets.is_empty() || offsets.end > storage.char_len() {
            log::trace!("tap at {point:?} produced unusable probe {offsets:?}");
            return None;
        }

        if let Some(link) = storage.link_at(offsets.start) {
            log::trace!("tap at {point:?} hit explicit link {link}");
            return Some(link.to_string());
        }

        let plain = storage.as_str();
        let first = self.detector.find_links(plain).into_iter().next()?;
        let detected = plain.get(first)?;
        log::trace!("tap at {point:?} fell back to detected link {detected:?}");
        Some(normalize_link(detected))
    }
}

/// Guarantees a scheme on a detected link, keeping the original casing.
pub fn normalize_link(link: &str) -> String {
    let lowercased = link.to_lowercase();
    if lowercased.starts_with("http://") || lowercased.starts_with("https://") {
        link.to_string()
    } else {
        format!("http://{link}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{LinkTarget, TextAttribute};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// One character per unit of x; y is ignored.
    struct Strip {
        text: AttributedText,
    }

    impl RenderedText for Strip {
        fn closest_position(&self, point: Point) -> Option<TextPosition> {
            (point.x >= 0.0).then(|| TextPosition((point.x as usize).min(self.text.char_len())))
        }

        fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition> {
            let target = position.0.checked_add_signed(offset)?;
            (target <= self.text.char_len()).then_some(TextPosition(target))
        }

        fn offset_range(&self, range: TextRange) -> Option<Range<usize>> {
            Some(range.start.0..range.end.0)
        }

        fn storage(&self) -> &AttributedText {
            &self.text
        }
    }

    fn at(x: f32) -> Point {
        Point { x, y: 0.0 }
    }

    fn linked(text: &str, range: Range<usize>, target: LinkTarget) -> Strip {
        let mut text = AttributedText::plain(text);
        text.add_attribute(range, TextAttribute::Link(target));
        Strip { text }
    }

    #[rstest]
    #[case("example.com/x", "http://example.com/x")]
    #[case("https://example.com/x", "https://example.com/x")]
    #[case("HTTP://EXAMPLE.com", "HTTP://EXAMPLE.com")]
    #[case("www.example.com", "http://www.example.com")]
    #[case("Https://a.b", "Https://a.b")]
    fn normalizes_scheme(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_link(input), expected);
    }

    #[test]
    fn explicit_link_under_tap_wins() {
        let strip = linked(
            "tap here or example.com",
            4..8,
            LinkTarget::Custom("question-12".into()),
        );
        let resolver = LinkResolver::new();

        assert_eq!(resolver.resolve(at(5.0), &strip).as_deref(), Some("question-12"));
    }

    #[test]
    fn fallback_ignores_tap_locality() {
        let strip = Strip {
            text: AttributedText::plain("Visit example.com today"),
        };
        let resolver = LinkResolver::new();

        for x in [0.0, 8.0, 20.0] {
            assert_eq!(
                resolver.resolve(at(x), &strip).as_deref(),
                Some("http://example.com")
            );
        }
    }

    #[test]
    fn tap_outside_explicit_link_uses_fallback() {
        let strip = linked(
            "docs and example.com",
            0..4,
            LinkTarget::Url("https://docs.rs".into()),
        );
        let resolver = LinkResolver::new();

        assert_eq!(resolver.resolve(at(1.0), &strip).as_deref(), Some("https://docs.rs"));
        assert_eq!(
            resolver.resolve(at(6.0), &strip).as_deref(),
            Some("http://example.com")
        );
    }

    #[test]
    fn tap_at_end_probes_previous_character() {
        let strip = linked("see docs", 4..8, LinkTarget::Custom("docs".into()));
        let resolver = LinkResolver::new();

        let probe = resolver.probe(at(100.0), &strip).unwrap();
        assert_eq!(probe.text_position, TextPosition(8));
        assert_eq!(
            probe.probe_range,
            TextRange {
                start: TextPosition(7),
                end: TextPosition(8)
            }
        );
        assert_eq!(resolver.resolve(at(100.0), &strip).as_deref(), Some("docs"));
    }

    #[test]
    fn no_position_means_no_link() {
        let strip = Strip {
            text: AttributedText::plain("example.com"),
        };
        assert_eq!(LinkResolver::new().resolve(at(-1.0), &strip), None);
    }

    #[test]
    fn empty_text_has_no_probe() {
        let strip = Strip {
            text: AttributedText::new(),
        };
        let resolver = LinkResolver::new();
        assert_eq!(resolver.probe(at(0.0), &strip), None);
        assert_eq!(resolver.resolve(at(0.0), &strip), None);
    }

    #[test]
    fn plain_text_without_links_resolves_to_none() {
        let strip = Strip {
            text: AttributedText::plain("nothing to see"),
        };
        assert_eq!(LinkResolver::new().resolve(at(3.0), &strip), None);
    }

    #[test]
    fn custom_detector_is_used_for_fallback() {
        let strip = Strip {
            text: AttributedText::plain("ticket ABC-42"),
        };
        let resolver = LinkResolver::with_detector(|text: &str| -> Vec<Range<usize>> {
            text.find("ABC-").map(|i| i..i + 6).into_iter().collect()
        });

        assert_eq!(resolver.resolve(at(0.0), &strip).as_deref(), Some("http://ABC-42"));
    }

    struct BrokenOffsets(AttributedText);

    impl RenderedText for BrokenOffsets {
        fn closest_position(&self, _point: Point) -> Option<TextPosition> {
            Some(TextPosition(0))
        }

        fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition> {
            position.0.checked_add_signed(offset).map(TextPosition)
        }

        fn offset_range(&self, _range: TextRange) -> Option<Range<usize>> {
            Some(0..self.0.char_len() + 1)
        }

        fn storage(&self) -> &AttributedText {
            &self.0
        }
    }

    #[test]
    fn probe_past_storage_end_is_rejected() {
        let text = BrokenOffsets(AttributedText::plain("example.com"));
        assert_eq!(LinkResolver::new().resolve(at(0.0), &text), None);
    }
}
