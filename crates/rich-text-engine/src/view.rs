//! # Host View Boundary
//!
//! The engine never builds widgets itself. A host supplies a
//! [`ViewGenerator`] that turns a media tag or a styled text run into its own
//! view type, and the composed result is a list of [`Block`]s wrapping those
//! views.

use std::fmt;
use std::rc::Rc;

use crate::observer::RichTextObserver;
use crate::style::{Font, StyleConfig};
use crate::text::AttributedText;

/// Default height-to-width ratio of an embedded video.
pub const VIDEO_ASPECT_RATIO: f32 = 9.0 / 16.0;

/// Capabilities every host view exposes to the engine.
pub trait BlockView {
    /// Text read out by assistive technology for this view.
    fn accessibility_value(&self) -> Option<&str>;

    /// Height the view needs when laid out at `width`, if it knows it.
    fn height_for_width(&self, _width: f32) -> Option<f32> {
        None
    }
}

/// Everything a text view is built from besides the text itself.
pub struct TextViewOptions<'a> {
    /// Font resolved for this run by the segment source.
    pub font: &'a Font,
    pub style: &'a StyleConfig,
    pub observer: Option<Rc<dyn RichTextObserver>>,
}

impl fmt::Debug for TextViewOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextViewOptions")
            .field("font", self.font)
            .field("style", self.style)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Host-side constructor for media and text views.
pub trait ViewGenerator {
    type Media: BlockView;
    type Text: BlockView;

    /// Builds a media view for `tag`, or `None` when the tag cannot be played.
    fn media_view(&self, tag: &str) -> Option<Self::Media>;

    /// Builds a text view. Always succeeds for valid input.
    fn text_view(&self, text: &AttributedText, options: &TextViewOptions<'_>) -> Self::Text;
}

/// A renderable block produced from one segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<M, T> {
    Media(M),
    Text(T),
}

impl<M: BlockView, T: BlockView> Block<M, T> {
    pub fn accessibility_value(&self) -> Option<&str> {
        match self {
            Block::Media(view) => view.accessibility_value(),
            Block::Text(view) => view.accessibility_value(),
        }
    }

    pub fn as_text(&self) -> Option<&T> {
        match self {
            Block::Text(view) => Some(view),
            Block::Media(_) => None,
        }
    }

    /// Height of the block in a column of the given width. Media keeps the
    /// video aspect ratio; text asks the view.
    pub fn height_for_width(&self, width: f32) -> f32 {
        match self {
            Block::Media(view) => view
                .height_for_width(width)
                .unwrap_or(width * VIDEO_ASPECT_RATIO),
            Block::Text(view) => view.height_for_width(width).unwrap_or(0.0),
        }
    }
}
