//! # Composition
//!
//! Turns an ordered segment sequence into an ordered block list.
//!
//! ## Rules
//!
//! - Blocks come out in segment order; a segment whose view cannot be built
//!   simply contributes nothing.
//! - Every segment-level error, plus one `WebViewGeneration` error per failed
//!   media segment, is appended to a single [`ErrorLog`] in segment order.
//! - A failure never stops later segments from being processed.
//! - Each call builds an independent [`CompositionResult`]; callers replace
//!   the previous one wholesale on any change.

use std::rc::Rc;

use crate::accessibility;
use crate::error::{ErrorLog, ParsingError};
use crate::observer::RichTextObserver;
use crate::segment::Segment;
use crate::style::StyleConfig;
use crate::view::{Block, BlockView, TextViewOptions, ViewGenerator};

/// Output of one composition pass.
#[derive(Debug)]
pub struct CompositionResult<M, T> {
    pub blocks: Vec<Block<M, T>>,
    /// `None` iff no error was recorded.
    pub errors: Option<Vec<ParsingError>>,
    /// Concatenated accessibility text of all blocks.
    pub accessibility_value: Option<String>,
}

impl<M, T> CompositionResult<M, T> {
    pub fn error_slice(&self) -> Option<&[ParsingError]> {
        self.errors.as_deref()
    }
}

pub struct BlockBuilder<'a, G: ViewGenerator> {
    generator: &'a G,
    style: &'a StyleConfig,
    observer: Option<Rc<dyn RichTextObserver>>,
    errors: ErrorLog,
    out: Vec<Block<G::Media, G::Text>>,
}

impl<'a, G: ViewGenerator> BlockBuilder<'a, G> {
    pub fn new(
        generator: &'a G,
        style: &'a StyleConfig,
        observer: Option<Rc<dyn RichTextObserver>>,
    ) -> Self {
        Self {
            generator,
            style,
            observer,
            errors: ErrorLog::new(),
            out: vec![],
        }
    }

    pub fn push(&mut self, segment: Segment) {
        match segment {
            Segment::Video { tag, error } => {
                self.errors.record(error);
                match self.generator.media_view(&tag) {
                    Some(view) => self.out.push(Block::Media(view)),
                    None => {
                        log::warn!("media view could not be built for tag {tag:?}");
                        self.errors.push(ParsingError::web_view_generation(tag));
                    }
                }
            }
            Segment::Text {
                styled_text,
                font,
                errors,
            } => {
                self.errors.record_all(errors);
                let options = TextViewOptions {
                    font: &font,
                    style: self.style,
                    observer: self.observer.clone(),
                };
                let view = self.generator.text_view(&styled_text, &options);
                self.out.push(Block::Text(view));
            }
        }
    }

    pub fn finish(self) -> CompositionResult<G::Media, G::Text> {
        let accessibility_value = accessibility::aggregate(&self.out);
        CompositionResult {
            blocks: self.out,
            errors: self.errors.into_option(),
            accessibility_value,
        }
    }
}

/// Builds the blocks for `segments` with the given style.
pub fn compose<G, I>(
    segments: I,
    style: &StyleConfig,
    generator: &G,
    observer: Option<Rc<dyn RichTextObserver>>,
) -> CompositionResult<G::Media, G::Text>
where
    G: ViewGenerator,
    G::Media: BlockView,
    G::Text: BlockView,
    I: IntoIterator<Item = Segment>,
{
    let mut builder = BlockBuilder::new(generator, style, observer);
    let mut segment_count = 0usize;
    for segment in segments {
        segment_count += 1;
        builder.push(segment);
    }
    let result = builder.finish();
    log::debug!(
        "composed {} segments into {} blocks with {} errors",
        segment_count,
        result.blocks.len(),
        result.errors.as_ref().map_or(0, Vec::len)
    );
    result
}
