//! # Rich Text View
//!
//! Owns one input string and its current composition. Any change (new input
//! or new style) throws the previous [`CompositionResult`] away and composes
//! again from scratch.

use std::rc::Rc;

use crate::compose::{CompositionResult, compose};
use crate::error::ParsingError;
use crate::layout::{Point, StackLayout};
use crate::link::{LinkResolver, RenderedText};
use crate::observer::RichTextObserver;
use crate::segment::SegmentSource;
use crate::style::{StyleConfig, StyleUpdate};
use crate::view::{Block, ViewGenerator};

pub struct RichTextView<S: SegmentSource, G: ViewGenerator> {
    input: String,
    source: S,
    generator: G,
    style: StyleConfig,
    observer: Option<Rc<dyn RichTextObserver>>,
    resolver: LinkResolver,
    composition: CompositionResult<G::Media, G::Text>,
}

impl<S: SegmentSource, G: ViewGenerator> RichTextView<S, G> {
    pub fn new(input: impl Into<String>, source: S, generator: G, style: StyleConfig) -> Self {
        let input = input.into();
        let composition = compose(source.segments(&input), &style, &generator, None);
        Self {
            input,
            source,
            generator,
            style,
            observer: None,
            resolver: LinkResolver::new(),
            composition,
        }
    }

    /// Attaches the observer and recomposes, so every text view is built with it.
    pub fn with_observer(mut self, observer: Rc<dyn RichTextObserver>) -> Self {
        self.observer = Some(observer);
        self.recompose();
        self
    }

    /// Replaces the input (when given) and merges `update` into the style.
    pub fn update(&mut self, input: Option<String>, update: StyleUpdate) {
        if let Some(input) = input {
            self.input = input;
        }
        self.style = self.style.merge(update);
        self.recompose();
    }

    fn recompose(&mut self) {
        let segments = self.source.segments(&self.input);
        self.composition = compose(segments, &self.style, &self.generator, self.observer.clone());
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn blocks(&self) -> &[Block<G::Media, G::Text>] {
        &self.composition.blocks
    }

    /// Errors of the current composition, `None` when there were none.
    pub fn errors(&self) -> Option<&[ParsingError]> {
        self.composition.error_slice()
    }

    pub fn accessibility_value(&self) -> Option<&str> {
        self.composition.accessibility_value.as_deref()
    }

    pub fn layout(&self, width: f32) -> StackLayout {
        StackLayout::new(&self.composition.blocks, width)
    }
}

impl<S, G> RichTextView<S, G>
where
    S: SegmentSource,
    G: ViewGenerator,
    G::Text: RenderedText,
{
    /// Resolves the link under `point` and reports it to the observer.
    ///
    /// `point` is in view coordinates with the view laid out at `width`.
    pub fn tap(&self, point: Point, width: f32) -> Option<String> {
        let (index, local) = self.layout(width).hit(point)?;
        let text = self.composition.blocks.get(index)?.as_text()?;
        let link = self.resolver.resolve(local, text)?;
        log::debug!("tap on block {index} resolved to {link}");
        if let Some(observer) = &self.observer {
            observer.did_tap_link(&link);
        }
        Some(link)
    }
}
