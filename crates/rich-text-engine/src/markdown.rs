//! # Markdown Segment Source
//!
//! A [`SegmentSource`] built on `pulldown-cmark`. Block-level text is joined
//! into one text segment until a video reference interrupts it.
//!
//! - `[text](url)` becomes a URL link; `[text](#id)` a custom link id
//! - `![video](tag)` becomes a video segment
//! - `$...$` / `$$...$$` goes through the optional [`LatexConverter`]

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::error::ParsingError;
use crate::segment::{Segment, SegmentSource};
use crate::style::Font;
use crate::text::{AttributedText, LinkTarget, TextAttribute};

/// Alt text marking an image as an embedded video.
pub const VIDEO_ALT_TEXT: &str = "video";

/// Converts LaTeX source to display text.
pub trait LatexConverter {
    fn convert(&self, latex: &str) -> Option<String>;
}

impl<F> LatexConverter for F
where
    F: Fn(&str) -> Option<String>,
{
    fn convert(&self, latex: &str) -> Option<String> {
        self(latex)
    }
}

pub struct MarkdownSource {
    font: Font,
    latex: Option<Box<dyn LatexConverter>>,
}

impl MarkdownSource {
    pub fn new(font: Font) -> Self {
        Self { font, latex: None }
    }

    pub fn with_latex(mut self, converter: impl LatexConverter + 'static) -> Self {
        self.latex = Some(Box::new(converter));
        self
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

impl Default for MarkdownSource {
    fn default() -> Self {
        Self::new(Font::default())
    }
}

impl SegmentSource for MarkdownSource {
    fn segments(&self, input: &str) -> Vec<Segment> {
        let mut collector = SegmentCollector::new(self);
        for event in Parser::new_ext(input, Options::ENABLE_MATH | Options::ENABLE_STRIKETHROUGH)
        {
            collector.event(event);
        }
        collector.finish()
    }
}

struct PendingImage {
    dest: String,
    alt: String,
}

struct SegmentCollector<'a> {
    source: &'a MarkdownSource,
    out: Vec<Segment>,
    text: AttributedText,
    errors: Vec<ParsingError>,
    open_styles: Vec<(usize, TextAttribute)>,
    image: Option<PendingImage>,
    item_depth: usize,
    at_item_marker: bool,
}

impl<'a> SegmentCollector<'a> {
    fn new(source: &'a MarkdownSource) -> Self {
        Self {
            source,
            out: vec![],
            text: AttributedText::new(),
            errors: vec![],
            open_styles: vec![],
            image: None,
            item_depth: 0,
            at_item_marker: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.image.as_mut() {
                Some(image) => image.alt.push_str(&text),
                None => self.push_text(&text),
            },
            Event::Code(code) => {
                self.at_item_marker = false;
                self.text.push_attributed(&code, TextAttribute::Code);
            }
            Event::InlineMath(latex) => self.push_math(&latex, "$"),
            Event::DisplayMath(latex) => self.push_math(&latex, "$$"),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => self.separate_block(),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.item_depth == 0 {
                    self.separate_block();
                } else if !self.at_item_marker {
                    self.ensure_line_start();
                }
            }
            Tag::Heading { .. } => {
                self.separate_block();
                self.open(TextAttribute::Strong);
            }
            Tag::BlockQuote(_) => self.separate_block(),
            Tag::CodeBlock(_) => {
                self.separate_block();
                self.open(TextAttribute::Code);
            }
            Tag::List(_) => {
                if self.item_depth == 0 {
                    self.separate_block();
                }
            }
            Tag::Item => {
                self.ensure_line_start();
                let marker = format!("{}• ", "  ".repeat(self.item_depth));
                self.text.push_str(&marker);
                self.item_depth += 1;
                self.at_item_marker = true;
            }
            Tag::Emphasis => self.open(TextAttribute::Emphasis),
            Tag::Strong => self.open(TextAttribute::Strong),
            Tag::Link { dest_url, .. } => {
                let target = match dest_url.strip_prefix('#') {
                    Some(id) => LinkTarget::Custom(id.to_string()),
                    None => LinkTarget::Url(dest_url.to_string()),
                };
                self.open(TextAttribute::Link(target));
            }
            Tag::Image { dest_url, .. } => {
                self.image = Some(PendingImage {
                    dest: dest_url.to_string(),
                    alt: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_)
            | TagEnd::CodeBlock
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Link => self.close(),
            TagEnd::Item => {
                self.item_depth = self.item_depth.saturating_sub(1);
                self.at_item_marker = false;
            }
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    self.finish_image(image);
                }
            }
            _ => {}
        }
    }

    fn finish_image(&mut self, image: PendingImage) {
        if !image.alt.trim().eq_ignore_ascii_case(VIDEO_ALT_TEXT) {
            self.push_text(&image.alt);
            return;
        }
        self.flush_text();
        let error = image
            .dest
            .trim()
            .is_empty()
            .then(|| ParsingError::AttributedTextGeneration {
                text: format!("![{}]()", image.alt),
            });
        self.out.push(Segment::Video {
            tag: image.dest,
            error,
        });
    }

    fn push_text(&mut self, s: &str) {
        self.at_item_marker = false;
        self.text.push_str(s);
    }

    fn push_math(&mut self, latex: &str, delimiter: &str) {
        let converted = self
            .source
            .latex
            .as_ref()
            .and_then(|converter| converter.convert(latex));
        match converted {
            Some(rendered) => self.push_text(&rendered),
            None => {
                self.push_text(&format!("{delimiter}{latex}{delimiter}"));
                self.errors.push(ParsingError::LatexGeneration {
                    text: latex.to_string(),
                });
            }
        }
    }

    fn open(&mut self, attribute: TextAttribute) {
        self.open_styles.push((self.text.char_len(), attribute));
    }

    fn close(&mut self) {
        if let Some((start, attribute)) = self.open_styles.pop() {
            self.text
                .add_attribute(start..self.text.char_len(), attribute);
        }
    }

    fn ensure_line_start(&mut self) {
        if !self.text.is_empty() && !self.text.as_str().ends_with('\n') {
            self.text.push_str("\n");
        }
    }

    /// Starts a new block with a blank line after any previous content.
    fn separate_block(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.text.trim_end();
        self.text.push_str("\n\n");
    }

    fn flush_text(&mut self) {
        self.text.trim_end();
        // Styles still open continue in the next segment from its start.
        for (start, _) in &mut self.open_styles {
            *start = 0;
        }
        let text = std::mem::take(&mut self.text);
        let errors = std::mem::take(&mut self.errors);
        if text.is_empty() && errors.is_empty() {
            return;
        }
        self.out.push(Segment::Text {
            styled_text: text,
            font: self.source.font.clone(),
            errors: (!errors.is_empty()).then_some(errors),
        });
    }

    fn finish(mut self) -> Vec<Segment> {
        while !self.open_styles.is_empty() {
            self.close();
        }
        self.flush_text();
        self.out
    }
}
