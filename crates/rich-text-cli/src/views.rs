//! Terminal renditions of composed blocks: text on a cell grid and a boxed
//! placeholder for videos.

use std::ops::Range;
use std::rc::Rc;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use rich_text_config::LayoutConfig;
use rich_text_engine::{
    AttributedText, Block, BlockView, MonospaceText, Point, RenderedText, RichTextObserver,
    StackLayout, StyleConfig, TextAlignment, TextAttribute, TextViewOptions, ViewGenerator,
    layout::VisualLine,
    link::{TextPosition, TextRange},
    observer::{EditAction, can_perform, copy_selection},
    view::VIDEO_ASPECT_RATIO,
};

/// Video tags the terminal host accepts: an http(s) URL or a bare video id.
pub fn is_playable_tag(tag: &str) -> bool {
    let lowercased = tag.to_lowercase();
    if lowercased.starts_with("http://") || lowercased.starts_with("https://") {
        return !tag.chars().any(char::is_whitespace);
    }
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug)]
pub struct MediaPlaceholder {
    tag: String,
    cell_height: f32,
}

impl MediaPlaceholder {
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl BlockView for MediaPlaceholder {
    fn accessibility_value(&self) -> Option<&str> {
        None
    }

    /// Video aspect ratio rounded up to whole rows.
    fn height_for_width(&self, width: f32) -> Option<f32> {
        let rows = (width * VIDEO_ASPECT_RATIO / self.cell_height).ceil().max(3.0);
        Some(rows * self.cell_height)
    }
}

/// A text block on the cell grid, holding the style and observer it was
/// composed with.
pub struct TerminalText {
    grid: MonospaceText,
    style: StyleConfig,
    observer: Option<Rc<dyn RichTextObserver>>,
}

impl TerminalText {
    pub fn grid(&self) -> &MonospaceText {
        &self.grid
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Copies the characters in `selection` unless the style or the observer
    /// turns copying off.
    pub fn copy(&self, selection: Range<usize>) -> Option<String> {
        let observer = self.observer.as_deref();
        if !can_perform(EditAction::Copy, observer, self.style.is_selectable) {
            log::debug!("copy is not available for this block");
            return None;
        }
        copy_selection(self.grid.storage(), Some(selection), observer)
    }
}

impl BlockView for TerminalText {
    fn accessibility_value(&self) -> Option<&str> {
        self.grid.accessibility_value()
    }

    fn height_for_width(&self, width: f32) -> Option<f32> {
        self.grid.height_for_width(width)
    }
}

impl RenderedText for TerminalText {
    fn closest_position(&self, point: Point) -> Option<TextPosition> {
        self.grid.closest_position(point)
    }

    fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition> {
        self.grid.position_from(position, offset)
    }

    fn offset_range(&self, range: TextRange) -> Option<Range<usize>> {
        self.grid.offset_range(range)
    }

    fn storage(&self) -> &AttributedText {
        self.grid.storage()
    }
}

/// Builds views for a content area `columns` cells wide.
pub struct TerminalViews {
    columns: usize,
    cells: LayoutConfig,
}

impl TerminalViews {
    pub fn new(columns: usize, cells: LayoutConfig) -> Self {
        Self { columns, cells }
    }

    /// Width of the content area in view coordinates.
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cells.cell_width
    }
}

impl ViewGenerator for TerminalViews {
    type Media = MediaPlaceholder;
    type Text = TerminalText;

    fn media_view(&self, tag: &str) -> Option<MediaPlaceholder> {
        is_playable_tag(tag).then(|| MediaPlaceholder {
            tag: tag.to_string(),
            cell_height: self.cells.cell_height,
        })
    }

    fn text_view(&self, text: &AttributedText, options: &TextViewOptions<'_>) -> TerminalText {
        TerminalText {
            grid: MonospaceText::new(
                text.clone(),
                self.columns,
                self.cells.cell_width,
                self.cells.cell_height,
            ),
            style: options.style.clone(),
            observer: options.observer.clone(),
        }
    }
}

fn terminal_color(color: rich_text_engine::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn char_style(text: &AttributedText, offset: usize, style: &StyleConfig) -> Style {
    text.attributes()
        .iter()
        .filter(|(range, _)| range.contains(&offset))
        .fold(Style::default(), |acc, (_, attribute)| match attribute {
            TextAttribute::Link(_) => acc
                .fg(terminal_color(style.interactive_text_color))
                .add_modifier(Modifier::UNDERLINED),
            TextAttribute::Strong => acc.add_modifier(Modifier::BOLD),
            TextAttribute::Emphasis => acc.add_modifier(Modifier::ITALIC),
            TextAttribute::Code => acc.fg(Color::Gray).add_modifier(Modifier::DIM),
        })
}

fn line_alignment(alignment: Option<TextAlignment>) -> Alignment {
    match alignment {
        Some(TextAlignment::Center) => Alignment::Center,
        Some(TextAlignment::Right) => Alignment::Right,
        _ => Alignment::Left,
    }
}

fn styled_line(text: &TerminalText, line: &VisualLine) -> Line<'static> {
    let style = text.style();
    let storage = text.storage();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (offset, c) in line.chars.clone().zip(text.grid().line_text(line).chars()) {
        let current = char_style(storage, offset, style);
        if current != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = current;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans).alignment(line_alignment(style.text_alignment))
}

fn placeholder_lines(media: &MediaPlaceholder, columns: usize, rows: usize) -> Vec<Line<'static>> {
    let inner = columns.saturating_sub(2);
    let label: String = format!(" ▶ video: {} ", media.tag())
        .chars()
        .take(inner)
        .collect();
    let label_width = label.chars().count();
    let frame_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![Line::from(Span::styled(
        format!("┌{}┐", "─".repeat(inner)),
        frame_style,
    ))];
    for row in 1..rows.saturating_sub(1) {
        if row == rows / 2 {
            lines.push(Line::from(vec![
                Span::styled("│", frame_style),
                Span::styled(label.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(inner - label_width)),
                Span::styled("│", frame_style),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("│{}│", " ".repeat(inner)),
                frame_style,
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        format!("└{}┘", "─".repeat(inner)),
        frame_style,
    )));
    lines
}

/// Renders the stacked blocks to terminal lines, one line per cell row.
///
/// Text blocks are styled with the configuration they were composed with.
pub fn render_blocks(
    blocks: &[Block<MediaPlaceholder, TerminalText>],
    layout: &StackLayout,
    views: &TerminalViews,
) -> Vec<Line<'static>> {
    let cell_height = views.cells.cell_height;
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (block, frame) in blocks.iter().zip(layout.frames()) {
        let top = (frame.y / cell_height).round() as usize;
        let rows = (frame.height / cell_height).round() as usize;
        while lines.len() < top {
            lines.push(Line::default());
        }
        match block {
            Block::Text(text) => {
                lines.extend(text.grid().lines().iter().map(|line| styled_line(text, line)));
            }
            Block::Media(media) => lines.extend(placeholder_lines(media, views.columns, rows)),
        }
    }
    lines
}
