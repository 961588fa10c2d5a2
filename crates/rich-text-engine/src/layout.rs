//! # Layout
//!
//! Geometry shared by hosts: the vertical block stack and a monospace text
//! grid that answers hit-testing queries for terminal-style hosts.

use std::ops::Range;

use crate::link::{RenderedText, TextPosition, TextRange};
use crate::text::AttributedText;
use crate::view::{Block, BlockView};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vertical extent of one block in the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFrame {
    pub y: f32,
    pub height: f32,
}

impl BlockFrame {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Single-column stack: every block spans the full width, the first one
/// starts at the top and each next one starts at the previous bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    width: f32,
    frames: Vec<BlockFrame>,
}

impl StackLayout {
    pub fn new<M: BlockView, T: BlockView>(blocks: &[Block<M, T>], width: f32) -> Self {
        let mut y = 0.0;
        let frames = blocks
            .iter()
            .map(|block| {
                let frame = BlockFrame {
                    y,
                    height: block.height_for_width(width),
                };
                y = frame.bottom();
                frame
            })
            .collect();
        Self { width, frames }
    }

    pub fn frames(&self) -> &[BlockFrame] {
        &self.frames
    }

    pub fn total_height(&self) -> f32 {
        self.frames.last().map_or(0.0, BlockFrame::bottom)
    }

    /// Index of the block under `point` and the point in that block's
    /// coordinates.
    pub fn hit(&self, point: Point) -> Option<(usize, Point)> {
        if point.x < 0.0 || point.x >= self.width {
            return None;
        }
        self.frames
            .iter()
            .position(|frame| point.y >= frame.y && point.y < frame.bottom())
            .map(|index| (index, Point::new(point.x, point.y - self.frames[index].y)))
    }
}

/// One visual line of a [`MonospaceText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Character offsets shown on this line, excluding a trailing newline.
    pub chars: Range<usize>,
    /// Same span as byte offsets into the text.
    pub bytes: Range<usize>,
}

/// Styled text laid out on a fixed cell grid.
///
/// Lines break at newlines and wrap at the column limit, preferring the last
/// space on the line.
#[derive(Debug, Clone, PartialEq)]
pub struct MonospaceText {
    text: AttributedText,
    columns: usize,
    cell_width: f32,
    cell_height: f32,
    lines: Vec<VisualLine>,
}

impl MonospaceText {
    pub fn new(text: AttributedText, columns: usize, cell_width: f32, cell_height: f32) -> Self {
        let columns = columns.max(1);
        let lines = wrap_lines(text.as_str(), columns);
        Self {
            text,
            columns,
            cell_width,
            cell_height,
            lines,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn line_text(&self, line: &VisualLine) -> &str {
        &self.text.as_str()[line.bytes.clone()]
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.cell_height
    }
}

fn wrap_lines(text: &str, columns: usize) -> Vec<VisualLine> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |(b, _)| *b);
    let mut lines = Vec::new();
    let push = |lines: &mut Vec<VisualLine>, range: Range<usize>| {
        lines.push(VisualLine {
            bytes: byte_at(range.start)..byte_at(range.end),
            chars: range,
        });
    };

    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        if c == '\n' {
            push(&mut lines, start..i);
            start = i + 1;
            last_space = None;
            i += 1;
            continue;
        }
        if i - start == columns {
            // Line is full; re-examine `i` on the next line.
            match last_space {
                Some(space) if space > start => {
                    push(&mut lines, start..space + 1);
                    start = space + 1;
                }
                _ => {
                    push(&mut lines, start..i);
                    start = i;
                }
            }
            last_space = None;
            continue;
        }
        if c == ' ' {
            last_space = Some(i);
        }
        i += 1;
    }
    push(&mut lines, start..chars.len());
    lines
}

impl RenderedText for MonospaceText {
    fn closest_position(&self, point: Point) -> Option<TextPosition> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let row = (point.y / self.cell_height).floor().max(0.0) as usize;
        let line = &self.lines[row.min(self.lines.len() - 1)];
        let col = (point.x / self.cell_width).floor().max(0.0) as usize;
        let col = col.min(line.chars.len());
        Some(TextPosition(line.chars.start + col))
    }

    fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition> {
        let target = position.0.checked_add_signed(offset)?;
        (target <= self.text.char_len()).then_some(TextPosition(target))
    }

    fn offset_range(&self, range: TextRange) -> Option<Range<usize>> {
        (range.start <= range.end).then_some(range.start.0..range.end.0)
    }

    fn storage(&self) -> &AttributedText {
        &self.text
    }
}

impl BlockView for MonospaceText {
    fn accessibility_value(&self) -> Option<&str> {
        Some(self.text.as_str())
    }

    fn height_for_width(&self, _width: f32) -> Option<f32> {
        Some(self.height())
    }
}
