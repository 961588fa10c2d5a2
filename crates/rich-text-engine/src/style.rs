use serde::{Deserialize, Serialize};

/// Point size of the platform's default system font.
pub const SYSTEM_FONT_SIZE: f32 = 17.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn system(size: f32) -> Self {
        Self::new("system", size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(SYSTEM_FONT_SIZE)
    }
}

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineBreakMode {
    WordWrapping,
    CharWrapping,
    Clipping,
    TruncatingHead,
    TruncatingTail,
    TruncatingMiddle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    Natural,
}

/// Styling applied to every text block of a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font: Font,
    pub text_color: Color,
    pub interactive_font: Option<Font>,
    pub interactive_text_color: Color,
    pub is_selectable: bool,
    pub is_editable: bool,
    pub line_break_mode: Option<LineBreakMode>,
    pub text_alignment: Option<TextAlignment>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: Font::default(),
            text_color: Color::BLACK,
            interactive_font: None,
            interactive_text_color: Color::BLUE,
            is_selectable: true,
            is_editable: false,
            line_break_mode: Some(LineBreakMode::TruncatingTail),
            text_alignment: None,
        }
    }
}

/// Overrides applied by [`StyleConfig::merge`].
///
/// Absent fields keep their current value, except `line_break_mode` and
/// `text_alignment`, which are always replaced by what the update carries.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleUpdate {
    pub font: Option<Font>,
    pub text_color: Option<Color>,
    pub interactive_font: Option<Font>,
    pub interactive_text_color: Option<Color>,
    pub line_break_mode: Option<LineBreakMode>,
    pub text_alignment: Option<TextAlignment>,
}

impl Default for StyleUpdate {
    fn default() -> Self {
        Self {
            font: None,
            text_color: None,
            interactive_font: None,
            interactive_text_color: None,
            line_break_mode: Some(LineBreakMode::TruncatingTail),
            text_alignment: None,
        }
    }
}

impl StyleConfig {
    pub fn merge(&self, update: StyleUpdate) -> StyleConfig {
        StyleConfig {
            font: update.font.unwrap_or_else(|| self.font.clone()),
            text_color: update.text_color.unwrap_or(self.text_color),
            interactive_font: update
                .interactive_font
                .or_else(|| self.interactive_font.clone()),
            interactive_text_color: update
                .interactive_text_color
                .unwrap_or(self.interactive_text_color),
            is_selectable: self.is_selectable,
            is_editable: self.is_editable,
            line_break_mode: update.line_break_mode,
            text_alignment: update.text_alignment,
        }
    }
}
