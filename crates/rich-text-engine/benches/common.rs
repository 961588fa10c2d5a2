// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use rich_text_engine::{
    AttributedText, BlockView, MonospaceText, TextViewOptions, ViewGenerator,
};

#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Lesson\n\nRead the [intro](#intro) or visit example.com for notes.\n\n- First point\n  - Nested point\n- Second point\n\n![video](dQw4w9WgXcQ)\n\nArea is $x^2$ here.\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_plain_paragraph(words: usize) -> String {
    let mut content = String::new();
    for i in 0..words {
        content.push_str(&format!("word{} ", i));
    }
    content.push_str("and finally example.com");
    content
}

#[allow(dead_code)]
pub struct Placeholder;

impl BlockView for Placeholder {
    fn accessibility_value(&self) -> Option<&str> {
        None
    }
}

/// Lays text out on an 80-column grid of 1x1 cells.
#[allow(dead_code)]
pub struct GridViews;

impl ViewGenerator for GridViews {
    type Media = Placeholder;
    type Text = MonospaceText;

    fn media_view(&self, _tag: &str) -> Option<Placeholder> {
        Some(Placeholder)
    }

    fn text_view(&self, text: &AttributedText, _options: &TextViewOptions<'_>) -> MonospaceText {
        MonospaceText::new(text.clone(), 80, 1.0, 1.0)
    }
}
