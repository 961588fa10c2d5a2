pub mod accessibility;
pub mod compose;
pub mod error;
pub mod layout;
pub mod link;
pub mod markdown;
pub mod observer;
pub mod rich_text;
pub mod segment;
pub mod style;
pub mod text;
pub mod view;

// Re-export key types for easier usage
pub use compose::{BlockBuilder, CompositionResult, compose};
pub use error::{ErrorLog, ParsingError};
pub use layout::{BlockFrame, MonospaceText, Point, StackLayout};
pub use link::{LinkDetector, LinkResolver, RegexLinkDetector, RenderedText, normalize_link};
pub use markdown::{LatexConverter, MarkdownSource};
pub use observer::{EditAction, RichTextObserver};
pub use rich_text::RichTextView;
pub use segment::{Segment, SegmentSource};
pub use style::{Color, Font, LineBreakMode, StyleConfig, StyleUpdate, TextAlignment};
pub use text::{AttributedText, LinkTarget, TextAttribute};
pub use view::{Block, BlockView, TextViewOptions, ViewGenerator};
