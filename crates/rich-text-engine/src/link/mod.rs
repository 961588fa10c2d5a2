//! # Tap-to-Link Resolution
//!
//! Resolves a tap on a rendered text block into a link identifier.
//!
//! ## Steps
//!
//! 1. Hit-test the tap into a caret position.
//! 2. Form a one-character probe range after it, or before it when the tap
//!    landed at the end of the content.
//! 3. Convert the probe to linear offsets into the styled text and check them
//!    against the storage length.
//! 4. An explicit link annotation at the probe start is the answer.
//! 5. Otherwise the first heuristically detected link anywhere in the text is
//!    used, with `http://` prepended when it has no http(s) scheme.
//!
//! ## Modules
//!
//! - **`detector`**: `LinkDetector` trait and the regex-based default
//! - **`resolver`**: `RenderedText` hit-testing boundary, `TapProbe`, `LinkResolver`

pub mod detector;
pub mod resolver;

pub use detector::{LinkDetector, RegexLinkDetector};
pub use resolver::{
    LinkResolver, RenderedText, TapProbe, TextPosition, TextRange, normalize_link,
};
