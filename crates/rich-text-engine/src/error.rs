use std::fmt;

/// Errors collected while turning input into renderable blocks.
///
/// None of these abort a composition pass. They are gathered into an
/// [`ErrorLog`] and handed back next to whatever blocks were built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to convert LaTeX to styled text: {text}")]
    LatexGeneration { text: String },
    #[error("Failed to generate styled text from: {text}")]
    AttributedTextGeneration { text: String },
    #[error("Failed to build a media view for tag: {link}")]
    WebViewGeneration { link: String },
}

impl ParsingError {
    pub fn web_view_generation(link: impl Into<String>) -> Self {
        Self::WebViewGeneration { link: link.into() }
    }
}

/// Ordered, append-only record of the errors seen during one composition pass.
///
/// Internally always present; [`ErrorLog::into_option`] exposes it as `None`
/// when nothing was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    errors: Vec<ParsingError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a single segment-level error, if there is one.
    pub fn record(&mut self, error: Option<ParsingError>) {
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    /// Records every error in `errors`, preserving their order.
    pub fn record_all(&mut self, errors: Option<Vec<ParsingError>>) {
        if let Some(errors) = errors {
            self.errors.extend(errors);
        }
    }

    pub fn push(&mut self, error: ParsingError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_option(self) -> Option<Vec<ParsingError>> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors)
        }
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
