//! Error types for Markdown conversion.

/// Failure of the public entry point.
///
/// Scanning and inline transformation are total over all input; only the
/// optional formatting pass can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The formatting pass could not tokenize the assembled markup.
    #[error("failed to format HTML output: {source}")]
    Format {
        /// Assembled HTML that was rejected.
        html: String,
        /// Tokenizer diagnostic.
        #[source]
        source: quick_xml::Error,
    },
}

impl Error {
    /// The markup the formatter rejected.
    pub fn html(&self) -> &str {
        match self {
            Error::Format { html, .. } => html,
        }
    }
}
