//! A line-oriented Markdown to HTML transpiler for a small Markdown subset
pub mod error;
pub mod formatter;
pub mod inline;
pub mod options;
pub mod parser;
mod state;

pub use error::Error;
pub use options::ParseOptions;
pub use parser::Parser;

/// Convert markdown text to HTML with the default options
pub fn markdown_to_html(markdown: &str) -> Result<String, Error> {
    markdown_to_html_with_options(markdown, &ParseOptions::default())
}

/// Convert markdown text to HTML
pub fn markdown_to_html_with_options(
    markdown: &str,
    options: &ParseOptions,
) -> Result<String, Error> {
    Parser::new(*options).parse(markdown)
}
