//! Feature toggles for the Markdown subset
use serde::{Deserialize, Serialize};

/// Immutable set of construct toggles, read once per parse.
///
/// Each flag gates recognition of exactly one construct. A disabled construct
/// is not suppressed: its markers fall through to the next classifier and end
/// up as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParseOptions {
    pub parse_heading: bool,
    pub parse_list: bool,
    pub parse_code_block: bool,
    pub parse_inline_code: bool,
    pub parse_horizontal_rule: bool,
    pub parse_block_quote: bool,
    pub parse_image: bool,
    pub parse_bold: bool,
    pub parse_italic: bool,
    pub parse_underline: bool,
    pub parse_strikethrough: bool,
    pub parse_link: bool,
    /// Run the assembled fragment through the indenting formatter.
    #[serde(rename = "formatHTML")]
    pub format_html: bool,
    /// Render digit-marker list levels as `<ol>` instead of `<ul>`.
    pub ordered_lists: bool,
}

impl ParseOptions {
    /// Every construct enabled, formatting on, ordered lists off.
    pub const fn new() -> Self {
        Self {
            parse_heading: true,
            parse_list: true,
            parse_code_block: true,
            parse_inline_code: true,
            parse_horizontal_rule: true,
            parse_block_quote: true,
            parse_image: true,
            parse_bold: true,
            parse_italic: true,
            parse_underline: true,
            parse_strikethrough: true,
            parse_link: true,
            format_html: true,
            ordered_lists: false,
        }
    }

    /// Defaults, but the assembled fragment is returned as is.
    pub const fn unformatted() -> Self {
        Self {
            format_html: false,
            ..Self::new()
        }
    }

    /// Read options from a JSON object using the camelCase keys.
    ///
    /// Keys that are absent keep their default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
