//! Line-oriented block scanner
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::formatter;
use crate::inline::{escape_html, escape_preserving_breaks, render_inline};
use crate::options::ParseOptions;
use crate::state::{ListKind, ListStack, ScanState};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+) (.*)$").expect("invalid heading regex"));

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^( *)([-*]+|\d+\.) (.*)$").expect("invalid list item regex")
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)").expect("invalid image regex"));

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 6;

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Heading { level: usize, text: &'a str },
    ListItem { indent: usize, kind: ListKind, text: &'a str },
    CodeFence,
    InlineCode(&'a str),
    HorizontalRule,
    BlockQuote(&'a str),
    Image { alt: &'a str, src: &'a str },
    Content(&'a str),
}

impl Line<'_> {
    fn name(&self) -> &'static str {
        match self {
            Line::Heading { .. } => "heading",
            Line::ListItem { .. } => "list_item",
            Line::CodeFence => "code_fence",
            Line::InlineCode(_) => "inline_code",
            Line::HorizontalRule => "horizontal_rule",
            Line::BlockQuote(_) => "block_quote",
            Line::Image { .. } => "image",
            Line::Content(_) => "content",
        }
    }
}

/// Test `line` against each enabled construct in priority order.
fn classify<'a>(line: &'a str, options: &ParseOptions) -> Line<'a> {
    if options.parse_heading
        && let Some(caps) = HEADING.captures(line)
    {
        let hashes = caps.get(1).map_or(0, |m| m.len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Line::Heading {
            level: hashes.min(MAX_HEADING_LEVEL),
            text: text.trim(),
        };
    }

    if options.parse_list
        && let Some(caps) = LIST_ITEM.captures(line)
    {
        let leading = caps.get(1).map_or(0, |m| m.len());
        let marker = caps.get(2).map_or("", |m| m.as_str());
        let kind = if options.ordered_lists && marker.ends_with('.') {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        };
        return Line::ListItem {
            indent: leading / 2,
            kind,
            text: caps.get(3).map_or("", |m| m.as_str().trim()),
        };
    }

    if options.parse_code_block && line.starts_with(FENCE) {
        return Line::CodeFence;
    }

    if options.parse_inline_code && line.starts_with('`') && !line.starts_with(FENCE) {
        return Line::InlineCode(&line[1..]);
    }

    if options.parse_horizontal_rule
        && (line.starts_with("---") || line.starts_with("***") || line.starts_with("___"))
    {
        return Line::HorizontalRule;
    }

    if options.parse_block_quote
        && let Some(rest) = line.strip_prefix('>')
    {
        return Line::BlockQuote(rest.trim());
    }

    if options.parse_image
        && let Some(caps) = IMAGE.captures(line)
    {
        return Line::Image {
            alt: caps.get(1).map_or("", |m| m.as_str()),
            src: caps.get(2).map_or("", |m| m.as_str()),
        };
    }

    Line::Content(line)
}

/// Per-call scanner. Holds the only mutable state of a parse and is dropped
/// when the call returns.
struct Scanner<'o> {
    options: &'o ParseOptions,
    state: ScanState,
    html: String,
}

impl<'o> Scanner<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Scanner {
            options,
            state: ScanState::default(),
            html: String::new(),
        }
    }

    fn run(mut self, input: &str) -> String {
        let input = input.trim();
        for (index, raw) in input.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let kind = if self.state.code_block {
                if line.starts_with(FENCE) {
                    Line::CodeFence
                } else {
                    Line::Content(line)
                }
            } else {
                classify(line, self.options)
            };
            tracing::trace!(line = index + 1, kind = kind.name(), "classified line");
            self.consume(kind);
        }
        self.finish()
    }

    fn consume(&mut self, line: Line<'_>) {
        match line {
            Line::Heading { level, text } => {
                let text = render_inline(text, self.options);
                self.html.push_str(&format!("<h{level}>{text}</h{level}>"));
            }
            Line::ListItem { indent, kind, text } => self.push_list_item(indent, kind, text),
            Line::CodeFence => {
                if self.state.code_block {
                    self.html.push_str("</code></pre>");
                } else {
                    self.html.push_str("<pre><code>");
                }
                self.state.code_block = !self.state.code_block;
            }
            Line::InlineCode(code) => {
                if self.state.inline_code {
                    self.html.push_str("</code>");
                }
                self.html.push_str("<code>");
                self.html.push_str(&escape_preserving_breaks(code));
                self.state.inline_code = true;
            }
            Line::HorizontalRule => self.html.push_str("<hr>"),
            Line::BlockQuote(text) => {
                if !self.state.block_quote {
                    self.html.push_str("<blockquote>");
                    self.state.block_quote = true;
                }
                self.html.push_str(&render_inline(text, self.options));
                self.html.push(' ');
            }
            Line::Image { alt, src } => {
                self.html.push_str(&format!(
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(src),
                    escape_html(alt)
                ));
            }
            Line::Content(text) => self.push_content(text),
        }
    }

    fn push_list_item(&mut self, indent: usize, kind: ListKind, text: &str) {
        let item = render_inline(text, self.options);
        if self.state.list.is_none() {
            self.html.push_str(kind.open_tag());
        }
        let list = self.state.list.get_or_insert_with(|| ListStack::new(kind));
        list.push_item(indent, kind, &item, &mut self.html);
    }

    /// Default branch: close any open list, then append the line to whichever
    /// construct is still open.
    fn push_content(&mut self, text: &str) {
        if let Some(list) = self.state.list.take() {
            list.close(&mut self.html);
        }

        if self.state.code_block {
            self.html.push_str(&escape_preserving_breaks(text));
            self.html.push('\n');
        } else if self.state.inline_code {
            self.html.push_str(&escape_preserving_breaks(text));
            self.html.push_str("</code>");
            self.state.inline_code = false;
        } else if self.state.block_quote || !text.trim().is_empty() {
            self.html.push_str(&render_inline(text, self.options));
            self.html.push(' ');
        }
    }

    fn finish(mut self) -> String {
        if let Some(list) = self.state.list.take() {
            tracing::debug!(depth = list.depth(), "closing list at end of input");
            list.close(&mut self.html);
        }
        if self.state.code_block {
            tracing::debug!("closing unterminated code fence at end of input");
            self.html.push_str("</code></pre>");
        }
        if self.state.block_quote {
            tracing::debug!("closing blockquote at end of input");
            self.html.push_str("</blockquote>");
        }
        if self.state.inline_code {
            tracing::debug!("single-line code span left open at end of input");
        }
        self.html
    }
}

/// Reusable Markdown to HTML converter.
///
/// Only the options live here; every call scans with fresh state, so one
/// `Parser` can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Convert `input`, then run the formatting pass if `format_html` is set.
    ///
    /// The formatting pass is the only step that can fail.
    pub fn parse(&self, input: &str) -> Result<String, Error> {
        let html = self.render(input);
        if self.options.format_html {
            formatter::format_html(&html)
        } else {
            Ok(html)
        }
    }

    /// Assemble the flat HTML fragment for `input`. Never fails.
    pub fn render(&self, input: &str) -> String {
        Scanner::new(&self.options).run(input)
    }
}
