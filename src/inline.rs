//! Inline span transformer.
//!
//! Spans are converted by a fixed sequence of global, non-greedy regex
//! substitutions over a single line. Each rule runs on the output of the
//! previous one, so a later rule can match inside markup an earlier rule
//! inserted (for example italic markers inside a link URL). This is a known
//! limitation and is kept as is.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::ParseOptions;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid bold regex"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("invalid italic regex"));

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("invalid underline regex"));

static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.*?)~~").expect("invalid strikethrough regex"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("invalid link regex"));

/// One substitution of the span pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Link,
}

impl InlineRule {
    /// Application order. Italic must follow bold so that `**` pairs are
    /// consumed before single asterisks are considered.
    pub const PIPELINE: [InlineRule; 5] = [
        InlineRule::Bold,
        InlineRule::Italic,
        InlineRule::Underline,
        InlineRule::Strikethrough,
        InlineRule::Link,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            InlineRule::Bold => &BOLD,
            InlineRule::Italic => &ITALIC,
            InlineRule::Underline => &UNDERLINE,
            InlineRule::Strikethrough => &STRIKETHROUGH,
            InlineRule::Link => &LINK,
        }
    }

    fn replacement(self) -> &'static str {
        match self {
            InlineRule::Bold => "<strong>${1}</strong>",
            InlineRule::Italic => "<em>${1}</em>",
            InlineRule::Underline => "<u>${1}</u>",
            InlineRule::Strikethrough => "<s>${1}</s>",
            InlineRule::Link => r#"<a href="${2}">${1}</a>"#,
        }
    }

    /// Whether the toggle for this rule is on.
    pub fn is_enabled(self, options: &ParseOptions) -> bool {
        match self {
            InlineRule::Bold => options.parse_bold,
            InlineRule::Italic => options.parse_italic,
            InlineRule::Underline => options.parse_underline,
            InlineRule::Strikethrough => options.parse_strikethrough,
            InlineRule::Link => options.parse_link,
        }
    }

    /// Replace every match of this rule in `text`.
    pub fn apply(self, text: &str) -> String {
        self.pattern()
            .replace_all(text, self.replacement())
            .into_owned()
    }
}

/// Escape a text fragment and convert its inline spans to HTML tags.
///
/// Disabled rules are skipped and their markers stay in the text.
pub fn render_inline(text: &str, options: &ParseOptions) -> String {
    let mut html = escape_html(text);
    for rule in InlineRule::PIPELINE {
        if rule.is_enabled(options) {
            html = rule.apply(&html);
        }
    }
    html
}

/// Replace the five reserved HTML characters with entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape code content, turning embedded line breaks into `<br>`.
pub fn escape_preserving_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(text: &str) -> String {
        render_inline(text, &ParseOptions::default())
    }

    #[test]
    fn converts_each_span_kind() {
        assert_eq!(inline("**b**"), "<strong>b</strong>");
        assert_eq!(inline("*i*"), "<em>i</em>");
        assert_eq!(inline("__u__"), "<u>u</u>");
        assert_eq!(inline("~~s~~"), "<s>s</s>");
        assert_eq!(inline("[home](/index)"), r#"<a href="/index">home</a>"#);
    }

    #[test]
    fn matching_is_non_greedy_and_global() {
        assert_eq!(
            inline("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(inline("*a* *b*"), "<em>a</em> <em>b</em>");
    }

    #[test]
    fn bold_runs_before_italic() {
        assert_eq!(
            inline("**bold** then *it*"),
            "<strong>bold</strong> then <em>it</em>"
        );
    }

    #[test]
    fn later_rules_see_earlier_output() {
        // Italic has already rewritten the asterisks by the time the link rule
        // captures the URL.
        assert_eq!(
            inline("[x](/a*b*c)"),
            r#"<a href="/a<em>b</em>c">x</a>"#
        );
    }

    #[test]
    fn disabled_rule_leaves_markers() {
        let options = ParseOptions {
            parse_bold: false,
            ..ParseOptions::default()
        };
        let html = render_inline("**x**", &options);
        assert!(!html.contains("<strong>"));
        assert_eq!(html, "<em></em>x<em></em>");

        let options = ParseOptions {
            parse_link: false,
            ..ParseOptions::default()
        };
        assert_eq!(render_inline("[a](b)", &options), "[a](b)");
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(inline("2 * 3"), "2 * 3");
        assert_eq!(inline("~~open"), "~~open");
    }

    #[test]
    fn text_is_escaped_before_spans() {
        assert_eq!(inline("**a < b**"), "<strong>a &lt; b</strong>");
        assert_eq!(
            inline("[q](/s?a=1&b=2)"),
            r#"<a href="/s?a=1&amp;b=2">q</a>"#
        );
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_html(r#"& < > " '"#),
            "&amp; &lt; &gt; &quot; &#039;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn escaping_runs_once() {
        // An entity in the input is text, so its ampersand is escaped once.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn preserves_line_breaks_in_code() {
        assert_eq!(escape_preserving_breaks("a<\nb"), "a&lt;<br>b");
    }
}
