//! Indenting pretty-printer for assembled HTML fragments.
//!
//! The fragment is tokenized with `quick-xml` and re-emitted with block
//! elements on their own lines. Tag structure is not repaired: the scanner's
//! accepted quirks (a dedented `<li>` left open, a stray `</li>`) pass through
//! unchanged, only their placement differs. Lexical errors from the tokenizer
//! are reported as [`Error::Format`].

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::Error;

const INDENT: &str = "  ";

/// Elements that start on their own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "ul",
];

/// Elements without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// Pretty-print an HTML fragment.
pub fn format_html(html: &str) -> Result<String, Error> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut printer = Printer::default();
    loop {
        let event = reader.read_event().map_err(|source| Error::Format {
            html: html.to_owned(),
            source,
        })?;
        match event {
            Event::Start(e) => {
                let name = tag_name(e.name().as_ref());
                let tag = format!("<{}>", String::from_utf8_lossy(&e));
                printer.open(&name, &tag);
            }
            Event::Empty(e) => {
                let name = tag_name(e.name().as_ref());
                let tag = format!("<{} />", String::from_utf8_lossy(&e));
                printer.open_void(&name, &tag);
            }
            Event::End(e) => {
                let name = tag_name(e.name().as_ref());
                printer.close(&name, &format!("</{name}>"));
            }
            Event::Text(e) => printer.text(&String::from_utf8_lossy(&e)),
            Event::GeneralRef(e) => {
                printer.text(&format!("&{};", String::from_utf8_lossy(&e)));
            }
            Event::CData(e) => {
                printer.text(&format!("<![CDATA[{}]]>", String::from_utf8_lossy(&e)));
            }
            Event::Comment(e) => {
                printer.text(&format!("<!--{}-->", String::from_utf8_lossy(&e)));
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                tracing::trace!("dropping declaration from HTML fragment");
            }
            Event::Eof => break,
        }
    }

    Ok(printer.finish())
}

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// An element opened outside `<pre>` and not yet closed.
#[derive(Debug)]
struct Frame {
    name: String,
    block: bool,
    has_block_child: bool,
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    open: Vec<Frame>,
    /// Nesting of `<pre>`; content is copied verbatim while non-zero.
    preformatted: usize,
    /// The next content starts on a new line.
    line_break: bool,
}

impl Printer {
    fn open(&mut self, name: &str, tag: &str) {
        if self.preformatted > 0 {
            if name == "pre" {
                self.preformatted += 1;
            }
            self.out.push_str(tag);
            return;
        }
        if is_void(name) {
            self.open_void(name, tag);
            return;
        }

        let block = is_block(name);
        if block {
            self.mark_block_child();
            self.start_line();
        } else {
            self.continue_line();
        }
        self.out.push_str(tag);
        self.open.push(Frame {
            name: name.to_owned(),
            block,
            has_block_child: false,
        });
        if name == "pre" {
            self.preformatted = 1;
        }
    }

    fn open_void(&mut self, name: &str, tag: &str) {
        if self.preformatted > 0 {
            self.out.push_str(tag);
            return;
        }
        if is_block(name) {
            self.mark_block_child();
            self.start_line();
            self.out.push_str(tag);
            self.line_break = true;
        } else {
            self.continue_line();
            self.out.push_str(tag);
        }
    }

    fn close(&mut self, name: &str, tag: &str) {
        if self.preformatted > 0 {
            if name == "pre" {
                self.preformatted -= 1;
            }
            if self.preformatted > 0 || name != "pre" {
                self.out.push_str(tag);
                return;
            }
        }

        let Some(position) = self.open.iter().rposition(|frame| frame.name == name) else {
            tracing::trace!(tag = name, "keeping unmatched closing tag inline");
            self.continue_line();
            self.out.push_str(tag);
            return;
        };
        // Elements above the match were never closed; they end here implicitly.
        self.open.truncate(position + 1);
        let Some(frame) = self.open.pop() else {
            return;
        };

        // A `</code>` on a new line would add content to the span.
        if frame.name != "code" && (frame.has_block_child || self.line_break) {
            self.start_line();
        } else if frame.block && frame.name != "pre" {
            self.trim_trailing_spaces();
        }
        self.out.push_str(tag);
        if frame.block {
            self.line_break = true;
        }
    }

    fn text(&mut self, text: &str) {
        if self.preformatted > 0 {
            self.out.push_str(text);
            return;
        }
        if self.line_break {
            let text = if self.in_code_span() {
                text
            } else {
                text.trim_start()
            };
            if text.is_empty() {
                return;
            }
            self.start_line();
            self.out.push_str(text);
        } else {
            self.out.push_str(text);
        }
    }

    fn finish(mut self) -> String {
        self.trim_trailing_spaces();
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out
    }

    fn mark_block_child(&mut self) {
        if let Some(parent) = self.open.last_mut() {
            parent.has_block_child = true;
        }
    }

    /// Indentation depth: one level per open block element.
    fn depth(&self) -> usize {
        self.open.iter().filter(|frame| frame.block).count()
    }

    fn start_line(&mut self) {
        self.trim_trailing_spaces();
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth() {
            self.out.push_str(INDENT);
        }
        self.line_break = false;
    }

    fn continue_line(&mut self) {
        if self.line_break {
            self.start_line();
        }
    }

    /// Whitespace inside an open `<code>` span is content.
    fn in_code_span(&self) -> bool {
        self.open.iter().any(|frame| frame.name == "code")
    }

    fn trim_trailing_spaces(&mut self) {
        if self.in_code_span() {
            return;
        }
        let len = self.out.trim_end_matches(' ').len();
        self.out.truncate(len);
    }
}
