//! Transient scan state carried between lines of a single parse
use std::cmp::Ordering;

/// Kind of an open list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    pub fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// Open list levels, outermost first. Never empty: a list that is not open
/// is represented by the absence of a `ListStack`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStack {
    levels: Vec<ListKind>,
}

impl ListStack {
    /// Start a list. The caller has already emitted `kind.open_tag()`.
    pub fn new(kind: ListKind) -> Self {
        ListStack { levels: vec![kind] }
    }

    /// Current nesting depth; zero for a flat list.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Emit a list item at `indent` relative to the current depth.
    ///
    /// A deeper item opens exactly one nested level whatever the jump. A
    /// shallower item closes the levels in between and leaves its own `<li>`
    /// open; the matching `</li>` only appears if a later dedent supplies it.
    pub fn push_item(&mut self, indent: usize, kind: ListKind, item: &str, html: &mut String) {
        match indent.cmp(&self.depth()) {
            Ordering::Equal => {
                html.push_str("<li>");
                html.push_str(item);
                html.push_str("</li>");
            }
            Ordering::Greater => {
                html.push_str(kind.open_tag());
                html.push_str("<li>");
                html.push_str(item);
                html.push_str("</li>");
                self.levels.push(kind);
            }
            Ordering::Less => {
                for _ in indent..self.depth() {
                    if let Some(closed) = self.levels.pop() {
                        html.push_str("</li>");
                        html.push_str(closed.close_tag());
                    }
                }
                html.push_str("<li>");
                html.push_str(item);
            }
        }
    }

    /// Close every open level, innermost first.
    pub fn close(self, html: &mut String) {
        for kind in self.levels.into_iter().rev() {
            html.push_str(kind.close_tag());
        }
    }
}

/// Open constructs while scanning. Lists, code and blockquotes are tracked
/// independently; the scanner decides per line which one drives it.
#[derive(Debug, Default)]
pub struct ScanState {
    pub list: Option<ListStack>,
    pub code_block: bool,
    /// A leading-backtick line opened `<code>` that the next default-branch
    /// line will close.
    pub inline_code: bool,
    pub block_quote: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_items_share_one_level() {
        let mut html = String::new();
        let mut list = ListStack::new(ListKind::Unordered);
        list.push_item(0, ListKind::Unordered, "a", &mut html);
        list.push_item(0, ListKind::Unordered, "b", &mut html);
        assert_eq!(list.depth(), 0);
        list.close(&mut html);
        assert_eq!(html, "<li>a</li><li>b</li></ul>");
    }

    #[test]
    fn multi_level_jump_opens_one_level() {
        let mut html = String::new();
        let mut list = ListStack::new(ListKind::Unordered);
        list.push_item(3, ListKind::Unordered, "deep", &mut html);
        assert_eq!(list.depth(), 1);
        assert_eq!(html, "<ul><li>deep</li>");
    }

    #[test]
    fn dedent_closes_levels_and_leaves_item_open() {
        let mut html = String::new();
        let mut list = ListStack::new(ListKind::Unordered);
        list.push_item(1, ListKind::Unordered, "b", &mut html);
        list.push_item(2, ListKind::Unordered, "c", &mut html);
        html.clear();
        list.push_item(0, ListKind::Unordered, "d", &mut html);
        assert_eq!(list.depth(), 0);
        assert_eq!(html, "</li></ul></li></ul><li>d");
    }

    #[test]
    fn levels_close_with_their_own_kind() {
        let mut html = String::new();
        let mut list = ListStack::new(ListKind::Unordered);
        list.push_item(1, ListKind::Ordered, "one", &mut html);
        list.close(&mut html);
        assert_eq!(html, "<ol><li>one</li></ol></ul>");
    }
}
