//! Per-tag balancing policy.
//!
//! Tags without an entry behave as ordinary nestable inline tags: never auto-closed,
//! never cross-closing.

/// Static behavior of one tag name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagRule {
    pub name: &'static str,
    /// Void element: opened and closed at once, never left on the stack.
    pub autoclose: bool,
    /// `false` means a second open instance closes the first one.
    pub nestable: bool,
    /// May appear in `head` without forcing the body to start.
    pub in_head: bool,
    /// Ancestors that, sitting between two instances, allow a non-nestable tag to nest.
    pub reentry_context: &'static [&'static str],
    /// Single-slot tag: a new instance always closes the previous open one.
    pub next_close: bool,
    /// Opening this tag closes any open heading or paragraph.
    pub closes_blocks: bool,
    /// A heading or paragraph, closed by `closes_blocks` tags.
    pub cross_closable: bool,
    /// Whitespace directly after this tag opens carries no meaning.
    pub wall: bool,
    /// The sink wants the raw source between the start and end tag.
    pub inner_html: bool,
}

impl TagRule {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            autoclose: false,
            nestable: true,
            in_head: false,
            reentry_context: &[],
            next_close: false,
            closes_blocks: false,
            cross_closable: false,
            wall: false,
            inner_html: false,
        }
    }

    const fn autoclose(mut self) -> Self {
        self.autoclose = true;
        self
    }

    const fn single(mut self, reentry_context: &'static [&'static str]) -> Self {
        self.nestable = false;
        self.reentry_context = reentry_context;
        self
    }

    const fn in_head(mut self) -> Self {
        self.in_head = true;
        self
    }

    const fn next_close(mut self) -> Self {
        self.next_close = true;
        self
    }

    const fn closes_blocks(mut self) -> Self {
        self.closes_blocks = true;
        self
    }

    const fn block(mut self) -> Self {
        self.closes_blocks = true;
        self.cross_closable = true;
        self
    }

    const fn wall(mut self) -> Self {
        self.wall = true;
        self
    }

    const fn inner_html(mut self) -> Self {
        self.inner_html = true;
        self
    }
}

const TABLE_CONTEXT: &[&str] = &["table"];
const LIST_CONTEXT: &[&str] = &["ol", "ul"];
const DL_CONTEXT: &[&str] = &["dl"];

// Sorted by name; `rule_for` binary-searches it.
static TAG_RULES: &[TagRule] = &[
    TagRule::new("a").single(&[]).inner_html(),
    TagRule::new("address").wall(),
    TagRule::new("area").autoclose(),
    TagRule::new("base").autoclose().in_head(),
    TagRule::new("bgsound").autoclose().in_head(),
    TagRule::new("blockquote").wall(),
    TagRule::new("body").wall(),
    TagRule::new("br").autoclose(),
    TagRule::new("center").wall(),
    TagRule::new("dd").single(DL_CONTEXT).wall(),
    TagRule::new("div").wall().inner_html(),
    TagRule::new("dl").closes_blocks().wall(),
    TagRule::new("dt").single(DL_CONTEXT).wall(),
    TagRule::new("form").single(&[]).wall().inner_html(),
    TagRule::new("h1").single(&[]).block().wall(),
    TagRule::new("h2").single(&[]).block().wall(),
    TagRule::new("h3").single(&[]).block().wall(),
    TagRule::new("h4").single(&[]).block().wall(),
    TagRule::new("h5").single(&[]).block().wall(),
    TagRule::new("h6").single(&[]).block().wall(),
    TagRule::new("head").in_head(),
    TagRule::new("hr").autoclose().closes_blocks().wall(),
    TagRule::new("html").in_head(),
    TagRule::new("img").autoclose(),
    TagRule::new("input").autoclose(),
    TagRule::new("li").single(LIST_CONTEXT).wall().inner_html(),
    TagRule::new("link").autoclose().in_head(),
    TagRule::new("meta").autoclose().in_head(),
    TagRule::new("noscript").in_head(),
    TagRule::new("ol").closes_blocks().wall().inner_html(),
    TagRule::new("option").next_close(),
    TagRule::new("p").single(&[]).block().wall().inner_html(),
    TagRule::new("script").in_head(),
    TagRule::new("select").inner_html(),
    TagRule::new("span").inner_html(),
    TagRule::new("style").in_head(),
    TagRule::new("table").closes_blocks().wall().inner_html(),
    TagRule::new("tbody").single(TABLE_CONTEXT).wall(),
    TagRule::new("td").single(TABLE_CONTEXT).wall().inner_html(),
    TagRule::new("tfoot").single(TABLE_CONTEXT).wall(),
    TagRule::new("th").single(TABLE_CONTEXT).wall().inner_html(),
    TagRule::new("thead").single(TABLE_CONTEXT).wall(),
    TagRule::new("title").in_head().next_close(),
    TagRule::new("tr").single(TABLE_CONTEXT).wall().inner_html(),
    TagRule::new("ul").closes_blocks().wall().inner_html(),
];

/// Rule for a lowercase tag name, if the tag has one.
pub fn rule_for(name: &str) -> Option<&'static TagRule> {
    TAG_RULES
        .binary_search_by(|rule| rule.name.cmp(name))
        .ok()
        .map(|index| &TAG_RULES[index])
}

pub fn is_autoclose(name: &str) -> bool {
    rule_for(name).is_some_and(|rule| rule.autoclose)
}

pub fn is_cross_closable(name: &str) -> bool {
    rule_for(name).is_some_and(|rule| rule.cross_closable)
}

pub fn wants_inner_html(name: &str) -> bool {
    rule_for(name).is_some_and(|rule| rule.inner_html)
}
