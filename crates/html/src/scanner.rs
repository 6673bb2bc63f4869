//! Tag scanner: turns markup into tag/attribute/text calls on a [`TagSink`].
//!
//! One pass over the input. Each iteration handles one of three regimes:
//! - literal text up to the next `<` that starts markup,
//! - `<!` (comment, doctype) and `<?` (processing instruction),
//! - start and end tags.
//!
//! Malformed markup never fails the scan. Missing `html`/`head`/`body` wrappers are
//! synthesized, unmatched end tags are dropped, and the [`rules`](crate::rules) table
//! decides which open tags a new tag closes. An unterminated comment, processing
//! instruction, tag, or raw-text element stops the scan; whatever is still open is then
//! closed so the sink always sees a balanced stream.
//!
//! Invariant: every `open_tag` is matched by exactly one `close_tag` by the time
//! [`Scanner::run`] returns.

use crate::attributes::{Attribute, parse_attributes};
use crate::boundary::find_tag_end;
use crate::config::ScannerConfig;
use crate::cursor::{SourceCursor, starts_with_ignore_ascii_case_at};
use crate::entities::decode_entities;
use crate::phase::DocumentPhase;
use crate::rawtext::{RawTextKind, find_raw_text_end};
use crate::rules::{self, TagRule, rule_for};
use crate::sink::{COMMENT_TAG, DOCTYPE_TAG, TEXT_TAG, TagSink};
use crate::stack::{OpenTagFrame, OpenTagStack};
use memchr::{memchr, memmem};
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const LOG_TARGET: &str = "html.scan";

macro_rules! narrate {
    ($scan:expr, $($arg:tt)+) => {
        if $scan.config.trace {
            log::trace!(target: LOG_TARGET, $($arg)+);
        }
    };
}

/// Why a scan stopped before the end of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TruncationKind {
    UnterminatedComment,
    UnterminatedProcessingInstruction,
    UnterminatedTag,
    UnterminatedRawText(RawTextKind),
    Aborted,
}

impl fmt::Display for TruncationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedComment => f.write_str("unterminated comment"),
            Self::UnterminatedProcessingInstruction => {
                f.write_str("unterminated processing instruction")
            }
            Self::UnterminatedTag => f.write_str("open angle bracket without `>`"),
            Self::UnterminatedRawText(kind) => write!(f, "unterminated <{}>", kind.tag_name()),
            Self::Aborted => f.write_str("scan aborted"),
        }
    }
}

/// Where and why scanning stopped early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
    pub kind: TruncationKind,
    /// Byte offset of the construct that could not be finished.
    pub offset: usize,
    pub line: u32,
}

/// Summary of one scan. Informational only; the event stream is always balanced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Line the cursor stopped on.
    pub lines: u32,
    pub truncated: Option<Truncation>,
    /// Tags closed without a matching end tag (balancing policy or end of input).
    pub forced_closures: usize,
    /// End tags with no matching open tag.
    pub discarded_end_tags: usize,
    pub max_depth: usize,
}

/// Reusable scanner. Every [`Scanner::run`] starts from a fresh cursor, stack, and phase.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    config: ScannerConfig,
    abort: Option<Arc<AtomicBool>>,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            abort: None,
        }
    }

    /// Check `flag` once per main-loop iteration and stop (as a truncation) when it is set.
    pub fn with_abort(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn run<S: TagSink>(&self, input: &str, sink: &mut S) -> ScanReport {
        let mut scan = Scan::new(&self.config, input, sink);
        if let ControlFlow::Break(truncation) = scan.run(self.abort.as_deref()) {
            scan.truncate(truncation);
        }
        scan.finish()
    }
}

/// Scan `input` with the default configuration.
pub fn scan<S: TagSink>(input: &str, sink: &mut S) -> ScanReport {
    Scanner::default().run(input, sink)
}

/// Scan raw bytes; invalid UTF-8 is replaced with U+FFFD first.
pub fn scan_bytes<S: TagSink>(input: &[u8], sink: &mut S) -> ScanReport {
    let text = String::from_utf8_lossy(input);
    scan(&text, sink)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Markup {
    Bang,
    ProcessingInstruction,
    StartTag,
    EndTag,
}

/// What the `<` at `at` starts, if anything. A `<` that starts nothing is plain text.
fn classify(bytes: &[u8], at: usize) -> Option<Markup> {
    match bytes.get(at + 1)? {
        b'!' => Some(Markup::Bang),
        b'?' => Some(Markup::ProcessingInstruction),
        c if c.is_ascii_alphabetic() => Some(Markup::StartTag),
        b'/' if bytes.get(at + 2).is_some_and(u8::is_ascii_alphabetic) => Some(Markup::EndTag),
        _ => None,
    }
}

fn next_markup(bytes: &[u8], from: usize) -> Option<(usize, Markup)> {
    let mut i = from;
    while i < bytes.len() {
        i += memchr(b'<', &bytes[i..])?;
        if let Some(markup) = classify(bytes, i) {
            return Some((i, markup));
        }
        i += 1;
    }
    None
}

fn tag_name_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start;
    while j < bytes.len()
        && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'-' || bytes[j] == b'_' || bytes[j] == b':')
    {
        j += 1;
    }
    j
}

/// Split a trailing self-closing `/` off the attribute span (`<br/>`, `<img src="x" />`).
///
/// The `/` only counts when it follows the tag name, a blank, or a closing quote. Glued
/// to an unquoted value it is part of that value (`<a href=/dir/>`), and so is a `/`
/// right after `=` (`<a href=/>`).
fn strip_self_closing(span: &str) -> (&str, bool) {
    let trimmed = span.trim_end();
    let Some(rest) = trimmed.strip_suffix('/') else {
        return (span, false);
    };
    let detached = rest.is_empty()
        || rest.ends_with(|c: char| c.is_ascii_whitespace() || c == '"' || c == '\'');
    if !detached || rest.trim_end().ends_with('=') {
        return (span, false);
    }
    (rest, true)
}

fn is_wrapper(name: &str) -> bool {
    matches!(name, "html" | "head" | "body")
}

fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_whitespace())
}

struct Scan<'a, 's, S: TagSink> {
    config: &'s ScannerConfig,
    cursor: SourceCursor<'a>,
    stack: OpenTagStack<S::Handle>,
    phase: DocumentPhase,
    sink: &'s mut S,
    report: ScanReport,
    /// The last thing emitted was the opening of a wall tag.
    after_wall: bool,
}

impl<'a, 's, S: TagSink> Scan<'a, 's, S> {
    fn new(config: &'s ScannerConfig, input: &'a str, sink: &'s mut S) -> Self {
        Self {
            config,
            cursor: SourceCursor::new(input),
            stack: OpenTagStack::default(),
            phase: DocumentPhase::PreHtml,
            sink,
            report: ScanReport::default(),
            after_wall: false,
        }
    }

    fn run(&mut self, abort: Option<&AtomicBool>) -> ControlFlow<Truncation> {
        while !self.cursor.at_end() {
            if abort.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return ControlFlow::Break(self.truncation(TruncationKind::Aborted));
            }
            if let ControlFlow::Break(kind) = self.step() {
                return ControlFlow::Break(self.truncation(kind));
            }
        }
        ControlFlow::Continue(())
    }

    fn truncation(&self, kind: TruncationKind) -> Truncation {
        Truncation {
            kind,
            offset: self.cursor.pos(),
            line: self.cursor.line(),
        }
    }

    fn step(&mut self) -> ControlFlow<TruncationKind> {
        let bytes = self.cursor.bytes();
        let pos = self.cursor.pos();
        let markup = next_markup(bytes, pos);
        let text_end = markup.map_or(bytes.len(), |(at, _)| at);
        if text_end > pos {
            self.text_run(pos, text_end);
            self.cursor.advance_to(text_end);
            return ControlFlow::Continue(());
        }
        match markup {
            Some((_, Markup::Bang)) => self.bang(pos),
            Some((_, Markup::ProcessingInstruction)) => self.processing_instruction(pos),
            Some((_, Markup::StartTag)) => self.start_tag(pos),
            Some((_, Markup::EndTag)) => self.end_tag(pos),
            None => ControlFlow::Continue(()),
        }
    }

    fn text_run(&mut self, start: usize, end: usize) {
        let raw = &self.cursor.src()[start..end];
        let line = self.cursor.line();
        if is_blank(raw) {
            if !self.phase.keeps_whitespace() {
                return;
            }
            if self.after_wall && self.phase.body_started() {
                narrate!(self, "drop whitespace after wall tag at line {line}");
                return;
            }
        } else if !self.inside_head_element() {
            self.ensure_body(start, line);
        }
        let decoded = decode_entities(raw);
        self.emit_text(&decoded, line);
    }

    /// Text inside `title`, `noscript`, and friends stays in the head.
    fn inside_head_element(&self) -> bool {
        self.phase == DocumentPhase::InHead
            && self.stack.current().is_some_and(|frame| frame.name != "head")
    }

    fn emit_text(&mut self, text: &str, line: u32) {
        let handle = self.sink.open_tag(TEXT_TAG, line);
        self.sink.set_text(handle, text);
        self.sink.close_tag(handle);
        self.after_wall = false;
    }

    fn bang(&mut self, pos: usize) -> ControlFlow<TruncationKind> {
        let bytes = self.cursor.bytes();
        let src = self.cursor.src();
        let line = self.cursor.line();
        let start = pos + 2;

        if self.phase == DocumentPhase::PreHtml
            && starts_with_ignore_ascii_case_at(bytes, start, b"doctype")
        {
            let Some(rel) = memchr(b'>', &bytes[start..]) else {
                return ControlFlow::Break(TruncationKind::UnterminatedComment);
            };
            narrate!(self, "doctype at line {line}");
            let handle = self.sink.open_tag(DOCTYPE_TAG, line);
            self.sink.close_tag(handle);
            self.cursor.advance_to(start + rel + 1);
            return ControlFlow::Continue(());
        }

        let mut body_start = start;
        while bytes[body_start..].starts_with(b"--") {
            body_start += 2;
        }
        let hyphens = body_start - start;

        // The comment ends at the first `>` preceded by at least `hyphens` dashes. The
        // dashes may overlap the opening ones, so `<!------>` is one empty comment.
        let mut from = body_start;
        let gt = loop {
            let Some(rel) = memchr(b'>', &bytes[from..]) else {
                return ControlFlow::Break(TruncationKind::UnterminatedComment);
            };
            let gt = from + rel;
            let dashes = bytes[start..gt]
                .iter()
                .rev()
                .take_while(|&&b| b == b'-')
                .count();
            if dashes >= hyphens {
                break gt;
            }
            from = gt + 1;
        };

        let body_end = (gt - hyphens).max(body_start);
        let body = &src[body_start..body_end];
        narrate!(self, "comment at line {line} ({} bytes)", body.len());
        let handle = self.sink.open_tag(COMMENT_TAG, line);
        if !body.is_empty() {
            self.sink.set_text(handle, body);
        }
        self.sink.close_tag(handle);
        self.cursor.advance_to(gt + 1);
        ControlFlow::Continue(())
    }

    fn processing_instruction(&mut self, pos: usize) -> ControlFlow<TruncationKind> {
        let bytes = self.cursor.bytes();
        let Some(rel) = memmem::find(&bytes[pos + 2..], b"?>") else {
            return ControlFlow::Break(TruncationKind::UnterminatedProcessingInstruction);
        };
        narrate!(self, "skip processing instruction at line {}", self.cursor.line());
        self.cursor.advance_to(pos + 2 + rel + 2);
        ControlFlow::Continue(())
    }

    fn start_tag(&mut self, pos: usize) -> ControlFlow<TruncationKind> {
        let bytes = self.cursor.bytes();
        let src = self.cursor.src();
        let name_end = tag_name_end(bytes, pos + 1);
        let Some(gt) = find_tag_end(bytes, name_end) else {
            return ControlFlow::Break(TruncationKind::UnterminatedTag);
        };
        let name = src[pos + 1..name_end].to_ascii_lowercase();
        let (span, self_closing) = strip_self_closing(&src[name_end..gt]);
        let attributes = parse_attributes(span);
        let line = self.cursor.line();
        let content_start = gt + 1;
        self.cursor.advance_to(content_start);
        narrate!(self, "start tag <{name}> at line {line}");

        match name.as_str() {
            "html" => {
                if self.phase == DocumentPhase::PreHtml {
                    self.open_frame(&name, &attributes, line, pos, content_start);
                    self.phase = DocumentPhase::PreHead;
                } else {
                    narrate!(self, "ignore duplicate <html>");
                }
                return ControlFlow::Continue(());
            }
            "head" => {
                self.ensure_html(pos, line);
                if self.phase == DocumentPhase::PreHead {
                    self.open_frame(&name, &attributes, line, pos, content_start);
                    self.phase = DocumentPhase::InHead;
                } else {
                    narrate!(self, "ignore late <head>");
                }
                return ControlFlow::Continue(());
            }
            "body" => {
                self.ensure_html(pos, line);
                self.leave_head(pos, line);
                if self.phase == DocumentPhase::PostHead {
                    self.open_frame(&name, &attributes, line, pos, content_start);
                    self.phase = DocumentPhase::InBody;
                    self.after_wall = true;
                } else {
                    narrate!(self, "ignore late <body>");
                }
                return ControlFlow::Continue(());
            }
            _ => {}
        }

        let rule = rule_for(&name);
        self.ensure_html(pos, line);
        if rule.is_some_and(|rule| rule.in_head) {
            if self.phase == DocumentPhase::PreHead {
                self.open_synthesized("head", pos, line);
                self.phase = DocumentPhase::InHead;
            }
        } else {
            self.ensure_body(pos, line);
        }

        if let Some(rule) = rule {
            self.balance_before_open(&name, rule, pos);
        }
        if let Some(max_depth) = self.config.max_depth
            && self.content_depth() >= max_depth
            && self.stack.current().is_some_and(|frame| !is_wrapper(&frame.name))
            && let Some(index) = self.stack.len().checked_sub(1)
        {
            narrate!(self, "depth limit {max_depth} reached");
            self.close_down_to(index, pos, false);
        }

        let raw_text = RawTextKind::from_tag_name(&name);
        let autoclose = match rule {
            Some(rule) => rule.autoclose,
            None => self_closing && raw_text.is_none(),
        };
        let wall = rule.is_some_and(|rule| rule.wall);
        if autoclose {
            let handle = self.open_handle(&name, &attributes, line);
            self.sink.close_tag(handle);
            self.after_wall = wall;
            return ControlFlow::Continue(());
        }

        self.open_frame(&name, &attributes, line, pos, content_start);
        self.after_wall = wall;

        match raw_text {
            Some(kind) => self.raw_text(kind),
            None => ControlFlow::Continue(()),
        }
    }

    /// Open frames below the `html`/`head`/`body` wrappers.
    fn content_depth(&self) -> usize {
        self.stack.iter_names().filter(|name| !is_wrapper(name)).count()
    }

    /// Apply cross-close, single-slot, and non-nesting rules for a tag about to open.
    fn balance_before_open(&mut self, name: &str, rule: &TagRule, at: usize) {
        if rule.closes_blocks
            && let Some(index) = self.stack.find_by(rules::is_cross_closable)
        {
            narrate!(self, "<{name}> cross-closes open block");
            self.close_down_to(index, at, false);
        }
        if rule.next_close {
            if let Some(index) = self.stack.find(name) {
                narrate!(self, "<{name}> closes previous <{name}>");
                self.close_down_to(index, at, false);
            }
        } else if !rule.nestable
            && let Some(index) = self.stack.find(name)
            && !self.stack.has_between(index, rule.reentry_context)
        {
            narrate!(self, "<{name}> auto-closes open <{name}>");
            self.close_down_to(index, at, false);
        }
    }

    fn raw_text(&mut self, kind: RawTextKind) -> ControlFlow<TruncationKind> {
        let start = self.cursor.pos();
        let Some(end) = find_raw_text_end(self.cursor.bytes(), start, kind) else {
            return ControlFlow::Break(TruncationKind::UnterminatedRawText(kind));
        };
        let content = &self.cursor.src()[start..end.content_end];
        let line = self.cursor.line();
        if !content.is_empty() {
            if kind.decodes_entities() && self.config.decode_textarea {
                let decoded = decode_entities(content);
                self.emit_text(&decoded, line);
            } else {
                self.emit_text(content, line);
            }
        }
        if let Some(index) = self.stack.find(kind.tag_name()) {
            self.close_down_to(index, end.content_end, true);
        }
        self.cursor.advance_to(end.resume_at);
        ControlFlow::Continue(())
    }

    fn end_tag(&mut self, pos: usize) -> ControlFlow<TruncationKind> {
        let bytes = self.cursor.bytes();
        let src = self.cursor.src();
        let name_end = tag_name_end(bytes, pos + 2);
        let Some(gt) = find_tag_end(bytes, name_end) else {
            return ControlFlow::Break(TruncationKind::UnterminatedTag);
        };
        let name = src[pos + 2..name_end].to_ascii_lowercase();
        self.cursor.advance_to(gt + 1);

        let Some(index) = self.stack.find(&name) else {
            narrate!(self, "discard unmatched </{name}>");
            self.report.discarded_end_tags += 1;
            return ControlFlow::Continue(());
        };
        narrate!(self, "end tag </{name}>");

        match name.as_str() {
            // Wrappers stay open until the end so trailing junk still lands in the body.
            "body" => {
                self.close_above(index, pos);
                self.phase = self.phase.max(DocumentPhase::PostBody);
            }
            "html" => {
                let keep = self.stack.find("body").unwrap_or(index);
                self.close_above(keep, pos);
                self.phase = DocumentPhase::PostHtml;
            }
            _ => self.close_down_to(index, pos, true),
        }
        self.after_wall = false;
        ControlFlow::Continue(())
    }

    fn ensure_html(&mut self, at: usize, line: u32) {
        if self.phase == DocumentPhase::PreHtml {
            self.open_synthesized("html", at, line);
            self.phase = DocumentPhase::PreHead;
        }
    }

    fn leave_head(&mut self, at: usize, line: u32) {
        match self.phase {
            DocumentPhase::PreHead => {
                narrate!(self, "synthesize empty <head>");
                let handle = self.sink.open_tag("head", line);
                self.sink.close_tag(handle);
                self.phase = DocumentPhase::PostHead;
            }
            DocumentPhase::InHead => {
                if let Some(index) = self.stack.find("head") {
                    self.close_down_to(index, at, false);
                }
                self.phase = DocumentPhase::PostHead;
            }
            _ => {}
        }
    }

    fn ensure_body(&mut self, at: usize, line: u32) {
        self.ensure_html(at, line);
        self.leave_head(at, line);
        if self.phase == DocumentPhase::PostHead {
            self.open_synthesized("body", at, line);
            self.phase = DocumentPhase::InBody;
        }
    }

    fn open_synthesized(&mut self, name: &str, at: usize, line: u32) {
        narrate!(self, "synthesize <{name}> at line {line}");
        self.open_frame(name, &[], line, at, at);
    }

    fn open_handle(&mut self, name: &str, attributes: &[Attribute], line: u32) -> S::Handle {
        let handle = self.sink.open_tag(name, line);
        for (attr, value) in attributes {
            self.sink.set_attribute(handle, attr, value);
        }
        handle
    }

    fn open_frame(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        line: u32,
        source_position: usize,
        content_start: usize,
    ) {
        let handle = self.open_handle(name, attributes, line);
        self.stack.push(OpenTagFrame {
            name: name.to_string(),
            handle,
            source_position,
            content_start,
        });
    }

    /// Close every frame above `index`, leaving `index` open.
    fn close_above(&mut self, index: usize, at: usize) {
        while self.stack.len() > index + 1 {
            self.close_top(at, false);
        }
    }

    /// Close frames from the top down to and including `index`.
    ///
    /// `explicit` marks the frame at `index` as closed by its own end tag; every other
    /// frame closed here counts as forced.
    fn close_down_to(&mut self, index: usize, at: usize, explicit: bool) {
        self.close_above(index, at);
        if self.stack.len() == index + 1 {
            self.close_top(at, explicit);
        }
    }

    fn close_top(&mut self, at: usize, explicit: bool) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if !explicit {
            self.report.forced_closures += 1;
            narrate!(
                self,
                "force-close <{}> opened at offset {}",
                frame.name,
                frame.source_position
            );
        }
        if self.config.capture_inner_html && rules::wants_inner_html(&frame.name) {
            let end = at.max(frame.content_start);
            let raw = &self.cursor.src()[frame.content_start..end];
            self.sink.capture_inner_html(frame.handle, raw);
        }
        self.sink.close_tag(frame.handle);
        if frame.name == "head" && self.phase == DocumentPhase::InHead {
            self.phase = DocumentPhase::PostHead;
        }
    }

    fn truncate(&mut self, truncation: Truncation) {
        log::debug!(
            target: LOG_TARGET,
            "scan truncated at line {} (offset {}): {}",
            truncation.line,
            truncation.offset,
            truncation.kind
        );
        self.report.truncated = Some(truncation);
    }

    fn finish(mut self) -> ScanReport {
        let at = self
            .report
            .truncated
            .map_or(self.cursor.src().len(), |t| t.offset);
        let unbalanced = self
            .stack
            .iter_names()
            .filter(|name| !is_wrapper(name))
            .count();
        if unbalanced > 0 {
            log::debug!(
                target: LOG_TARGET,
                "unbalanced stack at end of input: [{}]",
                self.stack.iter_names().collect::<Vec<_>>().join(" ")
            );
        }
        while !self.stack.is_empty() {
            self.close_top(at, false);
        }
        self.report.lines = self.cursor.line();
        self.report.max_depth = self.stack.max_depth();
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Event, EventLog};
    use crate::tree::{Node, parse_document_with};

    fn lines(input: &str) -> Vec<String> {
        let mut log = EventLog::new();
        scan(input, &mut log);
        log.events().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classify_recognizes_markup_starts() {
        assert_eq!(classify(b"<!--", 0), Some(Markup::Bang));
        assert_eq!(classify(b"<?xml", 0), Some(Markup::ProcessingInstruction));
        assert_eq!(classify(b"<p>", 0), Some(Markup::StartTag));
        assert_eq!(classify(b"</p>", 0), Some(Markup::EndTag));
        assert_eq!(classify(b"</ p>", 0), None);
        assert_eq!(classify(b"< p", 0), None);
        assert_eq!(classify(b"<3", 0), None);
        assert_eq!(classify(b"<", 0), None);
    }

    #[test]
    fn self_closing_slash_is_split_off() {
        assert_eq!(strip_self_closing("/"), ("", true));
        assert_eq!(strip_self_closing(r#" src="x" / "#), (r#" src="x" "#, true));
        assert_eq!(strip_self_closing(" href=/"), (" href=/", false));
        assert_eq!(strip_self_closing(" href= /"), (" href= /", false));
        assert_eq!(strip_self_closing(" id=a"), (" id=a", false));
        assert_eq!(strip_self_closing(" href=/dir/"), (" href=/dir/", false));
        assert_eq!(strip_self_closing(" alt='x'/"), (" alt='x'", true));
    }

    #[test]
    fn slash_ending_unquoted_value_is_kept() {
        let out = lines("<a href=/dir/>x</a><img src=http://x.com/pic/>");
        assert!(out.contains(&"open a href=\"/dir/\" @1".to_string()), "{out:?}");
        assert!(
            out.contains(&"open img src=\"http://x.com/pic/\" @1".to_string()),
            "{out:?}"
        );
    }

    #[test]
    fn self_closing_textarea_is_still_raw_text() {
        assert_eq!(
            lines("<textarea name=\"x\"/>a<b>&amp;</textarea>"),
            [
                "open html @1",
                "open head @1",
                "close head",
                "open body @1",
                "open textarea name=\"x\" @1",
                "text \"a<b>&\"",
                "close textarea",
                "close body",
                "close html",
            ]
        );
    }

    #[test]
    fn plain_text_gets_all_three_wrappers() {
        assert_eq!(
            lines("hello"),
            [
                "open html @1",
                "open head @1",
                "close head",
                "open body @1",
                "text \"hello\"",
                "close body",
                "close html",
            ]
        );
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert!(lines("").is_empty());
        assert!(lines("  \n ").is_empty());
    }

    #[test]
    fn head_elements_stay_in_head() {
        assert_eq!(
            lines("<title>T</title><meta charset=utf-8><p>x"),
            [
                "open html @1",
                "open head @1",
                "open title @1",
                "text \"T\"",
                "close title",
                "open meta charset=\"utf-8\" @1",
                "close meta",
                "close head",
                "open body @1",
                "open p @1",
                "text \"x\"",
                "inner \"x\"",
                "close p",
                "close body",
                "close html",
            ]
        );
    }

    #[test]
    fn literal_lt_is_text() {
        let out = lines("a < b <3 </ c");
        assert!(out.contains(&"text \"a < b <3 </ c\"".to_string()), "{out:?}");
    }

    #[test]
    fn unknown_self_closing_tag_closes_at_once() {
        let out = lines("<svg><path d=\"x\"/></svg>");
        let path_open = out.iter().position(|l| l.starts_with("open path")).expect("path");
        assert_eq!(out[path_open + 1], "close path");
        assert!(out[path_open].contains("d=\"x\""));
    }

    #[test]
    fn late_body_and_html_are_ignored() {
        let mut log = EventLog::new();
        scan("<p>x</p><body><html>", &mut log);
        let opens = log
            .events()
            .iter()
            .filter(|e| matches!(e, Event::TagOpen { name, .. } if name == "body" || name == "html"))
            .count();
        assert_eq!(opens, 2);
    }

    #[test]
    fn trailing_content_after_body_end_stays_in_body() {
        assert_eq!(
            lines("<body>a</body>b</html>c"),
            [
                "open html @1",
                "open head @1",
                "close head",
                "open body @1",
                "text \"a\"",
                "text \"b\"",
                "text \"c\"",
                "close body",
                "close html",
            ]
        );
    }

    #[test]
    fn processing_instruction_is_skipped() {
        let out = lines("<?xml version=\"1.0\"?><p>x");
        assert_eq!(out[0], "open html @1");
        assert!(!out.iter().any(|l| l.contains("xml")));
    }

    #[test]
    fn abort_flag_truncates_and_balances() {
        let flag = Arc::new(AtomicBool::new(true));
        let scanner = Scanner::default().with_abort(Arc::clone(&flag));
        let mut log = EventLog::new();
        let report = scanner.run("<p>never", &mut log);
        assert_eq!(
            report.truncated.map(|t| t.kind),
            Some(TruncationKind::Aborted)
        );
        assert!(log.events().is_empty());
    }

    fn depth_limited(max_depth: usize) -> Scanner {
        Scanner::new(ScannerConfig {
            max_depth: Some(max_depth),
            ..ScannerConfig::default()
        })
    }

    #[test]
    fn depth_limit_closes_innermost_tag_before_push() {
        let (doc, report) = parse_document_with(&depth_limited(2), "<b><i><u>x</u></i></b>");
        let b = doc.find_element("b").expect("b");
        assert_eq!(
            b.children().iter().map(Node::name).collect::<Vec<_>>(),
            [Some("i"), Some("u")]
        );
        assert_eq!(b.find_element("u").map(Node::text_content).as_deref(), Some("x"));
        // html + body + two content tags
        assert_eq!(report.max_depth, 4);
    }

    #[test]
    fn depth_limit_never_closes_wrappers() {
        let mut log = EventLog::new();
        depth_limited(2).run("<p>a<p>b</body>", &mut log);
        let out: Vec<String> = log.events().iter().map(ToString::to_string).collect();
        assert_eq!(
            out,
            [
                "open html @1",
                "open head @1",
                "close head",
                "open body @1",
                "open p @1",
                "text \"a\"",
                "inner \"a\"",
                "close p",
                "open p @1",
                "text \"b\"",
                "inner \"b\"",
                "close p",
                "close body",
                "close html",
            ]
        );

        let (doc, _) = parse_document_with(&depth_limited(1), "<div><span>x</span></div>y");
        let body = doc.find_element("body").expect("body");
        assert_eq!(
            body.children().iter().map(Node::name).collect::<Vec<_>>(),
            [Some("div"), Some("span"), None]
        );
    }
}
