//! Tag sink interface and the event-recording sink.
//!
//! The scanner never builds a tree itself; it drives a [`TagSink`] owned by the caller.
//!
//! Conventions:
//! - Each text run arrives as a synthetic tag named [`TEXT_TAG`]: `open_tag`, one
//!   `set_text`, `close_tag`.
//! - Comments arrive as [`COMMENT_TAG`] with the body passed to `set_text` (skipped when
//!   the body is empty).
//! - A doctype arrives as an empty [`DOCTYPE_TAG`] open/close pair.
//! - Attributes are set right after `open_tag`, in source order, duplicates included.

use crate::attributes::Attribute;
use std::fmt;

pub const TEXT_TAG: &str = "text";
pub const COMMENT_TAG: &str = "comment";
pub const DOCTYPE_TAG: &str = "doctype";

/// Consumer of scanner output; typically the owner of the document tree.
pub trait TagSink {
    /// Opaque identifier for an opened tag.
    type Handle: Copy;

    fn open_tag(&mut self, name: &str, line: u32) -> Self::Handle;
    fn close_tag(&mut self, handle: Self::Handle);
    fn set_attribute(&mut self, handle: Self::Handle, name: &str, value: &str);
    fn set_text(&mut self, handle: Self::Handle, text: &str);
    /// Raw, undecoded source between the end of the start tag and the start of the end tag.
    fn capture_inner_html(&mut self, handle: Self::Handle, raw_slice: &str);
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    type Handle = S::Handle;

    fn open_tag(&mut self, name: &str, line: u32) -> Self::Handle {
        (**self).open_tag(name, line)
    }

    fn close_tag(&mut self, handle: Self::Handle) {
        (**self).close_tag(handle)
    }

    fn set_attribute(&mut self, handle: Self::Handle, name: &str, value: &str) {
        (**self).set_attribute(handle, name, value)
    }

    fn set_text(&mut self, handle: Self::Handle, text: &str) {
        (**self).set_text(handle, text)
    }

    fn capture_inner_html(&mut self, handle: Self::Handle, raw_slice: &str) {
        (**self).capture_inner_html(handle, raw_slice)
    }
}

/// Flat scanner output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    TagOpen {
        name: String,
        attributes: Vec<Attribute>,
        line: u32,
    },
    TagClose {
        name: String,
    },
    Text {
        content: String,
    },
    InnerHtmlCapture {
        raw_slice: String,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::TagOpen {
                name,
                attributes,
                line,
            } => {
                write!(f, "open {name}")?;
                for (attr, value) in attributes {
                    write!(f, " {attr}={value:?}")?;
                }
                write!(f, " @{line}")
            }
            Event::TagClose { name } => write!(f, "close {name}"),
            Event::Text { content } => write!(f, "text {content:?}"),
            Event::InnerHtmlCapture { raw_slice } => write!(f, "inner {raw_slice:?}"),
        }
    }
}

#[derive(Debug)]
struct HandleEntry {
    name: String,
    /// Index of the `TagOpen` event; `None` for synthetic text nodes.
    open_event: Option<usize>,
}

/// Sink that records [`Event`]s in order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    handles: Vec<HandleEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl TagSink for EventLog {
    type Handle = usize;

    fn open_tag(&mut self, name: &str, line: u32) -> usize {
        let open_event = if name == TEXT_TAG {
            None
        } else {
            self.events.push(Event::TagOpen {
                name: name.to_string(),
                attributes: Vec::new(),
                line,
            });
            Some(self.events.len() - 1)
        };
        self.handles.push(HandleEntry {
            name: name.to_string(),
            open_event,
        });
        self.handles.len() - 1
    }

    fn close_tag(&mut self, handle: usize) {
        let entry = &self.handles[handle];
        if entry.open_event.is_some() {
            self.events.push(Event::TagClose {
                name: entry.name.clone(),
            });
        }
    }

    fn set_attribute(&mut self, handle: usize, name: &str, value: &str) {
        let Some(index) = self.handles[handle].open_event else {
            return;
        };
        if let Event::TagOpen { attributes, .. } = &mut self.events[index] {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    fn set_text(&mut self, _handle: usize, text: &str) {
        self.events.push(Event::Text {
            content: text.to_string(),
        });
    }

    fn capture_inner_html(&mut self, _handle: usize, raw_slice: &str) {
        self.events.push(Event::InnerHtmlCapture {
            raw_slice: raw_slice.to_string(),
        });
    }
}
