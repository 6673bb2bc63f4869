//! Node tree built from scanner calls.
//!
//! [`TreeSink`] appends nodes to a flat arena as the scanner reports them; the arena is
//! turned into an owned [`Node`] tree at the end with an iterative post-order walk, so
//! deep nesting never recurses.

use crate::attributes::Attribute;
use crate::scanner::{ScanReport, Scanner};
use crate::sink::{COMMENT_TAG, DOCTYPE_TAG, TEXT_TAG, TagSink};

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: bool,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        /// Line of the start tag (or of the construct that forced it into existence).
        line: u32,
        attributes: Vec<Attribute>,
        /// Raw source between the start tag and its closing point, for tags that ask for it.
        inner_html: Option<String>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    fn empty_document() -> Self {
        Node::Document {
            id: Id(0),
            doctype: false,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. }
            | Node::Element { id, .. }
            | Node::Text { id, .. }
            | Node::Comment { id, .. } => *id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } | Node::Comment { .. } => &[],
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// First value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First descendant element named `name`, in document order.
    pub fn find_element(&self, name: &str) -> Option<&Node> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.name().is_some_and(|n| n.eq_ignore_ascii_case(name)) {
                return Some(node);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Node::Text { text, .. } = node {
                out.push_str(text);
            }
            stack.extend(node.children().iter().rev());
        }
        out
    }
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: bool,
        children: Vec<usize>,
    },
    Element {
        name: String,
        line: u32,
        attributes: Vec<Attribute>,
        inner_html: Option<String>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

const ROOT: usize = 0;

/// Sink that builds a [`Node`] tree. Handles are arena indices.
#[derive(Debug)]
pub struct TreeSink {
    nodes: Vec<ArenaNode>,
    open_elements: Vec<usize>,
}

impl Default for TreeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink {
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::Document {
                doctype: false,
                children: Vec::new(),
            }],
            open_elements: Vec::new(),
        }
    }

    fn add_child(&mut self, child: ArenaNode) -> usize {
        let parent = self.open_elements.last().copied().unwrap_or(ROOT);
        let index = self.nodes.len();
        self.nodes.push(child);
        if let ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } =
            &mut self.nodes[parent]
        {
            children.push(index);
        }
        index
    }

    /// Finish building. Elements the scanner left open (it never does) are simply kept.
    pub fn into_document(self) -> Node {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        // Post-order: a node is built once all its children sit, in order, on top of `built`.
        let mut stack: Vec<(usize, bool)> = vec![(ROOT, false)];
        while let Some((index, visited)) = stack.pop() {
            if !visited {
                stack.push((index, true));
                if let Some(children) = nodes[index].children() {
                    stack.extend(children.iter().rev().map(|&child| (child, false)));
                }
                continue;
            }

            let id = Id(index as NodeId);
            let node = match &mut nodes[index] {
                ArenaNode::Document { doctype, children } => Node::Document {
                    id,
                    doctype: *doctype,
                    children: built.split_off(built.len() - children.len()),
                },
                ArenaNode::Element {
                    name,
                    line,
                    attributes,
                    inner_html,
                    children,
                } => Node::Element {
                    id,
                    name: std::mem::take(name),
                    line: *line,
                    attributes: std::mem::take(attributes),
                    inner_html: inner_html.take(),
                    children: built.split_off(built.len() - children.len()),
                },
                ArenaNode::Text { text } => Node::Text {
                    id,
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    id,
                    text: std::mem::take(text),
                },
            };
            built.push(node);
        }

        debug_assert_eq!(built.len(), 1, "tree sink builds exactly one root");
        built.pop().unwrap_or_else(Node::empty_document)
    }
}

impl TagSink for TreeSink {
    type Handle = usize;

    fn open_tag(&mut self, name: &str, line: u32) -> usize {
        match name {
            TEXT_TAG => self.add_child(ArenaNode::Text {
                text: String::new(),
            }),
            COMMENT_TAG => self.add_child(ArenaNode::Comment {
                text: String::new(),
            }),
            DOCTYPE_TAG => {
                if let ArenaNode::Document { doctype, .. } = &mut self.nodes[ROOT] {
                    *doctype = true;
                }
                ROOT
            }
            _ => {
                let index = self.add_child(ArenaNode::Element {
                    name: name.to_string(),
                    line,
                    attributes: Vec::new(),
                    inner_html: None,
                    children: Vec::new(),
                });
                self.open_elements.push(index);
                index
            }
        }
    }

    fn close_tag(&mut self, handle: usize) {
        if self.open_elements.last() == Some(&handle) {
            self.open_elements.pop();
        }
    }

    fn set_attribute(&mut self, handle: usize, name: &str, value: &str) {
        if let ArenaNode::Element { attributes, .. } = &mut self.nodes[handle] {
            attributes.push((name.to_string(), value.to_string()));
        }
    }

    fn set_text(&mut self, handle: usize, text: &str) {
        if let ArenaNode::Text { text: slot } | ArenaNode::Comment { text: slot } =
            &mut self.nodes[handle]
        {
            slot.push_str(text);
        }
    }

    fn capture_inner_html(&mut self, handle: usize, raw_slice: &str) {
        if let ArenaNode::Element { inner_html, .. } = &mut self.nodes[handle] {
            *inner_html = Some(raw_slice.to_string());
        }
    }
}

/// Scan `input` with the default configuration and build its tree.
pub fn parse_document(input: &str) -> (Node, ScanReport) {
    parse_document_with(&Scanner::default(), input)
}

pub fn parse_document_with(scanner: &Scanner, input: &str) -> (Node, ScanReport) {
    let mut sink = TreeSink::new();
    let report = scanner.run(input, &mut sink);
    (sink.into_document(), report)
}
