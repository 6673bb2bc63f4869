//! Human-readable, indented outline of a [`Node`] tree.

use crate::Node;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn trimmed_nonempty_slice(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn push_preview(out: &mut String, s: &str, max_chars: usize) {
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            out.push('…');
            return;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

fn element_line(out: &mut String, node: &Node, name: &str, line_no: u32) {
    out.push('<');
    out.push_str(name);
    for key in ["id", "class", "name", "href"] {
        if let Some(value) = node.attr(key).filter(|v| !v.is_empty()) {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            push_preview(out, value, PREVIEW_CHARS);
            out.push('"');
        }
    }
    out.push_str("> @");
    out.push_str(&line_no.to_string());
}

/// One line per node, children indented under their parent. Whitespace-only text is
/// skipped; long text is cut to a preview. At most `cap` nodes are listed.
pub fn outline(root: &Node, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut left = cap;
    // Explicit stack of (node, depth) keeps deep trees off the call stack.
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if left == 0 {
            break;
        }
        left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        match node {
            Node::Document { doctype, .. } => {
                line.push_str(if *doctype { "<!DOCTYPE>" } else { "#document" });
            }
            Node::Element { name, line: line_no, .. } => {
                element_line(&mut line, node, name, *line_no);
            }
            Node::Text { text, .. } => {
                let Some(trimmed) = trimmed_nonempty_slice(text) else {
                    continue;
                };
                line.push('"');
                push_preview(&mut line, trimmed, PREVIEW_CHARS);
                line.push('"');
            }
            Node::Comment { text, .. } => {
                line.push_str("<!--");
                push_preview(&mut line, text, PREVIEW_CHARS);
                line.push_str("-->");
            }
        }
        out.push(line);
        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }
    out
}
