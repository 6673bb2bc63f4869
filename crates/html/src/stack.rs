//! Stack of open tags.

/// One open, nestable tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OpenTagFrame<H> {
    /// Lowercase tag name.
    pub(crate) name: String,
    pub(crate) handle: H,
    /// Offset of the `<` that opened the tag (or where it was synthesized).
    pub(crate) source_position: usize,
    /// Offset just past the start tag's `>`.
    pub(crate) content_start: usize,
}

/// Open tags, most recently opened last.
#[derive(Clone, Debug)]
pub(crate) struct OpenTagStack<H> {
    items: Vec<OpenTagFrame<H>>,
    max_depth: usize,
}

impl<H> Default for OpenTagStack<H> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            max_depth: 0,
        }
    }
}

impl<H> OpenTagStack<H> {
    pub(crate) fn push(&mut self, frame: OpenTagFrame<H>) {
        self.items.push(frame);
        self.max_depth = self.max_depth.max(self.items.len());
    }

    pub(crate) fn pop(&mut self) -> Option<OpenTagFrame<H>> {
        self.items.pop()
    }

    pub(crate) fn current(&self) -> Option<&OpenTagFrame<H>> {
        self.items.last()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Index of the nearest open frame named `name`, searching top-down.
    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .rposition(|frame| frame.name.eq_ignore_ascii_case(name))
    }

    /// Index of the nearest open frame whose name satisfies `pred`.
    pub(crate) fn find_by(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.items.iter().rposition(|frame| pred(&frame.name))
    }

    /// Whether any frame above `index` is named in `context`.
    pub(crate) fn has_between(&self, index: usize, context: &[&str]) -> bool {
        self.items[index + 1..]
            .iter()
            .any(|frame| context.contains(&frame.name.as_str()))
    }

    pub(crate) fn iter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|frame| frame.name.as_str())
    }
}
