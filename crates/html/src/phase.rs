//! Document phase: which implicit wrapper tags have been opened or closed.

/// Progress through the `html` / `head` / `body` wrappers.
///
/// Monotonic within one scan; a fresh scan starts over at [`DocumentPhase::PreHtml`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocumentPhase {
    #[default]
    PreHtml,
    PreHead,
    InHead,
    PostHead,
    InBody,
    PostBody,
    PostHtml,
}

impl DocumentPhase {
    /// Whitespace-only text is kept only inside `head` or `body`.
    pub fn keeps_whitespace(self) -> bool {
        matches!(self, Self::InHead | Self::InBody | Self::PostBody | Self::PostHtml)
    }

    /// Body content seen; a late `<body>` no longer opens anything.
    pub fn body_started(self) -> bool {
        self >= Self::InBody
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentPhase;

    #[test]
    fn phases_are_ordered() {
        assert!(DocumentPhase::PreHtml < DocumentPhase::InHead);
        assert!(DocumentPhase::InBody < DocumentPhase::PostHtml);
        assert_eq!(DocumentPhase::default(), DocumentPhase::PreHtml);
    }

    #[test]
    fn whitespace_kept_only_in_head_or_body() {
        assert!(!DocumentPhase::PreHtml.keeps_whitespace());
        assert!(!DocumentPhase::PreHead.keeps_whitespace());
        assert!(DocumentPhase::InHead.keeps_whitespace());
        assert!(!DocumentPhase::PostHead.keeps_whitespace());
        assert!(DocumentPhase::InBody.keeps_whitespace());
    }
}
