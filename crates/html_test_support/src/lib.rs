//! Helpers shared by the `html` integration tests: snapshot formatting, line diffs,
//! and golden fixture loading.

use html::Event;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    use std::fmt::Write;
    let mut mismatch = None;
    let missing = "<missing>";
    for i in 0..max {
        let left = expected.get(i).map(String::as_str).unwrap_or(missing);
        let right = actual.get(i).map(String::as_str).unwrap_or(missing);
        if left != right {
            mismatch = Some(i);
            break;
        }
    }
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    if expected.len() != actual.len() && mismatch.is_none() {
        let _ = writeln!(
            &mut out,
            "prefix matched but lengths differ (expected {} lines, actual {} lines)",
            expected.len(),
            actual.len()
        );
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// One line per event. Text is escaped so every snapshot line stays on one line.
pub fn event_snapshot(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            Event::TagOpen {
                name,
                attributes,
                line,
            } => {
                let mut out = format!("open {name}");
                for (attr, value) in attributes {
                    out.push_str(&format!(" {attr}=\"{}\"", escape_text(value)));
                }
                out.push_str(&format!(" @{line}"));
                out
            }
            Event::TagClose { name } => format!("close {name}"),
            Event::Text { content } => format!("text \"{}\"", escape_text(content)),
            Event::InnerHtmlCapture { raw_slice } => {
                format!("inner \"{}\"", escape_text(raw_slice))
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    #[default]
    Active,
    Xfail,
    Skip,
}

/// A golden scan fixture: input markup and the expected [`event_snapshot`] lines.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoldenFixture {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub status: FixtureStatus,
    pub reason: Option<String>,
    pub input: String,
    #[serde(default)]
    pub truncated: Option<String>,
    pub events: Vec<String>,
}

/// Load every `*.toml` fixture in `dir`, sorted by file name. Panics on malformed files.
pub fn load_golden_fixtures(dir: &Path) -> Vec<GoldenFixture> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture root {dir:?}: {err}"))
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
            let mut fixture: GoldenFixture = toml::from_str(&text)
                .unwrap_or_else(|err| panic!("invalid fixture {path:?}: {err}"));
            fixture.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            if fixture.status != FixtureStatus::Active
                && fixture.reason.as_deref().unwrap_or("").is_empty()
            {
                panic!("non-active fixture missing reason in {path:?}");
            }
            fixture
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_text_keeps_lines_single() {
        assert_eq!(escape_text("a\"b\nc\t\u{1}"), "a\\\"b\\nc\\t\\u{01}");
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2"), "got: {diff}");
    }

    #[test]
    fn snapshot_escapes_text() {
        let events = vec![
            Event::TagOpen {
                name: "p".to_string(),
                attributes: vec![("title".to_string(), "x\"y".to_string())],
                line: 2,
            },
            Event::Text {
                content: "a\nb".to_string(),
            },
            Event::TagClose {
                name: "p".to_string(),
            },
        ];
        assert_eq!(
            event_snapshot(&events),
            ["open p title=\"x\\\"y\" @2", "text \"a\\nb\"", "close p"]
        );
    }
}
