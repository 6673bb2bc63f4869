use html::{EventLog, scan};
use html_test_support::{FixtureStatus, GoldenFixture, diff_lines, event_snapshot, load_golden_fixtures};
use std::env;
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scan")
}

fn fixture_filter() -> Option<String> {
    env::var("EDBROWSE_SCAN_FIXTURE").ok()
}

fn run_fixture(fixture: &GoldenFixture) -> (Vec<String>, Option<String>) {
    let mut log = EventLog::new();
    let report = scan(&fixture.input, &mut log);
    let truncated = report.truncated.map(|t| t.kind.to_string());
    (event_snapshot(log.events()), truncated)
}

#[test]
fn golden_scan_events() {
    let filter = fixture_filter();
    let mut ran = 0usize;
    for fixture in load_golden_fixtures(&fixture_root()) {
        if filter.as_deref().is_some_and(|f| !fixture.name.contains(f)) {
            continue;
        }
        ran += 1;
        if fixture.status == FixtureStatus::Skip {
            continue;
        }
        let (actual, truncated) = run_fixture(&fixture);
        let mismatch = actual != fixture.events || truncated != fixture.truncated;
        match fixture.status {
            FixtureStatus::Active => {
                if mismatch {
                    panic!(
                        "event mismatch in fixture '{}'\ntruncated: expected {:?}, actual {:?}\n{}",
                        fixture.name,
                        fixture.truncated,
                        truncated,
                        diff_lines(&fixture.events, &actual)
                    );
                }
            }
            FixtureStatus::Xfail => {
                assert!(
                    mismatch,
                    "fixture '{}' matched but is marked xfail; reason: {}",
                    fixture.name,
                    fixture.reason.as_deref().unwrap_or("<missing reason>")
                );
            }
            FixtureStatus::Skip => {}
        }
    }
    assert!(ran > 0, "no fixtures matched filter");
}

#[test]
fn golden_scan_is_deterministic() {
    for fixture in load_golden_fixtures(&fixture_root()) {
        assert_eq!(
            run_fixture(&fixture),
            run_fixture(&fixture),
            "fixture '{}' scanned differently on a second run",
            fixture.name
        );
    }
}
