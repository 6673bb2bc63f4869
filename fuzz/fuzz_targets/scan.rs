#![no_main]

use html::{Event, EventLog, scan_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut log = EventLog::new();
    scan_bytes(data, &mut log);
    let mut depth = 0isize;
    for event in log.events() {
        match event {
            Event::TagOpen { .. } => depth += 1,
            Event::TagClose { .. } => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0, "close without matching open");
    }
    assert_eq!(depth, 0, "unbalanced event stream");
});
