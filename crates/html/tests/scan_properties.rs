use html::{Event, EventLog, Node, TruncationKind, decode_entities, parse_document, rules, scan};

fn events(input: &str) -> Vec<Event> {
    let mut log = EventLog::new();
    scan(input, &mut log);
    log.into_events()
}

fn body(doc: &Node) -> &Node {
    doc.find_element("body").expect("body element")
}

fn element_names(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().filter_map(Node::name).collect()
}

#[test]
fn open_and_close_events_balance() {
    let input = "<html><div><p>a<b><i>b</b>c<table><td>d<tr>e</div><ul><li>f<li>g<br><img src=x>";
    let mut depth = 0isize;
    for event in events(input) {
        match event {
            Event::TagOpen { .. } => depth += 1,
            Event::TagClose { .. } => {
                depth -= 1;
                assert!(depth >= 0, "close without open");
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn autoclose_tags_close_immediately() {
    let events = events("<p>a<br>b<img src=x><hr>c");
    for (i, event) in events.iter().enumerate() {
        if let Event::TagOpen { name, .. } = event
            && rules::is_autoclose(name)
        {
            assert!(
                matches!(&events[i + 1], Event::TagClose { name: closed } if closed == name),
                "expected immediate close of {name}, got: {:?}",
                events[i + 1]
            );
        }
    }
}

#[test]
fn decoding_text_without_ampersand_is_identity() {
    let text = "plain <text> with ; and # and \u{e9}";
    assert_eq!(decode_entities(text), text);
}

#[test]
fn decoding_is_single_pass() {
    assert_eq!(decode_entities("&amp;amp;"), "&amp;");
}

#[test]
fn numeric_entities_decode() {
    assert_eq!(decode_entities("&#65;"), "A");
    assert_eq!(decode_entities("&#x41;"), "A");
    assert_eq!(decode_entities("&#65 b"), "A b");
}

#[test]
fn dash_run_comment_is_one_empty_comment() {
    let events = events("<!------><p>x");
    assert_eq!(
        &events[..2],
        [
            Event::TagOpen {
                name: "comment".into(),
                attributes: Vec::new(),
                line: 1,
            },
            Event::TagClose {
                name: "comment".into(),
            },
        ]
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::TagOpen { name, .. } if name == "p")),
        "scanning resumes after the comment"
    );
}

#[test]
fn second_cell_closes_first() {
    let (doc, report) = parse_document("<td>a<td>b</table>");
    assert_eq!(element_names(body(&doc).children()), ["td", "td"]);
    assert_eq!(report.discarded_end_tags, 1);
}

#[test]
fn cell_inside_nested_table_keeps_outer_cell_open() {
    let (doc, report) = parse_document("<td>a<table><tr><td>b</td></tr></table></td>");
    let outer = &body(&doc).children()[0];
    assert_eq!(outer.name(), Some("td"));
    let table = outer
        .children()
        .iter()
        .find(|n| n.name() == Some("table"))
        .expect("table inside outer td");
    let tr = &table.children()[0];
    assert_eq!(tr.name(), Some("tr"));
    assert_eq!(element_names(tr.children()), ["td"]);
    assert_eq!(tr.children()[0].text_content(), "b");
    assert_eq!(report.forced_closures, 2, "only body and html close at end of input");
}

#[test]
fn second_title_replaces_first_slot() {
    let (doc, _) = parse_document("<title>A<title>B</title><p>x");
    let head = doc.find_element("head").expect("head");
    assert_eq!(element_names(head.children()), ["title", "title"]);
    let titles: Vec<_> = head.children().iter().map(Node::text_content).collect();
    assert_eq!(titles, ["A", "B"]);
    assert_eq!(element_names(body(&doc).children()), ["p"]);
}

#[test]
fn script_body_is_opaque() {
    let events = events("<script>var x = \"<b>\";</script>");
    let texts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::Text { content } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["var x = \"<b>\";"]);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, Event::TagOpen { name, .. } if name == "b"))
    );
}

#[test]
fn paragraphs_cross_close() {
    let (doc, report) = parse_document("<p>one<p>two");
    let children = body(&doc).children();
    assert_eq!(element_names(children), ["p", "p"]);
    assert_eq!(children[0].text_content(), "one");
    assert_eq!(children[1].text_content(), "two");
    assert!(report.forced_closures >= 1);
}

#[test]
fn misnested_inline_tags_are_repaired() {
    let (doc, report) = parse_document("<i><b>x</i></b>");
    let i = &body(&doc).children()[0];
    assert_eq!(i.name(), Some("i"));
    let b = &i.children()[0];
    assert_eq!(b.name(), Some("b"));
    assert_eq!(b.text_content(), "x");
    assert_eq!(body(&doc).children().len(), 1);
    assert_eq!(report.discarded_end_tags, 1);
}

#[test]
fn unterminated_script_truncates_safely() {
    let mut log = EventLog::new();
    let report = scan("<div><script>no end tag", &mut log);
    let truncation = report.truncated.expect("truncated");
    assert_eq!(
        truncation.kind,
        TruncationKind::UnterminatedRawText(html::RawTextKind::Script)
    );
    assert_eq!(truncation.line, 1);

    let opens = log
        .events()
        .iter()
        .filter(|e| matches!(e, Event::TagOpen { .. }))
        .count();
    let closes = log
        .events()
        .iter()
        .filter(|e| matches!(e, Event::TagClose { .. }))
        .count();
    assert_eq!(opens, closes);
    assert!(
        !log.events()
            .iter()
            .any(|e| matches!(e, Event::Text { content } if content.contains("no end"))),
        "raw text after the truncation point is not emitted"
    );
}

#[test]
fn scanner_is_reusable() {
    let scanner = html::Scanner::default();
    let mut first = EventLog::new();
    let mut second = EventLog::new();
    scanner.run("<title>a</title>", &mut first);
    scanner.run("<title>a</title>", &mut second);
    assert_eq!(first.events(), second.events());
}

#[test]
fn invalid_utf8_is_replaced() {
    let mut log = EventLog::new();
    html::scan_bytes(b"<p>caf\xe9</p>", &mut log);
    assert!(
        log.events()
            .iter()
            .any(|e| matches!(e, Event::Text { content } if content == "caf\u{fffd}"))
    );
}
