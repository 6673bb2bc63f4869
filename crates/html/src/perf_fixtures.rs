//! Synthetic inputs shared by benches and perf-sensitive tests.

pub const BLOCK_TEMPLATE: &str = "<div class=box><p>hello &amp; <b>bye</b><li>one<li>two\
<table><tr><td>a<td>b</table><img src=x alt='&lt;pic&gt;'></div>";

pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

/// A `<script>` body full of near-miss end tags.
pub fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri<pt");
    }
    body.push_str("</script>");
    body
}

/// `depth` unclosed `<span>` tags, all force-closed at end of input.
pub fn make_unclosed_nesting(depth: usize) -> String {
    "<span>x".repeat(depth)
}
