use crate::Node;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadMetadata {
    pub title: Option<String>,
    pub meta: Vec<MetaTag>,
    pub links: Vec<LinkTag>,
    pub base_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: Option<String>,       // e.g. name="description"
    pub http_equiv: Option<String>, // e.g. http-equiv="refresh"
    pub content: Option<String>,    // e.g. content="5; url=/next"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: Vec<String>, // e.g. ["icon"], ["stylesheet"]
    pub href: Option<String>,
}

/// Collect title, meta, link and base information from the document's `<head>`.
pub fn extract_head_metadata(dom: &Node) -> HeadMetadata {
    let mut meta = HeadMetadata::default();
    if let Some(head) = find_head(dom) {
        fill_head_metadata_from(head, &mut meta);
    }
    meta
}

fn find_head(dom: &Node) -> Option<&Node> {
    let html = dom
        .children()
        .iter()
        .find(|child| child.name() == Some("html"))?;
    html.children()
        .iter()
        .find(|child| child.name() == Some("head"))
}

fn fill_head_metadata_from(head: &Node, out: &mut HeadMetadata) {
    for child in head.children() {
        let Some(name) = child.name() else {
            continue;
        };
        let attr = |key: &str| child.attr(key).map(str::to_string);
        match name {
            "title" => {
                if out.title.is_none() {
                    let text = child.text_content();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        out.title = Some(trimmed.to_string());
                    }
                }
            }
            "meta" => {
                let tag = MetaTag {
                    name: attr("name"),
                    http_equiv: attr("http-equiv"),
                    content: attr("content"),
                };
                if tag.name.is_some() || tag.http_equiv.is_some() || tag.content.is_some() {
                    out.meta.push(tag);
                }
            }
            "link" => {
                let rel = child
                    .attr("rel")
                    .unwrap_or("")
                    .split_whitespace()
                    .map(|s| s.to_ascii_lowercase())
                    .collect::<Vec<_>>();
                let href = attr("href");
                if !rel.is_empty() || href.is_some() {
                    out.links.push(LinkTag { rel, href });
                }
            }
            "base" => {
                if out.base_href.is_none() {
                    out.base_href = attr("href");
                }
            }
            _ => {}
        }
    }
}
