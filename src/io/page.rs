// Page loading - builds the hosted document from a file
// TOML page descriptions and Markdown documents.

use crate::error::{Error, Result};
use crate::model::{Document, NodeId, TEXT_TAG};
use pulldown_cmark::{Event as MarkdownEvent, HeadingLevel, Options, Parser, Tag};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

const DEMO_PAGE: &str = include_str!("../../pages/demo.toml");

#[derive(Deserialize)]
struct PageFile {
    #[serde(default)]
    title: String,
    #[serde(default, rename = "node")]
    nodes: Vec<NodeEntry>,
}

#[derive(Deserialize)]
struct NodeEntry {
    tag: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
    #[serde(default)]
    children: Vec<NodeEntry>,
}

pub fn load_page(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let fallback_title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let source = || fs::read_to_string(path).map_err(|e| Error::io(path, e));
    let doc = match extension.as_str() {
        "toml" => parse_toml_page(&source()?, &fallback_title)?,
        "md" | "markdown" => parse_markdown_page(&source()?, &fallback_title),
        _ => return Err(Error::UnsupportedPage(path.to_path_buf())),
    };
    info!(path = %path.display(), title = doc.title(), "page loaded");
    Ok(doc)
}

pub fn demo_page() -> Result<Document> {
    parse_toml_page(DEMO_PAGE, "One Hand demo")
}

pub fn parse_toml_page(source: &str, fallback_title: &str) -> Result<Document> {
    let file: PageFile = toml::from_str(source).map_err(|e| Error::InvalidPage(e.to_string()))?;
    let title = if file.title.is_empty() {
        fallback_title
    } else {
        file.title.as_str()
    };

    let mut doc = Document::new(title);
    let body = doc.body();
    for node in &file.nodes {
        build_node(&mut doc, body, node)?;
    }
    Ok(doc)
}

fn build_node(doc: &mut Document, parent: NodeId, node: &NodeEntry) -> Result<()> {
    let valid_tag = !node.tag.is_empty()
        && node
            .tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_tag || node.tag == TEXT_TAG {
        return Err(Error::InvalidPage(format!("bad tag name {:?}", node.tag)));
    }

    let id = doc.create_element(&node.tag);
    for (name, value) in &node.attrs {
        doc.set_attr(id, name, value.as_str());
    }
    if let Some(text) = &node.text {
        let text_node = doc.create_text(text.as_str());
        doc.append_child(id, text_node);
    }
    for child in &node.children {
        build_node(doc, id, child)?;
    }
    doc.append_child(parent, id);
    Ok(())
}

pub fn parse_markdown_page(source: &str, fallback_title: &str) -> Document {
    let mut doc = Document::new(fallback_title);
    let body = doc.body();
    let mut stack = vec![body];
    let options = Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;

    for event in Parser::new_ext(source, options) {
        let parent = *stack.last().unwrap_or(&body);
        match event {
            MarkdownEvent::Start(tag) => {
                let id = match tag {
                    Tag::Link { dest_url, title, .. } => {
                        let id = doc.create_element("a");
                        doc.set_attr(id, "href", dest_url.as_ref());
                        if !title.is_empty() {
                            doc.set_attr(id, "title", title.as_ref());
                        }
                        id
                    }
                    Tag::Image { dest_url, .. } => {
                        let id = doc.create_element("img");
                        doc.set_attr(id, "src", dest_url.as_ref());
                        id
                    }
                    other => doc.create_element(markdown_tag(&other)),
                };
                doc.append_child(parent, id);
                stack.push(id);
            }
            MarkdownEvent::End(_) => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            MarkdownEvent::Text(text) => {
                let id = doc.create_text(text.as_ref());
                doc.append_child(parent, id);
            }
            MarkdownEvent::Code(code) => {
                let id = doc.create_element("code");
                doc.set_text_content(id, code.as_ref());
                doc.append_child(parent, id);
            }
            MarkdownEvent::SoftBreak => {
                let id = doc.create_text(" ");
                doc.append_child(parent, id);
            }
            MarkdownEvent::HardBreak => {
                let id = doc.create_element("br");
                doc.append_child(parent, id);
            }
            MarkdownEvent::Rule => {
                let id = doc.create_element("hr");
                doc.append_child(parent, id);
            }
            MarkdownEvent::TaskListMarker(checked) => {
                let id = doc.create_element("input");
                doc.set_attr(id, "type", "checkbox");
                if checked {
                    doc.set_attr(id, "checked", "");
                }
                doc.append_child(parent, id);
            }
            _ => {}
        }
    }

    // The first top-level heading names the page.
    let heading = doc
        .traverse(body)
        .find(|id| doc.node(*id).is_some_and(|n| n.tag == "h1"));
    if let Some(heading) = heading {
        let title = doc.text_content(heading);
        if !title.trim().is_empty() {
            doc.set_title(title.trim());
        }
    }
    doc
}

fn markdown_tag(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => match level {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        },
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        _ => "div",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::collect_interactive;

    fn tags(doc: &Document) -> Vec<String> {
        collect_interactive(doc)
            .into_iter()
            .filter_map(|el| doc.node(el.id()).map(|n| n.tag.clone()))
            .collect()
    }

    #[test]
    fn test_toml_page_builds_tree() {
        let doc = parse_toml_page(
            r##"
            title = "Scenario"

            [[node]]
            tag = "a"
            text = "Link A"
            attrs = { href = "#b" }

            [[node]]
            tag = "div"
            text = "Div C"

            [[node.children]]
            tag = "button"
            text = "Button B"

            [[node]]
            tag = "input"
            attrs = { type = "text", hidden = "" }
            "##,
            "fallback",
        )
        .expect("valid page");

        assert_eq!(doc.title(), "Scenario");
        assert_eq!(tags(&doc), vec!["a", "button"]);
        let link = collect_interactive(&doc)[0];
        assert_eq!(doc.text_content(link.id()), "Link A");
        assert_eq!(doc.attr(link.id(), "href"), Some("#b"));
    }

    #[test]
    fn test_toml_page_rejects_bad_tags() {
        let err = parse_toml_page("[[node]]\ntag = \"a b\"\n", "t");
        assert!(matches!(err, Err(Error::InvalidPage(_))));
        let err = parse_toml_page("[[node]]\ntext = \"no tag\"\n", "t");
        assert!(matches!(err, Err(Error::InvalidPage(_))));
    }

    #[test]
    fn test_markdown_page() {
        let doc = parse_markdown_page(
            "# Notes\n\nSee [the docs](https://example.com \"Docs\") or [home](index.md).\n\n- [x] done\n- [ ] todo\n",
            "notes",
        );

        assert_eq!(doc.title(), "Notes");
        assert_eq!(tags(&doc), vec!["a", "a", "input", "input"]);
        let links = collect_interactive(&doc);
        assert_eq!(doc.attr(links[0].id(), "href"), Some("https://example.com"));
        assert_eq!(doc.attr(links[0].id(), "title"), Some("Docs"));
        assert_eq!(doc.text_content(links[1].id()), "home");
        assert_eq!(doc.attr(links[2].id(), "checked"), Some(""));
        assert_eq!(doc.attr(links[3].id(), "checked"), None);
    }

    #[test]
    fn test_markdown_without_heading_keeps_fallback_title() {
        let doc = parse_markdown_page("just text", "plain");
        assert_eq!(doc.title(), "plain");
        assert!(collect_interactive(&doc).is_empty());
    }

    #[test]
    fn test_load_page_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let md = dir.path().join("readme.md");
        fs::write(&md, "[a](#x)").expect("write");
        let doc = load_page(&md).expect("markdown loads");
        assert_eq!(doc.title(), "readme");

        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "hi").expect("write");
        assert!(matches!(load_page(&txt), Err(Error::UnsupportedPage(_))));
        assert!(matches!(
            load_page(&dir.path().join("gone.toml")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_demo_page_has_interactive_elements() {
        let doc = demo_page().expect("bundled page parses");
        assert!(!collect_interactive(&doc).is_empty());
    }
}
