//! Storage-format XHTML to [`TreeNode`].
//!
//! Storage format is XHTML with `ac:`/`ri:` prefixed macro elements, but
//! real pages also carry HTML-isms: named entities, unclosed void elements,
//! uppercase tags and stray end tags. The markup is wrapped in a root
//! element declaring the Confluence namespaces and read with quick-xml,
//! keeping an explicit stack of open elements.

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::entities::{convert_html_entities, decode_entity};
use super::tree::TreeNode;
use crate::error::MarkupError;

const ROOT_OPEN: &str = concat!(
    r#"<root xmlns:ac="http://www.atlassian.com/schema/confluence/4/ac/" "#,
    r#"xmlns:ri="http://www.atlassian.com/schema/confluence/4/ri/">"#,
);
const ROOT_CLOSE: &str = "</root>";

/// HTML elements that never have content and may appear unclosed.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Parses storage markup into a tree rooted at a synthetic `root` element.
pub(crate) struct StorageParser {
    /// Open elements; index 0 collects the document element.
    open: Vec<TreeNode>,
}

impl StorageParser {
    pub fn new() -> Self {
        Self {
            open: vec![TreeNode::default()],
        }
    }

    /// Parse `html`.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup is not well-formed enough for the XML
    /// reader (unclosed attribute quotes, bare `&`).
    pub fn parse(mut self, html: &str) -> Result<TreeNode, MarkupError> {
        let wrapped = format!("{ROOT_OPEN}{}{ROOT_CLOSE}", convert_html_entities(html));
        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = false;
        reader.config_mut().allow_unmatched_ends = true;
        let decoder = reader.decoder();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let node = element(decoder, &e);
                    if VOID_ELEMENTS.contains(&node.tag.as_str()) {
                        self.top().children.push(node);
                    } else {
                        self.open.push(node);
                    }
                }
                Event::Empty(e) => {
                    let node = element(decoder, &e);
                    self.top().children.push(node);
                }
                Event::End(e) => {
                    let tag = decode_name(decoder, e.name().as_ref());
                    self.close(&tag);
                }
                Event::Text(e) => {
                    let text = decoder.decode(&e)?;
                    self.append_text(&text);
                }
                Event::GeneralRef(e) => {
                    let name = decoder.decode(&e)?;
                    self.append_text(&decode_entity(&name));
                }
                Event::CData(e) => self.append_text(&String::from_utf8_lossy(&e)),
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        while self.open.len() > 1 {
            self.pop_into_parent();
        }
        let mut document = self.open.pop().unwrap_or_default();
        Ok(if document.children.is_empty() {
            TreeNode::default()
        } else {
            document.children.swap_remove(0)
        })
    }

    fn top(&mut self) -> &mut TreeNode {
        let last = self.open.len() - 1;
        &mut self.open[last]
    }

    /// Close the innermost open element named `tag`, and any elements left
    /// open inside it. End tags with no open element are ignored.
    fn close(&mut self, tag: &str) {
        let Some(index) = self.open.iter().rposition(|node| node.tag == tag) else {
            return;
        };
        while self.open.len() > index.max(1) {
            self.pop_into_parent();
        }
    }

    fn pop_into_parent(&mut self) {
        if let Some(node) = self.open.pop() {
            self.top().children.push(node);
        }
    }

    /// Text goes after the last child, or into the element itself.
    fn append_text(&mut self, text: &str) {
        let node = self.top();
        match node.children.last_mut() {
            Some(last) => last.tail.push_str(text),
            None => node.text.push_str(text),
        }
    }
}

fn element(decoder: Decoder, e: &BytesStart) -> TreeNode {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = lossy(decoder.decode(attr.key.as_ref()), attr.key.as_ref());
        if key.starts_with("xmlns") {
            continue;
        }
        let value = lossy(attr.unescape_value(), &attr.value);
        attrs.insert(key, value);
    }
    TreeNode {
        tag: decode_name(decoder, e.name().as_ref()),
        attrs,
        ..TreeNode::default()
    }
}

fn decode_name(decoder: Decoder, name: &[u8]) -> String {
    lossy(decoder.decode(name), name).to_ascii_lowercase()
}

fn lossy<E>(decoded: Result<Cow<'_, str>, E>, raw: &[u8]) -> String {
    match decoded {
        Ok(text) => text.into_owned(),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}
