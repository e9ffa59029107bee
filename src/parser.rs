//! Markup-to-tree parser built on quick-xml.
//!
//! A parse failure is fatal for the validation pipeline: without a tree
//! there is nothing for the later passes to inspect, so the caller gets
//! the parse diagnostic and an immediate invalid result.

use crate::diagnostics::{Issue, IssueCode, Severity};
use crate::dom::{Document, Node};
use crate::{Error, Result};
use compact_str::CompactString;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a filing document into a tree.
///
/// Library-facing wrapper around [`parse_document`]; collapses the fatal
/// diagnostic into [`Error::Parse`] for callers that only want the tree.
pub fn parse(input: &str) -> Result<Document> {
    parse_document(input).map_err(|issue| {
        let location = issue.location.as_deref().unwrap_or("unknown position");
        Error::Parse(format!("{} ({})", issue.message, location))
    })
}

/// Parse a filing document, reporting failures as a fatal [`Issue`].
pub(crate) fn parse_document(input: &str) -> std::result::Result<Document, Issue> {
    // Strip a UTF-8 BOM if the generator left one in.
    let input = input.trim_start_matches('\u{feff}');

    if input.trim().is_empty() {
        return Err(fatal(
            IssueCode::EmptyDocument,
            "document is empty".to_string(),
            0,
        ));
    }

    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(fatal(
                        IssueCode::ParseFailure,
                        "multiple root elements".to_string(),
                        position,
                    ));
                }
                let node = node_from_start(&start)
                    .map_err(|msg| fatal(IssueCode::ParseFailure, msg, position))?;
                stack.push(node);
            }
            Ok(Event::End(_)) => {
                // Tag-name mismatches are already rejected by the reader.
                let node = match stack.pop() {
                    Some(node) => node,
                    None => {
                        return Err(fatal(
                            IssueCode::ParseFailure,
                            "closing tag without a matching opening tag".to_string(),
                            position,
                        ))
                    }
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Ok(Event::Text(text)) => {
                let value = text.unescape().map_err(|err| {
                    fatal(
                        IssueCode::ParseFailure,
                        format!("malformed text content: {err}"),
                        position,
                    )
                })?;
                append_text(&mut stack, value.trim());
            }
            Ok(Event::CData(data)) => {
                let value = String::from_utf8_lossy(data.as_ref()).into_owned();
                append_text(&mut stack, value.trim());
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, doctypes and processing instructions
            // carry no facts.
            Ok(_) => {}
            Err(err) => {
                return Err(fatal(
                    IssueCode::ParseFailure,
                    format!("malformed markup: {err}"),
                    position,
                ))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(fatal(
            IssueCode::ParseFailure,
            format!("unclosed element <{}>", open.name),
            reader.buffer_position(),
        ));
    }

    match root {
        Some(root) => Ok(Document { root }),
        None => Err(fatal(
            IssueCode::ParseFailure,
            "no root element".to_string(),
            reader.buffer_position(),
        )),
    }
}

fn node_from_start(start: &BytesStart) -> std::result::Result<Node, String> {
    let name = CompactString::from(String::from_utf8_lossy(start.name().as_ref()).as_ref());
    let mut node = Node::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|err| format!("malformed attribute: {err}"))?;
        let key = CompactString::from(String::from_utf8_lossy(attr.key.as_ref()).as_ref());
        let value = attr
            .unescape_value()
            .map_err(|err| format!("malformed attribute value: {err}"))?;
        node.attributes.push((key, CompactString::from(value.as_ref())));
    }

    Ok(node)
}

fn append_text(stack: &mut [Node], value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(node) = stack.last_mut() {
        if !node.text.is_empty() {
            node.text.push(' ');
        }
        node.text.push_str(value);
    }
}

fn fatal(code: IssueCode, message: String, position: impl std::fmt::Display) -> Issue {
    Issue {
        code,
        message,
        severity: Severity::Fatal,
        location: Some(format!("byte {position}")),
        element: None,
    }
}
