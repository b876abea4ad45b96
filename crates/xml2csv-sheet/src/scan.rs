//! Namespace-aware event scanner shared by the document readers

use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;

use crate::error::{SheetError, SheetResult};
use crate::namespace::NamespaceTable;

/// SpreadsheetML elements the readers care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Elem {
    Row,
    Cell,
    Value,
    InlineString,
    Text,
    StringItem,
    Hyperlink,
    /// Any other element, or a known local name in an unrecognized namespace
    Other,
}

impl Elem {
    fn from_local(local: &[u8]) -> Self {
        match local {
            b"row" => Elem::Row,
            b"c" => Elem::Cell,
            b"v" => Elem::Value,
            b"is" => Elem::InlineString,
            b"t" => Elem::Text,
            b"si" => Elem::StringItem,
            b"hyperlink" => Elem::Hyperlink,
            _ => Elem::Other,
        }
    }
}

pub(crate) enum Item<'b> {
    Start(Elem, BytesStart<'b>),
    End(Elem),
    Text(String),
    /// Declarations, comments, processing instructions
    Skip,
}

/// Streams a document as [`Item`]s and checks it is well-formed.
pub(crate) struct Scanner<'a> {
    reader: NsReader<&'a [u8]>,
    namespaces: &'a NamespaceTable,
    depth: usize,
    seen_root: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(xml: &'a [u8], namespaces: &'a NamespaceTable) -> Self {
        let mut reader = NsReader::from_reader(xml);
        // <c/> and <row/> report a matching End, keeping depth balanced
        reader.expand_empty_elements(true);
        Self {
            reader,
            namespaces,
            depth: 0,
            seen_root: false,
        }
    }

    /// Number of currently open elements
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Next item, or `None` at the end of a well-formed document
    pub(crate) fn next<'b>(&mut self, buf: &'b mut Vec<u8>) -> SheetResult<Option<Item<'b>>> {
        buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(buf)?;
        let ours = self.namespaces.is_bound(&resolved);

        let item = match event {
            Event::Start(e) => {
                if self.depth == 0 && self.seen_root {
                    return Err(SheetError::Malformed(format!(
                        "second root element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                check_attributes(&e)?;
                self.depth += 1;
                self.seen_root = true;
                let elem = if ours {
                    Elem::from_local(e.local_name().as_ref())
                } else {
                    Elem::Other
                };
                Item::Start(elem, e)
            }
            Event::End(e) => {
                if self.depth == 0 {
                    return Err(SheetError::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                self.depth -= 1;
                if ours {
                    Item::End(Elem::from_local(e.local_name().as_ref()))
                } else {
                    Item::End(Elem::Other)
                }
            }
            Event::Text(t) => Item::Text(t.unescape()?.into_owned()),
            Event::CData(c) => {
                let text = String::from_utf8(c.into_inner().into_owned()).map_err(|e| {
                    SheetError::Malformed(format!("invalid UTF-8 in CDATA section: {}", e))
                })?;
                Item::Text(text)
            }
            Event::Eof => {
                if !self.seen_root {
                    return Err(SheetError::Malformed("document has no root element".into()));
                }
                if self.depth > 0 {
                    return Err(SheetError::Malformed(format!(
                        "document ended with {} unclosed element(s)",
                        self.depth
                    )));
                }
                return Ok(None);
            }
            _ => Item::Skip,
        };

        Ok(Some(item))
    }
}

fn malformed_attr(e: &BytesStart<'_>, err: impl std::fmt::Display) -> SheetError {
    SheetError::Malformed(format!(
        "invalid attribute on <{}>: {}",
        String::from_utf8_lossy(e.name().as_ref()),
        err
    ))
}

/// Reject start tags whose attributes do not parse or unescape
fn check_attributes(e: &BytesStart<'_>) -> SheetResult<()> {
    for a in e.attributes() {
        let a = a.map_err(|err| malformed_attr(e, err))?;
        a.unescape_value().map_err(|err| malformed_attr(e, err))?;
    }
    Ok(())
}

/// Get an unprefixed attribute value from a start tag
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> SheetResult<Option<String>> {
    for a in e.attributes() {
        let a = a.map_err(|err| malformed_attr(e, err))?;
        if a.key.as_ref() == key {
            let value = a.unescape_value().map_err(|err| malformed_attr(e, err))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
