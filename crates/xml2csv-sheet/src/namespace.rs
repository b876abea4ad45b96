//! Namespace bindings for element matching
//!
//! Elements are matched by namespace URI plus local name, never by prefix, so
//! `<row>`, `<x:row>` and `<main:row>` are all rows as long as their prefix is
//! bound to a URI in the table.

use quick_xml::name::ResolveResult;

/// SpreadsheetML main namespace (transitional)
pub const SPREADSHEETML_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// SpreadsheetML main namespace (ISO strict)
pub const SPREADSHEETML_STRICT: &str = "http://purl.oclc.org/ooxml/spreadsheetml/main";

/// The set of namespace URIs whose elements a parse call recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    uris: Vec<String>,
}

impl NamespaceTable {
    /// A table with no namespaces; nothing matches until one is added
    pub fn empty() -> Self {
        Self { uris: Vec::new() }
    }

    /// The SpreadsheetML main namespaces (transitional and strict)
    pub fn spreadsheetml() -> Self {
        Self::empty()
            .with(SPREADSHEETML_MAIN)
            .with(SPREADSHEETML_STRICT)
    }

    /// Add a namespace URI
    pub fn with<S: Into<String>>(mut self, uri: S) -> Self {
        let uri = uri.into();
        if !self.uris.contains(&uri) {
            self.uris.push(uri);
        }
        self
    }

    /// Whether `ns` is one of the recognized URIs
    pub fn contains(&self, ns: &[u8]) -> bool {
        self.uris.iter().any(|u| u.as_bytes() == ns)
    }

    /// Whether a resolved element name belongs to a recognized namespace
    pub(crate) fn is_bound(&self, resolved: &ResolveResult<'_>) -> bool {
        match resolved {
            ResolveResult::Bound(ns) => self.contains(ns.0),
            _ => false,
        }
    }

    /// The recognized URIs, in insertion order
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::spreadsheetml()
    }
}
