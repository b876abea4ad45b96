//! Reading options

use crate::namespace::NamespaceTable;

/// Options for reading worksheet and shared-strings documents
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Namespaces whose elements are recognized
    pub namespaces: NamespaceTable,
    /// Decode Excel `_xHHHH_` escapes in string values (default: off)
    pub decode_escapes: bool,
}

impl ReadOptions {
    /// Options with escape decoding switched on or off
    pub fn with_decode_escapes(mut self, decode: bool) -> Self {
        self.decode_escapes = decode;
        self
    }

    /// Options recognizing a different namespace table
    pub fn with_namespaces(mut self, namespaces: NamespaceTable) -> Self {
        self.namespaces = namespaces;
        self
    }
}
