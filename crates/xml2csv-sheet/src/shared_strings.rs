//! Shared strings table

use std::fs;
use std::path::Path;

use crate::error::SheetResult;
use crate::escape::decode_excel_escapes;
use crate::options::ReadOptions;
use crate::scan::{Elem, Item, Scanner};

/// Ordered pool of strings referenced by shared-string cells.
///
/// Index `i` is the `i`-th `<si>` item of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from an optional file, degrading to an empty table.
    ///
    /// A missing path, an unreadable file or a malformed document all yield
    /// an empty table and a warning; none of them fail the conversion.
    pub fn load(path: Option<&Path>, options: &ReadOptions) -> Self {
        let Some(path) = path else {
            return Self::empty();
        };

        match Self::read_file(path, options) {
            Ok(table) => {
                log::debug!(
                    "loaded {} shared strings from '{}'",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::warn!(
                    "shared strings '{}' unusable, continuing without them: {}",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Read and parse a shared-strings file
    pub fn read_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> SheetResult<Self> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes, options)
    }

    /// Parse a shared-strings document
    ///
    /// Each `<si>` item becomes one entry: the text of all its `<t>` nodes
    /// concatenated in document order, which covers both the plain `<si><t>`
    /// form, rich text split across `<r>` runs, and the `<t>` inside phonetic
    /// `<rPh>` runs.
    pub fn parse(xml: &[u8], options: &ReadOptions) -> SheetResult<Self> {
        let mut scanner = Scanner::new(xml, &options.namespaces);
        let mut buf = Vec::new();

        let mut strings = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;

        while let Some(item) = scanner.next(&mut buf)? {
            match item {
                Item::Start(Elem::StringItem, _) => {
                    in_si = true;
                    current.clear();
                }
                Item::Start(Elem::Text, _) if in_si => in_t = true,
                Item::Text(text) if in_t => current.push_str(&text),
                Item::End(Elem::Text) => in_t = false,
                Item::End(Elem::StringItem) if in_si => {
                    let value = if options.decode_escapes {
                        decode_excel_escapes(&current).into_owned()
                    } else {
                        std::mem::take(&mut current)
                    };
                    strings.push(value);
                    current.clear();
                    in_si = false;
                }
                _ => {}
            }
        }

        Ok(Self { strings })
    }

    /// Get the string at a positional index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Number of strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no strings
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over strings in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}

impl<S: Into<String>> FromIterator<S> for SharedStrings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().map(Into::into).collect(),
        }
    }
}
