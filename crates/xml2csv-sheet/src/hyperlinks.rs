//! Hyperlink display-text overrides

use std::collections::HashMap;

use crate::error::SheetResult;
use crate::options::ReadOptions;
use crate::scan::{attr, Elem, Item, Scanner};

/// Map from a cell address string to the display text of its hyperlink.
///
/// Built from the `ref` and `display` attributes of `<hyperlink>` elements.
/// Keys are stored exactly as written in the document; lookups must use the
/// cell's own address string. Relationship ids (`r:id`) are not followed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperlinkIndex {
    links: HashMap<String, String>,
}

impl HyperlinkIndex {
    /// An index with no overrides
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan a worksheet document for hyperlink declarations.
    ///
    /// Declarations missing either attribute (or carrying an empty one) are
    /// skipped. A later declaration for the same `ref` replaces an earlier one.
    pub fn build(xml: &[u8], options: &ReadOptions) -> SheetResult<Self> {
        let mut scanner = Scanner::new(xml, &options.namespaces);
        let mut buf = Vec::new();
        let mut links = HashMap::new();

        while let Some(item) = scanner.next(&mut buf)? {
            if let Item::Start(Elem::Hyperlink, e) = item {
                let reference = attr(&e, b"ref")?.filter(|s| !s.is_empty());
                let display = attr(&e, b"display")?.filter(|s| !s.is_empty());

                match (reference, display) {
                    (Some(reference), Some(display)) => {
                        links.insert(reference, display);
                    }
                    (reference, _) => {
                        log::debug!(
                            "skipping hyperlink without ref/display (ref: {:?})",
                            reference
                        );
                    }
                }
            }
        }

        Ok(Self { links })
    }

    /// Display text for an address, if it has one
    pub fn get(&self, address: &str) -> Option<&str> {
        self.links.get(address).map(String::as_str)
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no overrides
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HyperlinkIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            links: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
