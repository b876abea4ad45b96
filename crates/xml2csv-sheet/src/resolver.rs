//! Cell value resolution
//!
//! A cell's final text depends on its type tag:
//! - shared string (`t="s"`): the raw value is an index into [`SharedStrings`]
//! - inline string (`t="inlineStr"`): the text nested under `<is>`
//! - everything else: the raw `<v>` text as written
//!
//! A hyperlink display text for the cell's address replaces all of these.

use std::borrow::Cow;

use crate::hyperlinks::HyperlinkIndex;
use crate::shared_strings::SharedStrings;

/// What a literal cell's type attribute said it holds.
///
/// Informational only: every literal resolves to its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralKind {
    /// `n` or no type attribute
    Number,
    /// `b`
    Boolean,
    /// `e`
    Error,
    /// `str` (cached formula result)
    FormulaString,
    /// `d` (ISO 8601 date)
    Date,
    /// Any other type attribute
    Unknown(String),
}

/// How a cell's value is encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// Raw text is the value
    Literal(LiteralKind),
    /// Raw text is an index into the shared strings table
    SharedString,
    /// Value is nested inline rich text
    InlineString,
}

impl CellKind {
    /// Classify a cell by its `t` attribute
    pub fn from_type_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::SharedString,
            Some("inlineStr") => CellKind::InlineString,
            None | Some("n") => CellKind::Literal(LiteralKind::Number),
            Some("b") => CellKind::Literal(LiteralKind::Boolean),
            Some("e") => CellKind::Literal(LiteralKind::Error),
            Some("str") => CellKind::Literal(LiteralKind::FormulaString),
            Some("d") => CellKind::Literal(LiteralKind::Date),
            Some(other) => CellKind::Literal(LiteralKind::Unknown(other.to_string())),
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        CellKind::Literal(LiteralKind::Number)
    }
}

/// One cell as read from the worksheet, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// The `r` attribute exactly as written, if present
    pub address: Option<String>,
    /// Value encoding
    pub kind: CellKind,
    /// Text of the `<v>` child (empty when absent)
    pub raw: String,
    /// Concatenated `<t>` text under `<is>`, if an inline text node exists
    pub inline: Option<String>,
}

impl RawCell {
    /// A cell at `address` with the given kind and raw value
    pub fn new<A: Into<String>, R: Into<String>>(address: A, kind: CellKind, raw: R) -> Self {
        Self {
            address: Some(address.into()),
            kind,
            raw: raw.into(),
            inline: None,
        }
    }

    /// Attach inline text
    pub fn with_inline<S: Into<String>>(mut self, inline: S) -> Self {
        self.inline = Some(inline.into());
        self
    }
}

/// Resolve a cell's final text. Never fails.
///
/// Out-of-range or non-numeric shared-string indices fall back to the raw
/// text; an inline string without a text node falls back to the raw text.
pub fn resolve<'a>(
    cell: &'a RawCell,
    shared_strings: &'a SharedStrings,
    hyperlinks: &'a HyperlinkIndex,
) -> Cow<'a, str> {
    if let Some(display) = cell.address.as_deref().and_then(|a| hyperlinks.get(a)) {
        return Cow::Borrowed(display);
    }

    match &cell.kind {
        CellKind::SharedString => resolve_shared(cell, shared_strings),
        CellKind::InlineString => match &cell.inline {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => {
                log::debug!(
                    "inline string cell {} has no text node, using raw value",
                    cell.address.as_deref().unwrap_or("?")
                );
                Cow::Borrowed(cell.raw.as_str())
            }
        },
        CellKind::Literal(_) => Cow::Borrowed(cell.raw.as_str()),
    }
}

fn resolve_shared<'a>(cell: &'a RawCell, shared_strings: &'a SharedStrings) -> Cow<'a, str> {
    let entry = cell
        .raw
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| shared_strings.get(i));

    match entry {
        Some(s) => Cow::Borrowed(s),
        None => {
            log::debug!(
                "shared string index '{}' of cell {} does not resolve ({} strings), using raw value",
                cell.raw,
                cell.address.as_deref().unwrap_or("?"),
                shared_strings.len()
            );
            Cow::Borrowed(cell.raw.as_str())
        }
    }
}
