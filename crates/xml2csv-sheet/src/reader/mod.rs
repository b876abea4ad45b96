//! Worksheet reader
//!
//! Scans the `<row>`/`<c>` elements of a worksheet document into a sparse cell
//! set, then materializes the dense [`Grid`].

use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;

use crate::error::SheetResult;
use crate::escape::decode_excel_escapes;
use crate::hyperlinks::HyperlinkIndex;
use crate::options::ReadOptions;
use crate::resolver::{resolve, CellKind, LiteralKind, RawCell};
use crate::scan::{attr, Elem, Item, Scanner};
use crate::shared_strings::SharedStrings;
use xml2csv_core::{column_prefix, letters_to_column, Grid, SparseCells, MAX_COLS, MAX_ROWS};

/// A worksheet read from disk, with what it was resolved against
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// The dense cell grid
    pub grid: Grid,
    /// Number of `<c>` elements placed in the grid
    pub cells: usize,
    /// Size of the shared strings table used
    pub shared_strings: usize,
    /// Number of hyperlink overrides found
    pub hyperlinks: usize,
}

/// Worksheet document reader
pub struct WorksheetReader;

impl WorksheetReader {
    /// Read a worksheet file, with an optional shared-strings file.
    ///
    /// The shared strings degrade to an empty table if they cannot be
    /// loaded; a worksheet that cannot be read or parsed is an error.
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        shared_strings: Option<&Path>,
        options: &ReadOptions,
    ) -> SheetResult<Worksheet> {
        let xml = fs::read(path.as_ref())?;
        let shared = SharedStrings::load(shared_strings, options);
        let links = HyperlinkIndex::build(&xml, options)?;
        let cells = Self::scan(&xml, &shared, &links, options)?;

        Ok(Worksheet {
            cells: cells.len(),
            grid: cells.into_grid()?,
            shared_strings: shared.len(),
            hyperlinks: links.len(),
        })
    }

    /// Read a worksheet document into a dense grid
    pub fn read(
        xml: &[u8],
        shared_strings: &SharedStrings,
        hyperlinks: &HyperlinkIndex,
        options: &ReadOptions,
    ) -> SheetResult<Grid> {
        Ok(Self::scan(xml, shared_strings, hyperlinks, options)?.into_grid()?)
    }

    /// Scan a worksheet document into its sparse cell set.
    ///
    /// Rows come from every `<row>` element, cells from the `<c>` children
    /// of a row. The row index is the row's `r` attribute; the column is
    /// decoded from the letters of the cell's `r` attribute. When either is
    /// missing the element is placed right after its predecessor.
    pub fn scan(
        xml: &[u8],
        shared_strings: &SharedStrings,
        hyperlinks: &HyperlinkIndex,
        options: &ReadOptions,
    ) -> SheetResult<SparseCells> {
        let mut scanner = Scanner::new(xml, &options.namespaces);
        let mut buf = Vec::new();
        let mut state = ScanState::default();

        while let Some(item) = scanner.next(&mut buf)? {
            let depth = scanner.depth();
            match item {
                Item::Start(Elem::Row, e) => state.start_row(&e, depth)?,
                Item::End(Elem::Row) => state.row = None,
                Item::Start(Elem::Cell, e) => state.start_cell(&e, depth)?,
                Item::End(Elem::Cell) => {
                    if let Some(cell) = state.cell.take() {
                        state.finish_cell(cell, shared_strings, hyperlinks, options);
                    }
                }
                Item::Start(elem, _) => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.open(elem, depth);
                    }
                }
                Item::End(elem) => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.close(elem);
                    }
                }
                Item::Text(text) => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.text(&text);
                    }
                }
                Item::Skip => {}
            }
        }

        log::debug!(
            "scanned {} cells, grid {}x{}",
            state.cells.len(),
            state.cells.dimensions().0,
            state.cells.dimensions().1
        );
        Ok(state.cells)
    }
}

#[derive(Debug, Default)]
struct ScanState {
    cells: SparseCells,
    row: Option<RowState>,
    cell: Option<PendingCell>,
    /// Index used for a row without a usable `r` attribute
    next_row: u32,
}

#[derive(Debug)]
struct RowState {
    index: u32,
    depth: usize,
    /// Column used for a cell without a usable address
    next_col: u32,
}

impl ScanState {
    fn start_row(&mut self, e: &BytesStart<'_>, depth: usize) -> SheetResult<()> {
        let declared = attr(e, b"r")?;
        let index = match declared.as_deref().map(|r| r.trim().parse::<u32>()) {
            Some(Ok(n)) if n >= 1 => n - 1,
            Some(_) => {
                log::warn!(
                    "row has invalid r=\"{}\", placing it at row {}",
                    declared.as_deref().unwrap_or_default(),
                    self.next_row as u64 + 1
                );
                self.next_row
            }
            None => self.next_row,
        };

        if index >= MAX_ROWS {
            log::warn!(
                "row {} exceeds the sheet limit of {} rows, its cells are skipped",
                index as u64 + 1,
                MAX_ROWS
            );
        }

        self.next_row = index.saturating_add(1);
        self.row = Some(RowState {
            index,
            depth,
            next_col: 0,
        });
        Ok(())
    }

    fn start_cell(&mut self, e: &BytesStart<'_>, depth: usize) -> SheetResult<()> {
        // Only direct children of a row are cells
        if !matches!(&self.row, Some(row) if row.depth + 1 == depth) {
            return Ok(());
        }
        self.cell = Some(PendingCell {
            address: attr(e, b"r")?,
            kind: CellKind::from_type_attr(attr(e, b"t")?.as_deref()),
            depth,
            ..PendingCell::default()
        });
        Ok(())
    }

    fn finish_cell(
        &mut self,
        cell: PendingCell,
        shared_strings: &SharedStrings,
        hyperlinks: &HyperlinkIndex,
        options: &ReadOptions,
    ) {
        let Some(row) = self.row.as_mut() else {
            return;
        };

        let col = match cell.address.as_deref().map(column_prefix) {
            Some(letters) if !letters.is_empty() => match letters_to_column(letters) {
                Ok(col) => col as u32,
                Err(e) => {
                    log::warn!(
                        "skipping cell '{}': {}",
                        cell.address.as_deref().unwrap_or_default(),
                        e
                    );
                    return;
                }
            },
            Some(_) => {
                log::warn!(
                    "cell address '{}' has no column letters, placing it at column {}",
                    cell.address.as_deref().unwrap_or_default(),
                    row.next_col as u64 + 1
                );
                row.next_col
            }
            None => row.next_col,
        };
        row.next_col = col + 1;

        if row.index >= MAX_ROWS {
            return;
        }
        if col >= MAX_COLS as u32 {
            log::warn!(
                "cell in row {} past the sheet limit of {} columns skipped",
                row.index as u64 + 1,
                MAX_COLS
            );
            return;
        }

        let raw = cell.into_raw(options);
        let value = resolve(&raw, shared_strings, hyperlinks);
        self.cells.insert(row.index, col as u16, value.into_owned());
    }
}

/// A `<c>` element being read
#[derive(Debug, Default)]
struct PendingCell {
    address: Option<String>,
    kind: CellKind,
    depth: usize,
    raw: String,
    inline: Option<String>,
    in_value: bool,
    in_inline: bool,
    in_text: bool,
}

impl PendingCell {
    fn open(&mut self, elem: Elem, depth: usize) {
        match elem {
            // The value is the <v> child of the cell, not of a nested element
            Elem::Value if depth == self.depth + 1 => self.in_value = true,
            Elem::InlineString => self.in_inline = true,
            // Only the first <t> of the inline string is its text
            Elem::Text if self.in_inline && self.inline.is_none() => {
                self.in_text = true;
                self.inline = Some(String::new());
            }
            _ => {}
        }
    }

    fn close(&mut self, elem: Elem) {
        match elem {
            Elem::Value => self.in_value = false,
            Elem::InlineString => self.in_inline = false,
            Elem::Text => self.in_text = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_value {
            self.raw.push_str(text);
        } else if self.in_text {
            if let Some(inline) = self.inline.as_mut() {
                inline.push_str(text);
            }
        }
    }

    fn into_raw(self, options: &ReadOptions) -> RawCell {
        let decode = options.decode_escapes
            && matches!(
                self.kind,
                CellKind::InlineString | CellKind::Literal(LiteralKind::FormulaString)
            );

        let (raw, inline) = if decode {
            (
                decode_excel_escapes(&self.raw).into_owned(),
                self.inline
                    .as_deref()
                    .map(|s| decode_excel_escapes(s).into_owned()),
            )
        } else {
            (self.raw, self.inline)
        };

        RawCell {
            address: self.address,
            kind: self.kind,
            raw,
            inline,
        }
    }
}

#[cfg(test)]
mod tests;
