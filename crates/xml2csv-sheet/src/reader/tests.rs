use super::*;
use crate::error::SheetError;
use crate::namespace::NamespaceTable;
use pretty_assertions::assert_eq;
use std::io::Write;

const NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

fn worksheet(sheet_data: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<dimension ref="A1:C3"/>
<sheetData>{sheet_data}</sheetData>{extra}
</worksheet>"#
    )
}

fn read_with(xml: &str, shared: &SharedStrings, options: &ReadOptions) -> Vec<Vec<String>> {
    let links = HyperlinkIndex::build(xml.as_bytes(), options).unwrap();
    WorksheetReader::read(xml.as_bytes(), shared, &links, options)
        .unwrap()
        .to_vecs()
}

fn read(xml: &str) -> Vec<Vec<String>> {
    read_with(xml, &SharedStrings::empty(), &ReadOptions::default())
}

fn rows(expected: &[&[&str]]) -> Vec<Vec<String>> {
    expected
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_full_worksheet() {
    let shared: SharedStrings = ["Name", "Site"].into_iter().collect();
    let xml = worksheet(
        r#"<row r="1" spans="1:3"><c r="A1" t="s"><v>0</v></c><c r="C1" t="s"><v>1</v></c></row>
           <row r="2"><c r="A2" t="inlineStr"><is><t>Ada</t></is></c><c r="B2"><v>36</v></c><c r="C2" t="str"><f>HYPERLINK("x")</f><v>x</v></c></row>
           <row r="3"><c r="B3" t="b"><v>1</v></c></row>"#,
        r#"<hyperlinks><hyperlink ref="C2" r:id="rId1" display="http://example.com"/></hyperlinks>"#,
    );

    assert_eq!(
        read_with(&xml, &shared, &ReadOptions::default()),
        rows(&[
            &["Name", "", "Site"],
            &["Ada", "36", "http://example.com"],
            &["", "1", ""],
        ])
    );
}

#[test]
fn test_no_rows_yields_empty_grid() {
    let xml = worksheet("", "");
    assert!(read(&xml).is_empty());
}

#[test]
fn test_rows_without_cells_yield_empty_grid() {
    let xml = worksheet(r#"<row r="1"/><row r="7" ht="20" customHeight="1"></row>"#, "");
    assert!(read(&xml).is_empty());
}

#[test]
fn test_dimensions_follow_maxima_only() {
    let xml = worksheet(r#"<row r="4"><c r="C4"><v>x</v></c></row>"#, "");
    let grid = read(&xml);
    assert_eq!(grid.len(), 4);
    assert!(grid.iter().all(|r| r.len() == 3));
    assert_eq!(grid[3][2], "x");
    assert_eq!(grid[0], vec!["", "", ""]);
}

#[test]
fn test_row_attribute_drives_row_index() {
    // The row element, not the digits of the cell address, decides the row
    let xml = worksheet(r#"<row r="2"><c r="A9"><v>x</v></c></row>"#, "");
    assert_eq!(read(&xml), rows(&[&[""], &["x"]]));
}

#[test]
fn test_duplicate_addresses_overwrite() {
    let xml = worksheet(
        r#"<row r="1"><c r="A1"><v>first</v></c><c r="A1"><v>second</v></c></row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["second"]]));
}

#[test]
fn test_missing_addresses_are_positional() {
    let xml = worksheet(
        r#"<row><c><v>a</v></c><c><v>b</v></c></row><row><c r="C2"><v>c</v></c><c><v>d</v></c></row>"#,
        "",
    );
    assert_eq!(
        read(&xml),
        rows(&[&["a", "b", "", ""], &["", "", "c", "d"]])
    );
}

#[test]
fn test_invalid_row_number_follows_previous_row() {
    let xml = worksheet(
        r#"<row r="3"><c r="A3"><v>a</v></c></row><row r="oops"><c r="A4"><v>b</v></c></row>"#,
        "",
    );
    let grid = read(&xml);
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[3], vec!["b"]);
}

#[test]
fn test_lowercase_column_letters() {
    let xml = worksheet(r#"<row r="1"><c r="b1"><v>x</v></c></row>"#, "");
    assert_eq!(read(&xml), rows(&[&["", "x"]]));
}

#[test]
fn test_cells_past_sheet_limits_skipped() {
    let xml = worksheet(
        r#"<row r="1"><c r="A1"><v>kept</v></c><c r="XFE1"><v>too wide</v></c></row>
           <row r="1048577"><c r="A1048577"><v>too tall</v></c></row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["kept"]]));
}

#[test]
fn test_shared_string_fallbacks() {
    let shared: SharedStrings = ["hello"].into_iter().collect();
    let xml = worksheet(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>5</v></c><c r="C1" t="s"/></row>"#,
        "",
    );
    assert_eq!(
        read_with(&xml, &shared, &ReadOptions::default()),
        rows(&[&["hello", "5", ""]])
    );
}

#[test]
fn test_inline_strings() {
    let xml = worksheet(
        r#"<row r="1">
             <c r="A1" t="inlineStr"><v>stray</v><is><t>foo</t></is></c>
             <c r="B1" t="inlineStr"><is><r><t>rich </t></r><r><rPr><b/></rPr><t>text</t></r></is></c>
             <c r="C1" t="inlineStr"><is><t>base</t><rPh sb="0" eb="1"><t>ruby</t></rPh></is></c>
             <c r="D1" t="inlineStr"/>
           </row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["foo", "rich ", "base", ""]]));
}

#[test]
fn test_formula_cells_use_cached_value() {
    let xml = worksheet(
        r#"<row r="1"><c r="A1"><f>SUM(1,2)</f><v>3</v></c><c r="B1"><f>NOW()</f></c></row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["3", ""]]));
}

#[test]
fn test_text_is_not_trimmed() {
    let xml = worksheet(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t xml:space="preserve">  padded  </t></is></c></row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["  padded  "]]));
}

#[test]
fn test_prefixed_and_strict_namespaces() {
    let prefixed = format!(
        r#"<x:worksheet xmlns:x="{NS}"><x:sheetData><x:row r="1"><x:c r="A1"><x:v>1</x:v></x:c></x:row></x:sheetData></x:worksheet>"#
    );
    assert_eq!(read(&prefixed), rows(&[&["1"]]));

    let strict = r#"<worksheet xmlns="http://purl.oclc.org/ooxml/spreadsheetml/main"><sheetData><row r="1"><c r="A1"><v>2</v></c></row></sheetData></worksheet>"#;
    assert_eq!(read(strict), rows(&[&["2"]]));
}

#[test]
fn test_unqualified_elements_ignored() {
    let xml = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#;
    assert!(read(xml).is_empty());

    let options = ReadOptions::default().with_namespaces(NamespaceTable::empty().with("urn:custom"));
    let custom = r#"<worksheet xmlns="urn:custom"><row r="1"><c r="A1"><v>1</v></c></row></worksheet>"#;
    assert_eq!(
        read_with(custom, &SharedStrings::empty(), &options),
        rows(&[&["1"]])
    );
}

#[test]
fn test_decode_escapes_option() {
    let xml = worksheet(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>a_x000A_b</t></is></c><c r="B1"><v>1_x0009_</v></c></row>"#,
        "",
    );
    assert_eq!(read(&xml), rows(&[&["a_x000A_b", "1_x0009_"]]));

    let options = ReadOptions::default().with_decode_escapes(true);
    assert_eq!(
        read_with(&xml, &SharedStrings::empty(), &options),
        rows(&[&["a\nb", "1_x0009_"]])
    );
}

#[test]
fn test_malformed_worksheet_is_error() {
    let xml = format!(r#"<worksheet xmlns="{NS}"><sheetData><row r="1"><c r="A1"><v>1</v></row>"#);
    let result = WorksheetReader::read(
        xml.as_bytes(),
        &SharedStrings::empty(),
        &HyperlinkIndex::empty(),
        &ReadOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_bad_cell_attribute_is_error() {
    let xml = worksheet(r#"<row r="1"><c r="A1" t="&nope;"><v>1</v></c></row>"#, "");
    let result = WorksheetReader::read(
        xml.as_bytes(),
        &SharedStrings::empty(),
        &HyperlinkIndex::empty(),
        &ReadOptions::default(),
    );
    assert!(matches!(result, Err(SheetError::Malformed(_))));
}

#[test]
fn test_last_cell_of_sheet_is_too_large_for_grid() {
    let xml = worksheet(r#"<row r="1048576"><c r="XFD1048576"><v>x</v></c></row>"#, "");
    let result = WorksheetReader::read(
        xml.as_bytes(),
        &SharedStrings::empty(),
        &HyperlinkIndex::empty(),
        &ReadOptions::default(),
    );
    assert!(matches!(
        result,
        Err(SheetError::Core(xml2csv_core::Error::GridTooLarge(1_048_576, 16_384)))
    ));
}

#[test]
fn test_read_file_with_shared_strings() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet1.xml");
    let sst_path = dir.path().join("sharedStrings.xml");

    std::fs::write(
        &sheet_path,
        worksheet(
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>2</v></c></row>"#,
            r#"<hyperlinks><hyperlink ref="B1" display="two"/></hyperlinks>"#,
        ),
    )
    .unwrap();
    let mut sst = std::fs::File::create(&sst_path).unwrap();
    write!(sst, r#"<sst xmlns="{NS}" count="1" uniqueCount="1"><si><t>one</t></si></sst>"#).unwrap();

    let sheet =
        WorksheetReader::read_file(&sheet_path, Some(sst_path.as_path()), &ReadOptions::default()).unwrap();
    assert_eq!(sheet.grid.to_vecs(), rows(&[&["one", "two"]]));
    assert_eq!(sheet.cells, 2);
    assert_eq!(sheet.shared_strings, 1);
    assert_eq!(sheet.hyperlinks, 1);
}

#[test]
fn test_read_file_missing_shared_strings_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("sheet1.xml");
    std::fs::write(
        &sheet_path,
        worksheet(r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#, ""),
    )
    .unwrap();

    let missing = dir.path().join("nope.xml");
    let sheet =
        WorksheetReader::read_file(&sheet_path, Some(missing.as_path()), &ReadOptions::default()).unwrap();
    assert_eq!(sheet.grid.to_vecs(), rows(&[&["0"]]));
    assert_eq!(sheet.shared_strings, 0);
}

#[test]
fn test_read_file_missing_worksheet_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = WorksheetReader::read_file(dir.path().join("nope.xml"), None, &ReadOptions::default());
    assert!(matches!(result, Err(SheetError::Io(_))));
}
