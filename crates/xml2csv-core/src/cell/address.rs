//! Cell addresses and the column letter codec

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "B7")
///
/// Cell addresses in a worksheet combine column letters (A-XFD) and a 1-based
/// row number (1-1048576). Both coordinates are stored 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// `$` markers are accepted and ignored.
    ///
    /// # Examples
    /// ```
    /// use xml2csv_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B7").unwrap();
    /// assert_eq!(addr.row, 6);
    /// assert_eq!(addr.col, 1);
    ///
    /// let addr = CellAddress::parse("$AA$1").unwrap();
    /// assert_eq!(addr.col, 26);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let letters = column_prefix(s);
        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = letters_to_column(letters)?;

        // Everything after the letters (and an optional `$`) is the row number
        let rest = s.trim_start_matches('$');
        let row_str = rest[letters.len()..].trim_start_matches('$');
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in A1 notation
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let row = row - 1;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self { row, col })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = column_to_letters(self.col);
        result.push_str(&(self.row + 1).to_string());
        result
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Return the leading run of column letters of an A1-style address.
///
/// A leading `$` is skipped. Returns an empty string when the address does not
/// start with a letter.
///
/// ```
/// use xml2csv_core::column_prefix;
///
/// assert_eq!(column_prefix("B7"), "B");
/// assert_eq!(column_prefix("$AB$12"), "AB");
/// assert_eq!(column_prefix("12"), "");
/// ```
pub fn column_prefix(address: &str) -> &str {
    let s = address.strip_prefix('$').unwrap_or(address);
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(s.len());
    &s[..end]
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
///
/// Column letters are a bijective base-26 numeral: digits run A=1..Z=26 and
/// no digit stands for zero.
pub fn column_to_letters(col: u16) -> String {
    let mut digits = Vec::with_capacity(3);
    let mut n = col as u32 + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        digits.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive. Fails on an empty run, on anything that is
/// not an ASCII letter, and on columns past `XFD`.
pub fn letters_to_column(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);

        // Every further digit only grows the value, so stop before overflowing
        if col > MAX_COLS as u32 {
            return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
        }
    }

    Ok((col - 1) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(51), "AZ");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
        assert_eq!(column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("AZ").unwrap(), 51);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("XFD").unwrap(), 16383);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aZ").unwrap(), 51);
    }

    #[test]
    fn test_letters_to_column_errors() {
        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
        assert!(letters_to_column("É").is_err());
        assert!(matches!(
            letters_to_column("XFE"),
            Err(Error::ColumnOutOfBounds(16384, 16383))
        ));
        assert!(letters_to_column("ZZZZZZZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_codec_bijection_first_ten_thousand() {
        for i in 0..10_000u16 {
            assert_eq!(letters_to_column(&column_to_letters(i)).unwrap(), i);
        }
    }

    proptest! {
        #[test]
        fn prop_codec_roundtrip(col in 0u16..MAX_COLS) {
            prop_assert_eq!(letters_to_column(&column_to_letters(col)).unwrap(), col);
        }

        #[test]
        fn prop_letters_are_uppercase(col in 0u16..MAX_COLS) {
            let letters = column_to_letters(col);
            prop_assert!(!letters.is_empty());
            prop_assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_column_prefix() {
        assert_eq!(column_prefix("A1"), "A");
        assert_eq!(column_prefix("XFD1048576"), "XFD");
        assert_eq!(column_prefix("$B$2"), "B");
        assert_eq!(column_prefix("b7"), "b");
        assert_eq!(column_prefix(""), "");
        assert_eq!(column_prefix("7"), "");
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("A1").unwrap();
        assert_eq!(addr, CellAddress::new(0, 0));

        let addr = CellAddress::parse("B7").unwrap();
        assert_eq!(addr, CellAddress::new(6, 1));

        let addr = CellAddress::parse("$C$3").unwrap();
        assert_eq!(addr, CellAddress::new(2, 2));

        let addr = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!(addr.row, 1048575);
        assert_eq!(addr.col, 16383);
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1x").is_err());
        assert!(CellAddress::parse("A1048577").is_err());
        assert!(CellAddress::parse("XFE1").is_err());
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!("AZ12".parse::<CellAddress>().unwrap().to_string(), "AZ12");
    }
}
