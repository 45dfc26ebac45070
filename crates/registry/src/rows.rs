//! Header-keyed row access over raw sheet values.
//!
//! The values API returns a row-major grid of strings. The first row of the
//! range is the header; data rows become key-value records keyed by the
//! normalized header names.

use std::collections::HashMap;

/// Normalize a header cell: lowercase, spaces and underscores removed, so
/// "apiUrl", "API URL" and "api_url" all key the same field.
pub fn normalize_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

/// One data row with its absolute 1-based sheet row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub row: u32,
    fields: HashMap<String, String>,
}

impl SheetRow {
    /// Field value by normalized header name. Empty cells read as None.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Field value, or "" when the cell is empty or missing.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

/// Turn a raw value grid into header-keyed rows. `first_row` is the absolute
/// sheet row of the header (1 for whole-sheet ranges). Ragged rows are
/// padded with empty cells; fully blank rows are dropped.
pub fn keyed_rows(values: &[Vec<String>], first_row: u32) -> Vec<SheetRow> {
    let Some((header, data)) = values.split_first() else {
        return Vec::new();
    };
    let keys: Vec<String> = header.iter().map(|h| normalize_key(h)).collect();

    data.iter()
        .enumerate()
        .map(|(i, cells)| {
            let fields = keys
                .iter()
                .enumerate()
                .map(|(col, key)| {
                    let value = cells.get(col).cloned().unwrap_or_default();
                    (key.clone(), value)
                })
                .collect();
            SheetRow {
                row: first_row + 1 + i as u32,
                fields,
            }
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Column letter in A1 notation for a 0-based column index.
pub fn a1_column(index: usize) -> String {
    let mut index = index;
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII column letters")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("webhookUrl"), "webhookurl");
        assert_eq!(normalize_key("API URL"), "apiurl");
        assert_eq!(normalize_key("explorer_url"), "explorerurl");
    }

    #[test]
    fn test_keyed_rows() {
        let values = grid(&[
            &["name", "address", "balance"],
            &["relayer", "0xabc", "12.5"],
            &["ops", "0xdef", ""],
        ]);
        let rows = keyed_rows(&values, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[0].get("name"), Some("relayer"));
        assert_eq!(rows[0].get("balance"), Some("12.5"));
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[1].get("balance"), None);
    }

    #[test]
    fn test_keyed_rows_pads_ragged_rows() {
        let values = grid(&[&["name", "address", "balance"], &["relayer"]]);
        let rows = keyed_rows(&values, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("address"), None);
        assert_eq!(rows[0].get_or_empty("balance"), "");
    }

    #[test]
    fn test_keyed_rows_drops_blank_rows() {
        let values = grid(&[&["name", "address"], &["", "  "], &["ops", "0xdef"]]);
        let rows = keyed_rows(&values, 1);
        assert_eq!(rows.len(), 1);
        // Row numbers stay absolute even when blanks are dropped.
        assert_eq!(rows[0].row, 3);
    }

    #[test]
    fn test_keyed_rows_offset_range() {
        let values = grid(&[&["name"], &["relayer"]]);
        let rows = keyed_rows(&values, 4);
        assert_eq!(rows[0].row, 5);
    }

    #[test]
    fn test_keyed_rows_empty_grid() {
        assert!(keyed_rows(&[], 1).is_empty());
        assert!(keyed_rows(&grid(&[&["name"]]), 1).is_empty());
    }

    #[test]
    fn test_a1_column() {
        assert_eq!(a1_column(0), "A");
        assert_eq!(a1_column(5), "F");
        assert_eq!(a1_column(25), "Z");
        assert_eq!(a1_column(26), "AA");
        assert_eq!(a1_column(27), "AB");
        assert_eq!(a1_column(51), "AZ");
        assert_eq!(a1_column(52), "BA");
    }
}
