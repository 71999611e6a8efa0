/// Spreadsheet-style label for a zero-based column index (0 -> A, 26 -> AA)
#[must_use]
pub fn index_to_col_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index + 1;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    col_name
}

// Format cell reference (e.g., A1, B2) from a zero-based (row, col)
#[must_use]
pub fn cell_reference(cell: (usize, usize)) -> String {
    format!("{}{}", index_to_col_name(cell.1), cell.0 + 1)
}

/// Display width counting non-ASCII characters as double width
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars()
        .fold(0, |acc, c| acc + if c.is_ascii() { 1 } else { 2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_names() {
        assert_eq!(index_to_col_name(0), "A");
        assert_eq!(index_to_col_name(12), "M");
        assert_eq!(index_to_col_name(25), "Z");
        assert_eq!(index_to_col_name(26), "AA");
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference((0, 0)), "A1");
        assert_eq!(cell_reference((5, 12)), "M6");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }
}
