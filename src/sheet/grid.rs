use crate::config::ImportPolicy;
use crate::sheet::{Sheet, filter_cell};

/// The live, editable sheet: fixed-width rows of cells plus the notes text.
///
/// Every row always holds exactly `cols` cells. Typed input goes through
/// [`filter_cell`]; content loaded from a snapshot is kept as the
/// [`ImportPolicy`] dictates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
    notes: String,
    cols: usize,
}

impl SheetGrid {
    pub fn new(cols: usize) -> Self {
        Self {
            rows: Vec::new(),
            notes: String::new(),
            cols,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
    }

    /// Store typed input in a cell, returning the filtered value.
    ///
    /// Returns `None` when the position lies outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, raw: &str) -> Option<&str> {
        let cell = self.rows.get_mut(row)?.get_mut(col)?;
        *cell = filter_cell(raw);
        Some(cell.as_str())
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(cell) => {
                cell.clear();
                true
            }
            None => false,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.cols]);
    }

    /// Remove the last row; does nothing on an empty grid
    pub fn remove_row(&mut self) -> bool {
        self.rows.pop().is_some()
    }

    /// Replace the whole grid with the given snapshot.
    ///
    /// The row count comes from the snapshot (or `default_rows` when it has
    /// none); the width is always `cols`, padding short rows with blanks and
    /// dropping cells past the last column.
    pub fn load(&mut self, snapshot: Option<&Sheet>, default_rows: usize, policy: ImportPolicy) {
        let source = snapshot.map(|s| s.data.as_slice()).unwrap_or_default();
        let row_count = if source.is_empty() {
            default_rows
        } else {
            source.len()
        };

        self.rows = (0..row_count)
            .map(|r| {
                let cells = source.get(r).map(Vec::as_slice).unwrap_or_default();
                (0..self.cols)
                    .map(|c| match cells.get(c) {
                        Some(value) if policy == ImportPolicy::Sanitize => filter_cell(value),
                        Some(value) => value.clone(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        self.notes = snapshot.map(|s| s.notes.clone()).unwrap_or_default();
    }

    /// Copy the current contents into an independent snapshot
    pub fn snapshot(&self) -> Sheet {
        Sheet {
            data: self.rows.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]], notes: &str) -> Sheet {
        Sheet {
            data: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_load_none_gives_default_rows() {
        let mut grid = SheetGrid::new(4);
        grid.load(None, 3, ImportPolicy::Preserve);
        assert_eq!(grid.row_count(), 3);
        assert!(grid.rows().iter().all(|r| r.len() == 4));
        assert_eq!(grid.notes(), "");
    }

    #[test]
    fn test_load_pads_and_truncates_columns() {
        let mut grid = SheetGrid::new(3);
        grid.load(
            Some(&sheet(&[&["A"], &["B", "C", "D", "E"]], "n")),
            6,
            ImportPolicy::Preserve,
        );
        assert_eq!(grid.rows(), &[vec!["A", "", ""], vec!["B", "C", "D"]]);
        assert_eq!(grid.notes(), "n");
    }

    #[test]
    fn test_load_fully_replaces_previous_state() {
        let mut grid = SheetGrid::new(2);
        grid.load(None, 5, ImportPolicy::Preserve);
        grid.set_cell(0, 0, "q");
        grid.set_notes("old");

        grid.load(Some(&sheet(&[&["Z", "Y"]], "")), 5, ImportPolicy::Preserve);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.cell(0, 0), Some("Z"));
        assert_eq!(grid.notes(), "");
    }

    #[test]
    fn test_preserve_and_sanitize_policies() {
        let raw = sheet(&[&["ab", "3", "c"]], "");

        let mut grid = SheetGrid::new(3);
        grid.load(Some(&raw), 6, ImportPolicy::Preserve);
        assert_eq!(grid.rows()[0], vec!["ab", "3", "c"]);

        grid.load(Some(&raw), 6, ImportPolicy::Sanitize);
        assert_eq!(grid.rows()[0], vec!["A", "", "C"]);
    }

    #[test]
    fn test_set_cell_filters_input() {
        let mut grid = SheetGrid::new(2);
        grid.load(None, 1, ImportPolicy::Preserve);
        assert_eq!(grid.set_cell(0, 1, "x1"), Some("X"));
        assert_eq!(grid.set_cell(0, 0, "9"), Some(""));
        assert_eq!(grid.set_cell(1, 0, "a"), None);
        assert_eq!(grid.set_cell(0, 2, "a"), None);
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut grid = SheetGrid::new(2);
        grid.load(None, 1, ImportPolicy::Preserve);
        grid.add_row();
        assert_eq!(grid.row_count(), 2);
        assert!(grid.remove_row());
        assert!(grid.remove_row());
        assert!(!grid.remove_row());
        assert_eq!(grid.row_count(), 0);
        assert!(grid.snapshot().data.is_empty());
    }

    #[test]
    fn test_clear_cell() {
        let mut grid = SheetGrid::new(2);
        grid.load(Some(&sheet(&[&["A", "B"]], "")), 6, ImportPolicy::Preserve);
        assert!(grid.clear_cell(0, 1));
        assert_eq!(grid.cell(0, 1), Some(""));
        assert!(!grid.clear_cell(3, 0));
    }
}
