mod cell;
mod grid;
mod manager;
mod snapshot;

pub use cell::{filter_cell, is_valid_cell};
pub use grid::SheetGrid;
pub use manager::{Export, SheetManager, export_filename};
pub use snapshot::Sheet;
