mod helpers;

pub use helpers::{cell_reference, display_width, index_to_col_name};
