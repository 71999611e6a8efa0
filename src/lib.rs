//! # Letter Sheet
//!
//! A terminal letter-deduction sheet: a grid of single-letter cells plus a
//! notes field, saved to local storage and exportable/importable as JSON.
//!
//! The [`sheet::SheetManager`] owns the sheet and its persistence; the
//! [`app`], [`commands`] and [`ui`] modules are the interactive front end
//! that drives it.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod sheet;
pub mod store;
pub mod ui;
pub mod utils;

pub use config::{ImportPolicy, SheetConfig};
pub use error::{ExportError, ImportError, ParseError, PersistError, StoreError};
pub use sheet::{Export, Sheet, SheetGrid, SheetManager, filter_cell};
pub use store::{FileStore, MemoryStore, Store};
