#![forbid(unsafe_code)]

//! Recyclable table cells for fcell.
//!
//! # Role in fcell
//! A virtualized table keeps one [`TableCell`] per visible slot and rebinds
//! it to a different row as the viewport scrolls. This crate holds the
//! pieces of that contract:
//!
//! - [`TableView`]: the row source plus optional selection and focus models.
//! - [`TableColumn`]: value extraction and the display attributes (`id`,
//!   `style`) that cells inherit.
//! - [`TableCell`]: the reusable slot. Rebinding recomputes its item, empty
//!   flag, selection and focus, and it never fails on missing collaborators.
//! - [`TableCellSkin`]: a visual snapshot that tolerates half-bound cells.
//! - [`TableFlow`]: the pool that materializes cells once and rebinds them.
//!
//! Everything runs on one thread and recomputes synchronously inside the
//! call that triggered it.

pub mod cell;
pub mod column;
pub mod flow;
pub mod skin;
pub mod view;

pub use cell::{CellPseudoClass, TableCell};
pub use column::{CellDataFeatures, TableColumn};
pub use flow::TableFlow;
pub use skin::TableCellSkin;
pub use view::{SelectionMode, TableFocusModel, TableSelectionModel, TableView};
