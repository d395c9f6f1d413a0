#![forbid(unsafe_code)]

//! Reactive primitives for fcell.
//!
//! # Role in fcell
//! `fcell-reactive` is the binding layer underneath the table cell. Columns
//! publish their display attributes as [`Observable`] values and every cell
//! tracks them through an [`InheritedProperty`], which falls back to the
//! owner's live value until the cell is given an explicit one.
//!
//! Everything here is single-threaded: values live in `Rc<RefCell<..>>` and
//! callbacks run synchronously inside the mutation that triggered them.

pub mod observable;
pub mod property;

pub use observable::{Observable, Subscription};
pub use property::InheritedProperty;
