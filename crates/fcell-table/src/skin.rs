#![forbid(unsafe_code)]

//! Visual snapshot of a table cell.
//!
//! A skin turns a cell's item into display text and mirrors the classes a
//! renderer keys on. It can be built against a cell in any state, including
//! a fresh cell with no view, no column and no index. Such a cell simply
//! produces an empty skin.
//!
//! Text, classes and pseudo-classes are copied on [`TableCellSkin::sync`].
//! `id` and `style` are read through the cell's effective-value handles, so
//! a change on the column shows up in the skin without a sync.

use std::fmt;
use std::rc::Rc;

use fcell_reactive::Observable;

use crate::cell::{CellPseudoClass, TableCell};

type Converter<T> = Rc<dyn Fn(&T) -> String>;

pub struct TableCellSkin<T> {
    converter: Converter<T>,
    text: String,
    id: Observable<Option<String>>,
    style: Observable<String>,
    style_classes: Vec<String>,
    pseudo_classes: CellPseudoClass,
    sync_count: u64,
}

impl<T> fmt::Debug for TableCellSkin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCellSkin")
            .field("text", &self.text)
            .field("id", &self.id.get())
            .field("style", &self.style.get())
            .field("style_classes", &self.style_classes)
            .field("pseudo_classes", &self.pseudo_classes)
            .field("sync_count", &self.sync_count)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> TableCellSkin<T> {
    /// Skin that renders items with [`ToString`].
    #[must_use]
    pub fn new<S: 'static>(cell: &TableCell<S, T>) -> Self
    where
        T: ToString,
    {
        Self::with_converter(cell, T::to_string)
    }

    /// Skin that renders items with `converter`.
    #[must_use]
    pub fn with_converter<S: 'static>(
        cell: &TableCell<S, T>,
        converter: impl Fn(&T) -> String + 'static,
    ) -> Self {
        let mut skin = Self {
            converter: Rc::new(converter),
            text: String::new(),
            id: cell.id_property().effective().clone(),
            style: cell.style_property().effective().clone(),
            style_classes: Vec::new(),
            pseudo_classes: CellPseudoClass::EMPTY,
            sync_count: 0,
        };
        skin.sync(cell);
        skin
    }

    /// Pull the current state out of `cell`.
    pub fn sync<S: 'static>(&mut self, cell: &TableCell<S, T>) {
        self.text = match cell.item() {
            Some(item) if !cell.is_empty() => (self.converter)(item),
            _ => String::new(),
        };
        let id = cell.id_property().effective();
        if !self.id.ptr_eq(id) {
            self.id = id.clone();
        }
        let style = cell.style_property().effective();
        if !self.style.ptr_eq(style) {
            self.style = style.clone();
        }
        self.style_classes.clear();
        self.style_classes.extend_from_slice(cell.style_classes());
        self.pseudo_classes = cell.pseudo_classes();
        self.sync_count += 1;
    }

    /// Display text. Empty for empty cells and absent items.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current effective id of the cell this skin was last synced with.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.id.get()
    }

    /// Current effective inline style of the cell this skin was last synced
    /// with.
    #[must_use]
    pub fn style(&self) -> String {
        self.style.get()
    }

    #[must_use]
    pub fn style_classes(&self) -> &[String] {
        &self.style_classes
    }

    #[must_use]
    pub fn pseudo_classes(&self) -> CellPseudoClass {
        self.pseudo_classes
    }

    #[must_use]
    pub fn sync_count(&self) -> u64 {
        self.sync_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::TableColumn;
    use crate::view::TableView;

    #[test]
    fn skin_accepts_unbound_cell() {
        let mut cell: TableCell<String, String> = TableCell::new();
        let skin = TableCellSkin::new(&cell);
        assert_eq!(skin.text(), "");
        assert_eq!(skin.pseudo_classes(), CellPseudoClass::EMPTY);
        cell.set_skin(skin);
        assert!(cell.skin().is_some());
    }

    #[test]
    fn skin_follows_rebinding() {
        let view = TableView::new(vec![3_u32, 14, 159]);
        let column = TableColumn::<u32, u32>::new("n").with_value_factory(|f| Some(*f.value * 2));
        let mut cell: TableCell<u32, u32> = TableCell::new();
        cell.set_skin(TableCellSkin::new(&cell));
        cell.update_table_column(Some(column));
        cell.update_table_view(Some(view));

        cell.update_index(Some(1));
        let skin = cell.skin().expect("skin installed");
        assert_eq!(skin.text(), "28");
        assert_eq!(skin.pseudo_classes(), CellPseudoClass::FILLED);

        cell.update_index(Some(5));
        assert_eq!(cell.skin().expect("skin installed").text(), "");
    }

    #[test]
    fn converter_controls_text() {
        let view = TableView::new(vec!["a"]);
        let column = TableColumn::<&str, &str>::new("v").with_value_factory(|f| Some(*f.value));
        let mut cell: TableCell<&str, &str> = TableCell::new();
        cell.update_table_column(Some(column));
        cell.update_table_view(Some(view));
        cell.update_index(Some(0));
        cell.set_skin(TableCellSkin::with_converter(&cell, |s: &&str| format!("[{s}]")));
        assert_eq!(cell.skin().expect("skin installed").text(), "[a]");
    }

    #[test]
    fn carries_effective_attributes() {
        let column: TableColumn<u8, u8> = TableColumn::new("c");
        column.set_id("price");
        column.set_style("-fc-text-fill: gray");
        let mut cell: TableCell<u8, u8> = TableCell::new();
        cell.update_table_column(Some(column));
        cell.set_skin(TableCellSkin::new(&cell));
        let skin = cell.skin().expect("skin installed");
        assert_eq!(skin.id().as_deref(), Some("price"));
        assert_eq!(skin.style(), "-fc-text-fill: gray");

        cell.set_style("-fc-text-fill: black");
        assert_eq!(cell.skin().expect("skin installed").style(), "-fc-text-fill: black");
    }

    #[test]
    fn column_attribute_changes_reach_installed_skin() {
        let column: TableColumn<u8, u8> = TableColumn::new("c");
        let mut cell: TableCell<u8, u8> = TableCell::new();
        cell.update_table_column(Some(column.clone()));
        cell.set_skin(TableCellSkin::new(&cell));
        let syncs = cell.skin().expect("skin installed").sync_count();

        column.set_style("-fc-text-fill: red");
        column.set_id("total");
        let skin = cell.skin().expect("skin installed");
        assert_eq!(skin.style(), cell.style());
        assert_eq!(skin.style(), "-fc-text-fill: red");
        assert_eq!(skin.id(), cell.id());
        assert_eq!(skin.sync_count(), syncs);

        cell.set_style("-fc-text-fill: black");
        column.set_style("-fc-text-fill: blue");
        assert_eq!(cell.skin().expect("skin installed").style(), "-fc-text-fill: black");
    }

    #[test]
    fn syncing_with_another_cell_follows_that_cell() {
        let mut first: TableCell<u8, u8> = TableCell::new();
        first.set_id("first");
        let mut second: TableCell<u8, u8> = TableCell::new();
        second.set_id("second");

        let mut skin = TableCellSkin::new(&first);
        assert_eq!(skin.id().as_deref(), Some("first"));
        skin.sync(&second);
        assert_eq!(skin.id().as_deref(), Some("second"));
        first.set_id("first again");
        assert_eq!(skin.id().as_deref(), Some("second"));
    }

    #[test]
    fn absent_item_renders_blank_but_filled() {
        let view = TableView::new(vec![1_u8]);
        let column: TableColumn<u8, String> = TableColumn::new("none").with_value_factory(|_| None);
        let mut cell: TableCell<u8, String> = TableCell::new();
        cell.update_table_column(Some(column));
        cell.update_table_view(Some(view));
        cell.set_skin(TableCellSkin::new(&cell));
        cell.update_index(Some(0));
        let skin = cell.skin().expect("skin installed");
        assert_eq!(skin.text(), "");
        assert_eq!(skin.pseudo_classes(), CellPseudoClass::FILLED);
    }
}
