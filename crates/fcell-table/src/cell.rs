#![forbid(unsafe_code)]

//! The recyclable table cell.
//!
//! A [`TableCell`] is created once per visible slot and rebound to different
//! rows as the table scrolls. It is bound to a `(view, column, index)` triple,
//! any part of which may be missing. From that triple it derives its item,
//! its empty flag and its selection and focus state. Every rebinding
//! operation recomputes them on the spot.
//!
//! # Empty state
//!
//! The cell is empty when it has no view, no column, a hidden column, no
//! index, a view without rows, or an index past the last row. An empty cell
//! has no item. A bound cell whose value factory returns `None` is **not**
//! empty. It holds an absent item.
//!
//! # Item updates
//!
//! At a valid index [`TableCell::update_item`] runs on every rebind, even
//! when the new item equals the old one. Hooks registered with
//! [`TableCell::on_update_item`] may carry state of their own (bindings,
//! per-row decoration) that goes stale if the call is skipped. Do not
//! memoize this by item equality.
//!
//! # Attributes
//!
//! `id` and `style` are [`InheritedProperty`] values owned by the cell. While
//! bound to a column they follow the column's attributes live. A value set
//! directly on the cell wins from then on.

use std::fmt;

use bitflags::bitflags;
use fcell_reactive::InheritedProperty;
use tracing::{debug, trace};

use crate::column::{CellDataFeatures, TableColumn};
use crate::skin::TableCellSkin;
use crate::view::TableView;

/// Style class every table cell carries.
pub const TABLE_CELL_STYLE_CLASS: &str = "table-cell";

bitflags! {
    /// State flags a skin or stylesheet can key on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellPseudoClass: u8 {
        const EMPTY    = 0b0001;
        const FILLED   = 0b0010;
        const SELECTED = 0b0100;
        const FOCUSED  = 0b1000;
    }
}

type UpdateHook<T> = Box<dyn FnMut(Option<&T>, bool)>;

/// A reusable slot in a virtualized table.
pub struct TableCell<S, T> {
    table_view: Option<TableView<S>>,
    table_column: Option<TableColumn<S, T>>,
    index: Option<usize>,
    item: Option<T>,
    empty: bool,
    selected: bool,
    focused: bool,
    id: InheritedProperty<Option<String>>,
    style: InheritedProperty<String>,
    style_classes: Vec<String>,
    update_hooks: Vec<UpdateHook<T>>,
    update_count: u64,
    skin: Option<TableCellSkin<T>>,
}

impl<S, T: fmt::Debug> fmt::Debug for TableCell<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCell")
            .field("index", &self.index)
            .field("item", &self.item)
            .field("empty", &self.empty)
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .field("has_table_view", &self.table_view.is_some())
            .field("has_table_column", &self.table_column.is_some())
            .field("id", &self.id)
            .field("style", &self.style)
            .field("update_count", &self.update_count)
            .finish_non_exhaustive()
    }
}

impl<S: 'static, T: 'static> Default for TableCell<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, T: 'static> TableCell<S, T> {
    pub const TABLE_VIEW_PROPERTY: &'static str = "tableView";
    pub const TABLE_COLUMN_PROPERTY: &'static str = "tableColumn";
    pub const INDEX_PROPERTY: &'static str = "index";
    pub const ID_PROPERTY: &'static str = "id";
    pub const STYLE_PROPERTY: &'static str = "style";

    /// An unbound, empty cell. Construction has no other effects.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table_view: None,
            table_column: None,
            index: None,
            item: None,
            empty: true,
            selected: false,
            focused: false,
            id: InheritedProperty::new(Self::ID_PROPERTY, None),
            style: InheritedProperty::new(Self::STYLE_PROPERTY, String::new()),
            style_classes: vec![TABLE_CELL_STYLE_CLASS.to_string()],
            update_hooks: Vec::new(),
            update_count: 0,
            skin: None,
        }
    }

    /// Builder form of [`on_update_item`](Self::on_update_item).
    #[must_use]
    pub fn with_update_hook(mut self, hook: impl FnMut(Option<&T>, bool) + 'static) -> Self {
        self.on_update_item(hook);
        self
    }

    /// Run `hook` after every [`update_item`](Self::update_item), with the
    /// new item and empty flag.
    pub fn on_update_item(&mut self, hook: impl FnMut(Option<&T>, bool) + 'static) {
        self.update_hooks.push(Box::new(hook));
    }

    // -- bindings ----------------------------------------------------------

    #[must_use]
    pub fn table_view(&self) -> Option<&TableView<S>> {
        self.table_view.as_ref()
    }

    #[must_use]
    pub fn table_column(&self) -> Option<&TableColumn<S, T>> {
        self.table_column.as_ref()
    }

    /// Bound row, `None` when unbound.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Rebind to `view`, or detach with `None`.
    ///
    /// A view with no rows, no selection model or no focus model is accepted
    /// as is. The cell just ends up empty, unselected or unfocused.
    pub fn update_table_view(&mut self, view: Option<TableView<S>>) {
        let unchanged = match (&self.table_view, &view) {
            (Some(old), Some(new)) => old.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        debug!(
            property = Self::TABLE_VIEW_PROPERTY,
            bound = view.is_some(),
            rows = view.as_ref().and_then(TableView::items_len),
            "table cell view rebound"
        );
        self.table_view = view;
        self.refresh();
    }

    /// Rebind to `column`, or detach with `None`.
    ///
    /// The cell's `id` and `style` start following the new column (or fall
    /// back to their defaults) unless they were set on the cell directly.
    pub fn update_table_column(&mut self, column: Option<TableColumn<S, T>>) {
        let unchanged = match (&self.table_column, &column) {
            (Some(old), Some(new)) => old.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        debug!(
            property = Self::TABLE_COLUMN_PROPERTY,
            bound = column.is_some(),
            "table cell column rebound"
        );
        self.table_column = column;
        self.id
            .bind_owner(self.table_column.as_ref().map(TableColumn::id_observable));
        self.style
            .bind_owner(self.table_column.as_ref().map(TableColumn::style_observable));
        self.refresh();
    }

    /// Rebind to row `index` (`None` unbinds) and recompute everything
    /// derived from it. Always recomputes, even for the current index.
    pub fn update_index(&mut self, index: Option<usize>) {
        trace!(
            property = Self::INDEX_PROPERTY,
            old = ?self.index,
            new = ?index,
            "table cell index updated"
        );
        self.index = index;
        self.refresh();
    }

    /// Recompute item, selection and focus from the current binding.
    pub fn refresh(&mut self) {
        self.refresh_item();
        self.refresh_selection();
        self.refresh_focus();
        self.sync_skin();
    }

    fn resolve_item(&self) -> Option<Option<T>> {
        let view = self.table_view.as_ref()?;
        let column = self.table_column.as_ref()?;
        let index = self.index?;
        if !column.is_visible() {
            return None;
        }
        view.with_row(index, |value| {
            column.cell_value(CellDataFeatures { value, index, view })
        })
    }

    fn refresh_item(&mut self) {
        match self.resolve_item() {
            // Fire even when the item is unchanged. See the module docs.
            Some(item) => self.update_item(item, false),
            None => {
                if !self.empty || self.item.is_some() {
                    self.update_item(None, true);
                }
            }
        }
    }

    fn refresh_selection(&mut self) {
        self.selected = match (&self.table_view, self.index) {
            (Some(view), Some(index)) if !self.empty => view.is_row_selected(index),
            _ => false,
        };
    }

    fn refresh_focus(&mut self) {
        self.focused = match (&self.table_view, self.index) {
            (Some(view), Some(index)) if !self.empty => view.is_row_focused(index),
            _ => false,
        };
    }

    // -- item --------------------------------------------------------------

    /// Store a new item and empty flag, then run the update hooks.
    ///
    /// Called by the rebinding operations. Calling it directly overrides the
    /// derived item until the next rebind.
    pub fn update_item(&mut self, item: Option<T>, empty: bool) {
        self.item = item;
        self.empty = empty;
        self.update_count += 1;
        trace!(
            index = ?self.index,
            empty,
            has_item = self.item.is_some(),
            update_count = self.update_count,
            "table cell item updated"
        );
        for hook in &mut self.update_hooks {
            hook(self.item.as_ref(), self.empty);
        }
        self.sync_skin();
    }

    #[must_use]
    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// How many times [`update_item`](Self::update_item) has run.
    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    // -- attributes --------------------------------------------------------

    /// Effective id: the cell's own if set, else the column's current id.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.id.get()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id.set(Some(id.into()));
        self.sync_skin();
    }

    #[must_use]
    pub fn id_property(&self) -> &InheritedProperty<Option<String>> {
        &self.id
    }

    /// Effective style: the cell's own if set, else the column's current
    /// style, else `""`.
    #[must_use]
    pub fn style(&self) -> String {
        self.style.get()
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style.set(style.into());
        self.sync_skin();
    }

    #[must_use]
    pub fn style_property(&self) -> &InheritedProperty<String> {
        &self.style
    }

    #[must_use]
    pub fn style_classes(&self) -> &[String] {
        &self.style_classes
    }

    pub fn add_style_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.style_classes.contains(&class) {
            self.style_classes.push(class);
        }
        self.sync_skin();
    }

    #[must_use]
    pub fn has_style_class(&self, class: &str) -> bool {
        self.style_classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn pseudo_classes(&self) -> CellPseudoClass {
        let mut flags = if self.empty {
            CellPseudoClass::EMPTY
        } else {
            CellPseudoClass::FILLED
        };
        flags.set(CellPseudoClass::SELECTED, self.selected);
        flags.set(CellPseudoClass::FOCUSED, self.focused);
        flags
    }

    // -- skin --------------------------------------------------------------

    /// Install a skin. It is synced now and after every update.
    pub fn set_skin(&mut self, mut skin: TableCellSkin<T>) {
        skin.sync(self);
        self.skin = Some(skin);
    }

    #[must_use]
    pub fn skin(&self) -> Option<&TableCellSkin<T>> {
        self.skin.as_ref()
    }

    pub fn take_skin(&mut self) -> Option<TableCellSkin<T>> {
        self.skin.take()
    }

    fn sync_skin(&mut self) {
        if let Some(mut skin) = self.skin.take() {
            skin.sync(self);
            self.skin = Some(skin);
        }
    }
}
