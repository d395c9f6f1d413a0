#![forbid(unsafe_code)]

//! The row source a table cell binds to.
//!
//! [`TableView`] is a cheap handle around shared state: the backing rows and
//! the optional selection and focus models. Any of the three may be absent.
//! That is a normal state while a table is being reconfigured, and every
//! consumer treats it as "no rows", "nothing selected" or "nothing focused".

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

/// How many rows a [`TableSelectionModel`] may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// At most one selected row.
    #[default]
    Single,
    /// Any number of selected rows.
    Multiple,
}

/// Row selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSelectionModel {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
    lead: Option<usize>,
}

impl TableSelectionModel {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
            lead: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes. Going to [`SelectionMode::Single`] keeps only the lead row.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            self.selected.clear();
            self.selected.extend(self.lead);
        }
    }

    /// Select `row`. In single mode this replaces the previous selection.
    pub fn select(&mut self, row: usize) {
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(row);
        self.lead = Some(row);
    }

    pub fn clear_and_select(&mut self, row: usize) {
        self.selected.clear();
        self.select(row);
    }

    pub fn deselect(&mut self, row: usize) {
        self.selected.remove(&row);
        if self.lead == Some(row) {
            self.lead = self.selected.iter().next_back().copied();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.lead = None;
    }

    #[must_use]
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// The most recently selected row that is still selected.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.lead
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Drop rows at or beyond `len`.
    pub fn retain_within(&mut self, len: usize) {
        self.selected.retain(|&row| row < len);
        if self.lead.is_some_and(|row| row >= len) {
            self.lead = self.selected.iter().next_back().copied();
        }
    }
}

/// Keyboard focus state: at most one focused row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableFocusModel {
    focused: Option<usize>,
}

impl TableFocusModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self, row: usize) {
        self.focused = Some(row);
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    #[must_use]
    pub fn is_focused(&self, row: usize) -> bool {
        self.focused == Some(row)
    }
}

struct ViewState<S> {
    items: RefCell<Option<Vec<S>>>,
    selection: RefCell<Option<TableSelectionModel>>,
    focus: RefCell<Option<TableFocusModel>>,
    generation: Cell<u64>,
}

/// Shared handle to a table's rows and models.
///
/// Clones refer to the same table. Identity is by shared state, see
/// [`TableView::ptr_eq`].
///
/// # Re-entrancy
///
/// Closures passed to [`TableView::with_row`] and [`TableView::with_items`]
/// run while the rows are borrowed. They may read from the view but must not
/// replace or mutate its rows.
pub struct TableView<S> {
    state: Rc<ViewState<S>>,
}

impl<S> Clone for TableView<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S> fmt::Debug for TableView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("items", &self.items_len())
            .field("has_selection_model", &self.state.selection.borrow().is_some())
            .field("has_focus_model", &self.state.focus.borrow().is_some())
            .field("generation", &self.state.generation.get())
            .finish()
    }
}

impl<S> Default for TableView<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> TableView<S> {
    /// A view over `items` with a single-selection model and a focus model.
    #[must_use]
    pub fn new(items: Vec<S>) -> Self {
        Self {
            state: Rc::new(ViewState {
                items: RefCell::new(Some(items)),
                selection: RefCell::new(Some(TableSelectionModel::default())),
                focus: RefCell::new(Some(TableFocusModel::default())),
                generation: Cell::new(0),
            }),
        }
    }

    /// A view with an empty (but present) row list.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Counter bumped on every change to rows or models.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.generation.get()
    }

    fn bump(&self, what: &'static str) {
        let generation = self.state.generation.get().wrapping_add(1);
        self.state.generation.set(generation);
        debug!(generation, what, "table view changed");
    }

    /// Replace the rows. `None` leaves the view with no row list at all.
    pub fn set_items(&self, items: Option<Vec<S>>) {
        let len = items.as_ref().map_or(0, Vec::len);
        *self.state.items.borrow_mut() = items;
        self.drop_rows_past(len);
        self.bump("items");
    }

    fn drop_rows_past(&self, len: usize) {
        if let Some(selection) = self.state.selection.borrow_mut().as_mut() {
            selection.retain_within(len);
        }
        if let Some(focus) = self.state.focus.borrow_mut().as_mut()
            && focus.focused_index().is_some_and(|row| row >= len)
        {
            focus.clear();
        }
    }

    /// Edit the rows in place. Returns `false` when there is no row list.
    pub fn update_items(&self, f: impl FnOnce(&mut Vec<S>)) -> bool {
        let len = {
            let mut items = self.state.items.borrow_mut();
            let Some(items) = items.as_mut() else {
                return false;
            };
            f(items);
            items.len()
        };
        self.drop_rows_past(len);
        self.bump("items");
        true
    }

    #[must_use]
    pub fn has_items(&self) -> bool {
        self.state.items.borrow().is_some()
    }

    /// Row count, or `None` when the row list is absent.
    #[must_use]
    pub fn items_len(&self) -> Option<usize> {
        self.state.items.borrow().as_ref().map(Vec::len)
    }

    /// Row count, treating an absent row list as zero rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.items_len().unwrap_or(0)
    }

    /// Run `f` against row `index`, if that row exists.
    pub fn with_row<R>(&self, index: usize, f: impl FnOnce(&S) -> R) -> Option<R> {
        let items = self.state.items.borrow();
        items.as_ref().and_then(|rows| rows.get(index)).map(f)
    }

    pub fn with_items<R>(&self, f: impl FnOnce(Option<&[S]>) -> R) -> R {
        let items = self.state.items.borrow();
        f(items.as_deref())
    }

    pub fn set_selection_model(&self, model: Option<TableSelectionModel>) {
        *self.state.selection.borrow_mut() = model;
        self.bump("selection_model");
    }

    #[must_use]
    pub fn selection_model(&self) -> Option<TableSelectionModel> {
        self.state.selection.borrow().clone()
    }

    /// Edit the selection model. Returns `None` when there is none.
    pub fn with_selection_model<R>(
        &self,
        f: impl FnOnce(&mut TableSelectionModel) -> R,
    ) -> Option<R> {
        let result = self.state.selection.borrow_mut().as_mut().map(f);
        if result.is_some() {
            self.bump("selection");
        }
        result
    }

    /// Select `row`. Returns `false` without a selection model or when the
    /// row does not exist.
    pub fn select(&self, row: usize) -> bool {
        if row >= self.row_count() {
            return false;
        }
        self.with_selection_model(|model| model.select(row)).is_some()
    }

    #[must_use]
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.state
            .selection
            .borrow()
            .as_ref()
            .is_some_and(|model| model.is_selected(row))
    }

    pub fn set_focus_model(&self, model: Option<TableFocusModel>) {
        *self.state.focus.borrow_mut() = model;
        self.bump("focus_model");
    }

    #[must_use]
    pub fn focus_model(&self) -> Option<TableFocusModel> {
        *self.state.focus.borrow()
    }

    /// Focus `row`. Returns `false` without a focus model or when the row
    /// does not exist.
    pub fn focus(&self, row: usize) -> bool {
        if row >= self.row_count() {
            return false;
        }
        let focused = match self.state.focus.borrow_mut().as_mut() {
            Some(model) => {
                model.focus(row);
                true
            }
            None => false,
        };
        if focused {
            self.bump("focus");
        }
        focused
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.state
            .focus
            .borrow()
            .as_ref()
            .and_then(TableFocusModel::focused_index)
    }

    #[must_use]
    pub fn is_row_focused(&self, row: usize) -> bool {
        self.focused_index() == Some(row)
    }
}
