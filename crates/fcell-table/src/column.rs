#![forbid(unsafe_code)]

//! Table columns: value extraction plus attributes cells inherit.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use fcell_reactive::Observable;

use crate::cell::TableCell;
use crate::view::TableView;

/// Everything a value factory gets to look at for one cell.
pub struct CellDataFeatures<'a, S> {
    /// The row value.
    pub value: &'a S,
    /// Row index within the view.
    pub index: usize,
    /// The view the row came from.
    pub view: &'a TableView<S>,
}

type ValueFactory<S, T> = Rc<dyn Fn(CellDataFeatures<'_, S>) -> Option<T>>;
type CellFactory<S, T> = Rc<dyn Fn() -> TableCell<S, T>>;

struct ColumnState<S, T> {
    text: RefCell<String>,
    visible: Cell<bool>,
    id: Observable<Option<String>>,
    style: Observable<String>,
    value_factory: RefCell<Option<ValueFactory<S, T>>>,
    cell_factory: RefCell<Option<CellFactory<S, T>>>,
}

/// Shared handle to a column.
///
/// `id` and `style` are observable so that cells can follow them live until
/// they are given their own values.
pub struct TableColumn<S, T> {
    state: Rc<ColumnState<S, T>>,
}

impl<S, T> Clone for TableColumn<S, T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S, T> fmt::Debug for TableColumn<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("text", &*self.state.text.borrow())
            .field("visible", &self.state.visible.get())
            .field("id", &self.state.id)
            .field("style", &self.state.style)
            .field("has_value_factory", &self.state.value_factory.borrow().is_some())
            .finish()
    }
}

impl<S: 'static, T: 'static> TableColumn<S, T> {
    /// A visible column with header `text`, no id, empty style and no value
    /// factory.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Rc::new(ColumnState {
                text: RefCell::new(text.into()),
                visible: Cell::new(true),
                id: Observable::new(None),
                style: Observable::new(String::new()),
                value_factory: RefCell::new(None),
                cell_factory: RefCell::new(None),
            }),
        }
    }

    /// Builder form of [`set_cell_value_factory`](Self::set_cell_value_factory).
    #[must_use]
    pub fn with_value_factory(
        self,
        factory: impl Fn(CellDataFeatures<'_, S>) -> Option<T> + 'static,
    ) -> Self {
        self.set_cell_value_factory(factory);
        self
    }

    /// Builder form of [`set_cell_factory`](Self::set_cell_factory).
    #[must_use]
    pub fn with_cell_factory(self, factory: impl Fn() -> TableCell<S, T> + 'static) -> Self {
        self.set_cell_factory(factory);
        self
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.state.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.state.text.borrow_mut() = text.into();
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.visible.get()
    }

    /// Cells of a hidden column are always empty.
    pub fn set_visible(&self, visible: bool) {
        self.state.visible.set(visible);
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.state.id.get()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.state.id.set(Some(id.into()));
    }

    pub fn clear_id(&self) {
        self.state.id.set(None);
    }

    /// The observable cells inherit their id from.
    #[must_use]
    pub fn id_observable(&self) -> &Observable<Option<String>> {
        &self.state.id
    }

    #[must_use]
    pub fn style(&self) -> String {
        self.state.style.get()
    }

    pub fn set_style(&self, style: impl Into<String>) {
        self.state.style.set(style.into());
    }

    /// The observable cells inherit their style from.
    #[must_use]
    pub fn style_observable(&self) -> &Observable<String> {
        &self.state.style
    }

    /// Install the function mapping a row to this column's item.
    ///
    /// Returning `None` means "the item is absent", which is not the same as
    /// the cell being empty.
    pub fn set_cell_value_factory(
        &self,
        factory: impl Fn(CellDataFeatures<'_, S>) -> Option<T> + 'static,
    ) {
        *self.state.value_factory.borrow_mut() = Some(Rc::new(factory));
    }

    pub fn clear_cell_value_factory(&self) {
        *self.state.value_factory.borrow_mut() = None;
    }

    #[must_use]
    pub fn has_cell_value_factory(&self) -> bool {
        self.state.value_factory.borrow().is_some()
    }

    /// Extract this column's item for one row. Without a value factory the
    /// item is `None`.
    pub fn cell_value(&self, features: CellDataFeatures<'_, S>) -> Option<T> {
        let factory = self.state.value_factory.borrow().clone()?;
        factory(features)
    }

    /// Install the constructor the flow uses to materialize cells for this
    /// column.
    pub fn set_cell_factory(&self, factory: impl Fn() -> TableCell<S, T> + 'static) {
        *self.state.cell_factory.borrow_mut() = Some(Rc::new(factory));
    }

    /// A fresh, unbound cell from the cell factory, or a default cell.
    #[must_use]
    pub fn create_cell(&self) -> TableCell<S, T> {
        let factory = self.state.cell_factory.borrow().clone();
        match factory {
            Some(factory) => factory(),
            None => TableCell::new(),
        }
    }
}
