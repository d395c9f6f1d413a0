#![forbid(unsafe_code)]

//! Virtualized cell pool.
//!
//! [`TableFlow`] owns the cells of a table's visible window. Cells are
//! materialized once per `(slot, column)` and then only rebound: scrolling
//! moves every slot to a new row index, it never creates new cells. Slots
//! that fall out of a shrinking viewport are unbound and parked for reuse.
//!
//! ```text
//!   rows:   0  1  2 [3  4  5] 6  7       offset = 3, viewport_rows = 3
//!   slots:          s0 s1 s2             slot k is bound to row offset + k
//! ```

use std::ops::Range;

use tracing::{debug, debug_span};

use crate::cell::TableCell;
use crate::column::TableColumn;
use crate::view::TableView;

type SlotRow<S, T> = Vec<TableCell<S, T>>;

pub struct TableFlow<S, T> {
    view: TableView<S>,
    columns: Vec<TableColumn<S, T>>,
    slots: Vec<SlotRow<S, T>>,
    parked: Vec<SlotRow<S, T>>,
    offset: usize,
    laid_out_generation: Option<u64>,
    materialized: usize,
}

impl<S, T> std::fmt::Debug for TableFlow<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableFlow")
            .field("view", &self.view)
            .field("columns", &self.columns.len())
            .field("viewport_rows", &self.slots.len())
            .field("parked", &self.parked.len())
            .field("offset", &self.offset)
            .field("materialized", &self.materialized)
            .finish()
    }
}

impl<S: 'static, T: 'static> TableFlow<S, T> {
    /// Materialize `viewport_rows` slots for `columns` and lay them out at
    /// offset 0.
    #[must_use]
    pub fn new(
        view: TableView<S>,
        columns: impl IntoIterator<Item = TableColumn<S, T>>,
        viewport_rows: usize,
    ) -> Self {
        let mut flow = Self {
            view,
            columns: columns.into_iter().collect(),
            slots: Vec::with_capacity(viewport_rows),
            parked: Vec::new(),
            offset: 0,
            laid_out_generation: None,
            materialized: 0,
        };
        for _ in 0..viewport_rows {
            let row = flow.materialize_row();
            flow.slots.push(row);
        }
        flow.layout();
        flow
    }

    fn materialize_cell(&mut self, column: &TableColumn<S, T>) -> TableCell<S, T> {
        let mut cell = column.create_cell();
        cell.update_table_column(Some(column.clone()));
        cell.update_table_view(Some(self.view.clone()));
        self.materialized += 1;
        cell
    }

    fn materialize_row(&mut self) -> SlotRow<S, T> {
        let columns = self.columns.clone();
        columns
            .iter()
            .map(|column| self.materialize_cell(column))
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> &TableView<S> {
        &self.view
    }

    #[must_use]
    pub fn columns(&self) -> &[TableColumn<S, T>] {
        &self.columns
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn viewport_rows(&self) -> usize {
        self.slots.len()
    }

    /// Row indices currently covered by the viewport, including rows past
    /// the end of the data (whose cells are empty).
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        self.offset..self.offset + self.slots.len()
    }

    /// Total cells ever created by this flow.
    #[must_use]
    pub fn materialized_cells(&self) -> usize {
        self.materialized
    }

    /// Rebind every slot to its row. Returns the number of cells rebound.
    ///
    /// View and column references are only reassigned when they differ; the
    /// index is reassigned on every cell, every time.
    pub fn layout(&mut self) -> usize {
        let span = debug_span!(
            "fcell.flow.layout",
            offset = self.offset,
            viewport_rows = self.slots.len(),
            columns = self.columns.len(),
            rebound = tracing::field::Empty,
            references_changed = tracing::field::Empty
        );
        let _guard = span.enter();

        let mut rebound = 0usize;
        let mut references_changed = 0usize;
        for (slot, row) in self.slots.iter_mut().enumerate() {
            let index = self.offset + slot;
            for (cell, column) in row.iter_mut().zip(&self.columns) {
                if !cell.table_view().is_some_and(|v| v.ptr_eq(&self.view)) {
                    cell.update_table_view(Some(self.view.clone()));
                    references_changed += 1;
                }
                if !cell.table_column().is_some_and(|c| c.ptr_eq(column)) {
                    cell.update_table_column(Some(column.clone()));
                    references_changed += 1;
                }
                cell.update_index(Some(index));
                rebound += 1;
            }
        }

        self.laid_out_generation = Some(self.view.generation());
        span.record("rebound", rebound);
        span.record("references_changed", references_changed);
        debug!(rebound, references_changed, "table flow laid out");
        rebound
    }

    /// Re-lay out only if the view changed since the last layout.
    pub fn refresh_if_stale(&mut self) -> bool {
        if self.laid_out_generation == Some(self.view.generation()) {
            return false;
        }
        self.layout();
        true
    }

    /// Largest offset that still fills the viewport with rows.
    #[must_use]
    pub fn max_offset(&self) -> usize {
        self.view.row_count().saturating_sub(self.slots.len())
    }

    /// Scroll so that row `offset` sits in the first slot, clamped to
    /// [`max_offset`](Self::max_offset).
    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
        self.layout();
    }

    /// Scroll by `delta` rows, clamped at both ends.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    /// Scroll the minimum distance that brings `row` into view.
    pub fn scroll_into_view(&mut self, row: usize) {
        if row < self.offset {
            self.scroll_to(row);
        } else if row >= self.offset.saturating_add(self.slots.len()) {
            self.scroll_to(row.saturating_add(1) - self.slots.len().max(1));
        }
    }

    /// Grow or shrink the viewport. Growing reuses parked rows before
    /// materializing new ones; shrinking unbinds and parks the tail slots.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        while self.slots.len() > rows {
            if let Some(mut row) = self.slots.pop() {
                for cell in &mut row {
                    cell.update_index(None);
                }
                self.parked.push(row);
            }
        }
        while self.slots.len() < rows {
            let row = match self.parked.pop() {
                Some(row) => row,
                None => self.materialize_row(),
            };
            self.slots.push(row);
        }
        self.offset = self.offset.min(self.max_offset());
        self.layout();
    }

    /// Append a column, materializing its cell in every slot, parked ones
    /// included.
    pub fn add_column(&mut self, column: TableColumn<S, T>) {
        let mut slots = std::mem::take(&mut self.slots);
        let mut parked = std::mem::take(&mut self.parked);
        for row in slots.iter_mut().chain(parked.iter_mut()) {
            let cell = self.materialize_cell(&column);
            row.push(cell);
        }
        self.slots = slots;
        self.parked = parked;
        self.columns.push(column);
        self.layout();
    }

    /// Point the flow at another view and rebind every slot to it.
    pub fn set_table_view(&mut self, view: TableView<S>) {
        self.view = view;
        self.offset = self.offset.min(self.max_offset());
        self.layout();
    }

    /// The cell showing `(row, column)`, if that row is in the viewport.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell<S, T>> {
        let slot = row.checked_sub(self.offset)?;
        self.slots.get(slot)?.get(column)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell<S, T>> {
        let slot = row.checked_sub(self.offset)?;
        self.slots.get_mut(slot)?.get_mut(column)
    }

    /// Every active cell in slot order, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell<S, T>> {
        self.slots.iter().flatten()
    }
}
