#![forbid(unsafe_code)]

//! Property tests for the cell update laws.
//!
//! - Every index update that lands on an existing row runs `update_item`
//!   exactly once, regardless of whether the item changed.
//! - Updates that land outside the rows run it at most once per transition
//!   into the empty state.
//! - A cell is empty exactly when its index does not name a row.

use std::cell::Cell;
use std::rc::Rc;

use fcell_table::{TableCell, TableColumn, TableView};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Index(Option<usize>),
    DropItems,
    Items(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => prop::option::weighted(0.9, 0usize..8).prop_map(Step::Index),
        1 => Just(Step::DropItems),
        1 => (0usize..8).prop_map(Step::Items),
    ]
}

proptest! {
    #[test]
    fn update_count_follows_index_changes(
        steps in prop::collection::vec(step(), 0..48),
        constant in any::<bool>(),
    ) {
        let view: TableView<u8> = TableView::new(vec![0, 1, 2]);
        let column = TableColumn::<u8, u8>::new("c").with_value_factory(move |f| {
            if constant { Some(42) } else { Some(*f.value) }
        });
        let hits = Rc::new(Cell::new(0u64));
        let counter = Rc::clone(&hits);
        let mut cell: TableCell<u8, u8> = TableCell::new().with_update_hook(move |_, _| counter.set(counter.get() + 1));
        cell.update_table_column(Some(column));
        cell.update_table_view(Some(view.clone()));

        let mut expected = 0u64;
        let mut was_empty = true;
        for step in steps {
            match step {
                Step::DropItems => view.set_items(None),
                Step::Items(n) => view.set_items(Some((0..n as u8).collect())),
                Step::Index(index) => {
                    cell.update_index(index);
                    let valid = index.is_some_and(|i| i < view.row_count());
                    if valid || !was_empty {
                        expected += 1;
                    }
                    was_empty = !valid;
                    prop_assert_eq!(cell.is_empty(), !valid);
                    if !valid {
                        prop_assert!(cell.item().is_none());
                    }
                }
            }
            prop_assert_eq!(hits.get(), expected);
            prop_assert_eq!(cell.update_count(), expected);
        }
    }

    #[test]
    fn absent_items_never_make_a_bound_cell_empty(len in 1usize..16, index in 0usize..16) {
        let view: TableView<u8> = TableView::new(vec![0; len]);
        let column: TableColumn<u8, u8> = TableColumn::new("c").with_value_factory(|_| None);
        let mut cell: TableCell<u8, u8> = TableCell::new();
        cell.update_table_column(Some(column));
        cell.update_table_view(Some(view));
        cell.update_index(Some(index));

        prop_assert!(cell.item().is_none());
        prop_assert_eq!(cell.is_empty(), index >= len);
    }
}
