#![forbid(unsafe_code)]

//! Property-based checks for inherited properties.
//!
//! A property driven by an arbitrary interleaving of owner writes, direct
//! writes and rebinds must always report what a plain two-slot model says:
//! the direct value if one was ever written, else the current owner value,
//! else the default.

use fcell_reactive::{InheritedProperty, Observable};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    OwnerSet(usize, u8),
    DirectSet(u8),
    Bind(usize),
    Unbind,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..2, any::<u8>()).prop_map(|(o, v)| Op::OwnerSet(o, v)),
        1 => any::<u8>().prop_map(Op::DirectSet),
        2 => (0usize..2).prop_map(Op::Bind),
        1 => Just(Op::Unbind),
    ]
}

proptest! {
    #[test]
    fn effective_value_matches_two_slot_model(ops in prop::collection::vec(op(), 0..64)) {
        let owners = [Observable::new(0u8), Observable::new(0u8)];
        let mut prop = InheritedProperty::new("value", 0u8);

        let mut explicit: Option<u8> = None;
        let mut bound: Option<usize> = None;

        for op in ops {
            match op {
                Op::OwnerSet(o, v) => owners[o].set(v),
                Op::DirectSet(v) => {
                    prop.set(v);
                    explicit = Some(v);
                }
                Op::Bind(o) => {
                    prop.bind_owner(Some(&owners[o]));
                    bound = Some(o);
                }
                Op::Unbind => {
                    prop.bind_owner(None);
                    bound = None;
                }
            }

            let expected = explicit
                .or_else(|| bound.map(|o| owners[o].get()))
                .unwrap_or(0);
            prop_assert_eq!(prop.get(), expected);
            prop_assert_eq!(prop.is_explicit(), explicit.is_some());
        }
    }

    #[test]
    fn direct_value_is_permanent(first in any::<u8>(), later in prop::collection::vec(any::<u8>(), 1..16)) {
        let owner = Observable::new(0u8);
        let mut prop = InheritedProperty::new("value", 0u8);
        prop.bind_owner(Some(&owner));
        prop.set(first);

        for v in later {
            owner.set(v);
            prop_assert_eq!(prop.get(), first);
        }
    }
}
