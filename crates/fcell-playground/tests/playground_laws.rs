#![forbid(unsafe_code)]

//! Property tests for stylesheet swapping and the font ladder.

use fcell_playground::{FontSizeLadder, Playground, Scene, SheetSlot, Window};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Apply(SheetSlot, u8),
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (prop_oneof![Just(SheetSlot::Custom), Just(SheetSlot::Quick)], 0u8..4)
            .prop_map(|(slot, n)| Op::Apply(slot, n)),
        1 => Just(Op::Reset),
    ]
}

fn base_sheets() -> Vec<String> {
    vec!["app.css".to_string(), "widgets.css".to_string()]
}

proptest! {
    #[test]
    fn each_slot_holds_at_most_one_sheet(ops in prop::collection::vec(op(), 0..32)) {
        let mut windows = vec![
            Window::new("main", Some(Scene::with_stylesheets(base_sheets()))),
            Window::new("splash", None),
            Window::new("aux", Some(Scene::with_stylesheets(base_sheets()))),
        ];
        let mut playground = Playground::default();

        for op in ops {
            match op {
                Op::Apply(slot, n) => {
                    let css = format!(".{slot}-{n} {{}}");
                    playground.apply(slot, &css, &mut windows);
                }
                Op::Reset => playground.reset(&mut windows),
            }

            let live: Vec<&str> = SheetSlot::ALL
                .iter()
                .filter_map(|slot| playground.applied(*slot))
                .collect();
            prop_assert!(windows[1].scene.is_none());
            for scene in windows.iter().filter_map(|w| w.scene.as_ref()) {
                let sheets = scene.stylesheets();
                prop_assert_eq!(&sheets[..2], &base_sheets()[..]);
                prop_assert_eq!(sheets.len(), 2 + live.len());
                for uri in &live {
                    prop_assert_eq!(sheets.iter().filter(|s| s == uri).count(), 1);
                }
            }
        }

        playground.reset(&mut windows);
        for scene in windows.iter().filter_map(|w| w.scene.as_ref()) {
            prop_assert_eq!(scene.stylesheets(), &base_sheets()[..]);
        }
    }

    #[test]
    fn ladder_steps_stay_on_ladder(
        sizes in prop::collection::btree_set(1u32..64, 1..12),
        start in 0u32..80,
        steps in -30i32..30,
    ) {
        let sizes: Vec<u32> = sizes.into_iter().collect();
        let default_size = sizes[sizes.len() / 2];
        let ladder = FontSizeLadder::new(sizes.clone(), default_size);
        let end = ladder.step_by(start, steps);
        if steps != 0 {
            prop_assert!(ladder.contains(end));
        }
        let min = sizes[0];
        let max = sizes[sizes.len() - 1];
        prop_assert_eq!(ladder.step(min, false), min);
        prop_assert_eq!(ladder.step(max, true), max);
        if !ladder.contains(start) {
            prop_assert_eq!(ladder.step(start, true), default_size);
        }
    }
}
