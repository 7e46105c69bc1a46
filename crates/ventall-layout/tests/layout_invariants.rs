#![forbid(unsafe_code)]

//! Property tests for the layout invariants.
//!
//! | ID     | Invariant                                                   |
//! |--------|-------------------------------------------------------------|
//! | GEN-1  | Generation `g` always holds exactly `2^g` slots              |
//! | GEN-2  | Slot `2k`/`2k+1` hold the father/mother of slot `k`          |
//! | PART-1 | Wedges partition `[-π/2, +π/2]` with no gaps or overlaps     |
//! | PAD-1  | Pad angle is monotonically non-decreasing in the generation  |
//! | TRUNC-1| Truncated names never exceed the generation budget           |
//! | TRUNC-2| `truncated` is set exactly when the source exceeds the budget|
//! | HIT-1  | Wedge centers hit-test back to their own coordinates         |

use std::f32::consts::FRAC_PI_2;

use proptest::prelude::*;
use ventall_core::{
    ParentLink, ParentLinkIndex, Person, PersonId, PersonIndex, Sex, Viewport,
};
use ventall_layout::{
    FanConfig, LabelConfig, LabelPlanner, RadialGeometryPlanner, SlotTreeBuilder, wedge_sector,
};

/// Full ancestry in ahnentafel numbering: root = 1, father of n = 2n,
/// mother of n = 2n + 1, so generation `g` slot `k` must hold `2^g + k`.
fn full_ancestry(depth: u8) -> (PersonIndex, ParentLinkIndex) {
    let last = 1u64 << (depth + 1);
    let persons = (1..last).map(|n| Person::new(n, format!("P{n}"), Sex::Unknown));
    let links = (1..last / 2).map(|n| {
        (
            PersonId::from(n),
            ParentLink::both(PersonId::from(2 * n), PersonId::from(2 * n + 1)),
        )
    });
    (
        PersonIndex::from_persons(persons),
        ParentLinkIndex::from_links(links),
    )
}

proptest! {
    // GEN-1 + GEN-2
    #[test]
    fn ahnentafel_numbering_lands_on_canonical_slots(depth in 0u8..=7) {
        let (persons, links) = full_ancestry(depth);
        let tree = SlotTreeBuilder::new(&persons, &links)
            .build(&PersonId::from(1u64), depth)
            .unwrap();
        prop_assert_eq!(tree.depth(), depth);
        for g in 0..=depth {
            let row = tree.generation(g).unwrap();
            prop_assert_eq!(row.len(), 1usize << g);
            for (k, slot) in row.iter().enumerate() {
                let expected = ((1u64 << g) + k as u64).to_string();
                prop_assert_eq!(slot.person.as_ref().unwrap().as_str(),
                    expected.as_str());
            }
        }
    }

    // GEN-1 independent of occupancy: random sparse ancestry
    #[test]
    fn sparse_ancestry_keeps_full_slot_counts(
        depth in 1u8..=6,
        keep_mask in any::<u64>(),
    ) {
        let (_, links) = full_ancestry(depth);
        // Keep only a pseudo-random subset of non-root persons.
        let last = 1u64 << (depth + 1);
        let kept = (1..last).filter(|n| *n == 1 || (keep_mask >> (n % 64)) & 1 == 1)
            .map(|n| Person::new(n, format!("P{n}"), Sex::Unknown));
        let persons_sparse = PersonIndex::from_persons(kept);
        let tree = SlotTreeBuilder::new(&persons_sparse, &links)
            .build(&PersonId::from(1u64), depth)
            .unwrap();
        for g in 0..=depth {
            prop_assert_eq!(tree.generation(g).unwrap().len(), 1usize << g);
        }
        // Occupied implies the parent-side slot below is occupied too: an
        // ancestor is only reachable through an unbroken chain.
        for g in 1..=depth {
            for slot in tree.generation(g).unwrap() {
                if slot.occupied() {
                    let below = tree.slot(g - 1, slot.slot_index / 2).unwrap();
                    prop_assert!(below.occupied());
                }
            }
        }
    }

    // PART-1
    #[test]
    fn wedges_partition_exactly(g in 0u8..=9) {
        let count = 1u32 << g;
        let mut cursor = -FRAC_PI_2;
        for k in 0..count {
            let s = wedge_sector(g, k);
            prop_assert!((s.start_angle - cursor).abs() < 1e-5);
            prop_assert!(s.span() > 0.0);
            cursor = s.end_angle;
        }
        prop_assert!((cursor - FRAC_PI_2).abs() < 1e-4);
    }

    // PAD-1
    #[test]
    fn pad_is_monotonic_for_any_nonnegative_config(
        base in 0.0f32..0.05,
        step in 0.0f32..0.01,
        cap in 0.0f32..0.05,
    ) {
        let config = FanConfig {
            pad_base: base,
            pad_per_generation: step,
            pad_growth_cap: cap,
            ..FanConfig::default()
        };
        let mut prev = 0.0f32;
        for g in 1..=10u8 {
            let pad = config.pad_angle(g);
            prop_assert!(pad >= prev);
            prev = pad;
        }
    }

    // TRUNC-1 + TRUNC-2
    #[test]
    fn truncation_budget_holds_for_arbitrary_names(
        name in "\\PC{0,60}",
        generation in 0u8..=8,
    ) {
        use unicode_width::UnicodeWidthStr;
        let planner = LabelPlanner::new();
        let budget = planner.config().budget(generation);
        let person = Person::new("1", name.clone(), Sex::Unknown);
        let label = planner.plan(&person, wedge_sector(2, 1), generation);
        prop_assert!(label.name.width() <= budget.max(1));
        prop_assert_eq!(label.truncated, name.width() > budget);
        if !label.truncated {
            prop_assert_eq!(&label.name, &name);
        }
    }

    // HIT-1
    #[test]
    fn hit_test_round_trips_for_any_viewport(
        width in 400.0f32..3000.0,
        height in 300.0f32..2000.0,
        g in 1u8..=6,
    ) {
        let plan = RadialGeometryPlanner::new().plan(Viewport::new(width, height), 6);
        let band = plan.ring(g).unwrap();
        if band.width() <= 0.5 {
            // Degenerate ring on extreme aspect ratios; nothing to hit.
            return Ok(());
        }
        let r = band.mid_radius();
        for k in 0..(1u32 << g) {
            let mid = wedge_sector(g, k).mid_angle();
            let x = plan.origin_x + r * mid.sin();
            let y = plan.origin_y - r * mid.cos();
            if plan.root_card.contains(x, y) {
                continue; // inner rings can sit behind the card on tiny viewports
            }
            prop_assert_eq!(plan.hit_test(x, y), Some((g, k)));
        }
    }
}

#[test]
fn label_config_budget_switchover() {
    let config = LabelConfig::default();
    assert_eq!(config.budget(3), 22);
    assert_eq!(config.budget(4), 18);
    assert_eq!(config.budget(8), 18);
}
