use super::*;
use proptest::prelude::*;

fn ids(range: std::ops::Range<i64>) -> Vec<PersonId> {
    range.map(PersonId).collect()
}

fn chain(depth: u32) -> GenerationMap {
    (0..=depth)
        .map(|level| (level, vec![PersonId(i64::from(level) + 1)]))
        .collect()
}

#[test]
fn single_parent_chain_is_a_vertical_line() {
    let plan = LayoutEngine::default().layout(&chain(4));
    assert_eq!(plan.len(), 5);
    assert_eq!(plan.max_level(), 4);

    let mut last_y = f64::NEG_INFINITY;
    for n in 1..=5 {
        let p = plan.position(PersonId(n)).unwrap();
        assert_eq!(p.x, 0.0);
        assert!(p.y > last_y);
        last_y = p.y;
    }
    assert_eq!(plan.position(PersonId(1)).unwrap(), Point::new(0.0, 0.0));
}

#[test]
fn spacing_uses_width_budget_until_the_minimum_kicks_in() {
    let engine = LayoutEngine::default();
    // 8 / 2 = 4 > 3
    assert_eq!(engine.row_offsets(2), vec![-2.0, 2.0]);
    // 8 / 4 = 2 < 3
    assert_eq!(engine.row_offsets(4), vec![-4.5, -1.5, 1.5, 4.5]);
    assert_eq!(engine.row_offsets(1), vec![0.0]);
    assert!(engine.row_offsets(0).is_empty());
}

#[test]
fn rows_keep_input_order() {
    let generations: GenerationMap = [(0, vec![PersonId(1)]), (1, vec![PersonId(9), PersonId(2)])]
        .into_iter()
        .collect();
    let plan = LayoutEngine::default().layout(&generations);
    let a = plan.position(PersonId(9)).unwrap();
    let b = plan.position(PersonId(2)).unwrap();
    assert!(a.x < b.x);
    assert_eq!(a.y, b.y);
    assert_eq!(a.y, 2.0);
}

#[test]
fn custom_settings_scale_rows() {
    let engine = LayoutEngine::new(LayoutSettings {
        generation_spacing: 5.0,
        min_spacing: 1.0,
        width_budget: 12.0,
    });
    let generations: GenerationMap = [(0, vec![PersonId(1)]), (1, ids(2..5))]
        .into_iter()
        .collect();
    let plan = engine.layout(&generations);
    assert_eq!(plan.position(PersonId(2)).unwrap(), Point::new(-4.0, 5.0));
    assert_eq!(plan.position(PersonId(4)).unwrap(), Point::new(4.0, 5.0));
    assert_eq!(plan.bounds(), Rect::new(-4.0, 0.0, 4.0, 5.0));
}

#[test]
fn empty_map_gives_empty_plan() {
    let plan = LayoutEngine::default().layout(&GenerationMap::default());
    assert!(plan.is_empty());
    assert_eq!(plan.max_level(), 0);
    assert_eq!(plan.bounds(), Rect::ZERO);
}

#[test]
fn settings_deserialize_with_defaults() {
    let s: LayoutSettings = serde_json::from_str(r#"{ "min_spacing": 1.5 }"#).unwrap();
    assert_eq!(s.min_spacing, 1.5);
    assert_eq!(s.generation_spacing, 2.0);
    assert_eq!(s.width_budget, 8.0);
}

proptest! {
    #[test]
    fn siblings_are_symmetric_and_increasing(n in 2usize..40) {
        let generations: GenerationMap = [(0, vec![PersonId(0)]), (1, ids(1..(n as i64 + 1)))]
            .into_iter()
            .collect();
        let plan = LayoutEngine::default().layout(&generations);
        let xs: Vec<f64> = (1..=n as i64)
            .map(|i| plan.position(PersonId(i)).unwrap().x)
            .collect();

        for w in xs.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        for i in 0..n {
            prop_assert_eq!(xs[i], -xs[n - 1 - i]);
        }
    }

    #[test]
    fn layout_is_deterministic(depth in 0u32..12) {
        let engine = LayoutEngine::default();
        prop_assert_eq!(engine.layout(&chain(depth)), engine.layout(&chain(depth)));
    }
}
