//! Property-based tests for synthesis and bulk planning guarantees

use curricula::catalog::Level;
use curricula::generation::{bulk_theme_index, CatalogWorkList};
use curricula::lesson::{Section, PAGES_PER_LESSON};
use curricula::synthesis::synthesize;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

proptest! {
    /// Same coordinates always produce the same document
    #[test]
    fn synthesis_is_deterministic(level in any_level(), week in 1u32..40, day in 1u32..8) {
        let first = synthesize(level, week, day, None);
        let second = synthesize(level, week, day, None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_lesson_keeps_its_shape(
        level in any_level(),
        week in 1u32..40,
        day in 1u32..8,
        theme in proptest::option::of("[A-Za-z ]{1,24}"),
    ) {
        let doc = synthesize(level, week, day, theme.as_deref());
        prop_assert_eq!(doc.pages.len(), PAGES_PER_LESSON);
        let counts: Vec<usize> = Section::ORDER
            .iter()
            .map(|section| doc.pages_in(*section).count())
            .collect();
        prop_assert_eq!(counts, vec![3, 5, 4, 4, 3, 1]);
        let minutes = doc.total_minutes();
        prop_assert!((28.0..=32.0).contains(&minutes));
        prop_assert!(!doc.theme.is_empty());
    }

    /// Themes repeat with a period equal to the theme count
    #[test]
    fn themes_wrap_around(level in any_level(), week in 1u32..60) {
        let themes = level.profile().themes.len() as u32;
        prop_assert_eq!(level.theme_for_week(week), level.theme_for_week(week + themes));
    }

    #[test]
    fn bulk_theme_index_stays_in_range(week_count in 1u32..30, theme_count in 1usize..30, week in 1u32..30) {
        prop_assume!(week <= week_count);
        let index = bulk_theme_index(week, week_count, theme_count);
        prop_assert!(index < theme_count);
        if week > 1 {
            prop_assert!(bulk_theme_index(week - 1, week_count, theme_count) <= index);
        }
    }
}

#[test]
fn work_list_is_strictly_ordered() {
    let ordinals: Vec<u32> = CatalogWorkList::new().map(|item| item.ordinal).collect();
    assert_eq!(ordinals.len() as u32, CatalogWorkList::total());
    assert!(ordinals.windows(2).all(|pair| pair[1] == pair[0] + 1));
}
