//! Integration tests for week planning and curriculum assembly

use curricula::catalog::{catalog_total_lessons, Level};
use curricula::curriculum::{plan_week, AssessmentKind, CurriculumAssembler};
use curricula::lesson::PAGES_PER_LESSON;

#[test]
fn test_week_plan_shape() {
    let plan = plan_week(Level::B1, 5);
    assert_eq!(plan.week, 5);
    assert_eq!(plan.lessons.len(), 3);
    assert_eq!(plan.theme, Level::B1.theme_for_week(5));
    assert!(plan.lessons.iter().all(|lesson| lesson.theme == plan.theme));
    let days: Vec<u32> = plan.lessons.iter().map(|lesson| lesson.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert!(!plan.objectives.is_empty());
    assert!(!plan.conversation_milestones.is_empty());
    assert_eq!(plan.assessment.conversation_test.duration_minutes, 10);
    assert_eq!(plan.assessment.grammar_check.accuracy_target_percent, 80);
    assert_eq!(plan.sentence_targets, Level::B1.sentence_targets());
}

#[test]
fn test_summative_every_fourth_week() {
    let kinds: Vec<AssessmentKind> = (1..=8)
        .map(|week| plan_week(Level::A1, week).assessment.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            AssessmentKind::Formative,
            AssessmentKind::Formative,
            AssessmentKind::Formative,
            AssessmentKind::Summative,
            AssessmentKind::Formative,
            AssessmentKind::Formative,
            AssessmentKind::Formative,
            AssessmentKind::Summative,
        ]
    );
}

#[test]
fn test_curricula_cover_the_catalog() {
    let assembler = CurriculumAssembler::new();
    let mut lessons = 0;
    for level in Level::ALL {
        let curriculum = assembler.assemble(level);
        let profile = level.profile();
        assert_eq!(curriculum.weeks.len() as u32, profile.week_count);
        assert_eq!(curriculum.lessons().count() as u32, profile.total_lessons());
        assert_eq!(
            curriculum.total_pages,
            profile.total_lessons() * PAGES_PER_LESSON as u32
        );
        let last = curriculum.progression_map.milestones.last().unwrap();
        assert_eq!(last.week, profile.week_count);
        lessons += curriculum.lessons().count() as u32;
    }
    assert_eq!(lessons, catalog_total_lessons());
    assert_eq!(lessons, 294);
}

#[test]
fn test_curriculum_id_names_level() {
    let curriculum = CurriculumAssembler::new().assemble(Level::C2);
    assert!(curriculum.id.starts_with("curriculum-c2-"));
    assert_eq!(curriculum.level, Level::C2);
}
