//! Curriculum assembly for a whole level.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::catalog::Level;
use crate::curriculum::week::plan_week;
use crate::curriculum::{Curriculum, ProgressionMap, ProgressionMilestone};
use crate::lesson::PAGES_PER_LESSON;
use crate::store::{CurriculumRecord, CurriculumStore};

const LESSON_HOURS: f64 = 0.5;
const HOMEWORK_HOURS: f64 = 0.5;
const WEEKLY_REVIEW_HOURS: f64 = 1.0;

/// Weeks at which progression milestones are reported, before the final week.
const MILESTONE_WEEKS: [u32; 3] = [1, 6, 12];

/// Builds full-level curricula and hands them to an optional store.
#[derive(Clone, Default)]
pub struct CurriculumAssembler {
    store: Option<Arc<dyn CurriculumStore>>,
}

impl CurriculumAssembler {
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Arc<dyn CurriculumStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Assemble every week of `level`.
    ///
    /// Persistence is attempted but never fails the call; the returned curriculum is the
    /// source of truth.
    pub fn assemble(&self, level: Level) -> Curriculum {
        let profile = level.profile();
        let weeks: Vec<_> = (1..=profile.week_count)
            .map(|week| plan_week(level, week))
            .collect();

        let lesson_count: u32 = weeks.iter().map(|week| week.lessons.len() as u32).sum();
        let generated_at = Utc::now();
        let curriculum = Curriculum {
            id: format!(
                "curriculum-{}-{}",
                level.as_str().to_ascii_lowercase(),
                generated_at.timestamp_millis()
            ),
            level,
            total_pages: lesson_count * PAGES_PER_LESSON as u32,
            estimated_study_hours: estimated_study_hours(lesson_count, weeks.len() as u32),
            progression_map: progression_map(level),
            weeks,
            generated_at,
        };

        info!(
            curriculum_id = %curriculum.id,
            level = %level,
            weeks = curriculum.weeks.len(),
            total_pages = curriculum.total_pages,
            study_hours = curriculum.estimated_study_hours,
            "curriculum assembled"
        );

        self.persist(&curriculum);
        curriculum
    }

    fn persist(&self, curriculum: &Curriculum) {
        let Some(store) = &self.store else {
            return;
        };
        let outcome = CurriculumRecord::from_curriculum(curriculum)
            .and_then(|record| store.save_curriculum(&record));
        if let Err(err) = outcome {
            warn!(
                curriculum_id = %curriculum.id,
                error = %err,
                "failed to persist curriculum"
            );
        }
    }
}

/// Lesson time, matching homework, and one review hour per week.
pub fn estimated_study_hours(lessons: u32, weeks: u32) -> f64 {
    lessons as f64 * LESSON_HOURS + lessons as f64 * HOMEWORK_HOURS + weeks as f64 * WEEKLY_REVIEW_HOURS
}

/// Milestones at weeks 1, 6, 12 and the final week (deduplicated, within the level).
pub fn progression_map(level: Level) -> ProgressionMap {
    let profile = level.profile();
    let mut weeks: Vec<u32> = MILESTONE_WEEKS
        .iter()
        .copied()
        .chain(std::iter::once(profile.week_count))
        .filter(|week| *week <= profile.week_count)
        .collect();
    weeks.sort_unstable();
    weeks.dedup();

    let goals = profile.sentence_goals;
    let milestones = weeks
        .into_iter()
        .map(|week| {
            let goal_index = ((week - 1) as usize * goals.len()) / profile.week_count as usize;
            let minutes = (profile.conversation_duration_target * week / profile.week_count).max(1);
            ProgressionMilestone {
                week,
                sentence_complexity: goals[goal_index.min(goals.len() - 1)].to_string(),
                conversation_ability: format!("Sustains a {}-minute conversation", minutes),
                vocabulary_size: profile.vocabulary_target * week / profile.week_count,
            }
        })
        .collect();

    ProgressionMap { milestones }
}
