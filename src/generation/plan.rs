//! Bulk work list: the lazily produced sequence of lessons a catalog run processes.

use crate::catalog::{catalog_total_lessons, Level};
use crate::error::ApiError;
use crate::provider::{ContentType, CurriculumContext, GenerationRequest};
use crate::store::generated_key;

/// Lesson duration requested for bulk-generated lesson plans, in minutes
const BULK_LESSON_MINUTES: u32 = 30;

/// One lesson of the catalog, addressed by its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItem {
    pub level: Level,
    pub week: u32,
    pub lesson_in_week: u32,
    /// 1-based position across the whole run
    pub ordinal: u32,
    pub theme: &'static str,
}

/// Theme index for bulk requests: `floor((week - 1) / (week_count / theme_count))`.
///
/// Themes are spread evenly over the level's weeks instead of cycling week by week as the
/// lesson synthesizer does. The result is clamped to the last theme.
pub fn bulk_theme_index(week: u32, week_count: u32, theme_count: usize) -> usize {
    if theme_count == 0 || week_count == 0 {
        return 0;
    }
    let weeks_per_theme = week_count as f64 / theme_count as f64;
    let index = (week.saturating_sub(1) as f64 / weeks_per_theme).floor() as usize;
    index.min(theme_count - 1)
}

/// Reject coordinates the synthesizer would otherwise silently saturate.
pub fn validate_coordinates(level: Level, week: u32, lesson_in_week: u32) -> Result<(), ApiError> {
    let profile = level.profile();
    if week == 0 || week > profile.week_count {
        return Err(ApiError::InvalidCoordinates(format!(
            "{} week {} is outside 1..={}",
            level, week, profile.week_count
        )));
    }
    if lesson_in_week == 0 || lesson_in_week > profile.lessons_per_week {
        return Err(ApiError::InvalidCoordinates(format!(
            "{} lesson {} is outside 1..={}",
            level, lesson_in_week, profile.lessons_per_week
        )));
    }
    Ok(())
}

impl BulkItem {
    pub fn new(level: Level, week: u32, lesson_in_week: u32, ordinal: u32) -> Self {
        let profile = level.profile();
        let index = bulk_theme_index(week, profile.week_count, profile.themes.len());
        Self {
            level,
            week,
            lesson_in_week,
            ordinal,
            theme: profile.themes[index],
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        validate_coordinates(self.level, self.week, self.lesson_in_week)
    }

    pub fn storage_key(&self) -> String {
        generated_key(self.level, self.week, self.lesson_in_week)
    }

    /// Generation request sent to the external endpoint for this lesson.
    pub fn request(&self) -> GenerationRequest {
        let profile = self.level.profile();
        let goals = profile.sentence_goals;
        let goal = goals[self.week.saturating_sub(1) as usize % goals.len()];
        let mut request = GenerationRequest::new(
            ContentType::LessonPlan,
            format!(
                "{} Week {}: {} - Lesson {}",
                self.level, self.week, self.theme, self.lesson_in_week
            ),
            self.level.band(),
        );
        request.duration = Some(BULK_LESSON_MINUTES);
        request.objectives = Some(vec![
            format!("Core vocabulary for {}", self.theme),
            format!("Sentence pattern: {}", goal),
            format!(
                "Conversation practice toward {} minutes",
                profile.conversation_duration_target
            ),
        ]);
        request.requirements = Some(
            "20 pages across introduction, vocabulary, grammar, practice, conversation and \
             assessment sections, about 30 minutes in total"
                .to_string(),
        );
        request.is_bulk_generation = Some(true);
        request.curriculum_context = Some(CurriculumContext {
            level: self.level,
            week: self.week,
            total_weeks: profile.week_count,
            theme: self.theme.to_string(),
            lesson_number: self.lesson_in_week,
        });
        request
    }
}

/// Every lesson of the catalog in run order: level, then week, then lesson.
#[derive(Debug, Clone)]
pub struct CatalogWorkList {
    level_index: usize,
    week: u32,
    lesson: u32,
    ordinal: u32,
}

impl CatalogWorkList {
    pub fn new() -> Self {
        Self {
            level_index: 0,
            week: 1,
            lesson: 1,
            ordinal: 0,
        }
    }

    /// Number of items the list yields from the start.
    pub fn total() -> u32 {
        catalog_total_lessons()
    }
}

impl Default for CatalogWorkList {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for CatalogWorkList {
    type Item = BulkItem;

    fn next(&mut self) -> Option<BulkItem> {
        let level = *Level::ALL.get(self.level_index)?;
        let profile = level.profile();
        self.ordinal += 1;
        let item = BulkItem::new(level, self.week, self.lesson, self.ordinal);

        if self.lesson < profile.lessons_per_week {
            self.lesson += 1;
        } else if self.week < profile.week_count {
            self.lesson = 1;
            self.week += 1;
        } else {
            self.lesson = 1;
            self.week = 1;
            self.level_index += 1;
        }
        Some(item)
    }
}
