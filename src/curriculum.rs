//! Curriculum planning: weekly plans and full-level curricula built on top of lesson
//! synthesis.

pub mod assembler;
pub mod week;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Level, SentenceTargets};
use crate::lesson::LessonDocument;

pub use assembler::{estimated_study_hours, progression_map, CurriculumAssembler};
pub use week::plan_week;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Formative,
    Summative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTest {
    pub duration_minutes: u32,
    pub required_elements: Vec<String>,
    pub evaluation_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarCheck {
    pub focus: Vec<String>,
    pub accuracy_target_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyReview {
    pub active_set: String,
    pub passive_set: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAssessment {
    pub kind: AssessmentKind,
    pub conversation_test: ConversationTest,
    pub grammar_check: GrammarCheck,
    pub vocabulary_review: VocabularyReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub theme: String,
    pub objectives: Vec<String>,
    pub lessons: Vec<LessonDocument>,
    pub assessment: WeeklyAssessment,
    pub conversation_milestones: Vec<String>,
    pub sentence_targets: SentenceTargets,
}

/// Expected abilities at one point in a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionMilestone {
    pub week: u32,
    pub sentence_complexity: String,
    pub conversation_ability: String,
    pub vocabulary_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionMap {
    pub milestones: Vec<ProgressionMilestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: String,
    pub level: Level,
    pub weeks: Vec<WeekPlan>,
    pub total_pages: u32,
    pub estimated_study_hours: f64,
    pub progression_map: ProgressionMap,
    pub generated_at: DateTime<Utc>,
}

impl Curriculum {
    pub fn lessons(&self) -> impl Iterator<Item = &LessonDocument> {
        self.weeks.iter().flat_map(|week| week.lessons.iter())
    }
}
