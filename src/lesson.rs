//! Lesson document model.
//!
//! A lesson is one day of study: twenty pages split across six fixed sections, each page
//! carrying its rendered content, annotation labels, and a time budget.

use serde::{Deserialize, Serialize};

use crate::catalog::Level;

/// Number of pages in every lesson.
pub const PAGES_PER_LESSON: usize = 20;

/// Lesson section, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Introduction,
    Vocabulary,
    Grammar,
    Practice,
    Conversation,
    Assessment,
}

/// Mental demand of a page, used to scale its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

impl CognitiveLoad {
    pub fn multiplier(self) -> f64 {
        match self {
            CognitiveLoad::Low => 0.8,
            CognitiveLoad::Medium => 1.0,
            CognitiveLoad::High => 1.2,
        }
    }
}

impl Section {
    /// Sections in the order they appear in a lesson.
    pub const ORDER: [Section; 6] = [
        Section::Introduction,
        Section::Vocabulary,
        Section::Grammar,
        Section::Practice,
        Section::Conversation,
        Section::Assessment,
    ];

    pub fn page_count(self) -> usize {
        match self {
            Section::Introduction => 3,
            Section::Vocabulary => 5,
            Section::Grammar => 4,
            Section::Practice => 4,
            Section::Conversation => 3,
            Section::Assessment => 1,
        }
    }

    pub fn base_minutes(self) -> f64 {
        match self {
            Section::Introduction => 1.0,
            Section::Vocabulary => 1.4,
            Section::Grammar => 1.5,
            Section::Practice => 2.0,
            Section::Conversation => 2.5,
            Section::Assessment => 2.0,
        }
    }

    /// Load tier shared by every page of the section.
    pub fn cognitive_load(self) -> CognitiveLoad {
        match self {
            Section::Introduction => CognitiveLoad::Low,
            Section::Vocabulary => CognitiveLoad::Medium,
            Section::Grammar => CognitiveLoad::Medium,
            Section::Practice => CognitiveLoad::Low,
            Section::Conversation => CognitiveLoad::Low,
            Section::Assessment => CognitiveLoad::High,
        }
    }

    pub fn neurotrigger(self) -> &'static str {
        match self {
            Section::Introduction => "novelty_bias",
            Section::Vocabulary => "spaced_repetition",
            Section::Grammar => "pattern_recognition",
            Section::Practice => "active_recall",
            Section::Conversation => "social_engagement",
            Section::Assessment => "retrieval_practice",
        }
    }

    pub fn interaction_type(self) -> &'static str {
        match self {
            Section::Introduction => "guided_discovery",
            Section::Vocabulary => "flashcard_drill",
            Section::Grammar => "pattern_builder",
            Section::Practice => "interactive_exercise",
            Section::Conversation => "role_play",
            Section::Assessment => "quiz",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::Vocabulary => "vocabulary",
            Section::Grammar => "grammar",
            Section::Practice => "practice",
            Section::Conversation => "conversation",
            Section::Assessment => "assessment",
        }
    }

    pub fn estimated_minutes_per_page(self) -> f64 {
        self.base_minutes() * self.cognitive_load().multiplier()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based position within the lesson
    pub ordinal: u32,
    pub section: Section,
    pub content: String,
    pub neurotrigger: String,
    pub interaction_type: String,
    pub cognitive_load: CognitiveLoad,
    pub estimated_minutes: f64,
}

/// Contiguous stretch of focused attention covering one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionSegment {
    pub section: Section,
    pub start_minute: f64,
    pub end_minute: f64,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDocument {
    pub id: String,
    pub level: Level,
    pub week: u32,
    pub day: u32,
    pub theme: String,
    pub pages: Vec<Page>,
    pub triggers: Vec<String>,
    pub sentence_goals: Vec<String>,
    pub conversation_targets: Vec<String>,
    pub memory_tasks: Vec<String>,
    pub attention_segments: Vec<AttentionSegment>,
}

impl LessonDocument {
    pub fn total_minutes(&self) -> f64 {
        self.pages.iter().map(|page| page.estimated_minutes).sum()
    }

    pub fn pages_in(&self, section: Section) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |page| page.section == section)
    }
}
