//! Level Catalog
//!
//! Static configuration for the six CEFR proficiency levels: pacing (weeks and lessons per
//! week), the ordered weekly theme list, sentence-construction progression, and the
//! vocabulary and conversation targets every other stage of the pipeline reads from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// CEFR proficiency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// Coarse difficulty band used on the generation wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyBand {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyBand {
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyBand::Beginner => "beginner",
            DifficultyBand::Intermediate => "intermediate",
            DifficultyBand::Advanced => "advanced",
        }
    }
}

/// Static attributes of one level.
#[derive(Debug)]
pub struct LevelProfile {
    pub week_count: u32,
    pub lessons_per_week: u32,
    pub themes: &'static [&'static str],
    pub sentence_goals: &'static [&'static str],
    pub vocabulary_target: u32,
    /// Target length of an unscripted conversation, in minutes
    pub conversation_duration_target: u32,
}

impl LevelProfile {
    pub fn total_lessons(&self) -> u32 {
        self.week_count * self.lessons_per_week
    }
}

/// Sentence-construction targets for one week of practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTargets {
    pub count: u32,
    pub elements_per_sentence: u32,
    pub min_length: u32,
    pub max_length: u32,
}

static A1: LevelProfile = LevelProfile {
    week_count: 12,
    lessons_per_week: 4,
    themes: &[
        "Greetings & Introductions",
        "Family & Friends",
        "Numbers & Time",
        "Food & Drinks",
        "Home & Rooms",
        "Daily Routines",
        "Shopping Basics",
        "Weather & Seasons",
        "Colors & Clothes",
        "Around Town",
        "Hobbies & Free Time",
        "Review & Celebration",
    ],
    sentence_goals: &[
        "Subject + verb (I eat)",
        "Subject + verb + object (I eat bread)",
        "Simple questions with question words",
        "Negation with do/does not",
        "There is / there are",
    ],
    vocabulary_target: 500,
    conversation_duration_target: 2,
};

static A2: LevelProfile = LevelProfile {
    week_count: 12,
    lessons_per_week: 4,
    themes: &[
        "Past Weekends",
        "Travel Plans",
        "Health & Body",
        "Jobs & Workplaces",
        "Restaurants & Ordering",
        "Directions & Transport",
        "Childhood Memories",
        "Celebrations & Holidays",
        "Sports & Fitness",
        "Technology at Home",
        "Nature & Animals",
        "Making Plans",
        "Comparing Places",
        "Review & Showcase",
    ],
    sentence_goals: &[
        "Simple past statements",
        "Future with going to",
        "Comparatives and superlatives",
        "Compound sentences with and/but/so",
        "Adverbs of frequency in context",
    ],
    vocabulary_target: 1000,
    conversation_duration_target: 5,
};

static B1: LevelProfile = LevelProfile {
    week_count: 16,
    lessons_per_week: 3,
    themes: &[
        "Life Experiences",
        "Education & Learning",
        "Media & News",
        "Environment",
        "Work-Life Balance",
        "Cultural Traditions",
        "Money & Budgeting",
        "Relationships",
        "City vs Countryside",
        "Inventions",
        "Volunteering",
        "Food Culture",
        "Travel Stories",
        "Personal Goals",
        "Social Media",
        "Review & Reflection",
    ],
    sentence_goals: &[
        "Present perfect for experience",
        "First and second conditionals",
        "Relative clauses with who/which/that",
        "Reported statements",
        "Linking ideas with although/however",
    ],
    vocabulary_target: 2000,
    conversation_duration_target: 10,
};

static B2: LevelProfile = LevelProfile {
    week_count: 16,
    lessons_per_week: 3,
    themes: &[
        "Global Issues",
        "Science in Daily Life",
        "Arts & Creativity",
        "Consumer Society",
        "Crime & Justice",
        "Health Debates",
        "Urban Development",
        "Language & Identity",
        "The Future of Work",
        "Advertising",
        "Ethics of Technology",
        "Migration",
        "Sports & Society",
        "History Revisited",
        "Innovation",
        "Leadership",
        "Debate Skills",
        "Review & Presentation",
    ],
    sentence_goals: &[
        "Third and mixed conditionals",
        "Passive voice across tenses",
        "Complex sentences with multiple clauses",
        "Hedging and softening language",
        "Cohesive devices for argument",
    ],
    vocabulary_target: 4000,
    conversation_duration_target: 15,
};

static C1: LevelProfile = LevelProfile {
    week_count: 18,
    lessons_per_week: 3,
    themes: &[
        "Academic Discourse",
        "Economics Explained",
        "Philosophy of Mind",
        "Political Systems",
        "Literature Analysis",
        "Psychology of Decisions",
        "Negotiation",
        "Public Speaking",
        "Scientific Controversies",
        "Cultural Criticism",
        "Global Health",
        "Digital Privacy",
        "Sustainability Policy",
        "Business Strategy",
        "Law & Society",
        "Media Literacy",
        "Research Methods",
        "Persuasive Writing",
        "Intercultural Communication",
        "Review & Defense",
    ],
    sentence_goals: &[
        "Inversion for emphasis",
        "Cleft sentences",
        "Nominalisation in formal register",
        "Advanced modal deduction",
        "Participle clauses",
    ],
    vocabulary_target: 8000,
    conversation_duration_target: 20,
};

static C2: LevelProfile = LevelProfile {
    week_count: 16,
    lessons_per_week: 3,
    themes: &[
        "Rhetoric & Style",
        "Idiomatic Mastery",
        "Humor & Irony",
        "Specialist Fields",
        "Literary Translation",
        "Diplomacy",
        "Academic Publishing",
        "Regional Varieties",
        "Historical Language",
        "Poetry & Rhythm",
        "Satire",
        "Legal Language",
        "Medical Communication",
        "Crisis Communication",
        "Storytelling Craft",
        "Philosophical Debate",
        "Economic Forecasting",
        "Art Criticism",
        "Mediation",
        "Scientific Writing",
        "Speechwriting",
        "Cultural Nuance",
        "Teaching the Language",
        "Capstone Review",
    ],
    sentence_goals: &[
        "Stylistic variation for effect",
        "Ellipsis and substitution",
        "Register shifting mid-discourse",
        "Complex subordination chains",
        "Idiomatic and figurative structures",
    ],
    vocabulary_target: 16000,
    conversation_duration_target: 30,
};

impl Level {
    /// All levels in catalog order.
    pub const ALL: [Level; 6] = [Level::A1, Level::A2, Level::B1, Level::B2, Level::C1, Level::C2];

    pub fn profile(self) -> &'static LevelProfile {
        match self {
            Level::A1 => &A1,
            Level::A2 => &A2,
            Level::B1 => &B1,
            Level::B2 => &B2,
            Level::C1 => &C1,
            Level::C2 => &C2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }

    pub fn band(self) -> DifficultyBand {
        match self {
            Level::A1 | Level::A2 => DifficultyBand::Beginner,
            Level::B1 | Level::B2 => DifficultyBand::Intermediate,
            Level::C1 | Level::C2 => DifficultyBand::Advanced,
        }
    }

    /// Theme for a week using the per-lesson rule: `themes[(week - 1) mod len]`.
    ///
    /// Wraps around when the week runs past the theme list.
    pub fn theme_for_week(self, week: u32) -> &'static str {
        let themes = self.profile().themes;
        let index = week.saturating_sub(1) as usize % themes.len();
        themes[index]
    }

    /// Grammar accuracy expected in the weekly grammar check, in percent.
    pub fn grammar_accuracy_target(self) -> u32 {
        match self {
            Level::A1 => 70,
            Level::A2 => 75,
            Level::B1 => 80,
            Level::B2 => 85,
            Level::C1 => 90,
            Level::C2 => 95,
        }
    }

    pub fn sentence_targets(self) -> SentenceTargets {
        let (count, elements_per_sentence, min_length, max_length) = match self {
            Level::A1 => (10, 3, 3, 6),
            Level::A2 => (12, 4, 5, 9),
            Level::B1 => (15, 5, 8, 14),
            Level::B2 => (15, 6, 12, 20),
            Level::C1 => (20, 7, 15, 25),
            Level::C2 => (20, 8, 20, 35),
        };
        SentenceTargets {
            count,
            elements_per_sentence,
            min_length,
            max_length,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            other => Err(ApiError::ConfigError(format!("Unknown level: {}", other))),
        }
    }
}

/// Number of lessons across every level of the catalog.
pub fn catalog_total_lessons() -> u32 {
    Level::ALL.iter().map(|level| level.profile().total_lessons()).sum()
}
