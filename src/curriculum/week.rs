//! Week planning: one week's lessons plus its assessment plan and milestones.

use tracing::debug;

use crate::catalog::Level;
use crate::curriculum::{
    AssessmentKind, ConversationTest, GrammarCheck, VocabularyReview, WeekPlan, WeeklyAssessment,
};
use crate::synthesis::synthesize;

/// Every n-th week closes with a summative assessment.
const SUMMATIVE_INTERVAL: u32 = 4;

/// Plan one week of a level.
pub fn plan_week(level: Level, week: u32) -> WeekPlan {
    let profile = level.profile();
    let theme = level.theme_for_week(week);

    let lessons = (1..=profile.lessons_per_week)
        .map(|day| synthesize(level, week, day, Some(theme)))
        .collect::<Vec<_>>();

    debug!(
        level = %level,
        week,
        theme,
        lessons = lessons.len(),
        "planned week"
    );

    WeekPlan {
        week,
        theme: theme.to_string(),
        objectives: objectives(level, week, theme),
        lessons,
        assessment: WeeklyAssessment {
            kind: assessment_kind(week),
            conversation_test: ConversationTest {
                duration_minutes: profile.conversation_duration_target,
                required_elements: vec![
                    format!("Greeting and topic opener about {}", theme),
                    "At least three follow-up questions".to_string(),
                    format!("This week's pattern: {}", sentence_goal(level, week)),
                    "Polite closing".to_string(),
                ],
                evaluation_criteria: vec![
                    "Fluency".to_string(),
                    "Accuracy".to_string(),
                    "Vocabulary range".to_string(),
                    "Interaction".to_string(),
                ],
            },
            grammar_check: GrammarCheck {
                focus: vec![sentence_goal(level, week).to_string()],
                accuracy_target_percent: level.grammar_accuracy_target(),
            },
            vocabulary_review: VocabularyReview {
                active_set: format!("{} week {} active words", theme, week),
                passive_set: format!("{} week {} recognition words", theme, week),
            },
        },
        conversation_milestones: conversation_milestones(level, theme),
        sentence_targets: level.sentence_targets(),
    }
}

fn assessment_kind(week: u32) -> AssessmentKind {
    if week % SUMMATIVE_INTERVAL == 0 {
        AssessmentKind::Summative
    } else {
        AssessmentKind::Formative
    }
}

fn sentence_goal(level: Level, week: u32) -> &'static str {
    let goals = level.profile().sentence_goals;
    goals[week.saturating_sub(1) as usize % goals.len()]
}

fn objectives(level: Level, week: u32, theme: &str) -> Vec<String> {
    let targets = level.sentence_targets();
    vec![
        format!("Understand and use core vocabulary for {}", theme),
        format!("Apply the pattern \"{}\" in context", sentence_goal(level, week)),
        format!(
            "Build {} sentences of {}-{} words about {}",
            targets.count, targets.min_length, targets.max_length, theme
        ),
        format!(
            "Hold a {}-minute conversation on {}",
            level.profile().conversation_duration_target,
            theme
        ),
    ]
}

fn conversation_milestones(level: Level, theme: &str) -> Vec<String> {
    let minutes = level.profile().conversation_duration_target;
    vec![
        format!("Introduce the topic of {} unprompted", theme),
        format!("Keep the exchange going for {} minutes", minutes),
        "Recover from a misunderstanding by rephrasing".to_string(),
    ]
}
