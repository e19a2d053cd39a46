//! Lesson Content Synthesis
//!
//! Expands `(level, week, day, theme?)` into a complete [`LessonDocument`]. Synthesis is a
//! pure function: no I/O, no randomness, and identical inputs always yield an identical
//! document (including its id).

pub mod templates;

use crate::catalog::Level;
use crate::lesson::{AttentionSegment, LessonDocument, Page, Section, PAGES_PER_LESSON};
use templates::TemplateContext;

/// Synthesize one lesson.
///
/// `theme_override` replaces the week's catalog theme. Week and day are expected to be
/// 1-based; zero is a caller contract violation and is saturated rather than rejected.
pub fn synthesize(level: Level, week: u32, day: u32, theme_override: Option<&str>) -> LessonDocument {
    let theme = theme_override.unwrap_or_else(|| level.theme_for_week(week));
    let ctx = TemplateContext {
        level,
        week,
        day,
        theme,
    };

    let mut pages = Vec::with_capacity(PAGES_PER_LESSON);
    for section in Section::ORDER {
        for position in 0..section.page_count() {
            pages.push(Page {
                ordinal: pages.len() as u32 + 1,
                section,
                content: templates::render(section, position, &ctx),
                neurotrigger: section.neurotrigger().to_string(),
                interaction_type: section.interaction_type().to_string(),
                cognitive_load: section.cognitive_load(),
                estimated_minutes: section.estimated_minutes_per_page(),
            });
        }
    }

    LessonDocument {
        id: lesson_id(level, week, day, theme),
        level,
        week,
        day,
        theme: theme.to_string(),
        triggers: Section::ORDER
            .iter()
            .map(|section| section.neurotrigger().to_string())
            .collect(),
        sentence_goals: level
            .profile()
            .sentence_goals
            .iter()
            .map(|goal| goal.to_string())
            .collect(),
        conversation_targets: conversation_targets(&ctx),
        memory_tasks: memory_tasks(&ctx),
        attention_segments: attention_segments(&pages),
        pages,
    }
}

/// Deterministic fingerprint of the lesson coordinates.
pub fn lesson_id(level: Level, week: u32, day: u32, theme: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(level.as_str().as_bytes());
    hasher.update(&week.to_le_bytes());
    hasher.update(&day.to_le_bytes());
    hasher.update(theme.as_bytes());
    let digest = hasher.finalize();
    format!(
        "lesson-{}-w{}-d{}-{}",
        level.as_str().to_ascii_lowercase(),
        week,
        day,
        &hex::encode(digest.as_bytes())[..12]
    )
}

fn conversation_targets(ctx: &TemplateContext<'_>) -> Vec<String> {
    let profile = ctx.level.profile();
    vec![
        format!(
            "Sustain a {}-minute conversation about {}",
            profile.conversation_duration_target, ctx.theme
        ),
        format!("Ask at least three questions related to {}", ctx.theme),
        "Use today's pattern at least twice while speaking".to_string(),
    ]
}

fn memory_tasks(ctx: &TemplateContext<'_>) -> Vec<String> {
    vec![
        format!("Review {} vocabulary after 10 minutes", ctx.theme),
        format!("Recall day {} words before bed", ctx.day),
        format!("Revisit week {} patterns in 3 days", ctx.week),
    ]
}

fn attention_segments(pages: &[Page]) -> Vec<AttentionSegment> {
    let mut segments = Vec::with_capacity(Section::ORDER.len());
    let mut clock = 0.0;
    for section in Section::ORDER {
        let minutes: f64 = pages
            .iter()
            .filter(|page| page.section == section)
            .map(|page| page.estimated_minutes)
            .sum();
        segments.push(AttentionSegment {
            section,
            start_minute: clock,
            end_minute: clock + minutes,
            focus: section.neurotrigger().to_string(),
        });
        clock += minutes;
    }
    segments
}
