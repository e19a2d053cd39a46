//! Typed page templates.
//!
//! Each section owns an ordered list of render functions over a [`TemplateContext`].
//! Sections may define fewer templates than pages; the missing positions reuse the
//! section's first template.

use crate::catalog::Level;
use crate::lesson::Section;

/// Values available to every page template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub level: Level,
    pub week: u32,
    pub day: u32,
    pub theme: &'a str,
}

pub type Template = fn(&TemplateContext<'_>) -> String;

const INTRODUCTION: &[Template] = &[
    |ctx| {
        format!(
            "Welcome to day {} of week {}: today we explore \"{}\" at level {}.",
            ctx.day, ctx.week, ctx.theme, ctx.level
        )
    },
    |ctx| {
        format!(
            "Warm-up: look at the picture scene about {} and name three things you already know.",
            ctx.theme
        )
    },
    |ctx| {
        format!(
            "Goal check: by the end of this lesson you will use {} language in a short {} exchange.",
            ctx.theme,
            ctx.level.band().as_str()
        )
    },
];

const VOCABULARY: &[Template] = &[
    |ctx| format!("Core words for {}: listen, repeat, and match each word to its image.", ctx.theme),
    |ctx| format!("Word families: group the {} words by meaning and by sound.", ctx.theme),
    |ctx| {
        format!(
            "Collocations: pair each {} verb with the noun it most often goes with.",
            ctx.theme
        )
    },
    |ctx| {
        format!(
            "Spaced review: recall the words from day {} before revealing the answers.",
            ctx.day.saturating_sub(1).max(1)
        )
    },
    |ctx| {
        format!(
            "Personal list: choose five {} words you will use this week and write an example for each.",
            ctx.theme
        )
    },
];

const GRAMMAR: &[Template] = &[
    |ctx| {
        format!(
            "Pattern spotlight: {} in sentences about {}.",
            sentence_goal_for_day(ctx.level, ctx.day),
            ctx.theme
        )
    },
    |ctx| format!("Notice the rule: underline the pattern in five {} examples.", ctx.theme),
    |ctx| format!("Build it: rearrange the word cards into correct {} sentences.", ctx.level),
    |ctx| format!("Common mistakes: fix the errors in a short text about {}.", ctx.theme),
];

const PRACTICE: &[Template] = &[
    |ctx| format!("Fill the gaps in a {} dialogue using today's words and pattern.", ctx.theme),
    |ctx| format!("Listening task: answer questions about a short {} recording.", ctx.theme),
    |ctx| format!("Write three sentences about {} that follow today's pattern.", ctx.theme),
];

const CONVERSATION: &[Template] = &[
    |ctx| {
        format!(
            "Role-play: act out a {} situation with a partner, swapping roles after {} minutes.",
            ctx.theme,
            ctx.level.profile().conversation_duration_target
        )
    },
    |ctx| format!("Question chain: ask and answer follow-up questions about {}.", ctx.theme),
];

const ASSESSMENT: &[Template] = &[|ctx| {
    format!(
        "Exit check for week {} day {}: five quick items on {} vocabulary and grammar.",
        ctx.week, ctx.day, ctx.theme
    )
}];

pub fn templates_for(section: Section) -> &'static [Template] {
    match section {
        Section::Introduction => INTRODUCTION,
        Section::Vocabulary => VOCABULARY,
        Section::Grammar => GRAMMAR,
        Section::Practice => PRACTICE,
        Section::Conversation => CONVERSATION,
        Section::Assessment => ASSESSMENT,
    }
}

/// Render the page at a 0-based position within its section.
pub fn render(section: Section, position: usize, ctx: &TemplateContext<'_>) -> String {
    let templates = templates_for(section);
    let template = templates.get(position).unwrap_or(&templates[0]);
    template(ctx)
}

fn sentence_goal_for_day(level: Level, day: u32) -> &'static str {
    let goals = level.profile().sentence_goals;
    goals[day.saturating_sub(1) as usize % goals.len()]
}
