//! Deterministic fallback content, rendered locally when the endpoint cannot be used.

use crate::catalog::DifficultyBand;
use crate::provider::{ContentType, GeneratedContent, GenerationRequest};

/// Produces content for a request without calling the endpoint.
pub trait FallbackPolicy: Send + Sync {
    fn render(&self, request: &GenerationRequest) -> GeneratedContent;
}

/// Values substituted into a fallback template.
#[derive(Debug, Clone, Copy)]
pub struct FallbackContext<'a> {
    pub topic: &'a str,
    pub level: DifficultyBand,
    pub duration: u32,
}

/// Per-content-type string templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFallback;

impl TemplateFallback {
    pub fn render_body(content_type: ContentType, ctx: &FallbackContext<'_>) -> String {
        let level = ctx.level.as_str();
        match content_type {
            ContentType::Worksheet => format!(
                "# {topic} Worksheet\n\nLevel: {level} | Time: {duration} minutes\n\n\
                 ## Part 1: Vocabulary\nMatch each {topic} word with its meaning.\n\n\
                 ## Part 2: Gap Fill\nComplete the sentences using words from Part 1.\n\n\
                 ## Part 3: Writing\nWrite five sentences about {topic}.",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
            ContentType::Activity => format!(
                "# {topic} Activity\n\nLevel: {level} | Time: {duration} minutes\n\n\
                 1. Warm-up (5 min): brainstorm words about {topic} in pairs.\n\
                 2. Main task: interview a partner about {topic} using the question cards.\n\
                 3. Share: report two interesting answers to the group.",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
            ContentType::LessonPlan => format!(
                "# Lesson Plan: {topic}\n\nLevel: {level} | Duration: {duration} minutes\n\n\
                 ## Objectives\n- Use key vocabulary for {topic}\n- Practise the target pattern in context\n\n\
                 ## Stages\n1. Lead-in\n2. Vocabulary presentation\n3. Guided practice\n\
                 4. Freer speaking on {topic}\n5. Exit check",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
            ContentType::Quiz => format!(
                "# {topic} Quiz\n\nLevel: {level} | Time limit: {duration} minutes\n\n\
                 1. Choose the correct word to complete a sentence about {topic}.\n\
                 2. Decide whether each statement about {topic} is true or false.\n\
                 3. Answer in one full sentence: what do you know about {topic}?",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
            ContentType::Flashcards => format!(
                "# {topic} Flashcards\n\nLevel: {level} | Review time: {duration} minutes\n\n\
                 Front: key {topic} word | Back: meaning and example sentence\n\
                 Review the deck after 10 minutes, 1 day, and 3 days.",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
            ContentType::Unknown => format!(
                "# {topic}\n\nLevel: {level} | Duration: {duration} minutes\n\n\
                 Study material about {topic}. Review the key words, practise them in \
                 sentences, and discuss the topic with a partner.",
                topic = ctx.topic,
                duration = ctx.duration,
            ),
        }
    }
}

impl FallbackPolicy for TemplateFallback {
    fn render(&self, request: &GenerationRequest) -> GeneratedContent {
        let ctx = FallbackContext {
            topic: &request.topic,
            level: request.level,
            duration: request.duration_minutes(),
        };
        GeneratedContent {
            id: None,
            title: Some(format!("{} - {}", request.topic, request.content_type.label())),
            content: Self::render_body(request.content_type, &ctx),
        }
    }
}
