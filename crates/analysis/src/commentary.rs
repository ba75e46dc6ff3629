//! Critic-style commentary on a single title.

use crate::text::strip_reasoning;
use llm_client::ChatModel;
use std::sync::Arc;
use tracing::{error, info};

/// Which angle the commentary takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryKind {
    /// Themes, cinematography and storytelling
    Director,
    /// Cinematography, color palette and visual themes
    VisualStyle,
}

impl CommentaryKind {
    fn prompts(self, title: &str) -> (&'static str, String) {
        match self {
            CommentaryKind::Director => (
                "You are a film critic providing director's commentary. Analyze themes, \
                 cinematography, and storytelling elements.",
                format!(
                    "Provide director's commentary for {}. Focus on themes, cinematography, \
                     and storytelling elements.",
                    title
                ),
            ),
            CommentaryKind::VisualStyle => (
                "You are a cinematography expert. Analyze and describe the visual style of movies.",
                format!(
                    "Analyze the visual style of {}. Focus on cinematography, color palette, \
                     and visual themes.",
                    title
                ),
            ),
        }
    }
}

pub struct Commentator {
    model: Arc<dyn ChatModel>,
}

impl Commentator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Generate commentary; failures come back as an error line.
    pub async fn comment(&self, title: &str, kind: CommentaryKind) -> String {
        let (system, prompt) = kind.prompts(title);

        info!("Generating {:?} commentary for '{}'", kind, title);
        match self.model.chat(system, &prompt).await {
            Ok(reply) => strip_reasoning(&reply).trim().to_string(),
            Err(e) => {
                error!("Commentary for '{}' failed: {}", title, e);
                format!("Error generating commentary: {}", e)
            }
        }
    }
}
