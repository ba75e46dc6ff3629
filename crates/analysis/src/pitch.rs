//! Short "why you'll like it" blurbs for recommended titles.

use crate::text::{shorten_sentences, strip_reasoning};
use llm_client::ChatModel;
use std::sync::Arc;
use tracing::{debug, error};

/// Sentences kept from a pitch.
pub const PITCH_SENTENCES: usize = 3;

const SYSTEM_PROMPT: &str = "You are a movie recommendation assistant. Provide concise \
summaries in 3 sentences or less without any thinking process.";

/// Asks the model why a recommendation fits the seed titles.
pub struct RecommendationPitcher {
    model: Arc<dyn ChatModel>,
}

impl RecommendationPitcher {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Pitch `title` to someone who liked `seeds`.
    ///
    /// Always returns text; a failed call yields an `Error generating summary`
    /// line instead.
    pub async fn pitch<S: AsRef<str>>(&self, title: &str, seeds: &[S]) -> String {
        let seeds: Vec<&str> = seeds.iter().map(AsRef::as_ref).collect();
        let prompt = format!(
            "In 3 sentences or less, summarize why '{}' is a good recommendation for someone \
             who likes {}. Be brief and direct.",
            title,
            seeds.join(", ")
        );

        debug!("Pitching '{}' against {} seeds", title, seeds.len());
        match self.model.chat(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => shorten_sentences(&strip_reasoning(&reply), PITCH_SENTENCES),
            Err(e) => {
                error!("Pitch for '{}' failed: {}", title, e);
                format!("Error generating summary: {}", e)
            }
        }
    }
}
