//! Generative analysis of watch histories and recommendations.
//!
//! This crate provides:
//! - TasteSummarizer: narrative plus a three-word taste label
//! - FestivalComposer: a named four-film program for a chosen mood
//! - RecommendationPitcher and Commentator: short per-title texts
//!
//! Every component talks to a [`llm_client::ChatModel`] and none of them
//! return errors: a failed model call becomes an error-shaped value the
//! caller can display as-is.

pub mod commentary;
pub mod festival;
pub mod pitch;
pub mod taste;
pub mod text;

// Re-export main types
pub use commentary::{CommentaryKind, Commentator};
pub use festival::{
    FestivalComposer, FestivalEntry, FestivalPlan, MAX_ENTRIES, Mood, MoodParseError,
    clean_festival_reply, parse_festival_plan,
};
pub use pitch::{PITCH_SENTENCES, RecommendationPitcher};
pub use taste::{DEFAULT_SAMPLE_SIZE, TasteProfile, TasteSummarizer, parse_taste_reply};

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use llm_client::{ChatModel, LlmError};
    use std::sync::Mutex;

    /// Returns a fixed reply (or a fixed failure) and records every call.
    pub struct ScriptedModel {
        reply: Option<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedModel {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().ok_or_else(|| LlmError::Status {
                status: 503,
                body: "model unavailable".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }
}
