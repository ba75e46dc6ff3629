//! Taste Summarizer: a short narrative plus a three-word label.
//!
//! ## Algorithm
//! 1. Sample: histories longer than `max_items` keep only the top-rated
//!    `max_items` titles (missing ratings sort as 0)
//! 2. Ask the model for 3-4 sentences of analysis followed by a three-word
//!    label on its own line
//! 3. Normalize the reply (see [`parse_taste_reply`])
//!
//! The model is never trusted to follow the layout. Parsing always succeeds,
//! and model failures come back as an error-shaped profile instead of `Err`.

use crate::text::{collapse_spaces, strip_markdown, strip_reasoning};
use catalog::{WatchedItem, sample_top_rated};
use llm_client::ChatModel;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Titles sent to the model when no sample size is configured.
pub const DEFAULT_SAMPLE_SIZE: usize = 50;

const ERROR_PREFIX: &str = "Error generating taste profile";
const EMPTY_HISTORY: &str = "No watch history to analyze.";

const SYSTEM_PROMPT: &str = "You are a movie taste analyzer. Create a creative and engaging \
taste profile based on the user's preferences. First, write 3-4 sentences analyzing their \
movie preferences. Then, on a new line, write a creative three-word phrase that captures \
their taste (e.g., 'Mind-Bending Sci-Fi Thriller' or 'Emotional Action Drama'). Make the \
three words flow naturally together and avoid using commas. Do not use any special \
characters or formatting in your response.";

/// Summary of a viewer's taste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasteProfile {
    /// A few sentences of analysis
    pub narrative: String,
    /// Short label, ideally three words; empty when none could be parsed
    pub label: String,
}

impl TasteProfile {
    fn placeholder() -> Self {
        Self {
            narrative: EMPTY_HISTORY.to_string(),
            label: String::new(),
        }
    }

    fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            narrative: format!("{}: {}", ERROR_PREFIX, reason),
            label: String::new(),
        }
    }

    /// True for the error-shaped profile produced on model failure.
    pub fn is_error(&self) -> bool {
        self.label.is_empty() && self.narrative.starts_with(ERROR_PREFIX)
    }

    pub fn has_three_word_label(&self) -> bool {
        self.label.split_whitespace().count() == 3
    }
}

/// Builds a [`TasteProfile`] from a watch history with a generative model.
pub struct TasteSummarizer {
    model: Arc<dyn ChatModel>,
    max_items: usize,
}

impl TasteSummarizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            max_items: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Override how many titles are sent to the model.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Summarize a watch history.
    ///
    /// An empty history (or one with only blank titles) returns a
    /// placeholder without calling the model.
    pub async fn summarize(&self, history: &[WatchedItem]) -> TasteProfile {
        let sample = sample_top_rated(history, self.max_items);
        let titles: Vec<&str> = sample
            .iter()
            .map(|item| item.title.trim())
            .filter(|title| !title.is_empty())
            .collect();

        if titles.is_empty() {
            debug!("Empty history, skipping taste analysis");
            return TasteProfile::placeholder();
        }

        info!(
            "Analyzing taste from {} of {} titles with {}",
            titles.len(),
            history.len(),
            self.model.model_name()
        );

        let prompt = format!(
            "Create a taste profile for someone who likes these movies: {}. \
             Be creative and engaging.",
            titles.join(", ")
        );

        match self.model.chat(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => parse_taste_reply(&reply),
            Err(e) => {
                error!("Taste analysis failed: {}", e);
                TasteProfile::failed(e)
            }
        }
    }
}

/// Normalize a raw model reply into a profile.
///
/// ## Algorithm
/// 1. Drop reasoning blocks and markdown markers, collapse space runs
///    within each line, discard blank lines
/// 2. Two or more lines: the last line is the label, the rest is narrative
/// 3. One line: split on the last period; the final sentence is the label
/// 4. Otherwise the whole text is the narrative and the label is empty
///
/// A label that is not exactly three words is kept and logged.
pub fn parse_taste_reply(reply: &str) -> TasteProfile {
    let cleaned = collapse_spaces(&strip_markdown(&strip_reasoning(reply)));
    let lines: Vec<&str> = cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (narrative, label) = match lines.as_slice() {
        [] => (String::new(), String::new()),
        [single] => split_last_sentence(single),
        [body @ .., last] => (body.join(" "), last.to_string()),
    };

    let label = normalize_label(&label);
    if !label.is_empty() && label.split_whitespace().count() != 3 {
        warn!("Taste label is not three words: {:?}", label);
    }

    TasteProfile { narrative, label }
}

fn split_last_sentence(text: &str) -> (String, String) {
    let trimmed = text.trim_end_matches('.');
    match trimmed.rsplit_once('.') {
        Some((head, tail)) if !head.trim().is_empty() && !tail.trim().is_empty() => {
            (format!("{}.", head.trim()), tail.trim().to_string())
        }
        _ => (text.to_string(), String::new()),
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, '"' | '\'' | ',' | ';' | ':' | '.' | '!' | '?')
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedModel;

    #[test]
    fn test_parse_two_lines() {
        let profile = parse_taste_reply("Great thought-provoking choices.\nBold Cerebral Journey");
        assert_eq!(profile.narrative, "Great thought-provoking choices.");
        assert_eq!(profile.label, "Bold Cerebral Journey");
        assert!(profile.has_three_word_label());
    }

    #[test]
    fn test_parse_multi_line_narrative() {
        let reply = "You love  slow burns.\nYou return to noir.\n\n**Moody Neon Noir**";
        let profile = parse_taste_reply(reply);
        assert_eq!(profile.narrative, "You love slow burns. You return to noir.");
        assert_eq!(profile.label, "Moody Neon Noir");
    }

    #[test]
    fn test_parse_sentence_fallback() {
        let profile = parse_taste_reply("You like big ideas. You like twists. Mind-Bending Sci-Fi Thriller.");
        assert_eq!(profile.narrative, "You like big ideas. You like twists.");
        assert_eq!(profile.label, "Mind-Bending Sci-Fi Thriller");
    }

    #[test]
    fn test_parse_passthrough_without_breaks() {
        let profile = parse_taste_reply("Just one thought without a period");
        assert_eq!(profile.narrative, "Just one thought without a period");
        assert_eq!(profile.label, "");
    }

    #[test]
    fn test_parse_wrong_word_count_is_kept() {
        let profile = parse_taste_reply("Analysis here.\n\"Quietly Devastating Character Dramas\"");
        assert_eq!(profile.label, "Quietly Devastating Character Dramas");
        assert!(!profile.has_three_word_label());
    }

    #[test]
    fn test_parse_strips_reasoning() {
        let reply = "<think>\nThey like Nolan.\nMaybe sci-fi.\n</think>\n\nCerebral picks.\nBold Cerebral Journey";
        let profile = parse_taste_reply(reply);
        assert_eq!(profile.narrative, "Cerebral picks.");
        assert_eq!(profile.label, "Bold Cerebral Journey");
    }

    #[tokio::test]
    async fn test_summarize_samples_top_rated() {
        let model = Arc::new(ScriptedModel::replying("Nice.\nWarm Gentle Comedies"));
        let summarizer = TasteSummarizer::new(model.clone()).with_max_items(2);

        let history = vec![
            WatchedItem::titled("Low").with_rating(1.0),
            WatchedItem::titled("Top").with_rating(5.0),
            WatchedItem::titled("Unrated"),
            WatchedItem::titled("Mid").with_rating(3.5),
        ];
        let profile = summarizer.summarize(&history).await;

        assert_eq!(profile.label, "Warm Gentle Comedies");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.contains("Top, Mid"));
        assert!(!calls[0].1.contains("Low"));
    }

    #[tokio::test]
    async fn test_summarize_empty_history_skips_model() {
        let model = Arc::new(ScriptedModel::replying("unused"));
        let summarizer = TasteSummarizer::new(model.clone());

        let profile = summarizer.summarize(&[]).await;

        assert_eq!(profile.narrative, EMPTY_HISTORY);
        assert!(!profile.is_error());
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_model_failure_is_sentinel() {
        let summarizer = TasteSummarizer::new(Arc::new(ScriptedModel::failing()));

        let profile = summarizer
            .summarize(&[WatchedItem::titled("Heat")])
            .await;

        assert!(profile.is_error());
        assert!(profile.narrative.starts_with("Error generating taste profile: "));
        assert_eq!(profile.label, "");
    }
}
