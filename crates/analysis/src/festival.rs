//! Festival Composer: a named, four-film viewing program built from a
//! watch history.
//!
//! The model is asked for a fixed layout:
//!
//! ```text
//! Festival Name: <name>
//!
//! Description: <paragraph>
//!
//! Viewing Order:
//! 1. <title> - <why it belongs here>
//! ...
//! ```
//!
//! Replies are cleaned by [`clean_festival_reply`] and parsed by
//! [`parse_festival_plan`]. Parsing never fails; a model failure produces
//! an error-shaped plan.

use crate::text::{strip_emphasis, strip_reasoning};
use catalog::{WatchedItem, sample_top_rated};
use llm_client::ChatModel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Entries kept from the viewing order, whatever the model produced.
pub const MAX_ENTRIES: usize = 4;

const ERROR_PREFIX: &str = "Error generating festival theme";
const EMPTY_HISTORY: &str = "No watch history to build a festival from.";

const NAME_LABEL: &str = "Festival Name:";
const DESCRIPTION_LABEL: &str = "Description:";
const ORDER_LABEL: &str = "Viewing Order:";

/// Openers the model uses when it narrates its own thinking.
const FILLER_OPENERS: [&str; 6] = ["Hmm", "Okay", "Let me", "Now,", "Maybe", "Perhaps"];

static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)](?:\s+|$)").expect("valid numbering regex"));

const SYSTEM_PROMPT: &str = "You are a film festival curator. Create an engaging festival \
theme and description based on the movies and the specified mood. Select exactly 4 movies \
that create a cohesive narrative journey. Format your response EXACTLY as follows:\n\n\
Festival Name: [name]\n\n\
Description: [Write a compelling paragraph that explains how these 4 movies connect \
thematically and create a meaningful journey for the viewer. Focus on the emotional and \
intellectual progression from one film to the next.]\n\n\
Viewing Order:\n\
1. [movie title] - [one sentence on its place in the journey]\n\
2. [movie title] - [one sentence on its place in the journey]\n\
3. [movie title] - [one sentence on its place in the journey]\n\
4. [movie title] - [one sentence on its place in the journey]\n\n\
Do not include any thinking process, notes, asterisks, or additional text. Do not use any \
markdown formatting. Keep the format clean and simple.";

/// The emotional direction of a festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mood {
    #[default]
    Balanced,
    Uplifting,
    Thoughtful,
    Thrilling,
    Emotional,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Balanced,
        Mood::Uplifting,
        Mood::Thoughtful,
        Mood::Thrilling,
        Mood::Emotional,
    ];

    /// The instruction that opens the user prompt.
    pub fn brief(self) -> &'static str {
        match self {
            Mood::Balanced => {
                "Create a balanced festival theme that includes a mix of different genres and moods"
            }
            Mood::Uplifting => {
                "Create an uplifting festival theme focusing on feel-good and inspiring movies"
            }
            Mood::Thoughtful => {
                "Create a thoughtful festival theme focusing on deep, meaningful films"
            }
            Mood::Thrilling => {
                "Create an exciting festival theme focusing on action, suspense, and thrillers"
            }
            Mood::Emotional => {
                "Create an emotional festival theme focusing on dramas and character-driven stories"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Balanced => "balanced",
            Mood::Uplifting => "uplifting",
            Mood::Thoughtful => "thoughtful",
            Mood::Thrilling => "thrilling",
            Mood::Emotional => "emotional",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown mood '{0}' (expected balanced, uplifting, thoughtful, thrilling or emotional)")]
pub struct MoodParseError(pub String);

impl FromStr for Mood {
    type Err = MoodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MoodParseError(s.to_string()))
    }
}

/// One film in the viewing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalEntry {
    pub title: String,
    /// Empty when the model gave only a title
    pub description: String,
}

/// A parsed festival program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FestivalPlan {
    pub name: String,
    pub description: String,
    /// At most [`MAX_ENTRIES`], in viewing order
    pub viewing_order: Vec<FestivalEntry>,
}

impl FestivalPlan {
    fn without_history() -> Self {
        Self {
            description: EMPTY_HISTORY.to_string(),
            ..Self::default()
        }
    }

    fn failed(reason: impl fmt::Display) -> Self {
        Self {
            description: format!("{}: {}", ERROR_PREFIX, reason),
            ..Self::default()
        }
    }

    /// True for the error-shaped plan produced on model failure.
    pub fn is_error(&self) -> bool {
        self.name.is_empty() && self.description.starts_with(ERROR_PREFIX)
    }
}

/// Builds a [`FestivalPlan`] from a watch history with a generative model.
pub struct FestivalComposer {
    model: Arc<dyn ChatModel>,
    max_items: usize,
}

impl FestivalComposer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            max_items: crate::taste::DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Override how many titles are offered to the model.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Compose a festival for the given mood.
    ///
    /// An empty history returns a placeholder plan without calling the model.
    pub async fn compose(&self, history: &[WatchedItem], mood: Mood) -> FestivalPlan {
        let sample = sample_top_rated(history, self.max_items);
        let titles: Vec<&str> = sample
            .iter()
            .map(|item| item.title.trim())
            .filter(|title| !title.is_empty())
            .collect();

        if titles.is_empty() {
            debug!("Empty history, skipping festival composition");
            return FestivalPlan::without_history();
        }

        info!("Composing {} festival from {} titles", mood, titles.len());

        let prompt = format!(
            "{} for these movies: {}. Select exactly 4 movies that create a meaningful journey.",
            mood.brief(),
            titles.join(", ")
        );

        match self.model.chat(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let plan = parse_festival_plan(&clean_festival_reply(&reply));
                if plan.viewing_order.len() < MAX_ENTRIES {
                    warn!(
                        "Festival '{}' has only {} entries",
                        plan.name,
                        plan.viewing_order.len()
                    );
                }
                plan
            }
            Err(e) => {
                error!("Festival composition failed: {}", e);
                FestivalPlan::failed(e)
            }
        }
    }
}

/// Clean a raw festival reply.
///
/// ## Algorithm
/// 1. Remove reasoning blocks
/// 2. Drop lines opening with conversational filler
/// 3. Remove emphasis markers and trim every line
/// 4. Collapse three or more line breaks into one blank line
pub fn clean_festival_reply(reply: &str) -> String {
    let without_reasoning = strip_reasoning(reply);

    let lines: Vec<String> = without_reasoning
        .lines()
        .filter(|line| {
            let line = line.trim_start();
            !FILLER_OPENERS.iter().any(|opener| line.starts_with(opener))
        })
        .map(strip_emphasis)
        .collect();

    EXCESS_BLANK_LINES
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

/// Parse cleaned text into a plan.
///
/// ## Algorithm
/// 1. Skip anything before the `Festival Name:` line
/// 2. Start the viewing order at the `Viewing Order:` line
/// 3. Split the rest at the `Description:` line into name and description
/// 4. Without a `Viewing Order:` label, fall back to blank-line sections
pub fn parse_festival_plan(cleaned: &str) -> FestivalPlan {
    let (name, description, order) = split_sections(cleaned);

    let name = strip_label(&name, NAME_LABEL)
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
        .to_string();

    let description = strip_label(&description, DESCRIPTION_LABEL)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    FestivalPlan {
        name,
        description,
        viewing_order: parse_viewing_order(&order),
    }
}

fn split_sections(cleaned: &str) -> (String, String, String) {
    let lines: Vec<&str> = cleaned.lines().collect();
    let find = |label: &str| lines.iter().position(|line| has_label(line, label));

    let start = find(NAME_LABEL).unwrap_or(0);
    let order_at = match find(ORDER_LABEL) {
        Some(idx) if idx >= start => idx,
        _ => return split_on_blank_lines(&lines[start..].join("\n")),
    };

    let head: Vec<&str> = lines[start..order_at]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    let order = lines[order_at..].join("\n");

    let named = has_label(lines[start], NAME_LABEL);
    let desc_at = head.iter().position(|line| has_label(line, DESCRIPTION_LABEL));

    let (name, description) = match desc_at {
        // A name label may carry its value on the following line
        Some(desc_at) if named => {
            (head[..desc_at].join(" "), head[desc_at..].join("\n"))
        }
        Some(desc_at) => (
            head[..desc_at].last().copied().unwrap_or_default().to_string(),
            head[desc_at..].join("\n"),
        ),
        None => match head.split_first() {
            Some((name, rest)) => (name.to_string(), rest.join("\n")),
            None => (String::new(), String::new()),
        },
    };

    (name, description, order)
}

fn split_on_blank_lines(text: &str) -> (String, String, String) {
    let sections: Vec<&str> = text.splitn(3, "\n\n").collect();
    if let [name, description, order] = sections.as_slice() {
        return (name.to_string(), description.to_string(), order.to_string());
    }

    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let name = lines.next().unwrap_or_default().to_string();
    let description = lines.collect::<Vec<_>>().join("\n");

    (name, description, String::new())
}

fn parse_viewing_order(block: &str) -> Vec<FestivalEntry> {
    block
        .lines()
        .map(|line| strip_label(line.trim(), ORDER_LABEL).trim())
        .filter(|line| !line.is_empty())
        .filter_map(parse_entry)
        .take(MAX_ENTRIES)
        .collect()
}

/// `N. title - description`, `N) title`, or a bare line used as the title.
fn parse_entry(line: &str) -> Option<FestivalEntry> {
    let rest = match NUMBERED_LINE.find(line) {
        Some(numbering) => &line[numbering.end()..],
        None => line,
    };

    let (title, description) = match rest.split_once(" - ") {
        Some((title, description)) => (title.trim(), description.trim()),
        None => (rest.trim(), ""),
    };

    if title.is_empty() {
        return None;
    }

    Some(FestivalEntry {
        title: title.to_string(),
        description: description.to_string(),
    })
}

fn has_label(line: &str, label: &str) -> bool {
    line.trim_start()
        .get(..label.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(label))
}

/// Remove a case-insensitive leading label such as `Description:`.
fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    if has_label(text, label) {
        &text.trim_start()[label.len()..]
    } else {
        text
    }
}
