//! Engine wiring tests against in-process catalog and model fakes.

use async_trait::async_trait;
use analysis::{FestivalEntry, FestivalPlan};
use catalog::{
    CatalogClient, CatalogDetails, CatalogEntity, CatalogError, CatalogId, MediaKind, WatchedItem,
};
use engine::{Config, Engine};
use llm_client::{ChatModel, LlmError};
use pipeline::FilterCriteria;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Fakes
// ============================================================================

/// In-memory catalog: search hits and similar lists keyed by title / id.
#[derive(Default)]
struct MemoryCatalog {
    search: HashMap<(String, MediaKind), Vec<CatalogEntity>>,
    similar: HashMap<CatalogId, Vec<CatalogEntity>>,
    details: HashMap<CatalogId, CatalogDetails>,
    popular_fails: bool,
    /// Search for this title returns a server error
    broken_title: Option<String>,
    searched: Mutex<Vec<String>>,
}

impl MemoryCatalog {
    fn with_search(mut self, title: &str, kind: MediaKind, hit: CatalogEntity) -> Self {
        self.search.insert((title.to_string(), kind), vec![hit]);
        self
    }

    fn with_details(mut self, details: CatalogDetails) -> Self {
        self.details.insert(details.entity.id, details);
        self
    }

    fn with_similar(mut self, id: CatalogId, similar: Vec<CatalogEntity>) -> Self {
        self.similar.insert(id, similar);
        self
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn search_title(&self, query: &str, kind: MediaKind) -> catalog::Result<Vec<CatalogEntity>> {
        self.searched.lock().unwrap().push(format!("{}:{}", kind, query));
        if self.broken_title.as_deref() == Some(query) {
            return Err(CatalogError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self
            .search
            .get(&(query.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }

    async fn similar_to(&self, id: CatalogId, _kind: MediaKind) -> catalog::Result<Vec<CatalogEntity>> {
        Ok(self.similar.get(&id).cloned().unwrap_or_default())
    }

    async fn details(&self, id: CatalogId, _kind: MediaKind) -> catalog::Result<Option<CatalogDetails>> {
        Ok(self.details.get(&id).cloned())
    }

    async fn popular(&self, kind: MediaKind) -> catalog::Result<Vec<CatalogEntity>> {
        if self.popular_fails {
            return Err(CatalogError::Status {
                status: 503,
                body: "maintenance".to_string(),
            });
        }
        Ok(match kind {
            MediaKind::Movie => vec![CatalogEntity::new(900, "Blockbuster", 7.2)],
            MediaKind::Show => vec![CatalogEntity::new(901, "Hit Show", 8.1)],
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Echoes the user prompt back as the second line of a taste reply.
struct EchoModel;

#[async_trait]
impl ChatModel for EchoModel {
    async fn chat(&self, _system: &str, user: &str) -> Result<String, LlmError> {
        Ok(format!("Analysis.\n{}", user))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

fn config(extra: &[(&str, &str)]) -> Config {
    let mut pairs = vec![("TMDB_ACCESS_TOKEN".to_string(), "token".to_string())];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_pairs(pairs).unwrap()
}

fn sci_fi_catalog() -> MemoryCatalog {
    MemoryCatalog::default()
        .with_search("Arrival", MediaKind::Movie, CatalogEntity::new(10, "Arrival", 7.9))
        .with_search("Dark", MediaKind::Show, CatalogEntity::new(20, "Dark", 8.4))
        .with_similar(
            10,
            vec![
                CatalogEntity::new(1, "Contact", 7.4).with_release_date("1997-07-11"),
                CatalogEntity::new(2, "Interstellar", 8.4).with_release_date("2014-11-05"),
            ],
        )
        .with_similar(
            20,
            vec![
                CatalogEntity::new(2, "Interstellar", 8.4).with_release_date("2014-11-05"),
                CatalogEntity::new(3, "Devs", 7.6).with_first_air_date("2020-03-05"),
            ],
        )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_zero_hit_seed_does_not_stop_later_seeds() {
    let catalog = Arc::new(sci_fi_catalog());
    let engine = Engine::with_clients(catalog.clone(), Arc::new(EchoModel), &config(&[]));
    let criteria = FilterCriteria::new(1990, 2023, 0.0, Vec::<String>::new()).unwrap();

    let recs = engine
        .orchestrator()
        .recommend(&["No Such Film", "Arrival", "Dark"], &criteria)
        .await;

    let ids: Vec<_> = recs.results.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert!(recs.failures.is_empty());
    assert_eq!(recs.candidate_count, 4);

    let searched = catalog.searched.lock().unwrap().clone();
    assert_eq!(
        searched,
        vec![
            "movie:No Such Film",
            "show:No Such Film",
            "movie:Arrival",
            "show:Arrival",
            "movie:Dark",
            "show:Dark",
        ]
    );
}

#[tokio::test]
async fn test_result_cap_comes_from_config() {
    let engine = Engine::with_clients(
        Arc::new(sci_fi_catalog()),
        Arc::new(EchoModel),
        &config(&[("RESULT_CAP", "1")]),
    );
    let criteria = FilterCriteria::new(1990, 2023, 0.0, Vec::<String>::new()).unwrap();

    let recs = engine.orchestrator().recommend(&["Arrival", "Dark"], &criteria).await;

    assert_eq!(recs.results.len(), 1);
    assert_eq!(recs.results[0].id(), 2);
}

#[tokio::test]
async fn test_taste_sample_size_comes_from_config() {
    let engine = Engine::with_clients(
        Arc::new(MemoryCatalog::default()),
        Arc::new(EchoModel),
        &config(&[("TASTE_SAMPLE_SIZE", "1")]),
    );
    let history = vec![
        WatchedItem::titled("Okja").with_rating(2.0),
        WatchedItem::titled("Mother").with_rating(5.0),
    ];

    let profile = engine.summarizer().summarize(&history).await;

    // The echoed prompt becomes the label and only names the top title
    assert!(profile.label.contains("Mother"));
    assert!(!profile.label.contains("Okja"));
}

#[tokio::test]
async fn test_trending_lists_both_kinds() {
    let engine = Engine::with_clients(
        Arc::new(MemoryCatalog::default()),
        Arc::new(EchoModel),
        &config(&[]),
    );

    let trending = engine.trending().await.unwrap();

    assert_eq!(trending.movies[0].title, "Blockbuster");
    assert_eq!(trending.shows[0].title, "Hit Show");
}

#[tokio::test]
async fn test_trending_failure_has_context() {
    let catalog = MemoryCatalog {
        popular_fails: true,
        ..MemoryCatalog::default()
    };
    let engine = Engine::with_clients(Arc::new(catalog), Arc::new(EchoModel), &config(&[]));

    let err = engine.trending().await.unwrap_err();
    assert!(err.to_string().contains("popular movies"));
}

#[tokio::test]
async fn test_lookup_prefers_movies() {
    let mut catalog = sci_fi_catalog();
    catalog.details.insert(
        10,
        CatalogDetails {
            entity: CatalogEntity::new(10, "Arrival", 7.9),
            runtime: Some(116),
            genres: vec!["Drama".to_string(), "Science Fiction".to_string()],
            tagline: None,
        },
    );
    let engine = Engine::with_clients(Arc::new(catalog), Arc::new(EchoModel), &config(&[]));

    let found = engine.lookup("Arrival").await.unwrap().unwrap();
    assert_eq!(found.kind, MediaKind::Movie);
    assert_eq!(found.details.runtime_label().as_deref(), Some("1h 56m"));

    // "Dark" only exists as a show, and has no detail record
    assert!(engine.lookup("Dark").await.unwrap().is_none());
    assert!(engine.lookup("Missing").await.unwrap().is_none());
}

fn entry(title: &str) -> FestivalEntry {
    FestivalEntry {
        title: title.to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn test_festival_titles_resolve_with_runtime_total() {
    let catalog = MemoryCatalog::default()
        .with_search("Heat", MediaKind::Movie, CatalogEntity::new(1, "Heat", 8.3))
        .with_search("Thief", MediaKind::Movie, CatalogEntity::new(2, "Thief", 7.4))
        .with_search("Broken", MediaKind::Movie, CatalogEntity::new(3, "Broken", 6.0))
        .with_details(CatalogDetails {
            entity: CatalogEntity::new(1, "Heat", 8.3),
            runtime: Some(170),
            genres: vec!["Crime".to_string()],
            tagline: None,
        })
        .with_details(CatalogDetails {
            entity: CatalogEntity::new(2, "Thief", 7.4),
            runtime: Some(123),
            genres: Vec::new(),
            tagline: None,
        });
    let catalog = MemoryCatalog {
        broken_title: Some("Broken".to_string()),
        ..catalog
    };
    let engine = Engine::with_clients(Arc::new(catalog), Arc::new(EchoModel), &config(&[]));

    let plan = FestivalPlan {
        name: "Night Shift".to_string(),
        description: "Crews at work.".to_string(),
        viewing_order: vec![entry("Heat"), entry("Nowhere"), entry("Thief"), entry("Broken")],
    };
    let program = engine.resolve_festival(plan).await;

    assert_eq!(program.showings.len(), 4);
    let titles: Vec<_> = program
        .showings
        .iter()
        .map(|s| s.entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Heat", "Nowhere", "Thief", "Broken"]);

    let heat = program.showings[0].found.as_ref().unwrap();
    assert_eq!(heat.details.runtime_label().as_deref(), Some("2h 50m"));
    assert_eq!(heat.details.entity.vote_average, 8.3);

    // Missing and failing lookups fall back to the bare title
    assert!(program.showings[1].found.is_none());
    assert!(program.showings[3].found.is_none());

    assert_eq!(program.total_runtime(), 293);
    assert_eq!(program.total_runtime_label().as_deref(), Some("4h 53m"));
}

#[tokio::test]
async fn test_festival_without_runtimes_has_no_total() {
    let engine = Engine::with_clients(
        Arc::new(MemoryCatalog::default()),
        Arc::new(EchoModel),
        &config(&[]),
    );
    let plan = FestivalPlan {
        viewing_order: vec![entry("Unknown")],
        ..FestivalPlan::default()
    };

    let program = engine.resolve_festival(plan).await;

    assert_eq!(program.total_runtime(), 0);
    assert!(program.total_runtime_label().is_none());
}

#[test]
fn test_from_config_builds_without_network() {
    assert!(Engine::from_config(&config(&[])).is_ok());
}
