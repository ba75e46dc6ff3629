//! Engine crate for the reel-curator recommendation tool.
//!
//! This crate wires the catalog client, the generative model client and the
//! analysis components together from a single [`Config`]. Every client is
//! built once and shared behind an `Arc`.

pub mod config;
pub mod orchestrator;

pub use config::Config;
pub use orchestrator::{RecommendationOrchestrator, Recommendations};

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use analysis::{
    Commentator, FestivalComposer, FestivalEntry, FestivalPlan, RecommendationPitcher,
    TasteSummarizer,
};
use catalog::{
    CatalogClient, CatalogDetails, CatalogEntity, GenreTable, MediaKind, TmdbClient,
    format_runtime,
};
use llm_client::{ChatModel, OllamaClient};

/// Popular titles of both kinds.
#[derive(Debug, Clone, Default)]
pub struct Trending {
    pub movies: Vec<CatalogEntity>,
    pub shows: Vec<CatalogEntity>,
}

/// A title resolved through search, with its full record.
#[derive(Debug, Clone)]
pub struct TitleLookup {
    pub kind: MediaKind,
    pub details: CatalogDetails,
}

/// A viewing-order entry with its catalog record, when the title resolved.
#[derive(Debug, Clone)]
pub struct FestivalShowing {
    pub entry: FestivalEntry,
    pub found: Option<TitleLookup>,
}

impl FestivalShowing {
    pub fn runtime(&self) -> Option<u32> {
        self.found.as_ref().and_then(|found| found.details.runtime)
    }
}

/// A festival plan joined with the catalog.
#[derive(Debug, Clone)]
pub struct FestivalProgram {
    pub plan: FestivalPlan,
    /// One per viewing-order entry, same order
    pub showings: Vec<FestivalShowing>,
}

impl FestivalProgram {
    /// Sum of known runtimes in minutes; unresolved titles count as zero.
    pub fn total_runtime(&self) -> u32 {
        self.showings.iter().filter_map(FestivalShowing::runtime).sum()
    }

    /// Total runtime as "7h 49m", or `None` when no runtime is known.
    pub fn total_runtime_label(&self) -> Option<String> {
        Some(self.total_runtime())
            .filter(|minutes| *minutes > 0)
            .map(format_runtime)
    }
}

/// All components, constructed once and shared.
pub struct Engine {
    catalog: Arc<dyn CatalogClient>,
    genres: Arc<GenreTable>,
    orchestrator: RecommendationOrchestrator,
    summarizer: TasteSummarizer,
    composer: FestivalComposer,
    pitcher: RecommendationPitcher,
    commentator: Commentator,
}

impl Engine {
    /// Build the TMDB and Ollama clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = TmdbClient::new(
            config.tmdb_access_token.clone(),
            config.tmdb_api_url.clone(),
            config.request_timeout(),
        )
        .context("Failed to build TMDB client")?;

        let model = OllamaClient::new(
            config.ollama_url.clone(),
            config.llm_model.clone(),
            config.llm_timeout(),
        )
        .context("Failed to build model client")?;

        info!(
            "Engine ready (catalog {}, model {})",
            config.tmdb_api_url, config.llm_model
        );
        Ok(Self::with_clients(Arc::new(catalog), Arc::new(model), config))
    }

    /// Assemble an engine around existing clients.
    pub fn with_clients(
        catalog: Arc<dyn CatalogClient>,
        model: Arc<dyn ChatModel>,
        config: &Config,
    ) -> Self {
        let genres = Arc::new(GenreTable::standard());
        let orchestrator =
            RecommendationOrchestrator::new(catalog.clone(), genres.clone(), config.result_cap);

        Self {
            catalog,
            genres,
            orchestrator,
            summarizer: TasteSummarizer::new(model.clone())
                .with_max_items(config.taste_sample_size),
            composer: FestivalComposer::new(model.clone())
                .with_max_items(config.taste_sample_size),
            pitcher: RecommendationPitcher::new(model.clone()),
            commentator: Commentator::new(model),
        }
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    pub fn orchestrator(&self) -> &RecommendationOrchestrator {
        &self.orchestrator
    }

    pub fn summarizer(&self) -> &TasteSummarizer {
        &self.summarizer
    }

    pub fn composer(&self) -> &FestivalComposer {
        &self.composer
    }

    pub fn pitcher(&self) -> &RecommendationPitcher {
        &self.pitcher
    }

    pub fn commentator(&self) -> &Commentator {
        &self.commentator
    }

    /// Popular movies, then popular shows.
    pub async fn trending(&self) -> Result<Trending> {
        let movies = self
            .catalog
            .popular(MediaKind::Movie)
            .await
            .context("Failed to fetch popular movies")?;
        let shows = self
            .catalog
            .popular(MediaKind::Show)
            .await
            .context("Failed to fetch popular shows")?;

        debug!("Trending: {} movies, {} shows", movies.len(), shows.len());
        Ok(Trending { movies, shows })
    }

    /// Resolve a typed title to its first search hit (movies before shows)
    /// and fetch its details.
    pub async fn lookup(&self, title: &str) -> Result<Option<TitleLookup>> {
        for kind in MediaKind::ALL {
            let hits = self
                .catalog
                .search_title(title, kind)
                .await
                .with_context(|| format!("Failed to search {} '{}'", kind, title))?;
            let Some(first) = hits.into_iter().next() else {
                continue;
            };

            let details = self
                .catalog
                .details(first.id, kind)
                .await
                .with_context(|| format!("Failed to fetch details for {} {}", kind, first.id))?;
            return Ok(details.map(|details| TitleLookup { kind, details }));
        }
        Ok(None)
    }

    /// Resolve every viewing-order title through [`Engine::lookup`].
    ///
    /// A failed or empty lookup leaves that showing unresolved; the
    /// festival is still returned in full.
    pub async fn resolve_festival(&self, plan: FestivalPlan) -> FestivalProgram {
        let mut showings = Vec::with_capacity(plan.viewing_order.len());

        for entry in &plan.viewing_order {
            let found = match self.lookup(&entry.title).await {
                Ok(found) => found,
                Err(e) => {
                    warn!("Could not resolve festival title '{}': {:#}", entry.title, e);
                    None
                }
            };
            showings.push(FestivalShowing {
                entry: entry.clone(),
                found,
            });
        }

        let program = FestivalProgram { plan, showings };
        debug!(
            "Resolved festival '{}' ({} minutes)",
            program.plan.name,
            program.total_runtime()
        );
        program
    }
}
