use analysis::{CommentaryKind, Mood, TasteProfile};
use anyhow::{Context, Result, bail};
use catalog::{CatalogEntity, HistoryStats, MediaKind, WatchedItem};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use engine::{Config, Engine, FestivalProgram, Recommendations};
use pipeline::FilterCriteria;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// reel-curator - movie and TV recommendations from titles you already love
#[derive(Parser)]
#[command(name = "reel-curator")]
#[command(about = "Movie and TV recommendations, taste profiles and film festivals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend titles similar to a list of seeds
    Recommend {
        /// Comma-separated seed titles, e.g. "The Matrix, Breaking Bad"
        #[arg(long)]
        seeds: Option<String>,

        /// Letterboxd ratings export (CSV) used as extra seeds
        #[arg(long)]
        history: Option<PathBuf>,

        /// Seeds taken from the history file, best rated first
        #[arg(long, default_value = "10")]
        max_seeds: usize,

        /// Genre to keep; repeat for several (any one matches)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Earliest release year
        #[arg(long = "from", default_value = "1990")]
        from_year: i32,

        /// Latest release year
        #[arg(long = "to", default_value = "2023")]
        to_year: i32,

        /// Minimum average vote (0-10)
        #[arg(long, default_value = "8.0")]
        min_rating: f32,

        /// Ask the model why each title fits the seeds
        #[arg(long)]
        explain: bool,
    },

    /// Summarize a watch history into a taste profile
    Taste {
        #[command(flatten)]
        source: HistorySource,
    },

    /// Compose a four-film festival from a watch history
    Festival {
        #[command(flatten)]
        source: HistorySource,

        /// Emotional direction of the program
        #[arg(long, value_enum, default_value = "balanced")]
        mood: MoodArg,
    },

    /// Show popular movies and shows
    Trending {
        /// Titles shown per kind
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// List the genre names accepted by --genre
    Genres,

    /// Critic-style commentary on a single title
    Commentary {
        /// Title to look up
        #[arg(long)]
        title: String,

        /// Focus on visual style instead of director's commentary
        #[arg(long)]
        visual: bool,
    },
}

/// Where a watch history comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct HistorySource {
    /// Letterboxd ratings export (CSV)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Comma-separated titles entered by hand
    #[arg(long)]
    titles: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MoodArg {
    Balanced,
    Uplifting,
    Thoughtful,
    Thrilling,
    Emotional,
}

impl From<MoodArg> for Mood {
    fn from(arg: MoodArg) -> Self {
        match arg {
            MoodArg::Balanced => Mood::Balanced,
            MoodArg::Uplifting => Mood::Uplifting,
            MoodArg::Thoughtful => Mood::Thoughtful,
            MoodArg::Thrilling => Mood::Thrilling,
            MoodArg::Emotional => Mood::Emotional,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Listing genres needs no credentials
    if let Commands::Genres = cli.command {
        handle_genres();
        return Ok(());
    }

    let config = Config::from_env()?;
    let engine = Engine::from_config(&config)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            seeds,
            history,
            max_seeds,
            genres,
            from_year,
            to_year,
            min_rating,
            explain,
        } => {
            let seeds = collect_seeds(seeds.as_deref(), history.as_ref(), max_seeds)?;
            let genres = validate_genres(&engine, &genres)?;
            let criteria = FilterCriteria::new(from_year, to_year, min_rating, genres)?;
            handle_recommend(&engine, &seeds, &criteria, explain).await?
        }
        Commands::Taste { source } => handle_taste(&engine, &source).await?,
        Commands::Festival { source, mood } => handle_festival(&engine, &source, mood.into()).await?,
        Commands::Trending { limit } => handle_trending(&engine, limit).await?,
        Commands::Commentary { title, visual } => handle_commentary(&engine, &title, visual).await?,
        Commands::Genres => handle_genres(),
    }

    Ok(())
}

/// Seeds typed on the command line first, then the best-rated history titles.
fn collect_seeds(
    typed: Option<&str>,
    history: Option<&PathBuf>,
    max_seeds: usize,
) -> Result<Vec<String>> {
    let mut seeds: Vec<String> = typed
        .map(catalog::parse_title_list)
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.title)
        .collect();

    if let Some(path) = history {
        let items = catalog::load_letterboxd_csv(path)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        seeds.extend(sources::seeds_from_history(&items, max_seeds));
    }

    if seeds.is_empty() {
        bail!("No seeds given: pass --seeds \"Title, Title\" or --history ratings.csv");
    }
    Ok(seeds)
}

/// Map user-typed genre names onto the table's spelling.
fn validate_genres(engine: &Engine, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| match engine.genres().canonical(name) {
            Some(canonical) => Ok(canonical.to_string()),
            None => bail!(
                "Unknown genre '{}'. Run `reel-curator genres` for the list",
                name
            ),
        })
        .collect()
}

fn load_history(source: &HistorySource) -> Result<Vec<WatchedItem>> {
    let items = match (&source.history, &source.titles) {
        (Some(path), _) => catalog::load_letterboxd_csv(path)
            .with_context(|| format!("Failed to import {}", path.display()))?,
        (None, Some(titles)) => catalog::parse_title_list(titles),
        (None, None) => Vec::new(),
    };

    let stats = HistoryStats::from_history(&items);
    println!(
        "{} {} titles, average rating {:.2}",
        "✓".green(),
        stats.total,
        stats.average_rating
    );
    Ok(items)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    engine: &Engine,
    seeds: &[String],
    criteria: &FilterCriteria,
    explain: bool,
) -> Result<()> {
    info!("Recommending from {} seeds", seeds.len());
    let start = Instant::now();

    let recommendations = engine.orchestrator().recommend(seeds, criteria).await;

    for failure in &recommendations.failures {
        println!("{} {}", "warning:".yellow().bold(), failure);
    }

    print_recommendations(engine, &recommendations);

    if explain {
        println!();
        for candidate in recommendations.results.iter() {
            let pitch = engine.pitcher().pitch(&candidate.entity.title, seeds).await;
            println!("{}", candidate.entity.title.bold());
            println!("   {}", pitch);
        }
    }

    println!("{}", format!("Done in {:.2?}", start.elapsed()).dimmed());
    Ok(())
}

/// Handle the 'taste' command
async fn handle_taste(engine: &Engine, source: &HistorySource) -> Result<()> {
    let history = load_history(source)?;
    let profile = engine.summarizer().summarize(&history).await;
    print_taste_profile(&profile);
    Ok(())
}

/// Handle the 'festival' command
async fn handle_festival(engine: &Engine, source: &HistorySource, mood: Mood) -> Result<()> {
    let history = load_history(source)?;
    let plan = engine.composer().compose(&history, mood).await;
    let program = engine.resolve_festival(plan).await;
    print_festival(&program, mood);
    Ok(())
}

/// Handle the 'trending' command
async fn handle_trending(engine: &Engine, limit: usize) -> Result<()> {
    let trending = engine.trending().await?;

    println!("{}", "Trending Movies:".bold().blue());
    print_entities(&trending.movies, limit);
    println!();
    println!("{}", "Trending Shows:".bold().blue());
    print_entities(&trending.shows, limit);
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres() {
    let table = catalog::GenreTable::standard();
    println!("{}", "Genres:".bold().blue());
    for name in table.all_names() {
        println!("{}{}", "• ".green(), name);
    }
}

/// Handle the 'commentary' command
async fn handle_commentary(engine: &Engine, title: &str, visual: bool) -> Result<()> {
    let Some(found) = engine.lookup(title).await? else {
        bail!("'{}' was not found in the catalog", title);
    };

    let entity = &found.details.entity;
    println!(
        "{} ({}) [{}]",
        entity.title.bold().blue(),
        year_label(entity),
        found.kind
    );
    if let Some(runtime) = found.details.runtime_label() {
        println!("{}Runtime: {}", "• ".cyan(), runtime);
    }
    if !found.details.genres.is_empty() {
        println!("{}Genres: {}", "• ".cyan(), found.details.genres.join(", "));
    }
    if let Some(tagline) = &found.details.tagline {
        println!("{}\"{}\"", "• ".cyan(), tagline.italic());
    }
    println!();

    let kind = if visual {
        CommentaryKind::VisualStyle
    } else {
        CommentaryKind::Director
    };
    let text = engine.commentator().comment(&entity.title, kind).await;
    println!("{}", text);
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(engine: &Engine, recommendations: &Recommendations) {
    print!("{}", "Recommendations:\n".bold().blue());

    if recommendations.results.is_empty() {
        println!(
            "No recommendations found ({} candidates, {} after filters). \
             Try widening the years, lowering the rating or dropping genres.",
            recommendations.candidate_count, recommendations.filtered_count
        );
        return;
    }

    for (i, candidate) in recommendations.results.iter().enumerate() {
        let entity = &candidate.entity;
        let genres = engine.genres().names(&entity.genre_ids).join(", ");
        let kind = match candidate.kind {
            MediaKind::Movie => "movie".normal(),
            MediaKind::Show => "show".magenta(),
        };
        println!(
            "{}. {} ({}) [{}] - Rating: {:.1}/10 - {}",
            (i + 1).to_string().green(),
            entity.title.bold(),
            year_label(entity),
            genres,
            entity.vote_average,
            kind
        );
        println!("   {}", format!("because you like {}", candidate.seed).dimmed());
        if let Some(poster) = entity.poster_url() {
            println!("   {}", poster.dimmed());
        }
    }
}

fn print_taste_profile(profile: &TasteProfile) {
    if profile.is_error() {
        println!("{}", profile.narrative.red());
        return;
    }

    println!("{}", "Your Taste Profile:".bold().blue());
    println!("{}", profile.narrative);
    if !profile.label.is_empty() {
        println!();
        println!("{}", profile.label.bold().green());
    }
}

fn print_festival(program: &FestivalProgram, mood: Mood) {
    let plan = &program.plan;
    if plan.is_error() {
        println!("{}", plan.description.red());
        return;
    }

    if !plan.name.is_empty() {
        println!("{} {}", plan.name.bold().blue(), format!("({})", mood).dimmed());
    }
    println!("{}", plan.description);

    if program.showings.is_empty() {
        return;
    }
    println!();
    println!("{}", "Viewing Order:".bold());
    for (i, showing) in program.showings.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), showing.entry.title.bold());
        if !showing.entry.description.is_empty() {
            println!("   {}", showing.entry.description.italic());
        }

        // Unresolved titles are shown bare
        let Some(found) = &showing.found else {
            continue;
        };
        if let Some(runtime) = found.details.runtime_label() {
            println!("   Runtime: {}", runtime);
        }
        if found.details.entity.vote_average > 0.0 {
            println!("   Rating: {:.1}/10", found.details.entity.vote_average);
        }
        if let Some(poster) = found.details.entity.poster_url() {
            println!("   {}", poster.dimmed());
        }
    }

    if let Some(total) = program.total_runtime_label() {
        println!();
        println!("{} {}", "Total runtime:".bold(), total);
    }
}

fn print_entities(entities: &[CatalogEntity], limit: usize) {
    for (i, entity) in entities.iter().take(limit).enumerate() {
        println!(
            "{}. {} ({}) - Rating: {:.1}/10",
            (i + 1).to_string().green(),
            entity.title,
            year_label(entity),
            entity.vote_average
        );
    }
}

fn year_label(entity: &CatalogEntity) -> String {
    entity
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
