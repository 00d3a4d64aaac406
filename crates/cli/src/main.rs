use anyhow::{Context, Result, anyhow};
use catalog::RatingsStore;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use predictor::SvdModel;
use recommender::{CollaborativeRecommender, ContentRecommender, Recommend, global_top_titles};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// RecordMender - movie recommendations from three favorites
#[derive(Parser)]
#[command(name = "record-mender")]
#[command(about = "Movie recommendation engine using collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the directory holding movies.csv and ratings.csv
    #[arg(short, long, default_value = "resources/data")]
    data_dir: PathBuf,

    /// Path to the exported rating prediction model
    #[arg(short, long, default_value = "resources/models/svd.json")]
    model_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Strategy {
    #[default]
    Collaborative,
    Content,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies from three seed titles
    Recommend {
        /// A favorite movie, by exact catalog title. Pass three times.
        #[arg(long, num_args = 1, action = clap::ArgAction::Append)]
        seed: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        top_n: usize,

        /// Which algorithm to run
        #[arg(long, value_enum, default_value_t = Strategy::Collaborative)]
        strategy: Strategy,
    },

    /// Search catalog titles by substring
    Search {
        /// Title fragment to search for (case-insensitive)
        #[arg(long)]
        title: String,
    },

    /// Show the most-watched titles by mean rating
    Popular {
        /// Number of titles to show
        #[arg(long, default_value = "10")]
        top_n: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let store = Arc::new(
        RatingsStore::load_from_files(&cli.data_dir).context("Failed to load ratings catalog")?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            seed,
            top_n,
            strategy,
        } => handle_recommend(store, &cli.model_path, seed, top_n, strategy),
        Commands::Search { title } => handle_search(&store, &title),
        Commands::Popular { top_n } => handle_popular(&store, top_n),
    }
}

fn handle_recommend(
    store: Arc<RatingsStore>,
    model_path: &PathBuf,
    seeds: Vec<String>,
    top_n: usize,
    strategy: Strategy,
) -> Result<()> {
    let seeds: [String; 3] = seeds
        .try_into()
        .map_err(|given: Vec<String>| anyhow!("expected exactly 3 --seed titles, got {}", given.len()))?;
    if top_n == 0 {
        return Err(anyhow!("--top-n must be at least 1"));
    }

    let recommender: Box<dyn Recommend> = match strategy {
        Strategy::Collaborative => {
            let model = SvdModel::load(model_path)
                .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
            Box::new(CollaborativeRecommender::new(store, Arc::new(model)))
        }
        Strategy::Content => Box::new(ContentRecommender::new(store)),
    };

    let start = Instant::now();
    let recommendations = recommender.recommend(&seeds, top_n)?;
    let elapsed = start.elapsed();

    println!("{}", "Recommended movies:".bold().blue());
    for (rank, title) in recommendations.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), title);
    }
    println!("Computed in {:?}", elapsed);
    Ok(())
}

fn handle_search(store: &RatingsStore, title: &str) -> Result<()> {
    let needle = title.to_lowercase();
    let mut matches: Vec<(&str, f32, usize)> = store
        .movies()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .map(|movie| {
            let ratings = store.ratings_for_movie(movie.id);
            let mean = store.mean_rating(movie.id).unwrap_or(0.0);
            (movie.title.as_str(), mean, ratings.len())
        })
        .collect();
    matches.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    if matches.is_empty() {
        println!("No titles match '{}'", title);
        return Ok(());
    }
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (matched, mean, count) in matches.iter().take(20) {
        println!("  {} avg {:.2} ({} ratings)", matched, mean, count);
    }
    Ok(())
}

fn handle_popular(store: &RatingsStore, top_n: usize) -> Result<()> {
    let titles = global_top_titles(store, top_n);
    if titles.is_empty() {
        return Err(anyhow!("catalog has no ratings"));
    }
    println!("{}", "Most popular titles:".bold().blue());
    for (rank, title) in titles.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), title);
    }
    Ok(())
}
