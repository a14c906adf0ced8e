// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `scrape`, `train`, `predict`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, u64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::scrape_use_case::ScrapeConfig;
use crate::application::train_use_case::TrainConfig;
use crate::data::scraper::DEFAULT_BASE_URL;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the book catalog into a CSV file
    Scrape(ScrapeArgs),

    /// Train the price model on the scraped catalog
    Train(TrainArgs),

    /// Predict a price from a title and rating
    Predict(PredictArgs),
}

/// All arguments for the `scrape` command
#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Base URL of the paginated catalog
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where to write the catalog CSV
    #[arg(long, default_value = "data/catalog.csv")]
    pub output: String,
}

impl From<ScrapeArgs> for ScrapeConfig {
    fn from(a: ScrapeArgs) -> Self {
        ScrapeConfig {
            base_url:    a.base_url,
            output_path: a.output,
        }
    }
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Catalog CSV produced by the `scrape` command
    #[arg(long, default_value = "data/catalog.csv")]
    pub catalog: String,

    /// Directory for the trained model + vocabulary artifacts
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Maximum number of title terms kept in the vocabulary
    #[arg(long, default_value_t = 50)]
    pub max_vocabulary: usize,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Maximum depth of each tree
    #[arg(long, default_value_t = 16)]
    pub max_depth: usize,

    /// RNG seed — identical data + seed reproduces the model
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            catalog_path:   a.catalog,
            artifacts_dir:  a.artifacts_dir,
            max_vocabulary: a.max_vocabulary,
            trees:          a.trees,
            max_depth:      a.max_depth,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The product title to price
    #[arg(long)]
    pub title: String,

    /// Star rating 0–5. Anything unparsable falls back to 3
    #[arg(long, default_value = "3")]
    pub rating: String,

    /// Directory where training saved its artifacts
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,
}
