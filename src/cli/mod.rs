// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `scrape`  — walks the catalog site into a CSV file
//   2. `train`   — fits the model + vocabulary pair
//   3. `predict` — prices one title + rating
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, ScrapeArgs, TrainArgs};

use crate::domain::error::PredictorError;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "book-price-predictor",
    version = "0.1.0",
    about = "Scrape a book catalog, train a price model, then predict prices."
)]
pub struct Cli {
    /// The subcommand to run (scrape, train, or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Scrape(args)  => Self::run_scrape(args),
            Commands::Train(args)   => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
        }
    }

    /// Handles the `scrape` subcommand.
    fn run_scrape(args: ScrapeArgs) -> Result<()> {
        use crate::application::scrape_use_case::ScrapeUseCase;

        let output = args.output.clone();
        let count  = ScrapeUseCase::new(args.into()).execute()?;

        if count == 0 {
            println!("No records extracted — nothing written.");
        } else {
            println!("{count} records saved to '{output}'.");
        }
        Ok(())
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on catalog: {}", args.catalog);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Artifacts saved.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    /// Loads the trained pair and prints the predicted price.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;
        use crate::domain::record::RawRecord;
        use crate::domain::traits::PricePredictor;

        // Rating input is normalized here, never rejected
        let record = RawRecord::from_input(args.title, &args.rating);

        // "Not trained yet" is an expected condition for the end
        // user — answer with guidance, not an error trace.
        let use_case = match PredictUseCase::new(&args.artifacts_dir) {
            Ok(use_case) => use_case,
            Err(PredictorError::ModelNotReady) => {
                println!("No trained model found. Run `book-price-predictor train` first.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let price = use_case.predict(&record)?;
        println!("\nPredicted price for '{}': £{:.2}", record.title, price);
        Ok(())
    }
}
