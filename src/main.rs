mod db;
mod error;
mod export;
mod fetch;
mod parser;
mod query;
mod record;
mod sentiment;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use parser::align::{AlignMode, AlignmentReport, MismatchPolicy};
use settings::Settings;

#[derive(Parser)]
#[command(name = "review_scraper", about = "Extract product reviews from a product page into a table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a product page and export its reviews
    Scrape {
        /// Product page URL
        url: String,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Export reviews from a saved product page
    Extract {
        /// Saved HTML file
        #[arg(short, long)]
        file: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// List review bodies matching colour, size and rating prefix
    Filter {
        #[arg(long)]
        color: String,
        #[arg(long)]
        size: String,
        /// Rating prefix, e.g. "5"
        #[arg(long)]
        rating: String,
        /// Table to query (default: configured output)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Classify text as positive, negative or neutral
    Sentiment {
        /// Text to classify
        text: Option<String>,
        /// Classify every review body in this table instead
        #[arg(long, conflicts_with = "text")]
        csv: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also store records in this SQLite database
    #[arg(long)]
    db: Option<PathBuf>,
    #[arg(long, value_enum)]
    align: Option<AlignMode>,
    #[arg(long, value_enum)]
    on_mismatch: Option<MismatchPolicy>,
}

impl RunArgs {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(output) = self.output {
            settings.output = output;
        }
        if self.db.is_some() {
            settings.db_path = self.db;
        }
        if let Some(align) = self.align {
            settings.align = align;
        }
        if let Some(policy) = self.on_mismatch {
            settings.on_mismatch = policy;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Scrape { url, run } => {
            let settings = run.apply(settings);
            let html = fetch::fetch_document(&url, &settings).await?;
            println!("Fetched product page ({} bytes)", html.len());
            export_reviews(&html, &url, &settings)
        }
        Commands::Extract { file, run } => {
            let settings = run.apply(settings);
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            export_reviews(&html, &file.display().to_string(), &settings)
        }
        Commands::Filter { color, size, rating, input } => {
            let path = input.unwrap_or(settings.output);
            let records = export::read_csv(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let filter = query::ReviewFilter {
                color,
                size,
                rating_prefix: rating,
            };
            let bodies = query::filter_bodies(&records, &filter);
            println!("{}", serde_json::json!({ "review_text": bodies }));
            Ok(())
        }
        Commands::Sentiment { text, csv } => classify(text, csv.as_deref()),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Extract, align and persist one document. Nothing is written when
/// extraction fails, and the CSV is written only after the database save.
fn export_reviews(html: &str, source: &str, settings: &Settings) -> anyhow::Result<()> {
    let report = parser::process_document(html, settings.align, settings.on_mismatch)?;
    summarize(&report);

    if report.records.is_empty() {
        warn!("No reviews found in {}", source);
    }

    if let Some(db_path) = &settings.db_path {
        let conn = db::connect(db_path)?;
        db::init_schema(&conn)?;
        let saved = db::save_records(&conn, source, &report.records)?;
        println!("Saved {} reviews to {}", saved, db_path.display());
    }

    export::write_csv(&settings.output, &report.records)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    println!(
        "Wrote {} reviews to {} ({} skipped)",
        report.records.len(),
        settings.output.display(),
        report.skipped()
    );
    Ok(())
}

fn summarize(report: &AlignmentReport) {
    for issue in &report.issues {
        warn!("Skipped {}", issue);
    }
    info!(
        mode = ?report.mode,
        reviews = report.reviews,
        records = report.records.len(),
        skipped = report.skipped(),
        "Alignment finished"
    );
}

fn classify(text: Option<String>, csv: Option<&Path>) -> anyhow::Result<()> {
    let texts: Vec<String> = match (text, csv) {
        (_, Some(path)) => export::read_csv(path)
            .with_context(|| format!("Failed to load {}", path.display()))?
            .iter()
            .map(|r| r.body.clone())
            .collect(),
        (Some(text), None) => vec![text],
        (None, None) => anyhow::bail!("Provide text to classify or --csv <PATH>"),
    };

    for text in texts {
        let sentiment = sentiment::classify(&text);
        println!(
            "{}",
            serde_json::json!({ "review_text": text, "sentiment": sentiment })
        );
    }
    Ok(())
}
