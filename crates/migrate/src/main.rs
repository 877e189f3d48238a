use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use medidata_db::MongoSettings;
use medidata_migrate::retry::{CONNECT_ATTEMPTS, CONNECT_DELAY};
use medidata_migrate::{
    connect_with_retry, format_batch, load_csv, make_batches, migrate, seed_dataset,
    validate_content, validate_headers, IdCheck, MigrateConfig, MongoSink,
};
use std::path::PathBuf;

const APP_NAME: &str = "csv-migrate";

#[derive(Parser)]
#[command(name = "csv-migrate")]
#[command(about = "Load the healthcare CSV dataset into MongoDB")]
#[command(version)]
struct Cli {
    /// CSV file to import (overrides CSV_PATH)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Documents per insert batch
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    batch_size: Option<usize>,

    /// Columns the CSV header must contain, comma-separated
    #[arg(long, value_delimiter = ',')]
    required: Option<Vec<String>>,

    /// Fail when no identifier column is present
    #[arg(long)]
    strict_id: bool,

    /// Validate the dataset without connecting to MongoDB
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = MigrateConfig::from_env();
    if let Some(csv) = cli.csv {
        config.csv_path = csv;
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(required) = cli.required {
        config.required_columns = required;
    }
    config.strict_id |= cli.strict_id;

    seed_dataset(&config.csv_source, &config.csv_path)?;

    let rows = load_csv(&config.csv_path)?;
    validate_headers(&rows, &config.required_columns)?;
    if let IdCheck::Checked(column) = validate_content(&rows, config.strict_id)? {
        log::info!("Every row has a '{}' value", column);
    }
    let rows = format_batch(rows);

    if cli.dry_run {
        println!("Dry run: nothing will be written to MongoDB");
        println!("   File: {}", config.csv_path.display());
        println!("   Rows: {}", rows.len());
        println!(
            "   Batches: {} (up to {} rows each)",
            make_batches(&rows, config.batch_size).len(),
            config.batch_size
        );
        println!("   Target: {}.{}", config.db_name, config.collection);
        return Ok(());
    }

    let settings = MongoSettings::from_env()?;
    let client = connect_with_retry(&settings, APP_NAME, CONNECT_ATTEMPTS, CONNECT_DELAY).await?;
    let sink = MongoSink::new(&client.database(&config.db_name), &config.collection);
    let report = migrate(&sink, &rows, config.batch_size).await?;

    println!("✅ Migration complete: {} documents.", report.inserted);

    Ok(())
}
