pub mod config;
pub mod dataset;
pub mod migration;
pub mod retry;
pub mod seed;
pub mod sink;

pub use config::MigrateConfig;
pub use dataset::{
    format_batch, format_row, load_csv, make_batches, validate_content, validate_headers, IdCheck,
    Row,
};
pub use migration::{migrate, MigrationReport};
pub use retry::{connect_with_retry, with_retry};
pub use seed::seed_dataset;
pub use sink::{DocumentSink, MongoSink};
