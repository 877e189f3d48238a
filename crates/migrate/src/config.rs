use medidata_db::env::{self, var_or};
use std::path::PathBuf;

pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Migration settings from `CSV_*` and `MONGO_*` variables; flags are applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    /// Read-only seed copy shipped with the image
    pub csv_source: PathBuf,
    /// Working copy the migration reads
    pub csv_path: PathBuf,
    pub db_name: String,
    pub collection: String,
    pub batch_size: usize,
    pub required_columns: Vec<String>,
    pub strict_id: bool,
}

impl MigrateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env::lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            csv_source: var_or(&lookup, "CSV_SOURCE", "/seed/healthcare_dataset.csv").into(),
            csv_path: var_or(&lookup, "CSV_PATH", "/migration_data/healthcare_dataset.csv").into(),
            db_name: var_or(&lookup, "MONGO_DB", "donnees_medicales"),
            collection: var_or(&lookup, "MONGO_COLLECTION", "patients"),
            batch_size: DEFAULT_BATCH_SIZE,
            required_columns: default_required_columns(),
            strict_id: false,
        }
    }
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

pub fn default_required_columns() -> Vec<String> {
    vec!["Name".to_string(), "Age".to_string(), "Gender".to_string()]
}
