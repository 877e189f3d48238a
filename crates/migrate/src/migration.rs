use anyhow::{Context, Result};

use crate::dataset::{make_batches, Row};
use crate::sink::DocumentSink;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub deleted: u64,
    pub inserted: usize,
    pub batches: usize,
}

/// Replaces the sink's contents with `rows`, one batch at a time.
pub async fn migrate<S: DocumentSink>(
    sink: &S,
    rows: &[Row],
    batch_size: usize,
) -> Result<MigrationReport> {
    let mut report = MigrationReport {
        deleted: sink.clear().await.context("Failed to clear collection")?,
        ..MigrationReport::default()
    };
    log::info!("Removed {} existing documents", report.deleted);

    for (index, batch) in make_batches(rows, batch_size).into_iter().enumerate() {
        let documents = batch.iter().map(Row::to_document).collect();
        let inserted = sink
            .insert_batch(documents)
            .await
            .with_context(|| format!("Failed to insert batch {}", index + 1))?;

        report.inserted += inserted;
        report.batches += 1;
        log::info!("{} inserted...", report.inserted);
    }

    Ok(report)
}
