use anyhow::Result;
use bson::{doc, Document};
use mongodb::{Collection, Database};

/// Destination collection of a migration.
#[allow(async_fn_in_trait)]
pub trait DocumentSink {
    /// Removes every document, returning how many were deleted.
    async fn clear(&self) -> Result<u64>;

    async fn insert_batch(&self, documents: Vec<Document>) -> Result<usize>;
}

pub struct MongoSink {
    collection: Collection<Document>,
}

impl MongoSink {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection),
        }
    }
}

impl DocumentSink for MongoSink {
    async fn clear(&self) -> Result<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn insert_batch(&self, documents: Vec<Document>) -> Result<usize> {
        let result = self.collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }
}
