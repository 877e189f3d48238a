use anyhow::{Context, Result};
use mongodb::{Client, Database};

use crate::models::user::CreateUserRequest;

/// Administrative interface of the document database.
///
/// `select_database` only switches context; every round-trip happens in
/// `create_user`, and any failure there is reported as a single opaque error.
#[allow(async_fn_in_trait)]
pub trait UserAdmin {
    type Context;

    fn select_database(&self, name: &str) -> Self::Context;

    async fn create_user(&self, context: &Self::Context, request: &CreateUserRequest)
        -> Result<()>;
}

pub struct MongoAdmin {
    client: Client,
}

impl MongoAdmin {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl UserAdmin for MongoAdmin {
    type Context = Database;

    fn select_database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    async fn create_user(&self, db: &Database, request: &CreateUserRequest) -> Result<()> {
        let command = request
            .to_command()
            .context("Failed to encode createUser command")?;
        db.run_command(command).await?;
        Ok(())
    }
}
