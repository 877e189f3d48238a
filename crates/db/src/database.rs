use anyhow::{Context, Result};
use bson::doc;
use mongodb::{options::ClientOptions, Client};
use std::fmt;
use std::time::Duration;

use crate::encode::encode_userinfo;
use crate::env::{self, var_opt, var_or};

pub const ADMIN_DATABASE: &str = "admin";

const DEFAULT_HOST: &str = "mongo";
const DEFAULT_PORT: &str = "27017";
const DEFAULT_TIMEOUT_MS: &str = "2000";
const REDACTED: &str = "********";

/// Where and how to reach the MongoDB server, read from `MONGO_*` variables.
#[derive(Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_source: Option<String>,
    pub server_selection_timeout: Duration,
}

impl MongoSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env::lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = var_or(&lookup, "MONGO_PORT", DEFAULT_PORT);
        let port = port
            .parse::<u16>()
            .with_context(|| format!("MONGO_PORT must be a port number, got '{}'", port))?;

        let timeout = var_or(&lookup, "MONGO_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        let timeout = timeout.parse::<u64>().with_context(|| {
            format!("MONGO_TIMEOUT_MS must be milliseconds, got '{}'", timeout)
        })?;

        Ok(Self {
            host: var_or(&lookup, "MONGO_HOST", DEFAULT_HOST),
            port,
            username: var_opt(&lookup, "MONGO_USERNAME"),
            password: var_opt(&lookup, "MONGO_PASSWORD"),
            auth_source: var_opt(&lookup, "MONGO_AUTH_SOURCE"),
            server_selection_timeout: Duration::from_millis(timeout),
        })
    }

    pub fn uri(&self) -> String {
        self.build_uri(encode_userinfo)
    }

    /// Connection URI safe to print or log.
    pub fn redacted_uri(&self) -> String {
        self.build_uri(|_| REDACTED.to_string())
    }

    fn build_uri(&self, password: impl Fn(&str) -> String) -> String {
        let credentials = match (&self.username, &self.password) {
            (Some(username), Some(pass)) => {
                format!("{}:{}@", encode_userinfo(username), password(pass))
            }
            _ => String::new(),
        };

        match &self.auth_source {
            Some(source) => format!(
                "mongodb://{}{}:{}/?authSource={}",
                credentials,
                self.host,
                self.port,
                encode_userinfo(source)
            ),
            None => format!("mongodb://{}{}:{}", credentials, self.host, self.port),
        }
    }
}

impl fmt::Debug for MongoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("auth_source", &self.auth_source)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .finish()
    }
}

/// Builds a client and pings the admin database once.
pub async fn connect(settings: &MongoSettings, app_name: &str) -> Result<Client> {
    let mut options = ClientOptions::parse(settings.uri().as_str())
        .await
        .with_context(|| format!("Invalid MongoDB URI {}", settings.redacted_uri()))?;
    options.server_selection_timeout = Some(settings.server_selection_timeout);
    options.app_name = Some(app_name.to_string());

    let client = Client::with_options(options).context("Failed to build MongoDB client")?;

    client
        .database(ADMIN_DATABASE)
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("Failed to reach MongoDB at {}", settings.redacted_uri()))?;

    log::info!("Connected to MongoDB at {}", settings.redacted_uri());

    Ok(client)
}
