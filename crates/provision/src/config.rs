use medidata_db::env::{self, var_or};
use std::fmt;

pub const DEFAULT_APP_DB: &str = "donnees_medicales";
pub const DEFAULT_APP_USER: &str = "appuser";
pub const DEFAULT_APP_PASSWORD: &str = "change-me-app!";
pub const DEFAULT_READ_USER: &str = "readonly";
pub const DEFAULT_READ_PASSWORD: &str = "change-me-read!";
pub const DEFAULT_BACKUP_USER: &str = "backup";
pub const DEFAULT_BACKUP_PASSWORD: &str = "change-me-backup!";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Accounts to provision, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub db_name: String,
    pub app: Credentials,
    pub read: Credentials,
    pub backup: Credentials,
}

impl ProvisionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env::lookup)
    }

    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = |user_key: &str, user: &str, pwd_key: &str, pwd: &str| Credentials {
            username: var_or(&lookup, user_key, user),
            password: var_or(&lookup, pwd_key, pwd),
        };

        Self {
            db_name: var_or(&lookup, "MONGO_APP_DB", DEFAULT_APP_DB),
            app: credentials(
                "MONGO_APPUSER",
                DEFAULT_APP_USER,
                "MONGO_APPUSER_PWD",
                DEFAULT_APP_PASSWORD,
            ),
            read: credentials(
                "MONGO_READUSER",
                DEFAULT_READ_USER,
                "MONGO_READUSER_PWD",
                DEFAULT_READ_PASSWORD,
            ),
            backup: credentials(
                "MONGO_BACKUPUSER",
                DEFAULT_BACKUP_USER,
                "MONGO_BACKUPUSER_PWD",
                DEFAULT_BACKUP_PASSWORD,
            ),
        }
    }

    /// Usernames still carrying the shipped placeholder password.
    pub fn default_password_users(&self) -> Vec<&str> {
        [
            (&self.app, DEFAULT_APP_PASSWORD),
            (&self.read, DEFAULT_READ_PASSWORD),
            (&self.backup, DEFAULT_BACKUP_PASSWORD),
        ]
        .into_iter()
        .filter(|(credentials, default)| credentials.password == *default)
        .map(|(credentials, _)| credentials.username.as_str())
        .collect()
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
