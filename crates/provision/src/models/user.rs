use bson::{doc, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A role granted on one database.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: &str, db: &str) -> Self {
        Self {
            role: role.to_string(),
            db: db.to_string(),
        }
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub roles: Vec<RoleGrant>,
}

impl CreateUserRequest {
    /// The `createUser` admin command, roles kept in order.
    pub fn to_command(&self) -> bson::ser::Result<Document> {
        Ok(doc! {
            "createUser": self.username.as_str(),
            "pwd": self.password.as_str(),
            "roles": bson::to_bson(&self.roles)?,
        })
    }

    pub fn role_summary(&self) -> String {
        self.roles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"********")
            .field("roles", &self.roles)
            .finish()
    }
}
