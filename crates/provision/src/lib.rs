pub mod admin;
pub mod config;
pub mod models;
pub mod provisioner;

pub use admin::{MongoAdmin, UserAdmin};
pub use config::{Credentials, ProvisionConfig};
pub use models::user::{CreateUserRequest, RoleGrant};
pub use provisioner::{plan, provision, ProvisionReport, ProvisionStep};
