pub mod database;
pub mod encode;
pub mod env;

pub use database::{connect, MongoSettings};
