//! Infrastructure implementations.

pub mod database;

#[cfg(feature = "postgres")]
pub use self::database::postgres::{self, Postgres};
pub use self::database::Database;
