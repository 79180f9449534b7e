extern crate self as kmedia;

pub mod entity;
pub mod error;
pub mod models;
pub mod prelude;
pub mod query;

pub use error::{Error, Result};

pub use kmedia_macros::DatabaseModel;
/// Derive macro to implement [`ParseFromRow`](query::parse::ParseFromRow).
pub use kmedia_macros::FromSqlxRow;

pub use chrono;
pub use sqlx;
