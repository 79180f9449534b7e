pub mod db;
pub mod query;
pub mod schema;

pub use query::{parse_create_table, parse_schema};
