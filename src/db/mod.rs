//! Database module: connection setup, models, and schema for the demo.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for creating and dropping the demo table
//! - `mysql.rs`: connection options, pool setup, and the player store

pub mod models;
pub mod mysql;
pub mod schema;

pub use models::{NewPlayer, Player, TradeOutcome};
pub use mysql::{PlayerStore, TidbPool, connect, connect_options};
pub use schema::MYSQL_INIT;
