use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A row of the `players` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub coins: i32,
    pub goods: i32,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player(name={}, coins={}, goods={})",
            self.name, self.coins, self.goods
        )
    }
}

/// The insertable subset of [`Player`]; `id` and `created_at` are assigned
/// by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub coins: i32,
    pub goods: i32,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, coins: i32, goods: i32) -> Self {
        Self {
            name: name.into(),
            coins,
            goods,
        }
    }
}

/// Result of a trade attempt. A refused trade leaves both balances untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Completed,
    InsufficientCoins,
    InsufficientGoods,
}
