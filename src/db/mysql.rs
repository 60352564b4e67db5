use crate::config::Config;
use crate::db::models::{NewPlayer, Player, TradeOutcome};
use crate::db::schema::{self, MYSQL_DROP, MYSQL_INIT};
use crate::error::QuickstartError;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow, MySqlSslMode};
use sqlx::{MySql, Pool, QueryBuilder, Row};
use std::fs;

pub type TidbPool = Pool<MySql>;

/// Build the connection options for the configured endpoint.
///
/// When a CA path is set, the file must be readable up front and the session
/// verifies both the server certificate and its identity against it. There
/// is no plaintext fallback for a configured-but-broken trust anchor.
pub fn connect_options(cfg: &Config) -> Result<MySqlConnectOptions, QuickstartError> {
    let mut opts = MySqlConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.db_name);

    if let Some(ca) = cfg.ca_path.as_deref() {
        fs::metadata(ca).map_err(|source| QuickstartError::CaCertificate {
            path: ca.to_path_buf(),
            source,
        })?;
        opts = opts.ssl_mode(MySqlSslMode::VerifyIdentity).ssl_ca(ca);
    }

    Ok(opts)
}

/// Open a session against the configured endpoint.
///
/// The pool is capped at a single connection: the demo is one linear
/// sequence of statements on one session.
pub async fn connect(cfg: &Config) -> Result<TidbPool, QuickstartError> {
    let opts = connect_options(cfg)?;
    MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .map_err(|source| QuickstartError::Connect {
            host: cfg.host.clone(),
            port: cfg.port,
            source,
        })
}

#[derive(Clone)]
pub struct PlayerStore {
    pool: TidbPool,
}

impl PlayerStore {
    pub fn new(pool: TidbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &TidbPool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), QuickstartError> {
        for stmt in schema::statements(MYSQL_INIT) {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Remove the demo table again.
    pub async fn drop_schema(&self) -> Result<(), QuickstartError> {
        for stmt in schema::statements(MYSQL_DROP) {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert one player. Returns the server-assigned id.
    pub async fn create(&self, player: &NewPlayer) -> Result<i64, QuickstartError> {
        let result = sqlx::query("INSERT INTO players (name, coins, goods) VALUES (?, ?, ?)")
            .bind(&player.name)
            .bind(player.coins)
            .bind(player.goods)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_id() as i64)
    }

    /// Insert players in multi-row batches, one transaction per batch.
    pub async fn bulk_create(
        &self,
        players: Vec<NewPlayer>,
        batch_size: usize,
    ) -> Result<(), QuickstartError> {
        for chunk in players.chunks(batch_size.max(1)) {
            let mut tx = self.pool.begin().await?;
            let mut qb: QueryBuilder<MySql> =
                QueryBuilder::new("INSERT INTO players (name, coins, goods) ");
            qb.push_values(chunk, |mut row, player| {
                row.push_bind(player.name.as_str())
                    .push_bind(player.coins)
                    .push_bind(player.goods);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Player, QuickstartError> {
        let row = sqlx::query(
            "SELECT id, name, coins, goods, created_at FROM players WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_model(row)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Player, QuickstartError> {
        let row = sqlx::query(
            "SELECT id, name, coins, goods, created_at FROM players WHERE name = ?",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_model(row)
    }

    /// Like [`get_by_name`](Self::get_by_name), but a missing row is `None`
    /// rather than an error.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Player>, QuickstartError> {
        let row = sqlx::query(
            "SELECT id, name, coins, goods, created_at FROM players WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn count(&self) -> Result<i64, QuickstartError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// The first `limit` players in id order.
    pub async fn list_first(&self, limit: i64) -> Result<Vec<Player>, QuickstartError> {
        let rows = sqlx::query(
            "SELECT id, name, coins, goods, created_at FROM players ORDER BY id LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Player>, QuickstartError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, name, coins, goods, created_at FROM players WHERE id IN (",
        );
        let mut args = qb.separated(", ");
        for id in ids {
            args.push_bind(*id);
        }
        qb.push(") ORDER BY id");
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn set_coins(&self, id: i64, coins: i32) -> Result<(), QuickstartError> {
        sqlx::query("UPDATE players SET coins = ? WHERE id = ?")
            .bind(coins)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a player by id. Returns the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, QuickstartError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Move `amount` goods from seller to buyer against `price` coins,
    /// atomically.
    ///
    /// Both rows are locked with `SELECT ... FOR UPDATE` before the checks,
    /// so concurrent trades against the same players serialize. A refused
    /// trade rolls back without touching either balance.
    pub async fn trade(
        &self,
        buyer_id: i64,
        seller_id: i64,
        amount: i32,
        price: i32,
    ) -> Result<TradeOutcome, QuickstartError> {
        let mut tx = self.pool.begin().await?;

        let buyer = Self::row_to_model(
            sqlx::query(
                "SELECT id, name, coins, goods, created_at FROM players WHERE id = ? FOR UPDATE",
            )
            .bind(buyer_id)
            .fetch_one(&mut *tx)
            .await?,
        )?;
        if buyer.coins < price {
            tx.rollback().await?;
            return Ok(TradeOutcome::InsufficientCoins);
        }

        let seller = Self::row_to_model(
            sqlx::query(
                "SELECT id, name, coins, goods, created_at FROM players WHERE id = ? FOR UPDATE",
            )
            .bind(seller_id)
            .fetch_one(&mut *tx)
            .await?,
        )?;
        if seller.goods < amount {
            tx.rollback().await?;
            return Ok(TradeOutcome::InsufficientGoods);
        }

        sqlx::query("UPDATE players SET coins = coins - ?, goods = goods + ? WHERE id = ?")
            .bind(price)
            .bind(amount)
            .bind(buyer_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE players SET coins = coins + ?, goods = goods - ? WHERE id = ?")
            .bind(price)
            .bind(amount)
            .bind(seller_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(TradeOutcome::Completed)
    }

    fn row_to_model(row: MySqlRow) -> Result<Player, QuickstartError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let coins: i32 = row.try_get("coins")?;
        let goods: i32 = row.try_get("goods")?;
        let created_at = row.try_get("created_at")?;

        Ok(Player {
            id,
            name,
            coins,
            goods,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(ca_path: Option<PathBuf>) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            user: "root".to_string(),
            password: String::new(),
            db_name: "test".to_string(),
            ca_path,
        }
    }

    #[test]
    fn plaintext_options_build_without_ca() {
        assert!(connect_options(&config(None)).is_ok());
    }

    #[test]
    fn missing_ca_file_is_rejected_before_connecting() {
        let cfg = config(Some(PathBuf::from("/nonexistent/ca.pem")));
        let err = connect_options(&cfg).expect_err("absent CA file must be rejected");
        assert!(matches!(err, QuickstartError::CaCertificate { .. }));
    }

    #[test]
    fn readable_ca_file_is_accepted() {
        let ca = tempfile::NamedTempFile::new().expect("failed to create temp CA file");
        let cfg = config(Some(ca.path().to_path_buf()));
        assert!(connect_options(&cfg).is_ok());
    }
}
