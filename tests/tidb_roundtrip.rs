//! End-to-end checks against a live TiDB/MySQL endpoint.
//!
//! Reads the same `TIDB_*` environment variables as the binary. Ignored by
//! default; run with `cargo test -- --ignored` against a disposable
//! database.

use tidb_quickstart::config::Config;
use tidb_quickstart::db::{self, NewPlayer, PlayerStore, TradeOutcome};

async fn open_store() -> PlayerStore {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env().expect("TIDB_* environment not configured");
    let pool = db::connect(&cfg).await.expect("connection failed");
    PlayerStore::new(pool)
}

#[tokio::test]
#[ignore = "requires a reachable TiDB/MySQL endpoint"]
async fn crud_and_trade_sequence() {
    let store = open_store().await;
    store.init_schema().await.expect("schema init failed");

    // insert-then-query round trip preserves field values
    let id = store
        .create(&NewPlayer::new("roundtrip", 7, 3))
        .await
        .expect("insert failed");
    let player = store.get_by_id(id).await.expect("query failed");
    assert_eq!(player.name, "roundtrip");
    assert_eq!(player.coins, 7);
    assert_eq!(player.goods, 3);

    // a single-field update is visible on the next read
    store.set_coins(id, 42).await.expect("update failed");
    assert_eq!(store.get_by_id(id).await.expect("query failed").coins, 42);

    // a deleted player is gone
    assert_eq!(store.delete(id).await.expect("delete failed"), 1);
    assert!(
        store
            .find_by_name("roundtrip")
            .await
            .expect("query failed")
            .is_none()
    );

    // a refused trade leaves both balances untouched
    let buyer_id = store
        .create(&NewPlayer::new("buyer", 100, 0))
        .await
        .expect("insert failed");
    let seller_id = store
        .create(&NewPlayer::new("seller", 0, 100))
        .await
        .expect("insert failed");

    let refused = store
        .trade(buyer_id, seller_id, 10, 500)
        .await
        .expect("trade failed");
    assert_eq!(refused, TradeOutcome::InsufficientCoins);
    assert_eq!(store.get_by_id(buyer_id).await.expect("query failed").coins, 100);
    assert_eq!(store.get_by_id(seller_id).await.expect("query failed").goods, 100);

    // a completed trade moves exactly amount goods against price coins
    let completed = store
        .trade(buyer_id, seller_id, 10, 100)
        .await
        .expect("trade failed");
    assert_eq!(completed, TradeOutcome::Completed);
    let buyer = store.get_by_id(buyer_id).await.expect("query failed");
    let seller = store.get_by_id(seller_id).await.expect("query failed");
    assert_eq!((buyer.coins, buyer.goods), (0, 10));
    assert_eq!((seller.coins, seller.goods), (100, 90));

    store.drop_schema().await.expect("cleanup failed");
    store.pool().close().await;
}
