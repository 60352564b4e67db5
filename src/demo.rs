//! The example operation sequence: schema setup, basic CRUD, and a
//! transactional trade between two players.

use tracing::info;

use crate::db::{NewPlayer, PlayerStore, TradeOutcome};
use crate::error::QuickstartError;

/// Players inserted by the bulk step.
const BULK_PLAYERS: usize = 200;
/// Rows per insert batch.
const BULK_BATCH_SIZE: usize = 50;

/// Run the whole demo against an open session.
///
/// The table is created up front and dropped again on both the success and
/// the failure path; an error from the examples takes precedence over one
/// from the cleanup.
pub async fn run(store: &PlayerStore) -> Result<(), QuickstartError> {
    store.init_schema().await?;

    let outcome = examples(store).await;
    let cleanup = store.drop_schema().await;

    outcome.and(cleanup)
}

async fn examples(store: &PlayerStore) -> Result<(), QuickstartError> {
    simple_example(store).await?;
    trade_example(store).await
}

async fn simple_example(store: &PlayerStore) -> Result<(), QuickstartError> {
    info!("running simple example");

    // create a player who has a coin and a goods, and read it back
    let test_id = store.create(&NewPlayer::new("test", 1, 1)).await?;
    let player = store.get_by_id(test_id).await?;
    println!("{player}");

    // insert 200 players, 50 per batch
    let bulk: Vec<NewPlayer> = (0..BULK_PLAYERS)
        .map(|i| NewPlayer::new(format!("player_{i}"), 10_000, 100))
        .collect();
    store.bulk_create(bulk, BULK_BATCH_SIZE).await?;

    println!("number of players: {}", store.count().await?);

    for player in store.list_first(3).await? {
        println!("{player}");
    }

    // update a single field on the first player, then retire one bulk row
    store.set_coins(test_id, 50).await?;
    println!("{}", store.get_by_id(test_id).await?);

    let retired = store.get_by_name("player_0").await?;
    store.delete(retired.id).await?;
    println!("number of players: {}", store.count().await?);

    Ok(())
}

async fn trade_example(store: &PlayerStore) -> Result<(), QuickstartError> {
    info!("running trade example");

    let buyer_id = store.create(&NewPlayer::new("buyer", 100, 0)).await?;
    let seller_id = store.create(&NewPlayer::new("seller", 0, 100)).await?;

    // 10 goods for 500 coins is more than the buyer holds; nothing moves
    println!("============== trade 1 start =================");
    report(store.trade(buyer_id, seller_id, 10, 500).await?);
    println!("============== trade 1 end ===================");

    // at 100 coins the trade goes through
    println!("============== trade 2 start =================");
    report(store.trade(buyer_id, seller_id, 10, 100).await?);
    println!("============== trade 2 end ===================");

    for player in store.list_by_ids(&[buyer_id, seller_id]).await? {
        println!("{player}");
    }

    Ok(())
}

fn report(outcome: TradeOutcome) {
    match outcome {
        TradeOutcome::Completed => println!("trade success"),
        TradeOutcome::InsufficientCoins => println!("buyer coins not enough"),
        TradeOutcome::InsufficientGoods => println!("seller goods not enough"),
    }
}
