#![cfg(feature = "ssr")]

mod common;

use std::time::Duration;

use futures::StreamExt;
use tokio::time::timeout;

use vetrina::db::merchant_repository::MerchantSnapshot;
use vetrina::error::AppError;

const WAIT: Duration = Duration::from_secs(15);

async fn next_snapshot(
    stream: &mut futures::stream::BoxStream<'static, Result<MerchantSnapshot, AppError>>,
) -> MerchantSnapshot {
    timeout(WAIT, stream.next())
        .await
        .expect("Timed out waiting for a snapshot")
        .expect("Subscription ended unexpectedly")
        .expect("Subscription yielded an error")
}

#[tokio::test]
async fn test_watch_yields_initial_snapshot() {
    let env = common::TestEnv::start().await;

    env.merchant_repo
        .create("Pre-existing", "https://first.example")
        .await
        .unwrap();

    let mut snapshots = env.merchant_repo.watch().await.unwrap();
    let initial = next_snapshot(&mut snapshots).await;

    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].name, "Pre-existing");
}

#[tokio::test]
async fn test_watch_pushes_snapshot_after_insert() {
    let env = common::TestEnv::start().await;

    env.merchant_repo
        .create("First", "https://first.example")
        .await
        .unwrap();

    let mut snapshots = env.merchant_repo.watch().await.unwrap();
    let initial = next_snapshot(&mut snapshots).await;
    assert_eq!(initial.len(), 1);

    env.merchant_repo
        .create("Second", "https://second.example")
        .await
        .unwrap();

    let updated = next_snapshot(&mut snapshots).await;
    assert_eq!(updated.len(), 2);
    // Full ordered snapshot, not a delta: the new merchant leads.
    assert_eq!(updated[0].name, "Second");
    assert_eq!(updated[1].name, "First");
}

#[tokio::test]
async fn test_watch_reflects_deletes() {
    let env = common::TestEnv::start().await;

    let merchant = env
        .merchant_repo
        .create("Doomed", "https://doomed.example")
        .await
        .unwrap();

    let mut snapshots = env.merchant_repo.watch().await.unwrap();
    let initial = next_snapshot(&mut snapshots).await;
    assert_eq!(initial.len(), 1);

    env.merchant_repo
        .delete(&merchant.id_hex())
        .await
        .unwrap();

    let updated = next_snapshot(&mut snapshots).await;
    assert!(updated.is_empty());
}

#[tokio::test]
async fn test_stream_endpoint_requires_session() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/v1/merchants/stream").await;
    response.assert_status_unauthorized();
}
