#![cfg(feature = "ssr")]

mod common;

use std::time::Duration;

use mongodb::bson::doc;

#[tokio::test]
async fn test_create_sets_defaults() {
    let env = common::TestEnv::start().await;

    let merchant = env
        .merchant_repo
        .create("Acme Keys", "https://acme.example/shop")
        .await
        .unwrap();

    assert!(merchant.id.is_some());
    assert!(merchant.enabled);
    assert!(merchant.created_at.is_some());
    assert_eq!(merchant.name, "Acme Keys");
    assert_eq!(merchant.link, "https://acme.example/shop");
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let env = common::TestEnv::start().await;

    for name in ["Oldest", "Middle", "Newest"] {
        env.merchant_repo
            .create(name, "https://example.com")
            .await
            .unwrap();
        // Distinct creation timestamps.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let merchants = env.merchant_repo.list_all().await.unwrap();
    let names: Vec<&str> = merchants.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_subsecond_timestamps_order_chronologically() {
    use chrono::TimeZone;
    use vetrina::db::models::Merchant;

    let env = common::TestEnv::start().await;

    // Two merchants inside the same second: one exactly on the second, one
    // 123 ms later. A string-rendered timestamp would trim the fractional
    // part of the first and sort it after the second.
    let base = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 20).unwrap();
    let collection = env.db.collection::<Merchant>("merchants");
    for (name, created_at) in [
        ("Earlier", base),
        ("Later", base + chrono::Duration::milliseconds(123)),
    ] {
        collection
            .insert_one(&Merchant {
                id: None,
                name: name.to_string(),
                link: "https://example.com".to_string(),
                enabled: true,
                created_at: Some(created_at),
            })
            .await
            .unwrap();
    }

    let merchants = env.merchant_repo.list_all().await.unwrap();
    let names: Vec<&str> = merchants.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Later", "Earlier"]);
}

#[tokio::test]
async fn test_legacy_document_without_timestamp_sorts_last() {
    let env = common::TestEnv::start().await;

    // A document written before creation timestamps existed.
    env.db
        .collection::<mongodb::bson::Document>("merchants")
        .insert_one(doc! { "name": "Legacy", "link": "https://legacy.example" })
        .await
        .unwrap();

    env.merchant_repo
        .create("Recent", "https://recent.example")
        .await
        .unwrap();

    let merchants = env.merchant_repo.list_all().await.unwrap();
    assert_eq!(merchants.len(), 2);
    assert_eq!(merchants[0].name, "Recent");
    assert_eq!(merchants[1].name, "Legacy");
    // Missing flag counts as enabled, so the legacy document is public.
    let enabled = env.merchant_repo.list_enabled().await.unwrap();
    assert_eq!(enabled.len(), 2);
}

#[tokio::test]
async fn test_update_details_preserves_timestamp_and_flag() {
    let env = common::TestEnv::start().await;

    let merchant = env
        .merchant_repo
        .create("Before", "https://before.example")
        .await
        .unwrap();
    let id = merchant.id_hex();
    let created_at = merchant.created_at;

    env.merchant_repo.set_enabled(&id, false).await.unwrap();
    env.merchant_repo
        .update_details(&id, "After", "https://after.example")
        .await
        .unwrap();

    let merchants = env.merchant_repo.list_all().await.unwrap();
    assert_eq!(merchants.len(), 1);
    assert_eq!(merchants[0].name, "After");
    assert_eq!(merchants[0].link, "https://after.example");
    assert_eq!(merchants[0].created_at, created_at);
    assert!(!merchants[0].enabled);
}

#[tokio::test]
async fn test_set_enabled_controls_public_listing() {
    let env = common::TestEnv::start().await;

    env.merchant_repo
        .create("Visible", "https://visible.example")
        .await
        .unwrap();
    let hidden = env
        .merchant_repo
        .create("Hidden", "https://hidden.example")
        .await
        .unwrap();

    env.merchant_repo
        .set_enabled(&hidden.id_hex(), false)
        .await
        .unwrap();

    let public = env.merchant_repo.list_enabled().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].name, "Visible");

    let all = env.merchant_repo.list_all().await.unwrap();
    assert_eq!(all.len(), 2);

    // Re-enabling brings it back.
    env.merchant_repo
        .set_enabled(&hidden.id_hex(), true)
        .await
        .unwrap();
    let public = env.merchant_repo.list_enabled().await.unwrap();
    assert_eq!(public.len(), 2);
}

#[tokio::test]
async fn test_delete_merchant() {
    let env = common::TestEnv::start().await;

    let merchant = env
        .merchant_repo
        .create("Ephemeral", "https://gone.example")
        .await
        .unwrap();
    let id = merchant.id_hex();

    env.merchant_repo.delete(&id).await.unwrap();
    assert!(env.merchant_repo.list_all().await.unwrap().is_empty());

    // A second delete reports not found.
    let err = env.merchant_repo.delete(&id).await.unwrap_err();
    assert!(matches!(err, vetrina::error::AppError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let env = common::TestEnv::start().await;

    let unknown = mongodb::bson::oid::ObjectId::new().to_hex();
    let err = env
        .merchant_repo
        .update_details(&unknown, "Name", "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, vetrina::error::AppError::NotFound(_)));

    let err = env
        .merchant_repo
        .set_enabled("not-an-object-id", true)
        .await
        .unwrap_err();
    assert!(matches!(err, vetrina::error::AppError::BadRequest(_)));
}
