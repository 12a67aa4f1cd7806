use crate::db::merchant_repository::MerchantRepository;
use crate::error::AppError;

/// Merchants inserted into an empty collection when `DEMO_MODE=true`.
const DEMO_MERCHANTS: &[(&str, &str)] = &[
    ("Acme Keys", "https://acme.example/keys"),
    ("Polar Goods", "https://polar.example/shop"),
    ("Nimbus Supply", "https://nimbus.example"),
];

/// Seed the merchant collection with demo data if it is empty.
///
/// Returns the number of merchants created; zero when data already exists.
pub async fn seed_if_empty(repo: &dyn MerchantRepository) -> Result<usize, AppError> {
    if !repo.list_all().await?.is_empty() {
        return Ok(0);
    }

    for (name, link) in DEMO_MERCHANTS {
        repo.create(name, link).await?;
    }

    tracing::info!("Seeded {} demo merchants", DEMO_MERCHANTS.len());
    Ok(DEMO_MERCHANTS.len())
}
