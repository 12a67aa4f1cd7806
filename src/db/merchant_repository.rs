use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::db::models::Merchant;
use crate::error::AppError;

/// One full result set delivered by the live subscription at a point in time.
pub type MerchantSnapshot = Vec<Merchant>;

/// Repository trait for merchant operations.
///
/// This trait allows mocking the database layer in tests. All listing
/// operations return merchants ordered by creation timestamp, newest first;
/// a document without a timestamp sorts as the oldest entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MerchantRepository: Send + Sync {
    /// Create a new merchant with `enabled = true` and a server-assigned
    /// creation timestamp. Returns the stored document including its id.
    async fn create(&self, name: &str, link: &str) -> Result<Merchant, AppError>;

    /// Update only the name and link of an existing merchant.
    ///
    /// The creation timestamp and enabled flag are never written here.
    async fn update_details(&self, id: &str, name: &str, link: &str) -> Result<(), AppError>;

    /// Flip the public-visibility flag of a merchant.
    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), AppError>;

    /// Delete a merchant document.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// List every merchant, newest first.
    async fn list_all(&self) -> Result<Vec<Merchant>, AppError>;

    /// List only publicly visible merchants, newest first.
    async fn list_enabled(&self) -> Result<Vec<Merchant>, AppError>;

    /// Open a live subscription over the collection.
    ///
    /// Yields one complete snapshot immediately, then a fresh full snapshot
    /// after every change to the collection, by any writer including this
    /// process. Snapshots replace each other wholesale; no ordering between
    /// concurrent writers is guaranteed beyond eventual consistency.
    async fn watch(&self) -> Result<BoxStream<'static, Result<MerchantSnapshot, AppError>>, AppError>;
}

/// MongoDB implementation of the MerchantRepository.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoMerchantRepository {
    collection: mongodb::Collection<Merchant>,
}

#[cfg(feature = "ssr")]
impl MongoMerchantRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("merchants"),
        }
    }

    fn parse_id(id: &str) -> Result<bson::oid::ObjectId, AppError> {
        bson::oid::ObjectId::parse_str(id)
            .map_err(|_| AppError::BadRequest(format!("Invalid merchant id: {}", id)))
    }

    async fn find_ordered(
        collection: &mongodb::Collection<Merchant>,
        filter: bson::Document,
    ) -> Result<Vec<Merchant>, AppError> {
        use mongodb::bson::doc;

        // Descending creation time. Documents missing the field compare lowest
        // in BSON order, so they land at the tail, i.e. as the oldest entries.
        let mut cursor = collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut merchants = Vec::new();
        use futures::TryStreamExt;
        while let Some(merchant) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            merchants.push(merchant);
        }

        Ok(merchants)
    }

    fn enabled_filter() -> bson::Document {
        use mongodb::bson::doc;

        // Legacy documents without the flag count as enabled.
        doc! { "enabled": { "$ne": false } }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl MerchantRepository for MongoMerchantRepository {
    async fn create(&self, name: &str, link: &str) -> Result<Merchant, AppError> {
        // BSON dates carry millisecond precision; assign at that precision so
        // the returned value matches what a later read sees.
        let mut merchant = Merchant {
            id: None,
            name: name.to_string(),
            link: link.to_string(),
            enabled: true,
            created_at: Some(bson::DateTime::now().to_chrono()),
        };

        let result = self
            .collection
            .insert_one(&merchant)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        merchant.id = result.inserted_id.as_object_id();
        Ok(merchant)
    }

    async fn update_details(&self, id: &str, name: &str, link: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        let oid = Self::parse_id(id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "name": name, "link": link } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Merchant {} not found", id)));
        }
        Ok(())
    }

    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), AppError> {
        use mongodb::bson::doc;

        let oid = Self::parse_id(id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": { "enabled": enabled } })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Merchant {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        let oid = Self::parse_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Merchant {} not found", id)));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Merchant>, AppError> {
        use mongodb::bson::doc;

        Self::find_ordered(&self.collection, doc! {}).await
    }

    async fn list_enabled(&self) -> Result<Vec<Merchant>, AppError> {
        Self::find_ordered(&self.collection, Self::enabled_filter()).await
    }

    async fn watch(&self) -> Result<BoxStream<'static, Result<MerchantSnapshot, AppError>>, AppError> {
        use futures::StreamExt;
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        // Open the change stream before reading the initial snapshot so no
        // write can fall between the two.
        let mut events = self
            .collection
            .watch()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let collection = self.collection.clone();

        let snapshots = async_stream::try_stream! {
            yield Self::find_ordered(&collection, doc! {}).await?;

            while let Some(_event) = events
                .try_next()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
            {
                yield Self::find_ordered(&collection, doc! {}).await?;
            }
        };

        Ok(snapshots.boxed())
    }
}
