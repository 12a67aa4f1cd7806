use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Site-wide settings stored in MongoDB as a singleton document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Settings document key (always "global").
    pub key: String,
    /// Destination applied to every dynamic contact link on the site.
    #[serde(default)]
    pub contact_link: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            key: "global".to_string(),
            contact_link: String::new(),
        }
    }
}

/// Repository trait for the global settings singleton.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get the global settings. An absent document yields the default.
    async fn get_settings(&self) -> Result<GlobalSettings, AppError>;

    /// Update the contact link, creating the document on first save.
    async fn set_contact_link(&self, link: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the SettingsRepository.
#[cfg(feature = "ssr")]
pub struct MongoSettingsRepository {
    collection: mongodb::Collection<GlobalSettings>,
}

#[cfg(feature = "ssr")]
impl MongoSettingsRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("settings"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    async fn get_settings(&self) -> Result<GlobalSettings, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .find_one(doc! { "key": "global" })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.unwrap_or_default())
    }

    async fn set_contact_link(&self, link: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::UpdateOptions;

        // Merge-write: only the link field is set, the document is created
        // implicitly on first save.
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(
                doc! { "key": "global" },
                doc! { "$set": { "key": "global", "contact_link": link } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
