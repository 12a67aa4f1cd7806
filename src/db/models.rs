use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listed merchant stored in the `merchants` collection.
///
/// `created_at` is assigned by the server at creation time and never touched
/// by edits. Legacy documents may lack it entirely; they sort as the oldest
/// entries. `enabled` controls public visibility without deleting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Display name shown on the public card and the admin row.
    pub name: String,
    /// Outbound link the public card points at.
    pub link: String,
    /// Whether the merchant is visible on the public page.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Creation timestamp, set once at creation. Millisecond precision.
    #[serde(
        default,
        with = "bson_datetime_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_enabled() -> bool {
    true
}

/// `created_at` must land in BSON as a real date, never a string: the
/// repository sorts on it, and string-rendered timestamps with trimmed
/// fractional-second widths do not sort chronologically.
mod bson_datetime_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(bson::DateTime::from_chrono).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<bson::DateTime>::deserialize(deserializer)?.map(bson::DateTime::to_chrono))
    }
}

impl Merchant {
    /// The document id as a hex string, or empty for an unsaved merchant.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}
