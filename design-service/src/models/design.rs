use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A persisted canvas design.
///
/// `canvas_data` is an opaque serialized scene graph: this layer stores and
/// returns it untouched. The AI regeneration path replaces it wholesale with
/// the raw model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Design {
    pub fn new(
        user_id: String,
        name: String,
        canvas_data: Option<Value>,
        width: Option<f64>,
        height: Option<f64>,
        category: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            canvas_data,
            width,
            height,
            category,
            created_at: now,
            updated_at: now,
        }
    }
}
