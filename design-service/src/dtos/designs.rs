use crate::models::Design;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body for the create-or-update endpoint. Every field is optional; a
/// present `designId` selects the update branch.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveDesignRequest {
    pub design_id: Option<String>,
    pub name: Option<String>,
    pub canvas_data: Option<Value>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub category: Option<String>,
}

/// Body for the AI regeneration endpoint. `prompt` is taken as raw JSON
/// so a non-string value reaches the handler's own 400 instead of a
/// deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateDesignRequest {
    pub prompt: Option<Value>,
    pub id: Option<String>,
}

/// Wire representation of a design: camelCase fields, RFC 3339 timestamps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Design> for DesignResponse {
    fn from(design: Design) -> Self {
        Self {
            id: design.id,
            user_id: design.user_id,
            name: design.name,
            canvas_data: design.canvas_data,
            width: design.width,
            height: design.height,
            category: design.category,
            created_at: design.created_at.to_rfc3339(),
            updated_at: design.updated_at.to_rfc3339(),
        }
    }
}
