use crate::dtos::{
    DataResponse, DesignResponse, GenerateDesignRequest, MessageResponse, SaveDesignRequest,
};
use crate::middleware::user_id::UserId;
use crate::models::Design;
use crate::services::providers::{ChatMessage, CompletionProvider, MessagePart};
use crate::services::DesignStore;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use service_core::error::AppError;

const NOT_FOUND_VIEW: &str = "Design not found! or you don't have permission to view it.";
const NOT_FOUND_DELETE: &str = "Design not found! or you don't have permission to delete it.";
const DEFAULT_NAME: &str = "Untitled Design";

/// Layout and style contract handed to the completion model on every
/// regeneration request.
const SYSTEM_INSTRUCTIONS: &str = r#"Always return a valid Fabric.js JSON object (no extra text, no markdown).
Preserve all existing images from design.objects.
Image placement:
 - If only one image, make it a full-width hero/cover image at the top (40-50% of canvas height).
Text placement & style:
 - Headline: large, bold, top-centered or over hero image, eye-catching.
 - Highlights: mid section, professional font, aligned left or center, use spacing.
 - Call-to-action: bold, bottom area, with contrast color background or highlight.
Visual style:
 - Use emojis for engagement (🏡 ✨ 📍 📞).
 - Maintain proportional font sizes relative to canvas width/height.
 - Ensure good contrast (dark text on light bg or light on dark).
 - Avoid overlapping text with images.
 - Use modern fonts (sans-serif, clean).
Layout:
 - Balanced spacing between text blocks.
 - Grid or aligned arrangement for multiple images.
 - Minimalist, professional, modern aesthetic."#;

pub async fn list_designs(
    State(state): State<AppState>,
    user_id: UserId,
) -> Result<impl IntoResponse, AppError> {
    let designs = state.store.list_for_user(&user_id.0).await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching designs");
        AppError::InternalError(anyhow::anyhow!("Failed to fetch designs"))
    })?;

    let designs: Vec<DesignResponse> = designs.into_iter().map(DesignResponse::from).collect();

    Ok(Json(DataResponse::new(designs)))
}

pub async fn get_design(
    State(state): State<AppState>,
    user_id: UserId,
    Path(design_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let design = state
        .store
        .find_for_user(&design_id, &user_id.0)
        .await
        .map_err(|e| {
            tracing::error!(design_id = %design_id, error = %e, "Error fetching design by ID");
            AppError::InternalError(anyhow::anyhow!("Failed to fetch design by ID"))
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!(NOT_FOUND_VIEW)))?;

    Ok(Json(DataResponse::new(DesignResponse::from(design))))
}

pub async fn save_design(
    State(state): State<AppState>,
    user_id: UserId,
    Json(req): Json<SaveDesignRequest>,
) -> Result<impl IntoResponse, AppError> {
    let save_err = |e: AppError| {
        tracing::error!(error = %e, "Error while saving design");
        AppError::InternalError(anyhow::anyhow!("Failed to save design"))
    };

    // An empty designId counts as absent and selects the create branch.
    if let Some(design_id) = req.design_id.filter(|id| !id.is_empty()) {
        let mut design = state
            .store
            .find_for_user(&design_id, &user_id.0)
            .await
            .map_err(save_err)?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!(NOT_FOUND_VIEW)))?;

        // Falsy values (empty string, 0, null, false) leave the stored
        // field untouched instead of clearing it.
        if let Some(name) = req.name.filter(|n| !n.is_empty()) {
            design.name = name;
        }
        if let Some(canvas_data) = req.canvas_data.filter(json_truthy) {
            design.canvas_data = Some(canvas_data);
        }
        if let Some(width) = req.width.filter(|w| *w != 0.0) {
            design.width = Some(width);
        }
        if let Some(height) = req.height.filter(|h| *h != 0.0) {
            design.height = Some(height);
        }
        if let Some(category) = req.category.filter(|c| !c.is_empty()) {
            design.category = Some(category);
        }

        design.updated_at = Utc::now();
        state.store.save(&design).await.map_err(save_err)?;

        Ok(Json(DataResponse::new(DesignResponse::from(design))))
    } else {
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        // Fields other than name are stored as given, zeroes included.
        let design = Design::new(
            user_id.0,
            name,
            req.canvas_data,
            req.width,
            req.height,
            req.category,
        );

        state.store.insert(&design).await.map_err(save_err)?;

        Ok(Json(DataResponse::new(DesignResponse::from(design))))
    }
}

pub async fn delete_design(
    State(state): State<AppState>,
    user_id: UserId,
    Path(design_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let delete_err = |e: AppError| {
        tracing::error!(error = %e, "Error while deleting design");
        AppError::InternalError(anyhow::anyhow!("Failed to delete design"))
    };

    state
        .store
        .find_for_user(&design_id, &user_id.0)
        .await
        .map_err(delete_err)?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!(NOT_FOUND_DELETE)))?;

    // Ownership was established by the lookup; the delete itself goes by id.
    state.store.delete_by_id(&design_id).await.map_err(delete_err)?;

    Ok(Json(MessageResponse::new("Design deleted successfully")))
}

pub async fn generate_design(
    State(state): State<AppState>,
    Json(req): Json<GenerateDesignRequest>,
) -> Result<impl IntoResponse, AppError> {
    let generate_err = |e: String| {
        tracing::error!(error = %e, "Error while generating AI response");
        AppError::InternalError(anyhow::anyhow!("Failed to generate AI response"))
    };

    // Anything other than a non-empty string is rejected here, numbers
    // and objects included.
    let prompt = match req.prompt {
        Some(Value::String(p)) if !p.is_empty() => p,
        _ => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "'prompt' is required in request body"
            )));
        }
    };

    // Intentionally no owner filter on this lookup.
    let design_id = req.id.unwrap_or_default();
    let mut design = state
        .store
        .find_by_id(&design_id)
        .await
        .map_err(|e| generate_err(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!(NOT_FOUND_VIEW)))?;

    if state.config.ai.api_key.is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "Server missing AI API key"
        )));
    }

    let serialized = serde_json::to_string(&DesignResponse::from(design.clone()))
        .map_err(|e| generate_err(e.to_string()))?;

    let messages = vec![
        ChatMessage::system(vec![MessagePart::Text {
            text: SYSTEM_INSTRUCTIONS.to_string(),
        }]),
        ChatMessage::user(vec![
            MessagePart::Text {
                text: format!("Here is the user template canvas data: {}.", serialized),
            },
            MessagePart::Text {
                text: format!(
                    "Also consider this user prompt when adjusting the template: \"{}\"",
                    prompt
                ),
            },
        ]),
    ];

    let ai_response = state
        .provider
        .complete(&messages)
        .await
        .map_err(|e| generate_err(e.to_string()))?;

    // Replace the canvas wholesale with the raw model output; the payload
    // stays opaque to this layer.
    design.canvas_data = Some(Value::String(ai_response));
    design.updated_at = Utc::now();
    state
        .store
        .save(&design)
        .await
        .map_err(|e| generate_err(e.to_string()))?;

    Ok(Json(MessageResponse::new("successfully")))
}

/// JavaScript-style truthiness for JSON values: null, false, 0 and the
/// empty string are falsy, everything else (objects and arrays included)
/// is truthy.
fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
