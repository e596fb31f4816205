//! Axum route handler for the copy generation endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::copy::generator::{GenerationRequest, GenerationResult};
use crate::errors::AppError;
use crate::state::AppState;

const MISSING_TITLE: &str = "Missing title";

/// Body sent by the spreadsheet script. Both fields are optional at the wire
/// level so a missing title maps to our own 400, not a deserializer rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDescriptionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl GenerateDescriptionRequest {
    /// Trims both fields; a blank title is a validation error, a blank image URL is dropped.
    fn into_generation_request(self) -> Result<GenerationRequest, AppError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation(MISSING_TITLE.to_string()))?;

        let image_url = self
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Ok(GenerationRequest { title, image_url })
    }
}

/// POST /generate-description
///
/// Rewrites the title and writes a short description. Always answers 200 with
/// `{formattedTitle, description}` for a valid title; `note` marks fallback paths.
pub async fn handle_generate_description(
    State(state): State<AppState>,
    payload: Result<Json<GenerateDescriptionRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    // A body sent without a JSON content type carries no readable title.
    let Json(body) = match payload {
        Ok(body) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => {
            return Err(AppError::Validation(MISSING_TITLE.to_string()))
        }
        Err(rejection) => return Err(rejection.into()),
    };
    let request = body.into_generation_request()?;

    let mut rng = StdRng::from_entropy();
    let result = state.copywriter.generate(&request, &mut rng).await;

    Ok(Json(result))
}
