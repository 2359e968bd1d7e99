//! Axum route handler for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use tracing::{debug, info};

use crate::analysis::models::AnalysisResult;
use crate::analysis::sources::ProfileInput;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/analyze
///
/// Multipart fields, all optional: `resume` (PDF), `linkedinUrl`, `githubLogin`, `githubToken`.
/// Responds with the `AnalysisResult` or a uniform `{"message": ...}` failure.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = read_profile_input(multipart).await?;
    info!(?input, "Analysis requested");

    let result = state.analyzer.analyze(input).await?;
    Ok(Json(result))
}

async fn read_profile_input(mut multipart: Multipart) -> Result<ProfileInput, AppError> {
    let mut input = ProfileInput::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "resume" => {
                // A part without a filename is not a file upload. A named file is
                // always handed to the extractor, even when it is empty.
                let is_file = field.file_name().is_some_and(|f| !f.is_empty());
                let data = field.bytes().await.map_err(malformed)?;
                if is_file {
                    input.resume = Some(data);
                } else {
                    debug!("Ignoring resume part without a filename");
                }
            }
            "linkedinUrl" => input.linkedin_url = non_empty(field.text().await.map_err(malformed)?),
            "githubLogin" => input.github_login = non_empty(field.text().await.map_err(malformed)?),
            "githubToken" => input.github_token = non_empty(field.text().await.map_err(malformed)?),
            _ => debug!(field = %name, "Ignoring unknown multipart field"),
        }
    }

    Ok(input)
}

fn malformed(err: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {err}"))
}

/// Drops all-blank values; anything else is kept verbatim.
fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
