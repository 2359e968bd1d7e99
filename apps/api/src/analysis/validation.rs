//! Schema validation of the extracted model output.
//!
//! Policy:
//! - `completed` must be a JSON boolean; `"true"` is rejected, not coerced.
//! - `roadmapSteps` must hold exactly five entries.
//! - `userScore` must be an integer; values outside 0–100 are passed through.
//! - Unknown extra fields are ignored.

use crate::analysis::models::AnalysisResult;
use crate::errors::AnalysisError;

/// Parses and type-checks a JSON candidate into an `AnalysisResult`.
pub fn validate_analysis(candidate: &str) -> Result<AnalysisResult, AnalysisError> {
    serde_json::from_str::<AnalysisResult>(candidate).map_err(|e| {
        let reason = if e.is_syntax() || e.is_eof() {
            format!("malformed JSON: {e}")
        } else {
            format!("schema mismatch: {e}")
        };
        AnalysisError::SchemaValidation(reason)
    })
}
