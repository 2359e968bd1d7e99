use serde::{Deserialize, Serialize};

/// Number of roadmap steps the model must return.
pub const ROADMAP_STEP_COUNT: usize = 5;

/// Upper bound on repositories fed into the narrative.
pub const MAX_REPOSITORIES: usize = 5;

/// One repository as presented to the model.
/// Field order matters: it is serialized verbatim into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// A connected GitHub account and its most recently updated repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubActivity {
    pub login: String,
    pub repositories: Vec<RepoSummary>,
}

/// Everything known about the applicant for one request.
/// `None` means the signal was not supplied; the narrative renders a sentinel for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSignal {
    pub resume_text: Option<String>,
    pub github: Option<GithubActivity>,
    pub linkedin_url: Option<String>,
}

/// The instruction text sent to the model. Built deterministically from a `ProfileSignal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEnvelope(pub String);

impl PromptEnvelope {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubReview {
    pub repo: String,
    pub feedback: String,
}

/// The validated evaluation returned to the caller.
///
/// Only ever constructed by deserializing a complete model reply; there is no
/// partially populated form. `user_score` is passed through as received, the
/// 0–100 range is guidance to the model rather than an enforced bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub user_score: i64,
    pub roadmap_steps: [RoadmapStep; ROADMAP_STEP_COUNT],
    pub github_review: GithubReview,
    pub linkedin_review: String,
    pub excel_at: Vec<String>,
}
