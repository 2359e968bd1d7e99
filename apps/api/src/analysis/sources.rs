//! Source aggregation — turns the raw, optional request inputs into a `ProfileSignal`.
//!
//! Resume extraction and the repository lookup are independent, so they run
//! concurrently; both must finish before the prompt is built.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::analysis::models::{GithubActivity, ProfileSignal};
use crate::errors::AnalysisError;
use crate::github_client::RepositoryLister;

/// Converts an uploaded resume document into plain text.
#[async_trait]
pub trait ResumeTextExtractor: Send + Sync {
    async fn extract_text(&self, document: Bytes) -> Result<String, AnalysisError>;
}

/// PDF text extraction via `pdf-extract`, run off the async runtime.
pub struct PdfTextExtractor;

#[async_trait]
impl ResumeTextExtractor for PdfTextExtractor {
    async fn extract_text(&self, document: Bytes) -> Result<String, AnalysisError> {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| AnalysisError::FileParse(format!("PDF extraction aborted: {e}")))?
            .map_err(|e| AnalysisError::FileParse(e.to_string()))
    }
}

/// Raw inputs of one analysis request. Blank text fields have already been dropped.
#[derive(Clone, Default)]
pub struct ProfileInput {
    pub resume: Option<Bytes>,
    pub linkedin_url: Option<String>,
    pub github_login: Option<String>,
    pub github_token: Option<String>,
}

impl fmt::Debug for ProfileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileInput")
            .field("resume_bytes", &self.resume.as_ref().map(Bytes::len))
            .field("linkedin_url", &self.linkedin_url)
            .field("github_login", &self.github_login)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub struct SourceAggregator {
    extractor: Arc<dyn ResumeTextExtractor>,
    repositories: Arc<dyn RepositoryLister>,
}

impl SourceAggregator {
    pub fn new(
        extractor: Arc<dyn ResumeTextExtractor>,
        repositories: Arc<dyn RepositoryLister>,
    ) -> Self {
        Self {
            extractor,
            repositories,
        }
    }

    /// Collects every available signal. A present resume that cannot be read
    /// fails the request; an absent one becomes a sentinel in the narrative.
    pub async fn collect(&self, input: ProfileInput) -> Result<ProfileSignal, AnalysisError> {
        let ProfileInput {
            resume,
            linkedin_url,
            github_login,
            github_token,
        } = input;

        let (resume_text, github) = tokio::try_join!(
            self.resume_text(resume),
            self.github_activity(github_login, github_token.as_deref()),
        )?;

        Ok(ProfileSignal {
            resume_text,
            github,
            linkedin_url,
        })
    }

    async fn resume_text(&self, resume: Option<Bytes>) -> Result<Option<String>, AnalysisError> {
        let Some(document) = resume else {
            debug!("No resume supplied");
            return Ok(None);
        };
        let size = document.len();
        let text = self.extractor.extract_text(document).await?;
        info!(bytes = size, chars = text.chars().count(), "Resume text extracted");
        Ok(Some(text))
    }

    async fn github_activity(
        &self,
        login: Option<String>,
        token: Option<&str>,
    ) -> Result<Option<GithubActivity>, AnalysisError> {
        let (Some(login), Some(token)) = (login, token) else {
            debug!("GitHub not connected");
            return Ok(None);
        };
        let repositories = self.repositories.recent_repositories(&login, token).await?;
        info!(login = %login, repo_count = repositories.len(), "GitHub activity collected");
        Ok(Some(GithubActivity {
            login,
            repositories,
        }))
    }
}
