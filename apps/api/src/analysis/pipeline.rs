//! Analysis pipeline — the linear request flow.
//!
//! Flow: collect sources → build prompt → call model → extract JSON →
//!       validate → return `AnalysisResult`.
//!
//! Every stage returns `AnalysisError` and the first failure ends the request.
//! Nothing is retried and nothing survives between requests.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::analysis::extraction::extract_json_candidate;
use crate::analysis::models::AnalysisResult;
use crate::analysis::profile::build_prompt;
use crate::analysis::sources::{PdfTextExtractor, ProfileInput, ResumeTextExtractor, SourceAggregator};
use crate::analysis::validation::validate_analysis;
use crate::config::Config;
use crate::errors::AnalysisError;
use crate::github_client::{GithubClient, RepositoryLister};
use crate::llm_client::{CompletionModel, LlmClient};

pub struct Analyzer {
    sources: SourceAggregator,
    model: Arc<dyn CompletionModel>,
}

impl Analyzer {
    pub fn new(
        extractor: Arc<dyn ResumeTextExtractor>,
        repositories: Arc<dyn RepositoryLister>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            sources: SourceAggregator::new(extractor, repositories),
            model,
        }
    }

    /// Wires the production collaborators from the process configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let github = GithubClient::new(config.github_timeout)?;
        let llm = LlmClient::new(config.openrouter_api_key.clone(), config.model_timeout)?;
        Ok(Self::new(
            Arc::new(PdfTextExtractor),
            Arc::new(github),
            Arc::new(llm),
        ))
    }

    /// Runs one analysis end to end.
    pub async fn analyze(&self, input: ProfileInput) -> Result<AnalysisResult, AnalysisError> {
        let signal = self.sources.collect(input).await?;

        let prompt = build_prompt(&signal);
        info!(prompt_len = prompt.as_str().len(), "Prompt built");

        let reply = self.model.complete(prompt.as_str()).await?;
        info!(reply_len = reply.len(), "Model replied");

        let candidate = extract_json_candidate(&reply)?;
        let result = validate_analysis(candidate)?;
        info!(user_score = result.user_score, "Analysis validated");

        Ok(result)
    }
}
