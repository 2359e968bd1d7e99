//! Profile analysis: sources → prompt → model → extraction → validation.

pub mod extraction;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod prompts;
pub mod sources;
pub mod validation;
