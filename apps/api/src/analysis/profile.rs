//! Profile narrative and prompt assembly.
//!
//! Pure functions only: the same `ProfileSignal` always renders to the same
//! bytes, so prompts can be compared in tests and replayed against a stub model.

use crate::analysis::models::{GithubActivity, ProfileSignal, PromptEnvelope};
use crate::analysis::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, GITHUB_ABSENT, LINKEDIN_ABSENT, RESUME_ABSENT,
};

/// Renders the three labeled profile lines in fixed order: resume, GitHub, LinkedIn.
pub fn render_narrative(signal: &ProfileSignal) -> String {
    let resume = signal.resume_text.as_deref().unwrap_or(RESUME_ABSENT);
    let github = signal
        .github
        .as_ref()
        .map(render_github_line)
        .unwrap_or_else(|| GITHUB_ABSENT.to_string());
    let linkedin = match signal.linkedin_url.as_deref() {
        Some(url) => format!("LinkedIn: Profile exists at {url}."),
        None => LINKEDIN_ABSENT.to_string(),
    };

    format!("- Resume Text: {resume}\n- {github}\n- {linkedin}")
}

fn render_github_line(activity: &GithubActivity) -> String {
    // Serializing plain strings and options cannot fail; fall back to an empty list regardless.
    let repos = serde_json::to_string(&activity.repositories).unwrap_or_else(|_| "[]".to_string());
    format!(
        "GitHub: User '{}' is connected. Here is a list of their 5 most recently updated public repositories: {}",
        activity.login, repos
    )
}

/// Embeds the narrative into the analysis instruction template.
pub fn build_prompt(signal: &ProfileSignal) -> PromptEnvelope {
    PromptEnvelope(ANALYSIS_PROMPT_TEMPLATE.replace("{profile_data}", &render_narrative(signal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::RepoSummary;

    fn full_signal() -> ProfileSignal {
        ProfileSignal {
            resume_text: Some("Rust developer, 2 years.".to_string()),
            github: Some(GithubActivity {
                login: "octocat".to_string(),
                repositories: vec![
                    RepoSummary {
                        name: "hello-world".to_string(),
                        description: Some("My first repo".to_string()),
                        language: Some("Rust".to_string()),
                    },
                    RepoSummary {
                        name: "dotfiles".to_string(),
                        description: None,
                        language: None,
                    },
                ],
            }),
            linkedin_url: Some("https://linkedin.com/in/octocat".to_string()),
        }
    }

    #[test]
    fn test_all_absent_renders_sentinels() {
        let narrative = render_narrative(&ProfileSignal::default());
        assert!(narrative.contains("No resume provided."));
        assert!(narrative.contains("GitHub: Not connected."));
        assert!(narrative.contains("LinkedIn: No profile provided."));
        assert_eq!(
            narrative,
            "- Resume Text: No resume provided.\n- GitHub: Not connected.\n- LinkedIn: No profile provided."
        );
    }

    #[test]
    fn test_lines_in_fixed_order() {
        let narrative = render_narrative(&full_signal());
        let lines: Vec<&str> = narrative.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- Resume Text: Rust developer"));
        assert!(lines[1].starts_with("- GitHub: User 'octocat' is connected."));
        assert_eq!(
            lines[2],
            "- LinkedIn: Profile exists at https://linkedin.com/in/octocat."
        );
    }

    #[test]
    fn test_repositories_embedded_as_compact_json() {
        let narrative = render_narrative(&full_signal());
        assert!(narrative.contains(
            r#"[{"name":"hello-world","description":"My first repo","language":"Rust"},{"name":"dotfiles","description":null,"language":null}]"#
        ));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let signal = full_signal();
        assert_eq!(build_prompt(&signal), build_prompt(&signal.clone()));
        assert_eq!(
            build_prompt(&ProfileSignal::default()),
            build_prompt(&ProfileSignal::default())
        );
    }

    #[test]
    fn test_prompt_embeds_narrative_and_schema() {
        let signal = full_signal();
        let prompt = build_prompt(&signal);
        let text = prompt.as_str();
        assert!(text.contains(&render_narrative(&signal)));
        assert!(!text.contains("{profile_data}"));
        assert!(text.contains("```json"));
        assert!(text.contains("\"roadmapSteps\""));
        assert_eq!(text.matches("\"completed\": boolean").count(), 5);
        assert!(text.contains("MUST be a boolean value"));
    }
}
