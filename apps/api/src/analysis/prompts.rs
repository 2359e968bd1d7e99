// Profile analysis prompt template.
// All prompts for the analysis module are defined here.

/// Analysis prompt template. Replace `{profile_data}` before sending.
///
/// The reply format (fenced JSON, exact field set, five roadmap steps, boolean
/// `completed`) must stay in sync with `analysis::models::AnalysisResult`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert career coach AI. Analyze the following profile of a junior developer and provide honest improvement steps.

PROFILE DATA:
{profile_data}

Your response MUST be a valid JSON object enclosed in a markdown code block (```json ... ```).
The JSON object must strictly follow this structure:
{
  "userScore": number,
  "roadmapSteps": [
    { "text": "string", "completed": boolean },
    { "text": "string", "completed": boolean },
    { "text": "string", "completed": boolean },
    { "text": "string", "completed": boolean },
    { "text": "string", "completed": boolean }
  ],
  "githubReview": { "repo": "string", "feedback": "string" },
  "linkedinReview": "string",
  "excelAt": ["string", "string"]
}

RULES:
1. "userScore" is an integer from 0 to 100.
2. "roadmapSteps" contains exactly 5 steps, ordered from first to last.
3. IMPORTANT: The "completed" field in roadmapSteps MUST be a boolean value (true or false). It cannot be a string.
4. IMPORTANT: The "linkedinReview" and "githubReview" fields must contain detailed, constructive feedback.
5. Return ONLY the fenced JSON block."#;

pub const RESUME_ABSENT: &str = "No resume provided.";
pub const GITHUB_ABSENT: &str = "GitHub: Not connected.";
pub const LINKEDIN_ABSENT: &str = "LinkedIn: No profile provided.";
