// CV/job match scoring prompt.
// The reply format defined here is what scoring::parser reads back.

use crate::llm_client::prompts::fill_template;

pub const SCORING_TEMPLATE_VERSION: &str = "match-score/v1";

/// Slots: {cv_content}, {job_description}
pub const SCORING_TEMPLATE: &str = r#"You are an experienced technical recruiter. Evaluate how well the candidate's CV matches the job description below.

CV Content:
{cv_content}

Job Description:
{job_description}

Assess the alignment across all of the following dimensions:
- Technical and functional skills
- Relevant work experience and its depth
- Education and certifications
- Industry or domain knowledge
- Tools, technologies and methodologies
- Soft skills and communication
- Career progression and seniority fit

Rate the overall match on a scale of 1 to 5, where 1 is a poor match and 5 is an excellent match.

Respond in EXACTLY this format, with each section starting on a new line:
SCORE: [a single whole number from 1 to 5]
ANALYSIS: [2-3 sentences summarising the overall fit]
STRENGTHS: [the candidate's key strengths for this role]
GAPS: [missing skills or experience the role asks for]
RECOMMENDATIONS: [concrete suggestions to improve the application]

Do not add any other headings or text outside these five sections."#;

/// Named slots for the scoring template.
#[derive(Debug, Clone)]
pub struct ScoringPrompt<'a> {
    pub cv_content: &'a str,
    pub job_description: &'a str,
}

impl ScoringPrompt<'_> {
    pub fn render(&self) -> String {
        fill_template(
            SCORING_TEMPLATE,
            &[
                ("cv_content", self.cv_content),
                ("job_description", self.job_description),
            ],
        )
    }
}
