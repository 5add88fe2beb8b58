// Cover-letter prompt template.
// Rendered through llm_client::prompts::fill_template; bump the version
// whenever the wording changes so logged calls can be traced to a template.

use crate::cv::name::NAME_PLACEHOLDER;
use crate::generation::tone::ToneDirective;
use crate::llm_client::prompts::fill_template;

pub const COVER_LETTER_TEMPLATE_VERSION: &str = "cover-letter/v1";

/// Slots: {cv_content}, {job_description}, {tone}, {applicant_name}
pub const COVER_LETTER_TEMPLATE: &str = r#"You are an expert career advisor and cover letter writer. Based on the provided CV and job description, create a professional, compelling cover letter that highlights the applicant's most relevant qualifications and demonstrates their suitability for the position.

CV Content:
{cv_content}

Job Description:
{job_description}

Tone Instructions:
{tone}

Instructions:
1. Write a comprehensive, detailed cover letter that is approximately 4-6 paragraphs long
2. Follow the specified tone while maintaining professionalism
3. Provide specific examples and detailed explanations of relevant skills, experiences, and achievements from the CV that match the job requirements
4. Show genuine enthusiasm for the role and company with specific reasons why you're interested
5. Include a strong, compelling opening that immediately grabs attention
6. Dedicate sufficient space to explain how your background aligns with each major requirement
7. Include a paragraph about your understanding of the company/role and why you're a great fit
8. End with a confident call to action
9. If the applicant's name is not clearly identifiable from the CV, use "[Your Name]" as a placeholder
10. Use "[Company Name]" and "[Hiring Manager]" as placeholders if not specified in the job description

Applicant Name (if identified): {applicant_name}

Generate a professional cover letter:"#;

/// Named slots for the cover-letter template.
#[derive(Debug, Clone)]
pub struct CoverLetterPrompt<'a> {
    pub cv_content: &'a str,
    pub job_description: &'a str,
    /// `None` renders the `[Your Name]` placeholder.
    pub applicant_name: Option<&'a str>,
    pub tone: ToneDirective,
}

impl CoverLetterPrompt<'_> {
    pub fn render(&self) -> String {
        fill_template(
            COVER_LETTER_TEMPLATE,
            &[
                ("cv_content", self.cv_content),
                ("job_description", self.job_description),
                ("tone", self.tone.instruction()),
                ("applicant_name", self.applicant_name.unwrap_or(NAME_PLACEHOLDER)),
            ],
        )
    }
}
