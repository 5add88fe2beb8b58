// Cover-letter generation: tone directives, the prompt template and the
// generation pipeline. LLM calls go through llm_client::Completion only.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tone;
