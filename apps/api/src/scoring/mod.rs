// CV/job match scoring: prompt template and the tolerant reply parser.

pub mod handlers;
pub mod parser;
pub mod prompts;
