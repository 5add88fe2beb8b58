// CV intake: PDF text extraction, the CV plausibility check and the
// applicant-name heuristics.

pub mod extract;
pub mod handlers;
pub mod name;
pub mod validation;
