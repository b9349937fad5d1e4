//! Lead-generation readiness quiz: question bank, step state machine,
//! scoring, feedback selection and the HTTP surface over them.

pub mod bank;
pub mod contact;
pub mod domain;
pub mod feedback;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use bank::{BankError, QuestionBank, ScoreScale};
pub use contact::{ContactError, ContactInvitation};
pub use domain::{
    AnswerMap, AnswerOption, Category, CategoryMap, LeadField, LeadValidationError, Question,
    QuestionId, Step, UserInfo,
};
pub use feedback::{
    CategoryFeedback, Classification, FeedbackCatalog, FeedbackError, ReadinessBand, ScoreRange,
};
pub use report::views::{BankView, CategoryCard, QuestionView, ScreenView};
pub use report::ResultsReport;
pub use router::scorecard_router;
pub use scoring::{compute_results, UserResults};
pub use service::{ScorecardService, ScorecardServiceError};
pub use session::{
    validate_answers, AnswerOutcome, Progress, QuizSession, SessionAction, SessionError,
};
