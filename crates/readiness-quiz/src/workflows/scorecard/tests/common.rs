use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::scorecard::bank::QuestionBank;
use crate::workflows::scorecard::contact::ContactInvitation;
use crate::workflows::scorecard::domain::{Category, UserInfo};
use crate::workflows::scorecard::feedback::FeedbackCatalog;
use crate::workflows::scorecard::service::ScorecardService;
use crate::workflows::scorecard::session::QuizSession;
use crate::workflows::scorecard::scorecard_router;

pub(super) fn bank() -> QuestionBank {
    QuestionBank::standard()
}

pub(super) fn lead() -> UserInfo {
    UserInfo::new("Dana Levi", "dana@kai.example", "Kai Labs")
}

pub(super) fn contact() -> ContactInvitation {
    ContactInvitation::new("hello@kai.example", "Intro meeting - AI Scorecard")
        .expect("valid invitation")
}

pub(super) fn service() -> ScorecardService {
    ScorecardService::new(bank(), FeedbackCatalog::standard(), contact(), 75)
}

pub(super) fn router() -> axum::Router {
    scorecard_router(Arc::new(service()))
}

/// Score for each category in the mixed reference scenario.
pub(super) fn mixed_score(category: Category) -> i32 {
    match category {
        Category::Execution => 4,
        Category::Adoption => 1,
        Category::Data => 3,
        Category::Mindset => 2,
    }
}

/// Walks a fresh session through every question using `pick`.
pub(super) fn answered_session(bank: &QuestionBank, pick: impl Fn(Category) -> i32) -> QuizSession {
    let mut session = QuizSession::new();
    session.start().expect("start from welcome");
    for question in bank.questions() {
        session
            .answer(bank, pick(question.category))
            .expect("answer accepted");
    }
    session
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
