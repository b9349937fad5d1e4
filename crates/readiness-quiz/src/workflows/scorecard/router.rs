use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::AnswerMap;
use super::report::views::{BankView, ScreenView};
use super::report::ResultsReport;
use super::service::{ScorecardService, ScorecardServiceError};
use super::session::{QuizSession, SessionAction};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub session: QuizSession,
    pub action: SessionAction,
}

#[derive(Debug, Serialize)]
pub struct SessionEnvelope {
    pub session: QuizSession,
    pub screen: ScreenView,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: AnswerMap,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub answered: usize,
    pub total: usize,
    pub report: ResultsReport,
}

/// Router builder exposing the quiz engine over HTTP.
pub fn scorecard_router(service: Arc<ScorecardService>) -> Router {
    Router::new()
        .route("/api/v1/scorecard/questions", get(questions_handler))
        .route("/api/v1/scorecard/sessions", post(create_session_handler))
        .route("/api/v1/scorecard/sessions/actions", post(action_handler))
        .route("/api/v1/scorecard/score", post(score_handler))
        .with_state(service)
}

pub(crate) async fn questions_handler(
    State(service): State<Arc<ScorecardService>>,
) -> Json<BankView> {
    Json(service.bank_view())
}

pub(crate) async fn create_session_handler(
    State(service): State<Arc<ScorecardService>>,
) -> Response {
    let session = QuizSession::new();
    let screen = service.screen(&session);
    (StatusCode::CREATED, Json(SessionEnvelope { session, screen })).into_response()
}

pub(crate) async fn action_handler(
    State(service): State<Arc<ScorecardService>>,
    Json(request): Json<ActionRequest>,
) -> Response {
    match service.apply(request.session, &request.action) {
        Ok(session) => {
            let screen = service.screen(&session);
            (StatusCode::OK, Json(SessionEnvelope { session, screen })).into_response()
        }
        Err(ScorecardServiceError::Rejected { source, session }) => {
            let screen = service.screen(&session);
            let payload = json!({
                "error": source.to_string(),
                "session": session,
                "screen": screen,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(error @ ScorecardServiceError::InvalidSession(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<ScorecardService>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let report = service.score(&request.answers)?;

    Ok(Json(ScoreResponse {
        answered: request.answers.len(),
        total: service.bank().len(),
        report,
    }))
}
