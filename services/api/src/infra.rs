use metrics_exporter_prometheus::PrometheusHandle;
use readiness_quiz::error::AppError;
use readiness_quiz::workflows::scorecard::{AnswerMap, QuestionBank, SessionError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Pairs positional scores with the bank's questions.
///
/// Fewer scores than questions is allowed; the remaining questions stay
/// unanswered and score 0.
pub(crate) fn answers_in_bank_order(
    bank: &QuestionBank,
    scores: &[i32],
) -> Result<AnswerMap, AppError> {
    if scores.len() > bank.len() {
        return Err(AppError::InvalidInput(format!(
            "received {} answers for {} questions",
            scores.len(),
            bank.len()
        )));
    }

    bank.questions()
        .iter()
        .zip(scores)
        .map(|(question, score)| match question.option_for_score(*score) {
            Some(_) => Ok((question.id, *score)),
            None => Err(AppError::from(SessionError::UnknownOption {
                question_id: question.id,
                score: *score,
            })),
        })
        .collect()
}
