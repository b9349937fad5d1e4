use super::super::bank::{QuestionBank, ScoreScale};
use super::super::domain::{AnswerOption, Category, Question, QuestionId, Step, UserInfo};
use super::super::feedback::Classification;
use super::super::session::{Progress, QuizSession};
use super::summary::ResultsReport;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub category: Category,
    pub category_label: &'static str,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            category: question.category,
            category_label: question.category.label(),
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BankView {
    pub total: usize,
    pub scale: ScoreScale,
    pub questions: Vec<QuestionView>,
}

impl From<&QuestionBank> for BankView {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            total: bank.len(),
            scale: bank.scale(),
            questions: bank.questions().iter().map(QuestionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCard {
    pub category: Category,
    pub label: &'static str,
    pub average: f64,
    pub classification: Classification,
    pub classification_label: &'static str,
    pub text: String,
}

/// Everything a client needs to draw the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    pub step: Step,
    pub step_label: &'static str,
    pub progress: Progress,
    pub can_go_back: bool,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ResultsReport>,
}

impl ScreenView {
    pub fn new(session: &QuizSession, bank: &QuestionBank, report: Option<ResultsReport>) -> Self {
        Self {
            step: session.step(),
            step_label: session.step().label(),
            progress: session.progress(bank),
            can_go_back: session.can_go_back(),
            submitting: session.is_submitting(),
            question: session.current_question(bank).map(QuestionView::from),
            lead: session.user_info().cloned(),
            report,
        }
    }
}
