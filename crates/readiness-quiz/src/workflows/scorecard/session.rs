use super::bank::QuestionBank;
use super::domain::{AnswerMap, LeadValidationError, Question, QuestionId, Step, UserInfo};
use super::scoring::{compute_results, UserResults};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mutable state of one traversal through the quiz.
///
/// The session is a plain value owned by the caller. Operations borrow the
/// [`QuestionBank`] they run against and either apply completely or return an
/// error leaving the session untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizSession {
    step: Step,
    question_index: usize,
    answers: AnswerMap,
    #[serde(default)]
    submitting: bool,
    #[serde(default)]
    user_info: Option<UserInfo>,
    #[serde(default, skip_deserializing)]
    results: Option<UserResults>,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
}

/// What an accepted answer did to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Advanced { next_index: usize },
    Completed,
}

/// Position within the question list for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub index: usize,
    pub number: usize,
    pub total: usize,
    pub percent: f64,
}

/// Serializable form of the session operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionAction {
    Start,
    Answer { score: i32 },
    Back,
    SubmitLead { lead: UserInfo },
    BeginSubmission { lead: UserInfo },
    FinishSubmission,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} during the {} step", .step.label())]
    InvalidTransition { action: &'static str, step: Step },
    #[error("score {score} is not an option of question {question_id}")]
    UnknownOption { question_id: QuestionId, score: i32 },
    #[error("question index {index} is outside a bank of {total} questions")]
    QuestionOutOfRange { index: usize, total: usize },
    #[error("question {0} is not part of the question bank")]
    UnknownQuestion(QuestionId),
    #[error("lead submission already in progress")]
    SubmissionInProgress,
    #[error(transparent)]
    Lead(#[from] LeadValidationError),
    #[error("inconsistent session: {0}")]
    Inconsistent(&'static str),
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-validates a session received from an untrusted caller.
    ///
    /// Results are never taken from the input; they are recomputed from the
    /// answers when the session claims to be past lead capture.
    pub fn restore(bank: &QuestionBank, mut session: QuizSession) -> Result<Self, SessionError> {
        if session.question_index >= bank.len() {
            return Err(SessionError::QuestionOutOfRange {
                index: session.question_index,
                total: bank.len(),
            });
        }

        validate_answers(bank, &session.answers)?;

        let complete = session.answers.len() == bank.len();
        session.results = None;

        match session.step {
            Step::Welcome | Step::Quiz => {
                if session.submitting || session.user_info.is_some() {
                    return Err(SessionError::Inconsistent(
                        "lead details present before lead capture",
                    ));
                }
                session.submitted_at = None;
            }
            Step::LeadCapture | Step::Results => {
                if !complete || session.question_index != bank.last_index() {
                    return Err(SessionError::Inconsistent(
                        "lead capture reached without answering every question",
                    ));
                }

                if session.submitting || session.step == Step::Results {
                    let info = session
                        .user_info
                        .as_ref()
                        .ok_or(SessionError::Inconsistent(
                            "results require submitted lead details",
                        ))?
                        .validated()?;
                    session.results = Some(compute_results(bank, &session.answers));
                    session.user_info = Some(info);
                } else {
                    session.user_info = None;
                    session.submitted_at = None;
                }

                if session.step == Step::Results && session.submitting {
                    return Err(SessionError::Inconsistent(
                        "results step cannot still be submitting",
                    ));
                }
            }
        }

        Ok(session)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Computed results; only available once the session reached [`Step::Results`].
    pub fn results(&self) -> Option<&UserResults> {
        match self.step {
            Step::Results => self.results.as_ref(),
            _ => None,
        }
    }

    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Option<&'b Question> {
        match self.step {
            Step::Quiz => bank.get(self.question_index),
            _ => None,
        }
    }

    pub fn can_go_back(&self) -> bool {
        match self.step {
            Step::Quiz => self.question_index > 0,
            Step::LeadCapture => !self.submitting,
            Step::Welcome | Step::Results => false,
        }
    }

    pub fn progress(&self, bank: &QuestionBank) -> Progress {
        let total = bank.len();
        Progress {
            index: self.question_index,
            number: self.question_index + 1,
            total,
            percent: self.question_index as f64 / total as f64 * 100.0,
        }
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect_step(Step::Welcome, "start the quiz")?;

        self.step = Step::Quiz;
        self.question_index = 0;
        debug!(answers = self.answers.len(), "quiz started");
        Ok(())
    }

    pub fn answer(
        &mut self,
        bank: &QuestionBank,
        score: i32,
    ) -> Result<AnswerOutcome, SessionError> {
        self.expect_step(Step::Quiz, "answer a question")?;

        let question = bank
            .get(self.question_index)
            .ok_or(SessionError::QuestionOutOfRange {
                index: self.question_index,
                total: bank.len(),
            })?;

        if question.option_for_score(score).is_none() {
            return Err(SessionError::UnknownOption {
                question_id: question.id,
                score,
            });
        }

        self.answers.record(question.id, score);
        debug!(question_id = %question.id, score, index = self.question_index, "answer recorded");

        if self.question_index < bank.last_index() {
            self.question_index += 1;
            Ok(AnswerOutcome::Advanced {
                next_index: self.question_index,
            })
        } else {
            self.step = Step::LeadCapture;
            debug!("all questions answered, moving to lead capture");
            Ok(AnswerOutcome::Completed)
        }
    }

    /// Steps back one question. A no-op on the first question; from lead
    /// capture it re-enters the quiz on the last question.
    pub fn back(&mut self) -> Result<(), SessionError> {
        match self.step {
            Step::Quiz => {
                if self.question_index > 0 {
                    self.question_index -= 1;
                }
                Ok(())
            }
            Step::LeadCapture if self.submitting => Err(SessionError::SubmissionInProgress),
            Step::LeadCapture => {
                self.step = Step::Quiz;
                debug!(index = self.question_index, "returned to the last question");
                Ok(())
            }
            step => Err(SessionError::InvalidTransition {
                action: "go back",
                step,
            }),
        }
    }

    /// Validates the lead, stores it and computes results while the submit
    /// is still pending.
    pub fn begin_submission(
        &mut self,
        bank: &QuestionBank,
        info: &UserInfo,
    ) -> Result<(), SessionError> {
        self.expect_step(Step::LeadCapture, "submit lead details")?;
        let info = info.validated()?;

        self.results = Some(compute_results(bank, &self.answers));
        self.user_info = Some(info);
        self.submitting = true;
        Ok(())
    }

    pub fn finish_submission(&mut self) -> Result<&UserResults, SessionError> {
        if self.step != Step::LeadCapture || !self.submitting {
            return Err(SessionError::InvalidTransition {
                action: "finish a submission",
                step: self.step,
            });
        }

        let results = self
            .results
            .as_ref()
            .ok_or(SessionError::Inconsistent("submission has no computed results"))?;

        self.submitting = false;
        self.step = Step::Results;
        self.submitted_at = Some(Utc::now());
        debug!(
            raw_score = results.raw_score,
            final_percent = results.final_percent,
            "lead submitted"
        );
        Ok(results)
    }

    pub fn submit_lead(
        &mut self,
        bank: &QuestionBank,
        info: &UserInfo,
    ) -> Result<&UserResults, SessionError> {
        self.begin_submission(bank, info)?;
        self.finish_submission()
    }

    /// Returns to the welcome screen, discarding answers, lead and results.
    pub fn reset_to_welcome(&mut self) {
        *self = Self::new();
        debug!("session reset");
    }

    pub fn apply(
        &mut self,
        bank: &QuestionBank,
        action: &SessionAction,
    ) -> Result<(), SessionError> {
        match action {
            SessionAction::Start => self.start(),
            SessionAction::Answer { score } => self.answer(bank, *score).map(|_| ()),
            SessionAction::Back => self.back(),
            SessionAction::SubmitLead { lead } => self.submit_lead(bank, lead).map(|_| ()),
            SessionAction::BeginSubmission { lead } => self.begin_submission(bank, lead),
            SessionAction::FinishSubmission => self.finish_submission().map(|_| ()),
            SessionAction::Reset => {
                self.reset_to_welcome();
                Ok(())
            }
        }
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), SessionError> {
        if self.submitting {
            return Err(SessionError::SubmissionInProgress);
        }
        if self.step != expected {
            return Err(SessionError::InvalidTransition {
                action,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// Checks that every answer names a bank question and one of its option scores.
pub fn validate_answers(bank: &QuestionBank, answers: &AnswerMap) -> Result<(), SessionError> {
    for (id, score) in answers.iter() {
        let question = bank.find(id).ok_or(SessionError::UnknownQuestion(id))?;
        if question.option_for_score(score).is_none() {
            return Err(SessionError::UnknownOption {
                question_id: id,
                score,
            });
        }
    }
    Ok(())
}
