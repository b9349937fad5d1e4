use super::bank::QuestionBank;
use super::contact::{ContactError, ContactInvitation};
use super::domain::AnswerMap;
use super::feedback::FeedbackCatalog;
use super::report::views::{BankView, ScreenView};
use super::report::ResultsReport;
use super::scoring::{compute_results, UserResults};
use super::session::{validate_answers, QuizSession, SessionAction, SessionError};
use crate::config::ScorecardConfig;
use tracing::{debug, warn};

/// Composes the question bank, feedback catalog and contact invitation
/// behind the operations the HTTP layer exposes.
pub struct ScorecardService {
    bank: QuestionBank,
    catalog: FeedbackCatalog,
    contact: ContactInvitation,
    benchmark_percent: u8,
}

impl ScorecardService {
    pub fn new(
        bank: QuestionBank,
        catalog: FeedbackCatalog,
        contact: ContactInvitation,
        benchmark_percent: u8,
    ) -> Self {
        Self {
            bank,
            catalog,
            contact,
            benchmark_percent: benchmark_percent.min(100),
        }
    }

    /// Standard bank and copy, contact and benchmark taken from configuration.
    pub fn from_config(config: &ScorecardConfig) -> Result<Self, ContactError> {
        let contact = ContactInvitation::from_config(config)?;
        Ok(Self::new(
            QuestionBank::standard(),
            FeedbackCatalog::standard(),
            contact,
            config.benchmark_percent,
        ))
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn catalog(&self) -> &FeedbackCatalog {
        &self.catalog
    }

    pub fn benchmark_percent(&self) -> u8 {
        self.benchmark_percent
    }

    pub fn bank_view(&self) -> BankView {
        BankView::from(&self.bank)
    }

    /// Runs one action against a caller-held session.
    ///
    /// The session is restored first; a refused action hands back the
    /// restored session unchanged.
    pub fn apply(
        &self,
        session: QuizSession,
        action: &SessionAction,
    ) -> Result<QuizSession, ScorecardServiceError> {
        let restored = QuizSession::restore(&self.bank, session).map_err(|error| {
            warn!(%error, "rejected session snapshot");
            ScorecardServiceError::InvalidSession(error)
        })?;

        let mut next = restored.clone();
        match next.apply(&self.bank, action) {
            Ok(()) => {
                debug!(step = next.step().label(), index = next.question_index(), "action applied");
                Ok(next)
            }
            Err(source) => {
                debug!(error = %source, "action refused");
                Err(ScorecardServiceError::Rejected {
                    source,
                    session: Box::new(restored),
                })
            }
        }
    }

    pub fn report(&self, results: &UserResults) -> ResultsReport {
        ResultsReport::build(results, &self.catalog, self.benchmark_percent, &self.contact)
    }

    pub fn screen(&self, session: &QuizSession) -> ScreenView {
        let report = session.results().map(|results| self.report(results));
        ScreenView::new(session, &self.bank, report)
    }

    /// Scores an answer map directly, outside any session.
    ///
    /// The map may be partial, but every entry must name a bank question and
    /// one of its options.
    pub fn score(&self, answers: &AnswerMap) -> Result<ResultsReport, SessionError> {
        validate_answers(&self.bank, answers).map_err(|error| {
            debug!(%error, "rejected answer map");
            error
        })?;
        Ok(self.report(&compute_results(&self.bank, answers)))
    }
}

/// Error raised by the scorecard service.
#[derive(Debug, thiserror::Error)]
pub enum ScorecardServiceError {
    #[error("invalid session: {0}")]
    InvalidSession(SessionError),
    #[error("{source}")]
    Rejected {
        source: SessionError,
        session: Box<QuizSession>,
    },
}
