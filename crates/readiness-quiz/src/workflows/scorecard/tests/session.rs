use super::common::*;
use crate::workflows::scorecard::domain::{Category, LeadField, LeadValidationError, Step, UserInfo};
use crate::workflows::scorecard::session::{
    AnswerOutcome, QuizSession, SessionAction, SessionError,
};

#[test]
fn start_moves_welcome_to_first_question() {
    let bank = bank();
    let mut session = QuizSession::new();
    assert_eq!(session.step(), Step::Welcome);
    assert!(session.current_question(&bank).is_none());

    session.start().expect("start succeeds");

    assert_eq!(session.step(), Step::Quiz);
    assert_eq!(session.question_index(), 0);
    assert!(session.answers().is_empty());
    assert_eq!(
        session.current_question(&bank).map(|question| question.id),
        Some(bank.questions()[0].id)
    );
}

#[test]
fn start_is_refused_outside_welcome() {
    let mut session = QuizSession::new();
    session.start().expect("first start");

    match session.start() {
        Err(SessionError::InvalidTransition { step: Step::Quiz, .. }) => {}
        other => panic!("expected invalid transition, got {other:?}"),
    }
}

#[test]
fn answer_records_and_advances_by_exactly_one() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");

    for expected_index in 1..bank.len() {
        let question_id = session.current_question(&bank).expect("question").id;
        let outcome = session.answer(&bank, 3).expect("answer accepted");

        assert_eq!(
            outcome,
            AnswerOutcome::Advanced {
                next_index: expected_index
            }
        );
        assert_eq!(session.question_index(), expected_index);
        assert_eq!(session.answers().get(question_id), Some(3));
    }

    assert_eq!(session.step(), Step::Quiz);
    assert_eq!(session.question_index(), bank.last_index());
}

#[test]
fn last_answer_moves_to_lead_capture_without_advancing() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    for _ in 0..bank.last_index() {
        session.answer(&bank, 2).expect("answer");
    }

    let outcome = session.answer(&bank, 4).expect("final answer");

    assert_eq!(outcome, AnswerOutcome::Completed);
    assert_eq!(session.step(), Step::LeadCapture);
    assert_eq!(session.question_index(), bank.last_index());
    assert_eq!(session.answers().len(), bank.len());
    assert_eq!(session.answers().get(bank.questions()[11].id), Some(4));
}

#[test]
fn answer_rejects_scores_without_matching_option() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    let before = session.clone();

    match session.answer(&bank, 7) {
        Err(SessionError::UnknownOption { score: 7, question_id }) => {
            assert_eq!(question_id, bank.questions()[0].id)
        }
        other => panic!("expected unknown option, got {other:?}"),
    }
    assert_eq!(session, before);
}

#[test]
fn back_on_first_question_is_a_no_op() {
    let mut session = QuizSession::new();
    session.start().expect("start");
    let before = session.clone();

    session.back().expect("back is allowed");

    assert_eq!(session, before);
    assert!(!session.can_go_back());
}

#[test]
fn back_keeps_answers_and_reanswering_same_value_restores_map() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    session.answer(&bank, 1).expect("q1");
    session.answer(&bank, 4).expect("q2");
    session.answer(&bank, 2).expect("q3");
    let before_back = session.answers().clone();

    session.back().expect("back");
    assert_eq!(session.question_index(), 2);
    session.back().expect("back again");
    assert_eq!(session.question_index(), 1);
    assert_eq!(session.answers(), &before_back, "back never drops answers");

    session.answer(&bank, 4).expect("re-answer q2 with the same value");
    assert_eq!(session.answers(), &before_back);
    assert_eq!(session.question_index(), 2);
}

#[test]
fn reanswering_with_a_different_value_overwrites() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    session.answer(&bank, 1).expect("q1");
    session.back().expect("back");

    session.answer(&bank, 3).expect("re-answer");

    assert_eq!(session.answers().get(bank.questions()[0].id), Some(3));
    assert_eq!(session.answers().len(), 1);
}

#[test]
fn back_from_lead_capture_reenters_last_question() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 2);
    assert_eq!(session.step(), Step::LeadCapture);

    session.back().expect("back to quiz");

    assert_eq!(session.step(), Step::Quiz);
    assert_eq!(session.question_index(), bank.last_index());
    assert_eq!(
        session.current_question(&bank).map(|question| question.id),
        bank.questions().last().map(|question| question.id)
    );

    session.answer(&bank, 3).expect("re-answer last");
    assert_eq!(session.step(), Step::LeadCapture);
}

#[test]
fn submit_lead_computes_results_and_finishes() {
    let bank = bank();
    let mut session = answered_session(&bank, mixed_score);

    let results = session.submit_lead(&bank, &lead()).expect("lead accepted").clone();

    assert_eq!(results.raw_score, 30);
    assert_eq!(results.final_percent, 50);
    assert_eq!(results.category_scores[Category::Execution], 4.0);
    assert_eq!(results.category_scores[Category::Adoption], 1.0);
    assert_eq!(session.step(), Step::Results);
    assert_eq!(session.results(), Some(&results));
    assert_eq!(session.user_info(), Some(&lead()));
    assert!(session.submitted_at().is_some());
    assert!(!session.is_submitting());
}

#[test]
fn submission_with_empty_company_changes_nothing() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 3);
    let before = session.clone();

    let blank_company = UserInfo::new("Dana Levi", "dana@kai.example", "");
    match session.submit_lead(&bank, &blank_company) {
        Err(SessionError::Lead(LeadValidationError::MissingFields(fields))) => {
            assert_eq!(fields, vec![LeadField::Company])
        }
        other => panic!("expected missing company, got {other:?}"),
    }

    assert_eq!(session, before);
    assert_eq!(session.step(), Step::LeadCapture);
    assert!(session.user_info().is_none());
    assert!(session.results().is_none());
}

#[test]
fn rejected_resubmission_keeps_stored_lead() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 3);
    session
        .begin_submission(&bank, &lead())
        .expect("first submission begins");

    let other = UserInfo::new("Noa", "noa@kai.example", "");
    assert_eq!(
        session.begin_submission(&bank, &other),
        Err(SessionError::SubmissionInProgress)
    );
    assert_eq!(session.user_info(), Some(&lead()));
}

#[test]
fn two_phase_submission_gates_navigation() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 4);

    session.begin_submission(&bank, &lead()).expect("begin");
    assert!(session.is_submitting());
    assert!(session.results().is_none(), "results hidden until finished");
    assert!(!session.can_go_back());
    assert_eq!(session.back(), Err(SessionError::SubmissionInProgress));

    let results = session.finish_submission().expect("finish").clone();
    assert_eq!(results.final_percent, 100);
    assert_eq!(session.step(), Step::Results);
}

#[test]
fn finish_without_begin_is_refused() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 4);

    assert!(matches!(
        session.finish_submission(),
        Err(SessionError::InvalidTransition {
            step: Step::LeadCapture,
            ..
        })
    ));
}

#[test]
fn lead_cannot_be_submitted_mid_quiz() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    session.answer(&bank, 2).expect("q1");

    assert!(matches!(
        session.submit_lead(&bank, &lead()),
        Err(SessionError::InvalidTransition { step: Step::Quiz, .. })
    ));
    assert!(session.results().is_none());
}

#[test]
fn reset_returns_to_welcome_and_clears_everything() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 4);
    session.submit_lead(&bank, &lead()).expect("submitted");

    session.reset_to_welcome();

    assert_eq!(session.step(), Step::Welcome);
    assert_eq!(session.question_index(), 0);
    assert!(session.answers().is_empty());
    assert!(session.user_info().is_none());
    assert!(session.results().is_none());
    assert_eq!(session, QuizSession::new());
}

#[test]
fn results_step_is_terminal_for_navigation() {
    let bank = bank();
    let mut session = answered_session(&bank, |_| 1);
    session.submit_lead(&bank, &lead()).expect("submitted");

    assert!(matches!(
        session.back(),
        Err(SessionError::InvalidTransition { step: Step::Results, .. })
    ));
    assert!(matches!(
        session.answer(&bank, 1),
        Err(SessionError::InvalidTransition { step: Step::Results, .. })
    ));
    assert_eq!(session.results().map(|results| results.final_percent), Some(0));
}

#[test]
fn progress_reports_share_of_questions_behind() {
    let bank = bank();
    let mut session = QuizSession::new();
    session.start().expect("start");
    for _ in 0..3 {
        session.answer(&bank, 2).expect("answer");
    }

    let progress = session.progress(&bank);
    assert_eq!(progress.index, 3);
    assert_eq!(progress.number, 4);
    assert_eq!(progress.total, 12);
    assert_eq!(progress.percent, 25.0);
}

#[test]
fn apply_dispatches_actions() {
    let bank = bank();
    let mut session = QuizSession::new();

    session.apply(&bank, &SessionAction::Start).expect("start");
    session
        .apply(&bank, &SessionAction::Answer { score: 2 })
        .expect("answer");
    session.apply(&bank, &SessionAction::Back).expect("back");
    assert_eq!(session.question_index(), 0);

    session.apply(&bank, &SessionAction::Reset).expect("reset");
    assert_eq!(session.step(), Step::Welcome);
}

#[test]
fn actions_use_tagged_json() {
    let action: SessionAction =
        serde_json::from_str(r#"{"type":"answer","score":3}"#).expect("parses");
    assert_eq!(action, SessionAction::Answer { score: 3 });

    let submit: SessionAction = serde_json::from_str(
        r#"{"type":"submit_lead","lead":{"name":"Dana","email":"d@k.io","company":"Kai"}}"#,
    )
    .expect("parses");
    assert_eq!(
        submit,
        SessionAction::SubmitLead {
            lead: UserInfo::new("Dana", "d@k.io", "Kai")
        }
    );
}

#[test]
fn restore_recomputes_results_from_answers() {
    let bank = bank();
    let mut session = answered_session(&bank, mixed_score);
    session.submit_lead(&bank, &lead()).expect("submitted");

    let json = serde_json::to_value(&session).expect("serializes");
    assert_eq!(json["results"]["final_percent"], 50);

    let mut tampered = json.clone();
    tampered["results"]["final_percent"] = serde_json::json!(99);
    let parsed: QuizSession = serde_json::from_value(tampered).expect("parses");
    let restored = QuizSession::restore(&bank, parsed).expect("restores");

    assert_eq!(restored.results().map(|r| r.final_percent), Some(50));
    assert_eq!(restored, session);
}

#[test]
fn restore_rejects_results_without_answers() {
    let bank = bank();
    let forged: QuizSession = serde_json::from_value(serde_json::json!({
        "step": "results",
        "question_index": 11,
        "answers": {},
        "user_info": {"name": "Dana", "email": "d@k.io", "company": "Kai"},
    }))
    .expect("parses");

    assert!(matches!(
        QuizSession::restore(&bank, forged),
        Err(SessionError::Inconsistent(_))
    ));
}

#[test]
fn restore_rejects_out_of_bank_state() {
    let bank = bank();

    let out_of_range: QuizSession = serde_json::from_value(serde_json::json!({
        "step": "quiz",
        "question_index": 12,
        "answers": {},
    }))
    .expect("parses");
    assert_eq!(
        QuizSession::restore(&bank, out_of_range),
        Err(SessionError::QuestionOutOfRange {
            index: 12,
            total: 12
        })
    );

    let bad_score: QuizSession = serde_json::from_value(serde_json::json!({
        "step": "quiz",
        "question_index": 1,
        "answers": {"1": 9},
    }))
    .expect("parses");
    assert!(matches!(
        QuizSession::restore(&bank, bad_score),
        Err(SessionError::UnknownOption { score: 9, .. })
    ));

    let unknown_question: QuizSession = serde_json::from_value(serde_json::json!({
        "step": "quiz",
        "question_index": 1,
        "answers": {"77": 2},
    }))
    .expect("parses");
    assert!(matches!(
        QuizSession::restore(&bank, unknown_question),
        Err(SessionError::UnknownQuestion(_))
    ));
}

#[test]
fn finish_without_computed_results_leaves_session_untouched() {
    let bank = bank();
    let answers: serde_json::Map<String, serde_json::Value> = bank
        .questions()
        .iter()
        .map(|question| (question.id.to_string(), serde_json::json!(2)))
        .collect();
    let mut pending: QuizSession = serde_json::from_value(serde_json::json!({
        "step": "lead_capture",
        "question_index": 11,
        "answers": answers,
        "submitting": true,
        "user_info": {"name": "Dana", "email": "d@k.io", "company": "Kai"},
    }))
    .expect("parses");
    let before = pending.clone();

    assert!(matches!(
        pending.finish_submission(),
        Err(SessionError::Inconsistent(_))
    ));
    assert_eq!(pending, before);
    assert!(pending.is_submitting());
    assert_eq!(pending.step(), Step::LeadCapture);
    assert!(pending.submitted_at().is_none());

    let mut restored = QuizSession::restore(&bank, pending).expect("restores");
    let results = restored.finish_submission().expect("finishes after restore");
    assert_eq!(results.final_percent, 33);
}

#[test]
fn apply_runs_two_phase_submission() {
    let bank = bank();
    let mut session = answered_session(&bank, mixed_score);

    session
        .apply(&bank, &SessionAction::BeginSubmission { lead: lead() })
        .expect("begin");
    assert!(session.is_submitting());
    assert_eq!(
        session.apply(&bank, &SessionAction::Back),
        Err(SessionError::SubmissionInProgress)
    );

    session
        .apply(&bank, &SessionAction::FinishSubmission)
        .expect("finish");
    assert_eq!(session.step(), Step::Results);
    assert_eq!(session.results().map(|results| results.final_percent), Some(50));

    let finish: SessionAction =
        serde_json::from_str(r#"{"type":"finish_submission"}"#).expect("parses");
    assert_eq!(finish, SessionAction::FinishSubmission);
}
