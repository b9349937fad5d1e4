use super::common::*;
use crate::workflows::scorecard::domain::{AnswerMap, Category, Step};
use crate::workflows::scorecard::feedback::{Classification, FeedbackCatalog, ReadinessBand};
use crate::workflows::scorecard::report::ResultsReport;
use crate::workflows::scorecard::scoring::compute_results;
use crate::workflows::scorecard::session::{QuizSession, SessionAction};

#[test]
fn mixed_report_splits_engines_and_barriers() {
    let bank = bank();
    let session = answered_session(&bank, mixed_score);
    let results = compute_results(&bank, session.answers());

    let report = ResultsReport::build(&results, &FeedbackCatalog::standard(), 75, &contact());

    assert_eq!(report.final_percent, 50);
    assert_eq!(report.band, ReadinessBand::Developing);
    assert_eq!(report.benchmark_gap, Some(25));
    assert_eq!(
        report.categories.iter().map(|card| card.category).collect::<Vec<_>>(),
        Category::ordered().to_vec()
    );

    let engines: Vec<Category> = report.engines().map(|card| card.category).collect();
    let barriers: Vec<Category> = report.barriers().map(|card| card.category).collect();
    assert_eq!(engines, vec![Category::Execution, Category::Data]);
    assert_eq!(barriers, vec![Category::Adoption, Category::Mindset]);

    let catalog = FeedbackCatalog::standard();
    assert_eq!(report.headline, catalog.headline(50).text);
    let data_card = &report.categories[Category::Data.index()];
    assert_eq!(data_card.classification, Classification::Engine);
    assert_eq!(data_card.text, catalog.category_text(Category::Data, 3.0));
}

#[test]
fn gap_disappears_at_or_above_benchmark() {
    let bank = bank();
    let catalog = FeedbackCatalog::standard();
    let all_max: AnswerMap = bank
        .questions()
        .iter()
        .map(|question| (question.id, 4))
        .collect();

    let report = ResultsReport::build(&compute_results(&bank, &all_max), &catalog, 75, &contact());
    assert_eq!(report.final_percent, 100);
    assert_eq!(report.benchmark_gap, None);
    assert_eq!(report.band, ReadinessBand::Effective);

    let at_benchmark = ResultsReport::build(
        &compute_results(&bank, &all_max),
        &catalog,
        100,
        &contact(),
    );
    assert_eq!(at_benchmark.benchmark_gap, None);
}

#[test]
fn report_carries_contact_link() {
    let service = service();
    let report = service.score(&AnswerMap::new()).expect("empty map is valid");

    assert_eq!(report.final_percent, 0);
    assert_eq!(report.band, ReadinessBand::Critical);
    assert_eq!(report.benchmark_gap, Some(75));
    assert!(report.contact.mailto().starts_with("mailto:hello@kai.example?subject="));
}

#[test]
fn screen_view_tracks_each_step() {
    let service = service();
    let bank = service.bank();
    let mut session = QuizSession::new();

    let welcome = service.screen(&session);
    assert_eq!(welcome.step, Step::Welcome);
    assert!(welcome.question.is_none());
    assert!(welcome.report.is_none());

    session = service.apply(session, &SessionAction::Start).expect("start");
    let quiz = service.screen(&session);
    assert_eq!(quiz.step, Step::Quiz);
    assert_eq!(quiz.question.as_ref().map(|q| q.id), Some(bank.questions()[0].id));
    assert!(!quiz.can_go_back);

    for question in bank.questions() {
        session = service
            .apply(
                session,
                &SessionAction::Answer {
                    score: mixed_score(question.category),
                },
            )
            .expect("answer");
    }
    let lead_screen = service.screen(&session);
    assert_eq!(lead_screen.step, Step::LeadCapture);
    assert!(lead_screen.question.is_none());
    assert!(lead_screen.can_go_back);

    session = service
        .apply(session, &SessionAction::SubmitLead { lead: lead() })
        .expect("submit");
    let results = service.screen(&session);
    assert_eq!(results.step, Step::Results);
    let report = results.report.expect("report on results screen");
    assert_eq!(report.final_percent, 50);
    assert_eq!(results.lead, Some(lead()));
}
