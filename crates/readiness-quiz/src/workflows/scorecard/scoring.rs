use super::bank::{QuestionBank, ScoreScale};
use super::domain::{AnswerMap, CategoryMap};
use serde::Serialize;

/// Outcome of a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResults {
    pub raw_score: i64,
    pub final_percent: u8,
    pub category_scores: CategoryMap<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct CategoryTally {
    total: i64,
    count: u32,
}

/// Scores an answer map against the bank.
///
/// Questions without an answer contribute 0 to both the raw score and their
/// category total while still counting toward the category average. Sums are
/// kept in `i64`, so arbitrary `i32` scores stay exact.
pub fn compute_results(bank: &QuestionBank, answers: &AnswerMap) -> UserResults {
    let mut raw_score = 0_i64;
    let mut tallies = CategoryMap::<CategoryTally>::default();

    for question in bank.questions() {
        let score = i64::from(answers.get(question.id).unwrap_or(0));
        raw_score += score;

        let tally = &mut tallies[question.category];
        tally.total += score;
        tally.count += 1;
    }

    let category_scores = tallies.map(|_, tally| tally.total as f64 / f64::from(tally.count));

    UserResults {
        raw_score,
        final_percent: normalize(raw_score, bank.scale()),
        category_scores,
    }
}

/// Maps a raw score onto 0..=100 using round-half-up, then clamps.
pub fn normalize(raw_score: i64, scale: ScoreScale) -> u8 {
    let offset = raw_score.saturating_sub(scale.min_raw);
    let ratio = offset as f64 / scale.range() as f64;
    let percent = round_half_up(ratio * 100.0);
    percent.clamp(0.0, 100.0) as u8
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
