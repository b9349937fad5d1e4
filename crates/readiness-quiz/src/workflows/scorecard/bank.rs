use super::domain::{AnswerOption, Category, CategoryMap, Question, QuestionId};
use serde::Serialize;
use std::collections::HashSet;

/// Ordered, immutable set of scorable questions.
///
/// Construction enforces the invariants scoring depends on: at least one
/// question, unique ids, at least one option per question, every category
/// covered, and a non-zero spread between the lowest and highest raw score.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    scale: ScoreScale,
    per_category: CategoryMap<usize>,
}

/// Raw-score bounds derived from the bank's shape.
///
/// Held as `i64` so sums over any number of `i32` option scores cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreScale {
    pub min_raw: i64,
    pub max_raw: i64,
}

impl ScoreScale {
    pub const fn range(&self) -> i64 {
        self.max_raw - self.min_raw
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error("question bank has no questions")]
    Empty,
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
    #[error("question {question_id} has no answer options")]
    NoOptions { question_id: QuestionId },
    #[error("no question covers the {0} category")]
    MissingCategory(Category),
    #[error("lowest and highest attainable raw scores are both {0}")]
    DegenerateScoreRange(i64),
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        let mut per_category = CategoryMap::<usize>::default();
        let mut min_raw = 0_i64;
        let mut max_raw = 0_i64;

        for question in &questions {
            if !seen.insert(question.id) {
                return Err(BankError::DuplicateQuestionId(question.id));
            }

            let (Some(low), Some(high)) = (question.min_score(), question.max_score()) else {
                return Err(BankError::NoOptions {
                    question_id: question.id,
                });
            };

            min_raw += i64::from(low);
            max_raw += i64::from(high);
            per_category[question.category] += 1;
        }

        if let Some((category, _)) = per_category.iter().find(|(_, count)| **count == 0) {
            return Err(BankError::MissingCategory(category));
        }

        if max_raw == min_raw {
            return Err(BankError::DegenerateScoreRange(min_raw));
        }

        Ok(Self {
            questions,
            scale: ScoreScale { min_raw, max_raw },
            per_category,
        })
    }

    /// The reference twelve-question AI readiness bank.
    pub fn standard() -> Self {
        Self::new(standard_questions()).expect("standard question bank satisfies invariants")
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions_in(&self, category: Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.per_category[category]
    }

    pub fn scale(&self) -> ScoreScale {
        self.scale
    }
}

fn question(id: u32, category: Category, text: &str, options: [&str; 4]) -> Question {
    Question {
        id: QuestionId(id),
        category,
        text: text.to_string(),
        options: options
            .into_iter()
            .zip(1..)
            .map(|(label, score)| AnswerOption::new(score, label))
            .collect(),
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        question(
            1,
            Category::Execution,
            "When a new AI tool looks promising, what usually happens next?",
            [
                "Someone mentions it in a meeting and it is forgotten.",
                "A few enthusiasts try it on their own time.",
                "A team runs a scoped pilot with an owner.",
                "There is a repeatable path from pilot to production rollout.",
            ],
        ),
        question(
            2,
            Category::Mindset,
            "How does leadership talk about AI today?",
            [
                "As hype that will pass.",
                "As a cost-cutting experiment for later.",
                "As a priority, without concrete targets yet.",
                "As a growth lever with owners and measurable goals.",
            ],
        ),
        question(
            3,
            Category::Data,
            "Where does the data your teams need for daily decisions live?",
            [
                "Scattered across inboxes, spreadsheets and people's heads.",
                "In a few systems that do not talk to each other.",
                "Mostly centralized, with some manual exports.",
                "In connected systems with clear ownership and access rules.",
            ],
        ),
        question(
            4,
            Category::Adoption,
            "How do employees react when a new tool is introduced?",
            [
                "Quiet resistance; old habits win.",
                "Polite use at first, then it fades.",
                "Most adopt it once they see a colleague succeed.",
                "They ask for it and suggest improvements.",
            ],
        ),
        question(
            5,
            Category::Execution,
            "Who owns AI initiatives in the organization?",
            [
                "Nobody in particular.",
                "IT, as a side project.",
                "A named owner with limited time and budget.",
                "A dedicated owner with budget and executive backing.",
            ],
        ),
        question(
            6,
            Category::Data,
            "How much do you trust the numbers in your core reports?",
            [
                "We argue about which spreadsheet is right.",
                "Roughly, after manual checks.",
                "Mostly, with known gaps.",
                "Fully; definitions are agreed and data is validated.",
            ],
        ),
        question(
            7,
            Category::Mindset,
            "How do you measure the success of a technology investment?",
            [
                "We rarely measure it.",
                "By whether people use it.",
                "By time saved, estimated after the fact.",
                "By business KPIs defined before the project starts.",
            ],
        ),
        question(
            8,
            Category::Adoption,
            "How is training handled when processes change?",
            [
                "People figure it out alone.",
                "A one-off session and a document nobody reads.",
                "Structured onboarding for the main users.",
                "Ongoing coaching with internal champions in every team.",
            ],
        ),
        question(
            9,
            Category::Execution,
            "How are repetitive tasks in your core processes handled?",
            [
                "Manually, the same way for years.",
                "Manually, with a few templates and shortcuts.",
                "Partly automated in some departments.",
                "Systematically mapped and automated where it pays off.",
            ],
        ),
        question(
            10,
            Category::Data,
            "Could you hand an AI assistant your company knowledge today?",
            [
                "No, most of it is undocumented.",
                "Some of it, after weeks of cleanup.",
                "Yes for key areas, with gaps.",
                "Yes; documentation is current and structured.",
            ],
        ),
        question(
            11,
            Category::Adoption,
            "What happens to a pilot that worked?",
            [
                "It stays with the person who ran it.",
                "It is shared informally.",
                "It is presented and sometimes expanded.",
                "It becomes the new standard with a rollout plan.",
            ],
        ),
        question(
            12,
            Category::Mindset,
            "How would you describe the organization's tolerance for experimentation?",
            [
                "Mistakes are punished, so nobody tries.",
                "Experiments are allowed if they cost nothing.",
                "Experiments are encouraged within limits.",
                "Fast, measured experiments are part of how we work.",
            ],
        ),
    ]
}
