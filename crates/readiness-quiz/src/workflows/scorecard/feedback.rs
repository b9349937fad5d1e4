use super::domain::{Category, CategoryMap};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENGINE_THRESHOLD: f64 = 3.0;

/// Headline copy for every percent up to and including `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub max: u8,
    pub text: String,
}

/// Per-category copy, one block for strengths and one for weaknesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFeedback {
    pub engine: String,
    pub barrier: String,
}

/// Strength/weakness label for a category average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Engine,
    Barrier,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Engine => "Growth engine",
            Self::Barrier => "Barrier",
        }
    }
}

/// Colour band of the headline gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    Critical,
    Developing,
    Effective,
}

impl ReadinessBand {
    pub const fn from_percent(percent: u8) -> Self {
        if percent < 40 {
            Self::Critical
        } else if percent < 75 {
            Self::Developing
        } else {
            Self::Effective
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Developing => "Developing",
            Self::Effective => "Effective",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback catalog needs at least one score range")]
    NoRanges,
    #[error("score range thresholds must ascend strictly ({previous} then {next})")]
    UnorderedRanges { previous: u8, next: u8 },
}

/// Static editorial copy plus the rules for choosing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackCatalog {
    ranges: Vec<ScoreRange>,
    categories: CategoryMap<CategoryFeedback>,
    engine_threshold: f64,
}

impl FeedbackCatalog {
    pub fn new(
        ranges: Vec<ScoreRange>,
        categories: CategoryMap<CategoryFeedback>,
        engine_threshold: f64,
    ) -> Result<Self, FeedbackError> {
        if ranges.is_empty() {
            return Err(FeedbackError::NoRanges);
        }
        if let Some(pair) = ranges.windows(2).find(|pair| pair[0].max >= pair[1].max) {
            return Err(FeedbackError::UnorderedRanges {
                previous: pair[0].max,
                next: pair[1].max,
            });
        }

        Ok(Self {
            ranges,
            categories,
            engine_threshold,
        })
    }

    pub fn standard() -> Self {
        Self::new(
            standard_ranges(),
            CategoryMap::from_fn(standard_category_feedback),
            DEFAULT_ENGINE_THRESHOLD,
        )
        .expect("standard feedback ranges ascend")
    }

    /// First range whose threshold covers the percent, else the highest range.
    pub fn headline(&self, percent: u8) -> &ScoreRange {
        self.ranges
            .iter()
            .find(|range| percent <= range.max)
            .or_else(|| self.ranges.last())
            .expect("catalog holds at least one range")
    }

    pub fn classify(&self, average: f64) -> Classification {
        if average >= self.engine_threshold {
            Classification::Engine
        } else {
            Classification::Barrier
        }
    }

    pub fn category_text(&self, category: Category, average: f64) -> &str {
        let feedback = &self.categories[category];
        match self.classify(average) {
            Classification::Engine => &feedback.engine,
            Classification::Barrier => &feedback.barrier,
        }
    }

    pub fn ranges(&self) -> &[ScoreRange] {
        &self.ranges
    }

    pub fn engine_threshold(&self) -> f64 {
        self.engine_threshold
    }
}

fn range(max: u8, text: &str) -> ScoreRange {
    ScoreRange {
        max,
        text: text.to_string(),
    }
}

fn standard_ranges() -> Vec<ScoreRange> {
    vec![
        range(
            30,
            "Day to day, AI is something people talk about rather than use. Work runs on manual effort and individual memory, so every new tool lands on ground that cannot hold it yet.",
        ),
        range(
            55,
            "Pockets of the organization are experimenting, but results stay with the people who found them. Without shared data and ownership, wins do not compound.",
        ),
        range(
            75,
            "The foundations are mostly in place. A few specific barriers are keeping promising pilots from turning into measurable business results.",
        ),
        range(
            100,
            "AI is already part of how the organization works. The opportunity now is scale: turning proven use cases into a durable competitive advantage.",
        ),
    ]
}

fn standard_category_feedback(category: Category) -> CategoryFeedback {
    let (engine, barrier) = match category {
        Category::Execution => (
            "Ideas move to delivery. There is ownership and a path from pilot to production, which means new capabilities can actually ship.",
            "Initiatives stall between enthusiasm and delivery. Without a clear owner and a repeatable rollout path, tools get bought and not used.",
        ),
        Category::Adoption => (
            "People pick up new ways of working quickly and share what works. Change spreads through the teams instead of being pushed onto them.",
            "New tools fade after the launch week. Training and internal champions are missing, so old habits quietly win.",
        ),
        Category::Data => (
            "Data is connected, trusted and documented. Any AI effort starts from a solid base instead of a cleanup project.",
            "Knowledge is scattered and numbers are disputed. Any AI built on top of this will inherit the confusion.",
        ),
        Category::Mindset => (
            "Leadership treats AI as a growth lever with measurable goals, and the culture makes room for fast experiments.",
            "AI is seen as hype or a side experiment. Without goals defined up front, nobody can tell whether an investment worked.",
        ),
    };

    CategoryFeedback {
        engine: engine.to_string(),
        barrier: barrier.to_string(),
    }
}
