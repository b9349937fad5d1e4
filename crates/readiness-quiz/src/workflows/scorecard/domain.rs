use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// The four readiness dimensions every question is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Execution,
    Adoption,
    Data,
    Mindset,
}

impl Category {
    pub const COUNT: usize = 4;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [Self::Execution, Self::Adoption, Self::Data, Self::Mindset]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Execution => 0,
            Self::Adoption => 1,
            Self::Data => 2,
            Self::Mindset => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Execution => "Execution Capability",
            Self::Adoption => "Adoption & Change",
            Self::Data => "Data Readiness",
            Self::Mindset => "Strategic Mindset",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size table with exactly one slot per [`Category`].
///
/// Serializes as a JSON object keyed by category in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryMap<T> {
    slots: [T; Category::COUNT],
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            slots: Category::ordered().map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ordered().into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|category| f(category, &self[category]))
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &Self::Output {
        &self.slots[category.index()]
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut Self::Output {
        &mut self.slots[category.index()]
    }
}

impl<T: Serialize> Serialize for CategoryMap<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, value) in self.iter() {
            map.serialize_entry(&category, value)?;
        }
        map.end()
    }
}

/// Stable question identity; answers are keyed by this, never by list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub score: i32,
    pub label: String,
}

impl AnswerOption {
    pub fn new(score: i32, label: impl Into<String>) -> Self {
        Self {
            score,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn min_score(&self) -> Option<i32> {
        self.options.iter().map(|option| option.score).min()
    }

    pub fn max_score(&self) -> Option<i32> {
        self.options.iter().map(|option| option.score).max()
    }

    pub fn option_for_score(&self, score: i32) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.score == score)
    }
}

/// Chosen option score per question id. Re-answering overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    scores: BTreeMap<QuestionId, i32>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the score, returning the value it replaced.
    pub fn record(&mut self, id: QuestionId, score: i32) -> Option<i32> {
        self.scores.insert(id, score)
    }

    pub fn get(&self, id: QuestionId) -> Option<i32> {
        self.scores.get(&id).copied()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.scores.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, i32)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }
}

impl FromIterator<(QuestionId, i32)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, i32)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Contact details captured on the lead form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub company: String,
}

impl UserInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company: company.into(),
        }
    }

    /// Trims every field and rejects the submission when a required field is blank.
    pub fn validated(&self) -> Result<UserInfo, LeadValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let company = self.company.trim();

        let missing: Vec<LeadField> = [
            (LeadField::Name, name),
            (LeadField::Email, email),
            (LeadField::Company, company),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(LeadValidationError::MissingFields(missing));
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(LeadValidationError::InvalidEmail(email.to_string())),
        }

        Ok(UserInfo::new(name, email, company))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Email,
    Company,
}

impl LeadField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadValidationError {
    #[error("required lead fields missing: {}", join_fields(.0))]
    MissingFields(Vec<LeadField>),
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
}

fn join_fields(fields: &[LeadField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Screens of the quiz flow, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Welcome,
    Quiz,
    LeadCapture,
    Results,
}

impl Step {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Quiz => "Quiz",
            Self::LeadCapture => "Lead Capture",
            Self::Results => "Results",
        }
    }
}
