use super::super::contact::ContactInvitation;
use super::super::feedback::{Classification, FeedbackCatalog, ReadinessBand};
use super::super::scoring::UserResults;
use super::views::CategoryCard;
use serde::Serialize;

/// Results page content assembled from scores and the feedback catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub raw_score: i64,
    pub final_percent: u8,
    pub band: ReadinessBand,
    pub band_label: &'static str,
    pub headline: String,
    pub benchmark_percent: u8,
    /// Points short of the benchmark; absent once the benchmark is met.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_gap: Option<u8>,
    pub categories: Vec<CategoryCard>,
    pub contact: ContactInvitation,
}

impl ResultsReport {
    pub fn build(
        results: &UserResults,
        catalog: &FeedbackCatalog,
        benchmark_percent: u8,
        contact: &ContactInvitation,
    ) -> Self {
        let percent = results.final_percent;
        let band = ReadinessBand::from_percent(percent);

        let categories = results
            .category_scores
            .iter()
            .map(|(category, average)| {
                let classification = catalog.classify(*average);
                CategoryCard {
                    category,
                    label: category.label(),
                    average: *average,
                    classification,
                    classification_label: classification.label(),
                    text: catalog.category_text(category, *average).to_string(),
                }
            })
            .collect();

        Self {
            raw_score: results.raw_score,
            final_percent: percent,
            band,
            band_label: band.label(),
            headline: catalog.headline(percent).text.clone(),
            benchmark_percent,
            benchmark_gap: benchmark_percent
                .checked_sub(percent)
                .filter(|gap| *gap > 0),
            categories,
            contact: contact.clone(),
        }
    }

    pub fn engines(&self) -> impl Iterator<Item = &CategoryCard> {
        self.categories
            .iter()
            .filter(|card| card.classification == Classification::Engine)
    }

    pub fn barriers(&self) -> impl Iterator<Item = &CategoryCard> {
        self.categories
            .iter()
            .filter(|card| card.classification == Classification::Barrier)
    }
}
