//! Dashboard query — pure client-side filtering over the fetched
//! analysis list. No pagination, no sorting beyond source order.

use screening_types::analysis::{AnalysisRecord, ScoreBucket};

/// The employer dashboard's filter state: a free-text search term and a
/// score bucket, ANDed together.
#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub search_term: String,
    pub bucket: ScoreBucket,
}

impl DashboardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on `summary` combined with the
    /// score-bucket predicate. Source order is preserved.
    pub fn filter<'a>(&self, records: &'a [AnalysisRecord]) -> Vec<&'a AnalysisRecord> {
        let needle = self.search_term.to_lowercase();
        records
            .iter()
            .filter(|record| {
                let matches_search =
                    needle.is_empty() || record.summary.to_lowercase().contains(&needle);
                matches_search && self.bucket.matches(record.final_score)
            })
            .collect()
    }
}
