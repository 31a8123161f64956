//! Candidate analysis records consumed read-only by the employer dashboard.

use serde::{Deserialize, Serialize};

use crate::turn::ChatTurn;

/// A precomputed candidate-to-vacancy match summary.
/// Sourced wholesale from one fetch; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: String,
    pub candidate_id: String,
    /// Suitability score in percent, 0–100.
    pub final_score: u8,
    pub summary: String,
    pub conversation: Vec<ChatTurn>,
    pub created_at: String,
}

/// Score bucket selectable in the dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    All,
    High,
    Medium,
    Low,
}

impl ScoreBucket {
    /// Whether a score falls into this bucket.
    /// High is 80 and above, medium is 50–79, low is below 50.
    pub fn matches(&self, score: u8) -> bool {
        match self {
            ScoreBucket::All => true,
            ScoreBucket::High => score >= 80,
            ScoreBucket::Medium => (50..80).contains(&score),
            ScoreBucket::Low => score < 50,
        }
    }

    pub fn all() -> &'static [ScoreBucket] {
        &[
            ScoreBucket::All,
            ScoreBucket::High,
            ScoreBucket::Medium,
            ScoreBucket::Low,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            ScoreBucket::All => "All candidates",
            ScoreBucket::High => "High (80%+)",
            ScoreBucket::Medium => "Medium (50-79%)",
            ScoreBucket::Low => "Low (<50%)",
        }
    }
}

impl Default for ScoreBucket {
    fn default() -> Self {
        ScoreBucket::All
    }
}
