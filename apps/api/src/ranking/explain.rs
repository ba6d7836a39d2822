//! Score bands and per-candidate explanation text.

use serde::{Deserialize, Serialize};

use crate::ranking::models::CandidateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent match",
            ScoreBand::Good => "Good match",
            ScoreBand::Fair => "Fair match",
            ScoreBand::Poor => "Limited match",
        }
    }
}

pub fn score_band(score: f64) -> ScoreBand {
    if score >= 0.8 {
        ScoreBand::Excellent
    } else if score >= 0.6 {
        ScoreBand::Good
    } else if score >= 0.4 {
        ScoreBand::Fair
    } else {
        ScoreBand::Poor
    }
}

/// Candidate counts per band. Candidates without a final score are not banded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreDistribution {
    pub excellent: u32,
    pub good: u32,
    pub fair: u32,
    pub poor: u32,
}

impl ScoreDistribution {
    pub fn record(&mut self, band: ScoreBand) {
        match band {
            ScoreBand::Excellent => self.excellent += 1,
            ScoreBand::Good => self.good += 1,
            ScoreBand::Fair => self.fair += 1,
            ScoreBand::Poor => self.poor += 1,
        }
    }
}

/// One-line explanation for a ranked candidate: band, overall percentage, and
/// the strongest individual algorithm when any scores are present.
pub fn explanation(candidate: &CandidateResult, position: &str) -> Option<String> {
    let score = candidate.final_score?;
    let band = score_band(score);

    let mut text = format!(
        "{} for {} position (Overall: {:.1}%).",
        band.label(),
        position,
        score * 100.0
    );

    let best = candidate
        .scores
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal));
    if let Some((algorithm, best_score)) = best {
        text.push_str(&format!(
            " Strongest performance in {} analysis ({:.1}%).",
            algorithm.to_uppercase(),
            best_score * 100.0
        ));
    }

    Some(text)
}
