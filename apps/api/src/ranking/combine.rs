//! Client-side score combination.
//!
//! The backend-supplied `final_score` is authoritative. When it is absent,
//! `derive_final_scores` fills the gap from the per-algorithm scores so the
//! ranking rules always have something to sort by. Weighted average is the
//! default strategy; the alternatives mirror what the scoring backend supports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ranking::models::ResultSet;

/// Floor applied before harmonic/geometric combination so a zero score cannot
/// divide by zero or collapse the product.
const SCORE_FLOOR: f64 = 0.001;

/// Weight applied to algorithms not present in `DEFAULT_WEIGHTS`.
const FALLBACK_WEIGHT: f64 = 0.1;

/// Per-algorithm weights for the weighted-average strategy. The constants come
/// from the scoring backend's measured per-family performance; deep-learning
/// models weigh more than similarity heuristics.
const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("bert", 0.25),
    ("sbert", 0.22),
    ("distilbert", 0.20),
    ("xgboost", 0.20),
    ("ner", 0.20),
    ("xlm", 0.18),
    ("random_forest", 0.18),
    ("svm", 0.16),
    ("neural_network", 0.15),
    ("cosine", 0.15),
    ("jaccard", 0.12),
];

pub fn default_weight(algorithm: &str) -> f64 {
    DEFAULT_WEIGHTS
        .iter()
        .find(|(name, _)| *name == algorithm)
        .map(|(_, w)| *w)
        .unwrap_or(FALLBACK_WEIGHT)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineStrategy {
    #[default]
    WeightedAverage,
    HarmonicMean,
    GeometricMean,
    MaxScore,
    MinScore,
    MedianScore,
}

/// Combines one candidate's per-algorithm scores into a single value in [0, 1].
/// `None` when the candidate has no scores at all.
pub fn combine(scores: &BTreeMap<String, f64>, strategy: CombineStrategy) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let values: Vec<f64> = scores.values().copied().collect();

    let combined = match strategy {
        CombineStrategy::WeightedAverage => {
            let mut weighted_sum = 0.0;
            let mut total_weight = 0.0;
            for (algorithm, score) in scores {
                let weight = default_weight(algorithm);
                weighted_sum += score * weight;
                total_weight += weight;
            }
            weighted_sum / total_weight
        }
        CombineStrategy::HarmonicMean => {
            let inverse_sum: f64 = values.iter().map(|s| 1.0 / s.max(SCORE_FLOOR)).sum();
            values.len() as f64 / inverse_sum
        }
        CombineStrategy::GeometricMean => {
            let product: f64 = values.iter().map(|s| s.max(SCORE_FLOOR)).product();
            product.powf(1.0 / values.len() as f64)
        }
        CombineStrategy::MaxScore => values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        CombineStrategy::MinScore => values.iter().cloned().fold(f64::INFINITY, f64::min),
        CombineStrategy::MedianScore => {
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
    };

    Some(combined.clamp(0.0, 1.0))
}

/// Fills `final_score` where the backend omitted it. Backend-supplied values
/// are never overwritten.
pub fn derive_final_scores(set: &ResultSet, strategy: CombineStrategy) -> ResultSet {
    let mut derived = set.clone();
    for candidate in &mut derived.results {
        if candidate.final_score.is_none() {
            candidate.final_score = combine(&candidate.scores, strategy);
        }
    }
    derived
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Confidence in a candidate's combined score, from how tightly the individual
/// algorithms agree. Fewer than two scores cannot agree at all.
pub fn confidence(scores: &BTreeMap<String, f64>) -> Confidence {
    if scores.len() < 2 {
        return Confidence::Low;
    }

    let values: Vec<f64> = scores.values().copied().collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev < 0.1 {
        Confidence::High
    } else if std_dev < 0.25 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::models::{CandidateResult, ResultSet};

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_scores_combine_to_none() {
        assert_eq!(combine(&BTreeMap::new(), CombineStrategy::WeightedAverage), None);
    }

    #[test]
    fn test_weighted_average_uses_default_weights() {
        // bert 0.25, cosine 0.15: (0.9*0.25 + 0.6*0.15) / 0.4 = 0.7875
        let combined = combine(
            &scores(&[("bert", 0.9), ("cosine", 0.6)]),
            CombineStrategy::WeightedAverage,
        )
        .unwrap();
        assert!((combined - 0.7875).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_algorithm_gets_fallback_weight() {
        assert_eq!(default_weight("bert"), 0.25);
        assert_eq!(default_weight("mystery"), 0.1);

        // Equal fallback weights reduce to a plain mean.
        let combined = combine(
            &scores(&[("mystery_a", 0.4), ("mystery_b", 0.8)]),
            CombineStrategy::WeightedAverage,
        )
        .unwrap();
        assert!((combined - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_harmonic_mean_penalizes_low_scores() {
        let set = scores(&[("bert", 0.9), ("cosine", 0.1)]);
        let harmonic = combine(&set, CombineStrategy::HarmonicMean).unwrap();
        let arithmetic = 0.5;
        assert!(harmonic < arithmetic);
    }

    #[test]
    fn test_harmonic_mean_survives_zero_score() {
        let combined = combine(
            &scores(&[("bert", 0.0), ("cosine", 0.8)]),
            CombineStrategy::HarmonicMean,
        )
        .unwrap();
        assert!(combined.is_finite());
        assert!(combined >= 0.0);
    }

    #[test]
    fn test_geometric_mean() {
        let combined = combine(
            &scores(&[("bert", 0.4), ("cosine", 0.9)]),
            CombineStrategy::GeometricMean,
        )
        .unwrap();
        assert!((combined - (0.4f64 * 0.9).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_max_min_median() {
        let set = scores(&[("a", 0.2), ("b", 0.5), ("c", 0.9)]);
        assert_eq!(combine(&set, CombineStrategy::MaxScore), Some(0.9));
        assert_eq!(combine(&set, CombineStrategy::MinScore), Some(0.2));
        assert_eq!(combine(&set, CombineStrategy::MedianScore), Some(0.5));

        let even = scores(&[("a", 0.2), ("b", 0.6)]);
        assert!((combine(&even, CombineStrategy::MedianScore).unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_derive_fills_only_missing_final_scores() {
        let mut supplied = CandidateResult::new("supplied.pdf");
        supplied.scores = scores(&[("bert", 0.2)]);
        supplied.final_score = Some(0.95);

        let mut missing = CandidateResult::new("missing.pdf");
        missing.scores = scores(&[("bert", 0.6)]);

        let unscorable = CandidateResult::new("unscorable.pdf");

        let derived = derive_final_scores(
            &ResultSet {
                results: vec![supplied, missing, unscorable],
                summary: None,
            },
            CombineStrategy::WeightedAverage,
        );

        assert_eq!(derived.results[0].final_score, Some(0.95));
        assert_eq!(derived.results[1].final_score, Some(0.6));
        assert_eq!(derived.results[2].final_score, None);
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(confidence(&scores(&[("bert", 0.9)])), Confidence::Low);
        assert_eq!(
            confidence(&scores(&[("bert", 0.8), ("cosine", 0.82)])),
            Confidence::High
        );
        assert_eq!(
            confidence(&scores(&[("bert", 0.8), ("cosine", 0.5)])),
            Confidence::Medium
        );
        assert_eq!(
            confidence(&scores(&[("bert", 0.9), ("cosine", 0.1)])),
            Confidence::Low
        );
    }
}
