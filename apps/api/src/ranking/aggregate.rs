//! Ranking and summary derivation over a `ResultSet`.
//!
//! Everything here is pure and synchronous. Partial data (missing scores,
//! missing final score, missing rank) is absorbed by the rules below and never
//! turns into an error; only a malformed payload fails, and that happens at the
//! deserialization boundary in `models`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ranking::explain::{score_band, ScoreDistribution};
use crate::ranking::models::{CandidateResult, ResultSet};

/// Every algorithm identifier that appears in any candidate's score map,
/// lexicographically sorted. This is the column order for tabular display and
/// CSV export; identifiers are opaque, so no other ordering exists.
pub fn algorithm_universe(set: &ResultSet) -> Vec<String> {
    let universe: BTreeSet<&str> = set
        .results
        .iter()
        .flat_map(|c| c.scores.keys().map(String::as_str))
        .collect();
    universe.into_iter().map(str::to_owned).collect()
}

/// Produces the total display ordering for a result set.
///
/// When every candidate already carries a rank the backend ordering is
/// authoritative and we only sort by it. Otherwise: final score descending,
/// scoreless candidates after all scored ones, stable throughout (ties and
/// missing values never reorder), then ranks assigned 1..N.
///
/// Idempotent: the output always has a full set of ranks, so a second pass
/// takes the authoritative branch and returns the same sequence.
pub fn rank(set: &ResultSet) -> Vec<CandidateResult> {
    let mut ordered: Vec<CandidateResult> = set.results.clone();

    if !ordered.is_empty() && ordered.iter().all(|c| c.rank.is_some()) {
        ordered.sort_by_key(|c| c.rank);
        return ordered;
    }

    ordered.sort_by(|a, b| match (a.final_score, b.final_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    for (idx, candidate) in ordered.iter_mut().enumerate() {
        candidate.rank = Some(idx as u32 + 1);
    }
    ordered
}

/// Summary block rendered above the ranked list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    /// Mean final score over candidates that have one. `None` (never `0.0`)
    /// when no candidate has a final score.
    pub average_score: Option<f64>,
    pub top_score: Option<f64>,
    pub algorithm_count: usize,
    pub success_count: u32,
    pub failure_count: u32,
    pub distribution: ScoreDistribution,
}

pub fn summarize(set: &ResultSet) -> SummaryStats {
    let finals: Vec<f64> = set.results.iter().filter_map(|c| c.final_score).collect();

    let average_score = if finals.is_empty() {
        None
    } else {
        Some(finals.iter().sum::<f64>() / finals.len() as f64)
    };
    let top_score = finals.iter().cloned().fold(None, |acc: Option<f64>, s| {
        Some(acc.map_or(s, |a| a.max(s)))
    });

    // Backend counters win when present; otherwise count by error presence.
    let (success_count, failure_count) = match set.summary.as_ref() {
        Some(s) if s.total_resumes_uploaded.is_some() && s.successfully_processed.is_some() => {
            let total = s.total_resumes_uploaded.unwrap();
            let ok = s.successfully_processed.unwrap();
            (ok, total.saturating_sub(ok))
        }
        _ => {
            let ok = set.results.iter().filter(|c| c.error.is_none()).count() as u32;
            let failed = set.results.len() as u32 - ok;
            (ok, failed)
        }
    };

    let mut distribution = ScoreDistribution::default();
    for score in &finals {
        distribution.record(score_band(*score));
    }

    SummaryStats {
        average_score,
        top_score,
        algorithm_count: algorithm_universe(set).len(),
        success_count,
        failure_count,
        distribution,
    }
}

/// Per-algorithm score statistics, over the candidates that have that
/// algorithm's score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlgorithmStats {
    pub average_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub scored_candidates: usize,
}

pub fn algorithm_summary(set: &ResultSet) -> BTreeMap<String, AlgorithmStats> {
    let mut summary = BTreeMap::new();

    for algorithm in algorithm_universe(set) {
        let scores: Vec<f64> = set
            .results
            .iter()
            .filter_map(|c| c.scores.get(&algorithm).copied())
            .collect();
        if scores.is_empty() {
            continue;
        }
        summary.insert(
            algorithm,
            AlgorithmStats {
                average_score: scores.iter().sum::<f64>() / scores.len() as f64,
                min_score: scores.iter().cloned().fold(f64::INFINITY, f64::min),
                max_score: scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                scored_candidates: scores.len(),
            },
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::models::JobSummary;

    fn candidate(
        filename: &str,
        scores: &[(&str, f64)],
        final_score: Option<f64>,
    ) -> CandidateResult {
        let mut c = CandidateResult::new(filename);
        c.scores = scores.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        c.final_score = final_score;
        c
    }

    fn set_of(results: Vec<CandidateResult>) -> ResultSet {
        ResultSet {
            results,
            summary: None,
        }
    }

    #[test]
    fn test_universe_is_union_over_partial_subsets() {
        let set = set_of(vec![
            candidate("a.pdf", &[("bert", 0.9), ("cosine", 0.8)], Some(0.85)),
            candidate("b.pdf", &[("bert", 0.5)], None),
        ]);
        assert_eq!(algorithm_universe(&set), vec!["bert", "cosine"]);
    }

    #[test]
    fn test_universe_is_sorted_and_order_independent() {
        let a = candidate("a.pdf", &[("ner", 0.2), ("bert", 0.9)], None);
        let b = candidate("b.pdf", &[("cosine", 0.7)], None);

        let forward = algorithm_universe(&set_of(vec![a.clone(), b.clone()]));
        let reverse = algorithm_universe(&set_of(vec![b, a]));

        assert_eq!(forward, vec!["bert", "cosine", "ner"]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_universe_empty_input_yields_empty_output() {
        assert!(algorithm_universe(&set_of(vec![])).is_empty());
    }

    #[test]
    fn test_rank_sorts_by_final_score_and_assigns_ranks() {
        // A scored 0.85, B unscored: A first, B after.
        let set = set_of(vec![
            candidate("b.pdf", &[("bert", 0.5)], None),
            candidate("a.pdf", &[("bert", 0.9), ("cosine", 0.8)], Some(0.85)),
        ]);

        let ranked = rank(&set);
        assert_eq!(ranked[0].filename, "a.pdf");
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].filename, "b.pdf");
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn test_rank_respects_explicit_ranks_over_input_order() {
        let mut a = candidate("a.pdf", &[], Some(0.5));
        let mut b = candidate("b.pdf", &[], Some(0.9));
        let mut c = candidate("c.pdf", &[], Some(0.1));
        a.rank = Some(2);
        b.rank = Some(1);
        c.rank = Some(3);

        let ranked = rank(&set_of(vec![a, b, c]));
        let order: Vec<&str> = ranked.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(order, vec!["b.pdf", "a.pdf", "c.pdf"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties_and_missing_scores() {
        let set = set_of(vec![
            candidate("tie1.pdf", &[], Some(0.7)),
            candidate("none1.pdf", &[], None),
            candidate("tie2.pdf", &[], Some(0.7)),
            candidate("none2.pdf", &[], None),
        ]);

        let ranked = rank(&set);
        let order: Vec<&str> = ranked.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(order, vec!["tie1.pdf", "tie2.pdf", "none1.pdf", "none2.pdf"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let set = set_of(vec![
            candidate("b.pdf", &[], None),
            candidate("a.pdf", &[], Some(0.85)),
            candidate("c.pdf", &[], Some(0.4)),
        ]);

        let once = rank(&set);
        let twice = rank(&ResultSet {
            results: once.clone(),
            summary: None,
        });
        assert_eq!(once, twice);
    }

    #[test]
    fn test_errored_candidate_sorts_after_scored_ones() {
        let mut broken = candidate("broken.pdf", &[], None);
        broken.error = Some("parse failed".to_string());
        let set = set_of(vec![broken, candidate("ok.pdf", &[("bert", 0.6)], Some(0.6))]);

        let ranked = rank(&set);
        assert_eq!(ranked[0].filename, "ok.pdf");
        assert_eq!(ranked[1].filename, "broken.pdf");
        assert_eq!(ranked[1].rank, Some(2));
    }

    #[test]
    fn test_summarize_empty_set_has_no_average_and_zero_counts() {
        let set = ResultSet {
            results: vec![],
            summary: Some(JobSummary {
                total_resumes_uploaded: Some(0),
                successfully_processed: Some(0),
                ..JobSummary::default()
            }),
        };

        let stats = summarize(&set);
        assert_eq!(stats.average_score, None);
        assert_eq!(stats.top_score, None);
        assert_eq!(stats.algorithm_count, 0);
        assert_eq!(stats.success_count, 0);
        assert_eq!(stats.failure_count, 0);
    }

    #[test]
    fn test_summarize_averages_only_scored_candidates() {
        let set = set_of(vec![
            candidate("a.pdf", &[], Some(0.8)),
            candidate("b.pdf", &[], Some(0.6)),
            candidate("c.pdf", &[], None),
        ]);

        let stats = summarize(&set);
        assert!((stats.average_score.unwrap() - 0.7).abs() < 1e-9);
        assert_eq!(stats.top_score, Some(0.8));
    }

    #[test]
    fn test_summarize_counts_from_backend_summary_when_present() {
        let set = ResultSet {
            results: vec![candidate("a.pdf", &[], Some(0.5))],
            summary: Some(JobSummary {
                total_resumes_uploaded: Some(5),
                successfully_processed: Some(3),
                ..JobSummary::default()
            }),
        };

        let stats = summarize(&set);
        assert_eq!(stats.success_count, 3);
        assert_eq!(stats.failure_count, 2);
    }

    #[test]
    fn test_summarize_counts_by_error_field_without_backend_summary() {
        let mut broken = candidate("broken.pdf", &[], None);
        broken.error = Some("parse failed".to_string());
        let set = set_of(vec![candidate("ok.pdf", &[], Some(0.5)), broken]);

        let stats = summarize(&set);
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.failure_count, 1);
    }

    #[test]
    fn test_summarize_distribution_bands() {
        let set = set_of(vec![
            candidate("a.pdf", &[], Some(0.9)),
            candidate("b.pdf", &[], Some(0.65)),
            candidate("c.pdf", &[], Some(0.1)),
            candidate("d.pdf", &[], None),
        ]);

        let stats = summarize(&set);
        assert_eq!(stats.distribution.excellent, 1);
        assert_eq!(stats.distribution.good, 1);
        assert_eq!(stats.distribution.fair, 0);
        assert_eq!(stats.distribution.poor, 1);
    }

    #[test]
    fn test_algorithm_summary_stats() {
        let set = set_of(vec![
            candidate("a.pdf", &[("bert", 0.9), ("cosine", 0.8)], None),
            candidate("b.pdf", &[("bert", 0.5)], None),
        ]);

        let summary = algorithm_summary(&set);
        let bert = &summary["bert"];
        assert!((bert.average_score - 0.7).abs() < 1e-9);
        assert_eq!(bert.min_score, 0.5);
        assert_eq!(bert.max_score, 0.9);
        assert_eq!(bert.scored_candidates, 2);
        assert_eq!(summary["cosine"].scored_candidates, 1);
    }
}
