//! CSV export of a ranked result set.
//!
//! Column layout: `Rank, Filename, <alg> (%)... , Final Score (%), Skills Count`
//! with the algorithm columns in universe order. Every field is double-quoted
//! with internal quotes doubled, so filenames with commas and quotes survive a
//! round trip through any standard CSV reader. Records are separated by `\n`
//! and the output is UTF-8.

use chrono::NaiveDate;

use crate::ranking::aggregate::{algorithm_universe, rank};
use crate::ranking::models::ResultSet;

/// Rendered for a score cell whose algorithm did not score this candidate.
/// Distinct from `"0.0"`, which is a real score of zero.
const NOT_AVAILABLE: &str = "N/A";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn percent_cell(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.1}", s * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn push_record(out: &mut String, fields: &[String]) {
    let quoted: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    out.push_str(&quoted.join(","));
    out.push('\n');
}

/// Serializes the result set as CSV, ranking it first so the row order and the
/// `Rank` column are always populated. `rank` is idempotent, so exporting an
/// already-ranked set changes nothing.
pub fn to_csv(set: &ResultSet) -> String {
    let universe = algorithm_universe(set);
    let ranked = rank(set);

    let mut header = vec!["Rank".to_string(), "Filename".to_string()];
    header.extend(universe.iter().map(|alg| format!("{alg} (%)")));
    header.push("Final Score (%)".to_string());
    header.push("Skills Count".to_string());

    let mut out = String::new();
    push_record(&mut out, &header);

    for candidate in &ranked {
        let mut row = vec![
            candidate
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            candidate.filename.clone(),
        ];
        for algorithm in &universe {
            row.push(percent_cell(candidate.scores.get(algorithm).copied()));
        }
        row.push(percent_cell(candidate.final_score));
        row.push(candidate.extracted_skills.len().to_string());
        push_record(&mut out, &row);
    }

    out
}

/// Download filename for an exported ranking: `<context>_<ISO-date>.csv`.
/// The context is slugified so it stays a safe filename.
pub fn export_filename(context: &str, date: NaiveDate) -> String {
    let slug: String = context
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let slug = if slug.is_empty() {
        "ranking".to_string()
    } else {
        slug
    };
    format!("{}_{}.csv", slug, date.format("%Y-%m-%d"))
}
