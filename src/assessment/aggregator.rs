// src/assessment/aggregator.rs

use std::collections::BTreeMap;

use serde::Serialize;

use super::bank::{Difficulty, QuestionBank};
use super::scorer::{PerformanceBand, ScoreResult, ScoringPolicy, score_record};
use crate::models::response_record::ResponseRecord;

/// One scored attempt, flattened for the instructor table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub timestamp: String,
    pub score: usize,
    pub total_questions: usize,
    pub percentage: f64,
    pub passed: bool,
    pub band: PerformanceBand,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub count: usize,
    pub average_percentage: f64,
    pub pass_count: usize,
    pub max_percentage: f64,
}

/// Correctness ratio for one topic or difficulty label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelStats {
    pub correct_count: usize,
    pub total_count: usize,
    pub percentage: f64,
}

/// A record that was skipped, or scored with problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportWarning {
    /// Respondent email, or the storage unit when the record never parsed.
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    pub per_student: Vec<StudentRow>,
    pub overall: OverallStats,
    pub per_topic: BTreeMap<String, LabelStats>,
    pub per_difficulty: BTreeMap<Difficulty, LabelStats>,
    /// Number of attempts per score, indexed by score (0 ..= bank size).
    pub score_distribution: Vec<usize>,
    pub band_counts: BTreeMap<PerformanceBand, usize>,
    pub warnings: Vec<ReportWarning>,
}

#[derive(Default)]
struct Tally {
    correct: usize,
    total: usize,
}

impl Tally {
    fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    fn finish(self) -> LabelStats {
        LabelStats {
            correct_count: self.correct,
            total_count: self.total,
            percentage: self.correct as f64 / self.total as f64 * 100.0,
        }
    }
}

fn finish_tallies<K: Ord>(tallies: BTreeMap<K, Tally>) -> BTreeMap<K, LabelStats> {
    tallies
        .into_iter()
        .filter(|(_, t)| t.total > 0)
        .map(|(k, t)| (k, t.finish()))
        .collect()
}

/// Re-scores every record and folds the results into the instructor report.
///
/// Pure and order-preserving: `per_student` follows the order of `records`.
/// Records that cannot be scored are left out and reported in `warnings`.
pub fn aggregate(
    records: &[ResponseRecord],
    bank: &QuestionBank,
    policy: &ScoringPolicy,
) -> AggregateReport {
    let mut report = AggregateReport {
        score_distribution: vec![0; bank.len() + 1],
        ..AggregateReport::default()
    };
    let mut topics: BTreeMap<String, Tally> = BTreeMap::new();
    let mut difficulties: BTreeMap<Difficulty, Tally> = BTreeMap::new();
    let mut percentage_sum = 0.0;

    for record in records {
        let result: ScoreResult = match score_record(record, bank, policy) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(email = %record.email, timestamp = %record.timestamp, "Skipping record: {}", e);
                report.warnings.push(ReportWarning {
                    source: record.email.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        for w in &result.warnings {
            report.warnings.push(ReportWarning {
                source: record.email.clone(),
                message: w.to_string(),
            });
        }
        // Still counted; the dashboard just cannot place it in time.
        if record.submitted_at().is_none() {
            report.warnings.push(ReportWarning {
                source: record.email.clone(),
                message: format!("timestamp '{}' is not a recognized date", record.timestamp),
            });
        }

        // Review entries follow bank order.
        for (question, review) in bank.iter().zip(&result.review) {
            if !review.answered {
                continue;
            }
            topics
                .entry(question.topic.clone())
                .or_default()
                .record(review.is_correct);
            difficulties
                .entry(question.difficulty)
                .or_default()
                .record(review.is_correct);
        }

        report.overall.count += 1;
        if result.passed {
            report.overall.pass_count += 1;
        }
        percentage_sum += result.percentage;
        report.overall.max_percentage = report.overall.max_percentage.max(result.percentage);
        if let Some(slot) = report.score_distribution.get_mut(result.score) {
            *slot += 1;
        }
        *report.band_counts.entry(result.band).or_insert(0) += 1;

        report.per_student.push(StudentRow {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            timestamp: record.timestamp.clone(),
            score: result.score,
            total_questions: result.total_questions,
            percentage: result.percentage,
            passed: result.passed,
            band: result.band,
        });
    }

    if report.overall.count > 0 {
        report.overall.average_percentage = percentage_sum / report.overall.count as f64;
    }
    report.per_topic = finish_tallies(topics);
    report.per_difficulty = finish_tallies(difficulties);

    report
}
