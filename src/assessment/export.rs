// src/assessment/export.rs

use std::collections::BTreeMap;

use super::aggregator::{AggregateReport, LabelStats};

/// A flat table with a fixed column order, ready for CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Each row as a column-name to value mapping.
    pub fn records(&self) -> Vec<BTreeMap<&'static str, String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().copied().zip(row.iter().cloned()).collect())
            .collect()
    }

    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}", value)
}

fn label_table(first_column: &'static str, stats: Vec<(String, &LabelStats)>) -> Table {
    Table {
        columns: vec![first_column, "Correct", "Total", "Percentage"],
        rows: stats
            .into_iter()
            .map(|(label, s)| {
                vec![
                    label,
                    s.correct_count.to_string(),
                    s.total_count.to_string(),
                    percent(s.percentage),
                ]
            })
            .collect(),
    }
}

pub fn student_table(report: &AggregateReport) -> Table {
    Table {
        columns: vec![
            "Name",
            "Email",
            "Phone",
            "Submitted",
            "Score",
            "Percentage",
            "Status",
        ],
        rows: report
            .per_student
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.email.clone(),
                    row.phone.clone(),
                    row.timestamp.clone(),
                    format!("{}/{}", row.score, row.total_questions),
                    percent(row.percentage),
                    if row.passed { "PASSED" } else { "FAILED" }.to_string(),
                ]
            })
            .collect(),
    }
}

pub fn topic_table(report: &AggregateReport) -> Table {
    label_table(
        "Topic",
        report
            .per_topic
            .iter()
            .map(|(topic, s)| (topic.clone(), s))
            .collect(),
    )
}

pub fn difficulty_table(report: &AggregateReport) -> Table {
    label_table(
        "Difficulty",
        report
            .per_difficulty
            .iter()
            .map(|(difficulty, s)| (difficulty.to_string(), s))
            .collect(),
    )
}
