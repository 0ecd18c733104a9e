// src/assessment/scorer.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::bank::{OptionKey, QuestionBank, QuestionId};
use crate::models::response_record::{AnswerMap, ResponseRecord};

/// Correct answers needed to pass the fifteen-question bank.
pub const DEFAULT_PASS_COUNT: usize = 10;

/// Correct answers needed for an "excellent" rating.
pub const DEFAULT_EXCELLENT_COUNT: usize = 13;

/// Absolute counts used to classify a score.
/// Neither count is rescaled when the bank size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringPolicy {
    pub pass_count: usize,
    pub excellent_count: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            pass_count: DEFAULT_PASS_COUNT,
            excellent_count: DEFAULT_EXCELLENT_COUNT,
        }
    }
}

impl ScoringPolicy {
    pub fn with_pass_count(pass_count: usize) -> Self {
        Self {
            pass_count,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Satisfactory,
    BelowPassing,
}

impl PerformanceBand {
    pub fn classify(score: usize, policy: &ScoringPolicy) -> Self {
        if score >= policy.excellent_count && score >= policy.pass_count {
            PerformanceBand::Excellent
        } else if score >= policy.pass_count {
            PerformanceBand::Satisfactory
        } else {
            PerformanceBand::BelowPassing
        }
    }
}

/// An answer entry that could not be matched against the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreWarning {
    UnparsableQuestionId { raw: String },
    UnknownQuestion { question_id: QuestionId },
    InvalidOption { question_id: QuestionId, raw: String },
    DuplicateAnswer { question_id: QuestionId },
}

impl fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreWarning::UnparsableQuestionId { raw } => {
                write!(f, "answer key '{}' is not a question id", raw)
            }
            ScoreWarning::UnknownQuestion { question_id } => {
                write!(f, "question {} is not in the bank", question_id)
            }
            ScoreWarning::InvalidOption { question_id, raw } => {
                write!(f, "question {} has invalid option '{}'", question_id, raw)
            }
            ScoreWarning::DuplicateAnswer { question_id } => {
                write!(f, "question {} answered more than once", question_id)
            }
        }
    }
}

/// Outcome for a single bank question within one attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionReview {
    pub question_id: QuestionId,
    pub topic: String,
    /// True when the answer map had an entry for this question, valid or not.
    pub answered: bool,
    pub selected: Option<OptionKey>,
    pub correct: OptionKey,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: f64,
    pub passed: bool,
    pub band: PerformanceBand,
    /// Answer key for the whole bank, regardless of what was answered.
    pub correct_answers: BTreeMap<QuestionId, OptionKey>,
    /// One entry per bank question, in bank order.
    pub review: Vec<QuestionReview>,
    pub warnings: Vec<ScoreWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The record has answers, but none of them name a question in this bank.
    ForeignRecord { answered: usize },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::ForeignRecord { answered } => write!(
                f,
                "none of the {} answer(s) refer to a question in the current bank",
                answered
            ),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Maps raw answer keys onto bank ids, collecting a warning for every entry
/// that cannot be used. A `None` value marks a known question answered with an unusable option.
fn normalize(
    answers: &AnswerMap,
    bank: &QuestionBank,
    warnings: &mut Vec<ScoreWarning>,
) -> BTreeMap<QuestionId, Option<OptionKey>> {
    let mut selections = BTreeMap::new();

    for (raw_id, raw_option) in answers {
        let question_id = match raw_id.trim().parse::<QuestionId>() {
            Ok(id) => id,
            Err(_) => {
                warnings.push(ScoreWarning::UnparsableQuestionId { raw: raw_id.clone() });
                continue;
            }
        };

        if bank.get(question_id).is_none() {
            warnings.push(ScoreWarning::UnknownQuestion { question_id });
            continue;
        }

        if selections.contains_key(&question_id) {
            warnings.push(ScoreWarning::DuplicateAnswer { question_id });
            continue;
        }

        let parsed = OptionKey::parse(raw_option);
        if parsed.is_none() {
            warnings.push(ScoreWarning::InvalidOption {
                question_id,
                raw: raw_option.clone(),
            });
        }
        selections.insert(question_id, parsed);
    }

    selections
}

/// Scores an answer map against the bank.
///
/// Never fails: entries that do not match the bank count as incorrect and are
/// reported in `warnings`.
pub fn score(answers: &AnswerMap, bank: &QuestionBank, policy: &ScoringPolicy) -> ScoreResult {
    let mut warnings = Vec::new();
    let selections = normalize(answers, bank, &mut warnings);

    let mut correct_answers = BTreeMap::new();
    let mut review = Vec::with_capacity(bank.len());
    let mut score = 0;

    for question in bank.iter() {
        correct_answers.insert(question.id, question.correct);

        let entry = selections.get(&question.id);
        let selected = entry.copied().flatten();
        let is_correct = selected == Some(question.correct);
        if is_correct {
            score += 1;
        }

        review.push(QuestionReview {
            question_id: question.id,
            topic: question.topic.clone(),
            answered: entry.is_some(),
            selected,
            correct: question.correct,
            is_correct,
        });
    }

    let total_questions = bank.len();
    let percentage = if total_questions == 0 {
        0.0
    } else {
        score as f64 / total_questions as f64 * 100.0
    };

    ScoreResult {
        score,
        total_questions,
        percentage,
        passed: score >= policy.pass_count,
        band: PerformanceBand::classify(score, policy),
        correct_answers,
        review,
        warnings,
    }
}

/// Scores a persisted attempt.
///
/// A record whose answers all miss the bank was taken against a different
/// bank and is rejected instead of being counted as a zero.
pub fn score_record(
    record: &ResponseRecord,
    bank: &QuestionBank,
    policy: &ScoringPolicy,
) -> Result<ScoreResult, ScoreError> {
    let result = score(&record.responses, bank, policy);

    if !record.responses.is_empty() && result.review.iter().all(|r| !r.answered) {
        return Err(ScoreError::ForeignRecord {
            answered: record.responses.len(),
        });
    }

    Ok(result)
}
