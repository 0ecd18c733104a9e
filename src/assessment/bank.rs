// src/assessment/bank.rs

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub type QuestionId = u32;

/// The four answer choices every question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "a",
            OptionKey::B => "b",
            OptionKey::C => "c",
            OptionKey::D => "d",
        }
    }

    /// Parses a raw option key, ignoring surrounding whitespace and case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a" => Some(OptionKey::A),
            "b" => Some(OptionKey::B),
            "c" => Some(OptionKey::C),
            "d" => Some(OptionKey::D),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// One scenario question together with its answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub id: QuestionId,

    /// Scenario description shown to the respondent.
    pub prompt: String,

    /// Option texts indexed by `OptionKey` order (a, b, c, d).
    pub options: [String; 4],

    /// The accepted answer.
    pub correct: OptionKey,

    /// Grouping label for the instructor report.
    pub topic: String,

    pub difficulty: Difficulty,
}

impl QuestionRecord {
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    pub fn options(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(move |k| (k, self.option(k)))
    }
}

/// DTO for sending a question to the respondent (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub options: BTreeMap<OptionKey, String>,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl From<&QuestionRecord> for PublicQuestion {
    fn from(q: &QuestionRecord) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt.clone(),
            options: q.options().map(|(k, text)| (k, text.to_string())).collect(),
            topic: q.topic.clone(),
            difficulty: q.difficulty,
        }
    }
}

#[derive(Debug)]
pub enum BankError {
    Empty,
    DuplicateId(QuestionId),
    BlankField { id: QuestionId, field: &'static str },
    MissingOption { id: QuestionId, key: OptionKey },
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Empty => write!(f, "question bank is empty"),
            BankError::DuplicateId(id) => write!(f, "question id {} appears more than once", id),
            BankError::BlankField { id, field } => {
                write!(f, "question {} has a blank {}", id, field)
            }
            BankError::MissingOption { id, key } => {
                write!(f, "question {} is missing option '{}'", id, key)
            }
            BankError::Io(e) => write!(f, "failed to read question bank: {}", e),
            BankError::Parse(e) => write!(f, "failed to parse question bank: {}", e),
        }
    }
}

impl std::error::Error for BankError {}

/// Shape of a question in a bank JSON file.
#[derive(Debug, Deserialize)]
struct QuestionFileEntry {
    id: QuestionId,
    prompt: String,
    options: BTreeMap<OptionKey, String>,
    correct: OptionKey,
    topic: String,
    difficulty: Difficulty,
}

impl TryFrom<QuestionFileEntry> for QuestionRecord {
    type Error = BankError;

    fn try_from(mut entry: QuestionFileEntry) -> Result<Self, Self::Error> {
        let mut take = |key: OptionKey| {
            entry
                .options
                .remove(&key)
                .ok_or(BankError::MissingOption { id: entry.id, key })
        };
        let options = [
            take(OptionKey::A)?,
            take(OptionKey::B)?,
            take(OptionKey::C)?,
            take(OptionKey::D)?,
        ];

        Ok(QuestionRecord {
            id: entry.id,
            prompt: entry.prompt,
            options,
            correct: entry.correct,
            topic: entry.topic,
            difficulty: entry.difficulty,
        })
    }
}

/// Ordered, immutable collection of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Validates and wraps the given questions, keeping their order.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(BankError::DuplicateId(q.id));
            }
            if q.prompt.trim().is_empty() {
                return Err(BankError::BlankField { id: q.id, field: "prompt" });
            }
            if q.topic.trim().is_empty() {
                return Err(BankError::BlankField { id: q.id, field: "topic" });
            }
            if q.options.iter().any(|o| o.trim().is_empty()) {
                return Err(BankError::BlankField { id: q.id, field: "option" });
            }
        }

        Ok(Self { questions })
    }

    /// The built-in fifteen-question CA AI assessment.
    pub fn standard() -> Self {
        Self {
            questions: super::standard::questions(),
        }
    }

    /// Loads a bank from a JSON array of questions.
    pub fn from_json_str(raw: &str) -> Result<Self, BankError> {
        let entries: Vec<QuestionFileEntry> = serde_json::from_str(raw).map_err(BankError::Parse)?;
        let questions = entries
            .into_iter()
            .map(QuestionRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let raw = std::fs::read_to_string(path).map_err(BankError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, id: QuestionId) -> Option<&QuestionRecord> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|q| q.id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions.iter().map(PublicQuestion::from).collect()
    }
}
