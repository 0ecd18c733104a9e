// src/assessment/session.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::bank::{OptionKey, QuestionBank, QuestionId};
use crate::error::AppError;
use crate::models::response_record::Identity;

/// An in-progress attempt. Answers can be changed freely until submission.
#[derive(Debug, Clone)]
pub struct AttemptSession {
    pub id: Uuid,
    pub identity: Identity,
    pub answers: BTreeMap<QuestionId, OptionKey>,
    pub started_at: DateTime<Utc>,
}

impl AttemptSession {
    pub fn progress(&self, bank: &QuestionBank) -> Progress {
        Progress {
            answered: self.answers.len(),
            total: bank.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// The attempt is timed at 30 minutes; unsubmitted sessions are kept a
/// little longer before they are dropped.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 45;

/// Open attempts keyed by session id.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, AttemptSession>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", id))
}

impl SessionRegistry {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Opens a new attempt for an already validated identity.
    /// Sessions left unsubmitted past the TTL are dropped first.
    pub async fn start(&self, identity: Identity) -> Uuid {
        let now = Utc::now();
        let session = AttemptSession {
            id: Uuid::new_v4(),
            identity,
            answers: BTreeMap::new(),
            started_at: now,
        };
        let id = session.id;

        let mut sessions = self.sessions.write().await;
        let expired = Self::drop_expired(&mut sessions, now, self.ttl);
        if expired > 0 {
            tracing::info!(expired, "Dropped abandoned assessment sessions");
        }
        sessions.insert(id, session);
        id
    }

    /// Removes every session started more than `ttl` before `now`.
    fn drop_expired(
        sessions: &mut HashMap<Uuid, AttemptSession>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| now - s.started_at <= ttl);
        before - sessions.len()
    }

    pub async fn get(&self, id: Uuid) -> Result<AttemptSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Records (or replaces) the answer to one question.
    pub async fn record_answer(
        &self,
        id: Uuid,
        question_id: QuestionId,
        answer: OptionKey,
        bank: &QuestionBank,
    ) -> Result<Progress, AppError> {
        if bank.get(question_id).is_none() {
            return Err(AppError::BadRequest(format!(
                "Question {} does not exist",
                question_id
            )));
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.answers.insert(question_id, answer);

        Ok(session.progress(bank))
    }

    /// Removes and returns the session once every bank question is answered.
    /// An incomplete session stays open so the respondent can finish it.
    pub async fn take_for_submit(
        &self,
        id: Uuid,
        bank: &QuestionBank,
    ) -> Result<AttemptSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;

        let missing: Vec<QuestionId> = bank
            .ids()
            .filter(|qid| !session.answers.contains_key(qid))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::IncompleteAnswers { missing });
        }

        sessions.remove(&id).ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            name: "Amit".into(),
            email: "amit@example.com".into(),
            phone: "9876543210".into(),
        }
    }

    #[tokio::test]
    async fn answers_can_be_changed_before_submit() {
        let bank = QuestionBank::standard();
        let registry = SessionRegistry::default();
        let id = registry.start(identity()).await;

        registry.record_answer(id, 1, OptionKey::A, &bank).await.unwrap();
        let progress = registry.record_answer(id, 1, OptionKey::B, &bank).await.unwrap();
        assert_eq!(progress, Progress { answered: 1, total: 15 });
        assert_eq!(registry.get(id).await.unwrap().answers[&1], OptionKey::B);
    }

    #[tokio::test]
    async fn unknown_question_is_rejected() {
        let bank = QuestionBank::standard();
        let registry = SessionRegistry::default();
        let id = registry.start(identity()).await;

        let err = registry.record_answer(id, 99, OptionKey::A, &bank).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn abandoned_sessions_expire() {
        let registry = SessionRegistry::with_ttl(Duration::minutes(45));
        let stale = registry.start(identity()).await;
        registry
            .sessions
            .write()
            .await
            .get_mut(&stale)
            .unwrap()
            .started_at -= Duration::hours(2);

        // Opening another attempt sweeps the stale one.
        let fresh = registry.start(identity()).await;
        assert_eq!(registry.len().await, 1);
        assert!(matches!(registry.get(stale).await, Err(AppError::NotFound(_))));
        assert!(registry.get(fresh).await.is_ok());

        let mut sessions = registry.sessions.write().await;
        let ttl = Duration::minutes(45);
        assert_eq!(SessionRegistry::drop_expired(&mut sessions, Utc::now(), ttl), 0);
        let later = Utc::now() + Duration::minutes(46);
        assert_eq!(SessionRegistry::drop_expired(&mut sessions, later, ttl), 1);
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn incomplete_submission_keeps_session_open() {
        let bank = QuestionBank::standard();
        let registry = SessionRegistry::default();
        let id = registry.start(identity()).await;
        for qid in 1..=13 {
            registry.record_answer(id, qid, OptionKey::B, &bank).await.unwrap();
        }

        match registry.take_for_submit(id, &bank).await {
            Err(AppError::IncompleteAnswers { missing }) => assert_eq!(missing, vec![14, 15]),
            other => panic!("expected incomplete answers, got {:?}", other),
        }
        assert_eq!(registry.len().await, 1);

        for qid in 14..=15 {
            registry.record_answer(id, qid, OptionKey::B, &bank).await.unwrap();
        }
        let session = registry.take_for_submit(id, &bank).await.unwrap();
        assert_eq!(session.answers.len(), 15);
        assert_eq!(registry.len().await, 0);
        assert!(matches!(registry.get(id).await, Err(AppError::NotFound(_))));
    }
}
