use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;

use crate::{
    assessment::{bank::QuestionBank, scorer::ScoringPolicy, session::SessionRegistry},
    auth::{Authenticator, SharedSecretAuthenticator},
    config::Config,
    error::AppError,
    store::{FileStore, ResponseStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bank: Arc<QuestionBank>,
    pub policy: ScoringPolicy,
    pub store: Arc<dyn ResponseStore>,
    pub sessions: Arc<SessionRegistry>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Builds the state described by `config`: file store, bank and the
    /// shared-secret instructor gate.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let bank = match &config.question_bank_path {
            Some(path) => {
                let bank = QuestionBank::from_json_file(path)?;
                tracing::info!(path = %path.display(), questions = bank.len(), "Loaded question bank");
                bank
            }
            None => QuestionBank::standard(),
        };

        let authenticator = SharedSecretAuthenticator::new(&config.instructor_secret)?;

        Ok(Self {
            policy: config.scoring_policy(),
            bank: Arc::new(bank),
            store: Arc::new(FileStore::new(config.responses_dir.clone())),
            sessions: Arc::new(SessionRegistry::with_ttl(Duration::minutes(
                config.session_ttl_minutes,
            ))),
            authenticator: Arc::new(authenticator),
            config,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
