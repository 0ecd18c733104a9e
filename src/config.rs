// src/config.rs

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::assessment::scorer::{DEFAULT_EXCELLENT_COUNT, DEFAULT_PASS_COUNT, ScoringPolicy};
use crate::assessment::session::DEFAULT_SESSION_TTL_MINUTES;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON file per submitted attempt.
    pub responses_dir: PathBuf,
    /// Optional JSON file replacing the built-in question bank.
    pub question_bank_path: Option<PathBuf>,
    pub instructor_secret: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    /// Absolute number of correct answers needed to pass.
    pub pass_threshold: usize,
    /// Minutes an unsubmitted attempt is kept before it is dropped.
    pub session_ttl_minutes: i64,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    /// Variables that were set but could not be parsed, so the default was used.
    /// Logged once tracing is up.
    pub invalid_settings: Vec<String>,
}

/// Parses an optional variable, falling back to `default` when it is absent.
/// A present but unparsable value also falls back and is recorded in `invalid`.
fn parse_or<T: FromStr + fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
    invalid: &mut Vec<String>,
) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            invalid.push(format!("{}='{}' is not valid, using {}", key, raw, default));
            default
        }),
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let responses_dir = env::var("RESPONSES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("responses"));

        let question_bank_path = env::var("QUESTION_BANK_PATH").ok().map(PathBuf::from);

        let instructor_secret =
            env::var("INSTRUCTOR_SECRET").expect("INSTRUCTOR_SECRET must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let mut invalid_settings = Vec::new();

        let jwt_expiration = parse_or(
            "JWT_EXPIRATION",
            env::var("JWT_EXPIRATION").ok(),
            3600,
            &mut invalid_settings,
        );

        let pass_threshold = parse_or(
            "PASS_THRESHOLD",
            env::var("PASS_THRESHOLD").ok(),
            DEFAULT_PASS_COUNT,
            &mut invalid_settings,
        );

        let session_ttl_minutes = parse_or(
            "SESSION_TTL_MINUTES",
            env::var("SESSION_TTL_MINUTES").ok(),
            DEFAULT_SESSION_TTL_MINUTES,
            &mut invalid_settings,
        );

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            responses_dir,
            question_bank_path,
            instructor_secret,
            jwt_secret,
            jwt_expiration,
            pass_threshold,
            session_ttl_minutes,
            bind_addr,
            rust_log,
            log_dir,
            invalid_settings,
        }
    }

    /// Scoring rules derived from the configured pass threshold.
    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            pass_count: self.pass_threshold,
            excellent_count: DEFAULT_EXCELLENT_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_threshold_falls_back_and_is_reported() {
        let mut invalid = Vec::new();
        let value = parse_or("PASS_THRESHOLD", Some("ten".into()), DEFAULT_PASS_COUNT, &mut invalid);
        assert_eq!(value, DEFAULT_PASS_COUNT);
        assert_eq!(invalid, vec!["PASS_THRESHOLD='ten' is not valid, using 10".to_string()]);
    }

    #[test]
    fn present_and_missing_values() {
        let mut invalid = Vec::new();
        assert_eq!(parse_or("PASS_THRESHOLD", Some(" 12 ".into()), 10usize, &mut invalid), 12);
        assert_eq!(parse_or("JWT_EXPIRATION", None, 3600u64, &mut invalid), 3600);
        assert!(invalid.is_empty());
    }
}
