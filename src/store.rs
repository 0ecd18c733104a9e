// src/store.rs

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::models::response_record::ResponseRecord;

const FILE_PREFIX: &str = "responses_";
const FILE_SUFFIX: &str = ".json";

/// How many `_N` suffixes to try before giving up on a name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Longest email fragment kept in a file name. Prefix, timestamp and suffix
/// add under 50 bytes, which keeps names well inside the 255-byte limit.
const MAX_EMAIL_BYTES: usize = 150;

#[derive(Debug)]
pub enum StoreError {
    CreateDir { path: PathBuf, source: std::io::Error },
    Serialize(serde_json::Error),
    Write { path: PathBuf, source: std::io::Error },
    NamesExhausted { base: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CreateDir { path, source } => {
                write!(f, "cannot create {}: {}", path.display(), source)
            }
            StoreError::Serialize(e) => write!(f, "cannot serialize record: {}", e),
            StoreError::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
            StoreError::NamesExhausted { base } => {
                write!(f, "no free file name left for {}", base)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Handle returned for a stored attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedRecord {
    pub file_name: String,
}

/// Snapshot of the store. Units that could not be read are described in
/// `warnings` instead of failing the whole listing.
#[derive(Debug, Default)]
pub struct Listing {
    pub records: Vec<ResponseRecord>,
    pub warnings: Vec<String>,
}

/// Append-only log of submitted attempts.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Stores a record under a fresh name. Never overwrites an existing unit.
    async fn append(&self, record: &ResponseRecord) -> Result<SavedRecord, StoreError>;

    /// Reads every record currently stored.
    async fn list_all(&self) -> Listing;
}

/// One pretty-printed JSON file per attempt in a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn base_name(record: &ResponseRecord) -> String {
        let email: String = record
            .email
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_EMAIL_BYTES)
            .collect();
        let email = if email.is_empty() { "anonymous".to_string() } else { email };
        format!("{}{}_{}", FILE_PREFIX, email, record.timestamp)
    }

    fn is_record_file(name: &str) -> bool {
        name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX)
    }

    /// Links the fully written temp file under the first free name.
    /// `hard_link` fails if the target exists, so no record is ever replaced.
    async fn publish(&self, tmp: &Path, base: &str) -> Result<String, StoreError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}{}", base, FILE_SUFFIX)
            } else {
                format!("{}_{}{}", base, attempt, FILE_SUFFIX)
            };
            let target = self.dir.join(&file_name);

            match fs::hard_link(tmp, &target).await {
                Ok(()) => return Ok(file_name),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(%file_name, "Record name taken, trying next suffix");
                }
                Err(source) => return Err(StoreError::Write { path: target, source }),
            }
        }

        Err(StoreError::NamesExhausted {
            base: base.to_string(),
        })
    }
}

#[async_trait]
impl ResponseStore for FileStore {
    async fn append(&self, record: &ResponseRecord) -> Result<SavedRecord, StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let body = serde_json::to_vec_pretty(record).map_err(StoreError::Serialize)?;

        // Written under a name `list_all` ignores, then published in one step.
        let tmp = self.dir.join(format!(".pending-{}.tmp", Uuid::new_v4()));
        let write = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&body).await?;
            file.sync_all().await
        };
        if let Err(source) = write.await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Write { path: tmp, source });
        }

        let published = self.publish(&tmp, &Self::base_name(record)).await;
        if let Err(e) = fs::remove_file(&tmp).await {
            tracing::warn!(path = %tmp.display(), "Failed to remove temp file: {}", e);
        }

        let file_name = published?;
        tracing::info!(%file_name, email = %record.email, "Stored response record");
        Ok(SavedRecord { file_name })
    }

    async fn list_all(&self) -> Listing {
        let mut listing = Listing::default();

        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Nothing has been submitted yet.
            Err(e) if e.kind() == ErrorKind::NotFound => return listing,
            Err(e) => {
                let message = format!("cannot read {}: {}", self.dir.display(), e);
                tracing::warn!("{}", message);
                listing.warnings.push(message);
                return listing;
            }
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if Self::is_record_file(&name) {
                        names.push(name);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    let message = format!("directory listing stopped early: {}", e);
                    tracing::warn!("{}", message);
                    listing.warnings.push(message);
                    break;
                }
            }
        }
        names.sort();

        for name in names {
            let path = self.dir.join(&name);
            let raw = match fs::read_to_string(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(file = %name, "Skipping unreadable record: {}", e);
                    listing.warnings.push(format!("{}: unreadable ({})", name, e));
                    continue;
                }
            };
            match serde_json::from_str::<ResponseRecord>(&raw) {
                Ok(record) => listing.records.push(record),
                Err(e) => {
                    tracing::warn!(file = %name, "Skipping malformed record: {}", e);
                    listing.warnings.push(format!("{}: malformed ({})", name, e));
                }
            }
        }

        listing
    }
}
