//! Quest catalog document repository.
//!
//! The catalog is an admin-editable JSON document of the form
//! `{ "<bucket>": { "<quest key>": { "name", "type", "target", ... } } }`. It is read
//! fresh on every call so edits apply without a restart. Parsing is lenient per entry:
//! an entry that does not deserialize or fails validation is skipped and never becomes
//! part of the returned `QuestCatalog`. Only a document that is not JSON at all is an
//! error.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::server::{
    error::AppError,
    model::quest::{Bucket, QuestCatalog, QuestDefinition, QuestEntry},
    util::fs::write_atomic,
};

/// Catalog written on first start when no catalog document exists.
pub const DEFAULT_CATALOG: &str = r#"{
  "daily": {
    "chatter": { "name": "Send 20 messages", "type": "messages", "target": 20, "reward": 10 },
    "voice_half_hour": { "name": "Spend 30 minutes in voice", "type": "voice_minutes", "target": 30, "reward": 15 },
    "react_five": { "name": "React to 5 messages", "type": "reaction_total", "target": 5, "reward": 5 },
    "say_gm": { "name": "Say good morning", "type": "message_exact", "text": "gm", "target": 1, "reward": 5 },
    "use_command": { "name": "Use a bot command", "type": "command_use", "target": 1, "reward": 5 },
    "night_owl": { "name": "Send 5 messages between 22:00 and 02:00 UTC", "type": "messages_time_window", "timezone": "UTC", "start_hour": 22, "end_hour": 2, "target": 5, "reward": 10 }
  },
  "weekly": {
    "chatter": { "name": "Send 200 messages", "type": "messages", "target": 200, "reward": 50 },
    "voice_marathon": { "name": "Spend 5 hours in voice", "type": "voice_minutes", "target": 300, "reward": 60 },
    "daily_regular": { "name": "Claim the daily reward 5 times", "type": "daily_claims_week", "target": 5, "reward": 40 },
    "recruiter": { "name": "Invite 2 members", "type": "invites", "target": 2, "reward": 50 },
    "staff_pick": { "name": "Get a moderator reaction", "type": "reaction_mod", "target": 1, "reward": 25 },
    "completionist": { "name": "Claim 5 quests", "type": "quests_completed", "target": 5, "reward": 50 }
  },
  "lifetime": {
    "booster": { "name": "Boost the server", "type": "server_boost", "target": 1, "reward": 200 },
    "veteran": { "name": "Send 5000 messages", "type": "messages", "target": 5000, "reward": 500 },
    "ambassador": { "name": "Invite 25 members", "type": "invites", "target": 25, "reward": 500 },
    "hall_of_fame": { "name": "Claim 100 quests", "type": "quests_completed", "target": 100, "reward": 1000 },
    "event_winner": { "name": "Win a community event", "type": "manual_actor", "target": 1, "reward": 300 }
  }
}
"#;

/// Repository reading and editing the quest catalog document.
#[derive(Debug, Clone)]
pub struct QuestCatalogRepository {
    path: PathBuf,
}

impl QuestCatalogRepository {
    /// Creates a repository over the catalog document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the current catalog.
    ///
    /// # Returns
    /// - `Ok(QuestCatalog)` - Valid quests; empty when the document does not exist
    /// - `Err(AppError::IoErr)` - Document exists but could not be read
    /// - `Err(AppError::JsonErr)` - Document is not valid JSON
    pub async fn load(&self) -> Result<QuestCatalog, AppError> {
        let document = self.read_document().await?;
        Ok(parse_catalog(&document))
    }

    /// Writes the default catalog when no catalog document exists yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Default catalog written
    /// - `Ok(false)` - A catalog already exists and was left alone
    /// - `Err(AppError::IoErr)` - Failed to check for or write the document
    pub async fn ensure_default(&self) -> Result<bool, AppError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        write_atomic(&self.path, DEFAULT_CATALOG.as_bytes()).await?;
        tracing::info!("Wrote default quest catalog to {}", self.path.display());

        Ok(true)
    }

    /// Adds or replaces a quest.
    ///
    /// The entry is validated first; an invalid entry is rejected rather than written.
    /// Other entries of the document, valid or not, are preserved as written.
    ///
    /// # Arguments
    /// - `bucket` - Bucket to list the quest under
    /// - `key` - Quest key within the bucket
    /// - `entry` - Quest definition as it should appear in the document
    ///
    /// # Returns
    /// - `Ok(QuestDefinition)` - The validated quest now in the catalog
    /// - `Err(AppError::BadRequest)` - Entry fails validation
    /// - `Err(AppError)` - Document could not be read or written
    pub async fn upsert_quest(
        &self,
        bucket: Bucket,
        key: &str,
        entry: QuestEntry,
    ) -> Result<QuestDefinition, AppError> {
        let definition = QuestDefinition::from_entry(bucket, key, entry.clone())
            .map_err(|e| AppError::BadRequest(format!("Invalid quest '{}': {}", key, e)))?;

        let mut root = match self.read_document().await? {
            Value::Object(root) => root,
            _ => Map::new(),
        };
        let mut quests = match root.remove(bucket.as_str()) {
            Some(Value::Object(quests)) => quests,
            _ => Map::new(),
        };
        quests.insert(key.to_string(), serde_json::to_value(&entry)?);
        root.insert(bucket.as_str().to_string(), Value::Object(quests));

        self.write_document(&Value::Object(root)).await?;

        Ok(definition)
    }

    /// Removes a quest from the catalog.
    ///
    /// Progress already recorded for the quest stays in the progress store; it simply
    /// stops matching events and stops being claimable.
    ///
    /// # Returns
    /// - `Ok(true)` - Quest removed
    /// - `Ok(false)` - No such quest in the document
    /// - `Err(AppError)` - Document could not be read or written
    pub async fn remove_quest(&self, bucket: Bucket, key: &str) -> Result<bool, AppError> {
        let mut document = self.read_document().await?;

        let removed = document
            .get_mut(bucket.as_str())
            .and_then(Value::as_object_mut)
            .and_then(|quests| quests.remove(key))
            .is_some();

        if removed {
            self.write_document(&document).await?;
        }

        Ok(removed)
    }

    async fn read_document(&self) -> Result<Value, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Object(Map::new())),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Value) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        write_atomic(&self.path, &bytes).await
    }
}

/// Extracts every valid quest from a catalog document.
///
/// Unknown buckets, non-object buckets and entries that fail to deserialize or validate
/// are skipped with a debug log.
pub fn parse_catalog(document: &Value) -> QuestCatalog {
    let Some(root) = document.as_object() else {
        tracing::debug!("Quest catalog document is not an object, ignoring it");
        return QuestCatalog::default();
    };

    let mut definitions = Vec::new();

    for (bucket_name, quests) in root {
        let bucket = match bucket_name.parse::<Bucket>() {
            Ok(bucket) => bucket,
            Err(e) => {
                tracing::debug!("Skipping quest catalog section: {}", e);
                continue;
            }
        };
        let Some(quests) = quests.as_object() else {
            tracing::debug!("Quest catalog bucket {} is not an object", bucket);
            continue;
        };

        for (key, raw) in quests {
            let entry = match serde_json::from_value::<QuestEntry>(raw.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping malformed quest {}/{}: {}", bucket, key, e);
                    continue;
                }
            };

            match QuestDefinition::from_entry(bucket, key.as_str(), entry) {
                Ok(definition) => definitions.push(definition),
                Err(e) => tracing::debug!("Skipping invalid quest {}/{}: {}", bucket, key, e),
            }
        }
    }

    QuestCatalog::new(definitions)
}
