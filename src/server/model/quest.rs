//! Quest catalog domain models.
//!
//! Defines the three quest buckets, the closed set of quest kinds with their per-kind
//! parameters, and the validated `QuestDefinition` built from an admin-editable catalog
//! entry. A catalog entry that fails validation never becomes a `QuestDefinition`, so it
//! can neither match an event nor be claimed.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of quests drawn for a user per daily/weekly period.
pub const DEFAULT_ASSIGNMENT_SIZE: usize = 3;

/// Quest category with its own reset cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Daily,
    Weekly,
    Lifetime,
}

impl Bucket {
    /// All buckets in evaluation order.
    pub const ALL: [Bucket; 3] = [Bucket::Daily, Bucket::Weekly, Bucket::Lifetime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Daily => "daily",
            Bucket::Weekly => "weekly",
            Bucket::Lifetime => "lifetime",
        }
    }

    /// Returns the rotating form of this bucket, or `None` for lifetime.
    ///
    /// Only rotating buckets have per-user assignment sets.
    pub fn rotating(&self) -> Option<RotatingBucket> {
        match self {
            Bucket::Daily => Some(RotatingBucket::Daily),
            Bucket::Weekly => Some(RotatingBucket::Weekly),
            Bucket::Lifetime => None,
        }
    }

    /// Reset cadence every quest in this bucket must declare.
    pub fn cadence(&self) -> ResetCadence {
        match self {
            Bucket::Daily => ResetCadence::Daily,
            Bucket::Weekly => ResetCadence::Weekly,
            Bucket::Lifetime => ResetCadence::Permanent,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Bucket::Daily),
            "weekly" => Ok(Bucket::Weekly),
            "lifetime" => Ok(Bucket::Lifetime),
            other => Err(format!("unknown quest bucket '{}'", other)),
        }
    }
}

/// A bucket whose users receive a random subset of the catalog each period.
///
/// Keeping this separate from `Bucket` makes asking for a lifetime assignment
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotatingBucket {
    Daily,
    Weekly,
}

impl From<RotatingBucket> for Bucket {
    fn from(bucket: RotatingBucket) -> Self {
        match bucket {
            RotatingBucket::Daily => Bucket::Daily,
            RotatingBucket::Weekly => Bucket::Weekly,
        }
    }
}

/// How often a quest's progress starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetCadence {
    Daily,
    Weekly,
    Permanent,
}

/// What a quest counts, with any per-kind parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestKind {
    /// Messages sent in the guild.
    Messages,
    /// Whole minutes spent in voice channels.
    VoiceMinutes,
    /// Members who joined through the user's invites.
    Invites,
    /// A message whose trimmed content equals `text`, optionally in one channel.
    MessageExact {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel_id: Option<u64>,
    },
    /// Slash commands used, optionally a single named command.
    CommandUse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
    },
    /// Reactions placed by a moderator on the user's messages.
    ReactionMod,
    /// Reactions the user adds to any message.
    ReactionTotal,
    /// Messages sent while the local hour in `timezone` falls inside the window.
    MessagesTimeWindow {
        timezone: Tz,
        start_hour: u32,
        end_hour: u32,
    },
    /// Daily login rewards claimed.
    DailyClaimsWeek,
    /// Meta-quest counting other quests claimed.
    QuestsCompleted,
    /// Starting to boost the guild.
    ServerBoost,
    /// Completed by an admin validating the quest by hand.
    ManualActor,
}

impl QuestKind {
    /// Whether this kind completes in one step instead of accumulating.
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            QuestKind::MessageExact { .. } | QuestKind::ServerBoost | QuestKind::ManualActor
        )
    }
}

fn default_max_claims() -> u32 {
    1
}

/// A quest as written in the catalog document, before validation.
///
/// The quest key and bucket come from the document structure, not from the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestEntry {
    pub name: String,
    #[serde(flatten)]
    pub kind: QuestKind,
    pub target: u32,
    #[serde(default)]
    pub reward: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<ResetCadence>,
    #[serde(default = "default_max_claims")]
    pub max_claims_per_reset: u32,
}

/// Reason a catalog entry was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestEntryError {
    #[error("target must be at least 1")]
    ZeroTarget,

    #[error("max_claims_per_reset must be at least 1")]
    ZeroMaxClaims,

    #[error("reset cadence {declared:?} does not match bucket {bucket}")]
    CadenceMismatch {
        bucket: Bucket,
        declared: ResetCadence,
    },

    #[error("hour {0} is outside 0..24")]
    InvalidHour(u32),

    #[error("exact text must not be empty")]
    EmptyExactText,
}

/// A validated quest definition, immutable for the lifetime of one catalog load.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestDefinition {
    /// Unique id within its bucket.
    pub key: String,
    pub bucket: Bucket,
    pub name: String,
    pub kind: QuestKind,
    pub target: u32,
    pub reward: u32,
    pub reset: ResetCadence,
    pub max_claims_per_reset: u32,
}

impl QuestDefinition {
    /// Validates a catalog entry into a definition.
    ///
    /// # Arguments
    /// - `bucket` - Bucket the entry was listed under
    /// - `key` - Key the entry was listed under
    /// - `entry` - Parsed catalog entry
    ///
    /// # Returns
    /// - `Ok(QuestDefinition)` - Entry is usable
    /// - `Err(QuestEntryError)` - Entry violates a catalog rule and must be skipped
    pub fn from_entry(
        bucket: Bucket,
        key: impl Into<String>,
        entry: QuestEntry,
    ) -> Result<Self, QuestEntryError> {
        if entry.target == 0 {
            return Err(QuestEntryError::ZeroTarget);
        }
        if entry.max_claims_per_reset == 0 {
            return Err(QuestEntryError::ZeroMaxClaims);
        }

        let reset = entry.reset.unwrap_or_else(|| bucket.cadence());
        if reset != bucket.cadence() {
            return Err(QuestEntryError::CadenceMismatch {
                bucket,
                declared: reset,
            });
        }

        match &entry.kind {
            QuestKind::MessagesTimeWindow {
                start_hour,
                end_hour,
                ..
            } => {
                for hour in [*start_hour, *end_hour] {
                    if hour >= 24 {
                        return Err(QuestEntryError::InvalidHour(hour));
                    }
                }
            }
            QuestKind::MessageExact { text, .. } if text.trim().is_empty() => {
                return Err(QuestEntryError::EmptyExactText);
            }
            _ => {}
        }

        Ok(Self {
            key: key.into(),
            bucket,
            name: entry.name,
            kind: entry.kind,
            target: entry.target,
            reward: entry.reward,
            reset,
            max_claims_per_reset: entry.max_claims_per_reset,
        })
    }

    /// Converts the definition back into its catalog entry form.
    pub fn to_entry(&self) -> QuestEntry {
        QuestEntry {
            name: self.name.clone(),
            kind: self.kind.clone(),
            target: self.target,
            reward: self.reward,
            reset: Some(self.reset),
            max_claims_per_reset: self.max_claims_per_reset,
        }
    }

    /// Whether this is a meta-quest driven by other quests' completions.
    pub fn is_meta(&self) -> bool {
        matches!(self.kind, QuestKind::QuestsCompleted)
    }
}

/// The set of valid quest definitions, grouped by bucket and ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestCatalog {
    buckets: BTreeMap<Bucket, Vec<QuestDefinition>>,
}

impl QuestCatalog {
    /// Builds a catalog from definitions; later duplicates of a (bucket, key) pair win.
    pub fn new(definitions: impl IntoIterator<Item = QuestDefinition>) -> Self {
        let mut by_key: BTreeMap<(Bucket, String), QuestDefinition> = BTreeMap::new();
        for definition in definitions {
            by_key.insert((definition.bucket, definition.key.clone()), definition);
        }

        let mut buckets: BTreeMap<Bucket, Vec<QuestDefinition>> = BTreeMap::new();
        for ((bucket, _), definition) in by_key {
            buckets.entry(bucket).or_default().push(definition);
        }

        Self { buckets }
    }

    /// Definitions of one bucket, ordered by key.
    pub fn bucket(&self, bucket: Bucket) -> &[QuestDefinition] {
        self.buckets
            .get(&bucket)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, bucket: Bucket, key: &str) -> Option<&QuestDefinition> {
        self.bucket(bucket).iter().find(|quest| quest.key == key)
    }

    /// Quest keys of one bucket, ordered by key.
    pub fn keys(&self, bucket: Bucket) -> Vec<&str> {
        self.bucket(bucket)
            .iter()
            .map(|quest| quest.key.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.buckets.values().flatten()
    }
}

/// Tunables for the quest ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestSettings {
    /// Number of quests assigned per user per daily/weekly period.
    pub assignment_size: usize,
    /// Mixed into every assignment seed so draws are not predictable from ids alone.
    pub seed_salt: u64,
}

impl Default for QuestSettings {
    fn default() -> Self {
        Self {
            assignment_size: DEFAULT_ASSIGNMENT_SIZE,
            seed_salt: 0,
        }
    }
}
