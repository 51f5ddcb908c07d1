//! Voice presence tracking.
//!
//! Keeps the start instant of every open voice session so that leaving a channel, or the
//! midnight rollover, can turn elapsed time into whole `voice_minutes`.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// A session cut at the rollover instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSplit {
    pub guild_id: u64,
    pub user_id: u64,
    /// Whole minutes between the session start and the rollover.
    pub minutes: u32,
}

/// Open voice sessions keyed by (guild, user).
#[derive(Clone, Default)]
pub struct VoiceTracker {
    sessions: Arc<Mutex<HashMap<(u64, u64), DateTime<Utc>>>>,
}

impl VoiceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session unless one is already running.
    ///
    /// Moving between channels of the same guild keeps the running session.
    pub async fn start(&self, guild_id: u64, user_id: u64, at: DateTime<Utc>) {
        self.sessions
            .lock()
            .await
            .entry((guild_id, user_id))
            .or_insert(at);
    }

    /// Closes a session.
    ///
    /// # Returns
    /// - `Some(minutes)` - Whole minutes spent in voice, fractional minutes truncated
    /// - `None` - No session was open for that member
    pub async fn end(&self, guild_id: u64, user_id: u64, at: DateTime<Utc>) -> Option<u32> {
        let started = self.sessions.lock().await.remove(&(guild_id, user_id))?;

        Some(whole_minutes(started, at))
    }

    /// Cuts every open session at `rollover`.
    ///
    /// Sessions restart at `rollover` so the remaining time accrues to the new period.
    /// Sessions that started at or after `rollover` are left alone.
    ///
    /// # Returns
    /// - `Vec<VoiceSplit>` - Minutes each session accrued before the rollover
    pub async fn split_at(&self, rollover: DateTime<Utc>) -> Vec<VoiceSplit> {
        let mut sessions = self.sessions.lock().await;
        let mut splits = Vec::new();

        for (&(guild_id, user_id), started) in sessions.iter_mut() {
            if *started >= rollover {
                continue;
            }

            splits.push(VoiceSplit {
                guild_id,
                user_id,
                minutes: whole_minutes(*started, rollover),
            });
            *started = rollover;
        }

        splits
    }

    pub async fn is_active(&self, guild_id: u64, user_id: u64) -> bool {
        self.sessions.lock().await.contains_key(&(guild_id, user_id))
    }
}

/// Whole minutes between two instants; negative spans count as zero.
pub fn whole_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    u32::try_from((to - from).num_minutes().max(0)).unwrap_or(u32::MAX)
}
