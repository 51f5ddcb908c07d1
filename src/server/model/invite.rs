//! Domain models for invite tracking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Invite code → use count, as reported by Discord at one instant.
pub type InviteSnapshot = HashMap<String, u64>;

fn parse_id(value: &str, field: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}

/// A member who joined a guild through someone's invite.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteReferral {
    pub guild_id: u64,
    pub member_id: u64,
    pub inviter_id: u64,
    pub created_at: DateTime<Utc>,
}

impl InviteReferral {
    /// Converts an entity model to a referral at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(InviteReferral)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - A stored ID is not a valid u64
    pub fn from_entity(entity: entity::invite_referral::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            member_id: parse_id(&entity.member_id, "member_id")?,
            inviter_id: parse_id(&entity.inviter_id, "inviter_id")?,
            created_at: entity.created_at,
        })
    }
}

/// Inviter with their number of active referrals in a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviterCount {
    pub inviter_id: u64,
    pub count: u64,
}

/// What happened when a referred member joined.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteJoin {
    pub inviter_id: u64,
    /// Inviter's active referrals after this join.
    pub invite_count: u64,
    /// Inviter's new point total if this join paid a reward; a member only pays once.
    pub rewarded_total: Option<i64>,
}

/// What happened when a referred member left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteLeave {
    pub inviter_id: u64,
    pub invite_count: u64,
}

/// Works out which invite a member used by diffing use counts around the join.
///
/// The code whose use count increased wins. Failing that, a code that had uses before
/// the join and has since vanished (a single-use or expired invite) is taken. Concurrent
/// joins can still mis-attribute; the result is a best effort.
///
/// # Arguments
/// - `before` - Snapshot cached before the join
/// - `after` - Snapshot fetched after the join
///
/// # Returns
/// - `Some(code)` - Invite code that was most likely used
/// - `None` - No code could be singled out
pub fn find_used_invite(before: &InviteSnapshot, after: &InviteSnapshot) -> Option<String> {
    let mut increased: Vec<&String> = after
        .iter()
        .filter(|(code, uses)| **uses > before.get(*code).copied().unwrap_or(0))
        .map(|(code, _)| code)
        .collect();
    increased.sort();
    if let Some(code) = increased.first() {
        return Some((*code).clone());
    }

    let mut vanished: Vec<&String> = before
        .iter()
        .filter(|(code, uses)| **uses > 0 && !after.contains_key(*code))
        .map(|(code, _)| code)
        .collect();
    vanished.sort();
    vanished.first().map(|code| (*code).clone())
}
