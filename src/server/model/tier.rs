//! Member tiers and their point multipliers.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::server::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// Supporter tier granting a multiplier on quest rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Tier::Bronze),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Configured multiplier per tier plus the global cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMultipliers {
    pub bronze: f64,
    pub silver: f64,
    pub gold: f64,
    pub cap: f64,
}

impl Default for TierMultipliers {
    fn default() -> Self {
        Self {
            bronze: 1.1,
            silver: 1.25,
            gold: 1.5,
            cap: 2.0,
        }
    }
}

impl TierMultipliers {
    /// Multiplier for a member, clamped to `[1.0, cap]`.
    ///
    /// # Arguments
    /// - `tier` - The member's tier, if any
    ///
    /// # Returns
    /// - `f64` - `1.0` without a tier, otherwise the clamped tier multiplier
    pub fn for_tier(&self, tier: Option<Tier>) -> f64 {
        let raw = match tier {
            None => return 1.0,
            Some(Tier::Bronze) => self.bronze,
            Some(Tier::Silver) => self.silver,
            Some(Tier::Gold) => self.gold,
        };

        // A cap configured below 1.0 must not turn the multiplier into a penalty.
        raw.min(self.cap.max(1.0)).max(1.0)
    }
}

/// A member's assigned tier.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTier {
    pub user_id: u64,
    pub tier: Tier,
    pub updated_at: DateTime<Utc>,
}

impl MemberTier {
    /// Converts an entity model to a member tier at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(MemberTier)` - Successfully converted model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored user_id is not a u64
    /// - `Err(AppError::InternalErr(UnknownTier))` - Stored tier is not a known tier
    pub fn from_entity(entity: entity::member_tier::Model) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;
        let tier = entity
            .tier
            .parse::<Tier>()
            .map_err(|_| InternalError::UnknownTier {
                user_id,
                value: entity.tier.clone(),
            })?;

        Ok(Self {
            user_id,
            tier,
            updated_at: entity.updated_at,
        })
    }
}
