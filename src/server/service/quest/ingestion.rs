//! Matching events against quests and advancing progress.
//!
//! An event is credited to every quest it matches in every bucket, each in the period
//! the event's instant falls in. Daily and weekly quests only count when they are part
//! of the user's assignment for that period; lifetime quests always count.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::server::{
    error::AppError,
    model::{
        progress::ProgressTree,
        quest::{Bucket, QuestCatalog, QuestDefinition, QuestKind, QuestSettings},
        quest_event::{ProgressUpdate, QuestEvent, QuestTrigger},
    },
    service::quest::{assignment::ensure_assignment, period::period_key},
};

use super::QuestLedger;

/// How much progress `trigger` earns on `quest`, if it matches at all.
///
/// # Arguments
/// - `quest` - Quest to test
/// - `trigger` - What happened
/// - `at` - When it happened; only time-window quests look at it
///
/// # Returns
/// - `Some(amount)` - The trigger counts toward the quest
/// - `None` - The trigger is irrelevant to the quest
pub fn credit_for(
    quest: &QuestDefinition,
    trigger: &QuestTrigger,
    at: DateTime<Utc>,
) -> Option<u32> {
    match (&quest.kind, trigger) {
        (QuestKind::Messages, QuestTrigger::Message { .. }) => Some(1),
        (
            QuestKind::MessageExact { text, channel_id },
            QuestTrigger::Message {
                channel_id: sent_in,
                content,
            },
        ) => {
            let channel_ok = channel_id.map_or(true, |required| required == *sent_in);
            (channel_ok && content.trim() == text.trim()).then_some(1)
        }
        (
            QuestKind::MessagesTimeWindow {
                timezone,
                start_hour,
                end_hour,
            },
            QuestTrigger::Message { .. },
        ) => in_window(at, *timezone, *start_hour, *end_hour).then_some(1),
        (QuestKind::VoiceMinutes, QuestTrigger::VoiceMinutes(minutes)) if *minutes > 0 => {
            Some(*minutes)
        }
        (QuestKind::Invites, QuestTrigger::InviteAccepted) => Some(1),
        (QuestKind::CommandUse { command }, QuestTrigger::Command { name }) => {
            let matches = command.as_deref().map_or(true, |wanted| {
                normalize_command(wanted).eq_ignore_ascii_case(normalize_command(name))
            });
            matches.then_some(1)
        }
        (QuestKind::ReactionTotal, QuestTrigger::ReactionAdded) => Some(1),
        (QuestKind::ReactionMod, QuestTrigger::ModeratorReaction) => Some(1),
        (QuestKind::DailyClaimsWeek, QuestTrigger::DailyClaim) => Some(1),
        (QuestKind::ServerBoost, QuestTrigger::ServerBoost) => Some(1),
        (QuestKind::ManualActor, QuestTrigger::ManualValidation { bucket, quest_key }) => {
            (*bucket == quest.bucket && *quest_key == quest.key).then_some(1)
        }
        _ => None,
    }
}

fn normalize_command(name: &str) -> &str {
    name.trim().trim_start_matches('/')
}

/// Whether the local hour of `at` in `timezone` falls in `[start_hour, end_hour)`.
///
/// A window whose end is before its start wraps past midnight; equal bounds cover the
/// whole day.
pub fn in_window(at: DateTime<Utc>, timezone: Tz, start_hour: u32, end_hour: u32) -> bool {
    let hour = at.with_timezone(&timezone).hour();

    if start_hour == end_hour {
        true
    } else if start_hour < end_hour {
        hour >= start_hour && hour < end_hour
    } else {
        hour >= start_hour || hour < end_hour
    }
}

/// Credits one event to every matching quest in the tree.
///
/// # Arguments
/// - `tree` - Progress tree to update
/// - `catalog` - Current quest catalog
/// - `settings` - Assignment settings for first draws
/// - `event` - The event to account
///
/// # Returns
/// - `Vec<ProgressUpdate>` - Every quest whose progress moved
pub fn apply_event(
    tree: &mut ProgressTree,
    catalog: &QuestCatalog,
    settings: &QuestSettings,
    event: &QuestEvent,
) -> Vec<ProgressUpdate> {
    let mut updates = Vec::new();

    for bucket in Bucket::ALL {
        let matching: Vec<(&QuestDefinition, u32)> = catalog
            .bucket(bucket)
            .iter()
            .filter_map(|quest| {
                credit_for(quest, &event.trigger, event.at).map(|amount| (quest, amount))
            })
            .collect();
        if matching.is_empty() {
            continue;
        }

        let period = period_key(bucket, event.at);

        let assigned = bucket.rotating().map(|rotating| {
            ensure_assignment(
                tree,
                catalog,
                rotating,
                &period,
                event.guild_id,
                event.user_id,
                settings,
            )
        });

        for (quest, amount) in matching {
            if let Some(assigned) = &assigned {
                if !assigned.iter().any(|key| *key == quest.key) {
                    continue;
                }
            }

            let entry = tree
                .user_mut(bucket, &period, event.guild_id, event.user_id)
                .entry_mut(&quest.key);
            let changed = if quest.kind.is_one_shot() {
                entry.complete(quest.target)
            } else {
                entry.advance(amount, quest.target)
            };

            if changed {
                updates.push(ProgressUpdate {
                    bucket,
                    period_key: period.clone(),
                    quest_key: quest.key.clone(),
                    progress: entry.progress,
                    target: quest.target,
                });
            }
        }
    }

    updates
}

impl QuestLedger {
    /// Credits an event to the user's quests.
    ///
    /// Events that match no quest in the catalog return without taking the store lock.
    ///
    /// # Arguments
    /// - `event` - The event to account
    ///
    /// # Returns
    /// - `Ok(Vec<ProgressUpdate>)` - Quests whose progress moved, empty if none did
    /// - `Err(AppError)` - The catalog or progress store could not be read or written;
    ///   the event was not recorded
    pub async fn ingest(&self, event: QuestEvent) -> Result<Vec<ProgressUpdate>, AppError> {
        let catalog = self.catalog.load().await?;

        let relevant = catalog
            .iter()
            .any(|quest| credit_for(quest, &event.trigger, event.at).is_some());
        if !relevant {
            return Ok(Vec::new());
        }

        let settings = self.settings;
        let updates = self
            .store
            .mutate(|tree| apply_event(tree, &catalog, &settings, &event))
            .await?;

        for update in &updates {
            tracing::debug!(
                "Quest {}/{} for user {} in guild {} at {}/{}",
                update.bucket,
                update.quest_key,
                event.user_id,
                event.guild_id,
                update.progress,
                update.target
            );
        }

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::server::model::quest::QuestEntry;

    fn quest(bucket: Bucket, key: &str, kind: QuestKind) -> QuestDefinition {
        QuestDefinition::from_entry(
            bucket,
            key,
            QuestEntry {
                name: key.to_string(),
                kind,
                target: 5,
                reward: 10,
                reset: None,
                max_claims_per_reset: 1,
            },
        )
        .unwrap()
    }

    fn message(content: &str) -> QuestTrigger {
        QuestTrigger::Message {
            channel_id: 42,
            content: content.to_string(),
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// Tests exact-text matching.
    ///
    /// Expected: surrounding whitespace is ignored, case and other channels are not
    #[test]
    fn exact_text_is_trimmed_and_case_sensitive() {
        let any_channel = quest(
            Bucket::Daily,
            "gm",
            QuestKind::MessageExact {
                text: "gm".to_string(),
                channel_id: None,
            },
        );
        let one_channel = quest(
            Bucket::Daily,
            "gm_here",
            QuestKind::MessageExact {
                text: "gm".to_string(),
                channel_id: Some(7),
            },
        );

        assert_eq!(credit_for(&any_channel, &message("  gm \n"), noon()), Some(1));
        assert_eq!(credit_for(&any_channel, &message("GM"), noon()), None);
        assert_eq!(credit_for(&any_channel, &message("gm all"), noon()), None);
        assert_eq!(credit_for(&one_channel, &message("gm"), noon()), None);
    }

    /// Tests a time window wrapping past midnight.
    ///
    /// Expected: 23:00 and 01:00 count, 02:00 and 12:00 do not
    #[test]
    fn wrapping_window() {
        let tz: Tz = "UTC".parse().unwrap();
        let at = |h| Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap();

        assert!(in_window(at(23), tz, 22, 2));
        assert!(in_window(at(1), tz, 22, 2));
        assert!(!in_window(at(2), tz, 22, 2));
        assert!(!in_window(at(12), tz, 22, 2));
    }

    /// Tests that the window uses the quest's timezone.
    ///
    /// Expected: 20:00 UTC is 22:00 in Paris during summer time, inside 22-23
    #[test]
    fn window_uses_local_hour() {
        let paris: Tz = "Europe/Paris".parse().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 20, 30, 0).unwrap();

        assert!(in_window(at, paris, 22, 23));
        assert!(!in_window(at, Tz::UTC, 22, 23));
    }

    /// Tests equal window bounds.
    ///
    /// Expected: every hour is inside
    #[test]
    fn equal_bounds_cover_the_day() {
        for hour in 0..24 {
            let at = Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap();
            assert!(in_window(at, Tz::UTC, 5, 5));
        }
    }

    /// Tests command matching.
    ///
    /// Expected: leading slash and case are ignored; unnamed quests take any command
    #[test]
    fn command_names() {
        let named = quest(
            Bucket::Daily,
            "use_daily",
            QuestKind::CommandUse {
                command: Some("/Daily".to_string()),
            },
        );
        let any = quest(Bucket::Daily, "use_any", QuestKind::CommandUse { command: None });
        let trigger = |name: &str| QuestTrigger::Command {
            name: name.to_string(),
        };

        assert_eq!(credit_for(&named, &trigger("daily"), noon()), Some(1));
        assert_eq!(credit_for(&named, &trigger("shop"), noon()), None);
        assert_eq!(credit_for(&any, &trigger("shop"), noon()), Some(1));
    }

    /// Tests kinds that never match the wrong trigger.
    ///
    /// Expected: zero voice minutes, meta-quests and manual quests of another key
    /// earn nothing
    #[test]
    fn non_matching_triggers() {
        let voice = quest(Bucket::Daily, "voice", QuestKind::VoiceMinutes);
        let meta = quest(Bucket::Weekly, "meta", QuestKind::QuestsCompleted);
        let manual = quest(Bucket::Lifetime, "winner", QuestKind::ManualActor);

        assert_eq!(credit_for(&voice, &QuestTrigger::VoiceMinutes(0), noon()), None);
        assert_eq!(credit_for(&voice, &QuestTrigger::VoiceMinutes(12), noon()), Some(12));
        assert_eq!(credit_for(&meta, &QuestTrigger::DailyClaim, noon()), None);
        assert_eq!(
            credit_for(
                &manual,
                &QuestTrigger::ManualValidation {
                    bucket: Bucket::Lifetime,
                    quest_key: "other".to_string(),
                },
                noon()
            ),
            None
        );
        assert_eq!(
            credit_for(
                &manual,
                &QuestTrigger::ManualValidation {
                    bucket: Bucket::Lifetime,
                    quest_key: "winner".to_string(),
                },
                noon()
            ),
            Some(1)
        );
    }
}
