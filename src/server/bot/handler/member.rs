use chrono::{DateTime, Duration, Utc};
use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, User};

use crate::server::{
    bot::handler::{invite::fetch_invites, log::post_log},
    model::quest_event::{QuestEvent, QuestTrigger},
    service::invite::InviteService,
    state::AppState,
};

/// How old a boost may be and still count as new when the previous member state is
/// not cached.
const BOOST_GRACE_MINUTES: i64 = 5;

/// Handles the guild_member_addition event when a member joins a guild
///
/// Works out which invite was used, records the referral and pays the inviter.
pub async fn handle_guild_member_addition(state: &AppState, ctx: Context, new_member: Member) {
    if new_member.user.bot {
        return;
    }

    let guild_id = new_member.guild_id.get();
    let member_id = new_member.user.id.get();

    let inviter_id = match fetch_invites(&ctx, new_member.guild_id).await {
        Ok(fresh) => state.invites.resolve_join(guild_id, fresh).await,
        Err(e) => {
            tracing::error!("Failed to fetch invites for guild {}: {}", guild_id, e);
            None
        }
    };

    let service = InviteService::new(&state.db, &state.ledger, state.invite_reward_points);
    let join = match service
        .member_joined(guild_id, member_id, inviter_id, Utc::now())
        .await
    {
        Ok(Some(join)) => join,
        Ok(None) => {
            tracing::debug!("Could not attribute join of {} in guild {}", member_id, guild_id);
            return;
        }
        Err(e) => {
            tracing::error!("Failed to record invite join for {}: {}", member_id, e);
            return;
        }
    };

    let mut line = format!(
        "<@{}> joined through an invite from <@{}> ({} invites)",
        member_id, join.inviter_id, join.invite_count
    );
    if let Some(total) = join.rewarded_total {
        line.push_str(&format!(
            ", +{} points (total {})",
            state.invite_reward_points, total
        ));
    }
    post_log(&ctx, state.invite_log_channel_id, line).await;
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    state: &AppState,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    let service = InviteService::new(&state.db, &state.ledger, state.invite_reward_points);

    let leave = match service.member_left(guild_id.get(), user.id.get()).await {
        Ok(Some(leave)) => leave,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to drop invite referral for {}: {}", user.id, e);
            return;
        }
    };

    tracing::info!(
        "Member {} left guild {}; inviter {} now has {} invites",
        user.id,
        guild_id,
        leave.inviter_id,
        leave.invite_count
    );

    post_log(
        &ctx,
        state.invite_log_channel_id,
        format!(
            "{} left; <@{}> now has {} invites",
            user.name, leave.inviter_id, leave.invite_count
        ),
    )
    .await;
}

/// Handles the guild_member_update event
///
/// Completes `server_boost` quests when the member starts boosting.
pub async fn handle_guild_member_update(
    state: &AppState,
    _ctx: Context,
    old: Option<Member>,
    _new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    if event.user.bot {
        return;
    }
    let Some(boosted_at) = event.premium_since else {
        return;
    };

    let now = Utc::now();
    let previous = old.map(|member| member.premium_since.map(|at| at.to_utc()));
    if !is_new_boost(previous, boosted_at.to_utc(), now) {
        return;
    }

    tracing::info!("User {} started boosting guild {}", event.user.id, event.guild_id);

    let event = QuestEvent::new(
        event.guild_id.get(),
        event.user.id.get(),
        now,
        QuestTrigger::ServerBoost,
    );
    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!("Failed to record boost quest progress: {}", e);
    }
}

/// Decides whether a member update marks the start of a boost.
///
/// # Arguments
/// - `previous` - The member's boost start before the update; `None` when not cached
/// - `boosted_at` - Boost start reported by the update
/// - `now` - Current instant
fn is_new_boost(
    previous: Option<Option<DateTime<Utc>>>,
    boosted_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    match previous {
        Some(previous) => previous.is_none(),
        None => now - boosted_at <= Duration::minutes(BOOST_GRACE_MINUTES),
    }
}
