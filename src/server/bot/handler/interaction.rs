//! Interaction handler.
//!
//! Slash commands only count toward `command_use` quests; answering them is left to
//! whatever front end registers them. Buttons whose custom id is one of the bot's own
//! actions are answered here with an ephemeral reply:
//!
//! - `quest_claim` - claim every complete quest, then announce each claimed quest
//! - `daily_claim` - claim the daily login reward
//! - `shop_buy:<item key>` - buy one unit of a shop item and grant its role

use chrono::{Duration, Utc};
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, Interaction, RoleId,
};

use crate::server::{
    bot::handler::log::post_log,
    error::AppError,
    model::{
        claim::ClaimOutcome,
        daily::DailyClaimOutcome,
        quest_event::{QuestEvent, QuestTrigger},
        shop::PurchaseOutcome,
    },
    service::{
        daily::DailyService,
        notification::{notify_claims, DiscordNotificationSink},
        quest::QuestService,
        shop::ShopService,
    },
    state::AppState,
};

/// A button action the bot answers itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    ClaimQuests,
    ClaimDaily,
    Buy(String),
}

impl ButtonAction {
    /// Parses a component custom id; `None` for ids the bot does not own.
    pub fn parse(custom_id: &str) -> Option<Self> {
        match custom_id {
            "quest_claim" => Some(Self::ClaimQuests),
            "daily_claim" => Some(Self::ClaimDaily),
            other => other
                .strip_prefix("shop_buy:")
                .filter(|key| !key.is_empty())
                .map(|key| Self::Buy(key.to_string())),
        }
    }
}

/// Handles the interaction_create event
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => count_command(state, command).await,
        Interaction::Component(component) => handle_component(state, ctx, component).await,
        _ => {}
    }
}

async fn count_command(state: &AppState, command: CommandInteraction) {
    let Some(guild_id) = command.guild_id else {
        return;
    };
    if command.user.bot {
        return;
    }

    let event = QuestEvent::new(
        guild_id.get(),
        command.user.id.get(),
        Utc::now(),
        QuestTrigger::Command {
            name: command.data.name.clone(),
        },
    );

    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!(
            "Failed to record command quest progress for user {}: {}",
            command.user.id,
            e
        );
    }
}

async fn handle_component(state: &AppState, ctx: Context, component: ComponentInteraction) {
    let Some(action) = ButtonAction::parse(&component.data.custom_id) else {
        return;
    };
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let guild_id = guild_id.get();
    let user_id = component.user.id.get();
    let now = Utc::now();

    let (reply, claim) = match run_action(state, &ctx, &action, guild_id, user_id, now).await {
        Ok(done) => done,
        Err(AppError::NotFound(message)) => (message, None),
        Err(e) => {
            tracing::error!(
                "Failed to run {:?} for user {} in guild {}: {}",
                action,
                user_id,
                guild_id,
                e
            );
            ("Something went wrong, try again later.".to_string(), None)
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(reply)
            .ephemeral(true),
    );
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::warn!("Failed to answer interaction of user {}: {}", user_id, e);
    }

    // Announcements go out after the reply so Discord's response deadline is met
    if let Some(outcome) = claim {
        let sink = DiscordNotificationSink::new(ctx.http.clone(), state.quest_log_channel_id);
        notify_claims(&sink, &outcome).await;
    }
}

/// Runs a button action.
///
/// # Returns
/// - `Ok((reply, claim))` - Reply for the member, and the claim outcome to announce
/// - `Err(AppError)` - Service failure
async fn run_action(
    state: &AppState,
    ctx: &Context,
    action: &ButtonAction,
    guild_id: u64,
    user_id: u64,
    now: chrono::DateTime<Utc>,
) -> Result<(String, Option<ClaimOutcome>), AppError> {
    match action {
        ButtonAction::ClaimQuests => {
            let outcome = QuestService::new(&state.db, &state.ledger, &state.tier_multipliers)
                .claim(guild_id, user_id, now)
                .await?;
            Ok((claim_reply(&outcome), Some(outcome)))
        }
        ButtonAction::ClaimDaily => {
            let outcome = DailyService::new(&state.db, &state.ledger, &state.daily)
                .claim_daily(guild_id, user_id, now)
                .await?;
            Ok((daily_reply(&outcome), None))
        }
        ButtonAction::Buy(key) => {
            let outcome = ShopService::new(&state.db).purchase(user_id, key).await?;

            if let PurchaseOutcome::Purchased { item, remaining } = &outcome {
                if let Some(role_id) = item.role_id {
                    if let Err(e) = ctx
                        .http
                        .add_member_role(
                            guild_id.into(),
                            user_id.into(),
                            RoleId::new(role_id),
                            Some("Shop purchase"),
                        )
                        .await
                    {
                        tracing::warn!(
                            "Failed to grant role {} to user {}: {}",
                            role_id,
                            user_id,
                            e
                        );
                    }
                }

                post_log(
                    ctx,
                    state.shop_log_channel_id,
                    format!(
                        "<@{}> bought **{}** for {} points ({} left)",
                        user_id, item.name, item.cost, remaining
                    ),
                )
                .await;
            }

            Ok((purchase_reply(&outcome), None))
        }
    }
}

/// Reply to a quest claim.
pub fn claim_reply(outcome: &ClaimOutcome) -> String {
    let Some(total) = outcome.new_total else {
        return "No completed quests to claim.".to_string();
    };

    let names: Vec<&str> = outcome
        .claimed
        .iter()
        .map(|quest| quest.quest_name.as_str())
        .collect();

    format!(
        "Claimed {} (+{} points, total {})",
        names.join(", "),
        outcome.points_gained,
        total
    )
}

/// Reply to a daily reward claim.
pub fn daily_reply(outcome: &DailyClaimOutcome) -> String {
    match outcome {
        DailyClaimOutcome::Claimed {
            reward,
            streak,
            new_total,
            ..
        } => format!(
            "+{} points, {} day streak (total {})",
            reward, streak, new_total
        ),
        DailyClaimOutcome::Cooldown { remaining } => {
            format!("Come back in {}.", hours_and_minutes(*remaining))
        }
    }
}

/// Reply to a shop purchase.
pub fn purchase_reply(outcome: &PurchaseOutcome) -> String {
    match outcome {
        PurchaseOutcome::Purchased { item, remaining } => {
            format!("Bought **{}**, {} points left.", item.name, remaining)
        }
        PurchaseOutcome::LimitReached { max } => {
            format!("You already own the maximum of {}.", max)
        }
        PurchaseOutcome::InsufficientPoints { missing } => {
            format!("You need {} more points.", missing)
        }
    }
}

fn hours_and_minutes(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
