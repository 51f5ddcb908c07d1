use questboard::server::{
    bot, config::Config, error::AppError, scheduler::quest_rollover, service::voice::VoiceTracker,
    startup, state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let ledger = startup::init_quest_ledger(&config).await?;
    let voice = VoiceTracker::new();

    tracing::info!("Starting questboard");

    // Start quest rollover scheduler
    let scheduler_ledger = ledger.clone();
    let scheduler_voice = voice.clone();
    tokio::spawn(async move {
        if let Err(e) = quest_rollover::start_scheduler(scheduler_ledger, scheduler_voice).await {
            tracing::error!("Quest rollover scheduler error: {}", e);
        }
    });

    let state = AppState::new(&config, db, ledger, voice);
    let (bot_client, _discord_http) = bot::start::init_bot(&config, state).await?;

    // The bot runs until shutdown; the scheduler lives on its own task
    bot::start::start_bot(bot_client).await
}
