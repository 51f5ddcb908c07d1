use crate::server::{data::invite::InviteRepository, error::AppError, model::invite::InviterCount};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod record_referral;
mod record_reward;
mod remove_referral;
mod top_inviters;
