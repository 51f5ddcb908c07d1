use crate::server::{data::daily::DailyClaimRepository, error::AppError};
use chrono::{Duration, TimeZone, Utc};
use test_utils::{builder::TestBuilder, factory};

mod record_claim;
mod record_first_claim;
