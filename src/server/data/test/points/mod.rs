use crate::server::{data::points::PointsRepository, error::AppError, model::points::Debit};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod leaderboard;
mod set;
mod try_debit;
