use crate::server::{
    data::tier::TierRepository,
    error::{internal::InternalError, AppError},
    model::tier::Tier,
};
use test_utils::{builder::TestBuilder, factory};

mod clear;
mod get;
mod set;
