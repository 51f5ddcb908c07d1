use std::sync::Arc;

use crate::server::{
    data::progress_store::{JsonFileBackend, MemoryBackend, ProgressBackend, ProgressStore},
    error::AppError,
    model::{progress::ProgressTree, quest::Bucket},
};

mod json_file;
mod mutate;
