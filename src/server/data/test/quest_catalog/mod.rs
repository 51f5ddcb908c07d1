use crate::server::{
    data::quest_catalog::{parse_catalog, QuestCatalogRepository, DEFAULT_CATALOG},
    error::AppError,
    model::quest::{Bucket, QuestEntry, QuestKind, ResetCadence},
};
use serde_json::json;

mod ensure_default;
mod load;
mod upsert_quest;
