mod daily;
mod invite;
mod points;
mod progress_store;
mod quest_catalog;
mod shop;
mod tier;
