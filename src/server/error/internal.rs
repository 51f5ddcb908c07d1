use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Discord snowflakes are stored as strings in the database; a stored value that
    /// is not a valid u64 means the row was written by something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored member tier does not name a known tier.
    #[error("Unknown member tier '{value}' stored for user {user_id}")]
    UnknownTier {
        /// Discord ID of the user owning the row
        user_id: u64,
        /// The stored tier value
        value: String,
    },
}
