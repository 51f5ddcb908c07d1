//! Questboard Test Utils
//!
//! Provides shared testing utilities for the questboard repositories and services. This
//! crate offers a builder for test contexts backed by in-memory SQLite databases, plus
//! factories and fixtures for the collaborator tables.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Insert rows with sensible defaults
//! - **fixture**: Build entity models in memory without touching the database
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::PointBalance;
//!
//! #[tokio::test]
//! async fn test_points() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(PointBalance)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
