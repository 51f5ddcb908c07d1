use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{PointBalance, ShopItem};
///
/// let test = TestBuilder::new()
///     .with_table(PointBalance)
///     .with_table(ShopItem)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables the shop needs: point balances, items and purchases.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_shop_tables(self) -> Self {
        self.with_table(PointBalance)
            .with_table(ShopItem)
            .with_table(ShopPurchase)
    }

    /// Adds all tables invite tracking needs: referrals, rewards and point balances.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_invite_tables(self) -> Self {
        self.with_table(PointBalance)
            .with_table(InviteReferral)
            .with_table(InviteReward)
    }

    /// Adds every table of the bot.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_all_tables(self) -> Self {
        self.with_shop_tables()
            .with_table(DailyClaim)
            .with_table(InviteReferral)
            .with_table(InviteReward)
            .with_table(MemberTier)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
