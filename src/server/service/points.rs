use sea_orm::DatabaseConnection;

use crate::server::{
    data::points::PointsRepository,
    error::AppError,
    model::points::{Debit, PointBalance},
};

pub struct PointsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Credits points and returns the new balance
    pub async fn add_points(&self, user_id: u64, amount: i64) -> Result<i64, AppError> {
        let total = PointsRepository::new(self.db).add(user_id, amount).await?;

        tracing::debug!("Added {} points to user {}, total {}", amount, user_id, total);

        Ok(total)
    }

    /// Removes points, stopping at zero, and returns the new balance
    pub async fn remove_points(&self, user_id: u64, amount: i64) -> Result<i64, AppError> {
        Ok(PointsRepository::new(self.db)
            .add(user_id, -amount.abs())
            .await?)
    }

    /// Overwrites a balance; negative values are stored as zero
    pub async fn set_points(&self, user_id: u64, points: i64) -> Result<i64, AppError> {
        Ok(PointsRepository::new(self.db).set(user_id, points).await?)
    }

    pub async fn balance(&self, user_id: u64) -> Result<i64, AppError> {
        Ok(PointsRepository::new(self.db).balance(user_id).await?)
    }

    /// Spends points only if the whole amount is available
    pub async fn spend(&self, user_id: u64, amount: i64) -> Result<Debit, AppError> {
        if amount < 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot spend a negative amount ({})",
                amount
            )));
        }

        Ok(PointsRepository::new(self.db)
            .try_debit(user_id, amount)
            .await?)
    }

    pub async fn leaderboard(&self, limit: u64) -> Result<Vec<PointBalance>, AppError> {
        Ok(PointsRepository::new(self.db).leaderboard(limit).await?)
    }
}
