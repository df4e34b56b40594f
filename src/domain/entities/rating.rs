//! Rating entity and the rating client trait.

use async_trait::async_trait;

use crate::shared::error::UpstreamError;

/// A user's star rating. Stars bound how many books the user may hold at
/// once; penalties can push the value below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub user_name: String,
    pub stars: i32,
}

/// Client for the rating service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingClient: Send + Sync {
    async fn get_rating(&self, user_name: &str) -> Result<Rating, UpstreamError>;

    async fn update_rating(&self, user_name: &str, stars: i32) -> Result<(), UpstreamError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), UpstreamError>;
}
