//! Rating Service
//!
//! Read-through lookup of a user's star rating.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Rating, RatingClient};
use crate::shared::error::UpstreamError;

/// Rating service trait defining rating lookups.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Get the current rating of a user.
    async fn get_rating(&self, user_name: &str) -> Result<RatingDto, RatingError>;
}

/// Rating data transfer object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDto {
    pub stars: i32,
}

impl From<Rating> for RatingDto {
    fn from(rating: Rating) -> Self {
        Self {
            stars: rating.stars,
        }
    }
}

/// Rating service errors.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Rating not found for {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(UpstreamError),
}

impl From<UpstreamError> for RatingError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound { what, .. } => RatingError::NotFound(what),
            other => RatingError::Upstream(other),
        }
    }
}

/// Rating service implementation.
pub struct RatingServiceImpl<R>
where
    R: RatingClient,
{
    rating_client: Arc<R>,
}

impl<R> RatingServiceImpl<R>
where
    R: RatingClient,
{
    /// Create a new RatingServiceImpl.
    pub fn new(rating_client: Arc<R>) -> Self {
        Self { rating_client }
    }
}

#[async_trait]
impl<R> RatingService for RatingServiceImpl<R>
where
    R: RatingClient + 'static,
{
    async fn get_rating(&self, user_name: &str) -> Result<RatingDto, RatingError> {
        let rating = self.rating_client.get_rating(user_name).await?;
        Ok(rating.into())
    }
}
