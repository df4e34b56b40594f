//! Rating Client
//!
//! HTTP implementation of [`RatingClient`] against the rating service.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::http::{UpstreamHttp, USER_NAME_HEADER};
use crate::config::ServiceSettings;
use crate::domain::{Rating, RatingClient};
use crate::shared::error::UpstreamError;

const SERVICE: &str = "rating";
const RATING_PATH: &str = "/api/v1/rating";

/// Rating as serialized by the rating service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWire {
    pub stars: i32,
}

/// HTTP implementation of the rating client.
#[derive(Debug, Clone)]
pub struct HttpRatingClient {
    http: UpstreamHttp,
}

impl HttpRatingClient {
    /// Creates a client for the rating service at the configured address.
    pub fn new(settings: &ServiceSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: UpstreamHttp::new(SERVICE, settings)?,
        })
    }
}

#[async_trait]
impl RatingClient for HttpRatingClient {
    async fn get_rating(&self, user_name: &str) -> Result<Rating, UpstreamError> {
        let request = self
            .http
            .request(Method::GET, RATING_PATH)
            .header(USER_NAME_HEADER, user_name);

        let wire: RatingWire = self
            .http
            .send_json("get_rating", &format!("rating of {}", user_name), request)
            .await?;

        Ok(Rating {
            user_name: user_name.to_string(),
            stars: wire.stars,
        })
    }

    async fn update_rating(&self, user_name: &str, stars: i32) -> Result<(), UpstreamError> {
        let request = self
            .http
            .request(Method::PUT, RATING_PATH)
            .header(USER_NAME_HEADER, user_name)
            .json(&RatingWire { stars });

        self.http
            .send_empty("update_rating", &format!("rating of {}", user_name), request)
            .await
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        self.http.ping().await
    }
}
