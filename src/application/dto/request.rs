//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{BookCondition, Pagination};

/// Take book request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeBookRequest {
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    pub till_date: NaiveDate,
}

/// Return book request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    pub condition: BookCondition,
    pub date: NaiveDate,
}

/// Library search query parameters
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LibrariesQuery {
    #[validate(length(min = 1, max = 80, message = "City must be 1-80 characters"))]
    pub city: String,

    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Size must be 1-100"))]
    pub size: Option<u32>,
}

impl LibrariesQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.size)
    }
}

/// Library books query parameters
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBooksQuery {
    #[serde(default)]
    pub show_all: bool,

    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Size must be 1-100"))]
    pub size: Option<u32>,
}

impl LibraryBooksQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.size)
    }
}
