//! Library Service
//!
//! Read-only browsing of the library catalog.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CatalogClient, Library, LibraryBook, Page, Pagination};
use crate::shared::error::UpstreamError;

/// Library service trait defining catalog browsing.
#[async_trait]
pub trait LibraryService: Send + Sync {
    /// List the libraries of a city.
    async fn list_libraries(
        &self,
        city: &str,
        pagination: Pagination,
    ) -> Result<Page<Library>, LibraryError>;

    /// List the books of a library. Books with no copy on the shelf are
    /// only included when `show_all` is set.
    async fn list_library_books(
        &self,
        library_uid: Uuid,
        show_all: bool,
        pagination: Pagination,
    ) -> Result<Page<LibraryBook>, LibraryError>;
}

/// Library service errors.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error(transparent)]
    Upstream(UpstreamError),
}

impl From<UpstreamError> for LibraryError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound { what, .. } => LibraryError::NotFound(what),
            other => LibraryError::Upstream(other),
        }
    }
}

/// Library service implementation.
pub struct LibraryServiceImpl<C>
where
    C: CatalogClient,
{
    catalog: Arc<C>,
}

impl<C> LibraryServiceImpl<C>
where
    C: CatalogClient,
{
    /// Create a new LibraryServiceImpl.
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl<C> LibraryService for LibraryServiceImpl<C>
where
    C: CatalogClient + 'static,
{
    async fn list_libraries(
        &self,
        city: &str,
        pagination: Pagination,
    ) -> Result<Page<Library>, LibraryError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LibraryError::Invalid("city must not be empty".into()));
        }

        Ok(self.catalog.list_libraries(city, pagination).await?)
    }

    async fn list_library_books(
        &self,
        library_uid: Uuid,
        show_all: bool,
        pagination: Pagination,
    ) -> Result<Page<LibraryBook>, LibraryError> {
        let mut page = self
            .catalog
            .list_library_books(library_uid, show_all, pagination)
            .await?;

        // The catalog filters too; keep the guarantee even if it does not.
        if !show_all {
            page.items.retain(|b| b.available_count > 0);
        }

        Ok(page)
    }
}
