//! Library Catalog Client
//!
//! HTTP implementation of [`CatalogClient`] against the library service.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::http::UpstreamHttp;
use crate::config::ServiceSettings;
use crate::domain::{
    Book, BookCheckIn, BookCondition, BookInfo, CatalogClient, Library, LibraryBook, Page,
    Pagination,
};
use crate::shared::error::UpstreamError;

const SERVICE: &str = "library";

/// Book as serialized by the library service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWire {
    pub book_uid: Uuid,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub condition: BookCondition,
}

/// Library as serialized by the library service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryWire {
    pub library_uid: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
}

/// Book with the library that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInfoWire {
    #[serde(flatten)]
    pub book: BookWire,
    pub library: LibraryWire,
}

/// Book listed in a library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBookWire {
    #[serde(flatten)]
    pub book: BookWire,
    pub available_count: u32,
}

/// Response of a check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInWire {
    pub old_book: BookWire,
    pub new_book: BookWire,
}

/// Paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWire<T> {
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckInRequest {
    condition: BookCondition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    book_uids: &'a [Uuid],
}

impl From<BookWire> for Book {
    fn from(wire: BookWire) -> Self {
        Self {
            book_uid: wire.book_uid,
            name: wire.name,
            author: wire.author,
            genre: wire.genre,
            condition: wire.condition,
        }
    }
}

impl From<LibraryWire> for Library {
    fn from(wire: LibraryWire) -> Self {
        Self {
            library_uid: wire.library_uid,
            name: wire.name,
            city: wire.city,
            address: wire.address,
        }
    }
}

impl From<BookInfoWire> for BookInfo {
    fn from(wire: BookInfoWire) -> Self {
        Self {
            book: wire.book.into(),
            library: wire.library.into(),
        }
    }
}

impl From<LibraryBookWire> for LibraryBook {
    fn from(wire: LibraryBookWire) -> Self {
        Self {
            book: wire.book.into(),
            available_count: wire.available_count,
        }
    }
}

impl<T> PageWire<T> {
    fn into_page<U: From<T>>(self) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total_elements: self.total_elements,
            items: self.items,
        }
        .map(U::from)
    }
}

/// HTTP implementation of the library catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: UpstreamHttp,
}

impl HttpCatalogClient {
    /// Creates a client for the library service at the configured address.
    pub fn new(settings: &ServiceSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: UpstreamHttp::new(SERVICE, settings)?,
        })
    }

    fn book_path(library_uid: Uuid, book_uid: Uuid) -> String {
        format!("/api/v1/libraries/{}/books/{}", library_uid, book_uid)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_book(&self, library_uid: Uuid, book_uid: Uuid) -> Result<BookInfo, UpstreamError> {
        let request = self
            .http
            .request(Method::GET, &Self::book_path(library_uid, book_uid));

        let wire: BookInfoWire = self
            .http
            .send_json(
                "get_book",
                &format!("book {} in library {}", book_uid, library_uid),
                request,
            )
            .await?;

        Ok(wire.into())
    }

    async fn check_out(&self, library_uid: Uuid, book_uid: Uuid) -> Result<Book, UpstreamError> {
        let path = format!("{}/checkout", Self::book_path(library_uid, book_uid));
        let request = self.http.request(Method::POST, &path);

        let wire: BookWire = self
            .http
            .send_json(
                "check_out",
                &format!("book {} in library {}", book_uid, library_uid),
                request,
            )
            .await?;

        Ok(wire.into())
    }

    async fn check_in(
        &self,
        library_uid: Uuid,
        book_uid: Uuid,
        condition: BookCondition,
    ) -> Result<BookCheckIn, UpstreamError> {
        let path = format!("{}/checkin", Self::book_path(library_uid, book_uid));
        let request = self
            .http
            .request(Method::POST, &path)
            .json(&CheckInRequest { condition });

        let wire: CheckInWire = self
            .http
            .send_json(
                "check_in",
                &format!("book {} in library {}", book_uid, library_uid),
                request,
            )
            .await?;

        Ok(BookCheckIn {
            old_book: wire.old_book.into(),
            new_book: wire.new_book.into(),
        })
    }

    async fn get_books_by_ids(&self, book_uids: &[Uuid]) -> Result<Vec<BookInfo>, UpstreamError> {
        let request = self
            .http
            .request(Method::POST, "/api/v1/books/batch")
            .json(&BatchRequest { book_uids });

        let wire: Vec<BookInfoWire> = self
            .http
            .send_json("get_books_by_ids", "books", request)
            .await?;

        Ok(wire.into_iter().map(BookInfo::from).collect())
    }

    async fn list_libraries(
        &self,
        city: &str,
        pagination: Pagination,
    ) -> Result<Page<Library>, UpstreamError> {
        let request = self.http.request(Method::GET, "/api/v1/libraries").query(&[
            ("city", city.to_string()),
            ("page", pagination.page.to_string()),
            ("size", pagination.size.to_string()),
        ]);

        let wire: PageWire<LibraryWire> = self
            .http
            .send_json("list_libraries", &format!("libraries in {}", city), request)
            .await?;

        Ok(wire.into_page())
    }

    async fn list_library_books(
        &self,
        library_uid: Uuid,
        show_all: bool,
        pagination: Pagination,
    ) -> Result<Page<LibraryBook>, UpstreamError> {
        let path = format!("/api/v1/libraries/{}/books", library_uid);
        let request = self.http.request(Method::GET, &path).query(&[
            ("showAll", show_all.to_string()),
            ("page", pagination.page.to_string()),
            ("size", pagination.size.to_string()),
        ]);

        let wire: PageWire<LibraryBookWire> = self
            .http
            .send_json(
                "list_library_books",
                &format!("library {}", library_uid),
                request,
            )
            .await?;

        Ok(wire.into_page())
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        self.http.ping().await
    }
}
