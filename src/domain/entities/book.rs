//! Book and library entities and the catalog client trait.
//!
//! Books and libraries are owned by the library catalog service; the
//! gateway only reads them and asks the catalog to check copies out and in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::UpstreamError;

/// Physical condition of a book copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCondition {
    Bad,
    Good,
    Excellent,
}

impl BookCondition {
    /// Tag as written in logs; matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "BAD",
            Self::Good => "GOOD",
            Self::Excellent => "EXCELLENT",
        }
    }
}

impl std::fmt::Display for BookCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A book title as held by one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub book_uid: Uuid,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub condition: BookCondition,
}

/// A library branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub library_uid: Uuid,
    pub name: String,
    pub city: String,
    pub address: String,
}

/// A book together with the library that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInfo {
    pub book: Book,
    pub library: Library,
}

impl BookInfo {
    /// `(book_uid, library_uid)` identifying the copy this record describes.
    pub fn copy_key(&self) -> (Uuid, Uuid) {
        (self.book.book_uid, self.library.library_uid)
    }
}

/// A book listed in a library, with the number of copies on the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryBook {
    pub book: Book,
    pub available_count: u32,
}

/// Outcome of checking a copy back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCheckIn {
    pub old_book: Book,
    pub new_book: Book,
}

impl BookCheckIn {
    /// Whether the copy came back in a different condition, in either direction.
    pub fn condition_changed(&self) -> bool {
        self.old_book.condition != self.new_book.condition
    }
}

/// Client for the library catalog service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Resolve a book and the library holding it.
    async fn get_book(&self, library_uid: Uuid, book_uid: Uuid) -> Result<BookInfo, UpstreamError>;

    /// Mark one copy of the book as taken out.
    async fn check_out(&self, library_uid: Uuid, book_uid: Uuid) -> Result<Book, UpstreamError>;

    /// Put a copy back on the shelf with the reported condition.
    async fn check_in(
        &self,
        library_uid: Uuid,
        book_uid: Uuid,
        condition: BookCondition,
    ) -> Result<BookCheckIn, UpstreamError>;

    /// Fetch every book (with its library) for the given ids.
    async fn get_books_by_ids(&self, book_uids: &[Uuid]) -> Result<Vec<BookInfo>, UpstreamError>;

    /// List the libraries of a city.
    async fn list_libraries(
        &self,
        city: &str,
        pagination: Pagination,
    ) -> Result<Page<Library>, UpstreamError>;

    /// List the books of a library, optionally including ones with no copies left.
    async fn list_library_books(
        &self,
        library_uid: Uuid,
        show_all: bool,
        pagination: Pagination,
    ) -> Result<Page<LibraryBook>, UpstreamError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), UpstreamError>;
}
