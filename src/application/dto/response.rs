//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::{RatingDto, ReservationDto, TakeBookResultDto};
use crate::domain::{Book, Library, LibraryBook, Page};

/// Book response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub book_uid: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub condition: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_uid: book.book_uid.to_string(),
            name: book.name,
            author: book.author,
            genre: book.genre,
            condition: book.condition.as_str().to_string(),
        }
    }
}

/// Book listed in a library
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBookResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    pub available_count: u32,
}

impl From<LibraryBook> for LibraryBookResponse {
    fn from(item: LibraryBook) -> Self {
        Self {
            book: item.book.into(),
            available_count: item.available_count,
        }
    }
}

/// Library response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
    pub library_uid: String,
    pub name: String,
    pub city: String,
    pub address: String,
}

impl From<Library> for LibraryResponse {
    fn from(library: Library) -> Self {
        Self {
            library_uid: library.library_uid.to_string(),
            name: library.name,
            city: library.city,
            address: library.address,
        }
    }
}

/// Paged listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub items: Vec<T>,
}

impl<T, U> From<Page<U>> for PageResponse<T>
where
    T: From<U>,
{
    fn from(page: Page<U>) -> Self {
        let page = page.map(T::from);
        Self {
            page: page.page,
            page_size: page.page_size,
            total_elements: page.total_elements,
            items: page.items,
        }
    }
}

/// Rating response
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub stars: i32,
}

impl From<RatingDto> for RatingResponse {
    fn from(dto: RatingDto) -> Self {
        Self { stars: dto.stars }
    }
}

/// Reservation with its book and library
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_uid: String,
    pub status: String,
    pub start_date: String,
    pub till_date: String,
    pub book: BookResponse,
    pub library: LibraryResponse,
}

impl From<ReservationDto> for ReservationResponse {
    fn from(dto: ReservationDto) -> Self {
        Self {
            reservation_uid: dto.reservation_uid.to_string(),
            status: dto.status.as_str().to_string(),
            start_date: dto.start_date.to_string(),
            till_date: dto.till_date.to_string(),
            book: dto.book.into(),
            library: dto.library.into(),
        }
    }
}

/// Take book response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeBookResponse {
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    pub rating: RatingResponse,
}

impl From<TakeBookResultDto> for TakeBookResponse {
    fn from(dto: TakeBookResultDto) -> Self {
        Self {
            reservation: dto.reservation.into(),
            rating: dto.rating.into(),
        }
    }
}
