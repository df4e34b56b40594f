//! Common Test Utilities
//!
//! In-memory collaborators and a router harness driven with `oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use library_gateway::config::CorsSettings;
use library_gateway::domain::{
    Book, BookCheckIn, BookCondition, BookInfo, CatalogClient, Library, LibraryBook,
    NewReservation, Page, Pagination, Rating, RatingClient, Reservation, ReservationClient,
    ReservationStatus,
};
use library_gateway::shared::error::UpstreamError;
use library_gateway::startup::{build_router, AppState};

pub const USER: &str = "Test Max";
pub const LIBRARY_UID: &str = "83575e12-7ce0-48ee-9931-51919ff3c9ee";
pub const BOOK_UID: &str = "f7cdc58f-2caf-4b15-9727-f89dcc629b27";

pub fn library_uid() -> Uuid {
    LIBRARY_UID.parse().unwrap()
}

pub fn book_uid() -> Uuid {
    BOOK_UID.parse().unwrap()
}

fn unavailable(service: &'static str) -> UpstreamError {
    UpstreamError::Unavailable {
        service,
        message: "connection refused".into(),
    }
}

/// Shelf entry of the in-memory catalog
#[derive(Debug, Clone)]
pub struct Shelf {
    pub book: Book,
    pub library: Library,
    pub available_count: u32,
}

/// In-memory library service
#[derive(Default)]
pub struct FakeCatalog {
    pub libraries: Mutex<Vec<Library>>,
    pub shelves: Mutex<Vec<Shelf>>,
    pub down: AtomicBool,
    pub fail_check_out: AtomicBool,
}

impl FakeCatalog {
    pub fn available(&self, book_uid: Uuid, library_uid: Uuid) -> u32 {
        self.shelves
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.book.book_uid == book_uid && s.library.library_uid == library_uid)
            .map(|s| s.available_count)
            .unwrap_or(0)
    }

    fn check(&self) -> Result<(), UpstreamError> {
        if self.down.load(Ordering::SeqCst) {
            Err(unavailable("library"))
        } else {
            Ok(())
        }
    }

    fn not_found(book_uid: Uuid, library_uid: Uuid) -> UpstreamError {
        UpstreamError::NotFound {
            service: "library",
            what: format!("book {} in library {}", book_uid, library_uid),
        }
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn get_book(&self, library_uid: Uuid, book_uid: Uuid) -> Result<BookInfo, UpstreamError> {
        self.check()?;
        self.shelves
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.book.book_uid == book_uid && s.library.library_uid == library_uid)
            .map(|s| BookInfo {
                book: s.book.clone(),
                library: s.library.clone(),
            })
            .ok_or_else(|| Self::not_found(book_uid, library_uid))
    }

    async fn check_out(&self, library_uid: Uuid, book_uid: Uuid) -> Result<Book, UpstreamError> {
        self.check()?;
        if self.fail_check_out.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                service: "library",
                status: 500,
            });
        }
        let mut shelves = self.shelves.lock().unwrap();
        let shelf = shelves
            .iter_mut()
            .find(|s| s.book.book_uid == book_uid && s.library.library_uid == library_uid)
            .ok_or_else(|| Self::not_found(book_uid, library_uid))?;
        if shelf.available_count == 0 {
            return Err(UpstreamError::Conflict {
                service: "library",
                message: "no copy available".into(),
            });
        }
        shelf.available_count -= 1;
        Ok(shelf.book.clone())
    }

    async fn check_in(
        &self,
        library_uid: Uuid,
        book_uid: Uuid,
        condition: BookCondition,
    ) -> Result<BookCheckIn, UpstreamError> {
        self.check()?;
        let mut shelves = self.shelves.lock().unwrap();
        let shelf = shelves
            .iter_mut()
            .find(|s| s.book.book_uid == book_uid && s.library.library_uid == library_uid)
            .ok_or_else(|| Self::not_found(book_uid, library_uid))?;
        let old_book = shelf.book.clone();
        shelf.book.condition = condition;
        shelf.available_count += 1;
        Ok(BookCheckIn {
            old_book,
            new_book: shelf.book.clone(),
        })
    }

    async fn get_books_by_ids(&self, book_uids: &[Uuid]) -> Result<Vec<BookInfo>, UpstreamError> {
        self.check()?;
        Ok(self
            .shelves
            .lock()
            .unwrap()
            .iter()
            .filter(|s| book_uids.contains(&s.book.book_uid))
            .map(|s| BookInfo {
                book: s.book.clone(),
                library: s.library.clone(),
            })
            .collect())
    }

    async fn list_libraries(
        &self,
        city: &str,
        pagination: Pagination,
    ) -> Result<Page<Library>, UpstreamError> {
        self.check()?;
        let matching: Vec<Library> = self
            .libraries
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.city == city)
            .cloned()
            .collect();
        Ok(paginate(matching, pagination))
    }

    async fn list_library_books(
        &self,
        library_uid: Uuid,
        show_all: bool,
        pagination: Pagination,
    ) -> Result<Page<LibraryBook>, UpstreamError> {
        self.check()?;
        if !self
            .libraries
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.library_uid == library_uid)
        {
            return Err(UpstreamError::NotFound {
                service: "library",
                what: format!("library {}", library_uid),
            });
        }
        let matching: Vec<LibraryBook> = self
            .shelves
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.library.library_uid == library_uid)
            .filter(|s| show_all || s.available_count > 0)
            .map(|s| LibraryBook {
                book: s.book.clone(),
                available_count: s.available_count,
            })
            .collect();
        Ok(paginate(matching, pagination))
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        self.check()
    }
}

fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
    let total_elements = items.len() as u64;
    let skip = ((pagination.page - 1) * pagination.size) as usize;
    Page {
        page: pagination.page,
        page_size: pagination.size,
        total_elements,
        items: items
            .into_iter()
            .skip(skip)
            .take(pagination.size as usize)
            .collect(),
    }
}

/// In-memory rating service
#[derive(Default)]
pub struct FakeRatings {
    pub stars: Mutex<HashMap<String, i32>>,
    pub down: AtomicBool,
}

impl FakeRatings {
    pub fn stars_of(&self, user_name: &str) -> Option<i32> {
        self.stars.lock().unwrap().get(user_name).copied()
    }

    pub fn set(&self, user_name: &str, stars: i32) {
        self.stars.lock().unwrap().insert(user_name.to_string(), stars);
    }
}

#[async_trait]
impl RatingClient for FakeRatings {
    async fn get_rating(&self, user_name: &str) -> Result<Rating, UpstreamError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable("rating"));
        }
        self.stars_of(user_name)
            .map(|stars| Rating {
                user_name: user_name.to_string(),
                stars,
            })
            .ok_or_else(|| UpstreamError::NotFound {
                service: "rating",
                what: format!("rating of {}", user_name),
            })
    }

    async fn update_rating(&self, user_name: &str, stars: i32) -> Result<(), UpstreamError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable("rating"));
        }
        self.set(user_name, stars);
        Ok(())
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        if self.down.load(Ordering::SeqCst) {
            Err(unavailable("rating"))
        } else {
            Ok(())
        }
    }
}

/// In-memory reservation service
#[derive(Default)]
pub struct FakeReservations {
    pub items: Mutex<Vec<Reservation>>,
}

impl FakeReservations {
    pub fn all(&self) -> Vec<Reservation> {
        self.items.lock().unwrap().clone()
    }

    pub fn insert(&self, reservation: Reservation) {
        self.items.lock().unwrap().push(reservation);
    }
}

#[async_trait]
impl ReservationClient for FakeReservations {
    async fn get_reservations(
        &self,
        user_name: &str,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, UpstreamError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_name == user_name)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, UpstreamError> {
        let mut items = self.items.lock().unwrap();
        let rented = items
            .iter()
            .filter(|r| r.user_name == reservation.user_name)
            .filter(|r| r.status == ReservationStatus::Rented)
            .count() as i32;
        if rented >= reservation.rented_limit {
            return Err(UpstreamError::Conflict {
                service: "reservation",
                message: "rented limit exceeded".into(),
            });
        }
        let created = Reservation {
            reservation_uid: reservation.reservation_uid,
            user_name: reservation.user_name.clone(),
            book_uid: reservation.book_uid,
            library_uid: reservation.library_uid,
            status: ReservationStatus::Rented,
            start_date: reservation.start_date,
            till_date: reservation.till_date,
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn update_reservation(
        &self,
        reservation_uid: Uuid,
        user_name: &str,
        return_date: NaiveDate,
    ) -> Result<Reservation, UpstreamError> {
        let mut items = self.items.lock().unwrap();
        let reservation = items
            .iter_mut()
            .find(|r| r.reservation_uid == reservation_uid && r.user_name == user_name)
            .ok_or_else(|| UpstreamError::NotFound {
                service: "reservation",
                what: format!("reservation {}", reservation_uid),
            })?;
        if reservation.status != ReservationStatus::Rented {
            return Err(UpstreamError::Conflict {
                service: "reservation",
                message: format!("reservation {} is already closed", reservation_uid),
            });
        }
        reservation.status = if return_date > reservation.till_date {
            ReservationStatus::Expired
        } else {
            ReservationStatus::Returned
        };
        Ok(reservation.clone())
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        Ok(())
    }
}

/// Test application over in-memory collaborators
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<FakeCatalog>,
    pub ratings: Arc<FakeRatings>,
    pub reservations: Arc<FakeReservations>,
}

impl TestApp {
    /// One library in Москва holding one copy of one book, and a user
    /// with a rating of 75 stars.
    pub fn new() -> Self {
        let library = Library {
            library_uid: library_uid(),
            name: "Библиотека имени 7 Непьющих".into(),
            city: "Москва".into(),
            address: "2-я Бауманская ул., д.5, стр.1".into(),
        };
        let book = Book {
            book_uid: book_uid(),
            name: "Краткий курс C++ в 7 томах".into(),
            author: "Бьерн Страуструп".into(),
            genre: "Научная фантастика".into(),
            condition: BookCondition::Excellent,
        };

        let catalog = Arc::new(FakeCatalog::default());
        catalog.libraries.lock().unwrap().push(library.clone());
        catalog.shelves.lock().unwrap().push(Shelf {
            book,
            library,
            available_count: 1,
        });

        let ratings = Arc::new(FakeRatings::default());
        ratings.set(USER, 75);

        let reservations = Arc::new(FakeReservations::default());

        let state = AppState::new(catalog.clone(), reservations.clone(), ratings.clone());
        let router = build_router(
            state,
            &CorsSettings {
                allowed_origins: Vec::new(),
            },
        );

        Self {
            router,
            catalog,
            ratings,
            reservations,
        }
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-User-Name", user);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, user, None).await
    }

    pub async fn post(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, user, Some(body)).await
    }
}
