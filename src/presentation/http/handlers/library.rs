//! Library Handlers
//!
//! HTTP handlers for browsing libraries and their books.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{bad_path, bad_query};
use crate::application::dto::request::{LibrariesQuery, LibraryBooksQuery};
use crate::application::dto::response::{LibraryBookResponse, LibraryResponse, PageResponse};
use crate::application::services::LibraryError;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn map_library_error(e: LibraryError) -> AppError {
    match e {
        LibraryError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
        LibraryError::Invalid(msg) => AppError::BadRequest(msg),
        LibraryError::Upstream(e) => AppError::Upstream(e),
    }
}

/// List libraries in a city
///
/// GET /api/v1/libraries?city=&page=&size=
pub async fn list_libraries(
    State(state): State<AppState>,
    query: Result<Query<LibrariesQuery>, QueryRejection>,
) -> Result<Json<PageResponse<LibraryResponse>>, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let page = state
        .library_service
        .list_libraries(&query.city, query.pagination())
        .await
        .map_err(map_library_error)?;

    Ok(Json(page.into()))
}

/// List the books of a library
///
/// GET /api/v1/libraries/{libraryUid}/books?showAll=&page=&size=
///
/// Books with no copy on the shelf are hidden unless `showAll=true`.
pub async fn list_library_books(
    State(state): State<AppState>,
    library_uid: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LibraryBooksQuery>, QueryRejection>,
) -> Result<Json<PageResponse<LibraryBookResponse>>, AppError> {
    let Path(library_uid) = library_uid.map_err(bad_path)?;
    let Query(query) = query.map_err(bad_query)?;
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let page = state
        .library_service
        .list_library_books(library_uid, query.show_all, query.pagination())
        .await
        .map_err(map_library_error)?;

    Ok(Json(page.into()))
}
