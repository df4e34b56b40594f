//! Collaborator Clients
//!
//! HTTP implementations of the domain client traits.
//!
//! ## Available Clients
//!
//! - **HttpCatalogClient** - Library catalog (books, libraries, check-out/in)
//! - **HttpRatingClient** - User star ratings
//! - **HttpReservationClient** - Reservation records
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use library_gateway::config::Settings;
//! use library_gateway::infrastructure::clients::{
//!     HttpCatalogClient, HttpRatingClient, HttpReservationClient,
//! };
//!
//! fn setup_clients(settings: &Settings) -> Result<(), reqwest::Error> {
//!     let catalog = HttpCatalogClient::new(&settings.services.library)?;
//!     let rating = HttpRatingClient::new(&settings.services.rating)?;
//!     let reservation = HttpReservationClient::new(&settings.services.reservation)?;
//!     Ok(())
//! }
//! ```

pub mod http;
pub mod catalog_client;
pub mod rating_client;
pub mod reservation_client;

pub use catalog_client::HttpCatalogClient;
pub use http::{UpstreamHttp, USER_NAME_HEADER};
pub use rating_client::HttpRatingClient;
pub use reservation_client::HttpReservationClient;
