//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    LibraryService, LibraryServiceImpl, RatingService, RatingServiceImpl, ReservationService,
    ReservationServiceImpl,
};
use crate::config::{CorsSettings, Settings};
use crate::domain::{CatalogClient, RatingClient, ReservationClient};
use crate::infrastructure::clients::{HttpCatalogClient, HttpRatingClient, HttpReservationClient};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Collaborator clients, kept for readiness probes
#[derive(Clone)]
pub struct Collaborators {
    pub catalog: Arc<dyn CatalogClient>,
    pub ratings: Arc<dyn RatingClient>,
    pub reservations: Arc<dyn ReservationClient>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reservation_service: Arc<dyn ReservationService>,
    pub rating_service: Arc<dyn RatingService>,
    pub library_service: Arc<dyn LibraryService>,
    pub collaborators: Collaborators,
}

impl AppState {
    /// Wire the services over a set of collaborator clients
    pub fn new<C, V, R>(catalog: Arc<C>, reservations: Arc<V>, ratings: Arc<R>) -> Self
    where
        C: CatalogClient + 'static,
        V: ReservationClient + 'static,
        R: RatingClient + 'static,
    {
        let reservation_service = Arc::new(ReservationServiceImpl::new(
            catalog.clone(),
            reservations.clone(),
            ratings.clone(),
        ));
        let rating_service = Arc::new(RatingServiceImpl::new(ratings.clone()));
        let library_service = Arc::new(LibraryServiceImpl::new(catalog.clone()));

        Self {
            reservation_service,
            rating_service,
            library_service,
            collaborators: Collaborators {
                catalog,
                ratings,
                reservations,
            },
        }
    }
}

/// Build the router with the request tracing and CORS layers applied
pub fn build_router(state: AppState, cors_settings: &CorsSettings) -> Router {
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(cors_settings))
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let services = &settings.services;
        let catalog = Arc::new(
            HttpCatalogClient::new(&services.library)
                .context("Failed to create library service client")?,
        );
        let ratings = Arc::new(
            HttpRatingClient::new(&services.rating)
                .context("Failed to create rating service client")?,
        );
        let reservations = Arc::new(
            HttpReservationClient::new(&services.reservation)
                .context("Failed to create reservation service client")?,
        );
        tracing::info!(
            library = %services.library.base_url,
            rating = %services.rating.base_url,
            reservation = %services.reservation.base_url,
            "Collaborator clients created"
        );

        let state = AppState::new(catalog, reservations, ratings);
        let router = build_router(state, &settings.cors);

        // Bind to address
        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
