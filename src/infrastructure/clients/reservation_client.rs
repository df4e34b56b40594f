//! Reservation Client
//!
//! HTTP implementation of [`ReservationClient`] against the reservation service.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::http::{UpstreamHttp, USER_NAME_HEADER};
use crate::config::ServiceSettings;
use crate::domain::{NewReservation, Reservation, ReservationClient, ReservationStatus};
use crate::shared::error::UpstreamError;

const SERVICE: &str = "reservation";
const RESERVATIONS_PATH: &str = "/api/v1/reservations";

/// Reservation as serialized by the reservation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWire {
    pub reservation_uid: Uuid,
    pub username: String,
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationWire {
    pub reservation_uid: Uuid,
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
    pub rented_limit: i32,
}

/// Body of a return request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReservationWire {
    pub date: NaiveDate,
}

impl From<ReservationWire> for Reservation {
    fn from(wire: ReservationWire) -> Self {
        Self {
            reservation_uid: wire.reservation_uid,
            user_name: wire.username,
            book_uid: wire.book_uid,
            library_uid: wire.library_uid,
            status: wire.status,
            start_date: wire.start_date,
            till_date: wire.till_date,
        }
    }
}

impl From<&NewReservation> for CreateReservationWire {
    fn from(reservation: &NewReservation) -> Self {
        Self {
            reservation_uid: reservation.reservation_uid,
            book_uid: reservation.book_uid,
            library_uid: reservation.library_uid,
            start_date: reservation.start_date,
            till_date: reservation.till_date,
            rented_limit: reservation.rented_limit,
        }
    }
}

/// HTTP implementation of the reservation client.
#[derive(Debug, Clone)]
pub struct HttpReservationClient {
    http: UpstreamHttp,
}

impl HttpReservationClient {
    /// Creates a client for the reservation service at the configured address.
    pub fn new(settings: &ServiceSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: UpstreamHttp::new(SERVICE, settings)?,
        })
    }
}

#[async_trait]
impl ReservationClient for HttpReservationClient {
    async fn get_reservations(
        &self,
        user_name: &str,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, UpstreamError> {
        let mut request = self
            .http
            .request(Method::GET, RESERVATIONS_PATH)
            .header(USER_NAME_HEADER, user_name);

        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }

        let wire: Vec<ReservationWire> = self
            .http
            .send_json(
                "get_reservations",
                &format!("reservations of {}", user_name),
                request,
            )
            .await?;

        Ok(wire.into_iter().map(Reservation::from).collect())
    }

    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, UpstreamError> {
        let request = self
            .http
            .request(Method::POST, RESERVATIONS_PATH)
            .header(USER_NAME_HEADER, reservation.user_name.as_str())
            .json(&CreateReservationWire::from(reservation));

        let wire: ReservationWire = self
            .http
            .send_json(
                "create_reservation",
                &format!("reservation {}", reservation.reservation_uid),
                request,
            )
            .await?;

        Ok(wire.into())
    }

    async fn update_reservation(
        &self,
        reservation_uid: Uuid,
        user_name: &str,
        return_date: NaiveDate,
    ) -> Result<Reservation, UpstreamError> {
        let path = format!("{}/{}/return", RESERVATIONS_PATH, reservation_uid);
        let request = self
            .http
            .request(Method::POST, &path)
            .header(USER_NAME_HEADER, user_name)
            .json(&ReturnReservationWire { date: return_date });

        let wire: ReservationWire = self
            .http
            .send_json(
                "update_reservation",
                &format!("reservation {}", reservation_uid),
                request,
            )
            .await?;

        Ok(wire.into())
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        self.http.ping().await
    }
}
