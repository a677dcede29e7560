//! Tutoring session bookings

use shared::{Booking, CreateBookingRequest};
use tracing::info;

use super::{path_segment, ApiClient, ApiResult};

pub struct BookingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, child_id: &str) -> ApiResult<Vec<Booking>> {
        self.client
            .get("/bookings", &[("child_id", child_id.to_string())])
            .await
    }

    pub async fn create(&self, request: &CreateBookingRequest) -> ApiResult<Booking> {
        info!(
            "Booking {} for {} at {}",
            request.subject, request.child_id, request.starts_at
        );
        self.client.post("/bookings", request).await
    }

    pub async fn cancel(&self, booking_id: &str) -> ApiResult<Booking> {
        info!("Cancelling booking {}", booking_id);
        let path = format!("/bookings/{}/cancel", path_segment(booking_id)?);
        self.client.post(&path, &serde_json::json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::api::test_server;
    use axum::{
        extract::{Path, Query},
        routing::{get, post},
        Json, Router,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use shared::BookingStatus;
    use std::collections::HashMap;

    fn booking_json(id: &str, child_id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "child_id": child_id,
            "subject": "Maths",
            "tutor_name": "Mr. Rao",
            "starts_at": "2025-03-12T16:00:00Z",
            "duration_minutes": 45,
            "status": status
        })
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/bookings",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let child_id = params.get("child_id").cloned().unwrap_or_default();
                    Json(json!({
                        "success": true,
                        "message": "",
                        "data": [booking_json("b1", &child_id, "scheduled")]
                    }))
                })
                .post(|Json(request): Json<CreateBookingRequest>| async move {
                    Json(json!({
                        "success": true,
                        "message": "Booked",
                        "data": {
                            "id": "b2",
                            "child_id": request.child_id,
                            "subject": request.subject,
                            "tutor_name": null,
                            "starts_at": request.starts_at,
                            "duration_minutes": request.duration_minutes,
                            "status": "scheduled"
                        }
                    }))
                }),
            )
            .route(
                "/bookings/:id/cancel",
                post(|Path(id): Path<String>| async move {
                    Json(json!({"success": true, "message": "", "data": booking_json(&id, "priya", "cancelled")}))
                }),
            )
    }

    #[tokio::test]
    async fn test_list_bookings_filters_by_child() {
        let client = test_server::spawn(router()).await;
        let bookings = client.bookings().list("arjun").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].child_id, "arjun");
        assert_eq!(bookings[0].tutor_name.as_deref(), Some("Mr. Rao"));
    }

    #[tokio::test]
    async fn test_create_and_cancel_booking() {
        let client = test_server::spawn(router()).await;
        let starts_at = Utc.with_ymd_and_hms(2025, 3, 14, 15, 30, 0).unwrap();

        let created = client
            .bookings()
            .create(&CreateBookingRequest {
                child_id: "priya".to_string(),
                subject: "Science".to_string(),
                starts_at,
                duration_minutes: 60,
                notes: Some("Chapter 4 please".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "b2");
        assert_eq!(created.starts_at, starts_at);
        assert_eq!(created.status, BookingStatus::Scheduled);

        let cancelled = client.bookings().cancel("b2").await.unwrap();
        assert_eq!(cancelled.id, "b2");
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_encodes_booking_id() {
        let client = test_server::spawn(router()).await;
        let cancelled = client.bookings().cancel("b/7#late").await.unwrap();
        assert_eq!(cancelled.id, "b/7#late");
    }
}
