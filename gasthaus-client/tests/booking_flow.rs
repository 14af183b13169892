// gasthaus-client/tests/booking_flow.rs
// The full guest flow: pick a slot, query free tables, validate, submit.

use gasthaus_client::{
    AvailabilityQuery, BookingInput, ClientConfig, Rejection, ReservationSession, booking,
};
use serde_json::json;
use shared::schedule::{DEFAULT_DURATION_MINUTES, parse_local};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOW: &str = "2025-10-30T12:00:00";

#[tokio::test]
async fn test_pick_validate_submit_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/available"))
        .and(query_param("start", "2025-10-30T18:00:00"))
        .and(query_param("minutes", "120"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "tableNumber": 3, "numberOfSeats": 4},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "tableNumber": 3,
            "startTime": "2025-10-30T18:00:00",
            "endTime": "2025-10-30T20:00:00",
        })))
        .mount(&server)
        .await;

    let client = ClientConfig::new(server.uri()).build_http_client();

    let mut query = AvailabilityQuery::new(client.clone());
    assert!(query.refresh(Some("2025-10-30T18:00:00"), DEFAULT_DURATION_MINUTES).await);
    assert!(query.select(3));

    let input = BookingInput {
        start: Some("2025-10-30T18:00:00".to_string()),
        duration_minutes: DEFAULT_DURATION_MINUTES,
        table_number: query.selected(),
    };
    let request = booking::validate(&input, query.tables(), parse_local(NOW).expect("now"))
        .expect("all booking rules pass");
    assert_eq!(request.end_time, parse_local("2025-10-30T20:00:00").expect("end"));

    let mut session = ReservationSession::new(client);
    let created = session.submit(&request).await.expect("submit succeeds");
    assert_eq!(created.id, 7);
    assert_eq!(session.reservation().map(|r| r.table_number), Some(3));
}

#[tokio::test]
async fn test_vanished_table_is_refused_before_submission() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/available"))
        .and(query_param("start", "2025-10-30T18:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "tableNumber": 3, "numberOfSeats": 4},
        ])))
        .mount(&server)
        .await;
    // The guest moves the slot; table 3 is gone in the refreshed result.
    Mock::given(method("GET"))
        .and(path("/api/reservations/available"))
        .and(query_param("start", "2025-10-30T19:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "tableNumber": 1, "numberOfSeats": 2},
        ])))
        .mount(&server)
        .await;

    let client = ClientConfig::new(server.uri()).build_http_client();
    let mut query = AvailabilityQuery::new(client);

    assert!(query.refresh(Some("2025-10-30T18:00:00"), 120).await);
    assert!(query.select(3));
    assert!(query.refresh(Some("2025-10-30T19:00:00"), 120).await);

    // Selection invalidation already cleared the pick.
    assert_eq!(query.selected(), None);
    let input = BookingInput {
        start: Some("2025-10-30T19:00:00".to_string()),
        duration_minutes: 120,
        table_number: query.selected(),
    };
    assert_eq!(
        booking::validate(&input, query.tables(), parse_local(NOW).expect("now")),
        Err(Rejection::TableNotSelected)
    );

    // A stale pick smuggled past the form state is still refused.
    let stale = BookingInput {
        table_number: Some(3),
        ..input
    };
    assert_eq!(
        booking::validate(&stale, query.tables(), parse_local(NOW).expect("now")),
        Err(Rejection::TableNoLongerAvailable)
    );
}
