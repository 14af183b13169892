//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{
    LoginRequest, RegisterRequest, RegisterResponse, ReservationRequest, SessionInfo,
};
use shared::models::{Reservation, RestaurantTable};
use shared::schedule::format_local;

/// HTTP client for making network requests to the reservation service
///
/// The session cookie set by `login`/`register` is opaque to the client; the
/// underlying cookie store carries it on every subsequent call and the
/// service clears it again on `logout`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body or payload in the reply
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let response = self.client.post(self.url(path)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Map a non-success status to the error taxonomy, carrying the body
    /// as detail
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            StatusCode::CONFLICT => ClientError::Conflict(text),
            _ => ClientError::Internal(text),
        })
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login with username and password
    ///
    /// The service answers with the session identity and sets the session
    /// cookie.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<SessionInfo> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        self.post("/auth/login", &request).await
    }

    /// Register a new guest account; also sets the session cookie
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.post("/auth/register", request).await
    }

    /// Logout; the service invalidates the session cookie
    pub async fn logout(&self) -> ClientResult<()> {
        self.post_empty("/auth/logout").await
    }

    /// Probe the current session
    pub async fn auth_check(&self) -> ClientResult<SessionInfo> {
        self.get("/auth/auth_check").await
    }

    // ========== Reservation API ==========

    /// Tables free for the given window, in server-defined order
    pub async fn available_tables(
        &self,
        start: NaiveDateTime,
        minutes: i64,
    ) -> ClientResult<Vec<RestaurantTable>> {
        let path = format!(
            "/api/reservations/available?start={}&minutes={}",
            format_local(start),
            minutes
        );
        self.get(&path).await
    }

    /// Create a reservation; a 409 carries the server's conflict detail
    pub async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> ClientResult<Reservation> {
        self.post("/api/reservations", request).await
    }

    /// The caller's current reservation
    ///
    /// A 204 or an empty body is a confirmed "no reservation", not an error.
    pub async fn user_reservation(&self) -> ClientResult<Option<Reservation>> {
        let response = self
            .client
            .get(self.url("/api/reservations/userReservations"))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let reservation = serde_json::from_str(&text)?;
        Ok(Some(reservation))
    }

    /// Delete a reservation (the caller's own, or any as admin)
    pub async fn delete_reservation(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/api/reservations/{id}")).await
    }

    /// All reservations, admin only
    pub async fn all_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.get("/api/reservations/all").await
    }
}
