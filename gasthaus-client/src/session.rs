//! Single-reservation session cache
//!
//! Client-side holder of the one reservation a guest may have, reconciled
//! against the service on load/submit/cancel. State moves
//! `Idle -> Loading -> Holding | Empty`, `Holding -> Empty` on cancel and
//! `Empty | Holding -> Holding` on submit.

use shared::client::ReservationRequest;
use shared::models::Reservation;
use tokio_util::sync::CancellationToken;

use crate::{ClientResult, HttpClient};

/// Lifecycle of the locally held reservation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing confirmed yet (also parked here after a failed load).
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The service confirmed this reservation.
    Holding(Reservation),
    /// The service confirmed there is no reservation.
    Empty,
}

/// Client-side single-reservation-per-guest cache.
///
/// Every operation takes `&mut self`, so a second submit cannot start while
/// one is in flight; retries are user-initiated only. Each view owns its own
/// session; nothing here is shared across components.
#[derive(Debug)]
pub struct ReservationSession {
    client: HttpClient,
    state: SessionState,
}

impl ReservationSession {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The held reservation, when in `Holding`.
    pub fn reservation(&self) -> Option<&Reservation> {
        match &self.state {
            SessionState::Holding(reservation) => Some(reservation),
            _ => None,
        }
    }

    /// Fetch the caller's reservation from the service.
    ///
    /// A 204 or empty body is a confirmed `Empty`. A 401 surfaces as
    /// [`crate::ClientError::Unauthorized`] for the caller to route to the
    /// login gate. Any other failure surfaces for display and parks the
    /// state in `Idle`, never in `Empty`; only a service answer may confirm
    /// "no reservation".
    ///
    /// Cancellation wins over late completion: once `cancel` fires, the
    /// previous state is restored and the response is dropped, so a view
    /// that navigated away never observes the update.
    pub async fn load(&mut self, cancel: &CancellationToken) -> ClientResult<()> {
        let previous = std::mem::replace(&mut self.state, SessionState::Loading);

        let outcome = tokio::select! {
            _ = cancel.cancelled() => None,
            outcome = self.client.user_reservation() => Some(outcome),
        };

        let Some(outcome) = outcome else {
            // A completion racing the cancellation must not leak an update
            // into a view that navigated away.
            tracing::debug!("reservation load cancelled, state untouched");
            self.state = previous;
            return Ok(());
        };

        match outcome {
            Ok(Some(reservation)) => {
                self.state = SessionState::Holding(reservation);
                Ok(())
            }
            Ok(None) => {
                self.state = SessionState::Empty;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Idle;
                Err(err)
            }
        }
    }

    /// Submit a validated booking request.
    ///
    /// Success replaces the held reservation; creating supersedes any prior
    /// local copy. A conflict (another guest took the table in the interim)
    /// surfaces as [`crate::ClientError::Conflict`] with the server's detail
    /// verbatim and leaves local state untouched.
    pub async fn submit(&mut self, request: &ReservationRequest) -> ClientResult<Reservation> {
        let reservation = self.client.create_reservation(request).await?;
        tracing::info!(
            id = reservation.id,
            table = reservation.table_number,
            "reservation created"
        );
        self.state = SessionState::Holding(reservation.clone());
        Ok(reservation)
    }

    /// Delete the reservation with the given id.
    ///
    /// Only a confirmed deletion clears the held copy, whatever it was; a
    /// failure leaves state untouched and surfaces loudly.
    pub async fn cancel(&mut self, id: i64) -> ClientResult<()> {
        self.client.delete_reservation(id).await?;
        tracing::info!(id, "reservation deleted");
        self.state = SessionState::Empty;
        Ok(())
    }
}
