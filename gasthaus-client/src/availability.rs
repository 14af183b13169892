//! Availability queries with stale-response suppression
//!
//! Wraps `GET /api/reservations/available`. Every request is stamped with a
//! monotonically increasing sequence number at issue time; a completion whose
//! stamp has been superseded is discarded instead of overwriting fresher
//! state. Last-write-wins is decided by issue order, never completion order.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use shared::models::RestaurantTable;
use shared::schedule;

use crate::{ClientError, HttpClient};

/// Where a [`AvailabilityQuery::begin`] call leads.
#[derive(Debug)]
pub enum Issue {
    /// Start missing or unparseable: state was cleared, no network call
    /// follows.
    ShortCircuit,
    /// Served from the per-`(start, minutes)` cache, no network call follows.
    Cached,
    /// A network round-trip is required: run, then complete with this ticket.
    Fetch(FetchTicket),
}

/// Stamp for one in-flight availability request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    start: NaiveDateTime,
    minutes: i64,
}

/// Latest-availability state for one booking form.
///
/// Owns the transient query result and the table selection made from it.
/// Each view holds its own instance; results are never shared across
/// components.
#[derive(Debug)]
pub struct AvailabilityQuery {
    client: HttpClient,
    issued: u64,
    cache: HashMap<(NaiveDateTime, i64), Vec<RestaurantTable>>,
    tables: Vec<RestaurantTable>,
    selected: Option<i32>,
    last_fetch_failed: bool,
}

impl AvailabilityQuery {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            issued: 0,
            cache: HashMap::new(),
            tables: Vec::new(),
            selected: None,
            last_fetch_failed: false,
        }
    }

    /// Tables of the newest applied result, in server-defined order.
    pub fn tables(&self) -> &[RestaurantTable] {
        &self.tables
    }

    /// The selected table, as long as the latest result still contains it.
    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    /// Whether the newest applied fetch failed.
    ///
    /// A failure degrades to an empty table list instead of an error; this
    /// side channel lets callers surface it.
    pub fn last_fetch_failed(&self) -> bool {
        self.last_fetch_failed
    }

    /// Select a table out of the latest result.
    ///
    /// Returns `false` (and keeps the previous selection) when the number is
    /// not part of the latest result.
    pub fn select(&mut self, table_number: i32) -> bool {
        if self.tables.iter().any(|t| t.table_number == table_number) {
            self.selected = Some(table_number);
            true
        } else {
            false
        }
    }

    /// Clear the selection explicitly.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Stamp a new request for `(start, minutes)`.
    ///
    /// Issuing supersedes every request still in flight, whatever the new
    /// call resolves to. Out-of-bounds `minutes` is issued unchanged; the
    /// server stays authoritative on validation.
    pub fn begin(&mut self, start_raw: Option<&str>, minutes: i64) -> Issue {
        self.issued += 1;

        let Some(raw) = start_raw.map(str::trim).filter(|s| !s.is_empty()) else {
            self.apply_cleared();
            return Issue::ShortCircuit;
        };
        let Ok(start) = schedule::parse_local(raw) else {
            tracing::debug!(start = %raw, "unparseable start, availability cleared");
            self.apply_cleared();
            return Issue::ShortCircuit;
        };

        if let Some(cached) = self.cache.get(&(start, minutes)) {
            self.tables = cached.clone();
            self.last_fetch_failed = false;
            self.invalidate_selection();
            return Issue::Cached;
        }

        Issue::Fetch(FetchTicket {
            seq: self.issued,
            start,
            minutes,
        })
    }

    /// Perform the network round-trip for a ticket.
    ///
    /// Borrows immutably so several tickets can be in flight at once;
    /// ordering is resolved by [`AvailabilityQuery::complete`].
    pub async fn run(
        &self,
        ticket: &FetchTicket,
    ) -> Result<Vec<RestaurantTable>, ClientError> {
        self.client.available_tables(ticket.start, ticket.minutes).await
    }

    /// Apply a finished round-trip.
    ///
    /// Returns `false` when the ticket was superseded by a newer
    /// [`AvailabilityQuery::begin`]; the outcome is dropped and state stays
    /// untouched.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<RestaurantTable>, ClientError>,
    ) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                newest = self.issued,
                "stale availability response discarded"
            );
            return false;
        }

        match outcome {
            Ok(tables) => {
                self.cache.insert((ticket.start, ticket.minutes), tables.clone());
                self.tables = tables;
                self.last_fetch_failed = false;
            }
            Err(err) => {
                tracing::warn!(error = %err, "availability fetch failed, degrading to empty result");
                self.tables.clear();
                self.last_fetch_failed = true;
            }
        }

        self.invalidate_selection();
        true
    }

    /// Issue, run and apply in one step (the common, non-overlapping path).
    ///
    /// Returns whether the result was applied; a `false` means a concurrent
    /// caller superseded this refresh mid-flight.
    pub async fn refresh(&mut self, start_raw: Option<&str>, minutes: i64) -> bool {
        match self.begin(start_raw, minutes) {
            Issue::ShortCircuit | Issue::Cached => true,
            Issue::Fetch(ticket) => {
                let outcome = self.run(&ticket).await;
                self.complete(ticket, outcome)
            }
        }
    }

    fn apply_cleared(&mut self) {
        self.tables.clear();
        self.last_fetch_failed = false;
        self.invalidate_selection();
    }

    /// Drop a selection that the newest result no longer contains.
    ///
    /// Runs on every applied result, independent of any submission in
    /// flight.
    fn invalidate_selection(&mut self) {
        if let Some(number) = self.selected {
            if !self.tables.iter().any(|t| t.table_number == number) {
                tracing::debug!(table = number, "selected table no longer available, selection cleared");
                self.selected = None;
            }
        }
    }
}
