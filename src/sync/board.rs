//! Shared in-memory view of the flight collection.
//!
//! The board is the single owner of the fetched collection. Readers take a
//! cheap `Arc` snapshot and never observe partial writes; writers go through
//! the explicit mutation API and bump the version. The toggle controller is
//! the only writer apart from refresh absorption.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::{FlightId, StepIndex};
use crate::models::FlightRecord;

struct BoardInner {
    flights: Arc<Vec<FlightRecord>>,
    version: u64,
}

/// Versioned store of the current flight collection.
pub struct FlightBoard {
    inner: RwLock<BoardInner>,
}

impl Default for FlightBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightBoard {
    pub fn new() -> Self {
        FlightBoard {
            inner: RwLock::new(BoardInner {
                flights: Arc::new(Vec::new()),
                version: 0,
            }),
        }
    }

    pub fn with_flights(flights: Vec<FlightRecord>) -> Self {
        FlightBoard {
            inner: RwLock::new(BoardInner {
                flights: Arc::new(flights),
                version: 1,
            }),
        }
    }

    /// Immutable snapshot of the collection.
    pub fn snapshot(&self) -> Arc<Vec<FlightRecord>> {
        Arc::clone(&self.inner.read().flights)
    }

    /// Monotonically increasing change counter.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    pub fn get(&self, id: FlightId) -> Option<FlightRecord> {
        self.inner
            .read()
            .flights
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    /// Mutate one record in place (clone-on-write) and bump the version.
    ///
    /// Returns `None` when the id is unknown, otherwise the closure's
    /// result. The closure runs under the write lock; keep it cheap.
    pub fn update_record<R>(
        &self,
        id: FlightId,
        mutate: impl FnOnce(&mut FlightRecord) -> R,
    ) -> Option<R> {
        let mut inner = self.inner.write();
        let mut flights: Vec<FlightRecord> = inner.flights.as_ref().clone();
        let record = flights.iter_mut().find(|f| f.id == id)?;
        let result = mutate(record);
        inner.flights = Arc::new(flights);
        inner.version += 1;
        Some(result)
    }

    /// Absorb a freshly fetched collection.
    ///
    /// The server is authoritative for record lifecycle and for every settled
    /// field, so incoming rows replace local ones wholesale. The exception is
    /// pairs with a toggle still in flight: for those, the local row's step
    /// flag, that step's comment, the completion stamp and the staged page
    /// metadata are carried over so a stale fetch cannot wipe out in-flight
    /// user intent.
    pub fn absorb_refresh(
        &self,
        mut incoming: Vec<FlightRecord>,
        pending: &[(FlightId, StepIndex)],
    ) {
        let mut inner = self.inner.write();

        for (id, step) in pending {
            let Some(local) = inner.flights.iter().find(|f| f.id == *id) else {
                continue;
            };
            let Some(row) = incoming.iter_mut().find(|f| f.id == *id) else {
                continue;
            };
            row.set_step(*step, local.step(*step));
            row.set_comment(*step, local.comment(*step).map(str::to_string));
            row.complete_date = local.complete_date.clone();
            row.complete_time = local.complete_time.clone();
            row.worker_sign = local.worker_sign.clone();
            row.checker_sign = local.checker_sign.clone();
            row.meal_carts = local.meal_carts;
            row.equipment_carts = local.equipment_carts;
            row.glass_carts = local.glass_carts;
            row.linen_carts = local.linen_carts;
        }

        inner.flights = Arc::new(incoming);
        inner.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(id: i64) -> FlightRecord {
        FlightRecord {
            id: FlightId::new(id),
            flight_number: format!("EY{id:04}"),
            ..Default::default()
        }
    }

    #[test]
    fn update_bumps_version_and_leaves_old_snapshots_alone() {
        let board = FlightBoard::with_flights(vec![flight(1)]);
        let before = board.snapshot();
        let v1 = board.version();

        board
            .update_record(FlightId::new(1), |f| f.set_step(StepIndex::S1, 1))
            .unwrap();

        assert_eq!(before[0].step(StepIndex::S1), 0);
        assert_eq!(board.snapshot()[0].step(StepIndex::S1), 1);
        assert_eq!(board.version(), v1 + 1);
    }

    #[test]
    fn update_unknown_id_is_none() {
        let board = FlightBoard::new();
        assert!(board
            .update_record(FlightId::new(9), |f| f.set_step(StepIndex::S1, 1))
            .is_none());
    }

    #[test]
    fn refresh_replaces_settled_rows() {
        let board = FlightBoard::with_flights(vec![flight(1)]);
        let mut server = flight(1);
        server.set_step(StepIndex::S2, 1);
        server.destination = "AUH".to_string();

        board.absorb_refresh(vec![server], &[]);
        let snap = board.snapshot();
        assert_eq!(snap[0].step(StepIndex::S2), 1);
        assert_eq!(snap[0].destination, "AUH");
    }

    #[test]
    fn refresh_keeps_pending_pairs_optimistic_values() {
        let board = FlightBoard::with_flights(vec![flight(1)]);
        board
            .update_record(FlightId::new(1), |f| {
                f.set_step(StepIndex::S3, 1);
                f.set_comment(StepIndex::S3, Some("loading".to_string()));
                f.complete_date = Some("2026/08/30".to_string());
            })
            .unwrap();

        // Stale server row still shows step3 = 0.
        let server = flight(1);
        board.absorb_refresh(vec![server], &[(FlightId::new(1), StepIndex::S3)]);

        let snap = board.snapshot();
        assert_eq!(snap[0].step(StepIndex::S3), 1);
        assert_eq!(snap[0].comment(StepIndex::S3), Some("loading"));
        assert_eq!(snap[0].complete_date.as_deref(), Some("2026/08/30"));
    }

    #[test]
    fn refresh_drops_rows_the_server_no_longer_has() {
        let board = FlightBoard::with_flights(vec![flight(1), flight(2)]);
        board.absorb_refresh(vec![flight(2)], &[]);
        let snap = board.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id, FlightId::new(2));
    }
}
