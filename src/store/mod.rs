//! Flight record store access.
//!
//! The remote store owns all persistent state; this module is the only code
//! that talks to it. The `FlightStore` trait keeps the rest of the crate
//! backend-agnostic, with two implementations:
//!
//! - [`HttpFlightStore`]: the real client over HTTP (feature `http-store`).
//! - [`LocalFlightStore`]: in-memory, with failure injection, for unit tests
//!   and local development.

pub mod config;
pub mod error;
#[cfg(feature = "http-store")]
pub mod http;
pub mod local;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
#[cfg(feature = "http-store")]
pub use http::HttpFlightStore;
pub use local::LocalFlightStore;

use async_trait::async_trait;

use crate::api::{FlightId, LoginOutcome, StepIndex, StepUpdate};
use crate::models::FlightRecord;

/// Abstract interface to the flight record store.
///
/// Records are never created or deleted through this interface; the CSV
/// import collaborator owns record lifecycle.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Fetch the full flight collection, mapped into the semantic model.
    async fn fetch_flights(&self) -> StoreResult<Vec<FlightRecord>>;

    /// Submit one atomic partial update for a single step of a single
    /// flight. Last write wins at the store; there is no version check.
    async fn patch_step(
        &self,
        id: FlightId,
        step: StepIndex,
        update: &StepUpdate,
    ) -> StoreResult<()>;

    /// Shared-password admin login. Thin wrapper; the auth gate itself lives
    /// outside this crate.
    async fn admin_login(&self, password: &str) -> StoreResult<LoginOutcome>;

    /// Upload a roster CSV for bulk import. Thin wrapper; import logic lives
    /// at the store.
    async fn upload_roster_csv(&self, filename: &str, bytes: Vec<u8>) -> StoreResult<()>;
}
