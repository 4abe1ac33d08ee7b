//! HTTP implementation of the flight store client.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{FlightId, LoginOutcome, StepIndex, StepUpdate};
use crate::models::FlightRecord;

use super::config::StoreConfig;
use super::error::{StoreError, StoreResult};
use super::FlightStore;

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

/// Client for the remote flight record store.
pub struct HttpFlightStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl HttpFlightStore {
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| StoreError::Transport(format!("build http client: {e}")))?;
        Ok(HttpFlightStore { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Map a response to `Ok(response)` or a `Status` error with the body
    /// text attached for the operator-facing message.
    async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_once(&self) -> StoreResult<Vec<FlightRecord>> {
        let response = self.client.get(self.url("/api/members")).send().await?;
        let response = Self::check_status(response).await?;
        let flights: Vec<FlightRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(flights)
    }
}

#[async_trait]
impl FlightStore for HttpFlightStore {
    /// Fetch with bounded exponential backoff on retryable failures.
    async fn fetch_flights(&self) -> StoreResult<Vec<FlightRecord>> {
        let mut delay = self.config.retry_delay();
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(flights) => {
                    info!(count = flights.len(), "fetched flight collection");
                    return Ok(flights);
                }
                Err(err) if err.is_retryable() && attempt < self.config.fetch_retries => {
                    attempt += 1;
                    warn!(
                        %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn patch_step(
        &self,
        id: FlightId,
        step: StepIndex,
        update: &StepUpdate,
    ) -> StoreResult<()> {
        debug!(%id, %step, value = update.value, "patching step");
        let response = self
            .client
            .patch(self.url(&format!("/api/members/{id}/complete/{step}")))
            .json(update)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn admin_login(&self, password: &str) -> StoreResult<LoginOutcome> {
        let response = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&LoginRequest { password })
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn upload_roster_csv(&self, filename: &str, bytes: Vec<u8>) -> StoreResult<()> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| StoreError::Transport(format!("build multipart: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/api/csv/upload"))
            .multipart(form)
            .send()
            .await?;
        Self::check_status(response).await?;
        info!(filename, "roster csv uploaded");
        Ok(())
    }
}
