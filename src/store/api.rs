use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

use super::{UploadRequest, UpsertOutcome};
use crate::normalize::CanonicalRequirement;

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Requirement storage behind the backend REST API. The store posts whole
/// batches and surfaces the backend's added-count without interpreting it.
pub struct ApiStore {
    client: Client,
    endpoint: Url,
}

impl ApiStore {
    /// `base` is the service root, e.g. `http://localhost:8003/`.
    pub fn new(base: &str) -> Result<Self> {
        let endpoint = Url::parse(base)
            .and_then(|u| u.join("api/excel-requirements/batch"))
            .with_context(|| format!("invalid API base URL `{}`", base))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// POST the batch, retrying transport failures a bounded number of
    /// times. Validation already happened; an HTTP error status here is a
    /// backend problem and is returned as-is.
    pub async fn upsert_batch(
        &self,
        records: &[CanonicalRequirement],
        replace_existing: bool,
    ) -> Result<UpsertOutcome> {
        let body = UploadRequest {
            records: records.to_vec(),
            replace_existing,
        };

        let mut attempt = 0;
        let resp = loop {
            attempt += 1;
            match self.client.post(self.endpoint.clone()).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => break resp,
                Ok(resp) => {
                    anyhow::bail!("upload rejected by backend: HTTP {}", resp.status())
                }
                Err(_) if attempt < MAX_RETRIES => {
                    warn!(attempt, endpoint = %self.endpoint, "upload attempt failed, retrying");
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("uploading batch to {} after {} attempts", self.endpoint, attempt)
                    })
                }
            }
        };

        let outcome: UpsertOutcome = resp
            .json()
            .await
            .context("parsing upload response from backend")?;
        info!(added = outcome.records_added, endpoint = %self.endpoint, "batch uploaded");
        Ok(outcome)
    }
}
