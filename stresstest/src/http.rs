//! HTTP client for the snapshot API.

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::stresstest::SnapshotTarget;

/// A client for the snapshot API exercised by the benchmark.
#[derive(Debug)]
pub struct SnapshotApi {
    base_url: String,
    client: reqwest::Client,
}

/// The body of a successful list response. Absent fields keep their zero
/// values, as the server omits empty lists.
#[derive(Debug, Deserialize)]
struct ListSnapshotsResponse {
    #[serde(default)]
    snapshots: Vec<String>,
}

impl SnapshotApi {
    /// Creates a client for the API served at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the current list of test snapshots.
    pub async fn list_snapshots(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/v1/snapshots", self.base_url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("listing snapshots")?;

        if response.status() != StatusCode::OK {
            bail!("listing snapshots failed with HTTP status {}", response.status());
        }

        let body: ListSnapshotsResponse =
            response.json().await.context("parsing snapshot list")?;
        Ok(body.snapshots)
    }

    /// Deletes all test snapshots.
    ///
    /// A `206 Partial Content` response means some snapshots survived the
    /// sweep, and is reported as an error here.
    pub async fn delete_all(&self) -> Result<()> {
        let url = format!("{}/api/v1/snapshots/all", self.base_url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .context("deleting snapshots")?;

        if response.status() != StatusCode::OK {
            bail!("cleanup failed with HTTP status {}", response.status());
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SnapshotTarget for SnapshotApi {
    async fn create_snapshot(&self) -> Result<()> {
        let url = format!("{}/api/v1/snapshots/create", self.base_url);
        let response = self.client.post(url).send().await?;

        if response.status() != StatusCode::CREATED {
            bail!("HTTP status {}", response.status());
        }

        Ok(())
    }
}
