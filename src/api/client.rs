// src/api/client.rs

//! Read-only client for the engine's explorer API.

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::api::model::{ExplorerSnapshot, RawTaskGraph, TaskResults};
use crate::errors::{ExplorerError, Result};

pub const TASK_GRAPH_PATH: &str = "/api/1/task_graph";
pub const ALL_VERSIONS_PATH: &str = "/api/1/results/all_versions";

/// Boxed future returned by [`GraphSource`] calls.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Where task graphs come from.
///
/// The binary talks HTTP to a running engine; tests plug in canned data.
pub trait GraphSource: Send + Sync {
    /// `GET /api/1/task_graph`
    fn task_graph(&self) -> SourceFuture<'_, RawTaskGraph>;

    /// `GET /api/1/results/all_versions`
    fn all_versions(&self) -> SourceFuture<'_, Vec<TaskResults>>;
}

/// Fetch both endpoints concurrently. Fails if either request fails.
pub async fn fetch_snapshot<S>(source: &S) -> Result<ExplorerSnapshot>
where
    S: GraphSource + ?Sized,
{
    let (task_graph, versions) = tokio::try_join!(source.task_graph(), source.all_versions())?;
    debug!(
        tasks = task_graph.tasks.len(),
        versioned = versions.len(),
        "fetched explorer snapshot"
    );
    Ok(ExplorerSnapshot {
        task_graph,
        versions,
    })
}

/// [`GraphSource`] backed by an engine's HTTP server.
#[derive(Debug, Clone)]
pub struct HttpGraphSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGraphSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        trace!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Fetch(format!("GET {url} returned {status}")));
        }

        Ok(response.json().await?)
    }
}

impl GraphSource for HttpGraphSource {
    fn task_graph(&self) -> SourceFuture<'_, RawTaskGraph> {
        Box::pin(self.get_json(TASK_GRAPH_PATH))
    }

    fn all_versions(&self) -> SourceFuture<'_, Vec<TaskResults>> {
        Box::pin(self.get_json(ALL_VERSIONS_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let source = HttpGraphSource::new("http://localhost:5000/").unwrap();
        assert_eq!(source.base_url(), "http://localhost:5000");
    }
}
