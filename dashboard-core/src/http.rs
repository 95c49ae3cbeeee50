//! Outbound HTTP capability.
//!
//! Every fetcher goes through [`HttpClient`], so the pipeline can be driven by
//! literal JSON fixtures in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::DashboardError;

#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    /// GET `url` with `query` and decode the body as JSON.
    ///
    /// Transport failures and non-success statuses are `Network`; a body that
    /// is not JSON is `DataFormat`.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, DashboardError>;
}

/// [`HttpClient`] backed by reqwest with the transport's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttp {
    http: Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttp {
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, DashboardError> {
        tracing::debug!(url, ?query, "GET");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DashboardError::network(url, format!("failed to send request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| DashboardError::network(url, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(DashboardError::network(
                url,
                format!("request failed with status {}: {}", status, truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| DashboardError::data_format("JSON", format!("{e}: {}", truncate_body(&body))))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(truncate_body("{}"), "{}");
    }

    #[test]
    fn long_bodies_are_cut_on_a_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.trim_end_matches("...").chars().count(), 100);
    }
}
