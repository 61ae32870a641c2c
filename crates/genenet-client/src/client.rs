//! HTTP client for the `/status/` and `/upload/` endpoints.

use std::path::Path;
use std::time::Duration;

use genenet_common::{NetworkGraph, ServerStatus};
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ClientError, Result};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Network builds over large gene lists can take minutes server-side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Optional analysis overrides sent with an upload. Unset fields are not sent,
/// so the server's defaults apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UploadOptions {
    pub threshold: Option<f64>,
    pub num: Option<usize>,
}

/// Client for a genenet analysis server.
#[derive(Debug, Clone)]
pub struct GeneNetClient {
    base_url: String,
    client: Client,
}

impl GeneNetClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /status/
    pub async fn status(&self) -> Result<ServerStatus> {
        debug!(url = %self.base_url, "Checking server status");
        let resp = self
            .client
            .get(format!("{}/status/", self.base_url))
            .send()
            .await?;
        let resp = ensure_success(resp, "Server status check failed").await?;
        decode(resp).await
    }

    /// POST /upload/ with the genes sheet at `path`.
    pub async fn upload(&self, path: &Path, opts: &UploadOptions) -> Result<NetworkGraph> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("genes.xlsx");
        self.upload_bytes(file_name, bytes, opts).await
    }

    /// POST /upload/ with an in-memory genes sheet.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        opts: &UploadOptions,
    ) -> Result<NetworkGraph> {
        info!(file = file_name, bytes = bytes.len(), "Uploading genes file");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;

        let mut form = multipart::Form::new().part("genes_file", part);
        if let Some(threshold) = opts.threshold {
            form = form.text("threshold", threshold.to_string());
        }
        if let Some(num) = opts.num {
            form = form.text("num", num.to_string());
        }

        let resp = self
            .client
            .post(format!("{}/upload/", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;
        let resp = ensure_success(resp, "Network processing failed").await?;

        let graph: NetworkGraph = decode(resp).await?;
        info!(nodes = graph.nodes.len(), edges = graph.edges.len(), "Received network");
        Ok(graph)
    }
}

/// Turn a non-2xx response into [`ClientError::Server`], preferring the server's
/// `detail` message, then the raw body, then `fallback`.
async fn ensure_success(resp: Response, fallback: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message: error_message(&body, fallback),
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn error_message(body: &str, fallback: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
    match detail {
        Some(d) => d,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => fallback.to_string(),
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail": "Missing column 'Gene'"}"#, "fallback"),
            "Missing column 'Gene'"
        );
        assert_eq!(error_message("Internal Server Error\n", "fallback"), "Internal Server Error");
        assert_eq!(error_message("", "Network processing failed"), "Network processing failed");
    }

    #[test]
    fn test_base_url_normalised() {
        let client = GeneNetClient::new("https://batch-depmap-and-biogrid.example.org/").unwrap();
        assert_eq!(client.base_url(), "https://batch-depmap-and-biogrid.example.org");
        assert!(matches!(
            GeneNetClient::new("localhost:8000"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("hits.XLSX"), "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        assert_eq!(mime_for("hits.csv"), "text/csv");
        assert_eq!(mime_for("hits"), "application/octet-stream");
    }
}
