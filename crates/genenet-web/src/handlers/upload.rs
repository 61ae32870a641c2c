//! POST /upload/ — build a gene network for an uploaded genes-of-interest sheet.
//!
//! Multipart fields:
//!
//! | Field | Type | Default |
//! |-------|------|---------|
//! | `genes_file` | file (xlsx/csv/tsv) with a `Gene` column | required |
//! | `threshold` | float | `[analysis] threshold` |
//! | `num` | int, partners per gene | `[analysis] num` |
//! | `positive` | bool | `[analysis] positive` |
//! | `min_citations` | int | `[analysis] min_citations` |

use std::str::FromStr;

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use genenet_common::NetworkGraph;
use genenet_network::{build_network, AnalysisParams, Table};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::SharedState;

pub const GENES_FILE_FIELD: &str = "genes_file";

/// Name given to a file part sent without one; carries no extension so the
/// table format is detected from the content.
const UNNAMED_UPLOAD: &str = "upload";

/// Fields collected from the multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub genes_file: Option<(String, Vec<u8>)>,
    pub threshold: Option<f64>,
    pub num: Option<usize>,
    pub positive: Option<bool>,
    pub min_citations: Option<usize>,
}

impl UploadForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                GENES_FILE_FIELD => {
                    let file_name = field.file_name().unwrap_or(UNNAMED_UPLOAD).to_string();
                    let bytes = field.bytes().await?;
                    form.genes_file = Some((file_name, bytes.to_vec()));
                }
                "threshold" => form.threshold = parse_field(&name, &field.text().await?)?,
                "num" => form.num = parse_field(&name, &field.text().await?)?,
                "positive" => form.positive = parse_bool(&field.text().await?)?,
                "min_citations" => form.min_citations = parse_field(&name, &field.text().await?)?,
                other => debug!(field = other, "Ignoring unknown upload field"),
            }
        }
        Ok(form)
    }

    /// Overlay the submitted values on the server defaults.
    pub fn params(&self, defaults: &AnalysisParams) -> AnalysisParams {
        AnalysisParams {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            num: self.num.unwrap_or(defaults.num),
            positive: self.positive.unwrap_or(defaults.positive),
            min_citations: self.min_citations.unwrap_or(defaults.min_citations),
            ..defaults.clone()
        }
    }
}

/// Empty text fields count as absent.
fn parse_field<T: FromStr>(name: &str, raw: &str) -> Result<Option<T>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("Invalid value for {name}: {raw:?}")))
}

fn parse_bool(raw: &str) -> Result<Option<bool>, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        other => Err(ApiError::BadRequest(format!("Invalid value for positive: {other:?}"))),
    }
}

/// POST /upload/ — returns the node/edge graph
pub async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<NetworkGraph>, ApiError> {
    if !state.datasets.is_ready() {
        return Err(ApiError::NotReady);
    }

    let form = UploadForm::read(&mut multipart).await?;
    let params = form.params(&state.defaults);
    let (file_name, bytes) = form
        .genes_file
        .ok_or_else(|| ApiError::BadRequest(format!("Missing file field '{GENES_FILE_FIELD}'")))?;

    info!(
        file = %file_name,
        bytes = bytes.len(),
        threshold = params.threshold,
        num = params.num,
        "Processing genes file"
    );

    let datasets = state.datasets.clone();
    let graph = tokio::task::spawn_blocking(move || {
        let table = Table::from_bytes(&file_name, &bytes)?;
        build_network(&datasets, &table, &params)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Network build task failed: {e}")))??;

    Ok(Json(graph))
}
