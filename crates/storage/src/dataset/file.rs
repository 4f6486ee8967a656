#![forbid(unsafe_code)]

use crate::DatasetError;
use eco_core::ProjectRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The aggregated dataset as written to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEnvelope {
    pub digest: String,
    pub generated_at: String,
    pub projects: Vec<ProjectRecord>,
}

#[derive(Deserialize)]
struct EnvelopeDocument {
    projects: Vec<ProjectRecord>,
}

/// Hex SHA-256 over the canonical JSON encoding of `records`.
pub fn dataset_digest(records: &[ProjectRecord]) -> Result<String, DatasetError> {
    let bytes = serde_json::to_vec(records)?;
    let digest = Sha256::digest(&bytes);
    let mut out = String::with_capacity(64);
    for b in digest {
        let _ = write!(&mut out, "{:02x}", b);
    }
    Ok(out)
}

pub fn write_dataset(
    path: &Path,
    records: Vec<ProjectRecord>,
    generated_at: OffsetDateTime,
) -> Result<DatasetEnvelope, DatasetError> {
    let envelope = DatasetEnvelope {
        digest: dataset_digest(&records)?,
        generated_at: generated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string()),
        projects: records,
    };
    let mut body = serde_json::to_vec_pretty(&envelope)?;
    body.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| DatasetError::io(parent, err))?;
    }
    std::fs::write(path, body).map_err(|err| DatasetError::io(path, err))?;
    tracing::info!(
        path = %path.display(),
        records = envelope.projects.len(),
        digest = %envelope.digest,
        "dataset written"
    );
    Ok(envelope)
}

/// Accepts either a [`DatasetEnvelope`] or a bare JSON array of records.
/// The shape is picked from the first token so that errors keep their line
/// and column.
pub fn parse_dataset(raw: &str) -> Result<Vec<ProjectRecord>, DatasetError> {
    let raw = raw.trim_start_matches('\u{feff}');
    if raw.trim_start().starts_with('{') {
        let envelope: EnvelopeDocument = serde_json::from_str(raw)?;
        return Ok(envelope.projects);
    }
    Ok(serde_json::from_str(raw)?)
}

pub fn read_dataset(path: &Path) -> Result<Vec<ProjectRecord>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|err| DatasetError::io(path, err))?;
    let records = parse_dataset(&raw)?;
    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Missing or malformed datasets degrade to an empty catalog.
pub fn load_dataset_or_empty(path: &Path) -> Vec<ProjectRecord> {
    match read_dataset(path) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                code = err.code(),
                error = %err,
                "dataset unavailable; continuing with an empty catalog"
            );
            Vec::new()
        }
    }
}
