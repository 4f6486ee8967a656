#![forbid(unsafe_code)]

use crate::DatasetError;
use eco_core::ProjectRecord;
use eco_core::metrics::is_known_metric;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct Aggregate {
    pub records: Vec<ProjectRecord>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Merges every per-project YAML file in `dir` into one name-ordered record
/// list. Unreadable, unparsable, nameless and duplicate-named files are
/// skipped and reported rather than failing the whole run.
pub fn aggregate_dir(dir: &Path) -> Result<Aggregate, DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = std::fs::read_dir(dir)
        .map_err(|err| DatasetError::io(dir, err))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_yaml(path))
        .collect::<Vec<_>>();
    paths.sort();

    let mut out = Aggregate::default();
    let mut names = BTreeSet::new();

    for path in paths {
        let skip = |reason: String| {
            tracing::warn!(path = %path.display(), %reason, "skipping project file");
            SkippedFile {
                path: path.clone(),
                reason,
            }
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                out.skipped.push(skip(format!("read failed: {err}")));
                continue;
            }
        };
        let mut record = match parse_record(&raw) {
            Ok(Some(record)) => record,
            Ok(None) => {
                out.skipped.push(skip("empty document".to_string()));
                continue;
            }
            Err(err) => {
                out.skipped.push(skip(format!("invalid yaml: {err}")));
                continue;
            }
        };

        record.name = record.name.trim().to_string();
        if record.name.is_empty() {
            out.skipped.push(skip("missing name".to_string()));
            continue;
        }
        if !names.insert(record.name.clone()) {
            out.skipped
                .push(skip(format!("duplicate name {:?}", record.name)));
            continue;
        }

        for metric in record.metrics.keys() {
            if !is_known_metric(metric) {
                tracing::debug!(project = %record.name, %metric, "unrecognized metric series");
            }
        }
        record.normalize();
        out.records.push(record);
    }

    out.records.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(
        dir = %dir.display(),
        records = out.records.len(),
        skipped = out.skipped.len(),
        "aggregated project files"
    );
    Ok(out)
}

/// Parses one project document. Documents with no content (blank or
/// comment-only, or an explicit null) yield `None`.
pub fn parse_record(raw: &str) -> Result<Option<ProjectRecord>, serde_yaml::Error> {
    let has_content = raw.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#') && line != "---"
    });
    if !has_content {
        return Ok(None);
    }
    serde_yaml::from_str::<Option<ProjectRecord>>(raw)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
