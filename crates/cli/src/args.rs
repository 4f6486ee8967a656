#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use eco_core::{Dimension, SortKey};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Parser)]
#[command(name = "ecomap")]
#[command(about = "Aggregate, filter and inspect the ecosystem project catalog")]
pub(crate) struct Cli {
    /// YAML file overriding the built-in catalog tables
    #[arg(long, global = true, env = "ECOMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Merge per-project YAML files into one dataset file
    Aggregate {
        #[arg(long, env = "ECOMAP_DATA_DIR")]
        data_dir: PathBuf,
        #[arg(long, env = "ECOMAP_DATASET")]
        out: PathBuf,
    },
    /// Print facet values, counts, colors and category groups
    Facets(DatasetArgs),
    /// Apply selections, search and sort, then print what is visible
    Query {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// DIM=VALUE, repeatable
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<Selection>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
        #[arg(long)]
        desc: bool,
    },
    /// Print the activity level of every record
    Activity {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Reference instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_rfc3339)]
        at: Option<OffsetDateTime>,
    },
    /// Read or change the stored viewer theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
        #[arg(long, global = true, env = "ECOMAP_STORAGE_DIR")]
        storage_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub(crate) struct DatasetArgs {
    #[arg(long, env = "ECOMAP_DATASET")]
    pub dataset: PathBuf,
}

#[derive(Clone, Debug, Subcommand)]
pub(crate) enum ThemeAction {
    Get,
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ThemeArg {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortArg {
    Name,
    Status,
    Stars,
    Pushed,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortKey::Name,
            SortArg::Status => SortKey::Status,
            SortArg::Stars => SortKey::Stars,
            SortArg::Pushed => SortKey::Pushed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    pub dimension: Dimension,
    pub value: String,
}

pub(crate) fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (dimension, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIM=VALUE, got {raw:?}"))?;
    let dimension = Dimension::parse(dimension)
        .ok_or_else(|| format!("unknown dimension {:?}", dimension.trim()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("--select {} requires a value", dimension.as_str()));
    }
    Ok(Selection {
        dimension,
        value: value.to_string(),
    })
}

fn parse_rfc3339(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).map_err(|err| format!("invalid RFC 3339 instant: {err}"))
}
