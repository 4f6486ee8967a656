#![forbid(unsafe_code)]

mod args;
mod commands;
mod settings;

use args::{Cli, Command};
use clap::Parser;
use commands::QueryRequest;
use eco_storage::load_dataset_or_empty;
use serde_json::Value;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    let config = settings::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Aggregate { data_dir, out } => commands::aggregate(&data_dir, &out, now)?,
        Command::Facets(dataset) => {
            commands::facets(config, load_dataset_or_empty(&dataset.dataset), now)?
        }
        Command::Query {
            dataset,
            selections,
            search,
            sort,
            desc,
        } => {
            let request = QueryRequest {
                selections,
                search,
                sort,
                descending: desc,
            };
            let outcome =
                commands::query(config, load_dataset_or_empty(&dataset.dataset), request, now)?;
            for selection in &outcome.ignored {
                eprintln!(
                    "ignoring --select {}={}: value not present in dataset",
                    selection.dimension, selection.value
                );
            }
            outcome.output
        }
        Command::Activity { dataset, at } => {
            let records = load_dataset_or_empty(&dataset.dataset);
            commands::activity(&config, &records, at.unwrap_or(now))?
        }
        Command::Theme {
            action,
            storage_dir,
        } => {
            let storage_dir = settings::resolve_storage_dir(storage_dir)?;
            commands::theme(&storage_dir, action)?
        }
    };
    print_json(&output)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    run(Cli::parse())
}
