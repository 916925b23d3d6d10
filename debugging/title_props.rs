//! Resolve a title, chart list, search or person against the live API and
//! print the canonical JSON.
//! Usage:
//!   cargo run --bin title_props -- title <id>
//!   cargo run --bin title_props -- chart <top-movies|top-series|trending-movies|trending-series|now-showing|upcoming>
//!   cargo run --bin title_props -- search <query> [all|movies|series|people]
//!   cargo run --bin title_props -- name <id>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use moviefinder::config::Config;
use moviefinder::models::{ChartKind, SearchScope};
use moviefinder::tmdb::TmdbClient;
use moviefinder::Catalog;
use serde::Serialize;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Title,
    Chart,
    Search,
    Name,
}

impl FromStr for Command {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Command::Title),
            "chart" => Ok(Command::Chart),
            "search" => Ok(Command::Search),
            "name" => Ok(Command::Name),
            _ => Err(anyhow::anyhow!(
                "command must be one of 'title', 'chart', 'search', 'name'"
            )),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("Usage: title_props <title|chart|search|name> <arg> [scope]");
    }
    let command: Command = args[0].parse()?;
    let arg = args[1].as_str();

    let config = Config::from_env()?;
    let catalog = Catalog::new(Arc::new(TmdbClient::from_config(&config)?));

    match command {
        Command::Title => print_json(&catalog.resolve_title(arg).await?),
        Command::Chart => {
            let chart: ChartKind = arg.parse().map_err(anyhow::Error::msg)?;
            print_json(&catalog.resolve_chart_list(chart).await?)
        }
        Command::Search => {
            let scope: SearchScope = match args.get(2) {
                Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
                None => SearchScope::All,
            };
            print_json(&catalog.search(arg, scope).await?)
        }
        Command::Name => print_json(&catalog.resolve_person(arg).await?),
    }
}
