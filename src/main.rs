//! Nexus Equity CLI - query the district equity dataset from the terminal.
//!
//! A thin presentation layer over [`EquityDataset`]; all analysis lives in
//! the library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use nexus_equity::{band, ClassificationConfig, EquityDataset, GroupAggregate, Metric};

#[derive(Parser, Debug)]
#[command(name = "nexus-equity", version, about = "District digital equity metrics & risk analysis")]
struct Cli {
    /// Path to the district equity CSV
    #[arg(long)]
    data: PathBuf,
    /// JSON file overriding classification thresholds
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List states present in the dataset
    States,
    /// List districts of a state, sorted by name
    Districts {
        #[arg(long)]
        state: String,
    },
    /// Scores, risk category, and recommendation for one district
    Profile {
        #[arg(long)]
        state: String,
        #[arg(long)]
        district: String,
    },
    /// Mean scores across a state's districts
    Summary {
        #[arg(long)]
        state: String,
    },
    /// State rollup with risk composition and insight notes
    Overview {
        #[arg(long)]
        state: String,
    },
    /// Mean scores per zone
    Zones,
    /// Lowest-DEI districts nationally
    Worst {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn emit_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    let out = JsonOut { ok: true, data };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_aggregate(aggregate: &GroupAggregate) {
    println!("  Districts: {}", aggregate.count);
    println!("  Mean {}: {:.1}", Metric::Dei.short(), aggregate.mean_dei);
    println!(
        "  Mean {}: {:.1}",
        Metric::AccessHealth.short(),
        aggregate.mean_access_health
    );
    println!(
        "  Mean {}: {:.1}",
        Metric::UpdateLoad.short(),
        aggregate.mean_update_load
    );
    println!(
        "  Mean {}: {:.1}",
        Metric::Stability.short(),
        aggregate.mean_stability
    );
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ClassificationConfig> {
    let Some(path) = path else {
        return Ok(ClassificationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let dataset = EquityDataset::load_with_config(&cli.data, config)?;

    match &cli.command {
        Commands::States => {
            let states = dataset.states();
            if cli.json {
                emit_json(&states)?;
            } else {
                for state in states {
                    println!("{state}");
                }
            }
        }
        Commands::Districts { state } => {
            let districts = dataset.list_districts(state)?;
            if cli.json {
                emit_json(&districts)?;
            } else {
                for record in districts {
                    println!("{} [{}]  DEI {:.1}", record.district, record.zone, record.dei);
                }
            }
        }
        Commands::Profile { state, district } => {
            let profile = dataset.district_profile(state, district)?;
            if cli.json {
                emit_json(&profile)?;
            } else {
                let record = profile.record;
                println!("{} ({}), zone {}", record.district, record.state, record.zone);
                for metric in Metric::ALL {
                    let score = record.score(metric);
                    println!("  {}: {:.1} ({})", metric.name(), score, band(metric, score));
                }
                println!("Status: {}", profile.category);
                println!("Recommendation: {}", profile.recommendation);
                println!("Action plan:\n{}", nexus_equity::action_plan(profile.category));
            }
        }
        Commands::Summary { state } => {
            let summary = dataset.state_summary(state)?;
            if cli.json {
                emit_json(&summary)?;
            } else {
                print_aggregate(&summary);
            }
        }
        Commands::Overview { state } => {
            let overview = dataset.state_overview(state)?;
            if cli.json {
                emit_json(&overview)?;
            } else {
                println!("{}", overview.state);
                print_aggregate(&overview.aggregate);
                println!(
                    "  Risk mix: {} healthy, {} access stress, {} update burden, {} stability risk",
                    overview.risk_counts.healthy,
                    overview.risk_counts.access_stress,
                    overview.risk_counts.update_burden,
                    overview.risk_counts.stability_risk
                );
                for note in &overview.notes {
                    println!("  - {note}");
                }
            }
        }
        Commands::Zones => {
            let zones = dataset.zone_summaries();
            if cli.json {
                emit_json(&zones)?;
            } else {
                let mut names: Vec<&String> = zones.keys().collect();
                names.sort();
                for name in names {
                    println!("{name}");
                    print_aggregate(&zones[name]);
                }
            }
        }
        Commands::Worst { limit } => {
            let worst = dataset.worst_districts(*limit);
            if cli.json {
                emit_json(&worst)?;
            } else {
                for record in worst {
                    println!("{} ({})  DEI {:.1}", record.district, record.state, record.dei);
                }
            }
        }
    }

    Ok(())
}
