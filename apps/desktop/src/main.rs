use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{validate_server_url, DatasetUpload, EvaluatorClient};
use shared::{
    domain::{ClassLabel, Feature, Tier, TARGET_COLUMN},
    protocol::TrainReport,
};

mod config;

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides the configured inference server URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the inference server is reachable.
    Health,
    /// Upload a labeled CSV dataset and train the classifier.
    Train { dataset: PathBuf },
    /// Train, then predict one car's acceptability in the same session.
    /// Unset fields keep their defaults.
    Evaluate {
        dataset: PathBuf,
        #[arg(long)]
        buying: Option<String>,
        #[arg(long)]
        maint: Option<String>,
        #[arg(long)]
        doors: Option<String>,
        #[arg(long)]
        persons: Option<String>,
        #[arg(long)]
        lug_boot: Option<String>,
        #[arg(long)]
        safety: Option<String>,
    },
    /// Print the dataset format the server expects.
    Format,
}

fn load_dataset(path: &Path) -> Result<DatasetUpload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read dataset file '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.csv".to_string());
    Ok(DatasetUpload { filename, bytes })
}

fn print_training_report(report: &TrainReport) {
    println!("Training complete. Model accuracy: {}%", report.accuracy);
    if let Some(path) = &report.model_path {
        println!("model saved at: {path}");
    }
}

fn print_csv_format() {
    let columns: Vec<&str> = Feature::ALL
        .iter()
        .map(|f| f.name())
        .chain([TARGET_COLUMN])
        .collect();
    println!("Required CSV format");
    println!("columns (any order): {}", columns.join(","));
    for feature in Feature::ALL {
        println!("  {}: {}", feature.name(), feature.domain().join(", "));
    }
    println!(
        "  {}: {}",
        TARGET_COLUMN,
        ClassLabel::ALL.map(|c| c.as_str()).join(", ")
    );
    println!("example rows:");
    println!("  vhigh,vhigh,2,2,small,low,unacc");
    println!("  high,med,4,more,big,high,acc");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    let server_url = validate_server_url(&settings.server_url)?;
    let client = EvaluatorClient::new(server_url);

    match cli.command {
        Command::Health => {
            let health = client.health().await?;
            println!("server status: {}", health.status);
        }
        Command::Train { dataset } => {
            let report = client.train(Some(load_dataset(&dataset)?)).await?;
            print_training_report(&report);
        }
        Command::Evaluate {
            dataset,
            buying,
            maint,
            doors,
            persons,
            lug_boot,
            safety,
        } => {
            let report = client.train(Some(load_dataset(&dataset)?)).await?;
            print_training_report(&report);

            let selections = [
                (Feature::Buying, buying),
                (Feature::Maint, maint),
                (Feature::Doors, doors),
                (Feature::Persons, persons),
                (Feature::LugBoot, lug_boot),
                (Feature::Safety, safety),
            ];
            for (feature, value) in selections {
                if let Some(value) = value {
                    client.set_field(feature, &value).await?;
                }
            }

            let input = client.prediction_input().await;
            println!(
                "predicting: {}",
                Feature::ALL
                    .map(|f| format!("{}={}", f.name(), input.value(f)))
                    .join(" ")
            );
            let display = client.predict().await?;
            let tier = match display.tier {
                Tier::Bad => "bad",
                Tier::Good => "good",
            };
            println!("{} [{tier}]", display.text);
        }
        Command::Format => print_csv_format(),
    }

    Ok(())
}
