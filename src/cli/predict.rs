//! CLI entry-point for running the trend predictor directly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Args as ClapArgs;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    config::Settings,
    db::{self, models::TimeSeriesRow},
    trend::{predict_trend, AqiSample},
};

/// Predict the AQI trend for a ward from stored history or a CSV file.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Ward identifier (e.g. W001).
    #[arg(long)]
    pub ward_id: String,
    /// Lookback window in days (7-30).
    #[arg(long, default_value_t = 14)]
    pub days: i64,
    /// Read the series from a `date,aqi` CSV instead of the database.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CsvSample {
    date: chrono::NaiveDate,
    aqi: f64,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let days = args.days.clamp(7, 30);

    let samples: Vec<AqiSample> = match &args.csv {
        Some(path) => read_csv(path)?,
        None => {
            let pool = db::connect_required(&settings).await?;
            let since = Utc::now().date_naive() - Duration::days(days);
            TimeSeriesRow::for_ward(&pool, args.ward_id.trim(), since)
                .await?
                .into_iter()
                .map(|row| AqiSample {
                    date: row.date,
                    aqi: row.aqi as f64,
                })
                .collect()
        }
    };

    let prediction = predict_trend(args.ward_id.trim(), &samples);
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn read_csv(path: &PathBuf) -> Result<Vec<AqiSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut samples = Vec::new();
    for record in reader.deserialize::<CsvSample>() {
        let record = record.context("parsing CSV sample")?;
        samples.push(AqiSample {
            date: record.date,
            aqi: record.aqi,
        });
    }
    Ok(samples)
}
