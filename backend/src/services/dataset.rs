//! Reading the historical weather CSV

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use shared::{HistoricalRecord, RainLabel};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row; unparseable cells such as `NA` load as `None`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "MinTemp", default, deserialize_with = "csv::invalid_option")]
    min_temp: Option<f64>,
    #[serde(rename = "MaxTemp", default, deserialize_with = "csv::invalid_option")]
    max_temp: Option<f64>,
    #[serde(rename = "Rainfall", default, deserialize_with = "csv::invalid_option")]
    rainfall: Option<f64>,
    #[serde(rename = "WindGustDir", default)]
    wind_gust_dir: Option<String>,
    #[serde(rename = "WindGustSpeed", default, deserialize_with = "csv::invalid_option")]
    wind_gust_speed: Option<f64>,
    #[serde(rename = "WindDir9am", default)]
    wind_dir_9am: Option<String>,
    #[serde(rename = "WindDir3pm", default)]
    wind_dir_3pm: Option<String>,
    #[serde(rename = "WindSpeed9am", default, deserialize_with = "csv::invalid_option")]
    wind_speed_9am: Option<f64>,
    #[serde(rename = "WindSpeed3pm", default, deserialize_with = "csv::invalid_option")]
    wind_speed_3pm: Option<f64>,
    #[serde(rename = "Humidity9am", default, deserialize_with = "csv::invalid_option")]
    humidity_9am: Option<f64>,
    #[serde(rename = "Humidity3pm", default, deserialize_with = "csv::invalid_option")]
    humidity_3pm: Option<f64>,
    #[serde(rename = "Pressure9am", default, deserialize_with = "csv::invalid_option")]
    pressure_9am: Option<f64>,
    #[serde(rename = "Pressure3pm", default, deserialize_with = "csv::invalid_option")]
    pressure_3pm: Option<f64>,
    #[serde(rename = "Cloud9am", default, deserialize_with = "csv::invalid_option")]
    cloud_9am: Option<f64>,
    #[serde(rename = "Cloud3pm", default, deserialize_with = "csv::invalid_option")]
    cloud_3pm: Option<f64>,
    #[serde(rename = "RainToday", default, deserialize_with = "csv::invalid_option")]
    rain_today: Option<RainLabel>,
    #[serde(rename = "RISK_MM", default, deserialize_with = "csv::invalid_option")]
    risk_mm: Option<f64>,
    #[serde(rename = "RainTomorrow", default, deserialize_with = "csv::invalid_option")]
    rain_tomorrow: Option<RainLabel>,
}

fn present(text: Option<String>) -> Option<String> {
    text.filter(|value| !value.is_empty() && value != "NA")
}

impl From<CsvRecord> for HistoricalRecord {
    fn from(row: CsvRecord) -> Self {
        HistoricalRecord {
            date: row.date,
            location: row.location,
            min_temp: row.min_temp,
            max_temp: row.max_temp,
            rainfall: row.rainfall,
            wind_gust_dir: present(row.wind_gust_dir),
            wind_gust_speed: row.wind_gust_speed,
            wind_dir_9am: present(row.wind_dir_9am),
            wind_dir_3pm: present(row.wind_dir_3pm),
            wind_speed_9am: row.wind_speed_9am,
            wind_speed_3pm: row.wind_speed_3pm,
            humidity_9am: row.humidity_9am,
            humidity_3pm: row.humidity_3pm,
            pressure_9am: row.pressure_9am,
            pressure_3pm: row.pressure_3pm,
            cloud_9am: row.cloud_9am,
            cloud_3pm: row.cloud_3pm,
            rain_today: row.rain_today,
            risk_mm: row.risk_mm,
            rain_tomorrow: row.rain_tomorrow,
        }
    }
}

/// Parse every row of a headed CSV document
pub fn read_history<R: Read>(reader: R) -> Result<Vec<HistoricalRecord>, DatasetError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<CsvRecord>() {
        records.push(row?.into());
    }
    Ok(records)
}

pub fn load_history(path: &Path) -> Result<Vec<HistoricalRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let records = read_history(file)?;
    tracing::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}
