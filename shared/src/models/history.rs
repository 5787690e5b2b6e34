//! Historical weather observations

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// "Yes"/"No" flag as it appears in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainLabel {
    Yes,
    No,
}

impl RainLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainLabel::Yes => "Yes",
            RainLabel::No => "No",
        }
    }
}

impl std::fmt::Display for RainLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day of observations at one location
///
/// Any meteorological value may be absent in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub location: String,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub rainfall: Option<f64>,
    pub wind_gust_dir: Option<String>,
    pub wind_gust_speed: Option<f64>,
    pub wind_dir_9am: Option<String>,
    pub wind_dir_3pm: Option<String>,
    pub wind_speed_9am: Option<f64>,
    pub wind_speed_3pm: Option<f64>,
    pub humidity_9am: Option<f64>,
    pub humidity_3pm: Option<f64>,
    pub pressure_9am: Option<f64>,
    pub pressure_3pm: Option<f64>,
    pub cloud_9am: Option<f64>,
    pub cloud_3pm: Option<f64>,
    pub rain_today: Option<RainLabel>,
    pub risk_mm: Option<f64>,
    pub rain_tomorrow: Option<RainLabel>,
}

impl HistoricalRecord {
    /// Record with only date and location set
    pub fn new(date: NaiveDate, location: impl Into<String>) -> Self {
        Self {
            date,
            location: location.into(),
            min_temp: None,
            max_temp: None,
            rainfall: None,
            wind_gust_dir: None,
            wind_gust_speed: None,
            wind_dir_9am: None,
            wind_dir_3pm: None,
            wind_speed_9am: None,
            wind_speed_3pm: None,
            humidity_9am: None,
            humidity_3pm: None,
            pressure_9am: None,
            pressure_3pm: None,
            cloud_9am: None,
            cloud_3pm: None,
            rain_today: None,
            risk_mm: None,
            rain_tomorrow: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn rained_next_day(&self) -> bool {
        self.rain_tomorrow == Some(RainLabel::Yes)
    }
}
