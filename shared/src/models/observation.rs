//! User-entered observation for a next-day rain prediction

use serde::{Deserialize, Serialize};

use crate::types::{columns, FeatureRow};

/// One record of raw user input, as entered on the prediction view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub location: String,
    /// Rainfall today (mm)
    pub rainfall: f64,
    pub wind_gust_dir: String,
    /// Strongest gust today (km/h)
    pub wind_gust_speed: f64,
    pub wind_dir_9am: String,
    pub wind_dir_3pm: String,
    /// Relative humidity (%)
    pub humidity_9am: f64,
    pub humidity_3pm: f64,
    /// Cloud cover (oktas)
    pub cloud_9am: f64,
    pub cloud_3pm: f64,
    /// "Yes" or "No"
    pub rain_today: String,
    pub risk_mm: f64,
}

impl RawObservation {
    /// Single-row table in the column order the artifacts were fitted with
    pub fn to_feature_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with(columns::LOCATION, self.location.as_str())
            .with(columns::RAINFALL, self.rainfall)
            .with(columns::WIND_GUST_DIR, self.wind_gust_dir.as_str())
            .with(columns::WIND_GUST_SPEED, self.wind_gust_speed)
            .with(columns::WIND_DIR_9AM, self.wind_dir_9am.as_str())
            .with(columns::WIND_DIR_3PM, self.wind_dir_3pm.as_str())
            .with(columns::HUMIDITY_9AM, self.humidity_9am)
            .with(columns::HUMIDITY_3PM, self.humidity_3pm)
            .with(columns::CLOUD_9AM, self.cloud_9am)
            .with(columns::CLOUD_3PM, self.cloud_3pm)
            .with(columns::RAIN_TODAY, self.rain_today.as_str())
            .with(columns::RISK_MM, self.risk_mm)
    }
}
