//! Chart datasets projected from the filtered rows
//!
//! Every chart is plain data; drawing is left to the client.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::lowess::{lowess, DEFAULT_FRAC, DEFAULT_ITERATIONS};
use crate::models::{HistoricalRecord, RainLabel};

pub const MORNING_COLOR: &str = "skyblue";
pub const AFTERNOON_COLOR: &str = "lightgreen";
pub const TREND_COLOR: &str = "lightgray";
pub const RAIN_COLOR: &str = "skyblue";
pub const NO_RAIN_COLOR: &str = "lightgray";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// `None` renders as a gap
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    fn from_rows<F>(name: &str, color: &str, rows: &[&HistoricalRecord], value: F) -> Self
    where
        F: Fn(&HistoricalRecord) -> Option<f64>,
    {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            points: rows
                .iter()
                .map(|row| SeriesPoint {
                    date: row.date,
                    value: value(row),
                })
                .collect(),
        }
    }

    fn present(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.value.map(|value| (point.date, value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    Markers,
    Lines,
    Area,
    Bars,
}

/// Five-number summary with Tukey whiskers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub name: String,
    pub color: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// `None` when no value is present
    pub fn from_values(name: &str, color: &str, values: &[Option<f64>]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - fence, q3 + fence);

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|v| **v >= low_fence && **v <= high_fence);
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(Self {
            name: name.to_string(),
            color: color.to_string(),
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear interpolation between order statistics of a sorted, non-empty slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Histogram {
        bars: Vec<CategoryCount>,
    },
    TimeSeries {
        mode: SeriesMode,
        series: Vec<Series>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trendline: Option<Series>,
    },
    Box {
        boxes: Vec<BoxSummary>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub heading: String,
    pub title: String,
    pub data: ChartData,
}

impl Chart {
    fn new(heading: &str, title: &str, data: ChartData) -> Self {
        Self {
            heading: heading.to_string(),
            title: title.to_string(),
            data,
        }
    }

    fn paired(
        heading: &str,
        title: &str,
        mode: SeriesMode,
        morning: Series,
        afternoon: Series,
    ) -> Self {
        Self::new(
            heading,
            title,
            ChartData::TimeSeries {
                mode,
                series: vec![morning, afternoon],
                trendline: None,
            },
        )
    }
}

/// The seven dashboard charts for one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainCharts {
    pub rain_distribution: Chart,
    pub rainfall_trend: Chart,
    pub humidity: Chart,
    pub cloud_cover: Chart,
    pub pressure: Chart,
    pub wind_speed: Chart,
    pub temperature: Chart,
}

impl RainCharts {
    /// Builds every chart from the rows, ordered by date
    pub fn build(rows: &[&HistoricalRecord]) -> Self {
        let mut rows = rows.to_vec();
        rows.sort_by_key(|row| row.date);
        let rows = rows.as_slice();

        let rainfall = Series::from_rows("Rainfall", MORNING_COLOR, rows, |r| r.rainfall);
        let trendline = rainfall_trendline(&rainfall);

        Self {
            rain_distribution: Chart::new(
                "Rain Tomorrow Distribution",
                "Rain vs No Rain",
                ChartData::Histogram {
                    bars: rain_distribution(rows),
                },
            ),
            rainfall_trend: Chart::new(
                "Rainfall Over Time (mm)",
                "Rainfall Trend",
                ChartData::TimeSeries {
                    mode: SeriesMode::Markers,
                    series: vec![rainfall],
                    trendline,
                },
            ),
            humidity: Chart::paired(
                "Humidity (%) Over Time",
                "Humidity Trend",
                SeriesMode::Area,
                Series::from_rows("Humidity 9am", MORNING_COLOR, rows, |r| r.humidity_9am),
                Series::from_rows("Humidity 3pm", AFTERNOON_COLOR, rows, |r| r.humidity_3pm),
            ),
            cloud_cover: Chart::paired(
                "Cloud Coverage (oktas)",
                "Cloud Coverage Over Time",
                SeriesMode::Lines,
                Series::from_rows("Cloud9am", MORNING_COLOR, rows, |r| r.cloud_9am),
                Series::from_rows("Cloud3pm", AFTERNOON_COLOR, rows, |r| r.cloud_3pm),
            ),
            pressure: Chart::paired(
                "Pressure (hPa) Over Time",
                "Pressure Trend",
                SeriesMode::Markers,
                Series::from_rows("Pressure 9am", MORNING_COLOR, rows, |r| r.pressure_9am),
                Series::from_rows("Pressure 3pm", AFTERNOON_COLOR, rows, |r| r.pressure_3pm),
            ),
            wind_speed: Chart::paired(
                "Wind Speed (km/h) Over Time",
                "Wind Speed",
                SeriesMode::Bars,
                Series::from_rows("Wind 9am", MORNING_COLOR, rows, |r| r.wind_speed_9am),
                Series::from_rows("Wind 3pm", AFTERNOON_COLOR, rows, |r| r.wind_speed_3pm),
            ),
            temperature: Chart::new(
                "Temperature (°C) Distribution",
                "Max & Min Temperature Distribution",
                ChartData::Box {
                    boxes: temperature_boxes(rows),
                },
            ),
        }
    }
}

/// Count per RainTomorrow label in first-appearance order
fn rain_distribution(rows: &[&HistoricalRecord]) -> Vec<CategoryCount> {
    let mut bars: Vec<CategoryCount> = Vec::new();
    for label in rows.iter().filter_map(|row| row.rain_tomorrow) {
        match bars.iter_mut().find(|bar| bar.category == label.as_str()) {
            Some(bar) => bar.count += 1,
            None => bars.push(CategoryCount {
                category: label.as_str().to_string(),
                count: 1,
                color: match label {
                    RainLabel::Yes => RAIN_COLOR,
                    RainLabel::No => NO_RAIN_COLOR,
                }
                .to_string(),
            }),
        }
    }
    bars
}

fn rainfall_trendline(rainfall: &Series) -> Option<Series> {
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = rainfall.present().unzip();
    if dates.is_empty() {
        return None;
    }
    let xs: Vec<f64> = dates
        .iter()
        .map(|date| f64::from(date.num_days_from_ce()))
        .collect();
    let fitted = lowess(&xs, &values, DEFAULT_FRAC, DEFAULT_ITERATIONS);

    Some(Series {
        name: "Rainfall trend".to_string(),
        color: TREND_COLOR.to_string(),
        points: dates
            .into_iter()
            .zip(fitted)
            .map(|(date, value)| SeriesPoint {
                date,
                value: Some(value),
            })
            .collect(),
    })
}

fn temperature_boxes(rows: &[&HistoricalRecord]) -> Vec<BoxSummary> {
    let max: Vec<Option<f64>> = rows.iter().map(|r| r.max_temp).collect();
    let min: Vec<Option<f64>> = rows.iter().map(|r| r.min_temp).collect();
    [
        BoxSummary::from_values("Max Temp", MORNING_COLOR, &max),
        BoxSummary::from_values("Min Temp", AFTERNOON_COLOR, &min),
    ]
    .into_iter()
    .flatten()
    .collect()
}
