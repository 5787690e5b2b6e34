//! Historical rain analysis: filtering, rain-day summary and chart datasets

pub mod charts;
pub mod filter;
pub mod lowess;

pub use charts::*;
pub use filter::*;

use serde::{Deserialize, Serialize};

use crate::models::HistoricalRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    NoData,
    Rain,
    Dry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainSummary {
    pub kind: SummaryKind,
    pub message: String,
}

impl RainSummary {
    pub fn new(matched_rows: usize, rain_days: usize) -> Self {
        let kind = if matched_rows == 0 {
            SummaryKind::NoData
        } else if rain_days > 0 {
            SummaryKind::Rain
        } else {
            SummaryKind::Dry
        };
        Self {
            kind,
            message: rain_summary_message(matched_rows, rain_days),
        }
    }
}

/// Message shown above the charts for a selection
pub fn rain_summary_message(matched_rows: usize, rain_days: usize) -> String {
    if matched_rows == 0 {
        "No data for selected filters.".to_string()
    } else if rain_days > 0 {
        format!("It rained {} day(s) in the selection!", rain_days)
    } else {
        "No rain in the selection!".to_string()
    }
}

/// Result of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub filter: AnalysisFilter,
    pub matched_rows: usize,
    pub rain_days: usize,
    pub summary: RainSummary,
    /// Absent when nothing matched
    pub charts: Option<RainCharts>,
}

pub fn analyze(records: &[HistoricalRecord], filter: AnalysisFilter) -> AnalysisReport {
    let rows = filter.apply(records);
    let rain_days = count_rain_days(&rows);
    let charts = if rows.is_empty() {
        None
    } else {
        Some(RainCharts::build(&rows))
    };

    AnalysisReport {
        matched_rows: rows.len(),
        rain_days,
        summary: RainSummary::new(rows.len(), rain_days),
        charts,
        filter,
    }
}

/// Selector contents for the analysis view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// In order of first appearance
    pub locations: Vec<String>,
    pub months: Vec<u32>,
    pub years: Vec<i32>,
    pub days: Vec<u32>,
}

impl FilterOptions {
    pub fn from_records(records: &[HistoricalRecord]) -> Self {
        let mut options = Self::default();
        for record in records {
            if !options.locations.contains(&record.location) {
                options.locations.push(record.location.clone());
            }
        }
        options.months = distinct_sorted(records.iter().map(HistoricalRecord::month));
        options.years = distinct_sorted(records.iter().map(HistoricalRecord::year));
        options.days = distinct_sorted(records.iter().map(HistoricalRecord::day));
        options
    }
}

fn distinct_sorted<T: Ord>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut values: Vec<T> = values.collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::models::{HistoricalRecord, RainLabel};

    pub fn record(date: NaiveDate, location: &str, label: Option<RainLabel>) -> HistoricalRecord {
        let mut record = HistoricalRecord::new(date, location);
        record.rain_tomorrow = label;
        record
    }

    pub fn sample() -> Vec<HistoricalRecord> {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        vec![
            record(date(2010, 1, 1), "Sydney", Some(RainLabel::No)),
            record(date(2010, 1, 2), "Sydney", Some(RainLabel::Yes)),
            record(date(2011, 1, 2), "Sydney", Some(RainLabel::Yes)),
            record(date(2010, 2, 1), "Sydney", Some(RainLabel::No)),
            record(date(2010, 1, 1), "Perth", Some(RainLabel::Yes)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample;
    use super::*;

    #[test]
    fn test_summary_messages() {
        assert_eq!(rain_summary_message(0, 0), "No data for selected filters.");
        assert_eq!(rain_summary_message(3, 2), "It rained 2 day(s) in the selection!");
        assert_eq!(rain_summary_message(3, 0), "No rain in the selection!");
    }

    #[test]
    fn test_analyze_no_match() {
        let report = analyze(&sample(), AnalysisFilter::new("Sydney", 7));
        assert_eq!(report.matched_rows, 0);
        assert_eq!(report.rain_days, 0);
        assert_eq!(report.summary.kind, SummaryKind::NoData);
        assert!(report.charts.is_none());
    }

    #[test]
    fn test_analyze_with_rain() {
        let report = analyze(&sample(), AnalysisFilter::new("Sydney", 1));
        assert_eq!(report.matched_rows, 3);
        assert_eq!(report.rain_days, 2);
        assert_eq!(report.summary.kind, SummaryKind::Rain);
        assert_eq!(report.summary.message, "It rained 2 day(s) in the selection!");
        assert!(report.charts.is_some());
    }

    #[test]
    fn test_analyze_dry_selection() {
        let report = analyze(&sample(), AnalysisFilter::new("Sydney", 2));
        assert_eq!(report.matched_rows, 1);
        assert_eq!(report.summary.kind, SummaryKind::Dry);
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.locations, vec!["Sydney", "Perth"]);
        assert_eq!(options.months, vec![1, 2]);
        assert_eq!(options.years, vec![2010, 2011]);
        assert_eq!(options.days, vec![1, 2]);
    }
}
