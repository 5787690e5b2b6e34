//! Row selection over the historical dataset

use serde::{Deserialize, Serialize};

use crate::models::HistoricalRecord;

/// Location and month are required; year and day narrow further when set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFilter {
    pub location: String,
    pub month: u32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub day: Option<u32>,
}

impl AnalysisFilter {
    pub fn new(location: impl Into<String>, month: u32) -> Self {
        Self {
            location: location.into(),
            month,
            year: None,
            day: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn matches(&self, record: &HistoricalRecord) -> bool {
        record.location == self.location
            && record.month() == self.month
            && self.year.map_or(true, |year| record.year() == year)
            && self.day.map_or(true, |day| record.day() == day)
    }

    /// Rows matching the filter, in dataset order
    pub fn apply<'a>(&self, records: &'a [HistoricalRecord]) -> Vec<&'a HistoricalRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Number of selected rows followed by rain the next day
pub fn count_rain_days(rows: &[&HistoricalRecord]) -> usize {
    rows.iter().filter(|record| record.rained_next_day()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{record, sample};
    use crate::models::RainLabel;
    use chrono::{Datelike, NaiveDate};
    use proptest::prelude::*;

    #[test]
    fn test_location_and_month() {
        let data = sample();
        let rows = AnalysisFilter::new("Sydney", 1).apply(&data);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.location == "Sydney" && r.month() == 1));
    }

    #[test]
    fn test_year_and_day_narrowing() {
        let data = sample();
        let rows = AnalysisFilter::new("Sydney", 1).with_year(2010).apply(&data);
        assert_eq!(rows.len(), 2);

        let rows = AnalysisFilter::new("Sydney", 1)
            .with_year(2010)
            .with_day(2)
            .apply(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(count_rain_days(&rows), 1);

        let rows = AnalysisFilter::new("Sydney", 1)
            .with_year(2010)
            .with_day(1)
            .apply(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(count_rain_days(&rows), 0);
    }

    #[test]
    fn test_no_match_is_empty() {
        let data = sample();
        assert!(AnalysisFilter::new("Sydney", 7).apply(&data).is_empty());
        assert!(AnalysisFilter::new("Atlantis", 1).apply(&data).is_empty());
    }

    #[test]
    fn test_location_is_exact() {
        let data = sample();
        assert!(AnalysisFilter::new("sydney", 1).apply(&data).is_empty());
    }

    #[test]
    fn test_day_without_year_spans_years() {
        let data = sample();
        let rows = AnalysisFilter::new("Sydney", 1).with_day(2).apply(&data);
        assert_eq!(rows.len(), 2);
    }

    fn arb_record() -> impl Strategy<Value = HistoricalRecord> {
        (
            prop::sample::select(vec!["Sydney", "Perth", "Albury"]),
            2008i32..2012,
            1u32..=12,
            1u32..=28,
            prop::option::of(prop::bool::ANY),
        )
            .prop_map(|(location, year, month, day, rain)| {
                let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                let label = rain.map(|r| if r { RainLabel::Yes } else { RainLabel::No });
                record(date, location, label)
            })
    }

    proptest! {
        #[test]
        fn prop_filter_equals_predicate(
            data in prop::collection::vec(arb_record(), 0..60),
            month in 1u32..=12,
            year in prop::option::of(2008i32..2012),
            day in prop::option::of(1u32..=28)
        ) {
            let filter = AnalysisFilter { location: "Sydney".into(), month, year, day };
            let rows = filter.apply(&data);
            let expected: Vec<&HistoricalRecord> = data
                .iter()
                .filter(|r| {
                    r.location == "Sydney"
                        && r.date.month() == month
                        && year.map_or(true, |y| r.date.year() == y)
                        && day.map_or(true, |d| r.date.day() == d)
                })
                .collect();
            prop_assert_eq!(&rows, &expected);

            // idempotent
            let owned: Vec<HistoricalRecord> = rows.iter().map(|r| (*r).clone()).collect();
            let again = filter.apply(&owned);
            prop_assert_eq!(again.len(), rows.len());

            let yes = rows.iter().filter(|r| r.rain_tomorrow == Some(RainLabel::Yes)).count();
            prop_assert_eq!(count_rain_days(&rows), yes);
        }
    }
}
