//! Historical rain analysis service
//!
//! The dataset is read from disk on every request, on the blocking pool.

use std::path::PathBuf;

use shared::analysis::{analyze, AnalysisFilter, AnalysisReport, FilterOptions};
use shared::{validate_filter, HistoricalRecord};

use crate::error::{AppError, AppResult};
use crate::services::dataset::load_history;

#[derive(Clone)]
pub struct AnalysisService {
    dataset_path: PathBuf,
}

impl AnalysisService {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
        }
    }

    pub async fn analyze(&self, filter: AnalysisFilter) -> AppResult<AnalysisReport> {
        validate_filter(&filter)?;

        let report = self
            .with_history(move |records| analyze(&records, filter))
            .await?;
        tracing::info!(
            location = %report.filter.location,
            month = report.filter.month,
            matched = report.matched_rows,
            rain_days = report.rain_days,
            "Analyzed historical rain"
        );
        Ok(report)
    }

    pub async fn options(&self) -> AppResult<FilterOptions> {
        self.with_history(|records| FilterOptions::from_records(&records))
            .await
    }

    /// Whether the configured dataset file exists
    pub fn dataset_present(&self) -> bool {
        self.dataset_path.is_file()
    }

    async fn with_history<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Vec<HistoricalRecord>) -> T + Send + 'static,
    {
        let path = self.dataset_path.clone();
        tokio::task::spawn_blocking(move || {
            let records = load_history(&path).map_err(|e| AppError::Dataset(e.to_string()))?;
            Ok(f(records))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Dataset task failed: {}", e)))?
    }
}
