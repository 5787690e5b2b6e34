//! HTTP handlers for the rain analysis view

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::analysis::{AnalysisFilter, AnalysisReport, FilterOptions};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::services::AnalysisService;
use crate::AppState;

/// Query parameters for a historical analysis
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub location: String,
    pub month: u32,
    pub year: Option<i32>,
    pub day: Option<u32>,
}

impl From<AnalysisQuery> for AnalysisFilter {
    fn from(query: AnalysisQuery) -> Self {
        AnalysisFilter {
            location: query.location,
            month: query.month,
            year: query.year,
            day: query.day,
        }
    }
}

/// Filter the dataset and build the rain summary and charts
pub async fn get_analysis(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AnalysisQuery>,
) -> AppResult<Json<AnalysisReport>> {
    let service = AnalysisService::new(state.config.dataset.path.clone());
    let report = service.analyze(query.into()).await?;
    Ok(Json(report))
}

/// Locations, months, years and days present in the dataset
pub async fn get_analysis_options(
    State(state): State<AppState>,
) -> AppResult<Json<FilterOptions>> {
    let service = AnalysisService::new(state.config.dataset.path.clone());
    Ok(Json(service.options().await?))
}
