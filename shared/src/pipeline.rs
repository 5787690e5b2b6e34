//! Inference pipeline over the fitted artifacts
//!
//! Stage order is fixed by how the artifacts were fitted and cannot be
//! recovered from data:
//!
//! 1. label-encode the five categorical columns
//! 2. numeric imputer
//! 3. categorical imputer
//! 4. standard scaler
//! 5. min-max scaler
//! 6. power transformer
//!
//! followed by the classifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ClassifierArtifact};
use crate::error::{ArtifactError, PipelineError};
use crate::models::{RainPrediction, RawObservation};
use crate::preprocessing::{FittedTransformer, LabelEncoder, TransformerArtifact};
use crate::types::{columns, FeatureRow};

/// Persisted artifact names
pub mod names {
    pub const NUMERIC_IMPUTER: &str = "numeric_imputer";
    pub const CATEGORICAL_IMPUTER: &str = "categorical_imputer";
    pub const SCALER_STD: &str = "scaler_std";
    pub const SCALER_MM: &str = "scaler_mm";
    pub const POWER_TRANSFORMER: &str = "pt_yeo_johnson";
    pub const CLASSIFIER: &str = "DecisionTreeClassifier";

    /// Name of the label encoder fitted on `column`
    pub fn label_encoder(column: &str) -> String {
        format!("{}_label_encoder", column)
    }
}

/// Every fitted artifact the pipeline needs, as deserialized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub numeric_imputer: TransformerArtifact,
    pub categorical_imputer: TransformerArtifact,
    /// Keyed by column name
    pub label_encoders: BTreeMap<String, TransformerArtifact>,
    pub scaler_std: TransformerArtifact,
    pub scaler_mm: TransformerArtifact,
    pub power_transformer: TransformerArtifact,
    pub classifier: ClassifierArtifact,
}

/// One named step of the pipeline
#[derive(Debug, Clone)]
pub struct PipelineStage {
    pub name: String,
    pub transformer: TransformerArtifact,
}

/// Prediction with the class distribution of the deciding leaf
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub prediction: RainPrediction,
    /// Share of rain among the training samples of the deciding leaf
    pub rain_probability: f64,
}

/// Immutable, fully validated set of fitted artifacts
///
/// Built once at startup and shared read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct PredictionContext {
    stages: Vec<PipelineStage>,
    classifier: ClassifierArtifact,
}

impl PredictionContext {
    /// Validate the bundle and arrange its artifacts in pipeline order
    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ArtifactError> {
        let ArtifactBundle {
            numeric_imputer,
            categorical_imputer,
            mut label_encoders,
            scaler_std,
            scaler_mm,
            power_transformer,
            classifier,
        } = bundle;

        let mut stages = Vec::with_capacity(columns::CATEGORICAL.len() + 5);

        for column in columns::CATEGORICAL {
            let name = names::label_encoder(column);
            let encoder = label_encoders
                .remove(column)
                .ok_or_else(|| ArtifactError::Missing(name.clone()))?;
            match &encoder {
                TransformerArtifact::LabelEncoder(inner) if inner.column != column => {
                    return Err(ArtifactError::invalid(
                        &name,
                        format!("fitted on column {} instead of {}", inner.column, column),
                    ));
                }
                _ => {}
            }
            stages.push(stage(name, encoder, "label_encoder")?);
        }
        if let Some(extra) = label_encoders.keys().next() {
            return Err(ArtifactError::invalid(
                names::label_encoder(extra),
                "no categorical column of that name",
            ));
        }

        stages.push(stage(names::NUMERIC_IMPUTER, numeric_imputer, "simple_imputer")?);
        stages.push(stage(
            names::CATEGORICAL_IMPUTER,
            categorical_imputer,
            "simple_imputer",
        )?);
        stages.push(stage(names::SCALER_STD, scaler_std, "standard_scaler")?);
        stages.push(stage(names::SCALER_MM, scaler_mm, "min_max_scaler")?);
        stages.push(stage(
            names::POWER_TRANSFORMER,
            power_transformer,
            "power_transformer",
        )?);

        classifier
            .check()
            .map_err(|reason| ArtifactError::invalid(names::CLASSIFIER, reason))?;

        Ok(Self { stages, classifier })
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn classifier(&self) -> &ClassifierArtifact {
        &self.classifier
    }

    /// Number of artifacts held, classifier included
    pub fn artifact_count(&self) -> usize {
        self.stages.len() + 1
    }

    /// Fitted vocabulary of a categorical column
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.encoders()
            .find(|encoder| encoder.column == column)
            .map(LabelEncoder::classes)
    }

    fn encoders(&self) -> impl Iterator<Item = &LabelEncoder> {
        self.stages.iter().filter_map(|stage| match &stage.transformer {
            TransformerArtifact::LabelEncoder(encoder) => Some(encoder),
            _ => None,
        })
    }

    /// Run every preprocessing stage, returning the row the classifier sees
    pub fn transform(&self, observation: &RawObservation) -> Result<FeatureRow, PipelineError> {
        let mut row = observation.to_feature_row();
        for stage in &self.stages {
            stage.transformer.apply(&mut row)?;
        }
        Ok(row)
    }

    /// Predict next-day rain for one observation
    pub fn predict(&self, observation: &RawObservation) -> Result<RainPrediction, PipelineError> {
        let row = self.transform(observation)?;
        self.classifier.predict_rain(&row)
    }

    /// Predict and report the deciding leaf's rain share
    pub fn predict_outcome(
        &self,
        observation: &RawObservation,
    ) -> Result<PredictionOutcome, PipelineError> {
        let row = self.transform(observation)?;
        let output = self.classifier.predict_row(&row)?;
        let prediction = RainPrediction::try_from(output.label)?;
        let rain_probability = self
            .classifier
            .classes()
            .iter()
            .position(|class| *class == 1)
            .and_then(|index| output.probabilities.get(index).copied())
            .unwrap_or(0.0);

        Ok(PredictionOutcome {
            prediction,
            rain_probability,
        })
    }
}

fn stage(
    name: impl Into<String>,
    transformer: TransformerArtifact,
    expected: &'static str,
) -> Result<PipelineStage, ArtifactError> {
    let name = name.into();
    if transformer.kind_name() != expected {
        return Err(ArtifactError::WrongKind {
            name,
            expected,
            found: transformer.kind_name(),
        });
    }
    transformer
        .check()
        .map_err(|reason| ArtifactError::invalid(&name, reason))?;
    Ok(PipelineStage { name, transformer })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stage_order() {
        let context = context();
        let order: Vec<&str> = context.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "RainToday_label_encoder",
                "Location_label_encoder",
                "WindGustDir_label_encoder",
                "WindDir9am_label_encoder",
                "WindDir3pm_label_encoder",
                "numeric_imputer",
                "categorical_imputer",
                "scaler_std",
                "scaler_mm",
                "pt_yeo_johnson",
            ]
        );
        assert_eq!(context.artifact_count(), 11);
    }

    #[test]
    fn test_sydney_example_is_deterministic() {
        let context = context();
        let first = context.predict(&sydney()).unwrap();
        let second = context.predict(&sydney()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, RainPrediction::NoRain);
    }

    #[test]
    fn test_transform_values() {
        let row = context().transform(&sydney()).unwrap();
        assert_eq!(row.number("Location").unwrap(), 3.0);
        assert_eq!(row.number("WindGustDir").unwrap(), 1.0);
        assert_eq!(row.number("RainToday").unwrap(), 0.0);
        assert!((row.number("Humidity3pm").unwrap() - (50.0 - 51.0) / 20.8).abs() < 1e-12);
        assert!((row.number("Cloud9am").unwrap() - 4.0 / 9.0).abs() < 1e-12);
        assert_eq!(row.number("Rainfall").unwrap(), 0.0);
    }

    #[test]
    fn test_humid_afternoon_predicts_rain() {
        let mut observation = sydney();
        observation.humidity_3pm = 90.0;
        let outcome = context().predict_outcome(&observation).unwrap();
        assert_eq!(outcome.prediction, RainPrediction::Rain);
        assert!((outcome.rain_probability - 20.0 / 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_rain_today_predicts_rain() {
        let mut observation = sydney();
        observation.rain_today = "Yes".into();
        assert_eq!(context().predict(&observation).unwrap(), RainPrediction::Rain);
    }

    #[test]
    fn test_unknown_location() {
        let mut observation = sydney();
        observation.location = "Atlantis".into();
        assert_eq!(
            context().predict(&observation),
            Err(PipelineError::UnknownCategory {
                field: "Location".into(),
                value: "Atlantis".into(),
            })
        );
    }

    #[test]
    fn test_unknown_category_in_every_encoder() {
        let cases: [(fn(&mut RawObservation, String), &str, &str); 4] = [
            (|o, v| o.rain_today = v, "RainToday", "Maybe"),
            (|o, v| o.wind_gust_dir = v, "WindGustDir", "NNE"),
            (|o, v| o.wind_dir_9am = v, "WindDir9am", "NNE"),
            (|o, v| o.wind_dir_3pm = v, "WindDir3pm", "NNE"),
        ];
        let context = context();
        for (set, field, value) in cases {
            let mut observation = sydney();
            set(&mut observation, value.to_string());
            assert_eq!(
                context.predict(&observation),
                Err(PipelineError::UnknownCategory {
                    field: field.into(),
                    value: value.into(),
                })
            );
        }
    }

    #[test]
    fn test_vocabulary() {
        let context = context();
        assert_eq!(
            context.vocabulary("RainToday").unwrap(),
            &["No".to_string(), "Yes".to_string()]
        );
        assert!(context.vocabulary("Pressure9am").is_none());
    }

    #[test]
    fn test_missing_encoder() {
        let mut bundle = bundle();
        bundle.label_encoders.remove("WindDir3pm");
        assert_eq!(
            PredictionContext::from_bundle(bundle).unwrap_err(),
            ArtifactError::Missing("WindDir3pm_label_encoder".into())
        );
    }

    #[test]
    fn test_wrong_kind_in_slot() {
        let mut bundle = bundle();
        bundle.scaler_mm = bundle.scaler_std.clone();
        assert!(matches!(
            PredictionContext::from_bundle(bundle),
            Err(ArtifactError::WrongKind { expected: "min_max_scaler", found: "standard_scaler", .. })
        ));
    }

    #[test]
    fn test_encoder_fitted_on_other_column() {
        let mut bundle = bundle();
        let rain_today = bundle.label_encoders["RainToday"].clone();
        bundle.label_encoders.insert("Location".into(), rain_today);
        assert!(matches!(
            PredictionContext::from_bundle(bundle),
            Err(ArtifactError::Invalid { .. })
        ));
    }

    #[test]
    fn test_transformer_missing_field_aborts() {
        let mut bundle = bundle();
        bundle.scaler_std = serde_json::from_str(
            r#"{"kind": "standard_scaler", "feature_names_in": ["Pressure9am"], "mean": [1.0], "scale": [1.0]}"#,
        )
        .unwrap();
        let context = PredictionContext::from_bundle(bundle).unwrap();
        assert_eq!(
            context.predict(&sydney()),
            Err(PipelineError::MissingField("Pressure9am".into()))
        );
    }

    fn known_observation() -> impl Strategy<Value = RawObservation> {
        let location = prop::sample::select(vec!["Albury", "Melbourne", "Perth", "Sydney"]);
        let direction = || prop::sample::select(vec!["E", "N", "S", "W"]);
        let rain_today = prop::sample::select(vec!["No", "Yes"]);
        (
            (location, direction(), direction(), direction(), rain_today),
            (0.0f64..500.0, 0.0f64..150.0, 0.0f64..100.0, 0.0f64..100.0),
            (0.0f64..9.0, 0.0f64..9.0, 0.0f64..500.0),
        )
            .prop_map(
                |((location, gust_dir, dir_9am, dir_3pm, rain_today), (rainfall, gust, h9, h3), (c9, c3, risk))| {
                    RawObservation {
                        location: location.into(),
                        rainfall,
                        wind_gust_dir: gust_dir.into(),
                        wind_gust_speed: gust,
                        wind_dir_9am: dir_9am.into(),
                        wind_dir_3pm: dir_3pm.into(),
                        humidity_9am: h9,
                        humidity_3pm: h3,
                        cloud_9am: c9,
                        cloud_3pm: c3,
                        rain_today: rain_today.into(),
                        risk_mm: risk,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn prop_known_vocabulary_always_predicts(observation in known_observation()) {
            let context = context();
            let first = context.predict(&observation).unwrap();
            let second = context.predict(&observation).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!(first.label() <= 1);
        }

        #[test]
        fn prop_unknown_location_never_predicts(name in "[a-z]{3,12}") {
            let mut observation = sydney();
            observation.location = name;
            let is_unknown_category = matches!(
                context().predict(&observation),
                Err(PipelineError::UnknownCategory { .. })
            );
            prop_assert!(is_unknown_category);
        }
    }
}
