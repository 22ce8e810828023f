use serde::{Deserialize, Serialize};

use crate::domain::Feature;

/// JSON body of `POST /predict`. Always fully populated: every field starts
/// at its registry default, so serialization cannot fail partway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub buying: String,
    pub maint: String,
    pub doors: String,
    pub persons: String,
    pub lug_boot: String,
    pub safety: String,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            buying: Feature::Buying.default_value().to_string(),
            maint: Feature::Maint.default_value().to_string(),
            doors: Feature::Doors.default_value().to_string(),
            persons: Feature::Persons.default_value().to_string(),
            lug_boot: Feature::LugBoot.default_value().to_string(),
            safety: Feature::Safety.default_value().to_string(),
        }
    }
}

impl PredictionInput {
    pub fn value(&self, feature: Feature) -> &str {
        match feature {
            Feature::Buying => &self.buying,
            Feature::Maint => &self.maint,
            Feature::Doors => &self.doors,
            Feature::Persons => &self.persons,
            Feature::LugBoot => &self.lug_boot,
            Feature::Safety => &self.safety,
        }
    }

    /// Raw field write. Domain checking happens at the form boundary, which
    /// is the only caller outside of tests.
    pub fn set(&mut self, feature: Feature, value: impl Into<String>) {
        let value = value.into();
        match feature {
            Feature::Buying => self.buying = value,
            Feature::Maint => self.maint = value,
            Feature::Doors => self.doors = value,
            Feature::Persons => self.persons = value,
            Feature::LugBoot => self.lug_boot = value,
            Feature::Safety => self.safety = value,
        }
    }
}

/// Success body of `POST /train`. The server also returns a human-readable
/// `message` and the saved model path; both are optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
}

/// Success body of `POST /predict`. The prediction is kept as a raw string:
/// labels outside the known set are presented verbatim, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
}

/// Failure body for any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Resolution of one training attempt. Immutable once created; the workflow
/// controller consumes it and event subscribers receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TrainingOutcome {
    Completed { accuracy: f64 },
    Failed { error: String },
}

/// Resolution of one prediction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Labeled { label: String },
    Failed { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_input_serializes_with_wire_field_names() {
        let input = PredictionInput::default();
        let json = serde_json::to_value(&input).expect("serialize");
        for feature in Feature::ALL {
            assert_eq!(
                json.get(feature.name()).and_then(|v| v.as_str()),
                Some(feature.default_value()),
                "missing or wrong wire key for {}",
                feature.name()
            );
        }
    }

    #[test]
    fn train_report_tolerates_missing_optional_fields() {
        let report: TrainReport =
            serde_json::from_str(r#"{"accuracy": 92.5}"#).expect("deserialize");
        assert_eq!(report.accuracy, 92.5);
        assert_eq!(report.message, None);
        assert_eq!(report.model_path, None);
    }
}
