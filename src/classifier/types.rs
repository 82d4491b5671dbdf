// SPDX-License-Identifier: MPL-2.0
//! Class metadata, predictions and the response payloads of the inference service.

use super::client::ApiError;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Static metadata for one output class of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInfo {
    /// Identifier used by the service (the key of the `classes` object).
    pub key: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    /// CSS-style hex color, e.g. `#f97316`.
    pub color: String,
}

/// Ordered set of classes reported by `/api/model-info`.
///
/// Keeps the order in which the service listed the classes and doubles as the
/// class-to-color map used when synthesizing fallback results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassCatalog {
    classes: Vec<ClassInfo>,
}

impl ClassCatalog {
    #[must_use]
    pub fn new(classes: Vec<ClassInfo>) -> Self {
        Self { classes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.key == key)
    }

    /// Returns the color registered for a class key.
    #[must_use]
    pub fn color_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(|c| c.color.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ClassInfoPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    color: String,
}

impl<'de> Deserialize<'de> for ClassCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ClassCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping class keys to class metadata")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut classes = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, payload)) = map.next_entry::<String, ClassInfoPayload>()? {
                    classes.push(ClassInfo {
                        name: payload.name.unwrap_or_else(|| key.clone()),
                        key,
                        emoji: payload.emoji,
                        description: payload.description,
                        color: payload.color,
                    });
                }
                Ok(ClassCatalog { classes })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Model status and class metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInfo {
    pub model_loaded: bool,
    pub classes: ClassCatalog,
    pub status: Option<String>,
}

/// One ranked prediction (`top_predictions[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub emoji: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Probability of one class (`all_probabilities[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    #[serde(rename = "class")]
    pub class_name: String,
    /// Percentage in `0..=100`.
    pub probability: f64,
    #[serde(default)]
    pub color: String,
}

/// A complete classification: ranked predictions plus the full distribution.
///
/// The two sequences come from the service independently and are rendered as
/// they are; [`ClassificationResult::consistency_warning`] only reports
/// disagreement between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub top_predictions: Vec<Prediction>,
    pub all_probabilities: Vec<ClassProbability>,
}

impl ClassificationResult {
    #[must_use]
    pub fn top(&self) -> Option<&Prediction> {
        self.top_predictions.first()
    }

    /// Ranked predictions after the first one.
    #[must_use]
    pub fn others(&self) -> &[Prediction] {
        self.top_predictions.get(1..).unwrap_or(&[])
    }

    /// Entry of `all_probabilities` with the highest probability.
    #[must_use]
    pub fn most_probable(&self) -> Option<&ClassProbability> {
        self.all_probabilities
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
    }

    /// Describes a disagreement between the top prediction and the arg-max of
    /// the full distribution, if any.
    #[must_use]
    pub fn consistency_warning(&self) -> Option<String> {
        let top = self.top()?;
        let best = self.most_probable()?;
        if top.class_name == best.class_name {
            return None;
        }
        // Ties are not a disagreement.
        let tied = self
            .all_probabilities
            .iter()
            .any(|p| p.class_name == top.class_name && p.probability == best.probability);
        if tied {
            return None;
        }
        Some(format!(
            "top prediction '{}' differs from most probable class '{}' ({}%)",
            top.class_name, best.class_name, best.probability
        ))
    }
}

/// Single synthetic prediction returned by `/api/test-prediction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPrediction {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub emoji: String,
    pub confidence: f64,
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ModelInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub classes: ClassCatalog,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelInfoResponse {
    pub fn into_model_info(self) -> Result<ModelInfo, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| "model info unavailable".to_string()),
            ));
        }
        Ok(ModelInfo {
            model_loaded: self.model_loaded,
            classes: self.classes,
            status: self.status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub top_predictions: Option<Vec<Prediction>>,
    #[serde(default)]
    pub all_probabilities: Option<Vec<ClassProbability>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn into_result(self) -> Result<ClassificationResult, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| "Analysis failed".to_string()),
            ));
        }
        let top_predictions = self
            .top_predictions
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("missing top_predictions".to_string()))?;
        let all_probabilities = self
            .all_probabilities
            .ok_or_else(|| ApiError::InvalidResponse("missing all_probabilities".to_string()))?;
        Ok(ClassificationResult {
            top_predictions,
            all_probabilities,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestPredictionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<TestPrediction>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TestPredictionResponse {
    pub fn into_prediction(self) -> Result<TestPrediction, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error
                    .unwrap_or_else(|| "test prediction unavailable".to_string()),
            ));
        }
        self.prediction
            .ok_or_else(|| ApiError::InvalidResponse("missing prediction".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probability(class_name: &str, probability: f64) -> ClassProbability {
        ClassProbability {
            class_name: class_name.to_string(),
            probability,
            color: "#000000".to_string(),
        }
    }

    fn prediction(class_name: &str, confidence: f64) -> Prediction {
        Prediction {
            class_name: class_name.to_string(),
            emoji: String::new(),
            confidence,
            color: "#000000".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn catalog_preserves_server_order() {
        let json = r##"{
            "Truck": {"name": "Truck", "emoji": "🚚", "description": "Truck", "color": "#14b8a6"},
            "Airplane": {"name": "Airplane", "emoji": "✈️", "description": "Flying vehicle", "color": "#f97316"},
            "Cat": {"name": "Cat", "emoji": "🐱", "description": "Cat", "color": "#ec4899"}
        }"##;
        let catalog: ClassCatalog = serde_json::from_str(json).expect("valid catalog");

        let keys: Vec<&str> = catalog.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Truck", "Airplane", "Cat"]);
        assert_eq!(catalog.color_of("Cat"), Some("#ec4899"));
        assert_eq!(catalog.get("Airplane").map(|c| c.emoji.as_str()), Some("✈️"));
    }

    #[test]
    fn catalog_entry_without_name_uses_key() {
        let catalog: ClassCatalog =
            serde_json::from_str(r##"{"ship": {"color": "#0ea5e9"}}"##).expect("valid catalog");
        assert_eq!(catalog.get("ship").map(|c| c.name.as_str()), Some("ship"));
    }

    #[test]
    fn model_info_response_parses_full_payload() {
        let json = r##"{
            "success": true,
            "model_loaded": true,
            "classes": {"Dog": {"name": "Dog", "emoji": "🐶", "description": "Dog", "color": "#3b82f6"}},
            "status": "running",
            "routes": ["/api/upload"]
        }"##;
        let response: ModelInfoResponse = serde_json::from_str(json).expect("valid payload");
        let info = response.into_model_info().expect("success payload");
        assert!(info.model_loaded);
        assert_eq!(info.classes.len(), 1);
        assert_eq!(info.status.as_deref(), Some("running"));
    }

    #[test]
    fn unsuccessful_upload_response_is_rejected_with_server_message() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": false, "error": "Empty filename"}"#)
                .expect("valid payload");
        match response.into_result() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "Empty filename"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn upload_response_without_predictions_is_invalid() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": true, "top_predictions": []}"#)
                .expect("valid payload");
        assert!(matches!(
            response.into_result(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn others_skips_the_top_prediction() {
        let result = ClassificationResult {
            top_predictions: vec![prediction("Cat", 80.0), prediction("Dog", 15.0)],
            all_probabilities: Vec::new(),
        };
        assert_eq!(result.top().map(|p| p.class_name.as_str()), Some("Cat"));
        assert_eq!(result.others().len(), 1);
        assert_eq!(result.others()[0].class_name, "Dog");
    }

    #[test]
    fn others_is_empty_without_predictions() {
        let result = ClassificationResult::default();
        assert!(result.top().is_none());
        assert!(result.others().is_empty());
    }

    #[test]
    fn consistent_result_has_no_warning() {
        let result = ClassificationResult {
            top_predictions: vec![prediction("Cat", 80.0)],
            all_probabilities: vec![probability("Dog", 15.0), probability("Cat", 80.0)],
        };
        assert!(result.consistency_warning().is_none());
    }

    #[test]
    fn mismatched_top_prediction_is_reported() {
        let result = ClassificationResult {
            top_predictions: vec![prediction("Cat", 80.0)],
            all_probabilities: vec![probability("Dog", 60.0), probability("Cat", 30.0)],
        };
        let warning = result.consistency_warning().expect("mismatch is reported");
        assert!(warning.contains("Dog"));
    }

    #[test]
    fn tied_top_prediction_is_not_reported() {
        let result = ClassificationResult {
            top_predictions: vec![prediction("Cat", 50.0)],
            all_probabilities: vec![probability("Dog", 50.0), probability("Cat", 50.0)],
        };
        assert!(result.consistency_warning().is_none());
    }
}
