// SPDX-License-Identifier: MPL-2.0
//! Synthetic classification results for the degraded demo mode.
//!
//! When the real classification fails, the service's test prediction becomes
//! the top entry and every known class gets a random probability so that all
//! result views still have something to draw. The numbers carry no meaning.

use super::types::{ClassCatalog, ClassProbability, ClassificationResult, Prediction, TestPrediction};
use rand::Rng;

/// Color of the synthetic top prediction.
pub const FALLBACK_COLOR: &str = "#6366f1";

/// Description of the synthetic top prediction.
pub const FALLBACK_DESCRIPTION: &str = "Test prediction using random input";

/// Builds a displayable result from a test prediction.
///
/// `all_probabilities` holds one entry per catalog class with a uniform random
/// value in `[0, 100)`, sorted from most to least probable.
pub fn synthesize<R: Rng + ?Sized>(
    prediction: &TestPrediction,
    catalog: &ClassCatalog,
    rng: &mut R,
) -> ClassificationResult {
    let top = Prediction {
        class_name: prediction.class_name.clone(),
        emoji: prediction.emoji.clone(),
        confidence: prediction.confidence,
        color: FALLBACK_COLOR.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
    };

    let mut all_probabilities: Vec<ClassProbability> = catalog
        .iter()
        .map(|class| ClassProbability {
            class_name: class.key.clone(),
            probability: rng.gen_range(0.0..100.0),
            color: class.color.clone(),
        })
        .collect();
    all_probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    ClassificationResult {
        top_predictions: vec![top],
        all_probabilities,
    }
}
