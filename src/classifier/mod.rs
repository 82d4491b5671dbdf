// SPDX-License-Identifier: MPL-2.0
//! Inference service integration.
//!
//! - [`types`] - Class metadata, predictions and the JSON payloads of the service
//! - [`client`] - HTTP client for `/api/model-info`, `/api/upload` and `/api/test-prediction`
//! - [`fallback`] - Synthetic results shown when the real classification fails

pub mod client;
pub mod fallback;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    ClassCatalog, ClassInfo, ClassProbability, ClassificationResult, ModelInfo, Prediction,
    TestPrediction,
};
