use thiserror::Error;

use crate::domain::market_data::SourceKind;

/// Why a raw data point was rejected by series validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("non-finite price field")]
    NonFinitePrice,
    #[error("open and close must be positive")]
    NonPositivePrice,
    #[error("high is below low")]
    InvertedRange,
    #[error("high does not enclose the open/close body")]
    HighBelowBody,
    #[error("low does not enclose the open/close body")]
    LowAboveBody,
}

/// Per-source failure, recorded by the acquisition chain and never
/// surfaced individually to the caller.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("no valid data points after normalization")]
    EmptyDataset,
}

/// Terminal acquisition failure: every live source failed and synthetic
/// generation was disabled. The only error the embedding page ever sees.
#[derive(Debug, Clone, Error)]
#[error("all data sources exhausted: {}", summarize_failures(.failures))]
pub struct AllSourcesExhausted {
    pub failures: Vec<(SourceKind, SourceError)>,
}

pub fn summarize_failures(failures: &[(SourceKind, SourceError)]) -> String {
    if failures.is_empty() {
        return "no sources attempted".to_string();
    }
    failures
        .iter()
        .map(|(kind, err)| format!("{kind}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Canvas-side failures. The rendering pipeline itself never errors;
/// only the command executor talking to the browser can.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("canvas element not found: {0}")]
    CanvasNotFound(String),
    #[error("canvas 2d context unavailable")]
    ContextUnavailable,
    #[error("draw call failed: {0}")]
    Draw(String),
}
