//! Error types for the share-card pipeline.

use thiserror::Error;
use wishcard_canvas2d::CanvasError;

/// Result type alias using CardError.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur while producing a share card.
///
/// Recovery policy:
/// - `Network` is recovered at the resolver boundary by falling back to the
///   default redirect URL; it never reaches the share flow.
/// - `Encoding` is recovered inside the compositor by rendering the textual
///   fallback block; it never blocks card delivery.
/// - `Render` and `Task` are fatal to the generation attempt.
#[derive(Debug, Error)]
pub enum CardError {
    /// The redirect endpoint request failed (transport, status, or body).
    #[error("redirect request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// QR symbol encoding failed (e.g. payload exceeds symbol capacity).
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    /// A canvas operation failed while compositing the card.
    #[error("card rendering failed: {0}")]
    Render(#[from] CanvasError),

    /// The blocking render task could not be joined.
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
