//! Error types for canvas operations
//!
//! Invalid geometry is not an error here: degenerate gestures resolve to
//! no-ops. These variants cover API misuse, configuration loading and
//! failures raised by host listeners.

use crate::scene::ShapeId;
use thiserror::Error;

/// Errors that can occur while driving a canvas
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Matrix has no inverse
    #[error("Singular matrix (determinant {determinant})")]
    SingularMatrix { determinant: f64 },

    /// Shape id not present in the scene
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// Operation requires a group or selection container
    #[error("Shape {0} is not a container")]
    NotAContainer(ShapeId),

    /// Shape already belongs to a group or selection
    #[error("Shape {0} already belongs to a container")]
    AlreadyInContainer(ShapeId),

    /// Grouping needs at least one member
    #[error("Cannot build a group without members")]
    EmptyGroup,

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// One or more listeners returned an error during notification fan-out
    #[error("{} listener(s) failed while handling `{event}`", failures.len())]
    Listeners {
        event: String,
        failures: Vec<anyhow::Error>,
    },
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

impl CanvasError {
    /// Folds several listener failures into one error, keeping every cause.
    pub fn merge_listener_failures(errors: Vec<CanvasError>) -> Option<CanvasError> {
        let mut events: Vec<String> = Vec::new();
        let mut failures = Vec::new();
        for error in errors {
            match error {
                CanvasError::Listeners { event, failures: mut inner } => {
                    if !events.contains(&event) {
                        events.push(event);
                    }
                    failures.append(&mut inner);
                }
                other => failures.push(anyhow::Error::new(other)),
            }
        }
        if failures.is_empty() {
            return None;
        }
        Some(CanvasError::Listeners {
            event: events.join(", "),
            failures,
        })
    }

    /// The listener failures carried by this error, if any.
    pub fn listener_failures(&self) -> &[anyhow::Error] {
        match self {
            CanvasError::Listeners { failures, .. } => failures,
            _ => &[],
        }
    }
}
