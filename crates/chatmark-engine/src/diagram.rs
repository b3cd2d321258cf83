//! Diagram renderer collaborator.
//!
//! The pipeline's only contract with a diagram renderer is: hand it
//! sanitized source, get markup or an error back. A renderer failure is
//! contained at the call site (the block renders as an inline error with
//! both source forms for diagnosis) and never propagates as a pipeline
//! failure. Without a wired renderer the engine defers: it emits the
//! sanitized source in a `<div class="mermaid">` wrapper for a client-side
//! renderer to pick up.

#[derive(Debug, thiserror::Error)]
#[error("diagram renderer failed: {message}")]
pub struct DiagramError {
    message: String,
}

impl DiagramError {
    pub fn new(message: impl Into<String>) -> Self {
        DiagramError {
            message: message.into(),
        }
    }
}

pub trait DiagramRenderer {
    fn render(&self, source: &str) -> Result<String, DiagramError>;
}
