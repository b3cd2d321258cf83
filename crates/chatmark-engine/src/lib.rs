//! Streamed-Markdown to safe-HTML rendering for chat transcripts.
//!
//! Input is untrusted assistant output. The engine's safety contract is
//! that every byte of the input either passes through [`escape_html`] or is
//! placed inside a placeholder region whose expansion escapes it itself;
//! raw input text never reaches the output as markup. See [`render`] for
//! the stage chain.
//!
//! [`escape_html`]: escape::escape_html
//! [`render`]: Renderer::render

pub mod diagram;
pub mod escape;
pub mod mermaid;
pub mod normalize;
pub mod options;
pub mod placeholder;
pub mod render;

pub use diagram::{DiagramError, DiagramRenderer};
pub use options::RenderOptions;
pub use render::{Renderer, highlight, render_markdown};
