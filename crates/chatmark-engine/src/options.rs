/// Rendering options, mirroring the option shape the hosting UI passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Run the heuristic language detector on unlabeled code fences. When
    /// off, only explicitly tagged blocks are highlighted.
    pub autodetect: bool,
    /// Treat `mermaid`/`диаграмма` fences as diagrams. When off they render
    /// as ordinary code blocks.
    pub diagrams: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            autodetect: true,
            diagrams: true,
        }
    }
}
