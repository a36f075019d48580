#![forbid(unsafe_code)]

//! `gitfig` renders a static explanatory diagram of a `git clone` operation:
//! a remote repository panel, a local repository panel (optionally a third
//! repository) and the operation arrow between them, as standalone SVG.
//!
//! The pipeline is configuration → scenario → layout → markup; see
//! [`render::render_clone_svg`] for the one-call version.

pub use gitfig_core::*;

pub mod render {
    pub use gitfig_render::model::CloneDiagramLayout;
    pub use gitfig_render::svg::{SvgRenderOptions, render_clone_diagram_svg};
    pub use gitfig_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use gitfig_render::{Error as RenderError, LayoutOptions, layout_clone_diagram};

    use gitfig_core::{CloneScenario, DiagramConfig};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] gitfig_core::Error),
        #[error(transparent)]
        Render(#[from] gitfig_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Runs scenario expansion, layout and SVG emission in one call.
    pub fn render_clone_svg(config: &DiagramConfig, seed: u64) -> Result<String> {
        let scenario = CloneScenario::from_config(config, seed);
        let layout = layout_clone_diagram(&scenario, &LayoutOptions::default())?;
        Ok(render_clone_diagram_svg(&layout, &SvgRenderOptions::default()))
    }
}
