//! Geometry produced by the layout pass. All coordinates are absolute canvas
//! coordinates; the SVG emitter consumes these without further measurement.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A positioned single line of text (baseline coordinates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpanLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRowLayout {
    pub label: String,
    pub depth: usize,
    pub versions: usize,
    pub text_x: f64,
    pub text_y: f64,
    pub icon_x: f64,
    pub icon_y: f64,
}

/// Working-tree or staging-area table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTableLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title_lines: Vec<TextSpanLayout>,
    pub rows: Vec<FileRowLayout>,
    pub local: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchPillLayout {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub active: bool,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitDotLayout {
    pub id: String,
    pub kind: String,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPanelLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Height of one header band; the panel draws two stacked bands.
    pub band_height: f64,
    pub branch_area_width: f64,
    /// Left edge of the refs column group.
    pub refs_x: f64,
    pub hash_x: f64,
    pub type_x: f64,
    pub pills: Vec<BranchPillLayout>,
    pub commits: Vec<CommitDotLayout>,
    pub local: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoBlockLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title: TextSpanLayout,
    pub working_tree: FileTableLayout,
    pub staging: FileTableLayout,
    pub history: HistoryPanelLayout,
    pub local: bool,
}

/// The operation indicator between the remote and local blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandArrowLayout {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloneDiagramLayout {
    /// Canvas size, already rounded up to whole pixels.
    pub width: f64,
    pub height: f64,
    pub syntax: TextSpanLayout,
    pub command: TextSpanLayout,
    pub desc_lines: Vec<TextSpanLayout>,
    pub repos: Vec<RepoBlockLayout>,
    pub arrow: CommandArrowLayout,
    pub bounds: Bounds,
}
