//! SVG emission for a laid-out clone diagram.
//!
//! The emitter is intentionally dumb: it walks the layout structs and writes
//! one element per line into a `String`. All numbers go through [`fmt`] so the
//! output stays stable and free of float noise.

use crate::clone::{PANEL_CORNER, REPO_CORNER};
use crate::model::{
    CloneDiagramLayout, CommandArrowLayout, FileTableLayout, HistoryPanelLayout, RepoBlockLayout,
};
use std::fmt::Write as _;

const STROKE_REPO: &str = "#5B4B8A";
const COL_REMOTE: &str = "#111";
const COL_LOCAL: &str = "#1B9E77";
const FILL_LOCAL: &str = "#F8FFFB";
const FILL_PLAIN: &str = "#fff";
const COL_MUTED: &str = "#333";
const BAND_FILL: &str = "#F0F0FF";
const PILL_BG_PRIMARY: &str = "#E3F2FD";
const PILL_BG: &str = "#EEE";

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `id` of the SVG; also prefixes the marker id so several diagrams
    /// can be inlined into the same document.
    pub diagram_id: Option<String>,
}

fn accent(local: bool) -> &'static str {
    if local { COL_LOCAL } else { COL_REMOTE }
}

fn panel_fill(local: bool) -> &'static str {
    if local { FILL_LOCAL } else { FILL_PLAIN }
}

/// Stringifies a coordinate the way browsers do: round-trippable decimal form,
/// no `-0`, near-integers snapped to integers.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

struct TextAttrs<'a> {
    font_size: f64,
    bold: bool,
    color: &'a str,
    middle: bool,
    mono: bool,
}

impl Default for TextAttrs<'_> {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            bold: false,
            color: COL_REMOTE,
            middle: false,
            mono: false,
        }
    }
}

fn write_text(out: &mut String, x: f64, y: f64, text: &str, attrs: &TextAttrs<'_>) {
    let class = if attrs.mono { "mono" } else { "body" };
    let weight = if attrs.bold { " font-weight=\"bold\"" } else { "" };
    let anchor = if attrs.middle {
        " text-anchor=\"middle\""
    } else {
        ""
    };
    let _ = writeln!(
        out,
        r#"<text class="{class}" x="{x}" y="{y}" font-size="{fs}"{weight} fill="{color}"{anchor}>{text}</text>"#,
        x = fmt(x),
        y = fmt(y),
        fs = fmt(attrs.font_size),
        color = attrs.color,
        text = escape_xml(text),
    );
}

fn write_rect(
    out: &mut String,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    rx: f64,
    fill: &str,
    stroke: Option<(&str, f64)>,
) {
    let stroke_attrs = match stroke {
        Some((color, width)) => format!(r#" stroke="{color}" stroke-width="{}""#, fmt(width)),
        None => String::new(),
    };
    let _ = writeln!(
        out,
        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" ry="{rx}" fill="{fill}"{stroke_attrs}/>"#,
        x = fmt(x),
        y = fmt(y),
        w = fmt(w),
        h = fmt(h),
        rx = fmt(rx),
    );
}

fn write_line(
    out: &mut String,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    stroke: &str,
    width: f64,
    marker_end: Option<&str>,
) {
    let marker = match marker_end {
        Some(id) => format!(r#" marker-end="url(#{id})""#),
        None => String::new(),
    };
    let _ = writeln!(
        out,
        r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{w}"{marker}/>"#,
        x1 = fmt(x1),
        y1 = fmt(y1),
        x2 = fmt(x2),
        y2 = fmt(y2),
        w = fmt(width),
    );
}

fn write_circle(out: &mut String, cx: f64, cy: f64, r: f64, stroke: &str, width: f64) {
    let _ = writeln!(
        out,
        r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="#fff" stroke="{stroke}" stroke-width="{w}"/>"##,
        cx = fmt(cx),
        cy = fmt(cy),
        r = fmt(r),
        w = fmt(width),
    );
}

fn write_file_table(out: &mut String, table: &FileTableLayout) {
    let color = accent(table.local);
    write_rect(
        out,
        table.x,
        table.y,
        table.width,
        table.height,
        PANEL_CORNER,
        panel_fill(table.local),
        Some((color, 2.0)),
    );
    for line in &table.title_lines {
        write_text(
            out,
            line.x,
            line.y,
            &line.text,
            &TextAttrs {
                font_size: 13.0,
                bold: true,
                color,
                ..Default::default()
            },
        );
    }
    for row in &table.rows {
        write_text(
            out,
            row.text_x,
            row.text_y,
            &row.label,
            &TextAttrs {
                font_size: 12.0,
                color,
                ..Default::default()
            },
        );
        if row.versions > 0 {
            for i in 0..row.versions.min(4) {
                let offset = i as f64 * 2.0;
                let _ = writeln!(
                    out,
                    r##"<rect x="{x}" y="{y}" width="16" height="10" fill="#fff" stroke="{color}" stroke-width="1"/>"##,
                    x = fmt(row.icon_x + offset),
                    y = fmt(row.icon_y + offset),
                );
            }
            if row.versions > 4 {
                write_text(
                    out,
                    row.icon_x - 22.0,
                    row.icon_y + 8.0,
                    &format!("x{}", row.versions),
                    &TextAttrs {
                        font_size: 11.0,
                        color,
                        ..Default::default()
                    },
                );
            }
        }
    }
}

fn write_history_panel(out: &mut String, panel: &HistoryPanelLayout) {
    let color = accent(panel.local);
    write_rect(
        out,
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        PANEL_CORNER,
        panel_fill(panel.local),
        Some((color, 2.0)),
    );
    for (i, opacity) in ["0.7", "0.5"].iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{BAND_FILL}" opacity="{opacity}"/>"#,
            x = fmt(panel.x),
            y = fmt(panel.y + i as f64 * panel.band_height),
            w = fmt(panel.width),
            h = fmt(panel.band_height),
        );
    }

    let hdr_bold = TextAttrs {
        font_size: 13.0,
        bold: true,
        ..Default::default()
    };
    let col_bold = TextAttrs {
        font_size: 12.0,
        bold: true,
        ..Default::default()
    };
    let band = panel.band_height;
    write_text(out, panel.x + 10.0, panel.y + band - 6.0, "Branch", &hdr_bold);
    write_text(out, panel.hash_x, panel.y + band - 6.0, "Refs", &hdr_bold);
    write_text(out, panel.hash_x, panel.y + 2.0 * band - 6.0, "Hash", &col_bold);
    write_text(out, panel.type_x, panel.y + 2.0 * band - 6.0, "Type", &col_bold);

    for pill in &panel.pills {
        let bg = if pill.primary { PILL_BG_PRIMARY } else { PILL_BG };
        write_rect(out, pill.x, pill.y, pill.width, pill.height, 6.0, bg, None);
        write_text(
            out,
            pill.x + pill.width / 2.0,
            pill.y + pill.height * 0.7,
            &pill.name,
            &TextAttrs {
                font_size: 13.0,
                bold: pill.active,
                middle: true,
                ..Default::default()
            },
        );
    }

    for pair in panel.commits.windows(2) {
        write_line(out, pair[0].cx, pair[0].cy, pair[1].cx, pair[1].cy, color, 3.0, None);
    }
    for commit in &panel.commits {
        write_circle(out, commit.cx, commit.cy, 8.0, color, 3.0);
        write_text(
            out,
            panel.hash_x,
            commit.cy + 4.0,
            &commit.id,
            &TextAttrs {
                font_size: 12.0,
                color,
                mono: true,
                ..Default::default()
            },
        );
        write_text(
            out,
            panel.type_x,
            commit.cy + 4.0,
            &commit.kind,
            &TextAttrs {
                font_size: 12.0,
                color,
                ..Default::default()
            },
        );
    }
}

fn write_repo_block(out: &mut String, repo: &RepoBlockLayout) {
    write_rect(
        out,
        repo.x,
        repo.y,
        repo.width,
        repo.height,
        REPO_CORNER,
        FILL_PLAIN,
        Some((STROKE_REPO, 2.0)),
    );
    write_text(
        out,
        repo.title.x,
        repo.title.y,
        &repo.title.text,
        &TextAttrs {
            font_size: 16.0,
            bold: true,
            ..Default::default()
        },
    );
    write_file_table(out, &repo.working_tree);
    write_file_table(out, &repo.staging);
    write_history_panel(out, &repo.history);
}

fn write_arrow(out: &mut String, arrow: &CommandArrowLayout, marker_id: &str) {
    write_line(
        out,
        arrow.x1,
        arrow.y1,
        arrow.x2,
        arrow.y2,
        COL_REMOTE,
        2.0,
        Some(marker_id),
    );
    write_text(
        out,
        arrow.label_x,
        arrow.label_y,
        &arrow.label,
        &TextAttrs {
            font_size: 13.0,
            middle: true,
            mono: true,
            ..Default::default()
        },
    );
}

pub fn render_clone_diagram_svg(layout: &CloneDiagramLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("gitfig");
    let diagram_id_esc = escape_xml(diagram_id);
    let marker_id = format!("{diagram_id_esc}-arrow-open");

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg id="{diagram_id_esc}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(layout.width),
        h = fmt(layout.height),
    );
    out.push_str("<defs>\n");
    let _ = writeln!(
        &mut out,
        r#"<marker id="{marker_id}" markerUnits="userSpaceOnUse" markerWidth="12" markerHeight="10" refX="12" refY="5" orient="auto">"#,
    );
    out.push_str(
        "<path d=\"M1,1 L11,5 L1,9\" fill=\"none\" stroke=\"#111\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
    );
    out.push_str("</marker>\n");
    out.push_str(
        "<style>.body{font-family:Segoe UI, Arial, sans-serif}.mono{font-family:Consolas, Cascadia Mono, monospace}</style>\n",
    );
    out.push_str("</defs>\n");

    write_text(
        &mut out,
        layout.syntax.x,
        layout.syntax.y,
        &layout.syntax.text,
        &TextAttrs {
            font_size: 20.0,
            bold: true,
            ..Default::default()
        },
    );
    write_text(
        &mut out,
        layout.command.x,
        layout.command.y,
        &layout.command.text,
        &TextAttrs {
            font_size: 14.0,
            color: COL_MUTED,
            mono: true,
            ..Default::default()
        },
    );
    for line in &layout.desc_lines {
        write_text(
            &mut out,
            line.x,
            line.y,
            &line.text,
            &TextAttrs {
                font_size: 14.0,
                color: COL_MUTED,
                ..Default::default()
            },
        );
    }

    for repo in &layout.repos {
        write_repo_block(&mut out, repo);
    }
    write_arrow(&mut out, &layout.arrow, &marker_id);

    out.push_str("</svg>\n");
    out
}
