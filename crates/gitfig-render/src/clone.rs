//! Layout pass for the clone diagram: bottom-up sizing, top-down placement.
//!
//! Every panel is first measured from its text content (tables from their rows
//! and wrapped titles, the history panel from branch pills and commit columns),
//! then the repo blocks, the command arrow and the header are placed at
//! absolute coordinates. No geometry is recomputed during SVG emission.

use crate::model::{
    Bounds, BranchPillLayout, CloneDiagramLayout, CommandArrowLayout, CommitDotLayout,
    FileRowLayout, FileTableLayout, HistoryPanelLayout, RepoBlockLayout, TextSpanLayout,
};
use crate::text::{
    FONT_FAMILY_BODY, FONT_FAMILY_MONO, TextMeasurer, TextStyle, measure_padded, shorten_middle,
    wrap_text_px,
};
use crate::{Error, LayoutOptions, Result};
use gitfig_core::{CloneScenario, FileRow, RepoContents};

pub const SIDE_MARGIN: f64 = 24.0;
pub const TOP_MARGIN: f64 = 24.0;
pub const GAP_H: f64 = 14.0;
pub const GAP_V: f64 = 10.0;
pub const PANEL_PAD: f64 = 10.0;
pub const REPO_CORNER: f64 = 16.0;
pub const PANEL_CORNER: f64 = 10.0;

const ROW_H: f64 = 20.0;
const ROW_INDENT: f64 = 14.0;
const BAND_H: f64 = 22.0;
const MIN_COMMIT_STEP: f64 = 48.0;
const TITLE_WRAP_W: f64 = 600.0;
// Icon stack (16px + 3 offsets) plus the overflow count label.
const STACK_AREA_W: f64 = 42.0;
const MIN_BRANCH_AREA_W: f64 = 180.0;
const ARROW_HEAD_W: f64 = 12.0;
const CMD_INNER_PAD: f64 = 16.0;

pub const FS_SYNTAX: f64 = 20.0;
pub const FS_REPO_TITLE: f64 = 16.0;
pub const FS_CMD: f64 = 14.0;
pub const FS_DESC: f64 = 14.0;
pub const FS_TABLE_TITLE: f64 = 13.0;
pub const FS_BRANCH: f64 = 13.0;
pub const FS_ROW: f64 = 12.0;
pub const FS_HDR: f64 = 12.0;
pub const FS_HASH: f64 = 12.0;

fn body(font_size: f64) -> TextStyle {
    TextStyle {
        font_family: Some(FONT_FAMILY_BODY.to_string()),
        font_size,
        font_weight: None,
    }
}

fn mono(font_size: f64) -> TextStyle {
    TextStyle {
        font_family: Some(FONT_FAMILY_MONO.to_string()),
        font_size,
        font_weight: None,
    }
}

struct TableMeasure {
    width: f64,
    height: f64,
    header_height: f64,
    title_lines: Vec<String>,
}

struct HistoryMeasure {
    width: f64,
    height: f64,
    pill_width: f64,
    header_height: f64,
    branch_area_width: f64,
    hash_col_width: f64,
}

struct RepoMeasure {
    working_tree: TableMeasure,
    staging: TableMeasure,
    history: HistoryMeasure,
    panel_height: f64,
    title_height: f64,
    width: f64,
    height: f64,
}

struct CmdMeasure {
    width: f64,
    height: f64,
}

fn measure_table(title: &str, rows: &[FileRow], m: &dyn TextMeasurer) -> TableMeasure {
    let title_style = body(FS_TABLE_TITLE);
    let title_lines = wrap_text_px(m, title, &title_style, TITLE_WRAP_W);
    let mut max_line_w: f64 = 0.0;
    for line in &title_lines {
        max_line_w = max_line_w.max(measure_padded(m, line, &title_style).width);
    }
    let header_height = 18.0 + (title_lines.len() as f64 - 1.0) * 16.0;

    let row_style = body(FS_ROW);
    let mut name_w: f64 = 0.0;
    for row in rows {
        let w = row.depth as f64 * ROW_INDENT + measure_padded(m, &row.label, &row_style).width;
        name_w = name_w.max(w);
    }

    let content_w = PANEL_PAD + name_w + 20.0 + STACK_AREA_W + PANEL_PAD;
    let width = (PANEL_PAD + max_line_w + PANEL_PAD).max(content_w);
    let height = PANEL_PAD + header_height + 10.0 + rows.len() as f64 * ROW_H + PANEL_PAD;

    TableMeasure {
        width,
        height,
        header_height,
        title_lines,
    }
}

fn measure_history(repo: &RepoContents, m: &dyn TextMeasurer) -> HistoryMeasure {
    let branch_style = body(FS_BRANCH);
    let mut pill_width: f64 = 0.0;
    for branch in &repo.branches {
        pill_width = pill_width.max(measure_padded(m, branch, &branch_style).width + 20.0);
    }
    let n = repo.branches.len().max(1) as f64;
    let branch_area_width =
        (PANEL_PAD + 10.0 + n * (pill_width + 10.0) + PANEL_PAD).max(MIN_BRANCH_AREA_W);

    let hdr_style = body(FS_HDR);
    let hash_style = mono(FS_HASH);
    let mut hash_col_width = measure_padded(m, "Hash", &hdr_style).width;
    let mut type_col_width = measure_padded(m, "Type", &hdr_style).width;
    for commit in &repo.commits {
        hash_col_width = hash_col_width.max(measure_padded(m, &commit.id, &hash_style).width);
        type_col_width = type_col_width.max(measure_padded(m, &commit.kind, &hdr_style).width);
    }
    let refs_width = PANEL_PAD + 10.0 + hash_col_width + 10.0 + type_col_width + PANEL_PAD;

    let header_height = BAND_H * 2.0;
    let dag_height = repo.commits.len().max(1) as f64 * MIN_COMMIT_STEP;

    HistoryMeasure {
        width: branch_area_width + refs_width,
        height: PANEL_PAD + header_height + 10.0 + dag_height + PANEL_PAD,
        pill_width,
        header_height,
        branch_area_width,
        hash_col_width,
    }
}

fn measure_repo(repo: &RepoContents, m: &dyn TextMeasurer) -> RepoMeasure {
    let rows = repo.file_rows();
    let working_tree = measure_table(&repo.working_tree_title(), &rows, m);
    let staging = measure_table(repo.staging_title(), &rows, m);
    let history = measure_history(repo, m);

    let panel_height = working_tree
        .height
        .max(staging.height)
        .max(history.height);
    let width =
        PANEL_PAD + working_tree.width + GAP_H + staging.width + GAP_H + history.width + PANEL_PAD;
    let title_height = measure_padded(m, &repo.title, &body(FS_REPO_TITLE))
        .height
        .max(20.0);
    let height = PANEL_PAD + title_height + 8.0 + panel_height + PANEL_PAD;

    RepoMeasure {
        working_tree,
        staging,
        history,
        panel_height,
        title_height,
        width,
        height,
    }
}

fn measure_cmd(label: &str, m: &dyn TextMeasurer) -> CmdMeasure {
    let metrics = measure_padded(m, label, &mono(FS_CMD));
    CmdMeasure {
        width: (metrics.width + ARROW_HEAD_W * 2.0 + CMD_INNER_PAD * 2.0).max(80.0),
        height: (metrics.height + 14.0).max(28.0),
    }
}

fn place_table(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    meas: &TableMeasure,
    rows: &[FileRow],
    local: bool,
) -> FileTableLayout {
    let title_y = y + PANEL_PAD + 8.0;
    let title_lines = meas
        .title_lines
        .iter()
        .enumerate()
        .map(|(i, line)| TextSpanLayout {
            text: line.clone(),
            x: x + PANEL_PAD,
            y: title_y + i as f64 * 16.0,
        })
        .collect();

    let rows_y = y + PANEL_PAD + 8.0 + meas.header_height + 10.0;
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let row_top = rows_y + i as f64 * ROW_H;
            FileRowLayout {
                label: row.label.clone(),
                depth: row.depth,
                versions: row.versions,
                text_x: x + PANEL_PAD + row.depth as f64 * ROW_INDENT,
                text_y: row_top + 12.0,
                icon_x: x + width - PANEL_PAD - 26.0,
                icon_y: row_top + 4.0,
            }
        })
        .collect();

    FileTableLayout {
        x,
        y,
        width,
        height,
        title_lines,
        rows,
        local,
    }
}

fn place_history(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    repo: &RepoContents,
    meas: &HistoryMeasure,
) -> HistoryPanelLayout {
    let refs_x = x + meas.branch_area_width;
    let hash_x = refs_x + 10.0;
    let type_x = hash_x + meas.hash_col_width + 10.0;

    let mut pills = Vec::with_capacity(repo.branches.len());
    let mut pill_x = x + 10.0;
    for (i, branch) in repo.branches.iter().enumerate() {
        pills.push(BranchPillLayout {
            name: branch.clone(),
            x: pill_x,
            y: y + BAND_H + 4.0,
            width: meas.pill_width,
            height: BAND_H - 8.0,
            active: *branch == repo.active_branch,
            primary: i == 0,
        });
        pill_x += meas.pill_width + 10.0;
    }

    let dag_y = y + meas.header_height + 10.0;
    let dag_height = height - (PANEL_PAD + meas.header_height + 10.0 + PANEL_PAD);
    let n = repo.commits.len();
    let step = (dag_height / n.max(1) as f64).max(MIN_COMMIT_STEP);
    let axis_x = x + 10.0 + (meas.branch_area_width - (PANEL_PAD + 10.0 + PANEL_PAD)) / 2.0;

    // Oldest commit at the bottom, newest at the top.
    let commits = repo
        .commits
        .iter()
        .enumerate()
        .map(|(i, commit)| CommitDotLayout {
            id: commit.id.clone(),
            kind: commit.kind.clone(),
            cx: axis_x,
            cy: dag_y + dag_height - (i as f64 + 1.0) * step + 10.0,
        })
        .collect();

    HistoryPanelLayout {
        x,
        y,
        width,
        height,
        band_height: BAND_H,
        branch_area_width: meas.branch_area_width,
        refs_x,
        hash_x,
        type_x,
        pills,
        commits,
        local: repo.local,
    }
}

fn place_repo(
    x: f64,
    y: f64,
    repo: &RepoContents,
    meas: &RepoMeasure,
    m: &dyn TextMeasurer,
) -> RepoBlockLayout {
    let title_text = shorten_middle(
        m,
        &repo.title,
        &body(FS_REPO_TITLE),
        meas.width - 2.0 * PANEL_PAD,
    );
    let title = TextSpanLayout {
        text: title_text,
        x: x + PANEL_PAD,
        y: y + PANEL_PAD + 16.0,
    };

    let rows = repo.file_rows();
    let base_y = y + PANEL_PAD + meas.title_height + 8.0;
    let panel_height = meas.panel_height;

    let wt_x = x + PANEL_PAD;
    let working_tree = place_table(
        wt_x,
        base_y,
        meas.working_tree.width,
        panel_height,
        &meas.working_tree,
        &rows,
        repo.local,
    );
    let staging_x = wt_x + meas.working_tree.width + GAP_H;
    let staging = place_table(
        staging_x,
        base_y,
        meas.staging.width,
        panel_height,
        &meas.staging,
        &rows,
        repo.local,
    );
    let history_x = staging_x + meas.staging.width + GAP_H;
    let history = place_history(
        history_x,
        base_y,
        meas.history.width,
        panel_height,
        repo,
        &meas.history,
    );

    RepoBlockLayout {
        x,
        y,
        width: meas.width,
        height: meas.height,
        title,
        working_tree,
        staging,
        history,
        local: repo.local,
    }
}

fn validate(scenario: &CloneScenario) -> Result<()> {
    let repos = [Some(&scenario.remote), Some(&scenario.local), scenario.third.as_ref()];
    for repo in repos.into_iter().flatten() {
        if repo.branches.is_empty() {
            return Err(Error::InvalidScenario {
                message: format!("repository {:?} has no branches", repo.title),
            });
        }
        if repo.repo_name.is_empty() {
            return Err(Error::InvalidScenario {
                message: "repository name must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

pub fn layout_clone_diagram(
    scenario: &CloneScenario,
    options: &LayoutOptions,
) -> Result<CloneDiagramLayout> {
    validate(scenario)?;
    let m = options.text_measurer.as_ref();

    let remote_meas = measure_repo(&scenario.remote, m);
    let local_meas = measure_repo(&scenario.local, m);
    let third_meas = scenario.third.as_ref().map(|repo| measure_repo(repo, m));
    let cmd = measure_cmd(&scenario.operation_label, m);

    let two_panel_width = SIDE_MARGIN
        + remote_meas.width
        + GAP_H
        + cmd.width
        + GAP_H
        + local_meas.width
        + SIDE_MARGIN;
    let mut total_width = two_panel_width;
    if let Some(third) = &third_meas {
        total_width += GAP_H + third.width;
    }

    // Header: syntax line, the (possibly shortened) command, wrapped
    // description. The header wraps at the two-panel width, so adding the
    // optional third block never reflows it or shifts the blocks below.
    let header_max_w = two_panel_width - 2.0 * SIDE_MARGIN;
    let cmd_style = mono(FS_CMD);
    let short_cmd = shorten_middle(m, &scenario.command_line, &cmd_style, header_max_w);
    let desc_style = body(FS_DESC);
    let desc_lines = wrap_text_px(m, &scenario.description, &desc_style, header_max_w);

    let mut y = TOP_MARGIN + 8.0;
    let syntax = TextSpanLayout {
        text: scenario.syntax_line.clone(),
        x: SIDE_MARGIN,
        y,
    };
    y += m.measure(&scenario.syntax_line, &body(FS_SYNTAX)).height + 4.0;
    let command = TextSpanLayout {
        text: short_cmd.clone(),
        x: SIDE_MARGIN,
        y,
    };
    y += m.measure(&short_cmd, &cmd_style).height + 4.0;

    let mut desc_spans = Vec::with_capacity(desc_lines.len());
    for line in &desc_lines {
        desc_spans.push(TextSpanLayout {
            text: line.clone(),
            x: SIDE_MARGIN,
            y,
        });
        y += m.measure(line, &desc_style).height + 4.0;
    }

    let repos_y = y + GAP_V;
    let mut repos_h = remote_meas.height.max(local_meas.height);
    if let Some(third) = &third_meas {
        repos_h = repos_h.max(third.height);
    }
    let total_height = repos_y + repos_h + TOP_MARGIN;

    let mut x = SIDE_MARGIN;
    let mut repos = Vec::with_capacity(3);
    repos.push(place_repo(x, repos_y, &scenario.remote, &remote_meas, m));
    x += remote_meas.width + GAP_H;

    let arrow_cy = repos_y + PANEL_PAD + 16.0 + cmd.height / 2.0;
    let arrow = CommandArrowLayout {
        x1: x,
        y1: arrow_cy,
        x2: x + cmd.width,
        y2: arrow_cy,
        label: scenario.operation_label.clone(),
        label_x: x + cmd.width / 2.0,
        label_y: arrow_cy - 8.0,
    };
    x += cmd.width + GAP_H;

    repos.push(place_repo(x, repos_y, &scenario.local, &local_meas, m));
    x += local_meas.width;

    if let (Some(third), Some(meas)) = (scenario.third.as_ref(), third_meas.as_ref()) {
        x += GAP_H;
        repos.push(place_repo(x, repos_y, third, meas, m));
    }

    let width = total_width.ceil();
    let height = total_height.ceil();
    tracing::debug!(width, height, repos = repos.len(), "clone diagram laid out");

    Ok(CloneDiagramLayout {
        width,
        height,
        syntax,
        command,
        desc_lines: desc_spans,
        repos,
        arrow,
        bounds: Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        },
    })
}
