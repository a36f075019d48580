use gitfig_core::{CloneScenario, DEFAULT_SEED, DiagramConfig};
use gitfig_render::svg::{SvgRenderOptions, render_clone_diagram_svg};
use gitfig_render::{LayoutOptions, layout_clone_diagram};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn render_fixture(name: &str, seed: u64) -> String {
    let path = workspace_root().join("fixtures").join(name);
    let config = DiagramConfig::from_path(&path).expect("fixture config");
    let scenario = CloneScenario::from_config(&config, seed);
    let layout = layout_clone_diagram(&scenario, &LayoutOptions::default()).expect("layout ok");
    render_clone_diagram_svg(&layout, &SvgRenderOptions::default())
}

#[test]
fn renders_basic_fixture() {
    let svg = render_fixture("clone_basic.json", DEFAULT_SEED);
    assert!(svg.starts_with("<svg id=\"gitfig\""));
    assert!(svg.ends_with("</svg>\n"));
    assert!(svg.contains("viewBox=\"0 0 "));
    assert!(svg.contains("<marker id=\"gitfig-arrow-open\""));
    assert!(svg.contains("marker-end=\"url(#gitfig-arrow-open)\""));
    assert!(svg.contains("git clone &lt;URL&gt; [dir]"));
    assert!(svg.contains(">clone</text>"));
    assert!(svg.contains("Remote Repository git.example.com"));
    assert!(svg.contains(".git (Index &amp; Staging Area)"));
}

#[test]
fn one_element_per_line() {
    let svg = render_fixture("clone_basic.json", DEFAULT_SEED);
    for line in svg.lines() {
        assert!(
            line.starts_with('<'),
            "expected one element per line, got: {line:?}"
        );
    }
}

#[test]
fn rerender_is_byte_identical() {
    let a = render_fixture("clone_third_repo.json", DEFAULT_SEED);
    let b = render_fixture("clone_third_repo.json", DEFAULT_SEED);
    assert_eq!(a, b);
}

#[test]
fn seed_changes_commit_ids_only() {
    let a = render_fixture("clone_basic.json", 1);
    let b = render_fixture("clone_basic.json", 7);
    assert_ne!(a, b);
    // Geometry is derived from fixed-length ids, so the shape of both
    // documents matches line for line.
    assert_eq!(a.lines().count(), b.lines().count());
}

#[test]
fn commit_dots_and_version_stacks_use_white_fill() {
    let svg = render_fixture("clone_basic.json", DEFAULT_SEED);
    assert!(svg.contains(r##"<circle"##));
    assert!(svg.contains(r##" fill="#fff" stroke="#111" stroke-width="3"/>"##));
    assert!(svg.contains(r##"width="16" height="10" fill="#fff""##));
}

#[test]
fn third_repo_fixture_renders_extra_panel() {
    let svg = render_fixture("clone_third_repo.json", DEFAULT_SEED);
    assert!(svg.contains("Fork: bob/webapp"));
    assert!(svg.contains(">feature/login</text>"));
}

#[test]
fn config_strings_are_xml_escaped() {
    let config = DiagramConfig::from_json(
        r#"{
            "RemoteServer": "host<&>.example",
            "RemoteUser": "alice",
            "RemoteRepoName": "web\"app",
            "LocalBaseDir": "/home/alice",
            "LocalRepoName": "webapp"
        }"#,
    )
    .expect("config");
    let scenario = CloneScenario::from_config(&config, DEFAULT_SEED);
    let layout = layout_clone_diagram(&scenario, &LayoutOptions::default()).expect("layout ok");
    let svg = render_clone_diagram_svg(&layout, &SvgRenderOptions::default());

    assert!(svg.contains("host&lt;&amp;&gt;.example"));
    assert!(svg.contains("web&quot;app"));
    assert!(!svg.contains("host<&>"));
}

#[test]
fn custom_diagram_id_prefixes_marker() {
    let path = workspace_root().join("fixtures").join("clone_basic.json");
    let config = DiagramConfig::from_path(&path).expect("fixture config");
    let scenario = CloneScenario::from_config(&config, DEFAULT_SEED);
    let layout = layout_clone_diagram(&scenario, &LayoutOptions::default()).expect("layout ok");
    let svg = render_clone_diagram_svg(
        &layout,
        &SvgRenderOptions {
            diagram_id: Some("fig-1".to_string()),
        },
    );
    assert!(svg.starts_with("<svg id=\"fig-1\""));
    assert!(svg.contains("url(#fig-1-arrow-open)"));
}
