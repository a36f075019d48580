use gitfig::render::render_clone_svg;
use gitfig::{DEFAULT_SEED, DiagramConfig};

fn config() -> DiagramConfig {
    DiagramConfig::from_json(
        r#"{
            "RemoteServer": "github.com",
            "RemoteUser": "octo",
            "RemoteRepoName": "demo",
            "LocalBaseDir": "/home/octo",
            "LocalRepoName": "demo"
        }"#,
    )
    .expect("config")
}

#[test]
fn one_call_pipeline_produces_svg() {
    let svg = render_clone_svg(&config(), DEFAULT_SEED).expect("render");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Remote Repository github.com"));
    assert!(svg.contains("Local: /home/octo/demo"));
}

#[test]
fn one_call_pipeline_is_deterministic() {
    let a = render_clone_svg(&config(), DEFAULT_SEED).expect("render");
    let b = render_clone_svg(&config(), DEFAULT_SEED).expect("render");
    assert_eq!(a, b);
}
