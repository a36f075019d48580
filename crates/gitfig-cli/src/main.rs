use gitfig::render::{
    LayoutOptions, RenderError, SvgRenderOptions, layout_clone_diagram, render_clone_diagram_svg,
};
use gitfig::{CloneScenario, DEFAULT_SEED, DiagramConfig};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Help,
    Usage(&'static str),
    Io(std::io::Error),
    Core(gitfig::Error),
    Render(RenderError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Help => write!(f, "{}", usage()),
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<gitfig::Error> for CliError {
    fn from(value: gitfig::Error) -> Self {
        Self::Core(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
}

#[derive(Debug)]
struct Args {
    command: Command,
    config: PathBuf,
    out: PathBuf,
    seed: u64,
    pretty: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Render,
            config: PathBuf::from("git_diagram_config.json"),
            out: PathBuf::from("out/git_clone_diagram.svg"),
            seed: DEFAULT_SEED,
            pretty: false,
        }
    }
}

fn usage() -> &'static str {
    "gitfig-cli\n\
\n\
USAGE:\n\
  gitfig-cli [render] [--config <path>] [--out <path>] [--seed <n>]\n\
  gitfig-cli layout [--config <path>] [--seed <n>] [--pretty]\n\
\n\
NOTES:\n\
  - The config defaults to ./git_diagram_config.json.\n\
  - render writes SVG to out/git_clone_diagram.svg by default, creating the directory.\n\
  - layout prints the computed layout model as JSON to stdout.\n\
  - --seed changes the synthetic commit ids; the default keeps output reproducible.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut out_given = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Help),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = PathBuf::from(path);
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = PathBuf::from(path);
                out_given = true;
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?;
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    // Flags only make sense for the command they belong to.
    match args.command {
        Command::Render if args.pretty => return Err(CliError::Usage(usage())),
        Command::Layout if out_given => return Err(CliError::Usage(usage())),
        _ => {}
    }

    Ok(args)
}

fn write_svg(path: &Path, svg: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, svg)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = DiagramConfig::from_path(&args.config)?;
    let scenario = CloneScenario::from_config(&config, args.seed);
    let layout = layout_clone_diagram(&scenario, &LayoutOptions::default())?;

    match args.command {
        Command::Layout => {
            if args.pretty {
                serde_json::to_writer_pretty(std::io::stdout().lock(), &layout)?;
            } else {
                serde_json::to_writer(std::io::stdout().lock(), &layout)?;
            }
            println!();
        }
        Command::Render => {
            let svg = render_clone_diagram_svg(&layout, &SvgRenderOptions::default());
            write_svg(&args.out, &svg)?;
            println!(
                "Wrote {} ({}x{} px)",
                args.out.display(),
                layout.width as u64,
                layout.height as u64
            );
        }
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Help) => {
            println!("{}", usage());
            std::process::exit(0);
        }
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
