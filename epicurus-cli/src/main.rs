use std::fs::File;
use std::io::{BufReader, IsTerminal as _};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Parser, Debug)]
#[command(name = "epicurus", version, about = "Layer-based raster image editor")]
struct Cli {
    /// Editor options JSON (`threads`, `default_blur_radius`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override rayon worker threads for pixel loops.
    #[arg(long)]
    threads: Option<usize>,

    /// Radius used by `blur` when none is given.
    #[arg(long)]
    blur_radius: Option<u32>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut opts = match &cli.config {
        Some(path) => epicurus::EditorOpts::from_path(path)?,
        None => epicurus::EditorOpts::default(),
    };
    if let Some(n) = cli.threads {
        opts.threads = Some(n);
    }
    if let Some(r) = cli.blur_radius {
        opts.default_blur_radius = r;
    }
    let mut editor = epicurus::Editor::new(opts)?;

    match &cli.script {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
            repl::run(&mut editor, BufReader::new(f), false)
        }
        None => {
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("Epicurus Editor");
            }
            repl::run(&mut editor, stdin.lock(), interactive)
        }
    }
}
