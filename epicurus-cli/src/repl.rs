use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use epicurus::Editor;

/// One REPL line: the first token names the command.
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    cmd: ReplCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ReplCommand {
    /// Load an image file as a new top layer.
    Load { path: PathBuf, name: String },
    /// Shrink a layer to fit inside WIDTH x HEIGHT, keeping its aspect ratio.
    Resize { name: String, width: u32, height: u32 },
    /// Write a layer to an image file (format from the extension).
    Export { name: String, path: PathBuf },
    /// Remove a layer.
    Delete { name: String },
    /// List layers, bottom first.
    List {
        /// Print a JSON array instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Add a scalar to every RGB channel.
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Subtract a scalar from every RGB channel.
    Sub {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Multiply every RGB channel by a scalar.
    Mul {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Divide every RGB channel by a scalar.
    Div {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Add OPERAND's pixels into TARGET.
    AddLayer { target: String, operand: String },
    /// Multiply TARGET's pixels by OPERAND's.
    MulLayer { target: String, operand: String },
    /// Blend TOP onto BOTTOM with ALPHA in [0, 1]; the result replaces BOTTOM.
    Blend {
        bottom: String,
        top: String,
        #[arg(allow_negative_numbers = true)]
        alpha: f32,
    },
    /// Gaussian blur (default radius from the session options).
    Blur {
        name: String,
        #[arg(allow_negative_numbers = true)]
        radius: Option<i64>,
    },
    /// Edge detection.
    Edges { name: String },
    /// Set a layer's merge alpha in [0, 1].
    Alpha {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Set a layer's position offset.
    Move {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Flatten every layer onto the bottom one.
    Merge,
    /// Leave the editor.
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Read commands until end of input or `quit`. Failed commands are reported and skipped.
pub(crate) fn run<R: BufRead>(
    editor: &mut Editor,
    input: R,
    interactive: bool,
) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    prompt(&mut stdout, interactive)?;
    for line in input.lines() {
        let line = line.context("read command line")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !tokens.is_empty() {
            match Line::try_parse_from(tokens) {
                Ok(Line { cmd }) => match execute(editor, cmd, &mut stdout) {
                    Ok(Flow::Quit) => return Ok(()),
                    Ok(Flow::Continue) => {}
                    Err(e) => {
                        tracing::warn!(line = %line, error = %format!("{e:#}"), "command failed");
                        eprintln!("error: {e:#}");
                    }
                },
                Err(e) => {
                    if is_usage_error(&e) {
                        tracing::warn!(line = %line, error = %e.kind(), "command rejected");
                    }
                    e.print().context("print usage")?;
                }
            }
        }
        prompt(&mut stdout, interactive)?;
    }
    Ok(())
}

/// Help and version requests also surface as parse errors but are not failures.
fn is_usage_error(e: &clap::Error) -> bool {
    e.use_stderr()
}

fn prompt(out: &mut impl Write, interactive: bool) -> anyhow::Result<()> {
    if interactive {
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

fn execute(editor: &mut Editor, cmd: ReplCommand, out: &mut impl Write) -> anyhow::Result<Flow> {
    match cmd {
        ReplCommand::Load { path, name } => {
            editor.load_layer_from_path(&path, &name)?;
        }
        ReplCommand::Resize {
            name,
            width,
            height,
        } => editor.resize(&name, width, height)?,
        ReplCommand::Export { name, path } => {
            editor.export_to_path(&name, &path)?;
            eprintln!("wrote {}", path.display());
        }
        ReplCommand::Delete { name } => {
            editor.delete_layer(&name)?;
        }
        ReplCommand::List { json } => {
            if json {
                let infos: Vec<_> = editor.list().collect();
                writeln!(out, "{}", serde_json::to_string(&infos)?)?;
            } else {
                for info in editor.list() {
                    writeln!(
                        out,
                        "{} (sized at ({}, {})) at ({}, {}) alpha {:.2}",
                        info.name,
                        info.width,
                        info.height,
                        info.position.x,
                        info.position.y,
                        info.alpha
                    )?;
                }
            }
        }
        ReplCommand::Add { name, value } => editor.add_scalar(&name, value)?,
        ReplCommand::Sub { name, value } => editor.sub_scalar(&name, value)?,
        ReplCommand::Mul { name, value } => editor.mul_scalar(&name, value)?,
        ReplCommand::Div { name, value } => editor.div_scalar(&name, value)?,
        ReplCommand::AddLayer { target, operand } => editor.add_layer(&target, &operand)?,
        ReplCommand::MulLayer { target, operand } => editor.mul_layer(&target, &operand)?,
        ReplCommand::Blend { bottom, top, alpha } => editor.blend_layers(&bottom, &top, alpha)?,
        ReplCommand::Blur { name, radius } => editor.blur(&name, radius)?,
        ReplCommand::Edges { name } => editor.detect_edges(&name)?,
        ReplCommand::Alpha { name, value } => editor.set_alpha(&name, value)?,
        ReplCommand::Move { name, x, y } => editor.set_position(&name, x, y)?,
        ReplCommand::Merge => {
            editor.merge_down()?;
        }
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
#[path = "../tests/unit/repl.rs"]
mod tests;
