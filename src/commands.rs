//! Subcommands and their execution against an [`EngineCore`].
//!
//! Each invocation opens one canvas, applies one operation through the same
//! engine calls the browser uses, and prints the result. Everything the
//! engine writes goes through its normal save path.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::io::{self, Write};

use canvas::connector::{Rect, connector_path};
use canvas::engine::EngineCore;
use canvas::error::EngineError;
use canvas::note::NoteId;
use canvas::prompt::UserPrompt;
use canvas::store::KeyValueStore;
use canvas::transform::{Point, Transform, ZoomDelta};
use clap::{Args, Subcommand};
use rand::Rng;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no canvas named {0:?}; see `stickyboard list`")]
    UnknownCanvas(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCanvas(_) => "E_UNKNOWN_CANVAS",
            Self::Engine(e) => e.error_code(),
            Self::Io(_) => "E_IO",
            Self::InvalidJson(_) => "E_SERIALIZE",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stored canvases.
    List,
    /// Print a canvas's transform and notes.
    Show {
        canvas: String,
        /// Print the stored JSON document instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Start a new canvas (asks for a name when none is given). An existing
    /// name opens that canvas.
    New { name: Option<String> },
    /// Rename a canvas; restricted characters are stripped.
    Rename { canvas: String, title: String },
    /// Delete a canvas after confirmation.
    Delete {
        canvas: String,
        /// Skip the confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Note operations.
    Note(NoteCommand),
    /// Pan a canvas by a screen-space delta.
    #[command(allow_negative_numbers = true)]
    Pan { canvas: String, dx: f64, dy: f64 },
    /// Zoom a canvas.
    Zoom {
        canvas: String,
        #[command(subcommand)]
        how: ZoomCommand,
    },
    /// Print the SVG connector path between two notes.
    Link { canvas: String, from: NoteId, to: NoteId },
}

#[derive(Args, Debug)]
pub struct NoteCommand {
    #[command(subcommand)]
    command: NoteSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NoteSubcommand {
    /// Add a note at the viewport center.
    Add {
        canvas: String,
        /// Initial rich-text content.
        #[arg(long)]
        content: Option<String>,
    },
    /// Move a note to a canvas-space position.
    #[command(allow_negative_numbers = true)]
    Move { canvas: String, id: NoteId, top: f64, left: f64 },
    /// Resize a note (clamped to the allowed range).
    Resize { canvas: String, id: NoteId, width: f64, height: f64 },
    /// Recolor a note (`#rrggbb`).
    Color { canvas: String, id: NoteId, color: String },
    /// Replace a note's content.
    Edit { canvas: String, id: NoteId, content: String },
    /// Delete a note.
    Rm { canvas: String, id: NoteId },
}

#[derive(Subcommand, Debug)]
pub enum ZoomCommand {
    /// One zoom-in button press.
    In,
    /// One zoom-out button press.
    Out,
    /// One wheel tick; positive delta zooms out.
    #[command(allow_negative_numbers = true)]
    Wheel { delta_y: f64 },
    /// Pinch by a distance ratio.
    Pinch { ratio: f64 },
}

/// Run one command. Text prompts and confirmations go through `prompt`;
/// results are written to `out`.
pub fn run<S, R>(
    command: Command,
    core: &mut EngineCore<S>,
    prompt: &mut dyn UserPrompt,
    rng: &mut R,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    S: KeyValueStore,
    R: Rng,
{
    debug!(?command, "running command");
    match command {
        Command::List => {
            for name in core.canvas_names() {
                writeln!(out, "{name}")?;
            }
        }
        Command::Show { canvas, json } => {
            open(core, &canvas)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(core.document())?)?;
            } else {
                write_summary(core, &canvas, out)?;
            }
        }
        Command::New { name } => match core.create_canvas(prompt)? {
            Some(name) => writeln!(out, "created {name}")?,
            None => {
                let hint = name.map_or_else(String::new, |n| format!(" ({n:?} is not a usable name)"));
                writeln!(out, "cancelled{hint}")?;
            }
        },
        Command::Rename { canvas, title } => {
            open(core, &canvas)?;
            let name = core.rename_active(&title)?;
            writeln!(out, "renamed {canvas} -> {name}")?;
        }
        Command::Delete { canvas, .. } => {
            if !core.canvas_names().contains(&canvas) {
                return Err(CliError::UnknownCanvas(canvas));
            }
            if core.delete_canvas(&canvas, prompt)? {
                writeln!(out, "deleted {canvas}")?;
            } else {
                writeln!(out, "kept {canvas}")?;
            }
        }
        Command::Note(note) => run_note(note.command, core, rng, out)?,
        Command::Pan { canvas, dx, dy } => {
            open(core, &canvas)?;
            write_transform(out, core.pan(dx, dy)?)?;
        }
        Command::Zoom { canvas, how } => {
            open(core, &canvas)?;
            let transform = match how {
                ZoomCommand::In => core.zoom_in()?,
                ZoomCommand::Out => core.zoom_out()?,
                ZoomCommand::Wheel { delta_y } => {
                    core.on_wheel(delta_y);
                    core.transform()
                }
                ZoomCommand::Pinch { ratio } => core.zoom(ZoomDelta::Pinch(ratio), None)?,
            };
            write_transform(out, transform)?;
        }
        Command::Link { canvas, from, to } => {
            open(core, &canvas)?;
            let a = core.note(from).ok_or(EngineError::NoteNotFound(from))?;
            let b = core.note(to).ok_or(EngineError::NoteNotFound(to))?;
            writeln!(out, "{}", connector_path(&Rect::of_note(a), &Rect::of_note(b)))?;
        }
    }
    Ok(())
}

fn run_note<S, R>(
    command: NoteSubcommand,
    core: &mut EngineCore<S>,
    rng: &mut R,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    S: KeyValueStore,
    R: Rng,
{
    match command {
        NoteSubcommand::Add { canvas, content } => {
            open(core, &canvas)?;
            let id = core.create_note(rng)?;
            if let Some(content) = content {
                core.set_note_content(id, &content)?;
            }
            writeln!(out, "{id}")?;
        }
        NoteSubcommand::Move { canvas, id, top, left } => {
            open(core, &canvas)?;
            core.move_note(id, top, left)?;
            writeln!(out, "{id} at top={top} left={left}")?;
        }
        NoteSubcommand::Resize { canvas, id, width, height } => {
            open(core, &canvas)?;
            let (width, height) = core.resize_note(id, width, height)?;
            writeln!(out, "{id} size {width}x{height}")?;
        }
        NoteSubcommand::Color { canvas, id, color } => {
            open(core, &canvas)?;
            let color = core.set_note_color(id, &color)?;
            writeln!(out, "{id} color {color}")?;
        }
        NoteSubcommand::Edit { canvas, id, content } => {
            open(core, &canvas)?;
            core.set_note_content(id, &content)?;
            writeln!(out, "{id} updated")?;
        }
        NoteSubcommand::Rm { canvas, id } => {
            open(core, &canvas)?;
            if core.delete_note(id)? {
                writeln!(out, "{id} deleted")?;
            } else {
                writeln!(out, "{id} not found")?;
            }
        }
    }
    Ok(())
}

/// Make an existing canvas active. Unknown names are an error rather than
/// silently creating an empty canvas.
fn open<S: KeyValueStore>(core: &mut EngineCore<S>, name: &str) -> Result<(), CliError> {
    if !core.canvas_names().iter().any(|n| n == name) {
        return Err(CliError::UnknownCanvas(name.to_owned()));
    }
    core.switch_to(name)?;
    Ok(())
}

fn write_transform(out: &mut dyn Write, t: Transform) -> io::Result<()> {
    writeln!(out, "translate=({}, {}) scale={}", t.translate_x, t.translate_y, t.scale)
}

fn write_summary<S: KeyValueStore>(core: &EngineCore<S>, name: &str, out: &mut dyn Write) -> io::Result<()> {
    let doc = core.document();
    writeln!(out, "{name}: {} note(s)", doc.notes.len())?;
    write_transform(out, doc.transform)?;
    let center = doc.transform.viewport_center(core.viewport_width, core.viewport_height);
    writeln!(out, "viewport center=({}, {})", center.x, center.y)?;
    for note in &doc.notes {
        let Rect { width, height, .. } = Rect::of_note(note);
        let screen = doc.transform.canvas_to_screen(Point::new(note.left, note.top));
        writeln!(
            out,
            "{}  top={} left={} size={}x{} color={} screen=({}, {})  {}",
            note.id, note.top, note.left, width, height, note.color, screen.x, screen.y, note.content
        )?;
    }
    Ok(())
}
