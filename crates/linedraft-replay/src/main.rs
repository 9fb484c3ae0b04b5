//! Headless replay of editing sessions.
//!
//! Reads a JSON script of input events and editor commands, runs it against
//! an [`Editor`], prints the resulting status and saves the final state.
//!
//! ```json
//! {
//!   "config": { "historyLimit": 50 },
//!   "steps": [
//!     { "type": "pointerDown", "point": { "x": 0, "y": 0 } },
//!     { "type": "pointerMove", "point": { "x": 40, "y": 0 } },
//!     { "type": "pointerUp", "point": { "x": 40, "y": 0 } },
//!     { "command": "setMode", "mode": "edit" }
//!   ]
//! }
//! ```

use clap::Parser;
use linedraft_core::storage::{DEFAULT_STATE_KEY, load_editor, save_editor};
use linedraft_core::{Command, Editor, EditorConfig, FileStorage, InputEvent, StorageError};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about = "Replay a LineDraft editing script")]
struct Args {
    /// Script to replay.
    script: PathBuf,

    /// Directory for saved states. Defaults to the per-user data directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Key the final state is saved under.
    #[arg(long, default_value = DEFAULT_STATE_KEY)]
    key: String,

    /// Start from the state saved under `--key` instead of an empty editor.
    #[arg(long)]
    resume: bool,

    /// Do not save the final state.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Error)]
enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One scripted step: a raw input event or a direct editor command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Step {
    Input(InputEvent),
    Command(Command),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    #[serde(default)]
    config: EditorConfig,
    #[serde(default)]
    steps: Vec<Step>,
}

/// Run every step. Returns the number of editor commands applied.
fn replay(editor: &mut Editor, steps: Vec<Step>) -> usize {
    let mut applied = 0;
    for (i, step) in steps.into_iter().enumerate() {
        log::trace!("step {}: {:?}", i, step);
        match step {
            Step::Input(event) => applied += editor.handle_input(&event),
            Step::Command(command) => {
                editor.apply(command);
                applied += 1;
            }
        }
    }
    applied
}

fn run(args: Args) -> Result<(), ReplayError> {
    let text = std::fs::read_to_string(&args.script).map_err(|source| ReplayError::Read {
        path: args.script.clone(),
        source,
    })?;
    let script: Script = serde_json::from_str(&text)?;

    let storage = match args.dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };

    let mut editor = if args.resume {
        pollster::block_on(load_editor(&storage, &args.key, script.config))?
    } else {
        Editor::with_config(script.config)
    };

    let steps = script.steps.len();
    let applied = replay(&mut editor, script.steps);
    log::info!("Replayed {} steps ({} commands)", steps, applied);

    let status = editor.status();
    println!(
        "mode: {}  lines: {}  groups: {}  selected: {}  history: {}/{}",
        status.mode.label(),
        editor.lines().len(),
        editor.groups().len(),
        editor.selected_line_ids().len(),
        editor.history().index() + 1,
        editor.history().len(),
    );
    if let Some(eq) = status.equation {
        println!("hovered line: {:.3}x + {:.3}y + {:.3} = 0", eq.a, eq.b, eq.c);
    }

    if !args.dry_run {
        pollster::block_on(save_editor(&storage, &args.key, &editor))?;
        println!("saved to {}", storage.state_path(&args.key).display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
