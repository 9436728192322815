//! CLI dispatch for the `sprite5 edit` and `sprite5 delete` commands.
//!
//! Both go through a [`Workspace`] so the collection and the share
//! fragment are updated exactly as the interactive editor would.

use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bitgrid::Sprite;
use crate::editor::Workspace;
use crate::renderer::render_text;
use crate::store::{CommitOutcome, FileStorage};

use super::{parse_stroke, parse_token_arg, Context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Open a workspace over the data directory with `random_count` suggestions.
pub(crate) fn init_workspace<R: Rng + ?Sized>(
    storage: FileStorage,
    random_count: usize,
    rng: &mut R,
) -> Result<Workspace<FileStorage>, ExitCode> {
    Workspace::init(storage, random_count, rng).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Open a workspace for editing, without random suggestions.
pub(crate) fn open_workspace(ctx: Context) -> Result<Workspace<FileStorage>, ExitCode> {
    init_workspace(ctx.storage, 0, &mut StdRng::seed_from_u64(0))
}

/// Commit the workspace and report what happened.
pub(crate) fn commit_and_report(workspace: &mut Workspace<FileStorage>, base_url: &str) -> ExitCode {
    match workspace.commit() {
        Ok(outcome) => {
            match outcome {
                CommitOutcome::Appended { index } => eprintln!("Saved as #{}", index + 1),
                CommitOutcome::Overwritten { index } => eprintln!("Updated #{}", index + 1),
                CommitOutcome::Deleted { index } => eprintln!("Deleted #{}", index + 1),
                CommitOutcome::Unchanged => eprintln!("Collection unchanged"),
            }
            println!("{}", workspace.session().working());
            println!("{}", workspace.share_url(base_url));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the edit command.
pub fn run_edit(ctx: Context, token: Option<&str>, new: bool, strokes: &[String], dry_run: bool) -> ExitCode {
    let mut gestures = Vec::with_capacity(strokes.len());
    for stroke in strokes {
        match parse_stroke(stroke) {
            Ok(cells) => gestures.push(cells),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let opened = match token {
        Some(t) => match parse_token_arg(t) {
            Ok(s) => Some(s),
            Err(code) => return code,
        },
        None if new => Some(Sprite::EMPTY),
        None => None,
    };

    let base_url = ctx.config.share.base_url.clone();
    let mut workspace = match open_workspace(ctx) {
        Ok(ws) => ws,
        Err(code) => return code,
    };
    if let Some(sprite) = opened {
        workspace.open(sprite);
    }

    for cells in &gestures {
        workspace.session_mut().stroke(cells);
    }

    if dry_run {
        print!("{}", render_text(workspace.session().working()));
        println!("{}", workspace.session().working());
        return ExitCode::from(EXIT_SUCCESS);
    }

    commit_and_report(&mut workspace, &base_url)
}

/// Execute the delete command: commit an empty sprite over TOKEN.
pub fn run_delete(ctx: Context, token: &str) -> ExitCode {
    let sprite = match parse_token_arg(token) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let base_url = ctx.config.share.base_url.clone();
    let mut workspace = match open_workspace(ctx) {
        Ok(ws) => ws,
        Err(code) => return code,
    };

    if !workspace.collection().contains(sprite) {
        eprintln!("Error: {} is not in the saved collection", sprite);
        return ExitCode::from(EXIT_ERROR);
    }

    workspace.open(sprite);
    workspace.session_mut().set_working(Sprite::EMPTY);
    commit_and_report(&mut workspace, &base_url)
}
