//! Flip and invert commands

use std::process::ExitCode;

use crate::bitgrid::Sprite;
use crate::editor::Workspace;
use crate::renderer::render_text;
use crate::store::FileStorage;
use crate::transforms::{flip, invert};

use super::edit::{commit_and_report, open_workspace};
use super::{parse_token_arg, Context, EXIT_SUCCESS};

#[derive(Debug, Clone, Copy)]
enum Transform {
    Flip { horizontal: bool },
    Invert,
}

impl Transform {
    fn apply(self, sprite: Sprite) -> Sprite {
        match self {
            Transform::Flip { horizontal } => flip(sprite, horizontal),
            Transform::Invert => invert(sprite),
        }
    }

    /// Apply to the workspace's working sprite, as the editor buttons do.
    fn apply_to(self, workspace: &mut Workspace<FileStorage>) -> Sprite {
        match self {
            Transform::Flip { horizontal } => workspace.flip(horizontal),
            Transform::Invert => workspace.invert(),
        }
    }
}

/// Execute the flip command.
pub fn run_flip(ctx: Context, token: &str, horizontal: bool, save: bool) -> ExitCode {
    run_transform(ctx, token, save, Transform::Flip { horizontal })
}

/// Execute the invert command.
pub fn run_invert(ctx: Context, token: &str, save: bool) -> ExitCode {
    run_transform(ctx, token, save, Transform::Invert)
}

fn run_transform(ctx: Context, token: &str, save: bool, transform: Transform) -> ExitCode {
    let sprite = match parse_token_arg(token) {
        Ok(s) => s,
        Err(code) => return code,
    };

    if !save {
        let result = transform.apply(sprite);
        print!("{}", render_text(result));
        println!("{}", result);
        return ExitCode::from(EXIT_SUCCESS);
    }

    let base_url = ctx.config.share.base_url.clone();
    let mut workspace = match open_workspace(ctx) {
        Ok(ws) => ws,
        Err(code) => return code,
    };
    workspace.open(sprite);
    transform.apply_to(&mut workspace);
    commit_and_report(&mut workspace, &base_url)
}
