//! List command: saved collection or seed gallery

use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bitgrid::Sprite;

use super::edit::init_workspace;
use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the list command.
pub fn run_list(ctx: &Context, gallery: bool, json: bool) -> ExitCode {
    let workspace = match init_workspace(ctx.storage.clone(), 0, &mut StdRng::seed_from_u64(0)) {
        Ok(ws) => ws,
        Err(code) => return code,
    };
    let sprites: &[Sprite] = if gallery {
        workspace.initial_sprites()
    } else {
        workspace.collection().as_slice()
    };

    if json {
        let tokens: Vec<String> = sprites.iter().map(ToString::to_string).collect();
        match serde_json::to_string_pretty(&tokens) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    if sprites.is_empty() {
        eprintln!("No saved sprites.");
    }
    for (i, sprite) in sprites.iter().enumerate() {
        println!("{:>3}  {}", i + 1, sprite);
    }

    ExitCode::from(EXIT_SUCCESS)
}
